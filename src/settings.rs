use std::path::PathBuf;

use log::{info, warn};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DemoSettings {
    #[serde(default)]
    pub resolution: Resolution,
    #[serde(default = "DemoSettings::default_shadow_map_size")]
    pub shadow_map_size: u32,
    #[serde(default)]
    pub present_mode: PresentModeSetting,
    #[serde(default = "DemoSettings::default_texture_dir")]
    pub texture_dir: PathBuf,
    /// Directory with `<name>.wgsl` overrides for the embedded shaders.
    #[serde(default)]
    pub shader_dir: Option<PathBuf>,
    #[serde(default)]
    pub camera: CameraSettings,
    #[serde(default)]
    pub models: Vec<ModelPlacement>,
}

impl Default for DemoSettings {
    fn default() -> Self {
        Self {
            resolution: Resolution::default(),
            shadow_map_size: Self::default_shadow_map_size(),
            present_mode: PresentModeSetting::default(),
            texture_dir: Self::default_texture_dir(),
            shader_dir: None,
            camera: CameraSettings::default(),
            models: Vec::new(),
        }
    }
}

impl DemoSettings {
    pub fn load() -> Self {
        Self::load_from_path("settings.json")
    }

    pub fn load_from_path<P: AsRef<std::path::Path>>(path: P) -> Self {
        use std::fs;

        let path = path.as_ref();
        match fs::read_to_string(path) {
            Ok(contents) => match serde_json::from_str::<DemoSettings>(&contents) {
                Ok(settings) => {
                    info!("Loaded demo settings from {:?}", path);
                    settings.validate()
                }
                Err(err) => {
                    warn!(
                        "Failed to parse {:?} ({}). Falling back to default settings.",
                        path, err
                    );
                    DemoSettings::default()
                }
            },
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                info!("Settings file {:?} not found. Using default settings.", path);
                DemoSettings::default()
            }
            Err(err) => {
                warn!(
                    "Failed to read {:?} ({}). Falling back to default settings.",
                    path, err
                );
                DemoSettings::default()
            }
        }
    }

    fn validate(mut self) -> Self {
        if self.shadow_map_size == 0 {
            warn!("Shadow map size must be greater than zero. Using default value.");
            self.shadow_map_size = Self::default_shadow_map_size();
        }

        let max_size = wgpu::Limits::default().max_texture_dimension_2d;
        if self.shadow_map_size > max_size {
            warn!(
                "Shadow map size {} exceeds the texture limit of {}. Using {}.",
                self.shadow_map_size, max_size, max_size
            );
            self.shadow_map_size = max_size;
        }

        if self.resolution.width == 0 || self.resolution.height == 0 {
            warn!("Resolution must be greater than zero. Using default resolution.");
            self.resolution = Resolution::default();
        }

        if !(self.camera.move_speed.is_finite() && self.camera.move_speed > 0.0) {
            warn!("Camera move speed must be positive. Using default value.");
            self.camera.move_speed = CameraSettings::default().move_speed;
        }

        if !(self.camera.turn_speed.is_finite() && self.camera.turn_speed > 0.0) {
            warn!("Camera turn speed must be positive. Using default value.");
            self.camera.turn_speed = CameraSettings::default().turn_speed;
        }

        self.models.retain(|model| {
            let keep = model.scale.is_finite() && model.scale > 0.0;
            if !keep {
                warn!("Skipping model {:?} with invalid scale {}", model.path, model.scale);
            }
            keep
        });

        self
    }

    pub fn present_mode(&self, available: &[wgpu::PresentMode]) -> wgpu::PresentMode {
        let desired = self.present_mode.to_wgpu();
        if available.contains(&desired) {
            return desired;
        }

        warn!(
            "Requested present mode {:?} is not supported. Falling back to FIFO.",
            desired
        );

        if available.contains(&wgpu::PresentMode::Fifo) {
            wgpu::PresentMode::Fifo
        } else {
            available
                .first()
                .copied()
                .unwrap_or(wgpu::PresentMode::Fifo)
        }
    }

    const fn default_shadow_map_size() -> u32 {
        256
    }

    fn default_texture_dir() -> PathBuf {
        PathBuf::from("Textures")
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Resolution {
    pub width: u32,
    pub height: u32,
}

impl Default for Resolution {
    fn default() -> Self {
        Self {
            width: 800,
            height: 600,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CameraSettings {
    pub move_speed: f32,
    pub turn_speed: f32,
}

impl Default for CameraSettings {
    fn default() -> Self {
        Self {
            move_speed: 5.0,
            turn_speed: 0.5,
        }
    }
}

/// A glTF file placed into the shadow scene.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelPlacement {
    pub path: PathBuf,
    #[serde(default)]
    pub translation: [f32; 3],
    #[serde(default = "ModelPlacement::default_scale")]
    pub scale: f32,
    #[serde(default)]
    pub rotation_y_degrees: f32,
}

impl ModelPlacement {
    const fn default_scale() -> f32 {
        1.0
    }

    pub fn transform(&self) -> glam::Mat4 {
        glam::Mat4::from_scale_rotation_translation(
            glam::Vec3::splat(self.scale),
            glam::Quat::from_rotation_y(self.rotation_y_degrees.to_radians()),
            glam::Vec3::from_array(self.translation),
        )
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PresentModeSetting {
    #[default]
    Fifo,
    FifoRelaxed,
    Immediate,
    Mailbox,
    AutoVsync,
    AutoNoVsync,
}

impl PresentModeSetting {
    fn to_wgpu(&self) -> wgpu::PresentMode {
        match self {
            PresentModeSetting::Fifo => wgpu::PresentMode::Fifo,
            PresentModeSetting::FifoRelaxed => wgpu::PresentMode::FifoRelaxed,
            PresentModeSetting::Immediate => wgpu::PresentMode::Immediate,
            PresentModeSetting::Mailbox => wgpu::PresentMode::Mailbox,
            PresentModeSetting::AutoVsync => wgpu::PresentMode::AutoVsync,
            PresentModeSetting::AutoNoVsync => wgpu::PresentMode::AutoNoVsync,
        }
    }
}
