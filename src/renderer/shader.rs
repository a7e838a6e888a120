use std::borrow::Cow;
use std::path::Path;

use crate::error::{DemoError, Result};
use crate::io;

/// A WGSL program with `vs_main` and `fs_main` entry points.
#[derive(Clone, Copy, Debug)]
pub struct ShaderProgram {
    pub name: &'static str,
    embedded: &'static str,
}

impl ShaderProgram {
    pub const fn new(name: &'static str, embedded: &'static str) -> Self {
        Self { name, embedded }
    }

    /// `<dir>/<name>.wgsl` when an override directory is given, otherwise
    /// the copy compiled into the binary.
    pub fn source(&self, override_dir: Option<&Path>) -> Result<Cow<'static, str>> {
        match override_dir {
            Some(dir) => {
                let path = dir.join(format!("{}.wgsl", self.name));
                log::info!("Loading shader `{}` from {:?}", self.name, path);
                io::load_text(&path).map(Cow::Owned)
            }
            None => Ok(Cow::Borrowed(self.embedded)),
        }
    }

    /// Compile the program, turning validation failures into an error
    /// instead of a panic at pipeline creation.
    pub fn compile(
        &self,
        device: &wgpu::Device,
        override_dir: Option<&Path>,
    ) -> Result<wgpu::ShaderModule> {
        let source = self.source(override_dir)?;

        device.push_error_scope(wgpu::ErrorFilter::Validation);
        let module = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some(self.name),
            source: wgpu::ShaderSource::Wgsl(source),
        });

        if let Some(err) = pollster::block_on(device.pop_error_scope()) {
            log::error!("Shader `{}` failed to compile:\n{}", self.name, err);
            return Err(DemoError::Shader {
                name: self.name.to_string(),
                message: err.to_string(),
            });
        }

        Ok(module)
    }
}

pub const SHADOW_SHADER: ShaderProgram =
    ShaderProgram::new("directional_shadow_map", include_str!("../shader/directional_shadow_map.wgsl"));
pub const LIT_SHADER: ShaderProgram = ShaderProgram::new("lit", include_str!("../shader/lit.wgsl"));
pub const DEPTH_DEBUG_SHADER: ShaderProgram =
    ShaderProgram::new("depthmap_debug", include_str!("../shader/depthmap_debug.wgsl"));
pub const BASIC_SHADER: ShaderProgram =
    ShaderProgram::new("basic", include_str!("../shader/basic.wgsl"));
