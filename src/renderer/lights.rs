use bytemuck::{Pod, Zeroable};
use glam::{Mat4, Vec3};

pub const MAX_POINT_LIGHTS: usize = 3;
pub const MAX_SPOT_LIGHTS: usize = 3;

/// Half-width of the square orthographic volume covered by the
/// directional shadow map.
pub const DIRECTIONAL_SHADOW_EXTENT: f32 = 20.0;
pub const DIRECTIONAL_SHADOW_NEAR: f32 = 0.1;
pub const DIRECTIONAL_SHADOW_FAR: f32 = 100.0;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LightBase {
    pub color: Vec3,
    pub ambient_intensity: f32,
    pub diffuse_intensity: f32,
}

impl LightBase {
    pub fn new(color: Vec3, ambient_intensity: f32, diffuse_intensity: f32) -> Self {
        Self {
            color,
            ambient_intensity,
            diffuse_intensity,
        }
    }

    fn color_ambient(&self) -> [f32; 4] {
        self.color.extend(self.ambient_intensity).to_array()
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DirectionalLight {
    pub base: LightBase,
    direction: Vec3,
    shadow_map_size: u32,
}

impl DirectionalLight {
    pub fn new(base: LightBase, direction: Vec3, shadow_map_size: u32) -> Self {
        Self {
            base,
            direction,
            shadow_map_size: shadow_map_size.max(1),
        }
    }

    pub fn direction(&self) -> Vec3 {
        self.direction
    }

    pub fn set_direction(&mut self, direction: Vec3) {
        self.direction = direction;
    }

    /// Resolution of the square shadow map, fixed at construction.
    pub fn shadow_map_size(&self) -> u32 {
        self.shadow_map_size
    }

    /// Orthographic projection × view looking from `-direction` towards the
    /// origin. Derived on demand so it always follows the current direction.
    pub fn light_transform(&self) -> Mat4 {
        let direction = safe_normalize(self.direction, Vec3::NEG_Y);
        let eye = -self.direction;
        let eye = if eye.length_squared() > 1e-8 { eye } else { -direction };

        let view = Mat4::look_at_rh(eye, Vec3::ZERO, shadow_up(direction));
        let projection = Mat4::orthographic_rh(
            -DIRECTIONAL_SHADOW_EXTENT,
            DIRECTIONAL_SHADOW_EXTENT,
            -DIRECTIONAL_SHADOW_EXTENT,
            DIRECTIONAL_SHADOW_EXTENT,
            DIRECTIONAL_SHADOW_NEAR,
            DIRECTIONAL_SHADOW_FAR,
        );

        projection * view
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Attenuation {
    pub constant: f32,
    pub linear: f32,
    pub exponent: f32,
}

impl Attenuation {
    pub fn new(constant: f32, linear: f32, exponent: f32) -> Self {
        Self {
            constant,
            linear,
            exponent,
        }
    }

    fn to_raw(self) -> [f32; 4] {
        [self.constant, self.linear, self.exponent, 0.0]
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PointLight {
    pub base: LightBase,
    pub position: Vec3,
    pub attenuation: Attenuation,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SpotLight {
    pub point: PointLight,
    pub direction: Vec3,
    /// Cone half-angle in degrees.
    pub edge_degrees: f32,
}

impl SpotLight {
    /// Cosine of the cone half-angle, compared against in the shader.
    pub fn processed_edge(&self) -> f32 {
        self.edge_degrees.to_radians().cos()
    }
}

#[repr(C)]
#[derive(Clone, Copy, Pod, Zeroable, Debug, PartialEq)]
pub struct DirectionalLightRaw {
    pub color_ambient: [f32; 4],
    pub direction_diffuse: [f32; 4],
}

impl DirectionalLightRaw {
    pub fn from_light(light: &DirectionalLight) -> Self {
        let direction = safe_normalize(light.direction, Vec3::NEG_Y);
        Self {
            color_ambient: light.base.color_ambient(),
            direction_diffuse: direction.extend(light.base.diffuse_intensity).to_array(),
        }
    }
}

#[repr(C)]
#[derive(Clone, Copy, Pod, Zeroable, Debug, PartialEq)]
pub struct PointLightRaw {
    pub color_ambient: [f32; 4],
    pub position_diffuse: [f32; 4],
    pub attenuation: [f32; 4],
}

impl PointLightRaw {
    pub fn from_light(light: &PointLight) -> Self {
        Self {
            color_ambient: light.base.color_ambient(),
            position_diffuse: light.position.extend(light.base.diffuse_intensity).to_array(),
            attenuation: light.attenuation.to_raw(),
        }
    }
}

#[repr(C)]
#[derive(Clone, Copy, Pod, Zeroable, Debug, PartialEq)]
pub struct SpotLightRaw {
    pub point: PointLightRaw,
    pub direction_edge: [f32; 4],
}

impl SpotLightRaw {
    pub fn from_light(light: &SpotLight) -> Self {
        let direction = safe_normalize(light.direction, Vec3::NEG_Y);
        Self {
            point: PointLightRaw::from_light(&light.point),
            direction_edge: direction.extend(light.processed_edge()).to_array(),
        }
    }
}

#[repr(C)]
#[derive(Clone, Copy, Pod, Zeroable)]
pub struct LightsUniform {
    pub counts: [u32; 4],
    pub directional: DirectionalLightRaw,
    pub points: [PointLightRaw; MAX_POINT_LIGHTS],
    pub spots: [SpotLightRaw; MAX_SPOT_LIGHTS],
}

impl LightsUniform {
    pub fn from_lights(
        directional: &DirectionalLight,
        points: &[PointLight],
        spots: &[SpotLight],
    ) -> Self {
        let mut uniform = Self::zeroed();
        uniform.directional = DirectionalLightRaw::from_light(directional);

        if points.len() > MAX_POINT_LIGHTS {
            log::warn!(
                "{} point lights supplied, only the first {} are used",
                points.len(),
                MAX_POINT_LIGHTS
            );
        }
        let point_count = points.len().min(MAX_POINT_LIGHTS);
        uniform.counts[0] = point_count as u32;
        for (dst, src) in uniform.points.iter_mut().zip(points).take(point_count) {
            *dst = PointLightRaw::from_light(src);
        }

        if spots.len() > MAX_SPOT_LIGHTS {
            log::warn!(
                "{} spot lights supplied, only the first {} are used",
                spots.len(),
                MAX_SPOT_LIGHTS
            );
        }
        let spot_count = spots.len().min(MAX_SPOT_LIGHTS);
        uniform.counts[1] = spot_count as u32;
        for (dst, src) in uniform.spots.iter_mut().zip(spots).take(spot_count) {
            *dst = SpotLightRaw::from_light(src);
        }

        uniform
    }

    pub fn point_count(&self) -> u32 {
        self.counts[0]
    }

    pub fn spot_count(&self) -> u32 {
        self.counts[1]
    }
}

impl Default for LightsUniform {
    /// No lights at all; used by passes that ignore lighting.
    fn default() -> Self {
        Self::zeroed()
    }
}

/// Projects a world position into shadow-map space: x/y are texture
/// coordinates (y flipped from clip space), z is the stored depth.
/// Points behind the light's projection return `-1` in every component.
pub fn shadow_coords(light_transform: Mat4, world_pos: Vec3) -> Vec3 {
    let clip = light_transform * world_pos.extend(1.0);
    if clip.w <= 0.0 {
        return Vec3::splat(-1.0);
    }
    let ndc = clip.truncate() / clip.w;
    Vec3::new(ndc.x * 0.5 + 0.5, -ndc.y * 0.5 + 0.5, ndc.z)
}

fn shadow_up(direction: Vec3) -> Vec3 {
    if direction.abs().dot(Vec3::Y) > 0.999 {
        Vec3::Z
    } else {
        Vec3::Y
    }
}

fn safe_normalize(v: Vec3, fallback: Vec3) -> Vec3 {
    v.try_normalize().unwrap_or(fallback)
}
