// renderer/material.rs (Phong version)

/// Specular response of a surface.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Material {
    pub specular_intensity: f32,
    pub shininess: f32,
}

impl Material {
    pub const fn new(specular_intensity: f32, shininess: f32) -> Self {
        Self {
            specular_intensity,
            shininess,
        }
    }

    pub const fn shiny() -> Self {
        Self::new(4.0, 256.0)
    }

    pub const fn dull() -> Self {
        Self::new(0.3, 4.0)
    }

    /// Packed as `(specular_intensity, shininess, 0, 0)` for the objects buffer.
    pub fn to_raw(self) -> [f32; 4] {
        [self.specular_intensity, self.shininess.max(1.0), 0.0, 0.0]
    }
}

impl Default for Material {
    fn default() -> Self {
        Self::dull()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn raw_layout_puts_intensity_first() {
        assert_eq!(Material::shiny().to_raw(), [4.0, 256.0, 0.0, 0.0]);
    }

    #[test]
    fn shininess_never_drops_below_one() {
        assert_eq!(Material::new(1.0, 0.0).to_raw()[1], 1.0);
    }
}
