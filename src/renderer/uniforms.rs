// renderer/uniforms.rs
use bytemuck::{Pod, Zeroable};
use glam::{Mat4, Vec3};

use super::material::Material;

/// Per-frame camera and light-space matrices for the on-screen passes.
#[repr(C)]
#[derive(Clone, Copy, Pod, Zeroable, Debug)]
pub struct GlobalsUniform {
    pub view: [[f32; 4]; 4],
    pub projection: [[f32; 4]; 4],
    pub light_transform: [[f32; 4]; 4],
    pub eye_position: [f32; 4],
}

impl GlobalsUniform {
    pub fn new(view: Mat4, projection: Mat4, light_transform: Mat4, eye: Vec3) -> Self {
        Self {
            view: view.to_cols_array_2d(),
            projection: projection.to_cols_array_2d(),
            light_transform: light_transform.to_cols_array_2d(),
            eye_position: eye.extend(1.0).to_array(),
        }
    }
}

impl Default for GlobalsUniform {
    fn default() -> Self {
        Self::new(Mat4::IDENTITY, Mat4::IDENTITY, Mat4::IDENTITY, Vec3::ZERO)
    }
}

/// The only input of the shadow pass besides geometry.
#[repr(C)]
#[derive(Clone, Copy, Pod, Zeroable, Debug)]
pub struct ShadowViewUniform {
    pub light_transform: [[f32; 4]; 4],
}

impl ShadowViewUniform {
    pub fn new(light_transform: Mat4) -> Self {
        Self {
            light_transform: light_transform.to_cols_array_2d(),
        }
    }
}

/// One entry of the objects storage buffer, indexed by instance index.
#[repr(C)]
#[derive(Clone, Copy, Pod, Zeroable, Debug, PartialEq)]
pub struct ObjectData {
    pub model: [[f32; 4]; 4],
    pub normal_matrix: [[f32; 4]; 4],
    pub material: [f32; 4],
}

impl ObjectData {
    pub fn new(model: Mat4, material: Material) -> Self {
        let normal_matrix = if model.determinant().abs() > f32::EPSILON {
            model.inverse().transpose()
        } else {
            Mat4::IDENTITY
        };
        Self {
            model: model.to_cols_array_2d(),
            normal_matrix: normal_matrix.to_cols_array_2d(),
            material: material.to_raw(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn uniform_sizes_match_wgsl_layout() {
        // 3 * mat4x4<f32> + vec4<f32>
        assert_eq!(std::mem::size_of::<GlobalsUniform>(), 208);
        assert_eq!(std::mem::size_of::<ShadowViewUniform>(), 64);
        // 2 * mat4x4<f32> + vec4<f32>
        assert_eq!(std::mem::size_of::<ObjectData>(), 144);
    }

    #[test]
    fn normal_matrix_undoes_non_uniform_scale() {
        let model = Mat4::from_scale(Vec3::new(0.4, 0.4, 1.0));
        let data = ObjectData::new(model, Material::default());
        let normal = Mat4::from_cols_array_2d(&data.normal_matrix);
        let n = normal.transform_vector3(Vec3::X);
        assert!(n.abs_diff_eq(Vec3::new(2.5, 0.0, 0.0), 1e-5));
    }

    #[test]
    fn singular_model_falls_back_to_identity_normals() {
        let data = ObjectData::new(Mat4::ZERO, Material::default());
        assert_eq!(data.normal_matrix, Mat4::IDENTITY.to_cols_array_2d());
    }
}
