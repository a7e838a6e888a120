pub mod basic_renderer;
pub mod context;
pub mod frame;
pub mod lights;
pub mod material;
pub mod mesh;
pub mod model;
pub mod objects;
pub mod pipeline_builder;
pub mod primitives;
pub mod shader;
pub mod shadow_map;
pub mod shadow_renderer;
pub mod texture;
pub mod uniforms;
pub mod vertex;

pub use basic_renderer::BasicRenderer;
pub use context::{RenderContext, DEPTH_FORMAT};
pub use frame::{FrameBindings, FramePass, FRAME_PASSES};
pub use lights::{
    shadow_coords, Attenuation, DirectionalLight, LightBase, LightsUniform, PointLight, SpotLight,
    MAX_POINT_LIGHTS, MAX_SPOT_LIGHTS,
};
pub use material::Material;
pub use mesh::Mesh;
pub use model::{ModelData, ModelImage, ModelPart};
pub use objects::ObjectsBuffer;
pub use pipeline_builder::PipelineBuilder;
pub use primitives::{average_normals, floor_mesh, pyramid_mesh, viewer_pyramid_mesh, MeshData};
pub use shader::ShaderProgram;
pub use shadow_map::{fit_shadow_map_size, ShadowMap, ShadowMapLayouts, SHADOW_FORMAT};
pub use shadow_renderer::ShadowRenderer;
pub use texture::Texture;
pub use uniforms::{GlobalsUniform, ObjectData, ShadowViewUniform};
pub use vertex::Vertex;
