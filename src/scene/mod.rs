pub mod camera;
pub mod mesh_scene;
pub mod shadow_scene;

pub use camera::Camera;
pub use mesh_scene::{
    pyramid_transforms, MeshObject, MeshScene, MESH_DEMO_MOVE_SPEED, MESH_DEMO_TURN_SPEED,
};
pub use shadow_scene::{
    depth_debug_transform, DepthDebugQuad, SceneObject, ShadowScene, LIGHT_STEP,
};
