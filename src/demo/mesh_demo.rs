use glam::Vec3;

use crate::asset::Assets;
use crate::error::Result;
use crate::input::InputState;
use crate::renderer::{viewer_pyramid_mesh, BasicRenderer, Mesh, RenderContext};
use crate::scene::{
    pyramid_transforms, Camera, MeshObject, MeshScene, MESH_DEMO_MOVE_SPEED, MESH_DEMO_TURN_SPEED,
};
use crate::settings::DemoSettings;

/// Two unlit pyramids coloured by vertex position.
pub struct MeshDemo {
    assets: Assets,
    scene: MeshScene,
    renderer: BasicRenderer,
}

impl super::Demo for MeshDemo {
    const TITLE: &'static str = "Mesh Demo";

    fn init(context: &RenderContext, settings: &DemoSettings) -> Result<Self> {
        let renderer = BasicRenderer::new(
            &context.device,
            context.config.format,
            settings.shader_dir.as_deref(),
        )?;

        let camera = Camera::new(
            Vec3::ZERO,
            Vec3::Y,
            -90.0,
            0.0,
            MESH_DEMO_MOVE_SPEED,
            MESH_DEMO_TURN_SPEED,
        );
        let mut scene = MeshScene::new(camera);
        let mut assets = Assets::new();

        let pyramid = assets
            .meshes
            .insert(Mesh::from_data(&context.device, "Pyramid", &viewer_pyramid_mesh()));
        for transform in pyramid_transforms() {
            scene.objects.push(MeshObject {
                mesh: pyramid,
                transform,
            });
        }

        log::info!("Mesh scene ready: {} objects", scene.objects.len());

        Ok(Self {
            assets,
            scene,
            renderer,
        })
    }

    fn update(&mut self, input: &mut InputState, dt: f32) {
        self.scene.update(input, dt);
    }

    fn render(&mut self, context: &RenderContext) -> std::result::Result<(), wgpu::SurfaceError> {
        self.renderer.render(context, &self.assets, &self.scene)
    }
}
