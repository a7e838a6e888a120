use glam::{Mat4, Vec3};

use crate::asset::{Assets, Handle};
use crate::error::Result;
use crate::input::InputState;
use crate::renderer::{
    floor_mesh, pyramid_mesh, DirectionalLight, LightBase, Material, Mesh, ModelData,
    RenderContext, ShadowRenderer, Texture,
};
use crate::scene::{depth_debug_transform, Camera, DepthDebugQuad, SceneObject, ShadowScene};
use crate::settings::{DemoSettings, ModelPlacement};

/// Light shining mostly downwards and slightly away from the camera.
const LIGHT_DIRECTION: Vec3 = Vec3::new(0.0, -7.0, -1.0);
const LIGHT_AMBIENT: f32 = 0.1;
const LIGHT_DIFFUSE: f32 = 0.6;

struct DemoTextures {
    brick: Handle<Texture>,
    dirt: Handle<Texture>,
    plain: Handle<Texture>,
}

/// Two pyramids on a floor lit by a shadow-casting directional light, plus
/// a second floor showing the shadow map.
pub struct ShadowDemo {
    assets: Assets,
    scene: ShadowScene,
    renderer: ShadowRenderer,
}

impl super::Demo for ShadowDemo {
    const TITLE: &'static str = "Shadow Demo";

    fn init(context: &RenderContext, settings: &DemoSettings) -> Result<Self> {
        let main_light = DirectionalLight::new(
            LightBase::new(Vec3::ONE, LIGHT_AMBIENT, LIGHT_DIFFUSE),
            LIGHT_DIRECTION,
            settings.shadow_map_size,
        );
        let renderer = ShadowRenderer::new(
            &context.device,
            context.config.format,
            &main_light,
            settings.shader_dir.as_deref(),
        )?;

        let camera = Camera::new(
            Vec3::new(0.0, 0.0, 1.0),
            Vec3::Y,
            -90.0,
            0.0,
            settings.camera.move_speed,
            settings.camera.turn_speed,
        );

        let mut assets = Assets::new();
        let mut scene = ShadowScene::new(camera, main_light);

        let textures = load_textures(context, &renderer, settings, &mut assets);
        let pyramid = assets
            .meshes
            .insert(Mesh::from_data(&context.device, "Pyramid", &pyramid_mesh()));
        let floor = assets
            .meshes
            .insert(Mesh::from_data(&context.device, "Floor", &floor_mesh()));

        scene.add_object(SceneObject {
            mesh: pyramid,
            texture: textures.brick,
            material: Material::shiny(),
            transform: Mat4::from_translation(Vec3::new(0.0, 0.0, -2.5)),
        });
        scene.add_object(SceneObject {
            mesh: pyramid,
            texture: textures.dirt,
            material: Material::dull(),
            transform: Mat4::from_translation(Vec3::new(0.0, 3.0, -2.5)),
        });
        scene.add_object(SceneObject {
            mesh: floor,
            texture: textures.dirt,
            material: Material::shiny(),
            transform: Mat4::from_translation(Vec3::new(0.0, -2.0, 0.0)),
        });

        for placement in &settings.models {
            match ModelData::load(&placement.path) {
                Ok(model) => add_model(
                    context,
                    &renderer,
                    &mut assets,
                    &mut scene,
                    &model,
                    placement,
                    textures.plain,
                ),
                Err(err) => log::error!("{err}. Skipping model."),
            }
        }

        scene.depth_debug = Some(DepthDebugQuad {
            mesh: floor,
            transform: depth_debug_transform(),
        });

        log::info!(
            "Shadow scene ready: {} objects, {} meshes, {} textures, {}px shadow map",
            scene.objects.len(),
            assets.meshes.len(),
            assets.textures.len(),
            renderer.shadow_map_size()
        );

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

fn load_textures(
    context: &RenderContext,
    renderer: &ShadowRenderer,
    settings: &DemoSettings,
    assets: &mut Assets,
) -> DemoTextures {
    let mut load = |name: &str| {
        let path = settings.texture_dir.join(name);
        let texture = Texture::from_path_or_plain(
            &context.device,
            &context.queue,
            renderer.texture_layout(),
            path,
        );
        assets.textures.insert(texture)
    };

    DemoTextures {
        brick: load("brick.png"),
        dirt: load("dirt.png"),
        plain: load("plain.png"),
    }
}

fn add_model(
    context: &RenderContext,
    renderer: &ShadowRenderer,
    assets: &mut Assets,
    scene: &mut ShadowScene,
    model: &ModelData,
    placement: &ModelPlacement,
    fallback: Handle<Texture>,
) {
    let label = model.path.to_string_lossy();
    let images: Vec<Option<Handle<Texture>>> = model
        .images
        .iter()
        .enumerate()
        .map(|(i, image)| {
            let image = image.as_ref()?;
            let texture = Texture::from_rgba(
                &context.device,
                &context.queue,
                renderer.texture_layout(),
                &image.pixels,
                image.width,
                image.height,
                Some(&format!("{label}.Image{i}")),
            );
            Some(assets.textures.insert(texture))
        })
        .collect();

    let root = placement.transform();
    for (i, part) in model.parts.iter().enumerate() {
        let mesh = Mesh::from_data(&context.device, &format!("{label}.Part{i}"), &part.mesh);
        let texture = part
            .image
            .and_then(|index| images.get(index).copied().flatten())
            .unwrap_or(fallback);

        scene.add_object(SceneObject {
            mesh: assets.meshes.insert(mesh),
            texture,
            material: Material::dull(),
            transform: root * part.transform,
        });
    }
}
