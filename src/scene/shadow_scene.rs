use glam::{Mat4, Quat, Vec3};

use crate::asset::Handle;
use crate::input::{InputState, KeyCode};
use crate::renderer::{
    DirectionalLight, Material, Mesh, ObjectData, PointLight, SpotLight, Texture,
};

use super::Camera;

/// How far one frame of arrow-key input moves the light direction.
pub const LIGHT_STEP: f32 = 0.1;

/// Where the depth-map preview floor sits, away from the lit scene.
pub fn depth_debug_transform() -> Mat4 {
    Mat4::from_rotation_translation(
        Quat::from_rotation_y(180f32.to_radians()),
        Vec3::new(25.0, -2.0, 0.0),
    )
}

#[derive(Debug, Clone, Copy)]
pub struct SceneObject {
    pub mesh: Handle<Mesh>,
    pub texture: Handle<Texture>,
    pub material: Material,
    pub transform: Mat4,
}

/// Mesh that displays the raw shadow map instead of being lit.
#[derive(Debug, Clone, Copy)]
pub struct DepthDebugQuad {
    pub mesh: Handle<Mesh>,
    pub transform: Mat4,
}

/// Everything the shadow demo renders, independent of the GPU resources
/// the handles point at.
pub struct ShadowScene {
    pub camera: Camera,
    pub main_light: DirectionalLight,
    pub point_lights: Vec<PointLight>,
    pub spot_lights: Vec<SpotLight>,
    pub objects: Vec<SceneObject>,
    pub depth_debug: Option<DepthDebugQuad>,
}

impl ShadowScene {
    pub fn new(camera: Camera, main_light: DirectionalLight) -> Self {
        Self {
            camera,
            main_light,
            point_lights: Vec::new(),
            spot_lights: Vec::new(),
            objects: Vec::new(),
            depth_debug: None,
        }
    }

    pub fn add_object(&mut self, object: SceneObject) {
        self.objects.push(object);
    }

    /// Apply one frame of input: arrow keys steer the light, WASD and the
    /// mouse drive the camera.
    pub fn update(&mut self, input: &mut InputState, dt: f32) {
        self.steer_light(input);
        self.camera.key_control(input, dt);
        self.camera.mouse_control(input.take_mouse_delta());
    }

    fn steer_light(&mut self, input: &InputState) {
        let mut direction = self.main_light.direction();
        let before = direction;

        if input.pressed(KeyCode::ArrowRight) {
            direction.x += LIGHT_STEP;
        }
        if input.pressed(KeyCode::ArrowLeft) {
            direction.x -= LIGHT_STEP;
        }
        if input.pressed(KeyCode::ArrowUp) {
            direction.z -= LIGHT_STEP;
        }
        if input.pressed(KeyCode::ArrowDown) {
            direction.z += LIGHT_STEP;
        }

        if direction != before {
            self.main_light.set_direction(direction);
            log::debug!("Light direction: {direction}");
        }
    }

    /// Object buffer contents: scene objects in order, followed by the depth
    /// debug quad when present.
    pub fn object_data(&self) -> Vec<ObjectData> {
        self.objects
            .iter()
            .map(|object| ObjectData::new(object.transform, object.material))
            .chain(
                self.depth_debug
                    .iter()
                    .map(|quad| ObjectData::new(quad.transform, Material::default())),
            )
            .collect()
    }

    /// Instance index of the depth debug quad in [`Self::object_data`].
    pub fn depth_debug_index(&self) -> Option<u32> {
        self.depth_debug.map(|_| self.objects.len() as u32)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::LightBase;

    fn scene() -> ShadowScene {
        let light = DirectionalLight::new(
            LightBase::new(Vec3::ONE, 0.1, 0.6),
            Vec3::new(0.0, -7.0, -1.0),
            256,
        );
        let mut scene = ShadowScene::new(Camera::default(), light);
        scene.add_object(SceneObject {
            mesh: Handle::new(0),
            texture: Handle::new(0),
            material: Material::shiny(),
            transform: Mat4::from_translation(Vec3::new(0.0, 0.0, -2.5)),
        });
        scene
    }

    #[test]
    fn arrow_keys_move_light_direction() {
        let mut scene = scene();
        let mut input = InputState::new();
        input.press(KeyCode::ArrowRight);
        input.press(KeyCode::ArrowUp);

        scene.update(&mut input, 0.016);
        let dir = scene.main_light.direction();
        assert!((dir.x - 0.1).abs() < 1e-6);
        assert!((dir.z - (-1.1)).abs() < 1e-6);
        assert_eq!(dir.y, -7.0);
    }

    #[test]
    fn opposite_arrows_leave_light_alone() {
        let mut scene = scene();
        let mut input = InputState::new();
        input.press(KeyCode::ArrowLeft);
        input.press(KeyCode::ArrowRight);

        scene.update(&mut input, 0.016);
        assert_eq!(scene.main_light.direction(), Vec3::new(0.0, -7.0, -1.0));
    }

    #[test]
    fn update_consumes_mouse_motion() {
        let mut scene = scene();
        let mut input = InputState::new();
        input.add_mouse_motion(20.0, 0.0);

        scene.update(&mut input, 0.016);
        assert!((scene.camera.yaw() - (-80.0)).abs() < 1e-5);
        assert_eq!(input.take_mouse_delta(), glam::Vec2::ZERO);
    }

    #[test]
    fn depth_debug_quad_is_appended_after_objects() {
        let mut scene = scene();
        assert_eq!(scene.depth_debug_index(), None);
        assert_eq!(scene.object_data().len(), 1);

        scene.depth_debug = Some(DepthDebugQuad {
            mesh: Handle::new(1),
            transform: depth_debug_transform(),
        });
        let data = scene.object_data();
        assert_eq!(data.len(), 2);
        assert_eq!(scene.depth_debug_index(), Some(1));
        assert_eq!(data[1].model, depth_debug_transform().to_cols_array_2d());
    }

    #[test]
    fn depth_debug_quad_sits_outside_the_floor() {
        let center = depth_debug_transform().transform_point3(Vec3::ZERO);
        assert!(center.abs_diff_eq(Vec3::new(25.0, -2.0, 0.0), 1e-5));

        let corner = depth_debug_transform().transform_point3(Vec3::new(10.0, 0.0, 10.0));
        assert!(corner.abs_diff_eq(Vec3::new(15.0, -2.0, -10.0), 1e-4));
    }
}
