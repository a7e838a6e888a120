use glam::{Mat4, Vec3};

use crate::asset::Handle;
use crate::input::{InputState, KeyCode};
use crate::renderer::{Material, Mesh, ObjectData};

use super::Camera;

/// Camera speed of the mesh viewer, slower than the shadow demo's.
pub const MESH_DEMO_MOVE_SPEED: f32 = 2.7;
/// The viewer turns by the raw mouse delta in degrees.
pub const MESH_DEMO_TURN_SPEED: f32 = 1.0;

/// Where the viewer's two pyramids stand, each squashed to 0.4 in x and y.
pub fn pyramid_transforms() -> [Mat4; 2] {
    let scale = Vec3::new(0.4, 0.4, 1.0);
    [
        Mat4::from_translation(Vec3::new(0.0, 0.0, -2.5)) * Mat4::from_scale(scale),
        Mat4::from_translation(Vec3::new(0.0, 1.0, -2.5)) * Mat4::from_scale(scale),
    ]
}

#[derive(Debug, Clone, Copy)]
pub struct MeshObject {
    pub mesh: Handle<Mesh>,
    pub transform: Mat4,
}

/// Unlit scene of the mesh viewer: a camera and some meshes.
pub struct MeshScene {
    pub camera: Camera,
    pub objects: Vec<MeshObject>,
}

impl MeshScene {
    pub fn new(camera: Camera) -> Self {
        Self {
            camera,
            objects: Vec::new(),
        }
    }

    /// W/S move along the view direction, A/D along world X regardless of
    /// where the camera faces.
    pub fn update(&mut self, input: &mut InputState, dt: f32) {
        let mut direction = Vec3::ZERO;
        if input.pressed(KeyCode::KeyW) {
            direction += self.camera.front();
        }
        if input.pressed(KeyCode::KeyS) {
            direction -= self.camera.front();
        }
        if input.pressed(KeyCode::KeyA) {
            direction += Vec3::NEG_X;
        }
        if input.pressed(KeyCode::KeyD) {
            direction += Vec3::X;
        }
        self.camera
            .translate(direction * self.camera.move_speed * dt);
        self.camera.mouse_control(input.take_mouse_delta());
    }

    pub fn object_data(&self) -> Vec<ObjectData> {
        self.objects
            .iter()
            .map(|object| ObjectData::new(object.transform, Material::default()))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn viewer_camera() -> Camera {
        Camera::new(
            Vec3::ZERO,
            Vec3::Y,
            -90.0,
            0.0,
            MESH_DEMO_MOVE_SPEED,
            MESH_DEMO_TURN_SPEED,
        )
    }

    #[test]
    fn pyramids_are_stacked_in_front_of_the_camera() {
        let [lower, upper] = pyramid_transforms();
        let apex = Vec3::new(0.0, 1.0, 0.0);

        assert!(lower
            .transform_point3(apex)
            .abs_diff_eq(Vec3::new(0.0, 0.4, -2.5), 1e-6));
        assert!(upper
            .transform_point3(apex)
            .abs_diff_eq(Vec3::new(0.0, 1.4, -2.5), 1e-6));
    }

    #[test]
    fn update_moves_camera_forward() {
        let mut scene = MeshScene::new(viewer_camera());
        let mut input = InputState::new();
        input.press(KeyCode::KeyW);

        scene.update(&mut input, 1.0);
        assert!(scene
            .camera
            .position()
            .abs_diff_eq(Vec3::new(0.0, 0.0, -MESH_DEMO_MOVE_SPEED), 1e-5));
    }

    #[test]
    fn strafing_follows_world_x_after_turning() {
        let mut scene = MeshScene::new(viewer_camera());
        let mut input = InputState::new();

        // Quarter turn to face +X; D still moves along world +X.
        input.add_mouse_motion(90.0, 0.0);
        scene.update(&mut input, 0.0);
        assert!(scene.camera.front().abs_diff_eq(Vec3::X, 1e-5));

        input.press(KeyCode::KeyD);
        scene.update(&mut input, 1.0);
        assert!(scene
            .camera
            .position()
            .abs_diff_eq(Vec3::new(MESH_DEMO_MOVE_SPEED, 0.0, 0.0), 1e-5));

        input.release(KeyCode::KeyD);
        input.press(KeyCode::KeyA);
        scene.update(&mut input, 2.0);
        assert!(scene
            .camera
            .position()
            .abs_diff_eq(Vec3::new(-MESH_DEMO_MOVE_SPEED, 0.0, 0.0), 1e-5));
    }

    #[test]
    fn mouse_turns_by_the_raw_delta() {
        let mut scene = MeshScene::new(viewer_camera());
        let mut input = InputState::new();
        input.add_mouse_motion(10.0, -4.0);

        scene.update(&mut input, 0.0);
        assert!((scene.camera.yaw() - (-80.0)).abs() < 1e-5);
        assert!((scene.camera.pitch() - 4.0).abs() < 1e-5);
    }

    #[test]
    fn object_data_follows_object_order() {
        let mut scene = MeshScene::new(Camera::default());
        for (i, transform) in pyramid_transforms().into_iter().enumerate() {
            scene.objects.push(MeshObject {
                mesh: Handle::new(i),
                transform,
            });
        }

        let data = scene.object_data();
        assert_eq!(data.len(), 2);
        assert_eq!(data[1].model, pyramid_transforms()[1].to_cols_array_2d());
    }
}
