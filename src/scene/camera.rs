use glam::{Mat4, Vec2, Vec3};

use crate::input::{InputState, KeyCode};

const PITCH_LIMIT_DEGREES: f32 = 89.0;

/// First-person camera driven by WASD and mouse deltas.
#[derive(Clone, Copy, Debug)]
pub struct Camera {
    position: Vec3,
    world_up: Vec3,
    yaw: f32,
    pitch: f32,
    front: Vec3,
    right: Vec3,
    up: Vec3,
    pub move_speed: f32,
    pub turn_speed: f32,
    pub fov_y_radians: f32,
    pub near: f32,
    pub far: f32,
}

impl Camera {
    /// `yaw` and `pitch` are in degrees; a yaw of -90 looks down -Z.
    pub fn new(
        position: Vec3,
        world_up: Vec3,
        yaw: f32,
        pitch: f32,
        move_speed: f32,
        turn_speed: f32,
    ) -> Self {
        let mut camera = Self {
            position,
            world_up: world_up.normalize_or(Vec3::Y),
            yaw,
            pitch: pitch.clamp(-PITCH_LIMIT_DEGREES, PITCH_LIMIT_DEGREES),
            front: Vec3::NEG_Z,
            right: Vec3::X,
            up: Vec3::Y,
            move_speed,
            turn_speed,
            fov_y_radians: 45f32.to_radians(),
            near: 0.1,
            far: 100.0,
        };
        camera.update_vectors();
        camera
    }

    pub fn key_control(&mut self, input: &InputState, dt: f32) {
        let velocity = self.move_speed * dt;

        if input.pressed(KeyCode::KeyW) {
            self.position += self.front * velocity;
        }
        if input.pressed(KeyCode::KeyS) {
            self.position -= self.front * velocity;
        }
        if input.pressed(KeyCode::KeyA) {
            self.position -= self.right * velocity;
        }
        if input.pressed(KeyCode::KeyD) {
            self.position += self.right * velocity;
        }
    }

    /// Move without turning.
    pub fn translate(&mut self, offset: Vec3) {
        self.position += offset;
    }

    pub fn mouse_control(&mut self, delta: Vec2) {
        let delta = delta * self.turn_speed;

        self.yaw += delta.x;
        self.pitch = (self.pitch + delta.y).clamp(-PITCH_LIMIT_DEGREES, PITCH_LIMIT_DEGREES);

        self.update_vectors();
    }

    fn update_vectors(&mut self) {
        let (yaw, pitch) = (self.yaw.to_radians(), self.pitch.to_radians());
        self.front = Vec3::new(yaw.cos() * pitch.cos(), pitch.sin(), yaw.sin() * pitch.cos())
            .normalize();
        self.right = self.front.cross(self.world_up).normalize();
        self.up = self.right.cross(self.front).normalize();
    }

    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.position, self.position + self.front, self.up)
    }

    pub fn projection(&self, aspect: f32) -> Mat4 {
        Mat4::perspective_rh(self.fov_y_radians, aspect.max(f32::EPSILON), self.near, self.far)
    }

    pub fn position(&self) -> Vec3 {
        self.position
    }

    pub fn front(&self) -> Vec3 {
        self.front
    }

    pub fn right(&self) -> Vec3 {
        self.right
    }

    pub fn yaw(&self) -> f32 {
        self.yaw
    }

    pub fn pitch(&self) -> f32 {
        self.pitch
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::new(Vec3::new(0.0, 0.0, 1.0), Vec3::Y, -90.0, 0.0, 5.0, 0.5)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f32 = 1e-5;

    #[test]
    fn default_camera_looks_down_negative_z() {
        let cam = Camera::default();
        assert!(cam.front().abs_diff_eq(Vec3::NEG_Z, EPS));
        assert!(cam.right().abs_diff_eq(Vec3::X, EPS));
    }

    #[test]
    fn pitch_is_clamped() {
        let mut cam = Camera::default();
        cam.turn_speed = 1.0;
        cam.mouse_control(Vec2::new(0.0, 500.0));
        assert_eq!(cam.pitch(), 89.0);

        cam.mouse_control(Vec2::new(0.0, -1000.0));
        assert_eq!(cam.pitch(), -89.0);
        assert!((cam.front().length() - 1.0).abs() < EPS);
    }

    #[test]
    fn mouse_delta_is_scaled_by_turn_speed() {
        let mut cam = Camera::default();
        cam.mouse_control(Vec2::new(10.0, 4.0));
        assert!((cam.yaw() - (-85.0)).abs() < EPS);
        assert!((cam.pitch() - 2.0).abs() < EPS);
    }

    #[test]
    fn forward_key_moves_along_front() {
        let mut cam = Camera::default();
        let mut input = InputState::new();
        input.press(KeyCode::KeyW);

        cam.key_control(&input, 0.5);
        let expected = Vec3::new(0.0, 0.0, 1.0) + Vec3::NEG_Z * 2.5;
        assert!(cam.position().abs_diff_eq(expected, EPS));
    }

    #[test]
    fn opposite_keys_cancel() {
        let mut cam = Camera::default();
        let mut input = InputState::new();
        input.press(KeyCode::KeyA);
        input.press(KeyCode::KeyD);

        cam.key_control(&input, 1.0);
        assert!(cam.position().abs_diff_eq(Vec3::new(0.0, 0.0, 1.0), EPS));
    }

    #[test]
    fn view_projection_is_invertible() {
        let cam = Camera::default();
        let vp = cam.projection(800.0 / 600.0) * cam.view_matrix();
        assert!((vp * vp.inverse()).abs_diff_eq(Mat4::IDENTITY, 1e-4));
    }
}
