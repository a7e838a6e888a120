//! Keyboard and mouse state polled once per frame.

use std::collections::HashSet;

use glam::Vec2;
pub use winit::keyboard::KeyCode;

#[derive(Debug, Default)]
pub struct InputState {
    pressed: HashSet<KeyCode>,
    mouse_delta: Vec2,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `true` while the key is held down.
    pub fn pressed(&self, key: KeyCode) -> bool {
        self.pressed.contains(&key)
    }

    pub fn press(&mut self, key: KeyCode) {
        self.pressed.insert(key);
    }

    pub fn release(&mut self, key: KeyCode) {
        self.pressed.remove(&key);
    }

    /// Raw pointer motion. Screen y grows downwards, so it is flipped to
    /// make "mouse up" a positive change.
    pub fn add_mouse_motion(&mut self, dx: f64, dy: f64) {
        self.mouse_delta += Vec2::new(dx as f32, -(dy as f32));
    }

    /// Motion accumulated since the previous call.
    pub fn take_mouse_delta(&mut self) -> Vec2 {
        std::mem::take(&mut self.mouse_delta)
    }

    /// Drops held keys, e.g. after the window loses focus.
    pub fn clear(&mut self) {
        self.pressed.clear();
        self.mouse_delta = Vec2::ZERO;
    }
}
