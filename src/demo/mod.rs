//! The two runnable demos and the trait the event loop drives them through.

pub mod mesh_demo;
pub mod shadow_demo;

pub use mesh_demo::MeshDemo;
pub use shadow_demo::ShadowDemo;

use crate::error::Result;
use crate::input::InputState;
use crate::renderer::RenderContext;
use crate::settings::DemoSettings;

/// A demo owns its scene and GPU resources for the life of the window.
pub trait Demo: Sized + 'static {
    /// Window title.
    const TITLE: &'static str;

    /// Create every resource up front. Errors abort startup.
    fn init(context: &RenderContext, settings: &DemoSettings) -> Result<Self>;

    /// Apply one frame of input.
    fn update(&mut self, input: &mut InputState, dt: f32);

    /// Encode, submit and present one frame.
    fn render(&mut self, context: &RenderContext) -> std::result::Result<(), wgpu::SurfaceError>;
}
