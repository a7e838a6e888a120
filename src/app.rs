// app.rs
use std::sync::Arc;

use winit::{
    application::ApplicationHandler,
    dpi::PhysicalSize,
    event::{DeviceEvent, DeviceId, ElementState, KeyEvent, WindowEvent},
    event_loop::ActiveEventLoop,
    keyboard::{KeyCode, PhysicalKey},
    window::{CursorGrabMode, Window, WindowId},
};

use crate::demo::Demo;
use crate::error::{DemoError, Result};
use crate::input::InputState;
use crate::renderer::RenderContext;
use crate::settings::DemoSettings;
use crate::time::FrameClock;

/// Window, GPU context and the running demo. Everything is created on the
/// first `resumed` and lives until the event loop exits.
pub struct App<D: Demo> {
    settings: DemoSettings,
    window: Option<Arc<Window>>,
    context: Option<RenderContext>,
    demo: Option<D>,
    input: InputState,
    clock: FrameClock,
    error: Option<DemoError>,
}

impl<D: Demo> App<D> {
    pub fn new(settings: DemoSettings) -> Self {
        Self {
            settings,
            window: None,
            context: None,
            demo: None,
            input: InputState::new(),
            clock: FrameClock::new(),
            error: None,
        }
    }

    /// The startup error that stopped the event loop, if any.
    pub fn into_result(self) -> Result<()> {
        match self.error {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    fn start(&mut self, event_loop: &ActiveEventLoop) -> Result<()> {
        let resolution = &self.settings.resolution;
        let attrs = Window::default_attributes()
            .with_title(D::TITLE)
            .with_inner_size(PhysicalSize::new(resolution.width, resolution.height));
        let window = Arc::new(event_loop.create_window(attrs)?);

        capture_cursor(&window);

        let context = pollster::block_on(RenderContext::new(window.clone(), &self.settings))?;
        let demo = D::init(&context, &self.settings)?;

        self.clock = FrameClock::new();
        self.window = Some(window);
        self.context = Some(context);
        self.demo = Some(demo);
        Ok(())
    }

    fn redraw(&mut self, event_loop: &ActiveEventLoop) {
        let (Some(context), Some(demo)) = (self.context.as_mut(), self.demo.as_mut()) else {
            return;
        };

        let dt = self.clock.tick();
        demo.update(&mut self.input, dt);

        match demo.render(context) {
            Ok(()) => {}
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                context.reconfigure();
            }
            Err(wgpu::SurfaceError::OutOfMemory) => {
                log::error!("Out of GPU memory!");
                event_loop.exit();
            }
            Err(e) => {
                log::warn!("Surface error: {:?}", e);
            }
        }
    }
}

/// Keep the pointer inside the window and hidden so mouse motion turns the
/// camera. Platforms without grab support still get relative motion.
fn capture_cursor(window: &Window) {
    let grabbed = window
        .set_cursor_grab(CursorGrabMode::Locked)
        .or_else(|_| window.set_cursor_grab(CursorGrabMode::Confined));
    if let Err(err) = grabbed {
        log::warn!("Could not grab the cursor: {err}");
    }
    window.set_cursor_visible(false);
}

impl<D: Demo> ApplicationHandler for App<D> {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() || self.error.is_some() {
            return;
        }

        if let Err(err) = self.start(event_loop) {
            log::error!("Startup failed: {err}");
            self.error = Some(err);
            event_loop.exit();
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, id: WindowId, event: WindowEvent) {
        if self.window.as_ref().map(|w| w.id()) != Some(id) {
            return;
        }

        match event {
            WindowEvent::CloseRequested | WindowEvent::Destroyed => {
                log::info!("Window close requested, exiting.");
                event_loop.exit();
            }
            WindowEvent::Resized(size) => {
                if let Some(context) = self.context.as_mut() {
                    context.resize(size);
                }
            }
            WindowEvent::Focused(false) => {
                self.input.clear();
            }
            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        physical_key: PhysicalKey::Code(code),
                        state,
                        ..
                    },
                ..
            } => match state {
                ElementState::Pressed if code == KeyCode::Escape => event_loop.exit(),
                ElementState::Pressed => self.input.press(code),
                ElementState::Released => self.input.release(code),
            },
            WindowEvent::RedrawRequested => self.redraw(event_loop),
            _ => {}
        }
    }

    fn device_event(&mut self, _event_loop: &ActiveEventLoop, _id: DeviceId, event: DeviceEvent) {
        if let DeviceEvent::MouseMotion { delta: (dx, dy) } = event {
            self.input.add_mouse_motion(dx, dy);
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }
}
