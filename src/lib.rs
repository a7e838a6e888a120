pub mod app;
pub mod asset;
pub mod demo;
pub mod error;
pub mod input;
pub mod io;
pub mod renderer;
pub mod scene;
pub mod settings;
pub mod time;

use app::App;
use demo::Demo;
use winit::event_loop::{ControlFlow, EventLoop};

pub use error::{DemoError, Result};
pub use settings::DemoSettings;

fn init_logging() {
    let _ = env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .try_init();
}

/// Open a window and run demo `D` until it is closed.
pub fn run<D: Demo>() -> Result<()> {
    init_logging();

    log::info!("Starting {}", D::TITLE);

    let settings = DemoSettings::load();
    let event_loop = EventLoop::new()?;
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut app = App::<D>::new(settings);
    let result = event_loop.run_app(&mut app);

    if let Err(ref err) = result {
        log::error!("Application error: {}", err);
    }
    result?;

    log::info!("Application shutdown complete");

    app.into_result()
}
