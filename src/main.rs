use std::process::ExitCode;

use clap::Parser;
use winit::event_loop::EventLoop;

use desk_scene::{App, Args, ViewerConfig, ViewerError};

fn run(config: ViewerConfig) -> Result<(), ViewerError> {
    let event_loop = EventLoop::new()?;
    let mut app = App::new(config);
    event_loop.run_app(&mut app)?;
    match app.take_error() {
        Some(error) => Err(error),
        None => Ok(()),
    }
}

fn main() -> ExitCode {
    env_logger::init();

    let config = ViewerConfig::from(Args::parse());
    log::info!(
        "Starting {} ({}x{}), textures from {}",
        config.title,
        config.width,
        config.height,
        config.asset_dir.display()
    );

    match run(config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            log::error!("{error}");
            eprintln!("error: {error}");
            ExitCode::FAILURE
        }
    }
}
