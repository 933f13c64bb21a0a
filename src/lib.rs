pub mod app;
pub mod cli;
pub mod config;
pub mod editor;
pub mod error;
pub mod geometry;
pub mod input;
pub mod logging;
pub mod session;
pub mod state;
pub mod storage;
pub use error::{AppError, AppResult};

/// Entrypoint used by the binary.
pub fn run(args: cli::CliArgs) -> AppResult<()> {
    logging::init();
    tracing::info!("starting blurry");

    let config = config::load_app_config().with_jpeg_quality(args.jpeg_quality);
    tracing::debug!(?config, "loaded config");

    app::App::new(config, args.folder).run()?;

    tracing::info!("shutdown complete");
    Ok(())
}
