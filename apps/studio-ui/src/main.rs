//! Livestream Overlay Studio: drag and resize text, logo, and image overlays
//! on top of a playing video.
//!
//! Usage:
//!   overlay-studio [--config PATH] [--verbose]

use std::path::PathBuf;

use clap::Parser;
use eframe::egui;
use studio_common::config::AppConfig;
use studio_common::error::StudioError;

mod app;
mod composition;
mod controls_view;
mod overlay_view;
mod player_view;

use app::StudioApp;

#[derive(Parser)]
#[command(
    name = "overlay-studio",
    about = "Compose draggable overlays on top of a video stream",
    version,
    author
)]
struct Cli {
    /// Read configuration from this file instead of the standard location
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config = match cli.config.as_ref() {
        Some(path) => AppConfig::load_from(path)
            .map_err(|e| anyhow::anyhow!("Failed to load config {}: {e}", path.display()))?,
        None => AppConfig::load(),
    };
    if cli.verbose {
        config.logging.level = "debug".to_string();
    }
    studio_common::logging::init_logging(&config.logging);
    tracing::info!(stream = %config.stream_url, "starting overlay studio");

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("Livestream Overlay Studio")
            .with_inner_size([config.window.width, config.window.height])
            .with_min_inner_size([800.0, 500.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Livestream Overlay Studio",
        options,
        Box::new(move |cc| {
            egui_extras::install_image_loaders(&cc.egui_ctx);
            Box::new(StudioApp::new(config))
        }),
    )
    .map_err(|e| StudioError::ui(format!("overlay studio launch failed: {e}")))?;
    Ok(())
}
