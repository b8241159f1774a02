mod config;
mod error;
mod ops;
mod renderer;
mod types;
mod ui;

use crate::config::Config;
use crate::error::App;
use crate::ui::app::ReelApp;
use eframe::egui;
use flexi_logger::{Cleanup, Criterion, Duplicate, FileSpec, Logger, Naming};
use gstreamer as gst;
use log::{info, warn};

fn main() -> Result<(), App> {
    let log_dir = config::log_dir()?;
    std::fs::create_dir_all(&log_dir)?;

    let config_path = config::config_file()?;
    let (config, config_error) = match Config::load(&config_path) {
        Ok(config) => (config, None),
        Err(e) => (Config::default(), Some(e)),
    };

    // Logger setup
    let _logger = Logger::try_with_str(&config.log_level)?
        .log_to_file(FileSpec::default().directory(&log_dir))
        .rotate(
            Criterion::Size(1_000_000),
            Naming::Timestamps,
            Cleanup::KeepLogFiles(3),
        )
        .duplicate_to_stderr(Duplicate::Warn)
        .start()?;

    if let Some(e) = config_error {
        warn!("Ignoring {}: {}", config_path.display(), e);
    }

    gst::init().map_err(|e| App::Init(e.to_string()))?;
    info!("GStreamer initialized");

    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("Reel Player")
            .with_inner_size([config.window_width, config.window_height]),
        ..Default::default()
    };
    eframe::run_native(
        "Reel Player",
        native_options,
        Box::new(|_cc| Ok(Box::new(ReelApp::new(config)))),
    )?;
    Ok(())
}
