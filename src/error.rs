use flexi_logger::FlexiLoggerError;
use glib::BoolError;
use gstreamer::StateChangeError;
use std::io;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum App {
    #[error("I/O error: {0}")]
    Io(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Logger initialization error: {0}")]
    Logger(String),

    #[error("GStreamer initialization error: {0}")]
    Init(String),

    #[error("GStreamer pipeline error: {0}")]
    Pipeline(String),

    #[error("GStreamer state error: {0}")]
    State(String),

    #[error("Unsupported media file: {0}")]
    UnsupportedMedia(String),

    #[error("Invalid media URI: {0}")]
    InvalidUri(String),

    #[error("Window error: {0}")]
    Window(String),
}

impl From<io::Error> for App {
    fn from(error: io::Error) -> Self {
        App::Io(error.to_string())
    }
}

impl From<toml::de::Error> for App {
    fn from(error: toml::de::Error) -> Self {
        App::Config(error.to_string())
    }
}

impl From<FlexiLoggerError> for App {
    fn from(error: FlexiLoggerError) -> Self {
        App::Logger(error.to_string())
    }
}

impl From<BoolError> for App {
    fn from(error: BoolError) -> Self {
        App::Pipeline(error.to_string())
    }
}

impl From<StateChangeError> for App {
    fn from(error: StateChangeError) -> Self {
        App::State(error.to_string())
    }
}

impl From<eframe::Error> for App {
    fn from(error: eframe::Error) -> Self {
        App::Window(error.to_string())
    }
}
