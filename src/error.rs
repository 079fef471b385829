use std::io;
use thiserror::Error;

/// Errors from reading a telemetry series
#[derive(Debug, Error, PartialEq)]
pub enum SeriesError {
    #[error("Sample index {index} out of range for series of length {len}")]
    OutOfRange { index: usize, len: usize },
}

/// Errors from loading or saving replay settings
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("Could not find a config directory for settings")]
    NoConfigDir,
    #[error("Error accessing settings file")]
    Io(#[from] io::Error),
    #[error("Error parsing settings file")]
    Json(#[from] serde_json::Error),
}

/// Errors from parsing an interactive console command
#[derive(Debug, Error, PartialEq)]
pub enum CommandError {
    #[error("Unknown command: {0}")]
    Unknown(String),
    #[error("Missing argument for '{0}'")]
    MissingArgument(&'static str),
    #[error("Invalid seek index: {0}")]
    InvalidIndex(String),
    #[error("Invalid playback speed: {0} (expected 0.5x, 1x, 2x, 4x or 500/200/100/50 ms)")]
    InvalidSpeed(String),
}
