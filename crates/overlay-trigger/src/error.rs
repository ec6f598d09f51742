//! Error types for configuration parsing and loading.

use std::path::PathBuf;

/// Errors raised by the configuration surface and the async driver.
///
/// The controller itself never fails.
#[derive(Debug, thiserror::Error)]
pub enum OverlayError {
    #[error("Overlay driver has stopped")]
    DriverClosed,

    #[error("Unknown trigger kind: {0} (expected click, hover, focus or manual)")]
    InvalidTrigger(String),

    #[error("Unknown placement: {0}")]
    InvalidPlacement(String),

    #[error("Trigger list is empty")]
    EmptyTrigger,

    #[error("Failed to parse overlay config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Failed to read overlay config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

pub type Result<T> = std::result::Result<T, OverlayError>;
