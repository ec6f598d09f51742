//! overlay-sim: drive a visibility controller from a text script
//!
//! Time is simulated, so a script is fully deterministic:
//! - [`script`]: command parsing with line-numbered errors
//! - [`simulation`]: a host with one overlay, a manual clock and a logging engine
//! - [`engine`]: positioning engine that reports calls through `tracing`

pub mod engine;
pub mod script;
pub mod simulation;

use std::io::{self, Read};
use std::path::{Path, PathBuf};

use overlay_trigger::{OverlayConfig, OverlayError};
use tracing::info;

pub use script::{parse_script, Command, Step};
pub use simulation::{Simulation, Status};

/// Environment variable consulted when `--config` is not given
pub const CONFIG_ENV: &str = "OVERLAY_SIM_CONFIG";

/// Simulator errors
#[derive(Debug, thiserror::Error)]
pub enum SimError {
    #[error("line {line}: unknown command '{command}'")]
    UnknownCommand { line: usize, command: String },

    #[error("line {line}: '{command}' expects {expected}")]
    MissingArgument {
        line: usize,
        command: &'static str,
        expected: &'static str,
    },

    #[error("line {line}: invalid argument '{value}' for '{command}'")]
    InvalidArgument {
        line: usize,
        command: &'static str,
        value: String,
    },

    #[error("line {line}: unexpected input '{rest}'")]
    TrailingInput { line: usize, rest: String },

    #[error("line {line}: 'external' needs a bound overlay (run with --bound)")]
    NotBound { line: usize },

    #[error(transparent)]
    Config(#[from] OverlayError),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

/// Resolve the config file: explicit path, then `OVERLAY_SIM_CONFIG`, then none
pub fn resolve_config_path(explicit: Option<&Path>) -> Option<PathBuf> {
    if let Some(path) = explicit {
        return Some(path.to_path_buf());
    }
    std::env::var_os(CONFIG_ENV)
        .filter(|value| !value.is_empty())
        .map(PathBuf::from)
}

/// Load the overlay config, falling back to defaults when no path resolves
pub fn load_config(explicit: Option<&Path>) -> Result<OverlayConfig, SimError> {
    match resolve_config_path(explicit) {
        Some(path) => {
            info!("Loading overlay config from {}", path.display());
            Ok(OverlayConfig::load(&path)?)
        }
        None => {
            info!("No overlay config given, using defaults");
            Ok(OverlayConfig::default())
        }
    }
}

/// Read the script from a file, or stdin when no path is given
pub fn read_script(path: Option<&Path>) -> Result<String, SimError> {
    match path {
        Some(path) => Ok(std::fs::read_to_string(path)?),
        None => {
            let mut source = String::new();
            io::stdin().read_to_string(&mut source)?;
            Ok(source)
        }
    }
}
