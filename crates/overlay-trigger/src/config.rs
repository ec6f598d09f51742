//! Overlay configuration
//!
//! Every field has a default, so a config file only names what it changes:
//!
//! ```toml
//! trigger = ["hover", "focus"]
//! show_after = 200
//! auto_close = 3000
//! placement = "top-start"
//! ```

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{OverlayError, Result};
use crate::positioning::Placement;
use crate::trigger::TriggerSet;

/// Caller-supplied overlay settings; read-only to the controller
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OverlayConfig {
    /// Force the overlay hidden and ignore trigger-driven shows
    pub disabled: bool,
    /// The caller drives visibility; no trigger handlers are installed
    pub manual_mode: bool,
    /// Interaction kinds that drive the overlay
    pub trigger: TriggerSet,
    /// Hide automatically this many milliseconds after showing (0 = never)
    pub auto_close: u64,
    /// Delay before showing, in milliseconds
    pub show_after: u64,
    /// Delay before hiding, in milliseconds
    pub hide_after: u64,
    /// Placement preference handed to the positioning engine
    pub placement: Placement,
}

impl Default for OverlayConfig {
    fn default() -> Self {
        Self {
            disabled: false,
            manual_mode: false,
            trigger: TriggerSet::default(),
            auto_close: 0,
            show_after: 0,
            hide_after: 0,
            placement: Placement::default(),
        }
    }
}

impl OverlayConfig {
    /// Parse a config from TOML text
    pub fn from_toml_str(source: &str) -> Result<Self> {
        Ok(toml::from_str(source)?)
    }

    /// Load a config from a TOML file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path).map_err(|source| OverlayError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_toml_str(&source)?;
        tracing::debug!("Loaded overlay config from {}", path.display());
        Ok(config)
    }

    pub fn with_trigger(mut self, trigger: impl Into<TriggerSet>) -> Self {
        self.trigger = trigger.into();
        self
    }

    pub fn with_show_after(mut self, ms: u64) -> Self {
        self.show_after = ms;
        self
    }

    pub fn with_hide_after(mut self, ms: u64) -> Self {
        self.hide_after = ms;
        self
    }

    pub fn with_auto_close(mut self, ms: u64) -> Self {
        self.auto_close = ms;
        self
    }

    pub fn with_manual_mode(mut self, manual: bool) -> Self {
        self.manual_mode = manual;
        self
    }

    pub fn with_disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    pub fn with_placement(mut self, placement: Placement) -> Self {
        self.placement = placement;
        self
    }

    pub fn show_delay(&self) -> Duration {
        Duration::from_millis(self.show_after)
    }

    pub fn hide_delay(&self) -> Duration {
        Duration::from_millis(self.hide_after)
    }

    pub fn auto_close_after(&self) -> Duration {
        Duration::from_millis(self.auto_close)
    }
}
