//! Positioning engine trait definition

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::OverlayError;

/// Where the overlay should sit relative to its trigger
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Placement {
    Auto,
    AutoStart,
    AutoEnd,
    Top,
    TopStart,
    TopEnd,
    #[default]
    Bottom,
    BottomStart,
    BottomEnd,
    Right,
    RightStart,
    RightEnd,
    Left,
    LeftStart,
    LeftEnd,
}

impl Placement {
    pub const ALL: [Placement; 15] = [
        Placement::Auto,
        Placement::AutoStart,
        Placement::AutoEnd,
        Placement::Top,
        Placement::TopStart,
        Placement::TopEnd,
        Placement::Bottom,
        Placement::BottomStart,
        Placement::BottomEnd,
        Placement::Right,
        Placement::RightStart,
        Placement::RightEnd,
        Placement::Left,
        Placement::LeftStart,
        Placement::LeftEnd,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Placement::Auto => "auto",
            Placement::AutoStart => "auto-start",
            Placement::AutoEnd => "auto-end",
            Placement::Top => "top",
            Placement::TopStart => "top-start",
            Placement::TopEnd => "top-end",
            Placement::Bottom => "bottom",
            Placement::BottomStart => "bottom-start",
            Placement::BottomEnd => "bottom-end",
            Placement::Right => "right",
            Placement::RightStart => "right-start",
            Placement::RightEnd => "right-end",
            Placement::Left => "left",
            Placement::LeftStart => "left-start",
            Placement::LeftEnd => "left-end",
        }
    }
}

impl fmt::Display for Placement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Placement {
    type Err = OverlayError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|p| p.name() == wanted)
            .ok_or(OverlayError::InvalidPlacement(wanted))
    }
}

/// Options handed to the engine when a handle is created or reconfigured
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PositioningOptions {
    /// Placement preference
    pub placement: Placement,
    /// Stacking order of the overlay at the time it was shown
    pub z_index: u32,
}

impl PositioningOptions {
    pub fn new(placement: Placement) -> Self {
        Self {
            placement,
            z_index: 1,
        }
    }

    pub fn with_z_index(mut self, z_index: u32) -> Self {
        self.z_index = z_index;
        self
    }
}

/// External service that computes overlay placement.
///
/// The controller only decides when a positioning session exists; the
/// engine decides where the overlay goes.
pub trait PositioningEngine {
    /// Host element reference type (a DOM node, widget id, ...)
    type Element;

    /// Live positioning session
    type Handle: PositioningHandle;

    /// Start positioning `overlay` relative to `trigger`
    fn create(
        &mut self,
        trigger: &Self::Element,
        overlay: &Self::Element,
        options: &PositioningOptions,
    ) -> Self::Handle;
}

/// A live positioning session owned by the controller
pub trait PositioningHandle {
    /// Recompute placement (cheap, idempotent)
    fn update(&mut self);

    /// Recompute placement synchronously, bypassing any engine scheduling
    fn force_update(&mut self);

    /// Replace the session's options
    fn set_options(&mut self, options: &PositioningOptions);

    /// End the session. Consumes the handle so it cannot be destroyed twice.
    fn destroy(self);
}
