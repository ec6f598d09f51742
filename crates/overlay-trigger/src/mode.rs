//! Visibility ownership: autonomous or bound to the caller

use std::cell::Cell;
use std::fmt;
use std::rc::Rc;

use crate::config::OverlayConfig;

/// Who owns the overlay's visibility
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum VisibilityMode {
    /// The controller owns visibility and drives it from signals and timers
    #[default]
    Autonomous,
    /// The caller owns visibility; the controller reads through and requests changes
    Bound,
}

impl VisibilityMode {
    /// Bound when an external flag is supplied or the configuration is manual
    pub fn resolve(config: &OverlayConfig, has_external: bool) -> Self {
        if has_external || is_manual(config) {
            VisibilityMode::Bound
        } else {
            VisibilityMode::Autonomous
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            VisibilityMode::Autonomous => "autonomous",
            VisibilityMode::Bound => "bound",
        }
    }
}

/// Manual mode: the caller drives visibility exclusively
pub fn is_manual(config: &OverlayConfig) -> bool {
    config.manual_mode || config.trigger.is_manual()
}

/// Caller-owned visibility flag, exposed as a getter/setter pair.
///
/// Reads go to `get`. Writes go to `set`, which notifies the owner; the
/// owner decides whether and when the flag actually changes, and tells the
/// controller with [`crate::VisibilityController::refresh`].
pub struct ExternalVisibility {
    get: Box<dyn Fn() -> bool>,
    set: Box<dyn FnMut(bool)>,
}

impl ExternalVisibility {
    pub fn new(get: impl Fn() -> bool + 'static, set: impl FnMut(bool) + 'static) -> Self {
        Self {
            get: Box::new(get),
            set: Box::new(set),
        }
    }

    /// Bind to a shared cell whose owner accepts every requested change
    pub fn from_cell(cell: Rc<Cell<bool>>) -> Self {
        let reader = cell.clone();
        Self::new(move || reader.get(), move |value| cell.set(value))
    }

    /// Bind to a shared cell whose owner ignores requested changes
    pub fn read_only(cell: Rc<Cell<bool>>) -> Self {
        Self::new(move || cell.get(), |_| {})
    }

    pub fn get(&self) -> bool {
        (self.get)()
    }

    pub fn request(&mut self, value: bool) {
        (self.set)(value)
    }
}

impl fmt::Debug for ExternalVisibility {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExternalVisibility")
            .field("value", &self.get())
            .finish_non_exhaustive()
    }
}
