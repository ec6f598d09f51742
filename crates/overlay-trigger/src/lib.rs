//! overlay-trigger: visibility control for floating overlays
//!
//! Decides *when* a tooltip, popover or dropdown is shown, and leaves *where*
//! to an external positioning engine:
//! - Click, hover and focus triggers mapped to show / hide / toggle
//! - Delayed show, delayed hide and auto-close timers with cancellation
//! - Autonomous or caller-bound ("manual") visibility
//! - Lazy positioning handle creation and deterministic teardown
//! - A tokio driver for running a controller against real time
//!
//! ```
//! use overlay_trigger::{OverlayConfig, TriggerKind, TriggerSignal, VisibilityController};
//! use overlay_trigger::test_utils::RecordingEngine;
//!
//! let engine = RecordingEngine::new();
//! let mut overlay = VisibilityController::new(
//!     OverlayConfig::default().with_trigger(TriggerKind::Click),
//!     engine.clone(),
//! );
//! overlay.trigger_ref_mut().set("button");
//! overlay.overlay_ref_mut().set("popover");
//!
//! overlay.handle_signal(TriggerSignal::Click);
//! assert!(overlay.is_visible());
//! assert_eq!(engine.stats().live(), 1);
//! ```

pub mod config;
pub mod controller;
pub mod driver;
pub mod error;
pub mod mode;
pub mod observer;
pub mod positioning;
pub mod test_utils;
pub mod timer;
pub mod trigger;

// Re-export commonly used types
pub use config::OverlayConfig;
pub use controller::VisibilityController;
pub use error::{OverlayError, Result};
pub use mode::{ExternalVisibility, VisibilityMode};
pub use positioning::{Placement, PositioningEngine, PositioningHandle, PositioningOptions, StackingOrder};
pub use timer::{Clock, SystemClock};
pub use trigger::{EventBindings, TriggerEvent, TriggerKind, TriggerSet, TriggerSignal};
