//! Trigger handling for overlays
//!
//! Maps configured trigger kinds to the interaction signals they listen for,
//! and each signal to a show / hide / toggle intent:
//! - click: toggle
//! - hover: enter shows, leave hides
//! - focus: focus shows, blur hides

mod bindings;
mod kind;
mod signal;

pub use bindings::{EventBindings, FocusGuard, Intent};
pub use kind::{TriggerKind, TriggerSet, TriggerSpec};
pub use signal::{TriggerEvent, TriggerSignal};
