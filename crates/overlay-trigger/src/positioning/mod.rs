//! Positioning engine abstraction
//!
//! The controller never computes coordinates. It owns one session of an
//! external positioning engine per overlay and keeps that session in step
//! with visibility:
//! - [`PositioningEngine`] / [`PositioningHandle`]: the engine contract
//! - [`AnchorRefs`]: trigger and overlay element slots filled by the host
//! - [`PositioningLifecycle`]: lazy creation, update and teardown

mod anchor;
mod engine;
mod lifecycle;

pub use anchor::{AnchorRefs, RefSlot};
pub use engine::{Placement, PositioningEngine, PositioningHandle, PositioningOptions};
pub use lifecycle::{PositioningLifecycle, StackingOrder};
