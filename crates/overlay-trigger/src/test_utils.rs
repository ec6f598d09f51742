//! Test doubles for the controller's collaborators
//!
//! Used by the crate's own tests and by the simulator, which runs a
//! controller against a recording engine and a manual clock.

use std::cell::{Cell, RefCell};
use std::rc::Rc;
use std::time::{Duration, Instant};

use crate::positioning::{PositioningEngine, PositioningHandle, PositioningOptions};
use crate::timer::Clock;

/// Counters collected by a [`RecordingEngine`] and its handles
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EngineStats {
    pub created: u64,
    pub destroyed: u64,
    pub updates: u64,
    pub force_updates: u64,
    pub options_set: u64,
    /// Options passed to the most recent create or set_options call
    pub last_options: Option<PositioningOptions>,
    /// Anchors passed to the most recent create call
    pub last_anchors: Option<(String, String)>,
}

impl EngineStats {
    /// Handles created and not yet destroyed
    pub fn live(&self) -> u64 {
        self.created - self.destroyed
    }
}

/// Positioning engine that records every call instead of placing anything
#[derive(Debug, Clone, Default)]
pub struct RecordingEngine {
    stats: Rc<RefCell<EngineStats>>,
}

impl RecordingEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn stats(&self) -> EngineStats {
        self.stats.borrow().clone()
    }
}

impl PositioningEngine for RecordingEngine {
    type Element = &'static str;
    type Handle = RecordingHandle;

    fn create(
        &mut self,
        trigger: &Self::Element,
        overlay: &Self::Element,
        options: &PositioningOptions,
    ) -> Self::Handle {
        let mut stats = self.stats.borrow_mut();
        stats.created += 1;
        stats.last_options = Some(*options);
        stats.last_anchors = Some((trigger.to_string(), overlay.to_string()));
        RecordingHandle {
            id: stats.created,
            options: *options,
            stats: self.stats.clone(),
        }
    }
}

/// Handle produced by [`RecordingEngine`]
#[derive(Debug)]
pub struct RecordingHandle {
    id: u64,
    options: PositioningOptions,
    stats: Rc<RefCell<EngineStats>>,
}

impl RecordingHandle {
    /// Sequence number of this handle (1 for the first one created)
    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn options(&self) -> &PositioningOptions {
        &self.options
    }
}

impl PositioningHandle for RecordingHandle {
    fn update(&mut self) {
        self.stats.borrow_mut().updates += 1;
    }

    fn force_update(&mut self) {
        self.stats.borrow_mut().force_updates += 1;
    }

    fn set_options(&mut self, options: &PositioningOptions) {
        self.options = *options;
        let mut stats = self.stats.borrow_mut();
        stats.options_set += 1;
        stats.last_options = Some(*options);
    }

    fn destroy(self) {
        self.stats.borrow_mut().destroyed += 1;
    }
}

/// Clock that only moves when told to
#[derive(Debug, Clone)]
pub struct ManualClock {
    start: Instant,
    now: Rc<Cell<Instant>>,
}

impl ManualClock {
    pub fn new() -> Self {
        let start = Instant::now();
        Self {
            start,
            now: Rc::new(Cell::new(start)),
        }
    }

    pub fn advance(&self, by: Duration) {
        self.now.set(self.now.get() + by);
    }

    pub fn advance_ms(&self, ms: u64) {
        self.advance(Duration::from_millis(ms));
    }

    /// Time elapsed since the clock was created
    pub fn elapsed(&self) -> Duration {
        self.now.get() - self.start
    }
}

impl Default for ManualClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Instant {
        self.now.get()
    }
}
