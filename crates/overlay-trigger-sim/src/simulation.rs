//! Simulated host: one overlay, a manual clock and a recording engine

use std::cell::Cell;
use std::fmt;
use std::io::Write;
use std::rc::Rc;

use overlay_trigger::test_utils::{EngineStats, ManualClock};
use overlay_trigger::{ExternalVisibility, OverlayConfig, VisibilityController};
use tracing::debug;

use crate::engine::TracingEngine;
use crate::script::{Command, Step};
use crate::SimError;

const TRIGGER: &str = "trigger";
const OVERLAY: &str = "overlay";

/// Observable state printed after every command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Status {
    pub elapsed_ms: u64,
    pub visible: bool,
    pub has_handle: bool,
    pub z_index: u32,
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "t={} visible={} handle={} z={}",
            self.elapsed_ms,
            self.visible,
            if self.has_handle { "live" } else { "none" },
            self.z_index
        )
    }
}

pub struct Simulation {
    controller: VisibilityController<TracingEngine>,
    clock: ManualClock,
    engine: TracingEngine,
    /// Caller-owned flag when running bound
    external: Option<Rc<Cell<bool>>>,
}

impl Simulation {
    /// Autonomous overlay with both anchors attached
    pub fn new(config: OverlayConfig) -> Self {
        Self::build(config, None)
    }

    /// Overlay bound to a caller-owned flag starting at `initial_visible`
    pub fn bound(config: OverlayConfig, initial_visible: bool) -> Self {
        Self::build(config, Some(Rc::new(Cell::new(initial_visible))))
    }

    fn build(config: OverlayConfig, external: Option<Rc<Cell<bool>>>) -> Self {
        let clock = ManualClock::new();
        let engine = TracingEngine::new();
        let mut controller =
            VisibilityController::new(config, engine.clone()).with_clock(clock.clone());
        if let Some(flag) = &external {
            controller = controller.with_external(ExternalVisibility::from_cell(flag.clone()));
        }
        controller.trigger_ref_mut().set(TRIGGER);
        controller.overlay_ref_mut().set(OVERLAY);
        // Mount effect: an overlay that starts visible gets its handle now
        controller.update();

        debug!(mode = controller.mode().name(), "simulation ready");
        Self {
            controller,
            clock,
            engine,
            external,
        }
    }

    pub fn controller(&self) -> &VisibilityController<TracingEngine> {
        &self.controller
    }

    pub fn engine_stats(&self) -> EngineStats {
        self.engine.stats()
    }

    pub fn status(&self) -> Status {
        Status {
            elapsed_ms: self.clock.elapsed().as_millis() as u64,
            visible: self.controller.is_visible(),
            has_handle: self.controller.handle().is_some(),
            z_index: self.controller.z_index(),
        }
    }

    /// Apply one command, then fire whatever timers came due
    pub fn apply(&mut self, step: &Step) -> Result<Status, SimError> {
        debug!(line = step.line, command = %step.command, "apply");
        let ctl = &mut self.controller;
        match step.command {
            Command::Signal(signal) => {
                ctl.handle_signal(signal);
            }
            Command::Show => ctl.show(),
            Command::Hide => ctl.hide(),
            Command::Close => ctl.close(),
            Command::Wait(ms) => self.clock.advance_ms(ms),
            Command::Render => {
                ctl.before_render();
                ctl.trigger_ref_mut().set(TRIGGER);
                ctl.overlay_ref_mut().set(OVERLAY);
            }
            Command::Detach => ctl.before_render(),
            Command::Disable => ctl.set_disabled(true),
            Command::Enable => ctl.set_disabled(false),
            Command::External(on) => {
                let flag = self
                    .external
                    .as_ref()
                    .ok_or(SimError::NotBound { line: step.line })?;
                flag.set(on);
                ctl.refresh();
            }
            Command::Update => ctl.update(),
            Command::ForceUpdate => ctl.force_update(),
            Command::Placement(placement) => ctl.set_placement(placement),
            Command::Destroy => ctl.destroy(),
            Command::Unmount => ctl.unmount(),
        }
        self.controller.poll_timers();
        Ok(self.status())
    }

    /// Run every step, writing a status line after each
    pub fn run<W: Write>(&mut self, steps: &[Step], out: &mut W) -> Result<(), SimError> {
        for step in steps {
            let status = self.apply(step)?;
            writeln!(out, "{}", status)?;
        }
        Ok(())
    }
}
