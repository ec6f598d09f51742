//! Tokio event loop for a visibility controller
//!
//! The driver owns the controller and interleaves host commands with timer
//! expiries on tokio time. The controller is not `Send`, so the driver is
//! meant for a current-thread runtime or a `LocalSet`:
//!
//! ```ignore
//! let (driver, handle) = overlay_trigger::driver::channel(controller);
//! tokio::task::spawn_local(driver.run());
//! handle.send(DriverCommand::Signal(TriggerSignal::PointerEnter))?;
//! ```

use std::time::Instant;

use tokio::sync::{mpsc, watch};

use crate::controller::VisibilityController;
use crate::error::{OverlayError, Result};
use crate::positioning::{Placement, PositioningEngine};
use crate::timer::Clock;
use crate::trigger::{TriggerEvent, TriggerSignal};

/// Clock that follows tokio time, including paused test time
#[derive(Debug, Clone, Copy, Default)]
pub struct TokioClock;

impl Clock for TokioClock {
    fn now(&self) -> Instant {
        tokio::time::Instant::now().into_std()
    }
}

/// Requests the host sends to a running driver
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DriverCommand {
    /// Interaction signal from the trigger element
    Signal(TriggerSignal),
    Show,
    Hide,
    Close,
    /// Host is about to re-render
    BeforeRender,
    Update,
    ForceUpdate,
    SetDisabled(bool),
    SetPlacement(Placement),
    /// The caller-owned visibility flag changed
    Refresh,
    Destroy,
    /// Unmount the controller and stop the loop
    Shutdown,
}

/// Observable state published after every step
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct OverlaySnapshot {
    pub visible: bool,
    pub has_handle: bool,
    pub z_index: u32,
    pub pending_timers: usize,
}

impl OverlaySnapshot {
    pub fn of<P: PositioningEngine>(controller: &VisibilityController<P>) -> Self {
        Self {
            visible: controller.is_visible(),
            has_handle: controller.handle().is_some(),
            z_index: controller.z_index(),
            pending_timers: controller.timers().pending_count(),
        }
    }
}

/// Host side of a driver
#[derive(Debug, Clone)]
pub struct DriverHandle {
    commands: mpsc::UnboundedSender<DriverCommand>,
    state: watch::Receiver<OverlaySnapshot>,
}

impl DriverHandle {
    pub fn send(&self, command: DriverCommand) -> Result<()> {
        self.commands
            .send(command)
            .map_err(|_| OverlayError::DriverClosed)
    }

    pub fn signal(&self, signal: TriggerSignal) -> Result<()> {
        self.send(DriverCommand::Signal(signal))
    }

    /// Latest published state
    pub fn snapshot(&self) -> OverlaySnapshot {
        *self.state.borrow()
    }

    /// Receiver for waiting on state changes
    pub fn watch(&self) -> watch::Receiver<OverlaySnapshot> {
        self.state.clone()
    }
}

/// Event loop that owns a controller
pub struct OverlayDriver<P: PositioningEngine> {
    controller: VisibilityController<P>,
    commands: mpsc::UnboundedReceiver<DriverCommand>,
    state: watch::Sender<OverlaySnapshot>,
}

/// Wrap a controller in a driver running on tokio time
pub fn channel<P: PositioningEngine>(
    controller: VisibilityController<P>,
) -> (OverlayDriver<P>, DriverHandle) {
    let controller = controller.with_clock(TokioClock);
    let (command_tx, command_rx) = mpsc::unbounded_channel();
    let (state_tx, state_rx) = watch::channel(OverlaySnapshot::of(&controller));

    let driver = OverlayDriver {
        controller,
        commands: command_rx,
        state: state_tx,
    };
    let handle = DriverHandle {
        commands: command_tx,
        state: state_rx,
    };
    (driver, handle)
}

impl<P: PositioningEngine> OverlayDriver<P> {
    pub fn controller(&self) -> &VisibilityController<P> {
        &self.controller
    }

    pub fn controller_mut(&mut self) -> &mut VisibilityController<P> {
        &mut self.controller
    }

    /// Run until `Shutdown` or until every handle is dropped.
    ///
    /// Returns the unmounted controller.
    pub async fn run(mut self) -> VisibilityController<P> {
        tracing::debug!("overlay driver started");
        loop {
            let deadline = self.controller.next_deadline();
            tokio::select! {
                command = self.commands.recv() => match command {
                    Some(DriverCommand::Shutdown) | None => break,
                    Some(command) => self.apply(command),
                },
                _ = sleep_until(deadline) => {
                    self.controller.poll_timers();
                }
            }
            self.publish();
        }

        self.controller.unmount();
        self.publish();
        tracing::debug!("overlay driver stopped");
        self.controller
    }

    fn apply(&mut self, command: DriverCommand) {
        tracing::trace!(?command, "driver command");
        let ctl = &mut self.controller;
        match command {
            DriverCommand::Signal(signal) => {
                ctl.dispatch(&mut TriggerEvent::new(signal));
            }
            DriverCommand::Show => ctl.show(),
            DriverCommand::Hide => ctl.hide(),
            DriverCommand::Close => ctl.close(),
            DriverCommand::BeforeRender => ctl.before_render(),
            DriverCommand::Update => ctl.update(),
            DriverCommand::ForceUpdate => ctl.force_update(),
            DriverCommand::SetDisabled(disabled) => ctl.set_disabled(disabled),
            DriverCommand::SetPlacement(placement) => ctl.set_placement(placement),
            DriverCommand::Refresh => ctl.refresh(),
            DriverCommand::Destroy => ctl.destroy(),
            DriverCommand::Shutdown => ctl.unmount(),
        }
    }

    fn publish(&self) {
        let next = OverlaySnapshot::of(&self.controller);
        self.state.send_if_modified(|current| {
            if *current == next {
                return false;
            }
            *current = next;
            true
        });
    }
}

async fn sleep_until(deadline: Option<Instant>) {
    match deadline {
        Some(at) => tokio::time::sleep_until(tokio::time::Instant::from_std(at)).await,
        None => std::future::pending().await,
    }
}
