//! Scheduled show / hide transitions
//!
//! The timer manager owns at most one pending task per direction. Arming a
//! slot cancels its previous occupant, and every `show()` / `hide()` on the
//! controller starts with [`Timers::cancel_all`], so the most recent intent
//! always wins.
//!
//! Timers never fire on their own: the host polls [`Timers::pop_due`] with
//! the current time (see [`crate::driver`] for a tokio-driven loop).

use std::time::{Duration, Instant};

/// Source of the current time
pub trait Clock {
    fn now(&self) -> Instant;
}

/// Wall clock backed by [`Instant::now`]
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}

/// Identifier of a scheduled task
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TaskId(u64);

/// Effect executed when a task fires
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerAction {
    /// Delayed show
    Show,
    /// Delayed hide (runs the full close path)
    Close,
    /// Automatic hide at the end of a visible session
    AutoClose,
}

impl TimerAction {
    /// Slot the action lives in
    pub fn slot(&self) -> TimerSlot {
        match self {
            TimerAction::Show => TimerSlot::Show,
            TimerAction::Close | TimerAction::AutoClose => TimerSlot::Hide,
        }
    }
}

/// The two pending-transition slots
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerSlot {
    Show,
    Hide,
}

/// A pending transition, cancelable until it is popped
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScheduledTask {
    id: TaskId,
    deadline: Instant,
    action: TimerAction,
}

impl ScheduledTask {
    pub fn id(&self) -> TaskId {
        self.id
    }

    pub fn deadline(&self) -> Instant {
        self.deadline
    }

    pub fn action(&self) -> TimerAction {
        self.action
    }

    pub fn is_due(&self, now: Instant) -> bool {
        self.deadline <= now
    }
}

/// Result of asking the timer manager to schedule a transition
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Schedule {
    /// Zero delay: the caller runs the effect synchronously
    Immediate,
    /// The effect will run when the task fires
    Deferred(TaskId),
}

/// Timer manager with one show slot and one hide slot
#[derive(Debug, Default)]
pub struct Timers {
    show: Option<ScheduledTask>,
    hide: Option<ScheduledTask>,
    next_id: u64,
}

impl Timers {
    pub fn new() -> Self {
        Self::default()
    }

    fn slot_mut(&mut self, slot: TimerSlot) -> &mut Option<ScheduledTask> {
        match slot {
            TimerSlot::Show => &mut self.show,
            TimerSlot::Hide => &mut self.hide,
        }
    }

    fn arm(&mut self, at: Instant, action: TimerAction) -> TaskId {
        self.cancel_slot(action.slot());
        self.next_id += 1;
        let id = TaskId(self.next_id);
        tracing::trace!(?id, ?action, "timer armed");
        *self.slot_mut(action.slot()) = Some(ScheduledTask {
            id,
            deadline: at,
            action,
        });
        id
    }

    /// Schedule a show after `delay`; zero means show now
    pub fn schedule_show(&mut self, now: Instant, delay: Duration) -> Schedule {
        if delay.is_zero() {
            return Schedule::Immediate;
        }
        Schedule::Deferred(self.arm(now + delay, TimerAction::Show))
    }

    /// Schedule a close after `hide_after`; zero means close now
    pub fn schedule_hide_or_close(&mut self, now: Instant, hide_after: Duration) -> Schedule {
        if hide_after.is_zero() {
            return Schedule::Immediate;
        }
        Schedule::Deferred(self.arm(now + hide_after, TimerAction::Close))
    }

    /// Arm the auto-close for a visible session; zero disables it
    pub fn schedule_auto_close(&mut self, now: Instant, auto_close: Duration) -> Option<TaskId> {
        if auto_close.is_zero() {
            return None;
        }
        Some(self.arm(now + auto_close, TimerAction::AutoClose))
    }

    /// Cancel whatever occupies `slot`; returns whether a task was pending
    pub fn cancel_slot(&mut self, slot: TimerSlot) -> bool {
        match self.slot_mut(slot).take() {
            Some(task) => {
                tracing::trace!(id = ?task.id, action = ?task.action, "timer cancelled");
                true
            }
            None => false,
        }
    }

    /// Cancel a specific task. Cancelling twice, or after it fired, is a no-op.
    pub fn cancel(&mut self, id: TaskId) -> bool {
        for slot in [TimerSlot::Show, TimerSlot::Hide] {
            if self.slot_mut(slot).as_ref().is_some_and(|t| t.id == id) {
                return self.cancel_slot(slot);
            }
        }
        false
    }

    pub fn cancel_all(&mut self) {
        self.cancel_slot(TimerSlot::Show);
        self.cancel_slot(TimerSlot::Hide);
    }

    pub fn pending(&self, slot: TimerSlot) -> Option<&ScheduledTask> {
        match slot {
            TimerSlot::Show => self.show.as_ref(),
            TimerSlot::Hide => self.hide.as_ref(),
        }
    }

    pub fn pending_count(&self) -> usize {
        usize::from(self.show.is_some()) + usize::from(self.hide.is_some())
    }

    /// Earliest deadline among pending tasks
    pub fn next_deadline(&self) -> Option<Instant> {
        self.earliest().map(|task| task.deadline)
    }

    fn earliest(&self) -> Option<&ScheduledTask> {
        [self.show.as_ref(), self.hide.as_ref()]
            .into_iter()
            .flatten()
            .min_by_key(|task| (task.deadline, task.id))
    }

    /// Remove and return the earliest task whose deadline has passed
    pub fn pop_due(&mut self, now: Instant) -> Option<ScheduledTask> {
        let slot = self.earliest().filter(|t| t.is_due(now))?.action.slot();
        self.slot_mut(slot).take()
    }
}
