//! Visibility controller
//!
//! Wires the trigger mapper, the timer manager and the positioning lifecycle
//! around a single resolved `visible` flag:
//!
//! ```text
//! signal -> intent -> (optional delay) -> visible changes -> handle created / destroyed
//!                                                         -> observers notified
//! ```
//!
//! Everything runs synchronously on the caller's thread. Timers only fire
//! when the host calls [`VisibilityController::poll_timers`].

use std::rc::Rc;
use std::time::Instant;

use crate::config::OverlayConfig;
use crate::mode::{self, ExternalVisibility, VisibilityMode};
use crate::observer::{Observers, SubscriptionId};
use crate::positioning::{
    AnchorRefs, Placement, PositioningEngine, PositioningLifecycle, PositioningOptions, RefSlot,
    StackingOrder,
};
use crate::timer::{Clock, Schedule, ScheduledTask, SystemClock, TimerAction, Timers};
use crate::trigger::{EventBindings, FocusGuard, Intent, TriggerEvent, TriggerSignal};

/// Decides when one overlay is shown and keeps its positioning session in step
pub struct VisibilityController<P: PositioningEngine> {
    config: OverlayConfig,
    manual: bool,
    mode: VisibilityMode,
    external: Option<ExternalVisibility>,
    local_visible: bool,
    /// Last resolved value the transition effects ran for
    observed_visible: bool,
    guard: FocusGuard,
    bindings: EventBindings,
    timers: Timers,
    clock: Rc<dyn Clock>,
    positioning: PositioningLifecycle<P>,
    observers: Observers<bool>,
}

impl<P: PositioningEngine> VisibilityController<P> {
    /// Create an autonomous controller on the system clock
    pub fn new(config: OverlayConfig, engine: P) -> Self {
        let manual = mode::is_manual(&config);
        let bindings = if manual {
            EventBindings::empty()
        } else {
            EventBindings::from_triggers(&config.trigger)
        };
        let positioning = PositioningLifecycle::new(
            engine,
            PositioningOptions::new(config.placement),
            StackingOrder::new(),
        );

        tracing::debug!(
            trigger = %config.trigger,
            manual,
            handlers = bindings.len(),
            "visibility controller created"
        );

        Self {
            mode: VisibilityMode::resolve(&config, false),
            config,
            manual,
            external: None,
            local_visible: false,
            observed_visible: false,
            guard: FocusGuard::new(),
            bindings,
            timers: Timers::new(),
            clock: Rc::new(SystemClock),
            positioning,
            observers: Observers::new(),
        }
    }

    /// Bind visibility to a caller-owned flag (Bound mode)
    pub fn with_external(mut self, external: ExternalVisibility) -> Self {
        self.external = Some(external);
        self.mode = VisibilityMode::resolve(&self.config, true);
        self.observed_visible = self.is_visible();
        self
    }

    /// Use a different time source for scheduling
    pub fn with_clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Rc::new(clock);
        self
    }

    /// Share a stacking counter with other controllers
    pub fn with_stacking(mut self, stacking: StackingOrder) -> Self {
        self.positioning.set_stacking(stacking);
        self
    }

    pub fn config(&self) -> &OverlayConfig {
        &self.config
    }

    pub fn mode(&self) -> VisibilityMode {
        self.mode
    }

    pub fn is_manual(&self) -> bool {
        self.manual
    }

    pub fn is_disabled(&self) -> bool {
        self.config.disabled
    }

    /// Resolved visibility: false when disabled, else the external or local flag
    pub fn is_visible(&self) -> bool {
        if self.config.disabled {
            return false;
        }
        match &self.external {
            Some(external) => external.get(),
            None => self.local_visible,
        }
    }

    /// Whether the next click is swallowed because focus just showed the overlay
    pub fn is_trigger_focused(&self) -> bool {
        self.guard.is_focused()
    }

    /// Handler slots to attach to the trigger element (empty in manual mode)
    pub fn bindings(&self) -> &EventBindings {
        &self.bindings
    }

    pub fn timers(&self) -> &Timers {
        &self.timers
    }

    /// When the host should next call [`Self::poll_timers`]
    pub fn next_deadline(&self) -> Option<Instant> {
        self.timers.next_deadline()
    }

    pub fn anchors(&self) -> &AnchorRefs<P::Element> {
        self.positioning.anchors()
    }

    pub fn trigger_ref_mut(&mut self) -> &mut RefSlot<P::Element> {
        &mut self.positioning.anchors_mut().trigger
    }

    pub fn overlay_ref_mut(&mut self) -> &mut RefSlot<P::Element> {
        &mut self.positioning.anchors_mut().overlay
    }

    /// The live positioning handle, for diagnostics
    pub fn handle(&self) -> Option<&P::Handle> {
        self.positioning.handle()
    }

    pub fn engine(&self) -> &P {
        self.positioning.engine()
    }

    pub fn options(&self) -> &PositioningOptions {
        self.positioning.options()
    }

    pub fn z_index(&self) -> u32 {
        self.positioning.z_index()
    }

    /// Observe visibility transitions; called synchronously with the new value
    pub fn subscribe(&mut self, callback: impl FnMut(&bool) + 'static) -> SubscriptionId {
        self.observers.subscribe(callback)
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.observers.unsubscribe(id)
    }

    // ---- intents

    /// Show now, or after `show_after`. Ignored when manual or disabled.
    pub fn show(&mut self) {
        if self.manual || self.config.disabled {
            tracing::trace!("show ignored (manual or disabled)");
            return;
        }
        self.timers.cancel_all();
        let now = self.clock.now();
        match self.timers.schedule_show(now, self.config.show_delay()) {
            Schedule::Immediate => self.show_now(now),
            Schedule::Deferred(id) => {
                tracing::debug!(?id, delay_ms = self.config.show_after, "show scheduled")
            }
        }
    }

    /// Close now, or after `hide_after`. Ignored when manual.
    pub fn hide(&mut self) {
        if self.manual {
            tracing::trace!("hide ignored (manual)");
            return;
        }
        self.timers.cancel_all();
        let now = self.clock.now();
        match self.timers.schedule_hide_or_close(now, self.config.hide_delay()) {
            Schedule::Immediate => self.close(),
            Schedule::Deferred(id) => {
                tracing::debug!(?id, delay_ms = self.config.hide_after, "close scheduled")
            }
        }
    }

    /// Hide immediately. A disabled overlay also drops its handle.
    pub fn close(&mut self) {
        self.write_visible(false);
        if self.config.disabled {
            let visible = self.is_visible();
            self.positioning.teardown(visible, true);
        }
    }

    pub fn toggle(&mut self) {
        if self.is_visible() {
            self.hide();
        } else {
            self.show();
        }
    }

    fn show_now(&mut self, at: Instant) {
        self.timers
            .schedule_auto_close(at, self.config.auto_close_after());
        self.write_visible(true);
    }

    fn write_visible(&mut self, value: bool) {
        if self.manual {
            tracing::trace!(value, "visibility write rejected (manual)");
            return;
        }
        match self.external.as_mut() {
            Some(external) => external.request(value),
            None => self.local_visible = value,
        }
        self.refresh();
    }

    // ---- signals and timers

    /// Route an interaction signal from the trigger element.
    ///
    /// Returns false, leaving propagation alone, when no handler is bound
    /// for the signal.
    pub fn dispatch(&mut self, event: &mut TriggerEvent) -> bool {
        let signal = event.signal();
        if !self.bindings.contains(signal) {
            return false;
        }
        event.stop_propagation();

        match self.guard.intent_for(signal) {
            Some(Intent::Show) => self.show(),
            Some(Intent::Hide) => self.hide(),
            Some(Intent::Toggle) => self.toggle(),
            None => tracing::trace!(%signal, "click after focus suppressed"),
        }
        true
    }

    /// Convenience wrapper around [`Self::dispatch`]
    pub fn handle_signal(&mut self, signal: TriggerSignal) -> TriggerEvent {
        let mut event = TriggerEvent::new(signal);
        self.dispatch(&mut event);
        event
    }

    /// Fire every task whose deadline has passed; returns how many fired
    pub fn poll_timers(&mut self) -> usize {
        let now = self.clock.now();
        let mut fired = 0;
        while let Some(task) = self.timers.pop_due(now) {
            self.fire(task);
            fired += 1;
        }
        fired
    }

    fn fire(&mut self, task: ScheduledTask) {
        tracing::trace!(id = ?task.id(), action = ?task.action(), "timer fired");
        match task.action() {
            TimerAction::Show => {
                if self.config.disabled {
                    tracing::debug!("delayed show dropped (disabled)");
                    return;
                }
                // Chain from the deadline so results do not depend on poll timing
                self.show_now(task.deadline());
            }
            TimerAction::Close => self.close(),
            TimerAction::AutoClose => self.write_visible(false),
        }
    }

    // ---- host notifications

    /// Re-evaluate resolved visibility and run transition effects if it changed.
    ///
    /// Call after the caller-owned flag changes in Bound mode.
    pub fn refresh(&mut self) {
        let visible = self.is_visible();
        if visible == self.observed_visible {
            return;
        }
        self.observed_visible = visible;

        if visible {
            self.positioning.on_shown();
            tracing::debug!(z_index = self.positioning.z_index(), "overlay shown");
        } else {
            self.positioning.teardown(false, false);
            tracing::debug!("overlay hidden");
        }
        self.observers.notify(&visible);
    }

    /// Enable or disable the overlay; disabling hides it and drops its handle
    pub fn set_disabled(&mut self, disabled: bool) {
        if self.config.disabled == disabled {
            return;
        }
        self.config.disabled = disabled;
        tracing::debug!(disabled, "overlay disabled state changed");
        self.refresh();
    }

    /// The host is about to re-render: forget element references
    pub fn before_render(&mut self) {
        self.positioning.anchors_mut().invalidate();
    }

    /// The host component is going away: cancel timers and drop the handle
    pub fn unmount(&mut self) {
        self.timers.cancel_all();
        self.positioning.destroy();
    }

    // ---- positioning passthrough

    /// Reposition a visible overlay, creating its handle if needed
    pub fn update(&mut self) {
        let visible = self.is_visible();
        self.positioning.update(visible);
    }

    pub fn force_update(&mut self) {
        self.positioning.force_update();
    }

    /// Replace the placement options, then update
    pub fn set_options(&mut self, options: PositioningOptions) {
        let visible = self.is_visible();
        self.positioning.apply_options(options, visible);
    }

    pub fn set_placement(&mut self, placement: Placement) {
        self.config.placement = placement;
        let options = PositioningOptions {
            placement,
            ..*self.positioning.options()
        };
        self.set_options(options);
    }

    /// Destroy the live handle. A later `update()` while visible creates a new one.
    pub fn destroy(&mut self) {
        self.positioning.destroy();
    }
}

impl<P: PositioningEngine> Drop for VisibilityController<P> {
    fn drop(&mut self) {
        self.unmount();
    }
}

impl<P: PositioningEngine> std::fmt::Debug for VisibilityController<P> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VisibilityController")
            .field("mode", &self.mode)
            .field("manual", &self.manual)
            .field("disabled", &self.config.disabled)
            .field("visible", &self.is_visible())
            .field("has_handle", &self.positioning.has_handle())
            .field("pending_timers", &self.timers.pending_count())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{ManualClock, RecordingEngine};
    use crate::timer::TimerSlot;
    use crate::trigger::{TriggerKind, TriggerSet};
    use std::cell::{Cell, RefCell};

    struct Harness {
        ctl: VisibilityController<RecordingEngine>,
        clock: ManualClock,
        engine: RecordingEngine,
    }

    impl Harness {
        fn new(config: OverlayConfig) -> Self {
            Self::build(config, |ctl| ctl)
        }

        fn build(
            config: OverlayConfig,
            wrap: impl FnOnce(VisibilityController<RecordingEngine>) -> VisibilityController<RecordingEngine>,
        ) -> Self {
            let engine = RecordingEngine::new();
            let clock = ManualClock::new();
            let mut ctl = wrap(VisibilityController::new(config, engine.clone()).with_clock(clock.clone()));
            ctl.trigger_ref_mut().set("trigger");
            ctl.overlay_ref_mut().set("overlay");
            Self { ctl, clock, engine }
        }

        fn advance(&mut self, ms: u64) {
            self.clock.advance_ms(ms);
            self.ctl.poll_timers();
        }

        fn signal(&mut self, signal: TriggerSignal) -> TriggerEvent {
            self.ctl.handle_signal(signal)
        }

        fn live(&self) -> u64 {
            self.engine.stats().live()
        }
    }

    fn record_transitions(ctl: &mut VisibilityController<RecordingEngine>) -> Rc<RefCell<Vec<bool>>> {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = seen.clone();
        ctl.subscribe(move |v| sink.borrow_mut().push(*v));
        seen
    }

    #[test]
    fn test_hover_with_show_delay() {
        let mut h = Harness::new(
            OverlayConfig::default()
                .with_trigger(TriggerKind::Hover)
                .with_show_after(200),
        );

        let event = h.signal(TriggerSignal::PointerEnter);
        assert!(event.is_propagation_stopped());

        h.advance(150);
        assert!(!h.ctl.is_visible());
        assert_eq!(h.live(), 0);

        h.advance(50);
        assert!(h.ctl.is_visible());
        assert!(h.ctl.handle().is_some());
        assert_eq!(h.live(), 1);

        h.signal(TriggerSignal::PointerLeave);
        assert!(!h.ctl.is_visible());
        assert!(h.ctl.handle().is_none());
        assert_eq!(h.engine.stats().destroyed, 1);
    }

    #[test]
    fn test_click_auto_close() {
        let mut h = Harness::new(
            OverlayConfig::default()
                .with_trigger(TriggerKind::Click)
                .with_auto_close(500),
        );

        h.signal(TriggerSignal::Click);
        assert!(h.ctl.is_visible());
        assert_eq!(h.live(), 1);

        h.advance(499);
        assert!(h.ctl.is_visible());

        h.advance(1);
        assert!(!h.ctl.is_visible());
        assert_eq!(h.live(), 0);
    }

    #[test]
    fn test_hide_cancels_pending_show() {
        let mut h = Harness::new(OverlayConfig::default().with_show_after(200));
        let seen = record_transitions(&mut h.ctl);

        h.ctl.show();
        h.advance(100);
        h.ctl.hide();
        h.advance(500);

        assert!(!h.ctl.is_visible());
        assert!(seen.borrow().is_empty());
        assert_eq!(h.engine.stats().created, 0);
    }

    #[test]
    fn test_at_most_one_timer_per_slot() {
        let mut h = Harness::new(
            OverlayConfig::default()
                .with_show_after(100)
                .with_hide_after(100),
        );

        let ops: [fn(&mut VisibilityController<RecordingEngine>); 6] = [
            VisibilityController::show,
            VisibilityController::show,
            VisibilityController::hide,
            VisibilityController::show,
            VisibilityController::hide,
            VisibilityController::hide,
        ];
        for op in ops {
            op(&mut h.ctl);
            h.clock.advance_ms(30);
            let timers = h.ctl.timers();
            assert!(timers.pending_count() <= 1);
        }
        assert!(h.ctl.timers().pending(TimerSlot::Show).is_none());
        assert!(h.ctl.timers().pending(TimerSlot::Hide).is_some());
    }

    #[test]
    fn test_delayed_hide_keeps_handle_until_close() {
        let mut h = Harness::new(OverlayConfig::default().with_hide_after(100));
        h.ctl.show();
        assert_eq!(h.live(), 1);

        h.ctl.hide();
        assert!(h.ctl.is_visible());
        assert_eq!(h.live(), 1);

        h.advance(100);
        assert!(!h.ctl.is_visible());
        assert_eq!(h.live(), 0);
    }

    #[test]
    fn test_disabled_show_is_noop() {
        let mut h = Harness::new(OverlayConfig::default().with_disabled(true));
        h.ctl.show();
        assert!(!h.ctl.is_visible());
        assert_eq!(h.ctl.timers().pending_count(), 0);
        assert_eq!(h.engine.stats().created, 0);
    }

    #[test]
    fn test_disabling_tears_down_handle() {
        let mut h = Harness::new(OverlayConfig::default());
        h.ctl.show();
        assert_eq!(h.live(), 1);

        h.ctl.set_disabled(true);
        assert!(!h.ctl.is_visible());
        assert_eq!(h.live(), 0);

        h.ctl.close();
        assert_eq!(h.engine.stats().destroyed, 1);
    }

    #[test]
    fn test_close_while_disabled_releases_handle() {
        let cell = Rc::new(Cell::new(true));
        let mut h = Harness::build(OverlayConfig::default(), |ctl| {
            ctl.with_external(ExternalVisibility::read_only(cell.clone()))
        });
        h.ctl.update();
        assert_eq!(h.live(), 1);

        // the caller ignores the write; the handle still goes
        h.ctl.config.disabled = true;
        h.ctl.close();
        assert!(cell.get());
        assert_eq!(h.live(), 0);
    }

    #[test]
    fn test_delayed_show_dropped_when_disabled() {
        let mut h = Harness::new(OverlayConfig::default().with_show_after(100));
        h.ctl.show();
        h.ctl.set_disabled(true);
        h.advance(100);
        assert!(!h.ctl.is_visible());
        assert_eq!(h.engine.stats().created, 0);
    }

    #[test]
    fn test_manual_mode_installs_nothing() {
        for config in [
            OverlayConfig::default().with_manual_mode(true),
            OverlayConfig::default().with_trigger(TriggerKind::Manual),
        ] {
            let mut h = Harness::new(config);
            assert!(h.ctl.is_manual());
            assert_eq!(h.ctl.mode(), VisibilityMode::Bound);
            assert!(h.ctl.bindings().is_empty());

            let event = h.signal(TriggerSignal::Click);
            assert!(!event.is_propagation_stopped());

            h.ctl.show();
            assert!(!h.ctl.is_visible());
            assert_eq!(h.ctl.timers().pending_count(), 0);
        }
    }

    #[test]
    fn test_manual_bound_follows_external_flag() {
        let cell = Rc::new(Cell::new(true));
        let mut h = Harness::build(
            OverlayConfig::default()
                .with_trigger(TriggerKind::Click)
                .with_manual_mode(true),
            |ctl| ctl.with_external(ExternalVisibility::from_cell(cell.clone())),
        );
        assert_eq!(h.ctl.mode(), VisibilityMode::Bound);
        assert!(h.ctl.bindings().get("onClick").is_none());
        assert!(h.ctl.is_visible());

        h.ctl.update();
        assert_eq!(h.live(), 1);

        // writes are rejected in manual mode
        h.ctl.hide();
        h.ctl.close();
        assert!(cell.get());

        cell.set(false);
        h.ctl.refresh();
        assert!(!h.ctl.is_visible());
        assert_eq!(h.live(), 0);
    }

    #[test]
    fn test_bound_click_writes_through() {
        let cell = Rc::new(Cell::new(false));
        let mut h = Harness::build(
            OverlayConfig::default().with_trigger(TriggerKind::Click),
            |ctl| ctl.with_external(ExternalVisibility::from_cell(cell.clone())),
        );
        assert_eq!(h.ctl.mode(), VisibilityMode::Bound);

        h.signal(TriggerSignal::Click);
        assert!(cell.get());
        assert_eq!(h.live(), 1);

        h.signal(TriggerSignal::Click);
        assert!(!cell.get());
        assert_eq!(h.live(), 0);
    }

    #[test]
    fn test_bound_owner_may_refuse() {
        let cell = Rc::new(Cell::new(false));
        let requests = Rc::new(RefCell::new(Vec::new()));
        let reader = cell.clone();
        let log = requests.clone();
        let mut h = Harness::build(
            OverlayConfig::default().with_trigger(TriggerKind::Click),
            |ctl| {
                ctl.with_external(ExternalVisibility::new(
                    move || reader.get(),
                    move |v| log.borrow_mut().push(v),
                ))
            },
        );

        h.signal(TriggerSignal::Click);
        assert_eq!(*requests.borrow(), vec![true]);
        assert!(!h.ctl.is_visible());
        assert_eq!(h.engine.stats().created, 0);
    }

    #[test]
    fn test_focus_then_click_shows_once() {
        let mut h = Harness::new(
            OverlayConfig::default()
                .with_trigger(TriggerSet::new([TriggerKind::Focus, TriggerKind::Click]).unwrap()),
        );
        let seen = record_transitions(&mut h.ctl);

        h.signal(TriggerSignal::Focus);
        assert!(h.ctl.is_trigger_focused());
        h.signal(TriggerSignal::Click);
        assert!(h.ctl.is_visible());
        assert!(!h.ctl.is_trigger_focused());
        assert_eq!(*seen.borrow(), vec![true]);

        h.signal(TriggerSignal::Click);
        assert!(!h.ctl.is_visible());
        assert_eq!(*seen.borrow(), vec![true, false]);
    }

    #[test]
    fn test_unbound_signal_propagates() {
        let mut h = Harness::new(OverlayConfig::default().with_trigger(TriggerKind::Hover));
        let event = h.signal(TriggerSignal::Click);
        assert!(!event.is_propagation_stopped());
        assert!(!h.ctl.is_visible());
    }

    #[test]
    fn test_destroy_then_update_recreates_one_handle() {
        let mut h = Harness::new(OverlayConfig::default());
        h.ctl.show();
        assert_eq!(h.engine.stats().created, 1);

        h.ctl.destroy();
        assert_eq!(h.live(), 0);

        h.ctl.update();
        h.ctl.update();
        let stats = h.engine.stats();
        assert_eq!(stats.created, 2);
        assert_eq!(stats.live(), 1);
        assert_eq!(stats.updates, 1);
    }

    #[test]
    fn test_no_leak_across_cycles() {
        let mut h = Harness::new(OverlayConfig::default().with_trigger(TriggerKind::Hover));
        for _ in 0..10 {
            h.signal(TriggerSignal::PointerEnter);
            assert_eq!(h.live(), 1);
            h.signal(TriggerSignal::PointerLeave);
            assert_eq!(h.live(), 0);
        }
        assert_eq!(h.engine.stats().created, 10);
    }

    #[test]
    fn test_unresolved_anchors_defer_creation() {
        let mut h = Harness::new(OverlayConfig::default());
        h.ctl.before_render();
        assert!(h.ctl.anchors().resolved().is_none());

        h.ctl.show();
        assert!(h.ctl.is_visible());
        assert_eq!(h.engine.stats().created, 0);

        h.ctl.trigger_ref_mut().set("trigger-2");
        h.ctl.overlay_ref_mut().set("overlay-2");
        h.ctl.update();
        let stats = h.engine.stats();
        assert_eq!(stats.created, 1);
        assert_eq!(stats.last_anchors, Some(("trigger-2".to_string(), "overlay-2".to_string())));
    }

    #[test]
    fn test_auto_close_scoped_to_session() {
        let mut h = Harness::new(OverlayConfig::default().with_auto_close(500));

        h.ctl.show();
        h.advance(300);
        h.ctl.hide();
        h.ctl.show();

        h.advance(300);
        assert!(h.ctl.is_visible());

        h.advance(200);
        assert!(!h.ctl.is_visible());
    }

    #[test]
    fn test_auto_close_chains_from_show_deadline() {
        let mut h = Harness::new(
            OverlayConfig::default()
                .with_show_after(100)
                .with_auto_close(100),
        );
        h.ctl.show();

        // a single late poll fires both the show and its auto-close
        h.advance(250);
        assert!(!h.ctl.is_visible());
        assert_eq!(h.engine.stats().created, 1);
        assert_eq!(h.live(), 0);
    }

    #[test]
    fn test_shared_stacking_order() {
        let stacking = StackingOrder::new();
        let mut a = Harness::build(OverlayConfig::default(), |ctl| ctl.with_stacking(stacking.clone()));
        let mut b = Harness::build(OverlayConfig::default(), |ctl| ctl.with_stacking(stacking.clone()));

        a.ctl.show();
        b.ctl.show();
        assert_eq!(a.ctl.z_index(), 2);
        assert_eq!(b.ctl.z_index(), 3);
        assert_eq!(b.engine.stats().last_options.map(|o| o.z_index), Some(3));
    }

    #[test]
    fn test_set_placement_forwards_options() {
        let mut h = Harness::new(OverlayConfig::default());
        h.ctl.show();
        h.ctl.set_placement(Placement::RightStart);

        let stats = h.engine.stats();
        assert_eq!(stats.options_set, 1);
        assert_eq!(stats.last_options.map(|o| o.placement), Some(Placement::RightStart));
        assert_eq!(h.ctl.options().z_index, 2);
    }

    #[test]
    fn test_force_update_forwards() {
        let mut h = Harness::new(OverlayConfig::default());
        h.ctl.force_update();
        h.ctl.show();
        h.ctl.force_update();
        assert_eq!(h.engine.stats().force_updates, 1);
    }

    #[test]
    fn test_unmount_cancels_and_destroys() {
        let mut h = Harness::new(OverlayConfig::default().with_auto_close(100));
        h.ctl.show();
        h.ctl.unmount();
        assert_eq!(h.ctl.timers().pending_count(), 0);
        assert_eq!(h.live(), 0);
    }

    #[test]
    fn test_drop_releases_handle() {
        let engine = RecordingEngine::new();
        {
            let mut ctl = VisibilityController::new(OverlayConfig::default(), engine.clone());
            ctl.trigger_ref_mut().set("t");
            ctl.overlay_ref_mut().set("o");
            ctl.show();
            assert_eq!(engine.stats().live(), 1);
        }
        assert_eq!(engine.stats().live(), 0);
    }
}
