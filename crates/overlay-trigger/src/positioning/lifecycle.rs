//! Positioning handle lifecycle
//!
//! The handle is created lazily the first time the overlay needs to be
//! placed, at most one handle is alive at a time, and it is destroyed when
//! the overlay is hidden, disabled or unmounted.

use std::cell::Cell;
use std::rc::Rc;

use super::{AnchorRefs, PositioningEngine, PositioningHandle, PositioningOptions};

/// Shared stacking counter.
///
/// Bumped every time an overlay becomes visible. Controllers that share a
/// counter stack the most recently shown overlay above the others.
#[derive(Debug, Clone)]
pub struct StackingOrder {
    current: Rc<Cell<u32>>,
}

impl StackingOrder {
    pub fn new() -> Self {
        Self {
            current: Rc::new(Cell::new(1)),
        }
    }

    pub fn current(&self) -> u32 {
        self.current.get()
    }

    /// Advance the counter and return the new value
    pub fn bump(&self) -> u32 {
        let next = self.current.get().saturating_add(1);
        self.current.set(next);
        next
    }
}

impl Default for StackingOrder {
    fn default() -> Self {
        Self::new()
    }
}

/// Owns the engine, the anchors and the single live handle
#[derive(Debug)]
pub struct PositioningLifecycle<P: PositioningEngine> {
    engine: P,
    anchors: AnchorRefs<P::Element>,
    options: PositioningOptions,
    stacking: StackingOrder,
    handle: Option<P::Handle>,
}

impl<P: PositioningEngine> PositioningLifecycle<P> {
    pub fn new(engine: P, options: PositioningOptions, stacking: StackingOrder) -> Self {
        let options = options.with_z_index(stacking.current());
        Self {
            engine,
            anchors: AnchorRefs::new(),
            options,
            stacking,
            handle: None,
        }
    }

    pub fn engine(&self) -> &P {
        &self.engine
    }

    pub fn engine_mut(&mut self) -> &mut P {
        &mut self.engine
    }

    pub fn anchors(&self) -> &AnchorRefs<P::Element> {
        &self.anchors
    }

    pub fn anchors_mut(&mut self) -> &mut AnchorRefs<P::Element> {
        &mut self.anchors
    }

    pub fn options(&self) -> &PositioningOptions {
        &self.options
    }

    pub fn handle(&self) -> Option<&P::Handle> {
        self.handle.as_ref()
    }

    pub fn has_handle(&self) -> bool {
        self.handle.is_some()
    }

    pub fn z_index(&self) -> u32 {
        self.options.z_index
    }

    pub fn stacking(&self) -> &StackingOrder {
        &self.stacking
    }

    /// Switch to another (usually shared) stacking counter
    pub fn set_stacking(&mut self, stacking: StackingOrder) {
        self.options.z_index = stacking.current();
        self.stacking = stacking;
    }

    /// Create a handle unless one is alive. Deferred while either anchor is
    /// unresolved; returns whether a handle is alive afterwards.
    pub fn ensure_initialized(&mut self) -> bool {
        if self.handle.is_some() {
            return true;
        }
        let Some((trigger, overlay)) = self.anchors.resolved() else {
            tracing::trace!("positioning deferred: anchors unresolved");
            return false;
        };
        let handle = self.engine.create(trigger, overlay, &self.options);
        tracing::debug!(
            placement = %self.options.placement,
            z_index = self.options.z_index,
            "positioning handle created"
        );
        self.handle = Some(handle);
        true
    }

    /// Reposition a visible overlay, creating the handle on first need
    pub fn update(&mut self, visible: bool) {
        if !visible {
            return;
        }
        match self.handle.as_mut() {
            Some(handle) => handle.update(),
            None => {
                self.ensure_initialized();
            }
        }
    }

    pub fn force_update(&mut self) {
        if let Some(handle) = self.handle.as_mut() {
            handle.force_update();
        }
    }

    /// Replace the options, forward them to a live handle, then update
    pub fn apply_options(&mut self, options: PositioningOptions, visible: bool) {
        self.options = options;
        if let Some(handle) = self.handle.as_mut() {
            handle.set_options(&self.options);
        }
        self.update(visible);
    }

    /// Destroy the live handle, if any
    pub fn destroy(&mut self) {
        if let Some(handle) = self.handle.take() {
            handle.destroy();
            tracing::debug!("positioning handle destroyed");
        }
    }

    /// Destroy the handle unless the overlay is still meant to be showing.
    /// `force` destroys regardless.
    pub fn teardown(&mut self, visible: bool, force: bool) {
        if self.handle.is_none() || (visible && !force) {
            return;
        }
        self.destroy();
    }

    /// The overlay just became visible: raise it and make sure it is placed
    pub fn on_shown(&mut self) {
        self.options.z_index = self.stacking.bump();
        self.ensure_initialized();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::positioning::Placement;
    use crate::test_utils::RecordingEngine;

    fn lifecycle() -> PositioningLifecycle<RecordingEngine> {
        PositioningLifecycle::new(
            RecordingEngine::new(),
            PositioningOptions::new(Placement::Bottom),
            StackingOrder::new(),
        )
    }

    fn attach(lc: &mut PositioningLifecycle<RecordingEngine>) {
        lc.anchors_mut().trigger.set("trigger");
        lc.anchors_mut().overlay.set("overlay");
    }

    #[test]
    fn test_init_deferred_until_anchors_resolve() {
        let mut lc = lifecycle();
        assert!(!lc.ensure_initialized());
        assert_eq!(lc.engine().stats().created, 0);

        attach(&mut lc);
        assert!(lc.ensure_initialized());
        assert!(lc.ensure_initialized());
        assert_eq!(lc.engine().stats().created, 1);
    }

    #[test]
    fn test_update_is_lazy_and_ignores_hidden() {
        let mut lc = lifecycle();
        attach(&mut lc);

        lc.update(false);
        assert!(!lc.has_handle());

        lc.update(true);
        assert!(lc.has_handle());
        lc.update(true);
        let stats = lc.engine().stats();
        assert_eq!(stats.created, 1);
        assert_eq!(stats.updates, 1);
    }

    #[test]
    fn test_teardown_respects_visibility_unless_forced() {
        let mut lc = lifecycle();
        attach(&mut lc);
        lc.ensure_initialized();

        lc.teardown(true, false);
        assert!(lc.has_handle());

        lc.teardown(true, true);
        assert!(!lc.has_handle());
        assert_eq!(lc.engine().stats().destroyed, 1);

        // nothing to tear down
        lc.teardown(false, true);
        lc.destroy();
        assert_eq!(lc.engine().stats().destroyed, 1);
    }

    #[test]
    fn test_on_shown_bumps_stacking() {
        let stacking = StackingOrder::new();
        let mut lc = PositioningLifecycle::new(
            RecordingEngine::new(),
            PositioningOptions::new(Placement::Top),
            stacking.clone(),
        );
        attach(&mut lc);

        lc.on_shown();
        assert_eq!(lc.z_index(), 2);
        assert_eq!(stacking.current(), 2);
        assert_eq!(lc.engine().stats().last_options.map(|o| o.z_index), Some(2));
    }

    #[test]
    fn test_apply_options_forwards_to_handle() {
        let mut lc = lifecycle();
        attach(&mut lc);
        lc.ensure_initialized();

        lc.apply_options(PositioningOptions::new(Placement::Left), true);
        let stats = lc.engine().stats();
        assert_eq!(stats.options_set, 1);
        assert_eq!(stats.updates, 1);
        assert_eq!(lc.options().placement, Placement::Left);
    }

    #[test]
    fn test_force_update_without_handle_is_noop() {
        let mut lc = lifecycle();
        lc.force_update();
        assert_eq!(lc.engine().stats().force_updates, 0);
    }
}
