//! Signal-to-intent mapping and handler bindings

use std::collections::BTreeMap;

use super::{TriggerSet, TriggerSignal};

/// What the controller should do in response to a signal
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Intent {
    Show,
    Hide,
    /// Hide when visible, show otherwise
    Toggle,
}

/// Tracks whether the trigger was just focused.
///
/// Tapping a focusable trigger delivers focus and then click. The focus
/// already shows the overlay, so the click that follows must not toggle it
/// closed again. The guard swallows exactly one click after a focus.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FocusGuard {
    focused: bool,
}

impl FocusGuard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_focused(&self) -> bool {
        self.focused
    }

    /// Map a signal to an intent, updating the guard. `None` means suppressed.
    pub fn intent_for(&mut self, signal: TriggerSignal) -> Option<Intent> {
        match signal {
            TriggerSignal::Click => {
                if self.focused {
                    self.focused = false;
                    None
                } else {
                    Some(Intent::Toggle)
                }
            }
            TriggerSignal::PointerEnter => Some(Intent::Show),
            TriggerSignal::PointerLeave => Some(Intent::Hide),
            TriggerSignal::Focus => {
                self.focused = true;
                Some(Intent::Show)
            }
            TriggerSignal::Blur => {
                self.focused = false;
                Some(Intent::Hide)
            }
        }
    }
}

/// Handler slots the host attaches to the trigger element, keyed by name
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EventBindings {
    handlers: BTreeMap<&'static str, TriggerSignal>,
}

impl EventBindings {
    /// No handlers (manual mode)
    pub fn empty() -> Self {
        Self::default()
    }

    /// Expand every kind in the set into its handler slots
    pub fn from_triggers(triggers: &TriggerSet) -> Self {
        let mut bindings = Self::empty();
        for kind in triggers.iter() {
            for signal in kind.signals() {
                bindings.handlers.insert(signal.handler_name(), *signal);
            }
        }
        bindings
    }

    /// Look up the signal bound to a handler name
    pub fn get(&self, handler_name: &str) -> Option<TriggerSignal> {
        self.handlers.get(handler_name).copied()
    }

    pub fn contains(&self, signal: TriggerSignal) -> bool {
        self.handlers.contains_key(signal.handler_name())
    }

    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.handlers.keys().copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, TriggerSignal)> + '_ {
        self.handlers.iter().map(|(name, signal)| (*name, *signal))
    }

    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::trigger::TriggerKind;

    #[test]
    fn test_click_after_focus_suppressed_once() {
        let mut guard = FocusGuard::new();
        assert_eq!(guard.intent_for(TriggerSignal::Focus), Some(Intent::Show));
        assert_eq!(guard.intent_for(TriggerSignal::Click), None);
        assert!(!guard.is_focused());
        assert_eq!(guard.intent_for(TriggerSignal::Click), Some(Intent::Toggle));
    }

    #[test]
    fn test_blur_resets_guard() {
        let mut guard = FocusGuard::new();
        guard.intent_for(TriggerSignal::Focus);
        assert_eq!(guard.intent_for(TriggerSignal::Blur), Some(Intent::Hide));
        assert_eq!(guard.intent_for(TriggerSignal::Click), Some(Intent::Toggle));
    }

    #[test]
    fn test_hover_intents() {
        let mut guard = FocusGuard::new();
        assert_eq!(guard.intent_for(TriggerSignal::PointerEnter), Some(Intent::Show));
        assert_eq!(guard.intent_for(TriggerSignal::PointerLeave), Some(Intent::Hide));
    }

    #[test]
    fn test_bindings_from_set() {
        let set = TriggerSet::new([TriggerKind::Hover, TriggerKind::Focus]).unwrap();
        let bindings = EventBindings::from_triggers(&set);
        assert_eq!(bindings.len(), 4);
        assert_eq!(bindings.get("onMouseenter"), Some(TriggerSignal::PointerEnter));
        assert_eq!(bindings.get("onBlur"), Some(TriggerSignal::Blur));
        assert!(!bindings.contains(TriggerSignal::Click));
    }

    #[test]
    fn test_manual_kind_binds_nothing() {
        let bindings = EventBindings::from_triggers(&TriggerSet::single(TriggerKind::Manual));
        assert!(bindings.is_empty());
    }
}
