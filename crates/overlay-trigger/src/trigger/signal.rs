//! Interaction signals delivered by the trigger element

use std::fmt;

/// A concrete interaction signal on the trigger element
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum TriggerSignal {
    /// Pointer click
    Click,
    /// Pointer entered the trigger
    PointerEnter,
    /// Pointer left the trigger
    PointerLeave,
    /// Trigger gained focus
    Focus,
    /// Trigger lost focus
    Blur,
}

impl TriggerSignal {
    pub const ALL: [TriggerSignal; 5] = [
        TriggerSignal::Click,
        TriggerSignal::PointerEnter,
        TriggerSignal::PointerLeave,
        TriggerSignal::Focus,
        TriggerSignal::Blur,
    ];

    /// Name of the handler slot the host attaches this signal to
    pub fn handler_name(&self) -> &'static str {
        match self {
            TriggerSignal::Click => "onClick",
            TriggerSignal::PointerEnter => "onMouseenter",
            TriggerSignal::PointerLeave => "onMouseleave",
            TriggerSignal::Focus => "onFocus",
            TriggerSignal::Blur => "onBlur",
        }
    }

    /// Reverse lookup of [`TriggerSignal::handler_name`]
    pub fn from_handler_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|s| s.handler_name() == name)
    }
}

impl fmt::Display for TriggerSignal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.handler_name())
    }
}

/// A signal in flight, with its propagation state
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TriggerEvent {
    signal: TriggerSignal,
    propagation_stopped: bool,
}

impl TriggerEvent {
    pub fn new(signal: TriggerSignal) -> Self {
        Self {
            signal,
            propagation_stopped: false,
        }
    }

    pub fn signal(&self) -> TriggerSignal {
        self.signal
    }

    /// Prevent the host from bubbling this event further
    pub fn stop_propagation(&mut self) {
        self.propagation_stopped = true;
    }

    pub fn is_propagation_stopped(&self) -> bool {
        self.propagation_stopped
    }
}

impl From<TriggerSignal> for TriggerEvent {
    fn from(signal: TriggerSignal) -> Self {
        Self::new(signal)
    }
}
