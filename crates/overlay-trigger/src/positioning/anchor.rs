//! Reference slots for the trigger and overlay elements

/// A host-populated reference to an element.
///
/// The host fills the slot during its render pass and the controller clears
/// it before the next one, so a slot never points at an element from an
/// earlier render.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RefSlot<E> {
    element: Option<E>,
}

impl<E> RefSlot<E> {
    pub fn new() -> Self {
        Self { element: None }
    }

    pub fn set(&mut self, element: E) {
        self.element = Some(element);
    }

    pub fn clear(&mut self) {
        self.element = None;
    }

    pub fn get(&self) -> Option<&E> {
        self.element.as_ref()
    }

    pub fn is_resolved(&self) -> bool {
        self.element.is_some()
    }
}

impl<E> Default for RefSlot<E> {
    fn default() -> Self {
        Self::new()
    }
}

/// The two anchors a positioning session needs
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnchorRefs<E> {
    /// The element whose interactions drive the overlay
    pub trigger: RefSlot<E>,
    /// The floating element itself
    pub overlay: RefSlot<E>,
}

impl<E> AnchorRefs<E> {
    pub fn new() -> Self {
        Self {
            trigger: RefSlot::new(),
            overlay: RefSlot::new(),
        }
    }

    /// Both elements, if both are resolved
    pub fn resolved(&self) -> Option<(&E, &E)> {
        Some((self.trigger.get()?, self.overlay.get()?))
    }

    /// Drop both references ahead of a re-render
    pub fn invalidate(&mut self) {
        self.trigger.clear();
        self.overlay.clear();
    }
}

impl<E> Default for AnchorRefs<E> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolved_requires_both() {
        let mut anchors: AnchorRefs<&str> = AnchorRefs::new();
        assert_eq!(anchors.resolved(), None);

        anchors.trigger.set("button");
        assert_eq!(anchors.resolved(), None);

        anchors.overlay.set("tooltip");
        assert_eq!(anchors.resolved(), Some((&"button", &"tooltip")));
    }

    #[test]
    fn test_invalidate_clears_both() {
        let mut anchors = AnchorRefs::new();
        anchors.trigger.set(1);
        anchors.overlay.set(2);
        anchors.invalidate();
        assert!(!anchors.trigger.is_resolved());
        assert!(!anchors.overlay.is_resolved());
    }
}
