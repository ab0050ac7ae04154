#![forbid(unsafe_code)]

//! Explicit event-listener registration.
//!
//! Components register interest in a host event kind and get back a
//! [`ListenerId`]; teardown hands the id back. The registry answers "is
//! anyone still listening for X", which lets the host drop events nobody
//! subscribed to (e.g. scrolls delivered after a tracker was unmounted).

use std::collections::BTreeMap;

/// Host event kinds a component can listen for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ListenerKind {
    /// Window scroll.
    Scroll,
    /// Document layout became ready (`DOMContentLoaded`).
    LayoutReady,
    /// Viewport resize.
    Resize,
}

impl ListenerKind {
    /// DOM event name for this kind.
    #[must_use]
    pub const fn dom_event(self) -> &'static str {
        match self {
            Self::Scroll => "scroll",
            Self::LayoutReady => "DOMContentLoaded",
            Self::Resize => "resize",
        }
    }
}

/// Opaque id of one registered listener.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ListenerId(u32);

impl ListenerId {
    #[must_use]
    pub const fn get(self) -> u32 {
        self.0
    }
}

/// Registered listeners, keyed by id.
#[derive(Debug, Clone, Default)]
pub struct ListenerRegistry {
    next_id: u32,
    listeners: BTreeMap<ListenerId, ListenerKind>,
}

impl ListenerRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, kind: ListenerKind) -> ListenerId {
        self.next_id = self.next_id.wrapping_add(1);
        let id = ListenerId(self.next_id);
        self.listeners.insert(id, kind);
        id
    }

    /// Remove `id`, returning its kind if it was registered.
    pub fn remove(&mut self, id: ListenerId) -> Option<ListenerKind> {
        self.listeners.remove(&id)
    }

    #[must_use]
    pub fn kind_of(&self, id: ListenerId) -> Option<ListenerKind> {
        self.listeners.get(&id).copied()
    }

    #[must_use]
    pub fn has_listener(&self, kind: ListenerKind) -> bool {
        self.listeners.values().any(|k| *k == kind)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.listeners.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.listeners.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_and_remove_round_trip() {
        let mut registry = ListenerRegistry::new();
        let id = registry.add(ListenerKind::Scroll);
        assert!(registry.has_listener(ListenerKind::Scroll));
        assert_eq!(registry.remove(id), Some(ListenerKind::Scroll));
        assert!(!registry.has_listener(ListenerKind::Scroll));
        assert!(registry.is_empty());
    }

    #[test]
    fn removing_twice_is_harmless() {
        let mut registry = ListenerRegistry::new();
        let id = registry.add(ListenerKind::LayoutReady);
        registry.remove(id);
        assert_eq!(registry.remove(id), None);
    }

    #[test]
    fn kinds_are_tracked_independently() {
        let mut registry = ListenerRegistry::new();
        let scroll = registry.add(ListenerKind::Scroll);
        registry.add(ListenerKind::Resize);
        registry.remove(scroll);
        assert!(!registry.has_listener(ListenerKind::Scroll));
        assert!(registry.has_listener(ListenerKind::Resize));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn dom_event_names() {
        assert_eq!(ListenerKind::LayoutReady.dom_event(), "DOMContentLoaded");
        assert_eq!(ListenerKind::Scroll.dom_event(), "scroll");
    }
}
