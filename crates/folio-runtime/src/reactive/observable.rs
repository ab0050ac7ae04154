#![forbid(unsafe_code)]

//! Single-threaded value cell that tells its listeners when it changes.
//!
//! An [`Observable`] handle points at shared `Rc<RefCell<..>>` storage; clones
//! are further handles to the same cell. [`Observable::set`] with a value
//! equal to the current one does nothing. Otherwise the value is replaced,
//! the version goes up by one and every live listener runs in the order it
//! subscribed.
//!
//! Listeners are held weakly. The [`Subscription`] returned by
//! [`Observable::subscribe`] owns the callback; dropping it detaches the
//! listener, and the dead slot is pruned on the next change.
//!
//! A listener may call `set` on the same cell. No borrow is held while
//! listeners run, so the nested change notifies after the current one.

use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};

use tracing::trace;
use web_time::Instant;

type Listener<T> = dyn Fn(&T);

struct Slot<T> {
    value: T,
    version: u64,
    listeners: Vec<Weak<Listener<T>>>,
}

/// Shared value with change notification.
pub struct Observable<T>(Rc<RefCell<Slot<T>>>);

impl<T> Clone for Observable<T> {
    fn clone(&self) -> Self {
        Self(Rc::clone(&self.0))
    }
}

impl<T: fmt::Debug> fmt::Debug for Observable<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let cell = self.0.borrow();
        write!(
            f,
            "Observable({:?} @v{}, {} listeners)",
            cell.value,
            cell.version,
            cell.listeners.len()
        )
    }
}

impl<T: Clone + PartialEq + 'static> Observable<T> {
    #[must_use]
    pub fn new(value: T) -> Self {
        Self(Rc::new(RefCell::new(Slot {
            value,
            version: 0,
            listeners: Vec::new(),
        })))
    }

    #[must_use]
    pub fn get(&self) -> T {
        self.0.borrow().value.clone()
    }

    /// Replace the value. Returns `true` if it differed (and listeners ran).
    pub fn set(&self, value: T) -> bool {
        let changed = {
            let mut cell = self.0.borrow_mut();
            if cell.value == value {
                None
            } else {
                cell.value = value;
                cell.version += 1;
                cell.listeners.retain(|l| l.strong_count() > 0);
                let live: Vec<Rc<Listener<T>>> =
                    cell.listeners.iter().filter_map(Weak::upgrade).collect();
                Some((live, cell.value.clone(), cell.version))
            }
        };
        let Some((live, value, version)) = changed else {
            return false;
        };
        if !live.is_empty() {
            let started = Instant::now();
            for listener in &live {
                listener(&value);
            }
            trace!(
                version,
                listeners = live.len() as u64,
                elapsed_us = started.elapsed().as_micros() as u64,
                "observable notified"
            );
        }
        true
    }

    /// Call `callback` with each future value until the guard is dropped.
    pub fn subscribe(&self, callback: impl Fn(&T) + 'static) -> Subscription {
        let owned: Rc<Listener<T>> = Rc::new(callback);
        self.0.borrow_mut().listeners.push(Rc::downgrade(&owned));
        Subscription {
            _owned: Box::new(owned),
        }
    }

    /// Number of changes so far.
    #[must_use]
    pub fn version(&self) -> u64 {
        self.0.borrow().version
    }

    /// Listener slots, including dropped ones not yet pruned.
    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.0.borrow().listeners.len()
    }
}

/// Keeps one listener attached. Drop to detach.
pub struct Subscription {
    _owned: Box<dyn std::any::Any>,
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Subscription")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn recorder<T: Clone + 'static>() -> (Rc<RefCell<Vec<T>>>, impl Fn(&T) + 'static) {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        (seen, move |v: &T| sink.borrow_mut().push(v.clone()))
    }

    #[test]
    fn equal_value_is_ignored() {
        let section = Observable::new("hero");
        let (seen, listener) = recorder::<&str>();
        let _sub = section.subscribe(listener);
        assert!(!section.set("hero"));
        assert_eq!(section.version(), 0);
        assert!(seen.borrow().is_empty());
    }

    #[test]
    fn each_change_reaches_listener_once() {
        let section = Observable::new("hero");
        let (seen, listener) = recorder::<&str>();
        let _sub = section.subscribe(listener);
        section.set("projects");
        section.set("projects");
        section.set("essays");
        assert_eq!(*seen.borrow(), vec!["projects", "essays"]);
        assert_eq!(section.version(), 2);
    }

    #[test]
    fn detached_listener_is_pruned_on_next_change() {
        let section = Observable::new(0u8);
        let (seen, listener) = recorder::<u8>();
        let sub = section.subscribe(listener);
        section.set(1);
        drop(sub);
        assert_eq!(section.subscriber_count(), 1);
        section.set(2);
        assert_eq!(*seen.borrow(), vec![1]);
        assert_eq!(section.subscriber_count(), 0);
    }

    #[test]
    fn listeners_run_in_subscription_order() {
        let section = Observable::new(0);
        let order = Rc::new(RefCell::new(String::new()));
        let first = Rc::clone(&order);
        let second = Rc::clone(&order);
        let _a = section.subscribe(move |_| first.borrow_mut().push_str("nav,"));
        let _b = section.subscribe(move |_| second.borrow_mut().push_str("title"));
        section.set(1);
        assert_eq!(order.borrow().as_str(), "nav,title");
    }

    #[test]
    fn nested_set_from_listener_lands() {
        let section = Observable::new(0);
        let handle = section.clone();
        let _sub = section.subscribe(move |v| {
            if *v == 1 {
                handle.set(2);
            }
        });
        section.set(1);
        assert_eq!(section.get(), 2);
        assert_eq!(section.version(), 2);
    }

    #[test]
    fn debug_shows_value_and_version() {
        let section = Observable::new("hero");
        section.set("contact");
        assert_eq!(format!("{section:?}"), "Observable(\"contact\" @v1, 0 listeners)");
    }
}
