#![forbid(unsafe_code)]

//! Folio Runtime
//!
//! Host-driven scheduling primitives shared by the site's components.
//!
//! # Key Components
//!
//! - [`FrameScheduler`] - animation-frame request/cancel bookkeeping
//! - [`FrameHost`] - trait for anything that can schedule frame callbacks
//! - [`ListenerRegistry`] - explicit event-listener registration
//! - [`Observable`] - shared value with change notification
//!
//! # Role in Folio
//! Components never own a timer or an event loop. They ask the host for a
//! frame or a listener, keep the returned handle, and give it back on
//! teardown. The types here are the bookkeeping on the host side of that
//! contract, usable both by the wasm glue and by native tests.

pub mod frame_scheduler;
pub mod listener;
pub mod reactive;

pub use frame_scheduler::{FrameHandle, FrameHost, FrameScheduler};
pub use listener::{ListenerId, ListenerKind, ListenerRegistry};
pub use reactive::{Observable, Subscription};
