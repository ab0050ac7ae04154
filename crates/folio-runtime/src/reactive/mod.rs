#![forbid(unsafe_code)]

//! Reactive values.
//!
//! The site's components publish their outputs (the active region, most
//! notably) through [`Observable`] so that rendering code can either poll
//! the current value or subscribe to changes.

pub mod observable;

pub use observable::{Observable, Subscription};
