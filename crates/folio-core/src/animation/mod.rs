#![forbid(unsafe_code)]

//! Time-driven animation primitives.
//!
//! Every primitive implements [`Animation`]: the host advances it with an
//! explicit `dt` once per frame, and reads the current value back. Nothing
//! here reads a clock on its own.

pub mod spring;
pub mod transform;

use std::time::Duration;

pub use spring::{Spring, SpringConfig};
pub use transform::LinearMap;

/// A value that evolves as frame time is fed into it.
pub trait Animation {
    /// Advance by `dt`.
    fn tick(&mut self, dt: Duration);

    /// Whether the animation has settled and further ticks are no-ops.
    fn is_complete(&self) -> bool;

    /// Current value normalized to `[0.0, 1.0]`.
    fn value(&self) -> f32;

    /// Return to the initial state.
    fn reset(&mut self);
}
