#![forbid(unsafe_code)]

//! Core: animation primitives, geometry, and host event types.
//!
//! # Role in Folio
//! `folio-core` is the leaf layer. It owns the numeric building blocks the
//! site's interactive components share: the damped [`Spring`](animation::Spring),
//! the clamped [`LinearMap`](animation::LinearMap) used to turn spring output
//! into rotations and offsets, and the [`ClientRect`](geometry::ClientRect)
//! snapshot type that hosts report for element bounding boxes.
//!
//! # How it fits in the system
//! `folio-runtime` schedules frames and propagates values; `folio-web` builds
//! the section tracker, tilt interactor and the rest of the site's behavior on
//! top of both. Nothing in this crate talks to a host directly.

pub mod animation;
pub mod event;
pub mod geometry;
pub mod logging;

// Re-export tracing macros at crate root for ergonomic use.
pub use logging::{debug, debug_span, error, info, info_span, trace, trace_span, warn};
