#![forbid(unsafe_code)]

//! `folio-web` holds the interactive pieces of the Folio portfolio site.
//!
//! Design goals:
//! - **Host-driven I/O**: the embedding environment (JS) pushes scroll,
//!   pointer and layout events and drains [`HostCommand`]s.
//! - **Deterministic time**: the host advances a monotonic clock explicitly.
//! - **No blocking / no threads**: suitable for `wasm32-unknown-unknown`.
//!
//! The two core behaviors are [`SectionTracker`] (scroll position to active
//! page section) and [`TiltInteractor`] (pointer position to card
//! rotation). Everything else is presentation state driven by the same
//! frame loop.

pub mod config;
pub mod content;
pub mod host;
#[cfg(feature = "input-parser")]
pub mod input_parser;
pub mod nav;
pub mod reading_progress;
pub mod region;
pub mod reveal;
pub mod scene;
pub mod section_tracker;
pub mod tilt;

use core::time::Duration;

pub use config::{SiteConfig, SiteConfigError};
pub use host::{DocumentHost, ElementLayout, HostCommand, HostDocument, ScrollBehavior};
pub use nav::{NavConfig, NavItem, NavRail};
pub use reading_progress::{ProgressConfig, ReadingProgress};
pub use region::{Region, RegionBounds, RegionId};
pub use reveal::{HoverLift, RevealConfig, RevealGroup, RevealStyle};
pub use scene::{BreathingPlane, ParallaxCamera, SceneConfig};
pub use section_tracker::{SectionTracker, TrackerConfig, TrackerStats};
pub use tilt::{PointerOffset, TiltConfig, TiltInteractor, TiltRotation};

/// Error type for host-facing entry points.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WebError {
    /// Generic unsupported operation.
    Unsupported(&'static str),
    /// A card index outside the project list.
    UnknownCard(usize),
}

impl core::fmt::Display for WebError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Unsupported(msg) => write!(f, "unsupported: {msg}"),
            Self::UnknownCard(index) => write!(f, "no project card at index {index}"),
        }
    }
}

impl std::error::Error for WebError {}

/// Deterministic monotonic clock controlled by the host.
#[derive(Debug, Default, Clone)]
pub struct DeterministicClock {
    now: Duration,
}

impl DeterministicClock {
    /// Create a clock starting at `0`.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            now: Duration::ZERO,
        }
    }

    /// Set current monotonic time. Going backwards is clamped to now.
    pub fn set(&mut self, now: Duration) {
        self.now = self.now.max(now);
    }

    /// Advance monotonic time by `dt`.
    pub fn advance(&mut self, dt: Duration) {
        self.now = self.now.saturating_add(dt);
    }

    #[must_use]
    pub const fn now(&self) -> Duration {
        self.now
    }

    /// Move to `now` and return how far the clock moved.
    pub fn tick_to(&mut self, now: Duration) -> Duration {
        let before = self.now;
        self.set(now);
        self.now - before
    }
}
