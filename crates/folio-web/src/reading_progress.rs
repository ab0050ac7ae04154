#![forbid(unsafe_code)]

//! Reading progress bar.
//!
//! Scroll progress through the document, smoothed by a light, heavily
//! damped spring and exposed as the horizontal scale of a full-width bar.

use std::time::Duration;

use folio_core::animation::spring::presets;
use folio_core::animation::{Animation, Spring, SpringConfig};
use folio_core::event::ScrollEvent;

#[cfg(feature = "site-config")]
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "site-config", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "site-config", serde(default))]
pub struct ProgressConfig {
    pub spring: SpringConfig,
}

impl Default for ProgressConfig {
    fn default() -> Self {
        Self {
            spring: presets::progress(),
        }
    }
}

/// Fraction of the scrollable range already scrolled, in `[0, 1]`.
///
/// A document that does not scroll reports `0`.
#[must_use]
pub fn scroll_progress(scroll: ScrollEvent) -> f64 {
    let range = scroll.scroll_height - scroll.viewport_height;
    if !(range > 0.0) {
        return 0.0;
    }
    (scroll.offset_y / range).clamp(0.0, 1.0)
}

#[derive(Debug, Clone)]
pub struct ReadingProgress {
    raw: f64,
    spring: Spring,
}

impl ReadingProgress {
    #[must_use]
    pub fn new(config: ProgressConfig) -> Self {
        Self {
            raw: 0.0,
            spring: Spring::at(0.0, config.spring),
        }
    }

    pub fn on_scroll(&mut self, scroll: ScrollEvent) {
        self.raw = scroll_progress(scroll);
        self.spring.set_target(self.raw);
    }

    pub fn tick(&mut self, dt: Duration) {
        self.spring.tick(dt);
    }

    /// Unsmoothed progress from the latest scroll.
    #[must_use]
    pub fn progress(&self) -> f64 {
        self.raw
    }

    /// Smoothed bar scale in `[0, 1]`.
    #[must_use]
    pub fn scale_x(&self) -> f64 {
        f64::from(self.spring.value())
    }

    #[must_use]
    pub fn is_settled(&self) -> bool {
        self.spring.is_complete()
    }
}

impl Default for ReadingProgress {
    fn default() -> Self {
        Self::new(ProgressConfig::default())
    }
}
