#![forbid(unsafe_code)]

//! Site tunables as data.
//!
//! Every constant the interactive components use (lookahead, spring
//! parameters, stagger timing, parallax easing) lives in one [`SiteConfig`]
//! that can be loaded from TOML or JSON with the `site-config` feature.
//!
//! ```toml
//! # folio.toml
//! [tracker]
//! lookahead = 120.0
//!
//! [tilt]
//! max_rotation_deg = 8.0
//!
//! [tilt.spring]
//! stiffness = 150.0
//! damping = 24.5
//! ```
//!
//! ```rust,ignore
//! let config = SiteConfig::from_toml_file("folio.toml")?;
//! ```
//!
//! Missing sections and fields fall back to [`SiteConfig::default`], which
//! reproduces the site's built-in behavior.

#[cfg(feature = "site-config")]
use std::path::Path;

#[cfg(feature = "site-config")]
use serde::{Deserialize, Serialize};

use folio_core::warn;

use crate::nav::NavConfig;
use crate::reading_progress::ProgressConfig;
use crate::reveal::RevealConfig;
use crate::scene::{MAX_PLANE_SEGMENTS, SceneConfig};
use crate::section_tracker::TrackerConfig;
use crate::tilt::TiltConfig;

/// Configuration for every interactive component on the site.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "site-config", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "site-config", serde(default))]
pub struct SiteConfig {
    pub tracker: TrackerConfig,
    pub tilt: TiltConfig,
    pub progress: ProgressConfig,
    pub reveal: RevealConfig,
    pub nav: NavConfig,
    pub scene: SceneConfig,
}

impl SiteConfig {
    /// Load from a TOML string.
    #[cfg(feature = "site-config")]
    pub fn from_toml_str(s: &str) -> Result<Self, SiteConfigError> {
        toml::from_str(s).map_err(SiteConfigError::Toml)
    }

    /// Load from a TOML file on disk.
    #[cfg(feature = "site-config")]
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, SiteConfigError> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(SiteConfigError::Io)?;
        Self::from_toml_str(&content)
    }

    /// Load from a JSON string.
    #[cfg(feature = "site-config")]
    pub fn from_json_str(s: &str) -> Result<Self, SiteConfigError> {
        serde_json::from_str(s).map_err(SiteConfigError::Json)
    }

    /// Load from a JSON file on disk.
    #[cfg(feature = "site-config")]
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, SiteConfigError> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(SiteConfigError::Io)?;
        Self::from_json_str(&content)
    }

    /// Every out-of-range parameter, as `section.field` messages. Empty
    /// means the config is usable.
    #[must_use]
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();

        if !self.tracker.lookahead.is_finite() {
            errors.push(format!(
                "tracker.lookahead must be finite, got {}",
                self.tracker.lookahead
            ));
        }

        if !(self.tilt.max_rotation_deg >= 0.0 && self.tilt.max_rotation_deg <= 90.0) {
            errors.push(format!(
                "tilt.max_rotation_deg must be in [0, 90], got {}",
                self.tilt.max_rotation_deg
            ));
        }
        errors.extend(self.tilt.spring.validate("tilt.spring"));
        errors.extend(self.progress.spring.validate("progress.spring"));

        if !(self.reveal.viewport_margin >= 0.0) {
            errors.push(format!(
                "reveal.viewport_margin must be >= 0, got {}",
                self.reveal.viewport_margin
            ));
        }
        errors.extend(self.reveal.spring.validate("reveal.spring"));

        if !(self.nav.inactive_height >= 0.0) {
            errors.push(format!(
                "nav.inactive_height must be >= 0, got {}",
                self.nav.inactive_height
            ));
        }
        if !(self.nav.active_height >= self.nav.inactive_height) {
            errors.push(format!(
                "nav.active_height must be >= nav.inactive_height, got {} < {}",
                self.nav.active_height, self.nav.inactive_height
            ));
        }
        errors.extend(self.nav.spring.validate("nav.spring"));

        if !(self.scene.parallax_follow > 0.0 && self.scene.parallax_follow <= 1.0) {
            errors.push(format!(
                "scene.parallax_follow must be in (0, 1], got {}",
                self.scene.parallax_follow
            ));
        }
        if !(1..=MAX_PLANE_SEGMENTS).contains(&self.scene.plane_segments) {
            errors.push(format!(
                "scene.plane_segments must be in [1, {MAX_PLANE_SEGMENTS}], got {}",
                self.scene.plane_segments
            ));
        }

        errors
    }

    /// `self` if valid, otherwise every problem found.
    pub fn validated(self) -> Result<Self, SiteConfigError> {
        let errors = self.validate();
        if errors.is_empty() {
            Ok(self)
        } else {
            warn!(count = errors.len(), problems = %errors.join("; "), "site config rejected");
            Err(SiteConfigError::Validation(errors))
        }
    }

    /// One-line summary for structured logs.
    #[must_use]
    pub fn to_jsonl(&self) -> String {
        format!(
            r#"{{"schema":"folio-site-config-v1","lookahead":{},"tilt_max_deg":{},"tilt_stiffness":{},"reveal_stagger_ms":{},"reveal_delay_children_ms":{},"nav_active_height":{},"parallax_follow":{}}}"#,
            self.tracker.lookahead,
            self.tilt.max_rotation_deg,
            self.tilt.spring.stiffness,
            self.reveal.stagger_ms,
            self.reveal.delay_children_ms,
            self.nav.active_height,
            self.scene.parallax_follow,
        )
    }
}

/// Errors that can occur when loading a site configuration.
#[derive(Debug)]
pub enum SiteConfigError {
    /// I/O error reading a file.
    Io(std::io::Error),
    /// TOML parse error.
    #[cfg(feature = "site-config")]
    Toml(toml::de::Error),
    /// JSON parse error.
    #[cfg(feature = "site-config")]
    Json(serde_json::Error),
    /// Validation errors.
    Validation(Vec<String>),
}

impl std::fmt::Display for SiteConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(e) => write!(f, "I/O error: {e}"),
            #[cfg(feature = "site-config")]
            Self::Toml(e) => write!(f, "TOML parse error: {e}"),
            #[cfg(feature = "site-config")]
            Self::Json(e) => write!(f, "JSON parse error: {e}"),
            Self::Validation(errors) => {
                write!(f, "validation errors: {}", errors.join("; "))
            }
        }
    }
}

impl std::error::Error for SiteConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            #[cfg(feature = "site-config")]
            Self::Toml(e) => Some(e),
            #[cfg(feature = "site-config")]
            Self::Json(e) => Some(e),
            Self::Validation(_) => None,
        }
    }
}
