#![forbid(unsafe_code)]

//! Named page regions and their cached vertical bounds.

use std::borrow::Cow;
use std::fmt;

/// Identifier of a page region; doubles as the DOM id of its element.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RegionId(Cow<'static, str>);

impl RegionId {
    #[must_use]
    pub const fn from_static(id: &'static str) -> Self {
        Self(Cow::Borrowed(id))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&'static str> for RegionId {
    fn from(id: &'static str) -> Self {
        Self::from_static(id)
    }
}

impl From<String> for RegionId {
    fn from(id: String) -> Self {
        Self(Cow::Owned(id))
    }
}

impl fmt::Display for RegionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl PartialEq<str> for RegionId {
    fn eq(&self, other: &str) -> bool {
        self.as_str() == other
    }
}

impl PartialEq<&str> for RegionId {
    fn eq(&self, other: &&str) -> bool {
        self.as_str() == *other
    }
}

/// A named, ordered page section with a navigable anchor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Region {
    pub id: RegionId,
    pub label: Cow<'static, str>,
}

impl Region {
    #[must_use]
    pub const fn new(id: &'static str, label: &'static str) -> Self {
        Self {
            id: RegionId::from_static(id),
            label: Cow::Borrowed(label),
        }
    }
}

/// Cached document-relative vertical extent of a region: `[top, bottom)`.
///
/// `top <= bottom` always holds; a region whose element was missing at
/// measurement time is stored as `[0, 0)` and never matches.
#[derive(Debug, Clone, PartialEq)]
pub struct RegionBounds {
    pub id: RegionId,
    pub top: f64,
    pub bottom: f64,
}

impl RegionBounds {
    /// Bounds from an element's offset and height. Negative heights are
    /// clamped so the `top <= bottom` invariant holds.
    #[must_use]
    pub fn new(id: RegionId, top: f64, height: f64) -> Self {
        Self {
            id,
            top,
            bottom: top + height.max(0.0),
        }
    }

    /// Zero-extent placeholder for a region with no backing element.
    #[must_use]
    pub fn empty(id: RegionId) -> Self {
        Self {
            id,
            top: 0.0,
            bottom: 0.0,
        }
    }

    /// Half-open containment: `top <= position < bottom`.
    #[inline]
    #[must_use]
    pub fn contains(&self, position: f64) -> bool {
        self.top <= position && position < self.bottom
    }
}

/// First bounds entry containing `position`, in declared order.
#[must_use]
pub fn locate(bounds: &[RegionBounds], position: f64) -> Option<&RegionBounds> {
    bounds.iter().find(|b| b.contains(position))
}
