#![forbid(unsafe_code)]

//! Canonical host events.
//!
//! The host (browser glue or a test harness) translates its native input
//! into these values and pushes them into the site runtime. All positions
//! are CSS pixels.

use std::time::Duration;

use crate::geometry::Point;

/// Document loading state, as reported by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReadyState {
    /// Layout is not yet stable; element geometry must not be trusted.
    #[default]
    Loading,
    Interactive,
    Complete,
}

impl ReadyState {
    /// Whether element layout can be measured.
    #[inline]
    #[must_use]
    pub const fn is_layout_ready(self) -> bool {
        !matches!(self, Self::Loading)
    }

    /// Parse the DOM `document.readyState` string.
    #[must_use]
    pub fn from_dom(state: &str) -> Option<Self> {
        match state {
            "loading" => Some(Self::Loading),
            "interactive" => Some(Self::Interactive),
            "complete" => Some(Self::Complete),
            _ => None,
        }
    }
}

/// A window scroll notification.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ScrollEvent {
    /// Vertical scroll offset of the viewport.
    pub offset_y: f64,
    /// Total scrollable height of the document.
    pub scroll_height: f64,
    /// Height of the visible viewport.
    pub viewport_height: f64,
}

/// Pointer lifecycle phase over a single interactive element.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerPhase {
    Enter,
    Move,
    Leave,
}

/// A pointer event targeting one interactive element.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerEvent {
    /// Host-assigned index of the element under the pointer.
    pub target: usize,
    pub phase: PointerPhase,
    pub position: Point,
}

impl PointerEvent {
    #[must_use]
    pub const fn new(target: usize, phase: PointerPhase, position: Point) -> Self {
        Self {
            target,
            phase,
            position,
        }
    }
}

/// Everything a host can push into the site runtime.
#[derive(Debug, Clone, PartialEq)]
pub enum HostEvent {
    /// The document's ready state changed.
    ReadyState(ReadyState),
    /// `DOMContentLoaded` fired.
    LayoutReady,
    Scroll(ScrollEvent),
    Pointer(PointerEvent),
    /// Pointer position in normalized device coordinates (`[-1, 1]`, y up),
    /// used by the background scene.
    ScenePointer(Point),
    /// The viewport was resized; cached layout should be refreshed.
    Resize { width: f64, height: f64 },
    /// An animation frame fired at monotonic time `now`.
    Frame { now: Duration },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ready_state_from_dom_strings() {
        assert_eq!(ReadyState::from_dom("loading"), Some(ReadyState::Loading));
        assert_eq!(
            ReadyState::from_dom("complete"),
            Some(ReadyState::Complete)
        );
        assert_eq!(ReadyState::from_dom("bogus"), None);
    }

    #[test]
    fn only_loading_blocks_layout() {
        assert!(!ReadyState::Loading.is_layout_ready());
        assert!(ReadyState::Interactive.is_layout_ready());
        assert!(ReadyState::Complete.is_layout_ready());
    }
}
