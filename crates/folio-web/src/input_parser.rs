#![forbid(unsafe_code)]

//! JSON-encoded host input → [`HostEvent`].
//!
//! The browser glue serializes each DOM notification as a small JSON object
//! with a `kind` discriminator:
//!
//! | kind            | fields                                            |
//! |-----------------|---------------------------------------------------|
//! | `ready`         | `state` (`loading` / `interactive` / `complete`)  |
//! | `layout_ready`  |                                                   |
//! | `scroll`        | `y`, `scroll_height`, `viewport_height`           |
//! | `pointer`       | `phase` (`enter` / `move` / `leave`), `target`, `x`, `y` |
//! | `scene_pointer` | `x`, `y` (normalized device coordinates)          |
//! | `resize`        | `width`, `height`                                 |
//! | `frame`         | `t_ms`                                            |
//!
//! Unknown kinds parse to `Ok(None)` so newer hosts can talk to older
//! modules. Feature-gated behind `input-parser`.

use std::time::Duration;

use folio_core::event::{HostEvent, PointerEvent, PointerPhase, ReadyState, ScrollEvent};
use folio_core::geometry::Point;
use serde::Deserialize;

/// Errors from parsing encoded input JSON.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputParseError {
    /// Malformed JSON.
    Json(String),
    /// Missing required field.
    MissingField(&'static str),
    /// Unknown pointer phase value.
    UnknownPhase(String),
    /// Unknown document ready state.
    UnknownReadyState(String),
}

impl core::fmt::Display for InputParseError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Json(msg) => write!(f, "JSON parse error: {msg}"),
            Self::MissingField(field) => write!(f, "missing required field: {field}"),
            Self::UnknownPhase(phase) => write!(f, "unknown phase: {phase}"),
            Self::UnknownReadyState(state) => write!(f, "unknown ready state: {state}"),
        }
    }
}

impl std::error::Error for InputParseError {}

#[derive(Debug, Deserialize)]
struct RawInput {
    kind: String,
    #[serde(default)]
    state: Option<String>,
    #[serde(default)]
    phase: Option<String>,
    #[serde(default)]
    target: Option<usize>,
    #[serde(default)]
    x: Option<f64>,
    #[serde(default)]
    y: Option<f64>,
    #[serde(default)]
    scroll_height: Option<f64>,
    #[serde(default)]
    viewport_height: Option<f64>,
    #[serde(default)]
    width: Option<f64>,
    #[serde(default)]
    height: Option<f64>,
    #[serde(default)]
    t_ms: Option<f64>,
}

/// Parse one JSON-encoded host notification.
///
/// Returns `Ok(None)` for kinds this module does not handle and `Err` for
/// malformed JSON or missing required fields.
pub fn parse_encoded_input(json: &str) -> Result<Option<HostEvent>, InputParseError> {
    let raw: RawInput =
        serde_json::from_str(json).map_err(|e| InputParseError::Json(e.to_string()))?;

    match raw.kind.as_str() {
        "ready" => parse_ready(&raw).map(Some),
        "layout_ready" => Ok(Some(HostEvent::LayoutReady)),
        "scroll" => parse_scroll(&raw).map(Some),
        "pointer" => parse_pointer(&raw).map(Some),
        "scene_pointer" => Ok(Some(HostEvent::ScenePointer(Point::new(
            require(raw.x, "x")?.clamp(-1.0, 1.0),
            require(raw.y, "y")?.clamp(-1.0, 1.0),
        )))),
        "resize" => Ok(Some(HostEvent::Resize {
            width: require(raw.width, "width")?,
            height: require(raw.height, "height")?,
        })),
        "frame" => parse_frame(&raw).map(Some),
        _ => Ok(None),
    }
}

fn require(value: Option<f64>, field: &'static str) -> Result<f64, InputParseError> {
    value
        .filter(|v| v.is_finite())
        .ok_or(InputParseError::MissingField(field))
}

fn parse_ready(raw: &RawInput) -> Result<HostEvent, InputParseError> {
    let state = raw
        .state
        .as_deref()
        .ok_or(InputParseError::MissingField("state"))?;
    ReadyState::from_dom(state)
        .map(HostEvent::ReadyState)
        .ok_or_else(|| InputParseError::UnknownReadyState(state.to_string()))
}

fn parse_scroll(raw: &RawInput) -> Result<HostEvent, InputParseError> {
    Ok(HostEvent::Scroll(ScrollEvent {
        offset_y: require(raw.y, "y")?,
        scroll_height: raw.scroll_height.unwrap_or(0.0),
        viewport_height: raw.viewport_height.unwrap_or(0.0),
    }))
}

fn parse_pointer(raw: &RawInput) -> Result<HostEvent, InputParseError> {
    let phase = match raw.phase.as_deref().unwrap_or("move") {
        "enter" => PointerPhase::Enter,
        "move" => PointerPhase::Move,
        "leave" => PointerPhase::Leave,
        other => return Err(InputParseError::UnknownPhase(other.to_string())),
    };
    let target = raw.target.ok_or(InputParseError::MissingField("target"))?;
    let position = match phase {
        PointerPhase::Move => Point::new(require(raw.x, "x")?, require(raw.y, "y")?),
        _ => Point::new(raw.x.unwrap_or(0.0), raw.y.unwrap_or(0.0)),
    };
    Ok(HostEvent::Pointer(PointerEvent::new(target, phase, position)))
}

fn parse_frame(raw: &RawInput) -> Result<HostEvent, InputParseError> {
    let t_ms = require(raw.t_ms, "t_ms")?.max(0.0);
    Ok(HostEvent::Frame {
        now: Duration::from_micros((t_ms * 1000.0).round() as u64),
    })
}
