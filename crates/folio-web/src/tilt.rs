#![forbid(unsafe_code)]

//! Pointer-driven 3D tilt for project cards.
//!
//! [`TiltInteractor`] turns the pointer position over one card into a pair
//! of smoothed rotations. The card's bounding box is queried once on
//! pointer-enter and reused for every move until pointer-leave; moves that
//! arrive without a cached box are dropped.
//!
//! The raw pointer offset (in `[-0.5, 0.5]` on each axis, relative to the
//! card center) feeds two independent springs. Their outputs are mapped
//! linearly onto rotations with opposite orientation per axis, so the card
//! leans toward the pointer:
//!
//! | input            | rotate X | rotate Y |
//! |------------------|----------|----------|
//! | offset `-0.5`    | `+max`   | `-max`   |
//! | offset `+0.5`    | `-max`   | `+max`   |
//!
//! Rotate X follows the vertical offset, rotate Y the horizontal one.

use std::time::Duration;

use folio_core::animation::spring::presets;
use folio_core::animation::{Animation, LinearMap, Spring, SpringConfig};
use folio_core::geometry::{ClientRect, Point};
use folio_core::trace;

#[cfg(feature = "site-config")]
use serde::{Deserialize, Serialize};

use crate::host::DocumentHost;

pub const DEFAULT_MAX_ROTATION_DEG: f64 = 10.0;

#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "site-config", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "site-config", serde(default))]
pub struct TiltConfig {
    /// Rotation magnitude at the card edge, in degrees.
    pub max_rotation_deg: f64,
    pub spring: SpringConfig,
}

impl Default for TiltConfig {
    fn default() -> Self {
        Self {
            max_rotation_deg: DEFAULT_MAX_ROTATION_DEG,
            spring: presets::tilt(),
        }
    }
}

/// Pointer position relative to the card center, each axis in `[-0.5, 0.5]`.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PointerOffset {
    pub x: f64,
    pub y: f64,
}

/// Rotation pair in degrees for the card's transform.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct TiltRotation {
    pub rotate_x_deg: f64,
    pub rotate_y_deg: f64,
}

impl TiltRotation {
    /// CSS transform fragment, e.g. `rotateX(4.000deg) rotateY(-2.500deg)`.
    #[must_use]
    pub fn css(&self) -> String {
        format!(
            "rotateX({:.3}deg) rotateY({:.3}deg)",
            self.rotate_x_deg, self.rotate_y_deg
        )
    }
}

/// Tilt state for one card element.
#[derive(Debug, Clone)]
pub struct TiltInteractor {
    element_id: String,
    rect: Option<ClientRect>,
    raw: PointerOffset,
    spring_x: Spring,
    spring_y: Spring,
    rotate_x: LinearMap,
    rotate_y: LinearMap,
}

impl TiltInteractor {
    #[must_use]
    pub fn new(element_id: impl Into<String>, config: TiltConfig) -> Self {
        let max = config.max_rotation_deg.abs();
        Self {
            element_id: element_id.into(),
            rect: None,
            raw: PointerOffset::default(),
            spring_x: Spring::at(0.0, config.spring),
            spring_y: Spring::at(0.0, config.spring),
            rotate_x: LinearMap::new((-0.5, 0.5), (max, -max)),
            rotate_y: LinearMap::new((-0.5, 0.5), (-max, max)),
        }
    }

    #[must_use]
    pub fn element_id(&self) -> &str {
        &self.element_id
    }

    /// Bounding box cached for the current hover session, if any.
    #[must_use]
    pub fn cached_rect(&self) -> Option<ClientRect> {
        self.rect
    }

    #[must_use]
    pub fn is_hovered(&self) -> bool {
        self.rect.is_some()
    }

    /// Raw (unsmoothed) pointer offset currently targeted by the springs.
    #[must_use]
    pub fn raw_offset(&self) -> PointerOffset {
        self.raw
    }

    /// Pointer entered the card: snapshot its bounding box.
    pub fn pointer_enter<H: DocumentHost + ?Sized>(&mut self, host: &H) {
        match host.bounding_rect(&self.element_id) {
            Some(rect) if !rect.is_empty() => self.rect = Some(rect),
            _ => {
                trace!(element = %self.element_id, "tilt target missing or empty; hover ignored");
                self.rect = None;
            }
        }
    }

    /// Pointer moved over the card. Returns `false` if ignored because no
    /// bounding box is cached.
    pub fn pointer_move(&mut self, pointer: Point) -> bool {
        let Some(rect) = self.rect else {
            return false;
        };
        let Some((x, y)) = rect.relative_offset(pointer) else {
            return false;
        };
        self.set_raw(PointerOffset { x, y });
        true
    }

    /// Pointer left the card: animate back to neutral and drop the cache.
    pub fn pointer_leave(&mut self) {
        self.set_raw(PointerOffset::default());
        self.rect = None;
    }

    fn set_raw(&mut self, offset: PointerOffset) {
        self.raw = offset;
        self.spring_x.set_target(offset.x);
        self.spring_y.set_target(offset.y);
    }

    /// Advance both smoothing springs.
    pub fn tick(&mut self, dt: Duration) {
        self.spring_x.tick(dt);
        self.spring_y.tick(dt);
    }

    /// Whether both springs have settled.
    #[must_use]
    pub fn is_settled(&self) -> bool {
        self.spring_x.is_complete() && self.spring_y.is_complete()
    }

    /// Current smoothed rotation.
    #[must_use]
    pub fn rotation(&self) -> TiltRotation {
        TiltRotation {
            rotate_x_deg: self.rotate_x.apply(self.spring_y.position()),
            rotate_y_deg: self.rotate_y.apply(self.spring_x.position()),
        }
    }

    /// Rotation the springs are heading toward.
    #[must_use]
    pub fn target_rotation(&self) -> TiltRotation {
        TiltRotation {
            rotate_x_deg: self.rotate_x.apply(self.raw.y),
            rotate_y_deg: self.rotate_y.apply(self.raw.x),
        }
    }

    #[must_use]
    pub fn css_transform(&self) -> String {
        self.rotation().css()
    }
}
