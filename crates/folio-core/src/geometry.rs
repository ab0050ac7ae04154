#![forbid(unsafe_code)]

//! Geometric primitives in CSS pixel space.
//!
//! Coordinates are `f64` viewport pixels with the origin at the top-left,
//! matching what browsers report for bounding boxes and pointer events.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A point in viewport coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[inline]
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Snapshot of an element's on-screen bounding box.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ClientRect {
    /// Left edge (inclusive).
    pub left: f64,
    /// Top edge (inclusive).
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl ClientRect {
    #[inline]
    #[must_use]
    pub const fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    /// Right edge (exclusive).
    #[inline]
    #[must_use]
    pub fn right(&self) -> f64 {
        self.left + self.width
    }

    /// Bottom edge (exclusive).
    #[inline]
    #[must_use]
    pub fn bottom(&self) -> f64 {
        self.top + self.height
    }

    #[inline]
    #[must_use]
    pub fn center(&self) -> Point {
        Point::new(
            self.left + self.width / 2.0,
            self.top + self.height / 2.0,
        )
    }

    /// Zero or negative extent on either axis (or non-finite dimensions).
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        !(self.width > 0.0 && self.height > 0.0)
    }

    #[inline]
    #[must_use]
    pub fn contains(&self, point: Point) -> bool {
        point.x >= self.left
            && point.x < self.right()
            && point.y >= self.top
            && point.y < self.bottom()
    }

    /// Shrink (positive `margin`) or grow (negative) on all four sides.
    #[must_use]
    pub fn inset(&self, margin: f64) -> ClientRect {
        ClientRect {
            left: self.left + margin,
            top: self.top + margin,
            width: (self.width - 2.0 * margin).max(0.0),
            height: (self.height - 2.0 * margin).max(0.0),
        }
    }

    /// Whether the two rectangles share any area.
    #[must_use]
    pub fn intersects(&self, other: &ClientRect) -> bool {
        if self.is_empty() || other.is_empty() {
            return false;
        }
        self.left < other.right()
            && other.left < self.right()
            && self.top < other.bottom()
            && other.top < self.bottom()
    }

    /// Position of `point` relative to the rect center, as a fraction of
    /// the rect size: `(-0.5, -0.5)` at the top-left corner, `(0, 0)` at the
    /// center. Returns `None` for empty rects.
    #[must_use]
    pub fn relative_offset(&self, point: Point) -> Option<(f64, f64)> {
        if self.is_empty() {
            return None;
        }
        let x = (point.x - self.left) / self.width - 0.5;
        let y = (point.y - self.top) / self.height - 0.5;
        Some((x, y))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn edges_and_center() {
        let rect = ClientRect::new(10.0, 20.0, 100.0, 50.0);
        assert_eq!(rect.right(), 110.0);
        assert_eq!(rect.bottom(), 70.0);
        assert_eq!(rect.center(), Point::new(60.0, 45.0));
    }

    #[test]
    fn relative_offset_center_is_zero() {
        let rect = ClientRect::new(10.0, 20.0, 100.0, 50.0);
        assert_eq!(rect.relative_offset(rect.center()), Some((0.0, 0.0)));
    }

    #[test]
    fn relative_offset_top_left_is_negative_half() {
        let rect = ClientRect::new(10.0, 20.0, 100.0, 50.0);
        assert_eq!(
            rect.relative_offset(Point::new(10.0, 20.0)),
            Some((-0.5, -0.5))
        );
    }

    #[test]
    fn relative_offset_of_empty_rect_is_none() {
        let rect = ClientRect::new(0.0, 0.0, 0.0, 40.0);
        assert_eq!(rect.relative_offset(Point::new(0.0, 0.0)), None);
    }

    #[test]
    fn contains_is_half_open() {
        let rect = ClientRect::new(0.0, 0.0, 10.0, 10.0);
        assert!(rect.contains(Point::new(0.0, 0.0)));
        assert!(!rect.contains(Point::new(10.0, 5.0)));
    }

    #[test]
    fn negative_inset_grows() {
        let rect = ClientRect::new(0.0, 0.0, 10.0, 10.0).inset(-5.0);
        assert_eq!(rect, ClientRect::new(-5.0, -5.0, 20.0, 20.0));
    }

    #[test]
    fn intersects_excludes_touching_edges() {
        let a = ClientRect::new(0.0, 0.0, 10.0, 10.0);
        let b = ClientRect::new(10.0, 0.0, 10.0, 10.0);
        assert!(!a.intersects(&b));
        let c = ClientRect::new(9.0, 9.0, 10.0, 10.0);
        assert!(a.intersects(&c));
    }
}
