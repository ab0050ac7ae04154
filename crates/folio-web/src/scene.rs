#![forbid(unsafe_code)]

//! Background scene math.
//!
//! Only the numbers the renderer needs: the height field of the slowly
//! breathing plane and the pointer-parallax camera position. Geometry,
//! materials and lighting belong to the host's 3D layer.

use folio_core::geometry::Point;

#[cfg(feature = "site-config")]
use serde::{Deserialize, Serialize};

pub const DEFAULT_PLANE_SIZE: f32 = 12.0;
pub const DEFAULT_PLANE_SEGMENTS: u32 = 64;
/// Upper bound on plane subdivision; 513 x 513 vertices.
pub const MAX_PLANE_SEGMENTS: u32 = 512;

#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "site-config", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "site-config", serde(default))]
pub struct SceneConfig {
    /// Camera offset at the edge of the viewport (pointer NDC of ±1).
    pub parallax_amplitude: f64,
    /// Fraction of the remaining distance the camera covers each frame.
    pub parallax_follow: f64,
    pub plane_size: f32,
    pub plane_segments: u32,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            parallax_amplitude: 0.5,
            parallax_follow: 0.05,
            plane_size: DEFAULT_PLANE_SIZE,
            plane_segments: DEFAULT_PLANE_SEGMENTS,
        }
    }
}

/// Mesh rotation in radians.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlaneRotation {
    pub x: f64,
    pub z: f64,
}

/// Square plane whose vertices ripple over time.
///
/// Vertices are laid out row by row from the top edge, `segments + 1` per
/// row, as `[x, y, z]` triples.
#[derive(Debug, Clone)]
pub struct BreathingPlane {
    segments: u32,
    /// Rest-pose `(x, y)` per vertex.
    grid: Vec<(f32, f32)>,
    positions: Vec<f32>,
}

/// Height of the surface at `(x, y)` and time `t` seconds.
#[must_use]
pub fn height(x: f32, y: f32, t: f32) -> f32 {
    (x * 0.8 + t * 0.4).sin() * 0.3
        + (y * 0.5 + t * 0.3).cos() * 0.3
        + ((x + y) * 0.5 + t * 0.2).sin() * 0.2
}

impl BreathingPlane {
    /// `segments` is clamped to `1..=MAX_PLANE_SEGMENTS`.
    #[must_use]
    pub fn new(size: f32, segments: u32) -> Self {
        let segments = segments.clamp(1, MAX_PLANE_SEGMENTS);
        let half = size / 2.0;
        let step = size / segments as f32;
        let row = segments as usize + 1;
        let mut grid = Vec::with_capacity(row * row);
        for iy in 0..=segments {
            let y = half - iy as f32 * step;
            for ix in 0..=segments {
                grid.push((ix as f32 * step - half, y));
            }
        }
        let positions = grid.iter().flat_map(|&(x, y)| [x, y, 0.0]).collect();
        Self {
            segments,
            grid,
            positions,
        }
    }

    #[must_use]
    pub fn from_config(config: &SceneConfig) -> Self {
        Self::new(config.plane_size, config.plane_segments)
    }

    #[must_use]
    pub fn segments(&self) -> u32 {
        self.segments
    }

    #[must_use]
    pub fn vertex_count(&self) -> usize {
        self.grid.len()
    }

    /// Recompute every z for time `t` and return the position buffer.
    pub fn displace(&mut self, t: f32) -> &[f32] {
        for (chunk, &(x, y)) in self.positions.chunks_exact_mut(3).zip(&self.grid) {
            chunk[2] = height(x, y, t);
        }
        &self.positions
    }

    /// Position buffer as of the last [`displace`](Self::displace).
    #[must_use]
    pub fn positions(&self) -> &[f32] {
        &self.positions
    }

    /// Mesh rotation at time `t`: tilted just short of flat, with a slow
    /// sway on both axes.
    #[must_use]
    pub fn rotation(t: f64) -> PlaneRotation {
        PlaneRotation {
            x: -std::f64::consts::PI / 2.2 + (t * 0.1).cos() * 0.02,
            z: (t * 0.05).sin() * 0.05,
        }
    }
}

impl Default for BreathingPlane {
    fn default() -> Self {
        Self::new(DEFAULT_PLANE_SIZE, DEFAULT_PLANE_SEGMENTS)
    }
}

/// Camera that eases toward the pointer each frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParallaxCamera {
    amplitude: f64,
    follow: f64,
    position: Point,
}

impl ParallaxCamera {
    #[must_use]
    pub fn new(config: &SceneConfig) -> Self {
        Self {
            amplitude: config.parallax_amplitude,
            follow: config.parallax_follow.clamp(0.0, 1.0),
            position: Point::new(0.0, 0.0),
        }
    }

    /// One frame of easing toward `pointer` (normalized device coordinates,
    /// `[-1, 1]` on both axes).
    pub fn follow(&mut self, pointer: Point) -> Point {
        self.position.x += (pointer.x * self.amplitude - self.position.x) * self.follow;
        self.position.y += (pointer.y * self.amplitude - self.position.y) * self.follow;
        self.position
    }

    #[must_use]
    pub fn position(&self) -> Point {
        self.position
    }
}

impl Default for ParallaxCamera {
    fn default() -> Self {
        Self::new(&SceneConfig::default())
    }
}
