#![forbid(unsafe_code)]

//! Damped harmonic oscillator (spring) animation.
//!
//! Drives every smoothed value on the site: card tilt, the reading progress
//! bar, entrance reveals and the nav indicator. Based on the classical
//! damped spring equation with mass:
//!
//!   m·a = -stiffness × (position - target) - damping × velocity
//!
//! # Parameters
//!
//! - **stiffness** (k): pull toward the target.
//! - **damping** (c): drag on velocity. At `c = 2√(k·m)` the spring is
//!   critically damped and reaches the target without overshoot; below it
//!   the value swings past first (the nav indicator's slight bounce).
//! - **mass** (m): inertia; the progress bar uses 0.5.
//! - **rest_delta** / **rest_speed**: position and velocity deltas below
//!   which the spring snaps to its target and stops integrating.
//!
//! # Integration
//!
//! Semi-implicit Euler, subdivided into steps of at most 4ms so that a
//! stalled frame (tab in background, long GC pause) cannot blow up a stiff
//! spring.
//!
//! # Invariants
//!
//! 1. `value()` returns the position clamped to [0.0, 1.0];
//!    `position()` is unclamped.
//! 2. A spring at rest stays put until `set_target()`, `impulse()` or
//!    `reset()` is called.
//! 3. Stiffness and mass are always positive; damping is non-negative.

use std::time::Duration;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::Animation;

/// Maximum dt per integration step (4ms).
const MAX_STEP_SECS: f64 = 0.004;

const DEFAULT_REST_DELTA: f64 = 0.01;
const DEFAULT_REST_SPEED: f64 = 0.01;

const MIN_STIFFNESS: f64 = 0.1;
const MIN_MASS: f64 = 0.001;

/// Plain-data spring parameters, loadable from configuration.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SpringConfig {
    pub stiffness: f64,
    pub damping: f64,
    pub mass: f64,
    pub rest_delta: f64,
    pub rest_speed: f64,
}

impl Default for SpringConfig {
    fn default() -> Self {
        Self {
            stiffness: 100.0,
            damping: 10.0,
            mass: 1.0,
            rest_delta: DEFAULT_REST_DELTA,
            rest_speed: DEFAULT_REST_SPEED,
        }
    }
}

impl SpringConfig {
    /// Critically damped parameters for the given stiffness and unit mass.
    #[must_use]
    pub fn critical(stiffness: f64) -> Self {
        let k = stiffness.max(MIN_STIFFNESS);
        Self {
            stiffness: k,
            damping: 2.0 * k.sqrt(),
            ..Self::default()
        }
    }

    /// Damping ratio ζ = c / (2√(k·m)). 1.0 is critical.
    #[must_use]
    pub fn damping_ratio(&self) -> f64 {
        let k = self.stiffness.max(MIN_STIFFNESS);
        let m = self.mass.max(MIN_MASS);
        self.damping / (2.0 * (k * m).sqrt())
    }

    /// Human-readable problems with this config, prefixed by `section`.
    #[must_use]
    pub fn validate(&self, section: &str) -> Vec<String> {
        let mut errors = Vec::new();
        if !(self.stiffness > 0.0) {
            errors.push(format!(
                "{section}.stiffness must be > 0, got {}",
                self.stiffness
            ));
        }
        if !(self.damping >= 0.0) {
            errors.push(format!(
                "{section}.damping must be >= 0, got {}",
                self.damping
            ));
        }
        if !(self.mass > 0.0) {
            errors.push(format!("{section}.mass must be > 0, got {}", self.mass));
        }
        if !(self.rest_delta > 0.0) {
            errors.push(format!(
                "{section}.rest_delta must be > 0, got {}",
                self.rest_delta
            ));
        }
        errors
    }
}

/// One smoothed scalar.
///
/// ```
/// use std::time::Duration;
/// use folio_core::animation::spring::presets;
/// use folio_core::animation::{Animation, Spring};
///
/// // Nav indicator growing from inactive to active height.
/// let mut height = Spring::at(8.0, presets::indicator());
/// height.set_target(24.0);
/// while !height.is_complete() {
///     height.tick(Duration::from_millis(16));
/// }
/// assert_eq!(height.position(), 24.0);
/// ```
#[derive(Debug, Clone)]
pub struct Spring {
    position: f64,
    velocity: f64,
    target: f64,
    initial: f64,
    stiffness: f64,
    damping: f64,
    mass: f64,
    rest_delta: f64,
    rest_speed: f64,
    at_rest: bool,
}

impl Spring {
    /// Create a spring starting at `initial` and targeting `target` with
    /// [`SpringConfig::default`] parameters.
    #[must_use]
    pub fn new(initial: f64, target: f64) -> Self {
        Self::from_config(initial, target, SpringConfig::default())
    }

    /// Create a spring resting at `value`.
    #[must_use]
    pub fn at(value: f64, config: SpringConfig) -> Self {
        let mut spring = Self::from_config(value, value, config);
        spring.at_rest = true;
        spring
    }

    /// Create a spring from plain parameters.
    #[must_use]
    pub fn from_config(initial: f64, target: f64, config: SpringConfig) -> Self {
        Self {
            position: initial,
            velocity: 0.0,
            target,
            initial,
            stiffness: config.stiffness.max(MIN_STIFFNESS),
            damping: config.damping.max(0.0),
            mass: config.mass.max(MIN_MASS),
            rest_delta: config.rest_delta.abs(),
            rest_speed: config.rest_speed.abs(),
            at_rest: false,
        }
    }

    /// Clamped to at least 0.1.
    #[must_use]
    pub fn with_stiffness(mut self, k: f64) -> Self {
        self.stiffness = k.max(MIN_STIFFNESS);
        self
    }

    #[must_use]
    pub fn with_damping(mut self, c: f64) -> Self {
        self.damping = c.max(0.0);
        self
    }

    #[must_use]
    pub fn with_mass(mut self, m: f64) -> Self {
        self.mass = m.max(MIN_MASS);
        self
    }

    #[must_use]
    pub fn with_rest_delta(mut self, delta: f64) -> Self {
        self.rest_delta = delta.abs();
        self
    }

    #[inline]
    #[must_use]
    pub fn position(&self) -> f64 {
        self.position
    }

    #[inline]
    #[must_use]
    pub fn velocity(&self) -> f64 {
        self.velocity
    }

    #[inline]
    #[must_use]
    pub fn target(&self) -> f64 {
        self.target
    }

    /// Current parameters as plain data.
    #[must_use]
    pub fn config(&self) -> SpringConfig {
        SpringConfig {
            stiffness: self.stiffness,
            damping: self.damping,
            mass: self.mass,
            rest_delta: self.rest_delta,
            rest_speed: self.rest_speed,
        }
    }

    /// Change the target. Wakes the spring unless it is already resting
    /// on the new target.
    pub fn set_target(&mut self, target: f64) {
        self.target = target;
        if (self.position - target).abs() > self.rest_delta || self.velocity != 0.0 {
            self.at_rest = false;
        } else {
            self.position = target;
        }
    }

    /// Teleport to `value`, dropping velocity. Target is left unchanged.
    pub fn jump(&mut self, value: f64) {
        self.position = value;
        self.velocity = 0.0;
        self.at_rest = (value - self.target).abs() <= self.rest_delta;
    }

    /// Kick the velocity by `velocity_delta`.
    pub fn impulse(&mut self, velocity_delta: f64) {
        self.velocity += velocity_delta;
        self.at_rest = false;
    }

    #[inline]
    #[must_use]
    pub fn is_at_rest(&self) -> bool {
        self.at_rest
    }

    /// Damping coefficient at which this spring stops overshooting.
    #[must_use]
    pub fn critical_damping(&self) -> f64 {
        2.0 * (self.stiffness * self.mass).sqrt()
    }

    fn step(&mut self, dt: f64) {
        let pull = self.stiffness * (self.target - self.position);
        let drag = self.damping * self.velocity;
        self.velocity += (pull - drag) / self.mass * dt;
        self.position += self.velocity * dt;
    }

    /// Advance the spring by `dt`, subdividing for stability.
    pub fn advance(&mut self, dt: Duration) {
        if self.at_rest {
            return;
        }

        let mut left = dt.as_secs_f64();
        while left > 0.0 {
            let h = left.min(MAX_STEP_SECS);
            self.step(h);
            left -= h;
        }

        if (self.position - self.target).abs() < self.rest_delta
            && self.velocity.abs() < self.rest_speed
        {
            self.position = self.target;
            self.velocity = 0.0;
            self.at_rest = true;
        }
    }
}

impl Animation for Spring {
    fn tick(&mut self, dt: Duration) {
        self.advance(dt);
    }

    fn is_complete(&self) -> bool {
        self.at_rest
    }

    fn value(&self) -> f32 {
        (self.position as f32).clamp(0.0, 1.0)
    }

    fn reset(&mut self) {
        self.position = self.initial;
        self.velocity = 0.0;
        self.at_rest = false;
    }
}

/// Spring configurations used across the site.
pub mod presets {
    use super::SpringConfig;

    /// Card tilt: critically damped, settles in roughly half a second.
    /// Rest thresholds are scaled to the ±0.5 input range so the final
    /// snap stays under 0.01 degrees.
    #[must_use]
    pub fn tilt() -> SpringConfig {
        SpringConfig {
            rest_delta: 0.0005,
            rest_speed: 0.001,
            ..SpringConfig::critical(100.0)
        }
    }

    /// Reading progress bar: light and heavily damped.
    #[must_use]
    pub fn progress() -> SpringConfig {
        SpringConfig {
            stiffness: 200.0,
            damping: 50.0,
            mass: 0.5,
            rest_delta: 0.001,
            rest_speed: 0.01,
        }
    }

    /// Entrance reveal for staggered list items.
    #[must_use]
    pub fn reveal() -> SpringConfig {
        SpringConfig {
            stiffness: 100.0,
            damping: 20.0,
            ..SpringConfig::default()
        }
    }

    /// Post card hover lift.
    #[must_use]
    pub fn hover_lift() -> SpringConfig {
        SpringConfig {
            stiffness: 300.0,
            damping: 20.0,
            ..SpringConfig::default()
        }
    }

    /// Nav indicator height. Snappy, near-critical.
    #[must_use]
    pub fn indicator() -> SpringConfig {
        SpringConfig {
            stiffness: 400.0,
            damping: 38.0,
            ..SpringConfig::default()
        }
    }
}
