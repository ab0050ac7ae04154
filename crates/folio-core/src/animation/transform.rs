#![forbid(unsafe_code)]

//! Linear range mapping for animated values.
//!
//! A [`LinearMap`] turns the output of a spring into a presentation value,
//! e.g. a normalized pointer offset in `[-0.5, 0.5]` into a rotation in
//! degrees. Output is clamped to the output range, so a spring that
//! overshoots its input range never produces an out-of-range rotation.
//! Reversed output ranges (`[10, -10]`) are supported and invert the axis.

/// A clamped linear mapping from `input` range to `output` range.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearMap {
    input: (f64, f64),
    output: (f64, f64),
}

impl LinearMap {
    /// Map `input.0 → output.0` and `input.1 → output.1`.
    #[must_use]
    pub const fn new(input: (f64, f64), output: (f64, f64)) -> Self {
        Self { input, output }
    }

    #[must_use]
    pub const fn input(&self) -> (f64, f64) {
        self.input
    }

    #[must_use]
    pub const fn output(&self) -> (f64, f64) {
        self.output
    }

    /// Map `value`, clamping to the output range.
    ///
    /// A degenerate input range (both ends equal) maps everything to the
    /// output start.
    #[must_use]
    pub fn apply(&self, value: f64) -> f64 {
        let (in_lo, in_hi) = self.input;
        let (out_lo, out_hi) = self.output;
        let span = in_hi - in_lo;
        if span == 0.0 || !value.is_finite() {
            return out_lo;
        }
        let t = ((value - in_lo) / span).clamp(0.0, 1.0);
        out_lo + (out_hi - out_lo) * t
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_endpoints_and_midpoint() {
        let map = LinearMap::new((-0.5, 0.5), (-10.0, 10.0));
        assert_eq!(map.apply(-0.5), -10.0);
        assert_eq!(map.apply(0.5), 10.0);
        assert_eq!(map.apply(0.0), 0.0);
    }

    #[test]
    fn reversed_output_inverts_axis() {
        let map = LinearMap::new((-0.5, 0.5), (10.0, -10.0));
        assert_eq!(map.apply(-0.5), 10.0);
        assert_eq!(map.apply(0.25), -5.0);
    }

    #[test]
    fn out_of_range_input_is_clamped() {
        let map = LinearMap::new((-0.5, 0.5), (-10.0, 10.0));
        assert_eq!(map.apply(3.0), 10.0);
        assert_eq!(map.apply(-3.0), -10.0);
    }

    #[test]
    fn degenerate_input_range_maps_to_start() {
        let map = LinearMap::new((1.0, 1.0), (4.0, 8.0));
        assert_eq!(map.apply(1.0), 4.0);
    }

    #[test]
    fn nan_maps_to_start() {
        let map = LinearMap::new((0.0, 1.0), (2.0, 3.0));
        assert_eq!(map.apply(f64::NAN), 2.0);
    }
}
