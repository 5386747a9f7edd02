//! Scalar-to-color mapping for per-vertex export.

/// Maps a scalar value to an RGB triple.
pub trait ColorMap {
    /// Color for `value`.
    fn color(&self, value: f64) -> [u8; 3];
}

/// Ramp stops from low to high: blue, cyan, green, yellow, red.
const STOPS: [[f64; 3]; 5] = [
    [0.0, 0.0, 255.0],
    [0.0, 255.0, 255.0],
    [0.0, 255.0, 0.0],
    [255.0, 255.0, 0.0],
    [255.0, 0.0, 0.0],
];

/// Five-stop heat ramp over `(value - offset) * scale`, clamped to `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColorPalette {
    offset: f64,
    scale: f64,
}

impl ColorPalette {
    /// Palette mapping `value * scale` onto the ramp.
    pub fn new(scale: f64) -> Self {
        Self { offset: 0.0, scale }
    }

    /// Palette stretching `[min, max]` over the full ramp.
    ///
    /// An empty or inverted range maps everything to the low end.
    pub fn with_range(min: f64, max: f64) -> Self {
        let span = max - min;
        let scale = if span > 0.0 && span.is_finite() { 1.0 / span } else { 0.0 };
        Self { offset: min, scale }
    }

    /// Position of `value` on the ramp, in `[0, 1]`.
    pub fn normalize(&self, value: f64) -> f64 {
        let t = (value - self.offset) * self.scale;
        if t.is_nan() {
            0.0
        } else {
            t.clamp(0.0, 1.0)
        }
    }
}

impl ColorMap for ColorPalette {
    fn color(&self, value: f64) -> [u8; 3] {
        let segments = (STOPS.len() - 1) as f64;
        let pos = self.normalize(value) * segments;
        let i = (pos.floor() as usize).min(STOPS.len() - 2);
        let frac = pos - i as f64;

        let (lo, hi) = (STOPS[i], STOPS[i + 1]);
        let mut rgb = [0u8; 3];
        for c in 0..3 {
            rgb[c] = (lo[c] + (hi[c] - lo[c]) * frac).round() as u8;
        }
        rgb
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ramp_stops() {
        let p = ColorPalette::new(1.0);
        assert_eq!(p.color(0.0), [0, 0, 255]);
        assert_eq!(p.color(0.25), [0, 255, 255]);
        assert_eq!(p.color(0.5), [0, 255, 0]);
        assert_eq!(p.color(0.75), [255, 255, 0]);
        assert_eq!(p.color(1.0), [255, 0, 0]);
    }

    #[test]
    fn test_interpolates_between_stops() {
        let p = ColorPalette::new(1.0);
        assert_eq!(p.color(0.125), [0, 128, 255]);
    }

    #[test]
    fn test_clamps_out_of_range() {
        let p = ColorPalette::new(1.0);
        assert_eq!(p.color(-3.0), [0, 0, 255]);
        assert_eq!(p.color(7.0), [255, 0, 0]);
        assert_eq!(p.color(f64::NAN), [0, 0, 255]);
        assert_eq!(p.color(f64::INFINITY), [255, 0, 0]);
    }

    #[test]
    fn test_scale() {
        let p = ColorPalette::new(0.25);
        assert_eq!(p.color(2.0), [0, 255, 0]);
        assert_eq!(p.color(4.0), [255, 0, 0]);
    }

    #[test]
    fn test_with_range() {
        let p = ColorPalette::with_range(10.0, 20.0);
        assert_eq!(p.color(10.0), [0, 0, 255]);
        assert_eq!(p.color(15.0), [0, 255, 0]);
        assert_eq!(p.color(20.0), [255, 0, 0]);

        let flat = ColorPalette::with_range(3.0, 3.0);
        assert_eq!(flat.color(3.0), [0, 0, 255]);
    }
}
