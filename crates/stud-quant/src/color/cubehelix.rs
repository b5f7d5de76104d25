//! Cubehelix color space (Green, 2011)

use super::Rgb;

const A: f64 = -0.14861;
const B: f64 = 1.78277;
const C: f64 = -0.29227;
const D: f64 = -0.90649;
const E: f64 = 1.97294;
const ED: f64 = E * D;
const EB: f64 = E * B;
const BC_DA: f64 = B * C - D * A;

/// A color in cubehelix space.
///
/// Hue is in degrees, lightness in `0.0..=1.0`. Saturation is unbounded.
/// Where hue or saturation are undefined (greys, black, white) they are
/// reported as `0.0`.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Cubehelix {
    /// Hue angle in degrees
    pub h: f64,
    /// Saturation
    pub s: f64,
    /// Lightness
    pub l: f64,
}

impl Cubehelix {
    /// Components as `[h, s, l]`.
    #[inline]
    pub fn to_array(self) -> [f64; 3] {
        [self.h, self.s, self.l]
    }
}

impl From<Rgb> for Cubehelix {
    fn from(color: Rgb) -> Self {
        let r = color.r as f64 / 255.0;
        let g = color.g as f64 / 255.0;
        let b = color.b as f64 / 255.0;

        let l = (BC_DA * b + ED * r - EB * g) / (BC_DA + ED - EB);
        let bl = b - l;
        let k = (E * (g - l) - C * bl) / D;
        let s = (k * k + bl * bl).sqrt() / (E * l * (1.0 - l));

        if !s.is_finite() || s == 0.0 {
            return Cubehelix { h: 0.0, s: 0.0, l };
        }

        let mut h = k.atan2(bl).to_degrees() - 120.0;
        if h < 0.0 {
            h += 360.0;
        }
        Cubehelix { h, s, l }
    }
}
