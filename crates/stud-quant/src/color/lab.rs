//! CIE L\*a\*b\* and its cylindrical form
//!
//! The conversion goes sRGB -> linear light -> XYZ adapted to D50 with the
//! Bradford matrix -> L\*a\*b\*. Greys take a shortcut so that equal RGB
//! channels produce exactly `a = b = 0`.

use super::lut::srgb8_to_linear;
use super::Rgb;

// Reference white (D50) normalization
const XN: f64 = 0.96422;
const ZN: f64 = 0.82521;

const T0: f64 = 4.0 / 29.0;
const T1: f64 = 6.0 / 29.0;
const T2: f64 = 3.0 * T1 * T1;
const T3: f64 = T1 * T1 * T1;

#[inline]
fn xyz_to_lab(t: f64) -> f64 {
    if t > T3 {
        t.cbrt()
    } else {
        t / T2 + T0
    }
}

/// A color in CIE L\*a\*b\* (D50).
///
/// `l` is in `0.0..=100.0`; `a` and `b` are unbounded but stay roughly
/// within `-128.0..=128.0` for sRGB inputs.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Lab {
    /// Lightness
    pub l: f64,
    /// Green-red axis
    pub a: f64,
    /// Blue-yellow axis
    pub b: f64,
}

impl Lab {
    /// Create a Lab color from its components.
    #[inline]
    pub const fn new(l: f64, a: f64, b: f64) -> Self {
        Self { l, a, b }
    }

    /// Chroma, the distance from the neutral axis.
    #[inline]
    pub fn chroma(&self) -> f64 {
        self.a.hypot(self.b)
    }

    /// Components as `[l, a, b]`.
    #[inline]
    pub fn to_array(self) -> [f64; 3] {
        [self.l, self.a, self.b]
    }
}

impl From<Rgb> for Lab {
    fn from(color: Rgb) -> Self {
        let r = srgb8_to_linear(color.r);
        let g = srgb8_to_linear(color.g);
        let b = srgb8_to_linear(color.b);

        let y = xyz_to_lab(0.2225045 * r + 0.7168786 * g + 0.0606169 * b);
        let (x, z) = if color.r == color.g && color.g == color.b {
            (y, y)
        } else {
            (
                xyz_to_lab((0.4360747 * r + 0.3850649 * g + 0.1430804 * b) / XN),
                xyz_to_lab((0.0139322 * r + 0.0971045 * g + 0.7141733 * b) / ZN),
            )
        };

        Lab::new(116.0 * y - 16.0, 500.0 * (x - y), 200.0 * (y - z))
    }
}

/// Cylindrical Lab: hue angle, chroma and lightness.
///
/// Hue is in degrees, `0.0..360.0`. Achromatic colors have no defined hue
/// and report `0.0`.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Hcl {
    /// Hue angle in degrees
    pub h: f64,
    /// Chroma
    pub c: f64,
    /// Lightness
    pub l: f64,
}

impl Hcl {
    /// Components as `[h, c, l]`.
    #[inline]
    pub fn to_array(self) -> [f64; 3] {
        [self.h, self.c, self.l]
    }
}

impl From<Lab> for Hcl {
    fn from(lab: Lab) -> Self {
        if lab.a == 0.0 && lab.b == 0.0 {
            return Hcl {
                h: 0.0,
                c: 0.0,
                l: lab.l,
            };
        }
        let mut h = lab.b.atan2(lab.a).to_degrees();
        if h < 0.0 {
            h += 360.0;
        }
        Hcl {
            h,
            c: lab.chroma(),
            l: lab.l,
        }
    }
}

impl From<Rgb> for Hcl {
    fn from(color: Rgb) -> Self {
        Hcl::from(Lab::from(color))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_lab(actual: Lab, expected: (f64, f64, f64)) {
        assert!(
            (actual.l - expected.0).abs() < 1e-6
                && (actual.a - expected.1).abs() < 1e-6
                && (actual.b - expected.2).abs() < 1e-6,
            "got {actual:?}, expected {expected:?}"
        );
    }

    #[test]
    fn test_primaries() {
        assert_lab(
            Lab::from(Rgb::new(255, 0, 0)),
            (54.29173376861782, 80.8124553179771, 69.88504032350531),
        );
        assert_lab(
            Lab::from(Rgb::new(0, 255, 0)),
            (87.81812823940444, -79.28728092989567, 80.99025618375525),
        );
    }

    #[test]
    fn test_white_and_black() {
        assert_lab(Lab::from(Rgb::new(255, 255, 255)), (100.0, 0.0, 0.0));
        assert_lab(Lab::from(Rgb::BLACK), (0.0, 0.0, 0.0));
    }

    #[test]
    fn test_greys_are_exactly_neutral() {
        for v in [1u8, 17, 128, 200, 254] {
            let lab = Lab::from(Rgb::new(v, v, v));
            assert_eq!(lab.a, 0.0);
            assert_eq!(lab.b, 0.0);
        }
        assert_lab(Lab::from(Rgb::new(128, 128, 128)), (53.585013452169036, 0.0, 0.0));
    }

    #[test]
    fn test_hcl_of_grey_has_zero_hue() {
        let hcl = Hcl::from(Rgb::new(90, 90, 90));
        assert_eq!(hcl.h, 0.0);
        assert_eq!(hcl.c, 0.0);
        assert!(!hcl.h.is_nan());
    }

    #[test]
    fn test_hcl_hue_is_normalized() {
        // Blue has a negative b*, so the raw angle is negative
        let hcl = Hcl::from(Rgb::new(0, 0, 255));
        assert!((0.0..360.0).contains(&hcl.h), "hue {}", hcl.h);
        assert!(hcl.h > 270.0);

        let red = Hcl::from(Rgb::new(255, 0, 0));
        let lab = Lab::from(Rgb::new(255, 0, 0));
        assert!((red.c - lab.chroma()).abs() < 1e-12);
        assert!((red.l - lab.l).abs() < 1e-12);
        assert!((red.h - 40.85).abs() < 0.01);
    }
}
