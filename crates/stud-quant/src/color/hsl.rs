//! HSL color space

use super::Rgb;

/// A color in HSL.
///
/// Hue is in degrees (`0.0..360.0`); saturation and lightness are in
/// `0.0..=1.0`. Greys have no defined hue and report `0.0`; black and
/// white additionally report a saturation of `0.0`.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Hsl {
    /// Hue angle in degrees
    pub h: f64,
    /// Saturation
    pub s: f64,
    /// Lightness
    pub l: f64,
}

impl Hsl {
    /// Components as `[h, s, l]`.
    #[inline]
    pub fn to_array(self) -> [f64; 3] {
        [self.h, self.s, self.l]
    }
}

impl From<Rgb> for Hsl {
    fn from(color: Rgb) -> Self {
        let r = color.r as f64 / 255.0;
        let g = color.g as f64 / 255.0;
        let b = color.b as f64 / 255.0;
        let max = r.max(g).max(b);
        let min = r.min(g).min(b);
        let l = (max + min) / 2.0;
        let spread = max - min;

        if spread == 0.0 {
            return Hsl { h: 0.0, s: 0.0, l };
        }

        let h = if r == max {
            (g - b) / spread + if g < b { 6.0 } else { 0.0 }
        } else if g == max {
            (b - r) / spread + 2.0
        } else {
            (r - g) / spread + 4.0
        };
        let s = if l < 0.5 {
            spread / (max + min)
        } else {
            spread / (2.0 - max - min)
        };

        Hsl { h: h * 60.0, s, l }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_primaries() {
        let red = Hsl::from(Rgb::new(255, 0, 0));
        assert!(close(red.h, 0.0) && close(red.s, 1.0) && close(red.l, 0.5));

        let green = Hsl::from(Rgb::new(0, 255, 0));
        assert!(close(green.h, 120.0));

        let blue = Hsl::from(Rgb::new(0, 0, 255));
        assert!(close(blue.h, 240.0));
    }

    #[test]
    fn test_magenta_wraps_below_360() {
        let hsl = Hsl::from(Rgb::new(255, 0, 128));
        assert!(hsl.h > 300.0 && hsl.h < 360.0, "hue {}", hsl.h);
    }

    #[test]
    fn test_light_color_saturation() {
        // l >= 0.5 uses the 2 - max - min denominator
        let hsl = Hsl::from(Rgb::new(255, 128, 128));
        assert!(hsl.l > 0.5);
        assert!(close(hsl.s, 1.0));
    }

    #[test]
    fn test_greys_have_no_nan() {
        for v in [0u8, 64, 255] {
            let hsl = Hsl::from(Rgb::new(v, v, v));
            assert_eq!(hsl.h, 0.0);
            assert_eq!(hsl.s, 0.0);
            assert!(close(hsl.l, v as f64 / 255.0));
        }
    }
}
