//! Per-pixel color adjustments
//!
//! All adjustments work on 8-bit sRGB channels and leave alpha untouched.

use crate::color::Rgb;

#[inline]
fn clamp_round(v: f64) -> u8 {
    v.clamp(0.0, 255.0).round() as u8
}

/// Add `offset` to every channel.
pub fn adjust_brightness(color: Rgb, offset: f64) -> Rgb {
    let f = |c: u8| clamp_round(c as f64 + offset);
    Rgb::new(f(color.r), f(color.g), f(color.b))
}

/// Largest contrast offset, in either direction.
pub const MAX_CONTRAST: f64 = 255.0;

/// Contrast scale factor for an offset in `-255..=255`.
///
/// An offset of 0 gives a factor of 1. Offsets outside the range are
/// clamped, so the factor is always finite and non-negative.
#[inline]
pub fn contrast_factor(offset: f64) -> f64 {
    let offset = offset.clamp(-MAX_CONTRAST, MAX_CONTRAST);
    (259.0 * (255.0 + offset)) / (255.0 * (259.0 - offset))
}

/// Stretch channels around 128 by [`contrast_factor`]`(offset)`.
pub fn adjust_contrast(color: Rgb, offset: f64) -> Rgb {
    let factor = contrast_factor(offset);
    let f = |c: u8| clamp_round(factor * (c as f64 - 128.0) + 128.0);
    Rgb::new(f(color.r), f(color.g), f(color.b))
}

/// Channels in `[0, 1]` to `(h, s, v)` with `h` in degrees `[0, 360)`.
pub(crate) fn rgb_to_hsv(r: f64, g: f64, b: f64) -> (f64, f64, f64) {
    let v = r.max(g).max(b);
    let n = v - r.min(g).min(b);
    let h = if n == 0.0 {
        0.0
    } else if v == r {
        (g - b) / n
    } else if v == g {
        2.0 + (b - r) / n
    } else {
        4.0 + (r - g) / n
    };
    let h = 60.0 * if h < 0.0 { h + 6.0 } else { h };
    let s = if v == 0.0 { 0.0 } else { n / v };
    (h, s, v)
}

/// Inverse of [`rgb_to_hsv`].
pub(crate) fn hsv_to_rgb(h: f64, s: f64, v: f64) -> [f64; 3] {
    let f = |n: f64| {
        let k = (n + h / 60.0).rem_euclid(6.0);
        v - v * s * k.min(4.0 - k).min(1.0).max(0.0)
    };
    [f(5.0), f(3.0), f(1.0)]
}

/// Shift hue by `hue` degrees and offset saturation and value.
///
/// The hue offset is rounded to whole degrees and wraps around; saturation
/// and value offsets are in `[-1, 1]` and the results are clamped to
/// `[0, 1]`.
///
/// # Example
///
/// ```
/// use stud_quant::{adjust_hsv, Rgb};
///
/// // Red turned by 120° is green.
/// assert_eq!(adjust_hsv(Rgb::new(255, 0, 0), 120.0, 0.0, 0.0), Rgb::new(0, 255, 0));
/// ```
pub fn adjust_hsv(color: Rgb, hue: f64, saturation: f64, value: f64) -> Rgb {
    let (h, s, v) = rgb_to_hsv(
        color.r as f64 / 255.0,
        color.g as f64 / 255.0,
        color.b as f64 / 255.0,
    );
    let h = (h + hue.round()).rem_euclid(360.0);
    let s = (s + saturation).clamp(0.0, 1.0);
    let v = (v + value).clamp(0.0, 1.0);
    let [r, g, b] = hsv_to_rgb(h, s, v);
    Rgb::new(
        clamp_round(r * 255.0),
        clamp_round(g * 255.0),
        clamp_round(b * 255.0),
    )
}
