//! Opacity-aware metric wrapper

use super::ColorDistance;
use crate::color::{Rgb, Rgba};

/// Wraps a color metric so that differences in opacity also count.
///
/// The combined distance is `sqrt(d² + (opacity_a - opacity_b)²)`, where
/// `d` is the inner metric's distance between the color parts and opacity
/// is `alpha / 255`.
///
/// # Example
///
/// ```
/// use stud_quant::{ColorMetric, Rgba, WithOpacity};
///
/// let metric = WithOpacity::new(ColorMetric::EuclideanRgb);
/// let opaque = Rgba::new(0, 0, 0, 255);
/// let clear = Rgba::new(0, 0, 0, 0);
/// assert_eq!(metric.distance_rgba(opaque, clear), 1.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WithOpacity<M> {
    inner: M,
}

impl<M: ColorDistance> WithOpacity<M> {
    /// Wrap `inner`.
    pub fn new(inner: M) -> Self {
        Self { inner }
    }

    /// The wrapped metric.
    pub fn inner(&self) -> &M {
        &self.inner
    }

    /// Distance between two colors with opacity.
    pub fn distance_rgba(&self, a: Rgba, b: Rgba) -> f64 {
        let d = self.inner.distance(a.rgb(), b.rgb());
        let dop = a.opacity() - b.opacity();
        (d * d + dop * dop).sqrt()
    }
}

impl<M: ColorDistance> ColorDistance for WithOpacity<M> {
    /// Opaque colors: identical to the inner metric.
    fn distance(&self, a: Rgb, b: Rgb) -> f64 {
        self.distance_rgba(a.into(), b.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metric::ColorMetric;

    #[test]
    fn test_opaque_colors_match_inner_metric() {
        let metric = WithOpacity::new(ColorMetric::EuclideanRgb);
        let a = Rgb::new(0, 0, 0);
        let b = Rgb::new(3, 4, 0);
        assert_eq!(metric.distance(a, b), 5.0);
    }

    #[test]
    fn test_combines_color_and_opacity() {
        let metric = WithOpacity::new(ColorMetric::EuclideanRgb);
        let a = Rgba::new(0, 0, 0, 255);
        let b = Rgba::new(0, 0, 1, 0);
        // sqrt(1^2 + 1^2)
        assert!((metric.distance_rgba(a, b) - 2f64.sqrt()).abs() < 1e-12);
        assert_eq!(metric.distance_rgba(a, b), metric.distance_rgba(b, a));
    }

    #[test]
    fn test_identical_rgba_is_zero() {
        let metric = WithOpacity::new(ColorMetric::Ciede2000);
        let c = Rgba::new(12, 34, 56, 78);
        assert_eq!(metric.distance_rgba(c, c), 0.0);
    }
}
