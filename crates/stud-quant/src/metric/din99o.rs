//! DIN99o uniform color space (DIN 6176)

use serde::{Deserialize, Serialize};

use crate::color::Lab;

// Rotation of the a/b plane, 26 degrees
const THETA: f64 = 26.0 * std::f64::consts::PI / 180.0;

/// Weights of the DIN99o transform, both defaulting to `1.0`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Din99oWeights {
    /// Chroma/hue weight
    pub kch: f64,
    /// Overall weight
    pub ke: f64,
}

impl Default for Din99oWeights {
    fn default() -> Self {
        Self { kch: 1.0, ke: 1.0 }
    }
}

/// Transform a Lab color into DIN99o coordinates.
///
/// The result is returned as a [`Lab`] whose components are `L99o`, `a99o`
/// and `b99o`. Achromatic inputs (`a = b = 0`) map to pure lightness.
pub fn din99o(color: Lab, weights: Din99oWeights) -> Lab {
    let factor = 100.0 / (139.0f64 / 100.0).ln();
    let l = factor / weights.ke * (1.0 + 0.0039 * color.l).ln();
    if color.a == 0.0 && color.b == 0.0 {
        return Lab::new(l, 0.0, 0.0);
    }

    let (sin_t, cos_t) = THETA.sin_cos();
    let e = color.a * cos_t + color.b * sin_t;
    let f = 0.83 * (color.b * cos_t - color.a * sin_t);
    let g = e.hypot(f);
    let c = (1.0 + 0.075 * g).ln() / (0.0435 * weights.kch * weights.ke);
    let h = f.atan2(e) + THETA;

    Lab::new(l, c * h.cos(), c * h.sin())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metric::euclidean;

    fn distance(a: Lab, b: Lab, weights: Din99oWeights) -> f64 {
        euclidean(din99o(a, weights).to_array(), din99o(b, weights).to_array())
    }

    #[test]
    fn test_achromatic_short_circuit() {
        let out = din99o(Lab::new(50.0, 0.0, 0.0), Din99oWeights::default());
        assert!((out.l - 54.09783123613543).abs() < 1e-9);
        assert_eq!(out.a, 0.0);
        assert_eq!(out.b, 0.0);
    }

    #[test]
    fn test_full_lightness_maps_to_100() {
        let out = din99o(Lab::new(100.0, 0.0, 0.0), Din99oWeights::default());
        assert!((out.l - 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_chromatic_transform() {
        let out = din99o(Lab::new(50.0, 10.0, -20.0), Din99oWeights::default());
        assert!((out.l - 54.09783123613543).abs() < 1e-9);
        assert!((out.a - 9.002295007082058).abs() < 1e-9);
        assert!((out.b - -17.914043526220368).abs() < 1e-9);
    }

    #[test]
    fn test_reference_distances() {
        let w = Din99oWeights::default();
        let cases = [
            (Lab::new(50.0, 10.0, -20.0), Lab::new(60.0, -5.0, 15.0), 37.02510278),
            (Lab::new(50.0, 0.0, 0.0), Lab::new(50.0, -1.0, 2.0), 2.99597147),
            (Lab::new(50.0, 2.5, 0.0), Lab::new(73.0, 25.0, -18.0), 31.32176197),
        ];
        for (a, b, expected) in cases {
            let d = distance(a, b, w);
            assert!((d - expected).abs() < 1e-4, "{a:?} vs {b:?}: got {d}");
        }
    }

    #[test]
    fn test_chroma_weight() {
        let w = Din99oWeights { kch: 2.0, ke: 1.0 };
        let d = distance(Lab::new(50.0, 2.5, 0.0), Lab::new(73.0, 25.0, -18.0), w);
        assert!((d - 24.64922435).abs() < 1e-4, "got {d}");
    }
}
