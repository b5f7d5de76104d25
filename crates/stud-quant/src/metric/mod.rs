//! Perceptual color distance metrics
//!
//! Every metric is a pure, symmetric function of two colors that is zero for
//! identical inputs. Metrics are selected by name through [`ColorMetric`]
//! (the form used in configuration files and on the command line) and
//! evaluated through [`Metric`], which additionally carries the tunable
//! weights of CIEDE2000 and DIN99o.
//!
//! Anything implementing [`ColorDistance`] can drive the quantizer and the
//! dithering engines, including plain closures:
//!
//! ```
//! use stud_quant::{ColorDistance, Rgb};
//!
//! let manhattan = |a: Rgb, b: Rgb| {
//!     a.difference(b).iter().map(|d| d.abs() as f64).sum::<f64>()
//! };
//! assert_eq!(manhattan.distance(Rgb::new(0, 0, 0), Rgb::new(1, 2, 3)), 6.0);
//! ```

mod ciede2000;
mod din99o;
mod opacity;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

pub use ciede2000::{ciede2000, Ciede2000Weights};
pub use din99o::{din99o, Din99oWeights};
pub use opacity::WithOpacity;

use crate::api::UnknownOptionError;
use crate::color::{Cubehelix, Hcl, Hsl, Lab, Rgb};

/// A distance function between two colors.
pub trait ColorDistance {
    /// Distance between `a` and `b`; non-negative and symmetric.
    fn distance(&self, a: Rgb, b: Rgb) -> f64;
}

impl<F> ColorDistance for F
where
    F: Fn(Rgb, Rgb) -> f64,
{
    #[inline]
    fn distance(&self, a: Rgb, b: Rgb) -> f64 {
        self(a, b)
    }
}

/// Euclidean norm of the component-wise difference of two triples.
#[inline]
pub fn euclidean(a: [f64; 3], b: [f64; 3]) -> f64 {
    let d0 = a[0] - b[0];
    let d1 = a[1] - b[1];
    let d2 = a[2] - b[2];
    (d0 * d0 + d1 * d1 + d2 * d2).sqrt()
}

/// Named color metric selection.
///
/// The serialized names are the ones accepted in configuration files and
/// by [`FromStr`]: `euclidean-rgb`, `euclidean-lab`, `euclidean-hcl`,
/// `euclidean-hsl`, `euclidean-cubehelix`, `ciede2000` and `din99o`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ColorMetric {
    /// Straight-line distance between 8-bit RGB triples
    EuclideanRgb,
    /// Euclidean distance in CIE L\*a\*b\*
    EuclideanLab,
    /// Euclidean distance over (hue, chroma, lightness)
    EuclideanHcl,
    /// Euclidean distance over (hue, saturation, lightness)
    EuclideanHsl,
    /// Euclidean distance over cubehelix (hue, saturation, lightness)
    EuclideanCubehelix,
    /// CIEDE2000 color difference
    #[default]
    Ciede2000,
    /// Euclidean distance in the DIN99o space
    Din99o,
}

impl ColorMetric {
    /// All metrics, in display order.
    pub const ALL: [ColorMetric; 7] = [
        ColorMetric::EuclideanRgb,
        ColorMetric::EuclideanLab,
        ColorMetric::EuclideanHcl,
        ColorMetric::EuclideanHsl,
        ColorMetric::EuclideanCubehelix,
        ColorMetric::Ciede2000,
        ColorMetric::Din99o,
    ];

    /// Configuration name of this metric.
    pub fn name(self) -> &'static str {
        match self {
            ColorMetric::EuclideanRgb => "euclidean-rgb",
            ColorMetric::EuclideanLab => "euclidean-lab",
            ColorMetric::EuclideanHcl => "euclidean-hcl",
            ColorMetric::EuclideanHsl => "euclidean-hsl",
            ColorMetric::EuclideanCubehelix => "euclidean-cubehelix",
            ColorMetric::Ciede2000 => "ciede2000",
            ColorMetric::Din99o => "din99o",
        }
    }
}

impl fmt::Display for ColorMetric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ColorMetric {
    type Err = UnknownOptionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        ColorMetric::ALL
            .into_iter()
            .find(|metric| metric.name() == wanted)
            .ok_or_else(|| UnknownOptionError::new("color metric", s))
    }
}

impl ColorDistance for ColorMetric {
    #[inline]
    fn distance(&self, a: Rgb, b: Rgb) -> f64 {
        Metric::from(*self).distance(a, b)
    }
}

/// A fully parameterized color metric.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Metric {
    /// See [`ColorMetric::EuclideanRgb`]
    EuclideanRgb,
    /// See [`ColorMetric::EuclideanLab`]
    EuclideanLab,
    /// See [`ColorMetric::EuclideanHcl`]
    EuclideanHcl,
    /// See [`ColorMetric::EuclideanHsl`]
    EuclideanHsl,
    /// See [`ColorMetric::EuclideanCubehelix`]
    EuclideanCubehelix,
    /// CIEDE2000 with explicit lightness/chroma/hue weights
    Ciede2000(Ciede2000Weights),
    /// DIN99o with explicit chroma and overall weights
    Din99o(Din99oWeights),
}

impl Metric {
    /// The named metric this instance parameterizes.
    pub fn kind(&self) -> ColorMetric {
        match self {
            Metric::EuclideanRgb => ColorMetric::EuclideanRgb,
            Metric::EuclideanLab => ColorMetric::EuclideanLab,
            Metric::EuclideanHcl => ColorMetric::EuclideanHcl,
            Metric::EuclideanHsl => ColorMetric::EuclideanHsl,
            Metric::EuclideanCubehelix => ColorMetric::EuclideanCubehelix,
            Metric::Ciede2000(_) => ColorMetric::Ciede2000,
            Metric::Din99o(_) => ColorMetric::Din99o,
        }
    }
}

impl Default for Metric {
    fn default() -> Self {
        ColorMetric::default().into()
    }
}

impl From<ColorMetric> for Metric {
    fn from(kind: ColorMetric) -> Self {
        match kind {
            ColorMetric::EuclideanRgb => Metric::EuclideanRgb,
            ColorMetric::EuclideanLab => Metric::EuclideanLab,
            ColorMetric::EuclideanHcl => Metric::EuclideanHcl,
            ColorMetric::EuclideanHsl => Metric::EuclideanHsl,
            ColorMetric::EuclideanCubehelix => Metric::EuclideanCubehelix,
            ColorMetric::Ciede2000 => Metric::Ciede2000(Ciede2000Weights::default()),
            ColorMetric::Din99o => Metric::Din99o(Din99oWeights::default()),
        }
    }
}

impl ColorDistance for Metric {
    fn distance(&self, a: Rgb, b: Rgb) -> f64 {
        match self {
            Metric::EuclideanRgb => euclidean(rgb_array(a), rgb_array(b)),
            Metric::EuclideanLab => euclidean(Lab::from(a).to_array(), Lab::from(b).to_array()),
            Metric::EuclideanHcl => euclidean(Hcl::from(a).to_array(), Hcl::from(b).to_array()),
            Metric::EuclideanHsl => euclidean(Hsl::from(a).to_array(), Hsl::from(b).to_array()),
            Metric::EuclideanCubehelix => euclidean(
                Cubehelix::from(a).to_array(),
                Cubehelix::from(b).to_array(),
            ),
            Metric::Ciede2000(weights) => ciede2000(Lab::from(a), Lab::from(b), *weights),
            Metric::Din99o(weights) => euclidean(
                din99o(Lab::from(a), *weights).to_array(),
                din99o(Lab::from(b), *weights).to_array(),
            ),
        }
    }
}

#[inline]
fn rgb_array(color: Rgb) -> [f64; 3] {
    [color.r as f64, color.g as f64, color.b as f64]
}
