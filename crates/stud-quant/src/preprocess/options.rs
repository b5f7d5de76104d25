//! Preprocessing options and configuration.

use serde::{Deserialize, Serialize};

use super::pooling::PoolingMode;

/// Configuration for [`Preprocessor`](super::Preprocessor).
///
/// # Defaults
///
/// Every adjustment is neutral and no resize happens, so the default
/// options pass an image through unchanged.
///
/// # Example
///
/// ```
/// use stud_quant::{PoolingMode, PreprocessOptions};
///
/// let options = PreprocessOptions::new()
///     .resize(48, 48)
///     .pooling(PoolingMode::DualMinMax)
///     .brightness(10.0)
///     .hue(-15.0);
/// assert_eq!(options.target, Some((48, 48)));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PreprocessOptions {
    /// Target `(width, height)` in studs (None = keep the input size).
    ///
    /// Default: `None`
    pub target: Option<(usize, usize)>,

    /// Pooling used when resizing.
    ///
    /// Default: [`PoolingMode::Avg`]
    pub pooling: PoolingMode,

    /// Hue offset in degrees.
    ///
    /// Default: `0.0`
    pub hue: f64,

    /// Saturation offset in `[-1, 1]`.
    ///
    /// Default: `0.0`
    pub saturation: f64,

    /// Value offset in `[-1, 1]`.
    ///
    /// Default: `0.0`
    pub value: f64,

    /// Added to every channel.
    ///
    /// Default: `0.0`
    pub brightness: f64,

    /// Contrast offset, roughly `-255..=255`.
    ///
    /// Default: `0.0`
    pub contrast: f64,
}

impl Default for PreprocessOptions {
    fn default() -> Self {
        Self {
            target: None,
            pooling: PoolingMode::Avg,
            hue: 0.0,
            saturation: 0.0,
            value: 0.0,
            brightness: 0.0,
            contrast: 0.0,
        }
    }
}

impl PreprocessOptions {
    /// Create new preprocessing options with default values.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the target resolution.
    #[inline]
    pub fn resize(mut self, width: usize, height: usize) -> Self {
        self.target = Some((width, height));
        self
    }

    /// Set the pooling mode used when resizing.
    #[inline]
    pub fn pooling(mut self, mode: PoolingMode) -> Self {
        self.pooling = mode;
        self
    }

    /// Set the hue offset in degrees.
    #[inline]
    pub fn hue(mut self, degrees: f64) -> Self {
        self.hue = degrees;
        self
    }

    /// Set the saturation offset.
    #[inline]
    pub fn saturation(mut self, offset: f64) -> Self {
        self.saturation = offset;
        self
    }

    /// Set the value offset.
    #[inline]
    pub fn value(mut self, offset: f64) -> Self {
        self.value = offset;
        self
    }

    /// Set the brightness offset.
    #[inline]
    pub fn brightness(mut self, offset: f64) -> Self {
        self.brightness = offset;
        self
    }

    /// Set the contrast offset.
    #[inline]
    pub fn contrast(mut self, offset: f64) -> Self {
        self.contrast = offset;
        self
    }

    /// Whether any HSV offset is non-zero.
    pub(crate) fn adjusts_hsv(&self) -> bool {
        self.hue != 0.0 || self.saturation != 0.0 || self.value != 0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_values() {
        let opts = PreprocessOptions::default();
        assert_eq!(opts.target, None);
        assert_eq!(opts.pooling, PoolingMode::Avg);
        assert!(!opts.adjusts_hsv());
        assert_eq!(opts.brightness, 0.0);
        assert_eq!(opts.contrast, 0.0);
    }

    #[test]
    fn test_builder_chaining() {
        let opts = PreprocessOptions::new()
            .resize(32, 16)
            .saturation(0.2)
            .value(-0.1)
            .contrast(40.0);
        assert_eq!(opts.target, Some((32, 16)));
        assert!(opts.adjusts_hsv());
        assert_eq!(opts.contrast, 40.0);
    }
}
