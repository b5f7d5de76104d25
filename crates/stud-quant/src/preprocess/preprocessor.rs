//! Preprocessing pipeline
//!
//! 1. **Resize** by adaptive pooling (if a target is set)
//! 2. **HSV** hue/saturation/value offsets
//! 3. **Brightness** offset
//! 4. **Contrast** stretch around 128
//!
//! Resizing first means adjustments run once per stud rather than once per
//! source pixel. Neutral adjustments are skipped.

use crate::buffer::{BufferError, PixelBuffer};

use super::adjust::{adjust_brightness, adjust_contrast, adjust_hsv};
use super::options::PreprocessOptions;
use super::pooling::resize_with_pooling;

/// Applies [`PreprocessOptions`] to images.
///
/// # Example
///
/// ```
/// use stud_quant::{PixelBuffer, PreprocessOptions, Preprocessor, Rgb};
///
/// let input = PixelBuffer::filled(Rgb::new(100, 100, 100), 4, 4).unwrap();
/// let preprocessor = Preprocessor::new(PreprocessOptions::new().resize(2, 2).brightness(20.0));
/// let out = preprocessor.process(&input).unwrap();
///
/// assert_eq!(out.width(), 2);
/// assert_eq!(out.rgb(0), Rgb::new(120, 120, 120));
/// ```
#[derive(Debug, Clone, Default)]
pub struct Preprocessor {
    options: PreprocessOptions,
}

impl Preprocessor {
    /// Create a preprocessor.
    pub fn new(options: PreprocessOptions) -> Self {
        Self { options }
    }

    /// The options in use.
    pub fn options(&self) -> &PreprocessOptions {
        &self.options
    }

    /// Run the pipeline on `input`.
    ///
    /// # Errors
    ///
    /// [`BufferError::ZeroWidth`] if the target width is zero.
    pub fn process(&self, input: &PixelBuffer) -> Result<PixelBuffer, BufferError> {
        let opts = &self.options;
        let mut out = match opts.target {
            Some((width, height)) => resize_with_pooling(input, width, height, opts.pooling)?,
            None => input.clone(),
        };
        if opts.adjusts_hsv() {
            out = out.map_rgb(|c| adjust_hsv(c, opts.hue, opts.saturation, opts.value));
        }
        if opts.brightness != 0.0 {
            out = out.map_rgb(|c| adjust_brightness(c, opts.brightness));
        }
        if opts.contrast != 0.0 {
            out = out.map_rgb(|c| adjust_contrast(c, opts.contrast));
        }
        Ok(out)
    }
}
