//! Quantized mosaic result.

use std::collections::BTreeMap;

use crate::buffer::{BufferError, PixelBuffer};
use crate::color::Rgb;
use crate::metric::ColorDistance;
use crate::palette::{ColorCounts, Palette};
use crate::quantize::{average_quantization_error, usage_map};

/// A finished mosaic: one palette color per stud plus the usage tally.
///
/// # Example
///
/// ```
/// use stud_quant::{Mosaic, Palette, PixelBuffer, Rgb};
///
/// let red = Rgb::new(255, 0, 0);
/// let mosaic = Mosaic::new(PixelBuffer::filled(red, 2, 1).unwrap());
/// let palette = Palette::new([(red, 1)]).unwrap();
///
/// assert_eq!(mosaic.usage()[&red], 2);
/// assert_eq!(mosaic.missing(&palette)[&red], 1);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mosaic {
    pixels: PixelBuffer,
    usage: ColorCounts,
}

impl Mosaic {
    /// Wrap a quantized buffer, tallying its colors.
    pub fn new(pixels: PixelBuffer) -> Self {
        let usage = usage_map(&pixels);
        Self { pixels, usage }
    }

    /// Width in studs.
    #[inline]
    pub fn width(&self) -> usize {
        self.pixels.width()
    }

    /// Height in studs.
    #[inline]
    pub fn height(&self) -> usize {
        self.pixels.height()
    }

    /// The quantized pixels.
    #[inline]
    pub fn pixels(&self) -> &PixelBuffer {
        &self.pixels
    }

    /// Consume the mosaic, returning its pixels.
    pub fn into_pixels(self) -> PixelBuffer {
        self.pixels
    }

    /// Number of studs of each color.
    #[inline]
    pub fn usage(&self) -> &ColorCounts {
        &self.usage
    }

    /// Studs needed beyond what `palette` supplies, per color.
    ///
    /// Only colors that are short appear in the map.
    pub fn missing(&self, palette: &Palette) -> BTreeMap<Rgb, u32> {
        palette
            .difference(&self.usage)
            .into_iter()
            .filter(|&(_, spare)| spare < 0)
            .map(|(color, spare)| (color, u32::try_from(-spare).unwrap_or(u32::MAX)))
            .collect()
    }

    /// Mean distance between `original` and the mosaic.
    ///
    /// # Errors
    ///
    /// [`BufferError::SizeMismatch`] if `original` has a different number
    /// of pixels.
    pub fn average_error<M>(&self, original: &PixelBuffer, metric: &M) -> Result<f64, BufferError>
    where
        M: ColorDistance + ?Sized,
    {
        average_quantization_error(original, &self.pixels, metric)
    }
}
