//! MosaicBuilder -- the primary entry point for the crate.
//!
//! [`MosaicBuilder`] wraps quantization, supply correction and dithering
//! behind one fluent configuration.

use rand::Rng;
use tracing::debug;

use super::error::MosaicError;
use crate::buffer::PixelBuffer;
use crate::correction::{correct_for_supply, CorrectionOptions, TieResolution};
use crate::dither::{diffuse_error, dynamic_dither, DitherMode, DitherOptions};
use crate::metric::Metric;
use crate::output::Mosaic;
use crate::palette::{revert_darkened_with_supply, Palette};
use crate::quantize::align_to_palette;

/// High-level mosaic builder.
///
/// # Design
///
/// - Configuration methods consume and return `self`
/// - [`run()`](Self::run) takes `&self`, so one builder can render any
///   number of images
/// - The caller's [`Palette`] is never modified
///
/// # Pipeline
///
/// - [`DitherMode::None`]: nearest-color quantization, then supply
///   correction (skipped with infinite supply)
/// - kernel modes: static error diffusion, supply counts ignored
/// - [`DitherMode::Dynamic`]: greedy supply-aware dithering
///
/// # Example
///
/// ```
/// use stud_quant::{ColorMetric, DitherMode, MosaicBuilder, Palette, PixelBuffer, Rgb};
///
/// let palette = Palette::from_hex([("#ff0000", Some(2)), ("#00ff00", Some(2))]).unwrap();
/// let image = PixelBuffer::filled(Rgb::new(200, 40, 40), 2, 2).unwrap();
///
/// let mosaic = MosaicBuilder::new()
///     .metric(ColorMetric::EuclideanRgb)
///     .dither_mode(DitherMode::None)
///     .run(&image, &palette)
///     .unwrap();
///
/// // Only two red studs exist; the other two pixels fall back to green.
/// assert_eq!(mosaic.usage()[&Rgb::new(255, 0, 0)], 2);
/// assert_eq!(mosaic.usage()[&Rgb::new(0, 255, 0)], 2);
/// ```
#[derive(Debug, Clone, Default)]
pub struct MosaicBuilder {
    metric: Metric,
    mode: DitherMode,
    correction: CorrectionOptions,
    dither: DitherOptions,
    bleed_through: bool,
    overrides: Option<Vec<Option<u8>>>,
}

impl MosaicBuilder {
    /// Create a builder with default settings: CIEDE2000, no dithering,
    /// counts enforced.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the color distance metric.
    #[inline]
    pub fn metric(mut self, metric: impl Into<Metric>) -> Self {
        self.metric = metric.into();
        self
    }

    /// Set the dithering mode.
    #[inline]
    pub fn dither_mode(mut self, mode: DitherMode) -> Self {
        self.mode = mode;
        self
    }

    /// Set the tie-resolution policy of the supply correction pass.
    #[inline]
    pub fn tie_resolution(mut self, policy: TieResolution) -> Self {
        self.correction = self.correction.tie_resolution(policy);
        self
    }

    /// Set the block size of the tie-break pattern.
    #[inline]
    pub fn grouping_factor(mut self, factor: usize) -> Self {
        self.correction = self.correction.grouping_factor(factor);
        self
    }

    /// Ignore supply counts.
    #[inline]
    pub fn assume_infinite_supply(mut self, enabled: bool) -> Self {
        self.dither = self.dither.assume_infinite_supply(enabled);
        self
    }

    /// Disable error diffusion in dynamic mode.
    #[inline]
    pub fn skip_dithering(mut self, enabled: bool) -> Self {
        self.dither = self.dither.skip_dithering(enabled);
        self
    }

    /// Quantize against the palette as seen over a dark backing panel.
    ///
    /// Output pixels are mapped back to the nominal palette colors.
    #[inline]
    pub fn bleed_through(mut self, enabled: bool) -> Self {
        self.bleed_through = enabled;
        self
    }

    /// Per-byte overrides applied to the input before quantization.
    ///
    /// Must have one entry per byte of the input buffer.
    #[inline]
    pub fn overrides(mut self, overrides: Vec<Option<u8>>) -> Self {
        self.overrides = Some(overrides);
        self
    }

    /// Build a mosaic using the thread-local random generator for
    /// stochastic tie-breaking.
    ///
    /// # Errors
    ///
    /// See [`run_with_rng`](Self::run_with_rng).
    pub fn run(&self, image: &PixelBuffer, palette: &Palette) -> Result<Mosaic, MosaicError> {
        self.run_with_rng(image, palette, &mut rand::thread_rng())
    }

    /// Build a mosaic with an explicit random source.
    ///
    /// # Errors
    ///
    /// Fails if no palette color is available or the overrides do not match
    /// the image size.
    pub fn run_with_rng<R>(
        &self,
        image: &PixelBuffer,
        palette: &Palette,
        rng: &mut R,
    ) -> Result<Mosaic, MosaicError>
    where
        R: Rng + ?Sized,
    {
        debug!(
            mode = %self.mode,
            metric = %self.metric.kind(),
            width = image.width(),
            height = image.height(),
            bleed_through = self.bleed_through,
            "building mosaic"
        );

        let source = match &self.overrides {
            Some(overrides) => image.with_overrides(overrides)?,
            None => image.clone(),
        };
        let supply = if self.bleed_through {
            palette.darkened()
        } else {
            palette.clone()
        };

        let pixels = if let Some(kernel) = self.mode.kernel() {
            diffuse_error(&source, &supply, &self.metric, kernel)?
        } else if self.mode == DitherMode::Dynamic {
            dynamic_dither(&source, &supply, &self.metric, &self.dither)?
        } else {
            let aligned = align_to_palette(&source, &supply, &self.metric)?;
            if self.dither.assume_infinite_supply {
                aligned
            } else {
                correct_for_supply(
                    &aligned,
                    image,
                    self.overrides.as_deref(),
                    &supply,
                    &self.metric,
                    &self.correction,
                    rng,
                )?
            }
        };

        let pixels = if self.bleed_through {
            revert_darkened_with_supply(&pixels, palette)
        } else {
            pixels
        };
        Ok(Mosaic::new(pixels))
    }
}
