//! Dithering options and configuration.

/// Options for the dynamic supply-aware ditherer.
///
/// # Defaults
///
/// - Infinite supply: disabled (counts are enforced)
/// - Skip dithering: disabled (error is diffused)
///
/// With both flags set, dynamic dithering reduces to plain nearest-color
/// quantization.
///
/// # Example
///
/// ```
/// use stud_quant::DitherOptions;
///
/// let options = DitherOptions::new().assume_infinite_supply(true);
/// assert!(options.assume_infinite_supply);
/// assert!(!options.skip_dithering);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DitherOptions {
    /// Ignore palette counts: colors are never depleted.
    ///
    /// Default: `false`
    pub assume_infinite_supply: bool,

    /// Do not diffuse quantization error to neighbors.
    ///
    /// Default: `false`
    pub skip_dithering: bool,
}

impl DitherOptions {
    /// Create new dither options with default values.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set infinite-supply mode.
    #[inline]
    pub fn assume_infinite_supply(mut self, enabled: bool) -> Self {
        self.assume_infinite_supply = enabled;
        self
    }

    /// Set whether error diffusion is skipped.
    #[inline]
    pub fn skip_dithering(mut self, enabled: bool) -> Self {
        self.skip_dithering = enabled;
        self
    }
}
