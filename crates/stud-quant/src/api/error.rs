//! Unified error type for the stud-quant public API.
//!
//! [`MosaicError`] wraps the error types of the individual modules into a
//! single enum for convenient `?` propagation in application code.

use thiserror::Error;

use crate::buffer::BufferError;
use crate::depth::DepthError;
use crate::palette::{PaletteError, ParseColorError};

/// A configuration name that does not match any known option.
///
/// # Example
///
/// ```
/// use stud_quant::ColorMetric;
///
/// let err = "cie94".parse::<ColorMetric>().unwrap_err();
/// assert_eq!(err.to_string(), "unknown color metric \"cie94\"");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown {kind} {value:?}")]
pub struct UnknownOptionError {
    /// What was being parsed, e.g. `"dither mode"`
    pub kind: &'static str,
    /// The rejected input
    pub value: String,
}

impl UnknownOptionError {
    /// Create an error for `value` rejected as a `kind`.
    pub fn new(kind: &'static str, value: &str) -> Self {
        Self {
            kind,
            value: value.to_string(),
        }
    }
}

/// Unified error type for the stud-quant public API.
///
/// # Example
///
/// ```
/// use stud_quant::{MosaicError, Palette};
///
/// fn load() -> Result<Palette, MosaicError> {
///     let palette = Palette::from_hex([("#000000", None), ("#ffffff", Some(10))])?;
///     Ok(palette)
/// }
/// assert_eq!(load().unwrap().len(), 2);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MosaicError {
    /// Malformed pixel buffer or override array
    #[error("pixel buffer error: {0}")]
    Buffer(#[from] BufferError),
    /// Palette validation error (empty, duplicate, nothing available)
    #[error("palette error: {0}")]
    Palette(#[from] PaletteError),
    /// Color parsing error (invalid hex string)
    #[error("color parse error: {0}")]
    ParseColor(#[from] ParseColorError),
    /// Depth packing error
    #[error("depth error: {0}")]
    Depth(#[from] DepthError),
    /// Unknown option name
    #[error(transparent)]
    UnknownOption(#[from] UnknownOptionError),
}
