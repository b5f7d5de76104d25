//! Error types for color parsing and palette validation

use thiserror::Error;

/// Error type for parsing hex color strings.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseColorError {
    /// Hex string has the wrong number of digits (must be 3 or 6 after
    /// stripping `#`)
    #[error("invalid hex color length {len} (expected 3 or 6 digits)")]
    InvalidLength {
        /// Number of digits found
        len: usize,
    },
    /// Non-hexadecimal character encountered
    #[error("invalid hex digit {0:?}")]
    InvalidDigit(char),
}

/// Error type for palette validation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PaletteError {
    /// No colors provided
    #[error("palette cannot be empty")]
    EmptyPalette,
    /// The same color was listed twice
    #[error("duplicate color found at index {index}")]
    DuplicateColor {
        /// Index of the second occurrence
        index: usize,
    },
    /// Every color is exhausted, so there is nothing to quantize against
    #[error("palette has no colors with remaining supply")]
    NoAvailableColors,
    /// Invalid hex color string
    #[error("invalid color: {0}")]
    ParseColor(#[from] ParseColorError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_messages() {
        assert_eq!(
            ParseColorError::InvalidLength { len: 4 }.to_string(),
            "invalid hex color length 4 (expected 3 or 6 digits)"
        );
        assert_eq!(
            PaletteError::DuplicateColor { index: 3 }.to_string(),
            "duplicate color found at index 3"
        );
        let wrapped: PaletteError = ParseColorError::InvalidDigit('x').into();
        assert_eq!(wrapped.to_string(), "invalid color: invalid hex digit 'x'");
    }
}
