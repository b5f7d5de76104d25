//! Flat RGBA pixel buffers
//!
//! [`PixelBuffer`] is the engine's image representation: a row-major
//! sequence of `[R, G, B, A]` bytes with a known width. Pixel `i` lives at
//! row `i / width`, column `i % width`.

use thiserror::Error;

use crate::color::{Rgb, Rgba};

/// Error type for malformed pixel buffers.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BufferError {
    /// Byte length is not a multiple of 4
    #[error("buffer length {len} is not a multiple of 4")]
    NotRgba {
        /// Byte length supplied
        len: usize,
    },
    /// Width of zero
    #[error("image width must be greater than zero")]
    ZeroWidth,
    /// Pixel count does not divide evenly into rows
    #[error("{pixels} pixels cannot be split into rows of width {width}")]
    WidthMismatch {
        /// Number of pixels in the buffer
        pixels: usize,
        /// Requested width
        width: usize,
    },
    /// Override array does not have one entry per byte
    #[error("override array has {actual} entries, expected {expected}")]
    OverrideLength {
        /// Byte length of the buffer
        expected: usize,
        /// Entries supplied
        actual: usize,
    },
    /// Two buffers that must match in size do not
    #[error("buffer sizes differ: {left} vs {right} pixels")]
    SizeMismatch {
        /// Pixels in the first buffer
        left: usize,
        /// Pixels in the second buffer
        right: usize,
    },
}

/// A validated RGBA image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelBuffer {
    data: Vec<u8>,
    width: usize,
    height: usize,
}

impl PixelBuffer {
    /// Wrap raw RGBA bytes.
    ///
    /// # Errors
    ///
    /// Fails if the byte length is not a multiple of 4, if `width` is
    /// zero, or if the pixel count is not a multiple of `width`.
    pub fn new(data: Vec<u8>, width: usize) -> Result<Self, BufferError> {
        if data.len() % 4 != 0 {
            return Err(BufferError::NotRgba { len: data.len() });
        }
        if width == 0 {
            return Err(BufferError::ZeroWidth);
        }
        let pixels = data.len() / 4;
        if pixels % width != 0 {
            return Err(BufferError::WidthMismatch { pixels, width });
        }
        Ok(Self {
            data,
            width,
            height: pixels / width,
        })
    }

    /// Build an opaque buffer from colors.
    pub fn from_rgb(pixels: &[Rgb], width: usize) -> Result<Self, BufferError> {
        let data = pixels
            .iter()
            .flat_map(|c| [c.r, c.g, c.b, 255])
            .collect();
        Self::new(data, width)
    }

    /// Opaque buffer of `width × height` pixels of `color`.
    pub fn filled(color: Rgb, width: usize, height: usize) -> Result<Self, BufferError> {
        Self::from_rgb(&vec![color; width * height], width)
    }

    /// Image width in pixels.
    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    /// Image height in pixels.
    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    /// Number of pixels.
    #[inline]
    pub fn len(&self) -> usize {
        self.data.len() / 4
    }

    /// Whether the buffer has no pixels.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Raw RGBA bytes.
    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    /// Take the raw RGBA bytes.
    #[inline]
    pub fn into_bytes(self) -> Vec<u8> {
        self.data
    }

    /// Flat index of `(row, col)`.
    #[inline]
    pub fn index(&self, row: usize, col: usize) -> usize {
        row * self.width + col
    }

    /// `(row, col)` of flat index `i`.
    #[inline]
    pub fn position(&self, i: usize) -> (usize, usize) {
        (i / self.width, i % self.width)
    }

    /// Color of pixel `i`, ignoring alpha.
    #[inline]
    pub fn rgb(&self, i: usize) -> Rgb {
        let p = &self.data[i * 4..i * 4 + 3];
        Rgb::new(p[0], p[1], p[2])
    }

    /// Color and alpha of pixel `i`.
    #[inline]
    pub fn rgba(&self, i: usize) -> Rgba {
        let p = &self.data[i * 4..i * 4 + 4];
        Rgba::new(p[0], p[1], p[2], p[3])
    }

    /// Overwrite the color of pixel `i`, keeping its alpha.
    #[inline]
    pub fn set_rgb(&mut self, i: usize, color: Rgb) {
        self.data[i * 4..i * 4 + 3].copy_from_slice(&color.to_bytes());
    }

    /// Iterate over pixel colors in row-major order.
    pub fn pixels(&self) -> impl Iterator<Item = Rgb> + '_ {
        self.data
            .chunks_exact(4)
            .map(|p| Rgb::new(p[0], p[1], p[2]))
    }

    /// Apply `f` to every pixel color, keeping alpha.
    pub fn map_rgb<F>(&self, mut f: F) -> PixelBuffer
    where
        F: FnMut(Rgb) -> Rgb,
    {
        let mut out = self.clone();
        for px in out.data.chunks_exact_mut(4) {
            let mapped = f(Rgb::new(px[0], px[1], px[2]));
            px[..3].copy_from_slice(&mapped.to_bytes());
        }
        out
    }

    /// Opaque buffer of the same dimensions holding `colors`.
    ///
    /// `colors` must have exactly one entry per pixel.
    pub(crate) fn with_colors(&self, colors: &[Rgb]) -> PixelBuffer {
        debug_assert_eq!(colors.len(), self.len());
        PixelBuffer {
            data: colors.iter().flat_map(|c| [c.r, c.g, c.b, 255]).collect(),
            width: self.width,
            height: self.height,
        }
    }

    /// Per-byte overrides: `Some(v)` replaces the byte, `None` keeps it.
    ///
    /// # Errors
    ///
    /// [`BufferError::OverrideLength`] unless there is exactly one entry
    /// per byte.
    pub fn with_overrides(&self, overrides: &[Option<u8>]) -> Result<PixelBuffer, BufferError> {
        if overrides.len() != self.data.len() {
            return Err(BufferError::OverrideLength {
                expected: self.data.len(),
                actual: overrides.len(),
            });
        }
        let data = self
            .data
            .iter()
            .zip(overrides)
            .map(|(&byte, over)| over.unwrap_or(byte))
            .collect();
        Ok(PixelBuffer {
            data,
            width: self.width,
            height: self.height,
        })
    }
}
