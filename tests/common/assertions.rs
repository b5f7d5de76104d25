//! Assertion helpers for tests.

use std::path::Path;

use pretty_assertions::assert_eq;
use stud_quant::{PixelBuffer, Rgb};
use studmosaic::rendering::read_png;

/// Assert file starts with the PNG signature and decodes
pub fn assert_png(path: &Path) -> PixelBuffer {
    let bytes = std::fs::read(path).expect("Failed to read PNG");
    assert!(
        bytes.starts_with(&[0x89, b'P', b'N', b'G']),
        "Expected PNG image, got {} bytes starting with {:?}",
        bytes.len(),
        &bytes[..8.min(bytes.len())]
    );
    read_png(path).expect("PNG should decode")
}

/// Assert every pixel is one of `colors`
pub fn assert_only_colors(image: &PixelBuffer, colors: &[Rgb]) {
    for (i, pixel) in image.pixels().enumerate() {
        assert!(
            colors.contains(&pixel),
            "Pixel {} is {}, expected one of {:?}",
            i,
            pixel,
            colors
        );
    }
}

/// Assert pixel colors in row-major order
pub fn assert_pixels(image: &PixelBuffer, expected: &[Rgb]) {
    assert_eq!(image.pixels().collect::<Vec<_>>(), expected.to_vec());
}
