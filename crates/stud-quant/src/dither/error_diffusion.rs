//! Static-kernel error diffusion
//!
//! Pixels are visited in row-major order. Each one is snapped to its
//! nearest available palette color and the difference is pushed forward
//! into the neighbors named by the kernel. Supply counts are not consumed.

use tracing::debug;

use super::kernel::Kernel;
use crate::buffer::PixelBuffer;
use crate::color::Rgb;
use crate::metric::ColorDistance;
use crate::palette::{Palette, PaletteError};
use crate::quantize::find_nearest;

/// Dither `buffer` against the available colors of `palette`.
///
/// Neighbors outside the image are skipped. Each channel of a neighbor is
/// rounded and clamped to `0..=255` after receiving its share. The output
/// is fully opaque.
///
/// # Errors
///
/// [`PaletteError::NoAvailableColors`] if no palette color has a count
/// above zero.
pub fn diffuse_error<M>(
    buffer: &PixelBuffer,
    palette: &Palette,
    metric: &M,
    kernel: &Kernel,
) -> Result<PixelBuffer, PaletteError>
where
    M: ColorDistance + ?Sized,
{
    let anchors = palette.anchors();
    if anchors.is_empty() {
        return Err(PaletteError::NoAvailableColors);
    }

    let width = buffer.width();
    let height = buffer.height();
    let mut working: Vec<Rgb> = buffer.pixels().collect();

    debug!(kernel = kernel.name, width, height, "error diffusion");

    for row in 0..height {
        for col in 0..width {
            let i = row * width + col;
            let current = working[i];
            let Some(replacement) = find_nearest(current, &anchors, metric) else {
                continue;
            };
            let diff = current.difference(replacement);
            let error = [diff[0] as f64, diff[1] as f64, diff[2] as f64];

            for (dx, dy, share) in kernel.spread(error) {
                let r = row as i64 + dy as i64;
                let c = col as i64 + dx as i64;
                if r < 0 || c < 0 || r >= height as i64 || c >= width as i64 {
                    continue;
                }
                let j = r as usize * width + c as usize;
                working[j] = working[j].offset(share);
            }
            working[i] = replacement;
        }
    }

    Ok(buffer.with_colors(&working))
}
