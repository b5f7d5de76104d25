//! Greedy supply-aware dithering
//!
//! Instead of scanning in raster order, the dynamic ditherer always commits
//! the pending pixel whose best available match is closest, then spreads
//! that pixel's quantization error over its still-pending neighbors with
//! the symmetric [`GAUSSIAN`] weights. Supply is consumed as pixels are
//! committed; when a color runs out, every pending pixel is re-matched
//! against what is left.

use tracing::{debug, trace};

use super::kernel::{GAUSSIAN, GAUSSIAN_RADIUS};
use super::options::DitherOptions;
use super::queue::IndexedMinHeap;
use crate::buffer::PixelBuffer;
use crate::color::Rgb;
use crate::metric::ColorDistance;
use crate::palette::{Palette, PaletteError};
use crate::quantize::nearest_anchor;

#[derive(Debug, Clone, Copy)]
struct Candidate {
    working: Rgb,
    replacement: Rgb,
    distance: f64,
    pending: bool,
}

/// Candidate colors for tentative matches.
///
/// Normally the colors with supply left. Once everything is exhausted the
/// full palette is used so that leftover pixels still get the closest
/// color, even though it is over budget.
fn candidates(supply: &Palette) -> Vec<Rgb> {
    let anchors = supply.anchors();
    if anchors.is_empty() {
        supply.colors().collect()
    } else {
        anchors
    }
}

/// Dither `buffer` while enforcing the counts in `palette`.
///
/// The caller's palette is not modified. The output is fully opaque.
///
/// # Errors
///
/// [`PaletteError::NoAvailableColors`] if no palette color has a count
/// above zero.
pub fn dynamic_dither<M>(
    buffer: &PixelBuffer,
    palette: &Palette,
    metric: &M,
    options: &DitherOptions,
) -> Result<PixelBuffer, PaletteError>
where
    M: ColorDistance + ?Sized,
{
    let mut supply = palette.clone();
    let mut anchors = supply.anchors();
    if anchors.is_empty() {
        return Err(PaletteError::NoAvailableColors);
    }

    let width = buffer.width();
    let height = buffer.height();

    let mut pixels: Vec<Candidate> = buffer
        .pixels()
        .map(|color| {
            let (replacement, distance) =
                nearest_anchor(color, &anchors, metric).unwrap_or((color, 0.0));
            Candidate {
                working: color,
                replacement,
                distance,
                pending: true,
            }
        })
        .collect();

    let mut queue = IndexedMinHeap::from_keys(pixels.iter().map(|p| p.distance).collect());
    let mut rebuilds = 0usize;

    debug!(
        pixels = queue.len(),
        colors = anchors.len(),
        infinite = options.assume_infinite_supply,
        skip_dithering = options.skip_dithering,
        "dynamic dithering"
    );

    while let Some(i) = queue.pop() {
        let committed = pixels[i].replacement;
        let diff = pixels[i].working.difference(committed);
        let error = [diff[0] as f64, diff[1] as f64, diff[2] as f64];

        pixels[i].working = committed;
        pixels[i].pending = false;

        if !options.assume_infinite_supply {
            let before = supply.count(committed);
            let after = supply.decrement(committed);
            if before > 0 && after == 0 {
                trace!(color = %committed, "color exhausted");
                anchors = candidates(&supply);
                rematch_pending(&mut pixels, &mut queue, &anchors, metric);
                rebuilds += 1;
            }
        }

        if options.skip_dithering {
            continue;
        }

        let (row, col) = ((i / width) as i64, (i % width) as i64);
        let neighbors = pending_neighbors(&pixels, row, col, width, height);
        let denominator: f64 = neighbors.iter().map(|&(_, w)| w).sum();
        if denominator <= 0.0 {
            continue;
        }

        for (j, weight) in neighbors {
            let f = weight / denominator;
            let neighbor = &mut pixels[j];
            neighbor.working = neighbor
                .working
                .offset([error[0] * f, error[1] * f, error[2] * f]);
            if let Some((replacement, distance)) =
                nearest_anchor(neighbor.working, &anchors, metric)
            {
                neighbor.replacement = replacement;
                neighbor.distance = distance;
            }
            queue.update(j, neighbor.distance);
        }
    }

    debug!(rebuilds, "dynamic dithering finished");

    let colors: Vec<Rgb> = pixels.iter().map(|p| p.working).collect();
    Ok(buffer.with_colors(&colors))
}

/// Pending in-bounds neighbors of `(row, col)` with their kernel weights.
fn pending_neighbors(
    pixels: &[Candidate],
    row: i64,
    col: i64,
    width: usize,
    height: usize,
) -> Vec<(usize, f64)> {
    let mut out = Vec::with_capacity(24);
    for kr in -GAUSSIAN_RADIUS..=GAUSSIAN_RADIUS {
        for kc in -GAUSSIAN_RADIUS..=GAUSSIAN_RADIUS {
            if kr == 0 && kc == 0 {
                continue;
            }
            let r = row + kr as i64;
            let c = col + kc as i64;
            if r < 0 || c < 0 || r >= height as i64 || c >= width as i64 {
                continue;
            }
            let j = r as usize * width + c as usize;
            if pixels[j].pending {
                let (wr, wc) = ((kr + GAUSSIAN_RADIUS) as usize, (kc + GAUSSIAN_RADIUS) as usize);
                out.push((j, GAUSSIAN[wr][wc]));
            }
        }
    }
    out
}

/// Re-match every pending pixel against `anchors` and rebuild the queue.
fn rematch_pending<M>(
    pixels: &mut [Candidate],
    queue: &mut IndexedMinHeap,
    anchors: &[Rgb],
    metric: &M,
) where
    M: ColorDistance + ?Sized,
{
    let queued: Vec<usize> = queue.items().to_vec();
    for j in queued {
        let pixel = &mut pixels[j];
        if let Some((replacement, distance)) = nearest_anchor(pixel.working, anchors, metric) {
            pixel.replacement = replacement;
            pixel.distance = distance;
        }
        queue.set_key_unordered(j, pixel.distance);
    }
    queue.heapify();
}
