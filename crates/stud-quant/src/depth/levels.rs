//! Discrete depth levels and per-layer packing

use std::collections::BTreeMap;

use tracing::debug;

use super::grid::{OccupancyGrid, PlacementMatrix};
use super::packer::pack_parts;
use super::part::{DepthError, PartSize};
use crate::buffer::PixelBuffer;
use crate::color::Rgb;

/// Map a depth image to discrete levels.
///
/// Each channel becomes `j + 1` for the last threshold `j` it strictly
/// exceeds (0 if none), and the three channel levels are averaged with
/// floor into a grey level. Alpha is 255.
///
/// # Errors
///
/// [`DepthError::NoThresholds`] if `thresholds` is empty.
///
/// # Example
///
/// ```
/// use stud_quant::{discrete_depth_levels, PixelBuffer, Rgb};
///
/// let depth = PixelBuffer::from_rgb(&[Rgb::new(10, 10, 10), Rgb::new(200, 200, 90)], 2).unwrap();
/// let levels = discrete_depth_levels(&depth, &[50, 100, 150]).unwrap();
///
/// assert_eq!(levels.rgb(0), Rgb::new(0, 0, 0));
/// // (3 + 3 + 1) / 3
/// assert_eq!(levels.rgb(1), Rgb::new(2, 2, 2));
/// ```
pub fn discrete_depth_levels(
    buffer: &PixelBuffer,
    thresholds: &[u8],
) -> Result<PixelBuffer, DepthError> {
    if thresholds.is_empty() {
        return Err(DepthError::NoThresholds);
    }
    let level = |value: u8| -> u32 {
        thresholds
            .iter()
            .rposition(|&t| value > t)
            .map_or(0, |j| j as u32 + 1)
    };
    let colors: Vec<Rgb> = buffer
        .pixels()
        .map(|px| {
            let grey = (level(px.r) + level(px.g) + level(px.b)) / 3;
            let grey = grey.min(u8::MAX as u32) as u8;
            Rgb::new(grey, grey, grey)
        })
        .collect();
    Ok(buffer.with_colors(&colors))
}

/// Occupancy grid for building layer `layer`: cells whose level is below
/// `layer` are already covered.
pub fn occupancy_for_level(levels: &PixelBuffer, layer: u8) -> OccupancyGrid {
    OccupancyGrid::from_fn(levels.width(), levels.height(), |row, col| {
        levels.rgb(levels.index(row, col)).r < layer
    })
}

/// Pack every depth layer `1..num_levels` of a discretized depth image.
///
/// # Errors
///
/// Propagates catalog errors from [`pack_parts`].
pub fn pack_depth_layers(
    levels: &PixelBuffer,
    num_levels: u8,
    catalog: &[PartSize],
    boundary: Option<usize>,
) -> Result<Vec<PlacementMatrix>, DepthError> {
    let mut layers = Vec::with_capacity(num_levels.saturating_sub(1) as usize);
    for layer in 1..num_levels {
        let mut grid = occupancy_for_level(levels, layer);
        let placed = pack_parts(&mut grid, catalog, boundary)?;
        debug!(layer, parts = placed.len(), "depth layer packed");
        layers.push(placed);
    }
    Ok(layers)
}

/// Aggregate part counts by label over all layers.
pub fn used_parts(layers: &[PlacementMatrix]) -> BTreeMap<String, u32> {
    let mut counts = BTreeMap::new();
    for (_, _, part) in layers.iter().flat_map(|layer| layer.placements()) {
        *counts.entry(part.label()).or_insert(0) += 1;
    }
    counts
}

/// Stretch discrete levels over the full byte range for previewing.
pub fn scale_levels_for_display(levels: &PixelBuffer, num_levels: u8) -> PixelBuffer {
    let scale = |v: u8| -> u8 {
        if num_levels == 0 {
            return u8::MAX;
        }
        let scaled = 255.0 * (v as f64 + 1.0) / num_levels as f64;
        scaled.min(255.0).round() as u8
    };
    let colors: Vec<Rgb> = levels
        .pixels()
        .map(|px| Rgb::new(scale(px.r), scale(px.g), scale(px.b)))
        .collect();
    levels.with_colors(&colors)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::depth::part::default_catalog;

    fn grey_buffer(values: &[u8], width: usize) -> PixelBuffer {
        let pixels: Vec<Rgb> = values.iter().map(|&v| Rgb::new(v, v, v)).collect();
        PixelBuffer::from_rgb(&pixels, width).unwrap()
    }

    #[test]
    fn test_threshold_is_strict() {
        let levels = discrete_depth_levels(&grey_buffer(&[50, 51, 255], 3), &[50, 100]).unwrap();
        assert_eq!(levels.rgb(0).r, 0);
        assert_eq!(levels.rgb(1).r, 1);
        assert_eq!(levels.rgb(2).r, 2);
        assert_eq!(levels.rgba(2).a, 255);
    }

    #[test]
    fn test_requires_thresholds() {
        assert_eq!(
            discrete_depth_levels(&grey_buffer(&[0], 1), &[]),
            Err(DepthError::NoThresholds)
        );
    }

    #[test]
    fn test_occupancy_for_level() {
        let levels = grey_buffer(&[0, 1, 2, 1], 2);
        let grid = occupancy_for_level(&levels, 2);
        assert!(grid.is_covered(0, 0));
        assert!(grid.is_covered(0, 1));
        assert!(!grid.is_covered(1, 0));
        assert!(grid.is_covered(1, 1));
    }

    #[test]
    fn test_pack_layers_covers_raised_cells() {
        let levels = grey_buffer(&[0, 1, 1, 2, 2, 2], 3);
        let layers = pack_depth_layers(&levels, 3, &default_catalog(), None).unwrap();
        assert_eq!(layers.len(), 2);

        // Layer 1 covers the five cells at level >= 1.
        let cells: usize = layers[0].placements().map(|(_, _, p)| p.area()).sum();
        assert_eq!(cells, 5);
        // Layer 2 is the bottom row only.
        assert_eq!(layers[1].get(1, 0), Some(PartSize::new(1, 3)));
        assert_eq!(layers[1].len(), 1);
    }

    #[test]
    fn test_used_parts_merges_rotations() {
        let mut a = PlacementMatrix::new(4, 4);
        a.place(PartSize::new(1, 2), 0, 0);
        a.place(PartSize::new(2, 1), 1, 0);
        let mut b = PlacementMatrix::new(4, 4);
        b.place(PartSize::new(1, 1), 3, 3);
        let used = used_parts(&[a, b]);
        assert_eq!(used.get("1 X 2"), Some(&2));
        assert_eq!(used.get("1 X 1"), Some(&1));
        assert_eq!(used.len(), 2);
    }

    #[test]
    fn test_scale_for_display() {
        let scaled = scale_levels_for_display(&grey_buffer(&[0, 1, 3], 3), 4);
        // round(255 * 1 / 4), round(255 * 2 / 4), capped at 255
        assert_eq!(scaled.rgb(0).r, 64);
        assert_eq!(scaled.rgb(1).r, 128);
        assert_eq!(scaled.rgb(2).r, 255);
    }
}
