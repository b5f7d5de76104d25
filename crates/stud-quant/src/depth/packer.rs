//! Greedy rectangular packing of depth plates

use std::collections::BTreeMap;

use tracing::debug;

use super::grid::{OccupancyGrid, PlacementMatrix};
use super::part::{DepthError, PartSize};

/// Priority of a part: larger area first; among equal areas, the part with
/// fewer rows first.
fn priority(part: &PartSize) -> f64 {
    part.area() as f64 - part.height as f64 * 0.01
}

/// Cover the uncovered cells of `grid` with parts from `catalog`.
///
/// Parts are tried from largest to smallest. Each part is placed, scanning
/// row-major, at every position where its whole footprint is uncovered;
/// placed cells are marked covered in `grid`. When `boundary` is greater
/// than 1, a part may not straddle a multiple of `boundary` in either
/// direction. Nothing is ever undone, so cells can remain uncovered if the
/// catalog lacks a 1×1 part.
///
/// # Errors
///
/// Fails if `catalog` is empty or contains a part with a zero dimension.
///
/// # Example
///
/// ```
/// use stud_quant::{pack_parts, OccupancyGrid, PartSize};
///
/// let mut grid = OccupancyGrid::new(3, 2);
/// let catalog = [PartSize::new(1, 1), PartSize::new(2, 2)];
/// let placed = pack_parts(&mut grid, &catalog, None).unwrap();
///
/// assert_eq!(placed.get(0, 0), Some(PartSize::new(2, 2)));
/// assert_eq!(placed.len(), 3);
/// assert!(grid.is_full());
/// ```
pub fn pack_parts(
    grid: &mut OccupancyGrid,
    catalog: &[PartSize],
    boundary: Option<usize>,
) -> Result<PlacementMatrix, DepthError> {
    if catalog.is_empty() {
        return Err(DepthError::EmptyCatalog);
    }
    if let Some(part) = catalog.iter().find(|p| p.area() == 0) {
        return Err(DepthError::ZeroSizedPart {
            height: part.height,
            width: part.width,
        });
    }

    let mut parts = catalog.to_vec();
    parts.sort_by(|a, b| priority(b).total_cmp(&priority(a)));
    let boundary = boundary.filter(|&b| b > 1);

    let mut placed = PlacementMatrix::new(grid.width(), grid.height());
    let mut counts: BTreeMap<String, usize> = BTreeMap::new();

    for part in parts {
        if part.height > grid.height() || part.width > grid.width() {
            continue;
        }
        for row in 0..=grid.height() - part.height {
            for col in 0..=grid.width() - part.width {
                if !grid.fits(part, row, col) {
                    continue;
                }
                if let Some(b) = boundary {
                    let crosses_rows = row / b != (row + part.height - 1) / b;
                    let crosses_cols = col / b != (col + part.width - 1) / b;
                    if crosses_rows || crosses_cols {
                        continue;
                    }
                }
                placed.place(part, row, col);
                grid.cover_part(part, row, col);
                *counts.entry(part.label()).or_insert(0) += 1;
            }
        }
    }

    debug!(
        placed = placed.len(),
        uncovered = grid.uncovered(),
        ?counts,
        "packed depth layer"
    );

    Ok(placed)
}
