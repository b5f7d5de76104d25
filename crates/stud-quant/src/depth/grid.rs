//! Occupancy and placement grids

use serde::Serialize;

use super::part::PartSize;

/// Which cells of a layer are already covered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OccupancyGrid {
    cells: Vec<bool>,
    width: usize,
    height: usize,
}

impl OccupancyGrid {
    /// An all-uncovered grid.
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            cells: vec![false; width * height],
            width,
            height,
        }
    }

    /// Grid where cell `(row, col)` is covered when `covered(row, col)`.
    pub fn from_fn<F>(width: usize, height: usize, mut covered: F) -> Self
    where
        F: FnMut(usize, usize) -> bool,
    {
        let mut cells = Vec::with_capacity(width * height);
        for row in 0..height {
            for col in 0..width {
                cells.push(covered(row, col));
            }
        }
        Self {
            cells,
            width,
            height,
        }
    }

    /// Grid width in cells.
    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    /// Grid height in cells.
    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    /// Whether `(row, col)` is covered.
    #[inline]
    pub fn is_covered(&self, row: usize, col: usize) -> bool {
        self.cells[row * self.width + col]
    }

    /// Mark `(row, col)` covered.
    #[inline]
    pub fn cover(&mut self, row: usize, col: usize) {
        self.cells[row * self.width + col] = true;
    }

    /// Whether every cell is covered.
    pub fn is_full(&self) -> bool {
        self.cells.iter().all(|&c| c)
    }

    /// Number of uncovered cells.
    pub fn uncovered(&self) -> usize {
        self.cells.iter().filter(|&&c| !c).count()
    }

    /// Whether a `part` anchored at `(row, col)` fits entirely inside the
    /// grid over uncovered cells.
    pub fn fits(&self, part: PartSize, row: usize, col: usize) -> bool {
        if row + part.height > self.height || col + part.width > self.width {
            return false;
        }
        (row..row + part.height)
            .all(|r| (col..col + part.width).all(|c| !self.is_covered(r, c)))
    }

    /// Cover every cell under a `part` anchored at `(row, col)`.
    pub fn cover_part(&mut self, part: PartSize, row: usize, col: usize) {
        for r in row..row + part.height {
            for c in col..col + part.width {
                self.cover(r, c);
            }
        }
    }
}

/// Parts placed on one layer, recorded at their top-left cell.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlacementMatrix {
    cells: Vec<Option<PartSize>>,
    width: usize,
    height: usize,
}

impl PlacementMatrix {
    /// An empty matrix.
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            cells: vec![None; width * height],
            width,
            height,
        }
    }

    /// Matrix width in cells.
    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    /// Matrix height in cells.
    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    /// Part anchored at `(row, col)`, if any.
    #[inline]
    pub fn get(&self, row: usize, col: usize) -> Option<PartSize> {
        self.cells[row * self.width + col]
    }

    /// Record `part` at `(row, col)`.
    #[inline]
    pub fn place(&mut self, part: PartSize, row: usize, col: usize) {
        self.cells[row * self.width + col] = Some(part);
    }

    /// All placements as `(row, col, part)` in row-major order.
    pub fn placements(&self) -> impl Iterator<Item = (usize, usize, PartSize)> + '_ {
        self.cells.iter().enumerate().filter_map(move |(i, cell)| {
            cell.map(|part| (i / self.width, i % self.width, part))
        })
    }

    /// Number of parts placed.
    pub fn len(&self) -> usize {
        self.cells.iter().filter(|c| c.is_some()).count()
    }

    /// Whether nothing was placed.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
