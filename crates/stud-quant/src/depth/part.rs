//! Depth plate sizes

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error type for depth packing.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DepthError {
    /// No part sizes to place
    #[error("part catalog is empty")]
    EmptyCatalog,
    /// A part with a zero dimension can never cover anything
    #[error("part {height}x{width} has a zero dimension")]
    ZeroSizedPart {
        /// Part height
        height: usize,
        /// Part width
        width: usize,
    },
    /// A part label that is not `"<n> X <m>"`
    #[error("invalid part label {0:?} (expected e.g. \"2 X 4\")")]
    InvalidLabel(String),
    /// Depth thresholds must be given
    #[error("at least one depth threshold is required")]
    NoThresholds,
}

/// Separator between the two dimensions of a part label.
pub const LABEL_SEPARATOR: &str = " X ";

/// Part sizes that are left out of the default catalog.
pub const DEFAULT_DISABLED: [&str; 2] = ["4 X 10", "4 X 8"];

/// Plate sizes in the default catalog, one orientation each.
const PLATE_SIZES: [(usize, usize); 14] = [
    (1, 1),
    (1, 2),
    (1, 3),
    (1, 4),
    (1, 6),
    (1, 8),
    (2, 2),
    (2, 3),
    (2, 4),
    (2, 6),
    (2, 8),
    (4, 4),
    (4, 8),
    (4, 10),
];

/// A rectangular footprint in grid cells.
///
/// Orientation matters for placement: a 1×4 part lies along a row and a
/// 4×1 part along a column. Both share the label `"1 X 4"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PartSize {
    /// Rows covered
    pub height: usize,
    /// Columns covered
    pub width: usize,
}

impl PartSize {
    /// Create a part of `height × width` cells.
    #[inline]
    pub const fn new(height: usize, width: usize) -> Self {
        Self { height, width }
    }

    /// Number of cells covered.
    #[inline]
    pub const fn area(&self) -> usize {
        self.height * self.width
    }

    /// The same part turned by 90°.
    #[inline]
    pub const fn rotated(&self) -> Self {
        Self::new(self.width, self.height)
    }

    /// Orientation-independent label, smaller dimension first.
    pub fn label(&self) -> String {
        let (small, large) = if self.height < self.width {
            (self.height, self.width)
        } else {
            (self.width, self.height)
        };
        format!("{small}{LABEL_SEPARATOR}{large}")
    }
}

impl fmt::Display for PartSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.height, self.width)
    }
}

impl FromStr for PartSize {
    type Err = DepthError;

    /// Parse `"<height> X <width>"` (the `X` may be upper or lower case).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || DepthError::InvalidLabel(s.to_string());
        let (h, w) = s
            .split_once(|c: char| c == 'X' || c == 'x')
            .ok_or_else(invalid)?;
        let height = h.trim().parse().map_err(|_| invalid())?;
        let width = w.trim().parse().map_err(|_| invalid())?;
        Ok(PartSize::new(height, width))
    }
}

/// Every plate size in both orientations.
pub fn full_catalog() -> Vec<PartSize> {
    let mut parts: Vec<PartSize> = PLATE_SIZES.iter().map(|&(h, w)| PartSize::new(h, w)).collect();
    for &(h, w) in &PLATE_SIZES {
        if h != w {
            parts.push(PartSize::new(w, h));
        }
    }
    parts
}

/// The full catalog minus any part whose label is in `disabled`.
pub fn catalog_without<S: AsRef<str>>(disabled: &[S]) -> Vec<PartSize> {
    full_catalog()
        .into_iter()
        .filter(|part| {
            let label = part.label();
            !disabled.iter().any(|d| d.as_ref().trim() == label)
        })
        .collect()
}

/// The catalog used when nothing else is configured.
pub fn default_catalog() -> Vec<PartSize> {
    catalog_without(&DEFAULT_DISABLED)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_label_is_orientation_independent() {
        assert_eq!(PartSize::new(4, 2).label(), "2 X 4");
        assert_eq!(PartSize::new(2, 4).label(), "2 X 4");
        assert_eq!(PartSize::new(1, 1).label(), "1 X 1");
    }

    #[test]
    fn test_parse_label() {
        assert_eq!("2 X 4".parse::<PartSize>().unwrap(), PartSize::new(2, 4));
        assert_eq!("10x4".parse::<PartSize>().unwrap(), PartSize::new(10, 4));
        assert!(matches!("2 by 4".parse::<PartSize>(), Err(DepthError::InvalidLabel(_))));
    }

    #[test]
    fn test_full_catalog_has_both_orientations() {
        let catalog = full_catalog();
        assert_eq!(catalog.len(), 25);
        assert!(catalog.contains(&PartSize::new(1, 8)));
        assert!(catalog.contains(&PartSize::new(8, 1)));
        assert_eq!(catalog.iter().filter(|p| p.label() == "4 X 4").count(), 1);
    }

    #[test]
    fn test_default_catalog_skips_disabled_sizes() {
        let catalog = default_catalog();
        assert_eq!(catalog.len(), 21);
        assert!(!catalog.iter().any(|p| p.label() == "4 X 8" || p.label() == "4 X 10"));
        assert!(catalog.contains(&PartSize::new(1, 1)));
    }
}
