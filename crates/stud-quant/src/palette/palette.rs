//! Color supply bookkeeping
//!
//! [`Palette`] is an owned value: every engine entry point clones the
//! caller's palette and depletes only its private copy.

use std::collections::{BTreeMap, BTreeSet};

use super::darken::darken;
use super::error::PaletteError;
use crate::color::Rgb;

/// Per-color counts, ordered by canonical color key.
pub type ColorCounts = BTreeMap<Rgb, u32>;

/// Colors and the number of studs available in each.
///
/// Entries are kept sorted by color key, so iteration order (and therefore
/// the order in which quantization candidates are tried) is deterministic.
///
/// # Example
///
/// ```
/// use stud_quant::{Palette, Rgb};
///
/// let mut palette = Palette::from_hex([("#ff0000", Some(2)), ("#00ff00", None)]).unwrap();
/// let red = Rgb::new(255, 0, 0);
///
/// assert_eq!(palette.count(red), 2);
/// palette.decrement(red);
/// palette.decrement(red);
/// assert_eq!(palette.anchors(), vec![Rgb::new(0, 255, 0)]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Palette {
    counts: ColorCounts,
}

impl Palette {
    /// Count used for colors without a supply limit.
    ///
    /// Unlimited colors are never decremented.
    pub const UNLIMITED: u32 = u32::MAX;

    /// Create a palette from `(color, count)` entries.
    ///
    /// # Errors
    ///
    /// - [`PaletteError::EmptyPalette`] if `entries` is empty
    /// - [`PaletteError::DuplicateColor`] if a color appears twice
    pub fn new<I>(entries: I) -> Result<Self, PaletteError>
    where
        I: IntoIterator<Item = (Rgb, u32)>,
    {
        let mut counts = ColorCounts::new();
        for (index, (color, count)) in entries.into_iter().enumerate() {
            if counts.insert(color, count).is_some() {
                return Err(PaletteError::DuplicateColor { index });
            }
        }
        if counts.is_empty() {
            return Err(PaletteError::EmptyPalette);
        }
        Ok(Self { counts })
    }

    /// Create a palette in which every color is unlimited.
    pub fn unlimited(colors: &[Rgb]) -> Result<Self, PaletteError> {
        Self::new(colors.iter().map(|&c| (c, Self::UNLIMITED)))
    }

    /// Create a palette from hex strings with optional counts.
    ///
    /// A `None` count means unlimited supply.
    pub fn from_hex<'a, I>(entries: I) -> Result<Self, PaletteError>
    where
        I: IntoIterator<Item = (&'a str, Option<u32>)>,
    {
        let parsed = entries
            .into_iter()
            .map(|(hex, count)| Ok((hex.parse::<Rgb>()?, count.unwrap_or(Self::UNLIMITED))))
            .collect::<Result<Vec<_>, PaletteError>>()?;
        Self::new(parsed)
    }

    /// Remaining count for `color` (zero if the color is not listed).
    #[inline]
    pub fn count(&self, color: Rgb) -> u32 {
        self.counts.get(&color).copied().unwrap_or(0)
    }

    /// Whether `color` is listed, regardless of its count.
    #[inline]
    pub fn contains(&self, color: Rgb) -> bool {
        self.counts.contains_key(&color)
    }

    /// Whether `color` is listed with a count above zero.
    #[inline]
    pub fn is_available(&self, color: Rgb) -> bool {
        self.count(color) > 0
    }

    /// Colors that may still be used, in ascending key order.
    pub fn anchors(&self) -> Vec<Rgb> {
        self.counts
            .iter()
            .filter(|(_, &count)| count > 0)
            .map(|(&color, _)| color)
            .collect()
    }

    /// Every listed color, including exhausted ones, in ascending key order.
    pub fn colors(&self) -> impl Iterator<Item = Rgb> + '_ {
        self.counts.keys().copied()
    }

    /// `(color, count)` pairs in ascending key order.
    pub fn iter(&self) -> impl Iterator<Item = (Rgb, u32)> + '_ {
        self.counts.iter().map(|(&c, &n)| (c, n))
    }

    /// Number of listed colors.
    #[inline]
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    /// Whether no colors are listed.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Whether any listed color is unlimited.
    pub fn has_unlimited(&self) -> bool {
        self.counts.values().any(|&n| n == Self::UNLIMITED)
    }

    /// Sum of all counts.
    pub fn total(&self) -> u64 {
        self.counts.values().map(|&n| n as u64).sum()
    }

    /// Consume one stud of `color` and return the new count.
    ///
    /// Never goes below zero; unlimited colors stay unlimited.
    pub fn decrement(&mut self, color: Rgb) -> u32 {
        match self.counts.get_mut(&color) {
            Some(count) if *count == Self::UNLIMITED => *count,
            Some(count) => {
                *count = count.saturating_sub(1);
                *count
            }
            None => 0,
        }
    }

    /// Drop every color whose count has reached zero.
    pub fn remove_exhausted(&mut self) {
        self.counts.retain(|_, count| *count > 0);
    }

    /// Per-color `self - other` over the union of both key sets.
    ///
    /// Colors missing from one side count as zero there.
    pub fn difference(&self, other: &ColorCounts) -> BTreeMap<Rgb, i64> {
        let keys: BTreeSet<Rgb> = self.counts.keys().chain(other.keys()).copied().collect();
        keys.into_iter()
            .map(|color| {
                let have = self.count(color) as i64;
                let used = other.get(&color).copied().unwrap_or(0) as i64;
                (color, have - used)
            })
            .collect()
    }

    /// The palette as it looks over a dark backing panel.
    ///
    /// Every key is replaced by its [`darken`]ed color. Colors that collide
    /// after darkening pool their counts;
    /// [`revert_darkened_with_supply`](super::revert_darkened_with_supply)
    /// splits the pooled pixels back without overspending either color.
    pub fn darkened(&self) -> Palette {
        let mut counts = ColorCounts::new();
        for (&color, &count) in &self.counts {
            let entry = counts.entry(darken(color)).or_insert(0);
            *entry = entry.saturating_add(count);
        }
        Palette { counts }
    }

    /// Borrow the underlying counts.
    pub fn as_counts(&self) -> &ColorCounts {
        &self.counts
    }
}

impl From<ColorCounts> for Palette {
    fn from(counts: ColorCounts) -> Self {
        Self { counts }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn red() -> Rgb {
        Rgb::new(255, 0, 0)
    }

    fn green() -> Rgb {
        Rgb::new(0, 255, 0)
    }

    #[test]
    fn test_empty_palette_rejected() {
        assert_eq!(
            Palette::new(Vec::<(Rgb, u32)>::new()),
            Err(PaletteError::EmptyPalette)
        );
    }

    #[test]
    fn test_duplicate_color_rejected() {
        let result = Palette::from_hex([("#ff0000", Some(1)), ("#00ff00", None), ("#F00", None)]);
        assert_eq!(result, Err(PaletteError::DuplicateColor { index: 2 }));
    }

    #[test]
    fn test_bad_hex_rejected() {
        let result = Palette::from_hex([("#ff00", Some(1))]);
        assert!(matches!(result, Err(PaletteError::ParseColor(_))));
    }

    #[test]
    fn test_anchors_sorted_and_skip_exhausted() {
        let palette = Palette::new([(red(), 1), (Rgb::new(0, 0, 255), 0), (green(), 3)]).unwrap();
        assert_eq!(palette.anchors(), vec![green(), red()]);
        assert_eq!(palette.len(), 3);
        assert!(palette.contains(Rgb::new(0, 0, 255)));
        assert!(!palette.is_available(Rgb::new(0, 0, 255)));
    }

    #[test]
    fn test_decrement_saturates_at_zero() {
        let mut palette = Palette::new([(red(), 1)]).unwrap();
        assert_eq!(palette.decrement(red()), 0);
        assert_eq!(palette.decrement(red()), 0);
        assert_eq!(palette.decrement(green()), 0);
        palette.remove_exhausted();
        assert!(palette.is_empty());
    }

    #[test]
    fn test_unlimited_never_depletes() {
        let mut palette = Palette::unlimited(&[red()]).unwrap();
        for _ in 0..10 {
            palette.decrement(red());
        }
        assert_eq!(palette.count(red()), Palette::UNLIMITED);
        assert!(palette.has_unlimited());
    }

    #[test]
    fn test_difference_over_union() {
        let palette = Palette::new([(red(), 2), (green(), 5)]).unwrap();
        let mut used = ColorCounts::new();
        used.insert(red(), 3);
        used.insert(Rgb::new(0, 0, 255), 1);

        let diff = palette.difference(&used);
        let expected: BTreeMap<Rgb, i64> = [
            (Rgb::new(0, 0, 255), -1),
            (green(), 5),
            (red(), -1),
        ]
        .into_iter()
        .collect();
        assert_eq!(diff, expected);
    }

    #[test]
    fn test_darkened_pools_collisions() {
        // 2 * pi/4 and 3 * pi/4 both round to 2
        let palette =
            Palette::new([(Rgb::new(0, 0, 2), 2), (Rgb::new(0, 0, 3), 3), (red(), 1)]).unwrap();
        let dark = palette.darkened();
        assert_eq!(dark.count(Rgb::new(0, 0, 2)), 5);
        assert_eq!(dark.count(Rgb::new(200, 0, 0)), 1);
        assert_eq!(dark.len(), 2);
    }
}
