//! Supply correction
//!
//! Naive quantization may use a color more often than there are studs of
//! it. This pass keeps the best-matching pixels of every over-used color
//! and moves the rest, worst match first, to whichever color with spare
//! supply is closest to the pixel's original color.

mod tiebreak;

use std::collections::BTreeMap;

use rand::Rng;
use tracing::{debug, trace};

pub use tiebreak::{TieResolution, TIEBREAKER_RATIO};

use crate::buffer::{BufferError, PixelBuffer};
use crate::color::Rgb;
use crate::metric::ColorDistance;
use crate::palette::Palette;
use crate::quantize::{nearest_anchor, usage_map};

/// Options for the supply-correction pass.
///
/// # Example
///
/// ```
/// use stud_quant::{CorrectionOptions, TieResolution};
///
/// let options = CorrectionOptions::new()
///     .tie_resolution(TieResolution::AlternatingMod)
///     .grouping_factor(2);
/// assert_eq!(options.grouping_factor, 2);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct CorrectionOptions {
    /// How to order pixels whose match quality is otherwise equal.
    ///
    /// Default: [`TieResolution::None`]
    pub tie_resolution: TieResolution,

    /// Side length of the pixel blocks the tie-break pattern works on.
    ///
    /// Default: `1`
    pub grouping_factor: usize,
}

impl Default for CorrectionOptions {
    fn default() -> Self {
        Self {
            tie_resolution: TieResolution::None,
            grouping_factor: 1,
        }
    }
}

impl CorrectionOptions {
    /// Create correction options with default values.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the tie-break policy.
    #[inline]
    pub fn tie_resolution(mut self, policy: TieResolution) -> Self {
        self.tie_resolution = policy;
        self
    }

    /// Set the tie-break block size.
    #[inline]
    pub fn grouping_factor(mut self, factor: usize) -> Self {
        self.grouping_factor = factor;
        self
    }
}

#[derive(Debug, Clone, Copy)]
struct Candidate {
    index: usize,
    original: Rgb,
    cost: f64,
}

fn worst_first(a: &Candidate, b: &Candidate) -> std::cmp::Ordering {
    b.cost.total_cmp(&a.cost)
}

/// Reassign pixels so that no color is used more often than `palette`
/// allows.
///
/// `aligned` is the naive quantization of `original`. When `overrides` is
/// given and all three color bytes of a pixel are overridden, the override
/// color counts as that pixel's original color.
///
/// If the combined spare supply runs out before every excess pixel is
/// placed, the remaining pixels keep their over-budget color.
///
/// # Errors
///
/// Fails if `aligned` and `original` differ in size or `overrides` does
/// not have one entry per byte.
pub fn correct_for_supply<M, R>(
    aligned: &PixelBuffer,
    original: &PixelBuffer,
    overrides: Option<&[Option<u8>]>,
    palette: &Palette,
    metric: &M,
    options: &CorrectionOptions,
    rng: &mut R,
) -> Result<PixelBuffer, BufferError>
where
    M: ColorDistance + ?Sized,
    R: Rng + ?Sized,
{
    if aligned.len() != original.len() {
        return Err(BufferError::SizeMismatch {
            left: aligned.len(),
            right: original.len(),
        });
    }
    if let Some(overrides) = overrides {
        if overrides.len() != aligned.as_bytes().len() {
            return Err(BufferError::OverrideLength {
                expected: aligned.as_bytes().len(),
                actual: overrides.len(),
            });
        }
    }

    let usage = usage_map(aligned);
    let mut remaining: BTreeMap<Rgb, u32> = palette
        .difference(&usage)
        .into_iter()
        .filter(|&(_, spare)| spare > 0)
        .map(|(color, spare)| (color, u32::try_from(spare).unwrap_or(u32::MAX)))
        .collect();

    let mut groups: BTreeMap<Rgb, Vec<Candidate>> = BTreeMap::new();
    for i in 0..aligned.len() {
        let assigned = aligned.rgb(i);
        let source = overridden_color(overrides, i).unwrap_or_else(|| original.rgb(i));
        let (row, col) = aligned.position(i);
        let tiebreak = options.tie_resolution.perturbation(
            row,
            col,
            aligned.width(),
            options.grouping_factor,
            rng,
        );
        groups.entry(assigned).or_default().push(Candidate {
            index: i,
            original: source,
            cost: metric.distance(source, assigned) + tiebreak,
        });
    }

    let mut problematic = Vec::new();
    for (color, mut group) in groups {
        group.sort_by(worst_first);
        // The best `available` matches keep their color
        let keep = (palette.count(color) as usize).min(group.len());
        group.truncate(group.len() - keep);
        problematic.extend(group);
    }
    problematic.sort_by(worst_first);

    debug!(
        excess = problematic.len(),
        spare_colors = remaining.len(),
        policy = %options.tie_resolution,
        "supply correction"
    );

    let mut corrected = aligned.clone();
    let mut stranded = 0usize;
    for candidate in &problematic {
        let choices: Vec<Rgb> = remaining.keys().copied().collect();
        let Some((replacement, _)) = nearest_anchor(candidate.original, &choices, metric) else {
            stranded += 1;
            continue;
        };
        corrected.set_rgb(candidate.index, replacement);

        if let Some(left) = remaining.get_mut(&replacement) {
            *left -= 1;
            if *left == 0 {
                remaining.remove(&replacement);
                trace!(color = %replacement, "spare supply exhausted");
            }
        }
    }

    if stranded > 0 {
        debug!(stranded, "not enough spare supply; pixels keep their color");
    }

    Ok(corrected)
}

fn overridden_color(overrides: Option<&[Option<u8>]>, pixel: usize) -> Option<Rgb> {
    let channels = overrides?.get(pixel * 4..pixel * 4 + 3)?;
    match channels {
        [Some(r), Some(g), Some(b)] => Some(Rgb::new(*r, *g, *b)),
        _ => None,
    }
}
