//! Spatial tie-break policies for supply correction
//!
//! When many pixels are equally far from their assigned color, the order in
//! which they are reassigned decides where the substitutes appear. Adding a
//! small, spatially patterned perturbation to each pixel's cost spreads the
//! substitutes out instead of letting them clump in raster order.

use std::fmt;
use std::str::FromStr;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::api::UnknownOptionError;

/// Scale of the perturbation relative to the metric's distance units.
pub const TIEBREAKER_RATIO: f64 = 0.001;

/// Tie-break policy for the supply-correction pass.
///
/// Pixel coordinates are first divided by the grouping factor, giving block
/// coordinates `(r, c)`; the `mod` policies then bucket blocks by
/// `(r + c) mod n`, producing diagonal stripes of period `n`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TieResolution {
    /// Same perturbation for every pixel
    #[default]
    None,
    /// Uniform random perturbation
    Random,
    /// Diagonal stripes of period 2 (checkerboard)
    Mod2,
    /// Diagonal stripes of period 3
    Mod3,
    /// Diagonal stripes of period 4
    Mod4,
    /// Diagonal stripes of period 5
    Mod5,
    /// Period-2 stripes with a little noise
    NoisyMod2,
    /// Period-3 stripes with a little noise
    NoisyMod3,
    /// Period-4 stripes with a little noise
    NoisyMod4,
    /// Period-5 stripes with a little noise
    NoisyMod5,
    /// Periods 2, 3, 4 and 5 nested in decreasing significance
    CascadingMod,
    /// As `CascadingMod`, with noise in place of the period-5 term
    CascadingNoisyMod,
    /// As `CascadingMod`, with the odd periods running along the
    /// anti-diagonal
    AlternatingMod,
    /// As `AlternatingMod`, with noise in place of the period-5 term
    AlternatingNoisyMod,
}

impl TieResolution {
    /// All policies, in display order.
    pub const ALL: [TieResolution; 14] = [
        TieResolution::None,
        TieResolution::Random,
        TieResolution::Mod2,
        TieResolution::Mod3,
        TieResolution::Mod4,
        TieResolution::Mod5,
        TieResolution::NoisyMod2,
        TieResolution::NoisyMod3,
        TieResolution::NoisyMod4,
        TieResolution::NoisyMod5,
        TieResolution::CascadingMod,
        TieResolution::CascadingNoisyMod,
        TieResolution::AlternatingMod,
        TieResolution::AlternatingNoisyMod,
    ];

    /// Configuration name of this policy.
    pub fn name(self) -> &'static str {
        match self {
            TieResolution::None => "none",
            TieResolution::Random => "random",
            TieResolution::Mod2 => "mod2",
            TieResolution::Mod3 => "mod3",
            TieResolution::Mod4 => "mod4",
            TieResolution::Mod5 => "mod5",
            TieResolution::NoisyMod2 => "noisymod2",
            TieResolution::NoisyMod3 => "noisymod3",
            TieResolution::NoisyMod4 => "noisymod4",
            TieResolution::NoisyMod5 => "noisymod5",
            TieResolution::CascadingMod => "cascadingmod",
            TieResolution::CascadingNoisyMod => "cascadingnoisymod",
            TieResolution::AlternatingMod => "alternatingmod",
            TieResolution::AlternatingNoisyMod => "alternatingnoisymod",
        }
    }

    /// Whether this policy draws from the random source.
    pub fn is_stochastic(self) -> bool {
        matches!(
            self,
            TieResolution::Random
                | TieResolution::NoisyMod2
                | TieResolution::NoisyMod3
                | TieResolution::NoisyMod4
                | TieResolution::NoisyMod5
                | TieResolution::CascadingNoisyMod
                | TieResolution::AlternatingNoisyMod
        )
    }

    /// Cost perturbation for the pixel at `(row, col)` of an image `width`
    /// pixels wide.
    ///
    /// A `grouping` of 0 is treated as 1. Deterministic policies never touch
    /// `rng`.
    pub fn perturbation<R>(
        self,
        row: usize,
        col: usize,
        width: usize,
        grouping: usize,
        rng: &mut R,
    ) -> f64
    where
        R: Rng + ?Sized,
    {
        let grouping = grouping.max(1);
        let r = row / grouping;
        let c = col / grouping;
        let w = width / grouping;

        let diagonal = |n: usize| ((r + c) % n) as f64;
        let anti_diagonal = |n: usize| ((r + w).saturating_sub(c) % n) as f64;
        let t = TIEBREAKER_RATIO;

        let factor = match self {
            TieResolution::None => 1.0,
            TieResolution::Random => rng.gen::<f64>(),
            TieResolution::Mod2 => diagonal(2),
            TieResolution::Mod3 => diagonal(3),
            TieResolution::Mod4 => diagonal(4),
            TieResolution::Mod5 => diagonal(5),
            TieResolution::NoisyMod2 => diagonal(2) + rng.gen::<f64>() * t,
            TieResolution::NoisyMod3 => diagonal(3) + rng.gen::<f64>() * t,
            TieResolution::NoisyMod4 => diagonal(4) + rng.gen::<f64>() * t,
            TieResolution::NoisyMod5 => diagonal(5) + rng.gen::<f64>() * t,
            TieResolution::CascadingMod => {
                diagonal(2) + diagonal(3) * t + diagonal(4) * t * t + diagonal(5) * t * t * t
            }
            TieResolution::CascadingNoisyMod => {
                diagonal(2) + diagonal(3) * t + diagonal(4) * t * t + rng.gen::<f64>() * t * t * t
            }
            TieResolution::AlternatingMod => {
                diagonal(2)
                    + anti_diagonal(3) * t
                    + diagonal(4) * t * t
                    + anti_diagonal(5) * t * t * t
            }
            TieResolution::AlternatingNoisyMod => {
                diagonal(2)
                    + anti_diagonal(3) * t
                    + diagonal(4) * t * t
                    + rng.gen::<f64>() * t * t * t
            }
        };
        t * factor
    }
}

impl fmt::Display for TieResolution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for TieResolution {
    type Err = UnknownOptionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        TieResolution::ALL
            .into_iter()
            .find(|policy| policy.name() == wanted)
            .ok_or_else(|| UnknownOptionError::new("tie resolution", s))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::mock::StepRng;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn zero_rng() -> StepRng {
        StepRng::new(0, 0)
    }

    #[test]
    fn test_none_is_constant() {
        let mut rng = zero_rng();
        for (row, col) in [(0, 0), (3, 7), (10, 1)] {
            let p = TieResolution::None.perturbation(row, col, 16, 1, &mut rng);
            assert_eq!(p, TIEBREAKER_RATIO);
        }
    }

    #[test]
    fn test_mod2_is_checkerboard() {
        let mut rng = zero_rng();
        let p = |row, col, rng: &mut StepRng| TieResolution::Mod2.perturbation(row, col, 8, 1, rng);
        assert_eq!(p(0, 0, &mut rng), 0.0);
        assert_eq!(p(0, 1, &mut rng), TIEBREAKER_RATIO);
        assert_eq!(p(1, 0, &mut rng), TIEBREAKER_RATIO);
        assert_eq!(p(1, 1, &mut rng), 0.0);
    }

    #[test]
    fn test_grouping_factor_widens_blocks() {
        let mut rng = zero_rng();
        // With grouping 2, columns 0 and 1 share a block
        let a = TieResolution::Mod2.perturbation(0, 0, 8, 2, &mut rng);
        let b = TieResolution::Mod2.perturbation(0, 1, 8, 2, &mut rng);
        let c = TieResolution::Mod2.perturbation(0, 2, 8, 2, &mut rng);
        assert_eq!(a, b);
        assert_ne!(a, c);
        // Zero grouping behaves like one
        assert_eq!(
            TieResolution::Mod3.perturbation(2, 2, 8, 0, &mut rng),
            TieResolution::Mod3.perturbation(2, 2, 8, 1, &mut rng)
        );
    }

    #[test]
    fn test_cascading_terms() {
        let mut rng = zero_rng();
        // r + c = 7: 7%2=1, 7%3=1, 7%4=3, 7%5=2
        let t = TIEBREAKER_RATIO;
        let expected = t * (1.0 + t + 3.0 * t * t + 2.0 * t * t * t);
        let p = TieResolution::CascadingMod.perturbation(3, 4, 10, 1, &mut rng);
        assert!((p - expected).abs() < 1e-18);
    }

    #[test]
    fn test_alternating_uses_anti_diagonal() {
        let mut rng = zero_rng();
        // r=3, c=4, w=10: (r+c)%2=1, (r+w-c)%3=0, (r+c)%4=3, (r+w-c)%5=4
        let t = TIEBREAKER_RATIO;
        let expected = t * (1.0 + 0.0 * t + 3.0 * t * t + 4.0 * t * t * t);
        let p = TieResolution::AlternatingMod.perturbation(3, 4, 10, 1, &mut rng);
        assert!((p - expected).abs() < 1e-18);
    }

    #[test]
    fn test_deterministic_policies_ignore_rng() {
        let mut a = StdRng::seed_from_u64(1);
        let mut b = StdRng::seed_from_u64(2);
        for policy in TieResolution::ALL.into_iter().filter(|p| !p.is_stochastic()) {
            for (row, col) in [(0, 0), (5, 9), (7, 2)] {
                assert_eq!(
                    policy.perturbation(row, col, 12, 2, &mut a),
                    policy.perturbation(row, col, 12, 2, &mut b),
                    "{policy}"
                );
            }
        }
    }

    #[test]
    fn test_stochastic_policies_stay_in_range() {
        let mut rng = StdRng::seed_from_u64(42);
        for policy in TieResolution::ALL {
            for row in 0..6 {
                for col in 0..6 {
                    let p = policy.perturbation(row, col, 6, 1, &mut rng);
                    assert!((0.0..0.01).contains(&p), "{policy} gave {p}");
                }
            }
        }
    }

    #[test]
    fn test_names_round_trip() {
        for policy in TieResolution::ALL {
            assert_eq!(policy.name().parse::<TieResolution>().unwrap(), policy);
        }
        assert!("mod6".parse::<TieResolution>().is_err());
    }
}
