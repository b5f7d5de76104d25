//! Error diffusion kernel definitions
//!
//! Static kernels are causal: every entry points at a pixel that comes
//! later in row-major order. The dynamic ditherer uses the symmetric
//! [`GAUSSIAN`] weights instead, which reach in every direction.

/// A causal error diffusion kernel.
///
/// Each entry is `(dx, dy, weight)`: `dx` is the column offset (positive is
/// right), `dy` the row offset (never negative, and when zero `dx` is
/// positive). A neighbor receives `error * weight / denominator`, where the
/// denominator is the sum of all weights, so every kernel hands on the
/// whole error.
#[derive(Debug, Clone, Copy)]
pub struct Kernel {
    /// Kernel name, for logs
    pub name: &'static str,

    /// `(dx, dy, weight)` entries
    pub entries: &'static [(i32, i32, f64)],
}

impl Kernel {
    /// Sum of all weights.
    pub fn denominator(&self) -> f64 {
        self.entries.iter().map(|&(_, _, w)| w).sum()
    }

    /// Share of `error` each neighbor receives, as `(dx, dy, share)`.
    pub fn spread(&self, error: [f64; 3]) -> impl Iterator<Item = (i32, i32, [f64; 3])> + '_ {
        let denominator = self.denominator();
        self.entries.iter().map(move |&(dx, dy, w)| {
            let f = w / denominator;
            (dx, dy, [error[0] * f, error[1] * f, error[2] * f])
        })
    }
}

/// Floyd-Steinberg.
///
/// ```text
///        X   7
///    3   5   1
/// ```
pub const FLOYD_STEINBERG: Kernel = Kernel {
    name: "floyd-steinberg",
    entries: &[(1, 0, 7.0), (-1, 1, 3.0), (0, 1, 5.0), (1, 1, 1.0)],
};

/// Jarvis-Judice-Ninke.
///
/// ```text
///            X   7   5
///    3   5   7   5   3
///    1   3   5   3   1
/// ```
pub const JARVIS_JUDICE_NINKE: Kernel = Kernel {
    name: "jarvis-judice-ninke",
    entries: &[
        (1, 0, 7.0),
        (2, 0, 5.0),
        (-2, 1, 3.0),
        (-1, 1, 5.0),
        (0, 1, 7.0),
        (1, 1, 5.0),
        (2, 1, 3.0),
        (-2, 2, 1.0),
        (-1, 2, 3.0),
        (0, 2, 5.0),
        (1, 2, 3.0),
        (2, 2, 1.0),
    ],
};

/// Atkinson, with each unit weight scaled by ¾.
///
/// Because the denominator is the weight sum, every neighbor ends up with
/// one sixth of the error.
///
/// ```text
///        X   1   1
///    1   1   1
///        1
/// ```
pub const ATKINSON: Kernel = Kernel {
    name: "atkinson",
    entries: &[
        (1, 0, 0.75),
        (2, 0, 0.75),
        (-1, 1, 0.75),
        (0, 1, 0.75),
        (1, 1, 0.75),
        (0, 2, 0.75),
    ],
};

/// Sierra (Sierra-3).
///
/// ```text
///            X   5   3
///    2   4   5   4   2
///        2   3   2
/// ```
pub const SIERRA: Kernel = Kernel {
    name: "sierra",
    entries: &[
        (1, 0, 5.0),
        (2, 0, 3.0),
        (-2, 1, 2.0),
        (-1, 1, 4.0),
        (0, 1, 5.0),
        (1, 1, 4.0),
        (2, 1, 2.0),
        (-1, 2, 2.0),
        (0, 2, 3.0),
        (1, 2, 2.0),
    ],
};

/// Symmetric 5×5 weights used by the dynamic ditherer.
///
/// Indexed `[row][col]` with the source pixel at `[2][2]`, which is always
/// skipped. The weights are not normalized; the ditherer divides by the
/// sum over the neighbors that are still pending.
pub const GAUSSIAN: [[f64; 5]; 5] = [
    [1.0, 4.0, 6.0, 4.0, 1.0],
    [4.0, 16.0, 26.0, 16.0, 4.0],
    [7.0, 26.0, 0.0, 26.0, 7.0],
    [4.0, 16.0, 26.0, 16.0, 4.0],
    [1.0, 4.0, 6.0, 4.0, 1.0],
];

/// Half-width of [`GAUSSIAN`].
pub const GAUSSIAN_RADIUS: i32 = 2;

#[cfg(test)]
mod tests {
    use super::*;

    const STATIC: [Kernel; 4] = [FLOYD_STEINBERG, JARVIS_JUDICE_NINKE, ATKINSON, SIERRA];

    #[test]
    fn test_denominators() {
        assert_eq!(FLOYD_STEINBERG.denominator(), 16.0);
        assert_eq!(JARVIS_JUDICE_NINKE.denominator(), 48.0);
        assert_eq!(ATKINSON.denominator(), 4.5);
        assert_eq!(SIERRA.denominator(), 32.0);
    }

    #[test]
    fn test_kernels_are_causal() {
        for kernel in STATIC {
            for &(dx, dy, w) in kernel.entries {
                assert!(dy > 0 || (dy == 0 && dx > 0), "{}: ({dx}, {dy})", kernel.name);
                assert!(w > 0.0);
            }
        }
    }

    #[test]
    fn test_spread_conserves_error() {
        let error = [12.0, -30.0, 7.5];
        for kernel in STATIC {
            let mut total = [0.0; 3];
            for (_, _, share) in kernel.spread(error) {
                for c in 0..3 {
                    total[c] += share[c];
                }
            }
            for c in 0..3 {
                assert!((total[c] - error[c]).abs() < 1e-9, "{} channel {c}", kernel.name);
            }
        }
    }

    #[test]
    fn test_atkinson_gives_each_neighbor_a_sixth() {
        for (_, _, share) in ATKINSON.spread([6.0, 0.0, 0.0]) {
            assert!((share[0] - 1.0).abs() < 1e-12);
        }
    }

    #[test]
    fn test_gaussian_is_symmetric_with_empty_center() {
        assert_eq!(GAUSSIAN[2][2], 0.0);
        for r in 0..5 {
            for c in 0..5 {
                assert_eq!(GAUSSIAN[r][c], GAUSSIAN[4 - r][4 - c]);
                assert_eq!(GAUSSIAN[r][c], GAUSSIAN[r][4 - c]);
            }
        }
    }
}
