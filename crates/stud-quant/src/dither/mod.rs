//! Dithering engines
//!
//! Two strategies are available:
//!
//! - **Static kernels** ([`diffuse_error`]): classic row-major error
//!   diffusion with Floyd-Steinberg, Jarvis-Judice-Ninke, Atkinson or
//!   Sierra weights. Supply counts are ignored.
//! - **Dynamic** ([`dynamic_dither`]): a greedy, priority-queue driven
//!   ditherer that commits the most confident pixels first and depletes
//!   supply as it goes.
//!
//! [`DitherMode`] names the choice, including `none` for plain
//! quantization followed by supply correction.

mod dynamic;
mod error_diffusion;
mod kernel;
mod options;
mod queue;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

pub use dynamic::dynamic_dither;
pub use error_diffusion::diffuse_error;
pub use kernel::*;
pub use options::DitherOptions;

use crate::api::UnknownOptionError;

/// Dithering mode selection.
///
/// Serialized names: `none`, `floyd-steinberg`, `jarvis-judice-ninke`,
/// `atkinson`, `sierra`, `dynamic`.
///
/// # Example
///
/// ```
/// use stud_quant::DitherMode;
///
/// let mode: DitherMode = "floyd-steinberg".parse().unwrap();
/// assert_eq!(mode.kernel().map(|k| k.name), Some("floyd-steinberg"));
/// assert!(DitherMode::Dynamic.kernel().is_none());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DitherMode {
    /// No dithering: nearest-color quantization plus supply correction
    #[default]
    None,
    /// Floyd-Steinberg error diffusion
    FloydSteinberg,
    /// Jarvis-Judice-Ninke error diffusion
    JarvisJudiceNinke,
    /// Atkinson error diffusion
    Atkinson,
    /// Sierra error diffusion
    Sierra,
    /// Greedy supply-aware dithering
    Dynamic,
}

impl DitherMode {
    /// All modes, in display order.
    pub const ALL: [DitherMode; 6] = [
        DitherMode::None,
        DitherMode::FloydSteinberg,
        DitherMode::JarvisJudiceNinke,
        DitherMode::Atkinson,
        DitherMode::Sierra,
        DitherMode::Dynamic,
    ];

    /// Configuration name of this mode.
    pub fn name(self) -> &'static str {
        match self {
            DitherMode::None => "none",
            DitherMode::FloydSteinberg => "floyd-steinberg",
            DitherMode::JarvisJudiceNinke => "jarvis-judice-ninke",
            DitherMode::Atkinson => "atkinson",
            DitherMode::Sierra => "sierra",
            DitherMode::Dynamic => "dynamic",
        }
    }

    /// The static kernel for this mode, if it is a kernel mode.
    pub fn kernel(self) -> Option<&'static Kernel> {
        match self {
            DitherMode::FloydSteinberg => Some(&FLOYD_STEINBERG),
            DitherMode::JarvisJudiceNinke => Some(&JARVIS_JUDICE_NINKE),
            DitherMode::Atkinson => Some(&ATKINSON),
            DitherMode::Sierra => Some(&SIERRA),
            DitherMode::None | DitherMode::Dynamic => None,
        }
    }
}

impl fmt::Display for DitherMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for DitherMode {
    type Err = UnknownOptionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        DitherMode::ALL
            .into_iter()
            .find(|mode| mode.name() == wanted)
            .ok_or_else(|| UnknownOptionError::new("dither mode", s))
    }
}
