//! Color types and conversion utilities
//!
//! Every color that enters the engine is an 8-bit sRGB triple ([`Rgb`]),
//! optionally carrying opacity ([`Rgba`]). The perceptual metrics convert
//! these into the derived spaces below on demand:
//!
//! - [`Lab`]: CIE L\*a\*b\* (D50, Bradford-adapted), used by the Lab,
//!   CIEDE2000 and DIN99o metrics
//! - [`Hcl`]: cylindrical Lab (hue in degrees, chroma, lightness)
//! - [`Hsl`]: hue in degrees, saturation and lightness in `0.0..=1.0`
//! - [`Cubehelix`]: Green's cubehelix space (hue, saturation, lightness)
//!
//! # Example
//!
//! ```
//! use stud_quant::{Lab, Rgb};
//!
//! let red: Rgb = "#ff0000".parse().unwrap();
//! let lab = Lab::from(red);
//! assert!((lab.l - 54.2917).abs() < 1e-3);
//! ```

mod cubehelix;
mod hsl;
mod lab;
mod lut;
mod rgb;

pub use cubehelix::Cubehelix;
pub use hsl::Hsl;
pub use lab::{Hcl, Lab};
pub use rgb::{Rgb, Rgba};
