//! Palette and supply model
//!
//! A [`Palette`] maps each stud color to the number of studs of that color
//! still available. Colors with a count of zero remain listed (so usage
//! reports can mention them) but are never offered as quantization targets.

mod darken;
mod error;
mod palette;

pub use darken::{darken, darkened_lookup, revert_darkened, revert_darkened_with_supply};
pub use error::{PaletteError, ParseColorError};
pub use palette::{ColorCounts, Palette};
