//! Output types.

mod mosaic;

pub use mosaic::Mosaic;
