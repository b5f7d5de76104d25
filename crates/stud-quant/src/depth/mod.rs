//! Depth layering
//!
//! A greyscale depth map is discretized into levels, and each level above
//! the base is covered with rectangular plates by a greedy largest-first
//! packer.

mod grid;
mod levels;
mod packer;
mod part;

pub use grid::{OccupancyGrid, PlacementMatrix};
pub use levels::{
    discrete_depth_levels, occupancy_for_level, pack_depth_layers, scale_levels_for_display,
    used_parts,
};
pub use packer::pack_parts;
pub use part::{
    catalog_without, default_catalog, full_catalog, DepthError, PartSize, DEFAULT_DISABLED,
    LABEL_SEPARATOR,
};
