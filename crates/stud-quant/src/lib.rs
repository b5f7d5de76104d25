// Generated LUT tables and index-heavy pixel loops trip these lints.
#![allow(
    clippy::excessive_precision,
    clippy::needless_range_loop,
    clippy::module_inception,
    clippy::doc_overindented_list_items,
    clippy::manual_range_contains
)]

//! stud-quant: supply-constrained color quantization for stud mosaics
//!
//! This library turns raster images into mosaics built from a finite
//! inventory of colored studs. Every pixel becomes one palette color,
//! chosen by a perceptual distance metric, while respecting how many studs
//! of each color exist.
//!
//! # Quick Start
//!
//! The [`MosaicBuilder`] is the primary entry point:
//!
//! ```
//! use stud_quant::{DitherMode, MosaicBuilder, Palette, PixelBuffer, Rgb};
//!
//! let palette = Palette::from_hex([
//!     ("#000000", Some(8)),
//!     ("#ffffff", Some(8)),
//! ]).unwrap();
//! let image = PixelBuffer::filled(Rgb::new(128, 128, 128), 4, 4).unwrap();
//!
//! let mosaic = MosaicBuilder::new()
//!     .dither_mode(DitherMode::Dynamic)
//!     .run(&image, &palette)
//!     .unwrap();
//!
//! assert_eq!(mosaic.width(), 4);
//! assert!(mosaic.missing(&palette).is_empty());
//! ```
//!
//! # Metrics
//!
//! [`ColorMetric`] selects how "closest color" is judged:
//!
//! - Euclidean distance in RGB, Lab, HCL, HSL or Cubehelix coordinates
//! - CIEDE2000 (default)
//! - Euclidean distance in DIN99o
//!
//! Lab-based conversions follow the D50 sRGB convention, so greys have
//! exactly zero chroma.
//!
//! # Pipelines
//!
//! [`DitherMode`] picks one of three pipelines:
//!
//! - `none`: nearest-color quantization followed by [supply
//!   correction](correct_for_supply), which moves the worst-matching
//!   excess pixels of each over-used color to the closest color with
//!   spare studs
//! - `floyd-steinberg`, `jarvis-judice-ninke`, `atkinson`, `sierra`:
//!   classic row-major error diffusion, ignoring supply
//! - `dynamic`: a priority-queue ditherer that commits the best-matching
//!   pixel first, depletes supply as it goes and re-plans every pending
//!   pixel when a color runs out
//!
//! # Depth
//!
//! The [`depth`] module discretizes a depth map into levels and covers each
//! raised layer with rectangular plates using a greedy largest-first
//! packer ([`pack_parts`]).

pub mod api;
pub mod buffer;
pub mod color;
pub mod correction;
pub mod depth;
pub mod dither;
pub mod metric;
pub mod output;
pub mod palette;
pub mod preprocess;
pub mod quantize;


pub use api::{MosaicBuilder, MosaicError, UnknownOptionError};
pub use buffer::{BufferError, PixelBuffer};
pub use color::{Cubehelix, Hcl, Hsl, Lab, Rgb, Rgba};
pub use correction::{correct_for_supply, CorrectionOptions, TieResolution};
pub use depth::{
    default_catalog, discrete_depth_levels, pack_depth_layers, pack_parts, used_parts, DepthError,
    OccupancyGrid, PartSize, PlacementMatrix,
};
pub use dither::{diffuse_error, dynamic_dither, DitherMode, DitherOptions, Kernel};
pub use metric::{
    ciede2000, din99o, Ciede2000Weights, ColorDistance, ColorMetric, Din99oWeights, Metric,
    WithOpacity,
};
pub use output::Mosaic;
pub use palette::{ColorCounts, Palette, PaletteError, ParseColorError};
pub use preprocess::{
    adjust_hsv, resize_with_pooling, PoolingMode, PreprocessOptions, Preprocessor, MAX_CONTRAST,
};
pub use quantize::{align_to_palette, average_quantization_error, usage_map};
