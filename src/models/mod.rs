pub mod config;

pub use config::{
    DepthConfig, DitherConfig, MosaicConfig, PaletteEntry, PreprocessConfig, Resolution,
};
