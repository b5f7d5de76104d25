pub mod mosaic_pipeline;

pub use mosaic_pipeline::{
    DepthReport, DepthResult, LayerReport, MosaicPipeline, PlacementReport, RenderReport,
    RenderResult,
};
