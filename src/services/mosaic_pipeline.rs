use std::collections::BTreeMap;

use rand::Rng;
use serde::Serialize;
use stud_quant::depth::scale_levels_for_display;
use stud_quant::{
    discrete_depth_levels, pack_depth_layers, resize_with_pooling, used_parts, ColorCounts,
    Metric, Mosaic, PixelBuffer, PlacementMatrix, Preprocessor, Rgb,
};

use crate::error::AppError;
use crate::models::MosaicConfig;

/// Result of rendering a mosaic
pub struct RenderResult {
    /// The quantized mosaic
    pub mosaic: Mosaic,
    /// Summary for the JSON report
    pub report: RenderReport,
}

/// JSON report written next to a rendered mosaic
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderReport {
    pub width: usize,
    pub height: usize,
    /// Studs used per color
    pub usage: BTreeMap<String, u32>,
    /// Studs needed beyond the configured supply
    pub missing: BTreeMap<String, u32>,
    /// Mean distance between the preprocessed image and the mosaic
    pub average_error: f64,
}

/// Result of packing a depth map
pub struct DepthResult {
    /// Discrete level per stud
    pub levels: PixelBuffer,
    /// Placements for layers `1..num_levels`
    pub layers: Vec<PlacementMatrix>,
    /// Summary for the JSON report
    pub report: DepthReport,
}

impl DepthResult {
    /// Levels stretched over the full grey range for previewing
    pub fn preview(&self) -> PixelBuffer {
        scale_levels_for_display(&self.levels, self.report.num_levels)
    }
}

/// JSON report for a depth map
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DepthReport {
    pub width: usize,
    pub height: usize,
    pub num_levels: u8,
    pub layers: Vec<LayerReport>,
    /// Plates used per part label over all layers
    pub parts: BTreeMap<String, u32>,
}

/// Plates placed on one depth layer
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LayerReport {
    pub level: u8,
    pub placements: Vec<PlacementReport>,
}

/// One plate, anchored at its top-left stud
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlacementReport {
    pub row: usize,
    pub col: usize,
    pub height: usize,
    pub width: usize,
    pub part: String,
}

/// Runs the configured preprocess → quantize → report steps
pub struct MosaicPipeline {
    config: MosaicConfig,
}

fn hex_keys(counts: impl IntoIterator<Item = (Rgb, u32)>) -> BTreeMap<String, u32> {
    counts.into_iter().map(|(color, n)| (color.to_hex(), n)).collect()
}

impl MosaicPipeline {
    pub fn new(config: MosaicConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &MosaicConfig {
        &self.config
    }

    /// Render `image` into a mosaic
    pub fn render<R>(&self, image: &PixelBuffer, rng: &mut R) -> Result<RenderResult, AppError>
    where
        R: Rng + ?Sized,
    {
        let palette = self.config.palette()?;
        let prepared = Preprocessor::new(self.config.preprocess_options()).process(image)?;
        tracing::debug!(
            width = prepared.width(),
            height = prepared.height(),
            "Preprocessed image"
        );

        let mosaic = self
            .config
            .builder()
            .run_with_rng(&prepared, &palette, rng)?;

        let metric = Metric::from(self.config.metric);
        let usage: &ColorCounts = mosaic.usage();
        let report = RenderReport {
            width: mosaic.width(),
            height: mosaic.height(),
            usage: hex_keys(usage.iter().map(|(&c, &n)| (c, n))),
            missing: hex_keys(mosaic.missing(&palette)),
            average_error: mosaic.average_error(&prepared, &metric)?,
        };

        if !report.missing.is_empty() {
            tracing::warn!(
                colors = report.missing.len(),
                studs = report.missing.values().map(|&n| n as u64).sum::<u64>(),
                "Supply is short for some colors"
            );
        }
        tracing::info!(
            width = report.width,
            height = report.height,
            colors = report.usage.len(),
            average_error = report.average_error,
            "Rendered mosaic"
        );

        Ok(RenderResult { mosaic, report })
    }

    /// Discretize a depth map and pack every raised layer with plates
    pub fn depth(&self, depth_map: &PixelBuffer) -> Result<DepthResult, AppError> {
        let depth = &self.config.depth;
        let resized = match self.config.resolution {
            Some(res) => resize_with_pooling(
                depth_map,
                res.width,
                res.height,
                self.config.preprocess.pooling,
            )?,
            None => depth_map.clone(),
        };

        let levels = discrete_depth_levels(&resized, &depth.thresholds)?;
        let num_levels = depth.num_levels();
        let layers = pack_depth_layers(&levels, num_levels, &depth.catalog(), depth.boundary)?;

        let report = DepthReport {
            width: levels.width(),
            height: levels.height(),
            num_levels,
            layers: layers
                .iter()
                .zip(1u8..)
                .map(|(layer, level)| LayerReport {
                    level,
                    placements: layer
                        .placements()
                        .map(|(row, col, part)| PlacementReport {
                            row,
                            col,
                            height: part.height,
                            width: part.width,
                            part: part.label(),
                        })
                        .collect(),
                })
                .collect(),
            parts: used_parts(&layers),
        };

        tracing::info!(
            width = report.width,
            height = report.height,
            layers = report.layers.len(),
            plates = report.parts.values().map(|&n| n as u64).sum::<u64>(),
            "Packed depth plates"
        );

        Ok(DepthResult {
            levels,
            layers,
            report,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{DepthConfig, PaletteEntry, Resolution};
    use rand::rngs::mock::StepRng;
    use stud_quant::DitherMode;

    fn config(entries: &[(&str, Option<u32>)]) -> MosaicConfig {
        MosaicConfig {
            palette: entries
                .iter()
                .map(|&(hex, count)| PaletteEntry {
                    hex: hex.to_string(),
                    count,
                })
                .collect(),
            ..Default::default()
        }
    }

    #[test]
    fn test_render_reports_usage_and_missing() {
        let pipeline = MosaicPipeline::new(config(&[("#000000", Some(1))]));
        let image = PixelBuffer::filled(Rgb::new(20, 20, 20), 3, 1).unwrap();
        let result = pipeline.render(&image, &mut StepRng::new(0, 0)).unwrap();

        assert_eq!(result.report.usage.get("#000000"), Some(&3));
        assert_eq!(result.report.missing.get("#000000"), Some(&2));
        assert!(result.report.average_error > 0.0);
    }

    #[test]
    fn test_render_resizes_to_resolution() {
        let mut cfg = config(&[("#ffffff", None), ("#000000", None)]);
        cfg.resolution = Some(Resolution { width: 2, height: 2 });
        cfg.dither.mode = DitherMode::FloydSteinberg;
        let image = PixelBuffer::filled(Rgb::new(250, 250, 250), 8, 6).unwrap();

        let result = MosaicPipeline::new(cfg)
            .render(&image, &mut StepRng::new(0, 0))
            .unwrap();
        assert_eq!((result.report.width, result.report.height), (2, 2));
        assert_eq!(result.report.usage.get("#ffffff"), Some(&4));
        assert!(result.report.missing.is_empty());
    }

    #[test]
    fn test_depth_report_layers() {
        let mut cfg = MosaicConfig::default();
        cfg.depth = DepthConfig {
            thresholds: vec![100],
            ..Default::default()
        };
        let depth = PixelBuffer::from_rgb(
            &[Rgb::new(0, 0, 0), Rgb::new(200, 200, 200), Rgb::new(200, 200, 200)],
            3,
        )
        .unwrap();

        let result = MosaicPipeline::new(cfg).depth(&depth).unwrap();
        assert_eq!(result.report.num_levels, 2);
        assert_eq!(result.layers.len(), 1);
        assert_eq!(result.report.layers[0].level, 1);
        assert_eq!(
            result.report.layers[0].placements,
            vec![PlacementReport {
                row: 0,
                col: 1,
                height: 1,
                width: 2,
                part: "1 X 2".to_string(),
            }]
        );
        assert_eq!(result.report.parts.get("1 X 2"), Some(&1));
        assert_eq!(result.preview().rgb(1), Rgb::new(255, 255, 255));
    }
}
