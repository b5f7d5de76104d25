use std::path::Path;

use serde::{Deserialize, Serialize};
use stud_quant::depth::{catalog_without, DEFAULT_DISABLED};
use stud_quant::{
    ColorMetric, DitherMode, MosaicBuilder, Palette, PaletteError, PartSize, PoolingMode,
    PreprocessOptions, TieResolution, MAX_CONTRAST,
};

use crate::error::AppError;

/// Mosaic configuration loaded from a YAML file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MosaicConfig {
    /// Available stud colors
    pub palette: Vec<PaletteEntry>,

    /// Color distance metric
    pub metric: ColorMetric,

    /// Dithering settings
    pub dither: DitherConfig,

    /// Quantize against the palette as seen over a dark backing panel
    pub bleed_through: bool,

    /// Target size in studs (None = keep the input size)
    pub resolution: Option<Resolution>,

    /// Color adjustments applied after resizing
    pub preprocess: PreprocessConfig,

    /// Depth plate settings
    pub depth: DepthConfig,
}

/// One palette color
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaletteEntry {
    /// `#rrggbb` or `#rgb`
    pub hex: String,

    /// Studs available (absent = unlimited)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub count: Option<u32>,
}

/// Dithering mode and its parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DitherConfig {
    pub mode: DitherMode,
    pub tie_resolution: TieResolution,
    #[serde(default = "default_grouping_factor")]
    pub grouping_factor: usize,
    pub assume_infinite_supply: bool,
    pub skip_dithering: bool,
}

fn default_grouping_factor() -> usize {
    1
}

impl Default for DitherConfig {
    fn default() -> Self {
        Self {
            mode: DitherMode::default(),
            tie_resolution: TieResolution::default(),
            grouping_factor: default_grouping_factor(),
            assume_infinite_supply: false,
            skip_dithering: false,
        }
    }
}

/// Mosaic size in studs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resolution {
    pub width: usize,
    pub height: usize,
}

/// Color adjustments
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PreprocessConfig {
    pub pooling: PoolingMode,
    pub hue: f64,
    pub saturation: f64,
    pub value: f64,
    pub brightness: f64,
    pub contrast: f64,
}

/// Depth plate settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DepthConfig {
    /// Ascending grey thresholds; `n` thresholds give `n + 1` levels
    #[serde(default = "default_thresholds")]
    pub thresholds: Vec<u8>,

    /// Plates may not cross multiples of this many studs
    pub boundary: Option<usize>,

    /// Part labels left out of the catalog, e.g. `"4 X 10"`
    #[serde(default = "default_disabled_parts")]
    pub disabled_parts: Vec<String>,
}

fn default_thresholds() -> Vec<u8> {
    vec![64, 128, 192]
}

fn default_disabled_parts() -> Vec<String> {
    DEFAULT_DISABLED.iter().map(|s| s.to_string()).collect()
}

impl Default for DepthConfig {
    fn default() -> Self {
        Self {
            thresholds: default_thresholds(),
            boundary: None,
            disabled_parts: default_disabled_parts(),
        }
    }
}

impl DepthConfig {
    /// Number of discrete levels the thresholds produce
    pub fn num_levels(&self) -> u8 {
        u8::try_from(self.thresholds.len() + 1).unwrap_or(u8::MAX)
    }

    /// Part catalog with the disabled labels removed
    pub fn catalog(&self) -> Vec<PartSize> {
        catalog_without(&self.disabled_parts)
    }
}

/// Palette used when the config does not list one
const DEFAULT_PALETTE: [&str; 8] = [
    "#000000", "#ffffff", "#9c9c9c", "#c91a09", "#0055bf", "#f2cd37", "#237841", "#582a12",
];

impl Default for MosaicConfig {
    fn default() -> Self {
        Self {
            palette: DEFAULT_PALETTE
                .iter()
                .map(|hex| PaletteEntry {
                    hex: hex.to_string(),
                    count: None,
                })
                .collect(),
            metric: ColorMetric::default(),
            dither: DitherConfig::default(),
            bleed_through: false,
            resolution: None,
            preprocess: PreprocessConfig::default(),
            depth: DepthConfig::default(),
        }
    }
}

impl MosaicConfig {
    /// Load and validate a YAML config file
    pub fn load(path: &Path) -> Result<Self, AppError> {
        let content = std::fs::read_to_string(path).map_err(|source| AppError::ReadFile {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_yaml(&content)?;
        tracing::info!(
            path = %path.display(),
            colors = config.palette.len(),
            metric = %config.metric,
            mode = %config.dither.mode,
            "Loaded configuration"
        );
        Ok(config)
    }

    /// Parse and validate YAML
    pub fn from_yaml(content: &str) -> Result<Self, AppError> {
        let config: Self = serde_yaml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), AppError> {
        if let Some(res) = self.resolution {
            if res.width == 0 || res.height == 0 {
                return Err(AppError::InvalidConfig(format!(
                    "resolution must be positive, got {}x{}",
                    res.width, res.height
                )));
            }
        }
        let contrast = self.preprocess.contrast;
        if !(-MAX_CONTRAST..=MAX_CONTRAST).contains(&contrast) {
            return Err(AppError::InvalidConfig(format!(
                "contrast must be within -{MAX_CONTRAST}..={MAX_CONTRAST}, got {contrast}"
            )));
        }
        if self.depth.thresholds.windows(2).any(|w| w[0] >= w[1]) {
            return Err(AppError::InvalidConfig(
                "depth thresholds must be strictly ascending".to_string(),
            ));
        }
        for label in &self.depth.disabled_parts {
            label.parse::<PartSize>().map_err(|e| AppError::InvalidConfig(e.to_string()))?;
        }
        Ok(())
    }

    /// Build the supply from the palette entries
    pub fn palette(&self) -> Result<Palette, PaletteError> {
        Palette::from_hex(self.palette.iter().map(|e| (e.hex.as_str(), e.count)))
    }

    /// Mosaic builder for the configured metric and dithering
    pub fn builder(&self) -> MosaicBuilder {
        MosaicBuilder::new()
            .metric(self.metric)
            .dither_mode(self.dither.mode)
            .tie_resolution(self.dither.tie_resolution)
            .grouping_factor(self.dither.grouping_factor)
            .assume_infinite_supply(self.dither.assume_infinite_supply)
            .skip_dithering(self.dither.skip_dithering)
            .bleed_through(self.bleed_through)
    }

    /// Preprocessing options for resizing and color adjustments
    pub fn preprocess_options(&self) -> PreprocessOptions {
        let p = &self.preprocess;
        let mut options = PreprocessOptions::new()
            .pooling(p.pooling)
            .hue(p.hue)
            .saturation(p.saturation)
            .value(p.value)
            .brightness(p.brightness)
            .contrast(p.contrast);
        if let Some(res) = self.resolution {
            options = options.resize(res.width, res.height);
        }
        options
    }
}
