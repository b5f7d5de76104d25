//! Test fixtures: configs, images and a scratch directory.

use std::path::{Path, PathBuf};

use stud_quant::{PixelBuffer, Rgb};
use studmosaic::rendering::encode_png;
use tempfile::TempDir;

pub const RED: Rgb = Rgb::new(255, 0, 0);
pub const GREEN: Rgb = Rgb::new(0, 255, 0);

/// Two reds and two greens, compared in plain RGB
pub const RED_GREEN_CONFIG: &str = r##"
palette:
  - hex: "#ff0000"
    count: 2
  - hex: "#00ff00"
    count: 2
metric: euclidean-rgb
dither:
  mode: none
"##;

/// Black and white only, with one stud of white
pub const SHORT_SUPPLY_CONFIG: &str = r##"
palette:
  - hex: "#000000"
  - hex: "#ffffff"
    count: 1
metric: euclidean-rgb
"##;

/// Single threshold, so one raised layer
pub const DEPTH_CONFIG: &str = r#"
depth:
  thresholds: [128]
"#;

/// Scratch directory that lives as long as the value
pub struct Workspace {
    dir: TempDir,
}

impl Workspace {
    pub fn new() -> Self {
        Self {
            dir: tempfile::tempdir().expect("Failed to create temp dir"),
        }
    }

    pub fn path(&self, name: &str) -> PathBuf {
        self.dir.path().join(name)
    }

    pub fn write(&self, name: &str, content: &str) -> PathBuf {
        let path = self.path(name);
        std::fs::write(&path, content).expect("Failed to write fixture");
        path
    }

    pub fn write_png(&self, name: &str, image: &PixelBuffer) -> PathBuf {
        let path = self.path(name);
        let bytes = encode_png(image, 1).expect("Failed to encode fixture");
        std::fs::write(&path, bytes).expect("Failed to write fixture");
        path
    }
}

/// The 2x2 image whose naive quantization overuses red
pub fn red_heavy_image() -> PixelBuffer {
    PixelBuffer::from_rgb(
        &[
            Rgb::new(250, 5, 5),
            Rgb::new(240, 20, 10),
            Rgb::new(150, 110, 0),
            Rgb::new(10, 240, 10),
        ],
        2,
    )
    .expect("valid fixture")
}

/// Flat grey image
pub fn grey_image(level: u8, width: usize, height: usize) -> PixelBuffer {
    PixelBuffer::filled(Rgb::new(level, level, level), width, height).expect("valid fixture")
}

pub fn read_json(path: &Path) -> serde_json::Value {
    let text = std::fs::read_to_string(path).expect("Failed to read report");
    serde_json::from_str(&text).expect("Report is not valid JSON")
}
