use std::path::PathBuf;

use stud_quant::{BufferError, DepthError, MosaicError, PaletteError};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Failed to read {path}: {source}")]
    ReadFile {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to write {path}: {source}")]
    WriteFile {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Config parse error: {0}")]
    ConfigParse(#[from] serde_yaml::Error),

    #[error("Invalid config: {0}")]
    InvalidConfig(String),

    #[error("PNG decode error: {0}")]
    PngDecode(String),

    #[error("PNG encode error: {0}")]
    PngEncode(String),

    #[error("Report encode error: {0}")]
    Report(#[from] serde_json::Error),

    #[error("Mosaic error: {0}")]
    Mosaic(#[from] MosaicError),
}

impl From<BufferError> for AppError {
    fn from(e: BufferError) -> Self {
        AppError::Mosaic(e.into())
    }
}

impl From<PaletteError> for AppError {
    fn from(e: PaletteError) -> Self {
        AppError::Mosaic(e.into())
    }
}

impl From<DepthError> for AppError {
    fn from(e: DepthError) -> Self {
        AppError::Mosaic(e.into())
    }
}
