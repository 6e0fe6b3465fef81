//! Export module for RegionShot
//!
//! Writes captured images to the path the user picked.

mod still;

pub use still::ImageExporter;

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ExportError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),

    #[error("Unsupported image format: {}", .0.display())]
    UnsupportedFormat(PathBuf),
}

pub type ExportResult<T> = Result<T, ExportError>;

/// Export configuration
#[derive(Debug, Clone)]
pub struct ExportConfig {
    /// Extension appended when the chosen path has none
    pub default_extension: String,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            default_extension: "png".to_string(),
        }
    }
}
