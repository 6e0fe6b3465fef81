//! Single image export

use crate::{ExportConfig, ExportError, ExportResult};
use image::{DynamicImage, ImageFormat, RgbaImage};
use std::path::{Path, PathBuf};

/// Still image exporter
#[derive(Debug, Clone, Default)]
pub struct ImageExporter {
    config: ExportConfig,
}

impl ImageExporter {
    pub fn new(config: ExportConfig) -> Self {
        Self { config }
    }

    /// Path the image will actually be written to
    pub fn resolve_path(&self, path: &Path) -> PathBuf {
        if path.extension().is_some() {
            path.to_path_buf()
        } else {
            path.with_extension(&self.config.default_extension)
        }
    }

    /// Encode `image` in the format implied by the path's extension
    pub fn save(&self, image: RgbaImage, path: &Path) -> ExportResult<PathBuf> {
        let path = self.resolve_path(path);
        let format = ImageFormat::from_path(&path)
            .map_err(|_| ExportError::UnsupportedFormat(path.clone()))?;
        if !format.can_write() {
            return Err(ExportError::UnsupportedFormat(path));
        }

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }

        let image = DynamicImage::ImageRgba8(image);
        if keeps_alpha(format) {
            image.save_with_format(&path, format)?;
        } else {
            image.to_rgb8().save_with_format(&path, format)?;
        }

        log::info!("Wrote {} ({:?})", path.display(), format);
        Ok(path)
    }
}

fn keeps_alpha(format: ImageFormat) -> bool {
    !matches!(format, ImageFormat::Jpeg | ImageFormat::Pnm)
}
