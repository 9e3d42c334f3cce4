//! Image capture and validation
//!
//! A photo is accepted only if it decodes. JPEG, PNG and WebP are sent
//! untouched; anything else the decoder understands is re-encoded as PNG.

use arviointi_types::{CapturedImage, Error, Result};
use image::ImageFormat;
use std::io::Cursor;
use std::path::Path;
use tracing::debug;

/// Supported image extensions
const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "webp", "gif", "bmp"];

/// Check if a path is a supported image file
pub fn is_supported_image(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| IMAGE_EXTENSIONS.contains(&ext.to_lowercase().as_str()))
        .unwrap_or(false)
}

/// Load and validate a photo from disk
pub fn load_image(path: &Path) -> Result<CapturedImage> {
    if !path.exists() {
        return Err(Error::FileNotFound(path.display().to_string()));
    }

    if !path.is_file() {
        return Err(Error::InvalidImageFormat(format!(
            "{} is not a file",
            path.display()
        )));
    }

    if !is_supported_image(path) {
        return Err(Error::InvalidImageFormat(format!(
            "Unsupported image format: {}",
            path.display()
        )));
    }

    let bytes = std::fs::read(path)?;
    capture_from_bytes(bytes)
}

/// Validate encoded bytes and prepare them for upload
pub fn capture_from_bytes(bytes: Vec<u8>) -> Result<CapturedImage> {
    let format = image::guess_format(&bytes)?;
    let decoded = image::load_from_memory_with_format(&bytes, format)?;
    let (width, height) = (decoded.width(), decoded.height());

    let (bytes, mime_type) = match format {
        ImageFormat::Jpeg => (bytes, "image/jpeg"),
        ImageFormat::Png => (bytes, "image/png"),
        ImageFormat::WebP => (bytes, "image/webp"),
        other => {
            debug!(?other, "Re-encoding image as PNG");
            let mut out = Cursor::new(Vec::new());
            decoded.write_to(&mut out, ImageFormat::Png)?;
            (out.into_inner(), "image/png")
        }
    };

    Ok(CapturedImage {
        bytes,
        mime_type: mime_type.to_string(),
        width,
        height,
    })
}
