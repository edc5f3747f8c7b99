//! Image loading and grayscale conversion.
//!
//! Decodes an image file (PNG, JPEG, BMP, WebP) into the single-channel
//! buffer the pipeline consumes. The standard luminance formula is used
//! for RGB-to-gray conversion: `0.299*R + 0.587*G + 0.114*B`.

use std::path::Path;

use image::GrayImage;
use tracing::debug;

use crate::IoError;

/// Load an image file and convert it to 8-bit grayscale.
///
/// # Errors
///
/// Returns [`IoError::Io`] if the file cannot be read and
/// [`IoError::Image`] if its contents cannot be decoded.
pub fn load_grayscale(path: &Path) -> Result<GrayImage, IoError> {
    let bytes = std::fs::read(path)?;
    let img = image::load_from_memory(&bytes)?;
    let gray = img.to_luma8();
    debug!(
        path = %path.display(),
        width = gray.width(),
        height = gray.height(),
        "loaded grayscale image"
    );
    Ok(gray)
}
