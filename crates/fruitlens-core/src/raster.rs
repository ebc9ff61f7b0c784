//! Cropping an encoded image into a new JPEG.

use std::io::Cursor;

use image::ImageEncoder;

use crate::crop::{CropRegion, Dimensions, to_pixel_rect};

/// JPEG quality for cropped uploads (browsers default to 0.92 for
/// `canvas.toBlob("image/jpeg")`).
pub const JPEG_QUALITY: u8 = 92;

/// Errors that can occur while cropping.
#[derive(Debug, thiserror::Error)]
pub enum RasterError {
    /// The source bytes are not a decodable image.
    #[error("image decode failed: {0}")]
    Decode(String),

    /// JPEG encoding failed.
    #[error("JPEG encoding failed: {0}")]
    Encode(String),

    /// The region covers no pixels once clamped to the image.
    #[error("crop region is empty")]
    EmptyRegion,
}

/// Natural size of an encoded image, read from its header.
///
/// # Errors
///
/// Returns [`RasterError::Decode`] if the format is unrecognized or the
/// header is corrupt.
pub fn dimensions(bytes: &[u8]) -> Result<Dimensions, RasterError> {
    let (width, height) = image::ImageReader::new(Cursor::new(bytes))
        .with_guessed_format()
        .map_err(|e| RasterError::Decode(e.to_string()))?
        .into_dimensions()
        .map_err(|e| RasterError::Decode(e.to_string()))?;
    Ok(Dimensions { width, height })
}

/// Cut `region` out of the encoded image and re-encode it as JPEG.
///
/// Percent regions are resolved against the decoded image's natural
/// size. Transparency is dropped.
///
/// # Errors
///
/// Returns [`RasterError::Decode`] if `bytes` cannot be decoded,
/// [`RasterError::EmptyRegion`] if nothing is left after clamping, and
/// [`RasterError::Encode`] if JPEG encoding fails.
pub fn crop_to_jpeg(bytes: &[u8], region: &CropRegion) -> Result<Vec<u8>, RasterError> {
    let img = image::load_from_memory(bytes).map_err(|e| RasterError::Decode(e.to_string()))?;
    let bounds = Dimensions {
        width: img.width(),
        height: img.height(),
    };
    let rect = to_pixel_rect(region, f64::from(bounds.width), f64::from(bounds.height));
    let (x, y, w, h) = rect.snap(bounds);
    if w == 0 || h == 0 {
        return Err(RasterError::EmptyRegion);
    }
    tracing::debug!(x, y, w, h, ?bounds, "cropping image");

    let rgb = img.crop_imm(x, y, w, h).to_rgb8();

    let mut jpeg = Vec::new();
    let encoder = image::codecs::jpeg::JpegEncoder::new_with_quality(&mut jpeg, JPEG_QUALITY);
    encoder
        .write_image(rgb.as_raw(), w, h, image::ExtendedColorType::Rgb8)
        .map_err(|e| RasterError::Encode(e.to_string()))?;
    Ok(jpeg)
}
