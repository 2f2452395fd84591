//! Image decoding into an RGBA pixel grid.
//!
//! Accepts raw image bytes (PNG, BMP, GIF, WebP) and produces an 8-bit
//! RGBA image. Palette, grayscale and RGB sources are expanded so every
//! pixel carries an explicit alpha channel.
//!
//! This is the first step in the pipeline: raw bytes in, `RgbaImage` out.

use image::RgbaImage;

use crate::types::TraceError;

/// Decode raw image bytes into an RGBA grid.
///
/// # Errors
///
/// Returns [`TraceError::EmptyInput`] if `bytes` is empty.
/// Returns [`TraceError::ImageDecode`] if the image format is
/// unrecognized or the data is corrupt.
pub fn decode_rgba(bytes: &[u8]) -> Result<RgbaImage, TraceError> {
    if bytes.is_empty() {
        return Err(TraceError::EmptyInput);
    }

    let img = image::load_from_memory(bytes)?;
    Ok(img.to_rgba8())
}
