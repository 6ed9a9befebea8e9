//! PNG decoding and encoding for pixel buffers.

use std::path::Path;

use crate::error::{Result, TilepadError};
use crate::types::PixelBuffer;

/// Decode an image file into an RGBA8 buffer.
///
/// Any format the `image` crate can open is accepted; the buffer is always
/// converted to RGBA8.
pub fn read_png(path: &Path) -> Result<PixelBuffer> {
    let img = image::open(path)
        .map_err(|e| TilepadError::Io {
            path: path.to_path_buf(),
            message: format!("Failed to load image: {}", e),
        })?
        .to_rgba8();

    Ok(PixelBuffer::from(&img))
}

/// Encode a buffer as a PNG file.
pub fn write_png(buffer: &PixelBuffer, path: &Path) -> Result<()> {
    buffer
        .to_rgba_image()
        .save_with_format(path, image::ImageFormat::Png)
        .map_err(|e| TilepadError::Io {
            path: path.to_path_buf(),
            message: format!("Failed to write PNG: {}", e),
        })
}
