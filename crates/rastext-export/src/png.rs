//! PNG export
//!
//! Serializes the finished canvas as an 8-bit-per-channel RGBA PNG with
//! straight (non-premultiplied) alpha.

use image::{ImageBuffer, ImageEncoder, RgbaImage};
use rastext_core::{
    error::{ExportError, Result},
    traits::Exporter,
    Canvas,
};

/// Encode a canvas to PNG bytes
///
/// Validates the buffer length against the declared dimensions before
/// touching the encoder; a short buffer is an encoding error, never a
/// panic.
pub fn encode_canvas_to_png(canvas: &Canvas) -> Result<Vec<u8>> {
    let expected = canvas.width() as usize * canvas.height() as usize * 4;
    if canvas.pixels().len() < expected {
        return Err(ExportError::EncodingFailed(format!(
            "buffer too small: expected {} bytes for {}x{} RGBA, got {}",
            expected,
            canvas.width(),
            canvas.height(),
            canvas.pixels().len()
        ))
        .into());
    }

    let img: RgbaImage =
        ImageBuffer::from_raw(canvas.width(), canvas.height(), canvas.pixels().to_vec())
            .ok_or_else(|| {
                ExportError::EncodingFailed("failed to create image buffer from canvas".into())
            })?;

    let mut png_data = Vec::new();
    let encoder = image::codecs::png::PngEncoder::new_with_quality(
        &mut png_data,
        image::codecs::png::CompressionType::Default,
        image::codecs::png::FilterType::Sub,
    );
    encoder
        .write_image(
            img.as_raw(),
            canvas.width(),
            canvas.height(),
            image::ExtendedColorType::Rgba8,
        )
        .map_err(|e| ExportError::EncodingFailed(format!("PNG encoding failed: {e}")))?;

    Ok(png_data)
}

/// PNG exporter for finished canvases
pub struct PngExporter;

impl PngExporter {
    pub fn new() -> Self {
        Self
    }
}

impl Default for PngExporter {
    fn default() -> Self {
        Self::new()
    }
}

impl Exporter for PngExporter {
    fn name(&self) -> &'static str {
        "png"
    }

    fn export(&self, canvas: &Canvas) -> Result<Vec<u8>> {
        encode_canvas_to_png(canvas)
    }

    fn extension(&self) -> &'static str {
        "png"
    }

    fn mime_type(&self) -> &'static str {
        "image/png"
    }
}
