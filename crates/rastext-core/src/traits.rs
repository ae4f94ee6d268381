//! The contracts that bind the backends together
//!
//! Four seams, one pipeline. A shaper turns text into a glyph run, a
//! rasterizer turns each glyph into coverage, an exporter turns the
//! finished canvas into bytes, and `FontRef` is the font data everything
//! agrees on. Swap any implementation without touching the others.

use crate::canvas::Canvas;
use crate::error::{GlyphRenderError, Result};
use crate::types::{GlyphBitmap, GlyphId, ShapedRun};
use crate::ShapeOptions;
use std::sync::Arc;

/// A loaded font the whole pipeline shares
///
/// The shaper and the rasterizer must see the same instance: a glyph id
/// resolved against one font and rendered against another is a caller
/// error this crate does not detect.
pub trait FontRef: Send + Sync {
    /// Raw font bytes as they live in the file
    fn data(&self) -> &[u8];

    /// Face index within a TTC/OTC collection, 0 for single fonts
    fn face_index(&self) -> u32 {
        0
    }

    /// The font's internal coordinate grid (1000 for CFF, often 2048 for TrueType)
    fn units_per_em(&self) -> u16;

    /// Find the glyph that represents this character
    fn glyph_id(&self, ch: char) -> Option<GlyphId>;

    /// How many glyphs this font contains
    fn glyph_count(&self) -> Option<u32> {
        None
    }
}

/// Where characters become positioned glyphs
pub trait Shaper: Send + Sync {
    /// Identify yourself in logs and error messages
    fn name(&self) -> &'static str;

    /// Shape text into a glyph run with 26.6 metrics
    ///
    /// Empty or unshapeable input yields an empty run with valid line
    /// metrics; it is not an error.
    fn shape(
        &self,
        text: &str,
        font: Arc<dyn FontRef>,
        options: &ShapeOptions,
    ) -> Result<ShapedRun>;
}

/// Where a single glyph becomes a coverage bitmap
///
/// Rasterization is requested in default grayscale mode: no subpixel
/// positioning, no color tables. Failure is per-glyph; the compositor
/// recovers by skipping the glyph.
pub trait GlyphRasterizer: Send + Sync {
    fn name(&self) -> &'static str;

    /// Render one glyph at the given pixel size
    fn rasterize(
        &self,
        font: &Arc<dyn FontRef>,
        glyph: GlyphId,
        size: f32,
    ) -> std::result::Result<GlyphBitmap, GlyphRenderError>;
}

/// The final step: the canvas becomes an image stream
pub trait Exporter: Send + Sync {
    fn name(&self) -> &'static str;

    /// Encode the finished canvas as bytes, written once and in full
    fn export(&self, canvas: &Canvas) -> Result<Vec<u8>>;

    /// File extension for this format
    fn extension(&self) -> &'static str;

    /// MIME type for this format
    fn mime_type(&self) -> &'static str;
}
