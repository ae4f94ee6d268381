//! Glyph compositing: the run meets the canvas
//!
//! Walks a shaped run in order, rasterizing each glyph and merging its
//! coverage onto the canvas at the pen-derived placement. The max-alpha
//! merge rule is commutative, so traversal order never changes the final
//! pixels; iteration order here is just the run's natural order.

use std::sync::Arc;

use crate::canvas::Canvas;
use crate::error::Result;
use crate::estimate::estimate;
use crate::pen::Pen;
use crate::traits::{FontRef, GlyphRasterizer};
use crate::types::ShapedRun;
use crate::Color;

/// Composite a shaped run into a freshly allocated canvas
///
/// Sizes the canvas first (a [`crate::error::LayoutError`] aborts before
/// any allocation), then rasterizes and merges glyph by glyph. A glyph the
/// backend cannot render is logged and skipped; its advance still moves
/// the pen so the rest of the run keeps its place.
pub fn compose(
    run: &ShapedRun,
    font: &Arc<dyn FontRef>,
    rasterizer: &dyn GlyphRasterizer,
    size: f32,
    foreground: Color,
) -> Result<Canvas> {
    let est = estimate(run)?;
    log::debug!(
        "canvas {}x{}, baseline {} (26.6), {} glyphs",
        est.width,
        est.height,
        est.baseline,
        run.glyphs.len()
    );

    let mut canvas = Canvas::new(est.width, est.height, foreground);
    let mut pen = Pen::new(est.baseline);

    for glyph in &run.glyphs {
        match rasterizer.rasterize(font, glyph.id, size) {
            Ok(bitmap) if !bitmap.is_empty() => {
                let (px, py) = pen.placement(&bitmap, glyph);
                log::trace!("glyph {} at ({px}, {py})", glyph.id);
                canvas.blit_max(&bitmap, px, py);
            }
            Ok(_) => {} // blank glyph, e.g. a space
            Err(err) => {
                log::warn!("skipping unrenderable glyph {}: {err}", glyph.id);
            }
        }
        pen.advance(glyph);
    }

    Ok(canvas)
}
