//! Zeno glyph rasterizer for rastext
//!
//! Pure Rust from outline to coverage: skrifa extracts the glyph outline,
//! kurbo measures its exact bounds, and zeno rasterizes it into an 8-bit
//! antialiased mask. One glyph per call, default grayscale mode only; no
//! color tables, no subpixel positioning.

use kurbo::Shape;
use skrifa::MetadataProvider;
use std::sync::Arc;

use rastext_core::{
    error::GlyphRenderError,
    traits::{FontRef, GlyphRasterizer},
    types::{GlyphBitmap, GlyphId},
};

/// Rasterizes glyph outlines into coverage bitmaps with zeno
pub struct ZenoRasterizer;

impl ZenoRasterizer {
    pub fn new() -> Self {
        Self
    }
}

impl Default for ZenoRasterizer {
    fn default() -> Self {
        Self::new()
    }
}

impl GlyphRasterizer for ZenoRasterizer {
    fn name(&self) -> &'static str {
        "zeno"
    }

    fn rasterize(
        &self,
        font: &Arc<dyn FontRef>,
        glyph: GlyphId,
        size: f32,
    ) -> Result<GlyphBitmap, GlyphRenderError> {
        use zeno::Mask;

        let font_ref = skrifa::FontRef::from_index(font.data(), font.face_index())
            .map_err(|_| GlyphRenderError::InvalidFont)?;

        let outlines = font_ref.outline_glyphs();
        let glyph_id = skrifa::GlyphId::new(glyph);
        let outline = outlines
            .get(glyph_id)
            .ok_or(GlyphRenderError::GlyphNotFound(glyph))?;

        // Build the path in two forms at once: an SVG string for zeno's
        // rasterizer and a kurbo path for exact bounds
        let mut builder = MaskPathBuilder::new();
        let location = skrifa::instance::Location::default();
        let settings = skrifa::outline::DrawSettings::unhinted(
            skrifa::instance::Size::new(size),
            location.coords(),
        );
        outline
            .draw(settings, &mut builder)
            .map_err(|_| GlyphRenderError::OutlineExtraction(glyph))?;

        let (path_data, kurbo_path) = builder.finish();
        let bbox = kurbo_path.bounding_box();

        // Blank glyphs like spaces have no segments and infinite bounds
        if !bbox.x0.is_finite()
            || !bbox.y0.is_finite()
            || !bbox.x1.is_finite()
            || !bbox.y1.is_finite()
        {
            return Ok(GlyphBitmap::empty());
        }

        let min_x = bbox.x0 as f32;
        let min_y = bbox.y0 as f32;
        let max_x = bbox.x1 as f32;
        let max_y = bbox.y1 as f32;

        // Degenerate outlines (pure vertical/horizontal hairlines) cover
        // no area; treat them like blanks rather than erroring
        if max_x - min_x == 0.0 || max_y - min_y == 0.0 {
            return Ok(GlyphBitmap::empty());
        }

        let width = ((max_x - min_x).ceil() as u32).max(1);
        let height = ((max_y - min_y).ceil() as u32).max(1);

        let mut coverage = vec![0u8; (width * height) as usize];
        let _placement = Mask::new(path_data.as_str())
            .size(width, height)
            .offset((-min_x as i32, -min_y as i32))
            .render_into(&mut coverage, None);

        // Font coordinates are y-up, bitmaps are y-down: flip the rows
        for y in 0..(height / 2) {
            let top_row = y as usize * width as usize;
            let bottom_row = (height - 1 - y) as usize * width as usize;
            for x in 0..width as usize {
                coverage.swap(top_row + x, bottom_row + x);
            }
        }

        log::debug!(
            "rasterized glyph {glyph}: {width}x{height} at bearing ({}, {})",
            min_x as i32,
            max_y as i32
        );

        Ok(GlyphBitmap {
            width,
            height,
            coverage,
            left: min_x as i32,
            // Distance from the baseline up to the bitmap's top edge
            top: max_y as i32,
        })
    }
}

/// Dual-output path builder feeding zeno and kurbo from one outline walk
struct MaskPathBuilder {
    commands: Vec<String>,
    kurbo_path: kurbo::BezPath,
}

impl MaskPathBuilder {
    fn new() -> Self {
        Self {
            commands: Vec::new(),
            kurbo_path: kurbo::BezPath::new(),
        }
    }

    fn finish(self) -> (String, kurbo::BezPath) {
        (self.commands.join(" "), self.kurbo_path)
    }
}

impl skrifa::outline::OutlinePen for MaskPathBuilder {
    fn move_to(&mut self, x: f32, y: f32) {
        self.commands.push(format!("M {:.2},{:.2}", x, y));
        self.kurbo_path.move_to((x as f64, y as f64));
    }

    fn line_to(&mut self, x: f32, y: f32) {
        self.commands.push(format!("L {:.2},{:.2}", x, y));
        self.kurbo_path.line_to((x as f64, y as f64));
    }

    fn quad_to(&mut self, cx: f32, cy: f32, x: f32, y: f32) {
        self.commands
            .push(format!("Q {:.2},{:.2} {:.2},{:.2}", cx, cy, x, y));
        self.kurbo_path
            .quad_to((cx as f64, cy as f64), (x as f64, y as f64));
    }

    fn curve_to(&mut self, cx0: f32, cy0: f32, cx1: f32, cy1: f32, x: f32, y: f32) {
        self.commands.push(format!(
            "C {:.2},{:.2} {:.2},{:.2} {:.2},{:.2}",
            cx0, cy0, cx1, cy1, x, y
        ));
        self.kurbo_path.curve_to(
            (cx0 as f64, cy0 as f64),
            (cx1 as f64, cy1 as f64),
            (x as f64, y as f64),
        );
    }

    fn close(&mut self) {
        self.commands.push("Z".to_string());
        self.kurbo_path.close_path();
    }
}
