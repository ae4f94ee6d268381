//! HarfBuzz shaping backend for rastext
//!
//! HarfBuzz is given a scale of `size * 64`, so every advance and offset it
//! reports is already in 26.6 fixed-point pixels. Those values pass through
//! untouched; the core pipeline is the only place that divides by 64.

use std::str::FromStr;
use std::sync::Arc;

use harfbuzz_rs::{Direction as HbDirection, Face, Feature, Font as HbFont, Tag, UnicodeBuffer};

use rastext_core::{
    error::Result,
    traits::{FontRef, Shaper},
    types::{Direction, LineMetrics, PositionedGlyph, ShapedRun},
    ShapeOptions,
};

/// HarfBuzz shaping backend
pub struct HarfBuzzShaper;

impl HarfBuzzShaper {
    /// Create a new HarfBuzz shaper
    pub fn new() -> Self {
        Self
    }

    fn to_hb_direction(dir: Direction) -> HbDirection {
        match dir {
            Direction::LeftToRight => HbDirection::Ltr,
            Direction::RightToLeft => HbDirection::Rtl,
        }
    }

    /// Line metrics in 26.6, from the font's horizontal extents
    ///
    /// When a font carries no usable extents, fall back to proportions of
    /// the requested size (1.2 line, 0.2 descender) so the estimator still
    /// has something to work with.
    fn line_metrics(hb_font: &HbFont, size: f32) -> LineMetrics {
        match hb_font.get_font_h_extents() {
            Some(extents) => LineMetrics {
                height: extents.ascender - extents.descender + extents.line_gap,
                descender: extents.descender,
            },
            None => {
                log::debug!("font reports no h-extents, deriving metrics from size {size}");
                LineMetrics {
                    height: (size * 1.2 * 64.0) as i32,
                    descender: -(size * 0.2 * 64.0) as i32,
                }
            }
        }
    }
}

impl Default for HarfBuzzShaper {
    fn default() -> Self {
        Self::new()
    }
}

fn four_char_tag(s: &str) -> Option<Tag> {
    if s.len() != 4 {
        return None;
    }
    let bytes = s.as_bytes();
    Some(Tag::new(
        bytes[0] as char,
        bytes[1] as char,
        bytes[2] as char,
        bytes[3] as char,
    ))
}

impl Shaper for HarfBuzzShaper {
    fn name(&self) -> &'static str {
        "harfbuzz"
    }

    fn shape(
        &self,
        text: &str,
        font: Arc<dyn FontRef>,
        options: &ShapeOptions,
    ) -> Result<ShapedRun> {
        let face = Face::from_bytes(font.data(), font.face_index());
        let mut hb_font = HbFont::new(face);

        // 64 units per pixel puts all reported metrics in 26.6
        let scale = (options.size * 64.0) as i32;
        hb_font.set_scale(scale, scale);

        let metrics = Self::line_metrics(&hb_font, options.size);

        // Empty input is a valid, empty run; the metrics still matter for
        // sizing the (degenerate) canvas
        if text.is_empty() {
            return Ok(ShapedRun {
                glyphs: Vec::new(),
                metrics,
                direction: options.direction,
            });
        }

        let mut buffer = UnicodeBuffer::new()
            .add_str(text)
            .set_direction(Self::to_hb_direction(options.direction));

        if let Some(ref lang) = options.language {
            if let Ok(language) = harfbuzz_rs::Language::from_str(lang) {
                buffer = buffer.set_language(language);
            }
        }

        if let Some(ref script) = options.script {
            if let Some(tag) = four_char_tag(script) {
                buffer = buffer.set_script(tag);
            }
        }

        let features: Vec<Feature> = options
            .features
            .iter()
            .filter_map(|(name, value)| {
                four_char_tag(name).map(|tag| Feature::new(tag, *value, 0..text.len()))
            })
            .collect();

        let output = harfbuzz_rs::shape(&hb_font, buffer, &features);
        let infos = output.get_glyph_infos();
        let positions = output.get_glyph_positions();

        let glyphs: Vec<PositionedGlyph> = infos
            .iter()
            .zip(positions.iter())
            .map(|(info, pos)| PositionedGlyph {
                id: info.codepoint,
                cluster: info.cluster,
                x_advance: pos.x_advance,
                y_advance: pos.y_advance,
                x_offset: pos.x_offset,
                y_offset: pos.y_offset,
            })
            .collect();

        log::debug!("shaped {} chars into {} glyphs", text.chars().count(), glyphs.len());
        for glyph in &glyphs {
            log::trace!(
                "glyph {} cluster {} advance ({}, {}) offset ({}, {})",
                glyph.id,
                glyph.cluster,
                glyph.x_advance,
                glyph.y_advance,
                glyph.x_offset,
                glyph.y_offset
            );
        }

        Ok(ShapedRun {
            glyphs,
            metrics,
            direction: options.direction,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rastext_fontdb::Font;

    fn system_font() -> Option<Arc<dyn FontRef>> {
        let candidates = [
            "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
            "/usr/share/fonts/liberation/LiberationSans-Regular.ttf",
            "/System/Library/Fonts/Helvetica.ttc",
        ];
        candidates
            .iter()
            .find(|p| std::path::Path::new(p).exists())
            .and_then(|p| Font::from_file(p).ok())
            .map(|f| Arc::new(f) as Arc<dyn FontRef>)
    }

    #[test]
    fn empty_text_yields_empty_run_with_metrics() {
        let Some(font) = system_font() else { return };
        let shaper = HarfBuzzShaper::new();
        let run = shaper.shape("", font, &ShapeOptions::default()).unwrap();

        assert!(run.glyphs.is_empty());
        assert_eq!(run.total_advance(), 0);
        assert!(run.metrics.height > 0);
        assert!(run.metrics.descender < 0);
    }

    #[test]
    fn advances_scale_with_size() {
        let Some(font) = system_font() else { return };
        let shaper = HarfBuzzShaper::new();

        let small = shaper
            .shape(
                "Hello",
                font.clone(),
                &ShapeOptions {
                    size: 16.0,
                    ..Default::default()
                },
            )
            .unwrap();
        let large = shaper
            .shape(
                "Hello",
                font,
                &ShapeOptions {
                    size: 32.0,
                    ..Default::default()
                },
            )
            .unwrap();

        assert_eq!(small.glyphs.len(), 5);
        assert_eq!(large.glyphs.len(), 5);
        // Doubling the size should roughly double the advance sum
        let ratio = large.total_advance() as f64 / small.total_advance() as f64;
        assert!((ratio - 2.0).abs() < 0.1, "ratio was {ratio}");
    }

    #[test]
    fn metrics_are_fixed_point_pixels() {
        let Some(font) = system_font() else { return };
        let shaper = HarfBuzzShaper::new();
        let run = shaper
            .shape(
                "x",
                font,
                &ShapeOptions {
                    size: 20.0,
                    ..Default::default()
                },
            )
            .unwrap();

        // A 20px font's line height lands somewhere near 20-30px in 26.6
        let height_px = run.metrics.height >> 6;
        assert!((15..=40).contains(&height_px), "height was {height_px}px");
    }

    #[test]
    fn clusters_point_back_into_the_text() {
        let Some(font) = system_font() else { return };
        let shaper = HarfBuzzShaper::new();
        let run = shaper.shape("ab", font, &ShapeOptions::default()).unwrap();

        assert_eq!(run.glyphs.len(), 2);
        assert_eq!(run.glyphs[0].cluster, 0);
        assert_eq!(run.glyphs[1].cluster, 1);
    }

    #[test]
    fn ligature_feature_passes_through() {
        let Some(font) = system_font() else { return };
        let shaper = HarfBuzzShaper::new();
        let options = ShapeOptions {
            features: vec![("liga".to_string(), 1)],
            ..Default::default()
        };
        // Whether "fi" ligates depends on the font; shaping must not fail
        let run = shaper.shape("fi", font, &options).unwrap();
        assert!(!run.glyphs.is_empty());
    }
}
