//! The data structures that flow between pipeline stages
//!
//! Positioning metrics are 26.6 fixed-point throughout: 6 fractional bits,
//! divide by 64 to get pixels. Bearings on [`GlyphBitmap`] are already
//! integer pixels because they come from a rasterized bitmap.

/// Unique identifier for a glyph within a font
pub type GlyphId = u32;

/// Which way the text flows
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    LeftToRight,
    RightToLeft,
}

/// One shaped glyph with its positioning metrics
///
/// Offsets displace only this glyph's placement; advances move the pen for
/// everything that follows. The `cluster` index points back into the source
/// text and is informational only.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PositionedGlyph {
    pub id: GlyphId,
    pub cluster: u32,
    /// Pen displacement after this glyph, 26.6
    pub x_advance: i32,
    /// Vertical pen displacement, 26.6; carried but unused in horizontal layout
    pub y_advance: i32,
    /// Placement-only horizontal displacement, 26.6
    pub x_offset: i32,
    /// Placement-only vertical displacement, 26.6
    pub y_offset: i32,
}

/// Vertical font metrics scaled to the requested size, 26.6
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineMetrics {
    /// Nominal line height (ascent + descent + gap)
    pub height: i32,
    /// Descender; negative when it extends below the baseline
    pub descender: i32,
}

/// What emerges after shaping: an ordered glyph sequence plus the metrics
/// needed to size a canvas for it. Immutable once produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShapedRun {
    pub glyphs: Vec<PositionedGlyph>,
    pub metrics: LineMetrics,
    pub direction: Direction,
}

impl ShapedRun {
    /// Sum of horizontal advances across the run, 26.6
    pub fn total_advance(&self) -> i64 {
        self.glyphs.iter().map(|g| i64::from(g.x_advance)).sum()
    }
}

/// An antialiased coverage bitmap for a single glyph
///
/// One byte per pixel, row-major, 0 = transparent and 255 = fully covered.
/// `left` and `top` are the bearing: the offset from the glyph origin to the
/// bitmap's top-left corner, with `top` measured upward from the baseline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GlyphBitmap {
    pub width: u32,
    pub height: u32,
    pub coverage: Vec<u8>,
    pub left: i32,
    pub top: i32,
}

impl GlyphBitmap {
    /// A zero-area bitmap, used for blank glyphs such as spaces
    pub fn empty() -> Self {
        Self {
            width: 0,
            height: 0,
            coverage: Vec::new(),
            left: 0,
            top: 0,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }
}
