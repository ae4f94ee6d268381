//! Fixed-point pen tracking across a glyph run
//!
//! The pen is the running cursor along the baseline. It lives entirely in
//! 26.6 units; the divide-by-64 happens only when a pixel placement is
//! computed, so rounding never accumulates from one glyph to the next.

use crate::types::{GlyphBitmap, PositionedGlyph};

/// Running pen position, 26.6 fixed-point
///
/// `y` is the baseline measured from the top of the canvas, growing
/// downward. Scoped to a single run traversal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pen {
    pub x: i32,
    pub y: i32,
}

impl Pen {
    /// Start a traversal at the left edge with the given baseline (26.6)
    pub fn new(baseline: i32) -> Self {
        Self { x: 0, y: baseline }
    }

    /// Integer pixel placement for a glyph's bitmap
    ///
    /// The vertical term is inverted: `top` measures upward from the
    /// baseline while the canvas grows downward. `>> 6` is a floor
    /// division by 64, matching the fixed-point contract for negatives too.
    pub fn placement(&self, bitmap: &GlyphBitmap, glyph: &PositionedGlyph) -> (i32, i32) {
        let px = (self.x + (bitmap.left << 6) + glyph.x_offset) >> 6;
        let py = (self.y - (bitmap.top << 6) - glyph.y_offset) >> 6;
        (px, py)
    }

    /// Move the pen past a glyph
    ///
    /// Offsets never accumulate; only the advance does. `y_advance` is
    /// deliberately not applied: this is single-line horizontal layout.
    pub fn advance(&mut self, glyph: &PositionedGlyph) {
        self.x += glyph.x_advance;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn glyph(x_advance: i32, x_offset: i32, y_offset: i32) -> PositionedGlyph {
        PositionedGlyph {
            id: 1,
            cluster: 0,
            x_advance,
            y_advance: 0,
            x_offset,
            y_offset,
        }
    }

    fn bitmap(left: i32, top: i32) -> GlyphBitmap {
        GlyphBitmap {
            width: 8,
            height: 8,
            coverage: vec![255; 64],
            left,
            top,
        }
    }

    #[test]
    fn placement_uses_bearing_and_offsets() {
        // Baseline at pixel 27 of a 33px canvas, as a 20px line would yield
        let pen = Pen::new(27 * 64);
        let (px, py) = pen.placement(&bitmap(1, 8), &glyph(640, 0, 0));
        assert_eq!(px, 1);
        assert_eq!(py, 19);
    }

    #[test]
    fn advance_moves_pen_but_offsets_do_not() {
        let mut pen = Pen::new(1728);
        let g = glyph(640, 32, -16);
        pen.advance(&g);
        assert_eq!(pen.x, 640);
        pen.advance(&g);
        assert_eq!(pen.x, 1280);
        // y never moves in horizontal layout
        assert_eq!(pen.y, 1728);
    }

    #[test]
    fn second_glyph_lands_one_advance_later() {
        let mut pen = Pen::new(1728);
        let g = glyph(640, 0, 0);
        let b = bitmap(1, 8);

        let (first_x, _) = pen.placement(&b, &g);
        pen.advance(&g);
        let (second_x, _) = pen.placement(&b, &g);

        assert_eq!(first_x, 1);
        assert_eq!(second_x, 11); // 10px advance + 1px bearing
    }

    #[test]
    fn fractional_advances_do_not_compound() {
        // 10.5px advances: placements floor individually but the pen keeps
        // every fractional bit
        let mut pen = Pen::new(0);
        let g = glyph(672, 0, 0);
        let b = bitmap(0, 0);

        let mut xs = Vec::new();
        for _ in 0..4 {
            xs.push(pen.placement(&b, &g).0);
            pen.advance(&g);
        }
        assert_eq!(xs, vec![0, 10, 21, 31]);
        assert_eq!(pen.x, 672 * 4);
    }

    #[test]
    fn negative_coordinates_floor_toward_negative_infinity() {
        let pen = Pen::new(0);
        // x_offset of -1/64px must floor to pixel -1, not truncate to 0
        let (px, py) = pen.placement(&bitmap(0, 0), &glyph(0, -1, -1));
        assert_eq!(px, -1);
        assert_eq!(py, 0);
    }
}
