//! Canvas size estimation
//!
//! Derives the output dimensions from a shaped run before a single glyph is
//! rasterized: width from the sum of advances, height from the font's line
//! height plus a safety margin. The margin (the 1.5x multiplier below) is a
//! heuristic for scripts whose glyphs overshoot the nominal line, not a
//! tight bound; an exact answer would need a per-glyph bounding-box pre-pass.

use crate::error::LayoutError;
use crate::types::ShapedRun;

/// The estimator's output: canvas dimensions plus the baseline the pen
/// traversal starts from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CanvasEstimate {
    pub width: u32,
    pub height: u32,
    /// Initial pen.y, 26.6, measured from the canvas top
    pub baseline: i32,
}

/// Estimate canvas dimensions for a shaped run
///
/// Width is `floor(sum(x_advance) / 64)`, clamped to 1 so an empty run
/// still yields an allocatable buffer. Height adds two pixels of slack to
/// the line height and stretches by 1.5 (integer truncation). Fails with
/// [`LayoutError`] when malformed metrics make allocation impossible;
/// nothing is allocated in that case.
pub fn estimate(run: &ShapedRun) -> Result<CanvasEstimate, LayoutError> {
    let width = run.total_advance() >> 6;
    if width < 0 {
        return Err(LayoutError::InvalidWidth(width));
    }

    let line = (run.metrics.height >> 6) + 2;
    let height = line * 3 / 2;
    if height <= 0 {
        return Err(LayoutError::InvalidHeight(height));
    }

    // Distance from the bottom edge to the baseline. Descenders are
    // negative in font conventions; a non-negative value is taken as-is.
    let descender = run.metrics.descender / 64;
    let descender = if descender < 0 {
        -descender + 1
    } else {
        descender + 1
    };

    Ok(CanvasEstimate {
        width: width.max(1) as u32,
        height: height as u32,
        baseline: (height - descender) * 64,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Direction, LineMetrics, PositionedGlyph};

    fn run(advances: &[i32], height: i32, descender: i32) -> ShapedRun {
        ShapedRun {
            glyphs: advances
                .iter()
                .map(|&x_advance| PositionedGlyph {
                    id: 1,
                    cluster: 0,
                    x_advance,
                    y_advance: 0,
                    x_offset: 0,
                    y_offset: 0,
                })
                .collect(),
            metrics: LineMetrics { height, descender },
            direction: Direction::LeftToRight,
        }
    }

    #[test]
    fn two_glyph_run_from_a_20px_line() {
        // Two 10px advances, 20px line height, -5px descender
        let est = estimate(&run(&[640, 640], 20 * 64, -5 * 64)).unwrap();
        assert_eq!(est.width, 20);
        assert_eq!(est.height, 33); // (20 + 2) * 1.5 truncated
        assert_eq!(est.baseline, (33 - 6) * 64); // 1728
    }

    #[test]
    fn width_is_advance_sum_only() {
        // Offsets and glyph content never contribute to width
        let mut r = run(&[320, 321, 319], 16 * 64, -3 * 64);
        for g in &mut r.glyphs {
            g.x_offset = 9999;
            g.y_offset = -9999;
        }
        let est = estimate(&r).unwrap();
        assert_eq!(est.width, (960 / 64) as u32);
    }

    #[test]
    fn empty_run_keeps_a_minimum_width() {
        let est = estimate(&run(&[], 20 * 64, -5 * 64)).unwrap();
        assert_eq!(est.width, 1);
        assert_eq!(est.height, 33);
    }

    #[test]
    fn non_negative_descender_is_used_directly() {
        let est = estimate(&run(&[640], 20 * 64, 4 * 64)).unwrap();
        assert_eq!(est.baseline, (33 - 5) * 64);
    }

    #[test]
    fn negative_advance_sum_is_a_layout_error() {
        let err = estimate(&run(&[-640], 20 * 64, -5 * 64)).unwrap_err();
        assert!(matches!(err, LayoutError::InvalidWidth(_)));
    }

    #[test]
    fn malformed_metrics_are_a_layout_error() {
        let err = estimate(&run(&[640], -40 * 64, -5 * 64)).unwrap_err();
        assert!(matches!(err, LayoutError::InvalidHeight(_)));
    }
}
