//! Rastext core: from shaped glyphs to a finished raster
//!
//! Text enters as characters and leaves as an encoded image. This crate
//! holds the pieces in between:
//!
//! 1. **Shaping** (external backend) - characters become positioned glyphs
//! 2. **Sizing** - the canvas dimensions are estimated before any pixel exists
//! 3. **Compositing** - each glyph's coverage bitmap is merged onto the canvas
//! 4. **Export** (external backend) - the canvas becomes an image stream
//!
//! All layout arithmetic is 26.6 fixed-point (divide by 64 for pixels) and
//! stays in integers until a pixel coordinate is actually needed, so rounding
//! error never compounds across a run.
//!
//! ## Build a pipeline
//!
//! ```ignore
//! use rastext_core::{Pipeline, RasterOptions, ShapeOptions};
//! use std::sync::Arc;
//!
//! let pipeline = Pipeline::builder()
//!     .shaper(Arc::new(my_shaper))
//!     .rasterizer(Arc::new(my_rasterizer))
//!     .exporter(Arc::new(my_exporter))
//!     .build()?;
//!
//! let png = pipeline.process(
//!     "Hello, World!",
//!     font,
//!     &ShapeOptions::default(),
//!     &RasterOptions::default(),
//! )?;
//! ```
//!
//! Backends plug in through the traits in [`traits`]; the data they exchange
//! lives in [`types`].

pub mod canvas;
pub mod compose;
pub mod error;
pub mod estimate;
pub mod pen;
pub mod pipeline;
pub mod traits;
pub mod types;

pub use canvas::Canvas;
pub use compose::compose;
pub use error::{RastextError, Result};
pub use estimate::{estimate, CanvasEstimate};
pub use pen::Pen;
pub use pipeline::{Pipeline, PipelineBuilder};
pub use traits::{Exporter, FontRef, GlyphRasterizer, Shaper};

use types::Direction;

/// How shaping should behave
#[derive(Debug, Clone)]
pub struct ShapeOptions {
    /// Font size in pixels
    pub size: f32,
    pub direction: Direction,
    /// Language tag (BCP 47), e.g. "en", "ar"
    pub language: Option<String>,
    /// Script tag (ISO 15924), e.g. "latn", "arab"
    pub script: Option<String>,
    /// OpenType features as (tag, value) pairs
    pub features: Vec<(String, u32)>,
}

impl Default for ShapeOptions {
    fn default() -> Self {
        Self {
            size: 16.0,
            direction: Direction::LeftToRight,
            language: None,
            script: None,
            features: Vec::new(),
        }
    }
}

/// How the composited canvas should look
#[derive(Debug, Clone)]
pub struct RasterOptions {
    /// Uniform text color; only its RGB reaches the canvas, coverage drives alpha
    pub foreground: Color,
}

impl Default for RasterOptions {
    fn default() -> Self {
        Self {
            foreground: Color::black(),
        }
    }
}

/// Simple RGBA color that works everywhere
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub const fn black() -> Self {
        Self::rgba(0, 0, 0, 255)
    }

    pub const fn white() -> Self {
        Self::rgba(255, 255, 255, 255)
    }
}
