//! Error types for rastext

use thiserror::Error;

pub type Result<T> = std::result::Result<T, RastextError>;

/// Main error type for rastext
#[derive(Debug, Error)]
pub enum RastextError {
    #[error("Font loading failed: {0}")]
    FontLoad(#[from] FontLoadError),

    #[error("Shaping failed: {0}")]
    Shaping(#[from] ShapeError),

    #[error("Layout failed: {0}")]
    Layout(#[from] LayoutError),

    #[error("Glyph rendering failed: {0}")]
    GlyphRender(#[from] GlyphRenderError),

    #[error("Export failed: {0}")]
    Export(#[from] ExportError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Font loading errors
#[derive(Debug, Error)]
pub enum FontLoadError {
    #[error("Font file not found: {0}")]
    FileNotFound(String),

    #[error("Invalid font data")]
    InvalidData,

    #[error("Face index {0} not present in collection")]
    FaceIndexOutOfRange(u32),
}

/// Shaping errors
#[derive(Debug, Error)]
pub enum ShapeError {
    #[error("Backend error: {0}")]
    BackendError(String),
}

/// Canvas size estimation errors. These are fatal: no canvas is
/// allocated and nothing is composited.
#[derive(Debug, Error)]
pub enum LayoutError {
    #[error("Run advances sum to a negative width ({0})")]
    InvalidWidth(i64),

    #[error("Font metrics yield a non-positive canvas height ({0})")]
    InvalidHeight(i32),
}

/// Per-glyph rasterization errors. The compositor recovers from these
/// by skipping the glyph's contribution; the run continues.
#[derive(Debug, Error)]
pub enum GlyphRenderError {
    #[error("Font data could not be parsed")]
    InvalidFont,

    #[error("Glyph {0} not found in font")]
    GlyphNotFound(u32),

    #[error("Outline extraction failed for glyph {0}")]
    OutlineExtraction(u32),

    #[error("Backend error: {0}")]
    BackendError(String),
}

/// Export errors
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("Encoding failed: {0}")]
    EncodingFailed(String),
}
