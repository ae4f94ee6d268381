//! Font loading for rastext
//!
//! Reads a font file into memory once, validates it with `read-fonts`, and
//! hands the same bytes to both the shaper and the rasterizer. That shared
//! instance matters: glyph ids are only meaningful against the font that
//! produced them.
//!
//! TTC/OTC collections are supported through an explicit face index.

use std::fs;
use std::path::Path;

use read_fonts::{FontRef as ReadFontRef, TableProvider};

use rastext_core::{
    error::{FontLoadError, Result},
    traits::FontRef,
    types::GlyphId,
};

/// A font brought into memory, ready to shape and rasterize text
///
/// Stores the raw bytes and re-parses table views on demand; parsing is
/// cheap because `read-fonts` is zero-copy over the stored data.
pub struct Font {
    data: Vec<u8>,
    face_index: u32,
    units_per_em: u16,
}

impl Font {
    /// Open a font file from disk
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        Self::from_file_index(path, 0)
    }

    /// Open a specific face from a font file (for TTC collections)
    pub fn from_file_index(path: impl AsRef<Path>, face_index: u32) -> Result<Self> {
        let data = fs::read(path.as_ref())
            .map_err(|_| FontLoadError::FileNotFound(path.as_ref().display().to_string()))?;
        Self::from_data_index(data, face_index)
    }

    /// Use font bytes already in memory
    pub fn from_data(data: Vec<u8>) -> Result<Self> {
        Self::from_data_index(data, 0)
    }

    /// Use font bytes already in memory, selecting a collection face
    pub fn from_data_index(data: Vec<u8>, face_index: u32) -> Result<Self> {
        // Parsing up front is the validation: bad data never reaches a backend
        let font_ref = ReadFontRef::from_index(&data, face_index).map_err(|_| {
            if face_index > 0 && ReadFontRef::from_index(&data, 0).is_ok() {
                FontLoadError::FaceIndexOutOfRange(face_index)
            } else {
                FontLoadError::InvalidData
            }
        })?;

        let units_per_em = font_ref
            .head()
            .map(|head| head.units_per_em())
            .unwrap_or(1000);
        log::debug!("loaded font face {face_index}, upem {units_per_em}");

        Ok(Font {
            data,
            face_index,
            units_per_em,
        })
    }

    fn font_ref(&self) -> Option<ReadFontRef<'_>> {
        ReadFontRef::from_index(&self.data, self.face_index).ok()
    }
}

impl FontRef for Font {
    fn data(&self) -> &[u8] {
        &self.data
    }

    fn face_index(&self) -> u32 {
        self.face_index
    }

    fn units_per_em(&self) -> u16 {
        self.units_per_em
    }

    fn glyph_id(&self, ch: char) -> Option<GlyphId> {
        self.font_ref()
            .and_then(|font| font.cmap().ok()?.map_codepoint(ch).map(|gid| gid.to_u32()))
    }

    fn glyph_count(&self) -> Option<u32> {
        self.font_ref()
            .and_then(|font| font.maxp().ok().map(|maxp| maxp.num_glyphs() as u32))
    }
}
