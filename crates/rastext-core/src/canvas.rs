//! The shared RGBA canvas glyphs are merged onto
//!
//! The canvas is allocated once and never resized. Its RGB channels carry
//! the uniform foreground color from the moment of allocation; compositing
//! only ever writes the alpha channel, so coverage is the single varying
//! quantity per pixel.

use crate::types::GlyphBitmap;
use crate::Color;

/// Owned RGBA pixel buffer, row-major, straight (non-premultiplied) alpha
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Canvas {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
}

impl Canvas {
    /// Allocate a canvas with uniform foreground RGB and zero alpha
    pub fn new(width: u32, height: u32, foreground: Color) -> Self {
        let mut pixels = vec![0u8; (width as usize) * (height as usize) * 4];
        for pixel in pixels.chunks_exact_mut(4) {
            pixel[0] = foreground.r;
            pixel[1] = foreground.g;
            pixel[2] = foreground.b;
        }
        Self {
            width,
            height,
            pixels,
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Raw RGBA bytes, length `width * height * 4`
    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    /// Row stride in bytes
    pub fn stride(&self) -> usize {
        self.width as usize * 4
    }

    /// Alpha value at a pixel; used by tests and callers inspecting coverage
    pub fn alpha(&self, x: u32, y: u32) -> u8 {
        self.pixels[((y * self.width + x) * 4 + 3) as usize]
    }

    /// Merge a coverage bitmap at the given pixel origin
    ///
    /// Per covered pixel the alpha channel takes the maximum of itself and
    /// the incoming coverage, so overlapping glyphs never darken each other.
    /// Destination pixels outside the canvas and source indices outside the
    /// bitmap are skipped silently; clipping is policy here, not an error.
    pub fn blit_max(&mut self, bitmap: &GlyphBitmap, origin_x: i32, origin_y: i32) {
        for gy in 0..bitmap.height {
            for gx in 0..bitmap.width {
                let px = origin_x + gx as i32;
                let py = origin_y + gy as i32;
                if px < 0 || py < 0 || px >= self.width as i32 || py >= self.height as i32 {
                    continue;
                }
                let Some(&coverage) = bitmap.coverage.get((gy * bitmap.width + gx) as usize)
                else {
                    continue;
                };
                if coverage == 0 {
                    continue;
                }
                let idx = ((py as u32 * self.width + px as u32) * 4 + 3) as usize;
                if self.pixels[idx] < coverage {
                    self.pixels[idx] = coverage;
                }
            }
        }
    }
}
