//! The driver that takes text all the way to encoded bytes
//!
//! Shape -> Size -> Composite -> Encode, in that order, no stage skipped.
//! Sizing happens inside [`compose`] immediately before allocation, and the
//! canvas is handed to the exporter exactly once; nothing mutates it after
//! encoding.

use std::sync::Arc;

use crate::canvas::Canvas;
use crate::compose::compose;
use crate::error::{RastextError, Result};
use crate::traits::{Exporter, FontRef, GlyphRasterizer, Shaper};
use crate::{RasterOptions, ShapeOptions};

/// Text rendering pipeline: shaper, rasterizer, and exporter wired together
///
/// ```ignore
/// let pipeline = Pipeline::builder()
///     .shaper(Arc::new(HarfBuzzShaper::new()))
///     .rasterizer(Arc::new(ZenoRasterizer::new()))
///     .exporter(Arc::new(PngExporter::new()))
///     .build()?;
///
/// let bytes = pipeline.process(text, font, &shape_opts, &raster_opts)?;
/// ```
pub struct Pipeline {
    shaper: Option<Arc<dyn Shaper>>,
    rasterizer: Option<Arc<dyn GlyphRasterizer>>,
    exporter: Option<Arc<dyn Exporter>>,
}

impl Pipeline {
    /// Start building a new pipeline
    pub fn builder() -> PipelineBuilder {
        PipelineBuilder::new()
    }

    /// Shape and composite, returning the raw canvas
    pub fn render(
        &self,
        text: &str,
        font: Arc<dyn FontRef>,
        shape_options: &ShapeOptions,
        raster_options: &RasterOptions,
    ) -> Result<Canvas> {
        let shaper = self
            .shaper
            .as_ref()
            .ok_or_else(|| RastextError::Config("No shaper configured".into()))?;
        let rasterizer = self
            .rasterizer
            .as_ref()
            .ok_or_else(|| RastextError::Config("No rasterizer configured".into()))?;

        log::debug!("shaping with backend: {}", shaper.name());
        let run = shaper.shape(text, font.clone(), shape_options)?;

        log::debug!("compositing with backend: {}", rasterizer.name());
        compose(
            &run,
            &font,
            rasterizer.as_ref(),
            shape_options.size,
            raster_options.foreground,
        )
    }

    /// Run the whole pipeline and get the encoded image bytes
    pub fn process(
        &self,
        text: &str,
        font: Arc<dyn FontRef>,
        shape_options: &ShapeOptions,
        raster_options: &RasterOptions,
    ) -> Result<Vec<u8>> {
        let exporter = self
            .exporter
            .as_ref()
            .ok_or_else(|| RastextError::Config("No exporter configured".into()))?;

        let canvas = self.render(text, font, shape_options, raster_options)?;

        log::debug!("exporting with backend: {}", exporter.name());
        exporter.export(&canvas)
    }
}

/// Assemble a pipeline piece by piece
pub struct PipelineBuilder {
    shaper: Option<Arc<dyn Shaper>>,
    rasterizer: Option<Arc<dyn GlyphRasterizer>>,
    exporter: Option<Arc<dyn Exporter>>,
}

impl PipelineBuilder {
    pub fn new() -> Self {
        Self {
            shaper: None,
            rasterizer: None,
            exporter: None,
        }
    }

    /// Choose who turns characters into glyphs
    pub fn shaper(mut self, shaper: Arc<dyn Shaper>) -> Self {
        self.shaper = Some(shaper);
        self
    }

    /// Choose who turns glyphs into coverage bitmaps
    pub fn rasterizer(mut self, rasterizer: Arc<dyn GlyphRasterizer>) -> Self {
        self.rasterizer = Some(rasterizer);
        self
    }

    /// Choose who packages the final output
    pub fn exporter(mut self, exporter: Arc<dyn Exporter>) -> Self {
        self.exporter = Some(exporter);
        self
    }

    /// Create the pipeline, ready to run
    pub fn build(self) -> Result<Pipeline> {
        Ok(Pipeline {
            shaper: self.shaper,
            rasterizer: self.rasterizer,
            exporter: self.exporter,
        })
    }
}

impl Default for PipelineBuilder {
    fn default() -> Self {
        Self::new()
    }
}
