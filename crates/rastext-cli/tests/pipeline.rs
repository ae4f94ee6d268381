//! End-to-end pipeline tests over a real system font
//!
//! Each test bails out quietly when no known font is installed, so CI
//! without fonts still passes.

use std::sync::Arc;

use rastext_core::{
    traits::{FontRef, Shaper},
    Pipeline, RasterOptions, ShapeOptions,
};
use rastext_export::PngExporter;
use rastext_fontdb::Font;
use rastext_render_zeno::ZenoRasterizer;
use rastext_shape_hb::HarfBuzzShaper;

const PNG_MAGIC: [u8; 8] = [137, 80, 78, 71, 13, 10, 26, 10];

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

fn pipeline() -> Pipeline {
    Pipeline::builder()
        .shaper(Arc::new(HarfBuzzShaper::new()))
        .rasterizer(Arc::new(ZenoRasterizer::new()))
        .exporter(Arc::new(PngExporter::new()))
        .build()
        .unwrap()
}

#[test]
fn text_becomes_a_png() {
    let Some(font) = system_font() else { return };
    let png = pipeline()
        .process(
            "Hello, World!",
            font,
            &ShapeOptions {
                size: 32.0,
                ..Default::default()
            },
            &RasterOptions::default(),
        )
        .unwrap();
    assert_eq!(&png[0..8], &PNG_MAGIC);
}

#[test]
fn rendering_twice_is_byte_identical() {
    let Some(font) = system_font() else { return };
    let p = pipeline();
    let shape = ShapeOptions {
        size: 24.0,
        ..Default::default()
    };
    let raster = RasterOptions::default();

    let first = p
        .render("repeatable", font.clone(), &shape, &raster)
        .unwrap();
    let second = p.render("repeatable", font, &shape, &raster).unwrap();
    assert_eq!(first, second);
}

#[test]
fn canvas_width_follows_the_advance_sum() {
    let Some(font) = system_font() else { return };
    let p = pipeline();
    let shape = ShapeOptions {
        size: 32.0,
        ..Default::default()
    };

    let shaper = HarfBuzzShaper::new();
    let run = shaper.shape("widths", font.clone(), &shape).unwrap();
    let canvas = p
        .render("widths", font, &shape, &RasterOptions::default())
        .unwrap();

    assert_eq!(canvas.width() as i64, run.total_advance() >> 6);
}

#[test]
fn empty_text_produces_a_minimal_canvas() {
    let Some(font) = system_font() else { return };
    let canvas = pipeline()
        .render(
            "",
            font,
            &ShapeOptions::default(),
            &RasterOptions::default(),
        )
        .unwrap();
    assert_eq!(canvas.width(), 1);
    assert!(canvas.height() > 0);
    assert!(canvas.pixels().chunks_exact(4).all(|px| px[3] == 0));
}

#[test]
fn ink_stays_within_the_canvas() {
    let Some(font) = system_font() else { return };
    let canvas = pipeline()
        .render(
            "jgqy",
            font,
            &ShapeOptions {
                size: 48.0,
                ..Default::default()
            },
            &RasterOptions::default(),
        )
        .unwrap();

    // Descenders fit: some coverage exists and the buffer length is exact
    assert!(canvas.pixels().chunks_exact(4).any(|px| px[3] > 0));
    assert_eq!(
        canvas.pixels().len(),
        canvas.width() as usize * canvas.height() as usize * 4
    );
}
