//! rastext CLI - render a line of text to a PNG file

use std::fs::File;
use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use clap::Parser;

use rastext_core::{
    traits::FontRef, types::Direction, Color, Pipeline, RasterOptions, ShapeOptions,
};
use rastext_export::PngExporter;
use rastext_fontdb::Font;
use rastext_render_zeno::ZenoRasterizer;
use rastext_shape_hb::HarfBuzzShaper;

/// Render a line of text to a PNG image
#[derive(Parser, Debug)]
#[command(name = "rastext")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Font file path (.ttf, .otf, .ttc, .otc)
    font: PathBuf,

    /// Text to render
    text: String,

    /// Output PNG path
    #[arg(short, long, default_value = "out.png")]
    output: PathBuf,

    /// Face index for TTC/OTC collections
    #[arg(long, default_value_t = 0)]
    face_index: u32,

    /// Font size in pixels
    #[arg(short, long, default_value_t = 64.0)]
    size: f32,

    /// Text direction: ltr or rtl
    #[arg(short, long, default_value = "ltr")]
    direction: String,

    /// Language tag (BCP 47), e.g. en, ar
    #[arg(short, long)]
    language: Option<String>,

    /// Script tag (ISO 15924), e.g. latn, arab
    #[arg(long)]
    script: Option<String>,

    /// Foreground color as hex RGB or RGBA, e.g. 000000 or 1a2b3cff
    #[arg(long, default_value = "000000")]
    foreground: String,
}

fn parse_direction(s: &str) -> Result<Direction, String> {
    match s.to_ascii_lowercase().as_str() {
        "ltr" => Ok(Direction::LeftToRight),
        "rtl" => Ok(Direction::RightToLeft),
        other => Err(format!("unknown direction '{other}', expected ltr or rtl")),
    }
}

fn parse_color(s: &str) -> Result<Color, String> {
    let hex = s.trim_start_matches('#');
    let valid_len = hex.len() == 6 || hex.len() == 8;
    if !valid_len || !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
        return Err(format!("invalid color '{s}', expected RRGGBB or RRGGBBAA hex"));
    }
    let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).map_err(|e| e.to_string());
    Ok(Color {
        r: channel(0)?,
        g: channel(2)?,
        b: channel(4)?,
        a: if hex.len() == 8 { channel(6)? } else { 255 },
    })
}

fn run(cli: &Cli) -> rastext_core::Result<()> {
    let direction = parse_direction(&cli.direction).map_err(rastext_core::RastextError::Config)?;
    let foreground = parse_color(&cli.foreground).map_err(rastext_core::RastextError::Config)?;

    log::info!("loading font {}", cli.font.display());
    let font: Arc<dyn FontRef> = Arc::new(Font::from_file_index(&cli.font, cli.face_index)?);

    let pipeline = Pipeline::builder()
        .shaper(Arc::new(HarfBuzzShaper::new()))
        .rasterizer(Arc::new(ZenoRasterizer::new()))
        .exporter(Arc::new(PngExporter::new()))
        .build()?;

    let shape_options = ShapeOptions {
        size: cli.size,
        direction,
        language: cli.language.clone(),
        script: cli.script.clone(),
        features: Vec::new(),
    };
    let raster_options = RasterOptions { foreground };

    let png = pipeline.process(&cli.text, font, &shape_options, &raster_options)?;

    let mut file = File::create(&cli.output)?;
    file.write_all(&png)?;
    log::info!("wrote {} bytes to {}", png.len(), cli.output.display());

    Ok(())
}

fn main() -> ExitCode {
    env_logger::init();
    let cli = Cli::parse();

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("rastext: {e}");
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn direction_parsing() {
        assert_eq!(parse_direction("ltr").unwrap(), Direction::LeftToRight);
        assert_eq!(parse_direction("RTL").unwrap(), Direction::RightToLeft);
        assert!(parse_direction("ttb").is_err());
    }

    #[test]
    fn color_parsing() {
        assert_eq!(parse_color("000000").unwrap(), Color::rgba(0, 0, 0, 255));
        assert_eq!(
            parse_color("#1a2b3c").unwrap(),
            Color::rgba(0x1a, 0x2b, 0x3c, 255)
        );
        assert_eq!(
            parse_color("1a2b3c80").unwrap(),
            Color::rgba(0x1a, 0x2b, 0x3c, 0x80)
        );
        assert!(parse_color("12345").is_err());
        assert!(parse_color("zzzzzz").is_err());
    }
}
