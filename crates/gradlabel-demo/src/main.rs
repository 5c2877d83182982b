//! gradlabel demo
//!
//! Usage: `gradlabel-demo [archive.json] [out.png]`
//!
//! Renders the label stored in `archive.json` (or a built-in sample) to
//! `out.png`. Extra fonts are loaded from `GRADLABEL_FONT_DIR` when set.

use std::path::PathBuf;

use anyhow::{Context, Result};
use gradlabel::{
    AxialParameters, Color, FontGlyphSource, GradientLabel, GradientOptions, LabelConfig,
    PixelSize, TextAlign,
};
use tracing::info;
use tracing_subscriber::EnvFilter;

const FONT_DIR_VAR: &str = "GRADLABEL_FONT_DIR";

fn sample_label(config: &LabelConfig) -> GradientLabel {
    let mut label = GradientLabel::with_config("Gradient Label", config);
    label.set_size(PixelSize::new(480.0, 120.0));
    label.set_alignment(TextAlign::Center);
    label.set_axial_gradient_parameters(
        AxialParameters::new((0.0, 0.5), (1.0, 0.5))
            .colors(vec![Color::rgb(255, 94, 58), Color::rgb(255, 149, 0), Color::rgb(90, 40, 200)])
            .options(GradientOptions::DRAWS_BEFORE_START | GradientOptions::DRAWS_AFTER_END),
    );
    label
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let mut args = std::env::args().skip(1);
    let archive_path = args.next().map(PathBuf::from);
    let out_path = args.next().map(PathBuf::from).unwrap_or_else(|| PathBuf::from("label.png"));

    let config = LabelConfig {
        font_size: 56.0,
        ..LabelConfig::default()
    };

    let mut label = match &archive_path {
        Some(path) => {
            let json = std::fs::read_to_string(path)
                .with_context(|| format!("failed to read {}", path.display()))?;
            GradientLabel::from_json(&json)
                .with_context(|| format!("failed to decode {}", path.display()))?
        }
        None => sample_label(&config),
    };

    let mut glyphs = FontGlyphSource::new(&config);
    if let Some(dir) = std::env::var_os(FONT_DIR_VAR) {
        info!("Loading fonts from {:?}", dir);
        glyphs.renderer_mut().fonts.load_fonts_dir(dir);
    }
    info!("gradlabel v{} with {} font faces", gradlabel::VERSION, glyphs.renderer().fonts.len());

    let canvas = label.render(&mut glyphs).context("failed to render label")?;
    let (hits, misses, hit_rate) = glyphs.renderer().cache_stats();
    info!("Glyph cache: {} hits, {} misses ({:.0}% hit rate)", hits, misses, hit_rate * 100.0);
    let png = canvas.encode_png().context("failed to encode PNG")?;
    std::fs::write(&out_path, png)
        .with_context(|| format!("failed to write {}", out_path.display()))?;

    info!("Wrote {}x{} label to {}", canvas.width(), canvas.height(), out_path.display());
    Ok(())
}
