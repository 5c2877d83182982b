//! gradlabel Text - Label text rasterization
//!
//! This crate turns label text into glyph coverage:
//! - Font loading and matching (fontdb)
//! - Text shaping (rustybuzz - HarfBuzz port)
//! - Line breaking and paragraph layout
//! - Glyph rasterization and caching

pub mod font;
pub mod shaping;
pub mod layout;
pub mod render;

pub use font::{FontDatabase, FontId, FontMetrics, FontQuery};
pub use shaping::{Direction, PositionedGlyph, ShapedGlyph, ShapedRun, TextShaper};
pub use layout::{BreakOpportunity, LineBreaker, ParagraphLayout, ParagraphStyle, TextAlign, TextLayout, TextLine};
pub use render::{GlyphAtlas, GlyphKey, GlyphRasterizer, RasterizedGlyph};

/// Text rendering error types
#[derive(Debug, thiserror::Error)]
pub enum TextError {
    #[error("Font not found: {0}")]
    FontNotFound(String),

    #[error("Failed to parse font: {0}")]
    FontParsing(String),

    #[error("Shaping failed: {0}")]
    ShapingFailed(String),

    #[error("Rasterization failed: {0}")]
    RasterizationFailed(String),
}

pub type Result<T> = std::result::Result<T, TextError>;
