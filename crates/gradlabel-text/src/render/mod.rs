//! Glyph rendering module

mod rasterizer;
mod atlas;

pub use rasterizer::{GlyphRasterizer, RasterizedGlyph};
pub use atlas::{GlyphAtlas, GlyphKey};
