//! Glyph coverage images
//!
//! A [`GlyphSource`] rasterizes label text onto a transparent canvas the size
//! of the label. The compositor only looks at the result's alpha (foreground
//! mode) or draws it as-is (background mode and plain text).

use gradlabel_render::{Canvas, Color, TextRenderer};
use gradlabel_text::{FontDatabase, ParagraphLayout, ParagraphStyle, TextAlign, TextError};
use tracing::debug;

use crate::config::LabelConfig;
use crate::Result;

/// Text attributes of a label
#[derive(Debug, Clone, PartialEq)]
pub struct LabelText {
    pub content: String,
    pub font_families: Vec<String>,
    pub font_size: f32,
    pub color: Color,
    pub alignment: TextAlign,
    /// Maximum number of lines, 0 for unlimited
    pub number_of_lines: usize,
    /// Line height multiplier
    pub line_height: f32,
}

impl LabelText {
    pub fn new(content: impl Into<String>) -> Self {
        Self::with_config(content, &LabelConfig::default())
    }

    pub fn with_config(content: impl Into<String>, config: &LabelConfig) -> Self {
        Self {
            content: content.into(),
            font_families: config.font_families.clone(),
            font_size: config.font_size,
            color: config.text_color,
            alignment: TextAlign::Left,
            number_of_lines: 1,
            line_height: config.line_height,
        }
    }
}

impl Default for LabelText {
    fn default() -> Self {
        Self::new("")
    }
}

/// Something that can draw label text into a coverage image
pub trait GlyphSource {
    /// Draw `text` onto a transparent `width` x `height` canvas
    fn rasterize(&mut self, text: &LabelText, width: u32, height: u32) -> Result<Canvas>;
}

/// Glyph source backed by real fonts
pub struct FontGlyphSource {
    renderer: TextRenderer,
}

impl FontGlyphSource {
    pub fn new(config: &LabelConfig) -> Self {
        let fonts = if config.load_system_fonts {
            FontDatabase::with_system_fonts()
        } else {
            FontDatabase::new()
        };
        let mut renderer = TextRenderer::with_fonts(fonts);
        renderer.set_cache_capacity(config.glyph_cache_capacity);
        Self { renderer }
    }

    pub fn with_renderer(renderer: TextRenderer) -> Self {
        Self { renderer }
    }

    pub fn renderer(&self) -> &TextRenderer {
        &self.renderer
    }

    pub fn renderer_mut(&mut self) -> &mut TextRenderer {
        &mut self.renderer
    }
}

impl Default for FontGlyphSource {
    fn default() -> Self {
        Self::new(&LabelConfig::default())
    }
}

impl GlyphSource for FontGlyphSource {
    fn rasterize(&mut self, text: &LabelText, width: u32, height: u32) -> Result<Canvas> {
        let mut canvas = Canvas::try_new(width, height)?;
        if text.content.is_empty() {
            return Ok(canvas);
        }

        let font_id = self.renderer.find_font(&text.font_families)
            .ok_or_else(|| TextError::FontNotFound(text.font_families.join(", ")))?;

        let paragraph = ParagraphLayout::with_style(ParagraphStyle {
            max_width: width as f32,
            line_height: text.line_height,
            align: text.alignment,
            font_size: text.font_size,
        });

        let mut layout = self.renderer.layout(&text.content, font_id, &paragraph)?;
        layout.truncate(text.number_of_lines);

        // Vertically centered, like a single-line label
        let top = (height as f32 - layout.height) / 2.0;
        debug!("Rasterizing {} lines at top {:.1}", layout.line_count(), top);

        self.renderer.draw_layout(
            &mut canvas,
            &text.content,
            &layout,
            top,
            font_id,
            text.font_size,
            text.color,
        )?;
        Ok(canvas)
    }
}
