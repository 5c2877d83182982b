//! Text rendering module
//!
//! Draws shaped, laid-out text into a canvas using gradlabel-text.

use gradlabel_text::{
    FontDatabase, FontId, FontQuery, GlyphAtlas, GlyphKey, GlyphRasterizer,
    ParagraphLayout, RasterizedGlyph, TextLayout, TextShaper,
};

use crate::{Canvas, Color, RenderError, Result};

/// Text renderer that integrates with the canvas
pub struct TextRenderer {
    pub fonts: FontDatabase,
    shaper: TextShaper,
    rasterizer: GlyphRasterizer,
    atlas: GlyphAtlas,
}

impl TextRenderer {
    /// Create a new text renderer with system fonts
    pub fn new() -> Self {
        Self::with_fonts(FontDatabase::with_system_fonts())
    }

    /// Create without system fonts (for testing)
    pub fn new_empty() -> Self {
        Self::with_fonts(FontDatabase::new())
    }

    pub fn with_fonts(fonts: FontDatabase) -> Self {
        Self {
            fonts,
            shaper: TextShaper::new(),
            rasterizer: GlyphRasterizer::new(),
            atlas: GlyphAtlas::default(),
        }
    }

    /// Replace the glyph cache with one holding at most `entries` glyphs
    pub fn set_cache_capacity(&mut self, entries: usize) {
        self.atlas = GlyphAtlas::new(entries);
    }

    /// Find a font by family names, falling back to any loaded face
    pub fn find_font(&self, families: &[String]) -> Option<FontId> {
        self.fonts
            .query(&FontQuery::from_families(families))
            .or_else(|| self.fonts.first_face())
    }

    /// Break text into lines using `layout`'s style
    pub fn layout(&self, text: &str, font_id: FontId, layout: &ParagraphLayout) -> Result<TextLayout> {
        Ok(layout.layout(text, &self.fonts, font_id, &self.shaper)?)
    }

    /// Draw one line with its baseline at `(x, baseline)`
    pub fn draw_text(
        &mut self,
        canvas: &mut Canvas,
        text: &str,
        x: f32,
        baseline: f32,
        font_id: FontId,
        font_size: f32,
        color: Color,
    ) -> Result<()> {
        let run = self.shaper.shape(&self.fonts, font_id, text, font_size)?;

        for glyph in run.positioned_glyphs() {
            let key = GlyphKey::new(font_id, glyph.glyph_id, font_size);
            let fonts = &self.fonts;
            let rasterizer = &self.rasterizer;
            let rasterized = self.atlas.get_or_insert_with(key, || {
                fonts
                    .with_face_data(font_id, |data, index| {
                        rasterizer.rasterize(data, index, glyph.glyph_id, font_size)
                    })
                    .flatten()
                    .unwrap_or_else(|| RasterizedGlyph::empty(glyph.glyph_id))
            });

            if rasterized.is_empty() {
                continue;
            }

            let gx = (x + glyph.x).round() as i32 + rasterized.bearing_x;
            let gy = (baseline + glyph.y).round() as i32 - rasterized.bearing_y;
            draw_glyph_bitmap(canvas, rasterized, gx, gy, color);
        }

        Ok(())
    }

    /// Draw every line of a layout, the first line box starting at `top`
    pub fn draw_layout(
        &mut self,
        canvas: &mut Canvas,
        text: &str,
        layout: &TextLayout,
        top: f32,
        font_id: FontId,
        font_size: f32,
        color: Color,
    ) -> Result<()> {
        for (i, line) in layout.lines.iter().enumerate() {
            let line_text = text.get(line.start..line.end).ok_or_else(|| {
                RenderError::Text(gradlabel_text::TextError::ShapingFailed(format!(
                    "line range {}..{} is not on a char boundary",
                    line.start, line.end
                )))
            })?;
            let baseline = top + i as f32 * layout.line_height + layout.ascent;
            self.draw_text(canvas, line_text, line.x_offset, baseline, font_id, font_size, color)?;
        }
        Ok(())
    }

    /// Cache hits, misses and hit rate
    pub fn cache_stats(&self) -> (u64, u64, f64) {
        (self.atlas.hits, self.atlas.misses, self.atlas.hit_rate())
    }
}

impl Default for TextRenderer {
    fn default() -> Self {
        Self::new()
    }
}

/// Blend a coverage bitmap onto the canvas in `color`
fn draw_glyph_bitmap(canvas: &mut Canvas, glyph: &RasterizedGlyph, x: i32, y: i32, color: Color) {
    for row in 0..glyph.height {
        let cy = y + row as i32;
        if cy < 0 {
            continue;
        }
        for col in 0..glyph.width {
            let cx = x + col as i32;
            if cx < 0 {
                continue;
            }
            canvas.blend_pixel(cx as u32, cy as u32, color, glyph.coverage(col, row));
        }
    }
}
