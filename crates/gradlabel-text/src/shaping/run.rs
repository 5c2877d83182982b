//! Shaped text run

/// A shaped glyph in font units
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShapedGlyph {
    pub glyph_id: u16,
    pub x_offset: i32,
    pub y_offset: i32,
    pub x_advance: i32,
    pub y_advance: i32,
    /// Byte index of the source cluster
    pub cluster: u32,
}

/// Glyphs produced by one shaping call, with the size they were shaped at
#[derive(Debug, Clone)]
pub struct ShapedRun {
    pub glyphs: Vec<ShapedGlyph>,
    pub font_size: f32,
    pub units_per_em: u16,
}

impl ShapedRun {
    pub fn new(glyphs: Vec<ShapedGlyph>, font_size: f32, units_per_em: u16) -> Self {
        Self { glyphs, font_size, units_per_em }
    }

    /// Font units to pixels
    pub fn scale(&self) -> f32 {
        if self.units_per_em == 0 {
            return 0.0;
        }
        self.font_size / self.units_per_em as f32
    }

    /// Advance width of the whole run in pixels
    pub fn width(&self) -> f32 {
        let units: i64 = self.glyphs.iter().map(|g| g.x_advance as i64).sum();
        units as f32 * self.scale()
    }

    pub fn len(&self) -> usize {
        self.glyphs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.glyphs.is_empty()
    }

    /// Pen positions in pixels, relative to the run origin
    pub fn positioned_glyphs(&self) -> impl Iterator<Item = PositionedGlyph> + '_ {
        let scale = self.scale();
        let mut pen_x = 0.0;
        let mut pen_y = 0.0;

        self.glyphs.iter().map(move |g| {
            let positioned = PositionedGlyph {
                glyph_id: g.glyph_id,
                x: pen_x + g.x_offset as f32 * scale,
                y: pen_y - g.y_offset as f32 * scale,
                cluster: g.cluster,
            };
            pen_x += g.x_advance as f32 * scale;
            pen_y -= g.y_advance as f32 * scale;
            positioned
        })
    }
}

/// A glyph placed in pixel space (y grows downward)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PositionedGlyph {
    pub glyph_id: u16,
    pub x: f32,
    pub y: f32,
    pub cluster: u32,
}
