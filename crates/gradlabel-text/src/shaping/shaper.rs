//! Text shaper using rustybuzz

use rustybuzz::{Face, UnicodeBuffer, shape};
use crate::font::{FontDatabase, FontId};
use crate::{Result, TextError};
use super::{ShapedGlyph, ShapedRun};

/// Text shaper using HarfBuzz (via rustybuzz)
#[derive(Debug, Clone, Default)]
pub struct TextShaper {
    direction: Direction,
}

/// Text direction
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Direction {
    #[default]
    LeftToRight,
    RightToLeft,
}

impl From<Direction> for rustybuzz::Direction {
    fn from(d: Direction) -> Self {
        match d {
            Direction::LeftToRight => rustybuzz::Direction::LeftToRight,
            Direction::RightToLeft => rustybuzz::Direction::RightToLeft,
        }
    }
}

impl TextShaper {
    /// Create a new left-to-right shaper
    pub fn new() -> Self {
        Self { direction: Direction::LeftToRight }
    }

    /// Set text direction
    pub fn direction(mut self, direction: Direction) -> Self {
        self.direction = direction;
        self
    }

    /// Shape text using a font from the database
    pub fn shape(
        &self,
        db: &FontDatabase,
        font_id: FontId,
        text: &str,
        font_size: f32,
    ) -> Result<ShapedRun> {
        db.with_face_data(font_id, |data, index| {
            self.shape_with_data(data, index, text, font_size)
        }).ok_or_else(|| TextError::FontNotFound("Font not found in database".into()))?
    }

    /// Shape text with raw font data
    pub fn shape_with_data(
        &self,
        font_data: &[u8],
        face_index: u32,
        text: &str,
        font_size: f32,
    ) -> Result<ShapedRun> {
        let face = Face::from_slice(font_data, face_index)
            .ok_or_else(|| TextError::FontParsing("Failed to parse font".into()))?;

        if text.is_empty() {
            return Ok(ShapedRun::new(Vec::new(), font_size, face.units_per_em() as u16));
        }

        let mut buffer = UnicodeBuffer::new();
        buffer.push_str(text);
        buffer.set_direction(self.direction.into());

        let output = shape(&face, &[], buffer);

        let glyphs: Vec<ShapedGlyph> = output.glyph_infos().iter()
            .zip(output.glyph_positions())
            .map(|(info, pos)| ShapedGlyph {
                glyph_id: info.glyph_id as u16,
                x_offset: pos.x_offset,
                y_offset: pos.y_offset,
                x_advance: pos.x_advance,
                y_advance: pos.y_advance,
                cluster: info.cluster,
            })
            .collect();

        Ok(ShapedRun::new(glyphs, font_size, face.units_per_em() as u16))
    }
}
