//! Paragraph layout

use super::{LineBreaker, TextAlign, TextLayout, TextLine};
use crate::font::{FontDatabase, FontId, FontMetrics};
use crate::shaping::TextShaper;
use crate::Result;

/// Paragraph layout configuration
#[derive(Debug, Clone)]
pub struct ParagraphStyle {
    /// Maximum width for line wrapping
    pub max_width: f32,
    /// Line height multiplier
    pub line_height: f32,
    /// Text alignment
    pub align: TextAlign,
    /// Font size
    pub font_size: f32,
}

impl Default for ParagraphStyle {
    fn default() -> Self {
        Self {
            max_width: f32::INFINITY,
            line_height: 1.0,
            align: TextAlign::Left,
            font_size: 17.0,
        }
    }
}

/// Paragraph layout engine
#[derive(Debug, Clone, Default)]
pub struct ParagraphLayout {
    style: ParagraphStyle,
}

impl ParagraphLayout {
    /// Create with specific style
    pub fn with_style(style: ParagraphStyle) -> Self {
        Self { style }
    }

    /// Set max width
    pub fn max_width(mut self, width: f32) -> Self {
        self.style.max_width = width;
        self
    }

    /// Set text alignment
    pub fn align(mut self, align: TextAlign) -> Self {
        self.style.align = align;
        self
    }

    /// Set font size
    pub fn font_size(mut self, size: f32) -> Self {
        self.style.font_size = size;
        self
    }

    /// Set line height multiplier
    pub fn line_height(mut self, multiplier: f32) -> Self {
        self.style.line_height = multiplier;
        self
    }

    pub fn style(&self) -> &ParagraphStyle {
        &self.style
    }

    /// Break `text` into aligned lines
    pub fn layout(
        &self,
        text: &str,
        db: &FontDatabase,
        font_id: FontId,
        shaper: &TextShaper,
    ) -> Result<TextLayout> {
        if text.is_empty() {
            return Ok(TextLayout::empty());
        }

        let font_size = self.style.font_size;
        let metrics = db.metrics(font_id, font_size)
            .unwrap_or_else(|| FontMetrics::approximate(font_size));
        let line_height = metrics.line_height() * self.style.line_height;

        let measure = |s: &str| -> Result<f32> {
            Ok(shaper.shape(db, font_id, s, font_size)?.width())
        };

        // Unknown fonts surface here rather than as zero-width lines
        measure("")?;

        let line_ranges = LineBreaker::break_lines(text, self.style.max_width, |s| {
            measure(s).unwrap_or(0.0)
        });

        let bounded = self.style.max_width.is_finite();
        let mut lines = Vec::with_capacity(line_ranges.len());
        let mut widest = 0.0f32;

        for (start, end) in line_ranges {
            let line_text = text[start..end].trim_end();
            let width = measure(line_text)?;
            widest = widest.max(width);

            let x_offset = if bounded {
                match self.style.align {
                    TextAlign::Left => 0.0,
                    TextAlign::Right => self.style.max_width - width,
                    TextAlign::Center => (self.style.max_width - width) / 2.0,
                }
            } else {
                0.0
            };

            lines.push(TextLine {
                start,
                end: start + line_text.len(),
                width,
                x_offset,
            });
        }

        tracing::trace!("Laid out {} lines at {}px", lines.len(), font_size);

        Ok(TextLayout {
            height: lines.len() as f32 * line_height,
            lines,
            width: if bounded { self.style.max_width } else { widest },
            line_height,
            ascent: metrics.ascent + (line_height - metrics.line_height()) / 2.0,
        })
    }
}
