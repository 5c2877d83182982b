//! Text layout module

mod line;
mod paragraph;

pub use line::{BreakOpportunity, LineBreaker};
pub use paragraph::{ParagraphLayout, ParagraphStyle};

/// Text alignment
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TextAlign {
    #[default]
    Left,
    Right,
    Center,
}

/// A laid out line of text
#[derive(Debug, Clone, PartialEq)]
pub struct TextLine {
    /// Start index in original text
    pub start: usize,
    /// End index in original text (trailing whitespace excluded)
    pub end: usize,
    /// Width of the line in pixels
    pub width: f32,
    /// X offset for alignment
    pub x_offset: f32,
}

/// Complete text layout result
#[derive(Debug, Clone)]
pub struct TextLayout {
    pub lines: Vec<TextLine>,
    /// Widest line, or the wrap width when one was given
    pub width: f32,
    pub height: f32,
    pub line_height: f32,
    /// Baseline offset from the top of each line box
    pub ascent: f32,
}

impl TextLayout {
    /// Create empty layout
    pub fn empty() -> Self {
        Self {
            lines: Vec::new(),
            width: 0.0,
            height: 0.0,
            line_height: 0.0,
            ascent: 0.0,
        }
    }

    /// Number of lines
    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// Keep at most `max_lines` lines (0 keeps all)
    pub fn truncate(&mut self, max_lines: usize) {
        if max_lines > 0 && self.lines.len() > max_lines {
            self.lines.truncate(max_lines);
            self.height = self.lines.len() as f32 * self.line_height;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn layout_with(lines: usize) -> TextLayout {
        TextLayout {
            lines: (0..lines)
                .map(|i| TextLine { start: i, end: i + 1, width: 10.0, x_offset: 0.0 })
                .collect(),
            width: 10.0,
            height: lines as f32 * 12.0,
            line_height: 12.0,
            ascent: 9.0,
        }
    }

    #[test]
    fn test_truncate_limits_lines() {
        let mut layout = layout_with(3);
        layout.truncate(1);
        assert_eq!(layout.line_count(), 1);
        assert!((layout.height - 12.0).abs() < 1e-6);
    }

    #[test]
    fn test_truncate_zero_is_unlimited() {
        let mut layout = layout_with(3);
        layout.truncate(0);
        assert_eq!(layout.line_count(), 3);
    }
}
