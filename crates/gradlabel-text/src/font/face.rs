//! Vertical font metrics

use ttf_parser::Face;

/// Vertical metrics in pixels for one font size
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FontMetrics {
    /// Distance from baseline to the top of the line box
    pub ascent: f32,
    /// Distance from baseline to the bottom (positive)
    pub descent: f32,
    pub line_gap: f32,
}

impl FontMetrics {
    /// Scale a face's font-unit metrics to `font_size` pixels
    pub fn from_face(face: &Face<'_>, font_size: f32) -> Self {
        let scale = font_size / face.units_per_em() as f32;
        Self {
            ascent: face.ascender() as f32 * scale,
            descent: -(face.descender() as f32) * scale,
            line_gap: face.line_gap() as f32 * scale,
        }
    }

    /// Fallback metrics for when no face is available
    pub fn approximate(font_size: f32) -> Self {
        Self {
            ascent: font_size * 0.8,
            descent: font_size * 0.2,
            line_gap: 0.0,
        }
    }

    /// Natural line height
    pub fn line_height(&self) -> f32 {
        self.ascent + self.descent + self.line_gap
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_approximate_metrics() {
        let metrics = FontMetrics::approximate(20.0);
        assert!((metrics.ascent - 16.0).abs() < 1e-4);
        assert!((metrics.line_height() - 20.0).abs() < 1e-4);
    }
}
