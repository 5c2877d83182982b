//! Compositing operations
//!
//! The subset of Porter-Duff operators a gradient label needs when placing
//! its glyph image over painted content.

/// How a source image is combined with the destination
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CompositeMode {
    /// Source drawn over the destination
    #[default]
    SourceOver,
    /// Destination kept only where the source has coverage,
    /// scaled by source alpha; source color is discarded
    DestinationIn,
}

impl From<CompositeMode> for tiny_skia::BlendMode {
    fn from(mode: CompositeMode) -> Self {
        match mode {
            CompositeMode::SourceOver => tiny_skia::BlendMode::SourceOver,
            CompositeMode::DestinationIn => tiny_skia::BlendMode::DestinationIn,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Canvas, Color};

    #[test]
    fn test_destination_in_masks_by_source_alpha() {
        let mut dst = Canvas::new(4, 1).unwrap();
        dst.clear(Color::RED);

        let mut mask = Canvas::new(4, 1).unwrap();
        mask.set_pixel(1, 0, Color::BLACK);
        mask.set_pixel(2, 0, Color::WHITE);

        dst.draw_canvas(&mask, 0, 0, CompositeMode::DestinationIn);

        assert_eq!(dst.alpha_at(0, 0), 0);
        assert_eq!(dst.get_pixel(1, 0), Some(Color::RED));
        assert_eq!(dst.get_pixel(2, 0), Some(Color::RED));
        assert_eq!(dst.alpha_at(3, 0), 0);
    }

    #[test]
    fn test_source_over_keeps_uncovered_destination() {
        let mut dst = Canvas::new(2, 1).unwrap();
        dst.clear(Color::BLUE);

        let mut src = Canvas::new(2, 1).unwrap();
        src.set_pixel(0, 0, Color::WHITE);

        dst.draw_canvas(&src, 0, 0, CompositeMode::SourceOver);

        assert_eq!(dst.get_pixel(0, 0), Some(Color::WHITE));
        assert_eq!(dst.get_pixel(1, 0), Some(Color::BLUE));
    }
}
