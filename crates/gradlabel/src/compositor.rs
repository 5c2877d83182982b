//! Gradient compositing
//!
//! Turns a glyph coverage image plus the label's gradient state into the
//! label's content layer:
//!
//! 1. Build a shader from the gradient colors and locations
//! 2. Scale the normalized geometry into pixel space
//! 3. Paint the gradient into a transparent layer
//! 4. Composite the glyph image: destination-in keeps gradient pixels only
//!    where glyphs have coverage (foreground), source-over places the glyphs
//!    on top of the gradient (background)
//!
//! When no gradient can be painted the glyphs are drawn as they are.

use gradlabel_render::{
    paint_gradient, Canvas, Color, CompositeMode, GradientGeometry, GradientOptions, GradientShader,
};
use tracing::{debug, warn};

use crate::geometry::PixelSize;
use crate::gradient::GradientSpec;
use crate::{Result, TextGradientLocation};

/// Borrowed view of everything needed to paint a label gradient
#[derive(Debug, Clone, Copy, Default)]
pub struct GradientPaint<'a> {
    pub spec: Option<&'a GradientSpec>,
    pub colors: Option<&'a [Color]>,
    pub locations: Option<&'a [f32]>,
    pub options: GradientOptions,
}

impl<'a> GradientPaint<'a> {
    pub fn new(
        spec: Option<&'a GradientSpec>,
        colors: Option<&'a [Color]>,
        locations: Option<&'a [f32]>,
        options: GradientOptions,
    ) -> Self {
        Self { spec, colors, locations, options }
    }

    /// Shader for the current colors, or `None` when there is nothing to
    /// paint. Invalid color/location combinations are logged and skipped.
    pub fn shader(&self) -> Option<GradientShader> {
        let colors = self.colors.filter(|colors| !colors.is_empty())?;
        match GradientShader::new(colors, self.locations) {
            Ok(shader) => Some(shader),
            Err(e) => {
                warn!("Skipping gradient: {}", e);
                None
            }
        }
    }

    /// Pixel geometry and shader, when both are available for `size`
    pub fn prepare(&self, size: PixelSize) -> Option<(GradientGeometry, GradientShader)> {
        let geometry = self.spec?.resolve(size)?;
        let shader = self.shader()?;
        Some((geometry, shader))
    }
}

/// Build the content layer for a label of `size` from its glyph image.
///
/// The layer matches the glyph image's pixel dimensions; gradient geometry
/// is scaled against the label's own (possibly fractional) size.
/// Returns the layer and whether a gradient was painted into it.
pub fn composite(
    glyphs: &Canvas,
    paint: &GradientPaint<'_>,
    size: PixelSize,
    location: TextGradientLocation,
) -> Result<(Canvas, bool)> {
    let mut layer = Canvas::try_new(glyphs.width(), glyphs.height())?;

    let Some((geometry, shader)) = paint.prepare(size) else {
        debug!("No gradient to paint, drawing plain glyphs");
        layer.draw_canvas(glyphs, 0, 0, CompositeMode::SourceOver);
        return Ok((layer, false));
    };

    paint_gradient(&mut layer, &geometry, &shader, paint.options)?;

    let mode = match location {
        TextGradientLocation::Foreground => CompositeMode::DestinationIn,
        TextGradientLocation::Background => CompositeMode::SourceOver,
    };
    debug!("Compositing glyphs with {:?}", mode);
    layer.draw_canvas(glyphs, 0, 0, mode);

    Ok((layer, true))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn glyph_block(width: u32, height: u32, x0: u32, x1: u32) -> Canvas {
        let mut canvas = Canvas::new(width, height).unwrap();
        canvas.fill_rect(x0 as f32, 0.0, (x1 - x0) as f32, height as f32, Color::BLACK);
        canvas
    }

    fn size_of(canvas: &Canvas) -> PixelSize {
        PixelSize::new(canvas.width() as f32, canvas.height() as f32)
    }

    #[test]
    fn test_shader_skips_empty_colors() {
        let paint = GradientPaint::new(None, Some(&[]), None, GradientOptions::empty());
        assert!(paint.shader().is_none());
    }

    #[test]
    fn test_shader_skips_mismatched_locations() {
        let colors = [Color::RED, Color::BLUE];
        let paint = GradientPaint::new(None, Some(&colors), Some(&[0.0]), GradientOptions::empty());
        assert!(paint.shader().is_none());
    }

    #[test]
    fn test_foreground_keeps_gradient_inside_glyphs() {
        let glyphs = glyph_block(20, 4, 5, 15);
        let spec = GradientSpec::axial((0.0, 0.5), (1.0, 0.5));
        let colors = [Color::RED, Color::BLUE];
        let paint = GradientPaint::new(Some(&spec), Some(&colors), None, GradientOptions::empty());

        let (layer, painted) =
            composite(&glyphs, &paint, size_of(&glyphs), TextGradientLocation::Foreground).unwrap();
        assert!(painted);
        assert_eq!(layer.alpha_at(2, 2), 0);
        assert_eq!(layer.alpha_at(17, 2), 0);

        let left = layer.get_pixel(5, 2).unwrap();
        let right = layer.get_pixel(14, 2).unwrap();
        assert!(left.r > left.b);
        assert!(right.b > right.r);
    }

    #[test]
    fn test_background_puts_glyphs_over_gradient() {
        let glyphs = glyph_block(20, 4, 5, 15);
        let spec = GradientSpec::axial((0.0, 0.5), (1.0, 0.5));
        let colors = [Color::RED, Color::BLUE];
        let paint = GradientPaint::new(Some(&spec), Some(&colors), None, GradientOptions::empty());

        let (layer, _) =
            composite(&glyphs, &paint, size_of(&glyphs), TextGradientLocation::Background).unwrap();
        assert_eq!(layer.get_pixel(10, 2), Some(Color::BLACK));
        assert!(layer.get_pixel(1, 2).unwrap().r > 200);
    }

    #[test]
    fn test_geometry_scales_with_fractional_label_size() {
        // A 100.5 px wide label rasterizes to a 101 px canvas; the gradient
        // must still end at x = 100.5, the center of the last pixel.
        let glyphs = Canvas::new(101, 1).unwrap();
        let spec = GradientSpec::axial((0.0, 0.5), (1.0, 0.5));
        let colors = [Color::RED, Color::BLUE];
        let paint = GradientPaint::new(Some(&spec), Some(&colors), None, GradientOptions::empty());

        let size = PixelSize::new(100.5, 1.0);
        let (layer, painted) =
            composite(&glyphs, &paint, size, TextGradientLocation::Background).unwrap();
        assert!(painted);
        assert_eq!(layer.width(), 101);
        assert_eq!(layer.get_pixel(100, 0), Some(Color::BLUE));

        // Scaling against the rounded-up canvas would stop short of blue
        let (rounded, _) =
            composite(&glyphs, &paint, size_of(&glyphs), TextGradientLocation::Background).unwrap();
        assert_ne!(rounded.get_pixel(100, 0), Some(Color::BLUE));
    }

    #[test]
    fn test_without_spec_draws_glyphs() {
        let glyphs = glyph_block(8, 2, 2, 6);
        let colors = [Color::RED];
        let paint = GradientPaint::new(None, Some(&colors), None, GradientOptions::empty());

        let (layer, painted) =
            composite(&glyphs, &paint, size_of(&glyphs), TextGradientLocation::Foreground).unwrap();
        assert!(!painted);
        assert_eq!(layer, glyphs);
    }
}
