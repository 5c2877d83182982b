//! Gradients
//!
//! Axial and two-circle radial gradients sampled per pixel, with
//! Core-Graphics-style extension options: outside the [start, end] range a
//! pixel is painted only when the matching option is set.

use bitflags::bitflags;
use tiny_skia::Point;

use crate::{Canvas, Color, CompositeMode, RenderError, Result};

bitflags! {
    /// Whether a gradient extends past its first and last stops
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct GradientOptions: u32 {
        /// Paint the first color before the start point / inside the start circle
        const DRAWS_BEFORE_START = 1 << 0;
        /// Paint the last color after the end point / outside the end circle
        const DRAWS_AFTER_END = 1 << 1;
    }
}

impl GradientOptions {
    fn allows(self, t: f32) -> bool {
        if t < 0.0 {
            self.contains(Self::DRAWS_BEFORE_START)
        } else if t > 1.0 {
            self.contains(Self::DRAWS_AFTER_END)
        } else {
            true
        }
    }
}

/// A color stop in a gradient
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColorStop {
    /// Position in gradient (0.0 - 1.0)
    pub position: f32,
    pub color: Color,
}

impl ColorStop {
    pub fn new(position: f32, color: Color) -> Self {
        Self { position, color }
    }
}

/// Color ramp built from colors and optional locations
#[derive(Debug, Clone, PartialEq)]
pub struct GradientShader {
    stops: Vec<ColorStop>,
}

impl GradientShader {
    /// Build stops from `colors`. Without `locations` the colors are spread
    /// evenly over [0, 1]; with them, each location is clamped to [0, 1] and
    /// stops are ordered by location.
    pub fn new(colors: &[Color], locations: Option<&[f32]>) -> Result<Self> {
        if colors.is_empty() {
            return Err(RenderError::EmptyGradient);
        }

        let mut stops: Vec<ColorStop> = match locations {
            Some(locations) => {
                if locations.len() != colors.len() {
                    return Err(RenderError::LocationCountMismatch {
                        colors: colors.len(),
                        locations: locations.len(),
                    });
                }
                if let Some(&bad) = locations.iter().find(|l| !l.is_finite()) {
                    return Err(RenderError::InvalidLocation(bad));
                }
                colors.iter()
                    .zip(locations)
                    .map(|(&color, &position)| ColorStop::new(position.clamp(0.0, 1.0), color))
                    .collect()
            }
            None => {
                let last = (colors.len() - 1).max(1) as f32;
                colors.iter()
                    .enumerate()
                    .map(|(i, &color)| ColorStop::new(i as f32 / last, color))
                    .collect()
            }
        };

        stops.sort_by(|a, b| a.position.total_cmp(&b.position));
        Ok(Self { stops })
    }

    pub fn stops(&self) -> &[ColorStop] {
        &self.stops
    }

    /// Color at gradient parameter `t` (clamped to [0, 1])
    pub fn sample(&self, t: f32) -> Color {
        let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };

        let (Some(first), Some(last)) = (self.stops.first(), self.stops.last()) else {
            return Color::TRANSPARENT;
        };
        if t <= first.position {
            return first.color;
        }
        if t >= last.position {
            return last.color;
        }

        for pair in self.stops.windows(2) {
            let (a, b) = (pair[0], pair[1]);
            if t <= b.position {
                let span = b.position - a.position;
                if span <= f32::EPSILON {
                    return b.color;
                }
                return a.color.lerp(b.color, (t - a.position) / span);
            }
        }

        last.color
    }
}

/// Gradient placement in pixel space
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GradientGeometry {
    /// Color varies along the line from `start` to `end`
    Linear { start: Point, end: Point },
    /// Color varies between two circles
    Radial {
        start_center: Point,
        start_radius: f32,
        end_center: Point,
        end_radius: f32,
    },
}

const EPSILON: f32 = 1e-6;

impl GradientGeometry {
    pub fn linear(start: Point, end: Point) -> Self {
        Self::Linear { start, end }
    }

    pub fn radial(start_center: Point, start_radius: f32, end_center: Point, end_radius: f32) -> Self {
        Self::Radial { start_center, start_radius, end_center, end_radius }
    }

    /// Gradient parameter for the point `(x, y)`, or `None` when the point
    /// is not painted under `options`. Returned values are clamped to [0, 1].
    pub fn parameter_at(&self, x: f32, y: f32, options: GradientOptions) -> Option<f32> {
        let t = match *self {
            Self::Linear { start, end } => linear_parameter(start, end, x, y)?,
            Self::Radial { start_center, start_radius, end_center, end_radius } => {
                radial_parameter(start_center, start_radius, end_center, end_radius, x, y, options)?
            }
        };
        options.allows(t).then(|| t.clamp(0.0, 1.0))
    }
}

fn linear_parameter(start: Point, end: Point, x: f32, y: f32) -> Option<f32> {
    let dx = end.x - start.x;
    let dy = end.y - start.y;
    let len2 = dx * dx + dy * dy;
    if len2 <= EPSILON {
        return None;
    }
    Some(((x - start.x) * dx + (y - start.y) * dy) / len2)
}

/// Largest `t` with `|p - c(t)| = r(t)` and `r(t) >= 0` that `options` allow,
/// where `c(t)` and `r(t)` interpolate linearly between the two circles.
fn radial_parameter(
    c0: Point,
    r0: f32,
    c1: Point,
    r1: f32,
    x: f32,
    y: f32,
    options: GradientOptions,
) -> Option<f32> {
    let (cdx, cdy) = (c1.x - c0.x, c1.y - c0.y);
    let (pdx, pdy) = (x - c0.x, y - c0.y);
    let dr = r1 - r0;

    // a·t² - 2b·t + c = 0
    let a = cdx * cdx + cdy * cdy - dr * dr;
    let b = pdx * cdx + pdy * cdy + r0 * dr;
    let c = pdx * pdx + pdy * pdy - r0 * r0;

    let roots = if a.abs() <= EPSILON {
        if b.abs() <= EPSILON {
            return None;
        }
        [c / (2.0 * b), f32::NAN]
    } else {
        let disc = b * b - a * c;
        if disc < 0.0 {
            return None;
        }
        let s = disc.sqrt();
        [(b + s) / a, (b - s) / a]
    };

    roots.into_iter()
        .filter(|t| t.is_finite() && r0 + t * dr >= 0.0 && options.allows(*t))
        .reduce(f32::max)
}

/// Write gradient colors into every covered pixel of `canvas`, replacing
/// what was there. Pixels outside the gradient's extent are left untouched.
pub fn fill_gradient(
    canvas: &mut Canvas,
    geometry: &GradientGeometry,
    shader: &GradientShader,
    options: GradientOptions,
) -> usize {
    let mut painted = 0;
    for py in 0..canvas.height() {
        let y = py as f32 + 0.5;
        for px in 0..canvas.width() {
            let x = px as f32 + 0.5;
            if let Some(t) = geometry.parameter_at(x, y, options) {
                canvas.set_pixel(px, py, shader.sample(t));
                painted += 1;
            }
        }
    }
    painted
}

/// Paint a gradient over existing content (source-over), the way a drawing
/// context paints a gradient primitive.
pub fn paint_gradient(
    canvas: &mut Canvas,
    geometry: &GradientGeometry,
    shader: &GradientShader,
    options: GradientOptions,
) -> Result<()> {
    let mut layer = Canvas::try_new(canvas.width(), canvas.height())?;
    let painted = fill_gradient(&mut layer, geometry, shader, options);
    tracing::trace!("Gradient covers {} of {} pixels", painted, canvas.width() * canvas.height());
    canvas.draw_canvas(&layer, 0, 0, CompositeMode::SourceOver);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pt(x: f32, y: f32) -> Point {
        Point::from_xy(x, y)
    }

    fn red_blue() -> GradientShader {
        GradientShader::new(&[Color::RED, Color::BLUE], None).unwrap()
    }

    #[test]
    fn test_even_stops() {
        let shader = GradientShader::new(&[Color::RED, Color::GREEN, Color::BLUE], None).unwrap();
        let positions: Vec<f32> = shader.stops().iter().map(|s| s.position).collect();
        assert_eq!(positions, vec![0.0, 0.5, 1.0]);
    }

    #[test]
    fn test_single_color_is_solid() {
        let shader = GradientShader::new(&[Color::GREEN], None).unwrap();
        assert_eq!(shader.sample(0.0), Color::GREEN);
        assert_eq!(shader.sample(0.7), Color::GREEN);
    }

    #[test]
    fn test_shader_errors() {
        assert!(matches!(GradientShader::new(&[], None), Err(RenderError::EmptyGradient)));
        assert!(matches!(
            GradientShader::new(&[Color::RED, Color::BLUE], Some(&[0.0])),
            Err(RenderError::LocationCountMismatch { colors: 2, locations: 1 })
        ));
        assert!(matches!(
            GradientShader::new(&[Color::RED], Some(&[f32::NAN])),
            Err(RenderError::InvalidLocation(_))
        ));
    }

    #[test]
    fn test_locations_are_sorted_and_clamped() {
        let shader = GradientShader::new(&[Color::RED, Color::BLUE], Some(&[1.5, -0.5])).unwrap();
        assert_eq!(shader.stops()[0], ColorStop::new(0.0, Color::BLUE));
        assert_eq!(shader.stops()[1], ColorStop::new(1.0, Color::RED));
    }

    #[test]
    fn test_sample_pads_outside_stops() {
        let shader = GradientShader::new(&[Color::RED, Color::BLUE], Some(&[0.25, 0.75])).unwrap();
        assert_eq!(shader.sample(0.1), Color::RED);
        assert_eq!(shader.sample(0.9), Color::BLUE);
        let mid = shader.sample(0.5);
        assert!(mid.r > 120 && mid.r < 135);
        assert!(mid.b > 120 && mid.b < 135);
    }

    #[test]
    fn test_linear_parameter_range() {
        let geometry = GradientGeometry::linear(pt(10.0, 0.0), pt(20.0, 0.0));
        let none = GradientOptions::empty();
        assert_eq!(geometry.parameter_at(15.0, 3.0, none), Some(0.5));
        assert_eq!(geometry.parameter_at(5.0, 0.0, none), None);
        assert_eq!(geometry.parameter_at(25.0, 0.0, none), None);

        let both = GradientOptions::DRAWS_BEFORE_START | GradientOptions::DRAWS_AFTER_END;
        assert_eq!(geometry.parameter_at(5.0, 0.0, both), Some(0.0));
        assert_eq!(geometry.parameter_at(25.0, 0.0, both), Some(1.0));
    }

    #[test]
    fn test_degenerate_linear_paints_nothing() {
        let geometry = GradientGeometry::linear(pt(5.0, 5.0), pt(5.0, 5.0));
        assert_eq!(geometry.parameter_at(5.0, 5.0, GradientOptions::all()), None);
    }

    #[test]
    fn test_concentric_radial() {
        let geometry = GradientGeometry::radial(pt(50.0, 50.0), 0.0, pt(50.0, 50.0), 10.0);
        let none = GradientOptions::empty();
        let t = geometry.parameter_at(55.0, 50.0, none).unwrap();
        assert!((t - 0.5).abs() < 1e-5);
        assert_eq!(geometry.parameter_at(70.0, 50.0, none), None);
        assert_eq!(geometry.parameter_at(70.0, 50.0, GradientOptions::DRAWS_AFTER_END), Some(1.0));
    }

    #[test]
    fn test_radial_inner_circle_needs_before_start() {
        let geometry = GradientGeometry::radial(pt(0.0, 0.0), 10.0, pt(0.0, 0.0), 20.0);
        assert_eq!(geometry.parameter_at(5.0, 0.0, GradientOptions::empty()), None);
        assert_eq!(
            geometry.parameter_at(5.0, 0.0, GradientOptions::DRAWS_BEFORE_START),
            Some(0.0)
        );
        let t = geometry.parameter_at(15.0, 0.0, GradientOptions::empty()).unwrap();
        assert!((t - 0.5).abs() < 1e-5);
    }

    #[test]
    fn test_fill_linear_left_to_right() {
        let mut canvas = Canvas::new(100, 10).unwrap();
        let geometry = GradientGeometry::linear(pt(0.0, 0.0), pt(100.0, 0.0));
        let painted = fill_gradient(&mut canvas, &geometry, &red_blue(), GradientOptions::empty());
        assert_eq!(painted, 1000);

        let left = canvas.get_pixel(0, 5).unwrap();
        let right = canvas.get_pixel(99, 5).unwrap();
        assert!(left.r > 250 && left.b < 5);
        assert!(right.b > 250 && right.r < 5);
    }

    #[test]
    fn test_paint_gradient_leaves_uncovered_pixels() {
        let mut canvas = Canvas::new(20, 1).unwrap();
        canvas.clear(Color::GREEN);
        let geometry = GradientGeometry::linear(pt(0.0, 0.0), pt(10.0, 0.0));
        paint_gradient(&mut canvas, &geometry, &red_blue(), GradientOptions::empty()).unwrap();
        assert_eq!(canvas.get_pixel(15, 0), Some(Color::GREEN));
        assert_ne!(canvas.get_pixel(2, 0), Some(Color::GREEN));
    }
}
