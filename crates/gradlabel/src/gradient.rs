//! Gradient descriptions in label space

use gradlabel_render::GradientGeometry;

use crate::geometry::{NormPoint, PixelSize, RadiiScalingRule};

/// Shape of a label gradient, independent of the label's size
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GradientSpec {
    /// Color varies along the line from `start_point` to `end_point`
    Axial {
        start_point: NormPoint,
        end_point: NormPoint,
    },
    /// Color varies between two circles. Radii are fractions of the
    /// dimension picked by `radii_scaling_rule`.
    Radial {
        start_center: NormPoint,
        start_radius: f32,
        end_center: NormPoint,
        end_radius: f32,
        radii_scaling_rule: RadiiScalingRule,
    },
}

impl GradientSpec {
    pub fn axial(start_point: impl Into<NormPoint>, end_point: impl Into<NormPoint>) -> Self {
        Self::Axial {
            start_point: start_point.into(),
            end_point: end_point.into(),
        }
    }

    pub fn radial(
        start_center: impl Into<NormPoint>,
        start_radius: f32,
        end_center: impl Into<NormPoint>,
        end_radius: f32,
        radii_scaling_rule: RadiiScalingRule,
    ) -> Self {
        Self::Radial {
            start_center: start_center.into(),
            start_radius,
            end_center: end_center.into(),
            end_radius,
            radii_scaling_rule,
        }
    }

    /// Pixel-space geometry for a label of `size`, or `None` when the
    /// label has no area
    pub fn resolve(&self, size: PixelSize) -> Option<GradientGeometry> {
        if size.is_empty() {
            return None;
        }

        let geometry = match *self {
            Self::Axial { start_point, end_point } => {
                GradientGeometry::linear(start_point.to_pixels(size), end_point.to_pixels(size))
            }
            Self::Radial { start_center, start_radius, end_center, end_radius, radii_scaling_rule } => {
                let scale = radii_scaling_rule.scale(size);
                GradientGeometry::radial(
                    start_center.to_pixels(size),
                    start_radius * scale,
                    end_center.to_pixels(size),
                    end_radius * scale,
                )
            }
        };
        Some(geometry)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gradlabel_render::Point;

    #[test]
    fn test_axial_resolves_to_pixels() {
        let spec = GradientSpec::axial((0.0, 0.5), (1.0, 0.5));
        let geometry = spec.resolve(PixelSize::new(200.0, 100.0)).unwrap();
        assert_eq!(
            geometry,
            GradientGeometry::linear(Point::from_xy(0.0, 50.0), Point::from_xy(200.0, 50.0))
        );
    }

    #[test]
    fn test_radial_radii_follow_rule() {
        let size = PixelSize::new(200.0, 100.0);
        let spec = |rule| GradientSpec::radial((0.5, 0.5), 0.0, (0.5, 0.5), 0.5, rule);

        let GradientGeometry::Radial { end_radius, end_center, .. } =
            spec(RadiiScalingRule::MaxBound).resolve(size).unwrap()
        else {
            panic!("expected radial geometry");
        };
        assert_eq!(end_radius, 100.0);
        assert_eq!((end_center.x, end_center.y), (100.0, 50.0));

        let GradientGeometry::Radial { end_radius, .. } =
            spec(RadiiScalingRule::MinBound).resolve(size).unwrap()
        else {
            panic!("expected radial geometry");
        };
        assert_eq!(end_radius, 50.0);
    }

    #[test]
    fn test_radii_are_not_clamped() {
        let spec = GradientSpec::radial((0.5, 0.5), -0.2, (0.5, 0.5), 3.0, RadiiScalingRule::Width);
        let GradientSpec::Radial { start_radius, end_radius, .. } = spec else {
            panic!("expected radial spec");
        };
        assert_eq!((start_radius, end_radius), (-0.2, 3.0));
    }

    #[test]
    fn test_empty_bounds_resolve_to_nothing() {
        let spec = GradientSpec::axial((0.0, 0.0), (1.0, 1.0));
        assert!(spec.resolve(PixelSize::new(0.0, 100.0)).is_none());
    }
}
