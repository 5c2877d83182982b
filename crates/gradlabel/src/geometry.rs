//! Label-space geometry
//!
//! Gradient positions are stored in normalized label space, where (0, 0) is
//! the top-left corner of the label and (1, 1) the bottom-right. They are
//! mapped to pixels only when the label is drawn.

use gradlabel_render::Point;
use serde::{Deserialize, Serialize};

/// Clamp to [0, 1]; NaN becomes 0
fn clamp_unit(value: f32) -> f32 {
    if value.is_nan() { 0.0 } else { value.clamp(0.0, 1.0) }
}

/// A point in normalized label space, each axis clamped to [0, 1]
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "(f32, f32)", into = "(f32, f32)")]
pub struct NormPoint {
    x: f32,
    y: f32,
}

impl NormPoint {
    /// Out-of-range coordinates are clamped, never rejected
    pub fn new(x: f32, y: f32) -> Self {
        Self { x: clamp_unit(x), y: clamp_unit(y) }
    }

    pub fn x(&self) -> f32 {
        self.x
    }

    pub fn y(&self) -> f32 {
        self.y
    }

    /// Absolute position inside a label of `size`
    pub fn to_pixels(self, size: PixelSize) -> Point {
        Point::from_xy(self.x * size.width, self.y * size.height)
    }
}

impl From<(f32, f32)> for NormPoint {
    fn from((x, y): (f32, f32)) -> Self {
        Self::new(x, y)
    }
}

impl From<NormPoint> for (f32, f32) {
    fn from(point: NormPoint) -> Self {
        (point.x, point.y)
    }
}

/// Label bounds in pixels
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct PixelSize {
    pub width: f32,
    pub height: f32,
}

impl PixelSize {
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// True when the bounds cover no pixels
    pub fn is_empty(&self) -> bool {
        !(self.width.is_finite() && self.height.is_finite())
            || self.width <= 0.0
            || self.height <= 0.0
    }

    /// Whole-pixel dimensions of a surface covering these bounds
    pub fn to_pixels(&self) -> (u32, u32) {
        if self.is_empty() {
            return (0, 0);
        }
        (self.width.ceil() as u32, self.height.ceil() as u32)
    }
}

/// Which label dimension scales radial gradient radii
///
/// Raw values are stable and used for persistence.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum RadiiScalingRule {
    Width = 0,
    Height = 1,
    MinBound = 2,
    #[default]
    MaxBound = 3,
}

impl RadiiScalingRule {
    /// Unknown raw values map to the default rule
    pub fn from_raw(raw: u32) -> Self {
        match raw {
            0 => Self::Width,
            1 => Self::Height,
            2 => Self::MinBound,
            3 => Self::MaxBound,
            _ => Self::default(),
        }
    }

    pub fn raw(self) -> u32 {
        self as u32
    }

    /// Factor applied to normalized radii for a label of `size`
    pub fn scale(self, size: PixelSize) -> f32 {
        match self {
            Self::Width => size.width,
            Self::Height => size.height,
            Self::MinBound => size.width.min(size.height),
            Self::MaxBound => size.width.max(size.height),
        }
    }
}
