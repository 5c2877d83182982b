//! gradlabel Render - Painting Engine
//!
//! CPU rendering of gradient labels using tiny-skia.
//!
//! This crate provides:
//! - Canvas backed by tiny-skia Pixmap
//! - Axial and two-circle radial gradient painting
//! - Glyph-image compositing (source-over, destination-in)
//! - Text rendering into glyph-coverage images

mod canvas;
pub mod composite;
pub mod gradient;
pub mod text;

pub use canvas::Canvas;
pub use composite::CompositeMode;
pub use gradient::{
    ColorStop, GradientGeometry, GradientOptions, GradientShader,
    fill_gradient, paint_gradient,
};
pub use text::TextRenderer;
pub use tiny_skia::Point;

/// Rendering error types
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error("Invalid canvas size: {width}x{height}")]
    InvalidSize { width: u32, height: u32 },

    #[error("Gradient has no colors")]
    EmptyGradient,

    #[error("Gradient has {colors} colors but {locations} locations")]
    LocationCountMismatch { colors: usize, locations: usize },

    #[error("Gradient location {0} is not a finite number")]
    InvalidLocation(f32),

    #[error("Failed to encode image: {0}")]
    Encode(String),

    #[error(transparent)]
    Text(#[from] gradlabel_text::TextError),
}

pub type Result<T> = std::result::Result<T, RenderError>;

/// Color (straight RGBA)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const WHITE: Color = Color { r: 255, g: 255, b: 255, a: 255 };
    pub const BLACK: Color = Color { r: 0, g: 0, b: 0, a: 255 };
    pub const TRANSPARENT: Color = Color { r: 0, g: 0, b: 0, a: 0 };
    pub const RED: Color = Color { r: 255, g: 0, b: 0, a: 255 };
    pub const GREEN: Color = Color { r: 0, g: 255, b: 0, a: 255 };
    pub const BLUE: Color = Color { r: 0, g: 0, b: 255, a: 255 };

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Create from hex string (e.g., "#ff0000")
    pub fn from_hex(hex: &str) -> Option<Self> {
        let hex = hex.strip_prefix('#').unwrap_or(hex);
        if !hex.is_ascii() {
            return None;
        }

        let channel = |range: std::ops::Range<usize>| u8::from_str_radix(&hex[range], 16).ok();

        match hex.len() {
            3 => {
                let r = channel(0..1)?;
                let g = channel(1..2)?;
                let b = channel(2..3)?;
                Some(Color::rgb(r * 17, g * 17, b * 17))
            }
            6 => Some(Color::rgb(channel(0..2)?, channel(2..4)?, channel(4..6)?)),
            8 => Some(Color::rgba(channel(0..2)?, channel(2..4)?, channel(4..6)?, channel(6..8)?)),
            _ => None,
        }
    }

    /// Linear interpolation of straight components, `t` clamped to [0, 1]
    pub fn lerp(self, other: Color, t: f32) -> Color {
        let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };
        let mix = |a: u8, b: u8| (a as f32 + (b as f32 - a as f32) * t).round() as u8;
        Color {
            r: mix(self.r, other.r),
            g: mix(self.g, other.g),
            b: mix(self.b, other.b),
            a: mix(self.a, other.a),
        }
    }

    pub(crate) fn premultiply(self) -> tiny_skia::PremultipliedColorU8 {
        tiny_skia::ColorU8::from_rgba(self.r, self.g, self.b, self.a).premultiply()
    }

    pub(crate) fn from_premultiplied(color: tiny_skia::PremultipliedColorU8) -> Self {
        let c = color.demultiply();
        Color::rgba(c.red(), c.green(), c.blue(), c.alpha())
    }

    pub(crate) fn to_skia(self) -> tiny_skia::Color {
        tiny_skia::Color::from_rgba8(self.r, self.g, self.b, self.a)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color_constants() {
        assert_eq!(Color::WHITE.r, 255);
        assert_eq!(Color::BLACK.r, 0);
        assert_eq!(Color::TRANSPARENT.a, 0);
    }

    #[test]
    fn test_color_from_hex() {
        assert_eq!(Color::from_hex("#ff0000"), Some(Color::RED));
        assert_eq!(Color::from_hex("00ff00"), Some(Color::GREEN));
        assert_eq!(Color::from_hex("#f00"), Some(Color::RED));
        assert_eq!(Color::from_hex("#0000ff80"), Some(Color::rgba(0, 0, 255, 128)));
        assert_eq!(Color::from_hex("#ééé"), None);
    }

    #[test]
    fn test_lerp_endpoints() {
        assert_eq!(Color::RED.lerp(Color::BLUE, 0.0), Color::RED);
        assert_eq!(Color::RED.lerp(Color::BLUE, 1.0), Color::BLUE);
        let mid = Color::BLACK.lerp(Color::WHITE, 0.5);
        assert!(mid.r == 127 || mid.r == 128);
    }

    #[test]
    fn test_premultiply_roundtrip_opaque() {
        let c = Color::rgb(12, 200, 99);
        assert_eq!(Color::from_premultiplied(c.premultiply()), c);
    }
}
