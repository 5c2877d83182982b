//! gradlabel
//!
//! Text labels whose glyphs are filled with, or sit on top of, an axial or
//! radial color gradient.
//!
//! # Example
//! ```rust,ignore
//! use gradlabel::{AxialParameters, FontGlyphSource, GradientLabel, LabelConfig, PixelSize};
//! use gradlabel::render::Color;
//!
//! let config = LabelConfig::default();
//! let mut label = GradientLabel::with_config("Hello", &config);
//! label.set_size(PixelSize::new(200.0, 60.0));
//! label.set_axial_gradient_parameters(
//!     AxialParameters::new((0.0, 0.5), (1.0, 0.5)).colors(vec![Color::RED, Color::BLUE]),
//! );
//!
//! let mut glyphs = FontGlyphSource::new(&config);
//! let canvas = label.render(&mut glyphs)?;
//! ```

mod config;
pub mod archive;
pub mod compositor;
pub mod geometry;
pub mod glyphs;
pub mod gradient;
pub mod label;

pub use archive::{ArchiveError, GradientRecord, LabelArchive, TextRecord};
pub use compositor::{composite, GradientPaint};
pub use config::LabelConfig;
pub use geometry::{NormPoint, PixelSize, RadiiScalingRule};
pub use glyphs::{FontGlyphSource, GlyphSource, LabelText};
pub use gradient::GradientSpec;
pub use label::{AxialParameters, GradientLabel, RadialParameters};

// Re-export sub-crates for advanced usage
pub use gradlabel_render as render;
pub use gradlabel_text as text;

pub use gradlabel_render::{Color, GradientOptions};
pub use gradlabel_text::TextAlign;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Whether the gradient replaces the text color or sits behind the text
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum TextGradientLocation {
    /// Gradient visible only through the glyphs
    #[default]
    Foreground = 0,
    /// Gradient fills the label, glyphs drawn on top
    Background = 1,
}

impl TextGradientLocation {
    /// Unknown raw values map to the default
    pub fn from_raw(raw: u32) -> Self {
        match raw {
            1 => Self::Background,
            _ => Self::Foreground,
        }
    }

    pub fn raw(self) -> u32 {
        self as u32
    }
}

/// Label error types
#[derive(Debug, thiserror::Error)]
pub enum LabelError {
    #[error("Label bounds {width}x{height} cover no pixels")]
    EmptyBounds { width: f32, height: f32 },

    #[error(transparent)]
    Text(#[from] gradlabel_text::TextError),

    #[error(transparent)]
    Render(#[from] gradlabel_render::RenderError),

    #[error(transparent)]
    Archive(#[from] ArchiveError),
}

pub type Result<T> = std::result::Result<T, LabelError>;
