//! Label configuration

use gradlabel_render::Color;

/// Defaults applied to new labels and glyph sources
#[derive(Debug, Clone, PartialEq)]
pub struct LabelConfig {
    /// Font families tried in order
    pub font_families: Vec<String>,
    /// Font size in pixels
    pub font_size: f32,
    /// Text color used when no gradient replaces it
    pub text_color: Color,
    /// Line height multiplier
    pub line_height: f32,
    /// Load fonts installed on the system
    pub load_system_fonts: bool,
    /// Maximum rasterized glyphs kept in the cache
    pub glyph_cache_capacity: usize,
}

impl Default for LabelConfig {
    fn default() -> Self {
        Self {
            font_families: vec!["sans-serif".to_string()],
            font_size: 17.0,
            text_color: Color::BLACK,
            line_height: 1.0,
            load_system_fonts: true,
            glyph_cache_capacity: 1024,
        }
    }
}

impl LabelConfig {
    /// Defaults without system fonts, for headless use
    pub fn headless() -> Self {
        Self {
            load_system_fonts: false,
            ..Self::default()
        }
    }
}
