//! Glyph rasterization

use ttf_parser::{Face, GlyphId, OutlineBuilder};

/// Coverage bitmap for one glyph
#[derive(Debug, Clone, PartialEq)]
pub struct RasterizedGlyph {
    pub glyph_id: u16,
    pub width: u32,
    pub height: u32,
    /// Left edge relative to the pen position
    pub bearing_x: i32,
    /// Top edge above the baseline
    pub bearing_y: i32,
    /// Coverage, one byte per pixel, row-major
    pub bitmap: Vec<u8>,
}

impl RasterizedGlyph {
    /// A glyph with no ink (spaces, missing outlines)
    pub fn empty(glyph_id: u16) -> Self {
        Self {
            glyph_id,
            width: 0,
            height: 0,
            bearing_x: 0,
            bearing_y: 0,
            bitmap: Vec::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Coverage at a bitmap pixel, 0 outside
    pub fn coverage(&self, x: u32, y: u32) -> u8 {
        if x >= self.width || y >= self.height {
            return 0;
        }
        self.bitmap[(y * self.width + x) as usize]
    }
}

/// Glyph rasterizer using tiny-skia
#[derive(Debug, Clone)]
pub struct GlyphRasterizer {
    pub anti_alias: bool,
}

impl GlyphRasterizer {
    pub fn new() -> Self {
        Self { anti_alias: true }
    }

    /// Rasterize a glyph from font data
    pub fn rasterize(
        &self,
        font_data: &[u8],
        face_index: u32,
        glyph_id: u16,
        font_size: f32,
    ) -> Option<RasterizedGlyph> {
        let face = Face::parse(font_data, face_index).ok()?;
        self.rasterize_from_face(&face, glyph_id, font_size)
    }

    /// Rasterize a glyph from a parsed face
    pub fn rasterize_from_face(
        &self,
        face: &Face<'_>,
        glyph_id: u16,
        font_size: f32,
    ) -> Option<RasterizedGlyph> {
        let glyph = GlyphId(glyph_id);
        let Some(bbox) = face.glyph_bounding_box(glyph) else {
            return Some(RasterizedGlyph::empty(glyph_id));
        };

        let scale = font_size / face.units_per_em() as f32;

        // Snap the box outward to whole pixels so edges keep their coverage
        let left = (bbox.x_min as f32 * scale).floor();
        let top = (bbox.y_max as f32 * scale).ceil();
        let right = (bbox.x_max as f32 * scale).ceil();
        let bottom = (bbox.y_min as f32 * scale).floor();

        let width = (right - left) as u32;
        let height = (top - bottom) as u32;
        if width == 0 || height == 0 {
            return Some(RasterizedGlyph::empty(glyph_id));
        }

        let mut builder = PathBuilder::new(scale, left, top);
        face.outline_glyph(glyph, &mut builder)?;
        let path = builder.finish()?;

        let mut pixmap = tiny_skia::Pixmap::new(width, height)?;
        let mut paint = tiny_skia::Paint::default();
        paint.set_color(tiny_skia::Color::WHITE);
        paint.anti_alias = self.anti_alias;

        pixmap.fill_path(
            &path,
            &paint,
            tiny_skia::FillRule::Winding,
            tiny_skia::Transform::identity(),
            None,
        );

        let bitmap = pixmap.pixels().iter().map(|p| p.alpha()).collect();

        Some(RasterizedGlyph {
            glyph_id,
            width,
            height,
            bearing_x: left as i32,
            bearing_y: top as i32,
            bitmap,
        })
    }
}

impl Default for GlyphRasterizer {
    fn default() -> Self {
        Self::new()
    }
}

/// Converts font-unit outlines to a pixel-space tiny-skia path
struct PathBuilder {
    builder: tiny_skia::PathBuilder,
    scale: f32,
    /// Pixel-space left edge of the bitmap
    left: f32,
    /// Pixel-space top edge of the bitmap (y up)
    top: f32,
}

impl PathBuilder {
    fn new(scale: f32, left: f32, top: f32) -> Self {
        Self {
            builder: tiny_skia::PathBuilder::new(),
            scale,
            left,
            top,
        }
    }

    fn x(&self, x: f32) -> f32 {
        x * self.scale - self.left
    }

    fn y(&self, y: f32) -> f32 {
        self.top - y * self.scale
    }

    fn finish(self) -> Option<tiny_skia::Path> {
        self.builder.finish()
    }
}

impl OutlineBuilder for PathBuilder {
    fn move_to(&mut self, x: f32, y: f32) {
        self.builder.move_to(self.x(x), self.y(y));
    }

    fn line_to(&mut self, x: f32, y: f32) {
        self.builder.line_to(self.x(x), self.y(y));
    }

    fn quad_to(&mut self, x1: f32, y1: f32, x: f32, y: f32) {
        self.builder.quad_to(self.x(x1), self.y(y1), self.x(x), self.y(y));
    }

    fn curve_to(&mut self, x1: f32, y1: f32, x2: f32, y2: f32, x: f32, y: f32) {
        self.builder.cubic_to(
            self.x(x1), self.y(y1),
            self.x(x2), self.y(y2),
            self.x(x), self.y(y),
        );
    }

    fn close(&mut self) {
        self.builder.close();
    }
}
