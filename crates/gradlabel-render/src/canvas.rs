//! Canvas - pixel buffer backed by a tiny-skia Pixmap

use tiny_skia::{Paint, Pixmap, PixmapPaint, PremultipliedColorU8, Rect, Transform};

use crate::{Color, CompositeMode, RenderError, Result};

/// Premultiplied RGBA pixel surface
#[derive(Clone)]
pub struct Canvas {
    pixmap: Pixmap,
}

impl std::fmt::Debug for Canvas {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Canvas")
            .field("width", &self.width())
            .field("height", &self.height())
            .finish()
    }
}

impl PartialEq for Canvas {
    fn eq(&self, other: &Self) -> bool {
        self.width() == other.width() && self.pixmap.data() == other.pixmap.data()
    }
}

impl Canvas {
    /// Create a transparent canvas. Zero-sized canvases are rejected.
    pub fn new(width: u32, height: u32) -> Option<Self> {
        Pixmap::new(width, height).map(|pixmap| Self { pixmap })
    }

    /// Like [`Canvas::new`] but reports the size that failed
    pub fn try_new(width: u32, height: u32) -> Result<Self> {
        Self::new(width, height).ok_or(RenderError::InvalidSize { width, height })
    }

    pub fn width(&self) -> u32 {
        self.pixmap.width()
    }

    pub fn height(&self) -> u32 {
        self.pixmap.height()
    }

    /// Fill the whole canvas, replacing its contents
    pub fn clear(&mut self, color: Color) {
        self.pixmap.fill(color.to_skia());
    }

    /// Pixel color with alpha divided out
    pub fn get_pixel(&self, x: u32, y: u32) -> Option<Color> {
        self.pixmap.pixel(x, y).map(Color::from_premultiplied)
    }

    /// Alpha at a pixel, 0 outside the canvas
    pub fn alpha_at(&self, x: u32, y: u32) -> u8 {
        self.pixmap.pixel(x, y).map_or(0, |p| p.alpha())
    }

    /// Replace a pixel (no blending)
    pub fn set_pixel(&mut self, x: u32, y: u32, color: Color) {
        if let Some(idx) = self.index(x, y) {
            self.pixmap.pixels_mut()[idx] = color.premultiply();
        }
    }

    /// Source-over a color onto a pixel, scaled by `coverage`
    pub fn blend_pixel(&mut self, x: u32, y: u32, color: Color, coverage: u8) {
        let Some(idx) = self.index(x, y) else {
            return;
        };
        if coverage == 0 || color.a == 0 {
            return;
        }

        let src = color.premultiply();
        let cov = coverage as u32;
        let src_scaled = |c: u8| div255(c as u32 * cov);
        let (sr, sg, sb, sa) = (
            src_scaled(src.red()),
            src_scaled(src.green()),
            src_scaled(src.blue()),
            src_scaled(src.alpha()),
        );

        let dst = self.pixmap.pixels()[idx];
        let inv = 255 - sa;
        let over = |s: u32, d: u8| (s + div255(d as u32 * inv)).min(255) as u8;
        let a = over(sa, dst.alpha());
        let blended = PremultipliedColorU8::from_rgba(
            over(sr, dst.red()).min(a),
            over(sg, dst.green()).min(a),
            over(sb, dst.blue()).min(a),
            a,
        );

        if let Some(blended) = blended {
            self.pixmap.pixels_mut()[idx] = blended;
        }
    }

    /// Source-over a solid rectangle
    pub fn fill_rect(&mut self, x: f32, y: f32, w: f32, h: f32, color: Color) {
        let Some(rect) = Rect::from_xywh(x, y, w, h) else {
            return;
        };
        let mut paint = Paint::default();
        paint.set_color(color.to_skia());
        paint.anti_alias = false;
        self.pixmap.fill_rect(rect, &paint, Transform::identity(), None);
    }

    /// Composite another canvas onto this one at an integer offset
    pub fn draw_canvas(&mut self, src: &Canvas, x: i32, y: i32, mode: CompositeMode) {
        let paint = PixmapPaint {
            blend_mode: mode.into(),
            ..PixmapPaint::default()
        };
        self.pixmap.draw_pixmap(x, y, src.pixmap.as_ref(), &paint, Transform::identity(), None);
    }

    /// Straight RGBA bytes, row-major
    pub fn as_bytes(&self) -> Vec<u8> {
        self.pixmap.pixels()
            .iter()
            .flat_map(|p| {
                let c = p.demultiply();
                [c.red(), c.green(), c.blue(), c.alpha()]
            })
            .collect()
    }

    /// Whether every pixel is fully transparent
    pub fn is_transparent(&self) -> bool {
        self.pixmap.pixels().iter().all(|p| p.alpha() == 0)
    }

    /// Encode as PNG
    pub fn encode_png(&self) -> Result<Vec<u8>> {
        self.pixmap.encode_png().map_err(|e| RenderError::Encode(e.to_string()))
    }

    pub fn pixmap(&self) -> &Pixmap {
        &self.pixmap
    }

    fn index(&self, x: u32, y: u32) -> Option<usize> {
        (x < self.width() && y < self.height())
            .then(|| (y as usize) * (self.width() as usize) + x as usize)
    }
}

/// Rounded division by 255
fn div255(v: u32) -> u32 {
    (v + 128 + ((v + 128) >> 8)) >> 8
}
