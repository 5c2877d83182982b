//! Gradient label
//!
//! [`GradientLabel`] owns the text attributes, the gradient state and a
//! memoized glyph image. Setters only record state; nothing is painted until
//! [`GradientLabel::draw`] or [`GradientLabel::render`] is called.
//!
//! Setters compare against the stored value first. A call that changes
//! nothing does not mark the label as needing display; any other call drops
//! the cached glyph image and marks it.

use gradlabel_render::{Canvas, Color, CompositeMode, GradientOptions};
use gradlabel_text::TextAlign;
use tracing::{debug, trace, warn};

use crate::compositor::{self, GradientPaint};
use crate::config::LabelConfig;
use crate::geometry::{NormPoint, PixelSize, RadiiScalingRule};
use crate::glyphs::{GlyphSource, LabelText};
use crate::gradient::GradientSpec;
use crate::{LabelError, Result, TextGradientLocation};

/// Store `value` in `slot`, reporting whether anything changed
fn update<T: PartialEq>(slot: &mut T, value: T) -> bool {
    if *slot == value {
        false
    } else {
        *slot = value;
        true
    }
}

/// NaN and infinite values can be neither sampled nor archived
fn all_finite(values: &[f32]) -> bool {
    values.iter().all(|v| v.is_finite())
}

/// Arguments for [`GradientLabel::set_axial_gradient_parameters`]
///
/// Colors and locations left as `None` keep their current values. Options
/// left as `None` reset to the default.
#[derive(Debug, Clone, PartialEq)]
pub struct AxialParameters {
    pub start_point: NormPoint,
    pub end_point: NormPoint,
    pub colors: Option<Vec<Color>>,
    pub locations: Option<Vec<f32>>,
    pub options: Option<GradientOptions>,
}

impl AxialParameters {
    pub fn new(start_point: impl Into<NormPoint>, end_point: impl Into<NormPoint>) -> Self {
        Self {
            start_point: start_point.into(),
            end_point: end_point.into(),
            colors: None,
            locations: None,
            options: None,
        }
    }

    pub fn colors(mut self, colors: Vec<Color>) -> Self {
        self.colors = Some(colors);
        self
    }

    pub fn locations(mut self, locations: Vec<f32>) -> Self {
        self.locations = Some(locations);
        self
    }

    pub fn options(mut self, options: GradientOptions) -> Self {
        self.options = Some(options);
        self
    }
}

/// Arguments for [`GradientLabel::set_radial_gradient_parameters`]
///
/// Radii are fractions of the dimension chosen by the scaling rule
/// (`MaxBound` when `None`).
#[derive(Debug, Clone, PartialEq)]
pub struct RadialParameters {
    pub start_center: NormPoint,
    pub start_radius: f32,
    pub end_center: NormPoint,
    pub end_radius: f32,
    pub colors: Option<Vec<Color>>,
    pub locations: Option<Vec<f32>>,
    pub radii_scaling_rule: Option<RadiiScalingRule>,
    pub options: Option<GradientOptions>,
}

impl RadialParameters {
    pub fn new(
        start_center: impl Into<NormPoint>,
        start_radius: f32,
        end_center: impl Into<NormPoint>,
        end_radius: f32,
    ) -> Self {
        Self {
            start_center: start_center.into(),
            start_radius,
            end_center: end_center.into(),
            end_radius,
            colors: None,
            locations: None,
            radii_scaling_rule: None,
            options: None,
        }
    }

    pub fn colors(mut self, colors: Vec<Color>) -> Self {
        self.colors = Some(colors);
        self
    }

    pub fn locations(mut self, locations: Vec<f32>) -> Self {
        self.locations = Some(locations);
        self
    }

    pub fn radii_scaling_rule(mut self, rule: RadiiScalingRule) -> Self {
        self.radii_scaling_rule = Some(rule);
        self
    }

    pub fn options(mut self, options: GradientOptions) -> Self {
        self.options = Some(options);
        self
    }
}

/// A text label painted with a color gradient
#[derive(Debug, Clone)]
pub struct GradientLabel {
    text: LabelText,
    background_color: Option<Color>,
    size: PixelSize,
    gradient: Option<GradientSpec>,
    gradient_colors: Option<Vec<Color>>,
    gradient_locations: Option<Vec<f32>>,
    gradient_options: GradientOptions,
    text_gradient_location: TextGradientLocation,
    glyph_image: Option<Canvas>,
    needs_display: bool,
}

impl GradientLabel {
    pub fn new(content: impl Into<String>) -> Self {
        Self::with_config(content, &LabelConfig::default())
    }

    pub fn with_config(content: impl Into<String>, config: &LabelConfig) -> Self {
        Self::with_text(LabelText::with_config(content, config))
    }

    pub fn with_text(text: LabelText) -> Self {
        Self {
            text,
            background_color: None,
            size: PixelSize::default(),
            gradient: None,
            gradient_colors: None,
            gradient_locations: None,
            gradient_options: GradientOptions::default(),
            text_gradient_location: TextGradientLocation::default(),
            glyph_image: None,
            needs_display: true,
        }
    }

    // ------------------------------------------------------------------
    // Gradient parameters
    // ------------------------------------------------------------------

    /// Configure an axial gradient between two normalized points
    pub fn set_axial_gradient_parameters(&mut self, params: AxialParameters) {
        let spec = GradientSpec::Axial {
            start_point: params.start_point,
            end_point: params.end_point,
        };
        let changed = self.apply_gradient(spec, params.colors, params.locations, params.options);
        if changed {
            trace!("Axial gradient parameters changed");
            self.invalidate();
        }
    }

    /// Configure a radial gradient between two normalized circles
    pub fn set_radial_gradient_parameters(&mut self, params: RadialParameters) {
        if !all_finite(&[params.start_radius, params.end_radius]) {
            warn!(
                "Ignoring radial gradient with non-finite radii {} and {}",
                params.start_radius, params.end_radius
            );
            return;
        }
        let spec = GradientSpec::Radial {
            start_center: params.start_center,
            start_radius: params.start_radius,
            end_center: params.end_center,
            end_radius: params.end_radius,
            radii_scaling_rule: params.radii_scaling_rule.unwrap_or_default(),
        };
        let changed = self.apply_gradient(spec, params.colors, params.locations, params.options);
        if changed {
            trace!("Radial gradient parameters changed");
            self.invalidate();
        }
    }

    /// Remove the gradient, its colors, locations and options
    pub fn clear_gradient_parameters(&mut self) {
        let mut changed = update(&mut self.gradient, None);
        changed |= update(&mut self.gradient_colors, None);
        changed |= update(&mut self.gradient_locations, None);
        changed |= update(&mut self.gradient_options, GradientOptions::default());
        if changed {
            trace!("Gradient parameters cleared");
            self.invalidate();
        }
    }

    fn apply_gradient(
        &mut self,
        spec: GradientSpec,
        colors: Option<Vec<Color>>,
        locations: Option<Vec<f32>>,
        options: Option<GradientOptions>,
    ) -> bool {
        let mut changed = update(&mut self.gradient, Some(spec));
        if let Some(colors) = colors {
            changed |= update(&mut self.gradient_colors, Some(colors));
        }
        match locations {
            Some(locations) if !all_finite(&locations) => {
                warn!("Ignoring non-finite gradient locations {:?}", locations);
            }
            Some(locations) => changed |= update(&mut self.gradient_locations, Some(locations)),
            None => {}
        }
        changed |= update(&mut self.gradient_options, options.unwrap_or_default());
        changed
    }

    /// Set shape and options exactly as archived, leaving colors alone
    pub(crate) fn restore_gradient(&mut self, gradient: Option<GradientSpec>, options: GradientOptions) {
        let mut changed = update(&mut self.gradient, gradient);
        changed |= update(&mut self.gradient_options, options);
        if changed {
            self.invalidate();
        }
    }

    pub fn gradient(&self) -> Option<&GradientSpec> {
        self.gradient.as_ref()
    }

    pub fn gradient_colors(&self) -> Option<&[Color]> {
        self.gradient_colors.as_deref()
    }

    pub fn set_gradient_colors(&mut self, colors: Option<Vec<Color>>) {
        if update(&mut self.gradient_colors, colors) {
            trace!("Gradient colors changed");
            self.invalidate();
        }
    }

    pub fn gradient_locations(&self) -> Option<&[f32]> {
        self.gradient_locations.as_deref()
    }

    pub fn set_gradient_locations(&mut self, locations: Option<Vec<f32>>) {
        if let Some(values) = locations.as_deref().filter(|values| !all_finite(values)) {
            warn!("Ignoring non-finite gradient locations {:?}", values);
            return;
        }
        if update(&mut self.gradient_locations, locations) {
            trace!("Gradient locations changed");
            self.invalidate();
        }
    }

    pub fn gradient_options(&self) -> GradientOptions {
        self.gradient_options
    }

    pub fn set_gradient_options(&mut self, options: GradientOptions) {
        if update(&mut self.gradient_options, options) {
            trace!("Gradient options changed to {:?}", options);
            self.invalidate();
        }
    }

    pub fn text_gradient_location(&self) -> TextGradientLocation {
        self.text_gradient_location
    }

    pub fn set_text_gradient_location(&mut self, location: TextGradientLocation) {
        if update(&mut self.text_gradient_location, location) {
            trace!("Text gradient location changed to {:?}", location);
            self.invalidate();
        }
    }

    // ------------------------------------------------------------------
    // Text and bounds
    // ------------------------------------------------------------------

    pub fn text(&self) -> &LabelText {
        &self.text
    }

    /// Replace all text attributes at once
    pub fn set_label_text(&mut self, text: LabelText) {
        if update(&mut self.text, text) {
            self.invalidate();
        }
    }

    pub fn set_text(&mut self, content: impl Into<String>) {
        if update(&mut self.text.content, content.into()) {
            self.invalidate();
        }
    }

    pub fn set_font_families(&mut self, families: Vec<String>) {
        if update(&mut self.text.font_families, families) {
            self.invalidate();
        }
    }

    pub fn set_font_size(&mut self, size: f32) {
        if update(&mut self.text.font_size, size) {
            self.invalidate();
        }
    }

    pub fn set_text_color(&mut self, color: Color) {
        if update(&mut self.text.color, color) {
            self.invalidate();
        }
    }

    pub fn set_alignment(&mut self, alignment: TextAlign) {
        if update(&mut self.text.alignment, alignment) {
            self.invalidate();
        }
    }

    /// 0 allows any number of lines
    pub fn set_number_of_lines(&mut self, lines: usize) {
        if update(&mut self.text.number_of_lines, lines) {
            self.invalidate();
        }
    }

    pub fn set_line_height(&mut self, multiplier: f32) {
        if update(&mut self.text.line_height, multiplier) {
            self.invalidate();
        }
    }

    pub fn background_color(&self) -> Option<Color> {
        self.background_color
    }

    /// Painted beneath the content when the gradient is in the foreground
    pub fn set_background_color(&mut self, color: Option<Color>) {
        if update(&mut self.background_color, color) {
            trace!("Background color changed");
            self.invalidate();
        }
    }

    pub fn size(&self) -> PixelSize {
        self.size
    }

    pub fn set_size(&mut self, size: PixelSize) {
        if update(&mut self.size, size) {
            self.invalidate();
        }
    }

    // ------------------------------------------------------------------
    // Display
    // ------------------------------------------------------------------

    pub fn needs_display(&self) -> bool {
        self.needs_display
    }

    /// Force a full redraw, including re-rasterizing the text
    pub fn set_needs_display(&mut self) {
        self.invalidate();
    }

    /// Whether a rasterized glyph image is cached
    pub fn has_glyph_image(&self) -> bool {
        self.glyph_image.is_some()
    }

    fn invalidate(&mut self) {
        trace!("Dropping cached glyph image");
        self.glyph_image = None;
        self.needs_display = true;
    }

    /// Paint the label into the top-left corner of `canvas`
    pub fn draw(&mut self, canvas: &mut Canvas, glyphs: &mut dyn GlyphSource) -> Result<()> {
        let (width, height) = self.size.to_pixels();
        if width == 0 || height == 0 {
            return Err(LabelError::EmptyBounds {
                width: self.size.width,
                height: self.size.height,
            });
        }

        let glyph_image = match self.glyph_image.take() {
            Some(image) => image,
            None => {
                debug!("Rasterizing label text into {}x{}", width, height);
                glyphs.rasterize(&self.text, width, height)?
            }
        };

        let paint = GradientPaint::new(
            self.gradient.as_ref(),
            self.gradient_colors.as_deref(),
            self.gradient_locations.as_deref(),
            self.gradient_options,
        );
        let result =
            compositor::composite(&glyph_image, &paint, self.size, self.text_gradient_location);
        self.glyph_image = Some(glyph_image);
        let (content, _) = result?;

        if let (TextGradientLocation::Foreground, Some(background)) =
            (self.text_gradient_location, self.background_color)
        {
            canvas.fill_rect(0.0, 0.0, width as f32, height as f32, background);
        }
        canvas.draw_canvas(&content, 0, 0, CompositeMode::SourceOver);

        self.needs_display = false;
        Ok(())
    }

    /// Paint the label onto a new transparent canvas of its own size
    pub fn render(&mut self, glyphs: &mut dyn GlyphSource) -> Result<Canvas> {
        let (width, height) = self.size.to_pixels();
        if width == 0 || height == 0 {
            return Err(LabelError::EmptyBounds {
                width: self.size.width,
                height: self.size.height,
            });
        }
        let mut canvas = Canvas::try_new(width, height)?;
        self.draw(&mut canvas, glyphs)?;
        Ok(canvas)
    }
}
