//! Label persistence
//!
//! A flat serde record of everything a label needs to be restored, stored as
//! JSON. Enumerations are written as their raw integer values; unknown values
//! fall back to defaults on the way in, except for the gradient kind, which
//! is reported as [`ArchiveError::UnknownGradientKind`].

use gradlabel_render::{Color, GradientOptions};
use gradlabel_text::TextAlign;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use tracing::warn;

use crate::geometry::{NormPoint, PixelSize, RadiiScalingRule};
use crate::glyphs::LabelText;
use crate::gradient::GradientSpec;
use crate::label::GradientLabel;
use crate::{LabelError, TextGradientLocation};

const AXIAL: u32 = 0;
const RADIAL: u32 = 1;

/// Archive error types
#[derive(Debug, thiserror::Error)]
pub enum ArchiveError {
    #[error("Invalid archive JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Unknown gradient kind: {0}")]
    UnknownGradientKind(u32),

    #[error("Missing field: {0}")]
    MissingField(&'static str),
}

/// Persisted gradient shape
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GradientRecord {
    /// 0 for axial, 1 for radial
    #[serde(rename = "type")]
    pub kind: u32,
    pub start_point: NormPoint,
    pub end_point: NormPoint,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_radius: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_radius: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub radii_scaling_rule: Option<u32>,
}

impl From<&GradientSpec> for GradientRecord {
    fn from(spec: &GradientSpec) -> Self {
        match *spec {
            GradientSpec::Axial { start_point, end_point } => Self {
                kind: AXIAL,
                start_point,
                end_point,
                start_radius: None,
                end_radius: None,
                radii_scaling_rule: None,
            },
            GradientSpec::Radial { start_center, start_radius, end_center, end_radius, radii_scaling_rule } => Self {
                kind: RADIAL,
                start_point: start_center,
                end_point: end_center,
                start_radius: Some(start_radius),
                end_radius: Some(end_radius),
                radii_scaling_rule: Some(radii_scaling_rule.raw()),
            },
        }
    }
}

impl TryFrom<&GradientRecord> for GradientSpec {
    type Error = ArchiveError;

    fn try_from(record: &GradientRecord) -> Result<Self, Self::Error> {
        match record.kind {
            AXIAL => Ok(GradientSpec::Axial {
                start_point: record.start_point,
                end_point: record.end_point,
            }),
            RADIAL => Ok(GradientSpec::Radial {
                start_center: record.start_point,
                start_radius: record.start_radius.ok_or(ArchiveError::MissingField("startRadius"))?,
                end_center: record.end_point,
                end_radius: record.end_radius.ok_or(ArchiveError::MissingField("endRadius"))?,
                radii_scaling_rule: record.radii_scaling_rule
                    .map(RadiiScalingRule::from_raw)
                    .unwrap_or_default(),
            }),
            kind => Err(ArchiveError::UnknownGradientKind(kind)),
        }
    }
}

/// Persisted text attributes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextRecord {
    pub content: String,
    pub font_families: Vec<String>,
    pub font_size: f32,
    pub color: Color,
    /// 0 left, 1 center, 2 right
    #[serde(default)]
    pub alignment: u32,
    #[serde(default = "default_number_of_lines")]
    pub number_of_lines: usize,
    #[serde(default = "default_line_height")]
    pub line_height: f32,
}

fn default_number_of_lines() -> usize {
    1
}

fn default_line_height() -> f32 {
    1.0
}

fn alignment_raw(align: TextAlign) -> u32 {
    match align {
        TextAlign::Left => 0,
        TextAlign::Center => 1,
        TextAlign::Right => 2,
    }
}

fn alignment_from_raw(raw: u32) -> TextAlign {
    match raw {
        1 => TextAlign::Center,
        2 => TextAlign::Right,
        _ => TextAlign::Left,
    }
}

impl From<&LabelText> for TextRecord {
    fn from(text: &LabelText) -> Self {
        Self {
            content: text.content.clone(),
            font_families: text.font_families.clone(),
            font_size: text.font_size,
            color: text.color,
            alignment: alignment_raw(text.alignment),
            number_of_lines: text.number_of_lines,
            line_height: text.line_height,
        }
    }
}

impl From<TextRecord> for LabelText {
    fn from(record: TextRecord) -> Self {
        Self {
            content: record.content,
            font_families: record.font_families,
            font_size: record.font_size,
            color: record.color,
            alignment: alignment_from_raw(record.alignment),
            number_of_lines: record.number_of_lines,
            line_height: record.line_height,
        }
    }
}

/// Everything needed to restore a [`GradientLabel`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LabelArchive {
    pub text: TextRecord,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<PixelSize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub background_color: Option<Color>,
    #[serde(
        default,
        deserialize_with = "lenient_gradient_type",
        skip_serializing_if = "Option::is_none"
    )]
    pub gradient_type: Option<GradientRecord>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gradient_colors: Option<Vec<Color>>,
    #[serde(
        default,
        deserialize_with = "lenient_gradient_locations",
        skip_serializing_if = "Option::is_none"
    )]
    pub gradient_locations: Option<Vec<f32>>,
    #[serde(default)]
    pub gradient_options: u32,
    #[serde(default)]
    pub text_gradient_location: u32,
}

/// A malformed gradient entry restores as "no gradient" instead of failing
/// the whole archive
fn lenient_gradient_type<'de, D>(deserializer: D) -> Result<Option<GradientRecord>, D::Error>
where
    D: Deserializer<'de>,
{
    lenient(deserializer, "gradientType")
}

/// JSON writes non-finite floats as `null`; such locations restore as absent
fn lenient_gradient_locations<'de, D>(deserializer: D) -> Result<Option<Vec<f32>>, D::Error>
where
    D: Deserializer<'de>,
{
    lenient(deserializer, "gradientLocations")
}

fn lenient<'de, D, T>(deserializer: D, key: &str) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let Some(value) = Option::<serde_json::Value>::deserialize(deserializer)? else {
        return Ok(None);
    };
    match serde_json::from_value(value) {
        Ok(decoded) => Ok(Some(decoded)),
        Err(e) => {
            warn!("Ignoring malformed {} entry: {}", key, e);
            Ok(None)
        }
    }
}

impl LabelArchive {
    pub fn to_json(&self) -> Result<String, ArchiveError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_json(json: &str) -> Result<Self, ArchiveError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Gradient shape, if one was stored
    pub fn gradient(&self) -> Result<Option<GradientSpec>, ArchiveError> {
        self.gradient_type.as_ref().map(GradientSpec::try_from).transpose()
    }
}

impl GradientLabel {
    /// Snapshot of the label's persistent state
    pub fn archive(&self) -> LabelArchive {
        LabelArchive {
            text: TextRecord::from(self.text()),
            size: Some(self.size()),
            background_color: self.background_color(),
            gradient_type: self.gradient().map(GradientRecord::from),
            gradient_colors: self.gradient_colors().map(<[Color]>::to_vec),
            gradient_locations: self.gradient_locations().map(<[f32]>::to_vec),
            gradient_options: self.gradient_options().bits(),
            text_gradient_location: self.text_gradient_location().raw(),
        }
    }

    /// Restore a label. A gradient that cannot be decoded is logged and
    /// dropped; the rest of the state is kept.
    pub fn from_archive(archive: LabelArchive) -> Self {
        let gradient = archive.gradient().unwrap_or_else(|e| {
            warn!("Restoring label without gradient: {}", e);
            None
        });

        let mut label = GradientLabel::with_text(LabelText::from(archive.text));
        if let Some(size) = archive.size {
            label.set_size(size);
        }
        label.set_background_color(archive.background_color);
        label.set_gradient_colors(archive.gradient_colors);
        label.set_gradient_locations(archive.gradient_locations);
        label.set_text_gradient_location(TextGradientLocation::from_raw(archive.text_gradient_location));
        label.restore_gradient(gradient, GradientOptions::from_bits_truncate(archive.gradient_options));
        label
    }

    pub fn to_json(&self) -> Result<String, LabelError> {
        Ok(self.archive().to_json()?)
    }

    pub fn from_json(json: &str) -> Result<Self, LabelError> {
        Ok(Self::from_archive(LabelArchive::from_json(json)?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_axial_record_uses_kind_zero() {
        let record = GradientRecord::from(&GradientSpec::axial((0.0, 0.0), (1.0, 1.0)));
        assert_eq!(record.kind, 0);
        assert!(record.start_radius.is_none());
    }

    #[test]
    fn test_radial_record_uses_kind_one() {
        let spec = GradientSpec::radial((0.5, 0.5), 0.0, (0.5, 0.5), 1.0, RadiiScalingRule::Height);
        let record = GradientRecord::from(&spec);
        assert_eq!(record.kind, 1);
        assert_eq!(record.radii_scaling_rule, Some(1));
        assert_eq!(GradientSpec::try_from(&record).unwrap(), spec);
    }

    #[test]
    fn test_unknown_kind_is_an_error() {
        let mut record = GradientRecord::from(&GradientSpec::axial((0.0, 0.0), (1.0, 1.0)));
        record.kind = 9;
        assert!(matches!(
            GradientSpec::try_from(&record),
            Err(ArchiveError::UnknownGradientKind(9))
        ));
    }

    #[test]
    fn test_radial_without_radius_is_an_error() {
        let json = r#"{"type": 1, "startPoint": [0.5, 0.5], "endPoint": [0.5, 0.5], "endRadius": 1.0}"#;
        let record: GradientRecord = serde_json::from_str(json).unwrap();
        assert!(matches!(
            GradientSpec::try_from(&record),
            Err(ArchiveError::MissingField("startRadius"))
        ));
    }

    #[test]
    fn test_points_are_clamped_on_decode() {
        let json = r#"{"type": 0, "startPoint": [-3.0, 0.5], "endPoint": [1.0, 9.0]}"#;
        let record: GradientRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.start_point, NormPoint::new(0.0, 0.5));
        assert_eq!(record.end_point, NormPoint::new(1.0, 1.0));
    }

    #[test]
    fn test_malformed_gradient_type_decodes_as_absent() {
        let json = r#"{
            "text": {"content": "Hi", "fontFamilies": [], "fontSize": 17.0,
                     "color": {"r": 0, "g": 0, "b": 0, "a": 255}},
            "gradientType": "not a gradient",
            "gradientColors": [{"r": 255, "g": 0, "b": 0, "a": 255}]
        }"#;
        let archive = LabelArchive::from_json(json).unwrap();
        assert!(archive.gradient_type.is_none());
        assert_eq!(archive.gradient_colors, Some(vec![Color::RED]));
        assert_eq!(archive.gradient_options, 0);
        assert_eq!(archive.text.number_of_lines, 1);
    }

    #[test]
    fn test_null_gradient_location_decodes_as_absent() {
        let json = r#"{
            "text": {"content": "Hi", "fontFamilies": [], "fontSize": 17.0,
                     "color": {"r": 0, "g": 0, "b": 0, "a": 255}},
            "gradientType": {"type": 0, "startPoint": [0.0, 0.5], "endPoint": [1.0, 0.5]},
            "gradientLocations": [0.0, null]
        }"#;
        let archive = LabelArchive::from_json(json).unwrap();
        assert!(archive.gradient_locations.is_none());
        assert!(archive.gradient_type.is_some());
        assert_eq!(archive.text.content, "Hi");
    }

    #[test]
    fn test_unknown_enum_values_fall_back() {
        let json = r#"{
            "text": {"content": "", "fontFamilies": [], "fontSize": 12.0,
                     "color": {"r": 0, "g": 0, "b": 0, "a": 255}, "alignment": 7},
            "gradientType": {"type": 1, "startPoint": [0.5, 0.5], "endPoint": [0.5, 0.5],
                             "startRadius": 0.0, "endRadius": 0.5, "radiiScalingRule": 99},
            "gradientOptions": 255,
            "textGradientLocation": 5
        }"#;
        let label = GradientLabel::from_json(json).unwrap();
        assert_eq!(label.text().alignment, TextAlign::Left);
        assert_eq!(label.text_gradient_location(), TextGradientLocation::Foreground);
        assert_eq!(label.gradient_options(), GradientOptions::all());
        let Some(GradientSpec::Radial { radii_scaling_rule, .. }) = label.gradient() else {
            panic!("expected radial gradient");
        };
        assert_eq!(*radii_scaling_rule, RadiiScalingRule::MaxBound);
    }

    #[test]
    fn test_unknown_kind_restores_without_gradient() {
        let json = r#"{
            "text": {"content": "Hi", "fontFamilies": [], "fontSize": 12.0,
                     "color": {"r": 0, "g": 0, "b": 0, "a": 255}},
            "gradientType": {"type": 4, "startPoint": [0.0, 0.0], "endPoint": [1.0, 1.0]},
            "gradientColors": [{"r": 255, "g": 0, "b": 0, "a": 255}]
        }"#;
        let label = GradientLabel::from_json(json).unwrap();
        assert!(label.gradient().is_none());
        assert_eq!(label.gradient_colors(), Some(&[Color::RED][..]));
    }

    #[test]
    fn test_invalid_json_is_an_error() {
        assert!(matches!(LabelArchive::from_json("{"), Err(ArchiveError::Json(_))));
    }
}
