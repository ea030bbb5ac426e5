//! Line and fill style resolution (Line Style / Fill Style macros).

use super::defaults;
use crate::attributes::AttributeView;
use crate::color::Color;
use crate::tags::Tag;

/// Style derived from one graphic record.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResolvedStyle {
    pub thickness: f32,
    pub dashed: bool,
    pub stroke: Color,
    /// Fill color; equals `stroke` unless the fill style sets its own.
    pub fill: Color,
    pub filled: bool,
}

/// Resolve the full style of a graphic record.
///
/// Missing sub-records fall back to defaults, never fail: no line style
/// keeps `default_color`, no fill style reuses the stroke color.
pub fn resolve_style<A: AttributeView>(record: &A, default_color: Color) -> ResolvedStyle {
    let line_style = record.nested(Tag::LINE_STYLE_SEQUENCE);
    let fill_style = record.nested(Tag::FILL_STYLE_SEQUENCE);
    let stroke = pattern_color(line_style, default_color);
    ResolvedStyle {
        thickness: line_thickness(line_style),
        dashed: is_dashed(line_style),
        stroke,
        fill: pattern_color(fill_style, stroke),
        filled: is_filled(record),
    }
}

pub fn line_thickness<A: AttributeView>(line_style: Option<&A>) -> f32 {
    line_style.map_or(defaults::DEFAULT_THICKNESS, |s| {
        s.float_or(Tag::LINE_THICKNESS, defaults::DEFAULT_THICKNESS)
    })
}

pub fn is_dashed<A: AttributeView>(line_style: Option<&A>) -> bool {
    line_style.is_some_and(|s| s.string_eq(Tag::LINE_PATTERN, "DASHED"))
}

pub fn is_filled<A: AttributeView>(record: &A) -> bool {
    record.string_eq(Tag::GRAPHIC_FILLED, "Y")
}

/// Color of a style sub-record, or `default` when it has none.
///
/// The CIELab value gives an opaque color; an opacity below 1 then
/// replaces its alpha channel.
pub fn pattern_color<A: AttributeView>(style: Option<&A>, default: Color) -> Color {
    let Some(style) = style else {
        return default;
    };
    let color = style
        .ints(Tag::PATTERN_ON_COLOR_CIELAB_VALUE)
        .and_then(|lab| Color::from_dicom_lab(&lab))
        .unwrap_or(default);
    match style.float(Tag::PATTERN_ON_OPACITY) {
        Some(opacity) if opacity < 1.0 => color.with_opacity(opacity),
        _ => color,
    }
}
