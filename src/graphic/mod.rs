//! Graphic reconstruction for presentation-state annotations
//!
//! This module is organized into submodules:
//! - `defaults`: Default sizes and settings
//! - `coords`: Unit handling and coordinate normalization
//! - `style`: Line/fill style resolution
//! - `path`: Point/bounds glue for the `kurbo` outlines of fixed shapes
//! - `geometry`: Ellipse recovery and outline construction
//! - `shapes`: Editable and fixed shape types
//! - `compound`: Compound graphic reconstruction
//!
//! [`build_graphic`] handles Graphic Annotation items (and structured-report
//! graphics); [`build_compound_graphic`] handles Compound Graphic items.

pub mod compound;
pub mod coords;
pub mod defaults;
pub mod geometry;
pub mod path;
pub mod shapes;
pub mod style;

pub use compound::{build_compound_graphic, compound_instance_id};
pub use coords::{GraphicUnits, normalize_points, scaled_distance};
pub use geometry::EllipseGeometry;
pub use shapes::{EditableKind, EditableShape, FixedShape, Graphic, Shape, ShapeStyle};
pub use style::{ResolvedStyle, resolve_style};

use glam::{DAffine2, DVec2};
use kurbo::BezPath;

use crate::attributes::AttributeView;
use crate::color::Color;
use crate::errors::{OptionsError, ShapeError};
use crate::log::debug;
use crate::tags::Tag;
use crate::types::{BBox, NumericError};

/// Graphic types understood by the builders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GraphicType {
    Point,
    Multipoint,
    Polyline,
    Interpolated,
    Circle,
    Ellipse,
}

impl GraphicType {
    /// Case-insensitive match on the DICOM defined term.
    pub fn parse(value: &str) -> Option<Self> {
        let value = value.trim();
        [
            ("POINT", GraphicType::Point),
            ("MULTIPOINT", GraphicType::Multipoint),
            ("POLYLINE", GraphicType::Polyline),
            ("INTERPOLATED", GraphicType::Interpolated),
            ("CIRCLE", GraphicType::Circle),
            ("ELLIPSE", GraphicType::Ellipse),
        ]
        .into_iter()
        .find(|(term, _)| term.eq_ignore_ascii_case(value))
        .map(|(_, ty)| ty)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            GraphicType::Point => "POINT",
            GraphicType::Multipoint => "MULTIPOINT",
            GraphicType::Polyline => "POLYLINE",
            GraphicType::Interpolated => "INTERPOLATED",
            GraphicType::Circle => "CIRCLE",
            GraphicType::Ellipse => "ELLIPSE",
        }
    }
}

/// Caller-supplied parameters for one reconstruction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BuildOptions {
    /// Used when the record has no line style.
    pub default_color: Color,
    pub label_visible: bool,
    /// Width of the displayed area, for display-unit coordinates.
    pub width: f64,
    /// Height of the displayed area, for display-unit coordinates.
    pub height: f64,
    /// Build editable shapes where the graphic type allows it.
    pub editable: bool,
    /// Applied to display-unit coordinates before they are scaled.
    pub inverse_transform: Option<DAffine2>,
    /// Structured-report graphics are always pixel-unit and always closed.
    pub structured_report: bool,
}

impl BuildOptions {
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            default_color: defaults::DEFAULT_COLOR,
            label_visible: true,
            width,
            height,
            editable: false,
            inverse_transform: None,
            structured_report: false,
        }
    }

    /// Like [`BuildOptions::new`], rejecting NaN, infinite or negative sizes.
    pub fn try_new(width: f64, height: f64) -> Result<Self, OptionsError> {
        let width = NumericError::check_non_negative(width)
            .map_err(|source| OptionsError::ViewSize { axis: "width", source })?;
        let height = NumericError::check_non_negative(height)
            .map_err(|source| OptionsError::ViewSize { axis: "height", source })?;
        Ok(Self::new(width, height))
    }

    pub fn with_default_color(mut self, color: Color) -> Self {
        self.default_color = color;
        self
    }

    pub fn with_label_visible(mut self, visible: bool) -> Self {
        self.label_visible = visible;
        self
    }

    pub fn with_editable(mut self, editable: bool) -> Self {
        self.editable = editable;
        self
    }

    pub fn with_inverse_transform(mut self, inverse: DAffine2) -> Self {
        self.inverse_transform = Some(inverse);
        self
    }

    pub fn with_structured_report(mut self, structured_report: bool) -> Self {
        self.structured_report = structured_report;
        self
    }
}

/// Raw coordinates of one record, transformed but not yet scaled.
pub(crate) struct GraphicInput {
    raw_len: usize,
    raw: Vec<DVec2>,
    points: Vec<DVec2>,
    units: GraphicUnits,
    width: f64,
    height: f64,
}

impl GraphicInput {
    pub(crate) fn new(raw: &[f32], units: GraphicUnits, options: &BuildOptions) -> Self {
        // The inverse viewport transform is expressed in display space
        let inverse = match units {
            GraphicUnits::Display => options.inverse_transform.as_ref(),
            GraphicUnits::Pixel => None,
        };
        Self {
            raw_len: raw.len(),
            raw: coords::transform_points(raw, inverse),
            points: normalize_points(raw, units, options.width, options.height, inverse),
            units,
            width: options.width,
            height: options.height,
        }
    }

    /// Number of raw float values.
    pub(crate) fn raw_len(&self) -> usize {
        self.raw_len
    }

    /// Pixel-space points.
    pub(crate) fn points(&self) -> Vec<DVec2> {
        self.points.clone()
    }

    pub(crate) fn distance(&self, i: usize, j: usize) -> f64 {
        scaled_distance(self.raw[i], self.raw[j], self.units, self.width, self.height)
    }
}

/// Reconstruct the shape described by a Graphic Annotation item.
///
/// Returns `Ok(None)` for unknown graphic types and for point counts that do
/// not fit the type. The only error is an editable polygon or polyline whose
/// handle list is degenerate; retry with `editable = false` (see
/// [`build_graphic_or_fixed`]) or drop the annotation.
pub fn build_graphic<A: AttributeView>(
    record: &A,
    options: &BuildOptions,
) -> Result<Option<Shape>, ShapeError> {
    let units = if options.structured_report {
        GraphicUnits::Pixel
    } else {
        GraphicUnits::from_record(record, Tag::GRAPHIC_ANNOTATION_UNITS)
    };

    let type_name = record.string(Tag::GRAPHIC_TYPE);
    let Some(graphic_type) = type_name.and_then(GraphicType::parse) else {
        debug!(graphic_type = ?type_name, "unsupported graphic type");
        return Ok(None);
    };
    let Some(raw) = record.floats(Tag::GRAPHIC_DATA) else {
        debug!(graphic_type = graphic_type.as_str(), "no graphic data");
        return Ok(None);
    };

    let style = ShapeStyle::from_resolved(
        &resolve_style(record, options.default_color),
        options.label_visible,
        record.int(Tag::GRAPHIC_GROUP_ID),
    );
    let input = GraphicInput::new(&raw, units, options);
    let editable = options.editable;

    let shape = match graphic_type {
        GraphicType::Polyline => {
            polyline_shape(&input, editable, options.structured_report, style)?
        }
        GraphicType::Ellipse => ellipse_shape(&input, editable, style),
        GraphicType::Circle => circle_shape(&input, editable, style),
        GraphicType::Point => point_shape(&input, editable, style),
        GraphicType::Multipoint => multipoint_shape(&input, style),
        GraphicType::Interpolated => interpolated_shape(&input, style),
    };
    if shape.is_none() {
        debug!(
            graphic_type = graphic_type.as_str(),
            values = input.raw_len(),
            "graphic data does not fit the graphic type"
        );
    }
    Ok(shape)
}

/// [`build_graphic`], falling back to a fixed shape when the editable
/// construction rejects the handle list.
pub fn build_graphic_or_fixed<A: AttributeView>(record: &A, options: &BuildOptions) -> Option<Shape> {
    match build_graphic(record, options) {
        Ok(shape) => shape,
        Err(err) => {
            debug!(%err, "editable construction failed, building a fixed shape");
            #[cfg(not(feature = "tracing"))]
            let _ = &err;
            build_graphic(record, &options.with_editable(false)).ok().flatten()
        }
    }
}

fn polyline_shape(
    input: &GraphicInput,
    editable: bool,
    structured_report: bool,
    style: ShapeStyle,
) -> Result<Option<Shape>, ShapeError> {
    let mut points = input.points();
    if points.len() < 2 {
        return Ok(None);
    }
    let first = points[0];
    if structured_report && points.last() != Some(&first) {
        points.push(first);
    }
    let closed = points.last() == Some(&first);

    let shape = match (editable, closed) {
        (true, true) => Shape::from(EditableShape::polygon(points)?).with_style(style),
        (true, false) => {
            Shape::from(EditableShape::polyline(points)?).with_style(style.with_filled(false))
        }
        (false, _) => {
            Shape::from(FixedShape::new(geometry::polyline_path(&points, closed))).with_style(style)
        }
    };
    Ok(Some(shape))
}

pub(crate) fn ellipse_shape(input: &GraphicInput, editable: bool, style: ShapeStyle) -> Option<Shape> {
    if input.raw_len() != 8 {
        return None;
    }
    let p = input.points();
    let ellipse = EllipseGeometry::from_axes((p[0], p[1]), (p[2], p[3]));
    // Only an unrotated ellipse fits the editable frame handles
    let shape = if editable && !ellipse.is_rotated() {
        Shape::from(EditableShape::ellipse(ellipse.frame()))
    } else {
        Shape::from(FixedShape::new(ellipse.outline()))
    };
    Some(shape.with_style(style))
}

fn circle_shape(input: &GraphicInput, editable: bool, style: ShapeStyle) -> Option<Shape> {
    if input.raw_len() != 4 {
        return None;
    }
    let center = input.points()[0];
    let radius = input.distance(0, 1);
    let shape = if editable {
        let r = DVec2::splat(radius);
        Shape::from(EditableShape::ellipse(BBox::new(center - r, center + r)))
    } else {
        Shape::from(FixedShape::new(geometry::ellipse_outline(center, radius, radius)))
    };
    Some(shape.with_style(style))
}

pub(crate) fn point_shape(input: &GraphicInput, editable: bool, style: ShapeStyle) -> Option<Shape> {
    if input.raw_len() != 2 {
        return None;
    }
    let at = input.points()[0];
    let shape = if editable {
        Shape::from(EditableShape::point(at, defaults::POINT_SIZE))
    } else {
        Shape::from(FixedShape::new(geometry::marker(at, defaults::POINT_SIZE)))
    };
    Some(shape.with_style(style.with_filled(true)))
}

fn multipoint_shape(input: &GraphicInput, style: ShapeStyle) -> Option<Shape> {
    let points = input.points();
    if points.is_empty() {
        return None;
    }
    let mut path = BezPath::new();
    for &p in &points {
        for el in geometry::marker(p, defaults::POINT_SIZE).elements() {
            path.push(*el);
        }
    }
    Some(Shape::from(FixedShape::new(path)).with_style(style.with_filled(true)))
}

fn interpolated_shape(input: &GraphicInput, style: ShapeStyle) -> Option<Shape> {
    let points = input.points();
    if points.len() < 2 {
        return None;
    }
    Some(Shape::from(FixedShape::new(geometry::interpolated_path(&points))).with_style(style))
}
