//! Compound Graphic reconstruction.
//!
//! Compound graphics are secondary annotations layered by the producing
//! system. Only POLYLINE, ELLIPSE and POINT are reconstructed, and always as
//! fixed shapes.

use super::coords::GraphicUnits;
use super::geometry;
use super::shapes::{FixedShape, Shape, ShapeStyle};
use super::style::resolve_style;
use super::{BuildOptions, GraphicInput, GraphicType, ellipse_shape, point_shape};
use crate::attributes::AttributeView;
use crate::log::debug;
use crate::tags::Tag;

/// Reconstruct the shape described by a Compound Graphic item.
///
/// `options.editable` and `options.structured_report` do not apply here.
pub fn build_compound_graphic<A: AttributeView>(record: &A, options: &BuildOptions) -> Option<Shape> {
    let units = GraphicUnits::from_record(record, Tag::COMPOUND_GRAPHIC_UNITS);
    let type_name = record.string(Tag::COMPOUND_GRAPHIC_TYPE);
    let Some(graphic_type) = type_name.and_then(GraphicType::parse) else {
        debug!(graphic_type = ?type_name, "unknown compound graphic type");
        return None;
    };
    let raw = record.floats(Tag::GRAPHIC_DATA)?;

    let style = ShapeStyle::from_resolved(
        &resolve_style(record, options.default_color),
        options.label_visible,
        record.int(Tag::GRAPHIC_GROUP_ID),
    );
    let input = GraphicInput::new(&raw, units, options);

    match graphic_type {
        GraphicType::Polyline => {
            let points = input.points();
            if points.len() < 2 {
                return None;
            }
            let path = geometry::polyline_path(&points, false);
            Some(Shape::from(FixedShape::new(path)).with_style(style))
        }
        GraphicType::Ellipse => ellipse_shape(&input, false, style),
        GraphicType::Point => point_shape(&input, false, style),
        GraphicType::Multipoint | GraphicType::Interpolated | GraphicType::Circle => {
            debug!(graphic_type = graphic_type.as_str(), "unsupported compound graphic type");
            None
        }
    }
}

/// `CompoundGraphicInstanceID` of a compound graphic item.
pub fn compound_instance_id<A: AttributeView>(record: &A) -> Option<&str> {
    record
        .string(Tag::COMPOUND_GRAPHIC_INSTANCE_ID)
        .map(str::trim)
        .filter(|id| !id.is_empty())
}
