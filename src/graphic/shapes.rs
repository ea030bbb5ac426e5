//! Shape types produced by the graphic builders
//!
//! A [`Shape`] is either editable (it keeps its control handles and a
//! semantic kind) or fixed (only an opaque [`BezPath`] remains). Both carry a
//! [`ShapeStyle`]. Common queries go through the [`Graphic`] trait, which
//! `enum_dispatch` forwards to the variant.

use std::fmt;

use enum_dispatch::enum_dispatch;
use glam::{DVec2, dvec2};
use kurbo::BezPath;

use super::defaults;
use super::path;
use super::style::ResolvedStyle;
use crate::color::Color;
use crate::errors::ShapeError;
use crate::types::BBox;

/// Common behavior for all shapes
#[enum_dispatch]
pub trait Graphic {
    /// Style metadata attached after construction
    fn style(&self) -> &ShapeStyle;

    /// Replace the attached style metadata
    fn set_style(&mut self, style: ShapeStyle);

    /// Handle points for editable shapes, pen positions for fixed ones
    fn vertices(&self) -> Vec<DVec2>;

    fn bounds(&self) -> Option<BBox>;

    /// Whether the outline is a closed area
    fn is_closed(&self) -> bool;
}

/// Rendering metadata carried by every shape.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShapeStyle {
    pub thickness: f32,
    pub stroke: Color,
    pub fill: Color,
    pub dashed: bool,
    pub label_visible: bool,
    pub filled: bool,
    /// `GraphicGroupID`, when the record belongs to a graphic group.
    pub group_id: Option<i32>,
}

impl ShapeStyle {
    pub fn from_resolved(style: &ResolvedStyle, label_visible: bool, group_id: Option<i32>) -> Self {
        Self {
            thickness: style.thickness,
            stroke: style.stroke,
            fill: style.fill,
            dashed: style.dashed,
            label_visible,
            filled: style.filled,
            group_id,
        }
    }

    pub fn with_filled(mut self, filled: bool) -> Self {
        self.filled = filled;
        self
    }
}

impl Default for ShapeStyle {
    fn default() -> Self {
        Self {
            thickness: defaults::DEFAULT_THICKNESS,
            stroke: defaults::DEFAULT_COLOR,
            fill: defaults::DEFAULT_COLOR,
            dashed: false,
            label_visible: true,
            filled: false,
            group_id: None,
        }
    }
}

// ============================================================================
// Editable shapes
// ============================================================================

/// Semantic kind of an editable shape
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum EditableKind {
    /// Closed outline; the last handle repeats the first.
    Polygon,
    Polyline,
    /// Axis-aligned ellipse described by the eight handles of its frame.
    Ellipse,
    /// Single handle drawn with the given diameter.
    Point { size: f64 },
}

impl fmt::Display for EditableKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EditableKind::Polygon => f.write_str("polygon"),
            EditableKind::Polyline => f.write_str("polyline"),
            EditableKind::Ellipse => f.write_str("ellipse"),
            EditableKind::Point { .. } => f.write_str("point"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct EditableShape {
    kind: EditableKind,
    handles: Vec<DVec2>,
    style: ShapeStyle,
}

impl EditableShape {
    /// Closed polygon from a handle list whose last point repeats the first.
    ///
    /// Rejects lists with a zero-length edge or fewer than three distinct
    /// vertices.
    pub fn polygon(handles: Vec<DVec2>) -> Result<Self, ShapeError> {
        let kind = EditableKind::Polygon;
        check_edges(kind, &handles)?;
        if distinct_count(&handles) < 3 {
            return Err(ShapeError::InvalidShape {
                kind,
                reason: "a polygon needs at least three distinct vertices",
            });
        }
        Ok(Self::from_parts(kind, handles))
    }

    /// Open polyline. Rejects lists with a zero-length edge.
    pub fn polyline(handles: Vec<DVec2>) -> Result<Self, ShapeError> {
        let kind = EditableKind::Polyline;
        check_edges(kind, &handles)?;
        Ok(Self::from_parts(kind, handles))
    }

    /// Ellipse inscribed in `frame`.
    pub fn ellipse(frame: BBox) -> Self {
        let (min, max, c) = (frame.min, frame.max, frame.center());
        let handles = vec![
            min,
            dvec2(c.x, min.y),
            dvec2(max.x, min.y),
            dvec2(max.x, c.y),
            max,
            dvec2(c.x, max.y),
            dvec2(min.x, max.y),
            dvec2(min.x, c.y),
        ];
        Self::from_parts(EditableKind::Ellipse, handles)
    }

    pub fn point(at: DVec2, size: f64) -> Self {
        Self::from_parts(EditableKind::Point { size }, vec![at])
    }

    fn from_parts(kind: EditableKind, handles: Vec<DVec2>) -> Self {
        Self {
            kind,
            handles,
            style: ShapeStyle::default(),
        }
    }

    pub fn kind(&self) -> EditableKind {
        self.kind
    }

    pub fn handles(&self) -> &[DVec2] {
        &self.handles
    }
}

impl Graphic for EditableShape {
    fn style(&self) -> &ShapeStyle {
        &self.style
    }

    fn set_style(&mut self, style: ShapeStyle) {
        self.style = style;
    }

    fn vertices(&self) -> Vec<DVec2> {
        self.handles.clone()
    }

    fn bounds(&self) -> Option<BBox> {
        let bounds = BBox::from_points(self.handles.iter().copied())?;
        match self.kind {
            EditableKind::Point { size } => {
                let half = DVec2::splat(size / 2.0);
                Some(BBox::new(bounds.min - half, bounds.max + half))
            }
            _ => Some(bounds),
        }
    }

    fn is_closed(&self) -> bool {
        matches!(self.kind, EditableKind::Polygon | EditableKind::Ellipse)
    }
}

fn check_edges(kind: EditableKind, handles: &[DVec2]) -> Result<(), ShapeError> {
    if handles.len() < 2 {
        return Err(ShapeError::InvalidShape {
            kind,
            reason: "at least two handle points are required",
        });
    }
    if handles.windows(2).any(|w| w[0] == w[1]) {
        return Err(ShapeError::InvalidShape {
            kind,
            reason: "consecutive handle points coincide",
        });
    }
    Ok(())
}

fn distinct_count(points: &[DVec2]) -> usize {
    let mut seen: Vec<DVec2> = Vec::with_capacity(points.len());
    for p in points {
        if !seen.contains(p) {
            seen.push(*p);
        }
    }
    seen.len()
}

// ============================================================================
// Fixed shapes
// ============================================================================

/// Non-editable shape: geometry is baked into a path.
#[derive(Debug, Clone, PartialEq)]
pub struct FixedShape {
    path: BezPath,
    style: ShapeStyle,
}

impl FixedShape {
    pub fn new(path: BezPath) -> Self {
        Self {
            path,
            style: ShapeStyle::default(),
        }
    }

    pub fn path(&self) -> &BezPath {
        &self.path
    }

    /// SVG path data (`d` attribute) of the outline.
    pub fn to_svg(&self) -> String {
        self.path.to_svg()
    }

    pub fn into_path(self) -> BezPath {
        self.path
    }
}

impl Graphic for FixedShape {
    fn style(&self) -> &ShapeStyle {
        &self.style
    }

    fn set_style(&mut self, style: ShapeStyle) {
        self.style = style;
    }

    fn vertices(&self) -> Vec<DVec2> {
        path::vertices(&self.path)
    }

    fn bounds(&self) -> Option<BBox> {
        path::bounds(&self.path)
    }

    fn is_closed(&self) -> bool {
        path::is_closed(&self.path)
    }
}

// ============================================================================
// Shape
// ============================================================================

/// A reconstructed graphic, ready to hand to a presentation layer.
#[enum_dispatch(Graphic)]
#[derive(Debug, Clone, PartialEq)]
pub enum Shape {
    Editable(EditableShape),
    Fixed(FixedShape),
}

impl Shape {
    /// Attach style metadata (the last construction step).
    pub fn with_style(mut self, style: ShapeStyle) -> Self {
        self.set_style(style);
        self
    }

    pub fn is_editable(&self) -> bool {
        matches!(self, Shape::Editable(_))
    }

    pub fn as_editable(&self) -> Option<&EditableShape> {
        match self {
            Shape::Editable(s) => Some(s),
            Shape::Fixed(_) => None,
        }
    }

    pub fn as_fixed(&self) -> Option<&FixedShape> {
        match self {
            Shape::Fixed(s) => Some(s),
            Shape::Editable(_) => None,
        }
    }

    pub fn editable_kind(&self) -> Option<EditableKind> {
        self.as_editable().map(EditableShape::kind)
    }

    pub fn path(&self) -> Option<&BezPath> {
        self.as_fixed().map(FixedShape::path)
    }
}
