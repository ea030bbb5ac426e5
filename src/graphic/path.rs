//! Glue between the glam points the builders work in and the
//! [`kurbo::BezPath`] outlines fixed shapes carry.
//!
//! ```
//! use prgraphic::kurbo::BezPath;
//! use prgraphic::graphic::path;
//!
//! let mut outline = BezPath::new();
//! outline.move_to((0.0, 0.0));
//! outline.line_to((10.0, 0.0));
//! outline.line_to((10.0, 10.0));
//! outline.close_path();
//! assert!(path::is_closed(&outline));
//! assert_eq!(path::vertices(&outline).len(), 3);
//! ```

use glam::{DVec2, dvec2};
use kurbo::{BezPath, PathEl, Point, Rect, Shape as _};

use crate::types::BBox;

pub fn to_point(p: DVec2) -> Point {
    Point::new(p.x, p.y)
}

pub fn from_point(p: Point) -> DVec2 {
    dvec2(p.x, p.y)
}

pub fn bbox_from_rect(rect: Rect) -> BBox {
    BBox::new(dvec2(rect.x0, rect.y0), dvec2(rect.x1, rect.y1))
}

/// Points the pen lands on, in order (control points excluded).
pub fn vertices(path: &BezPath) -> Vec<DVec2> {
    path.elements()
        .iter()
        .filter_map(|el| match *el {
            PathEl::MoveTo(p) | PathEl::LineTo(p) | PathEl::QuadTo(_, p) | PathEl::CurveTo(_, _, p) => {
                Some(from_point(p))
            }
            PathEl::ClosePath => None,
        })
        .collect()
}

/// True when the last command closes its sub-path.
pub fn is_closed(path: &BezPath) -> bool {
    matches!(path.elements().last(), Some(PathEl::ClosePath))
}

pub fn subpath_count(path: &BezPath) -> usize {
    path.elements()
        .iter()
        .filter(|el| matches!(el, PathEl::MoveTo(_)))
        .count()
}

/// Tight bounds of the drawn curve, `None` for an empty path.
pub fn bounds(path: &BezPath) -> Option<BBox> {
    if path.elements().is_empty() {
        return None;
    }
    Some(bbox_from_rect(path.bounding_box()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quad_bounds_follow_the_curve() {
        let mut path = BezPath::new();
        path.move_to((0.0, 0.0));
        path.quad_to((5.0, 10.0), (10.0, 0.0));
        // The apex of this quadratic sits at half the control height
        let b = bounds(&path).unwrap();
        assert!(b.abs_diff_eq(&BBox::new(dvec2(0.0, 0.0), dvec2(10.0, 5.0)), 1e-9), "{b:?}");
        assert_eq!(vertices(&path), vec![dvec2(0.0, 0.0), dvec2(10.0, 0.0)]);
        assert!(!is_closed(&path));
    }

    #[test]
    fn empty_path_has_no_bounds() {
        assert_eq!(bounds(&BezPath::new()), None);
        assert_eq!(subpath_count(&BezPath::new()), 0);
    }
}
