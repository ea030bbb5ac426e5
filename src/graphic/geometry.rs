//! Geometry functions: ellipse recovery and outline/path creation.
//!
//! Everything here works on pixel-space points; unit conversion happens
//! before these are called.

use std::f64::consts::FRAC_PI_2;

use glam::{DVec2, dvec2};
use kurbo::{BezPath, Ellipse, Shape as _};

use super::defaults::{EPSILON, PATH_TOLERANCE};
use super::path::to_point;
use crate::types::BBox;

/// Ellipse parameters recovered from two axis endpoint pairs.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EllipseGeometry {
    pub center: DVec2,
    /// Half the major endpoint distance.
    pub semi_major: f64,
    /// Half the minor endpoint distance.
    pub semi_minor: f64,
    /// Angle of the major axis in radians.
    pub rotation: f64,
}

impl EllipseGeometry {
    /// Recover the ellipse from its major (`major.0`, `major.1`) and minor
    /// axis endpoints.
    ///
    /// Axis-aligned major axes get an exact angle: `π/2` when both
    /// endpoints share x, `0` when they share y.
    pub fn from_axes(major: (DVec2, DVec2), minor: (DVec2, DVec2)) -> Self {
        let (m1, m2) = major;
        let center = (m1 + m2) * 0.5;
        let rotation = if is_equal(m1.x, m2.x) {
            FRAC_PI_2
        } else if is_equal(m1.y, m2.y) {
            0.0
        } else {
            (m2.y - center.y).atan2(m2.x - center.x)
        };
        EllipseGeometry {
            center,
            semi_major: m1.distance(m2) / 2.0,
            semi_minor: minor.0.distance(minor.1) / 2.0,
            rotation,
        }
    }

    pub fn is_rotated(&self) -> bool {
        !is_equal(self.rotation, 0.0)
    }

    /// Bounding frame of the unrotated ellipse.
    pub fn frame(&self) -> BBox {
        let half = dvec2(self.semi_major, self.semi_minor);
        BBox::new(self.center - half, self.center + half)
    }

    pub fn to_kurbo(&self) -> Ellipse {
        Ellipse::new(
            to_point(self.center),
            (self.semi_major, self.semi_minor),
            self.rotation,
        )
    }

    /// Closed outline, rotated about the center.
    pub fn outline(&self) -> BezPath {
        self.to_kurbo().to_path(PATH_TOLERANCE)
    }
}

fn is_equal(a: f64, b: f64) -> bool {
    (a - b).abs() < EPSILON
}

/// Closed axis-aligned ellipse outline.
pub fn ellipse_outline(center: DVec2, rx: f64, ry: f64) -> BezPath {
    Ellipse::new(to_point(center), (rx, ry), 0.0).to_path(PATH_TOLERANCE)
}

/// Small filled-circle marker of the given diameter.
pub fn marker(center: DVec2, size: f64) -> BezPath {
    ellipse_outline(center, size / 2.0, size / 2.0)
}

/// Straight segments through every point, optionally closed.
pub fn polyline_path(points: &[DVec2], close: bool) -> BezPath {
    let mut path = BezPath::new();
    let Some((&first, rest)) = points.split_first() else {
        return path;
    };
    path.move_to(to_point(first));
    for &p in rest {
        path.line_to(to_point(p));
    }
    if close {
        path.close_path();
    }
    path
}

/// Smooth curve through every point.
///
/// Each segment `prev → cur` becomes a quadratic whose control point sits
/// at the segment midpoint, pushed a quarter of the segment length along the
/// unit perpendicular `(-dy, dx) / dist`. Coincident points produce a plain
/// line segment.
pub fn interpolated_path(points: &[DVec2]) -> BezPath {
    let mut path = BezPath::new();
    let Some((&first, _)) = points.split_first() else {
        return path;
    };
    path.move_to(to_point(first));
    for pair in points.windows(2) {
        let (prev, cur) = (pair[0], pair[1]);
        let d = cur - prev;
        let dist = d.length();
        if dist <= 0.0 {
            path.line_to(to_point(cur));
            continue;
        }
        let perp = dvec2(-d.y / dist, d.x / dist);
        let ctrl = (prev + cur) * 0.5 + perp * (dist * 0.25);
        path.quad_to(to_point(ctrl), to_point(cur));
    }
    path
}
