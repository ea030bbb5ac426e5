//! Default sizes and settings (pixel units)

use crate::color::Color;

/// Diameter of the marker drawn for POINT and MULTIPOINT graphics.
pub const POINT_SIZE: f64 = 3.0;
pub const DEFAULT_THICKNESS: f32 = 1.0;
pub const DEFAULT_COLOR: Color = Color::YELLOW;
/// Tolerance for the axis-alignment tests on ellipse endpoints.
pub const EPSILON: f64 = 1e-6;
/// Maximum distance between an ellipse and its cubic approximation.
pub const PATH_TOLERANCE: f64 = 0.01;
