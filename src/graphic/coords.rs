//! Coordinate normalization: raw `GraphicData` → pixel-space points.

use glam::{DAffine2, DVec2, dvec2};

use crate::attributes::AttributeView;
use crate::log::debug;
use crate::tags::Tag;

/// Unit of the raw coordinates in a graphic record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GraphicUnits {
    /// Image pixel coordinates.
    #[default]
    Pixel,
    /// Fractions of the displayed area, in `[0, 1]`.
    Display,
}

impl GraphicUnits {
    /// `Display` iff the attribute reads "DISPLAY" (any case).
    pub fn from_record(record: &impl AttributeView, tag: Tag) -> Self {
        if record.string_eq(tag, "DISPLAY") {
            GraphicUnits::Display
        } else {
            GraphicUnits::Pixel
        }
    }

    pub fn is_display(self) -> bool {
        self == GraphicUnits::Display
    }

    /// Per-axis factor applied to raw coordinates.
    pub fn scale(self, width: f64, height: f64) -> DVec2 {
        match self {
            GraphicUnits::Display => dvec2(width, height),
            GraphicUnits::Pixel => DVec2::ONE,
        }
    }
}

/// Split a flat `x0, y0, x1, y1, ...` array into points.
///
/// A trailing unpaired coordinate is dropped.
pub fn pair_up(raw: &[f32]) -> Vec<DVec2> {
    let chunks = raw.chunks_exact(2);
    if !chunks.remainder().is_empty() {
        debug!(len = raw.len(), "odd coordinate count, dropping the last value");
    }
    chunks
        .map(|xy| dvec2(f64::from(xy[0]), f64::from(xy[1])))
        .collect()
}

/// Raw points after the optional inverse transform, before unit scaling.
pub fn transform_points(raw: &[f32], inverse: Option<&DAffine2>) -> Vec<DVec2> {
    let points = pair_up(raw);
    match inverse {
        Some(t) => points.into_iter().map(|p| t.transform_point2(p)).collect(),
        None => points,
    }
}

/// Produce the final pixel-space points.
///
/// The inverse transform (if any) is applied to the raw pairs first, then
/// display-unit coordinates are multiplied by `width`/`height`.
pub fn normalize_points(
    raw: &[f32],
    units: GraphicUnits,
    width: f64,
    height: f64,
    inverse: Option<&DAffine2>,
) -> Vec<DVec2> {
    let scale = units.scale(width, height);
    transform_points(raw, inverse)
        .into_iter()
        .map(|p| p * scale)
        .collect()
}

/// Distance between two raw points with each axis scaled before measuring.
pub fn scaled_distance(a: DVec2, b: DVec2, units: GraphicUnits, width: f64, height: f64) -> f64 {
    ((a - b) * units.scale(width, height)).length()
}
