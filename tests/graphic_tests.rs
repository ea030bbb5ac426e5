//! End-to-end reconstruction of graphic annotation records.
//!
//! Run with: cargo test --features tracing -- --nocapture
//! and RUST_LOG=prgraphic=debug to see skipped records.

use glam::{DAffine2, DVec2, dvec2};
use prgraphic::graphic::path;
use prgraphic::kurbo::{PathEl, Point};
use prgraphic::{
    BBox, BuildOptions, Color, Dataset, EditableKind, Graphic, Shape, ShapeError, Tag,
    build_compound_graphic, build_graphic, build_graphic_or_fixed,
};

/// Slack for bounds of cubic ellipse approximations
const CURVE_TOL: f64 = 0.02;

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

fn graphic(ty: &str, data: &[f32]) -> Dataset {
    Dataset::new()
        .with_str(Tag::GRAPHIC_TYPE, ty)
        .with_floats(Tag::GRAPHIC_DATA, data.to_vec())
}

fn pixel_options() -> BuildOptions {
    BuildOptions::new(512.0, 512.0)
}

fn build(record: &Dataset, options: &BuildOptions) -> Shape {
    build_graphic(record, options)
        .expect("build should not fail")
        .expect("record should produce a shape")
}

fn bbox(x0: f64, y0: f64, x1: f64, y1: f64) -> BBox {
    BBox::new(dvec2(x0, y0), dvec2(x1, y1))
}

fn assert_bounds_near(shape: &Shape, expected: BBox) {
    let bounds = shape.bounds().expect("shape should have bounds");
    assert!(
        bounds.abs_diff_eq(&expected, CURVE_TOL),
        "bounds {bounds:?} are not within {CURVE_TOL} of {expected:?}"
    );
}

fn fmt_points(points: &[DVec2]) -> String {
    points
        .iter()
        .map(|p| format!("{},{}", p.x, p.y))
        .collect::<Vec<_>>()
        .join(" ")
}

// =============================================================================
// POLYLINE
// =============================================================================

#[test]
fn closed_polyline_becomes_editable_polygon() {
    init_tracing();
    let record = graphic("POLYLINE", &[0.0, 0.0, 10.0, 0.0, 10.0, 10.0, 0.0, 0.0]);
    let shape = build(&record, &pixel_options().with_editable(true));
    assert_eq!(shape.editable_kind(), Some(EditableKind::Polygon));
    assert_eq!(shape.vertices().len(), 4);
    assert!(shape.is_closed());
}

#[test]
fn open_editable_polyline_is_never_filled() {
    let record = graphic("POLYLINE", &[0.0, 0.0, 10.0, 0.0, 10.0, 10.0]).with_str(Tag::GRAPHIC_FILLED, "Y");
    let shape = build(&record, &pixel_options().with_editable(true));
    assert_eq!(shape.editable_kind(), Some(EditableKind::Polyline));
    assert!(!shape.style().filled);
    assert!(!shape.is_closed());
}

#[test]
fn structured_report_polyline_is_force_closed() {
    let record = graphic("POLYLINE", &[0.0, 0.0, 10.0, 0.0, 10.0, 10.0])
        .with_str(Tag::GRAPHIC_ANNOTATION_UNITS, "DISPLAY");
    let options = pixel_options().with_structured_report(true);

    let editable = build(&record, &options.with_editable(true));
    assert_eq!(editable.editable_kind(), Some(EditableKind::Polygon));
    let handles = editable.vertices();
    assert_eq!(handles.len(), 4);
    assert_eq!(handles.first(), handles.last());
    // Structured-report data is pixel data regardless of the units attribute
    assert_eq!(handles[1], dvec2(10.0, 0.0));

    let fixed = build(&record, &options);
    assert!(fixed.is_closed());
    insta::assert_snapshot!(fmt_points(&fixed.vertices()), @"0,0 10,0 10,10 0,0");
}

#[test]
fn degenerate_editable_polyline_falls_back_to_fixed() {
    init_tracing();
    let record = graphic("POLYLINE", &[0.0, 0.0, 0.0, 0.0, 5.0, 5.0]);
    let options = pixel_options().with_editable(true);
    let err = build_graphic(&record, &options).unwrap_err();
    assert!(matches!(err, ShapeError::InvalidShape { kind: EditableKind::Polyline, .. }));

    let shape = build_graphic_or_fixed(&record, &options).unwrap();
    assert!(!shape.is_editable());
    assert_eq!(shape.vertices().len(), 3);
}

// =============================================================================
// ELLIPSE / CIRCLE
// =============================================================================

#[test]
fn axis_aligned_ellipse_is_editable() {
    let record = graphic("ELLIPSE", &[0.0, 5.0, 10.0, 5.0, 5.0, 3.0, 5.0, 7.0]);
    let shape = build(&record, &pixel_options().with_editable(true));
    assert_eq!(shape.editable_kind(), Some(EditableKind::Ellipse));
    assert_eq!(shape.bounds(), Some(bbox(0.0, 3.0, 10.0, 7.0)));
}

#[test]
fn vertical_major_axis_is_rotated_and_fixed() {
    let record = graphic("ELLIPSE", &[5.0, 0.0, 5.0, 10.0, 3.0, 5.0, 7.0, 5.0]);
    let shape = build(&record, &pixel_options().with_editable(true));
    assert!(!shape.is_editable());
    assert!(shape.is_closed());
    assert_bounds_near(&shape, bbox(3.0, 0.0, 7.0, 10.0));
}

#[test]
fn diagonal_ellipse_bounds_hug_the_curve() {
    // Circle of radius sqrt(50) around (5, 5), whatever its rotation
    let record = graphic("ELLIPSE", &[0.0, 0.0, 10.0, 10.0, 0.0, 10.0, 10.0, 0.0]);
    let shape = build(&record, &pixel_options().with_editable(true));
    assert!(!shape.is_editable());
    let r = 50f64.sqrt();
    assert_bounds_near(&shape, bbox(5.0 - r, 5.0 - r, 5.0 + r, 5.0 + r));

    // Semi-axes sqrt(50) and sqrt(8) at 45°: half extent sqrt((50 + 8) / 2)
    let record = graphic("ELLIPSE", &[0.0, 0.0, 10.0, 10.0, 3.0, 7.0, 7.0, 3.0]);
    let shape = build(&record, &pixel_options());
    let half = 29f64.sqrt();
    assert_bounds_near(&shape, bbox(5.0 - half, 5.0 - half, 5.0 + half, 5.0 + half));
}

#[test]
fn display_ellipse_axes_scale_per_axis() {
    let record = graphic("ELLIPSE", &[0.0, 0.5, 1.0, 0.5, 0.5, 0.25, 0.5, 0.75])
        .with_str(Tag::GRAPHIC_ANNOTATION_UNITS, "DISPLAY");
    let options = BuildOptions::new(200.0, 100.0);

    let editable = build(&record, &options.with_editable(true));
    assert_eq!(editable.editable_kind(), Some(EditableKind::Ellipse));
    assert_eq!(editable.bounds(), Some(bbox(0.0, 25.0, 200.0, 75.0)));

    let fixed = build(&record, &options);
    assert_bounds_near(&fixed, bbox(0.0, 25.0, 200.0, 75.0));
}

#[test]
fn ellipse_needs_exactly_four_points() {
    init_tracing();
    let record = graphic("ELLIPSE", &[0.0, 5.0, 10.0, 5.0, 5.0, 3.0]);
    assert_eq!(build_graphic(&record, &pixel_options()), Ok(None));
}

#[test]
fn circle_from_center_and_perimeter_point() {
    let record = graphic("CIRCLE", &[10.0, 10.0, 13.0, 10.0]);

    let fixed = build(&record, &pixel_options());
    assert!(fixed.is_closed());
    assert_bounds_near(&fixed, bbox(7.0, 7.0, 13.0, 13.0));

    let editable = build(&record, &pixel_options().with_editable(true));
    assert_eq!(editable.editable_kind(), Some(EditableKind::Ellipse));
    assert_eq!(editable.bounds(), Some(bbox(7.0, 7.0, 13.0, 13.0)));
}

#[test]
fn display_circle_radius_scales_per_axis() {
    let record = graphic("CIRCLE", &[0.5, 0.5, 0.75, 0.5]).with_str(Tag::GRAPHIC_ANNOTATION_UNITS, "DISPLAY");
    let shape = build(&record, &BuildOptions::new(200.0, 100.0));
    assert_bounds_near(&shape, bbox(50.0, 0.0, 150.0, 100.0));
}

#[test]
fn pixel_circle_ignores_view_size() {
    let record = graphic("CIRCLE", &[10.0, 10.0, 13.0, 10.0]);
    let small = build(&record, &BuildOptions::new(64.0, 32.0));
    let large = build(&record, &BuildOptions::new(4096.0, 1024.0));
    assert_eq!(small.bounds(), large.bounds());
}

// =============================================================================
// POINT / MULTIPOINT / INTERPOLATED
// =============================================================================

#[test]
fn display_point_is_scaled_to_view() {
    let record = graphic("POINT", &[0.5, 0.5]).with_str(Tag::GRAPHIC_ANNOTATION_UNITS, "display");
    let options = BuildOptions::new(200.0, 100.0);

    let editable = build(&record, &options.with_editable(true));
    assert_eq!(editable.vertices(), vec![dvec2(100.0, 50.0)]);
    assert_eq!(editable.editable_kind(), Some(EditableKind::Point { size: 3.0 }));
    assert!(editable.style().filled);

    let fixed = build(&record, &options);
    assert_bounds_near(&fixed, bbox(98.5, 48.5, 101.5, 51.5));
}

#[test]
fn inverse_transform_applies_before_display_scaling() {
    let shift = DAffine2::from_translation(dvec2(0.25, 0.0));
    let options = BuildOptions::new(200.0, 100.0)
        .with_inverse_transform(shift)
        .with_editable(true);

    let record = graphic("POINT", &[0.5, 0.5]).with_str(Tag::GRAPHIC_ANNOTATION_UNITS, "DISPLAY");
    assert_eq!(build(&record, &options).vertices(), vec![dvec2(150.0, 50.0)]);

    let record = graphic("POLYLINE", &[0.0, 0.0, 0.5, 1.0]).with_str(Tag::GRAPHIC_ANNOTATION_UNITS, "DISPLAY");
    insta::assert_snapshot!(fmt_points(&build(&record, &options).vertices()), @"50,0 150,100");
}

#[test]
fn inverse_transform_is_ignored_for_pixel_units() {
    let options = BuildOptions::new(200.0, 100.0)
        .with_inverse_transform(DAffine2::from_translation(dvec2(0.25, 0.0)))
        .with_editable(true);
    let record = graphic("POINT", &[4.0, 4.0]);
    assert_eq!(build(&record, &options).vertices(), vec![dvec2(4.0, 4.0)]);
}

#[test]
fn pixel_point_ignores_view_size() {
    let record = graphic("POINT", &[0.5, 0.5]);
    let shape = build(&record, &BuildOptions::new(200.0, 100.0).with_editable(true));
    assert_eq!(shape.vertices(), vec![dvec2(0.5, 0.5)]);
}

#[test]
fn multipoint_is_one_marker_per_point() {
    let record = graphic("MULTIPOINT", &[1.0, 1.0, 20.0, 20.0, 40.0, 5.0]);
    let shape = build(&record, &pixel_options().with_editable(true));
    assert!(!shape.is_editable());
    assert!(shape.style().filled);
    assert_eq!(path::subpath_count(shape.path().unwrap()), 3);
}

#[test]
fn interpolated_bends_left_of_each_segment() {
    let record = graphic("INTERPOLATED", &[0.0, 0.0, 10.0, 0.0]);
    let shape = build(&record, &pixel_options());
    assert_eq!(
        shape.path().unwrap().elements(),
        &[
            PathEl::MoveTo(Point::new(0.0, 0.0)),
            PathEl::QuadTo(Point::new(5.0, 2.5), Point::new(10.0, 0.0)),
        ]
    );
    let svg = shape.as_fixed().unwrap().to_svg();
    assert!(svg.starts_with('M') && svg.contains('Q'), "{svg}");
}

#[test]
fn unknown_type_yields_nothing() {
    let record = graphic("TEXT", &[0.0, 0.0]);
    assert_eq!(build_graphic(&record, &pixel_options()), Ok(None));
    let record = Dataset::new().with_str(Tag::GRAPHIC_TYPE, "POINT");
    assert_eq!(build_graphic(&record, &pixel_options()), Ok(None));
}

// =============================================================================
// Style
// =============================================================================

fn line_style(opacity: f32) -> Dataset {
    Dataset::new()
        .with_float(Tag::LINE_THICKNESS, 2.0)
        .with_ints(Tag::PATTERN_ON_COLOR_CIELAB_VALUE, Color::WHITE.to_dicom_lab())
        .with_float(Tag::PATTERN_ON_OPACITY, opacity)
}

#[test]
fn opacity_sets_alpha() {
    let record = graphic("POINT", &[1.0, 1.0]).with_item(Tag::LINE_STYLE_SEQUENCE, line_style(1.0));
    let style = *build(&record, &pixel_options()).style();
    assert_eq!(style.stroke.a, 255);
    assert_eq!(style.thickness, 2.0);

    let record = graphic("POINT", &[1.0, 1.0]).with_item(Tag::LINE_STYLE_SEQUENCE, line_style(0.5));
    let style = *build(&record, &pixel_options()).style();
    assert_eq!(style.stroke.a, 128);
    assert_eq!(style.fill, style.stroke);
}

#[test]
fn default_color_and_group_are_attached() {
    let record = graphic("POLYLINE", &[0.0, 0.0, 3.0, 4.0]).with_int(Tag::GRAPHIC_GROUP_ID, 3);
    let options = pixel_options()
        .with_default_color(Color::rgb(0, 255, 0))
        .with_label_visible(false);
    let style = *build(&record, &options).style();
    assert_eq!(style.stroke, Color::rgb(0, 255, 0));
    assert_eq!(style.group_id, Some(3));
    assert!(!style.label_visible);
    assert_eq!(style.thickness, 1.0);
}

// =============================================================================
// Compound graphics
// =============================================================================

#[test]
fn compound_ellipse_is_always_fixed() {
    let record = Dataset::new()
        .with_str(Tag::COMPOUND_GRAPHIC_TYPE, "ELLIPSE")
        .with_str(Tag::COMPOUND_GRAPHIC_UNITS, "DISPLAY")
        .with_floats(Tag::GRAPHIC_DATA, vec![0.0, 0.5, 1.0, 0.5, 0.5, 0.25, 0.5, 0.75]);
    let shape = build_compound_graphic(&record, &BuildOptions::new(100.0, 100.0).with_editable(true)).unwrap();
    assert!(!shape.is_editable());
    assert_bounds_near(&shape, bbox(0.0, 25.0, 100.0, 75.0));
}

#[test]
fn compound_point_uses_compound_units() {
    let record = Dataset::new()
        .with_str(Tag::COMPOUND_GRAPHIC_TYPE, "POINT")
        .with_str(Tag::GRAPHIC_ANNOTATION_UNITS, "DISPLAY")
        .with_floats(Tag::GRAPHIC_DATA, vec![4.0, 4.0]);
    let shape = build_compound_graphic(&record, &BuildOptions::new(100.0, 100.0)).unwrap();
    assert_bounds_near(&shape, bbox(2.5, 2.5, 5.5, 5.5));
}
