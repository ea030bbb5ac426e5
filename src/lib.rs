//! Reconstruct renderable shapes from DICOM presentation-state graphics.
//!
//! A presentation state carries annotations as Graphic Annotation and
//! Compound Graphic items: a graphic type, a flat list of coordinates in
//! pixel or display units, and optional line and fill styles. This crate
//! turns one such item into a [`Shape`], either editable (semantic kind plus
//! handle points) or fixed (a [`kurbo::BezPath`]), with its style attached.
//!
//! Attribute access goes through [`AttributeView`], so any DICOM object model
//! can feed the builders; [`Dataset`] is a small in-memory implementation.
//!
//! ```
//! use prgraphic::{BuildOptions, Dataset, Graphic, Tag, build_graphic};
//!
//! let record = Dataset::new()
//!     .with_str(Tag::GRAPHIC_TYPE, "CIRCLE")
//!     .with_floats(Tag::GRAPHIC_DATA, vec![10.0, 10.0, 13.0, 10.0]);
//! let shape = build_graphic(&record, &BuildOptions::new(512.0, 512.0))
//!     .unwrap()
//!     .unwrap();
//! let bounds = shape.bounds().unwrap();
//! assert!((bounds.width() - 6.0).abs() < 0.05);
//! ```
//!
//! Enable the `tracing` feature to get debug events for skipped records and
//! warnings for undecodable embedded models.

pub mod attributes;
pub mod color;
pub mod errors;
pub mod graphic;
mod log;
pub mod model;
pub mod tags;
pub mod types;

pub use attributes::{AttributeView, Dataset, Value};
pub use color::Color;
pub use errors::{ModelError, OptionsError, ShapeError};
pub use graphic::{
    BuildOptions, EditableKind, EditableShape, EllipseGeometry, FixedShape, Graphic, GraphicType,
    GraphicUnits, ResolvedStyle, Shape, ShapeStyle, build_compound_graphic,
    build_graphic, build_graphic_or_fixed, compound_instance_id, normalize_points, resolve_style,
    scaled_distance,
};
pub use model::{
    ImageTags, ModelDecoder, ModelTags, apply_pending_model, embedded_model_payload,
    extract_embedded_model, presentation_label, try_extract_embedded_model,
};
pub use tags::Tag;
pub use types::{BBox, NumericError};

pub use kurbo;
