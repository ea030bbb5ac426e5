//! Error types with diagnostics using miette
//!
//! Most malformed input does not produce an error at all: insufficient
//! geometry yields no shape and missing style falls back to defaults. The
//! errors here cover the few cases a caller has to decide about.

use miette::Diagnostic;
use thiserror::Error;

use crate::graphic::EditableKind;
use crate::types::NumericError;

// ============================================================================
// Shape Errors
// ============================================================================

/// Errors raised while building editable shapes
#[derive(Error, Diagnostic, Debug, Clone, PartialEq)]
pub enum ShapeError {
    #[error("cannot build editable {kind}: {reason}")]
    #[diagnostic(
        code(prgraphic::shape::invalid),
        help("build the graphic as a fixed shape instead, or drop the annotation")
    )]
    InvalidShape {
        kind: EditableKind,
        reason: &'static str,
    },
}

// ============================================================================
// Model Errors
// ============================================================================

/// Errors from decoding an embedded presentation model
#[derive(Error, Diagnostic, Debug)]
pub enum ModelError {
    #[error("cannot decode presentation model ({len} bytes)")]
    #[diagnostic(code(prgraphic::model::decode))]
    Decode {
        len: usize,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync + 'static>,
    },
}

// ============================================================================
// Option Errors
// ============================================================================

/// Errors from validating [`BuildOptions`](crate::BuildOptions)
#[derive(Error, Diagnostic, Debug, Clone, PartialEq)]
pub enum OptionsError {
    #[error("invalid view {axis}: {source}")]
    #[diagnostic(
        code(prgraphic::options::view_size),
        help("view width and height must be finite and non-negative")
    )]
    ViewSize {
        axis: &'static str,
        #[source]
        source: NumericError,
    },
}
