//! DICOM tag identifiers read by the graphic reconstruction.
//!
//! Only the handful of attributes this crate touches are listed here; the
//! full data dictionary belongs to whatever decoder backs the
//! [`AttributeView`](crate::AttributeView).

use std::fmt;

/// A DICOM attribute tag packed as `(group << 16) | element`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(transparent)]
pub struct Tag(pub u32);

impl Tag {
    #[inline]
    pub const fn new(group: u16, element: u16) -> Self {
        Tag(((group as u32) << 16) | element as u32)
    }

    #[inline]
    pub const fn group(self) -> u16 {
        (self.0 >> 16) as u16
    }

    #[inline]
    pub const fn element(self) -> u16 {
        (self.0 & 0xFFFF) as u16
    }

    /// Private tags live in odd groups.
    #[inline]
    pub const fn is_private(self) -> bool {
        self.group() % 2 == 1
    }

    // Graphic Annotation Sequence items (C.10.5)
    pub const GRAPHIC_ANNOTATION_UNITS: Tag = Tag(0x0070_0005);
    pub const GRAPHIC_DATA: Tag = Tag(0x0070_0022);
    pub const GRAPHIC_TYPE: Tag = Tag(0x0070_0023);
    pub const GRAPHIC_FILLED: Tag = Tag(0x0070_0024);
    pub const GRAPHIC_GROUP_ID: Tag = Tag(0x0070_0295);

    // Content Identification macro
    pub const CONTENT_LABEL: Tag = Tag(0x0070_0080);
    pub const CONTENT_DESCRIPTION: Tag = Tag(0x0070_0081);

    // Compound Graphic Sequence items
    pub const COMPOUND_GRAPHIC_INSTANCE_ID: Tag = Tag(0x0070_0226);
    pub const COMPOUND_GRAPHIC_UNITS: Tag = Tag(0x0070_0282);
    pub const COMPOUND_GRAPHIC_TYPE: Tag = Tag(0x0070_0294);

    // Line and fill style macros
    pub const LINE_STYLE_SEQUENCE: Tag = Tag(0x0070_0232);
    pub const FILL_STYLE_SEQUENCE: Tag = Tag(0x0070_0233);
    pub const PATTERN_ON_COLOR_CIELAB_VALUE: Tag = Tag(0x0070_0251);
    pub const LINE_THICKNESS: Tag = Tag(0x0070_0253);
    pub const LINE_PATTERN: Tag = Tag(0x0070_0255);
    pub const PATTERN_ON_OPACITY: Tag = Tag(0x0070_0284);

    // Private block carrying a serialized presentation model
    pub const MODEL_PRIVATE_CREATOR: Tag = Tag(0x7107_0070);
    pub const MODEL_PRIVATE_PAYLOAD: Tag = Tag(0x7107_7001);
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:04X},{:04X})", self.group(), self.element())
    }
}
