//! Read-only access to decoded DICOM attributes.
//!
//! The reconstruction code never decodes DICOM itself. It reads through
//! [`AttributeView`], which a decoder adapter implements. [`Dataset`] is a
//! small in-memory implementation for callers that already hold decoded
//! values (and for tests).

use std::borrow::Cow;
use std::collections::HashMap;

use crate::tags::Tag;

/// Lookup over one decoded record, addressed by tag.
///
/// Every accessor returns `None` when the attribute is absent or cannot be
/// read as the requested type; the builders treat both the same way.
pub trait AttributeView {
    /// First value of a string attribute.
    fn string(&self, tag: Tag) -> Option<&str>;

    /// First value of an integer attribute.
    fn int(&self, tag: Tag) -> Option<i32>;

    /// All values of an integer attribute (e.g. a CIELab triple).
    fn ints(&self, tag: Tag) -> Option<Cow<'_, [i32]>>;

    /// First value of a floating point attribute.
    fn float(&self, tag: Tag) -> Option<f32>;

    /// All values of a floating point attribute.
    fn floats(&self, tag: Tag) -> Option<Cow<'_, [f32]>>;

    /// First item of a sequence attribute.
    fn nested(&self, tag: Tag) -> Option<&Self>;

    /// Raw bytes of a binary attribute.
    fn bytes(&self, tag: Tag) -> Option<&[u8]>;

    fn float_or(&self, tag: Tag, default: f32) -> f32 {
        self.float(tag).unwrap_or(default)
    }

    /// Case-insensitive comparison of a string attribute, ignoring DICOM padding.
    fn string_eq(&self, tag: Tag, expected: &str) -> bool {
        self.string(tag)
            .is_some_and(|s| s.trim().eq_ignore_ascii_case(expected))
    }
}

/// A decoded attribute value.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Str(String),
    Ints(Vec<i32>),
    Floats(Vec<f32>),
    Bytes(Vec<u8>),
    Sequence(Vec<Dataset>),
}

/// In-memory record: a map from tag to decoded value.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dataset {
    values: HashMap<Tag, Value>,
}

impl Dataset {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, tag: Tag, value: Value) -> Option<Value> {
        self.values.insert(tag, value)
    }

    pub fn remove(&mut self, tag: Tag) -> Option<Value> {
        self.values.remove(&tag)
    }

    pub fn get(&self, tag: Tag) -> Option<&Value> {
        self.values.get(&tag)
    }

    pub fn contains(&self, tag: Tag) -> bool {
        self.values.contains_key(&tag)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn with_str(mut self, tag: Tag, value: impl Into<String>) -> Self {
        self.insert(tag, Value::Str(value.into()));
        self
    }

    pub fn with_int(mut self, tag: Tag, value: i32) -> Self {
        self.insert(tag, Value::Ints(vec![value]));
        self
    }

    pub fn with_ints(mut self, tag: Tag, values: impl Into<Vec<i32>>) -> Self {
        self.insert(tag, Value::Ints(values.into()));
        self
    }

    pub fn with_float(mut self, tag: Tag, value: f32) -> Self {
        self.insert(tag, Value::Floats(vec![value]));
        self
    }

    pub fn with_floats(mut self, tag: Tag, values: impl Into<Vec<f32>>) -> Self {
        self.insert(tag, Value::Floats(values.into()));
        self
    }

    pub fn with_bytes(mut self, tag: Tag, bytes: impl Into<Vec<u8>>) -> Self {
        self.insert(tag, Value::Bytes(bytes.into()));
        self
    }

    /// Set a single-item sequence.
    pub fn with_item(mut self, tag: Tag, item: Dataset) -> Self {
        self.insert(tag, Value::Sequence(vec![item]));
        self
    }
}

impl AttributeView for Dataset {
    fn string(&self, tag: Tag) -> Option<&str> {
        match self.get(tag)? {
            // Multi-valued strings are backslash separated
            Value::Str(s) => s.split('\\').next(),
            _ => None,
        }
    }

    fn int(&self, tag: Tag) -> Option<i32> {
        match self.get(tag)? {
            Value::Ints(v) => v.first().copied(),
            // IS values arrive as text
            Value::Str(_) => self.string(tag)?.trim().parse().ok(),
            _ => None,
        }
    }

    fn ints(&self, tag: Tag) -> Option<Cow<'_, [i32]>> {
        match self.get(tag)? {
            Value::Ints(v) => Some(Cow::Borrowed(v.as_slice())),
            _ => None,
        }
    }

    fn float(&self, tag: Tag) -> Option<f32> {
        match self.get(tag)? {
            Value::Floats(v) => v.first().copied(),
            Value::Ints(v) => v.first().map(|&i| i as f32),
            // DS values arrive as text
            Value::Str(_) => self.string(tag)?.trim().parse().ok(),
            _ => None,
        }
    }

    fn floats(&self, tag: Tag) -> Option<Cow<'_, [f32]>> {
        match self.get(tag)? {
            Value::Floats(v) => Some(Cow::Borrowed(v.as_slice())),
            Value::Ints(v) => Some(Cow::Owned(v.iter().map(|&i| i as f32).collect())),
            _ => None,
        }
    }

    fn nested(&self, tag: Tag) -> Option<&Self> {
        match self.get(tag)? {
            Value::Sequence(items) => items.first(),
            _ => None,
        }
    }

    fn bytes(&self, tag: Tag) -> Option<&[u8]> {
        match self.get(tag)? {
            Value::Bytes(b) => Some(b.as_slice()),
            _ => None,
        }
    }
}
