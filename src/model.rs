//! Embedded presentation models.
//!
//! A viewer may store its own serialized annotation model inside a private
//! block of the presentation state, or stash raw model bytes on an image
//! until they can be decoded. This module moves those bytes to a
//! caller-supplied [`ModelDecoder`] and hands back whatever it produces; it
//! never looks inside the model.

use crate::attributes::AttributeView;
use crate::errors::ModelError;
use crate::log::warn;
use crate::tags::Tag;

/// Turns serialized model bytes into a model value.
pub trait ModelDecoder {
    type Model;
    type Error: std::error::Error + Send + Sync + 'static;

    fn decode(&self, bytes: &[u8]) -> Result<Self::Model, Self::Error>;
}

impl<F, M, E> ModelDecoder for F
where
    F: Fn(&[u8]) -> Result<M, E>,
    E: std::error::Error + Send + Sync + 'static,
{
    type Model = M;
    type Error = E;

    fn decode(&self, bytes: &[u8]) -> Result<M, E> {
        self(bytes)
    }
}

/// Where the embedded model lives and who wrote it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelTags {
    /// Private creator element reserving the block.
    pub creator_tag: Tag,
    /// Element holding the serialized model.
    pub payload_tag: Tag,
    /// Creator string the payload must be claimed by.
    pub creator_id: String,
}

impl ModelTags {
    pub const DEFAULT_CREATOR_ID: &'static str = "weasis/model/xml/2.5";
}

impl Default for ModelTags {
    fn default() -> Self {
        Self {
            creator_tag: Tag::MODEL_PRIVATE_CREATOR,
            payload_tag: Tag::MODEL_PRIVATE_PAYLOAD,
            creator_id: Self::DEFAULT_CREATOR_ID.to_string(),
        }
    }
}

/// The serialized model bytes, if the private block belongs to the
/// expected creator.
pub fn embedded_model_payload<'a, A: AttributeView>(record: &'a A, tags: &ModelTags) -> Option<&'a [u8]> {
    let creator = record.string(tags.creator_tag)?;
    if creator.trim() != tags.creator_id {
        return None;
    }
    record.bytes(tags.payload_tag)
}

/// Decode the embedded model, reporting decoder failures.
///
/// `Ok(None)` means no matching payload is present.
pub fn try_extract_embedded_model<A, D>(
    record: &A,
    decoder: &D,
    tags: &ModelTags,
) -> Result<Option<D::Model>, ModelError>
where
    A: AttributeView,
    D: ModelDecoder,
{
    let Some(bytes) = embedded_model_payload(record, tags) else {
        return Ok(None);
    };
    decode(decoder, bytes).map(Some)
}

/// Decode the embedded model; a decoder failure is logged and yields `None`.
pub fn extract_embedded_model<A, D>(record: Option<&A>, decoder: &D, tags: &ModelTags) -> Option<D::Model>
where
    A: AttributeView,
    D: ModelDecoder,
{
    match try_extract_embedded_model(record?, decoder, tags) {
        Ok(model) => model,
        Err(err) => {
            warn!(%err, "cannot extract embedded presentation model");
            #[cfg(not(feature = "tracing"))]
            let _ = &err;
            None
        }
    }
}

fn decode<D: ModelDecoder>(decoder: &D, bytes: &[u8]) -> Result<D::Model, ModelError> {
    decoder.decode(bytes).map_err(|e| ModelError::Decode {
        len: bytes.len(),
        source: Box::new(e),
    })
}

/// The presentation-model slots of an image's tag store.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageTags<M> {
    pending_model_bytes: Option<Vec<u8>>,
    presentation_model: Option<M>,
}

impl<M> Default for ImageTags<M> {
    fn default() -> Self {
        Self {
            pending_model_bytes: None,
            presentation_model: None,
        }
    }
}

impl<M> ImageTags<M> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stash raw model bytes until [`apply_pending_model`] decodes them.
    pub fn set_pending_model_bytes(&mut self, bytes: impl Into<Vec<u8>>) {
        self.pending_model_bytes = Some(bytes.into());
    }

    pub fn pending_model_bytes(&self) -> Option<&[u8]> {
        self.pending_model_bytes.as_deref()
    }

    pub fn has_pending_model(&self) -> bool {
        self.pending_model_bytes.is_some()
    }

    pub fn presentation_model(&self) -> Option<&M> {
        self.presentation_model.as_ref()
    }

    pub fn set_presentation_model(&mut self, model: M) {
        self.presentation_model = Some(model);
    }

    pub fn take_presentation_model(&mut self) -> Option<M> {
        self.presentation_model.take()
    }
}

/// Decode pending model bytes into the image's presentation model.
///
/// The pending bytes are consumed whether or not decoding succeeds, so a
/// second call without new bytes returns `false`. Returns `true` only when
/// a model was stored.
pub fn apply_pending_model<D: ModelDecoder>(image: &mut ImageTags<D::Model>, decoder: &D) -> bool {
    let Some(bytes) = image.pending_model_bytes.take() else {
        return false;
    };
    match decode(decoder, &bytes) {
        Ok(model) => {
            image.presentation_model = Some(model);
            true
        }
        Err(err) => {
            warn!(%err, "cannot apply pending presentation model");
            #[cfg(not(feature = "tracing"))]
            let _ = &err;
            false
        }
    }
}

/// Display label of a presentation state: `ContentLabel`, else
/// `ContentDescription`, prefixed.
pub fn presentation_label<A: AttributeView>(record: &A, prefix: &str) -> Option<String> {
    [Tag::CONTENT_LABEL, Tag::CONTENT_DESCRIPTION]
        .into_iter()
        .filter_map(|tag| record.string(tag))
        .map(str::trim)
        .find(|s| !s.is_empty())
        .map(|label| format!("{prefix}{label}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::attributes::Dataset;

    fn utf8(bytes: &[u8]) -> Result<String, std::str::Utf8Error> {
        std::str::from_utf8(bytes).map(str::to_owned)
    }

    fn record_with(creator: &str, payload: &[u8]) -> Dataset {
        Dataset::new()
            .with_str(Tag::MODEL_PRIVATE_CREATOR, creator)
            .with_bytes(Tag::MODEL_PRIVATE_PAYLOAD, payload.to_vec())
    }

    #[test]
    fn payload_requires_matching_creator() {
        let tags = ModelTags::default();
        let record = record_with("weasis/model/xml/2.5", b"<model/>");
        assert_eq!(embedded_model_payload(&record, &tags), Some(&b"<model/>"[..]));
        let record = record_with("someone else", b"<model/>");
        assert_eq!(embedded_model_payload(&record, &tags), None);
        let record = Dataset::new().with_bytes(Tag::MODEL_PRIVATE_PAYLOAD, b"x".to_vec());
        assert_eq!(embedded_model_payload(&record, &tags), None);
    }

    #[test]
    fn extraction_degrades_on_decode_failure() {
        let tags = ModelTags::default();
        let record = record_with(ModelTags::DEFAULT_CREATOR_ID, &[0xff, 0xfe]);
        assert_eq!(extract_embedded_model(Some(&record), &utf8, &tags), None);
        let err = try_extract_embedded_model(&record, &utf8, &tags).unwrap_err();
        assert_eq!(err.to_string(), "cannot decode presentation model (2 bytes)");
        assert_eq!(extract_embedded_model(None::<&Dataset>, &utf8, &tags), None);
    }

    #[test]
    fn custom_tags() {
        let tags = ModelTags {
            creator_tag: Tag::new(0x0009, 0x0010),
            payload_tag: Tag::new(0x0009, 0x1001),
            creator_id: "acme".into(),
        };
        let record = Dataset::new()
            .with_str(tags.creator_tag, "acme ")
            .with_bytes(tags.payload_tag, b"hello".to_vec());
        assert_eq!(
            extract_embedded_model(Some(&record), &utf8, &tags),
            Some("hello".to_string())
        );
    }

    #[test]
    fn label_falls_back_to_description() {
        let record = Dataset::new().with_str(Tag::CONTENT_DESCRIPTION, "Measurements");
        assert_eq!(presentation_label(&record, "PR: ").as_deref(), Some("PR: Measurements"));
        let record = record.with_str(Tag::CONTENT_LABEL, "KEY");
        assert_eq!(presentation_label(&record, "").as_deref(), Some("KEY"));
        assert_eq!(presentation_label(&Dataset::new(), "PR: "), None);
    }
}
