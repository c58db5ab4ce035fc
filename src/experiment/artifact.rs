//! Trial component artifacts - inputs consumed and outputs produced

use serde::{Deserialize, Serialize};

use crate::record::{Attributes, FieldKind, FieldSpec, Shape, ValueObject};

/// An artifact attached to a trial component.
///
/// `value` is usually a location such as an S3 URI, `media_type` its MIME
/// type. Examples:
/// - `s3://bucket/train/data.csv` with `text/csv`
/// - `s3://bucket/output/model.tar.gz` with `application/x-tar`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrialComponentArtifact {
    value: Option<String>,
    media_type: Option<String>,
}

impl TrialComponentArtifact {
    /// Create an artifact pointing at `value`.
    #[must_use]
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: Some(value.into()),
            media_type: None,
        }
    }

    /// Set the media type.
    #[must_use]
    pub fn with_media_type(mut self, media_type: impl Into<String>) -> Self {
        self.media_type = Some(media_type.into());
        self
    }

    /// Get the artifact location.
    #[must_use]
    pub fn value(&self) -> Option<&str> {
        self.value.as_deref()
    }

    /// Get the media type.
    #[must_use]
    pub fn media_type(&self) -> Option<&str> {
        self.media_type.as_deref()
    }
}

impl ValueObject for TrialComponentArtifact {
    const SHAPE: Shape = Shape::new(
        "TrialComponentArtifact",
        &[
            FieldSpec::new("value", FieldKind::String),
            FieldSpec::new("media_type", FieldKind::String),
        ],
    );

    fn from_attributes(mut attributes: Attributes) -> Self {
        Self {
            value: attributes.take_string("value"),
            media_type: attributes.take_string("media_type"),
        }
    }

    fn to_attributes(&self) -> Attributes {
        Attributes::new()
            .with_opt("value", self.value.as_deref())
            .with_opt("media_type", self.media_type.as_deref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_artifact_new() {
        let artifact = TrialComponentArtifact::new("s3://bucket/model.tar.gz")
            .with_media_type("application/x-tar");
        assert_eq!(artifact.value(), Some("s3://bucket/model.tar.gz"));
        assert_eq!(artifact.media_type(), Some("application/x-tar"));
    }

    #[test]
    fn test_artifact_without_media_type() {
        let artifact = TrialComponentArtifact::new("s3://bucket/data.csv");
        let attrs = artifact.to_attributes();
        assert_eq!(attrs.len(), 1);
        assert!(!attrs.contains("media_type"));
    }
}
