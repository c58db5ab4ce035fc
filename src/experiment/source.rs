//! Provenance value objects: the job behind a trial component and the user
//! who touched it.

use serde::{Deserialize, Serialize};

use crate::record::{Attributes, FieldKind, FieldSpec, Shape, ValueObject};

/// The SageMaker job that produced a trial component.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrialComponentSource {
    source_arn: Option<String>,
    source_type: Option<String>,
}

impl TrialComponentSource {
    /// Create a source for the job identified by `source_arn`.
    #[must_use]
    pub fn new(source_arn: impl Into<String>) -> Self {
        Self {
            source_arn: Some(source_arn.into()),
            source_type: None,
        }
    }

    /// Set the job type (e.g. `SageMakerTrainingJob`).
    #[must_use]
    pub fn with_source_type(mut self, source_type: impl Into<String>) -> Self {
        self.source_type = Some(source_type.into());
        self
    }

    /// Get the job ARN.
    #[must_use]
    pub fn source_arn(&self) -> Option<&str> {
        self.source_arn.as_deref()
    }

    /// Get the job type.
    #[must_use]
    pub fn source_type(&self) -> Option<&str> {
        self.source_type.as_deref()
    }
}

impl ValueObject for TrialComponentSource {
    const SHAPE: Shape = Shape::new(
        "TrialComponentSource",
        &[
            FieldSpec::new("source_arn", FieldKind::String),
            FieldSpec::new("source_type", FieldKind::String),
        ],
    );

    fn from_attributes(mut attributes: Attributes) -> Self {
        Self {
            source_arn: attributes.take_string("source_arn"),
            source_type: attributes.take_string("source_type"),
        }
    }

    fn to_attributes(&self) -> Attributes {
        Attributes::new()
            .with_opt("source_arn", self.source_arn.as_deref())
            .with_opt("source_type", self.source_type.as_deref())
    }
}

/// Identity of the user profile behind a change.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserContext {
    user_profile_arn: Option<String>,
    user_profile_name: Option<String>,
    domain_id: Option<String>,
}

impl UserContext {
    /// Get the user profile ARN.
    #[must_use]
    pub fn user_profile_arn(&self) -> Option<&str> {
        self.user_profile_arn.as_deref()
    }

    /// Get the user profile name.
    #[must_use]
    pub fn user_profile_name(&self) -> Option<&str> {
        self.user_profile_name.as_deref()
    }

    /// Get the Studio domain id.
    #[must_use]
    pub fn domain_id(&self) -> Option<&str> {
        self.domain_id.as_deref()
    }
}

impl ValueObject for UserContext {
    const SHAPE: Shape = Shape::new(
        "UserContext",
        &[
            FieldSpec::new("user_profile_arn", FieldKind::String),
            FieldSpec::new("user_profile_name", FieldKind::String),
            FieldSpec::new("domain_id", FieldKind::String),
        ],
    );

    fn from_attributes(mut attributes: Attributes) -> Self {
        Self {
            user_profile_arn: attributes.take_string("user_profile_arn"),
            user_profile_name: attributes.take_string("user_profile_name"),
            domain_id: attributes.take_string("domain_id"),
        }
    }

    fn to_attributes(&self) -> Attributes {
        Attributes::new()
            .with_opt("user_profile_arn", self.user_profile_arn.as_deref())
            .with_opt("user_profile_name", self.user_profile_name.as_deref())
            .with_opt("domain_id", self.domain_id.as_deref())
    }
}
