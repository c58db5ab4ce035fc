//! Trial component summaries returned by `list_trial_components`

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{TrialComponentSource, TrialComponentStatus, UserContext};
use crate::record::{Attributes, AttributeValue, FieldKind, FieldSpec, Shape, ValueObject};

/// Condensed, read-only view of a trial component as listed by the service.
///
/// Summaries never carry parameters, artifacts or metrics; load the full
/// [`TrialComponent`](super::TrialComponent) by name for those.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrialComponentSummary {
    trial_component_name: Option<String>,
    trial_component_arn: Option<String>,
    display_name: Option<String>,
    trial_component_source: Option<TrialComponentSource>,
    status: Option<TrialComponentStatus>,
    start_time: Option<DateTime<Utc>>,
    end_time: Option<DateTime<Utc>>,
    creation_time: Option<DateTime<Utc>>,
    created_by: Option<UserContext>,
    last_modified_time: Option<DateTime<Utc>>,
    last_modified_by: Option<UserContext>,
}

impl TrialComponentSummary {
    /// Get the trial component name.
    #[must_use]
    pub fn trial_component_name(&self) -> Option<&str> {
        self.trial_component_name.as_deref()
    }

    /// Get the trial component ARN.
    #[must_use]
    pub fn trial_component_arn(&self) -> Option<&str> {
        self.trial_component_arn.as_deref()
    }

    /// Get the display name.
    #[must_use]
    pub fn display_name(&self) -> Option<&str> {
        self.display_name.as_deref()
    }

    /// Get the job that produced the trial component.
    #[must_use]
    pub const fn trial_component_source(&self) -> Option<&TrialComponentSource> {
        self.trial_component_source.as_ref()
    }

    /// Get the status.
    #[must_use]
    pub const fn status(&self) -> Option<&TrialComponentStatus> {
        self.status.as_ref()
    }

    /// Get the start time.
    #[must_use]
    pub const fn start_time(&self) -> Option<DateTime<Utc>> {
        self.start_time
    }

    /// Get the end time.
    #[must_use]
    pub const fn end_time(&self) -> Option<DateTime<Utc>> {
        self.end_time
    }

    /// Get the creation time.
    #[must_use]
    pub const fn creation_time(&self) -> Option<DateTime<Utc>> {
        self.creation_time
    }

    /// Get the creator.
    #[must_use]
    pub const fn created_by(&self) -> Option<&UserContext> {
        self.created_by.as_ref()
    }

    /// Get the last modification time.
    #[must_use]
    pub const fn last_modified_time(&self) -> Option<DateTime<Utc>> {
        self.last_modified_time
    }

    /// Get the last modifier.
    #[must_use]
    pub const fn last_modified_by(&self) -> Option<&UserContext> {
        self.last_modified_by.as_ref()
    }
}

impl ValueObject for TrialComponentSummary {
    const SHAPE: Shape = Shape::new(
        "TrialComponentSummary",
        &[
            FieldSpec::new("trial_component_name", FieldKind::String),
            FieldSpec::new("trial_component_arn", FieldKind::String),
            FieldSpec::new("display_name", FieldKind::String),
            FieldSpec::new(
                "trial_component_source",
                FieldKind::Object(&TrialComponentSource::SHAPE),
            ),
            FieldSpec::new("status", FieldKind::Object(&TrialComponentStatus::SHAPE)),
            FieldSpec::new("start_time", FieldKind::Timestamp),
            FieldSpec::new("end_time", FieldKind::Timestamp),
            FieldSpec::new("creation_time", FieldKind::Timestamp),
            FieldSpec::new("created_by", FieldKind::Object(&UserContext::SHAPE)),
            FieldSpec::new("last_modified_time", FieldKind::Timestamp),
            FieldSpec::new("last_modified_by", FieldKind::Object(&UserContext::SHAPE)),
        ],
    );

    fn from_attributes(mut attributes: Attributes) -> Self {
        Self {
            trial_component_name: attributes.take_string("trial_component_name"),
            trial_component_arn: attributes.take_string("trial_component_arn"),
            display_name: attributes.take_string("display_name"),
            trial_component_source: attributes.take_object("trial_component_source"),
            status: attributes.take_object("status"),
            start_time: attributes.take_timestamp("start_time"),
            end_time: attributes.take_timestamp("end_time"),
            creation_time: attributes.take_timestamp("creation_time"),
            created_by: attributes.take_object("created_by"),
            last_modified_time: attributes.take_timestamp("last_modified_time"),
            last_modified_by: attributes.take_object("last_modified_by"),
        }
    }

    fn to_attributes(&self) -> Attributes {
        Attributes::new()
            .with_opt("trial_component_name", self.trial_component_name.as_deref())
            .with_opt("trial_component_arn", self.trial_component_arn.as_deref())
            .with_opt("display_name", self.display_name.as_deref())
            .with_opt(
                "trial_component_source",
                self.trial_component_source.as_ref().map(AttributeValue::object),
            )
            .with_opt("status", self.status.as_ref().map(AttributeValue::object))
            .with_opt("start_time", self.start_time)
            .with_opt("end_time", self.end_time)
            .with_opt("creation_time", self.creation_time)
            .with_opt("created_by", self.created_by.as_ref().map(AttributeValue::object))
            .with_opt("last_modified_time", self.last_modified_time)
            .with_opt(
                "last_modified_by",
                self.last_modified_by.as_ref().map(AttributeValue::object),
            )
    }
}
