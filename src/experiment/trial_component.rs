//! Trial component - one step (processing, training, evaluation, ...) of an
//! experiment trial

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{
    PrimaryStatus, TrialComponentArtifact, TrialComponentFilter, TrialComponentMetricSummary,
    TrialComponentParameterValue, TrialComponentParameters, TrialComponentSource,
    TrialComponentStatus, TrialComponentSummary, UserContext,
};
use crate::client::SageMakerClient;
use crate::record::{
    AttributeValue, Attributes, FieldKind, FieldSpec, ListRequest, Mapper, Pages, Record, Shape,
    ValueObject,
};
use crate::Result;

/// A trial component as stored by the service.
///
/// Instances only come from the service: [`TrialComponent::load`],
/// [`TrialComponent::create`] or decoding a response. Local changes made
/// through the setters are sent by [`TrialComponent::save`].
///
/// `created_by` is never filled from a describe response; the service
/// reports it but this type skips it on decode.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrialComponent {
    trial_component_name: Option<String>,
    trial_component_arn: Option<String>,
    display_name: Option<String>,
    source: Option<TrialComponentSource>,
    status: Option<TrialComponentStatus>,
    start_time: Option<DateTime<Utc>>,
    end_time: Option<DateTime<Utc>>,
    creation_time: Option<DateTime<Utc>>,
    created_by: Option<UserContext>,
    last_modified_time: Option<DateTime<Utc>>,
    last_modified_by: Option<UserContext>,
    parameters: Option<TrialComponentParameters>,
    input_artifacts: Option<BTreeMap<String, TrialComponentArtifact>>,
    output_artifacts: Option<BTreeMap<String, TrialComponentArtifact>>,
    metrics: Option<Vec<TrialComponentMetricSummary>>,
}

impl TrialComponent {
    /// Operation listing trial component summaries.
    pub const LIST_OPERATION: &'static str = "list_trial_components";
    /// Response field carrying the summaries of one page.
    pub const SUMMARIES_FIELD: &'static str = "TrialComponentSummaries";

    /// Load a trial component by name.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::NotFound`] if no such trial component exists,
    /// or the client's error otherwise.
    pub fn load<C: SageMakerClient>(mapper: &Mapper<C>, name: &str) -> Result<Self> {
        mapper.load(Attributes::new().with("trial_component_name", name))
    }

    /// Create a trial component.
    ///
    /// The returned instance holds the request values overlaid with the
    /// service response.
    ///
    /// # Errors
    ///
    /// Propagates the client's error unchanged (e.g. a duplicate name).
    pub fn create<C: SageMakerClient>(
        mapper: &Mapper<C>,
        name: &str,
        display_name: Option<&str>,
    ) -> Result<Self> {
        mapper.create(
            Attributes::new()
                .with("trial_component_name", name)
                .with_opt("display_name", display_name),
        )
    }

    /// Send the updatable attributes to the service and refresh this
    /// instance from the response.
    ///
    /// # Errors
    ///
    /// Propagates the client's error unchanged; the instance keeps its local
    /// changes.
    pub fn save<C: SageMakerClient>(&mut self, mapper: &Mapper<C>) -> Result<()> {
        mapper.save(self)
    }

    /// Delete this trial component.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::NotFound`] if it is already gone, or the
    /// client's error otherwise.
    pub fn delete<C: SageMakerClient>(self, mapper: &Mapper<C>) -> Result<()> {
        mapper.delete(self)
    }

    /// Lazily list trial component summaries matching `filter`.
    ///
    /// No request is sent before the first item is pulled.
    #[must_use]
    pub fn list<'a, C: SageMakerClient>(
        mapper: &'a Mapper<C>,
        filter: &TrialComponentFilter,
    ) -> Pages<'a, C, TrialComponentSummary> {
        mapper.list(
            ListRequest::new(Self::LIST_OPERATION, Self::SUMMARIES_FIELD)
                .filters(filter.to_attributes()),
        )
    }

    /// Mark the trial component as started now.
    pub fn start(&mut self) {
        self.status = Some(TrialComponentStatus::new(PrimaryStatus::InProgress));
        self.start_time = Some(Utc::now());
    }

    /// Mark the trial component as finished now with `status`.
    pub fn complete(&mut self, status: TrialComponentStatus) {
        self.status = Some(status);
        self.end_time = Some(Utc::now());
    }

    /// Get the name.
    #[must_use]
    pub fn trial_component_name(&self) -> Option<&str> {
        self.trial_component_name.as_deref()
    }

    /// Get the ARN.
    #[must_use]
    pub fn trial_component_arn(&self) -> Option<&str> {
        self.trial_component_arn.as_deref()
    }

    /// Get the display name.
    #[must_use]
    pub fn display_name(&self) -> Option<&str> {
        self.display_name.as_deref()
    }

    /// Set the display name.
    pub fn set_display_name(&mut self, display_name: Option<String>) {
        self.display_name = display_name;
    }

    /// Get the job that produced this trial component.
    #[must_use]
    pub const fn source(&self) -> Option<&TrialComponentSource> {
        self.source.as_ref()
    }

    /// Get the status.
    #[must_use]
    pub const fn status(&self) -> Option<&TrialComponentStatus> {
        self.status.as_ref()
    }

    /// Set the status.
    pub fn set_status(&mut self, status: Option<TrialComponentStatus>) {
        self.status = status;
    }

    /// Get the start time.
    #[must_use]
    pub const fn start_time(&self) -> Option<DateTime<Utc>> {
        self.start_time
    }

    /// Set the start time.
    pub fn set_start_time(&mut self, start_time: Option<DateTime<Utc>>) {
        self.start_time = start_time;
    }

    /// Get the end time.
    #[must_use]
    pub const fn end_time(&self) -> Option<DateTime<Utc>> {
        self.end_time
    }

    /// Set the end time.
    pub fn set_end_time(&mut self, end_time: Option<DateTime<Utc>>) {
        self.end_time = end_time;
    }

    /// Get the creation time.
    #[must_use]
    pub const fn creation_time(&self) -> Option<DateTime<Utc>> {
        self.creation_time
    }

    /// Get the creator. Only set when built from attributes that carry it.
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

    /// Get the parameters.
    #[must_use]
    pub const fn parameters(&self) -> Option<&TrialComponentParameters> {
        self.parameters.as_ref()
    }

    /// Replace the parameters.
    pub fn set_parameters(&mut self, parameters: Option<TrialComponentParameters>) {
        self.parameters = parameters;
    }

    /// Mutable access to the parameters, creating an empty bag if needed.
    pub fn parameters_mut(&mut self) -> &mut TrialComponentParameters {
        self.parameters.get_or_insert_with(TrialComponentParameters::new)
    }

    /// Set a single parameter.
    pub fn set_parameter(&mut self, name: impl Into<String>, value: TrialComponentParameterValue) {
        self.parameters_mut().insert(name, value);
    }

    /// Get the input artifacts, keyed by artifact name.
    #[must_use]
    pub const fn input_artifacts(&self) -> Option<&BTreeMap<String, TrialComponentArtifact>> {
        self.input_artifacts.as_ref()
    }

    /// Replace the input artifacts.
    pub fn set_input_artifacts(
        &mut self,
        artifacts: Option<BTreeMap<String, TrialComponentArtifact>>,
    ) {
        self.input_artifacts = artifacts;
    }

    /// Add or replace the input artifact `name`.
    pub fn set_input_artifact(
        &mut self,
        name: impl Into<String>,
        artifact: TrialComponentArtifact,
    ) {
        self.input_artifacts
            .get_or_insert_with(BTreeMap::new)
            .insert(name.into(), artifact);
    }

    /// Get the output artifacts, keyed by artifact name.
    #[must_use]
    pub const fn output_artifacts(&self) -> Option<&BTreeMap<String, TrialComponentArtifact>> {
        self.output_artifacts.as_ref()
    }

    /// Replace the output artifacts.
    pub fn set_output_artifacts(
        &mut self,
        artifacts: Option<BTreeMap<String, TrialComponentArtifact>>,
    ) {
        self.output_artifacts = artifacts;
    }

    /// Add or replace the output artifact `name`.
    pub fn set_output_artifact(
        &mut self,
        name: impl Into<String>,
        artifact: TrialComponentArtifact,
    ) {
        self.output_artifacts
            .get_or_insert_with(BTreeMap::new)
            .insert(name.into(), artifact);
    }

    /// Get the metric summaries.
    #[must_use]
    pub fn metrics(&self) -> Option<&[TrialComponentMetricSummary]> {
        self.metrics.as_deref()
    }
}

impl Record for TrialComponent {
    const SHAPE: Shape = Shape::new(
        "TrialComponent",
        &[
            FieldSpec::new("trial_component_name", FieldKind::String),
            FieldSpec::new("trial_component_arn", FieldKind::String),
            FieldSpec::new("display_name", FieldKind::String),
            FieldSpec::new("source", FieldKind::Object(&TrialComponentSource::SHAPE)),
            FieldSpec::new("status", FieldKind::Object(&TrialComponentStatus::SHAPE)),
            FieldSpec::new("start_time", FieldKind::Timestamp),
            FieldSpec::new("end_time", FieldKind::Timestamp),
            FieldSpec::new("creation_time", FieldKind::Timestamp),
            FieldSpec::new("created_by", FieldKind::Object(&UserContext::SHAPE)),
            FieldSpec::new("last_modified_time", FieldKind::Timestamp),
            FieldSpec::new("last_modified_by", FieldKind::Object(&UserContext::SHAPE)),
            FieldSpec::new(
                "parameters",
                FieldKind::Map(&TrialComponentParameterValue::SHAPE),
            ),
            FieldSpec::new(
                "input_artifacts",
                FieldKind::Map(&TrialComponentArtifact::SHAPE),
            ),
            FieldSpec::new(
                "output_artifacts",
                FieldKind::Map(&TrialComponentArtifact::SHAPE),
            ),
            FieldSpec::new(
                "metrics",
                FieldKind::List(&TrialComponentMetricSummary::SHAPE),
            ),
        ],
    );

    const LOAD_OPERATION: &'static str = "describe_trial_component";
    const CREATE_OPERATION: &'static str = "create_trial_component";
    const UPDATE_OPERATION: &'static str = "update_trial_component";
    const DELETE_OPERATION: &'static str = "delete_trial_component";

    const UPDATE_MEMBERS: &'static [&'static str] = &[
        "trial_component_name",
        "display_name",
        "status",
        "start_time",
        "end_time",
        "parameters",
        "input_artifacts",
        "output_artifacts",
    ];
    const DELETE_MEMBERS: &'static [&'static str] = &["trial_component_name"];

    const IGNORED_FIELDS: &'static [&'static str] = &["CreatedBy"];

    fn from_attributes(mut attributes: Attributes) -> Self {
        Self {
            trial_component_name: attributes.take_string("trial_component_name"),
            trial_component_arn: attributes.take_string("trial_component_arn"),
            display_name: attributes.take_string("display_name"),
            source: attributes.take_object("source"),
            status: attributes.take_object("status"),
            start_time: attributes.take_timestamp("start_time"),
            end_time: attributes.take_timestamp("end_time"),
            creation_time: attributes.take_timestamp("creation_time"),
            created_by: attributes.take_object("created_by"),
            last_modified_time: attributes.take_timestamp("last_modified_time"),
            last_modified_by: attributes.take_object("last_modified_by"),
            parameters: attributes
                .take_map::<TrialComponentParameterValue>("parameters")
                .map(TrialComponentParameters::from),
            input_artifacts: attributes.take_map("input_artifacts"),
            output_artifacts: attributes.take_map("output_artifacts"),
            metrics: attributes.take_list("metrics"),
        }
    }

    fn to_attributes(&self) -> Attributes {
        Attributes::new()
            .with_opt("trial_component_name", self.trial_component_name.as_deref())
            .with_opt("trial_component_arn", self.trial_component_arn.as_deref())
            .with_opt("display_name", self.display_name.as_deref())
            .with_opt("source", self.source.as_ref().map(AttributeValue::object))
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
            .with_opt(
                "parameters",
                self.parameters
                    .as_ref()
                    .map(|parameters| AttributeValue::map(parameters.as_map())),
            )
            .with_opt(
                "input_artifacts",
                self.input_artifacts.as_ref().map(AttributeValue::map),
            )
            .with_opt(
                "output_artifacts",
                self.output_artifacts.as_ref().map(AttributeValue::map),
            )
            .with_opt("metrics", self.metrics.as_deref().map(AttributeValue::list))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::casing::CaseConverter;
    use crate::record::{decode, project, BASE_IGNORED_FIELDS};
    use serde_json::{json, Value};

    fn describe_response() -> Value {
        json!({
            "TrialComponentName": "tc-1",
            "TrialComponentArn":
                "arn:aws:sagemaker:us-west-2:123456789012:experiment-trial-component/tc-1",
            "DisplayName": "Training",
            "Source": {"SourceArn": "arn:job", "SourceType": "SageMakerTrainingJob"},
            "Status": {"PrimaryStatus": "Completed", "Message": "done"},
            "StartTime": "2024-03-01T10:00:00Z",
            "EndTime": 1_709_290_800.5,
            "CreatedBy": {"UserProfileName": "alice"},
            "LastModifiedBy": {"UserProfileName": "bob"},
            "Parameters": {
                "learning_rate": {"NumberValue": 0.01},
                "optimizer": {"StringValue": "adam"}
            },
            "InputArtifacts": {
                "train": {"Value": "s3://bucket/train.csv", "MediaType": "text/csv"}
            },
            "Metrics": [{"MetricName": "loss", "Count": 10, "Last": 0.2}],
            "ResponseMetadata": {"RequestId": "abc", "HTTPStatusCode": 200}
        })
    }

    fn decode_component(value: &Value) -> TrialComponent {
        let ignored: Vec<&str> = BASE_IGNORED_FIELDS
            .iter()
            .chain(TrialComponent::IGNORED_FIELDS)
            .copied()
            .collect();
        TrialComponent::from_attributes(decode(
            &TrialComponent::SHAPE,
            value.as_object().unwrap(),
            &ignored,
            &CaseConverter::default(),
        ))
    }

    #[test]
    fn test_declarations_are_valid() {
        TrialComponent::validate().unwrap();
        assert!(TrialComponentSummary::SHAPE.contains("trial_component_source"));
    }

    #[test]
    fn test_decode_full_response() {
        let tc = decode_component(&describe_response());

        assert_eq!(tc.trial_component_name(), Some("tc-1"));
        assert_eq!(tc.display_name(), Some("Training"));
        assert_eq!(
            tc.source().and_then(TrialComponentSource::source_arn),
            Some("arn:job")
        );
        assert_eq!(
            tc.status().and_then(TrialComponentStatus::primary_status),
            Some(&PrimaryStatus::Completed)
        );
        assert!(tc.start_time().is_some());
        assert_eq!(tc.end_time().map(|t| t.timestamp()), Some(1_709_290_800));
        assert!(tc.created_by().is_none());
        assert_eq!(
            tc.last_modified_by().and_then(UserContext::user_profile_name),
            Some("bob")
        );

        let parameters = tc.parameters().unwrap();
        assert_eq!(parameters.len(), 2);
        assert_eq!(
            parameters.get("learning_rate").and_then(TrialComponentParameterValue::number_value),
            Some(0.01)
        );
        let train = tc.input_artifacts().and_then(|artifacts| artifacts.get("train"));
        assert_eq!(train.and_then(TrialComponentArtifact::value), Some("s3://bucket/train.csv"));
        assert_eq!(train.and_then(TrialComponentArtifact::media_type), Some("text/csv"));
        assert!(tc.output_artifacts().is_none());
        assert_eq!(tc.metrics().unwrap()[0].count(), Some(10));
    }

    #[test]
    fn test_update_projection() {
        let mut tc = decode_component(&describe_response());
        tc.set_display_name(None);
        tc.set_parameter("epochs", TrialComponentParameterValue::number(3.0));

        let request = project(
            &TrialComponent::SHAPE,
            &tc.to_attributes(),
            TrialComponent::UPDATE_MEMBERS,
            &CaseConverter::default(),
        )
        .unwrap();

        assert_eq!(request["TrialComponentName"], json!("tc-1"));
        assert!(!request.contains_key("DisplayName"));
        assert!(!request.contains_key("TrialComponentArn"));
        assert!(!request.contains_key("Metrics"));
        assert_eq!(request["Parameters"]["epochs"], json!({"NumberValue": 3.0}));
        assert_eq!(request["Status"], json!({"PrimaryStatus": "Completed", "Message": "done"}));
        assert_eq!(
            request["InputArtifacts"],
            json!({"train": {"Value": "s3://bucket/train.csv", "MediaType": "text/csv"}})
        );
    }

    #[test]
    fn test_artifacts_keyed_by_name() {
        let mut tc = decode_component(&json!({
            "TrialComponentName": "tc-3",
            "InputArtifacts": [{"Value": "s3://bucket/unnamed.csv"}]
        }));
        assert!(tc.input_artifacts().is_none());

        tc.set_output_artifact("model", TrialComponentArtifact::new("s3://bucket/model.tar.gz"));
        tc.set_output_artifact(
            "model",
            TrialComponentArtifact::new("s3://bucket/model-v2.tar.gz"),
        );
        tc.set_input_artifact("train", TrialComponentArtifact::new("s3://bucket/train.csv"));

        let request = project(
            &TrialComponent::SHAPE,
            &tc.to_attributes(),
            TrialComponent::UPDATE_MEMBERS,
            &CaseConverter::default(),
        )
        .unwrap();
        assert_eq!(
            request["OutputArtifacts"],
            json!({"model": {"Value": "s3://bucket/model-v2.tar.gz"}})
        );
        assert_eq!(request["InputArtifacts"], json!({"train": {"Value": "s3://bucket/train.csv"}}));
    }

    #[test]
    fn test_delete_projection() {
        let tc = decode_component(&describe_response());
        let request = project(
            &TrialComponent::SHAPE,
            &tc.to_attributes(),
            TrialComponent::DELETE_MEMBERS,
            &CaseConverter::default(),
        )
        .unwrap();
        assert_eq!(request.len(), 1);
        assert_eq!(request["TrialComponentName"], json!("tc-1"));
    }

    #[test]
    fn test_start_and_complete() {
        let mut tc = decode_component(&json!({"TrialComponentName": "tc-2"}));
        tc.start();
        assert_eq!(
            tc.status().and_then(TrialComponentStatus::primary_status),
            Some(&PrimaryStatus::InProgress)
        );
        assert!(tc.start_time().is_some());

        tc.complete(TrialComponentStatus::new(PrimaryStatus::Failed).with_message("OOM"));
        assert!(tc
            .status()
            .and_then(TrialComponentStatus::primary_status)
            .is_some_and(PrimaryStatus::is_terminal));
        assert!(tc.end_time() >= tc.start_time());
    }
}
