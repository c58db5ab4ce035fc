//! In-memory trial component service
//!
//! Implements the five trial component operations against a `DashMap`, with
//! the same field names, error kinds and pagination behavior as the remote
//! service. Data is lost when the client is dropped.

use std::sync::atomic::{AtomicU64, Ordering};

use chrono::{DateTime, Utc};
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use super::{Fields, SageMakerClient};
use crate::config::{MAX_RESULTS_FIELD, NEXT_TOKEN_FIELD};
use crate::experiment::TrialComponent;
use crate::record::{parse_timestamp, Record};
use crate::{Error, Result};

const NAME_FIELD: &str = "TrialComponentName";
const ARN_FIELD: &str = "TrialComponentArn";

/// Fields replaced by `update_trial_component` when present in the request.
const UPDATABLE_FIELDS: &[&str] = &[
    "DisplayName",
    "Status",
    "StartTime",
    "EndTime",
    "Parameters",
    "InputArtifacts",
    "OutputArtifacts",
];

/// Fields copied verbatim into a list summary.
const SUMMARY_FIELDS: &[&str] = &[
    NAME_FIELD,
    ARN_FIELD,
    "DisplayName",
    "Status",
    "StartTime",
    "EndTime",
    "CreationTime",
    "CreatedBy",
    "LastModifiedTime",
    "LastModifiedBy",
];

/// Settings of a [`MemoryClient`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MemoryClientConfig {
    /// Region used in generated ARNs
    pub region: String,
    /// Account id used in generated ARNs
    pub account_id: String,
    /// User profile stamped into `CreatedBy` / `LastModifiedBy`
    pub user_profile_name: String,
    /// Page size when a list request carries no `MaxResults`
    pub default_page_size: usize,
    /// Largest accepted `MaxResults`
    pub max_page_size: usize,
}

impl Default for MemoryClientConfig {
    fn default() -> Self {
        Self {
            region: "us-west-2".to_string(),
            account_id: "123456789012".to_string(),
            user_profile_name: "default-user".to_string(),
            default_page_size: 10,
            max_page_size: 100,
        }
    }
}

#[derive(Debug, Clone)]
struct StoredComponent {
    sequence: u64,
    created: DateTime<Utc>,
    document: Fields,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Membership {
    trial_name: String,
    experiment_name: String,
}

/// In-process trial component service.
///
/// # Example
///
/// ```rust
/// use smexperiments::client::MemoryClient;
/// use smexperiments::experiment::TrialComponent;
/// use smexperiments::record::Mapper;
///
/// let mapper = Mapper::new(MemoryClient::new());
/// let created = TrialComponent::create(&mapper, "tc-1", Some("Step 1"))?;
/// let loaded = TrialComponent::load(&mapper, "tc-1")?;
/// assert_eq!(loaded.trial_component_arn(), created.trial_component_arn());
/// # Ok::<(), smexperiments::Error>(())
/// ```
pub struct MemoryClient {
    config: MemoryClientConfig,
    components: DashMap<String, StoredComponent>,
    memberships: DashMap<String, Vec<Membership>>,
    sequence: AtomicU64,
}

impl MemoryClient {
    /// Create an empty service with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(MemoryClientConfig::default())
    }

    /// Create an empty service with the given settings.
    #[must_use]
    pub fn with_config(config: MemoryClientConfig) -> Self {
        Self {
            config,
            components: DashMap::new(),
            memberships: DashMap::new(),
            sequence: AtomicU64::new(0),
        }
    }

    /// Settings in use.
    #[must_use]
    pub const fn config(&self) -> &MemoryClientConfig {
        &self.config
    }

    /// Number of stored trial components.
    #[must_use]
    pub fn len(&self) -> usize {
        self.components.len()
    }

    /// Check if no trial component is stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }

    /// Check if a trial component with this name exists.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.components.contains_key(name)
    }

    /// Remove every trial component and association.
    pub fn clear(&self) {
        self.components.clear();
        self.memberships.clear();
    }

    /// Associate a stored trial component with a trial of an experiment.
    ///
    /// Associations drive the `TrialName` and `ExperimentName` list filters.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFound`] if the trial component does not exist.
    pub fn associate(
        &self,
        component: &str,
        trial_name: &str,
        experiment_name: &str,
    ) -> Result<()> {
        if !self.components.contains_key(component) {
            return Err(Error::not_found(
                "associate_trial_component",
                format!("Trial component '{component}' does not exist."),
            ));
        }
        let membership = Membership {
            trial_name: trial_name.to_string(),
            experiment_name: experiment_name.to_string(),
        };
        let mut entry = self.memberships.entry(component.to_string()).or_default();
        if !entry.contains(&membership) {
            entry.push(membership);
        }
        Ok(())
    }

    fn arn(&self, name: &str) -> String {
        format!(
            "arn:aws:sagemaker:{}:{}:experiment-trial-component/{}",
            self.config.region,
            self.config.account_id,
            name.to_lowercase()
        )
    }

    fn next_sequence(&self) -> u64 {
        self.sequence.fetch_add(1, Ordering::Relaxed) + 1
    }

    fn user_context(&self) -> Value {
        json!({"UserProfileName": self.config.user_profile_name})
    }

    fn respond(&self, mut response: Fields) -> Fields {
        response.insert(
            "ResponseMetadata".to_string(),
            json!({
                "RequestId": format!("memory-{:08}", self.next_sequence()),
                "HTTPStatusCode": 200,
                "RetryAttempts": 0
            }),
        );
        response
    }

    fn arn_response(&self, arn: String) -> Fields {
        let mut response = Fields::new();
        response.insert(ARN_FIELD.to_string(), Value::String(arn));
        self.respond(response)
    }

    fn create(&self, operation: &str, request: Fields) -> Result<Fields> {
        let name = required_name(operation, &request)?;
        let arn = self.arn(&name);
        let now = Utc::now();

        match self.components.entry(name.clone()) {
            Entry::Occupied(_) => Err(Error::service(
                operation,
                "ResourceInUse",
                format!("Trial component '{name}' already exists."),
            )),
            Entry::Vacant(slot) => {
                let mut document = request;
                document.insert(ARN_FIELD.to_string(), Value::String(arn.clone()));
                document.insert("CreationTime".to_string(), Value::String(now.to_rfc3339()));
                document.insert("LastModifiedTime".to_string(), Value::String(now.to_rfc3339()));
                document.insert("CreatedBy".to_string(), self.user_context());
                document.insert("LastModifiedBy".to_string(), self.user_context());
                slot.insert(StoredComponent {
                    sequence: self.next_sequence(),
                    created: now,
                    document,
                });
                tracing::debug!(trial_component = %name, "created trial component");
                Ok(self.arn_response(arn))
            }
        }
    }

    fn describe(&self, operation: &str, request: &Fields) -> Result<Fields> {
        let name = required_name(operation, request)?;
        let stored = self
            .components
            .get(&name)
            .ok_or_else(|| missing(operation, &name))?;
        Ok(self.respond(stored.document.clone()))
    }

    fn update(&self, operation: &str, request: &Fields) -> Result<Fields> {
        let name = required_name(operation, request)?;
        let mut stored = self
            .components
            .get_mut(&name)
            .ok_or_else(|| missing(operation, &name))?;

        for field in UPDATABLE_FIELDS {
            if let Some(value) = request.get(*field) {
                stored.document.insert((*field).to_string(), value.clone());
            }
        }
        if let Some(Value::Array(removed)) = request.get("ParametersToRemove") {
            if let Some(Value::Object(parameters)) = stored.document.get_mut("Parameters") {
                for key in removed.iter().filter_map(Value::as_str) {
                    parameters.remove(key);
                }
            }
        }
        stored.document.insert(
            "LastModifiedTime".to_string(),
            Value::String(Utc::now().to_rfc3339()),
        );
        stored
            .document
            .insert("LastModifiedBy".to_string(), self.user_context());

        let arn = self.arn(&name);
        drop(stored);
        Ok(self.arn_response(arn))
    }

    fn delete(&self, operation: &str, request: &Fields) -> Result<Fields> {
        let name = required_name(operation, request)?;
        if self.components.remove(&name).is_none() {
            return Err(missing(operation, &name));
        }
        self.memberships.remove(&name);
        tracing::debug!(trial_component = %name, "deleted trial component");
        Ok(self.arn_response(self.arn(&name)))
    }

    fn list(&self, operation: &str, request: &Fields) -> Result<Fields> {
        let query = ListQuery::parse(operation, request, &self.config)?;

        let mut matching: Vec<StoredComponent> = self
            .components
            .iter()
            .filter(|entry| query.matches(entry.key(), entry.value(), &self.memberships))
            .map(|entry| entry.value().clone())
            .collect();

        match query.sort_by {
            ListSort::Name => matching.sort_by(|a, b| {
                component_name(a)
                    .cmp(component_name(b))
                    .then(a.sequence.cmp(&b.sequence))
            }),
            ListSort::CreationTime => {
                matching.sort_by(|a, b| {
                    a.created
                        .cmp(&b.created)
                        .then(a.sequence.cmp(&b.sequence))
                });
            }
        }
        if query.descending {
            matching.reverse();
        }

        let total = matching.len();
        let summaries: Vec<Value> = matching
            .iter()
            .skip(query.offset)
            .take(query.page_size)
            .map(|stored| Value::Object(summarize(&stored.document)))
            .collect();

        let mut response = Fields::new();
        response.insert(TrialComponent::SUMMARIES_FIELD.to_string(), Value::Array(summaries));
        let end = query.offset.saturating_add(query.page_size);
        if end < total {
            response.insert(NEXT_TOKEN_FIELD.to_string(), Value::String(end.to_string()));
        }
        Ok(self.respond(response))
    }
}

impl Default for MemoryClient {
    fn default() -> Self {
        Self::new()
    }
}

impl SageMakerClient for MemoryClient {
    fn invoke(&self, operation: &str, request: Fields) -> Result<Fields> {
        match operation {
            TrialComponent::CREATE_OPERATION => self.create(operation, request),
            TrialComponent::LOAD_OPERATION => self.describe(operation, &request),
            TrialComponent::UPDATE_OPERATION => self.update(operation, &request),
            TrialComponent::DELETE_OPERATION => self.delete(operation, &request),
            TrialComponent::LIST_OPERATION => self.list(operation, &request),
            _ => Err(Error::service(
                operation,
                "UnknownOperationException",
                format!("operation '{operation}' is not supported"),
            )),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ListSort {
    Name,
    CreationTime,
}

/// Parsed `list_trial_components` request.
#[derive(Debug)]
struct ListQuery {
    source_arn: Option<String>,
    created_after: Option<DateTime<Utc>>,
    created_before: Option<DateTime<Utc>>,
    trial_name: Option<String>,
    experiment_name: Option<String>,
    sort_by: ListSort,
    descending: bool,
    page_size: usize,
    offset: usize,
}

impl ListQuery {
    fn parse(operation: &str, request: &Fields, config: &MemoryClientConfig) -> Result<Self> {
        let invalid = |message: String| Error::service(operation, "ValidationException", message);
        let string = |field: &str| request.get(field).and_then(Value::as_str).map(str::to_string);
        let timestamp = |field: &str| -> Result<Option<DateTime<Utc>>> {
            request
                .get(field)
                .map(|raw| {
                    parse_timestamp(raw)
                        .ok_or_else(|| invalid(format!("{field} is not a timestamp")))
                })
                .transpose()
        };

        let sort_by = match string("SortBy").as_deref() {
            None | Some("CreationTime") => ListSort::CreationTime,
            Some("Name") => ListSort::Name,
            Some(other) => return Err(invalid(format!("unsupported SortBy '{other}'"))),
        };
        let descending = match string("SortOrder").as_deref() {
            None | Some("Descending") => true,
            Some("Ascending") => false,
            Some(other) => return Err(invalid(format!("unsupported SortOrder '{other}'"))),
        };

        let page_size = match request.get(MAX_RESULTS_FIELD) {
            None => config.default_page_size,
            Some(raw) => raw
                .as_u64()
                .and_then(|n| usize::try_from(n).ok())
                .filter(|n| (1..=config.max_page_size).contains(n))
                .ok_or_else(|| {
                    invalid(format!(
                        "MaxResults must be between 1 and {}",
                        config.max_page_size
                    ))
                })?,
        };
        let offset = match string(NEXT_TOKEN_FIELD) {
            None => 0,
            Some(token) => token
                .parse::<usize>()
                .map_err(|_| invalid(format!("invalid NextToken '{token}'")))?,
        };

        Ok(Self {
            source_arn: string("SourceArn"),
            created_after: timestamp("CreatedAfter")?,
            created_before: timestamp("CreatedBefore")?,
            trial_name: string("TrialName"),
            experiment_name: string("ExperimentName"),
            sort_by,
            descending,
            page_size: page_size.max(1),
            offset,
        })
    }

    fn matches(
        &self,
        name: &str,
        stored: &StoredComponent,
        memberships: &DashMap<String, Vec<Membership>>,
    ) -> bool {
        if let Some(arn) = &self.source_arn {
            let source_arn = stored
                .document
                .get("Source")
                .and_then(|s| s.get("SourceArn"))
                .and_then(Value::as_str);
            if source_arn != Some(arn.as_str()) {
                return false;
            }
        }
        if self.created_after.is_some_and(|t| stored.created <= t) {
            return false;
        }
        if self.created_before.is_some_and(|t| stored.created >= t) {
            return false;
        }
        if self.trial_name.is_none() && self.experiment_name.is_none() {
            return true;
        }
        memberships.get(name).is_some_and(|entries| {
            entries.iter().any(|m| {
                self.trial_name.as_ref().map_or(true, |t| *t == m.trial_name)
                    && self
                        .experiment_name
                        .as_ref()
                        .map_or(true, |e| *e == m.experiment_name)
            })
        })
    }
}

fn required_name(operation: &str, request: &Fields) -> Result<String> {
    request
        .get(NAME_FIELD)
        .and_then(Value::as_str)
        .filter(|name| !name.is_empty())
        .map(str::to_string)
        .ok_or_else(|| {
            Error::service(
                operation,
                "ValidationException",
                format!("{NAME_FIELD} is required"),
            )
        })
}

fn missing(operation: &str, name: &str) -> Error {
    Error::not_found(operation, format!("Trial component '{name}' does not exist."))
}

fn component_name(stored: &StoredComponent) -> &str {
    stored
        .document
        .get(NAME_FIELD)
        .and_then(Value::as_str)
        .unwrap_or_default()
}

fn summarize(document: &Fields) -> Fields {
    let mut summary: Fields = SUMMARY_FIELDS
        .iter()
        .filter_map(|field| document.get(*field).map(|v| ((*field).to_string(), v.clone())))
        .collect();
    if let Some(source) = document.get("Source") {
        summary.insert("TrialComponentSource".to_string(), source.clone());
    }
    summary
}
