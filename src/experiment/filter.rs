//! Filters and sorting for `list_trial_components`

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::record::Attributes;

/// Sort key of a trial component listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SortBy {
    /// Sort by trial component name
    Name,
    /// Sort by creation time (the service default)
    CreationTime,
}

impl SortBy {
    /// Remote string form.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Name => "Name",
            Self::CreationTime => "CreationTime",
        }
    }
}

/// Sort direction of a trial component listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SortOrder {
    /// Smallest first
    Ascending,
    /// Largest first (the service default)
    Descending,
}

impl SortOrder {
    /// Remote string form.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Ascending => "Ascending",
            Self::Descending => "Descending",
        }
    }
}

/// Optional filters for [`TrialComponent::list`](super::TrialComponent::list).
///
/// Every unset filter is left out of the request.
///
/// # Example
///
/// ```rust
/// use smexperiments::experiment::{SortBy, SortOrder, TrialComponentFilter};
///
/// let filter = TrialComponentFilter::new()
///     .experiment_name("churn-model")
///     .sort_by(SortBy::Name)
///     .sort_order(SortOrder::Ascending)
///     .max_results(20);
/// assert_eq!(filter.to_attributes().len(), 4);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrialComponentFilter {
    source_arn: Option<String>,
    created_before: Option<DateTime<Utc>>,
    created_after: Option<DateTime<Utc>>,
    sort_by: Option<SortBy>,
    sort_order: Option<SortOrder>,
    trial_name: Option<String>,
    experiment_name: Option<String>,
    max_results: Option<u32>,
    next_token: Option<String>,
}

impl TrialComponentFilter {
    /// Create a filter that matches every trial component.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Only trial components produced by the job `source_arn`.
    #[must_use]
    pub fn source_arn(mut self, source_arn: impl Into<String>) -> Self {
        self.source_arn = Some(source_arn.into());
        self
    }

    /// Only trial components created strictly before `time`.
    #[must_use]
    pub const fn created_before(mut self, time: DateTime<Utc>) -> Self {
        self.created_before = Some(time);
        self
    }

    /// Only trial components created strictly after `time`.
    #[must_use]
    pub const fn created_after(mut self, time: DateTime<Utc>) -> Self {
        self.created_after = Some(time);
        self
    }

    /// Sort key.
    #[must_use]
    pub const fn sort_by(mut self, sort_by: SortBy) -> Self {
        self.sort_by = Some(sort_by);
        self
    }

    /// Sort direction.
    #[must_use]
    pub const fn sort_order(mut self, sort_order: SortOrder) -> Self {
        self.sort_order = Some(sort_order);
        self
    }

    /// Only trial components associated with trial `trial_name`.
    #[must_use]
    pub fn trial_name(mut self, trial_name: impl Into<String>) -> Self {
        self.trial_name = Some(trial_name.into());
        self
    }

    /// Only trial components associated with experiment `experiment_name`.
    #[must_use]
    pub fn experiment_name(mut self, experiment_name: impl Into<String>) -> Self {
        self.experiment_name = Some(experiment_name.into());
        self
    }

    /// Page size. Overrides the mapper's configured page size.
    #[must_use]
    pub const fn max_results(mut self, max_results: u32) -> Self {
        self.max_results = Some(max_results);
        self
    }

    /// Resume a listing from a continuation token.
    #[must_use]
    pub fn next_token(mut self, next_token: impl Into<String>) -> Self {
        self.next_token = Some(next_token.into());
        self
    }

    /// Present filters as attributes.
    #[must_use]
    pub fn to_attributes(&self) -> Attributes {
        Attributes::new()
            .with_opt("source_arn", self.source_arn.as_deref())
            .with_opt("created_before", self.created_before)
            .with_opt("created_after", self.created_after)
            .with_opt("sort_by", self.sort_by.map(SortBy::as_str))
            .with_opt("sort_order", self.sort_order.map(SortOrder::as_str))
            .with_opt("trial_name", self.trial_name.as_deref())
            .with_opt("experiment_name", self.experiment_name.as_deref())
            .with_opt("max_results", self.max_results)
            .with_opt("next_token", self.next_token.as_deref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::casing::CaseConverter;
    use crate::record::encode_fields;
    use chrono::TimeZone;
    use serde_json::json;

    #[test]
    fn test_empty_filter() {
        assert!(TrialComponentFilter::new().to_attributes().is_empty());
    }

    #[test]
    fn test_filter_remote_names() {
        let after = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let filter = TrialComponentFilter::new()
            .source_arn("arn:job")
            .created_after(after)
            .sort_by(SortBy::CreationTime)
            .sort_order(SortOrder::Descending)
            .next_token("5");

        let request = encode_fields(&filter.to_attributes(), &CaseConverter::default());

        assert_eq!(request["SourceArn"], json!("arn:job"));
        assert_eq!(request["CreatedAfter"], json!("2024-01-01T00:00:00+00:00"));
        assert_eq!(request["SortBy"], json!("CreationTime"));
        assert_eq!(request["SortOrder"], json!("Descending"));
        assert_eq!(request["NextToken"], json!("5"));
        assert!(!request.contains_key("MaxResults"));
    }
}
