//! Metric summaries - aggregated time-series statistics per metric

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::record::{Attributes, FieldKind, FieldSpec, Shape, ValueObject};

/// Summary statistics of one metric logged by a trial component.
///
/// The remote side aggregates every logged data point; this value carries
/// the aggregate only:
/// - `max` / `min` / `last` / `avg` / `std_dev` over all values
/// - `count` data points in total
/// - `time_stamp` of the most recent data point
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TrialComponentMetricSummary {
    metric_name: Option<String>,
    source_arn: Option<String>,
    time_stamp: Option<DateTime<Utc>>,
    max: Option<f64>,
    min: Option<f64>,
    last: Option<f64>,
    count: Option<i64>,
    avg: Option<f64>,
    std_dev: Option<f64>,
}

impl TrialComponentMetricSummary {
    /// Create a builder for a summary of `metric_name`.
    #[must_use]
    pub fn builder(metric_name: impl Into<String>) -> TrialComponentMetricSummaryBuilder {
        TrialComponentMetricSummaryBuilder::new(metric_name)
    }

    /// Get the metric name.
    #[must_use]
    pub fn metric_name(&self) -> Option<&str> {
        self.metric_name.as_deref()
    }

    /// Get the ARN of the job that logged the metric.
    #[must_use]
    pub fn source_arn(&self) -> Option<&str> {
        self.source_arn.as_deref()
    }

    /// Get the timestamp of the most recent data point.
    #[must_use]
    pub const fn time_stamp(&self) -> Option<DateTime<Utc>> {
        self.time_stamp
    }

    /// Get the maximum value.
    #[must_use]
    pub const fn max(&self) -> Option<f64> {
        self.max
    }

    /// Get the minimum value.
    #[must_use]
    pub const fn min(&self) -> Option<f64> {
        self.min
    }

    /// Get the most recent value.
    #[must_use]
    pub const fn last(&self) -> Option<f64> {
        self.last
    }

    /// Get the number of data points.
    #[must_use]
    pub const fn count(&self) -> Option<i64> {
        self.count
    }

    /// Get the mean value.
    #[must_use]
    pub const fn avg(&self) -> Option<f64> {
        self.avg
    }

    /// Get the standard deviation.
    #[must_use]
    pub const fn std_dev(&self) -> Option<f64> {
        self.std_dev
    }
}

impl ValueObject for TrialComponentMetricSummary {
    const SHAPE: Shape = Shape::new(
        "TrialComponentMetricSummary",
        &[
            FieldSpec::new("metric_name", FieldKind::String),
            FieldSpec::new("source_arn", FieldKind::String),
            FieldSpec::new("time_stamp", FieldKind::Timestamp),
            FieldSpec::new("max", FieldKind::Float),
            FieldSpec::new("min", FieldKind::Float),
            FieldSpec::new("last", FieldKind::Float),
            FieldSpec::new("count", FieldKind::Integer),
            FieldSpec::new("avg", FieldKind::Float),
            FieldSpec::new("std_dev", FieldKind::Float),
        ],
    );

    fn from_attributes(mut attributes: Attributes) -> Self {
        Self {
            metric_name: attributes.take_string("metric_name"),
            source_arn: attributes.take_string("source_arn"),
            time_stamp: attributes.take_timestamp("time_stamp"),
            max: attributes.take_float("max"),
            min: attributes.take_float("min"),
            last: attributes.take_float("last"),
            count: attributes.take_integer("count"),
            avg: attributes.take_float("avg"),
            std_dev: attributes.take_float("std_dev"),
        }
    }

    fn to_attributes(&self) -> Attributes {
        Attributes::new()
            .with_opt("metric_name", self.metric_name.as_deref())
            .with_opt("source_arn", self.source_arn.as_deref())
            .with_opt("time_stamp", self.time_stamp)
            .with_opt("max", self.max)
            .with_opt("min", self.min)
            .with_opt("last", self.last)
            .with_opt("count", self.count)
            .with_opt("avg", self.avg)
            .with_opt("std_dev", self.std_dev)
    }
}

/// Builder for `TrialComponentMetricSummary`.
#[derive(Debug)]
pub struct TrialComponentMetricSummaryBuilder {
    summary: TrialComponentMetricSummary,
}

impl TrialComponentMetricSummaryBuilder {
    /// Create a new builder with the metric name.
    #[must_use]
    pub fn new(metric_name: impl Into<String>) -> Self {
        Self {
            summary: TrialComponentMetricSummary {
                metric_name: Some(metric_name.into()),
                ..TrialComponentMetricSummary::default()
            },
        }
    }

    /// Set the ARN of the job that logged the metric.
    #[must_use]
    pub fn source_arn(mut self, source_arn: impl Into<String>) -> Self {
        self.summary.source_arn = Some(source_arn.into());
        self
    }

    /// Set the timestamp of the most recent data point.
    #[must_use]
    pub const fn time_stamp(mut self, time_stamp: DateTime<Utc>) -> Self {
        self.summary.time_stamp = Some(time_stamp);
        self
    }

    /// Set min, max, last, avg and standard deviation at once from a series
    /// of values, in logging order.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn values(mut self, values: &[f64]) -> Self {
        let Some(&last) = values.last() else {
            return self;
        };
        let n = values.len() as f64;
        let avg = values.iter().sum::<f64>() / n;
        let variance = values.iter().map(|v| (v - avg).powi(2)).sum::<f64>() / n;

        self.summary.max = values.iter().copied().reduce(f64::max);
        self.summary.min = values.iter().copied().reduce(f64::min);
        self.summary.last = Some(last);
        self.summary.count = i64::try_from(values.len()).ok();
        self.summary.avg = Some(avg);
        self.summary.std_dev = Some(variance.sqrt());
        self
    }

    /// Build the `TrialComponentMetricSummary`.
    #[must_use]
    pub fn build(self) -> TrialComponentMetricSummary {
        self.summary
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metric_summary_from_values() {
        let summary = TrialComponentMetricSummary::builder("loss")
            .values(&[1.0, 0.5, 0.25, 0.25])
            .build();

        assert_eq!(summary.metric_name(), Some("loss"));
        assert_eq!(summary.count(), Some(4));
        assert_eq!(summary.max(), Some(1.0));
        assert_eq!(summary.min(), Some(0.25));
        assert_eq!(summary.last(), Some(0.25));
        assert!((summary.avg().unwrap() - 0.5).abs() < f64::EPSILON);
    }

    #[test]
    fn test_metric_summary_empty_values() {
        let summary = TrialComponentMetricSummary::builder("accuracy")
            .values(&[])
            .build();
        assert_eq!(summary.count(), None);
        assert_eq!(summary.to_attributes().len(), 1);
    }
}
