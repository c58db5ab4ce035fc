//! Trial component status

use serde::{Deserialize, Serialize};

use crate::record::{Attributes, FieldKind, FieldSpec, Shape, ValueObject};

/// Primary status of a trial component.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum PrimaryStatus {
    /// Work is currently executing.
    InProgress,
    /// Completed successfully.
    Completed,
    /// Failed with an error.
    Failed,
    /// A stop was requested and is in progress.
    Stopping,
    /// Stopped by user or system.
    Stopped,
    /// A status this crate does not know yet, kept verbatim.
    Other(String),
}

impl PrimaryStatus {
    /// Remote string form.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::InProgress => "InProgress",
            Self::Completed => "Completed",
            Self::Failed => "Failed",
            Self::Stopping => "Stopping",
            Self::Stopped => "Stopped",
            Self::Other(other) => other,
        }
    }

    /// Returns true once no further transition is expected.
    #[must_use]
    pub const fn is_terminal(&self) -> bool {
        matches!(self, Self::Completed | Self::Failed | Self::Stopped)
    }
}

impl From<&str> for PrimaryStatus {
    fn from(value: &str) -> Self {
        match value {
            "InProgress" => Self::InProgress,
            "Completed" => Self::Completed,
            "Failed" => Self::Failed,
            "Stopping" => Self::Stopping,
            "Stopped" => Self::Stopped,
            other => Self::Other(other.to_string()),
        }
    }
}

impl From<String> for PrimaryStatus {
    fn from(value: String) -> Self {
        Self::from(value.as_str())
    }
}

impl From<PrimaryStatus> for String {
    fn from(value: PrimaryStatus) -> Self {
        value.as_str().to_string()
    }
}

/// Status of a trial component: a primary status plus a free-form message.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrialComponentStatus {
    primary_status: Option<PrimaryStatus>,
    message: Option<String>,
}

impl TrialComponentStatus {
    /// Create a status without a message.
    #[must_use]
    pub const fn new(primary_status: PrimaryStatus) -> Self {
        Self {
            primary_status: Some(primary_status),
            message: None,
        }
    }

    /// Attach a message.
    #[must_use]
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    /// Get the primary status, if reported.
    #[must_use]
    pub const fn primary_status(&self) -> Option<&PrimaryStatus> {
        self.primary_status.as_ref()
    }

    /// Get the status message, if any.
    #[must_use]
    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }
}

impl ValueObject for TrialComponentStatus {
    const SHAPE: Shape = Shape::new(
        "TrialComponentStatus",
        &[
            FieldSpec::new("primary_status", FieldKind::String),
            FieldSpec::new("message", FieldKind::String),
        ],
    );

    fn from_attributes(mut attributes: Attributes) -> Self {
        Self {
            primary_status: attributes.take_string("primary_status").map(PrimaryStatus::from),
            message: attributes.take_string("message"),
        }
    }

    fn to_attributes(&self) -> Attributes {
        Attributes::new()
            .with_opt("primary_status", self.primary_status.as_ref().map(PrimaryStatus::as_str))
            .with_opt("message", self.message.as_deref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_primary_status_strings() {
        for status in [
            PrimaryStatus::InProgress,
            PrimaryStatus::Completed,
            PrimaryStatus::Failed,
            PrimaryStatus::Stopping,
            PrimaryStatus::Stopped,
        ] {
            assert_eq!(PrimaryStatus::from(status.as_str()), status);
        }
    }

    #[test]
    fn test_unknown_status_kept() {
        let status = PrimaryStatus::from("Paused");
        assert_eq!(status, PrimaryStatus::Other("Paused".to_string()));
        assert_eq!(status.as_str(), "Paused");
        assert!(!status.is_terminal());
    }

    #[test]
    fn test_status_attributes() {
        let status = TrialComponentStatus::new(PrimaryStatus::Failed).with_message("OOM");
        let attrs = status.to_attributes();
        assert_eq!(attrs.len(), 2);
        assert_eq!(TrialComponentStatus::from_attributes(attrs), status);
    }
}
