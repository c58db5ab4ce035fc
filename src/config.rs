//! Mapper configuration
//!
//! Settings that apply to every record type handled by one [`Mapper`]:
//! extra casing acronyms, extra ignored response fields and a default page
//! size for list operations. Can be built in code through
//! [`Mapper::builder`] or read from JSON:
//!
//! ```rust
//! use smexperiments::config::MapperConfig;
//!
//! let config = MapperConfig::from_json_str(r#"{"page_size": 50, "acronyms": ["ARN"]}"#)?;
//! assert_eq!(config.page_size, Some(50));
//! assert!(config.ignored_fields.is_empty());
//! # Ok::<(), smexperiments::Error>(())
//! ```
//!
//! [`Mapper`]: crate::record::Mapper
//! [`Mapper::builder`]: crate::record::Mapper::builder

use serde::{Deserialize, Serialize};

use crate::casing::{CaseConverter, DEFAULT_ACRONYMS};
use crate::{Error, Result};

/// Remote field carrying the page-size cap of list requests.
pub const MAX_RESULTS_FIELD: &str = "MaxResults";

/// Remote field carrying the continuation token of list operations.
pub const NEXT_TOKEN_FIELD: &str = "NextToken";

/// Mapper-wide settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MapperConfig {
    /// Acronyms added to [`DEFAULT_ACRONYMS`] for field-name casing
    pub acronyms: Vec<String>,
    /// Remote response fields ignored for every record type
    pub ignored_fields: Vec<String>,
    /// `MaxResults` sent with list requests that do not set one
    pub page_size: Option<u32>,
}

impl MapperConfig {
    /// Parse a configuration from JSON. Missing keys take their defaults.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Json`] on malformed input and [`Error::Config`] if the
    /// result fails [`MapperConfig::validate`].
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Check the settings.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] for a zero page size or an empty acronym.
    pub fn validate(&self) -> Result<()> {
        if self.page_size == Some(0) {
            return Err(Error::Config("page_size must be positive".to_string()));
        }
        if self.acronyms.iter().any(String::is_empty) {
            return Err(Error::Config("acronyms must not be empty".to_string()));
        }
        Ok(())
    }

    /// Casing converter with the default and configured acronyms.
    #[must_use]
    pub fn case_converter(&self) -> CaseConverter {
        CaseConverter::new(
            DEFAULT_ACRONYMS
                .iter()
                .copied()
                .chain(self.acronyms.iter().map(String::as_str)),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = MapperConfig::default();
        assert!(config.acronyms.is_empty());
        assert!(config.ignored_fields.is_empty());
        assert_eq!(config.page_size, None);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_from_json_partial() {
        let config = MapperConfig::from_json_str(r#"{"ignored_fields": ["Tags"]}"#).unwrap();
        assert_eq!(config.ignored_fields, vec!["Tags".to_string()]);
        assert_eq!(config.page_size, None);
    }

    #[test]
    fn test_from_json_rejects_zero_page_size() {
        let err = MapperConfig::from_json_str(r#"{"page_size": 0}"#).unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn test_from_json_malformed() {
        let err = MapperConfig::from_json_str("{page_size").unwrap_err();
        assert!(matches!(err, Error::Json(_)));
    }

    #[test]
    fn test_case_converter_includes_configured_acronyms() {
        let config = MapperConfig {
            acronyms: vec!["arn".to_string()],
            ..MapperConfig::default()
        };
        let casing = config.case_converter();
        assert_eq!(casing.to_remote("source_arn"), "SourceARN");
        assert_eq!(casing.to_remote("http_status_code"), "HTTPStatusCode");
    }
}
