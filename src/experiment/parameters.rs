//! Hyperparameters recorded on a trial component

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::record::{Attributes, FieldKind, FieldSpec, Shape, ValueObject};

/// A single parameter value: either a string or a number.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TrialComponentParameterValue {
    string_value: Option<String>,
    number_value: Option<f64>,
}

impl TrialComponentParameterValue {
    /// A string parameter.
    #[must_use]
    pub fn string(value: impl Into<String>) -> Self {
        Self {
            string_value: Some(value.into()),
            number_value: None,
        }
    }

    /// A numeric parameter.
    #[must_use]
    pub const fn number(value: f64) -> Self {
        Self {
            string_value: None,
            number_value: Some(value),
        }
    }

    /// Get the string value, if this is a string parameter.
    #[must_use]
    pub fn string_value(&self) -> Option<&str> {
        self.string_value.as_deref()
    }

    /// Get the numeric value, if this is a numeric parameter.
    #[must_use]
    pub const fn number_value(&self) -> Option<f64> {
        self.number_value
    }
}

impl ValueObject for TrialComponentParameterValue {
    const SHAPE: Shape = Shape::new(
        "TrialComponentParameterValue",
        &[
            FieldSpec::new("string_value", FieldKind::String),
            FieldSpec::new("number_value", FieldKind::Float),
        ],
    );

    fn from_attributes(mut attributes: Attributes) -> Self {
        Self {
            string_value: attributes.take_string("string_value"),
            number_value: attributes.take_float("number_value"),
        }
    }

    fn to_attributes(&self) -> Attributes {
        Attributes::new()
            .with_opt("string_value", self.string_value.as_deref())
            .with_opt("number_value", self.number_value)
    }
}

/// Parameter bag keyed by parameter name.
///
/// Names are user data: they are sent exactly as given, never re-cased.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TrialComponentParameters {
    values: BTreeMap<String, TrialComponentParameterValue>,
}

impl TrialComponentParameters {
    /// Create an empty bag.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a parameter, returning the previous value.
    pub fn insert(
        &mut self,
        name: impl Into<String>,
        value: TrialComponentParameterValue,
    ) -> Option<TrialComponentParameterValue> {
        self.values.insert(name.into(), value)
    }

    /// Get a parameter.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&TrialComponentParameterValue> {
        self.values.get(name)
    }

    /// Remove a parameter.
    pub fn remove(&mut self, name: &str) -> Option<TrialComponentParameterValue> {
        self.values.remove(name)
    }

    /// Number of parameters.
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Check if the bag is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Iterate over parameters in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &TrialComponentParameterValue)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Borrow the underlying map.
    #[must_use]
    pub const fn as_map(&self) -> &BTreeMap<String, TrialComponentParameterValue> {
        &self.values
    }
}

impl From<BTreeMap<String, TrialComponentParameterValue>> for TrialComponentParameters {
    fn from(values: BTreeMap<String, TrialComponentParameterValue>) -> Self {
        Self { values }
    }
}

impl<K: Into<String>> FromIterator<(K, TrialComponentParameterValue)> for TrialComponentParameters {
    fn from_iter<I: IntoIterator<Item = (K, TrialComponentParameterValue)>>(iter: I) -> Self {
        Self {
            values: iter.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parameter_bag() {
        let mut params: TrialComponentParameters = [
            ("learning_rate", TrialComponentParameterValue::number(0.01)),
            ("optimizer", TrialComponentParameterValue::string("adam")),
        ]
        .into_iter()
        .collect();

        assert_eq!(params.len(), 2);
        assert_eq!(params.get("optimizer").and_then(|v| v.string_value()), Some("adam"));
        assert!(params.remove("optimizer").is_some());
        assert_eq!(params.iter().count(), 1);
    }

    #[test]
    fn test_number_value_attributes() {
        let attrs = TrialComponentParameterValue::number(32.0).to_attributes();
        assert!(!attrs.contains("string_value"));
        let back = TrialComponentParameterValue::from_attributes(attrs);
        assert_eq!(back.number_value(), Some(32.0));
    }
}
