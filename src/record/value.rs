//! Attribute values held by records and value objects

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde_json::Value;

use super::ValueObject;

/// A single present attribute value.
///
/// Absence is modeled by the attribute missing from [`Attributes`], never by
/// a variant of this enum.
#[derive(Debug, Clone, PartialEq)]
pub enum AttributeValue {
    /// Plain string
    String(String),
    /// Signed integer
    Integer(i64),
    /// Floating point number
    Float(f64),
    /// Boolean flag
    Boolean(bool),
    /// Point in time (UTC)
    Timestamp(DateTime<Utc>),
    /// Opaque JSON, passed through verbatim in both directions
    Document(Value),
    /// Nested value object
    Object(Attributes),
    /// Ordered sequence of nested value objects
    List(Vec<Attributes>),
    /// User-keyed mapping of nested value objects; keys are never re-cased
    Map(BTreeMap<String, Attributes>),
}

impl AttributeValue {
    /// Wrap a value object.
    pub fn object<V: ValueObject>(value: &V) -> Self {
        Self::Object(value.to_attributes())
    }

    /// Wrap a sequence of value objects.
    pub fn list<V: ValueObject>(values: &[V]) -> Self {
        Self::List(values.iter().map(ValueObject::to_attributes).collect())
    }

    /// Wrap a keyed mapping of value objects.
    pub fn map<V: ValueObject>(values: &BTreeMap<String, V>) -> Self {
        Self::Map(
            values
                .iter()
                .map(|(k, v)| (k.clone(), v.to_attributes()))
                .collect(),
        )
    }

    /// Short name of the variant, used in diagnostics.
    #[must_use]
    pub const fn kind_name(&self) -> &'static str {
        match self {
            Self::String(_) => "string",
            Self::Integer(_) => "integer",
            Self::Float(_) => "float",
            Self::Boolean(_) => "boolean",
            Self::Timestamp(_) => "timestamp",
            Self::Document(_) => "document",
            Self::Object(_) => "object",
            Self::List(_) => "list",
            Self::Map(_) => "map",
        }
    }
}

impl From<String> for AttributeValue {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

impl From<&str> for AttributeValue {
    fn from(value: &str) -> Self {
        Self::String(value.to_string())
    }
}

impl From<i64> for AttributeValue {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

impl From<u32> for AttributeValue {
    fn from(value: u32) -> Self {
        Self::Integer(i64::from(value))
    }
}

impl From<f64> for AttributeValue {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<bool> for AttributeValue {
    fn from(value: bool) -> Self {
        Self::Boolean(value)
    }
}

impl From<DateTime<Utc>> for AttributeValue {
    fn from(value: DateTime<Utc>) -> Self {
        Self::Timestamp(value)
    }
}

impl From<Value> for AttributeValue {
    fn from(value: Value) -> Self {
        Self::Document(value)
    }
}

impl From<Attributes> for AttributeValue {
    fn from(value: Attributes) -> Self {
        Self::Object(value)
    }
}

/// Present attribute values keyed by local attribute name.
///
/// An attribute that is `None` is simply not in the map.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Attributes {
    values: BTreeMap<String, AttributeValue>,
}

impl Attributes {
    /// Create an empty attribute set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set an attribute, replacing any previous value.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<AttributeValue>) {
        self.values.insert(name.into(), value.into());
    }

    /// Set an attribute if `value` is `Some`; `None` leaves the set untouched.
    pub fn insert_opt<V: Into<AttributeValue>>(
        &mut self,
        name: impl Into<String>,
        value: Option<V>,
    ) {
        if let Some(value) = value {
            self.insert(name, value);
        }
    }

    /// Chaining form of [`Attributes::insert`].
    #[must_use]
    pub fn with(mut self, name: impl Into<String>, value: impl Into<AttributeValue>) -> Self {
        self.insert(name, value);
        self
    }

    /// Chaining form of [`Attributes::insert_opt`].
    #[must_use]
    pub fn with_opt<V: Into<AttributeValue>>(
        mut self,
        name: impl Into<String>,
        value: Option<V>,
    ) -> Self {
        self.insert_opt(name, value);
        self
    }

    /// Get an attribute value.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&AttributeValue> {
        self.values.get(name)
    }

    /// Remove and return an attribute value.
    pub fn remove(&mut self, name: &str) -> Option<AttributeValue> {
        self.values.remove(name)
    }

    /// Returns true if the attribute is present.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    /// Number of present attributes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns true if no attribute is present.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Iterate over present attributes in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &AttributeValue)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Overlay `other` onto `self`; values in `other` win.
    pub fn merge(&mut self, other: Self) {
        self.values.extend(other.values);
    }

    /// Take a string attribute. Values of another kind are discarded.
    pub fn take_string(&mut self, name: &str) -> Option<String> {
        match self.remove(name)? {
            AttributeValue::String(s) => Some(s),
            _ => None,
        }
    }

    /// Take an integer attribute.
    pub fn take_integer(&mut self, name: &str) -> Option<i64> {
        match self.remove(name)? {
            AttributeValue::Integer(i) => Some(i),
            _ => None,
        }
    }

    /// Take a float attribute. Integers are widened.
    #[allow(clippy::cast_precision_loss)]
    pub fn take_float(&mut self, name: &str) -> Option<f64> {
        match self.remove(name)? {
            AttributeValue::Float(f) => Some(f),
            AttributeValue::Integer(i) => Some(i as f64),
            _ => None,
        }
    }

    /// Take a boolean attribute.
    pub fn take_bool(&mut self, name: &str) -> Option<bool> {
        match self.remove(name)? {
            AttributeValue::Boolean(b) => Some(b),
            _ => None,
        }
    }

    /// Take a timestamp attribute.
    pub fn take_timestamp(&mut self, name: &str) -> Option<DateTime<Utc>> {
        match self.remove(name)? {
            AttributeValue::Timestamp(t) => Some(t),
            _ => None,
        }
    }

    /// Take an opaque document attribute.
    pub fn take_document(&mut self, name: &str) -> Option<Value> {
        match self.remove(name)? {
            AttributeValue::Document(v) => Some(v),
            _ => None,
        }
    }

    /// Take a nested value object.
    pub fn take_object<V: ValueObject>(&mut self, name: &str) -> Option<V> {
        match self.remove(name)? {
            AttributeValue::Object(attrs) => Some(V::from_attributes(attrs)),
            _ => None,
        }
    }

    /// Take a sequence of nested value objects.
    pub fn take_list<V: ValueObject>(&mut self, name: &str) -> Option<Vec<V>> {
        match self.remove(name)? {
            AttributeValue::List(items) => {
                Some(items.into_iter().map(V::from_attributes).collect())
            }
            _ => None,
        }
    }

    /// Take a keyed mapping of nested value objects.
    pub fn take_map<V: ValueObject>(&mut self, name: &str) -> Option<BTreeMap<String, V>> {
        match self.remove(name)? {
            AttributeValue::Map(entries) => Some(
                entries
                    .into_iter()
                    .map(|(k, attrs)| (k, V::from_attributes(attrs)))
                    .collect(),
            ),
            _ => None,
        }
    }
}

impl FromIterator<(String, AttributeValue)> for Attributes {
    fn from_iter<I: IntoIterator<Item = (String, AttributeValue)>>(iter: I) -> Self {
        Self {
            values: iter.into_iter().collect(),
        }
    }
}

impl IntoIterator for Attributes {
    type Item = (String, AttributeValue);
    type IntoIter = std::collections::btree_map::IntoIter<String, AttributeValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.values.into_iter()
    }
}
