//! Conversion between attributes and remote field mappings
//!
//! Both directions are driven by a [`Shape`]: declared remote-name overrides
//! apply at every depth, nested objects, lists and maps are encoded through
//! their own shapes, and timestamps become RFC 3339 strings. Decoding only
//! reads declared attributes, anything else in the response is dropped.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde_json::{Number, Value};

use super::{AttributeValue, Attributes, FieldKind, FieldSpec, Shape};
use crate::casing::CaseConverter;
use crate::client::Fields;
use crate::{Error, Result};

fn declared<'s>(shape: &'s Shape, name: &str) -> Result<&'s FieldSpec> {
    shape.field(name).ok_or_else(|| {
        Error::Config(format!(
            "{}: member '{name}' is not a declared attribute",
            shape.name
        ))
    })
}

/// Encode every present attribute, keyed by its declared remote field name.
///
/// # Errors
///
/// Returns [`Error::Config`] if an attribute is not declared by `shape`.
pub fn encode_attributes(
    shape: &Shape,
    attributes: &Attributes,
    casing: &CaseConverter,
) -> Result<Fields> {
    attributes
        .iter()
        .map(|(name, value)| {
            let field = declared(shape, name)?;
            Ok((field.remote(casing), encode_value(value, field.kind, casing)))
        })
        .collect()
}

/// Encode attributes that have no declared shape (list filters), keyed by
/// the casing rule alone.
#[must_use]
pub fn encode_fields(attributes: &Attributes, casing: &CaseConverter) -> Fields {
    encode_nested(None, attributes, casing)
}

/// Encode a single attribute value declared as `kind`.
///
/// Nested attributes take their remote names from the nested shape of
/// `kind`. Non-finite floats have no JSON form and encode as `null`.
#[must_use]
pub fn encode_value(value: &AttributeValue, kind: FieldKind, casing: &CaseConverter) -> Value {
    encode_with(value, kind.nested(), casing)
}

fn encode_with(value: &AttributeValue, shape: Option<&Shape>, casing: &CaseConverter) -> Value {
    match value {
        AttributeValue::String(s) => Value::String(s.clone()),
        AttributeValue::Integer(i) => Value::from(*i),
        AttributeValue::Float(f) => Number::from_f64(*f).map_or(Value::Null, Value::Number),
        AttributeValue::Boolean(b) => Value::Bool(*b),
        AttributeValue::Timestamp(t) => Value::String(t.to_rfc3339()),
        AttributeValue::Document(v) => v.clone(),
        AttributeValue::Object(attrs) => Value::Object(encode_nested(shape, attrs, casing)),
        AttributeValue::List(items) => Value::Array(
            items
                .iter()
                .map(|attrs| Value::Object(encode_nested(shape, attrs, casing)))
                .collect(),
        ),
        AttributeValue::Map(entries) => Value::Object(
            entries
                .iter()
                .map(|(k, attrs)| (k.clone(), Value::Object(encode_nested(shape, attrs, casing))))
                .collect(),
        ),
    }
}

/// Undeclared nested attributes fall back to the casing rule.
fn encode_nested(shape: Option<&Shape>, attributes: &Attributes, casing: &CaseConverter) -> Fields {
    attributes
        .iter()
        .map(|(name, value)| match shape.and_then(|s| s.field(name)) {
            Some(field) => (field.remote(casing), encode_value(value, field.kind, casing)),
            None => (casing.to_remote(name), encode_with(value, None, casing)),
        })
        .collect()
}

/// Project the listed members of `attributes` into a request.
///
/// Members that are absent (`None`) are omitted. Declared remote-name
/// overrides are honored.
///
/// # Errors
///
/// Returns [`Error::Config`] if a member is not declared by `shape`.
pub fn project(
    shape: &Shape,
    attributes: &Attributes,
    members: &[&str],
    casing: &CaseConverter,
) -> Result<Fields> {
    let mut request = Fields::new();
    for member in members {
        let field = declared(shape, member)?;
        if let Some(value) = attributes.get(member) {
            request.insert(field.remote(casing), encode_value(value, field.kind, casing));
        }
    }
    Ok(request)
}

/// Decode the attributes declared by `shape` from a response mapping.
///
/// Fields named in `ignored` are skipped here and inside every nested
/// object. Absent or `null` fields leave the attribute absent. Fields of
/// the wrong JSON type are dropped with a warning. Undeclared fields are
/// dropped.
#[must_use]
pub fn decode(
    shape: &Shape,
    fields: &Fields,
    ignored: &[&str],
    casing: &CaseConverter,
) -> Attributes {
    let mut attributes = Attributes::new();
    let mut consumed = Vec::with_capacity(shape.fields.len());

    for spec in shape.fields {
        let remote = spec.remote(casing);
        if ignored.contains(&remote.as_str()) {
            continue;
        }
        let Some(raw) = fields.get(&remote) else {
            continue;
        };
        if !raw.is_null() {
            match decode_value(spec.kind, raw, ignored, casing) {
                Some(value) => attributes.insert(spec.name, value),
                None => tracing::warn!(
                    shape = shape.name,
                    field = %remote,
                    "dropping field with unexpected type"
                ),
            }
        }
        consumed.push(remote);
    }

    for key in fields.keys() {
        if !consumed.contains(key) && !ignored.contains(&key.as_str()) {
            tracing::trace!(
                shape = shape.name,
                field = %key,
                attribute = %casing.to_local(key),
                "dropping undeclared field"
            );
        }
    }

    attributes
}

fn decode_nested(
    shape: &Shape,
    raw: &Value,
    ignored: &[&str],
    casing: &CaseConverter,
) -> Option<Attributes> {
    raw.as_object()
        .map(|fields| decode(shape, fields, ignored, casing))
}

/// Decode one value against its declared kind; `None` on a type mismatch.
fn decode_value(
    kind: FieldKind,
    raw: &Value,
    ignored: &[&str],
    casing: &CaseConverter,
) -> Option<AttributeValue> {
    match kind {
        FieldKind::String => raw.as_str().map(|s| AttributeValue::String(s.to_string())),
        FieldKind::Integer => raw.as_i64().map(AttributeValue::Integer),
        FieldKind::Float => raw.as_f64().map(AttributeValue::Float),
        FieldKind::Boolean => raw.as_bool().map(AttributeValue::Boolean),
        FieldKind::Timestamp => parse_timestamp(raw).map(AttributeValue::Timestamp),
        FieldKind::Document => Some(AttributeValue::Document(raw.clone())),
        FieldKind::Object(shape) => {
            decode_nested(shape, raw, ignored, casing).map(AttributeValue::Object)
        }
        FieldKind::List(shape) => {
            let items = raw.as_array()?;
            // Non-object elements are skipped, the rest keep their order
            Some(AttributeValue::List(
                items
                    .iter()
                    .filter_map(|item| decode_nested(shape, item, ignored, casing))
                    .collect(),
            ))
        }
        FieldKind::Map(shape) => {
            let entries = raw.as_object()?;
            let decoded: BTreeMap<String, Attributes> = entries
                .iter()
                .filter_map(|(k, v)| {
                    decode_nested(shape, v, ignored, casing).map(|a| (k.clone(), a))
                })
                .collect();
            Some(AttributeValue::Map(decoded))
        }
    }
}

/// Parse a remote timestamp: an RFC 3339 string or epoch seconds.
#[must_use]
pub(crate) fn parse_timestamp(raw: &Value) -> Option<DateTime<Utc>> {
    match raw {
        Value::String(s) => DateTime::parse_from_rfc3339(s)
            .ok()
            .map(|t| t.with_timezone(&Utc)),
        Value::Number(n) => {
            if let Some(secs) = n.as_i64() {
                return DateTime::from_timestamp(secs, 0);
            }
            let secs = n.as_f64()?;
            if !secs.is_finite() {
                return None;
            }
            #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
            let (whole, nanos) = (secs.floor() as i64, ((secs - secs.floor()) * 1e9) as u32);
            DateTime::from_timestamp(whole, nanos)
        }
        _ => None,
    }
}
