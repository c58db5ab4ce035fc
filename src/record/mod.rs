//! Descriptor-driven record mapping
//!
//! Every concrete record type declares a static [`Shape`] (its ordered
//! attributes and their kinds) together with the remote operations that load,
//! create, update and delete it. The generic [`Mapper`] reads those
//! declarations to build requests, call the remote side and turn responses
//! back into typed values.
//!
//! ```text
//! Record ──to_attributes──> Attributes ──project──> Fields ──> SageMakerClient
//!    ^                                                              │
//!    └──from_attributes── Attributes <──decode(Shape)── Fields <────┘
//! ```
//!
//! Value objects nested inside records (statuses, artifacts, ...) follow the
//! same pattern through [`ValueObject`], so nesting is recursive.

mod codec;
mod mapper;
mod pages;
mod value;

use std::collections::BTreeSet;

pub(crate) use codec::parse_timestamp;
pub use codec::{decode, encode_attributes, encode_fields, encode_value, project};
pub use mapper::{Mapper, MapperBuilder};
pub use pages::{ListRequest, Pages};
pub use value::{AttributeValue, Attributes};

use crate::casing::{is_local_name, CaseConverter};
use crate::{Error, Result};

/// Remote fields ignored for every type (response envelope metadata).
pub const BASE_IGNORED_FIELDS: &[&str] = &["ResponseMetadata"];

/// Declared kind of a single attribute.
#[derive(Debug, Clone, Copy)]
pub enum FieldKind {
    /// Plain string
    String,
    /// Signed integer
    Integer,
    /// Floating point number
    Float,
    /// Boolean flag
    Boolean,
    /// Timestamp (RFC 3339 string or epoch seconds on the wire)
    Timestamp,
    /// Opaque JSON kept verbatim
    Document,
    /// Single nested value object
    Object(&'static Shape),
    /// Sequence of nested value objects
    List(&'static Shape),
    /// User-keyed mapping of nested value objects
    Map(&'static Shape),
}

impl FieldKind {
    /// Nested shape, if this kind has one.
    #[must_use]
    pub const fn nested(&self) -> Option<&'static Shape> {
        match *self {
            Self::Object(shape) | Self::List(shape) | Self::Map(shape) => Some(shape),
            _ => None,
        }
    }
}

/// Declaration of one attribute.
#[derive(Debug, Clone, Copy)]
pub struct FieldSpec {
    /// Local attribute name (lower snake case)
    pub name: &'static str,
    /// Remote field name when it does not follow the casing rule
    pub remote_name: Option<&'static str>,
    /// Declared kind
    pub kind: FieldKind,
}

impl FieldSpec {
    /// Declare an attribute whose remote name follows the casing rule.
    #[must_use]
    pub const fn new(name: &'static str, kind: FieldKind) -> Self {
        Self {
            name,
            remote_name: None,
            kind,
        }
    }

    /// Override the remote field name.
    #[must_use]
    pub const fn renamed(mut self, remote_name: &'static str) -> Self {
        self.remote_name = Some(remote_name);
        self
    }

    /// Remote field name under `casing`.
    #[must_use]
    pub fn remote(&self, casing: &CaseConverter) -> String {
        self.remote_name
            .map_or_else(|| casing.to_remote(self.name), str::to_string)
    }
}

/// Static descriptor of a record or value object.
#[derive(Debug, Clone, Copy)]
pub struct Shape {
    /// Type name, used in diagnostics
    pub name: &'static str,
    /// Declared attributes, in order
    pub fields: &'static [FieldSpec],
}

impl Shape {
    /// Create a shape.
    #[must_use]
    pub const fn new(name: &'static str, fields: &'static [FieldSpec]) -> Self {
        Self { name, fields }
    }

    /// Look up a declared attribute.
    #[must_use]
    pub fn field(&self, name: &str) -> Option<&FieldSpec> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Returns true if `name` is a declared attribute.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.field(name).is_some()
    }

    /// Declared attribute names, in order.
    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.fields.iter().map(|f| f.name)
    }
}

/// A nested data holder built purely from a response sub-mapping.
pub trait ValueObject: Sized {
    /// Static descriptor.
    const SHAPE: Shape;

    /// Build from decoded attributes. Missing attributes become `None`.
    fn from_attributes(attributes: Attributes) -> Self;

    /// Present attributes of this value.
    fn to_attributes(&self) -> Attributes;
}

/// A remote resource loaded, created, updated and deleted one at a time.
pub trait Record: Sized {
    /// Static descriptor.
    const SHAPE: Shape;

    /// Operation that reads one record by identity.
    const LOAD_OPERATION: &'static str;
    /// Operation that creates a record.
    const CREATE_OPERATION: &'static str;
    /// Operation that updates a record.
    const UPDATE_OPERATION: &'static str;
    /// Operation that deletes a record.
    const DELETE_OPERATION: &'static str;

    /// Attributes sent by [`Mapper::save`].
    const UPDATE_MEMBERS: &'static [&'static str];
    /// Attributes sent by [`Mapper::delete`].
    const DELETE_MEMBERS: &'static [&'static str];

    /// Remote fields skipped on top of [`BASE_IGNORED_FIELDS`].
    const IGNORED_FIELDS: &'static [&'static str] = &[];

    /// Build from decoded attributes. Missing attributes become `None`.
    fn from_attributes(attributes: Attributes) -> Self;

    /// Present attributes of this record.
    fn to_attributes(&self) -> Attributes;

    /// Check the declarations of this type with the default casing.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] describing the first inconsistency found.
    fn validate() -> Result<()> {
        validate_record::<Self>(&CaseConverter::default())
    }
}

/// Check a record type's declarations before any remote call.
///
/// # Errors
///
/// Returns [`Error::Config`] if the shape is invalid, an update or delete
/// member is not a declared attribute, or an operation name is empty.
pub fn validate_record<R: Record>(casing: &CaseConverter) -> Result<()> {
    validate_shape(&R::SHAPE, casing)?;

    let operations = [
        ("load", R::LOAD_OPERATION),
        ("create", R::CREATE_OPERATION),
        ("update", R::UPDATE_OPERATION),
        ("delete", R::DELETE_OPERATION),
    ];
    for (role, operation) in operations {
        if operation.is_empty() {
            return Err(Error::Config(format!(
                "{}: {role} operation name is empty",
                R::SHAPE.name
            )));
        }
    }

    for (role, members) in [("update", R::UPDATE_MEMBERS), ("delete", R::DELETE_MEMBERS)] {
        if let Some(missing) = members.iter().find(|m| !R::SHAPE.contains(m)) {
            return Err(Error::Config(format!(
                "{}: {role} member '{missing}' is not a declared attribute",
                R::SHAPE.name
            )));
        }
    }
    Ok(())
}

/// Check a shape and every shape nested in it.
///
/// Attribute names must be lower snake case, unique, map to unique remote
/// names, and survive a casing round trip unless renamed.
///
/// # Errors
///
/// Returns [`Error::Config`] describing the first inconsistency found.
pub fn validate_shape(shape: &Shape, casing: &CaseConverter) -> Result<()> {
    let mut visited = BTreeSet::new();
    validate_shape_inner(shape, casing, &mut visited)
}

fn validate_shape_inner(
    shape: &Shape,
    casing: &CaseConverter,
    visited: &mut BTreeSet<&'static str>,
) -> Result<()> {
    if !visited.insert(shape.name) {
        return Ok(());
    }

    let mut names = BTreeSet::new();
    let mut remotes = BTreeSet::new();
    for field in shape.fields {
        if !is_local_name(field.name) {
            return Err(Error::Config(format!(
                "{}: attribute '{}' is not lower snake case",
                shape.name, field.name
            )));
        }
        if !names.insert(field.name) {
            return Err(Error::Config(format!(
                "{}: attribute '{}' declared twice",
                shape.name, field.name
            )));
        }
        let remote = field.remote(casing);
        if field.remote_name.is_none() && casing.to_local(&remote) != field.name {
            return Err(Error::Config(format!(
                "{}: attribute '{}' does not round-trip through remote name '{remote}'",
                shape.name, field.name
            )));
        }
        if !remotes.insert(remote.clone()) {
            return Err(Error::Config(format!(
                "{}: remote field '{remote}' mapped twice",
                shape.name
            )));
        }
        if let Some(nested) = field.kind.nested() {
            validate_shape_inner(nested, casing, visited)?;
        }
    }
    Ok(())
}
