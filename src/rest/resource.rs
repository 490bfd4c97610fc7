//! Dynamic resource snapshots.
//!
//! The Distil API returns loosely-shaped JSON objects whose fields vary by
//! deployment and resource family. Rather than one struct per payload shape,
//! managers wrap each returned object in a [`Resource`]: an immutable
//! snapshot of the field map with by-name access and identity-aware
//! equality.

use std::fmt;

use serde_json::{Map, Value};

use crate::rest::errors::ResourceError;

/// The field treated as a resource's identity when present.
const ID_FIELD: &str = "id";

/// An immutable snapshot of one API object.
///
/// Constructed fresh from each HTTP response and discarded when no longer
/// referenced; the base type has no mutation methods.
///
/// # Equality
///
/// Two resources that both carry an `id` field compare equal iff the ids are
/// equal, regardless of other fields. Two resources that both lack an `id`
/// compare equal iff their full field maps are equal. A resource with an id
/// never equals one without.
///
/// # Display
///
/// Fields render in alphabetical order as `<Resource field1=value1,
/// field2=value2>`, with string values shown bare.
///
/// # Example
///
/// ```rust
/// use distil_api::Resource;
/// use serde_json::json;
///
/// let resource = Resource::from_value(json!({"foo": "bar", "baz": "spam"})).unwrap();
/// assert_eq!(format!("{}", resource), "<Resource baz=spam, foo=bar>");
/// assert_eq!(resource.get("foo").unwrap(), "bar");
/// ```
#[derive(Clone, Debug, Default)]
pub struct Resource {
    // serde_json's default map is BTree-backed, so iteration is already in
    // alphabetical key order.
    fields: Map<String, Value>,
}

impl Resource {
    /// Creates a resource from a field map.
    #[must_use]
    pub const fn new(fields: Map<String, Value>) -> Self {
        Self { fields }
    }

    /// Creates a resource from a JSON value, which must be an object.
    ///
    /// Returns `None` for any other JSON shape.
    #[must_use]
    pub fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::Object(fields) => Some(Self { fields }),
            _ => None,
        }
    }

    /// Returns the value of a field, if present.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.fields.get(name)
    }

    /// Returns the value of a field, or a typed error naming the field.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::FieldNotFound`] when the snapshot has no
    /// such field.
    pub fn require(&self, name: &str) -> Result<&Value, ResourceError> {
        self.fields
            .get(name)
            .ok_or_else(|| ResourceError::FieldNotFound {
                field: name.to_string(),
            })
    }

    /// Returns a field's value as a string slice, if present and a string.
    #[must_use]
    pub fn get_str(&self, name: &str) -> Option<&str> {
        self.fields.get(name).and_then(Value::as_str)
    }

    /// Returns the identity field, if present.
    #[must_use]
    pub fn id(&self) -> Option<&Value> {
        self.fields.get(ID_FIELD)
    }

    /// Returns the number of fields in the snapshot.
    #[must_use]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Returns `true` if the snapshot holds no fields.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Iterates the fields in alphabetical order.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.fields.iter()
    }

    /// Returns the underlying field map.
    #[must_use]
    pub const fn fields(&self) -> &Map<String, Value> {
        &self.fields
    }

    /// Writes the display form under the given type name.
    ///
    /// Wrapper types deref-ing to `Resource` use this to render as
    /// `<Product ...>` rather than `<Resource ...>`.
    pub fn fmt_named(&self, name: &str, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<{name} ")?;
        let mut first = true;
        for (field, value) in &self.fields {
            if !first {
                write!(f, ", ")?;
            }
            first = false;
            write!(f, "{field}={}", render(value))?;
        }
        write!(f, ">")
    }
}

impl From<Map<String, Value>> for Resource {
    fn from(fields: Map<String, Value>) -> Self {
        Self::new(fields)
    }
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.fmt_named("Resource", f)
    }
}

impl PartialEq for Resource {
    fn eq(&self, other: &Self) -> bool {
        match (self.id(), other.id()) {
            (Some(a), Some(b)) => a == b,
            (None, None) => self.fields == other.fields,
            _ => false,
        }
    }
}

impl Eq for Resource {}

/// Renders a field value for display: strings bare, everything else as JSON.
fn render(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
