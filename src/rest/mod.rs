//! The generic REST base: resources, managers, and query building.
//!
//! Domain managers in [`resources`] are thin URL enumerations over the
//! pieces here. Nothing in this module knows about specific resource
//! families.

mod errors;
mod manager;
pub mod resources;
mod resource;

pub use errors::ResourceError;
pub use manager::Manager;
pub use resource::Resource;

use std::fmt;
use std::fmt::Write as _;

/// An ordered query string builder.
///
/// Parameters render in the order they were pushed. Optional and list-valued
/// parameters that are absent or empty are omitted entirely, so a URL with
/// no effective filters stays the bare collection path.
///
/// List values are serialized as a single comma-joined parameter
/// (`?regions=nz-hlz-1,nz-por-1`), matching what the service parses.
///
/// # Example
///
/// ```rust
/// use distil_api::rest::QueryString;
///
/// let mut query = QueryString::new();
/// query.push_list("regions", &["nz-hlz-1", "nz-por-1"]);
/// query.push_opt("project_id", None::<&str>);
/// assert_eq!(query.append_to("/v2/products"), "/v2/products?regions=nz-hlz-1,nz-por-1");
///
/// let empty = QueryString::new();
/// assert_eq!(empty.append_to("/v2/products"), "/v2/products");
/// ```
#[derive(Clone, Debug, Default)]
pub struct QueryString {
    pairs: Vec<(String, String)>,
}

impl QueryString {
    /// Creates an empty query string.
    #[must_use]
    pub const fn new() -> Self {
        Self { pairs: Vec::new() }
    }

    /// Appends one parameter.
    pub fn push(&mut self, name: &str, value: impl fmt::Display) {
        self.pairs.push((name.to_string(), value.to_string()));
    }

    /// Appends one parameter when the value is present.
    pub fn push_opt(&mut self, name: &str, value: Option<impl fmt::Display>) {
        if let Some(value) = value {
            self.push(name, value);
        }
    }

    /// Appends a comma-joined list parameter, omitting it when the list is
    /// empty. Values keep the order given.
    pub fn push_list(&mut self, name: &str, values: &[impl AsRef<str>]) {
        if values.is_empty() {
            return;
        }
        let joined = values
            .iter()
            .map(AsRef::as_ref)
            .collect::<Vec<_>>()
            .join(",");
        self.pairs.push((name.to_string(), joined));
    }

    /// Returns `true` if no parameters were pushed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// Returns the path with this query string appended.
    #[must_use]
    pub fn append_to(&self, path: &str) -> String {
        format!("{path}{self}")
    }
}

impl fmt::Display for QueryString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut separator = '?';
        for (name, value) in &self.pairs {
            f.write_char(separator)?;
            write!(f, "{name}={value}")?;
            separator = '&';
        }
        Ok(())
    }
}
