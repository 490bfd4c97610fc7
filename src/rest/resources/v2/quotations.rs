//! Current-month quotations.
//!
//! A quotation is the running rated total for usage accrued since the last
//! invoice; there is no historical window, the server always quotes from the
//! billing period start to now.

use std::fmt;
use std::ops::Deref;
use std::sync::Arc;

use crate::clients::HttpClient;
use crate::config::ApiVersion;
use crate::rest::{Manager, QueryString, Resource, ResourceError};

/// A running quotation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Quotation {
    resource: Resource,
}

impl From<Resource> for Quotation {
    fn from(resource: Resource) -> Self {
        Self { resource }
    }
}

impl Deref for Quotation {
    type Target = Resource;

    fn deref(&self) -> &Self::Target {
        &self.resource
    }
}

impl fmt::Display for Quotation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.resource.fmt_named("Quotation", f)
    }
}

/// Manager for the quotations collection.
#[derive(Clone, Debug)]
pub struct QuotationManager {
    manager: Manager,
    version: ApiVersion,
}

impl QuotationManager {
    pub(crate) fn new(http: Arc<HttpClient>, version: ApiVersion) -> Self {
        Self {
            manager: Manager::new(http),
            version,
        }
    }

    fn collection_path(&self) -> String {
        format!("/{}/quotations", self.version.path_segment())
    }

    /// Lists quotations, optionally narrowed to one project and optionally
    /// with the per-line breakdown.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError`] for transport failures or malformed bodies.
    pub async fn list(
        &self,
        project_id: Option<&str>,
        detailed: bool,
    ) -> Result<Vec<Quotation>, ResourceError> {
        let mut query = QueryString::new();
        query.push_opt("project_id", project_id);
        if detailed {
            query.push("detailed", true);
        }
        let url = query.append_to(&self.collection_path());
        self.manager.list_as(&url, "quotations").await
    }
}
