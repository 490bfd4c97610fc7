//! Invoice history.

use std::fmt;
use std::ops::Deref;
use std::sync::Arc;

use chrono::NaiveDateTime;

use crate::clients::HttpClient;
use crate::config::ApiVersion;
use crate::rest::resources::v2::TIMESTAMP_FORMAT;
use crate::rest::{Manager, QueryString, Resource, ResourceError};

/// One issued invoice.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Invoice {
    resource: Resource,
}

impl From<Resource> for Invoice {
    fn from(resource: Resource) -> Self {
        Self { resource }
    }
}

impl Deref for Invoice {
    type Target = Resource;

    fn deref(&self) -> &Self::Target {
        &self.resource
    }
}

impl fmt::Display for Invoice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.resource.fmt_named("Invoice", f)
    }
}

/// Manager for the invoices collection.
#[derive(Clone, Debug)]
pub struct InvoiceManager {
    manager: Manager,
    version: ApiVersion,
}

impl InvoiceManager {
    pub(crate) fn new(http: Arc<HttpClient>, version: ApiVersion) -> Self {
        Self {
            manager: Manager::new(http),
            version,
        }
    }

    fn collection_path(&self) -> String {
        format!("/{}/invoices", self.version.path_segment())
    }

    /// Lists invoices issued inside the given window.
    ///
    /// `project_id` narrows the listing to one project; the token's scoped
    /// project applies otherwise. `detailed` asks the server to include the
    /// per-line breakdown on each invoice.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError`] for transport failures or malformed bodies.
    pub async fn list(
        &self,
        project_id: Option<&str>,
        start: NaiveDateTime,
        end: NaiveDateTime,
        detailed: bool,
    ) -> Result<Vec<Invoice>, ResourceError> {
        let mut query = QueryString::new();
        query.push_opt("project_id", project_id);
        query.push("start", start.format(TIMESTAMP_FORMAT));
        query.push("end", end.format(TIMESTAMP_FORMAT));
        if detailed {
            query.push("detailed", true);
        }
        let url = query.append_to(&self.collection_path());
        self.manager.list_as(&url, "invoices").await
    }
}
