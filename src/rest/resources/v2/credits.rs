//! Account credits.
//!
//! Credits are balances applied against invoices: grants, refunds,
//! promotional codes. Listing shows a project's outstanding credits;
//! creation redeems a code against a project.

use std::fmt;
use std::ops::Deref;
use std::sync::Arc;

use serde_json::json;

use crate::clients::HttpClient;
use crate::config::ApiVersion;
use crate::rest::{Manager, QueryString, Resource, ResourceError};

/// One credit balance.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Credit {
    resource: Resource,
}

impl Credit {
    /// Returns the credit type, when present.
    #[must_use]
    pub fn credit_type(&self) -> Option<&str> {
        self.resource.get_str("type")
    }
}

impl From<Resource> for Credit {
    fn from(resource: Resource) -> Self {
        Self { resource }
    }
}

impl Deref for Credit {
    type Target = Resource;

    fn deref(&self) -> &Self::Target {
        &self.resource
    }
}

impl fmt::Display for Credit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.resource.fmt_named("Credit", f)
    }
}

/// Manager for the credits collection.
#[derive(Clone, Debug)]
pub struct CreditManager {
    manager: Manager,
    version: ApiVersion,
}

impl CreditManager {
    pub(crate) fn new(http: Arc<HttpClient>, version: ApiVersion) -> Self {
        Self {
            manager: Manager::new(http),
            version,
        }
    }

    fn collection_path(&self) -> String {
        format!("/{}/credits", self.version.path_segment())
    }

    /// Lists credits, optionally narrowed to one project.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError`] for transport failures or malformed bodies.
    pub async fn list(&self, project_id: Option<&str>) -> Result<Vec<Credit>, ResourceError> {
        let mut query = QueryString::new();
        query.push_opt("project_id", project_id);
        let url = query.append_to(&self.collection_path());
        self.manager.list_as(&url, "credits").await
    }

    /// Redeems a credit code against a project.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError`] for transport failures or malformed bodies;
    /// an already-redeemed code surfaces as the conflict variant of the
    /// underlying API error.
    pub async fn create(&self, project_id: &str, code: &str) -> Result<Credit, ResourceError> {
        let body = json!({ "project_id": project_id, "code": code });
        let resource = self
            .manager
            .create(&self.collection_path(), body, "credit")
            .await?;
        Ok(Credit::from(resource))
    }
}
