//! Service health.

use std::fmt;
use std::ops::Deref;
use std::sync::Arc;

use crate::clients::HttpClient;
use crate::config::ApiVersion;
use crate::rest::{Manager, Resource, ResourceError};

/// The service's health report.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Health {
    resource: Resource,
}

impl Health {
    /// Returns the reported status, when present.
    #[must_use]
    pub fn status(&self) -> Option<&str> {
        self.resource.get_str("status")
    }
}

impl From<Resource> for Health {
    fn from(resource: Resource) -> Self {
        Self { resource }
    }
}

impl Deref for Health {
    type Target = Resource;

    fn deref(&self) -> &Self::Target {
        &self.resource
    }
}

impl fmt::Display for Health {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.resource.fmt_named("Health", f)
    }
}

/// Manager for the health endpoint.
#[derive(Clone, Debug)]
pub struct HealthManager {
    manager: Manager,
    version: ApiVersion,
}

impl HealthManager {
    pub(crate) fn new(http: Arc<HttpClient>, version: ApiVersion) -> Self {
        Self {
            manager: Manager::new(http),
            version,
        }
    }

    fn resource_path(&self) -> String {
        format!("/{}/health", self.version.path_segment())
    }

    /// Fetches the service's health report.
    ///
    /// Returns `Ok(None)` when the deployment does not expose the endpoint.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError`] for transport failures or malformed bodies.
    pub async fn get(&self) -> Result<Option<Health>, ResourceError> {
        let resource = self.manager.get(&self.resource_path(), "health").await?;
        Ok(resource.map(Health::from))
    }
}
