//! Usage measurements.
//!
//! Measurements are the raw metered usage for a project over a time window,
//! before rating. The window is half-open and server-side resolution is
//! hourly, so timestamps are sent without a timezone suffix.

use std::fmt;
use std::ops::Deref;
use std::sync::Arc;

use chrono::NaiveDateTime;

use crate::clients::HttpClient;
use crate::config::ApiVersion;
use crate::rest::resources::v2::TIMESTAMP_FORMAT;
use crate::rest::{Manager, QueryString, Resource, ResourceError};

/// One metered usage record.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Measurement {
    resource: Resource,
}

impl From<Resource> for Measurement {
    fn from(resource: Resource) -> Self {
        Self { resource }
    }
}

impl Deref for Measurement {
    type Target = Resource;

    fn deref(&self) -> &Self::Target {
        &self.resource
    }
}

impl fmt::Display for Measurement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.resource.fmt_named("Measurement", f)
    }
}

/// Manager for the measurements collection.
#[derive(Clone, Debug)]
pub struct MeasurementManager {
    manager: Manager,
    version: ApiVersion,
}

impl MeasurementManager {
    pub(crate) fn new(http: Arc<HttpClient>, version: ApiVersion) -> Self {
        Self {
            manager: Manager::new(http),
            version,
        }
    }

    fn collection_path(&self) -> String {
        format!("/{}/measurements", self.version.path_segment())
    }

    /// Lists a project's measurements over the given window.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError`] for transport failures or malformed bodies.
    pub async fn list(
        &self,
        project_id: &str,
        start: NaiveDateTime,
        end: NaiveDateTime,
    ) -> Result<Vec<Measurement>, ResourceError> {
        let mut query = QueryString::new();
        query.push("project_id", project_id);
        query.push("start", start.format(TIMESTAMP_FORMAT));
        query.push("end", end.format(TIMESTAMP_FORMAT));
        let url = query.append_to(&self.collection_path());
        self.manager.list_as(&url, "measurements").await
    }
}
