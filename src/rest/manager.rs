//! The generic manager base.
//!
//! Every domain-specific manager is a thin layer of URL building over the
//! helpers here: issue a request through the shared [`HttpClient`], pull the
//! collection or object out from under its response key, and wrap it in
//! [`Resource`] values.

use std::sync::Arc;

use serde_json::Value;

use crate::clients::{ApiError, HttpClient, HttpError, HttpMethod, HttpRequest, HttpResponse};
use crate::rest::errors::ResourceError;
use crate::rest::resource::Resource;

/// Base manager bound to the shared HTTP transport.
///
/// Managers are stateless beyond this back-reference; each call builds a URL
/// and delegates here.
///
/// # Example
///
/// ```rust,ignore
/// let manager = Manager::new(Arc::clone(&http));
/// let products = manager.list("/v2/products", "products").await?;
/// ```
#[derive(Clone, Debug)]
pub struct Manager {
    http: Arc<HttpClient>,
}

impl Manager {
    /// Creates a manager bound to the given transport.
    #[must_use]
    pub fn new(http: Arc<HttpClient>) -> Self {
        Self { http }
    }

    /// Returns the underlying transport.
    #[must_use]
    pub fn http(&self) -> &HttpClient {
        &self.http
    }

    /// Issues a GET and returns the resources listed under `response_key`.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::MissingResponseKey`] when the body has no
    /// such key, [`ResourceError::UnexpectedShape`] when it is not an array
    /// of objects, and [`ResourceError::Http`] for transport failures.
    pub async fn list(&self, url: &str, response_key: &str) -> Result<Vec<Resource>, ResourceError> {
        let request = HttpRequest::builder(HttpMethod::Get, url)
            .build()
            .map_err(HttpError::from)?;
        let response = self.http.request(request).await?;
        extract_list(&response, response_key)
    }

    /// Like [`list`](Self::list), wrapping each element in `T` instead of
    /// the plain [`Resource`].
    ///
    /// # Errors
    ///
    /// Same conditions as [`list`](Self::list).
    pub async fn list_as<T: From<Resource>>(
        &self,
        url: &str,
        response_key: &str,
    ) -> Result<Vec<T>, ResourceError> {
        let rows = self.list(url, response_key).await?;
        Ok(rows.into_iter().map(T::from).collect())
    }

    /// Issues a POST carrying `body` and returns the resources listed under
    /// `response_key`.
    ///
    /// Some list endpoints take their filter set as a JSON document rather
    /// than query parameters; this is the `list` variant for those.
    ///
    /// # Errors
    ///
    /// Same conditions as [`list`](Self::list).
    pub async fn list_with_body(
        &self,
        url: &str,
        response_key: &str,
        body: Value,
    ) -> Result<Vec<Resource>, ResourceError> {
        let request = HttpRequest::builder(HttpMethod::Post, url)
            .body(body)
            .build()
            .map_err(HttpError::from)?;
        let response = self.http.request(request).await?;
        extract_list(&response, response_key)
    }

    /// Issues a GET and returns the single resource under `response_key`.
    ///
    /// Returns `Ok(None)` when the server answers 404; all other failures
    /// propagate.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::MissingResponseKey`] /
    /// [`ResourceError::UnexpectedShape`] for malformed bodies and
    /// [`ResourceError::Http`] for non-404 transport failures.
    pub async fn get(
        &self,
        url: &str,
        response_key: &str,
    ) -> Result<Option<Resource>, ResourceError> {
        let request = HttpRequest::builder(HttpMethod::Get, url)
            .build()
            .map_err(HttpError::from)?;
        match self.http.request(request).await {
            Ok(response) => extract_single(&response, response_key).map(Some),
            Err(HttpError::Api(ApiError::NotFound { .. })) => Ok(None),
            Err(error) => Err(error.into()),
        }
    }

    /// Issues a POST carrying `body` and returns the created resource from
    /// under `response_key`.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::MissingResponseKey`] /
    /// [`ResourceError::UnexpectedShape`] for malformed bodies and
    /// [`ResourceError::Http`] for transport failures.
    pub async fn create(
        &self,
        url: &str,
        body: Value,
        response_key: &str,
    ) -> Result<Resource, ResourceError> {
        let request = HttpRequest::builder(HttpMethod::Post, url)
            .body(body)
            .build()
            .map_err(HttpError::from)?;
        let response = self.http.request(request).await?;
        extract_single(&response, response_key)
    }

    /// Issues a PUT carrying `body` and returns the updated resource from
    /// under `response_key`.
    ///
    /// # Errors
    ///
    /// Same conditions as [`create`](Self::create).
    pub async fn update(
        &self,
        url: &str,
        body: Value,
        response_key: &str,
    ) -> Result<Resource, ResourceError> {
        let request = HttpRequest::builder(HttpMethod::Put, url)
            .body(body)
            .build()
            .map_err(HttpError::from)?;
        let response = self.http.request(request).await?;
        extract_single(&response, response_key)
    }

    /// Issues a DELETE.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::Http`] for transport failures.
    pub async fn delete(&self, url: &str) -> Result<(), ResourceError> {
        let request = HttpRequest::builder(HttpMethod::Delete, url)
            .build()
            .map_err(HttpError::from)?;
        self.http.request(request).await?;
        Ok(())
    }
}

/// Pulls the array under `response_key` out of a response and wraps each
/// element.
fn extract_list(response: &HttpResponse, response_key: &str) -> Result<Vec<Resource>, ResourceError> {
    let value = response
        .body
        .get(response_key)
        .ok_or_else(|| ResourceError::MissingResponseKey {
            key: response_key.to_string(),
        })?;
    let items = value.as_array().ok_or_else(|| ResourceError::UnexpectedShape {
        key: response_key.to_string(),
    })?;

    items
        .iter()
        .map(|item| {
            Resource::from_value(item.clone()).ok_or_else(|| ResourceError::UnexpectedShape {
                key: response_key.to_string(),
            })
        })
        .collect()
}

/// Pulls the single object under `response_key` out of a response.
fn extract_single(response: &HttpResponse, response_key: &str) -> Result<Resource, ResourceError> {
    let value = response
        .body
        .get(response_key)
        .ok_or_else(|| ResourceError::MissingResponseKey {
            key: response_key.to_string(),
        })?;
    Resource::from_value(value.clone()).ok_or_else(|| ResourceError::UnexpectedShape {
        key: response_key.to_string(),
    })
}
