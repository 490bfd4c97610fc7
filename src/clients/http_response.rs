//! HTTP response types for the Distil API SDK.
//!
//! This module provides the [`HttpResponse`] type for accessing response
//! data after JSON decoding and header parsing.

use std::collections::HashMap;

/// The header carrying the service-assigned request id.
pub const REQUEST_ID_HEADER: &str = "x-openstack-request-id";

/// An HTTP response from the service endpoint.
///
/// Contains the status code, headers, decoded JSON body, and the parsed
/// `Retry-After` value used by the transport's retry loop.
#[derive(Clone, Debug)]
pub struct HttpResponse {
    /// The HTTP status code.
    pub code: u16,
    /// Response headers (headers may have multiple values), keys lowercased.
    pub headers: HashMap<String, Vec<String>>,
    /// The decoded response body.
    pub body: serde_json::Value,
    /// Seconds to wait before retrying (from the `Retry-After` header).
    pub retry_request_after: Option<f64>,
}

impl HttpResponse {
    /// Creates a new `HttpResponse`, parsing the `Retry-After` header.
    #[must_use]
    pub fn new(code: u16, headers: HashMap<String, Vec<String>>, body: serde_json::Value) -> Self {
        let retry_request_after = headers
            .get("retry-after")
            .and_then(|values| values.first())
            .and_then(|value| value.parse::<f64>().ok());

        Self {
            code,
            headers,
            body,
            retry_request_after,
        }
    }

    /// Returns `true` if the status code is in the 2xx range.
    #[must_use]
    pub const fn is_ok(&self) -> bool {
        self.code >= 200 && self.code < 300
    }

    /// Returns the service-assigned request id, if present.
    #[must_use]
    pub fn request_id(&self) -> Option<&str> {
        self.headers
            .get(REQUEST_ID_HEADER)
            .and_then(|values| values.first())
            .map(String::as_str)
    }
}
