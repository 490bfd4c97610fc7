//! HTTP transport for the Distil API SDK.
//!
//! This module contains the authenticated [`HttpClient`], the request and
//! response types it works with, and the HTTP error taxonomy. Everything
//! above this layer (managers, resources) speaks in terms of paths and
//! response keys; everything below it is `reqwest`.

mod errors;
mod http_client;
mod http_request;
mod http_response;

pub use errors::{ApiError, HttpError, InvalidHttpRequestError, MaxHttpRetriesExceededError};
pub use http_client::{HttpClient, TransportOptions, API_VERSION_HEADER, RETRY_WAIT_TIME, SDK_VERSION};
pub use http_request::{HttpMethod, HttpRequest, HttpRequestBuilder};
pub use http_response::{HttpResponse, REQUEST_ID_HEADER};
