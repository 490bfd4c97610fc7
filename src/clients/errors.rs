//! HTTP-specific error types for the Distil API SDK.
//!
//! This module contains the status-code-mapped API error taxonomy along with
//! retry-exhaustion and request-validation failures, unified under
//! [`HttpError`].
//!
//! # Error Handling
//!
//! Every non-2xx response is translated into the [`ApiError`] variant for its
//! status code, carrying the code and the decoded error body. Errors are
//! propagated unchanged to the caller; the SDK performs no local recovery
//! beyond the transport's own retry loop.
//!
//! # Example
//!
//! ```rust,ignore
//! use distil_api::clients::{ApiError, HttpError};
//!
//! match client.request(request).await {
//!     Ok(response) => println!("Success: {}", response.body),
//!     Err(HttpError::Api(ApiError::NotFound { message, .. })) => {
//!         println!("Missing: {message}");
//!     }
//!     Err(HttpError::MaxRetries(e)) => {
//!         println!("Retries exhausted after {} tries", e.tries);
//!     }
//!     Err(e) => println!("Other error: {e}"),
//! }
//! ```

use serde_json::Value;
use thiserror::Error;

/// An API error mapped from a non-success HTTP status code.
///
/// Each variant carries the extracted error message and the decoded response
/// body; [`status`](Self::status) recovers the numeric code.
///
/// # Example
///
/// ```rust
/// use distil_api::clients::ApiError;
/// use serde_json::json;
///
/// let error = ApiError::from_response(404, json!({"error": {"message": "no such product"}}));
/// assert!(matches!(error, ApiError::NotFound { .. }));
/// assert_eq!(error.status(), 404);
/// assert_eq!(error.message(), "no such product");
/// ```
#[derive(Debug, Error)]
pub enum ApiError {
    /// HTTP 400.
    #[error("Bad request (HTTP 400): {message}")]
    BadRequest {
        /// The extracted error message.
        message: String,
        /// The decoded response body.
        body: Value,
    },

    /// HTTP 401.
    #[error("Unauthorized (HTTP 401): {message}")]
    Unauthorized {
        /// The extracted error message.
        message: String,
        /// The decoded response body.
        body: Value,
    },

    /// HTTP 403.
    #[error("Forbidden (HTTP 403): {message}")]
    Forbidden {
        /// The extracted error message.
        message: String,
        /// The decoded response body.
        body: Value,
    },

    /// HTTP 404.
    #[error("Not found (HTTP 404): {message}")]
    NotFound {
        /// The extracted error message.
        message: String,
        /// The decoded response body.
        body: Value,
    },

    /// HTTP 405.
    #[error("Method not allowed (HTTP 405): {message}")]
    MethodNotAllowed {
        /// The extracted error message.
        message: String,
        /// The decoded response body.
        body: Value,
    },

    /// HTTP 409.
    #[error("Conflict (HTTP 409): {message}")]
    Conflict {
        /// The extracted error message.
        message: String,
        /// The decoded response body.
        body: Value,
    },

    /// HTTP 413.
    #[error("Over limit (HTTP 413): {message}")]
    OverLimit {
        /// The extracted error message.
        message: String,
        /// The decoded response body.
        body: Value,
    },

    /// HTTP 429.
    #[error("Rate limited (HTTP 429): {message}")]
    RateLimit {
        /// The extracted error message.
        message: String,
        /// The decoded response body.
        body: Value,
    },

    /// HTTP 500.
    #[error("Internal server error (HTTP 500): {message}")]
    Internal {
        /// The extracted error message.
        message: String,
        /// The decoded response body.
        body: Value,
    },

    /// HTTP 501.
    #[error("Not implemented (HTTP 501): {message}")]
    NotImplemented {
        /// The extracted error message.
        message: String,
        /// The decoded response body.
        body: Value,
    },

    /// HTTP 503.
    #[error("Service unavailable (HTTP 503): {message}")]
    Unavailable {
        /// The extracted error message.
        message: String,
        /// The decoded response body.
        body: Value,
    },

    /// Any other non-success status.
    #[error("HTTP {code}: {message}")]
    Other {
        /// The HTTP status code.
        code: u16,
        /// The extracted error message.
        message: String,
        /// The decoded response body.
        body: Value,
    },
}

impl ApiError {
    /// Maps a non-success status code and decoded body to the matching
    /// variant.
    #[must_use]
    pub fn from_response(code: u16, body: Value) -> Self {
        let message = extract_error_message(&body);
        match code {
            400 => Self::BadRequest { message, body },
            401 => Self::Unauthorized { message, body },
            403 => Self::Forbidden { message, body },
            404 => Self::NotFound { message, body },
            405 => Self::MethodNotAllowed { message, body },
            409 => Self::Conflict { message, body },
            413 => Self::OverLimit { message, body },
            429 => Self::RateLimit { message, body },
            500 => Self::Internal { message, body },
            501 => Self::NotImplemented { message, body },
            503 => Self::Unavailable { message, body },
            _ => Self::Other {
                code,
                message,
                body,
            },
        }
    }

    /// Returns the HTTP status code this error was mapped from.
    #[must_use]
    pub const fn status(&self) -> u16 {
        match self {
            Self::BadRequest { .. } => 400,
            Self::Unauthorized { .. } => 401,
            Self::Forbidden { .. } => 403,
            Self::NotFound { .. } => 404,
            Self::MethodNotAllowed { .. } => 405,
            Self::Conflict { .. } => 409,
            Self::OverLimit { .. } => 413,
            Self::RateLimit { .. } => 429,
            Self::Internal { .. } => 500,
            Self::NotImplemented { .. } => 501,
            Self::Unavailable { .. } => 503,
            Self::Other { code, .. } => *code,
        }
    }

    /// Returns the extracted error message.
    #[must_use]
    pub fn message(&self) -> &str {
        match self {
            Self::BadRequest { message, .. }
            | Self::Unauthorized { message, .. }
            | Self::Forbidden { message, .. }
            | Self::NotFound { message, .. }
            | Self::MethodNotAllowed { message, .. }
            | Self::Conflict { message, .. }
            | Self::OverLimit { message, .. }
            | Self::RateLimit { message, .. }
            | Self::Internal { message, .. }
            | Self::NotImplemented { message, .. }
            | Self::Unavailable { message, .. }
            | Self::Other { message, .. } => message,
        }
    }

    /// Returns the decoded response body.
    #[must_use]
    pub const fn body(&self) -> &Value {
        match self {
            Self::BadRequest { body, .. }
            | Self::Unauthorized { body, .. }
            | Self::Forbidden { body, .. }
            | Self::NotFound { body, .. }
            | Self::MethodNotAllowed { body, .. }
            | Self::Conflict { body, .. }
            | Self::OverLimit { body, .. }
            | Self::RateLimit { body, .. }
            | Self::Internal { body, .. }
            | Self::NotImplemented { body, .. }
            | Self::Unavailable { body, .. }
            | Self::Other { body, .. } => body,
        }
    }
}

/// Pulls a human-readable message out of the common error body shapes.
///
/// Recognizes `{"error": {"message": ...}}`, `{"error": "..."}`,
/// `{"message": ...}`, and `{"faultstring": ...}`; anything else is
/// serialized whole.
fn extract_error_message(body: &Value) -> String {
    if let Some(message) = body
        .pointer("/error/message")
        .or_else(|| body.get("message"))
        .or_else(|| body.get("faultstring"))
        .and_then(Value::as_str)
    {
        return message.to_string();
    }
    if let Some(message) = body.get("error").and_then(Value::as_str) {
        return message.to_string();
    }
    body.to_string()
}

/// Error returned when maximum retry attempts have been exhausted.
///
/// Raised when a request keeps failing with a retryable status after all
/// configured attempts have been made.
#[derive(Debug, Error)]
#[error("Exceeded maximum retry count of {tries}. Last message: {message}")]
pub struct MaxHttpRetriesExceededError {
    /// The HTTP status code of the last response.
    pub code: u16,
    /// The number of tries that were attempted.
    pub tries: u32,
    /// The extracted error message from the last response.
    pub message: String,
}

/// Error returned when an HTTP request fails validation before sending.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum InvalidHttpRequestError {
    /// A POST or PUT request was made without a body.
    #[error("Cannot use {method} without specifying data.")]
    MissingBody {
        /// The HTTP method that requires a body.
        method: String,
    },
}

/// Unified error type for all HTTP-related errors.
///
/// Pattern match to handle the specific kinds; [`ApiError`] carries the
/// per-status taxonomy.
#[derive(Debug, Error)]
pub enum HttpError {
    /// A non-2xx response, mapped by status code.
    #[error(transparent)]
    Api(#[from] ApiError),

    /// Maximum retry attempts exhausted.
    #[error(transparent)]
    MaxRetries(#[from] MaxHttpRetriesExceededError),

    /// Request validation failed.
    #[error(transparent)]
    InvalidRequest(#[from] InvalidHttpRequestError),

    /// Network or connection error.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),
}
