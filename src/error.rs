//! Error types for SDK configuration.
//!
//! This module contains the configuration error type used during client
//! construction and option validation.
//!
//! # Error Handling
//!
//! All configuration constructors return `Result<T, ConfigError>` to enable
//! fail-fast validation. Every variant is raised synchronously, before any
//! network I/O is attempted.
//!
//! # Example
//!
//! ```rust
//! use distil_api::{AuthToken, ConfigError};
//!
//! let result = AuthToken::new("");
//! assert!(matches!(result, Err(ConfigError::EmptyAuthToken)));
//! ```

use thiserror::Error;

/// Errors that can occur during SDK configuration.
///
/// This enum represents all possible errors that can occur when creating
/// or validating configuration values. Each variant provides a clear,
/// actionable error message.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Auth token cannot be empty.
    #[error("Auth token cannot be empty. Please provide a valid bearer token.")]
    EmptyAuthToken,

    /// A bearer token was supplied without a service URL.
    #[error(
        "For token-based authentication you must provide both 'auth_token' and 'service_url'."
    )]
    TokenWithoutServiceUrl,

    /// No usable credential source was supplied.
    #[error(
        "No credentials provided. Supply an auth token with a service URL, a session, \
         or a username/password with an auth URL."
    )]
    MissingCredentials,

    /// Auth URL is invalid.
    #[error("Invalid auth URL '{url}'. Please provide a valid URL with scheme (e.g., 'https://keystone.example.com:5000').")]
    InvalidAuthUrl {
        /// The invalid URL that was provided.
        url: String,
    },

    /// Service URL is invalid.
    #[error("Invalid service URL '{url}'. Please provide a valid URL with scheme (e.g., 'https://distil.example.com:9999').")]
    InvalidServiceUrl {
        /// The invalid URL that was provided.
        url: String,
    },

    /// Endpoint interface selector is invalid.
    #[error("Invalid interface '{value}'. Expected 'public', 'internal', or 'admin' (legacy 'publicURL' spellings are accepted).")]
    InvalidInterface {
        /// The invalid selector that was provided.
        value: String,
    },

    /// The requested API version is not supported by this client.
    #[error("API version '{version}' is not supported.")]
    UnsupportedApiVersion {
        /// The version string that was requested.
        version: String,
    },

    /// A configured certificate file could not be loaded.
    #[error("Could not load certificate '{path}': {reason}")]
    CertificateLoad {
        /// The path that was configured.
        path: String,
        /// Why loading failed.
        reason: String,
    },

    /// The HTTP transport could not be constructed from the given options.
    #[error("Could not build the HTTP transport: {reason}")]
    TransportBuild {
        /// Why construction failed.
        reason: String,
    },
}
