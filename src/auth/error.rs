//! Error types for identity-service interaction.

use thiserror::Error;

use crate::clients::ApiError;

/// Errors raised while acquiring a token or resolving a service endpoint.
///
/// These cover the authentication half of client construction: identity
/// version discovery, the authenticate round trip, and catalog lookup.
/// Transport and API failures from the identity service propagate unchanged
/// inside the corresponding variants.
#[derive(Debug, Error)]
pub enum AuthError {
    /// The identity service's supported protocol version could not be
    /// determined from the given auth URL.
    #[error(
        "Unable to determine the identity service version to authenticate \
         with using the given auth URL."
    )]
    VersionDiscovery,

    /// Authentication completed without producing a token.
    #[error("Not authorized: the identity service did not return a token.")]
    NotAuthorized,

    /// No catalog entry matched the requested service type, interface, and
    /// region.
    #[error(
        "Could not find a '{service_type}' endpoint in the service catalog (region: {})",
        .region.as_deref().unwrap_or("any")
    )]
    EndpointNotFound {
        /// The service type that was requested.
        service_type: String,
        /// The region filter, if one was applied.
        region: Option<String>,
    },

    /// The identity service answered with a body this client cannot use.
    #[error("Unexpected response from the identity service: {reason}")]
    InvalidResponse {
        /// What was wrong with the response.
        reason: String,
    },

    /// The identity service answered with a non-success status.
    #[error(transparent)]
    Api(#[from] ApiError),

    /// Network or connection error while talking to the identity service.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),
}
