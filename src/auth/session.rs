//! Authenticated identity sessions.
//!
//! This module provides the [`Session`] type: a token plus the service
//! catalog it was issued with. Sessions come out of
//! [`IdentityClient::authenticate`](crate::auth::IdentityClient::authenticate),
//! or can be built directly by callers that manage authentication themselves
//! and want to hand the client a ready-made token and catalog.

use crate::auth::catalog::{Endpoint, ServiceCatalog};
use crate::config::{AuthToken, Interface};

/// An authenticated identity session.
///
/// Holds the bearer token and the catalog returned alongside it. The client
/// bootstrap takes the token from here and resolves the service endpoint
/// through [`endpoint_for`](Self::endpoint_for).
///
/// # Example
///
/// ```rust
/// use distil_api::{AuthToken, ServiceCatalog, Session};
///
/// let session = Session::new(
///     AuthToken::new("token").unwrap(),
///     ServiceCatalog::default(),
/// );
/// assert_eq!(session.token().as_ref(), "token");
/// ```
#[derive(Clone, Debug)]
pub struct Session {
    token: AuthToken,
    catalog: ServiceCatalog,
}

impl Session {
    /// Creates a session from a token and catalog.
    #[must_use]
    pub const fn new(token: AuthToken, catalog: ServiceCatalog) -> Self {
        Self { token, catalog }
    }

    /// Returns the bearer token.
    #[must_use]
    pub const fn token(&self) -> &AuthToken {
        &self.token
    }

    /// Returns the service catalog.
    #[must_use]
    pub const fn catalog(&self) -> &ServiceCatalog {
        &self.catalog
    }

    /// Resolves an endpoint from the session's catalog.
    ///
    /// See [`ServiceCatalog::endpoint_for`] for the matching rules.
    #[must_use]
    pub fn endpoint_for(
        &self,
        service_type: &str,
        interface: Interface,
        region: Option<&str>,
        service_name: Option<&str>,
    ) -> Option<&Endpoint> {
        self.catalog
            .endpoint_for(service_type, interface, region, service_name)
    }
}

// Verify Session is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<Session>();
};
