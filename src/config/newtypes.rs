//! Validated newtype wrappers for configuration values.
//!
//! This module provides type-safe wrappers around string values that validate
//! their contents on construction. Invalid values are rejected with clear
//! error messages.

use crate::error::ConfigError;
use std::fmt;
use std::str::FromStr;

fn has_http_scheme(url: &str) -> bool {
    let rest = url
        .strip_prefix("https://")
        .or_else(|| url.strip_prefix("http://"));
    rest.is_some_and(|r| !r.is_empty())
}

/// A validated identity-service URL.
///
/// This is the URL the client uses for token acquisition and catalog lookup.
/// Trailing slashes are trimmed so version paths can be appended uniformly.
///
/// # Example
///
/// ```rust
/// use distil_api::AuthUrl;
///
/// let url = AuthUrl::new("https://keystone.example.com:5000/").unwrap();
/// assert_eq!(url.as_ref(), "https://keystone.example.com:5000");
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AuthUrl(String);

impl AuthUrl {
    /// Creates a new validated auth URL.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidAuthUrl`] if the URL is empty or has no
    /// http/https scheme.
    pub fn new(url: impl Into<String>) -> Result<Self, ConfigError> {
        let url = url.into();
        let trimmed = url.trim().trim_end_matches('/');
        if !has_http_scheme(trimmed) {
            return Err(ConfigError::InvalidAuthUrl { url });
        }
        Ok(Self(trimmed.to_string()))
    }
}

impl AsRef<str> for AuthUrl {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AuthUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A validated service endpoint URL.
///
/// The base URL of the Distil API, either supplied explicitly or resolved
/// from the identity service's catalog.
///
/// # Example
///
/// ```rust
/// use distil_api::ServiceUrl;
///
/// let url = ServiceUrl::new("https://distil.example.com:9999/").unwrap();
/// assert_eq!(url.as_ref(), "https://distil.example.com:9999");
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ServiceUrl(String);

impl ServiceUrl {
    /// Creates a new validated service URL.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidServiceUrl`] if the URL is empty or has
    /// no http/https scheme.
    pub fn new(url: impl Into<String>) -> Result<Self, ConfigError> {
        let url = url.into();
        let trimmed = url.trim().trim_end_matches('/');
        if !has_http_scheme(trimmed) {
            return Err(ConfigError::InvalidServiceUrl { url });
        }
        Ok(Self(trimmed.to_string()))
    }
}

impl AsRef<str> for ServiceUrl {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ServiceUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A validated bearer token.
///
/// This newtype ensures the token is non-empty and masks its value in debug
/// output to prevent accidental exposure in logs.
///
/// # Security
///
/// The `Debug` implementation masks the token value, displaying only
/// `AuthToken(*****)` instead of the actual token.
///
/// # Example
///
/// ```rust
/// use distil_api::AuthToken;
///
/// let token = AuthToken::new("gAAAAA...").unwrap();
/// assert_eq!(format!("{:?}", token), "AuthToken(*****)");
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct AuthToken(String);

impl AuthToken {
    /// Creates a new validated bearer token.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::EmptyAuthToken`] if the token is empty.
    pub fn new(token: impl Into<String>) -> Result<Self, ConfigError> {
        let token = token.into();
        if token.is_empty() {
            return Err(ConfigError::EmptyAuthToken);
        }
        Ok(Self(token))
    }
}

impl AsRef<str> for AuthToken {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for AuthToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AuthToken(*****)")
    }
}

/// Endpoint interface selector.
///
/// OpenStack catalogs publish up to three URLs per service. The selector
/// controls which one the client resolves.
///
/// # Legacy Spellings
///
/// The pre-catalog-v3 spellings `publicURL`, `internalURL`, and `adminURL`
/// parse to the same variants.
///
/// # Example
///
/// ```rust
/// use distil_api::Interface;
///
/// let interface: Interface = "publicURL".parse().unwrap();
/// assert_eq!(interface, Interface::Public);
/// assert_eq!(interface.as_str(), "public");
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Interface {
    /// The publicly routable endpoint.
    #[default]
    Public,
    /// The endpoint on the internal management network.
    Internal,
    /// The administrative endpoint.
    Admin,
}

impl Interface {
    /// Returns the canonical lowercase name used in v3 catalogs.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Public => "public",
            Self::Internal => "internal",
            Self::Admin => "admin",
        }
    }

    /// Returns the legacy `*URL` key used in v2.0 catalogs.
    #[must_use]
    pub const fn legacy_key(self) -> &'static str {
        match self {
            Self::Public => "publicURL",
            Self::Internal => "internalURL",
            Self::Admin => "adminURL",
        }
    }
}

impl fmt::Display for Interface {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Interface {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "public" | "publicurl" => Ok(Self::Public),
            "internal" | "internalurl" => Ok(Self::Internal),
            "admin" | "adminurl" => Ok(Self::Admin),
            _ => Err(ConfigError::InvalidInterface {
                value: s.to_string(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_auth_url_trims_trailing_slash() {
        let url = AuthUrl::new("https://keystone.example.com:5000/").unwrap();
        assert_eq!(url.as_ref(), "https://keystone.example.com:5000");
    }

    #[test]
    fn test_auth_url_rejects_missing_scheme() {
        let result = AuthUrl::new("keystone.example.com");
        assert!(matches!(result, Err(ConfigError::InvalidAuthUrl { .. })));
    }

    #[test]
    fn test_auth_url_rejects_bare_scheme() {
        let result = AuthUrl::new("https://");
        assert!(matches!(result, Err(ConfigError::InvalidAuthUrl { .. })));
    }

    #[test]
    fn test_service_url_accepts_http() {
        let url = ServiceUrl::new("http://distil.example.com:9999").unwrap();
        assert_eq!(url.as_ref(), "http://distil.example.com:9999");
    }

    #[test]
    fn test_service_url_rejects_empty() {
        let result = ServiceUrl::new("");
        assert!(matches!(result, Err(ConfigError::InvalidServiceUrl { .. })));
    }

    #[test]
    fn test_auth_token_rejects_empty() {
        let result = AuthToken::new("");
        assert!(matches!(result, Err(ConfigError::EmptyAuthToken)));
    }

    #[test]
    fn test_auth_token_debug_is_masked() {
        let token = AuthToken::new("super-secret-token").unwrap();
        let debug = format!("{token:?}");
        assert_eq!(debug, "AuthToken(*****)");
        assert!(!debug.contains("super-secret"));
    }

    #[test]
    fn test_interface_parses_canonical_and_legacy_spellings() {
        assert_eq!("public".parse::<Interface>().unwrap(), Interface::Public);
        assert_eq!(
            "internalURL".parse::<Interface>().unwrap(),
            Interface::Internal
        );
        assert_eq!("adminURL".parse::<Interface>().unwrap(), Interface::Admin);
    }

    #[test]
    fn test_interface_rejects_unknown_value() {
        let result = "wildcardURL".parse::<Interface>();
        assert!(matches!(result, Err(ConfigError::InvalidInterface { .. })));
    }

    #[test]
    fn test_interface_default_is_public() {
        assert_eq!(Interface::default(), Interface::Public);
    }
}
