//! Configuration types for the Distil API SDK.
//!
//! This module provides the core configuration types used to initialize
//! and configure the SDK for API communication with a Distil deployment.
//!
//! # Overview
//!
//! The main types in this module are:
//!
//! - [`DistilConfig`]: The main configuration struct holding all SDK settings
//! - [`DistilConfigBuilder`]: A builder for constructing [`DistilConfig`] instances
//! - [`AuthUrl`]: A validated identity-service URL
//! - [`ServiceUrl`]: A validated service endpoint URL
//! - [`AuthToken`]: A validated bearer token with masked debug output
//! - [`Interface`]: The endpoint interface selector (public/internal/admin)
//! - [`ApiVersion`]: The Distil API version to use
//!
//! # Example
//!
//! ```rust
//! use distil_api::{AuthUrl, DistilConfig};
//!
//! let config = DistilConfig::builder()
//!     .username("demo")
//!     .password("secret")
//!     .project_id("p-123")
//!     .auth_url(AuthUrl::new("https://keystone.example.com:5000").unwrap())
//!     .region_name("nz-hlz-1")
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(config.region_name(), Some("nz-hlz-1"));
//! ```

mod newtypes;
mod version;

pub use newtypes::{AuthToken, AuthUrl, Interface, ServiceUrl};
pub use version::ApiVersion;

use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::auth::Session;
use crate::client::Extension;
use crate::error::ConfigError;

/// The service type the client looks up in the identity catalog by default.
pub const DEFAULT_SERVICE_TYPE: &str = "rating";

/// Configuration for the Distil API SDK.
///
/// This struct holds all configuration needed for client construction:
/// identity credentials, endpoint selection, transport options, and the
/// API version.
///
/// # Thread Safety
///
/// `DistilConfig` is `Clone`, `Send`, and `Sync`, making it safe to share
/// across threads and async tasks.
///
/// # Example
///
/// ```rust
/// use distil_api::{AuthToken, DistilConfig, ServiceUrl};
///
/// let config = DistilConfig::builder()
///     .auth_token(AuthToken::new("token").unwrap())
///     .service_url(ServiceUrl::new("https://distil.example.com:9999").unwrap())
///     .build()
///     .unwrap();
/// ```
#[derive(Clone, Debug)]
pub struct DistilConfig {
    username: Option<String>,
    password: Option<String>,
    user_id: Option<String>,
    project_id: Option<String>,
    project_name: Option<String>,
    user_domain_id: Option<String>,
    user_domain_name: Option<String>,
    project_domain_id: Option<String>,
    project_domain_name: Option<String>,
    auth_url: Option<AuthUrl>,
    region_name: Option<String>,
    interface: Interface,
    service_type: String,
    service_name: Option<String>,
    auth_token: Option<AuthToken>,
    service_url: Option<ServiceUrl>,
    session: Option<Session>,
    insecure: bool,
    cacert: Option<PathBuf>,
    cert: Option<PathBuf>,
    timeout: Option<Duration>,
    retries: u32,
    http_log_debug: bool,
    api_version: ApiVersion,
    user_agent_prefix: Option<String>,
    extensions: Vec<Extension>,
    deprecation_warnings: Vec<String>,
}

impl DistilConfig {
    /// Creates a new builder for constructing a `DistilConfig`.
    #[must_use]
    pub fn builder() -> DistilConfigBuilder {
        DistilConfigBuilder::new()
    }

    /// Returns the username, if configured.
    #[must_use]
    pub fn username(&self) -> Option<&str> {
        self.username.as_deref()
    }

    /// Returns the password, if configured.
    #[must_use]
    pub fn password(&self) -> Option<&str> {
        self.password.as_deref()
    }

    /// Returns the user id, if configured.
    #[must_use]
    pub fn user_id(&self) -> Option<&str> {
        self.user_id.as_deref()
    }

    /// Returns the project id, if configured.
    #[must_use]
    pub fn project_id(&self) -> Option<&str> {
        self.project_id.as_deref()
    }

    /// Returns the project name, if configured.
    #[must_use]
    pub fn project_name(&self) -> Option<&str> {
        self.project_name.as_deref()
    }

    /// Returns the user domain id, if configured.
    #[must_use]
    pub fn user_domain_id(&self) -> Option<&str> {
        self.user_domain_id.as_deref()
    }

    /// Returns the user domain name, if configured.
    #[must_use]
    pub fn user_domain_name(&self) -> Option<&str> {
        self.user_domain_name.as_deref()
    }

    /// Returns the project domain id, if configured.
    #[must_use]
    pub fn project_domain_id(&self) -> Option<&str> {
        self.project_domain_id.as_deref()
    }

    /// Returns the project domain name, if configured.
    #[must_use]
    pub fn project_domain_name(&self) -> Option<&str> {
        self.project_domain_name.as_deref()
    }

    /// Returns the identity-service URL, if configured.
    #[must_use]
    pub const fn auth_url(&self) -> Option<&AuthUrl> {
        self.auth_url.as_ref()
    }

    /// Returns the region name, if configured.
    #[must_use]
    pub fn region_name(&self) -> Option<&str> {
        self.region_name.as_deref()
    }

    /// Returns the endpoint interface selector.
    #[must_use]
    pub const fn interface(&self) -> Interface {
        self.interface
    }

    /// Returns the catalog service type (defaults to `"rating"`).
    #[must_use]
    pub fn service_type(&self) -> &str {
        &self.service_type
    }

    /// Returns the catalog service name filter, if configured.
    #[must_use]
    pub fn service_name(&self) -> Option<&str> {
        self.service_name.as_deref()
    }

    /// Returns the explicit bearer token, if configured.
    #[must_use]
    pub const fn auth_token(&self) -> Option<&AuthToken> {
        self.auth_token.as_ref()
    }

    /// Returns the explicit service URL, if configured.
    #[must_use]
    pub const fn service_url(&self) -> Option<&ServiceUrl> {
        self.service_url.as_ref()
    }

    /// Returns the pre-built identity session, if configured.
    #[must_use]
    pub const fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    /// Returns whether TLS server verification is disabled.
    #[must_use]
    pub const fn insecure(&self) -> bool {
        self.insecure
    }

    /// Returns the CA certificate bundle path, if configured.
    #[must_use]
    pub fn cacert(&self) -> Option<&Path> {
        self.cacert.as_deref()
    }

    /// Returns the client certificate path, if configured.
    #[must_use]
    pub fn cert(&self) -> Option<&Path> {
        self.cert.as_deref()
    }

    /// Returns the end-to-end request timeout, if configured.
    #[must_use]
    pub const fn timeout(&self) -> Option<Duration> {
        self.timeout
    }

    /// Returns the retry count for rate-limited and server-error responses.
    #[must_use]
    pub const fn retries(&self) -> u32 {
        self.retries
    }

    /// Returns whether request/response debug logging is enabled.
    #[must_use]
    pub const fn http_log_debug(&self) -> bool {
        self.http_log_debug
    }

    /// Returns the API version.
    #[must_use]
    pub const fn api_version(&self) -> ApiVersion {
        self.api_version
    }

    /// Returns the user agent prefix, if configured.
    #[must_use]
    pub fn user_agent_prefix(&self) -> Option<&str> {
        self.user_agent_prefix.as_deref()
    }

    /// Returns the configured extension descriptors.
    #[must_use]
    pub fn extensions(&self) -> &[Extension] {
        &self.extensions
    }

    /// Returns the deprecation warnings recorded while building this config.
    ///
    /// Each warning names the deprecated argument and, where one exists, its
    /// replacement. The same messages are emitted through `tracing::warn!`
    /// when the config is built.
    #[must_use]
    pub fn deprecation_warnings(&self) -> &[String] {
        &self.deprecation_warnings
    }
}

// Verify DistilConfig is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<DistilConfig>();
};

/// Builder for constructing [`DistilConfig`] instances.
///
/// This builder provides a fluent API for configuring the SDK. Exactly one
/// credential source must be supplied: an explicit token with a service URL,
/// a pre-built [`Session`], or a username/password with an auth URL.
///
/// # Deprecated Arguments
///
/// The builder accepts a handful of legacy argument names for backward
/// compatibility (`api_key`, `share_service_name`, `proxy_token`,
/// `proxy_tenant_id`). Supplying any of them records a warning naming the
/// argument and, where applicable, its replacement; construction still
/// proceeds.
///
/// # Example
///
/// ```rust
/// use distil_api::{AuthUrl, DistilConfig, Interface};
///
/// let config = DistilConfig::builder()
///     .username("demo")
///     .password("secret")
///     .project_name("demo-project")
///     .auth_url(AuthUrl::new("https://keystone.example.com:5000").unwrap())
///     .interface(Interface::Internal)
///     .retries(3)
///     .build()
///     .unwrap();
/// ```
#[derive(Debug, Default)]
pub struct DistilConfigBuilder {
    username: Option<String>,
    password: Option<String>,
    api_key: Option<String>,
    user_id: Option<String>,
    project_id: Option<String>,
    project_name: Option<String>,
    user_domain_id: Option<String>,
    user_domain_name: Option<String>,
    project_domain_id: Option<String>,
    project_domain_name: Option<String>,
    auth_url: Option<AuthUrl>,
    region_name: Option<String>,
    interface: Option<Interface>,
    service_type: Option<String>,
    service_name: Option<String>,
    auth_token: Option<AuthToken>,
    service_url: Option<ServiceUrl>,
    session: Option<Session>,
    insecure: Option<bool>,
    cacert: Option<PathBuf>,
    cert: Option<PathBuf>,
    timeout: Option<Duration>,
    retries: Option<u32>,
    http_log_debug: Option<bool>,
    api_version: Option<ApiVersion>,
    user_agent_prefix: Option<String>,
    extensions: Vec<Extension>,
    deprecation_warnings: Vec<String>,
}

impl DistilConfigBuilder {
    /// Creates a new builder with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn warn_deprecated(&mut self, argument: &str, replacement: Option<&str>) {
        let message = replacement.map_or_else(
            || format!("Argument {argument} is deprecated."),
            |repl| format!("Argument {argument} is deprecated. Use {repl} instead."),
        );
        self.deprecation_warnings.push(message);
    }

    /// Sets the username for password authentication.
    #[must_use]
    pub fn username(mut self, username: impl Into<String>) -> Self {
        self.username = Some(username.into());
        self
    }

    /// Sets the password for password authentication.
    #[must_use]
    pub fn password(mut self, password: impl Into<String>) -> Self {
        self.password = Some(password.into());
        self
    }

    /// Legacy alias for [`password`](Self::password). Deprecated.
    ///
    /// Records a deprecation warning; the value is used as the password when
    /// no password was set explicitly.
    #[must_use]
    pub fn api_key(mut self, api_key: impl Into<String>) -> Self {
        self.warn_deprecated("api_key", Some("password"));
        self.api_key = Some(api_key.into());
        self
    }

    /// Sets the user id.
    #[must_use]
    pub fn user_id(mut self, user_id: impl Into<String>) -> Self {
        self.user_id = Some(user_id.into());
        self
    }

    /// Sets the project id.
    #[must_use]
    pub fn project_id(mut self, project_id: impl Into<String>) -> Self {
        self.project_id = Some(project_id.into());
        self
    }

    /// Alias for [`project_id`](Self::project_id), kept for callers using
    /// tenant terminology.
    #[must_use]
    pub fn tenant_id(self, tenant_id: impl Into<String>) -> Self {
        self.project_id(tenant_id)
    }

    /// Sets the project name.
    #[must_use]
    pub fn project_name(mut self, project_name: impl Into<String>) -> Self {
        self.project_name = Some(project_name.into());
        self
    }

    /// Sets the user domain id.
    #[must_use]
    pub fn user_domain_id(mut self, value: impl Into<String>) -> Self {
        self.user_domain_id = Some(value.into());
        self
    }

    /// Sets the user domain name.
    #[must_use]
    pub fn user_domain_name(mut self, value: impl Into<String>) -> Self {
        self.user_domain_name = Some(value.into());
        self
    }

    /// Sets the project domain id.
    #[must_use]
    pub fn project_domain_id(mut self, value: impl Into<String>) -> Self {
        self.project_domain_id = Some(value.into());
        self
    }

    /// Sets the project domain name.
    #[must_use]
    pub fn project_domain_name(mut self, value: impl Into<String>) -> Self {
        self.project_domain_name = Some(value.into());
        self
    }

    /// Sets the identity-service URL.
    #[must_use]
    pub fn auth_url(mut self, auth_url: AuthUrl) -> Self {
        self.auth_url = Some(auth_url);
        self
    }

    /// Sets the region to filter catalog endpoints by.
    #[must_use]
    pub fn region_name(mut self, region_name: impl Into<String>) -> Self {
        self.region_name = Some(region_name.into());
        self
    }

    /// Sets the endpoint interface selector.
    #[must_use]
    pub const fn interface(mut self, interface: Interface) -> Self {
        self.interface = Some(interface);
        self
    }

    /// Sets the catalog service type (defaults to `"rating"`).
    #[must_use]
    pub fn service_type(mut self, service_type: impl Into<String>) -> Self {
        self.service_type = Some(service_type.into());
        self
    }

    /// Sets the catalog service name filter.
    #[must_use]
    pub fn service_name(mut self, service_name: impl Into<String>) -> Self {
        self.service_name = Some(service_name.into());
        self
    }

    /// Legacy alias for [`service_name`](Self::service_name). Deprecated.
    #[must_use]
    pub fn share_service_name(mut self, service_name: impl Into<String>) -> Self {
        self.warn_deprecated("share_service_name", Some("service_name"));
        self.service_name = Some(service_name.into());
        self
    }

    /// Accepted for backward compatibility; the value is ignored. Deprecated.
    #[must_use]
    pub fn proxy_token(mut self, _proxy_token: impl Into<String>) -> Self {
        self.warn_deprecated("proxy_token", None);
        self
    }

    /// Accepted for backward compatibility; the value is ignored. Deprecated.
    #[must_use]
    pub fn proxy_tenant_id(mut self, _proxy_tenant_id: impl Into<String>) -> Self {
        self.warn_deprecated("proxy_tenant_id", None);
        self
    }

    /// Sets an explicit bearer token.
    ///
    /// Token authentication has the highest priority: when a token is
    /// supplied, the session and password credentials are ignored. A
    /// [`service_url`](Self::service_url) must be supplied alongside it.
    #[must_use]
    pub fn auth_token(mut self, token: AuthToken) -> Self {
        self.auth_token = Some(token);
        self
    }

    /// Sets an explicit service endpoint URL, bypassing catalog lookup.
    #[must_use]
    pub fn service_url(mut self, url: ServiceUrl) -> Self {
        self.service_url = Some(url);
        self
    }

    /// Sets a pre-built identity session to take the token and catalog from.
    #[must_use]
    pub fn session(mut self, session: Session) -> Self {
        self.session = Some(session);
        self
    }

    /// Disables TLS server certificate verification.
    #[must_use]
    pub const fn insecure(mut self, insecure: bool) -> Self {
        self.insecure = Some(insecure);
        self
    }

    /// Sets the CA certificate bundle path.
    #[must_use]
    pub fn cacert(mut self, path: impl Into<PathBuf>) -> Self {
        self.cacert = Some(path.into());
        self
    }

    /// Sets the client certificate path.
    #[must_use]
    pub fn cert(mut self, path: impl Into<PathBuf>) -> Self {
        self.cert = Some(path.into());
        self
    }

    /// Sets the end-to-end request timeout.
    #[must_use]
    pub const fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Sets the retry count for rate-limited and server-error responses.
    #[must_use]
    pub const fn retries(mut self, retries: u32) -> Self {
        self.retries = Some(retries);
        self
    }

    /// Enables request/response debug logging.
    #[must_use]
    pub const fn http_log_debug(mut self, enabled: bool) -> Self {
        self.http_log_debug = Some(enabled);
        self
    }

    /// Sets the API version.
    #[must_use]
    pub const fn api_version(mut self, version: ApiVersion) -> Self {
        self.api_version = Some(version);
        self
    }

    /// Sets the user agent prefix for HTTP requests.
    #[must_use]
    pub fn user_agent_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.user_agent_prefix = Some(prefix.into());
        self
    }

    /// Adds an extension descriptor.
    #[must_use]
    pub fn extension(mut self, extension: Extension) -> Self {
        self.extensions.push(extension);
        self
    }

    /// Adds several extension descriptors at once.
    #[must_use]
    pub fn extensions(mut self, extensions: impl IntoIterator<Item = Extension>) -> Self {
        self.extensions.extend(extensions);
        self
    }

    /// Builds the [`DistilConfig`], validating the credential combination.
    ///
    /// Deprecation warnings recorded by the builder are emitted through
    /// `tracing::warn!` here and retained on the config.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::TokenWithoutServiceUrl`] if a token was supplied
    /// without a service URL, and [`ConfigError::MissingCredentials`] if no
    /// credential source was supplied at all.
    pub fn build(self) -> Result<DistilConfig, ConfigError> {
        if self.auth_token.is_some() && self.service_url.is_none() {
            return Err(ConfigError::TokenWithoutServiceUrl);
        }

        let password = self.password.or(self.api_key);

        let has_password_auth = self.auth_url.is_some() && self.username.is_some();
        if self.auth_token.is_none() && self.session.is_none() && !has_password_auth {
            return Err(ConfigError::MissingCredentials);
        }

        for warning in &self.deprecation_warnings {
            tracing::warn!("{warning}");
        }

        Ok(DistilConfig {
            username: self.username,
            password,
            user_id: self.user_id,
            project_id: self.project_id,
            project_name: self.project_name,
            user_domain_id: self.user_domain_id,
            user_domain_name: self.user_domain_name,
            project_domain_id: self.project_domain_id,
            project_domain_name: self.project_domain_name,
            auth_url: self.auth_url,
            region_name: self.region_name,
            interface: self.interface.unwrap_or_default(),
            service_type: self
                .service_type
                .unwrap_or_else(|| DEFAULT_SERVICE_TYPE.to_string()),
            service_name: self.service_name,
            auth_token: self.auth_token,
            service_url: self.service_url,
            session: self.session,
            insecure: self.insecure.unwrap_or(false),
            cacert: self.cacert,
            cert: self.cert,
            timeout: self.timeout,
            retries: self.retries.unwrap_or(0),
            http_log_debug: self.http_log_debug.unwrap_or(false),
            api_version: self.api_version.unwrap_or_default(),
            user_agent_prefix: self.user_agent_prefix,
            extensions: self.extensions,
            deprecation_warnings: self.deprecation_warnings,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn password_builder() -> DistilConfigBuilder {
        DistilConfig::builder()
            .username("demo")
            .password("secret")
            .auth_url(AuthUrl::new("https://keystone.example.com:5000").unwrap())
    }

    #[test]
    fn test_token_without_service_url_is_rejected() {
        let result = DistilConfig::builder()
            .auth_token(AuthToken::new("token").unwrap())
            .build();

        assert!(matches!(result, Err(ConfigError::TokenWithoutServiceUrl)));
    }

    #[test]
    fn test_no_credentials_is_rejected() {
        let result = DistilConfig::builder().region_name("nz-hlz-1").build();
        assert!(matches!(result, Err(ConfigError::MissingCredentials)));
    }

    #[test]
    fn test_password_credentials_build() {
        let config = password_builder().build().unwrap();
        assert_eq!(config.username(), Some("demo"));
        assert_eq!(config.password(), Some("secret"));
        assert!(config.deprecation_warnings().is_empty());
    }

    #[test]
    fn test_defaults() {
        let config = password_builder().build().unwrap();
        assert_eq!(config.interface(), Interface::Public);
        assert_eq!(config.service_type(), DEFAULT_SERVICE_TYPE);
        assert_eq!(config.api_version(), ApiVersion::V2);
        assert_eq!(config.retries(), 0);
        assert!(!config.insecure());
        assert!(!config.http_log_debug());
        assert!(config.timeout().is_none());
    }

    #[test]
    fn test_api_key_records_one_warning_naming_replacement() {
        let config = password_builder().api_key("legacy").build().unwrap();

        assert_eq!(config.deprecation_warnings().len(), 1);
        let warning = &config.deprecation_warnings()[0];
        assert!(warning.contains("api_key"));
        assert!(warning.contains("password"));
    }

    #[test]
    fn test_api_key_is_used_as_password_fallback() {
        let config = DistilConfig::builder()
            .username("demo")
            .auth_url(AuthUrl::new("https://keystone.example.com:5000").unwrap())
            .api_key("legacy-secret")
            .build()
            .unwrap();

        assert_eq!(config.password(), Some("legacy-secret"));
    }

    #[test]
    fn test_explicit_password_wins_over_api_key() {
        let config = password_builder().api_key("legacy-secret").build().unwrap();
        assert_eq!(config.password(), Some("secret"));
    }

    #[test]
    fn test_proxy_token_warning_has_no_replacement() {
        let config = password_builder().proxy_token("ignored").build().unwrap();

        assert_eq!(config.deprecation_warnings().len(), 1);
        let warning = &config.deprecation_warnings()[0];
        assert!(warning.contains("proxy_token"));
        assert!(!warning.contains("instead"));
    }

    #[test]
    fn test_share_service_name_sets_service_name() {
        let config = password_builder()
            .share_service_name("distil")
            .build()
            .unwrap();

        assert_eq!(config.service_name(), Some("distil"));
        assert_eq!(config.deprecation_warnings().len(), 1);
    }

    #[test]
    fn test_tenant_id_aliases_project_id() {
        let config = password_builder().tenant_id("t-42").build().unwrap();
        assert_eq!(config.project_id(), Some("t-42"));
        assert!(config.deprecation_warnings().is_empty());
    }

    #[test]
    fn test_config_is_clone_and_debug() {
        let config = password_builder().build().unwrap();
        let cloned = config.clone();
        assert_eq!(cloned.username(), config.username());

        let debug_str = format!("{config:?}");
        assert!(debug_str.contains("DistilConfig"));
    }
}
