//! Top-level client for the Distil API.
//!
//! This module provides the [`Client`] type, which resolves authentication
//! (explicit token, pre-built session, or password via the identity
//! service), resolves the service endpoint from the catalog, constructs the
//! shared HTTP transport, and instantiates one manager per resource family.

use std::any::Any;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use thiserror::Error;

use crate::auth::{AuthError, IdentityClient, Session};
use crate::clients::{HttpClient, HttpError, TransportOptions};
use crate::config::{AuthToken, DistilConfig, ServiceUrl};
use crate::error::ConfigError;
use crate::rest::resources::v2::{
    CreditManager, HealthManager, InvoiceManager, MeasurementManager, ProductManager,
    QuotationManager,
};
use crate::rest::Manager;

/// Error type for client construction.
///
/// Wraps the configuration, authentication, and transport error taxonomies;
/// all of them propagate unchanged from the layer that raised them.
#[derive(Debug, Error)]
pub enum ClientError {
    /// A configuration error was detected before any network I/O.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Token acquisition or endpoint resolution failed.
    #[error(transparent)]
    Auth(#[from] AuthError),

    /// The transport could not complete a request.
    #[error(transparent)]
    Http(#[from] HttpError),
}

/// A manager attached to the client by an extension.
///
/// Extension managers are stored type-erased; use [`as_any`](Self::as_any)
/// to downcast back to the concrete type.
pub trait ExtensionManager: Any + Send + Sync {
    /// Returns the manager as `&dyn Any` for downcasting.
    fn as_any(&self) -> &dyn Any;
}

/// Factory invoked during bootstrap to build an extension's manager.
///
/// The factory receives a [`Manager`] bound to the client's shared
/// transport, the same base every built-in manager works through.
pub type ExtensionFactory = Arc<dyn Fn(Manager) -> Box<dyn ExtensionManager> + Send + Sync>;

/// Descriptor for an extension to attach during client construction.
///
/// Extensions with no factory are recognized but attach nothing, matching
/// descriptors that only carry metadata.
///
/// # Example
///
/// ```rust
/// use distil_api::client::{Extension, ExtensionManager};
/// use distil_api::rest::Manager;
/// use std::any::Any;
///
/// struct AuditManager {
///     manager: Manager,
/// }
///
/// impl ExtensionManager for AuditManager {
///     fn as_any(&self) -> &dyn Any {
///         self
///     }
/// }
///
/// let extension = Extension::new("audit")
///     .with_factory(|manager| Box::new(AuditManager { manager }));
/// assert_eq!(extension.name(), "audit");
/// ```
#[derive(Clone)]
pub struct Extension {
    name: String,
    factory: Option<ExtensionFactory>,
}

impl Extension {
    /// Creates a descriptor with no manager factory.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            factory: None,
        }
    }

    /// Attaches the factory invoked with the client's transport base.
    #[must_use]
    pub fn with_factory(
        mut self,
        factory: impl Fn(Manager) -> Box<dyn ExtensionManager> + Send + Sync + 'static,
    ) -> Self {
        self.factory = Some(Arc::new(factory));
        self
    }

    /// Returns the name the manager attaches under.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the factory, when one was attached.
    #[must_use]
    pub fn factory(&self) -> Option<&ExtensionFactory> {
        self.factory.as_ref()
    }
}

impl fmt::Debug for Extension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Extension")
            .field("name", &self.name)
            .field("has_factory", &self.factory.is_some())
            .finish()
    }
}

/// Top-level object to access the Distil API.
///
/// Construction resolves credentials, acquires a token, resolves the
/// service endpoint, and builds the managers; a constructed client always
/// holds a usable token and endpoint. The client is intended for
/// single-owner sequential use; construct one per worker when concurrency
/// is needed.
///
/// # Example
///
/// ```rust,no_run
/// use distil_api::{AuthUrl, Client, DistilConfig};
///
/// # async fn example() -> Result<(), distil_api::ClientError> {
/// let config = DistilConfig::builder()
///     .username("demo")
///     .password("secret")
///     .project_name("demo-project")
///     .auth_url(AuthUrl::new("https://keystone.example.com:5000").unwrap())
///     .region_name("nz-hlz-1")
///     .build()?;
///
/// let client = Client::new(config).await?;
/// let products = client.products.list(&[]).await?;
/// # Ok(())
/// # }
/// ```
pub struct Client {
    http: Arc<HttpClient>,
    endpoint: ServiceUrl,
    /// Manager for rated products.
    pub products: ProductManager,
    /// Manager for usage measurements.
    pub measurements: MeasurementManager,
    /// Manager for issued invoices.
    pub invoices: InvoiceManager,
    /// Manager for running quotations.
    pub quotations: QuotationManager,
    /// Manager for account credits.
    pub credits: CreditManager,
    /// Manager for the health endpoint.
    pub health: HealthManager,
    extensions: HashMap<String, Box<dyn ExtensionManager>>,
}

impl Client {
    /// Builds a client from the given configuration.
    ///
    /// Credential resolution order: an explicit token (with its service URL)
    /// short-circuits all identity interaction; otherwise a supplied session
    /// provides the token and catalog; otherwise the identity service is
    /// discovered and authenticated against with the password credentials.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Config`] for invalid option combinations,
    /// [`ClientError::Auth`] when no token can be acquired or no catalog
    /// entry matches the requested service type, interface, and region, and
    /// [`ClientError::Http`] for transport construction failures.
    pub async fn new(config: DistilConfig) -> Result<Self, ClientError> {
        let (token, session) = Self::resolve_credentials(&config).await?;
        let endpoint = Self::resolve_endpoint(&config, session.as_ref())?;

        let http = Arc::new(HttpClient::new(&endpoint, &token, &config)?);
        let version = config.api_version();

        let mut extensions: HashMap<String, Box<dyn ExtensionManager>> = HashMap::new();
        for extension in config.extensions() {
            if let Some(factory) = extension.factory() {
                let manager = (factory.as_ref())(Manager::new(Arc::clone(&http)));
                extensions.insert(extension.name().to_string(), manager);
            }
        }

        Ok(Self {
            products: ProductManager::new(Arc::clone(&http), version),
            measurements: MeasurementManager::new(Arc::clone(&http), version),
            invoices: InvoiceManager::new(Arc::clone(&http), version),
            quotations: QuotationManager::new(Arc::clone(&http), version),
            credits: CreditManager::new(Arc::clone(&http), version),
            health: HealthManager::new(Arc::clone(&http), version),
            http,
            endpoint,
            extensions,
        })
    }

    /// Resolves the token, and the session it came from when one was used.
    ///
    /// An [`AuthToken`] is non-empty by construction, so holding one at the
    /// end of this step is the "token acquired" check itself; the identity
    /// path fails typed when the service returns none.
    async fn resolve_credentials(
        config: &DistilConfig,
    ) -> Result<(AuthToken, Option<Session>), ClientError> {
        // Token authorization has the highest priority: session and
        // password credentials are ignored when a token is supplied.
        if let Some(token) = config.auth_token() {
            return Ok((token.clone(), None));
        }
        if let Some(session) = config.session() {
            return Ok((session.token().clone(), Some(session.clone())));
        }

        let auth_url = config
            .auth_url()
            .cloned()
            .ok_or(ConfigError::MissingCredentials)?;
        let identity = IdentityClient::new(auth_url, &TransportOptions::from_config(config))?;
        let session = identity.authenticate(config).await?;
        Ok((session.token().clone(), Some(session)))
    }

    /// Resolves the service endpoint: an explicit URL wins, else the
    /// session's catalog is scanned.
    fn resolve_endpoint(
        config: &DistilConfig,
        session: Option<&Session>,
    ) -> Result<ServiceUrl, ClientError> {
        if let Some(url) = config.service_url() {
            return Ok(url.clone());
        }

        // Config validation guarantees a session exists on this path.
        let session = session.ok_or(ConfigError::MissingCredentials)?;
        let endpoint = session
            .endpoint_for(
                config.service_type(),
                config.interface(),
                config.region_name(),
                config.service_name(),
            )
            .ok_or_else(|| AuthError::EndpointNotFound {
                service_type: config.service_type().to_string(),
                region: config.region_name().map(ToString::to_string),
            })?;

        let url = ServiceUrl::new(endpoint.url.clone())?;
        Ok(url)
    }

    /// Returns the resolved service endpoint.
    #[must_use]
    pub const fn endpoint(&self) -> &ServiceUrl {
        &self.endpoint
    }

    /// Returns the shared HTTP transport.
    #[must_use]
    pub fn transport(&self) -> &HttpClient {
        &self.http
    }

    /// Returns the manager attached by the named extension, if any.
    #[must_use]
    pub fn extension(&self, name: &str) -> Option<&dyn ExtensionManager> {
        self.extensions.get(name).map(|manager| &**manager)
    }

    /// Returns the names of all attached extensions.
    pub fn extension_names(&self) -> impl Iterator<Item = &str> {
        self.extensions.keys().map(String::as_str)
    }

    /// Deprecated: the client authenticates in its constructor.
    ///
    /// Kept for callers ported from clients where authentication was a
    /// separate step; calling it only emits a warning.
    pub fn authenticate(&self) {
        tracing::warn!(
            "authenticate() is deprecated. The client automatically makes the \
             authentication call in its constructor."
        );
    }
}

impl fmt::Debug for Client {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Client")
            .field("endpoint", &self.endpoint)
            .field("extensions", &self.extensions.keys().collect::<Vec<_>>())
            .finish_non_exhaustive()
    }
}

// Verify Client is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<Client>();
};
