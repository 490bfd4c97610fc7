//! # Distil API Rust SDK
//!
//! A Rust SDK for the OpenStack Distil rating and billing API, providing
//! typed configuration, identity-service authentication with endpoint
//! discovery, and managers for every resource family the API exposes.
//!
//! ## Overview
//!
//! This SDK provides:
//! - Type-safe configuration via [`DistilConfig`] and [`DistilConfigBuilder`]
//! - Validated newtypes for URLs and tokens
//! - Identity-service authentication with protocol version auto-discovery
//!   (the newer protocol is preferred when both are published)
//! - Service endpoint resolution from the identity catalog, filtered by
//!   service type, interface, and region
//! - An authenticated async HTTP client with retry handling
//! - One manager per resource family: products, measurements, invoices,
//!   quotations, credits, and health
//! - An extension registry for attaching additional managers at
//!   construction time
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use distil_api::{AuthUrl, Client, DistilConfig};
//!
//! # async fn example() -> Result<(), distil_api::ClientError> {
//! // Create configuration using the builder pattern
//! let config = DistilConfig::builder()
//!     .username("demo")
//!     .password("secret")
//!     .project_name("demo-project")
//!     .auth_url(AuthUrl::new("https://keystone.example.com:5000").unwrap())
//!     .region_name("nz-hlz-1")
//!     .build()?;
//!
//! // Construction authenticates and resolves the endpoint
//! let client = Client::new(config).await?;
//!
//! // Then call methods on its managers
//! let products = client.products.list(&["nz-hlz-1"]).await?;
//! for product in &products {
//!     println!("{product}");
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## Token Authentication
//!
//! An explicit token with an explicit service URL skips the identity
//! service entirely:
//!
//! ```rust,no_run
//! use distil_api::{AuthToken, Client, DistilConfig, ServiceUrl};
//!
//! # async fn example() -> Result<(), distil_api::ClientError> {
//! let config = DistilConfig::builder()
//!     .auth_token(AuthToken::new("gAAAAA...").unwrap())
//!     .service_url(ServiceUrl::new("https://distil.example.com:9999").unwrap())
//!     .build()?;
//!
//! let client = Client::new(config).await?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Session Authentication
//!
//! Callers that manage authentication themselves can hand the client a
//! ready-made [`Session`] carrying a token and service catalog; the
//! endpoint is resolved from the session's catalog:
//!
//! ```rust,no_run
//! use distil_api::{AuthToken, Client, DistilConfig, ServiceCatalog, Session};
//!
//! # async fn example(catalog: ServiceCatalog) -> Result<(), distil_api::ClientError> {
//! let session = Session::new(AuthToken::new("token").unwrap(), catalog);
//!
//! let config = DistilConfig::builder()
//!     .session(session)
//!     .region_name("nz-hlz-1")
//!     .build()?;
//!
//! let client = Client::new(config).await?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Design Principles
//!
//! - **No global state**: configuration is instance-based and passed
//!   explicitly; version limits live on [`ApiVersion`] itself
//! - **Fail-fast validation**: newtypes validate on construction, and
//!   contradictory option combinations fail before any network I/O
//! - **Typed errors**: every failure path has a variant in one of the
//!   layered error enums; nothing falls back to a stringly error
//! - **Single-owner sequential use**: a client performs no locking; use one
//!   client per worker when concurrency is needed

pub mod auth;
pub mod client;
pub mod clients;
pub mod config;
pub mod error;
pub mod rest;

// Re-export public types at crate root for convenience
pub use auth::{AuthError, Endpoint, IdentityClient, ServiceCatalog, Session};
pub use client::{Client, ClientError, Extension, ExtensionFactory, ExtensionManager};
pub use config::{
    ApiVersion, AuthToken, AuthUrl, DistilConfig, DistilConfigBuilder, Interface, ServiceUrl,
    DEFAULT_SERVICE_TYPE,
};
pub use error::ConfigError;
pub use rest::{Manager, Resource, ResourceError};

// Re-export HTTP client types
pub use clients::{
    ApiError, HttpClient, HttpError, HttpMethod, HttpRequest, HttpResponse,
    InvalidHttpRequestError, MaxHttpRetriesExceededError,
};

// Re-export the v2 managers and their wrapper types
pub use rest::resources::v2::{
    Credit, CreditManager, Health, HealthManager, Invoice, InvoiceManager, Measurement,
    MeasurementManager, Product, ProductManager, Quotation, QuotationManager,
};
