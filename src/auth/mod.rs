//! Identity and authentication support.
//!
//! This module contains everything the client bootstrap needs to acquire a
//! token and resolve a service endpoint: the normalized service catalog, the
//! identity-service client with its protocol-version discovery, and the
//! [`Session`] type that carries an acquired token and catalog.

mod catalog;
mod error;
mod identity;
mod session;

pub use catalog::{Endpoint, ServiceCatalog};
pub use error::AuthError;
pub use identity::IdentityClient;
pub use session::Session;
