//! Identity-service client.
//!
//! This module handles the authentication half of client construction:
//! discovering which protocol generation the identity service speaks (the
//! older v2.0 or the newer v3, preferring v3 when both are published),
//! issuing the password authentication request, and normalizing the returned
//! service catalog into a [`Session`].

use serde_json::{json, Map, Value};

use crate::auth::catalog::{Endpoint, ServiceCatalog};
use crate::auth::error::AuthError;
use crate::auth::session::Session;
use crate::clients::{ApiError, TransportOptions};
use crate::config::{AuthToken, AuthUrl, DistilConfig, Interface};
use crate::error::ConfigError;

/// Which protocol generation discovery settled on, with its base URL.
#[derive(Clone, Debug, PartialEq, Eq)]
enum DiscoveredVersion {
    V2(String),
    V3(String),
}

/// A client for the identity service.
///
/// Construction builds the underlying transport from the same TLS and
/// timeout options the main client uses; authentication is a single
/// discovery round trip followed by one token request.
///
/// # Example
///
/// ```rust,ignore
/// use distil_api::auth::IdentityClient;
/// use distil_api::clients::TransportOptions;
///
/// let identity = IdentityClient::new(auth_url, &TransportOptions::from_config(&config))?;
/// let session = identity.authenticate(&config).await?;
/// ```
#[derive(Debug)]
pub struct IdentityClient {
    http: reqwest::Client,
    auth_url: AuthUrl,
}

impl IdentityClient {
    /// Creates an identity client for the given auth URL.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::CertificateLoad`] if a configured certificate
    /// cannot be read.
    pub fn new(auth_url: AuthUrl, options: &TransportOptions) -> Result<Self, ConfigError> {
        Ok(Self {
            http: options.build_client()?,
            auth_url,
        })
    }

    /// Returns the auth URL this client talks to.
    #[must_use]
    pub const fn auth_url(&self) -> &AuthUrl {
        &self.auth_url
    }

    /// Discovers the protocol version and authenticates with a password.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::VersionDiscovery`] when no supported protocol
    /// version can be determined, [`AuthError::NotAuthorized`] when
    /// authentication completes without a token, and [`AuthError::Api`] /
    /// [`AuthError::Network`] for identity-service failures.
    pub async fn authenticate(&self, config: &DistilConfig) -> Result<Session, AuthError> {
        match self.discover().await? {
            DiscoveredVersion::V3(url) => self.authenticate_v3(&url, config).await,
            DiscoveredVersion::V2(url) => self.authenticate_v2(&url, config).await,
        }
    }

    /// Fetches the version document from the auth URL root.
    ///
    /// The identity root answers 300 Multiple Choices with the document, so
    /// the status code is not checked; only the body shape matters here.
    async fn discover(&self) -> Result<DiscoveredVersion, AuthError> {
        let response = self.http.get(self.auth_url.as_ref()).send().await?;
        let body: Value = response
            .json()
            .await
            .map_err(|_| AuthError::VersionDiscovery)?;

        pick_version(&body, self.auth_url.as_ref()).ok_or(AuthError::VersionDiscovery)
    }

    async fn authenticate_v3(
        &self,
        base_url: &str,
        config: &DistilConfig,
    ) -> Result<Session, AuthError> {
        let request = v3_auth_request(config);
        let response = self
            .http
            .post(format!("{base_url}/auth/tokens"))
            .json(&request)
            .send()
            .await?;

        let status = response.status().as_u16();
        let token = response
            .headers()
            .get("x-subject-token")
            .and_then(|v| v.to_str().ok())
            .map(ToString::to_string);
        let body: Value = response.json().await.unwrap_or_else(|_| json!({}));

        if !(200..300).contains(&status) {
            return Err(ApiError::from_response(status, body).into());
        }

        let token = token
            .and_then(|t| AuthToken::new(t).ok())
            .ok_or(AuthError::NotAuthorized)?;
        let catalog = body
            .pointer("/token/catalog")
            .map_or_else(ServiceCatalog::default, parse_v3_catalog);

        Ok(Session::new(token, catalog))
    }

    async fn authenticate_v2(
        &self,
        base_url: &str,
        config: &DistilConfig,
    ) -> Result<Session, AuthError> {
        let request = v2_auth_request(config);
        let response = self
            .http
            .post(format!("{base_url}/tokens"))
            .json(&request)
            .send()
            .await?;

        let status = response.status().as_u16();
        let body: Value = response.json().await.unwrap_or_else(|_| json!({}));

        if !(200..300).contains(&status) {
            return Err(ApiError::from_response(status, body).into());
        }

        let token = body
            .pointer("/access/token/id")
            .and_then(Value::as_str)
            .and_then(|t| AuthToken::new(t).ok())
            .ok_or(AuthError::NotAuthorized)?;
        let catalog = body
            .pointer("/access/serviceCatalog")
            .map_or_else(ServiceCatalog::default, parse_v2_catalog);

        Ok(Session::new(token, catalog))
    }
}

/// Picks the newest supported version out of a version document.
///
/// Handles both document shapes: the multi-version root
/// (`{"versions": {"values": [...]}}`) and a versioned URL's single-entry
/// form (`{"version": {...}}`).
fn pick_version(body: &Value, auth_url: &str) -> Option<DiscoveredVersion> {
    let values: Vec<&Value> = body
        .pointer("/versions/values")
        .and_then(Value::as_array)
        .map_or_else(
            || body.get("version").into_iter().collect(),
            |list| list.iter().collect(),
        );

    let mut v2_url = None;
    let mut v3_url = None;
    for entry in values {
        let Some(id) = entry.get("id").and_then(Value::as_str) else {
            continue;
        };
        let url = self_link(entry);
        if id.starts_with("v3") {
            v3_url = Some(url.unwrap_or_else(|| format!("{auth_url}/v3")));
        } else if id.starts_with("v2") {
            v2_url = Some(url.unwrap_or_else(|| format!("{auth_url}/v2.0")));
        }
    }

    v3_url
        .map(DiscoveredVersion::V3)
        .or(v2_url.map(DiscoveredVersion::V2))
}

/// Extracts the `rel=self` link from a version entry.
fn self_link(entry: &Value) -> Option<String> {
    entry
        .get("links")
        .and_then(Value::as_array)?
        .iter()
        .find(|link| link.get("rel").and_then(Value::as_str) == Some("self"))
        .and_then(|link| link.get("href"))
        .and_then(Value::as_str)
        .map(|href| href.trim_end_matches('/').to_string())
}

/// Builds the v3 password authentication request body.
fn v3_auth_request(config: &DistilConfig) -> Value {
    let mut user = Map::new();
    if let Some(user_id) = config.user_id() {
        user.insert("id".to_string(), json!(user_id));
    } else {
        user.insert("name".to_string(), json!(config.username()));
        if let Some(domain_id) = config.user_domain_id() {
            user.insert("domain".to_string(), json!({ "id": domain_id }));
        } else if let Some(domain_name) = config.user_domain_name() {
            user.insert("domain".to_string(), json!({ "name": domain_name }));
        }
    }
    user.insert("password".to_string(), json!(config.password()));

    let mut auth = Map::new();
    auth.insert(
        "identity".to_string(),
        json!({
            "methods": ["password"],
            "password": { "user": Value::Object(user) },
        }),
    );

    if let Some(project_id) = config.project_id() {
        auth.insert("scope".to_string(), json!({ "project": { "id": project_id } }));
    } else if let Some(project_name) = config.project_name() {
        let mut project = Map::new();
        project.insert("name".to_string(), json!(project_name));
        if let Some(domain_id) = config.project_domain_id() {
            project.insert("domain".to_string(), json!({ "id": domain_id }));
        } else if let Some(domain_name) = config.project_domain_name() {
            project.insert("domain".to_string(), json!({ "name": domain_name }));
        }
        auth.insert("scope".to_string(), json!({ "project": Value::Object(project) }));
    }

    json!({ "auth": Value::Object(auth) })
}

/// Builds the v2.0 password authentication request body.
fn v2_auth_request(config: &DistilConfig) -> Value {
    let mut auth = Map::new();
    auth.insert(
        "passwordCredentials".to_string(),
        json!({
            "username": config.username(),
            "password": config.password(),
        }),
    );
    if let Some(project_id) = config.project_id() {
        auth.insert("tenantId".to_string(), json!(project_id));
    } else if let Some(project_name) = config.project_name() {
        auth.insert("tenantName".to_string(), json!(project_name));
    }

    json!({ "auth": Value::Object(auth) })
}

/// Normalizes a v3 catalog array.
fn parse_v3_catalog(catalog: &Value) -> ServiceCatalog {
    let mut entries = Vec::new();
    for service in catalog.as_array().into_iter().flatten() {
        let Some(service_type) = service.get("type").and_then(Value::as_str) else {
            continue;
        };
        let service_name = service
            .get("name")
            .and_then(Value::as_str)
            .map(ToString::to_string);
        for endpoint in service
            .get("endpoints")
            .and_then(Value::as_array)
            .into_iter()
            .flatten()
        {
            let Some(url) = endpoint.get("url").and_then(Value::as_str) else {
                continue;
            };
            let Some(interface) = endpoint
                .get("interface")
                .and_then(Value::as_str)
                .and_then(|s| s.parse::<Interface>().ok())
            else {
                continue;
            };
            let region = endpoint
                .get("region")
                .or_else(|| endpoint.get("region_id"))
                .and_then(Value::as_str)
                .map(ToString::to_string);
            entries.push(Endpoint {
                service_type: service_type.to_string(),
                service_name: service_name.clone(),
                interface,
                region,
                url: url.to_string(),
            });
        }
    }
    ServiceCatalog::new(entries)
}

/// Normalizes a v2.0 catalog array.
///
/// Each legacy endpoint record carries up to three `*URL` keys; one
/// normalized entry is produced per key present.
fn parse_v2_catalog(catalog: &Value) -> ServiceCatalog {
    let interfaces = [Interface::Public, Interface::Internal, Interface::Admin];
    let mut entries = Vec::new();
    for service in catalog.as_array().into_iter().flatten() {
        let Some(service_type) = service.get("type").and_then(Value::as_str) else {
            continue;
        };
        let service_name = service
            .get("name")
            .and_then(Value::as_str)
            .map(ToString::to_string);
        for endpoint in service
            .get("endpoints")
            .and_then(Value::as_array)
            .into_iter()
            .flatten()
        {
            let region = endpoint
                .get("region")
                .and_then(Value::as_str)
                .map(ToString::to_string);
            for interface in interfaces {
                let Some(url) = endpoint.get(interface.legacy_key()).and_then(Value::as_str)
                else {
                    continue;
                };
                entries.push(Endpoint {
                    service_type: service_type.to_string(),
                    service_name: service_name.clone(),
                    interface,
                    region: region.clone(),
                    url: url.to_string(),
                });
            }
        }
    }
    ServiceCatalog::new(entries)
}
