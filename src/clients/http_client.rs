//! HTTP client for Distil API communication.
//!
//! This module provides the [`HttpClient`] type for making authenticated
//! requests against a resolved service endpoint, and [`TransportOptions`],
//! the TLS/timeout bundle shared with the identity client.

use std::collections::HashMap;
use std::path::PathBuf;
use std::time::Duration;

use crate::clients::errors::{ApiError, HttpError, MaxHttpRetriesExceededError};
use crate::clients::http_request::{HttpMethod, HttpRequest};
use crate::clients::http_response::HttpResponse;
use crate::config::{AuthToken, DistilConfig, ServiceUrl};
use crate::error::ConfigError;

/// Fixed retry wait time in seconds when no `Retry-After` applies.
pub const RETRY_WAIT_TIME: u64 = 1;

/// SDK version from Cargo.toml.
pub const SDK_VERSION: &str = env!("CARGO_PKG_VERSION");

/// The header carrying the negotiated API version.
pub const API_VERSION_HEADER: &str = "X-Distil-Api-Version";

/// TLS and timeout options for building a `reqwest` client.
///
/// Both the identity client and the service transport are built from the
/// same bundle, so a config's `insecure`/`cacert`/`cert`/`timeout` settings
/// apply to every connection the SDK opens.
#[derive(Clone, Debug, Default)]
pub struct TransportOptions {
    /// Disable TLS server certificate verification.
    pub insecure: bool,
    /// Path to a CA certificate bundle in PEM format.
    pub cacert: Option<PathBuf>,
    /// Path to a client certificate (with key) in PEM format.
    pub cert: Option<PathBuf>,
    /// End-to-end request timeout.
    pub timeout: Option<Duration>,
}

impl TransportOptions {
    /// Extracts the transport options from a config.
    #[must_use]
    pub fn from_config(config: &DistilConfig) -> Self {
        Self {
            insecure: config.insecure(),
            cacert: config.cacert().map(PathBuf::from),
            cert: config.cert().map(PathBuf::from),
            timeout: config.timeout(),
        }
    }

    /// Builds a `reqwest` client from these options.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::CertificateLoad`] if a configured certificate
    /// file cannot be read or parsed, and [`ConfigError::TransportBuild`] if
    /// the client itself cannot be constructed.
    pub(crate) fn build_client(&self) -> Result<reqwest::Client, ConfigError> {
        let mut builder = reqwest::Client::builder().use_rustls_tls();

        if self.insecure {
            builder = builder.danger_accept_invalid_certs(true);
        }
        if let Some(path) = &self.cacert {
            let pem = std::fs::read(path).map_err(|e| ConfigError::CertificateLoad {
                path: path.display().to_string(),
                reason: e.to_string(),
            })?;
            let certificate = reqwest::Certificate::from_pem(&pem).map_err(|e| {
                ConfigError::CertificateLoad {
                    path: path.display().to_string(),
                    reason: e.to_string(),
                }
            })?;
            builder = builder.add_root_certificate(certificate);
        }
        if let Some(path) = &self.cert {
            let pem = std::fs::read(path).map_err(|e| ConfigError::CertificateLoad {
                path: path.display().to_string(),
                reason: e.to_string(),
            })?;
            let identity =
                reqwest::Identity::from_pem(&pem).map_err(|e| ConfigError::CertificateLoad {
                    path: path.display().to_string(),
                    reason: e.to_string(),
                })?;
            builder = builder.identity(identity);
        }
        if let Some(timeout) = self.timeout {
            builder = builder.timeout(timeout);
        }

        builder.build().map_err(|e| ConfigError::TransportBuild {
            reason: e.to_string(),
        })
    }
}

/// HTTP client for making requests against the service endpoint.
///
/// The client handles:
/// - Default headers including User-Agent, the bearer token, and the API
///   version header
/// - Automatic retry for 429 and 500 responses, up to the retry count
///   configured at construction
/// - Optional request/response debug logging
///
/// # Thread Safety
///
/// `HttpClient` is `Send + Sync`, making it safe to share across async tasks.
/// It performs no locking; callers needing concurrent use serialize access
/// or construct one client per worker.
#[derive(Debug)]
pub struct HttpClient {
    /// The internal reqwest HTTP client.
    client: reqwest::Client,
    /// The resolved service URL (e.g., `https://distil.example.com:9999`).
    base_url: String,
    /// Default headers included in all requests.
    default_headers: HashMap<String, String>,
    /// Total attempts per request (configured retries + 1).
    tries: u32,
    /// Emit request/response debug logs.
    log_debug: bool,
}

// Verify HttpClient is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<HttpClient>();
};

impl HttpClient {
    /// Creates a new HTTP client for a resolved endpoint and token.
    ///
    /// # Arguments
    ///
    /// * `service_url` - The resolved service endpoint
    /// * `token` - The bearer token to send as `X-Auth-Token`
    /// * `config` - Source of transport options, retries, API version, and
    ///   the user agent prefix
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the underlying transport cannot be built
    /// from the configured TLS options.
    pub fn new(
        service_url: &ServiceUrl,
        token: &AuthToken,
        config: &DistilConfig,
    ) -> Result<Self, ConfigError> {
        let user_agent_prefix = config
            .user_agent_prefix()
            .map_or(String::new(), |prefix| format!("{prefix} | "));
        let rust_version = env!("CARGO_PKG_RUST_VERSION");
        let user_agent =
            format!("{user_agent_prefix}Distil API Library v{SDK_VERSION} | Rust {rust_version}");

        let mut default_headers = HashMap::new();
        default_headers.insert("User-Agent".to_string(), user_agent);
        default_headers.insert("Accept".to_string(), "application/json".to_string());
        default_headers.insert("X-Auth-Token".to_string(), token.as_ref().to_string());
        default_headers.insert(
            API_VERSION_HEADER.to_string(),
            config.api_version().to_string(),
        );

        let client = TransportOptions::from_config(config).build_client()?;

        Ok(Self {
            client,
            base_url: service_url.as_ref().to_string(),
            default_headers,
            tries: config.retries().saturating_add(1),
            log_debug: config.http_log_debug(),
        })
    }

    /// Returns the base URL for this client.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Returns the default headers for this client.
    #[must_use]
    pub const fn default_headers(&self) -> &HashMap<String, String> {
        &self.default_headers
    }

    /// Returns the total attempts made per request.
    #[must_use]
    pub const fn tries(&self) -> u32 {
        self.tries
    }

    /// Sends an HTTP request to the service endpoint.
    ///
    /// This method handles request validation, URL construction, header
    /// merging, response parsing, and the retry loop for 429 and 500
    /// responses.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError`] if:
    /// - Request validation fails (`InvalidRequest`)
    /// - A network error occurs (`Network`)
    /// - A non-2xx response is received (`Api`)
    /// - The configured retries are exhausted (`MaxRetries`)
    pub async fn request(&self, request: HttpRequest) -> Result<HttpResponse, HttpError> {
        request.verify()?;

        let url = format!("{}{}", self.base_url, request.path);

        let mut attempt: u32 = 0;
        loop {
            attempt += 1;

            let mut req_builder = match request.http_method {
                HttpMethod::Get => self.client.get(&url),
                HttpMethod::Post => self.client.post(&url),
                HttpMethod::Put => self.client.put(&url),
                HttpMethod::Delete => self.client.delete(&url),
            };

            for (key, value) in &self.default_headers {
                req_builder = req_builder.header(key, value);
            }

            if let Some(body) = &request.body {
                req_builder = req_builder.json(body);
            }

            if self.log_debug {
                tracing::debug!(method = %request.http_method, %url, attempt, "sending request");
            }

            let res = req_builder.send().await?;

            let code = res.status().as_u16();
            let res_headers = Self::parse_response_headers(res.headers());
            let body_text = res.text().await.unwrap_or_default();
            let body = if body_text.is_empty() {
                serde_json::json!({})
            } else {
                serde_json::from_str(&body_text)
                    .unwrap_or_else(|_| serde_json::json!({ "raw_body": body_text }))
            };

            let response = HttpResponse::new(code, res_headers, body);

            if self.log_debug {
                tracing::debug!(
                    status = code,
                    request_id = response.request_id().unwrap_or(""),
                    "received response"
                );
            }

            if response.is_ok() {
                return Ok(response);
            }

            let error = ApiError::from_response(code, response.body.clone());

            let should_retry = code == 429 || code == 500;
            if !should_retry {
                return Err(HttpError::Api(error));
            }

            if attempt >= self.tries {
                if self.tries == 1 {
                    return Err(HttpError::Api(error));
                }
                return Err(HttpError::MaxRetries(MaxHttpRetriesExceededError {
                    code,
                    tries: self.tries,
                    message: error.message().to_string(),
                }));
            }

            let delay = Self::calculate_retry_delay(&response, code);
            tokio::time::sleep(delay).await;
        }
    }

    /// Parses response headers into a `HashMap` with lowercased keys.
    fn parse_response_headers(
        headers: &reqwest::header::HeaderMap,
    ) -> HashMap<String, Vec<String>> {
        let mut result: HashMap<String, Vec<String>> = HashMap::new();
        for (name, value) in headers {
            let key = name.as_str().to_lowercase();
            let value = value.to_str().unwrap_or_default().to_string();
            result.entry(key).or_default().push(value);
        }
        result
    }

    /// Calculates the retry delay based on response and status code.
    ///
    /// 429 honors `Retry-After` when present; 500 always waits the fixed
    /// delay.
    fn calculate_retry_delay(response: &HttpResponse, status: u16) -> Duration {
        if status == 429 {
            if let Some(retry_after) = response.retry_request_after {
                return Duration::from_secs_f64(retry_after);
            }
        }
        Duration::from_secs(RETRY_WAIT_TIME)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{ApiVersion, AuthToken, DistilConfig, ServiceUrl};
    use serde_json::json;
    use std::collections::HashMap;

    fn test_client() -> HttpClient {
        let config = DistilConfig::builder()
            .auth_token(AuthToken::new("test-token").unwrap())
            .service_url(ServiceUrl::new("https://distil.example.com:9999").unwrap())
            .retries(2)
            .build()
            .unwrap();
        HttpClient::new(
            &ServiceUrl::new("https://distil.example.com:9999").unwrap(),
            &AuthToken::new("test-token").unwrap(),
            &config,
        )
        .unwrap()
    }

    #[test]
    fn test_client_construction() {
        let client = test_client();
        assert_eq!(client.base_url(), "https://distil.example.com:9999");
        assert_eq!(client.tries(), 3);
    }

    #[test]
    fn test_auth_token_header_injection() {
        let client = test_client();
        assert_eq!(
            client.default_headers().get("X-Auth-Token"),
            Some(&"test-token".to_string())
        );
    }

    #[test]
    fn test_api_version_header() {
        let client = test_client();
        assert_eq!(
            client.default_headers().get(API_VERSION_HEADER),
            Some(&ApiVersion::V2.to_string())
        );
    }

    #[test]
    fn test_accept_header_is_json() {
        let client = test_client();
        assert_eq!(
            client.default_headers().get("Accept"),
            Some(&"application/json".to_string())
        );
    }

    #[test]
    fn test_user_agent_header_format() {
        let client = test_client();
        let user_agent = client.default_headers().get("User-Agent").unwrap();
        assert!(user_agent.contains("Distil API Library v"));
        assert!(user_agent.contains("Rust"));
    }

    #[test]
    fn test_user_agent_with_prefix() {
        let config = DistilConfig::builder()
            .auth_token(AuthToken::new("token").unwrap())
            .service_url(ServiceUrl::new("https://distil.example.com:9999").unwrap())
            .user_agent_prefix("billing-worker/1.0")
            .build()
            .unwrap();
        let client = HttpClient::new(
            &ServiceUrl::new("https://distil.example.com:9999").unwrap(),
            &AuthToken::new("token").unwrap(),
            &config,
        )
        .unwrap();

        let user_agent = client.default_headers().get("User-Agent").unwrap();
        assert!(user_agent.starts_with("billing-worker/1.0 | "));
    }

    #[test]
    fn test_retry_delay_honors_retry_after_on_429() {
        let mut headers = HashMap::new();
        headers.insert("retry-after".to_string(), vec!["4".to_string()]);
        let response = HttpResponse::new(429, headers, json!({}));

        let delay = HttpClient::calculate_retry_delay(&response, 429);
        assert_eq!(delay, Duration::from_secs(4));
    }

    #[test]
    fn test_retry_delay_ignores_retry_after_on_500() {
        let mut headers = HashMap::new();
        headers.insert("retry-after".to_string(), vec!["4".to_string()]);
        let response = HttpResponse::new(500, headers, json!({}));

        let delay = HttpClient::calculate_retry_delay(&response, 500);
        assert_eq!(delay, Duration::from_secs(RETRY_WAIT_TIME));
    }

    #[test]
    fn test_client_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<HttpClient>();
    }
}
