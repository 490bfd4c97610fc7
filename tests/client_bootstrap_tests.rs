//! Integration tests for client construction.
//!
//! These cover the credential-resolution sequence end to end: the token
//! short-circuit, session-based endpoint lookup, identity-service discovery
//! and authentication against a mock server, and the configuration errors
//! raised before any network I/O.

use serde_json::json;
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use distil_api::{
    AuthError, AuthToken, AuthUrl, Client, ClientError, ConfigError, DistilConfig, Endpoint,
    Interface, ServiceCatalog, ServiceUrl, Session,
};

fn rating_catalog(url: &str, region: &str) -> ServiceCatalog {
    ServiceCatalog::new(vec![Endpoint {
        service_type: "rating".to_string(),
        service_name: Some("distil".to_string()),
        interface: Interface::Public,
        region: Some(region.to_string()),
        url: url.to_string(),
    }])
}

/// Mounts a keystone-style version document advertising v3 under the
/// server's own URI.
async fn mount_v3_discovery(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(ResponseTemplate::new(300).set_body_json(json!({
            "versions": {
                "values": [
                    {
                        "id": "v3.14",
                        "status": "stable",
                        "links": [{"rel": "self", "href": format!("{}/v3/", server.uri())}]
                    },
                    {
                        "id": "v2.0",
                        "status": "deprecated",
                        "links": [{"rel": "self", "href": format!("{}/v2.0/", server.uri())}]
                    }
                ]
            }
        })))
        .mount(server)
        .await;
}

// ============================================================================
// Configuration errors (before any network call)
// ============================================================================

#[test]
fn test_token_without_service_url_fails_at_config_build() {
    let result = DistilConfig::builder()
        .auth_token(AuthToken::new("token").unwrap())
        .build();

    assert!(matches!(result, Err(ConfigError::TokenWithoutServiceUrl)));
}

#[test]
fn test_no_credentials_fails_at_config_build() {
    let result = DistilConfig::builder().region_name("nz-hlz-1").build();
    assert!(matches!(result, Err(ConfigError::MissingCredentials)));
}

#[test]
fn test_deprecated_api_key_emits_exactly_one_warning() {
    let config = DistilConfig::builder()
        .username("demo")
        .auth_url(AuthUrl::new("https://keystone.example.com:5000").unwrap())
        .api_key("legacy-secret")
        .build()
        .unwrap();

    let warnings = config.deprecation_warnings();
    assert_eq!(warnings.len(), 1);
    assert!(warnings[0].contains("api_key"));
    assert!(warnings[0].contains("password"));
}

// ============================================================================
// Token short-circuit
// ============================================================================

#[tokio::test]
async fn test_explicit_token_and_url_skip_identity_entirely() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v2/products"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"products": []})))
        .mount(&server)
        .await;

    let config = DistilConfig::builder()
        .auth_token(AuthToken::new("explicit-token").unwrap())
        .service_url(ServiceUrl::new(server.uri()).unwrap())
        // password credentials present but ignored: the token wins
        .username("demo")
        .password("secret")
        .build()
        .unwrap();

    let client = Client::new(config).await.unwrap();
    assert_eq!(client.endpoint().as_ref(), server.uri());

    client.products.list(&[]).await.unwrap();
    let requests = server.received_requests().await.unwrap();
    // only the products call, no discovery or token request
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].url.path(), "/v2/products");
}

// ============================================================================
// Session-based construction
// ============================================================================

#[tokio::test]
async fn test_session_endpoint_resolution_by_region() {
    let config = DistilConfig::builder()
        .session(Session::new(
            AuthToken::new("session-token").unwrap(),
            rating_catalog("https://distil.hlz.example.com:9999", "nz-hlz-1"),
        ))
        .region_name("nz-hlz-1")
        .build()
        .unwrap();

    let client = Client::new(config).await.unwrap();
    assert_eq!(
        client.endpoint().as_ref(),
        "https://distil.hlz.example.com:9999"
    );
}

#[tokio::test]
async fn test_session_without_matching_catalog_entry_is_endpoint_not_found() {
    let config = DistilConfig::builder()
        .session(Session::new(
            AuthToken::new("session-token").unwrap(),
            rating_catalog("https://distil.hlz.example.com:9999", "nz-hlz-1"),
        ))
        .region_name("nz-akl-1")
        .build()
        .unwrap();

    let error = Client::new(config).await.unwrap_err();
    match error {
        ClientError::Auth(AuthError::EndpointNotFound {
            service_type,
            region,
        }) => {
            assert_eq!(service_type, "rating");
            assert_eq!(region.as_deref(), Some("nz-akl-1"));
        }
        other => panic!("expected EndpointNotFound, got {other:?}"),
    }
}

#[tokio::test]
async fn test_session_with_wrong_service_type_is_endpoint_not_found() {
    let config = DistilConfig::builder()
        .session(Session::new(
            AuthToken::new("session-token").unwrap(),
            rating_catalog("https://distil.example.com:9999", "nz-hlz-1"),
        ))
        .service_type("metering")
        .build()
        .unwrap();

    let error = Client::new(config).await.unwrap_err();
    assert!(matches!(
        error,
        ClientError::Auth(AuthError::EndpointNotFound { .. })
    ));
}

#[tokio::test]
async fn test_explicit_service_url_wins_over_session_catalog() {
    let config = DistilConfig::builder()
        .session(Session::new(
            AuthToken::new("session-token").unwrap(),
            rating_catalog("https://distil.catalog.example.com:9999", "nz-hlz-1"),
        ))
        .service_url(ServiceUrl::new("https://distil.override.example.com:9999").unwrap())
        .build()
        .unwrap();

    let client = Client::new(config).await.unwrap();
    assert_eq!(
        client.endpoint().as_ref(),
        "https://distil.override.example.com:9999"
    );
}

// ============================================================================
// Identity-service authentication
// ============================================================================

#[tokio::test]
async fn test_password_authentication_via_discovered_v3() {
    let server = MockServer::start().await;
    mount_v3_discovery(&server).await;

    Mock::given(method("POST"))
        .and(path("/v3/auth/tokens"))
        .and(body_partial_json(json!({
            "auth": {
                "identity": {
                    "methods": ["password"],
                    "password": {"user": {"name": "demo", "password": "secret"}}
                },
                "scope": {"project": {"id": "p-123"}}
            }
        })))
        .respond_with(
            ResponseTemplate::new(201)
                .insert_header("X-Subject-Token", "issued-token")
                .set_body_json(json!({
                    "token": {
                        "catalog": [
                            {
                                "type": "rating",
                                "name": "distil",
                                "endpoints": [
                                    {
                                        "interface": "public",
                                        "region": "nz-hlz-1",
                                        "url": server.uri()
                                    }
                                ]
                            }
                        ]
                    }
                })),
        )
        .mount(&server)
        .await;

    // the issued token must be what reaches the service
    Mock::given(method("GET"))
        .and(path("/v2/products"))
        .and(header("x-auth-token", "issued-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"products": []})))
        .expect(1)
        .mount(&server)
        .await;

    let config = DistilConfig::builder()
        .username("demo")
        .password("secret")
        .project_id("p-123")
        .auth_url(AuthUrl::new(server.uri()).unwrap())
        .region_name("nz-hlz-1")
        .build()
        .unwrap();

    let client = Client::new(config).await.unwrap();
    assert_eq!(client.endpoint().as_ref(), server.uri());

    client.products.list(&[]).await.unwrap();
}

#[tokio::test]
async fn test_password_authentication_falls_back_to_v2() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(ResponseTemplate::new(300).set_body_json(json!({
            "versions": {
                "values": [
                    {
                        "id": "v2.0",
                        "status": "stable",
                        "links": [{"rel": "self", "href": format!("{}/v2.0/", server.uri())}]
                    }
                ]
            }
        })))
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/v2.0/tokens"))
        .and(body_partial_json(json!({
            "auth": {
                "passwordCredentials": {"username": "demo", "password": "secret"},
                "tenantId": "p-123"
            }
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "access": {
                "token": {"id": "legacy-token"},
                "serviceCatalog": [
                    {
                        "type": "rating",
                        "name": "distil",
                        "endpoints": [
                            {
                                "region": "nz-hlz-1",
                                "publicURL": server.uri()
                            }
                        ]
                    }
                ]
            }
        })))
        .mount(&server)
        .await;

    let config = DistilConfig::builder()
        .username("demo")
        .password("secret")
        .project_id("p-123")
        .auth_url(AuthUrl::new(server.uri()).unwrap())
        .build()
        .unwrap();

    let client = Client::new(config).await.unwrap();
    assert_eq!(client.endpoint().as_ref(), server.uri());
}

#[tokio::test]
async fn test_unrecognized_versions_fail_discovery() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "versions": {"values": [{"id": "v9.0"}]}
        })))
        .mount(&server)
        .await;

    let config = DistilConfig::builder()
        .username("demo")
        .password("secret")
        .auth_url(AuthUrl::new(server.uri()).unwrap())
        .build()
        .unwrap();

    let error = Client::new(config).await.unwrap_err();
    assert!(matches!(
        error,
        ClientError::Auth(AuthError::VersionDiscovery)
    ));
}

#[tokio::test]
async fn test_rejected_credentials_surface_identity_error() {
    let server = MockServer::start().await;
    mount_v3_discovery(&server).await;

    Mock::given(method("POST"))
        .and(path("/v3/auth/tokens"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "error": {"message": "The request you have made requires authentication."}
        })))
        .mount(&server)
        .await;

    let config = DistilConfig::builder()
        .username("demo")
        .password("wrong")
        .auth_url(AuthUrl::new(server.uri()).unwrap())
        .build()
        .unwrap();

    let error = Client::new(config).await.unwrap_err();
    assert!(matches!(error, ClientError::Auth(AuthError::Api(_))));
}

#[tokio::test]
async fn test_successful_auth_without_token_header_is_not_authorized() {
    let server = MockServer::start().await;
    mount_v3_discovery(&server).await;

    // 201 but no X-Subject-Token header
    Mock::given(method("POST"))
        .and(path("/v3/auth/tokens"))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({"token": {}})))
        .mount(&server)
        .await;

    let config = DistilConfig::builder()
        .username("demo")
        .password("secret")
        .auth_url(AuthUrl::new(server.uri()).unwrap())
        .build()
        .unwrap();

    let error = Client::new(config).await.unwrap_err();
    assert!(matches!(error, ClientError::Auth(AuthError::NotAuthorized)));
}
