// ABOUTME: Integration tests for authenticated connector API calls
// ABOUTME: Tests the connection check and application-password registration

use std::sync::Arc;

use owui_auth::{AuthError, CallbackParams, ConnectorApi, OAuthSessionManager};
use owui_config::ProviderConfig;
use owui_storage::{keys, MemoryOptionStore, OptionStore};
use serde_json::json;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn setup() -> (MockServer, Arc<MemoryOptionStore>, ConnectorApi) {
    let server = MockServer::start().await;
    let store = Arc::new(MemoryOptionStore::new());
    let config = ProviderConfig::new(
        &server.uri(),
        "client-abc",
        "secret-xyz",
        "https://blog.example.com",
    )
    .unwrap()
    .with_site_name("Example Blog")
    .unwrap();
    let manager = OAuthSessionManager::new(config, store.clone()).unwrap();

    (server, store, ConnectorApi::new(Arc::new(manager)))
}

async fn connect(server: &MockServer, api: &ConnectorApi) {
    Mock::given(method("POST"))
        .and(path("/api/wordpress/oauth/token"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"access_token": "T", "expires_in": 3600})),
        )
        .mount(server)
        .await;

    let auth = api.session().build_authorization_url().await.unwrap();
    api.session()
        .handle_callback(CallbackParams {
            state: Some(auth.state),
            code: Some("code-1".to_string()),
            ..Default::default()
        })
        .await
        .unwrap();
}

#[tokio::test]
async fn test_calls_require_a_connection() {
    let (server, _store, api) = setup().await;
    Mock::given(method("GET"))
        .and(path("/api/wordpress/test"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    assert!(matches!(
        api.test_connection().await,
        Err(AuthError::NotConnected)
    ));
    assert!(matches!(
        api.register_application_password("abcd efgh").await,
        Err(AuthError::NotConnected)
    ));
}

#[tokio::test]
async fn test_connection_check_returns_payload() {
    let (server, _store, api) = setup().await;
    connect(&server, &api).await;

    Mock::given(method("GET"))
        .and(path("/api/wordpress/test"))
        .and(header("authorization", "Bearer T"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"success": true, "user": "admin"})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let payload = api.test_connection().await.unwrap();
    assert_eq!(payload["success"], json!(true));
}

#[tokio::test]
async fn test_connection_check_failure_status() {
    let (server, _store, api) = setup().await;
    connect(&server, &api).await;

    Mock::given(method("GET"))
        .and(path("/api/wordpress/test"))
        .respond_with(ResponseTemplate::new(401).set_body_string("unauthorized"))
        .mount(&server)
        .await;

    match api.test_connection().await {
        Err(AuthError::ApiRequestFailed { status, body }) => {
            assert_eq!(status, 401);
            assert_eq!(body, "unauthorized");
        }
        other => panic!("expected request failure, got {:?}", other),
    }
}

#[tokio::test]
async fn test_register_application_password_stores_connection_id() {
    let (server, store, api) = setup().await;
    connect(&server, &api).await;

    Mock::given(method("POST"))
        .and(path("/api/wordpress/register-connection"))
        .and(header("authorization", "Bearer T"))
        .and(body_json(json!({
            "site_url": "https://blog.example.com",
            "site_name": "Example Blog",
            "application_password": "abcd efgh ijkl"
        })))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"success": true, "connection_id": 42})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let registration = api
        .register_application_password(" abcd efgh ijkl ")
        .await
        .unwrap();

    assert_eq!(registration.connection_id, "42");
    assert_eq!(api.connection_id().await.unwrap().as_deref(), Some("42"));
    assert_eq!(
        store.get(keys::CONNECTION_ID).await.unwrap(),
        Some(json!("42"))
    );
}

#[tokio::test]
async fn test_register_without_connection_id_is_invalid_response() {
    let (server, _store, api) = setup().await;
    connect(&server, &api).await;

    Mock::given(method("POST"))
        .and(path("/api/wordpress/register-connection"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"success": true})))
        .mount(&server)
        .await;

    assert!(matches!(
        api.register_application_password("pw").await,
        Err(AuthError::InvalidResponse(_))
    ));
    assert!(api.connection_id().await.unwrap().is_none());
}

#[tokio::test]
async fn test_register_rejects_empty_password() {
    let (_server, _store, api) = setup().await;

    assert!(matches!(
        api.register_application_password("   ").await,
        Err(AuthError::InvalidInput(_))
    ));
}
