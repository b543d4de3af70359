// ABOUTME: Integration tests for persisting provider settings in an option store
// ABOUTME: Tests save/load round trips, incomplete settings, and invalid stored values

use owui_config::{ConfigError, ProviderConfig};
use owui_storage::{keys, MemoryOptionStore, OptionStore};
use serde_json::json;

fn sample_config() -> ProviderConfig {
    ProviderConfig::new(
        "https://openwebui.example.com",
        "client-abc",
        "secret-xyz",
        "https://blog.example.com",
    )
    .unwrap()
    .with_site_name("Example Blog")
    .unwrap()
    .with_http_timeout(15)
    .unwrap()
}

#[tokio::test]
async fn test_save_then_load_round_trip() {
    let store = MemoryOptionStore::new();
    let config = sample_config();

    config.save(&store).await.unwrap();
    let loaded = ProviderConfig::load(&store).await.unwrap();

    assert_eq!(loaded, config);
}

#[tokio::test]
async fn test_save_writes_individual_keys_and_aggregate() {
    let store = MemoryOptionStore::new();
    sample_config().save(&store).await.unwrap();

    assert_eq!(
        store.get(keys::OPENWEBUI_URL).await.unwrap(),
        Some(json!("https://openwebui.example.com"))
    );
    assert_eq!(
        store.get(keys::CLIENT_ID).await.unwrap(),
        Some(json!("client-abc"))
    );

    let aggregate = store.get(keys::SETTINGS).await.unwrap().unwrap();
    assert_eq!(aggregate["site_name"], json!("Example Blog"));
    assert_eq!(aggregate["http_timeout_secs"], json!(15));
}

#[tokio::test]
async fn test_load_optional_on_empty_store() {
    let store = MemoryOptionStore::new();
    assert!(ProviderConfig::load_optional(&store).await.unwrap().is_none());
}

#[tokio::test]
async fn test_load_reports_first_missing_value() {
    let store = MemoryOptionStore::new();
    store
        .set(keys::OPENWEBUI_URL, json!("https://openwebui.example.com"))
        .await
        .unwrap();

    let result = ProviderConfig::load(&store).await;
    assert!(matches!(result, Err(ConfigError::MissingValue("client_id"))));
}

#[tokio::test]
async fn test_load_rejects_invalid_stored_url() {
    let store = MemoryOptionStore::new();
    sample_config().save(&store).await.unwrap();
    store
        .set(keys::OPENWEBUI_URL, json!("gopher://old.example.com"))
        .await
        .unwrap();

    let result = ProviderConfig::load_optional(&store).await;
    assert!(matches!(result, Err(ConfigError::InvalidUrl { .. })));
}

#[tokio::test]
async fn test_clearing_redirect_uri_removes_option() {
    let store = MemoryOptionStore::new();
    let with_redirect = sample_config()
        .with_redirect_uri("https://blog.example.com/custom-callback")
        .unwrap();
    with_redirect.save(&store).await.unwrap();
    assert!(store.get(keys::REDIRECT_URI).await.unwrap().is_some());

    sample_config().save(&store).await.unwrap();
    assert!(store.get(keys::REDIRECT_URI).await.unwrap().is_none());

    let loaded = ProviderConfig::load(&store).await.unwrap();
    assert!(loaded.redirect_uri.is_none());
}
