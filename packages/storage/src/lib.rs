// ABOUTME: Persistent key-value option storage for the OpenWebUI connector
// ABOUTME: Defines the OptionStore contract with in-memory and SQLite implementations

pub mod keys;
pub mod memory;
pub mod sqlite;

use async_trait::async_trait;
use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;
use thiserror::Error;

pub use memory::MemoryOptionStore;
pub use sqlite::SqliteOptionStore;

/// Storage errors
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Sqlx error: {0}")]
    Sqlx(#[from] sqlx::Error),
    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Invalid option key: {0}")]
    InvalidKey(String),
}

pub type StorageResult<T> = Result<T, StorageError>;

/// Durable key-value store holding JSON option values.
///
/// Mirrors the options table of the host site: values are opaque JSON
/// documents addressed by name, and deleting a missing key is not an error.
#[async_trait]
pub trait OptionStore: Send + Sync {
    /// Read an option, `None` when it has never been set or was deleted
    async fn get(&self, key: &str) -> StorageResult<Option<Value>>;

    /// Insert or overwrite an option
    async fn set(&self, key: &str, value: Value) -> StorageResult<()>;

    /// Remove an option
    async fn delete(&self, key: &str) -> StorageResult<()>;

    /// Read an option, falling back to `default` when absent
    async fn get_or(&self, key: &str, default: Value) -> StorageResult<Value> {
        Ok(self.get(key).await?.unwrap_or(default))
    }
}

/// Read an option and deserialize it into `T`
pub async fn get_option<T: DeserializeOwned>(
    store: &dyn OptionStore,
    key: &str,
) -> StorageResult<Option<T>> {
    match store.get(key).await? {
        Some(value) => Ok(Some(serde_json::from_value(value)?)),
        None => Ok(None),
    }
}

/// Serialize `value` and store it under `key`
pub async fn update_option<T: Serialize + ?Sized>(
    store: &dyn OptionStore,
    key: &str,
    value: &T,
) -> StorageResult<()> {
    store.set(key, serde_json::to_value(value)?).await
}

pub(crate) fn validate_key(key: &str) -> StorageResult<()> {
    if key.trim().is_empty() {
        return Err(StorageError::InvalidKey("option name cannot be empty".to_string()));
    }
    if key.len() > 191 {
        // Same limit as the host's option_name column
        return Err(StorageError::InvalidKey(format!(
            "option name exceeds 191 characters: {}",
            key.len()
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Sample {
        name: String,
        count: u32,
    }

    #[tokio::test]
    async fn test_typed_helpers_round_trip() {
        let store = MemoryOptionStore::new();
        let sample = Sample {
            name: "connector".to_string(),
            count: 3,
        };

        update_option(&store, "sample", &sample).await.unwrap();
        let loaded: Option<Sample> = get_option(&store, "sample").await.unwrap();

        assert_eq!(loaded, Some(sample));
    }

    #[tokio::test]
    async fn test_get_option_missing_key() {
        let store = MemoryOptionStore::new();
        let loaded: Option<Sample> = get_option(&store, "missing").await.unwrap();
        assert!(loaded.is_none());
    }

    #[tokio::test]
    async fn test_get_option_type_mismatch_is_json_error() {
        let store = MemoryOptionStore::new();
        store.set("sample", Value::from("not an object")).await.unwrap();

        let result: StorageResult<Option<Sample>> = get_option(&store, "sample").await;
        assert!(matches!(result, Err(StorageError::Json(_))));
    }

    #[tokio::test]
    async fn test_get_or_returns_default() {
        let store = MemoryOptionStore::new();
        let value = store
            .get_or("status", Value::from("disconnected"))
            .await
            .unwrap();
        assert_eq!(value, Value::from("disconnected"));
    }

    #[test]
    fn test_validate_key() {
        assert!(validate_key("wp_openwebui_connector_oauth_state").is_ok());
        assert!(validate_key("").is_err());
        assert!(validate_key("   ").is_err());
        assert!(validate_key(&"k".repeat(192)).is_err());
    }
}
