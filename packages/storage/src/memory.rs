// ABOUTME: In-memory OptionStore backed by a locked HashMap
// ABOUTME: Used by tests and by callers that do not need durability

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;
use tokio::sync::RwLock;

use crate::{validate_key, OptionStore, StorageResult};

/// Volatile option store
#[derive(Debug, Clone, Default)]
pub struct MemoryOptionStore {
    options: Arc<RwLock<HashMap<String, Value>>>,
}

impl MemoryOptionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of options currently held
    pub async fn len(&self) -> usize {
        self.options.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.options.read().await.is_empty()
    }

    pub async fn contains_key(&self, key: &str) -> bool {
        self.options.read().await.contains_key(key)
    }
}

#[async_trait]
impl OptionStore for MemoryOptionStore {
    async fn get(&self, key: &str) -> StorageResult<Option<Value>> {
        validate_key(key)?;
        Ok(self.options.read().await.get(key).cloned())
    }

    async fn set(&self, key: &str, value: Value) -> StorageResult<()> {
        validate_key(key)?;
        self.options.write().await.insert(key.to_string(), value);
        Ok(())
    }

    async fn delete(&self, key: &str) -> StorageResult<()> {
        validate_key(key)?;
        self.options.write().await.remove(key);
        Ok(())
    }
}
