// ABOUTME: SQLite-backed OptionStore using SQLx
// ABOUTME: Stores each option as a JSON text row in an options table with upsert semantics

use std::path::Path;

use async_trait::async_trait;
use serde_json::Value;
use sqlx::sqlite::{SqlitePool, SqlitePoolOptions};
use sqlx::{migrate::MigrateDatabase, Row};
use tracing::{debug, error};

use crate::{validate_key, OptionStore, StorageError, StorageResult};

/// Durable option store over a SQLite database
#[derive(Debug, Clone)]
pub struct SqliteOptionStore {
    pool: SqlitePool,
}

impl SqliteOptionStore {
    /// Wrap an existing pool. Call [`initialize`](Self::initialize) before use
    /// unless the options table already exists.
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Open (creating if needed) the database file at `path` and ensure the schema
    pub async fn open(path: &Path) -> StorageResult<Self> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let database_url = format!("sqlite:{}", path.display());

        if !sqlx::Sqlite::database_exists(&database_url).await? {
            debug!("Creating options database at: {}", database_url);
            sqlx::Sqlite::create_database(&database_url).await?;
        }

        // A single connection keeps writes serialized, matching the
        // one-request-at-a-time model of the connector.
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect(&database_url)
            .await?;

        sqlx::query("PRAGMA journal_mode = WAL")
            .execute(&pool)
            .await?;

        let store = Self::new(pool);
        store.initialize().await?;
        Ok(store)
    }

    /// Create the options table if missing
    pub async fn initialize(&self) -> StorageResult<()> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS options (
                option_name TEXT PRIMARY KEY,
                option_value TEXT NOT NULL,
                updated_at INTEGER NOT NULL DEFAULT (unixepoch())
            )
            "#,
        )
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

#[async_trait]
impl OptionStore for SqliteOptionStore {
    async fn get(&self, key: &str) -> StorageResult<Option<Value>> {
        validate_key(key)?;

        let row = sqlx::query(
            r#"
            SELECT option_value
            FROM options
            WHERE option_name = ?
            "#,
        )
        .bind(key)
        .fetch_optional(&self.pool)
        .await?;

        match row {
            Some(row) => {
                let raw: String = row.try_get("option_value")?;
                let value = serde_json::from_str(&raw).map_err(|e| {
                    error!("Option {} holds invalid JSON: {}", key, e);
                    StorageError::Json(e)
                })?;
                Ok(Some(value))
            }
            None => Ok(None),
        }
    }

    async fn set(&self, key: &str, value: Value) -> StorageResult<()> {
        validate_key(key)?;
        let raw = serde_json::to_string(&value)?;

        sqlx::query(
            r#"
            INSERT INTO options (option_name, option_value, updated_at)
            VALUES (?, ?, unixepoch())
            ON CONFLICT(option_name) DO UPDATE SET
                option_value = excluded.option_value,
                updated_at = unixepoch()
            "#,
        )
        .bind(key)
        .bind(&raw)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            error!("Failed to store option {}: {}", key, e);
            StorageError::Sqlx(e)
        })?;

        debug!("Stored option {}", key);
        Ok(())
    }

    async fn delete(&self, key: &str) -> StorageResult<()> {
        validate_key(key)?;

        sqlx::query(
            r#"
            DELETE FROM options
            WHERE option_name = ?
            "#,
        )
        .bind(key)
        .execute(&self.pool)
        .await?;

        debug!("Deleted option {}", key);
        Ok(())
    }
}
