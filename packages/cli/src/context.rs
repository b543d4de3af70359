// ABOUTME: Opens the option database and builds sessions from stored settings
// ABOUTME: Environment variables override whatever the database holds

use std::sync::Arc;

use owui_auth::{AuthResult, ConnectorApi, OAuthSessionManager};
use owui_config::{ConfigResult, ProviderConfig};
use owui_storage::{OptionStore, SqliteOptionStore, StorageResult};
use tracing::debug;

use crate::config::CliConfig;

pub struct Context {
    store: Arc<SqliteOptionStore>,
}

impl Context {
    pub async fn open(config: &CliConfig) -> StorageResult<Self> {
        debug!("Opening option database at {}", config.database_path.display());
        let store = SqliteOptionStore::open(&config.database_path).await?;
        Ok(Self {
            store: Arc::new(store),
        })
    }

    pub fn store(&self) -> &dyn OptionStore {
        self.store.as_ref()
    }

    pub async fn provider_config(&self) -> ConfigResult<ProviderConfig> {
        load_provider_config(self.store(), |name| std::env::var(name).ok()).await
    }

    pub async fn session(&self) -> AuthResult<OAuthSessionManager> {
        let config = self.provider_config().await?;
        OAuthSessionManager::new(config, self.store.clone())
    }

    pub async fn api(&self) -> AuthResult<ConnectorApi> {
        Ok(ConnectorApi::new(Arc::new(self.session().await?)))
    }
}

/// Stored settings with overrides applied, or settings built purely from the lookup
pub async fn load_provider_config<F>(
    store: &dyn OptionStore,
    lookup: F,
) -> ConfigResult<ProviderConfig>
where
    F: Fn(&str) -> Option<String>,
{
    match ProviderConfig::load_optional(store).await? {
        Some(config) => config.apply_overrides(lookup),
        None => ProviderConfig::from_lookup(lookup),
    }
}
