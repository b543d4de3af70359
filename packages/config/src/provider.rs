// ABOUTME: OpenWebUI provider configuration for the OAuth session manager
// ABOUTME: Loads from the option store, overlays environment variables, and derives endpoint URLs

use std::fmt;
use std::time::Duration;

use owui_storage::{keys, OptionStore};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

use crate::constants::{
    ADMIN_PAGE_PATH, DEFAULT_HTTP_TIMEOUT_SECS, DEFAULT_SITE_NAME, OWUI_CLIENT_ID,
    OWUI_CLIENT_SECRET, OWUI_HTTP_TIMEOUT_SECS, OWUI_REDIRECT_URI, OWUI_SITE_NAME, OWUI_SITE_URL,
    OWUI_URL,
};
use crate::error::{ConfigError, ConfigResult};
use crate::validation::{parse_timeout, sanitize_text, sanitize_url, validate_timeout};

/// Connection settings for one OpenWebUI instance
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderConfig {
    /// Base URL of the OpenWebUI instance, without trailing slash
    pub openwebui_url: String,
    pub client_id: String,
    pub client_secret: String,
    /// Public URL of the site being connected
    pub site_url: String,
    pub site_name: String,
    /// OAuth callback URL; derived from `site_url` when unset
    #[serde(default)]
    pub redirect_uri: Option<String>,
    /// Where the caller is sent after a successful callback
    #[serde(default)]
    pub success_redirect: Option<String>,
    #[serde(default = "default_http_timeout")]
    pub http_timeout_secs: u64,
}

fn default_http_timeout() -> u64 {
    DEFAULT_HTTP_TIMEOUT_SECS
}

impl fmt::Debug for ProviderConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProviderConfig")
            .field("openwebui_url", &self.openwebui_url)
            .field("client_id", &self.client_id)
            .field("client_secret", &"[redacted]")
            .field("site_url", &self.site_url)
            .field("site_name", &self.site_name)
            .field("redirect_uri", &self.redirect_uri)
            .field("success_redirect", &self.success_redirect)
            .field("http_timeout_secs", &self.http_timeout_secs)
            .finish()
    }
}

impl ProviderConfig {
    /// Build a sanitized configuration with default site name and timeout
    pub fn new(
        openwebui_url: &str,
        client_id: &str,
        client_secret: &str,
        site_url: &str,
    ) -> ConfigResult<Self> {
        Ok(Self {
            openwebui_url: sanitize_url("openwebui_url", openwebui_url)?,
            client_id: sanitize_text("client_id", client_id)?,
            client_secret: sanitize_text("client_secret", client_secret)?,
            site_url: sanitize_url("site_url", site_url)?,
            site_name: DEFAULT_SITE_NAME.to_string(),
            redirect_uri: None,
            success_redirect: None,
            http_timeout_secs: DEFAULT_HTTP_TIMEOUT_SECS,
        })
    }

    pub fn with_site_name(mut self, site_name: &str) -> ConfigResult<Self> {
        self.site_name = sanitize_text("site_name", site_name)?;
        Ok(self)
    }

    pub fn with_redirect_uri(mut self, redirect_uri: &str) -> ConfigResult<Self> {
        // Query strings are significant here, so only surrounding whitespace is trimmed
        sanitize_url("redirect_uri", redirect_uri)?;
        self.redirect_uri = Some(redirect_uri.trim().to_string());
        Ok(self)
    }

    pub fn with_success_redirect(mut self, target: &str) -> ConfigResult<Self> {
        sanitize_url("success_redirect", target)?;
        self.success_redirect = Some(target.trim().to_string());
        Ok(self)
    }

    pub fn with_http_timeout(mut self, secs: u64) -> ConfigResult<Self> {
        self.http_timeout_secs = validate_timeout(secs)?;
        Ok(self)
    }

    /// Re-run sanitization over every field, e.g. after deserializing
    pub fn validate(&self) -> ConfigResult<()> {
        sanitize_url("openwebui_url", &self.openwebui_url)?;
        sanitize_text("client_id", &self.client_id)?;
        sanitize_text("client_secret", &self.client_secret)?;
        sanitize_url("site_url", &self.site_url)?;
        sanitize_text("site_name", &self.site_name)?;
        if let Some(uri) = &self.redirect_uri {
            sanitize_url("redirect_uri", uri)?;
        }
        if let Some(target) = &self.success_redirect {
            sanitize_url("success_redirect", target)?;
        }
        validate_timeout(self.http_timeout_secs)?;
        Ok(())
    }

    /// OAuth callback URL registered with the provider
    pub fn redirect_uri(&self) -> String {
        self.redirect_uri.clone().unwrap_or_else(|| {
            format!(
                "{}{}&wp_openwebui_oauth_callback=1",
                self.site_url, ADMIN_PAGE_PATH
            )
        })
    }

    /// Caller-facing redirect target after a successful connection
    pub fn success_redirect(&self) -> String {
        self.success_redirect
            .clone()
            .unwrap_or_else(|| format!("{}{}&connected=1", self.site_url, ADMIN_PAGE_PATH))
    }

    pub fn http_timeout(&self) -> Duration {
        Duration::from_secs(self.http_timeout_secs)
    }

    pub fn authorize_endpoint(&self) -> String {
        self.endpoint("/api/wordpress/oauth/authorize")
    }

    pub fn token_endpoint(&self) -> String {
        self.endpoint("/api/wordpress/oauth/token")
    }

    pub fn revoke_endpoint(&self) -> String {
        self.endpoint("/api/wordpress/oauth/revoke")
    }

    pub fn test_endpoint(&self) -> String {
        self.endpoint("/api/wordpress/test")
    }

    pub fn register_endpoint(&self) -> String {
        self.endpoint("/api/wordpress/register-connection")
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.openwebui_url.trim_end_matches('/'), path)
    }

    /// Load settings from the individual option keys
    pub async fn load(store: &dyn OptionStore) -> ConfigResult<Self> {
        let openwebui_url = read_string(store, keys::OPENWEBUI_URL)
            .await?
            .ok_or(ConfigError::MissingValue("openwebui_url"))?;
        let client_id = read_string(store, keys::CLIENT_ID)
            .await?
            .ok_or(ConfigError::MissingValue("client_id"))?;
        let client_secret = read_string(store, keys::CLIENT_SECRET)
            .await?
            .ok_or(ConfigError::MissingValue("client_secret"))?;
        let site_url = read_string(store, keys::SITE_URL)
            .await?
            .ok_or(ConfigError::MissingValue("site_url"))?;

        let mut config = Self::new(&openwebui_url, &client_id, &client_secret, &site_url)?;

        if let Some(site_name) = read_string(store, keys::SITE_NAME).await? {
            config = config.with_site_name(&site_name)?;
        }
        if let Some(redirect_uri) = read_string(store, keys::REDIRECT_URI).await? {
            config = config.with_redirect_uri(&redirect_uri)?;
        }
        if let Some(target) = read_string(store, keys::SUCCESS_REDIRECT).await? {
            config = config.with_success_redirect(&target)?;
        }
        if let Some(timeout) = read_string(store, keys::HTTP_TIMEOUT).await? {
            config.http_timeout_secs = parse_timeout(&timeout)?;
        }

        debug!("Loaded provider settings for {}", config.openwebui_url);
        Ok(config)
    }

    /// Load settings, treating an unconfigured store as `None`
    pub async fn load_optional(store: &dyn OptionStore) -> ConfigResult<Option<Self>> {
        match Self::load(store).await {
            Ok(config) => Ok(Some(config)),
            Err(ConfigError::MissingValue(field)) => {
                debug!("Provider settings incomplete, missing {}", field);
                Ok(None)
            }
            Err(e) => Err(e),
        }
    }

    /// Persist settings to the individual option keys and the aggregate settings object
    pub async fn save(&self, store: &dyn OptionStore) -> ConfigResult<()> {
        self.validate()?;

        store
            .set(keys::OPENWEBUI_URL, Value::from(self.openwebui_url.as_str()))
            .await?;
        store
            .set(keys::CLIENT_ID, Value::from(self.client_id.as_str()))
            .await?;
        store
            .set(keys::CLIENT_SECRET, Value::from(self.client_secret.as_str()))
            .await?;
        store
            .set(keys::SITE_URL, Value::from(self.site_url.as_str()))
            .await?;
        store
            .set(keys::SITE_NAME, Value::from(self.site_name.as_str()))
            .await?;
        match &self.redirect_uri {
            Some(uri) => store.set(keys::REDIRECT_URI, Value::from(uri.as_str())).await?,
            None => store.delete(keys::REDIRECT_URI).await?,
        }
        match &self.success_redirect {
            Some(target) => {
                store
                    .set(keys::SUCCESS_REDIRECT, Value::from(target.as_str()))
                    .await?
            }
            None => store.delete(keys::SUCCESS_REDIRECT).await?,
        }
        store
            .set(keys::HTTP_TIMEOUT, Value::from(self.http_timeout_secs.to_string()))
            .await?;
        store
            .set(
                keys::SETTINGS,
                serde_json::to_value(self).map_err(owui_storage::StorageError::from)?,
            )
            .await?;

        debug!("Saved provider settings for {}", self.openwebui_url);
        Ok(())
    }

    /// Overlay values from `OWUI_*` environment variables
    pub fn apply_env_overrides(self) -> ConfigResult<Self> {
        self.apply_overrides(|name| std::env::var(name).ok())
    }

    /// Overlay values from an arbitrary variable lookup
    pub fn apply_overrides<F>(mut self, lookup: F) -> ConfigResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup(OWUI_URL) {
            self.openwebui_url = sanitize_url("openwebui_url", &url)?;
        }
        if let Some(client_id) = lookup(OWUI_CLIENT_ID) {
            self.client_id = sanitize_text("client_id", &client_id)?;
        }
        if let Some(secret) = lookup(OWUI_CLIENT_SECRET) {
            self.client_secret = sanitize_text("client_secret", &secret)?;
        }
        if let Some(site_url) = lookup(OWUI_SITE_URL) {
            self.site_url = sanitize_url("site_url", &site_url)?;
        }
        if let Some(site_name) = lookup(OWUI_SITE_NAME) {
            self = self.with_site_name(&site_name)?;
        }
        if let Some(redirect_uri) = lookup(OWUI_REDIRECT_URI) {
            self = self.with_redirect_uri(&redirect_uri)?;
        }
        if let Some(timeout) = lookup(OWUI_HTTP_TIMEOUT_SECS) {
            self.http_timeout_secs = parse_timeout(&timeout)?;
        }
        Ok(self)
    }

    /// Build settings purely from environment variables
    pub fn from_env() -> ConfigResult<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> ConfigResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let url = lookup(OWUI_URL).ok_or(ConfigError::MissingValue("openwebui_url"))?;
        let client_id = lookup(OWUI_CLIENT_ID).ok_or(ConfigError::MissingValue("client_id"))?;
        let secret =
            lookup(OWUI_CLIENT_SECRET).ok_or(ConfigError::MissingValue("client_secret"))?;
        let site_url = lookup(OWUI_SITE_URL).ok_or(ConfigError::MissingValue("site_url"))?;

        Self::new(&url, &client_id, &secret, &site_url)?.apply_overrides(lookup)
    }
}

async fn read_string(store: &dyn OptionStore, key: &str) -> ConfigResult<Option<String>> {
    let value = store.get(key).await?;
    Ok(match value {
        Some(Value::String(s)) if !s.trim().is_empty() => Some(s),
        Some(Value::Number(n)) => Some(n.to_string()),
        _ => None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn sample() -> ProviderConfig {
        ProviderConfig::new(
            "https://openwebui.example.com/",
            "client-123",
            "secret-456",
            "https://blog.example.com",
        )
        .unwrap()
    }

    #[test]
    fn test_new_sanitizes_fields() {
        let config = sample();
        assert_eq!(config.openwebui_url, "https://openwebui.example.com");
        assert_eq!(config.site_name, DEFAULT_SITE_NAME);
        assert_eq!(config.http_timeout_secs, 30);
    }

    #[test]
    fn test_endpoints() {
        let config = sample();
        assert_eq!(
            config.authorize_endpoint(),
            "https://openwebui.example.com/api/wordpress/oauth/authorize"
        );
        assert_eq!(
            config.token_endpoint(),
            "https://openwebui.example.com/api/wordpress/oauth/token"
        );
        assert_eq!(
            config.revoke_endpoint(),
            "https://openwebui.example.com/api/wordpress/oauth/revoke"
        );
        assert_eq!(
            config.register_endpoint(),
            "https://openwebui.example.com/api/wordpress/register-connection"
        );
    }

    #[test]
    fn test_default_redirects_derive_from_site_url() {
        let config = sample();
        assert_eq!(
            config.redirect_uri(),
            "https://blog.example.com/wp-admin/options-general.php?page=wp-openwebui-connector&wp_openwebui_oauth_callback=1"
        );
        assert_eq!(
            config.success_redirect(),
            "https://blog.example.com/wp-admin/options-general.php?page=wp-openwebui-connector&connected=1"
        );
    }

    #[test]
    fn test_explicit_redirect_uri_kept_verbatim() {
        let config = sample()
            .with_redirect_uri(" https://blog.example.com/callback?x=1 ")
            .unwrap();
        assert_eq!(config.redirect_uri(), "https://blog.example.com/callback?x=1");
    }

    #[test]
    fn test_debug_redacts_secret() {
        let rendered = format!("{:?}", sample());
        assert!(!rendered.contains("secret-456"));
        assert!(rendered.contains("[redacted]"));
    }

    #[test]
    fn test_apply_overrides() {
        let vars: HashMap<&str, &str> = HashMap::from([
            (OWUI_CLIENT_ID, "override-id"),
            (OWUI_SITE_NAME, "My Blog"),
            (OWUI_HTTP_TIMEOUT_SECS, "10"),
        ]);

        let config = sample()
            .apply_overrides(|name| vars.get(name).map(|v| v.to_string()))
            .unwrap();

        assert_eq!(config.client_id, "override-id");
        assert_eq!(config.site_name, "My Blog");
        assert_eq!(config.http_timeout(), Duration::from_secs(10));
        assert_eq!(config.client_secret, "secret-456");
    }

    #[test]
    fn test_apply_overrides_rejects_invalid_values() {
        let result = sample().apply_overrides(|name| {
            (name == OWUI_URL).then(|| "ftp://nope".to_string())
        });
        assert!(matches!(result, Err(ConfigError::InvalidUrl { .. })));
    }

    #[test]
    fn test_from_lookup_requires_core_values() {
        let result = ProviderConfig::from_lookup(|name| {
            (name == OWUI_URL).then(|| "https://openwebui.example.com".to_string())
        });
        assert!(matches!(result, Err(ConfigError::MissingValue("client_id"))));
    }

    #[test]
    fn test_serde_defaults() {
        let json = serde_json::json!({
            "openwebui_url": "https://openwebui.example.com",
            "client_id": "id",
            "client_secret": "secret",
            "site_url": "https://blog.example.com",
            "site_name": "Blog"
        });
        let config: ProviderConfig = serde_json::from_value(json).unwrap();
        assert_eq!(config.http_timeout_secs, DEFAULT_HTTP_TIMEOUT_SECS);
        assert!(config.redirect_uri.is_none());
        assert!(config.validate().is_ok());
    }
}
