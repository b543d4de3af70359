// ABOUTME: OAuth session manager orchestrating the authorization-code flow
// ABOUTME: Handles authorization URLs, callbacks, token refresh, disconnect, and status

use std::sync::Arc;

use owui_config::ProviderConfig;
use owui_storage::{get_option, keys, update_option, OptionStore};
use reqwest::{Client, StatusCode};
use serde_json::Value;
use tracing::{debug, error, info, warn};
use url::Url;

use crate::{
    error::{AuthError, AuthResult},
    oauth::{
        clock::{Clock, SystemClock},
        state::{generate_state, states_match},
        types::{
            AuthorizationUrl, CallbackParams, CallbackSuccess, ConnectionInfo, ConnectionReport,
            TokenResponse, DEFAULT_SCOPE,
        },
    },
};

/// Marker stored under the connection-status option while tokens are present
pub const STATUS_CONNECTED: &str = "connected";

/// Owns the connection to one OpenWebUI provider.
///
/// All token reads go through [`OAuthSessionManager::get_access_token`], which refreshes
/// expired tokens transparently.
pub struct OAuthSessionManager {
    config: ProviderConfig,
    store: Arc<dyn OptionStore>,
    client: Client,
    clock: Arc<dyn Clock>,
}

impl OAuthSessionManager {
    pub fn new(config: ProviderConfig, store: Arc<dyn OptionStore>) -> AuthResult<Self> {
        config.validate()?;

        let client = Client::builder()
            .timeout(config.http_timeout())
            .build()
            .map_err(|e| AuthError::Configuration(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            config,
            store,
            client,
            clock: Arc::new(SystemClock),
        })
    }

    /// Replace the time source used for expiry checks
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    pub fn config(&self) -> &ProviderConfig {
        &self.config
    }

    pub(crate) fn http_client(&self) -> &Client {
        &self.client
    }

    pub(crate) fn store(&self) -> &dyn OptionStore {
        self.store.as_ref()
    }

    /// Build the provider authorization URL and persist a fresh state nonce.
    ///
    /// Any previously pending state is replaced.
    pub async fn build_authorization_url(&self) -> AuthResult<AuthorizationUrl> {
        let mut url = Url::parse(&self.config.authorize_endpoint())
            .map_err(|e| AuthError::Configuration(format!("Invalid authorization URL: {}", e)))?;

        let state = generate_state();
        self.store
            .set(keys::OAUTH_STATE, Value::from(state.as_str()))
            .await?;
        debug!("Stored state parameter for CSRF protection");

        url.query_pairs_mut()
            .append_pair("response_type", "code")
            .append_pair("client_id", &self.config.client_id)
            .append_pair("redirect_uri", &self.config.redirect_uri())
            .append_pair("state", &state)
            .append_pair("scope", DEFAULT_SCOPE)
            .append_pair("site_url", &self.config.site_url)
            .append_pair("site_name", &self.config.site_name);

        Ok(AuthorizationUrl {
            url: url.to_string(),
            state,
        })
    }

    /// Complete the flow with the parameters delivered to the redirect URI.
    ///
    /// A state mismatch leaves the pending state in place. Every other outcome consumes it.
    pub async fn handle_callback(&self, params: CallbackParams) -> AuthResult<CallbackSuccess> {
        let pending: Option<String> = get_option(self.store(), keys::OAUTH_STATE).await?;

        let state_valid = match (pending.as_deref(), params.state.as_deref()) {
            (Some(expected), Some(provided)) => states_match(expected, provided),
            _ => false,
        };
        if !state_valid {
            warn!("Rejected OAuth callback: state parameter did not match");
            return Err(AuthError::InvalidState);
        }
        debug!("State validated successfully");

        if let Some(code) = params.error {
            let description = params.error_description.unwrap_or_default();
            error!("Provider returned OAuth error: {}", code);
            self.discard_pending_state().await;
            return Err(AuthError::ProviderError { code, description });
        }

        let Some(code) = params.code else {
            self.discard_pending_state().await;
            return Err(AuthError::MissingCode);
        };

        info!("Received authorization code, exchanging for token");
        let exchanged = self.exchange_code(&code).await;
        let token_response = match exchanged {
            Ok(response) => response,
            Err(e) => {
                self.discard_pending_state().await;
                return Err(e);
            }
        };

        let connection = ConnectionInfo::from_token_response(token_response, self.now(), None);
        // The code is spent at this point
        if let Err(e) = self.store_connection(&connection).await {
            self.discard_pending_state().await;
            return Err(e);
        }
        self.store.delete(keys::OAUTH_STATE).await?;

        info!("✅ Successfully connected to OpenWebUI");
        Ok(CallbackSuccess {
            message: "Successfully connected to OpenWebUI".to_string(),
            redirect: self.config.success_redirect(),
        })
    }

    /// Current access token, refreshed first when expired.
    ///
    /// Returns `None` when there is no connection or the refresh fails. The stored
    /// connection is left untouched in that case. Storage failures are returned as errors.
    pub async fn get_access_token(&self) -> AuthResult<Option<String>> {
        let Some(connection) = self.load_connection().await? else {
            return Ok(None);
        };

        if connection.access_token.is_empty() {
            return Ok(None);
        }

        if !connection.is_expired_at(self.now()) {
            return Ok(Some(connection.access_token));
        }

        debug!("Access token expired, attempting refresh");
        match self.refresh_token(&connection).await {
            Ok(refreshed) => Ok(Some(refreshed.access_token)),
            Err(e @ AuthError::Storage(_)) => Err(e),
            Err(e) => {
                warn!("Failed to refresh access token: {}", e);
                Ok(None)
            }
        }
    }

    /// Whether a usable access token can be obtained right now
    pub async fn is_connected(&self) -> AuthResult<bool> {
        Ok(self.get_access_token().await?.is_some())
    }

    pub async fn connection_status(&self) -> AuthResult<ConnectionReport> {
        let Some(connection) = self.load_connection().await? else {
            return Ok(ConnectionReport::disconnected());
        };

        let connected = self.is_connected().await?;
        // A refresh may have replaced the stored connection
        let connection = if connected {
            self.load_connection().await?.unwrap_or(connection)
        } else {
            connection
        };

        Ok(ConnectionReport::from_info(&connection, connected))
    }

    /// Revoke the current token (best-effort) and forget the connection
    pub async fn disconnect(&self) -> AuthResult<()> {
        let token = match self.get_access_token().await {
            Ok(token) => token,
            Err(e) => {
                warn!("Could not read access token before disconnect: {}", e);
                None
            }
        };

        if let Some(token) = token {
            self.revoke_token(&token).await;
        }

        self.store.delete(keys::CONNECTION_INFO).await?;
        self.store.delete(keys::CONNECTION_STATUS).await?;
        self.store.delete(keys::OAUTH_STATE).await?;

        info!("✅ Disconnected from OpenWebUI");
        Ok(())
    }

    async fn exchange_code(&self, code: &str) -> AuthResult<TokenResponse> {
        let redirect_uri = self.config.redirect_uri();
        let params = [
            ("grant_type", "authorization_code"),
            ("code", code),
            ("redirect_uri", redirect_uri.as_str()),
            ("client_id", self.config.client_id.as_str()),
            ("client_secret", self.config.client_secret.as_str()),
        ];

        self.request_tokens(&params).await
    }

    async fn refresh_token(&self, current: &ConnectionInfo) -> AuthResult<ConnectionInfo> {
        let refresh_token = current
            .refresh_token()
            .ok_or_else(|| AuthError::RefreshFailed("No refresh token available".to_string()))?
            .to_string();

        let params = [
            ("grant_type", "refresh_token"),
            ("refresh_token", refresh_token.as_str()),
            ("client_id", self.config.client_id.as_str()),
            ("client_secret", self.config.client_secret.as_str()),
        ];

        let token_response = self
            .request_tokens(&params)
            .await
            .map_err(|e| AuthError::RefreshFailed(e.to_string()))?;

        let refreshed =
            ConnectionInfo::from_token_response(token_response, self.now(), Some(refresh_token));
        self.store_connection(&refreshed).await?;

        info!("✅ Successfully refreshed access token");
        Ok(refreshed)
    }

    async fn request_tokens(&self, params: &[(&str, &str)]) -> AuthResult<TokenResponse> {
        let response = self
            .client
            .post(self.config.token_endpoint())
            .header("Accept", "application/json")
            .form(params)
            .send()
            .await
            .map_err(|e| {
                error!("Token request failed: {}", e);
                AuthError::Transport(e)
            })?;

        let status = response.status();
        let body = response.text().await?;

        if status != StatusCode::OK {
            // Only the status is logged; the body may echo credentials
            error!("Token endpoint returned status {}", status);
            return Err(AuthError::TokenExchangeFailed {
                status: status.as_u16(),
                body,
            });
        }

        TokenResponse::parse(&body)
    }

    async fn revoke_token(&self, token: &str) {
        let result = self
            .client
            .post(self.config.revoke_endpoint())
            .bearer_auth(token)
            .form(&[("token", token)])
            .send()
            .await;

        match result {
            Ok(response) if response.status().is_success() => debug!("Token revoked"),
            Ok(response) => warn!("Token revocation returned status {}", response.status()),
            Err(e) => warn!("Token revocation failed: {}", e),
        }
    }

    async fn load_connection(&self) -> AuthResult<Option<ConnectionInfo>> {
        Ok(get_option(self.store(), keys::CONNECTION_INFO).await?)
    }

    async fn store_connection(&self, connection: &ConnectionInfo) -> AuthResult<()> {
        update_option(self.store(), keys::CONNECTION_INFO, connection).await?;
        self.store
            .set(keys::CONNECTION_STATUS, Value::from(STATUS_CONNECTED))
            .await?;
        Ok(())
    }

    async fn discard_pending_state(&self) {
        if let Err(e) = self.store.delete(keys::OAUTH_STATE).await {
            warn!("Failed to clear pending OAuth state: {}", e);
        }
    }

    fn now(&self) -> i64 {
        self.clock.timestamp()
    }
}
