// ABOUTME: Error types for the OAuth session lifecycle and connector API calls
// ABOUTME: Each failure path of the authorization-code flow maps to its own variant

use owui_config::ConfigError;
use owui_storage::StorageError;
use thiserror::Error;

pub type AuthResult<T> = Result<T, AuthError>;

#[derive(Error, Debug)]
pub enum AuthError {
    #[error("Invalid state parameter: CSRF protection failed")]
    InvalidState,

    #[error("OAuth error: {code} - {description}")]
    ProviderError { code: String, description: String },

    #[error("No authorization code received")]
    MissingCode,

    #[error("Token exchange failed with status {status}: {body}")]
    TokenExchangeFailed { status: u16, body: String },

    #[error("Invalid token response: {0}")]
    TokenExchangeMalformed(String),

    #[error("Token refresh failed: {0}")]
    RefreshFailed(String),

    #[error("Network error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Not connected to OpenWebUI")]
    NotConnected,

    #[error("Request failed with status {status}: {body}")]
    ApiRequestFailed { status: u16, body: String },

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Invalid configuration: {0}")]
    Configuration(String),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

impl AuthError {
    /// Whether the error came from the provider or the network rather than local state
    pub fn is_remote(&self) -> bool {
        matches!(
            self,
            Self::ProviderError { .. }
                | Self::TokenExchangeFailed { .. }
                | Self::TokenExchangeMalformed(_)
                | Self::RefreshFailed(_)
                | Self::Transport(_)
                | Self::ApiRequestFailed { .. }
                | Self::InvalidResponse(_)
        )
    }
}
