// ABOUTME: Core type definitions for the OAuth session
// ABOUTME: Includes stored connection info, token responses, callback parameters, and status reports

use std::fmt;

use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::{AuthError, AuthResult};

pub const DEFAULT_TOKEN_TYPE: &str = "Bearer";
pub const DEFAULT_EXPIRES_IN: i64 = 3600;
pub const DEFAULT_SCOPE: &str = "openid profile email";

/// Token information persisted after a successful exchange or refresh
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConnectionInfo {
    pub access_token: String,
    #[serde(default)]
    pub refresh_token: Option<String>,
    pub token_type: String,
    pub expires_in: i64,
    /// Unix timestamp of when the token was issued
    #[serde(alias = "created_at")]
    pub issued_at: i64,
    /// Unix timestamp after which the access token is no longer used
    pub expires_at: i64,
    #[serde(default)]
    pub scope: Option<String>,
}

impl ConnectionInfo {
    /// Build connection info from a token endpoint response.
    ///
    /// `previous_refresh_token` is kept when the response carries no new one.
    pub fn from_token_response(
        response: TokenResponse,
        now: i64,
        previous_refresh_token: Option<String>,
    ) -> Self {
        let expires_in = response.expires_in.unwrap_or(DEFAULT_EXPIRES_IN).max(0);
        let refresh_token = response
            .refresh_token
            .filter(|token| !token.is_empty())
            .or(previous_refresh_token);

        Self {
            access_token: response.access_token,
            refresh_token,
            token_type: response
                .token_type
                .filter(|t| !t.is_empty())
                .unwrap_or_else(|| DEFAULT_TOKEN_TYPE.to_string()),
            expires_in,
            issued_at: now,
            expires_at: now.saturating_add(expires_in),
            scope: response.scope.filter(|s| !s.is_empty()),
        }
    }

    /// Valid strictly before `expires_at`
    pub fn is_expired_at(&self, now: i64) -> bool {
        now >= self.expires_at
    }

    pub fn refresh_token(&self) -> Option<&str> {
        self.refresh_token.as_deref().filter(|token| !token.is_empty())
    }
}

/// Token endpoint response body
#[derive(Debug, Clone, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    #[serde(default)]
    pub refresh_token: Option<String>,
    #[serde(default)]
    pub token_type: Option<String>,
    #[serde(default)]
    pub expires_in: Option<i64>,
    #[serde(default)]
    pub scope: Option<String>,
}

impl TokenResponse {
    /// Parse a token endpoint body, rejecting bodies without a usable access token
    pub fn parse(body: &str) -> AuthResult<Self> {
        let response: TokenResponse = serde_json::from_str(body)
            .map_err(|e| AuthError::TokenExchangeMalformed(e.to_string()))?;

        if response.access_token.trim().is_empty() {
            return Err(AuthError::TokenExchangeMalformed(
                "access_token is empty".to_string(),
            ));
        }

        Ok(response)
    }
}

/// Query parameters delivered to the redirect URI
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CallbackParams {
    pub state: Option<String>,
    pub code: Option<String>,
    pub error: Option<String>,
    pub error_description: Option<String>,
}

impl CallbackParams {
    /// Parse a raw query string, with or without the leading `?`
    pub fn from_query(query: &str) -> Self {
        let query = query.trim().trim_start_matches('?');
        Self::from_pairs(url::form_urlencoded::parse(query.as_bytes()))
    }

    /// Parse the query of a full callback URL
    pub fn from_url(callback_url: &str) -> AuthResult<Self> {
        let url = Url::parse(callback_url.trim())
            .map_err(|e| AuthError::InvalidInput(format!("Invalid callback URL: {}", e)))?;
        Ok(Self::from_pairs(url.query_pairs()))
    }

    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut params = Self::default();
        for (key, value) in pairs {
            let value = value.as_ref().trim();
            if value.is_empty() {
                continue;
            }
            let slot = match key.as_ref() {
                "state" => &mut params.state,
                "code" => &mut params.code,
                "error" => &mut params.error,
                "error_description" => &mut params.error_description,
                _ => continue,
            };
            *slot = Some(value.to_string());
        }
        params
    }
}

/// Authorization URL plus the state nonce embedded in it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthorizationUrl {
    pub url: String,
    pub state: String,
}

/// Outcome of a successful callback
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CallbackSuccess {
    pub message: String,
    /// Where the user agent should be sent next
    pub redirect: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConnectionStatus {
    Disconnected,
    Connected,
    Expired,
}

impl ConnectionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Disconnected => "disconnected",
            Self::Connected => "connected",
            Self::Expired => "expired",
        }
    }
}

impl fmt::Display for ConnectionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Connection status as shown to an administrator
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConnectionReport {
    pub status: ConnectionStatus,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub connected_at: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expires_at: Option<i64>,
}

impl ConnectionReport {
    pub fn disconnected() -> Self {
        Self {
            status: ConnectionStatus::Disconnected,
            message: "Not connected to OpenWebUI".to_string(),
            connected_at: None,
            expires_at: None,
        }
    }

    pub(crate) fn from_info(info: &ConnectionInfo, connected: bool) -> Self {
        let (status, message) = if connected {
            (ConnectionStatus::Connected, "Connected to OpenWebUI")
        } else {
            (ConnectionStatus::Expired, "Connection expired")
        };

        Self {
            status,
            message: message.to_string(),
            connected_at: Some(info.issued_at),
            expires_at: Some(info.expires_at),
        }
    }
}
