// ABOUTME: Authenticated calls to the OpenWebUI connector endpoints
// ABOUTME: Connection test and application-password registration

use std::sync::Arc;

use owui_storage::{get_option, keys, update_option};
use reqwest::{Response, StatusCode};
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, error, info};

use crate::{
    error::{AuthError, AuthResult},
    oauth::OAuthSessionManager,
};

#[derive(Debug, Serialize)]
struct RegisterConnectionRequest<'a> {
    site_url: &'a str,
    site_name: &'a str,
    application_password: &'a str,
}

/// Result of registering an application password with the provider
#[derive(Debug, Clone, PartialEq)]
pub struct Registration {
    pub connection_id: String,
    /// Full response body
    pub response: Value,
}

pub struct ConnectorApi {
    session: Arc<OAuthSessionManager>,
}

impl ConnectorApi {
    pub fn new(session: Arc<OAuthSessionManager>) -> Self {
        Self { session }
    }

    pub fn session(&self) -> &OAuthSessionManager {
        &self.session
    }

    /// Check that the provider accepts the current access token
    pub async fn test_connection(&self) -> AuthResult<Value> {
        let token = self.access_token().await?;

        let response = self
            .session
            .http_client()
            .get(self.session.config().test_endpoint())
            .bearer_auth(&token)
            .send()
            .await?;

        let body = Self::read_success_body(response).await?;
        let payload = serde_json::from_str(&body)
            .map_err(|e| AuthError::InvalidResponse(e.to_string()))?;

        info!("✅ Connection test succeeded");
        Ok(payload)
    }

    /// Hand an application password to the provider so it can call back into the site
    pub async fn register_application_password(
        &self,
        application_password: &str,
    ) -> AuthResult<Registration> {
        let application_password = application_password.trim();
        if application_password.is_empty() {
            return Err(AuthError::InvalidInput(
                "Application password cannot be empty".to_string(),
            ));
        }

        let token = self.access_token().await?;
        let config = self.session.config();
        let payload = RegisterConnectionRequest {
            site_url: &config.site_url,
            site_name: &config.site_name,
            application_password,
        };

        let response = self
            .session
            .http_client()
            .post(config.register_endpoint())
            .bearer_auth(&token)
            .json(&payload)
            .send()
            .await?;

        let body = Self::read_success_body(response).await?;
        let response: Value = serde_json::from_str(&body)
            .map_err(|e| AuthError::InvalidResponse(e.to_string()))?;

        let connection_id = match response.get("connection_id") {
            Some(Value::String(id)) if !id.is_empty() => id.clone(),
            Some(Value::Number(id)) => id.to_string(),
            _ => {
                return Err(AuthError::InvalidResponse(
                    "Response is missing connection_id".to_string(),
                ))
            }
        };

        update_option(self.session.store(), keys::CONNECTION_ID, &connection_id).await?;
        info!("✅ Registered application password (connection {})", connection_id);

        Ok(Registration {
            connection_id,
            response,
        })
    }

    /// Connection id stored by the last successful registration
    pub async fn connection_id(&self) -> AuthResult<Option<String>> {
        Ok(get_option(self.session.store(), keys::CONNECTION_ID).await?)
    }

    async fn access_token(&self) -> AuthResult<String> {
        self.session
            .get_access_token()
            .await?
            .ok_or(AuthError::NotConnected)
    }

    async fn read_success_body(response: Response) -> AuthResult<String> {
        let status = response.status();
        let body = response.text().await?;

        if status != StatusCode::OK {
            error!("Connector API request failed with status {}", status);
            return Err(AuthError::ApiRequestFailed {
                status: status.as_u16(),
                body,
            });
        }

        debug!("Connector API request succeeded");
        Ok(body)
    }
}
