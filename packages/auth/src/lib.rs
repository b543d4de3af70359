// ABOUTME: OpenWebUI connector authentication library
// ABOUTME: OAuth2 authorization-code flow, token refresh, and authenticated API calls

pub mod api;
pub mod error;
pub mod oauth;

// Re-export main types
pub use api::{ConnectorApi, Registration};
pub use error::{AuthError, AuthResult};
pub use oauth::{
    AuthorizationUrl, CallbackParams, CallbackSuccess, Clock, ConnectionInfo, ConnectionReport,
    ConnectionStatus, ManualClock, OAuthSessionManager, SystemClock,
};
