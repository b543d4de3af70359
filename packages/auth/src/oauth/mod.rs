// ABOUTME: OAuth module for the connection to an OpenWebUI provider
// ABOUTME: Includes state nonces, the clock abstraction, session manager, and token types

pub mod clock;
pub mod manager;
pub mod state;
pub mod types;

pub use clock::{Clock, ManualClock, SystemClock};
pub use manager::{OAuthSessionManager, STATUS_CONNECTED};
pub use types::{
    AuthorizationUrl, CallbackParams, CallbackSuccess, ConnectionInfo, ConnectionReport,
    ConnectionStatus, TokenResponse,
};
