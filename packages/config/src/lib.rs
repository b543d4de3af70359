// ABOUTME: Configuration for the OpenWebUI connector
// ABOUTME: Provider settings, environment variable names, and input sanitization

pub mod constants;
pub mod error;
pub mod provider;
pub mod validation;

pub use error::{ConfigError, ConfigResult};
pub use provider::ProviderConfig;
