// ABOUTME: Error types for connector configuration
// ABOUTME: Covers missing settings, invalid URLs and timeouts, and storage failures

use owui_storage::StorageError;
use thiserror::Error;

pub type ConfigResult<T> = Result<T, ConfigError>;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Missing required setting: {0}")]
    MissingValue(&'static str),

    #[error("Invalid URL for {field}: {reason}")]
    InvalidUrl { field: &'static str, reason: String },

    #[error("HTTP timeout {0}s is out of valid range (1-300)")]
    InvalidTimeout(u64),

    #[error("Invalid number for {field}: {value}")]
    InvalidNumber { field: &'static str, value: String },

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),
}
