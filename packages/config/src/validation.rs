// ABOUTME: Input sanitization for connector settings
// ABOUTME: Trims text fields and enforces http(s) URLs and timeout bounds

use url::Url;

use crate::constants::MAX_HTTP_TIMEOUT_SECS;
use crate::error::{ConfigError, ConfigResult};

/// Trim a required text setting and strip control characters
pub fn sanitize_text(field: &'static str, value: &str) -> ConfigResult<String> {
    let cleaned: String = value.chars().filter(|c| !c.is_control()).collect();
    let cleaned = cleaned.trim();

    if cleaned.is_empty() {
        return Err(ConfigError::MissingValue(field));
    }

    Ok(cleaned.to_string())
}

/// Validate an absolute http(s) URL and strip any trailing slash
pub fn sanitize_url(field: &'static str, value: &str) -> ConfigResult<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ConfigError::MissingValue(field));
    }

    let parsed = Url::parse(trimmed).map_err(|e| ConfigError::InvalidUrl {
        field,
        reason: e.to_string(),
    })?;

    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(ConfigError::InvalidUrl {
            field,
            reason: format!("unsupported scheme '{}'", parsed.scheme()),
        });
    }

    if parsed.host_str().is_none() {
        return Err(ConfigError::InvalidUrl {
            field,
            reason: "missing host".to_string(),
        });
    }

    Ok(trimmed.trim_end_matches('/').to_string())
}

/// Validate an HTTP timeout in seconds
pub fn validate_timeout(secs: u64) -> ConfigResult<u64> {
    if secs == 0 || secs > MAX_HTTP_TIMEOUT_SECS {
        return Err(ConfigError::InvalidTimeout(secs));
    }
    Ok(secs)
}

/// Parse and validate a timeout given as text (env var or stored option)
pub fn parse_timeout(value: &str) -> ConfigResult<u64> {
    let secs = value
        .trim()
        .parse::<u64>()
        .map_err(|_| ConfigError::InvalidNumber {
            field: "http_timeout",
            value: value.to_string(),
        })?;
    validate_timeout(secs)
}
