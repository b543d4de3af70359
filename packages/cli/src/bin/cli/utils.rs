// ABOUTME: Formatting and parsing helpers shared by CLI commands
// ABOUTME: Callback input parsing, secret masking, and timestamp display

use chrono::DateTime;
use owui_auth::{AuthResult, CallbackParams};

/// Accept either a full callback URL or just its query string
pub fn parse_callback_input(input: &str) -> AuthResult<CallbackParams> {
    let input = input.trim();
    if input.starts_with("http://") || input.starts_with("https://") {
        CallbackParams::from_url(input)
    } else {
        Ok(CallbackParams::from_query(input))
    }
}

pub fn mask_secret(secret: &str) -> String {
    if secret.chars().count() <= 4 {
        return "****".to_string();
    }
    let visible: String = secret.chars().take(4).collect();
    format!("{}****", visible)
}

pub fn format_timestamp(timestamp: i64) -> String {
    match DateTime::from_timestamp(timestamp, 0) {
        Some(dt) => dt.format("%Y-%m-%d %H:%M:%S UTC").to_string(),
        None => "Invalid date".to_string(),
    }
}
