// ABOUTME: Anti-forgery state nonces for the authorization-code flow
// ABOUTME: Generates random nonces and compares them in constant time

use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine};
use rand::Rng;
use subtle::ConstantTimeEq;

const STATE_BYTES: usize = 32;

/// Generate a fresh state nonce (32 random bytes, URL-safe base64)
pub fn generate_state() -> String {
    let bytes: [u8; STATE_BYTES] = rand::thread_rng().gen();
    URL_SAFE_NO_PAD.encode(bytes)
}

/// Constant-time comparison of the pending state and the one echoed back
pub fn states_match(expected: &str, provided: &str) -> bool {
    expected.as_bytes().ct_eq(provided.as_bytes()).into()
}
