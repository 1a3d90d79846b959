//! Claim extraction from access tokens
//!
//! The payload segment is decoded without verifying the signature. The server
//! verifies tokens; the client only reads the user id for convenience.

use base64::Engine as _;
use base64::engine::general_purpose::{STANDARD_NO_PAD, URL_SAFE_NO_PAD};
use serde_json::Value;

/// Decodes the payload (second segment) of a JWT into JSON
///
/// Accepts both the url-safe and the standard base64 alphabets, with or
/// without padding. Returns `None` on any malformed input.
#[must_use]
pub fn decode_payload(token: &str) -> Option<Value> {
    let segment = token.split('.').nth(1)?.trim_end_matches('=');
    let bytes = URL_SAFE_NO_PAD
        .decode(segment)
        .or_else(|_| STANDARD_NO_PAD.decode(segment))
        .ok()?;
    serde_json::from_slice(&bytes).ok()
}

/// Extracts the user id claim from a JWT
///
/// Looks at `id` first, then `uid`. Empty strings, zero, `false` and `null`
/// count as absent.
#[must_use]
pub fn user_id_from_token(token: &str) -> Option<String> {
    let payload = decode_payload(token)?;
    ["id", "uid"]
        .iter()
        .find_map(|claim| payload.get(*claim).and_then(claim_text))
}

fn claim_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) if n.as_f64() != Some(0.0) => Some(n.to_string()),
        _ => None,
    }
}
