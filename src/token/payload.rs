//! Bearer-token payload decoding.
//!
//! Tokens are three dot-separated segments; only the middle one is read here.
//! The signature is never checked client-side: the backend remains the
//! authority, and a forged payload only leads to a failed user fetch.

use base64::Engine;
use base64::engine::general_purpose::{STANDARD_NO_PAD, URL_SAFE_NO_PAD};
use serde_json::Value;

/// Why a token could not be decoded. Internal: never shown to users.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TokenError {
    #[error("expected 3 token segments, found {0}")]
    SegmentCount(usize),
    #[error("payload segment is not base64: {0}")]
    Base64(String),
    #[error("payload segment is not a JSON object: {0}")]
    Json(String),
    #[error("payload does not contain userId")]
    MissingUserId,
}

/// Claims read from a token's payload segment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenPayload {
    /// Backend user id. Numeric ids are normalized to their decimal string.
    pub user_id: String,
}

/// Decode the payload segment of `token`.
///
/// # Errors
///
/// Returns a [`TokenError`] for a wrong segment count, a non-base64 or
/// non-JSON payload, or a payload without a usable `userId`.
pub fn decode_payload(token: &str) -> Result<TokenPayload, TokenError> {
    let segments: Vec<&str> = token.split('.').collect();
    if segments.len() != 3 {
        return Err(TokenError::SegmentCount(segments.len()));
    }

    let bytes = decode_segment(segments[1])?;
    let claims = match serde_json::from_slice::<Value>(&bytes) {
        Ok(Value::Object(map)) => map,
        Ok(other) => return Err(TokenError::Json(format!("found {}", json_kind(&other)))),
        Err(e) => return Err(TokenError::Json(e.to_string())),
    };

    // Empty strings and zero count as missing, like any other falsy id.
    let user_id = match claims.get("userId") {
        Some(Value::String(s)) if !s.is_empty() => s.clone(),
        Some(Value::Number(n)) if n.as_f64().is_some_and(|f| f.abs() > 0.0) => n.to_string(),
        _ => return Err(TokenError::MissingUserId),
    };

    Ok(TokenPayload { user_id })
}

/// Accept both the URL-safe alphabet used by JWTs and the standard one, with
/// or without padding.
fn decode_segment(segment: &str) -> Result<Vec<u8>, TokenError> {
    let trimmed = segment.trim_end_matches('=');
    if trimmed.is_empty() {
        return Err(TokenError::Base64("empty segment".into()));
    }
    URL_SAFE_NO_PAD
        .decode(trimmed)
        .or_else(|_| STANDARD_NO_PAD.decode(trimmed))
        .map_err(|e| TokenError::Base64(e.to_string()))
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
#[path = "payload_test.rs"]
mod tests;
