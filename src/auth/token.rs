//! Bearer token inspection
//!
//! The client never verifies signatures; the backend does. It only reads the
//! payload segment to find out whether the token is worth sending at all.

use base64::alphabet;
use base64::engine::{DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig};
use base64::Engine;
use serde_json::Value;
use thiserror::Error;

/// Accepts both base64 alphabets, padded or not. URL-safe `-` and `_` are
/// mapped to `+` and `/` before decoding, so a token a strict standard-alphabet
/// decoder would reject still parses here.
const LENIENT: GeneralPurpose = GeneralPurpose::new(
    &alphabet::STANDARD,
    GeneralPurposeConfig::new().with_decode_padding_mode(DecodePaddingMode::Indifferent),
);

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TokenError {
    #[error("token has {0} segments, expected 3")]
    Malformed(usize),

    #[error("token payload is not base64: {0}")]
    Base64(String),

    #[error("token payload is not JSON: {0}")]
    Json(String),
}

/// Decoded middle segment of a token
#[derive(Debug, Clone, PartialEq)]
pub struct TokenPayload {
    raw: Value,
}

impl TokenPayload {
    /// Expiry in seconds since epoch, if the payload carries a numeric `exp`
    pub fn exp(&self) -> Option<i64> {
        let exp = self.raw.get("exp")?;
        exp.as_i64().or_else(|| exp.as_f64().map(|f| f as i64))
    }

    /// Expired relative to `now_ms` (milliseconds since epoch).
    ///
    /// An `exp` of zero counts as unset and never expires.
    pub fn is_expired_at(&self, now_ms: i64) -> bool {
        match self.raw.get("exp").and_then(Value::as_f64) {
            Some(exp) if exp != 0.0 => exp * 1000.0 < now_ms as f64,
            _ => false,
        }
    }
}

/// Outcome of inspecting a stored token
#[derive(Debug, Clone, PartialEq)]
pub enum TokenStatus {
    Valid(TokenPayload),
    Malformed(TokenError),
    Expired { exp: i64 },
}

/// Split a token and decode its payload segment
pub fn decode_payload(token: &str) -> Result<TokenPayload, TokenError> {
    let parts: Vec<&str> = token.split('.').collect();
    if parts.len() != 3 {
        return Err(TokenError::Malformed(parts.len()));
    }

    let normalized: String = parts[1]
        .chars()
        .map(|c| match c {
            '-' => '+',
            '_' => '/',
            other => other,
        })
        .collect();

    let bytes = LENIENT
        .decode(normalized.as_bytes())
        .map_err(|e| TokenError::Base64(e.to_string()))?;
    let raw: Value = serde_json::from_slice(&bytes).map_err(|e| TokenError::Json(e.to_string()))?;
    if raw.is_null() {
        return Err(TokenError::Json("payload is null".to_string()));
    }

    Ok(TokenPayload { raw })
}

/// Classify a token against the given wall-clock time
pub fn inspect(token: &str, now_ms: i64) -> TokenStatus {
    match decode_payload(token) {
        Err(e) => TokenStatus::Malformed(e),
        Ok(payload) if payload.is_expired_at(now_ms) => TokenStatus::Expired {
            exp: payload.exp().unwrap_or_default(),
        },
        Ok(payload) => TokenStatus::Valid(payload),
    }
}
