//! Request signing for the futures REST API.
//!
//! Signed endpoints take the request parameters serialized in insertion
//! order, a millisecond timestamp appended last, and an HMAC-SHA256
//! signature (hex) over that exact string appended as the final parameter.

use chrono::Utc;
use hmac::{Hmac, Mac};
use sha2::Sha256;

use crate::error::{PuntError, Result};

type HmacSha256 = Hmac<Sha256>;

/// Current timestamp in milliseconds, as carried by signed requests.
pub fn timestamp_ms() -> i64 {
    Utc::now().timestamp_millis()
}

/// Serialize parameters into the canonical query string.
///
/// Insertion order is preserved; the signature is computed over exactly
/// this string, so it must match what goes on the wire byte for byte.
pub fn canonical_query(params: &[(&str, String)]) -> String {
    params
        .iter()
        .map(|(key, value)| format!("{}={}", key, urlencoding::encode(value)))
        .collect::<Vec<_>>()
        .join("&")
}

/// HMAC-SHA256 signature over the canonical query string, hex-encoded.
pub fn sign_query(secret: &str, query: &str) -> Result<String> {
    let mut mac = HmacSha256::new_from_slice(secret.as_bytes())
        .map_err(|e| PuntError::Credentials(format!("invalid API secret: {}", e)))?;
    mac.update(query.as_bytes());
    Ok(hex::encode(mac.finalize().into_bytes()))
}
