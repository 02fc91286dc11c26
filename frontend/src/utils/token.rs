use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine as _};
use serde_json::Value;

/// Whether a stored bearer token should be treated as expired.
///
/// Reads the `exp` claim (Unix seconds) out of the JWT payload segment and
/// compares it against the current time in milliseconds. Only a strictly
/// future expiry counts as valid; anything malformed (wrong segment count,
/// bad base64, bad JSON, missing or non-numeric `exp`) reads as expired.
/// No signature verification happens here; that is the backend's job. This
/// check only exists to avoid firing requests doomed to 401.
pub fn is_expired(token: &str) -> bool {
    match expiry_ms(token) {
        Some(exp_ms) => now_ms() >= exp_ms,
        None => true,
    }
}

/// Milliseconds until the token expires, when the payload is readable.
/// Negative values mean the expiry is already in the past.
pub fn remaining_ms(token: &str) -> Option<i64> {
    Some(expiry_ms(token)? - now_ms())
}

fn expiry_ms(token: &str) -> Option<i64> {
    let payload = decode_payload(token)?;
    let exp = payload.get("exp")?.as_i64()?;
    exp.checked_mul(1000)
}

fn decode_payload(token: &str) -> Option<Value> {
    let mut parts = token.split('.');
    parts.next()?;
    let payload = parts.next()?;
    let decoded = URL_SAFE_NO_PAD.decode(payload).ok()?;
    serde_json::from_slice(&decoded).ok()
}

fn now_ms() -> i64 {
    chrono::Utc::now().timestamp_millis()
}
