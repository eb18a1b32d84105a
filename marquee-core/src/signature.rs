//! Webhook signature verification over the raw request body.
//!
//! The gateway signs `"{timestamp}.{raw body}"` with HMAC-SHA256 and sends
//! the result in a `Stripe-Signature`-style header: `t=<unix>,v1=<hex mac>`.
//! Verification must run against the unparsed bytes; parsing first would
//! change the payload and invalidate the signature.

use chrono::{DateTime, Utc};
use hmac::{Hmac, Mac};
use sha2::Sha256;
use thiserror::Error;

type HmacSha256 = Hmac<Sha256>;

/// Header carrying the webhook signature.
pub const SIGNATURE_HEADER: &str = "Stripe-Signature";

/// Maximum age of a signed payload before it is rejected as stale.
pub const DEFAULT_TOLERANCE_SECS: i64 = 300;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SignatureError {
    #[error("Malformed signature header")]
    Malformed,

    #[error("Signature timestamp outside tolerance")]
    Stale,

    #[error("Signature does not match payload")]
    Mismatch,
}

/// Produce a signature header value for `payload` at `timestamp`.
///
/// Used by gateway mocks and by tests; the scheme matches what
/// [`verify_signature`] expects.
pub fn sign_payload(secret: &str, timestamp: i64, payload: &[u8]) -> String {
    let mac = signed_mac(secret, timestamp, payload);
    format!("t={},v1={}", timestamp, hex::encode(mac))
}

/// Verify `header` against the raw `payload` bytes.
///
/// Accepts multiple `v1` entries (key-rotation) and rejects timestamps older
/// than `tolerance_secs` relative to `now`. Comparison is constant-time via
/// the HMAC verify primitive.
pub fn verify_signature(
    secret: &str,
    header: &str,
    payload: &[u8],
    tolerance_secs: i64,
    now: DateTime<Utc>,
) -> Result<(), SignatureError> {
    let mut timestamp: Option<i64> = None;
    let mut candidates: Vec<Vec<u8>> = Vec::new();

    for part in header.split(',') {
        match part.trim().split_once('=') {
            Some(("t", value)) => {
                timestamp = Some(value.parse().map_err(|_| SignatureError::Malformed)?);
            }
            Some(("v1", value)) => {
                candidates.push(hex::decode(value).map_err(|_| SignatureError::Malformed)?);
            }
            // Unknown scheme versions are ignored, not rejected
            Some(_) => {}
            None => return Err(SignatureError::Malformed),
        }
    }

    let timestamp = timestamp.ok_or(SignatureError::Malformed)?;
    if candidates.is_empty() {
        return Err(SignatureError::Malformed);
    }

    let age = now.timestamp() - timestamp;
    if age.abs() > tolerance_secs {
        return Err(SignatureError::Stale);
    }

    for candidate in &candidates {
        let mut mac = HmacSha256::new_from_slice(secret.as_bytes())
            .map_err(|_| SignatureError::Malformed)?;
        mac.update(timestamp.to_string().as_bytes());
        mac.update(b".");
        mac.update(payload);
        if mac.verify_slice(candidate).is_ok() {
            return Ok(());
        }
    }

    Err(SignatureError::Mismatch)
}

fn signed_mac(secret: &str, timestamp: i64, payload: &[u8]) -> Vec<u8> {
    let mut mac = HmacSha256::new_from_slice(secret.as_bytes())
        .expect("HMAC accepts keys of any length");
    mac.update(timestamp.to_string().as_bytes());
    mac.update(b".");
    mac.update(payload);
    mac.finalize().into_bytes().to_vec()
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &str = "whsec_test";

    #[test]
    fn test_round_trip() {
        let now = Utc::now();
        let body = br#"{"type":"checkout.session.completed"}"#;
        let header = sign_payload(SECRET, now.timestamp(), body);

        assert_eq!(
            verify_signature(SECRET, &header, body, DEFAULT_TOLERANCE_SECS, now),
            Ok(())
        );
    }

    #[test]
    fn test_tampered_body_rejected() {
        let now = Utc::now();
        let header = sign_payload(SECRET, now.timestamp(), b"original");

        assert_eq!(
            verify_signature(SECRET, &header, b"tampered", DEFAULT_TOLERANCE_SECS, now),
            Err(SignatureError::Mismatch)
        );
    }

    #[test]
    fn test_wrong_secret_rejected() {
        let now = Utc::now();
        let header = sign_payload("whsec_other", now.timestamp(), b"body");

        assert_eq!(
            verify_signature(SECRET, &header, b"body", DEFAULT_TOLERANCE_SECS, now),
            Err(SignatureError::Mismatch)
        );
    }

    #[test]
    fn test_stale_timestamp_rejected() {
        let now = Utc::now();
        let old = now.timestamp() - DEFAULT_TOLERANCE_SECS - 1;
        let header = sign_payload(SECRET, old, b"body");

        assert_eq!(
            verify_signature(SECRET, &header, b"body", DEFAULT_TOLERANCE_SECS, now),
            Err(SignatureError::Stale)
        );
    }

    #[test]
    fn test_malformed_header_rejected() {
        let now = Utc::now();
        for header in ["", "t=abc,v1=00", "v1=00", "t=123", "garbage"] {
            assert!(
                verify_signature(SECRET, header, b"body", DEFAULT_TOLERANCE_SECS, now).is_err(),
                "header {header:?} should be rejected"
            );
        }
    }

    #[test]
    fn test_second_v1_entry_accepted() {
        let now = Utc::now();
        let header = sign_payload(SECRET, now.timestamp(), b"body");
        let rotated = header.replace("v1=", "v1=00ff,v1=");

        assert_eq!(
            verify_signature(SECRET, &rotated, b"body", DEFAULT_TOLERANCE_SECS, now),
            Ok(())
        );
    }
}
