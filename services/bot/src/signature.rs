//! Webhook signature verification
//!
//! LINE signs each webhook delivery with HMAC-SHA256 over the raw request
//! body, keyed by the channel secret and base64-encoded into the
//! `x-line-signature` header.

use base64::{Engine as _, engine::general_purpose::STANDARD};

/// Verify an inbound webhook signature against the channel secret
pub fn verify(channel_secret: &str, body: &[u8], signature: &str) -> bool {
    let mac = hmac_sha256::HMAC::mac(body, channel_secret.as_bytes());
    STANDARD.encode(mac) == signature
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_matching_signature() {
        let secret = "test-channel-secret";
        let body = br#"{"events":[]}"#;
        let expected = STANDARD.encode(hmac_sha256::HMAC::mac(body, secret.as_bytes()));

        assert!(verify(secret, body, &expected));
    }

    #[test]
    fn rejects_wrong_signature() {
        assert!(!verify("secret", b"body", "bm90IGEgcmVhbCBzaWduYXR1cmU="));
        assert!(!verify("secret", b"body", ""));
    }

    #[test]
    fn rejects_signature_for_different_body() {
        let secret = "secret";
        let good = STANDARD.encode(hmac_sha256::HMAC::mac(b"body-a", secret.as_bytes()));
        assert!(!verify(secret, b"body-b", &good));
    }

    #[test]
    fn rejects_signature_under_different_secret() {
        let good = STANDARD.encode(hmac_sha256::HMAC::mac(b"body", b"secret-a"));
        assert!(!verify("secret-b", b"body", &good));
    }
}
