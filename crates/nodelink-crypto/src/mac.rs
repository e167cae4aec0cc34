//! # Message Signing
//!
//! HMAC-SHA256 signatures over canonical message bytes. Verification uses
//! constant-time comparison.

use crate::keys::SignatureKey;
use hmac::{Hmac, Mac};
use sha2::Sha256;

type HmacSha256 = Hmac<Sha256>;

/// Sign message bytes with HMAC-SHA256. Returns the hex-encoded digest.
pub fn sign(message: &[u8], key: &SignatureKey) -> String {
    let mut mac =
        HmacSha256::new_from_slice(key.as_bytes()).expect("HMAC can take key of any size");
    mac.update(message);
    hex::encode(mac.finalize().into_bytes())
}

/// Verify a hex-encoded HMAC-SHA256 signature.
///
/// Returns `false` for malformed hex as well as for digest mismatch; the
/// digest comparison itself is constant-time.
pub fn verify(message: &[u8], signature_hex: &str, key: &SignatureKey) -> bool {
    let Ok(signature) = hex::decode(signature_hex) else {
        return false;
    };

    let mut mac =
        HmacSha256::new_from_slice(key.as_bytes()).expect("HMAC can take key of any size");
    mac.update(message);
    mac.verify_slice(&signature).is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sign_verify() {
        let key = SignatureKey::generate();
        let message = b"canonical record bytes";

        let signature = sign(message, &key);
        assert!(verify(message, &signature, &key));
    }

    #[test]
    fn test_wrong_key_rejected() {
        let key1 = SignatureKey::generate();
        let key2 = SignatureKey::generate();

        let signature = sign(b"message", &key1);
        assert!(!verify(b"message", &signature, &key2));
    }

    #[test]
    fn test_tampered_message_rejected() {
        let key = SignatureKey::generate();

        let signature = sign(b"message", &key);
        assert!(!verify(b"Message", &signature, &key));
    }

    #[test]
    fn test_malformed_hex_rejected() {
        let key = SignatureKey::generate();
        assert!(!verify(b"message", "not-hex", &key));
        assert!(!verify(b"message", "", &key));
    }

    #[test]
    fn test_signature_is_hex_sha256() {
        let key = SignatureKey::generate();
        let signature = sign(b"message", &key);
        assert_eq!(signature.len(), 64);
        assert!(signature.chars().all(|c| c.is_ascii_hexdigit()));
    }
}
