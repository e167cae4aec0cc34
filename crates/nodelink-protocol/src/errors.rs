//! Protocol error types.

use nodelink_crypto::CryptoError;
use thiserror::Error;

/// Envelope sealing/opening errors.
#[derive(Debug, Error)]
pub enum ProtocolError {
    /// Message id already processed
    #[error("duplicate message id {0}")]
    Replay(String),

    /// Envelope timestamp older than the freshness window
    #[error("message too old: {age_secs}s exceeds {max_age}s")]
    Stale {
        /// Observed envelope age in seconds
        age_secs: i64,
        /// Maximum accepted age in seconds
        max_age: i64,
    },

    /// AEAD tag rejected the ciphertext
    #[error("payload decryption rejected")]
    Decryption(#[source] CryptoError),

    /// HMAC over the canonical bytes did not verify
    #[error("signature verification failed")]
    Signature,

    /// Envelope field failed to decode or parse
    #[error("malformed envelope: {0}")]
    Malformed(String),

    /// Underlying cryptographic failure while sealing
    #[error(transparent)]
    Crypto(#[from] CryptoError),
}
