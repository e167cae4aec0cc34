//! Envelope sealing and opening.

use crate::errors::ProtocolError;
use crate::replay::ReplayCache;
use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use chrono::{DateTime, Utc};
use nodelink_crypto::{
    aead, mac, SignatureKey, SymmetricKey, IV_SIZE, TAG_SIZE,
};
use nodelink_types::{
    Envelope, MessageType, NodeCredentials, SecureMessage, SecurityLevel, PROTOCOL_VERSION,
};
use serde::{Deserialize, Serialize};
use tracing::warn;
use uuid::Uuid;

/// Maximum accepted envelope age in seconds.
pub const MESSAGE_MAX_AGE_SECS: i64 = 300;

/// The canonical record that gets encrypted and signed.
///
/// Field order is fixed by the struct definition, so serializing it
/// yields the same canonical bytes on both ends.
#[derive(Debug, Serialize, Deserialize)]
struct CanonicalRecord {
    message_id: String,
    sender_id: String,
    recipient_id: String,
    message_type: MessageType,
    security_level: SecurityLevel,
    timestamp: DateTime<Utc>,
    payload: serde_json::Map<String, serde_json::Value>,
}

/// Envelope codec with replay/staleness enforcement.
///
/// `seal` is stateless; `open` consults and updates the replay cache, so
/// one codec instance must be shared across everything that receives for
/// the same endpoint.
#[derive(Debug, Default)]
pub struct ProtocolCodec {
    replay: ReplayCache,
}

impl ProtocolCodec {
    /// Creates a codec with an empty replay cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Read access to the replay cache (for status/introspection).
    pub fn replay_cache(&self) -> &ReplayCache {
        &self.replay
    }

    /// Build a signed, encrypted envelope from the sender's credentials.
    ///
    /// The canonical record is encrypted with the sender's symmetric key
    /// and signed (pre-encryption) with the sender's signature key.
    pub fn seal(
        &self,
        sender: &NodeCredentials,
        recipient_id: &str,
        message_type: MessageType,
        payload: serde_json::Map<String, serde_json::Value>,
        security_level: SecurityLevel,
    ) -> Result<Envelope, ProtocolError> {
        let record = CanonicalRecord {
            message_id: Uuid::new_v4().simple().to_string(),
            sender_id: sender.node_id.clone(),
            recipient_id: recipient_id.to_string(),
            message_type,
            security_level,
            timestamp: Utc::now(),
            payload,
        };

        let canonical = serde_json::to_vec(&record)
            .map_err(|e| ProtocolError::Malformed(e.to_string()))?;

        let symmetric_key = SymmetricKey::from_bytes(sender.symmetric_key);
        let (ciphertext, iv, tag) = aead::encrypt(&canonical, &symmetric_key)?;

        let signature_key = SignatureKey::from_bytes(sender.signature_key);
        let signature = mac::sign(&canonical, &signature_key);

        Ok(Envelope {
            message_id: record.message_id,
            sender_id: record.sender_id,
            recipient_id: record.recipient_id,
            encrypted_payload: BASE64.encode(ciphertext),
            iv: BASE64.encode(iv),
            tag: BASE64.encode(tag),
            signature,
            timestamp: record.timestamp,
            security_level,
            protocol_version: PROTOCOL_VERSION.to_string(),
        })
    }

    /// Decrypt and validate an envelope with the recipient's credentials.
    ///
    /// Rejection conditions, in order: replayed message id, stale
    /// timestamp, AEAD authentication failure, HMAC mismatch. On success
    /// the message id joins the replay cache.
    pub fn open(
        &self,
        envelope: &Envelope,
        recipient: &NodeCredentials,
    ) -> Result<SecureMessage, ProtocolError> {
        if self.replay.contains(&envelope.message_id) {
            warn!(message_id = %envelope.message_id, "replay attack detected");
            return Err(ProtocolError::Replay(envelope.message_id.clone()));
        }

        let age_secs = (Utc::now() - envelope.timestamp).num_seconds();
        if age_secs > MESSAGE_MAX_AGE_SECS {
            warn!(
                message_id = %envelope.message_id,
                age_secs, "stale message rejected"
            );
            return Err(ProtocolError::Stale {
                age_secs,
                max_age: MESSAGE_MAX_AGE_SECS,
            });
        }

        let ciphertext = BASE64
            .decode(&envelope.encrypted_payload)
            .map_err(|e| ProtocolError::Malformed(format!("encrypted_payload: {e}")))?;
        let iv: [u8; IV_SIZE] = BASE64
            .decode(&envelope.iv)
            .ok()
            .and_then(|b| b.try_into().ok())
            .ok_or_else(|| ProtocolError::Malformed("iv".to_string()))?;
        let tag: [u8; TAG_SIZE] = BASE64
            .decode(&envelope.tag)
            .ok()
            .and_then(|b| b.try_into().ok())
            .ok_or_else(|| ProtocolError::Malformed("tag".to_string()))?;

        let symmetric_key = SymmetricKey::from_bytes(recipient.symmetric_key);
        let canonical = aead::decrypt(&ciphertext, &symmetric_key, &iv, &tag)
            .map_err(ProtocolError::Decryption)?;

        let signature_key = SignatureKey::from_bytes(recipient.signature_key);
        if !mac::verify(&canonical, &envelope.signature, &signature_key) {
            warn!(message_id = %envelope.message_id, "signature verification failed");
            return Err(ProtocolError::Signature);
        }

        let record: CanonicalRecord = serde_json::from_slice(&canonical)
            .map_err(|e| ProtocolError::Malformed(format!("canonical record: {e}")))?;

        self.replay.record(envelope.message_id.clone());

        Ok(SecureMessage {
            message_id: record.message_id,
            sender_id: record.sender_id,
            recipient_id: record.recipient_id,
            message_type: record.message_type,
            security_level: record.security_level,
            timestamp: record.timestamp,
            payload: record.payload,
            signature: Some(envelope.signature.clone()),
            encryption_method: "AES-256-GCM".to_string(),
        })
    }
}
