//! Wire envelope and decrypted message forms.

use crate::entities::{MessageType, SecurityLevel};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Envelope protocol version emitted by this implementation.
pub const PROTOCOL_VERSION: &str = "1.0";

fn default_encryption_method() -> String {
    "AES-256-GCM".to_string()
}

/// A decrypted, validated message.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SecureMessage {
    /// Unique 128-bit id, rendered as 32 hex chars
    pub message_id: String,
    /// Sending node id
    pub sender_id: String,
    /// Receiving node id
    pub recipient_id: String,
    /// Message type tag
    pub message_type: MessageType,
    /// Clearance the message was sent under
    pub security_level: SecurityLevel,
    /// Sender-side creation instant
    pub timestamp: DateTime<Utc>,
    /// Open key-value payload
    pub payload: serde_json::Map<String, serde_json::Value>,
    /// Hex HMAC signature carried from the envelope, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub signature: Option<String>,
    /// Cipher the payload was protected with
    #[serde(default = "default_encryption_method")]
    pub encryption_method: String,
}

/// The encrypted wire form of a message.
///
/// Ciphertext, IV, and AEAD tag are base64; the HMAC signature is hex.
/// The remaining fields travel as plaintext metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Envelope {
    /// Unique 128-bit id, rendered as 32 hex chars
    pub message_id: String,
    /// Sending node id
    pub sender_id: String,
    /// Receiving node id
    pub recipient_id: String,
    /// Base64 AES-256-GCM ciphertext of the canonical record
    pub encrypted_payload: String,
    /// Base64 96-bit IV, fresh per envelope
    pub iv: String,
    /// Base64 128-bit AEAD tag
    pub tag: String,
    /// Hex HMAC-SHA256 over the canonical record bytes
    pub signature: String,
    /// RFC 3339 creation instant
    pub timestamp: DateTime<Utc>,
    /// Clearance the message was sent under
    pub security_level: SecurityLevel,
    /// Envelope format version
    pub protocol_version: String,
}
