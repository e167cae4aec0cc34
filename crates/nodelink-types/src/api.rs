//! HTTP request/response payloads for the hub surface.
//!
//! Role and clearance arrive as open strings and are parsed into their
//! closed tag types at the hub boundary, so a malformed value rejects the
//! whole request before any state is touched.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Body of `POST /api/register`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterRequest {
    /// Unique node id
    pub node_id: String,
    /// Human-readable codename
    pub codename: String,
    /// Role tag, parsed at the boundary
    pub role: String,
    /// Endpoint the node reports for itself
    pub endpoint: String,
    /// Clearance tag, parsed at the boundary
    pub security_level: String,
    /// Declared capabilities
    #[serde(default)]
    pub capabilities: Vec<String>,
}

/// Successful response of `POST /api/register`.
///
/// Carries only the credential material the node needs; the identity
/// private key stays on the hub.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegistrationResponse {
    /// Always "registered"
    pub status: String,
    /// Echoed node id
    pub node_id: String,
    /// Base64 identity public key
    pub public_key: String,
    /// Base64 256-bit AEAD key
    pub symmetric_key: String,
    /// Base64 256-bit HMAC key
    pub signature_key: String,
    /// Credential key version
    pub key_version: u32,
    /// RFC 3339 credential expiry
    pub expiry: DateTime<Utc>,
}

/// Successful response of `POST /api/message`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageAck {
    /// Always "message_processed"
    pub status: String,
}

impl MessageAck {
    /// The ack emitted for every successfully processed envelope.
    pub fn processed() -> Self {
        Self {
            status: "message_processed".to_string(),
        }
    }
}

/// Response of `GET /api/status`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusResponse {
    /// Always "operational"
    pub status: String,
    /// Registered node count
    pub active_nodes: usize,
    /// Snapshot instant
    pub timestamp: DateTime<Utc>,
    /// Coarse health indicator
    pub system_health: String,
}
