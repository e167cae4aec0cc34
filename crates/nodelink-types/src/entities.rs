//! Domain entities for the NodeLink network.
//!
//! Enumerated tags are closed sets: unknown wire strings are rejected at
//! the boundary rather than carried through as open strings.

use crate::errors::TagParseError;
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Symmetric and signature keys are 256-bit.
pub const KEY_SIZE: usize = 32;

/// Ordered security clearance. Governs credential TTL and broadcast
/// eligibility: `Alpha < Bravo < Charlie < Delta`.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum SecurityLevel {
    /// Public-facing operations
    Alpha,
    /// Sensitive intelligence
    Bravo,
    /// Classified operations
    Charlie,
    /// Supreme command
    Delta,
}

impl SecurityLevel {
    /// Credential lifetime for this clearance. Higher clearance gets
    /// shorter-lived credentials.
    pub fn credential_ttl(&self) -> Duration {
        match self {
            SecurityLevel::Alpha => Duration::hours(24),
            SecurityLevel::Bravo => Duration::hours(12),
            SecurityLevel::Charlie => Duration::hours(6),
            SecurityLevel::Delta => Duration::hours(3),
        }
    }

    /// Wire string for this level.
    pub fn as_str(&self) -> &'static str {
        match self {
            SecurityLevel::Alpha => "alpha",
            SecurityLevel::Bravo => "bravo",
            SecurityLevel::Charlie => "charlie",
            SecurityLevel::Delta => "delta",
        }
    }
}

impl fmt::Display for SecurityLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SecurityLevel {
    type Err = TagParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "alpha" => Ok(SecurityLevel::Alpha),
            "bravo" => Ok(SecurityLevel::Bravo),
            "charlie" => Ok(SecurityLevel::Charlie),
            "delta" => Ok(SecurityLevel::Delta),
            other => Err(TagParseError::SecurityLevel(other.to_string())),
        }
    }
}

/// Message type tag. Drives hub dispatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MessageType {
    /// Liveness signal; refreshes the sender's `last_seen`
    Heartbeat,
    /// Intelligence report, forwarded to the fusion collaborator
    IntelReport,
    /// Mission directive
    MissionDirective,
    /// Status update
    StatusUpdate,
    /// Emergency burn trigger, forwarded to the burn collaborator
    EmergencyBurn,
    /// Node registration announcement
    NodeRegistration,
    /// Threat alert, broadcast to high-clearance nodes
    ThreatAlert,
    /// Tactical update
    TacticalUpdate,
}

impl MessageType {
    /// Wire string for this message type.
    pub fn as_str(&self) -> &'static str {
        match self {
            MessageType::Heartbeat => "heartbeat",
            MessageType::IntelReport => "intel_report",
            MessageType::MissionDirective => "mission_directive",
            MessageType::StatusUpdate => "status_update",
            MessageType::EmergencyBurn => "emergency_burn",
            MessageType::NodeRegistration => "node_registration",
            MessageType::ThreatAlert => "threat_alert",
            MessageType::TacticalUpdate => "tactical_update",
        }
    }
}

impl fmt::Display for MessageType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MessageType {
    type Err = TagParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "heartbeat" => Ok(MessageType::Heartbeat),
            "intel_report" => Ok(MessageType::IntelReport),
            "mission_directive" => Ok(MessageType::MissionDirective),
            "status_update" => Ok(MessageType::StatusUpdate),
            "emergency_burn" => Ok(MessageType::EmergencyBurn),
            "node_registration" => Ok(MessageType::NodeRegistration),
            "threat_alert" => Ok(MessageType::ThreatAlert),
            "tactical_update" => Ok(MessageType::TacticalUpdate),
            other => Err(TagParseError::MessageType(other.to_string())),
        }
    }
}

/// Node role. Descriptive only at this layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeRole {
    /// Command node
    Command,
    /// Field operator
    Operator,
    /// Traffic relay
    Relay,
    /// Passive observer
    Observer,
}

impl NodeRole {
    /// Wire string for this role.
    pub fn as_str(&self) -> &'static str {
        match self {
            NodeRole::Command => "command",
            NodeRole::Operator => "operator",
            NodeRole::Relay => "relay",
            NodeRole::Observer => "observer",
        }
    }
}

impl fmt::Display for NodeRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for NodeRole {
    type Err = TagParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "command" => Ok(NodeRole::Command),
            "operator" => Ok(NodeRole::Operator),
            "relay" => Ok(NodeRole::Relay),
            "observer" => Ok(NodeRole::Observer),
            other => Err(TagParseError::NodeRole(other.to_string())),
        }
    }
}

/// Complete cryptographic credentials for a node.
///
/// The symmetric key encrypts envelope payloads and the signature key
/// authenticates them. The identity keypair is issued alongside but is
/// not consumed by the message paths; the hub retains the private half.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NodeCredentials {
    /// Owning node id
    pub node_id: String,
    /// Public half of the identity keypair
    pub public_key: Vec<u8>,
    /// Private half of the identity keypair. Empty on the client side:
    /// the hub never releases it.
    pub private_key: Vec<u8>,
    /// 256-bit AEAD key
    pub symmetric_key: [u8; KEY_SIZE],
    /// 256-bit HMAC key
    pub signature_key: [u8; KEY_SIZE],
    /// Monotonic key version, starts at 1
    pub key_version: u32,
    /// Expiry instant; strictly in the future at issuance
    pub expiry: DateTime<Utc>,
    /// Clearance the credentials were issued under
    pub security_clearance: SecurityLevel,
}

impl NodeCredentials {
    /// True once the expiry instant has passed.
    pub fn is_expired(&self) -> bool {
        Utc::now() >= self.expiry
    }
}

/// Registry entry for a known node.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NetworkNode {
    /// Unique node id
    pub node_id: String,
    /// Human-readable codename
    pub codename: String,
    /// Declared role
    pub role: NodeRole,
    /// Network endpoint the node reports for itself
    pub endpoint: String,
    /// Public half of the node's identity keypair
    pub public_key: Vec<u8>,
    /// Last heartbeat or registration instant
    pub last_seen: DateTime<Utc>,
    /// Status string; "active" after registration
    pub status: String,
    /// Clearance level
    pub security_level: SecurityLevel,
    /// Declared capabilities
    pub capabilities: Vec<String>,
    /// Trust score in [0, 1]; initialized to 1.0
    pub trust_score: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clearance_ordering() {
        assert!(SecurityLevel::Alpha < SecurityLevel::Bravo);
        assert!(SecurityLevel::Bravo < SecurityLevel::Charlie);
        assert!(SecurityLevel::Charlie < SecurityLevel::Delta);
    }

    #[test]
    fn test_higher_clearance_shorter_ttl() {
        assert!(
            SecurityLevel::Delta.credential_ttl() < SecurityLevel::Alpha.credential_ttl()
        );
        assert_eq!(SecurityLevel::Bravo.credential_ttl(), Duration::hours(12));
    }

    #[test]
    fn test_tag_round_trip() {
        for s in ["alpha", "bravo", "charlie", "delta"] {
            assert_eq!(s.parse::<SecurityLevel>().unwrap().as_str(), s);
        }
        for s in ["heartbeat", "threat_alert", "emergency_burn"] {
            assert_eq!(s.parse::<MessageType>().unwrap().as_str(), s);
        }
        for s in ["command", "operator", "relay", "observer"] {
            assert_eq!(s.parse::<NodeRole>().unwrap().as_str(), s);
        }
    }

    #[test]
    fn test_unknown_tags_rejected() {
        assert!("omega".parse::<SecurityLevel>().is_err());
        assert!("gossip".parse::<MessageType>().is_err());
        assert!("admiral".parse::<NodeRole>().is_err());
    }

    #[test]
    fn test_serde_wire_strings() {
        let json = serde_json::to_string(&MessageType::IntelReport).unwrap();
        assert_eq!(json, "\"intel_report\"");
        let level: SecurityLevel = serde_json::from_str("\"charlie\"").unwrap();
        assert_eq!(level, SecurityLevel::Charlie);
    }
}
