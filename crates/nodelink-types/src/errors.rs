//! Parse errors for closed tag sets.

use thiserror::Error;

/// Failure to parse a closed tag value from its wire string.
#[derive(Debug, Clone, Error)]
pub enum TagParseError {
    /// Unrecognized security level string
    #[error("unrecognized security level: {0}")]
    SecurityLevel(String),

    /// Unrecognized message type string
    #[error("unrecognized message type: {0}")]
    MessageType(String),

    /// Unrecognized node role string
    #[error("unrecognized node role: {0}")]
    NodeRole(String),
}
