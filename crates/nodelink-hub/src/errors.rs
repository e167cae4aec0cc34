//! Hub error types.
//!
//! Every message-path error is caught at the HTTP boundary, logged, and
//! turned into a 400 response; none of them crash the hub process.

use nodelink_protocol::ProtocolError;
use nodelink_types::TagParseError;
use thiserror::Error;

/// Storage failures from the key-value port.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Underlying I/O failure
    #[error("storage I/O error: {0}")]
    Io(String),

    /// Record failed to encode or decode
    #[error("storage serialization error: {0}")]
    Serialization(String),
}

/// Hub-level errors surfaced at the service boundary.
#[derive(Debug, Error)]
pub enum HubError {
    /// Malformed or unrecognized registration input; nothing persisted
    #[error("registration rejected: {0}")]
    Registration(String),

    /// No stored credentials for the envelope recipient
    #[error("unknown recipient: {0}")]
    UnknownRecipient(String),

    /// Envelope rejected by the protocol codec
    #[error(transparent)]
    Protocol(#[from] ProtocolError),

    /// Persistence failure
    #[error(transparent)]
    Storage(#[from] StoreError),

    /// Configuration rejected at startup
    #[error("configuration error: {0}")]
    Config(String),

    /// Listener could not bind
    #[error("server bind error: {0}")]
    Bind(String),

    /// Unexpected internal failure
    #[error("internal error: {0}")]
    Internal(String),
}

impl From<TagParseError> for HubError {
    fn from(e: TagParseError) -> Self {
        HubError::Registration(e.to_string())
    }
}
