//! Client error types.

use nodelink_protocol::ProtocolError;
use thiserror::Error;

/// Errors surfaced by the NodeLink client.
#[derive(Debug, Error)]
pub enum ClientError {
    /// Operation requires credentials from a prior registration
    #[error("node is not registered")]
    NotRegistered,

    /// HTTP transport failure
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The hub rejected the request
    #[error("hub rejected request ({status}): {body}")]
    Rejected {
        /// HTTP status code
        status: u16,
        /// Response body text
        body: String,
    },

    /// Credential material in the registration response was unusable
    #[error("invalid credential material: {0}")]
    InvalidCredentials(String),

    /// Envelope sealing failed
    #[error(transparent)]
    Protocol(#[from] ProtocolError),
}
