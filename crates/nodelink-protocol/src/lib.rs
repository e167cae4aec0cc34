//! # NodeLink Protocol - Envelope Codec
//!
//! Builds and parses the signed, encrypted message envelopes exchanged
//! between nodes and the hub, and owns the replay/staleness policy.
//!
//! ## Verification Order
//!
//! `open` checks, in this order: replay, staleness, AEAD authentication,
//! HMAC signature. The first failing check rejects the envelope; a
//! message id is only recorded against replays after every check passes.
//!
//! ## Replay Policy
//!
//! The replay cache is a coarse, non-time-windowed set: once it exceeds
//! 1000 tracked ids it is cleared entirely.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod codec;
pub mod errors;
pub mod replay;

pub use codec::{ProtocolCodec, MESSAGE_MAX_AGE_SECS};
pub use errors::ProtocolError;
pub use replay::{ReplayCache, MAX_TRACKED_MESSAGES};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
