//! # NodeLink Crypto - Cryptographic Engine
//!
//! Primitive operations for the NodeLink envelope protocol.
//!
//! | Module | Algorithm | Use Case |
//! |--------|-----------|----------|
//! | `aead` | AES-256-GCM | Envelope payload encryption |
//! | `mac` | HMAC-SHA256 | Envelope signing |
//! | `kdf` | PBKDF2-HMAC-SHA256 | Session key derivation |
//! | `keys` | Ed25519 + 256-bit secrets | Key material |
//! | `credentials` | — | Node credential issuance |
//!
//! ## Security Properties
//!
//! - Fresh random 96-bit IV per encryption; IVs never repeat for a key
//! - Authentication failure never yields plaintext
//! - HMAC verification uses constant-time comparison
//! - Secret key material is zeroized on drop

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod aead;
pub mod credentials;
pub mod errors;
pub mod kdf;
pub mod keys;
pub mod mac;

// Re-exports
pub use aead::{decrypt, encrypt, IV_SIZE, TAG_SIZE};
pub use credentials::generate_credentials;
pub use errors::CryptoError;
pub use kdf::{derive_key, PBKDF2_ITERATIONS};
pub use keys::{IdentityKeyPair, SignatureKey, SymmetricKey};
pub use mac::{sign, verify};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
