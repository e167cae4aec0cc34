//! # Key Derivation
//!
//! PBKDF2-HMAC-SHA256 for deriving session keys from a shared secret.

use crate::keys::SymmetricKey;
use crate::CryptoError;
use hmac::Hmac;
use nodelink_types::KEY_SIZE;
use sha2::Sha256;

/// PBKDF2 iteration count.
pub const PBKDF2_ITERATIONS: u32 = 100_000;

/// Derive a 256-bit session key from a shared secret and salt.
///
/// # Errors
///
/// Returns `CryptoError::KeyDerivationFailed` if the KDF rejects its
/// parameters.
pub fn derive_key(secret: &[u8], salt: &[u8]) -> Result<SymmetricKey, CryptoError> {
    let mut output = [0u8; KEY_SIZE];
    pbkdf2::pbkdf2::<Hmac<Sha256>>(secret, salt, PBKDF2_ITERATIONS, &mut output)
        .map_err(|e| CryptoError::KeyDerivationFailed(e.to_string()))?;
    Ok(SymmetricKey::from_bytes(output))
}
