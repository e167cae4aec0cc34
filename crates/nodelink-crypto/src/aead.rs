//! # Authenticated Encryption
//!
//! AES-256-GCM with a fresh random 96-bit IV per call.
//!
//! The GCM tag travels separately from the ciphertext on the wire, so
//! `encrypt` splits it off the sealed output and `decrypt` reattaches it
//! before opening.

use crate::keys::SymmetricKey;
use crate::CryptoError;
use aes_gcm::{
    aead::{Aead, KeyInit},
    Aes256Gcm, Nonce,
};

/// GCM IV size in bytes (96-bit).
pub const IV_SIZE: usize = 12;

/// GCM authentication tag size in bytes.
pub const TAG_SIZE: usize = 16;

/// Encrypt plaintext with AES-256-GCM.
///
/// Returns (ciphertext, iv, tag). The IV is freshly random per call and
/// must never repeat for a given key.
///
/// # Errors
///
/// Returns `CryptoError::EncryptionFailed` if encryption fails.
pub fn encrypt(
    plaintext: &[u8],
    key: &SymmetricKey,
) -> Result<(Vec<u8>, [u8; IV_SIZE], [u8; TAG_SIZE]), CryptoError> {
    let cipher = Aes256Gcm::new(key.as_bytes().into());

    let mut iv = [0u8; IV_SIZE];
    rand::RngCore::fill_bytes(&mut rand::thread_rng(), &mut iv);

    let mut sealed = cipher
        .encrypt(Nonce::from_slice(&iv), plaintext)
        .map_err(|e| CryptoError::EncryptionFailed(e.to_string()))?;

    // The aead API appends the tag to the ciphertext; split it back out.
    let boundary = sealed.len() - TAG_SIZE;
    let tag: [u8; TAG_SIZE] = sealed[boundary..]
        .try_into()
        .map_err(|_| CryptoError::EncryptionFailed("tag extraction".to_string()))?;
    sealed.truncate(boundary);

    Ok((sealed, iv, tag))
}

/// Decrypt ciphertext with AES-256-GCM.
///
/// # Errors
///
/// Returns `CryptoError::DecryptionFailed` if the tag fails to
/// authenticate. No plaintext is ever returned on failure.
pub fn decrypt(
    ciphertext: &[u8],
    key: &SymmetricKey,
    iv: &[u8; IV_SIZE],
    tag: &[u8; TAG_SIZE],
) -> Result<Vec<u8>, CryptoError> {
    let cipher = Aes256Gcm::new(key.as_bytes().into());

    let mut sealed = Vec::with_capacity(ciphertext.len() + TAG_SIZE);
    sealed.extend_from_slice(ciphertext);
    sealed.extend_from_slice(tag);

    cipher
        .decrypt(Nonce::from_slice(iv), sealed.as_slice())
        .map_err(|e| CryptoError::DecryptionFailed(e.to_string()))
}
