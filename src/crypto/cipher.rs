//! AES-256-GCM authenticated encryption.
//!
//! The 16-byte authentication tag is appended to the ciphertext by the
//! cipher, so `ciphertext.len() == plaintext.len() + 16`. The nonce is
//! supplied by the caller and stored in the container header; it must
//! never be reused under the same key.

use crate::config::NONCE_SIZE;
use crate::error::{Error, Result};
use aes_gcm::aead::Aead;
use aes_gcm::{Aes256Gcm, KeyInit, Nonce};
use rand::RngCore;

/// Authentication tag size (128 bits).
pub const TAG_SIZE: usize = 16;

/// Generate a fresh random nonce from the thread-local CSPRNG.
pub fn generate_nonce() -> [u8; NONCE_SIZE] {
    let mut nonce = [0u8; NONCE_SIZE];
    rand::thread_rng().fill_bytes(&mut nonce);
    nonce
}

/// Encrypt `plaintext` under a 32-byte key and 12-byte nonce.
pub fn encrypt(plaintext: &[u8], key: &[u8], nonce: &[u8; NONCE_SIZE]) -> Result<Vec<u8>> {
    let cipher =
        Aes256Gcm::new_from_slice(key).map_err(|e| Error::Encryption(e.to_string()))?;

    cipher
        .encrypt(Nonce::from_slice(nonce), plaintext)
        .map_err(|e| Error::Encryption(e.to_string()))
}

/// Decrypt and authenticate `ciphertext`.
///
/// Fails closed: any tampering with the ciphertext, or a key derived from
/// the wrong password, yields [`Error::Authentication`] and never a partial
/// plaintext. Wrong key and corrupted data are deliberately
/// indistinguishable.
pub fn decrypt(ciphertext: &[u8], key: &[u8], nonce: &[u8; NONCE_SIZE]) -> Result<Vec<u8>> {
    if ciphertext.len() < TAG_SIZE {
        return Err(Error::Authentication);
    }

    let cipher = Aes256Gcm::new_from_slice(key).map_err(|_| Error::Authentication)?;

    cipher
        .decrypt(Nonce::from_slice(nonce), ciphertext)
        .map_err(|_| Error::Authentication)
}
