//! Argon2id key derivation for password-based encryption.

use crate::config::{argon2_params, SALT_SIZE};
use crate::crypto::secret::SecretBytes;
use crate::error::{Error, Result};
use argon2::{Algorithm, Argon2, Params, Version};
use rand::RngCore;

/// Generate a fresh random salt from the thread-local CSPRNG.
pub fn generate_salt() -> [u8; SALT_SIZE] {
    let mut salt = [0u8; SALT_SIZE];
    rand::thread_rng().fill_bytes(&mut salt);
    salt
}

/// Derive a 256-bit key from a password and salt.
///
/// Deterministic: the same password and salt always yield the same key,
/// which is what lets decryption rebuild the key from the stored salt.
///
/// Uses Argon2id with 64 MiB memory, 3 iterations, parallelism 4.
pub fn derive_key(password: &[u8], salt: &[u8; SALT_SIZE]) -> Result<SecretBytes> {
    let params = Params::new(
        argon2_params::MEMORY_COST,
        argon2_params::TIME_COST,
        argon2_params::PARALLELISM,
        Some(argon2_params::OUTPUT_LENGTH),
    )
    .map_err(|e| Error::KeyDerivation(e.to_string()))?;

    let argon2 = Argon2::new(Algorithm::Argon2id, Version::V0x13, params);

    let mut key = SecretBytes::new(vec![0u8; argon2_params::OUTPUT_LENGTH]);
    argon2
        .hash_password_into(password, salt, &mut key)
        .map_err(|e| Error::KeyDerivation(e.to_string()))?;

    Ok(key)
}
