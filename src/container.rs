//! On-disk container format.
//!
//! Fixed layout, byte-exact across implementations:
//!
//! ```text
//! +---------+---------+----------+-------------+------------------+
//! | magic 7 | salt 32 | nonce 12 | length u64  | ciphertext       |
//! |         |         |          | (big-endian)| (length bytes)   |
//! +---------+---------+----------+-------------+------------------+
//! ```
//!
//! The ciphertext embeds the AES-GCM authentication tag.

use crate::config::{HEADER_SIZE, MAGIC, NONCE_SIZE, SALT_SIZE};
use crate::error::{Error, Result};

/// A decoded container: header fields plus ciphertext.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Container {
    pub salt: [u8; SALT_SIZE],
    pub nonce: [u8; NONCE_SIZE],
    pub ciphertext: Vec<u8>,
}

impl Container {
    /// Serialize to the on-disk byte layout.
    pub fn encode(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(HEADER_SIZE + self.ciphertext.len());
        out.extend_from_slice(&MAGIC);
        out.extend_from_slice(&self.salt);
        out.extend_from_slice(&self.nonce);
        out.extend_from_slice(&(self.ciphertext.len() as u64).to_be_bytes());
        out.extend_from_slice(&self.ciphertext);
        out
    }

    /// Parse the on-disk byte layout.
    ///
    /// Rejects inputs shorter than the fixed header, with a wrong magic,
    /// or whose declared ciphertext length does not match the trailing
    /// byte count.
    pub fn decode(data: &[u8]) -> Result<Self> {
        if data.len() < HEADER_SIZE {
            return Err(Error::Format(
                "too small to be a valid encrypted file".to_string(),
            ));
        }

        if data[..MAGIC.len()] != MAGIC {
            return Err(Error::Format("not a valid .cloak file".to_string()));
        }

        let mut offset = MAGIC.len();

        let mut salt = [0u8; SALT_SIZE];
        salt.copy_from_slice(&data[offset..offset + SALT_SIZE]);
        offset += SALT_SIZE;

        let mut nonce = [0u8; NONCE_SIZE];
        nonce.copy_from_slice(&data[offset..offset + NONCE_SIZE]);
        offset += NONCE_SIZE;

        let mut len_bytes = [0u8; 8];
        len_bytes.copy_from_slice(&data[offset..offset + 8]);
        let expected_len = u64::from_be_bytes(len_bytes);
        offset += 8;

        let ciphertext = &data[offset..];
        if ciphertext.len() as u64 != expected_len {
            return Err(Error::Format(
                "size mismatch, file may be corrupted".to_string(),
            ));
        }

        Ok(Self {
            salt,
            nonce,
            ciphertext: ciphertext.to_vec(),
        })
    }
}
