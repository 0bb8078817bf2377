//! Secure byte container with guaranteed zeroing.
//!
//! Passwords, derived keys, and decrypted archive blobs all live in a
//! [`SecretBytes`] so their memory is overwritten with zeros before release,
//! on every exit path.

use std::ops::{Deref, DerefMut};
use zeroize::Zeroize;

/// An owned byte buffer that is zeroed on drop and never cloned or printed.
pub struct SecretBytes(Vec<u8>);

impl SecretBytes {
    /// Take ownership of `data`; its memory is managed securely from now on.
    pub fn new(data: Vec<u8>) -> Self {
        let secret = Self(data);
        secret.lock_memory();
        secret
    }

    /// Overwrite every byte with zero and detach the buffer.
    ///
    /// Idempotent: wiping an already-wiped buffer is a no-op. Dropping a
    /// `SecretBytes` wipes it implicitly, so calling this is only needed
    /// when the wipe must happen before the end of scope.
    pub fn wipe(&mut self) {
        self.0.zeroize();
        self.0 = Vec::new();
    }

    /// Compare against another buffer in constant time.
    ///
    /// Runs in time independent of where the first differing byte occurs
    /// (byte-wise XOR accumulation, no short-circuit). Lengths are not
    /// secret; a length mismatch returns false directly.
    pub fn ct_eq(&self, other: &SecretBytes) -> bool {
        if self.0.len() != other.0.len() {
            return false;
        }
        let mut diff = 0u8;
        for (a, b) in self.0.iter().zip(other.0.iter()) {
            diff |= a ^ b;
        }
        diff == 0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Best-effort mlock so the secret cannot be swapped to disk.
    /// May fail silently without privileges.
    #[cfg(unix)]
    fn lock_memory(&self) {
        if !self.0.is_empty() {
            unsafe {
                libc::mlock(self.0.as_ptr() as *const libc::c_void, self.0.len());
            }
        }
    }

    #[cfg(not(unix))]
    fn lock_memory(&self) {}
}

impl Deref for SecretBytes {
    type Target = [u8];

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl DerefMut for SecretBytes {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.0
    }
}

impl From<Vec<u8>> for SecretBytes {
    fn from(data: Vec<u8>) -> Self {
        Self::new(data)
    }
}

impl Drop for SecretBytes {
    fn drop(&mut self) {
        self.0.zeroize();
    }
}

// Prevent accidental debug printing of secrets.
impl std::fmt::Debug for SecretBytes {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SecretBytes")
            .field("len", &self.0.len())
            .field("data", &"[REDACTED]")
            .finish()
    }
}
