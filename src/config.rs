//! Configuration constants for the cloak container format.
//!
//! All values are fixed at build time; changing any of them breaks
//! compatibility with existing `.cloak` files.

/// Magic bytes identifying the file format and version: "CLOAK01".
pub const MAGIC: [u8; 7] = *b"CLOAK01";

/// Salt length in bytes for Argon2id (256-bit).
pub const SALT_SIZE: usize = 32;

/// Nonce length in bytes for AES-GCM (96-bit).
pub const NONCE_SIZE: usize = 12;

/// Encryption key length in bytes (256-bit for AES-256).
pub const KEY_SIZE: usize = 32;

/// Fixed container header size: magic + salt + nonce + ciphertext length.
pub const HEADER_SIZE: usize = MAGIC.len() + SALT_SIZE + NONCE_SIZE + 8;

/// Extension appended to the source directory path to name the container.
pub const CONTAINER_EXTENSION: &str = ".cloak";

/// Zstd compression level applied to the archive blob before encryption.
pub const COMPRESSION_LEVEL: i32 = 3;

/// Argon2id parameters for key derivation (OWASP recommendations).
pub mod argon2_params {
    /// Memory cost in KiB (64 MiB).
    pub const MEMORY_COST: u32 = 65536;

    /// Time cost (iterations).
    pub const TIME_COST: u32 = 3;

    /// Parallelism factor.
    pub const PARALLELISM: u32 = 4;

    /// Output length in bytes (256 bits).
    pub const OUTPUT_LENGTH: usize = super::KEY_SIZE;
}
