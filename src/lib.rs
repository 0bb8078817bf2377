//! Cloak - encrypted directory containers.
//!
//! Encrypts an entire directory tree into a single self-describing
//! `.cloak` file, and extracts it back.
//!
//! # Pipeline
//!
//! ```text
//! directory → archive (bincode + zstd) → AES-256-GCM → container file
//! ```
//!
//! The key is derived from a password with Argon2id; salt and nonce are
//! generated fresh per encryption and stored in the container header.
//! Every secret (password, key, plaintext archive) is zeroed in memory
//! on all exit paths, and extraction rejects archive entries whose paths
//! would escape the destination directory.
//!
//! # Example
//!
//! ```rust,no_run
//! use cloak::vault::{self, Silent};
//! use std::path::Path;
//!
//! # fn main() -> cloak::Result<()> {
//! let mut passwords = cloak::password::TerminalPassword;
//! let report = vault::encrypt_directory(Path::new("./my_folder"), &mut passwords, &mut Silent)?;
//! println!("wrote {}", report.output.display());
//! # Ok(())
//! # }
//! ```

pub mod archive;
pub mod config;
pub mod container;
pub mod crypto;
pub mod error;
pub mod password;
pub mod vault;

pub use error::{Error, Result};
pub use vault::{decrypt_file, encrypt_directory, DecryptReport, EncryptReport};
