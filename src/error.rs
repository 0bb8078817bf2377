//! Error types for cloak operations.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for cloak operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while encrypting or decrypting a container.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error during file operations.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Error while walking the source directory.
    #[error("directory walk error: {0}")]
    Walk(#[from] walkdir::Error),

    /// Path is not a directory.
    #[error("not a directory: {0}")]
    NotADirectory(PathBuf),

    /// Path is a directory where an encrypted file was expected.
    #[error("path is a directory, expected encrypted file: {0}")]
    NotAFile(PathBuf),

    /// Output container already exists.
    #[error("output file already exists: {0}")]
    OutputExists(PathBuf),

    /// Malformed or truncated container file.
    #[error("invalid container: {0}")]
    Format(String),

    /// Encryption error.
    #[error("encryption error: {0}")]
    Encryption(String),

    /// Wrong password or corrupted ciphertext. Deliberately does not say
    /// which, to avoid acting as a decryption oracle.
    #[error("decryption failed: invalid password or corrupted file")]
    Authentication,

    /// Key derivation error.
    #[error("key derivation error: {0}")]
    KeyDerivation(String),

    /// Archive entry whose path would escape the extraction directory.
    #[error("invalid path in archive: {0}")]
    PathTraversal(String),

    /// Archive entry serialization error.
    #[error("archive serialization error: {0}")]
    Serialization(String),

    /// Password and confirmation do not match.
    #[error("passwords do not match")]
    PasswordMismatch,

    /// Password input requires an interactive terminal.
    #[error("password input requires a terminal (stdin must be a TTY)")]
    NotATerminal,

    /// Empty password entered.
    #[error("password cannot be empty")]
    EmptyPassword,
}

impl From<bincode::Error> for Error {
    fn from(e: bincode::Error) -> Self {
        Error::Serialization(e.to_string())
    }
}
