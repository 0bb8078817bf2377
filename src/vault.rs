//! Orchestration of the two top-level operations: encrypting a directory
//! into a container and decrypting a container back into a tree.

use crate::archive;
use crate::config::CONTAINER_EXTENSION;
use crate::container::Container;
use crate::crypto::{cipher, kdf, SecretBytes};
use crate::error::{Error, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// Supplies passwords to the orchestrator.
///
/// Implementations must not retain the returned buffer; ownership passes
/// to the caller, which wipes it.
pub trait PasswordSource {
    fn read_password(&mut self, prompt: &str) -> Result<SecretBytes>;
}

/// Receives coarse stage notifications during long operations.
pub trait Progress {
    fn stage(&mut self, message: &str);
}

/// A [`Progress`] sink that discards all notifications.
pub struct Silent;

impl Progress for Silent {
    fn stage(&mut self, _message: &str) {}
}

/// Outcome of a successful encryption.
#[derive(Debug)]
pub struct EncryptReport {
    /// Path of the written container file.
    pub output: PathBuf,
    /// Compressed archive size before encryption, in bytes.
    pub archive_size: usize,
    /// Ciphertext size (archive + authentication tag), in bytes.
    pub ciphertext_size: usize,
}

/// Outcome of a successful decryption.
#[derive(Debug)]
pub struct DecryptReport {
    /// Directory the tree was extracted into.
    pub output_dir: PathBuf,
}

/// Lexically absolutize a path, dropping trailing separators and `.`
/// segments. No filesystem access.
fn absolutize(path: &Path) -> Result<PathBuf> {
    let abs = if path.is_absolute() {
        path.to_path_buf()
    } else {
        std::env::current_dir()?.join(path)
    };
    Ok(abs.components().collect())
}

/// Encrypt the directory at `path` into `<path>.cloak` next to it.
///
/// Obtains a password and a confirmation from `passwords` (compared in
/// constant time), archives the tree, derives a key from a fresh salt,
/// encrypts under a fresh nonce, and writes the container. Refuses to
/// overwrite an existing container. The plaintext archive, the password
/// buffers, and the derived key are wiped on every exit path.
pub fn encrypt_directory(
    path: &Path,
    passwords: &mut dyn PasswordSource,
    progress: &mut dyn Progress,
) -> Result<EncryptReport> {
    let metadata = fs::metadata(path)?;
    if !metadata.is_dir() {
        return Err(Error::NotADirectory(path.to_path_buf()));
    }

    let source = absolutize(path)?;
    let mut output = source.clone().into_os_string();
    output.push(CONTAINER_EXTENSION);
    let output = PathBuf::from(output);

    if output.exists() {
        return Err(Error::OutputExists(output));
    }

    let password = passwords.read_password("Enter encryption password: ")?;
    let confirm = passwords.read_password("Confirm password: ")?;
    if !password.ct_eq(&confirm) {
        return Err(Error::PasswordMismatch);
    }
    drop(confirm);

    progress.stage("Archiving directory...");
    let mut blob = SecretBytes::new(archive::archive_directory(&source)?);
    let archive_size = blob.len();

    let salt = kdf::generate_salt();
    let nonce = cipher::generate_nonce();

    progress.stage("Deriving encryption key (this may take a moment)...");
    let key = kdf::derive_key(&password, &salt)?;

    progress.stage("Encrypting data...");
    let ciphertext = cipher::encrypt(&blob, &key, &nonce)?;
    blob.wipe();

    let container = Container {
        salt,
        nonce,
        ciphertext,
    };
    let ciphertext_size = container.ciphertext.len();
    fs::write(&output, container.encode())?;

    Ok(EncryptReport {
        output,
        archive_size,
        ciphertext_size,
    })
}

/// Decrypt the container at `path` and extract the tree into the
/// container's parent directory.
///
/// The key is rebuilt from the stored salt; an authentication failure is
/// surfaced verbatim and extraction is never attempted on unauthenticated
/// data. The decrypted archive and the derived key are wiped on every
/// exit path.
pub fn decrypt_file(
    path: &Path,
    passwords: &mut dyn PasswordSource,
    progress: &mut dyn Progress,
) -> Result<DecryptReport> {
    let metadata = fs::metadata(path)?;
    if metadata.is_dir() {
        return Err(Error::NotAFile(path.to_path_buf()));
    }

    let data = fs::read(path)?;
    let container = Container::decode(&data)?;

    let password = passwords.read_password("Enter decryption password: ")?;

    progress.stage("Deriving decryption key (this may take a moment)...");
    let key = kdf::derive_key(&password, &container.salt)?;

    progress.stage("Decrypting data...");
    let mut blob = SecretBytes::new(cipher::decrypt(
        &container.ciphertext,
        &key,
        &container.nonce,
    )?);

    let source = absolutize(path)?;
    let output_dir = source
        .parent()
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from("/"));

    progress.stage("Extracting files...");
    let result = archive::extract(&blob, &output_dir);
    blob.wipe();
    result?;

    Ok(DecryptReport { output_dir })
}
