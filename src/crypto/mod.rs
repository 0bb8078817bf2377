//! Cryptographic primitives: key derivation, authenticated encryption,
//! and secret-buffer hygiene.

pub mod cipher;
pub mod kdf;
pub mod secret;

pub use secret::SecretBytes;
