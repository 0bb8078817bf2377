//! Terminal password input.

use crate::crypto::SecretBytes;
use crate::error::{Error, Result};
use crate::vault::PasswordSource;
use std::io::IsTerminal;

/// Reads passwords from the controlling terminal without echoing.
///
/// Refuses to read from piped or redirected stdin so a password is never
/// silently consumed from a non-interactive stream.
pub struct TerminalPassword;

impl PasswordSource for TerminalPassword {
    fn read_password(&mut self, prompt: &str) -> Result<SecretBytes> {
        if !std::io::stdin().is_terminal() {
            return Err(Error::NotATerminal);
        }

        let password = rpassword::prompt_password(prompt)?;
        if password.is_empty() {
            return Err(Error::EmptyPassword);
        }

        // into_bytes reuses the String's allocation, no stray copy remains.
        Ok(SecretBytes::new(password.into_bytes()))
    }
}
