//! Key prompts for when no key is supplied on the command line.

use anyhow::{Context, Result};
use inquire::validator::MinLengthValidator;
use inquire::{Password, PasswordDisplayMode};

use crate::config::MIN_KEY_LEN;

/// Prompts for an encryption key with confirmation.
///
/// A typo in an encryption key silently produces an undecryptable file, so
/// the key must be entered twice.
pub fn encryption_key() -> Result<String> {
    Password::new("Encryption key:")
        .with_display_mode(PasswordDisplayMode::Masked)
        .with_validator(MinLengthValidator::new(MIN_KEY_LEN))
        .with_custom_confirmation_message("Confirm key:")
        .prompt()
        .context("key input failed")
}

/// Prompts for a decryption key without confirmation.
///
/// A wrong key is caught by the file's confirmation tag instead.
pub fn decryption_key() -> Result<String> {
    Password::new("Decryption key:")
        .with_display_mode(PasswordDisplayMode::Masked)
        .with_validator(MinLengthValidator::new(MIN_KEY_LEN))
        .without_confirmation()
        .prompt()
        .context("key input failed")
}
