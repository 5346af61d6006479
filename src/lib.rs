//! xcrypt-rs - Atomic whole-file encryption with key confirmation.
//!
//! Encrypts or decrypts a file as a single all-or-nothing operation:
//! - MD5 digest of the key stored as a 16-byte file preamble, so a wrong
//!   key is rejected before any output exists
//! - AES-128-CTR streamed over fixed-size chunks
//! - Output staged to a temporary file and installed by one atomic rename

pub mod app;
pub mod cipher;
pub mod config;
pub mod error;
pub mod file;
pub mod keytag;
pub mod pipeline;
pub mod secret;
pub mod staging;
pub mod types;
pub mod ui;
