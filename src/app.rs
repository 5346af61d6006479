//! Host-integration layer: argument parsing, key prompts, subscriber setup.
//!
//! The pipeline core owns no process-wide state; everything global (the
//! tracing subscriber, the parsed arguments) is installed here at startup.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use crate::config::APP_NAME;
use crate::file::operations::get_output_path;
use crate::pipeline;
use crate::types::Direction;
use crate::ui::prompt;

#[derive(Subcommand)]
pub enum Commands {
    /// Encrypt a file.
    Encrypt {
        /// Input file path.
        #[arg(short, long)]
        input: PathBuf,

        /// Output file path (defaults to the input path plus `.xcr`).
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Key (at least 16 bytes; prompted when omitted).
        #[arg(short, long)]
        key: Option<String>,
    },

    /// Decrypt a file.
    Decrypt {
        /// Input file path.
        #[arg(short, long)]
        input: PathBuf,

        /// Output file path (defaults to the input path minus `.xcr`).
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Key (at least 16 bytes; prompted when omitted).
        #[arg(short, long)]
        key: Option<String>,
    },
}

#[derive(Parser)]
#[command(name = APP_NAME, version = "0.1.0", about = "Encrypt or decrypt whole files with a key-confirmation preamble and atomic all-or-nothing output.")]
pub struct App {
    #[command(subcommand)]
    command: Commands,
}

impl App {
    pub fn init() -> Result<Self> {
        let subscriber = tracing_subscriber::fmt().with_file(true).with_line_number(true).finish();
        tracing::subscriber::set_global_default(subscriber)?;
        Ok(Self::parse())
    }

    pub fn execute(self) -> Result<()> {
        match self.command {
            Commands::Encrypt { input, output, key } => Self::run(&input, output, key, Direction::Encrypt),
            Commands::Decrypt { input, output, key } => Self::run(&input, output, key, Direction::Decrypt),
        }
    }

    fn run(input: &Path, output: Option<PathBuf>, key: Option<String>, direction: Direction) -> Result<()> {
        let output = output.unwrap_or_else(|| get_output_path(input, direction));

        let key = match key {
            Some(key) => key,
            None => match direction {
                Direction::Encrypt => prompt::encryption_key()?,
                Direction::Decrypt => prompt::decryption_key()?,
            },
        };

        let (outcome, action) = match direction {
            Direction::Encrypt => (pipeline::encrypt(input, &output, key.as_bytes()), "Encrypted"),
            Direction::Decrypt => (pipeline::decrypt(input, &output, key.as_bytes()), "Decrypted"),
        };

        let outcome = outcome.with_context(|| format!("failed to {} {}", direction.label().to_lowercase(), input.display()))?;

        println!("✓ {action}: {} -> {} ({} bytes)", input.display(), output.display(), outcome.bytes_written);
        Ok(())
    }
}
