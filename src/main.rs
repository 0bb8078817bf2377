//! Cloak - secure directory encryption CLI.

use anyhow::Context;
use clap::{Parser, Subcommand};
use cloak::password::TerminalPassword;
use cloak::vault::{self, Progress};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "cloak")]
#[command(author, version, about, long_about = None)]
#[command(
    about = "Secure directory encryption tool",
    long_about = "Encrypts a directory tree into a single .cloak container file using \
                  AES-256-GCM with an Argon2id-derived key."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Encrypt a directory into <directory>.cloak
    Encrypt {
        /// Directory to encrypt
        directory: PathBuf,
    },

    /// Decrypt a .cloak file into its parent directory
    Decrypt {
        /// Encrypted .cloak file
        file: PathBuf,
    },
}

/// Prints stage notifications to stdout.
struct Console;

impl Progress for Console {
    fn stage(&mut self, message: &str) {
        println!("{}", message);
    }
}

fn main() {
    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Commands::Encrypt { directory } => {
            let report =
                vault::encrypt_directory(&directory, &mut TerminalPassword, &mut Console)
                    .with_context(|| format!("failed to encrypt {}", directory.display()))?;

            println!("Successfully encrypted to: {}", report.output.display());
            println!(
                "Archive size: {} bytes, Encrypted size: {} bytes",
                report.archive_size, report.ciphertext_size
            );
        }

        Commands::Decrypt { file } => {
            let report = vault::decrypt_file(&file, &mut TerminalPassword, &mut Console)
                .with_context(|| format!("failed to decrypt {}", file.display()))?;

            println!("Successfully decrypted to: {}", report.output_dir.display());
        }
    }

    Ok(())
}
