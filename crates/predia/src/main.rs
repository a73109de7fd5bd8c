// SPDX-FileCopyrightText: 2026 Predia Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Predia - realtime notification and bot-status fan-out service.
//!
//! This is the binary entry point for the Predia realtime backend.

#[cfg(not(target_env = "msvc"))]
use tikv_jemallocator::Jemalloc;

#[cfg(not(target_env = "msvc"))]
#[global_allocator]
static GLOBAL: Jemalloc = Jemalloc;

use clap::{Parser, Subcommand};

mod serve;
mod shutdown;
mod status;

/// Predia - realtime notification and bot-status fan-out service.
#[derive(Parser, Debug)]
#[command(name = "predia", version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Start the Predia realtime server.
    Serve,
    /// Query a running server for the current bot state.
    Status,
    /// Print the resolved configuration with secrets redacted.
    Config,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // Load and validate configuration at startup.
    let config = match predia_config::load_and_validate() {
        Ok(config) => config,
        Err(errors) => {
            predia_config::render_errors(&errors);
            std::process::exit(1);
        }
    };

    let result = match cli.command {
        Some(Commands::Serve) => serve::run_serve(config).await,
        Some(Commands::Status) => status::run_status(&config).await,
        Some(Commands::Config) => print_config(&config),
        None => {
            println!("predia: use --help for available commands");
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}

/// Print the resolved configuration as TOML with secrets redacted.
fn print_config(config: &predia_config::PrediaConfig) -> Result<(), predia_core::PrediaError> {
    let mut redacted = config.clone();
    let redact = |secret: &mut Option<String>| {
        if secret.is_some() {
            *secret = Some("[redacted]".to_string());
        }
    };
    redact(&mut redacted.bot.api_key);
    redact(&mut redacted.auth.session_token);
    redact(&mut redacted.auth.admin_token);

    let rendered = toml::to_string_pretty(&redacted)
        .map_err(|e| predia_core::PrediaError::Internal(format!("config render failed: {e}")))?;
    print!("{rendered}");
    Ok(())
}
