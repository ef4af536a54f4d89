// SPDX-FileCopyrightText: 2026 Postbox Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Postbox - a contact form intake service.
//!
//! This is the binary entry point for the Postbox server.

mod serve;

use clap::{Parser, Subcommand};

/// Postbox - a contact form intake service.
#[derive(Parser, Debug)]
#[command(name = "postbox", version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Start the Postbox server.
    Serve,
    /// Load and validate the configuration, then exit.
    Check,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // Load and validate configuration at startup; config errors are fatal.
    let config = match postbox_config::load_and_validate() {
        Ok(config) => config,
        Err(errors) => {
            postbox_config::render_errors(&errors);
            std::process::exit(1);
        }
    };

    match cli.command {
        Some(Commands::Check) => {
            println!(
                "postbox: configuration ok (server {}:{}, database {})",
                config.server.host, config.server.port, config.storage.database_path
            );
        }
        Some(Commands::Serve) | None => {
            if let Err(e) = serve::run_serve(config).await {
                eprintln!("error: {e}");
                std::process::exit(1);
            }
        }
    }
}
