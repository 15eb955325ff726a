// SPDX-FileCopyrightText: 2026 Quill Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Quill - a usage-governed real-time text-suggestion relay.
//!
//! This is the binary entry point.

mod serve;
mod shutdown;
mod usage;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use quill_config::{ConfigError, QuillConfig};

/// Quill - real-time text suggestions with spelling correction and cost control.
#[derive(Parser, Debug)]
#[command(name = "quill", version, about, long_about = None)]
struct Cli {
    /// Load this configuration file instead of the standard search path.
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

/// Available subcommands.
#[derive(Subcommand, Debug, PartialEq, Eq)]
enum Commands {
    /// Start the suggestion server (default).
    Serve,
    /// Print the usage ledger summary.
    Usage,
    /// Validate the configuration and report problems.
    CheckConfig,
}

fn load_config(path: Option<&PathBuf>) -> Result<QuillConfig, Vec<ConfigError>> {
    match path {
        Some(path) => quill_config::load_and_validate_path(path),
        None => quill_config::load_and_validate(),
    }
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let config = match load_config(cli.config.as_ref()) {
        Ok(config) => config,
        Err(errors) => {
            quill_config::render_errors(&errors);
            std::process::exit(1);
        }
    };

    let result = match cli.command.unwrap_or(Commands::Serve) {
        Commands::Serve => serve::run_serve(config).await,
        Commands::Usage => usage::run_usage(&config).await,
        Commands::CheckConfig => {
            println!(
                "quill: config OK (listen {}:{}, model {}, cost tracking {})",
                config.server.host,
                config.server.port,
                config.llm.default_model,
                if config.cost.track_costs { "on" } else { "off" },
            );
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
