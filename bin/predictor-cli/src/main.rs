// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! # predictor
//!
//! Reads comma-separated integer sequences and prints the model's
//! prediction for the next value.
//!
//! ## Usage
//! ```bash
//! # Interactive loop over stdin/stdout (CR-terminated lines by default)
//! predictor run
//! printf '1,2,3,4,5,6,7\r' | predictor run
//!
//! # One request
//! predictor predict --values 1,2,3,4,5,6,7
//!
//! # Model and arena layout
//! predictor inspect --model ./models/sine_extrapolator.json --arena-size 2K
//! ```

mod commands;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "predictor",
    about = "Quantised next-value predictor for integer sequences",
    version,
    author
)]
struct Cli {
    /// Path to a TOML configuration file.
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Enable verbose logging (repeat for more: -v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Model manifest (JSON). Defaults to the built-in model.
    #[arg(short, long, global = true)]
    model: Option<PathBuf>,

    /// Tensor arena size (e.g., "2K", "4096").
    #[arg(short, long, global = true)]
    arena_size: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Serve lines from stdin until it closes (default).
    Run,

    /// Run a single request and exit non-zero if it fails.
    Predict {
        /// Comma-separated input values (e.g., "1,2,3,4,5,6,7").
        #[arg(long, allow_hyphen_values = true)]
        values: String,
    },

    /// Print the model, its tensors and the arena layout.
    Inspect,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    commands::init_tracing(cli.verbose);

    let config = commands::load_config(
        cli.config.as_deref(),
        commands::Overrides {
            model: cli.model,
            arena_size: cli.arena_size,
        },
    )?;

    match cli.command.unwrap_or(Commands::Run) {
        Commands::Run => commands::run::execute(config).await,
        Commands::Predict { values } => commands::predict::execute(config, &values).await,
        Commands::Inspect => commands::inspect::execute(config).await,
    }
}
