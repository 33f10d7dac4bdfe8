// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Subcommand implementations and shared start-up helpers.

pub mod inspect;
pub mod predict;
pub mod run;

use anyhow::Context;
use session::SessionConfig;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

/// CLI flags that take precedence over the configuration file.
#[derive(Debug, Default)]
pub struct Overrides {
    pub model: Option<PathBuf>,
    pub arena_size: Option<String>,
}

/// Installs the log subscriber. Logs go to stderr; stdout carries the
/// session's own output. `RUST_LOG` overrides the `-v` count.
pub fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Loads the configuration file (or defaults), applies CLI overrides and
/// validates the result.
pub fn load_config(path: Option<&Path>, overrides: Overrides) -> anyhow::Result<SessionConfig> {
    let mut config = match path {
        Some(path) => SessionConfig::from_file(path)
            .with_context(|| format!("failed to load config '{}'", path.display()))?,
        None => SessionConfig::default(),
    };

    if let Some(model) = overrides.model {
        config.model_path = Some(model);
    }
    if let Some(arena_size) = overrides.arena_size {
        config.arena_size = arena_size;
    }

    config.validate().context("invalid configuration")?;
    tracing::debug!("effective configuration: {config:?}");
    Ok(config)
}
