// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Error types for model loading and validation.

use std::path::PathBuf;

/// Errors that can occur when loading or validating a model artifact.
#[derive(Debug, thiserror::Error)]
pub enum ModelError {
    /// The manifest file could not be read.
    #[error("failed to read manifest '{}': {source}", path.display())]
    ManifestReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The manifest JSON is malformed.
    #[error("failed to parse manifest: {0}")]
    ManifestParseError(#[from] serde_json::Error),

    /// The artifact was produced for a different schema version.
    #[error("model schema version mismatch: artifact is v{found}, engine supports v{expected}")]
    SchemaVersionMismatch { found: u32, expected: u32 },

    /// An input or output tensor descriptor is unusable.
    #[error("invalid tensor '{tensor}': {detail}")]
    InvalidTensor { tensor: String, detail: String },

    /// A layer definition is invalid (bad dimensions, buffer lengths, scales).
    #[error("invalid layer '{layer}': {detail}")]
    InvalidLayer { layer: String, detail: String },

    /// The layers do not form a valid chain from input to output.
    #[error("invalid model graph: {0}")]
    InvalidGraph(String),
}
