// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! JSON model manifest parsing.
//!
//! A manifest is the compiled model artifact: tensor descriptors, layer
//! weights, and the schema version it was written for.
//!
//! # Format
//! ```json
//! {
//!   "name": "sine-extrapolator",
//!   "schema_version": 3,
//!   "input":  { "name": "input",  "dtype": "i8", "shape": [1, 7],
//!               "quant": { "scale": 1.0, "zero_point": 0 } },
//!   "output": { "name": "output", "dtype": "i8", "shape": [1, 1],
//!               "quant": { "scale": 1.0, "zero_point": 0 } },
//!   "layers": [
//!     { "name": "dense_1", "in_features": 7, "out_features": 1,
//!       "weights": [0, 0, 0, 0, 0, -64, 122], "weight_scale": 0.015625,
//!       "bias": [0], "output_quant": { "scale": 1.0, "zero_point": 0 } }
//!   ]
//! }
//! ```

use crate::{DenseLayer, ModelError, SCHEMA_VERSION};
use std::path::Path;
use tensor_core::TensorSpec;

/// Top-level model manifest.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct ModelManifest {
    /// Human-readable model name.
    pub name: String,
    /// Schema version the artifact was written for.
    pub schema_version: u32,
    /// Free-form description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Model input tensor.
    pub input: TensorSpec,
    /// Model output tensor.
    pub output: TensorSpec,
    /// Layers in execution order.
    pub layers: Vec<DenseLayer>,
}

impl ModelManifest {
    /// Loads a manifest from a JSON file.
    pub fn from_file(path: &Path) -> Result<Self, ModelError> {
        let content =
            std::fs::read_to_string(path).map_err(|source| ModelError::ManifestReadError {
                path: path.to_path_buf(),
                source,
            })?;
        Self::from_json(&content)
    }

    /// Parses a manifest from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, ModelError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Serialises the manifest as pretty-printed JSON.
    pub fn to_json(&self) -> Result<String, ModelError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Rejects artifacts written for a different schema version.
    pub fn check_schema(&self) -> Result<(), ModelError> {
        if self.schema_version != SCHEMA_VERSION {
            return Err(ModelError::SchemaVersionMismatch {
                found: self.schema_version,
                expected: SCHEMA_VERSION,
            });
        }
        Ok(())
    }
}
