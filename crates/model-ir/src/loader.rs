// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Model loading: manifest → schema check → validated graph.

use crate::graph::Validated;
use crate::{ModelError, ModelGraph, ModelManifest, BUILTIN_MODEL_JSON};
use std::path::Path;

/// Loads model artifacts into a validated [`ModelGraph`].
///
/// The schema version is checked before anything else, so an artifact
/// from an incompatible toolchain is always reported as
/// [`ModelError::SchemaVersionMismatch`] rather than as whatever structural
/// error its unfamiliar layout happens to trigger.
///
/// # Example
/// ```
/// use model_ir::ModelLoader;
///
/// let graph = ModelLoader::builtin().unwrap();
/// assert_eq!(graph.input().num_elements(), 7);
/// ```
pub struct ModelLoader;

impl ModelLoader {
    /// Loads and validates a manifest file.
    pub fn load(path: &Path) -> Result<ModelGraph<Validated>, ModelError> {
        tracing::info!("loading model manifest from '{}'", path.display());
        Self::from_manifest(ModelManifest::from_file(path)?)
    }

    /// Loads and validates a manifest held in memory.
    pub fn from_json(json: &str) -> Result<ModelGraph<Validated>, ModelError> {
        Self::from_manifest(ModelManifest::from_json(json)?)
    }

    /// Loads the model compiled into this binary.
    pub fn builtin() -> Result<ModelGraph<Validated>, ModelError> {
        Self::from_json(BUILTIN_MODEL_JSON)
    }

    /// Checks the schema version, then builds and validates the graph.
    pub fn from_manifest(manifest: ModelManifest) -> Result<ModelGraph<Validated>, ModelError> {
        manifest.check_schema()?;
        let graph = ModelGraph::from_manifest(manifest).validate()?;
        tracing::info!("{}", graph.summary());
        Ok(graph)
    }
}
