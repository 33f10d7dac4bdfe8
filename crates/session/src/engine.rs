// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Builds the reference engine described by a [`SessionConfig`].

use crate::{SessionConfig, SessionError};
use model_ir::ModelLoader;
use runtime::{Allocated, Interpreter};

/// Loads the configured model (or the built-in one), verifies its schema
/// version and allocates its tensors.
///
/// # Errors
/// - [`SessionError::SchemaVersionMismatch`] for an incompatible artifact.
/// - [`SessionError::ModelLoadFailure`] for unreadable or invalid artifacts.
/// - [`SessionError::TensorAllocationFailure`] if the arena is too small.
/// - [`SessionError::InvalidConfig`] if the arena size does not parse.
pub fn init_engine(config: &SessionConfig) -> Result<Interpreter<Allocated>, SessionError> {
    let arena = config.parse_arena()?;
    let graph = match &config.model_path {
        Some(path) => ModelLoader::load(path)?,
        None => ModelLoader::builtin()?,
    };
    Ok(Interpreter::new(graph, arena).allocate_tensors()?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use runtime::InferenceEngine;

    #[test]
    fn test_builtin_default() {
        let engine = init_engine(&SessionConfig::default()).unwrap();
        assert_eq!(engine.input_spec().num_elements(), 7);
        assert_eq!(engine.arena_stats().capacity_bytes, 2048);
    }

    #[test]
    fn test_small_arena() {
        let config = SessionConfig {
            arena_size: "16B".into(),
            ..Default::default()
        };
        assert!(matches!(
            init_engine(&config),
            Err(SessionError::TensorAllocationFailure(_))
        ));
    }

    #[test]
    fn test_missing_model_file() {
        let config = SessionConfig {
            model_path: Some("/nonexistent/model.json".into()),
            ..Default::default()
        };
        assert!(matches!(
            init_engine(&config),
            Err(SessionError::ModelLoadFailure(_))
        ));
    }

    #[test]
    fn test_schema_mismatch_file() {
        let json = model_ir::BUILTIN_MODEL_JSON.replace(
            &format!("\"schema_version\": {}", model_ir::SCHEMA_VERSION),
            "\"schema_version\": 99",
        );
        let path = std::env::temp_dir().join(format!("session-schema-{}.json", std::process::id()));
        std::fs::write(&path, json).unwrap();

        let config = SessionConfig {
            model_path: Some(path.clone()),
            ..Default::default()
        };
        let result = init_engine(&config);
        std::fs::remove_file(&path).unwrap();
        assert!(matches!(
            result,
            Err(SessionError::SchemaVersionMismatch { found: 99, .. })
        ));
    }

    #[test]
    fn test_out_of_range_zero_point_fails_to_load() {
        let json = model_ir::BUILTIN_MODEL_JSON.replacen(
            "\"zero_point\": 0",
            "\"zero_point\": -2147483648",
            1,
        );
        let path = std::env::temp_dir().join(format!("session-zp-{}.json", std::process::id()));
        std::fs::write(&path, json).unwrap();

        let config = SessionConfig {
            model_path: Some(path.clone()),
            ..Default::default()
        };
        let result = init_engine(&config);
        std::fs::remove_file(&path).unwrap();
        assert!(matches!(result, Err(SessionError::ModelLoadFailure(_))));
    }
}
