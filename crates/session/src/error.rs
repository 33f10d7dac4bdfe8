// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Error types for the prediction session.
//!
//! Initialisation errors leave the session degraded; request errors discard
//! the current line. Neither kind terminates the process.

use memory_manager::MemoryError;
use model_ir::ModelError;
use runtime::RuntimeError;
use std::path::PathBuf;
use tensor_core::DType;

/// Errors raised while configuring, initialising or serving a session.
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    // ── Initialisation ─────────────────────────────────────────
    /// The model artifact targets another schema version.
    #[error("model schema version mismatch: found {found}, expected {expected}")]
    SchemaVersionMismatch { found: u32, expected: u32 },

    /// The model's tensors do not fit in the arena.
    #[error("failed to allocate tensors: {0}")]
    TensorAllocationFailure(#[source] MemoryError),

    /// The model input does not hold the configured number of values.
    #[error("model input has {found} elements, session expects {expected}")]
    InputShapeMismatch { expected: usize, found: usize },

    /// The model artifact could not be read or is structurally invalid.
    #[error("failed to load model: {0}")]
    ModelLoadFailure(#[source] ModelError),

    // ── Per request ────────────────────────────────────────────
    /// A line did not contain exactly the expected number of values.
    #[error("expected exactly {expected} integers, found {found}")]
    InputCountMismatch { expected: usize, found: usize },

    /// A token is not an integer (strict parsing only).
    #[error("malformed integer token '{token}'")]
    MalformedToken { token: String },

    /// The engine exposes a tensor that is not int8.
    #[error("tensor '{tensor}' is {found}, expected i8")]
    TensorTypeMismatch { tensor: String, found: DType },

    /// The forward pass failed.
    #[error("inference failed: {0}")]
    InferenceFailure(#[source] RuntimeError),

    /// The line grew past the buffer capacity before a terminator arrived.
    #[error("line exceeded {capacity} bytes without a terminator")]
    LineOverflow { capacity: usize },

    /// Initialisation failed earlier; the session never runs inference.
    #[error("model not initialized")]
    NotReady,

    // ── Configuration ──────────────────────────────────────────
    /// A configuration value is out of range.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// The configuration file could not be read.
    #[error("cannot read config '{path}': {source}")]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The configuration file is not valid TOML for [`crate::SessionConfig`].
    #[error("TOML parse error: {0}")]
    ConfigParse(#[from] toml::de::Error),

    /// The configuration could not be serialised.
    #[error("TOML serialise error: {0}")]
    ConfigSerialize(#[from] toml::ser::Error),

    // ── Transport ──────────────────────────────────────────────
    /// Writing to the output stream failed. Ends the session.
    #[error("output stream error: {0}")]
    Io(#[from] std::io::Error),
}

impl SessionError {
    /// The line printed on the output stream when this error is reported.
    pub fn user_message(&self) -> String {
        match self {
            Self::SchemaVersionMismatch { .. } => "Model schema version mismatch!".into(),
            Self::TensorAllocationFailure(_) => "Failed to allocate tensors!".into(),
            Self::InputShapeMismatch { expected, found } => {
                format!("Error: Model expects {found} inputs, not {expected}!")
            }
            Self::ModelLoadFailure(_) => "Failed to load model!".into(),
            Self::InputCountMismatch { expected, .. } => {
                format!("Error: Please enter exactly {expected} integers.")
            }
            Self::MalformedToken { token } => format!("Error: '{token}' is not an integer."),
            Self::TensorTypeMismatch { .. } => "Error: Expected int8 tensors!".into(),
            Self::InferenceFailure(_) => "Model inference failed!".into(),
            Self::NotReady => "Error: model not initialized.".into(),
            other => format!("Error: {other}"),
        }
    }

    /// Returns `true` for errors that only discard the current request.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Self::InputCountMismatch { .. }
                | Self::MalformedToken { .. }
                | Self::TensorTypeMismatch { .. }
                | Self::InferenceFailure(_)
                | Self::LineOverflow { .. }
                | Self::NotReady
        )
    }
}

impl From<ModelError> for SessionError {
    fn from(e: ModelError) -> Self {
        match e {
            ModelError::SchemaVersionMismatch { found, expected } => {
                Self::SchemaVersionMismatch { found, expected }
            }
            other => Self::ModelLoadFailure(other),
        }
    }
}

impl From<MemoryError> for SessionError {
    fn from(e: MemoryError) -> Self {
        Self::TensorAllocationFailure(e)
    }
}

/// Classifies an engine error raised during initialisation.
impl From<RuntimeError> for SessionError {
    fn from(e: RuntimeError) -> Self {
        match e {
            RuntimeError::ModelError(m) => m.into(),
            RuntimeError::AllocationError(m) => m.into(),
            other => Self::InferenceFailure(other),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_messages() {
        let e = SessionError::InputCountMismatch { expected: 7, found: 3 };
        assert_eq!(e.user_message(), "Error: Please enter exactly 7 integers.");
        assert_eq!(
            SessionError::SchemaVersionMismatch { found: 2, expected: 3 }.user_message(),
            "Model schema version mismatch!"
        );
        assert_eq!(SessionError::NotReady.user_message(), "Error: model not initialized.");
    }

    #[test]
    fn test_runtime_error_classification() {
        let schema: SessionError = RuntimeError::ModelError(ModelError::SchemaVersionMismatch {
            found: 1,
            expected: 3,
        })
        .into();
        assert!(matches!(schema, SessionError::SchemaVersionMismatch { found: 1, .. }));

        let alloc: SessionError = RuntimeError::AllocationError(MemoryError::ArenaExhausted {
            requested_bytes: 64,
            available_bytes: 0,
            capacity_bytes: 32,
        })
        .into();
        assert!(matches!(alloc, SessionError::TensorAllocationFailure(_)));
        assert!(!alloc.is_recoverable());

        let load: SessionError = ModelError::InvalidGraph("empty".into()).into();
        assert!(matches!(load, SessionError::ModelLoadFailure(_)));
    }

    #[test]
    fn test_recoverable() {
        assert!(SessionError::NotReady.is_recoverable());
        assert!(SessionError::LineOverflow { capacity: 64 }.is_recoverable());
        assert!(!SessionError::InvalidConfig("x".into()).is_recoverable());
        let io = std::io::Error::new(std::io::ErrorKind::BrokenPipe, "closed");
        assert!(!SessionError::from(io).is_recoverable());
    }
}
