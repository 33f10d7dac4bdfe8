// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Error types for the inference engine.

/// Errors that can occur while loading a model or running a forward pass.
#[derive(Debug, thiserror::Error)]
pub enum RuntimeError {
    /// The model artifact could not be loaded or validated.
    #[error("model error: {0}")]
    ModelError(#[from] model_ir::ModelError),

    /// The tensor arena could not hold the model's tensors.
    #[error("tensor allocation failed: {0}")]
    AllocationError(#[from] memory_manager::MemoryError),

    /// A kernel failed during the forward pass.
    #[error("execution error in layer '{layer}': {source}")]
    ExecutionError {
        layer: String,
        #[source]
        source: tensor_core::TensorError,
    },
}
