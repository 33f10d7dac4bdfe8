// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Error types for tensor descriptors and kernels.

use crate::DType;

/// Errors that can occur while describing tensors or running kernels.
#[derive(Debug, thiserror::Error)]
pub enum TensorError {
    /// A buffer does not hold the number of bytes its descriptor requires.
    #[error("buffer size mismatch in {op}: expected {expected} bytes, got {actual}")]
    BufferSizeMismatch {
        op: &'static str,
        expected: usize,
        actual: usize,
    },

    /// A kernel was handed operands whose dimensions do not line up.
    #[error("dimension mismatch in {op}: {detail}")]
    DimensionMismatch { op: &'static str, detail: String },

    /// The requested data type is not supported for this operation.
    #[error("unsupported dtype {dtype} for operation {op}")]
    UnsupportedDType { op: &'static str, dtype: DType },

    /// Quantisation parameters are unusable (non-positive or non-finite scale,
    /// or a zero-point outside `[-128, 127]`).
    #[error("invalid quantisation parameters: scale={scale}, zero_point={zero_point}")]
    InvalidQuantParams { scale: f32, zero_point: i32 },
}
