// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Tensor descriptors and typed views over raw byte buffers.
//!
//! Tensor data lives in the engine's arena as plain bytes. A [`TensorSpec`]
//! says how to interpret those bytes; [`as_i8`] and [`as_i8_mut`] give the
//! int8 view the session needs without copying.

use crate::{DType, QuantParams, Shape, TensorError};

/// Describes a model input or output tensor.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct TensorSpec {
    /// Tensor name as recorded in the model.
    pub name: String,
    /// Element kind.
    pub dtype: DType,
    /// Dimensions.
    pub shape: Shape,
    /// Affine quantisation parameters (required for int8 tensors).
    pub quant: QuantParams,
}

impl TensorSpec {
    /// Creates an int8 tensor spec.
    pub fn int8(name: impl Into<String>, shape: Shape, quant: QuantParams) -> Self {
        Self {
            name: name.into(),
            dtype: DType::I8,
            shape,
            quant,
        }
    }

    /// Number of elements described by this spec.
    pub fn num_elements(&self) -> usize {
        self.shape.num_elements()
    }

    /// Bytes required to hold this tensor.
    pub fn size_bytes(&self) -> usize {
        self.shape.size_bytes(self.dtype)
    }

    /// Returns an error unless the element kind is `expected`.
    pub fn expect_dtype(&self, op: &'static str, expected: DType) -> Result<(), TensorError> {
        if self.dtype != expected {
            return Err(TensorError::UnsupportedDType {
                op,
                dtype: self.dtype,
            });
        }
        Ok(())
    }

    /// One-line description, e.g. `input i8[1, 7] (scale=1 zero_point=0)`.
    pub fn summary(&self) -> String {
        format!("{} {}{} ({})", self.name, self.dtype, self.shape, self.quant)
    }
}

/// Reinterprets a byte buffer as int8 values.
pub fn as_i8(bytes: &[u8]) -> &[i8] {
    // SAFETY: `u8` and `i8` have identical size and alignment, and every bit
    // pattern is a valid value of both.
    unsafe { std::slice::from_raw_parts(bytes.as_ptr() as *const i8, bytes.len()) }
}

/// Reinterprets a mutable byte buffer as int8 values.
pub fn as_i8_mut(bytes: &mut [u8]) -> &mut [i8] {
    // SAFETY: see `as_i8`; the exclusive borrow is carried over unchanged.
    unsafe { std::slice::from_raw_parts_mut(bytes.as_mut_ptr() as *mut i8, bytes.len()) }
}
