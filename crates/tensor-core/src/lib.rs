// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! # tensor-core
//!
//! Tensor descriptors and int8 arithmetic for the serial sequence predictor.
//!
//! This crate provides:
//! - [`DType`] and [`Shape`]: what a model tensor holds and how big it is.
//! - [`TensorSpec`]: a named, quantised tensor descriptor.
//! - [`QuantParams`] with [`quantize`], [`dequantize`] and [`clamp_round`],
//!   the linear mapping between integers on the serial line and the model's
//!   int8 domain.
//! - [`fully_connected`]: the int8 dense kernel used by the reference engine.
//!
//! # Overflow policies
//! Input quantisation wraps on narrowing; output rounding saturates. See
//! the [`quant`] module docs before changing either.

mod dtype;
mod error;
mod ops;
pub mod quant;
mod shape;
mod tensor;

pub use dtype::DType;
pub use error::TensorError;
pub use ops::{fully_connected, FullyConnected};
pub use quant::{clamp_round, dequantize, quantize, requantize, QuantParams};
pub use shape::Shape;
pub use tensor::{as_i8, as_i8_mut, TensorSpec};
