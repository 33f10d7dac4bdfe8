// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! # runtime
//!
//! The inference engine as seen by the serial session.
//!
//! - [`InferenceEngine`]: the capability the session drives. It exposes
//!   the input/output tensor descriptors and bytes, and a single
//!   `invoke` operation that succeeds or fails.
//! - [`Interpreter`]: the reference implementation, a chain of int8 dense
//!   layers executed out of a fixed [`memory_manager::TensorArena`].
//!
//! # Type-State Pipeline
//! ```text
//! Interpreter<Unallocated> → allocate_tensors → Interpreter<Allocated>
//! ```
//! Only `Interpreter<Allocated>` implements [`InferenceEngine`].

mod engine;
mod error;

pub use engine::{
    load_interpreter, Allocated, InferenceEngine, Interpreter, InterpreterState, Unallocated,
};
pub use error::RuntimeError;
