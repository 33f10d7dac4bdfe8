// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Quantised tensor kernels.
//!
//! Kernels write into caller-provided output buffers (arena slots), so the
//! inference path performs no heap allocation.

mod fully_connected_op;

pub use fully_connected_op::{fully_connected, FullyConnected};
