// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Error types for the tensor arena.

/// Errors that can occur while sizing or carving up the tensor arena.
#[derive(Debug, thiserror::Error)]
pub enum MemoryError {
    /// The requested allocation does not fit in what is left of the arena.
    #[error("arena exhausted: requested {requested_bytes} bytes, but only {available_bytes} available (capacity: {capacity_bytes})")]
    ArenaExhausted {
        requested_bytes: usize,
        available_bytes: usize,
        capacity_bytes: usize,
    },

    /// Attempted to allocate a zero-sized buffer.
    #[error("cannot allocate zero-sized buffer")]
    ZeroSizedAllocation,

    /// An arena size string could not be parsed.
    #[error("invalid arena size '{input}': {reason}")]
    InvalidSize { input: String, reason: &'static str },

    /// A slot does not belong to this arena (or the two slots of a pair
    /// are not in allocation order).
    #[error("invalid arena slot at offset {offset} (+{len} bytes)")]
    InvalidSlot { offset: usize, len: usize },
}
