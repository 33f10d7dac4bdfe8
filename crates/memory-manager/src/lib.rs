// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! # memory-manager
//!
//! The tensor arena: one fixed-size memory region, reserved at start-up,
//! that holds every input, intermediate and output tensor of the model.
//!
//! # Key Components
//!
//! - [`ArenaSize`]: the arena capacity, with human-readable parsing
//!   (`"2K"`, `"1M"`).
//! - [`TensorArena`]: a bump allocator over the reserved region. Slots are
//!   handed out once during tensor allocation and live as long as the
//!   arena; running out of room is reported as
//!   [`MemoryError::ArenaExhausted`] and is permanent for that model.
//! - [`ArenaStats`]: capacity / usage counters for diagnostics.
//!
//! # Example
//! ```
//! use memory_manager::{ArenaSize, TensorArena};
//!
//! let mut arena = TensorArena::new(ArenaSize::parse("2K").unwrap());
//! let input = arena.allocate(7).unwrap();
//! let output = arena.allocate(1).unwrap();
//! assert!(output.offset() > input.offset());
//! assert_eq!(arena.stats().allocations, 2);
//! ```

mod arena;
mod error;
mod size;

pub use arena::{ArenaSlot, ArenaStats, TensorArena, ARENA_ALIGNMENT};
pub use error::MemoryError;
pub use size::ArenaSize;
