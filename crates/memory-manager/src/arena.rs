// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Fixed-capacity bump arena for tensor buffers.
//!
//! The arena is sized once and carved up once, at tensor allocation time.
//! Slots are never freed; they live as long as the arena. Slot offsets are
//! aligned to [`ARENA_ALIGNMENT`].

use crate::{ArenaSize, MemoryError};

/// Alignment applied to every slot offset.
pub const ARENA_ALIGNMENT: usize = 16;

/// A region of the arena handed out by [`TensorArena::allocate`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ArenaSlot {
    offset: usize,
    len: usize,
}

impl ArenaSlot {
    /// Byte offset of the slot from the start of the arena.
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Length of the slot in bytes.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` for a zero-length slot (never produced by `allocate`).
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    fn end(&self) -> usize {
        self.offset + self.len
    }
}

/// Arena usage counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, serde::Serialize)]
pub struct ArenaStats {
    /// Total capacity in bytes.
    pub capacity_bytes: usize,
    /// Bytes consumed, including alignment padding.
    pub used_bytes: usize,
    /// Number of live slots.
    pub allocations: usize,
}

impl ArenaStats {
    /// Returns a one-line summary suitable for CLI output.
    pub fn summary(&self) -> String {
        let pct = if self.capacity_bytes > 0 {
            self.used_bytes as f64 / self.capacity_bytes as f64 * 100.0
        } else {
            0.0
        };
        format!(
            "arena: {} / {} bytes used ({:.1}%), {} slots",
            self.used_bytes, self.capacity_bytes, pct, self.allocations
        )
    }
}

/// A fixed-size, pre-allocated memory region holding every tensor the
/// engine touches.
///
/// # Example
/// ```
/// use memory_manager::{ArenaSize, TensorArena};
///
/// let mut arena = TensorArena::new(ArenaSize::from_bytes(64));
/// let a = arena.allocate(7).unwrap();
/// let b = arena.allocate(1).unwrap();
/// assert_eq!(b.offset(), 16);
/// arena.slice_mut(a).unwrap()[0] = 42;
/// assert_eq!(arena.slice(a).unwrap()[0], 42);
/// assert!(arena.allocate(64).is_err());
/// ```
#[derive(Debug)]
pub struct TensorArena {
    buf: Vec<u8>,
    head: usize,
    allocations: usize,
}

impl TensorArena {
    /// Reserves the whole arena up front.
    pub fn new(size: ArenaSize) -> Self {
        tracing::debug!("tensor arena reserved: {size}");
        Self {
            buf: vec![0u8; size.as_bytes()],
            head: 0,
            allocations: 0,
        }
    }

    /// Total capacity in bytes.
    pub fn capacity(&self) -> usize {
        self.buf.len()
    }

    /// Bytes consumed so far, including alignment padding.
    pub fn used_bytes(&self) -> usize {
        self.head
    }

    /// Carves the next `len` bytes out of the arena.
    ///
    /// # Errors
    /// [`MemoryError::ZeroSizedAllocation`] for `len == 0`;
    /// [`MemoryError::ArenaExhausted`] if the aligned slot does not fit.
    pub fn allocate(&mut self, len: usize) -> Result<ArenaSlot, MemoryError> {
        if len == 0 {
            return Err(MemoryError::ZeroSizedAllocation);
        }
        let offset = align_up(self.head, ARENA_ALIGNMENT);
        let end = offset.checked_add(len).filter(|&end| end <= self.buf.len());
        let Some(end) = end else {
            return Err(MemoryError::ArenaExhausted {
                requested_bytes: len,
                available_bytes: self.buf.len().saturating_sub(offset),
                capacity_bytes: self.buf.len(),
            });
        };
        self.head = end;
        self.allocations += 1;
        Ok(ArenaSlot { offset, len })
    }

    /// Read access to a slot.
    pub fn slice(&self, slot: ArenaSlot) -> Result<&[u8], MemoryError> {
        self.check(slot)?;
        Ok(&self.buf[slot.offset..slot.end()])
    }

    /// Write access to a slot.
    pub fn slice_mut(&mut self, slot: ArenaSlot) -> Result<&mut [u8], MemoryError> {
        self.check(slot)?;
        Ok(&mut self.buf[slot.offset..slot.end()])
    }

    /// Borrows `src` immutably and `dst` mutably at the same time.
    ///
    /// `src` must lie entirely before `dst`, which always holds for a slot
    /// allocated earlier than another.
    pub fn split_pair(
        &mut self,
        src: ArenaSlot,
        dst: ArenaSlot,
    ) -> Result<(&[u8], &mut [u8]), MemoryError> {
        self.check(src)?;
        self.check(dst)?;
        if src.end() > dst.offset {
            return Err(MemoryError::InvalidSlot {
                offset: dst.offset,
                len: dst.len,
            });
        }
        let (head, tail) = self.buf.split_at_mut(dst.offset);
        Ok((&head[src.offset..src.end()], &mut tail[..dst.len]))
    }

    /// Snapshot of the usage counters.
    pub fn stats(&self) -> ArenaStats {
        ArenaStats {
            capacity_bytes: self.buf.len(),
            used_bytes: self.head,
            allocations: self.allocations,
        }
    }

    fn check(&self, slot: ArenaSlot) -> Result<(), MemoryError> {
        if slot.len == 0 || slot.end() > self.head {
            return Err(MemoryError::InvalidSlot {
                offset: slot.offset,
                len: slot.len,
            });
        }
        Ok(())
    }
}

fn align_up(value: usize, align: usize) -> usize {
    value.div_ceil(align) * align
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_alignment() {
        let mut arena = TensorArena::new(ArenaSize::from_bytes(128));
        let a = arena.allocate(7).unwrap();
        let b = arena.allocate(20).unwrap();
        let c = arena.allocate(1).unwrap();
        assert_eq!(a.offset(), 0);
        assert_eq!(b.offset(), 16);
        assert_eq!(c.offset(), 48);
        assert_eq!(arena.used_bytes(), 49);
        assert_eq!(arena.stats().allocations, 3);
    }

    #[test]
    fn test_exhaustion() {
        let mut arena = TensorArena::new(ArenaSize::from_bytes(32));
        arena.allocate(20).unwrap();
        match arena.allocate(17) {
            Err(MemoryError::ArenaExhausted {
                requested_bytes,
                available_bytes,
                capacity_bytes,
            }) => {
                assert_eq!(requested_bytes, 17);
                assert_eq!(available_bytes, 0);
                assert_eq!(capacity_bytes, 32);
            }
            other => panic!("expected ArenaExhausted, got {other:?}"),
        }
        // A failed allocation leaves the arena untouched.
        assert_eq!(arena.used_bytes(), 20);
    }

    #[test]
    fn test_zero_sized() {
        let mut arena = TensorArena::new(ArenaSize::from_bytes(32));
        assert!(matches!(arena.allocate(0), Err(MemoryError::ZeroSizedAllocation)));
    }

    #[test]
    fn test_split_pair() {
        let mut arena = TensorArena::new(ArenaSize::from_bytes(64));
        let a = arena.allocate(4).unwrap();
        let b = arena.allocate(4).unwrap();
        arena.slice_mut(a).unwrap().copy_from_slice(&[1, 2, 3, 4]);
        {
            let (src, dst) = arena.split_pair(a, b).unwrap();
            for (d, s) in dst.iter_mut().zip(src) {
                *d = s * 2;
            }
        }
        assert_eq!(arena.slice(b).unwrap(), &[2, 4, 6, 8]);
        assert!(arena.split_pair(b, a).is_err());
    }

    #[test]
    fn test_stats_summary() {
        let mut arena = TensorArena::new(ArenaSize::from_bytes(100));
        arena.allocate(25).unwrap();
        let s = arena.stats().summary();
        assert!(s.contains("25 / 100 bytes"));
        assert!(s.contains("25.0%"));
    }
}
