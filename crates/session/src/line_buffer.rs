// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Fixed-capacity input line buffer.

use crate::LineTerminator;

/// What happened to a byte handed to [`LineBuffer::accept_char`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Accepted {
    /// Stored; the line is still open.
    Stored,
    /// The buffer filled up without a terminator and was cleared.
    Overflow,
}

/// Accumulates bytes until a terminator arrives.
///
/// Invariant: `len() < capacity()` between calls. Storing the byte that
/// brings the length to `capacity` clears the buffer instead, so a line
/// holds at most `capacity - 1` bytes.
#[derive(Debug, Clone)]
pub struct LineBuffer {
    buf: Vec<u8>,
    capacity: usize,
    terminator: LineTerminator,
    after_cr: bool,
}

impl LineBuffer {
    /// Creates an empty buffer.
    pub fn new(capacity: usize, terminator: LineTerminator) -> Self {
        Self {
            buf: Vec::with_capacity(capacity),
            capacity,
            terminator,
            after_cr: false,
        }
    }

    /// Returns `true` when `byte` completes the current line.
    pub fn is_line_complete(&self, byte: u8) -> bool {
        self.terminator.matches(byte)
    }

    /// Returns `true` for the LF half of a CRLF pair in [`LineTerminator::Any`]
    /// mode; such a byte ends nothing and must be dropped.
    pub fn is_swallowed(&self, byte: u8) -> bool {
        self.terminator == LineTerminator::Any && self.after_cr && byte == b'\n'
    }

    /// Records `byte` for CRLF tracking. Call once per received byte.
    pub fn observe(&mut self, byte: u8) {
        self.after_cr = byte == b'\r';
    }

    /// Appends a non-terminator byte.
    pub fn accept_char(&mut self, byte: u8) -> Accepted {
        self.buf.push(byte);
        if self.buf.len() >= self.capacity {
            self.clear();
            return Accepted::Overflow;
        }
        Accepted::Stored
    }

    /// Returns the completed line and resets the buffer.
    pub fn take_line(&mut self) -> String {
        let line = String::from_utf8_lossy(&self.buf).into_owned();
        self.clear();
        line
    }

    /// Discards the partial line.
    pub fn clear(&mut self) {
        self.buf.clear();
    }

    /// Bytes currently held.
    pub fn len(&self) -> usize {
        self.buf.len()
    }

    /// Returns `true` if no bytes are held.
    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    /// Configured capacity.
    pub fn capacity(&self) -> usize {
        self.capacity
    }
}
