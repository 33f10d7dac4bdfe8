// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Arena size configuration and parsing.

use crate::MemoryError;
use std::fmt;

/// The fixed capacity of a tensor arena.
///
/// # Parsing
/// Accepts a byte count with an optional binary suffix, case-insensitive:
/// - `"2K"` or `"2KB"` → 2 × 1024 bytes
/// - `"1M"` or `"1MB"` → 1024² bytes
/// - `"2048"` or `"2048B"` → raw byte count
///
/// # Examples
/// ```
/// use memory_manager::ArenaSize;
///
/// assert_eq!(ArenaSize::parse("2K").unwrap().as_bytes(), 2048);
/// assert_eq!(ArenaSize::from_kb(4).to_string(), "4 KB");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ArenaSize {
    bytes: usize,
}

impl ArenaSize {
    /// Creates a size from a byte count.
    pub fn from_bytes(bytes: usize) -> Self {
        Self { bytes }
    }

    /// Creates a size from kibibytes.
    pub fn from_kb(kb: usize) -> Self {
        Self { bytes: kb * 1024 }
    }

    /// Returns the size in bytes.
    pub fn as_bytes(&self) -> usize {
        self.bytes
    }

    /// Parses a human-readable size string.
    pub fn parse(s: &str) -> Result<Self, MemoryError> {
        let invalid = |reason| MemoryError::InvalidSize {
            input: s.to_string(),
            reason,
        };

        let trimmed = s.trim();
        let upper = trimmed.to_ascii_uppercase();
        let digits_end = upper
            .find(|c: char| !c.is_ascii_digit())
            .unwrap_or(upper.len());
        let (number, suffix) = upper.split_at(digits_end);
        if number.is_empty() {
            return Err(invalid("expected a number followed by an optional K or M suffix"));
        }

        let multiplier = match suffix.trim() {
            "" | "B" => 1,
            "K" | "KB" => 1024,
            "M" | "MB" => 1024 * 1024,
            _ => return Err(invalid("unknown suffix; expected B, K or M")),
        };

        let value: usize = number.parse().map_err(|_| invalid("number out of range"))?;
        let bytes = value
            .checked_mul(multiplier)
            .ok_or_else(|| invalid("size overflows usize"))?;
        if bytes == 0 {
            return Err(invalid("arena size must be non-zero"));
        }
        Ok(Self { bytes })
    }
}

impl fmt::Display for ArenaSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.bytes >= 1024 * 1024 && self.bytes % (1024 * 1024) == 0 {
            write!(f, "{} MB", self.bytes / (1024 * 1024))
        } else if self.bytes >= 1024 && self.bytes % 1024 == 0 {
            write!(f, "{} KB", self.bytes / 1024)
        } else {
            write!(f, "{} B", self.bytes)
        }
    }
}
