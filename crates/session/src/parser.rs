// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Comma-separated integer parsing.
//!
//! Empty tokens (`"1,,2"`, a leading or trailing comma) are skipped. The
//! parser converts at most `expected` tokens but counts all of them, so
//! the caller can reject both short and long lines.

use crate::{ParseMode, SessionError};

/// Result of parsing one line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedLine {
    /// Converted values, in input order (never more than `expected`).
    pub values: Vec<i32>,
    /// Number of non-empty tokens on the line.
    pub tokens: usize,
}

impl ParsedLine {
    /// Returns `true` if the line held exactly `expected` tokens.
    pub fn is_complete(&self, expected: usize) -> bool {
        self.tokens == expected
    }
}

/// Splits lines into a fixed number of integers.
#[derive(Debug, Clone, Copy)]
pub struct LineParser {
    expected: usize,
    mode: ParseMode,
}

impl LineParser {
    pub fn new(expected: usize, mode: ParseMode) -> Self {
        Self { expected, mode }
    }

    /// Number of values a request must carry.
    pub fn expected(&self) -> usize {
        self.expected
    }

    /// Parses `line`.
    ///
    /// # Errors
    /// [`SessionError::MalformedToken`] in strict mode when a converted
    /// token is not a complete integer. The token count is *not* checked
    /// here.
    pub fn parse(&self, line: &str) -> Result<ParsedLine, SessionError> {
        let mut values = Vec::with_capacity(self.expected);
        let mut tokens = 0;
        for token in line.split(',').filter(|t| !t.is_empty()) {
            tokens += 1;
            if values.len() == self.expected {
                continue;
            }
            let value = match self.mode {
                ParseMode::Permissive => parse_leading_int(token),
                ParseMode::Strict => {
                    token
                        .trim()
                        .parse()
                        .map_err(|_| SessionError::MalformedToken {
                            token: token.to_string(),
                        })?
                }
            };
            values.push(value);
        }
        Ok(ParsedLine { values, tokens })
    }
}

/// Best-effort integer conversion.
///
/// Skips leading whitespace, accepts one optional sign, then consumes
/// decimal digits up to the first non-digit. No digits yields 0;
/// out-of-range values saturate.
///
/// ```
/// use session::parse_leading_int;
///
/// assert_eq!(parse_leading_int(" -42abc"), -42);
/// assert_eq!(parse_leading_int("abc"), 0);
/// ```
pub fn parse_leading_int(token: &str) -> i32 {
    let s = token
        .trim_start_matches(|c: char| matches!(c, ' ' | '\t' | '\n' | '\x0B' | '\x0C' | '\r'));
    let (negative, digits) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };

    let mut acc: i64 = 0;
    for d in digits.bytes().take_while(u8::is_ascii_digit) {
        acc = (acc * 10 + i64::from(d - b'0')).min(i64::from(i32::MAX) + 1);
    }
    let signed = if negative { -acc } else { acc };
    signed.clamp(i64::from(i32::MIN), i64::from(i32::MAX)) as i32
}
