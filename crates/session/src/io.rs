// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Non-blocking byte sources for the polling loop.

use std::collections::VecDeque;
use tokio::sync::mpsc::{error::TryRecvError, UnboundedReceiver};

/// Outcome of one non-blocking read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReadStatus {
    /// One byte was available.
    Byte(u8),
    /// Nothing available right now.
    Empty,
    /// The source will never produce another byte.
    Closed,
}

/// A byte stream the session can poll without blocking.
pub trait CharSource {
    /// Takes at most one byte.
    fn try_read(&mut self) -> ReadStatus;
}

/// A fixed script of input; closed once drained.
impl CharSource for VecDeque<u8> {
    fn try_read(&mut self) -> ReadStatus {
        match self.pop_front() {
            Some(b) => ReadStatus::Byte(b),
            None => ReadStatus::Closed,
        }
    }
}

/// Bytes forwarded by a reader task; closed once every sender is dropped
/// and the queue is drained.
impl CharSource for UnboundedReceiver<u8> {
    fn try_read(&mut self) -> ReadStatus {
        match self.try_recv() {
            Ok(b) => ReadStatus::Byte(b),
            Err(TryRecvError::Empty) => ReadStatus::Empty,
            Err(TryRecvError::Disconnected) => ReadStatus::Closed,
        }
    }
}
