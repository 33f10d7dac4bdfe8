// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! # session
//!
//! The line-oriented prediction harness around an [`runtime::InferenceEngine`].
//!
//! Bytes arrive one at a time from a [`CharSource`]. Each is echoed and
//! buffered until a terminator; the completed line is parsed into a fixed
//! number of integers, quantised into the engine's input tensor, run, and
//! the dequantised prediction is reported with its timing.
//!
//! - [`LineBuffer`]: fixed-capacity accumulation with silent overflow.
//! - [`LineParser`]: comma-separated integers, permissive or strict.
//! - [`Session`]: the controller owning engine, buffer and output stream.
//! - [`SessionConfig`]: TOML configuration.
//! - [`SessionStats`] / [`RequestTiming`]: counters and per-request timing.
//!
//! # Example
//! ```
//! use session::{init_engine, LineEvent, Session, SessionConfig};
//!
//! let mut s = Session::boot(SessionConfig::default(), Vec::new(), init_engine).unwrap();
//! for &b in b"1,2,3,4,5,6,7\r" {
//!     if let LineEvent::Predicted(p) = s.feed_char(b).unwrap() {
//!         assert_eq!(p.predicted, 7);
//!     }
//! }
//! ```

mod config;
mod controller;
mod engine;
mod error;
mod io;
mod line_buffer;
mod metrics;
mod parser;

pub use config::{LineEnding, LineTerminator, ParseMode, SessionConfig};
pub use controller::{LineEvent, Prediction, Session, Tick, BANNER};
pub use engine::init_engine;
pub use error::SessionError;
pub use io::{CharSource, ReadStatus};
pub use line_buffer::{Accepted, LineBuffer};
pub use metrics::{RequestTiming, SessionStats};
pub use parser::{parse_leading_int, LineParser, ParsedLine};
