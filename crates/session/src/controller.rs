// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! The session controller: one owned object driving the per-line loop.
//!
//! ```text
//!            byte                     terminator
//! Collecting ─────► (echo, buffer) ──────────────► Processing
//!     ▲                                               │ parse
//!     │  report error  ◄── count / token mismatch ────┤
//!     │                                               ▼
//!     │  report error  ◄── type mismatch ──────── Quantizing
//!     │                                               ▼
//!     │  report error  ◄── invoke failed ──────── Invoking
//!     │                                               ▼
//!     └──────────────────────────────────────────  Reporting
//! ```
//!
//! A session whose initialisation failed stays alive but degraded: every
//! completed line is answered with [`SessionError::NotReady`].

use crate::{
    Accepted, CharSource, LineBuffer, LineEnding, LineParser, ReadStatus, RequestTiming,
    SessionConfig, SessionError, SessionStats,
};
use runtime::{InferenceEngine, RuntimeError};
use std::fmt;
use std::io::{self, Write};
use std::time::Instant;
use tensor_core::{as_i8, as_i8_mut, clamp_round, dequantize, quantize, DType, TensorError};

/// First line printed after start-up.
pub const BANNER: &str = "Sine Wave Prediction Model Initializing...";

/// A successful request.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Prediction {
    /// Element 0 of the output tensor.
    pub raw: i8,
    /// `raw` dequantised with the output tensor's parameters.
    pub value: f32,
    /// `value` rounded and clamped to the int8 range.
    pub predicted: i32,
    pub timing: RequestTiming,
}

/// What one input byte did.
#[derive(Debug)]
pub enum LineEvent {
    /// The line is still open (or the byte was the LF of a CRLF pair).
    Pending,
    /// The partial line was discarded because the buffer filled up.
    Overflow,
    /// The line completed and produced a prediction.
    Predicted(Prediction),
    /// The line completed and was rejected; the error has been reported.
    Rejected(SessionError),
}

/// Result of one polling step.
#[derive(Debug)]
pub enum Tick {
    /// No input was available.
    Idle,
    /// The source is exhausted.
    Closed,
    /// One byte was consumed.
    Consumed(LineEvent),
}

/// Owns the engine, the line buffer and the output stream.
pub struct Session<E, W> {
    config: SessionConfig,
    engine: Option<E>,
    buffer: LineBuffer,
    parser: LineParser,
    out: W,
    stats: SessionStats,
}

impl<E: InferenceEngine, W: Write> Session<E, W> {
    /// Prints the banner and runs one-time initialisation.
    ///
    /// `init` builds the engine; its failure (or a model whose input does
    /// not hold `expected_values` elements) is reported on `out` and leaves
    /// the session degraded.
    ///
    /// # Errors
    /// Only [`SessionError::Io`] if `out` cannot be written.
    pub fn boot<F>(config: SessionConfig, mut out: W, init: F) -> Result<Self, SessionError>
    where
        F: FnOnce(&SessionConfig) -> Result<E, SessionError>,
    {
        let eol = config.line_ending;
        put_line(&mut out, eol, format_args!("{BANNER}"))?;

        let engine = match init(&config).and_then(|e| check_input_shape(e, &config)) {
            Ok(engine) => {
                put_line(&mut out, eol, format_args!("Model loaded successfully!"))?;
                tracing::info!(
                    "session ready: input {}, output {}",
                    engine.input_spec().summary(),
                    engine.output_spec().summary()
                );
                Some(engine)
            }
            Err(e) => {
                put_line(&mut out, eol, format_args!("{}", e.user_message()))?;
                tracing::error!("initialization failed, session degraded: {e}");
                None
            }
        };
        out.flush()?;

        Ok(Self {
            buffer: LineBuffer::new(config.line_capacity, config.terminator),
            parser: LineParser::new(config.expected_values, config.parse_mode),
            config,
            engine,
            out,
            stats: SessionStats::default(),
        })
    }

    /// Returns `true` unless initialisation failed.
    pub fn is_ready(&self) -> bool {
        self.engine.is_some()
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn engine(&self) -> Option<&E> {
        self.engine.as_ref()
    }

    pub fn stats(&self) -> &SessionStats {
        &self.stats
    }

    /// The output stream.
    pub fn output(&self) -> &W {
        &self.out
    }

    /// Flushes the output stream.
    pub fn flush(&mut self) -> Result<(), SessionError> {
        Ok(self.out.flush()?)
    }

    /// Consumes the session, returning the output stream.
    pub fn into_output(self) -> W {
        self.out
    }

    /// Takes at most one byte from `source` and handles it. Never blocks.
    pub fn poll<S: CharSource + ?Sized>(&mut self, source: &mut S) -> Result<Tick, SessionError> {
        match source.try_read() {
            ReadStatus::Byte(b) => Ok(Tick::Consumed(self.feed_char(b)?)),
            ReadStatus::Empty => Ok(Tick::Idle),
            ReadStatus::Closed => Ok(Tick::Closed),
        }
    }

    /// Handles one input byte: echo, buffer, and process a completed line.
    ///
    /// # Errors
    /// Only [`SessionError::Io`]; request errors come back as
    /// [`LineEvent::Rejected`].
    pub fn feed_char(&mut self, byte: u8) -> Result<LineEvent, SessionError> {
        let swallowed = self.buffer.is_swallowed(byte);
        self.buffer.observe(byte);
        if swallowed {
            return Ok(LineEvent::Pending);
        }

        if self.config.echo {
            self.out.write_all(&[byte])?;
        }

        if self.buffer.is_line_complete(byte) {
            if self.config.echo {
                self.out.write_all(self.config.line_ending.as_bytes())?;
            }
            let line = self.buffer.take_line();
            return match self.process_line(&line) {
                Ok(p) => Ok(LineEvent::Predicted(p)),
                Err(e @ SessionError::Io(_)) => Err(e),
                Err(e) => Ok(LineEvent::Rejected(e)),
            };
        }

        match self.buffer.accept_char(byte) {
            Accepted::Stored => Ok(LineEvent::Pending),
            Accepted::Overflow => {
                let err = SessionError::LineOverflow {
                    capacity: self.buffer.capacity(),
                };
                tracing::warn!("{err}; partial line discarded");
                self.stats.record_error(&err);
                Ok(LineEvent::Overflow)
            }
        }
    }

    /// Serves one complete line (without its terminator) and reports the
    /// outcome on the output stream. An error that is not
    /// [recoverable](SessionError::is_recoverable) drops the engine, and later
    /// lines are answered with [`SessionError::NotReady`].
    ///
    /// # Errors
    /// The request error, after it has been reported and counted.
    pub fn process_line(&mut self, line: &str) -> Result<Prediction, SessionError> {
        self.stats.lines += 1;
        tracing::debug!("processing line {:?}", line);

        let result = self.serve(line);
        match &result {
            Ok(p) => {
                self.stats.record_prediction(&p.timing);
                tracing::debug!(
                    "prediction {} (raw {}, {:.2}) in {} us",
                    p.predicted,
                    p.raw,
                    p.value,
                    p.timing.inference_us()
                );
            }
            Err(SessionError::Io(_)) => {}
            Err(e) => {
                self.line(format_args!("{}", e.user_message()))?;
                self.stats.record_error(e);
                if e.is_recoverable() {
                    tracing::warn!("line rejected: {e}");
                } else {
                    tracing::error!("engine unusable, serving degraded: {e}");
                    self.engine = None;
                }
            }
        }
        self.out.flush()?;
        result
    }

    fn line(&mut self, text: fmt::Arguments<'_>) -> io::Result<()> {
        put_line(&mut self.out, self.config.line_ending, text)
    }

    fn serve(&mut self, line: &str) -> Result<Prediction, SessionError> {
        if self.engine.is_none() {
            return Err(SessionError::NotReady);
        }

        let parsed = self.parser.parse(line)?;
        let expected = self.parser.expected();
        if !parsed.is_complete(expected) {
            return Err(SessionError::InputCountMismatch {
                expected,
                found: parsed.tokens,
            });
        }

        let t0 = Instant::now();
        self.line(format_args!("Running inference..."))?;
        let t1 = Instant::now();

        let engine = self.engine.as_mut().ok_or(SessionError::NotReady)?;
        let raw = run_engine(engine, &parsed.values)?;
        let t2 = Instant::now();

        let value = dequantize(raw, engine.output_spec().quant);
        let predicted = clamp_round(value);
        let timing = RequestTiming {
            print: t1 - t0,
            inference: t2 - t1,
        };

        self.line(format_args!("Raw dequantized prediction (float): {value:.2}"))?;
        self.line(format_args!("Predicted next integer value: {predicted}"))?;
        self.line(format_args!("Printing time (us): {}", timing.print_us()))?;
        self.line(format_args!("Inference time (us): {}", timing.inference_us()))?;

        Ok(Prediction {
            raw,
            value,
            predicted,
            timing,
        })
    }
}

impl<E, W> std::fmt::Debug for Session<E, W> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("ready", &self.engine.is_some())
            .field("buffered", &self.buffer.len())
            .field("stats", &self.stats)
            .finish()
    }
}

fn put_line<W: Write>(out: &mut W, eol: LineEnding, text: fmt::Arguments<'_>) -> io::Result<()> {
    out.write_fmt(text)?;
    out.write_all(eol.as_bytes())
}

fn check_input_shape<E: InferenceEngine>(
    engine: E,
    config: &SessionConfig,
) -> Result<E, SessionError> {
    let found = engine.input_spec().num_elements();
    if found != config.expected_values {
        return Err(SessionError::InputShapeMismatch {
            expected: config.expected_values,
            found,
        });
    }
    Ok(engine)
}

/// Type check, quantise into the input tensor, invoke, read element 0.
fn run_engine<E: InferenceEngine>(engine: &mut E, values: &[i32]) -> Result<i8, SessionError> {
    for spec in [engine.input_spec(), engine.output_spec()] {
        if spec.dtype != DType::I8 {
            return Err(SessionError::TensorTypeMismatch {
                tensor: spec.name.clone(),
                found: spec.dtype,
            });
        }
    }

    let quant = engine.input_spec().quant;
    let input = as_i8_mut(engine.input_data_mut().map_err(SessionError::InferenceFailure)?);
    if input.len() < values.len() {
        return Err(SessionError::InputShapeMismatch {
            expected: values.len(),
            found: input.len(),
        });
    }
    for (slot, &v) in input.iter_mut().zip(values) {
        *slot = quantize(v, quant);
    }

    engine.invoke().map_err(SessionError::InferenceFailure)?;

    let output = engine.output_data().map_err(SessionError::InferenceFailure)?;
    as_i8(output).first().copied().ok_or_else(|| {
        SessionError::InferenceFailure(RuntimeError::ExecutionError {
            layer: engine.output_spec().name.clone(),
            source: TensorError::BufferSizeMismatch {
                op: "read output",
                expected: 1,
                actual: 0,
            },
        })
    })
}
