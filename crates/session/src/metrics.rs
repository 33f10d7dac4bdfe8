// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Request timing and session counters.

use crate::SessionError;
use std::time::Duration;

/// Timing of one successful request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, serde::Serialize)]
pub struct RequestTiming {
    /// Time spent printing the "Running inference..." notice.
    pub print: Duration,
    /// Type check, quantisation and the forward pass.
    pub inference: Duration,
}

impl RequestTiming {
    pub fn print_us(&self) -> u128 {
        self.print.as_micros()
    }

    pub fn inference_us(&self) -> u128 {
        self.inference.as_micros()
    }
}

/// Counters accumulated over the lifetime of a session.
#[derive(Debug, Clone, Default, PartialEq, serde::Serialize)]
pub struct SessionStats {
    /// Completed lines (overflowed partial lines are not included).
    pub lines: u64,
    /// Lines that produced a prediction.
    pub predictions: u64,
    pub count_mismatches: u64,
    pub malformed_tokens: u64,
    pub type_mismatches: u64,
    pub inference_failures: u64,
    /// Lines answered while the model was not initialised.
    pub not_ready: u64,
    /// Partial lines discarded because the buffer filled up.
    pub overflows: u64,
    /// Sum of [`RequestTiming::inference`] over all predictions.
    pub total_inference: Duration,
}

impl SessionStats {
    /// Records a successful request.
    pub fn record_prediction(&mut self, timing: &RequestTiming) {
        self.predictions += 1;
        self.total_inference += timing.inference;
    }

    /// Records a failed request or a discarded line.
    pub fn record_error(&mut self, err: &SessionError) {
        match err {
            SessionError::InputCountMismatch { .. } => self.count_mismatches += 1,
            SessionError::MalformedToken { .. } => self.malformed_tokens += 1,
            SessionError::TensorTypeMismatch { .. } => self.type_mismatches += 1,
            SessionError::InferenceFailure(_) => self.inference_failures += 1,
            SessionError::NotReady => self.not_ready += 1,
            SessionError::LineOverflow { .. } => self.overflows += 1,
            _ => {}
        }
    }

    /// Lines that were rejected for any reason.
    pub fn rejected(&self) -> u64 {
        self.lines - self.predictions
    }

    /// Mean inference time per prediction.
    pub fn mean_inference(&self) -> Duration {
        match u32::try_from(self.predictions) {
            Ok(0) | Err(_) => Duration::ZERO,
            Ok(n) => self.total_inference / n,
        }
    }

    /// Returns a one-line summary for the log.
    pub fn summary(&self) -> String {
        format!(
            "{} lines, {} predictions, {} rejected ({} count, {} malformed, {} type, {} inference, {} not ready), {} overflows, mean inference {} us",
            self.lines,
            self.predictions,
            self.rejected(),
            self.count_mismatches,
            self.malformed_tokens,
            self.type_mismatches,
            self.inference_failures,
            self.not_ready,
            self.overflows,
            self.mean_inference().as_micros(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counters() {
        let mut s = SessionStats {
            lines: 4,
            ..Default::default()
        };
        s.record_prediction(&RequestTiming {
            print: Duration::from_micros(10),
            inference: Duration::from_micros(100),
        });
        s.record_prediction(&RequestTiming {
            print: Duration::from_micros(10),
            inference: Duration::from_micros(300),
        });
        s.record_error(&SessionError::InputCountMismatch { expected: 7, found: 3 });
        s.record_error(&SessionError::NotReady);
        s.record_error(&SessionError::LineOverflow { capacity: 64 });

        assert_eq!(s.predictions, 2);
        assert_eq!(s.rejected(), 2);
        assert_eq!(s.count_mismatches, 1);
        assert_eq!(s.not_ready, 1);
        assert_eq!(s.overflows, 1);
        assert_eq!(s.mean_inference(), Duration::from_micros(200));
    }

    #[test]
    fn test_summary_empty() {
        let s = SessionStats::default().summary();
        assert!(s.starts_with("0 lines, 0 predictions"));
        assert!(s.ends_with("mean inference 0 us"));
    }

    #[test]
    fn test_serialize() {
        let json = serde_json::to_value(SessionStats::default()).unwrap();
        assert_eq!(json["lines"], 0);
        assert!(json.get("total_inference").is_some());
    }

    #[test]
    fn test_timing_micros() {
        let t = RequestTiming {
            print: Duration::from_nanos(2_500),
            inference: Duration::from_millis(3),
        };
        assert_eq!(t.print_us(), 2);
        assert_eq!(t.inference_us(), 3000);
    }
}
