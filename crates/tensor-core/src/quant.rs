// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Affine int8 quantisation arithmetic.
//!
//! Two overflow policies live side by side here and must stay distinct:
//!
//! - [`quantize`] (input path) truncates toward zero and then **wraps** into
//!   `i8`: the real-valued quotient is first converted to `i32` (saturating
//!   at the `i32` bounds, NaN becomes 0) and only the low 8 bits are kept.
//!   This is the behaviour of a float→int32 convert followed by a narrowing
//!   store on Cortex-M class hardware, so `quantize(200, 1.0, 0)` is `-56`.
//! - [`clamp_round`] (output path) rounds half away from zero and then
//!   **saturates** to `[-128, 127]`.

use crate::TensorError;

/// Lower bound of the int8 domain.
pub const I8_MIN: i32 = i8::MIN as i32;
/// Upper bound of the int8 domain.
pub const I8_MAX: i32 = i8::MAX as i32;

/// Scale / zero-point pair describing an affine int8 tensor.
///
/// `real = (q - zero_point) * scale`.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct QuantParams {
    /// Real-valued step between adjacent quantised values. Must be positive.
    pub scale: f32,
    /// Quantised value that represents real zero.
    pub zero_point: i32,
}

impl QuantParams {
    /// Creates validated quantisation parameters.
    ///
    /// # Examples
    /// ```
    /// use tensor_core::QuantParams;
    /// assert!(QuantParams::new(0.5, 0).is_ok());
    /// assert!(QuantParams::new(0.0, 0).is_err());
    /// ```
    pub fn new(scale: f32, zero_point: i32) -> Result<Self, TensorError> {
        let params = Self { scale, zero_point };
        params.validate()?;
        Ok(params)
    }

    /// Identity mapping: scale 1, zero-point 0.
    pub fn identity() -> Self {
        Self {
            scale: 1.0,
            zero_point: 0,
        }
    }

    /// Checks that the scale is finite and strictly positive and that the
    /// zero-point lies in the int8 domain.
    pub fn validate(&self) -> Result<(), TensorError> {
        let scale_ok = self.scale.is_finite() && self.scale > 0.0;
        if !scale_ok || !(I8_MIN..=I8_MAX).contains(&self.zero_point) {
            return Err(TensorError::InvalidQuantParams {
                scale: self.scale,
                zero_point: self.zero_point,
            });
        }
        Ok(())
    }
}

impl std::fmt::Display for QuantParams {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "scale={} zero_point={}", self.scale, self.zero_point)
    }
}

/// Maps a raw integer input into the int8 domain.
///
/// Computes `trunc((raw - zero_point) / scale)` and narrows with a wrapping
/// conversion. Values that fall outside `[-128, 127]` after truncation are
/// **not** clamped; see the module docs.
///
/// # Examples
/// ```
/// use tensor_core::{quantize, QuantParams};
/// let p = QuantParams::identity();
/// assert_eq!(quantize(5, p), 5);
/// assert_eq!(quantize(-7, QuantParams { scale: 2.0, zero_point: 0 }), -3);
/// assert_eq!(quantize(200, p), -56);
/// ```
pub fn quantize(raw: i32, params: QuantParams) -> i8 {
    let centred = (i64::from(raw) - i64::from(params.zero_point)) as f32;
    let truncated = (centred / params.scale) as i32;
    truncated as i8
}

/// Maps an int8 value back to the real domain: `(q - zero_point) * scale`.
///
/// The difference is taken in `i64`, so parameters built without
/// [`QuantParams::validate`] cannot overflow.
pub fn dequantize(q: i8, params: QuantParams) -> f32 {
    (i64::from(q) - i64::from(params.zero_point)) as f32 * params.scale
}

/// Rounds half away from zero, then saturates to `[-128, 127]`.
///
/// NaN maps to 0.
///
/// # Examples
/// ```
/// use tensor_core::clamp_round;
/// assert_eq!(clamp_round(3.5), 4);
/// assert_eq!(clamp_round(-3.5), -4);
/// assert_eq!(clamp_round(200.0), 127);
/// ```
pub fn clamp_round(value: f32) -> i32 {
    if value.is_nan() {
        return 0;
    }
    value.round().clamp(I8_MIN as f32, I8_MAX as f32) as i32
}

/// Scales an int32 accumulator into the int8 domain of the next tensor,
/// rounding half away from zero and saturating.
///
/// `multiplier` is `input_scale * weight_scale / output_scale`.
pub fn requantize(acc: i32, multiplier: f32, output_zero_point: i32) -> i8 {
    let scaled = (acc as f32 * multiplier).round() as i32;
    scaled
        .saturating_add(output_zero_point)
        .clamp(I8_MIN, I8_MAX) as i8
}
