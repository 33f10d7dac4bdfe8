// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Int8 fully-connected (dense) layer.

use crate::quant::requantize;
use crate::{QuantParams, TensorError};

/// Static parameters of one int8 dense layer.
///
/// Weights are row-major `[out_features, in_features]` and symmetric
/// (zero-point 0) with a single per-layer scale.
#[derive(Debug, Clone, Copy)]
pub struct FullyConnected<'a> {
    pub weights: &'a [i8],
    pub bias: &'a [i32],
    pub in_features: usize,
    pub out_features: usize,
    pub weight_scale: f32,
    pub input_quant: QuantParams,
    pub output_quant: QuantParams,
    /// Clamp outputs below the output zero-point (ReLU in the real domain).
    pub relu: bool,
}

impl FullyConnected<'_> {
    /// Checks that weight and bias buffers match the declared dimensions.
    pub fn validate(&self) -> Result<(), TensorError> {
        let expected = self.in_features * self.out_features;
        if self.weights.len() != expected {
            return Err(TensorError::BufferSizeMismatch {
                op: "fully_connected (weights)",
                expected,
                actual: self.weights.len(),
            });
        }
        if self.bias.len() != self.out_features {
            return Err(TensorError::BufferSizeMismatch {
                op: "fully_connected (bias)",
                expected: self.out_features * 4,
                actual: self.bias.len() * 4,
            });
        }
        if !self.weight_scale.is_finite() || self.weight_scale <= 0.0 {
            return Err(TensorError::InvalidQuantParams {
                scale: self.weight_scale,
                zero_point: 0,
            });
        }
        self.input_quant.validate()?;
        self.output_quant.validate()
    }
}

/// Computes `output = requantize(W · (input - zp_in) + bias)`.
///
/// Accumulation is in `i64`, saturated to `i32` before the bias; the rescale from accumulator to output uses
/// `input_scale * weight_scale / output_scale` and saturates to int8.
///
/// # Errors
/// Returns [`TensorError::DimensionMismatch`] if `input` or `output` do not
/// match the layer dimensions, or any error from [`FullyConnected::validate`].
pub fn fully_connected(
    layer: &FullyConnected<'_>,
    input: &[i8],
    output: &mut [i8],
) -> Result<(), TensorError> {
    layer.validate()?;
    if input.len() != layer.in_features {
        return Err(TensorError::DimensionMismatch {
            op: "fully_connected",
            detail: format!(
                "input has {} elements, layer expects {}",
                input.len(),
                layer.in_features
            ),
        });
    }
    if output.len() != layer.out_features {
        return Err(TensorError::DimensionMismatch {
            op: "fully_connected",
            detail: format!(
                "output has {} elements, layer produces {}",
                output.len(),
                layer.out_features
            ),
        });
    }

    let multiplier =
        layer.input_quant.scale * layer.weight_scale / layer.output_quant.scale;
    let in_zp = layer.input_quant.zero_point;
    let out_zp = layer.output_quant.zero_point;

    for (o, out) in output.iter_mut().enumerate() {
        let row = &layer.weights[o * layer.in_features..(o + 1) * layer.in_features];
        let dot: i64 = row
            .iter()
            .zip(input)
            .map(|(&w, &x)| i64::from(w) * (i64::from(x) - i64::from(in_zp)))
            .sum();
        let acc = dot.clamp(i64::from(i32::MIN), i64::from(i32::MAX)) as i32;
        let mut q = requantize(acc.saturating_add(layer.bias[o]), multiplier, out_zp);
        if layer.relu && i32::from(q) < out_zp {
            q = out_zp as i8;
        }
        *out = q;
    }
    Ok(())
}
