// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Layer definitions.

use crate::ModelError;
use tensor_core::{DType, FullyConnected, QuantParams};

/// Element-wise activation applied after a layer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Activation {
    /// Identity.
    #[default]
    None,
    /// `max(x, 0)` in the real domain.
    Relu,
}

/// One int8 fully-connected layer.
///
/// Weights are stored row-major as `[out_features, in_features]`.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct DenseLayer {
    /// Unique layer name (e.g., `"dense_1"`).
    pub name: String,
    pub in_features: usize,
    pub out_features: usize,
    /// Symmetric int8 weights.
    pub weights: Vec<i8>,
    /// Per-layer weight scale.
    pub weight_scale: f32,
    /// Bias in the accumulator domain (`input_scale * weight_scale`).
    pub bias: Vec<i32>,
    /// Quantisation of this layer's output tensor.
    pub output_quant: QuantParams,
    #[serde(default)]
    pub activation: Activation,
}

impl DenseLayer {
    /// Bytes occupied by weights and bias (kept outside the arena).
    pub fn weight_bytes(&self) -> usize {
        self.weights.len() * DType::I8.size_bytes() + self.bias.len() * DType::I32.size_bytes()
    }

    /// Bytes of the int8 activation this layer writes into the arena.
    pub fn output_bytes(&self) -> usize {
        self.out_features * DType::I8.size_bytes()
    }

    /// Borrows this layer as kernel parameters, given the quantisation of
    /// the tensor feeding it.
    pub fn as_kernel(&self, input_quant: QuantParams) -> FullyConnected<'_> {
        FullyConnected {
            weights: &self.weights,
            bias: &self.bias,
            in_features: self.in_features,
            out_features: self.out_features,
            weight_scale: self.weight_scale,
            input_quant,
            output_quant: self.output_quant,
            relu: self.activation == Activation::Relu,
        }
    }

    /// Checks buffer lengths and scales for this layer in isolation.
    pub fn validate(&self) -> Result<(), ModelError> {
        let invalid = |detail: String| ModelError::InvalidLayer {
            layer: self.name.clone(),
            detail,
        };

        if self.name.is_empty() {
            return Err(invalid("layer name is empty".into()));
        }
        if self.in_features == 0 || self.out_features == 0 {
            return Err(invalid(format!(
                "zero-sized layer {}x{}",
                self.out_features, self.in_features
            )));
        }
        if self.weights.len() != self.in_features * self.out_features {
            return Err(invalid(format!(
                "expected {} weights for {}x{}, got {}",
                self.in_features * self.out_features,
                self.out_features,
                self.in_features,
                self.weights.len()
            )));
        }
        if self.bias.len() != self.out_features {
            return Err(invalid(format!(
                "expected {} bias values, got {}",
                self.out_features,
                self.bias.len()
            )));
        }
        if !self.weight_scale.is_finite() || self.weight_scale <= 0.0 {
            return Err(invalid(format!("weight scale {} must be positive", self.weight_scale)));
        }
        self.output_quant
            .validate()
            .map_err(|e| invalid(e.to_string()))
    }

    /// One-line description.
    pub fn summary(&self) -> String {
        format!(
            "{}: dense {}→{} ({:?}), {} B weights, out {}",
            self.name,
            self.in_features,
            self.out_features,
            self.activation,
            self.weight_bytes(),
            self.output_quant,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dense(name: &str, inputs: usize, outputs: usize) -> DenseLayer {
        DenseLayer {
            name: name.into(),
            in_features: inputs,
            out_features: outputs,
            weights: vec![1; inputs * outputs],
            weight_scale: 1.0,
            bias: vec![0; outputs],
            output_quant: QuantParams::identity(),
            activation: Activation::None,
        }
    }

    #[test]
    fn test_validate_ok() {
        assert!(dense("d", 7, 2).validate().is_ok());
    }

    #[test]
    fn test_validate_weight_count() {
        let mut l = dense("d", 7, 2);
        l.weights.pop();
        let err = l.validate().unwrap_err().to_string();
        assert!(err.contains("expected 14 weights"), "{err}");
    }

    #[test]
    fn test_validate_bias_and_scale() {
        let mut l = dense("d", 3, 2);
        l.bias = vec![0];
        assert!(l.validate().is_err());

        let mut l = dense("d", 3, 2);
        l.weight_scale = 0.0;
        assert!(l.validate().is_err());

        let mut l = dense("d", 3, 2);
        l.output_quant.scale = -1.0;
        assert!(l.validate().is_err());
    }

    #[test]
    fn test_sizes() {
        let l = dense("d", 7, 2);
        assert_eq!(l.weight_bytes(), 14 + 8);
        assert_eq!(l.output_bytes(), 2);
    }

    #[test]
    fn test_as_kernel_carries_activation() {
        let mut l = dense("d", 2, 1);
        l.activation = Activation::Relu;
        let k = l.as_kernel(QuantParams::identity());
        assert!(k.relu);
        assert_eq!(k.in_features, 2);
    }

    #[test]
    fn test_serde_defaults_activation() {
        let json = r#"{
            "name": "d", "in_features": 1, "out_features": 1,
            "weights": [3], "weight_scale": 0.5, "bias": [0],
            "output_quant": { "scale": 1.0, "zero_point": 0 }
        }"#;
        let l: DenseLayer = serde_json::from_str(json).unwrap();
        assert_eq!(l.activation, Activation::None);
        assert_eq!(l.weights, vec![3]);
    }
}
