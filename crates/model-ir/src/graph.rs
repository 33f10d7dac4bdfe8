// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Model graph: a chain of dense layers between one input and one output.
//!
//! # Type-State Pattern
//!
//! ```text
//! ModelGraph<Loaded>     — parsed from a manifest, not yet checked.
//!       │  .validate()
//!       ▼
//! ModelGraph<Validated>  — dimensions and scales verified; safe to allocate.
//! ```
//!
//! The engine only accepts `ModelGraph<Validated>`, so it never has to
//! re-check layer dimensions while sizing the arena.

use crate::{DenseLayer, ModelError, ModelManifest};
use std::collections::HashSet;
use std::fmt;
use tensor_core::TensorSpec;

// ── Type-state markers ─────────────────────────────────────────────

/// Marker: graph has been loaded but not validated.
#[derive(Debug, Clone)]
pub struct Loaded;

/// Marker: graph has been validated.
#[derive(Debug, Clone)]
pub struct Validated;

/// Sealed trait for graph states.
pub trait GraphState: fmt::Debug + Clone {}
impl GraphState for Loaded {}
impl GraphState for Validated {}

// ── ModelGraph ─────────────────────────────────────────────────────

/// The model as an ordered chain of layers.
#[derive(Debug, Clone)]
pub struct ModelGraph<S: GraphState = Loaded> {
    /// Model name.
    pub name: String,
    input: TensorSpec,
    output: TensorSpec,
    layers: Vec<DenseLayer>,
    _state: std::marker::PhantomData<S>,
}

impl ModelGraph<Loaded> {
    /// Creates a graph in the `Loaded` state.
    pub fn new(
        name: String,
        input: TensorSpec,
        output: TensorSpec,
        layers: Vec<DenseLayer>,
    ) -> Self {
        Self {
            name,
            input,
            output,
            layers,
            _state: std::marker::PhantomData,
        }
    }

    /// Builds a graph from a parsed manifest. Does not check the schema
    /// version; see [`crate::ModelLoader`].
    pub fn from_manifest(manifest: ModelManifest) -> Self {
        Self::new(manifest.name, manifest.input, manifest.output, manifest.layers)
    }

    /// Validates the graph and transitions to the `Validated` state.
    ///
    /// # Checks
    /// - Input and output tensors are non-empty with usable quantisation.
    /// - At least one layer; names are unique.
    /// - Each layer is internally consistent (see [`DenseLayer::validate`]).
    /// - The first layer consumes the input element count, each layer
    ///   consumes what the previous one produces, and the last layer
    ///   produces the output element count with the output's quantisation.
    ///
    /// Tensor element kinds are *not* checked here; a kind the engine
    /// cannot service is reported per request.
    pub fn validate(self) -> Result<ModelGraph<Validated>, ModelError> {
        for spec in [&self.input, &self.output] {
            if spec.shape.is_empty() {
                return Err(ModelError::InvalidTensor {
                    tensor: spec.name.clone(),
                    detail: format!("shape {} has no elements", spec.shape),
                });
            }
            spec.quant.validate().map_err(|e| ModelError::InvalidTensor {
                tensor: spec.name.clone(),
                detail: e.to_string(),
            })?;
        }

        let (Some(first), Some(last)) = (self.layers.first(), self.layers.last()) else {
            return Err(ModelError::InvalidGraph("model graph contains no layers".into()));
        };

        let mut seen = HashSet::new();
        for layer in &self.layers {
            layer.validate()?;
            if !seen.insert(layer.name.as_str()) {
                return Err(ModelError::InvalidLayer {
                    layer: layer.name.clone(),
                    detail: "duplicate layer name".into(),
                });
            }
        }

        if first.in_features != self.input.num_elements() {
            return Err(ModelError::InvalidGraph(format!(
                "input '{}' has {} elements but '{}' expects {}",
                self.input.name,
                self.input.num_elements(),
                first.name,
                first.in_features
            )));
        }
        for pair in self.layers.windows(2) {
            if pair[0].out_features != pair[1].in_features {
                return Err(ModelError::InvalidGraph(format!(
                    "'{}' produces {} values but '{}' expects {}",
                    pair[0].name, pair[0].out_features, pair[1].name, pair[1].in_features
                )));
            }
        }
        if last.out_features != self.output.num_elements() {
            return Err(ModelError::InvalidGraph(format!(
                "'{}' produces {} values but output '{}' has {} elements",
                last.name,
                last.out_features,
                self.output.name,
                self.output.num_elements()
            )));
        }
        if last.output_quant != self.output.quant {
            return Err(ModelError::InvalidGraph(format!(
                "'{}' output quantisation ({}) differs from output '{}' ({})",
                last.name, last.output_quant, self.output.name, self.output.quant
            )));
        }

        tracing::debug!("model '{}' validated: {} layers", self.name, self.layers.len());
        Ok(ModelGraph {
            name: self.name,
            input: self.input,
            output: self.output,
            layers: self.layers,
            _state: std::marker::PhantomData,
        })
    }
}

impl ModelGraph<Validated> {
    /// Returns the number of layers.
    pub fn num_layers(&self) -> usize {
        self.layers.len()
    }

    /// Returns a layer by index.
    pub fn layer(&self, index: usize) -> Option<&DenseLayer> {
        self.layers.get(index)
    }

    /// Iterates over the layers in execution order.
    pub fn iter_layers(&self) -> impl Iterator<Item = &DenseLayer> {
        self.layers.iter()
    }

    /// Total bytes of weights and biases.
    pub fn total_weight_bytes(&self) -> usize {
        self.layers.iter().map(DenseLayer::weight_bytes).sum()
    }

    /// Arena bytes needed for the input tensor and every layer output,
    /// before alignment padding.
    pub fn activation_bytes(&self) -> usize {
        self.input.size_bytes() + self.layers.iter().map(DenseLayer::output_bytes).sum::<usize>()
    }

    /// Returns a summary string describing the model.
    pub fn summary(&self) -> String {
        format!(
            "Model '{}': {} layers, {} B weights, {} B activations, {} → {}",
            self.name,
            self.num_layers(),
            self.total_weight_bytes(),
            self.activation_bytes(),
            self.input.shape,
            self.output.shape,
        )
    }
}

impl<S: GraphState> ModelGraph<S> {
    /// Model input tensor.
    pub fn input(&self) -> &TensorSpec {
        &self.input
    }

    /// Model output tensor.
    pub fn output(&self) -> &TensorSpec {
        &self.output
    }
}

impl<S: GraphState> fmt::Display for ModelGraph<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "ModelGraph '{}' ({} layers):", self.name, self.layers.len())?;
        writeln!(f, "  input:  {}", self.input.summary())?;
        for layer in &self.layers {
            writeln!(f, "  {}", layer.summary())?;
        }
        writeln!(f, "  output: {}", self.output.summary())
    }
}
