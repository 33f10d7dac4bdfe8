// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! The engine capability and the reference interpreter.
//!
//! ```text
//! Interpreter<Unallocated>
//!     │  .allocate_tensors()
//!     ▼
//! Interpreter<Allocated>  ── impl InferenceEngine
//!     │  .invoke()
//!     ▼
//!   output tensor (arena slot)
//! ```
//!
//! The transition consumes the old value, so a forward pass on an
//! unallocated interpreter is a compile error.

use crate::RuntimeError;
use memory_manager::{ArenaSize, ArenaSlot, ArenaStats, TensorArena};
use model_ir::{graph::Validated, ModelGraph};
use tensor_core::{as_i8, as_i8_mut, fully_connected, DType, TensorSpec};

// ── Capability ─────────────────────────────────────────────────

/// What the session needs from an inference engine.
///
/// Tensor data is exposed as raw bytes together with its [`TensorSpec`];
/// callers must check [`TensorSpec::dtype`] before interpreting them.
pub trait InferenceEngine {
    /// Descriptor of the model input.
    fn input_spec(&self) -> &TensorSpec;

    /// Descriptor of the model output.
    fn output_spec(&self) -> &TensorSpec;

    /// Writable bytes of the input tensor.
    fn input_data_mut(&mut self) -> Result<&mut [u8], RuntimeError>;

    /// Bytes of the output tensor as left by the last [`invoke`](Self::invoke).
    fn output_data(&self) -> Result<&[u8], RuntimeError>;

    /// Runs one forward pass over the current input tensor.
    fn invoke(&mut self) -> Result<(), RuntimeError>;
}

// ── Type-state markers ─────────────────────────────────────────

/// Interpreter holds a validated model but no tensors yet.
#[derive(Debug)]
pub struct Unallocated;

/// Every tensor has a slot in the arena; the interpreter can run.
#[derive(Debug)]
pub struct Allocated;

/// Sealed trait for interpreter states.
pub trait InterpreterState: std::fmt::Debug {}
impl InterpreterState for Unallocated {}
impl InterpreterState for Allocated {}

// ── Interpreter ────────────────────────────────────────────────

/// Reference int8 interpreter for dense-layer chains.
///
/// Tensor layout in the arena: the input tensor, then one slot per layer
/// output in execution order. The last layer's slot is the model output.
///
/// # Example
/// ```
/// use memory_manager::ArenaSize;
/// use model_ir::ModelLoader;
/// use runtime::{InferenceEngine, Interpreter};
///
/// let graph = ModelLoader::builtin().unwrap();
/// let mut engine = Interpreter::new(graph, ArenaSize::from_kb(2))
///     .allocate_tensors()
///     .unwrap();
/// engine.input_data_mut().unwrap().copy_from_slice(&[1, 2, 3, 4, 5, 6, 7]);
/// engine.invoke().unwrap();
/// assert_eq!(engine.output_data().unwrap(), &[7]);
/// ```
pub struct Interpreter<S: InterpreterState = Unallocated> {
    graph: ModelGraph<Validated>,
    arena: TensorArena,
    slots: Vec<ArenaSlot>,
    invocations: u64,
    _state: std::marker::PhantomData<S>,
}

impl Interpreter<Unallocated> {
    /// Creates an interpreter and reserves its arena.
    pub fn new(graph: ModelGraph<Validated>, arena_size: ArenaSize) -> Self {
        tracing::info!("interpreter created for '{}', arena {arena_size}", graph.name);
        Self {
            graph,
            arena: TensorArena::new(arena_size),
            slots: Vec::new(),
            invocations: 0,
            _state: std::marker::PhantomData,
        }
    }

    /// Places every tensor in the arena.
    ///
    /// # Errors
    /// [`RuntimeError::AllocationError`] if the model does not fit. The
    /// arena is sized once, so this failure is permanent for this model.
    pub fn allocate_tensors(mut self) -> Result<Interpreter<Allocated>, RuntimeError> {
        let mut slots = Vec::with_capacity(self.graph.num_layers() + 1);
        slots.push(self.arena.allocate(self.graph.input().size_bytes())?);
        for layer in self.graph.iter_layers() {
            slots.push(self.arena.allocate(layer.output_bytes())?);
        }
        tracing::info!("tensors allocated: {}", self.arena.stats().summary());

        Ok(Interpreter {
            graph: self.graph,
            arena: self.arena,
            slots,
            invocations: 0,
            _state: std::marker::PhantomData,
        })
    }
}

impl Interpreter<Allocated> {
    /// Returns the model graph.
    pub fn graph(&self) -> &ModelGraph<Validated> {
        &self.graph
    }

    /// Returns arena usage counters.
    pub fn arena_stats(&self) -> ArenaStats {
        self.arena.stats()
    }

    /// Number of successful forward passes.
    pub fn invocations(&self) -> u64 {
        self.invocations
    }

    fn input_slot(&self) -> ArenaSlot {
        self.slots[0]
    }

    fn output_slot(&self) -> ArenaSlot {
        self.slots[self.slots.len() - 1]
    }
}

impl InferenceEngine for Interpreter<Allocated> {
    fn input_spec(&self) -> &TensorSpec {
        self.graph.input()
    }

    fn output_spec(&self) -> &TensorSpec {
        self.graph.output()
    }

    fn input_data_mut(&mut self) -> Result<&mut [u8], RuntimeError> {
        let slot = self.input_slot();
        Ok(self.arena.slice_mut(slot)?)
    }

    fn output_data(&self) -> Result<&[u8], RuntimeError> {
        Ok(self.arena.slice(self.output_slot())?)
    }

    fn invoke(&mut self) -> Result<(), RuntimeError> {
        let input = self.graph.input();
        input
            .expect_dtype("invoke", DType::I8)
            .map_err(|source| RuntimeError::ExecutionError {
                layer: input.name.clone(),
                source,
            })?;

        let mut input_quant = input.quant;
        for (i, layer) in self.graph.iter_layers().enumerate() {
            let (src, dst) = self.arena.split_pair(self.slots[i], self.slots[i + 1])?;
            fully_connected(&layer.as_kernel(input_quant), as_i8(src), as_i8_mut(dst)).map_err(
                |source| RuntimeError::ExecutionError {
                    layer: layer.name.clone(),
                    source,
                },
            )?;
            input_quant = layer.output_quant;
        }

        self.invocations += 1;
        tracing::debug!(
            "invoke #{} complete: {} layers",
            self.invocations,
            self.graph.num_layers()
        );
        Ok(())
    }
}

impl<S: InterpreterState> std::fmt::Debug for Interpreter<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Interpreter")
            .field("state", &std::any::type_name::<S>())
            .field("model", &self.graph.name)
            .field("arena", &self.arena.stats())
            .field("invocations", &self.invocations)
            .finish()
    }
}

/// Builds a ready interpreter from an already validated graph.
pub fn load_interpreter(
    graph: ModelGraph<Validated>,
    arena_size: ArenaSize,
) -> Result<Interpreter<Allocated>, RuntimeError> {
    Interpreter::new(graph, arena_size).allocate_tensors()
}

#[cfg(test)]
mod tests {
    use super::*;
    use model_ir::{Activation, DenseLayer, ModelLoader};
    use tensor_core::{QuantParams, Shape};

    fn builtin(arena: ArenaSize) -> Result<Interpreter<Allocated>, RuntimeError> {
        load_interpreter(ModelLoader::builtin().unwrap(), arena)
    }

    fn run(engine: &mut Interpreter<Allocated>, values: [i8; 7]) -> i8 {
        let bytes = engine.input_data_mut().unwrap();
        as_i8_mut(bytes).copy_from_slice(&values);
        engine.invoke().unwrap();
        as_i8(engine.output_data().unwrap())[0]
    }

    #[test]
    fn test_allocation_layout() {
        let engine = builtin(ArenaSize::from_kb(2)).unwrap();
        let stats = engine.arena_stats();
        // input (7) @0, dense_1 (2) @16, dense_2 (1) @32
        assert_eq!(stats.allocations, 3);
        assert_eq!(stats.used_bytes, 33);
        assert_eq!(stats.capacity_bytes, 2048);
    }

    #[test]
    fn test_arena_too_small() {
        let err = builtin(ArenaSize::from_bytes(20)).unwrap_err();
        assert!(matches!(err, RuntimeError::AllocationError(_)), "{err}");
    }

    #[test]
    fn test_builtin_predictions() {
        let mut engine = builtin(ArenaSize::from_kb(2)).unwrap();
        // 1.90625 * 7 - 6 = 7.34
        assert_eq!(run(&mut engine, [1, 2, 3, 4, 5, 6, 7]), 7);
        // Falling edge: 1.90625 * -40 + 20 = -56.25
        assert_eq!(run(&mut engine, [0, 0, 0, 0, 0, -20, -40]), -56);
        // Saturation on the positive ReLU branch.
        assert_eq!(run(&mut engine, [0, 0, 0, 0, 0, -127, 127]), 127);
        assert_eq!(engine.invocations(), 3);
    }

    #[test]
    fn test_non_int8_input_fails_invoke() {
        let graph = ModelGraph::new(
            "float-in".into(),
            TensorSpec {
                name: "in".into(),
                dtype: DType::F32,
                shape: Shape::batch_of_one(1),
                quant: QuantParams::identity(),
            },
            TensorSpec::int8("out", Shape::batch_of_one(1), QuantParams::identity()),
            vec![DenseLayer {
                name: "d".into(),
                in_features: 1,
                out_features: 1,
                weights: vec![1],
                weight_scale: 1.0,
                bias: vec![0],
                output_quant: QuantParams::identity(),
                activation: Activation::None,
            }],
        )
        .validate()
        .unwrap();
        let mut engine = load_interpreter(graph, ArenaSize::from_kb(1)).unwrap();
        assert_eq!(engine.input_data_mut().unwrap().len(), 4);
        assert!(matches!(
            engine.invoke(),
            Err(RuntimeError::ExecutionError { .. })
        ));
        assert_eq!(engine.invocations(), 0);
    }

    #[test]
    fn test_debug_format() {
        let engine = builtin(ArenaSize::from_kb(2)).unwrap();
        let debug = format!("{engine:?}");
        assert!(debug.contains("Interpreter"));
        assert!(debug.contains("Allocated"));
        assert!(debug.contains("sine-extrapolator"));
    }
}
