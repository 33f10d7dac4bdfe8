// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Integration tests: manifest → schema check → arena allocation → invoke.
//!
//! These exercise `model-ir`, `memory-manager`, `tensor-core` and the
//! interpreter together, the same way the session initialises its engine.

use memory_manager::{ArenaSize, MemoryError};
use model_ir::{ModelError, ModelLoader, ModelManifest, BUILTIN_MODEL_JSON, SCHEMA_VERSION};
use runtime::{load_interpreter, InferenceEngine, RuntimeError};
use tensor_core::{as_i8, as_i8_mut, dequantize, QuantParams};

// ── Helpers ────────────────────────────────────────────────────

fn builtin_manifest() -> ModelManifest {
    ModelManifest::from_json(BUILTIN_MODEL_JSON).unwrap()
}

/// A deeper model: 7 → 16 → 16 → 1 with non-trivial quantisation.
fn deep_manifest() -> ModelManifest {
    let json = r#"{
        "name": "deep",
        "schema_version": 3,
        "input":  { "name": "in", "dtype": "i8", "shape": [1, 7],
                    "quant": { "scale": 0.5, "zero_point": -2 } },
        "output": { "name": "out", "dtype": "i8", "shape": [1, 1],
                    "quant": { "scale": 0.25, "zero_point": 1 } },
        "layers": []
    }"#;
    let mut m = ModelManifest::from_json(json).unwrap();
    let dims = [(7usize, 16usize), (16, 16), (16, 1)];
    for (i, &(inputs, outputs)) in dims.iter().enumerate() {
        let last = i == dims.len() - 1;
        m.layers.push(model_ir::DenseLayer {
            name: format!("dense_{i}"),
            in_features: inputs,
            out_features: outputs,
            weights: (0..inputs * outputs).map(|k| ((k % 7) as i8) - 3).collect(),
            weight_scale: 0.05,
            bias: vec![1; outputs],
            output_quant: if last {
                QuantParams::new(0.25, 1).unwrap()
            } else {
                QuantParams::new(0.5, 0).unwrap()
            },
            activation: if last {
                model_ir::Activation::None
            } else {
                model_ir::Activation::Relu
            },
        });
    }
    m
}

fn write_input(engine: &mut impl InferenceEngine, values: &[i8]) {
    let bytes = engine.input_data_mut().unwrap();
    as_i8_mut(bytes).copy_from_slice(values);
}

// ── Pipeline ───────────────────────────────────────────────────

#[test]
fn test_builtin_end_to_end() {
    let graph = ModelLoader::builtin().unwrap();
    let mut engine = load_interpreter(graph, ArenaSize::parse("2K").unwrap()).unwrap();

    write_input(&mut engine, &[1, 2, 3, 4, 5, 6, 7]);
    engine.invoke().unwrap();

    let q = as_i8(engine.output_data().unwrap())[0];
    let real = dequantize(q, engine.output_spec().quant);
    assert_eq!(real, 7.0);
}

#[test]
fn test_deep_model_runs_and_is_deterministic() {
    let graph = ModelLoader::from_manifest(deep_manifest()).unwrap();
    assert_eq!(graph.num_layers(), 3);
    let mut engine = load_interpreter(graph, ArenaSize::from_kb(1)).unwrap();

    write_input(&mut engine, &[10, -20, 30, -40, 50, -60, 70]);
    engine.invoke().unwrap();
    let first = engine.output_data().unwrap().to_vec();

    engine.invoke().unwrap();
    assert_eq!(engine.output_data().unwrap(), first.as_slice());
    assert_eq!(engine.invocations(), 2);
}

#[test]
fn test_input_overwritten_between_requests() {
    let graph = ModelLoader::builtin().unwrap();
    let mut engine = load_interpreter(graph, ArenaSize::from_kb(2)).unwrap();

    write_input(&mut engine, &[0, 0, 0, 0, 0, 10, 20]);
    engine.invoke().unwrap();
    let a = as_i8(engine.output_data().unwrap())[0];

    write_input(&mut engine, &[0, 0, 0, 0, 0, 20, 10]);
    engine.invoke().unwrap();
    let b = as_i8(engine.output_data().unwrap())[0];

    // 1.90625*20 - 10 = 28.1 ; 1.90625*10 - 20 = -0.9
    assert_eq!(a, 28);
    assert_eq!(b, -1);
}

// ── Initialisation failures ────────────────────────────────────

#[test]
fn test_schema_mismatch_is_reported() {
    let mut m = builtin_manifest();
    m.schema_version = SCHEMA_VERSION + 1;
    let err = ModelLoader::from_manifest(m).unwrap_err();
    assert!(matches!(err, ModelError::SchemaVersionMismatch { .. }));

    let runtime_err: RuntimeError = err.into();
    assert!(runtime_err.to_string().contains("schema version mismatch"));
}

#[test]
fn test_arena_exhaustion_is_permanent_for_model() {
    let graph = ModelLoader::from_manifest(deep_manifest()).unwrap();
    // input 7 @0, dense_0 16 @16, dense_1 16 @32, dense_2 1 @48 → needs 49.
    let err = load_interpreter(graph.clone(), ArenaSize::from_bytes(48)).unwrap_err();
    match err {
        RuntimeError::AllocationError(MemoryError::ArenaExhausted { requested_bytes, .. }) => {
            assert_eq!(requested_bytes, 1);
        }
        other => panic!("expected ArenaExhausted, got {other:?}"),
    }
    assert!(load_interpreter(graph, ArenaSize::from_bytes(49)).is_ok());
}

#[test]
fn test_manifest_file_roundtrip() {
    let path = std::env::temp_dir().join(format!("runtime-it-{}.json", std::process::id()));
    std::fs::write(&path, deep_manifest().to_json().unwrap()).unwrap();

    let graph = ModelLoader::load(&path).unwrap();
    assert_eq!(graph.name, "deep");
    assert!(load_interpreter(graph, ArenaSize::from_kb(1)).is_ok());

    std::fs::remove_file(&path).unwrap();
}
