// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! `predictor inspect`: display the model, its tensors and arena usage.

use anyhow::Context;
use runtime::InferenceEngine;
use session::{init_engine, SessionConfig};

pub async fn execute(config: SessionConfig) -> anyhow::Result<()> {
    println!("╔══════════════════════════════════════════════════════╗");
    println!("║              predictor · Model Inspector             ║");
    println!("╚══════════════════════════════════════════════════════╝");
    println!();

    let engine = init_engine(&config).context("model initialization failed")?;
    let graph = engine.graph();

    // ── Summary ────────────────────────────────────────────────
    match &config.model_path {
        Some(path) => println!("  Source: {}", path.display()),
        None => println!("  Source: built-in"),
    }
    println!("  {}", graph.summary());
    println!();

    // ── Tensors ────────────────────────────────────────────────
    println!("  Input:  {}", engine.input_spec().summary());
    println!("  Output: {}", engine.output_spec().summary());
    println!();

    // ── Per-Layer Detail ───────────────────────────────────────
    println!(
        "  {:<4} {:<20} {:>8} {:>10} {:<6} {}",
        "Idx", "Name", "Shape", "Weights", "Act.", "Output quant",
    );
    println!("  {}", "-".repeat(72));
    for (i, layer) in graph.iter_layers().enumerate() {
        println!(
            "  {:<4} {:<20} {:>8} {:>8} B {:<6} {}",
            i,
            layer.name,
            format!("{}→{}", layer.in_features, layer.out_features),
            layer.weight_bytes(),
            format!("{:?}", layer.activation).to_lowercase(),
            layer.output_quant,
        );
    }
    println!();

    // ── Arena ──────────────────────────────────────────────────
    let stats = engine.arena_stats();
    println!("  {}", stats.summary());
    println!(
        "  Session expects {} values per line; model input holds {}.",
        config.expected_values,
        engine.input_spec().num_elements()
    );

    Ok(())
}
