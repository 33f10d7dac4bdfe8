// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Benchmarks for quantisation arithmetic and the int8 dense kernel.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use tensor_core::{clamp_round, dequantize, fully_connected, quantize, FullyConnected, QuantParams};

fn bench_quantize_line(c: &mut Criterion) {
    let params = QuantParams::new(0.5, 0).unwrap();
    let values = [1, 2, 3, 4, 5, 6, 7];
    c.bench_function("quantize_7_values", |b| {
        b.iter(|| {
            let mut out = [0i8; 7];
            for (q, &v) in out.iter_mut().zip(values.iter()) {
                *q = quantize(black_box(v), params);
            }
            out
        })
    });
}

fn bench_dequantize_clamp(c: &mut Criterion) {
    let params = QuantParams::new(0.75, -2).unwrap();
    c.bench_function("dequantize_clamp_round", |b| {
        b.iter(|| clamp_round(dequantize(black_box(42), params)))
    });
}

fn bench_fully_connected(c: &mut Criterion) {
    let weights: Vec<i8> = (0..16 * 7).map(|i| (i % 13) as i8 - 6).collect();
    let bias = vec![3i32; 16];
    let layer = FullyConnected {
        weights: &weights,
        bias: &bias,
        in_features: 7,
        out_features: 16,
        weight_scale: 0.05,
        input_quant: QuantParams::identity(),
        output_quant: QuantParams::new(0.5, 0).unwrap(),
        relu: true,
    };
    let input = [1i8, 2, 3, 4, 5, 6, 7];
    c.bench_function("fully_connected_7x16", |b| {
        let mut out = [0i8; 16];
        b.iter(|| fully_connected(&layer, black_box(&input), &mut out).unwrap())
    });
}

criterion_group!(
    benches,
    bench_quantize_line,
    bench_dequantize_clamp,
    bench_fully_connected
);
criterion_main!(benches);
