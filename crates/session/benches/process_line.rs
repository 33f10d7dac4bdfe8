// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Benchmarks for line parsing and full per-line processing.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use session::{init_engine, LineParser, ParseMode, Session, SessionConfig};

fn bench_parse(c: &mut Criterion) {
    let permissive = LineParser::new(7, ParseMode::Permissive);
    let strict = LineParser::new(7, ParseMode::Strict);
    let line = "12,-34,56,-78,90,-12,34";

    c.bench_function("parse_permissive", |b| {
        b.iter(|| permissive.parse(black_box(line)).unwrap())
    });
    c.bench_function("parse_strict", |b| {
        b.iter(|| strict.parse(black_box(line)).unwrap())
    });
}

fn bench_process_line(c: &mut Criterion) {
    let config = SessionConfig {
        echo: false,
        ..Default::default()
    };
    let mut session = Session::boot(config, std::io::sink(), init_engine).unwrap();

    c.bench_function("process_line_builtin", |b| {
        b.iter(|| session.process_line(black_box("1,2,3,4,5,6,7")).unwrap())
    });
    c.bench_function("feed_line_builtin", |b| {
        b.iter(|| {
            for &byte in b"1,2,3,4,5,6,7\r" {
                session.feed_char(black_box(byte)).unwrap();
            }
        })
    });
}

criterion_group!(benches, bench_parse, bench_process_line);
criterion_main!(benches);
