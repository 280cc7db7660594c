// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright (c) 2025 Pegasus Heavy Industries, LLC

use std::hint::black_box;

use criterion::{criterion_group, criterion_main, Criterion};
use xenon_core::{compile, parse, scan};

const PROGRAM: &str = r#"
# analysis global print
fn fibonacci(n: Int) {
    n when n < 2 else fibonacci(n - 1) + fibonacci(n - 2)
}

values = [0x10, 0xff, 3.25, 'text', b'bytes', `template`]
pick = (a, b) => a ?? b
total = 0
total += values.?length or 0
print(pick(total, null) when total > 10 else (1, 2, 3))
"#;

fn bench_scan(c: &mut Criterion) {
    c.bench_function("scan_program", |b| {
        b.iter(|| {
            let _ = black_box(scan(black_box(PROGRAM)));
        });
    });
}

fn bench_parse(c: &mut Criterion) {
    c.bench_function("parse_program", |b| {
        b.iter(|| {
            let _ = black_box(parse(black_box(PROGRAM)));
        });
    });
}

fn bench_compile(c: &mut Criterion) {
    c.bench_function("compile_program", |b| {
        b.iter(|| {
            let _ = black_box(compile(black_box(PROGRAM)));
        });
    });
}

#[cfg(feature = "parallel")]
fn bench_compile_parallel(c: &mut Criterion) {
    let sources = vec![PROGRAM; 64];
    let options = xenon_core::CompileOptions::default();
    c.bench_function("compile_parallel_64", |b| {
        b.iter(|| {
            let _ = black_box(xenon_core::compile_parallel(black_box(&sources), &options));
        });
    });
}

#[cfg(not(feature = "parallel"))]
fn bench_compile_parallel(_: &mut Criterion) {}

criterion_group!(
    benches,
    bench_scan,
    bench_parse,
    bench_compile,
    bench_compile_parallel
);
criterion_main!(benches);
