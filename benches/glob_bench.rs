// Criterion benchmark suite for compilation and matching.
//
// Run: cargo bench
// Specific group: cargo bench -- match
// HTML report: target/criterion/report/index.html

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use globrune::prelude::*;

const PATTERNS: &[(&str, &str)] = &[
    ("literal", "src/parse.rs"),
    ("star", "src/*.rs"),
    ("globstar", "src/**/*.rs"),
    ("braces", "src/**/{*.rs,*.toml,[!.]*}"),
    ("class", "log/[0-9][0-9][0-9][0-9]-[0-1][0-9]-*.txt"),
];

const INPUTS: &[&str] = &[
    "src/parse.rs",
    "src/deeply/nested/module/tree/with/many/segments/file.rs",
    "log/2026-10-archive.txt",
    "target/debug/build/globrune-0123456789abcdef/out/generated.rs",
];

fn bench_compile(c: &mut Criterion) {
    let mut group = c.benchmark_group("compile");
    for (name, pattern) in PATTERNS {
        group.bench_with_input(BenchmarkId::from_parameter(name), pattern, |b, p| {
            b.iter(|| Glob::new(black_box(p)).unwrap())
        });
    }
    group.finish();
}

fn bench_match(c: &mut Criterion) {
    let mut group = c.benchmark_group("match");
    for (name, pattern) in PATTERNS {
        let glob = Glob::new(pattern).unwrap();
        group.bench_function(BenchmarkId::from_parameter(name), |b| {
            b.iter(|| {
                for input in INPUTS {
                    black_box(glob.is_match(black_box(input)).unwrap());
                }
            })
        });
    }
    group.finish();
}

fn bench_backtracking(c: &mut Criterion) {
    let mut group = c.benchmark_group("backtracking");
    let glob = Glob::builder("*a*a*a*a*b").full_match(true).build().unwrap();
    let input = "a".repeat(24);
    group.bench_function("stars", |b| b.iter(|| glob.is_match(black_box(&input)).unwrap()));

    let glob = Glob::new("**/x/**/y/**/z").unwrap();
    let input = "a/".repeat(32);
    group.bench_function("globstars", |b| b.iter(|| glob.is_match(black_box(&input)).unwrap()));
    group.finish();
}

fn bench_set(c: &mut Criterion) {
    let set = GlobSet::new(PATTERNS.iter().map(|(_, p)| *p)).unwrap();
    c.bench_function("set/matches", |b| {
        b.iter(|| {
            for input in INPUTS {
                black_box(set.matches(black_box(input)).unwrap());
            }
        })
    });
}

criterion_group!(benches, bench_compile, bench_match, bench_backtracking, bench_set);
criterion_main!(benches);
