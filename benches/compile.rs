//! Benchmarks for the style compilation pipeline.
//!
//! Run with: cargo bench

use std::hint::black_box;

use criterion::{Criterion, criterion_group, criterion_main};

use stylex_compiler::{
    Bundle, BundleModule, LintOptions, RuleCache, SchemaRegistry, TransformOptions, lint_source,
    transform, transform_with,
};

/// A module with `count` namespaces of mixed base, logical, pseudo and
/// media declarations.
fn sample_module(count: usize) -> String {
    let mut source = String::from("import stylex from '@stylexjs/stylex';\nconst styles = stylex.create({\n");
    for i in 0..count {
        source.push_str(&format!(
            "  ns{i}: {{
    display: 'flex',
    marginStart: {m},
    paddingBlockStart: {m},
    textAlign: 'start',
    width: '{w}%',
    ':hover': {{color: 'red', opacity: 0.5}},
    '@media (max-width: 600px)': {{width: '100%'}},
  }},
",
            m = i % 16,
            w = i % 100,
        ));
    }
    source.push_str("});\n");
    source
}

// ============================================================================
// Single Module Benchmarks
// ============================================================================

fn bench_transform_prod(c: &mut Criterion) {
    let source = sample_module(200);
    let options = TransformOptions::default().with_file_id("bench.js");

    c.bench_function("transform_prod", |b| {
        b.iter(|| transform(black_box(&source), &options).unwrap());
    });
}

fn bench_transform_dev(c: &mut Criterion) {
    let source = sample_module(200);
    let options = TransformOptions::default().with_file_id("bench.js").with_dev(true);

    c.bench_function("transform_dev", |b| {
        b.iter(|| transform(black_box(&source), &options).unwrap());
    });
}

fn bench_transform_warm_cache(c: &mut Criterion) {
    let source = sample_module(200);
    let options = TransformOptions::default().with_file_id("bench.js");
    let cache = RuleCache::default();
    transform_with(&source, &options, &cache, SchemaRegistry::standard()).unwrap();

    c.bench_function("transform_warm_cache", |b| {
        b.iter(|| transform_with(black_box(&source), &options, &cache, SchemaRegistry::standard()).unwrap());
    });
}

fn bench_lint(c: &mut Criterion) {
    let source = sample_module(200);
    let options = LintOptions::default();

    c.bench_function("lint", |b| {
        b.iter(|| lint_source(black_box(&source), &options).unwrap());
    });
}

// ============================================================================
// Bundle Benchmarks
// ============================================================================

fn bench_bundle(c: &mut Criterion) {
    let modules: Vec<_> = (0..64)
        .map(|i| BundleModule::new(format!("m{i}.js"), sample_module(20)))
        .collect();

    c.bench_function("bundle_64_modules", |b| {
        b.iter(|| {
            Bundle::new(TransformOptions::default())
                .compile(black_box(&modules))
                .unwrap()
        });
    });
}

criterion_group!(
    benches,
    // Single module
    bench_transform_prod,
    bench_transform_dev,
    bench_transform_warm_cache,
    bench_lint,
    // Bundle
    bench_bundle,
);
criterion_main!(benches);
