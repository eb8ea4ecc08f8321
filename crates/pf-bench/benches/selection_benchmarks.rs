//! Selection Benchmarks
//!
//! Table building, row lookup and selection operations.

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use pf_bench::{CATEGORY_COUNTS, generate_domains, generate_specs};
use pf_lab::presets::{BannerDetail, banner_domains};
use pf_lab::{SelectionEngine, build_selection_table, select_row};
use rand::prelude::*;
use rand_chacha::ChaCha8Rng;

/// Benchmark probability table construction
fn bench_build_table(c: &mut Criterion) {
    let mut group = c.benchmark_group("build_table");

    for &categories in CATEGORY_COUNTS {
        let specs = generate_specs(categories, 8, 42);
        group.throughput(Throughput::Elements((categories * 8) as u64));

        group.bench_with_input(BenchmarkId::from_parameter(categories * 8), &specs, |b, specs| {
            b.iter(|| black_box(build_selection_table(black_box(specs))))
        });
    }

    group.finish();
}

/// Benchmark a single weighted lookup
fn bench_select_row(c: &mut Criterion) {
    let mut group = c.benchmark_group("select_row");
    let mut rng = ChaCha8Rng::seed_from_u64(42);

    for &categories in CATEGORY_COUNTS {
        let Ok(table) = build_selection_table(&generate_specs(categories, 8, 42)) else {
            continue;
        };

        group.bench_with_input(BenchmarkId::from_parameter(table.len()), &table, |b, table| {
            b.iter(|| black_box(select_row(table, rng.random::<f64>())))
        });
    }

    group.finish();
}

/// Benchmark full selection operations
fn bench_select_prizes(c: &mut Criterion) {
    let mut group = c.benchmark_group("select_prizes");
    let engine = SelectionEngine::new();
    let mut rng = ChaCha8Rng::seed_from_u64(42);

    if let Ok(banner) = banner_domains(BannerDetail::Detailed, None) {
        group.bench_function("banner", |b| {
            b.iter(|| black_box(engine.select_prizes(&banner, &mut rng)))
        });
        group.bench_function("banner_x100", |b| {
            b.iter(|| black_box(engine.select_prizes_repeated(&banner, 100, &mut rng)))
        });
    }

    let wide = generate_domains(4, 16, 8, 25, 42);
    group.bench_function("four_wide_domains", |b| {
        b.iter(|| black_box(engine.select_prizes(&wide, &mut rng)))
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_build_table,
    bench_select_row,
    bench_select_prizes
);
criterion_main!(benches);
