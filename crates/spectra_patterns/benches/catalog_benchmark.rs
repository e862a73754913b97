//! Benchmark for CPU pattern evaluation.
//!
//! TARGET: a full 1920x1080 frame of any pattern well under 100 ms on the CPU
//! reference path.
//!
//! Run with: cargo bench --package spectra_patterns --bench catalog_benchmark

use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use spectra_core::Category;
use spectra_patterns::PatternCatalog;

const RES: [f32; 2] = [1920.0, 1080.0];

fn benchmark_single_pixel(c: &mut Criterion) {
    c.bench_function("channel_hash_per_pixel", |b| {
        let mut x = 0.0f32;
        b.iter(|| {
            x = (x + 0.000_1) % 1.0;
            black_box(PatternCatalog::evaluate(
                black_box([x, 0.5]),
                black_box(1.25),
                RES,
                Category::Dynamic,
                0,
            ))
        });
    });
}

fn benchmark_categories(c: &mut Criterion) {
    let mut group = c.benchmark_group("category_sweep");

    // 64x36 sample grid per pattern
    for category in Category::ALL {
        let count = PatternCatalog::entries(category).len();
        group.throughput(Throughput::Elements((64 * 36 * count) as u64));
        group.bench_function(format!("{category:?}"), |b| {
            b.iter(|| {
                for index in 0..count as i64 {
                    for y in 0..36 {
                        for x in 0..64 {
                            let uv = [x as f32 / 64.0, y as f32 / 36.0];
                            black_box(PatternCatalog::evaluate(uv, 0.5, RES, category, index));
                        }
                    }
                }
            });
        });
    }

    group.finish();
}

fn benchmark_full_frame(c: &mut Criterion) {
    let mut group = c.benchmark_group("full_frame");
    group.sample_size(10);
    group.throughput(Throughput::Elements(1920 * 1080));

    group.bench_function("1080p_multi_scale_hash", |b| {
        b.iter(|| {
            for y in 0..1080 {
                for x in 0..1920 {
                    let uv = [(x as f32 + 0.5) / RES[0], (y as f32 + 0.5) / RES[1]];
                    black_box(PatternCatalog::evaluate(uv, 2.0, RES, Category::Dynamic, 1));
                }
            }
        });
    });

    group.finish();
}

criterion_group!(
    benches,
    benchmark_single_pixel,
    benchmark_categories,
    benchmark_full_frame
);
criterion_main!(benches);
