//! Search benchmarks.
//!
//! A search is a linear scan over precomputed normalised keys, so cost grows
//! with dataset size and with the number of matches that have to be cloned
//! out.
//!
//! # Groups
//!
//! | Group | What it measures |
//! |-------|-----------------|
//! | `search/hit_rate` | 100k records with broad, narrow and empty match sets |
//! | `search/scaling` | Full search (normalise query + scan) from 1k to 1M records |
//! | `record_set/build` | Building a `RecordSet`, including key normalisation |
//!
//! # Viewing results
//!
//! ```sh
//! cargo bench --bench search_bench
//! open target/criterion/report/index.html
//! ```

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use natega_core::{search, RecordSet, ResultRecord, SeatNumber};
use std::hint::black_box;

const FIRST_NAMES: &[&str] = &["أحمد", "محمد", "إبراهيم", "مصطفى", "آمنة", "زينب", "رؤوف", "يوسف"];
const LAST_NAMES: &[&str] = &["علي", "حسن", "محمود", "سامي", "كمال", "عبد الله"];

fn synthetic(n: usize) -> Vec<ResultRecord> {
    (0..n)
        .map(|i| ResultRecord {
            seat_number: SeatNumber::Number(100_000 + i as i64),
            name: format!(
                "{} {} {}",
                FIRST_NAMES[i % FIRST_NAMES.len()],
                LAST_NAMES[(i / FIRST_NAMES.len()) % LAST_NAMES.len()],
                LAST_NAMES[i % LAST_NAMES.len()],
            ),
            score: (i % 411) as f64,
            status: "ناجح".to_string(),
        })
        .collect()
}

fn hit_rate_bench(c: &mut Criterion) {
    let records = RecordSet::new(synthetic(100_000));
    let mut group = c.benchmark_group("search/hit_rate");
    group.throughput(Throughput::Elements(records.len() as u64));

    // Alef folding puts three of the eight first names under "ا".
    for (label, query) in [("broad", "ا"), ("narrow", "احمد علي علي"), ("none", "خالد")] {
        group.bench_with_input(BenchmarkId::from_parameter(label), query, |b, query| {
            b.iter(|| search(black_box(query), black_box(&records)))
        });
    }
    group.finish();
}

fn scaling_bench(c: &mut Criterion) {
    let mut group = c.benchmark_group("search/scaling");
    for size in [1_000, 10_000, 100_000, 1_000_000] {
        let records = RecordSet::new(synthetic(size));
        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &records, |b, records| {
            b.iter(|| search(black_box("مصطفي"), black_box(records)))
        });
    }
    group.finish();
}

fn build_bench(c: &mut Criterion) {
    let mut group = c.benchmark_group("record_set/build");
    for size in [10_000, 100_000] {
        let records = synthetic(size);
        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &records, |b, records| {
            b.iter(|| RecordSet::new(black_box(records.clone())))
        });
    }
    group.finish();
}

criterion_group!(benches, hit_rate_bench, scaling_bench, build_bench);
criterion_main!(benches);
