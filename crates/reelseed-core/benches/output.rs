//! Benchmarks for SQL rendering — INSERT building and full script assembly.
//!
//! Uses a black-hole writer to isolate formatting cost from I/O.

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::io::Write;
use std::path::Path;

use reelseed_core::config::SeedConfig;
use reelseed_core::generate::entities::{generate_users, generate_watches};
use reelseed_core::generate::relationships::PrimaryFlagPolicy;
use reelseed_core::output::sql;
use reelseed_core::seed::{self, SeedSettings};
use reelseed_core::MovieIds;

/// A writer that discards all output — isolates formatter cost from I/O.
struct NullWriter;

impl Write for NullWriter {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        Ok(buf.len())
    }
    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

fn base_time() -> chrono::NaiveDateTime {
    chrono::NaiveDateTime::new(
        chrono::NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
        chrono::NaiveTime::from_hms_opt(0, 0, 0).unwrap(),
    )
}

fn movies() -> MovieIds {
    let ids: Vec<String> = (1..=2_000).map(|i| i.to_string()).collect();
    MovieIds::parse(&format!("[{}]", ids.join(",")), Path::new("bench.json")).unwrap()
}

fn bench_build_insert(c: &mut Criterion) {
    let mut group = c.benchmark_group("output/insert");
    let movies = movies();

    for row_count in [100, 1000, 10_000] {
        let mut rng = StdRng::seed_from_u64(42);
        let users = generate_users(row_count, &mut rng, base_time());
        let watches = generate_watches(row_count, &movies, 500, &mut rng, base_time());
        group.throughput(Throughput::Elements(row_count as u64));
        group.bench_with_input(BenchmarkId::new("users", row_count), &users, |b, rows| {
            b.iter(|| sql::build_insert(rows).unwrap());
        });
        group.bench_with_input(BenchmarkId::new("watches", row_count), &watches, |b, rows| {
            b.iter(|| sql::build_insert(rows).unwrap());
        });
    }
    group.finish();
}

fn bench_full_script(c: &mut Criterion) {
    let config = SeedConfig::default();
    let movies = movies();
    let settings = SeedSettings {
        seed: 42,
        base_time: base_time(),
        transactional: true,
        primary_flags: PrimaryFlagPolicy::Loose,
    };

    c.bench_function("output/generate_default", |b| {
        b.iter(|| seed::generate(&config, &settings, &movies, None).unwrap());
    });

    let script = seed::generate(&config, &settings, &movies, None).unwrap();
    c.bench_function("output/write_default", |b| {
        b.iter(|| {
            let mut w = NullWriter;
            sql::write_script(&mut w, &script).unwrap();
        });
    });
}

criterion_group!(benches, bench_build_insert, bench_full_script);
criterion_main!(benches);
