//! Kilo Scan Benchmarks
//!
//! Benchmarks for automaton construction, searching and persistence.
//! The benchmarks are implemented using the Criterion framework, which provides
//! statistical analysis and performance regression detection.
//!
//! To run the benchmarks:
//! ```bash
//! cargo bench --features benchmarking
//! ```

use criterion::{
    black_box, criterion_group, criterion_main, measurement::WallTime, BenchmarkId, Criterion,
    SamplingMode, Throughput,
};
use std::time::Duration;

use kilo_scan_lib::data_structures::aho_corasick::{AutomatonSearcher, PatternTrie};
use kilo_scan_lib::persistence::AutomatonStore;

const WORDS: &[&str] = &[
    "free", "bitcoin", "pump", "dump", "urgent", "wire", "transfer", "gift", "card", "prize",
    "winner", "claim", "now", "limited", "offer", "account", "verify", "password", "bank", "invest",
];

/// Deterministic phrases of one to three words. Larger sets repeat phrases,
/// which exercises the duplicate path of construction.
fn phrases(count: usize) -> Vec<(String, f64)> {
    (0..count)
        .map(|i| {
            let words = 1 + i % 3;
            let phrase: Vec<&str> = (0..words).map(|w| WORDS[(i * 7 + w * 13) % WORDS.len()]).collect();
            (phrase.join(" "), 0.1 + (i % 5) as f64 / 10.0)
        })
        .collect()
}

/// Deterministic text of roughly `len` bytes.
fn text(len: usize) -> String {
    let mut out = String::with_capacity(len + 16);
    let mut i = 0;
    while out.len() < len {
        out.push_str(WORDS[(i * 11) % WORDS.len()]);
        out.push(' ');
        i += 1;
    }
    out
}

/// Benchmark building the automaton from keyword sets of different sizes.
fn bench_construction(c: &mut Criterion) {
    let mut group = c.benchmark_group("aho_corasick_construct");
    group.sampling_mode(SamplingMode::Flat);
    group.measurement_time(Duration::from_secs(2));
    group.warm_up_time(Duration::from_secs(1));

    for size in [100, 1_000, 10_000].iter() {
        let patterns = phrases(*size);
        group.throughput(Throughput::Elements(*size as u64));
        group.bench_with_input(BenchmarkId::new("patterns", size), &patterns, |b, patterns| {
            b.iter(|| {
                PatternTrie::construct(
                    patterns.iter().map(|(p, w)| (p.as_str(), *w)),
                )
            });
        });
    }

    group.finish();
}

/// Benchmark searching texts of different lengths.
fn bench_search(c: &mut Criterion) {
    let patterns = phrases(1_000);
    let trie = match PatternTrie::construct(patterns.iter().map(|(p, w)| (p.as_str(), *w))) {
        Ok(trie) => trie,
        Err(e) => panic!("benchmark automaton failed to build: {e}"),
    };
    let searcher = AutomatonSearcher::new(trie);

    let mut group = c.benchmark_group("aho_corasick_search");
    group.measurement_time(Duration::from_secs(2));

    for len in [1_024, 16 * 1_024, 256 * 1_024].iter() {
        let input = text(*len);
        group.throughput(Throughput::Bytes(input.len() as u64));

        group.bench_with_input(BenchmarkId::new("count", len), &input, |b, input| {
            b.iter(|| searcher.search(black_box(input)).count());
        });

        group.bench_with_input(BenchmarkId::new("weight_sum", len), &input, |b, input| {
            b.iter(|| searcher.search(black_box(input)).map(|m| *m.payload).sum::<f64>());
        });
    }

    group.bench_function("is_match_miss", |b| {
        let miss = "x".repeat(16 * 1_024);
        b.iter(|| searcher.is_match(black_box(&miss)));
    });

    group.finish();
}

/// Benchmark encoding and decoding the stored automaton.
fn bench_persistence(c: &mut Criterion) {
    let patterns = phrases(1_000);
    let trie = match PatternTrie::construct(patterns.iter().map(|(p, w)| (p.as_str(), *w))) {
        Ok(trie) => trie,
        Err(e) => panic!("benchmark automaton failed to build: {e}"),
    };
    let bytes = match AutomatonStore::to_bytes(&trie) {
        Ok(bytes) => bytes,
        Err(e) => panic!("benchmark automaton failed to encode: {e}"),
    };

    let mut group = c.benchmark_group("automaton_store");
    group.throughput(Throughput::Bytes(bytes.len() as u64));
    group.bench_function("to_bytes", |b| b.iter(|| AutomatonStore::to_bytes(black_box(&trie))));
    group.bench_function("from_bytes", |b| b.iter(|| AutomatonStore::from_bytes(black_box(&bytes))));
    group.finish();
}

// Group all benchmarks together
criterion_group! {
    name = benches;
    config = Criterion::default()
        .with_measurement(WallTime)
        .significance_level(0.01)
        .noise_threshold(0.02)
        .confidence_level(0.99);
    targets = bench_construction, bench_search, bench_persistence
}

criterion_main!(benches);
