//! Benchmarks for display width and line breaking.
//!
//! Run with: cargo bench -p quale-text

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use quale_text::{BreakOptions, break_line, width_of};
use std::hint::black_box;

// =============================================================================
// Test Data
// =============================================================================

fn cycle(pattern: &str, len: usize) -> String {
    pattern.chars().cycle().take(len).collect()
}

fn ascii_text(len: usize) -> String {
    cycle("The quick brown fox jumps over the lazy dog. ", len)
}

fn cjk_text(len: usize) -> String {
    cycle("\u{4E2D}\u{6587}\u{6D4B}\u{8BD5}\u{6587}\u{672C}", len)
}

/// Colored words, one SGR pair per word.
fn styled_text(words: usize) -> String {
    (0..words)
        .map(|i| format!("\x1b[{}mword{i}\x1b[39m ", 31 + i % 6))
        .collect()
}

/// Text under a background color that spans every break.
fn background_text(len: usize) -> String {
    format!("\x1b[44m{}\x1b[49m", ascii_text(len))
}

// =============================================================================
// Benchmarks
// =============================================================================

fn bench_width(c: &mut Criterion) {
    let mut group = c.benchmark_group("width_of");

    for len in [10, 100, 1000, 10000] {
        for (name, text) in [("ascii", ascii_text(len)), ("cjk", cjk_text(len))] {
            group.throughput(Throughput::Bytes(text.len() as u64));
            group.bench_with_input(BenchmarkId::new(name, len), &text, |b, text| {
                b.iter(|| black_box(width_of(text)))
            });
        }
    }

    group.finish();
}

fn bench_break_line(c: &mut Criterion) {
    let mut group = c.benchmark_group("break_line");
    let opts = BreakOptions::new().tolerance(2).trim_break(true);

    let cases = [
        ("ascii", ascii_text(2000)),
        ("cjk", cjk_text(1000)),
        ("styled", styled_text(200)),
        ("background", background_text(2000)),
    ];

    for (name, text) in cases {
        group.throughput(Throughput::Bytes(text.len() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(name), &text, |b, text| {
            b.iter(|| black_box(break_line(text, 80, &opts)))
        });
    }

    group.finish();
}

criterion_group!(benches, bench_width, bench_break_line);

criterion_main!(benches);
