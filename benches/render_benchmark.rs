//! Benchmarks for unbb rendering performance.
//!
//! Run with: cargo bench

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use unbb::{Attachment, Attachments, CleanupPreset, RenderOptions, Unbb};

/// Builds a synthetic post with the given number of paragraphs.
fn create_test_post(paragraphs: usize) -> String {
    let mut post = String::new();
    for i in 0..paragraphs {
        post.push_str(&format!(
            "[b]Section {}[/b] with [i]styled[/i] [color=red]text[/color] and a [url=https://example.com/{}]link[/url].\n",
            i, i
        ));
        post.push_str("[quote name=\"Jane\" post=42]Quoted [u]reply[/u] [attachment=2][/quote]\n");
        post.push_str("[list=1][*]first[*]second[list][*]nested[/list][/list]\n");
        post.push_str("[spoiler=[b]More[/b]]hidden [attachment=1:notes][/spoiler]\n");
    }
    post
}

fn attachments() -> Attachments {
    [
        Attachment::file(1, "notes.txt", 4096, "https://example.com/1"),
        Attachment::image(2, "pic.png", "https://example.com/2", 32, 32),
    ]
    .into_iter()
    .collect()
}

/// Benchmark tokenizing and tree building.
fn bench_parsing(c: &mut Criterion) {
    let post = create_test_post(20);
    let options = unbb::ParseOptions::default();

    c.bench_function("parse_20_paragraphs", |b| {
        b.iter(|| unbb::parser::parse(black_box(&post), &options));
    });
}

/// Benchmark the full pipeline at various sizes.
fn bench_rendering(c: &mut Criterion) {
    let mut group = c.benchmark_group("rendering");
    let table = attachments();
    let options = RenderOptions::default();

    for paragraphs in [1, 10, 100].iter() {
        let post = create_test_post(*paragraphs);

        group.bench_function(format!("{}_paragraphs", paragraphs), |b| {
            b.iter(|| unbb::render_with_options(black_box(&post), &table, &options));
        });
    }

    group.finish();
}

/// Benchmark batch rendering, parallel against sequential.
fn bench_batch(c: &mut Criterion) {
    let posts: Vec<String> = (0..64).map(|_| create_test_post(5)).collect();
    let table = attachments();

    c.bench_function("batch_parallel", |b| {
        b.iter(|| unbb::render_many(black_box(&posts), &table, &RenderOptions::default()));
    });

    c.bench_function("batch_sequential", |b| {
        let options = RenderOptions::default().sequential();
        b.iter(|| unbb::render_many(black_box(&posts), &table, &options));
    });
}

/// Benchmark builder pattern overhead.
fn bench_builder_creation(c: &mut Criterion) {
    c.bench_function("builder_creation", |b| {
        b.iter(|| {
            let _builder = Unbb::new()
                .with_cleanup(CleanupPreset::Standard)
                .with_utc_offset(180)
                .sequential();
        });
    });
}

criterion_group!(
    benches,
    bench_parsing,
    bench_rendering,
    bench_batch,
    bench_builder_creation,
);
criterion_main!(benches);
