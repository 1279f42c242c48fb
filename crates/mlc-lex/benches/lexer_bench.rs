//! Lexer benchmarks.
//!
//! Run with: `cargo bench --package mlc-lex`

use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use mlc_lex::Lexer;

fn token_count(source: &str) -> usize {
    Lexer::new(source).tokenize().unwrap().len()
}

fn bench_lexer(c: &mut Criterion) {
    let mut group = c.benchmark_group("lexer");

    let sources = [
        ("arithmetic", "1 * 2 - 3 + 4 / 5"),
        ("let_binding", "let v : int <- 21 in v + v end"),
        (
            "recursive_fn",
            "let rec f x = if x < 2 then 1 else x * f(x-1) in f 5 end",
        ),
    ];

    for (name, source) in sources {
        group.throughput(Throughput::Bytes(source.len() as u64));
        group.bench_function(name, |b| b.iter(|| black_box(token_count(source))));
    }

    group.finish();
}

criterion_group!(benches, bench_lexer);
criterion_main!(benches);
