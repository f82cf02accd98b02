//! Lexer benchmarks.
//!
//! Run with: `cargo bench --package confetti-lex`

use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};

use confetti_lex::{Lexer, Options, TokenKind};

fn token_count(source: &[u8], options: &Options) -> usize {
    let mut lexer = Lexer::new(source, options);
    let mut count = 0;
    loop {
        match lexer.next_token() {
            Ok(token) if token.kind == TokenKind::EndOfInput => return count,
            Ok(_) => count += 1,
            Err(_) => return count,
        }
    }
}

fn bench_lexer_simple(c: &mut Criterion) {
    let mut group = c.benchmark_group("lexer");

    let source = b"probe-device eth0 eth1\nuser * { login anonymous }\n";
    group.throughput(Throughput::Bytes(source.len() as u64));

    group.bench_function("short_directives", |b| {
        let options = Options::new();
        b.iter(|| token_count(black_box(source), &options))
    });

    group.finish();
}

fn bench_lexer_argument_heavy(c: &mut Criterion) {
    let mut group = c.benchmark_group("lexer_arguments");

    let mut source = String::new();
    for index in 0..200 {
        source.push_str(&format!(
            "server host-{index} \"10.0.0.{index}\" \\\n  weight {index}\n"
        ));
    }
    group.throughput(Throughput::Bytes(source.len() as u64));

    group.bench_function("quoted_and_continuations", |b| {
        let options = Options::new();
        b.iter(|| token_count(black_box(source.as_bytes()), &options))
    });

    let mut unicode = String::new();
    for _ in 0..200 {
        unicode.push_str("πρόγραμμα 設定 구성 🚀 value\n");
    }
    group.throughput(Throughput::Bytes(unicode.len() as u64));

    group.bench_function("multibyte_arguments", |b| {
        let options = Options::new();
        b.iter(|| token_count(black_box(unicode.as_bytes()), &options))
    });

    group.finish();
}

criterion_group!(benches, bench_lexer_simple, bench_lexer_argument_heavy);
criterion_main!(benches);
