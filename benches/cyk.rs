//! Parse time against input length, the cubic curve of the chart parser

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use cyk::cyk::{char_tokens, Parser};
use cyk::grammar::Grammar;

fn reference_grammar() -> Grammar {
    Grammar::from_convention("S", &[
        ("S", &["AB", "BC"]),
        ("A", &["BA", "a"]),
        ("B", &["CC", "b"]),
        ("C", &["AB", "a"]),
    ])
}

fn benchmark_input_length(c: &mut Criterion) {
    let parser = Parser::new(&reference_grammar()).unwrap();
    let mut group = c.benchmark_group("cyk_input_length");

    for length in 2..=20 {
        let input = char_tokens(&"a".repeat(length));
        group.bench_with_input(BenchmarkId::from_parameter(length), &input, |b, input| {
            b.iter(|| parser.parse(input));
        });
    }

    group.finish();
}

fn benchmark_grammar_check(c: &mut Criterion) {
    let grammar = reference_grammar();
    let input = char_tokens("baaba");

    c.bench_function("cyk_check_and_parse", |b| {
        b.iter(|| cyk::cyk::parse(&grammar, &input));
    });
}

criterion_group!(benches, benchmark_input_length, benchmark_grammar_check);
criterion_main!(benches);
