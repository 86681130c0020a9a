use criterion::{criterion_group, criterion_main, Criterion, Throughput};
use parser_framework::{just, one_of, satisfy, InputStream, Parser};

// --- Types ---
#[derive(Debug, Clone, PartialEq)]
enum BenchToken {
    Number(i64),
    Identifier(String),
    Plus,
    Minus,
    Star,
    LParen,
    RParen,
    Semi,
}

#[allow(dead_code)]
#[derive(Debug, Clone)]
enum BenchAst {
    Number(i64),
    Var(String),
    Binary(Box<BenchAst>, char, Box<BenchAst>),
}

// --- Grammar ---
fn atom() -> Parser<BenchToken, BenchAst> {
    satisfy(|t: &BenchToken| matches!(t, BenchToken::Number(_) | BenchToken::Identifier(_))).map(
        |token| match token {
            BenchToken::Number(n) => BenchAst::Number(n),
            BenchToken::Identifier(name) => BenchAst::Var(name),
            _ => BenchAst::Number(0),
        },
    )
}

fn binary(
    operand: Parser<BenchToken, BenchAst>,
    ops: Parser<BenchToken, char>,
) -> Parser<BenchToken, BenchAst> {
    operand
        .clone()
        .then(ops.then(operand).repeat(0, None))
        .fold(|left, (op, right)| BenchAst::Binary(Box::new(left), op, Box::new(right)))
}

fn expression() -> Parser<BenchToken, BenchAst> {
    // One level of parentheses is enough to exercise `delimited`.
    let inner_term = binary(atom(), just(BenchToken::Star).map(|_| '*'));
    let inner = binary(inner_term, additive());
    let factor = atom().alt(inner.delimited(just(BenchToken::LParen), just(BenchToken::RParen)));
    let term = binary(factor, just(BenchToken::Star).map(|_| '*'));
    binary(term, additive())
}

fn additive() -> Parser<BenchToken, char> {
    just(BenchToken::Plus)
        .map(|_| '+')
        .alt(just(BenchToken::Minus).map(|_| '-'))
}

fn program() -> Parser<BenchToken, Vec<BenchAst>> {
    expression().then_ignore(just(BenchToken::Semi)).repeat(0, None)
}

// --- Data Generation ---
// Pattern: a + b * c - (1 + d) ;
fn generate_expression_tokens(count: usize) -> Vec<BenchToken> {
    let mut tokens = Vec::with_capacity(count);
    for _ in 0..(count / 12) {
        tokens.push(BenchToken::Identifier("a".to_string()));
        tokens.push(BenchToken::Plus);
        tokens.push(BenchToken::Identifier("b".to_string()));
        tokens.push(BenchToken::Star);
        tokens.push(BenchToken::Identifier("c".to_string()));
        tokens.push(BenchToken::Minus);
        tokens.push(BenchToken::LParen);
        tokens.push(BenchToken::Number(1));
        tokens.push(BenchToken::Plus);
        tokens.push(BenchToken::Identifier("d".to_string()));
        tokens.push(BenchToken::RParen);
        tokens.push(BenchToken::Semi);
    }
    tokens
}

fn bench_parser(c: &mut Criterion) {
    let mut group = c.benchmark_group("parser_complex");

    let size = 10_000;
    let tokens = generate_expression_tokens(size);
    let input = InputStream::new(tokens);
    let parser = program();

    group.throughput(Throughput::Elements(size as u64));
    group.bench_function("parse_expr_mixed", |b| {
        b.iter(|| {
            // Streams share their buffer; passing one by reference copies a pointer.
            let _nodes = parser.parse(&input);
        })
    });

    group.finish();
}

fn bench_text(c: &mut Criterion) {
    let mut group = c.benchmark_group("parser_text");

    let text = "12345+".repeat(2_000) + "0";
    let digit = one_of("0123456789").map(|c: char| c.to_digit(10).unwrap_or(0) as u64);
    let number = digit
        .clone()
        .then(digit.repeat(0, None))
        .fold(|acc, d| acc * 10 + d);
    let sum = number
        .clone()
        .then(just('+').ignore_then(number).repeat(0, None))
        .fold(|a, b| a + b);

    group.throughput(Throughput::Bytes(text.len() as u64));
    group.bench_function("sum_digits", |b| b.iter(|| sum.parse(text.as_str())));

    group.finish();
}

criterion_group!(benches, bench_parser, bench_text);
criterion_main!(benches);
