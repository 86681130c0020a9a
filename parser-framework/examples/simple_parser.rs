//! Minimal parser example.
//!
//! Demonstrates the parser-framework workflow:
//! 1. Define tokens.
//! 2. Define AST nodes.
//! 3. Build parsers from primitives and combinators.
//! 4. Run the parser over a token stream.
//!
//! The example parses arithmetic chains such as `10 - 3 + 4` from a ready-made
//! token stream.

use parser_framework::{satisfy, Parser, Position};

// ============================================================================
// Token definition (simplified: we start from a ready-made token stream)
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
pub enum SimpleToken {
    Number { value: i32, position: Position },
    Plus { position: Position },
    Minus { position: Position },
}

impl SimpleToken {
    fn position(&self) -> Position {
        match self {
            SimpleToken::Number { position, .. }
            | SimpleToken::Plus { position }
            | SimpleToken::Minus { position } => *position,
        }
    }
}

// ============================================================================
// AST definition
// ============================================================================

/// Simple expression nodes.
#[derive(Debug, Clone, PartialEq)]
pub enum SimpleExpr {
    /// Numeric literal.
    Number { value: i32, position: Position },
    /// Binary operation (lhs, operator, rhs).
    Binary {
        op: Op,
        left: Box<SimpleExpr>,
        right: Box<SimpleExpr>,
        position: Position,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Op {
    Add,
    Subtract,
}

impl SimpleExpr {
    fn evaluate(&self) -> i32 {
        match self {
            SimpleExpr::Number { value, .. } => *value,
            SimpleExpr::Binary {
                op, left, right, ..
            } => match op {
                Op::Add => left.evaluate() + right.evaluate(),
                Op::Subtract => left.evaluate() - right.evaluate(),
            },
        }
    }
}

// ============================================================================
// Parsers
// ============================================================================

/// Parses numeric literals.
fn number() -> Parser<SimpleToken, SimpleExpr> {
    satisfy(|token: &SimpleToken| matches!(token, SimpleToken::Number { .. }))
        .map(|token| match token {
            SimpleToken::Number { value, position } => SimpleExpr::Number { value, position },
            other => SimpleExpr::Number {
                value: 0,
                position: other.position(),
            },
        })
        .with_label("number")
}

/// Parses `+` or `-`, keeping the operator position.
fn operator() -> Parser<SimpleToken, (Op, Position)> {
    satisfy(|token: &SimpleToken| {
        matches!(token, SimpleToken::Plus { .. } | SimpleToken::Minus { .. })
    })
    .map(|token| match token {
        SimpleToken::Minus { position } => (Op::Subtract, position),
        other => (Op::Add, other.position()),
    })
    .with_label("operator")
}

/// Parses `number (op number)*`, associating to the left.
fn expression() -> Parser<SimpleToken, SimpleExpr> {
    number()
        .then(operator().then(number()).repeat(0, None))
        .fold(|left, ((op, position), right)| SimpleExpr::Binary {
            op,
            left: Box::new(left),
            right: Box::new(right),
            position,
        })
}

fn at(column: usize) -> Position {
    Position::at(1, column, column - 1)
}

// ============================================================================
// Example program
// ============================================================================

fn main() {
    println!("=== Simple Parser Example ===\n");
    println!("Demonstrates how parser-framework parses basic arithmetic expressions.\n");

    let parser = expression();

    let examples = vec![
        (
            "42",
            vec![SimpleToken::Number {
                value: 42,
                position: at(1),
            }],
        ),
        (
            "3 + 4",
            vec![
                SimpleToken::Number {
                    value: 3,
                    position: at(1),
                },
                SimpleToken::Plus { position: at(3) },
                SimpleToken::Number {
                    value: 4,
                    position: at(5),
                },
            ],
        ),
        (
            "10 - 3 + 4",
            vec![
                SimpleToken::Number {
                    value: 10,
                    position: at(1),
                },
                SimpleToken::Minus { position: at(4) },
                SimpleToken::Number {
                    value: 3,
                    position: at(6),
                },
                SimpleToken::Plus { position: at(8) },
                SimpleToken::Number {
                    value: 4,
                    position: at(10),
                },
            ],
        ),
        ("+ 1", vec![SimpleToken::Plus { position: at(1) }]),
    ];

    for (index, (source, tokens)) in examples.into_iter().enumerate() {
        println!("[Example {}] Parsing `{}`:", index + 1, source);
        println!("{}", "=".repeat(50));

        match parser.parse(tokens) {
            Ok(parsed) => {
                println!("AST: {:#?}", parsed.value);
                println!("Result: {}", parsed.value.evaluate());
                if !parsed.remaining.is_empty() {
                    println!("Unparsed tokens: {:?}", parsed.remaining.as_slice());
                }
            }
            Err(failure) => {
                println!(
                    "Parse failed at token {} (in parser {}): {}",
                    failure.span().start,
                    failure.label().unwrap_or("?"),
                    failure
                );
            }
        }

        println!();
    }
}
