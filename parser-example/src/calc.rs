//! Calculator grammar.
//!
//! Works in two stages over the same framework: a scanner turns text into
//! [`CalcToken`]s, then a parser over the token stream builds an [`Expr`].
//!
//! Supported syntax:
//! - numbers (integers and decimals)
//! - `+`, `-`, `*`, `/` with the usual precedence, left associative
//! - `^`, right associative and binding tighter than unary minus
//! - unary minus: `-5`
//! - parentheses: `(1 + 2) * 3`

use std::fmt;

use parser_framework::{
    reject, result, satisfy, take_any, Failure, FailureKind, InputStream, ParseResult, Parser, Span,
    Success,
};

use crate::helpers::{delimited_by, end_of_input, number, whitespace};

// ============================================================================
// Tokens
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TokenKind {
    Number(f64),
    Plus,
    Minus,
    Multiply,
    Divide,
    Power,
    LeftParen,
    RightParen,
}

/// A token with the character span it was scanned from.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CalcToken {
    pub kind: TokenKind,
    pub span: Span,
}

fn operator_token() -> Parser<char, TokenKind> {
    satisfy(|c: &char| "+-*/^()".contains(*c))
        .map(|c| match c {
            '+' => TokenKind::Plus,
            '-' => TokenKind::Minus,
            '*' => TokenKind::Multiply,
            '/' => TokenKind::Divide,
            '^' => TokenKind::Power,
            '(' => TokenKind::LeftParen,
            _ => TokenKind::RightParen,
        })
        .with_label("operator")
}

/// Scanner: text to tokens, whitespace dropped.
pub fn scanner() -> Parser<char, Vec<CalcToken>> {
    let token = number()
        .map(TokenKind::Number)
        .alt(operator_token())
        .spanned()
        .map(|(kind, span)| CalcToken { kind, span });
    whitespace()
        .ignore_then(token.then_ignore(whitespace()).repeat(0, None))
        .then_ignore(end_of_input())
}

// ============================================================================
// AST
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Number {
        value: f64,
        span: Span,
    },
    Binary {
        op: BinaryOp,
        left: Box<Expr>,
        right: Box<Expr>,
        span: Span,
    },
    /// Negation, the only prefix operator.
    Unary {
        op: UnaryOp,
        operand: Box<Expr>,
        span: Span,
    },
    Group {
        expr: Box<Expr>,
        span: Span,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOp {
    Add,
    Subtract,
    Multiply,
    Divide,
    Power,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryOp {
    Negate,
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenKind::Number(value) => write!(f, "number {value}"),
            TokenKind::Plus => f.write_str("'+'"),
            TokenKind::Minus => f.write_str("'-'"),
            TokenKind::Multiply => f.write_str("'*'"),
            TokenKind::Divide => f.write_str("'/'"),
            TokenKind::Power => f.write_str("'^'"),
            TokenKind::LeftParen => f.write_str("'('"),
            TokenKind::RightParen => f.write_str("')'"),
        }
    }
}

impl fmt::Display for BinaryOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let symbol = match self {
            BinaryOp::Add => "+",
            BinaryOp::Subtract => "-",
            BinaryOp::Multiply => "*",
            BinaryOp::Divide => "/",
            BinaryOp::Power => "^",
        };
        f.write_str(symbol)
    }
}

impl Expr {
    /// Token span of this node.
    pub fn span(&self) -> Span {
        match self {
            Expr::Number { span, .. }
            | Expr::Binary { span, .. }
            | Expr::Unary { span, .. }
            | Expr::Group { span, .. } => *span,
        }
    }

    pub fn evaluate(&self) -> f64 {
        match self {
            Expr::Number { value, .. } => *value,
            Expr::Binary {
                op, left, right, ..
            } => {
                let (left, right) = (left.evaluate(), right.evaluate());
                match op {
                    BinaryOp::Add => left + right,
                    BinaryOp::Subtract => left - right,
                    BinaryOp::Multiply => left * right,
                    BinaryOp::Divide => left / right,
                    BinaryOp::Power => left.powf(right),
                }
            }
            Expr::Unary {
                op: UnaryOp::Negate,
                operand,
                ..
            } => -operand.evaluate(),
            Expr::Group { expr, .. } => expr.evaluate(),
        }
    }

    /// Indented tree rendering, one node per line.
    pub fn tree(&self) -> String {
        let mut out = String::new();
        self.write_tree(&mut out, 0);
        out
    }

    fn write_tree(&self, out: &mut String, indent: usize) {
        let prefix = "  ".repeat(indent);
        match self {
            Expr::Number { value, .. } => {
                out.push_str(&format!("{prefix}Number({value})\n"));
            }
            Expr::Binary {
                op, left, right, ..
            } => {
                out.push_str(&format!("{prefix}Binary({op})\n"));
                left.write_tree(out, indent + 1);
                right.write_tree(out, indent + 1);
            }
            Expr::Unary { operand, .. } => {
                out.push_str(&format!("{prefix}Unary(-)\n"));
                operand.write_tree(out, indent + 1);
            }
            Expr::Group { expr, .. } => {
                out.push_str(&format!("{prefix}Group\n"));
                expr.write_tree(out, indent + 1);
            }
        }
    }
}

// ============================================================================
// Parser over tokens
// ============================================================================

fn kind(expected: TokenKind) -> Parser<CalcToken, CalcToken> {
    satisfy(move |token: &CalcToken| token.kind == expected)
}

fn binary_op(ops: &[(TokenKind, BinaryOp)]) -> Parser<CalcToken, BinaryOp> {
    let ops = ops.to_vec();
    take_any().spanned().bind(move |(token, span): (CalcToken, Span)| {
        match ops.iter().find(|(kind, _)| *kind == token.kind) {
            Some((_, op)) => result(*op),
            None => reject(unexpected_token(token.kind, span)),
        }
    })
}

fn unexpected_token(kind: TokenKind, span: Span) -> Failure {
    let kind = FailureKind::Unexpected {
        found: kind.to_string(),
    };
    Failure::new(kind, span)
}

fn binary(left: Expr, op: BinaryOp, right: Expr) -> Expr {
    let span = left.span().merge(&right.span());
    Expr::Binary {
        op,
        left: Box::new(left),
        right: Box::new(right),
        span,
    }
}

/// Defers building `build()` until the parser runs, so grammars can refer
/// to themselves.
fn recursive<O: 'static>(build: fn() -> Parser<CalcToken, O>) -> Parser<CalcToken, O> {
    Parser::new(move |input: InputStream<CalcToken>| build().parse(input))
}

/// Chooses between two parsers by the kind of the next token, so a failure
/// past that token is reported as-is instead of being combined.
fn when_next(
    expected: TokenKind,
    then: Parser<CalcToken, Expr>,
    otherwise: Parser<CalcToken, Expr>,
) -> Parser<CalcToken, Expr> {
    Parser::new(move |input: InputStream<CalcToken>| {
        if input.peek().map(|token| token.kind) == Some(expected) {
            then.parse(input)
        } else {
            otherwise.parse(input)
        }
    })
}

fn literal() -> Parser<CalcToken, Expr> {
    take_any()
        .spanned()
        .bind(|(token, span): (CalcToken, Span)| match token.kind {
            TokenKind::Number(value) => result(Expr::Number { value, span }),
            other => {
                let kind = FailureKind::Expected {
                    expected: "a number".to_string(),
                    found: other.to_string(),
                };
                reject(Failure::new(kind, span))
            }
        })
        .with_label("number")
}

fn atom() -> Parser<CalcToken, Expr> {
    let group = delimited_by(
        kind(TokenKind::LeftParen),
        recursive(expression),
        kind(TokenKind::RightParen),
        "'('",
    )
    .spanned()
    .map(|(expr, span)| Expr::Group {
        expr: Box::new(expr),
        span,
    });
    when_next(TokenKind::LeftParen, group, literal())
}

/// `atom ('^' unary)?`: the exponent may itself be negated or raised.
fn power() -> Parser<CalcToken, Expr> {
    atom().bind(|base| {
        let raised = kind(TokenKind::Power).ignore_then(recursive(unary)).map({
            let base = base.clone();
            move |exponent| binary(base.clone(), BinaryOp::Power, exponent)
        });
        when_next(TokenKind::Power, raised, result(base))
    })
}

fn unary() -> Parser<CalcToken, Expr> {
    let negated = kind(TokenKind::Minus)
        .ignore_then(recursive(unary))
        .spanned()
        .map(|(operand, span)| Expr::Unary {
            op: UnaryOp::Negate,
            operand: Box::new(operand),
            span,
        });
    when_next(TokenKind::Minus, negated, power())
}

/// `operand (op operand)*`, associating to the left.
///
/// Once an operator has been read the chain is committed: a failing right
/// operand fails the whole chain rather than ending it.
fn left_assoc(
    operand: Parser<CalcToken, Expr>,
    ops: Parser<CalcToken, BinaryOp>,
) -> Parser<CalcToken, Expr> {
    Parser::new(move |input: InputStream<CalcToken>| {
        let Success {
            mut remaining,
            value: mut left,
        } = operand.parse(input)?;
        while let Ok(op) = ops.parse(&remaining) {
            let right = operand.parse(op.remaining)?;
            left = binary(left, op.value, right.value);
            remaining = right.remaining;
        }
        Ok(Success::new(remaining, left))
    })
}

fn term() -> Parser<CalcToken, Expr> {
    let ops = binary_op(&[
        (TokenKind::Multiply, BinaryOp::Multiply),
        (TokenKind::Divide, BinaryOp::Divide),
    ]);
    left_assoc(unary(), ops)
}

/// Full expression: `term (('+' | '-') term)*`.
pub fn expression() -> Parser<CalcToken, Expr> {
    let ops = binary_op(&[
        (TokenKind::Plus, BinaryOp::Add),
        (TokenKind::Minus, BinaryOp::Subtract),
    ]);
    left_assoc(term(), ops)
}

// ============================================================================
// Entry point
// ============================================================================

fn finished() -> Parser<CalcToken, ()> {
    take_any()
        .optional()
        .spanned()
        .bind(|(token, span): (Option<CalcToken>, Span)| match token {
            None => result(()),
            Some(token) => reject(unexpected_token(token.kind, span).with_label("end_of_input")),
        })
}

/// Scans and parses `text`, requiring all of it to be consumed.
///
/// Spans in the returned tree and failure are character positions in `text`.
pub fn parse(text: &str) -> Result<Expr, Failure> {
    let tokens = scanner().parse(text)?.value;
    let parsed: ParseResult<CalcToken, Expr> =
        expression().then_ignore(finished()).parse(tokens.clone());
    match parsed {
        Ok(success) => Ok(to_text_spans(success.value, &tokens, text)),
        Err(failure) => {
            let span = text_span(failure.span(), &tokens, text);
            Err(failure.at(span))
        }
    }
}

/// Maps a span of token indices to the characters those tokens cover.
fn text_span(span: Span, tokens: &[CalcToken], text: &str) -> Span {
    let end_of_text = text.chars().count();
    let start = tokens
        .get(span.start)
        .map_or(end_of_text, |token| token.span.start);
    let end = span
        .end
        .checked_sub(1)
        .and_then(|last| tokens.get(last))
        .map_or(end_of_text, |token| token.span.end)
        .max(start);
    if start == end {
        Span::at(start)
    } else {
        Span::new(start, end)
    }
}

fn to_text_spans(expr: Expr, tokens: &[CalcToken], text: &str) -> Expr {
    let span = text_span(expr.span(), tokens, text);
    match expr {
        Expr::Number { value, .. } => Expr::Number { value, span },
        Expr::Binary {
            op, left, right, ..
        } => Expr::Binary {
            op,
            left: Box::new(to_text_spans(*left, tokens, text)),
            right: Box::new(to_text_spans(*right, tokens, text)),
            span,
        },
        Expr::Unary { op, operand, .. } => Expr::Unary {
            op,
            operand: Box::new(to_text_spans(*operand, tokens, text)),
            span,
        },
        Expr::Group { expr, .. } => Expr::Group {
            expr: Box::new(to_text_spans(*expr, tokens, text)),
            span,
        },
    }
}
