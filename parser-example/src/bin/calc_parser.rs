//! Calculator parser example.
//!
//! Shows parser-framework used twice over: the text is scanned into tokens
//! with character parsers, then the token stream is parsed into an AST with
//! the same combinators.
//!
//! Flow:
//! 1. Scan the input text into `CalcToken`s.
//! 2. Parse the tokens into an `Expr`.
//! 3. Print the AST and its value, or a report pointing at the failure.

use clap::{Parser, ValueEnum};
use miette::{miette, Report};
use parser_example::{calc, logging};
use parser_framework::{make_report, Failure};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum ReportStyle {
    /// Line, caret and message.
    Plain,
    /// Rendered through miette.
    Miette,
}

#[derive(Debug, Parser)]
#[command(
    name = "calc-parser",
    version,
    about = "Parse and evaluate arithmetic expressions."
)]
struct CalcArgs {
    /// Expressions to evaluate. A built-in set is used when none are given.
    exprs: Vec<String>,

    /// How parse failures are shown.
    #[arg(long, value_enum, default_value_t = ReportStyle::Plain)]
    report: ReportStyle,

    /// Also print the AST as an indented tree.
    #[arg(long)]
    tree: bool,
}

const BUILTIN: &[&str] = &[
    "3 + 4",
    "2 * 3.14",
    "(1 + 2) * 3",
    "2 ^ 8",
    "10 / 2.5",
    "-5",
    "3 + 4 * 5",
    "2 ^ 3 ^ 2",
    "(1 + 2",
    "4 * x",
];

fn main() -> miette::Result<()> {
    let args = CalcArgs::parse();
    logging::init();
    let exprs: Vec<String> = if args.exprs.is_empty() {
        BUILTIN.iter().map(|expr| expr.to_string()).collect()
    } else {
        args.exprs.clone()
    };

    println!("=== Calculator Parser ===\n");

    let mut failed = 0;
    for expr in &exprs {
        println!("Expression: {expr}");
        println!("{}", "=".repeat(50));

        match calc::parse(expr) {
            Ok(ast) => {
                if args.tree {
                    print!("{}", ast.tree());
                }
                println!("Result: {}", ast.evaluate());
            }
            Err(failure) => {
                failed += 1;
                print_failure(expr, failure, args.report);
            }
        }
        println!();
    }

    if failed > 0 && !args.exprs.is_empty() {
        return Err(miette!("{failed} of {} expressions failed to parse", exprs.len()));
    }
    Ok(())
}

fn print_failure(text: &str, failure: Failure, style: ReportStyle) {
    match style {
        ReportStyle::Plain => eprintln!("{}", make_report(text, &failure)),
        ReportStyle::Miette => {
            let report = Report::new(failure.with_source("expression", text));
            eprintln!("{report:?}");
        }
    }
}
