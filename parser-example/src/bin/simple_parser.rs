//! Settings-file parser example.
//!
//! Parses `key = value` lines (strings, integers, booleans, `#` comments)
//! from a file or a built-in sample and lists the entries found.

use std::fs;
use std::path::PathBuf;

use clap::Parser;
use miette::{miette, IntoDiagnostic, Report};
use parser_example::logging;
use parser_example::settings::{self, Value};
use parser_framework::{make_report, LineIndex};

#[derive(Debug, Parser)]
#[command(
    name = "simple-parser",
    version,
    about = "Parse a key = value settings file."
)]
struct SimpleArgs {
    /// Settings file to read. A built-in sample is parsed when omitted.
    file: Option<PathBuf>,

    /// Render failures through miette instead of the plain report.
    #[arg(long)]
    fancy: bool,
}

const SAMPLE: &str = r#"# demo settings
name = "parser-framework"
port = 8080
debug = true

retries = -3   # negative numbers are fine
"#;

fn main() -> miette::Result<()> {
    let args = SimpleArgs::parse();
    logging::init();
    let (name, text) = match &args.file {
        Some(path) => (
            path.display().to_string(),
            fs::read_to_string(path).into_diagnostic()?,
        ),
        None => ("sample".to_string(), SAMPLE.to_string()),
    };

    println!("=== Settings Parser ===\n");
    println!("Input: {name}");
    println!("{}", "=".repeat(50));

    let parsed = match settings::parse(&text) {
        Ok(parsed) => parsed,
        Err(failure) => {
            if args.fancy {
                return Err(Report::new(failure.with_source(name, text)));
            }
            eprintln!("{}", make_report(&text, &failure));
            return Err(miette!("{name} is not a valid settings file"));
        }
    };

    let index = LineIndex::new(&text);
    for entry in &parsed.entries {
        let line = index.position(entry.span.start).line;
        let value = match &entry.value {
            Value::Str(s) => format!("{s:?} (string)"),
            Value::Int(n) => format!("{n} (integer)"),
            Value::Bool(b) => format!("{b} (boolean)"),
        };
        println!("  line {line:>3}: {} = {value}", entry.key);
    }
    println!("\n{} entries", parsed.entries.len());
    Ok(())
}
