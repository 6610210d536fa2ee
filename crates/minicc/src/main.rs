use std::fs;
use std::path::PathBuf;
use std::process;

use clap::Parser;
use tracing::Level;

use minic_common::Diagnostic;
use minic_compiler::ast::{AstPrinter, Program};
use minic_compiler::semantic;

/// minic semantic checker.
///
/// Reads a program tree produced by the minic parser (JSON) and checks it.
#[derive(Parser)]
#[command(
    name = "minicc",
    version,
    about,
    long_about = "minic semantic checker.\n\nReads the JSON syntax tree emitted by the minic parser, type-checks it,\nfolds constants and builds the symbol table.\n\nExamples:\n  minicc prog.json                  Check and print diagnostics\n  minicc prog.json --emit-symbols   Also dump the symbol table\n  minicc prog.json --symbols-json   Print the symbol table as JSON"
)]
struct Cli {
    /// Input program tree (.json).
    input: PathBuf,

    /// Suppress warning output.
    #[arg(short, long)]
    quiet: bool,

    /// Print the syntax tree before analysis.
    #[arg(long = "emit-ast")]
    emit_ast: bool,

    /// Print the symbol table and its statistics after analysis.
    #[arg(long = "emit-symbols")]
    emit_symbols: bool,

    /// Print the symbol table as JSON to stdout after analysis.
    #[arg(long = "symbols-json")]
    symbols_json: bool,

    /// Trace analysis progress on stderr.
    #[arg(short, long)]
    verbose: bool,
}

fn main() {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_max_level(if cli.verbose { Level::DEBUG } else { Level::WARN })
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    let source = match fs::read_to_string(&cli.input) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("error: could not read '{}': {}", cli.input.display(), e);
            process::exit(1);
        }
    };

    let program: Program = match serde_json::from_str(&source) {
        Ok(p) => p,
        Err(e) => {
            eprintln!("error: malformed program tree in '{}': {}", cli.input.display(), e);
            process::exit(1);
        }
    };

    if cli.emit_ast {
        print!("{}", AstPrinter::print(&program));
        println!();
    }

    // === Semantic Analysis ===
    let analysis = semantic::analyze(&program);
    let summary = analysis.summary();
    let (symbols, diagnostics) = analysis.into_parts();

    for diag in diagnostics.errors() {
        print_diagnostic(diag);
    }
    if !cli.quiet {
        for diag in diagnostics.warnings() {
            print_diagnostic(diag);
        }
    }

    if cli.emit_symbols {
        println!("{}", symbols);
        println!();
        println!("{}", symbols.statistics());
        println!();
    }

    if cli.symbols_json {
        match serde_json::to_string_pretty(&symbols) {
            Ok(json) => println!("{}", json),
            Err(e) => {
                eprintln!("error: failed to serialize symbol table: {}", e);
                process::exit(1);
            }
        }
    }

    println!("{}", summary);

    if !summary.passed() {
        process::exit(1);
    }
}

fn print_diagnostic(diag: &Diagnostic) {
    eprintln!("{}", diag);
    eprintln!();
}
