//! berd: Run a berd script.
//!
//! Usage:
//!   berd [options] <FILE>
//!
//! Prints the program's value on stdout. Diagnostics and logs go to stderr.

use berd_cli::{logger, report};
use berd_core::text::LineMap;
use berd_driver::{DriverError, Program};
use berd_options::{LogLevel, RunOptions};
use clap::Parser as ClapParser;
use std::path::PathBuf;
use std::process;

#[derive(ClapParser, Debug)]
#[command(name = "berd", about = "Tokenize, parse and evaluate a berd script", version)]
struct Cli {
    /// The script to run.
    #[arg(value_name = "FILE")]
    file: PathBuf,

    /// Path to berd.json (default: ./berd.json when present).
    #[arg(short = 'c', long = "config")]
    config: Option<PathBuf>,

    /// Print the AST as JSON.
    #[arg(long)]
    ast: bool,

    /// Write the AST JSON to this file.
    #[arg(long = "ast-out", value_name = "PATH")]
    ast_out: Option<PathBuf>,

    /// Print the token sequence.
    #[arg(long)]
    tokens: bool,

    /// Parse only; do not evaluate.
    #[arg(long = "no-eval")]
    no_eval: bool,

    /// off, error, warn, info, debug or trace.
    #[arg(long = "log-level", value_name = "LEVEL")]
    log_level: Option<LogLevel>,
}

fn main() {
    let cli = Cli::parse();
    process::exit(run(&cli));
}

fn run(cli: &Cli) -> i32 {
    let use_color = report::stderr_is_terminal();

    let mut options = match RunOptions::load(cli.config.as_deref()) {
        Ok(options) => options,
        Err(e) => {
            report::print_error(&e.to_string(), use_color);
            return 2;
        }
    };

    // CLI flags override berd.json
    if cli.ast { options.print_ast = true; }
    if cli.ast_out.is_some() { options.ast_output = cli.ast_out.clone(); }
    if cli.tokens { options.print_tokens = true; }
    if cli.no_eval { options.evaluate = false; }
    if let Some(level) = cli.log_level { options.log_level = level; }

    if let Err(e) = logger::init(options.log_level.to_level_filter()) {
        report::print_error(&format!("Failed to install logger: {}", e), use_color);
    }

    let program = match Program::from_file(&cli.file) {
        Ok(program) => program,
        Err(e) => {
            report::print_error(&e.to_string(), use_color);
            return 2;
        }
    };

    match program.run(&options) {
        Ok(outcome) => {
            if let Some(tokens) = &outcome.tokens {
                for token in tokens {
                    println!("{}", token);
                }
            }
            if options.print_ast {
                if let Some(json) = &outcome.ast_json {
                    println!("{}", json);
                }
            }
            let line_map = LineMap::new(program.source());
            for diag in outcome.diagnostics.diagnostics() {
                report::print_diagnostic(diag, &line_map, use_color);
            }
            if let Some(value) = &outcome.value {
                println!("{}", value);
            }
            0
        }
        Err(e) if e.is_io() => {
            report::print_error(&e.to_string(), use_color);
            2
        }
        Err(e) => {
            print_fatal(&program, &e);
            1
        }
    }
}

fn print_fatal(program: &Program, error: &DriverError) {
    let code = error.to_diagnostic().map(|diag| diag.code);
    let report = report::fatal_report(
        &program.name(),
        program.source(),
        &error.to_string(),
        code,
        error.span(),
    );
    report::print_fatal(&report);
}
