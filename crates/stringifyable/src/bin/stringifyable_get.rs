//! `stringifyable-get`: look up a path in a document.
//!
//! Usage:
//!   stringifyable-get <PATH> [--required] [-v]
//!
//! The document is read from stdin. `PATH` is a JSON Pointer (`/a/0`) or a
//! JSON array of segments (`["a", 0]`).

use clap::Parser;
use stringifyable::cli::{init_tracing, lookup_path, read_input, render, CliError};
use stringifyable::GetOptions;

#[derive(Parser, Debug)]
#[command(name = "stringifyable-get", version, about = "Read the value at a path")]
struct Args {
    /// JSON Pointer or JSON array of path segments
    path: String,
    /// Report shape mismatches and missing locations as errors
    #[arg(long)]
    required: bool,
    /// Pretty-print the output
    #[arg(long)]
    pretty: bool,
    /// Increase log verbosity
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn run(args: &Args) -> Result<String, CliError> {
    let doc = read_input("-")?;
    let options = GetOptions { fail_on_unresolved: args.required };
    render(&lookup_path(&doc, &args.path, options)?, args.pretty)
}

fn main() {
    let args = Args::parse();
    init_tracing(args.verbose);
    match run(&args) {
        Ok(out) => println!("{out}"),
        Err(e) => {
            eprintln!("{e}");
            std::process::exit(1);
        }
    }
}
