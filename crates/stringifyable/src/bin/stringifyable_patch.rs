//! `stringifyable-patch`: replay a diff list onto a document.
//!
//! Usage:
//!   stringifyable-patch <DIFF> [--pretty] [-v]
//!
//! The base document is read from stdin. `DIFF` names a file holding the diff
//! list in the form printed by `stringifyable-diff`.

use clap::Parser;
use stringifyable::cli::{init_tracing, patch_document, read_input, render, CliError};

#[derive(Parser, Debug)]
#[command(name = "stringifyable-patch", version, about = "Apply a diff list to a JSON document")]
struct Args {
    /// Diff list file
    diff: String,
    /// Pretty-print the output
    #[arg(long)]
    pretty: bool,
    /// Increase log verbosity
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn run(args: &Args) -> Result<String, CliError> {
    let diff = read_input(&args.diff)?;
    let doc = read_input("-")?;
    render(&patch_document(&doc, &diff)?, args.pretty)
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
