//! `stringifyable-diff`: print the diff list that turns one document into another.
//!
//! Usage:
//!   stringifyable-diff <BEFORE> <CURRENT> [--no-prune] [--pretty] [-v]
//!
//! Either document may be `-` to read it from stdin.

use clap::Parser;
use stringifyable::cli::{diff_documents, init_tracing, read_input, render, CliError};
use stringifyable::DiffOptions;

#[derive(Parser, Debug)]
#[command(name = "stringifyable-diff", version, about = "Diff two JSON documents")]
struct Args {
    /// Baseline document
    before: String,
    /// Edited document
    current: String,
    /// Report every deleted descendant instead of only the removed subtree root
    #[arg(long)]
    no_prune: bool,
    /// Pretty-print the output
    #[arg(long)]
    pretty: bool,
    /// Increase log verbosity
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn run(args: &Args) -> Result<String, CliError> {
    let before = read_input(&args.before)?;
    let current = read_input(&args.current)?;
    let options = DiffOptions { prune_deleted_subtrees: !args.no_prune };
    render(&diff_documents(&before, &current, options)?, args.pretty)
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
