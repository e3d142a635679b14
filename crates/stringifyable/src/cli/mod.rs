//! Command-line helpers.
//!
//! Provides the core logic used by the binary entry points:
//! - `stringifyable-diff`: diff two documents
//! - `stringifyable-patch`: replay a diff onto a document
//! - `stringifyable-get`: look up a path in a document

use std::fs;
use std::io::{self, Read};

use serde::Serialize;
use stringifyable_path::{parse_pointer, validate_path, validate_pointer, Path, ValidationError};
use thiserror::Error;

use crate::accessor::{get_value_at_path, GetOptions};
use crate::diff_patch::{apply_diff_patch, compute_diff_with, from_json, to_json, CodecError, DiffOptions};
use crate::error::TreeError;
use crate::value::Stringifyable;

// ── Errors ────────────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum CliError {
    #[error("{source_name}: {error}")]
    Io { source_name: String, error: io::Error },
    #[error(transparent)]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    Tree(#[from] TreeError),
    #[error("invalid diff: {0}")]
    Codec(#[from] CodecError),
    #[error("invalid path: {0}")]
    Path(#[from] ValidationError),
    #[error("path '{0}' not found")]
    NotFound(String),
}

// ── Input / output ────────────────────────────────────────────────────────

/// Read a document argument: a file path, or `-` for stdin.
pub fn read_input(source: &str) -> Result<String, CliError> {
    let io_err = |error| CliError::Io { source_name: source.to_string(), error };
    if source == "-" {
        let mut buf = String::new();
        io::stdin().read_to_string(&mut buf).map_err(io_err)?;
        return Ok(buf);
    }
    fs::read_to_string(source).map_err(io_err)
}

/// Render any serializable value as JSON text.
pub fn render<T: Serialize>(value: &T, pretty: bool) -> Result<String, CliError> {
    Ok(if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    })
}

/// Parse a path argument: either a JSON array of segments (`["a", 0]`) or a
/// JSON Pointer (`/a/0`). Canonical numeric pointer tokens become indices.
pub fn parse_path_arg(arg: &str) -> Result<Path, CliError> {
    let path = if arg.trim_start().starts_with('[') {
        serde_json::from_str::<Path>(arg)?
    } else {
        validate_pointer(arg)?;
        parse_pointer(arg)
    };
    validate_path(&path)?;
    Ok(path)
}

// ── Commands ──────────────────────────────────────────────────────────────

/// Diff two JSON documents and return the diff list in its JSON form.
pub fn diff_documents(
    before_json: &str,
    current_json: &str,
    options: DiffOptions,
) -> Result<serde_json::Value, CliError> {
    let before = Stringifyable::parse(before_json)?;
    let current = Stringifyable::parse(current_json)?;
    let result = compute_diff_with(&before, &current, options);
    Ok(to_json(&result.diff_patch))
}

/// Replay a diff list (JSON form) onto a JSON document.
pub fn patch_document(doc_json: &str, diff_json: &str) -> Result<Stringifyable, CliError> {
    let mut doc = Stringifyable::parse(doc_json)?;
    let entries = from_json(&serde_json::from_str(diff_json)?)?;
    apply_diff_patch(&mut doc, &entries)?;
    Ok(doc)
}

/// Look up a path in a JSON document.
pub fn lookup_path(doc_json: &str, path_arg: &str, options: GetOptions) -> Result<Stringifyable, CliError> {
    let doc = Stringifyable::parse(doc_json)?;
    let path = parse_path_arg(path_arg)?;
    get_value_at_path(&doc, &path, options)?
        .cloned()
        .ok_or_else(|| CliError::NotFound(path_arg.to_string()))
}

// ── Logging ───────────────────────────────────────────────────────────────

/// Install the fmt subscriber on stderr. `RUST_LOG` directives apply first;
/// `-v` raises this crate to debug and `-vv` to trace.
pub fn init_tracing(verbose: u8) {
    let mut env_filter = tracing_subscriber::EnvFilter::from_default_env()
        .add_directive(tracing::Level::WARN.into());
    let level = match verbose {
        0 => None,
        1 => Some("stringifyable=debug"),
        _ => Some("stringifyable=trace"),
    };
    if let Some(directive) = level {
        if let Ok(parsed) = directive.parse() {
            env_filter = env_filter.add_directive(parsed);
        }
    }
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(io::stderr)
        .init();
}
