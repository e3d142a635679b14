//! stringifyable: structural diff and patch over JSON-representable trees.
//!
//! The engine persists only the changes made to a large generated tree and
//! later replays them onto a freshly recomputed baseline:
//!
//! ```
//! use serde_json::json;
//! use stringifyable::{apply_diff_patch, compute_diff, Stringifyable};
//!
//! let before = Stringifyable::from(json!({"replicas": 1, "tags": ["a", "b"]}));
//! let edited = Stringifyable::from(json!({"replicas": 3, "tags": ["a"]}));
//!
//! let diff = compute_diff(&before, &edited).diff_patch;
//! assert_eq!(diff.len(), 2);
//!
//! let mut replayed = before.clone();
//! apply_diff_patch(&mut replayed, &diff).unwrap();
//! assert_eq!(replayed, edited);
//! ```
//!
//! Modules, leaves first:
//! - [`value`]: the recursive value model and the JSON round-trip boundary check.
//! - [`accessor`]: path-addressed read, move-out and write with auto-vivification.
//! - [`diff_patch`]: the differ, the patcher and a JSON codec for diff lists.
//! - [`cli`]: helpers behind the command-line binaries.

pub mod error;
pub mod value;
pub mod accessor;
pub mod diff_patch;
pub mod cli;

pub use error::TreeError;
pub use value::{ensure_stringifyable, Atomic, Container, Stringifyable};
pub use accessor::{
    assign_value_at_path, get_value_at_path, take_value_at_path, GetOptions, MAX_ARRAY_GAP,
};
pub use diff_patch::{
    apply_diff_patch, compute_diff, compute_diff_with, DiffEntry, DiffOptions, DiffResult,
    PatchOp,
};
pub use stringifyable_path::{format_pointer, parse_pointer, path, Path, PathSegment};
