//! Errors raised by the engine.
//!
//! Every variant is a broken caller precondition: two trees that were assumed
//! compatible are not, or a diff list was hand-edited into an invalid shape.
//! None of them is retryable.

use stringifyable_path::{format_pointer, Path};
use thiserror::Error;

use crate::value::Container;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum TreeError {
    /// A segment addressed a container of the other kind.
    #[error("path type mismatch at '{}': expected {expected}", format_pointer(.path))]
    PathTypeMismatch { path: Path, expected: Container },

    /// A required path does not resolve.
    #[error("unresolved required path '{}'", format_pointer(.path))]
    UnresolvedRequiredPath { path: Path },

    /// An array kept an element after one marked for deletion.
    #[error(
        "non-contiguous deletion in array '{}': index {deleted} deleted but index {kept} kept",
        format_pointer(.path)
    )]
    NonContiguousDeletion { path: Path, deleted: usize, kept: usize },

    /// A write addressed an array index too far past its end.
    #[error(
        "index at '{}' is more than 1024 past the end of an array of length {len}",
        format_pointer(.path)
    )]
    ArrayGapTooLarge { path: Path, len: usize },

    /// A value does not survive a JSON round trip.
    #[error("value is not stringifyable: {0}")]
    NotStringifyable(String),

    /// An operation that needs a parent location got the root path.
    #[error("operation requires a non-empty path")]
    EmptyPath,
}

#[cfg(test)]
mod tests {
    use super::*;
    use stringifyable_path::path;

    #[test]
    fn test_messages_render_pointer_paths() {
        let err = TreeError::PathTypeMismatch {
            path: path!["a", 0],
            expected: Container::Object,
        };
        assert_eq!(err.to_string(), "path type mismatch at '/a/0': expected object");

        let err = TreeError::NonContiguousDeletion {
            path: path!["arr"],
            deleted: 1,
            kept: 2,
        };
        assert_eq!(
            err.to_string(),
            "non-contiguous deletion in array '/arr': index 1 deleted but index 2 kept"
        );

        let err = TreeError::ArrayGapTooLarge {
            path: path!["arr", 5000],
            len: 3,
        };
        assert_eq!(
            err.to_string(),
            "index at '/arr/5000' is more than 1024 past the end of an array of length 3"
        );
    }
}
