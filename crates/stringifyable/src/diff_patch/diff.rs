//! The differ.
//!
//! Two pre-order passes. The first walks `current` and reports every leaf
//! whose value is new or changed, plus every container that replaced a value
//! of another shape. The second walks `before` and reports every location
//! that no longer exists in `current`.

use stringifyable_path::{Path, PathSegment};
use tracing::debug;

use super::types::{DiffEntry, DiffOptions, DiffResult};
use crate::value::{Container, Stringifyable};

/// Compute the entries that turn `before` into `current`.
///
/// ```
/// use serde_json::json;
/// use stringifyable::{compute_diff, path, DiffEntry, Stringifyable};
///
/// let before = Stringifyable::from(json!({"arr": ["a", "b", "c"]}));
/// let current = Stringifyable::from(json!({"arr": ["a", "d"]}));
/// assert_eq!(
///     compute_diff(&before, &current).diff_patch,
///     vec![
///         DiffEntry::set(path!["arr", 1], "d"),
///         DiffEntry::delete(path!["arr", 2]),
///     ]
/// );
/// ```
pub fn compute_diff(before: &Stringifyable, current: &Stringifyable) -> DiffResult {
    compute_diff_with(before, current, DiffOptions::default())
}

pub fn compute_diff_with(
    before: &Stringifyable,
    current: &Stringifyable,
    options: DiffOptions,
) -> DiffResult {
    let mut diff_patch = Vec::new();
    let mut path = Path::new();
    collect_changes(Some(before), current, &mut path, &mut diff_patch);
    let changes = diff_patch.len();
    collect_deletions(before, Some(current), &mut path, options, &mut diff_patch);
    debug!(
        changes,
        deletions = diff_patch.len() - changes,
        "computed diff"
    );
    DiffResult { diff_patch }
}

/// A container that takes the place of a value of another shape starts out empty.
fn note_reset(
    previous: Option<&Stringifyable>,
    container: Container,
    path: &Path,
    out: &mut Vec<DiffEntry>,
) {
    if previous.and_then(Stringifyable::container) != Some(container) {
        out.push(DiffEntry::reset(path.clone(), container));
    }
}

/// `previous` is the node found at the same path in `before`, if any.
fn collect_changes(
    previous: Option<&Stringifyable>,
    node: &Stringifyable,
    path: &mut Path,
    out: &mut Vec<DiffEntry>,
) {
    match node {
        Stringifyable::Atomic(atomic) => {
            if previous.and_then(Stringifyable::as_atomic) != Some(atomic) {
                out.push(DiffEntry::set(path.clone(), atomic.clone()));
            }
        }
        Stringifyable::Object(map) => {
            note_reset(previous, Container::Object, path, out);
            for (key, child) in map {
                let segment = PathSegment::Key(key.clone());
                let before_child = previous.and_then(|p| p.get(&segment));
                path.push(segment);
                collect_changes(before_child, child, path, out);
                path.pop();
            }
        }
        Stringifyable::Array(arr) => {
            note_reset(previous, Container::Array, path, out);
            for (index, child) in arr.iter().enumerate() {
                let segment = PathSegment::Index(index);
                let before_child = previous.and_then(|p| p.get(&segment));
                path.push(segment);
                collect_changes(before_child, child, path, out);
                path.pop();
            }
        }
    }
}

/// `counterpart` is the node found at the same path in `current`, if any.
fn collect_deletions(
    node: &Stringifyable,
    counterpart: Option<&Stringifyable>,
    path: &mut Path,
    options: DiffOptions,
    out: &mut Vec<DiffEntry>,
) {
    if counterpart.is_none() {
        out.push(DiffEntry::delete(path.clone()));
        if options.prune_deleted_subtrees {
            return;
        }
    }
    match node {
        Stringifyable::Atomic(_) => {}
        Stringifyable::Object(map) => {
            for (key, child) in map {
                let segment = PathSegment::Key(key.clone());
                let current_child = counterpart.and_then(|c| c.get(&segment));
                path.push(segment);
                collect_deletions(child, current_child, path, options, out);
                path.pop();
            }
        }
        Stringifyable::Array(arr) => {
            for (index, child) in arr.iter().enumerate() {
                let segment = PathSegment::Index(index);
                let current_child = counterpart.and_then(|c| c.get(&segment));
                path.push(segment);
                collect_deletions(child, current_child, path, options, out);
                path.pop();
            }
        }
    }
}
