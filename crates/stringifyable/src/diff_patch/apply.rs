//! The patcher.
//!
//! Replays a diff list in two phases. Phase 1 writes every set and reset and
//! records deletions in a side set of doomed paths, so no tree value can ever
//! be mistaken for a deletion. Phase 2 walks the patched tree once: doomed
//! object members are removed and arrays are truncated at their first doomed
//! index. Doomed array positions must form a contiguous tail.

use std::collections::BTreeSet;
use std::ops::Bound;

use stringifyable_path::{format_pointer, is_prefix, is_root, Path, PathSegment};
use tracing::{debug, trace, warn};

use super::types::{DiffEntry, PatchOp};
use crate::accessor::{assign_value_at_path, lookup};
use crate::error::TreeError;
use crate::value::{Container, Stringifyable};

type Doomed = BTreeSet<Path>;

/// Replay `diff_patch` onto `root`.
///
/// Given a `root` equal to the `before` tree a diff was computed from, the
/// result equals the `current` tree. The patch is applied to a scratch copy
/// first: on error `root` is left unchanged.
///
/// ```
/// use serde_json::json;
/// use stringifyable::{apply_diff_patch, path, DiffEntry, Stringifyable};
///
/// let mut root = Stringifyable::from(json!({"x": "foo", "y": 1}));
/// apply_diff_patch(&mut root, &[DiffEntry::delete(path!["x"])]).unwrap();
/// assert_eq!(root, Stringifyable::from(json!({"y": 1})));
/// ```
pub fn apply_diff_patch(root: &mut Stringifyable, diff_patch: &[DiffEntry]) -> Result<(), TreeError> {
    let mut scratch = root.clone();
    let mut doomed = Doomed::new();
    let result = diff_patch
        .iter()
        .try_for_each(|entry| replay(&mut scratch, &mut doomed, entry))
        .and_then(|()| {
            if doomed.is_empty() {
                return Ok(());
            }
            clean_up(&mut scratch, &mut Path::new(), &doomed)
        });
    match result {
        Ok(()) => {
            debug!(
                entries = diff_patch.len(),
                deletions = doomed.len(),
                "applied diff patch"
            );
            *root = scratch;
            Ok(())
        }
        Err(err) => {
            warn!(error = %err, "diff patch aborted");
            Err(err)
        }
    }
}

fn replay(tree: &mut Stringifyable, doomed: &mut Doomed, entry: &DiffEntry) -> Result<(), TreeError> {
    match &entry.op {
        PatchOp::Set(atomic) => write(tree, doomed, &entry.path, Stringifyable::Atomic(atomic.clone())),
        PatchOp::Reset(container) => write(tree, doomed, &entry.path, Stringifyable::empty(*container)),
        PatchOp::Delete => mark(tree, doomed, &entry.path),
    }
}

fn write(
    tree: &mut Stringifyable,
    doomed: &mut Doomed,
    path: &[PathSegment],
    value: Stringifyable,
) -> Result<(), TreeError> {
    // A write through a doomed location brings it back as a fresh container.
    for depth in 1..path.len() {
        if doomed.remove(&path[..depth]) {
            let fresh = Stringifyable::empty(Container::for_segment(&path[depth]));
            trace!(pointer = %format_pointer(&path[..depth]), "reviving doomed location");
            assign_value_at_path(tree, &path[..depth], fresh)?;
        }
    }
    doomed.retain(|d| !is_prefix(path, d));
    if is_root(path) {
        *tree = value;
        return Ok(());
    }
    assign_value_at_path(tree, path, value)
}

fn mark(tree: &Stringifyable, doomed: &mut Doomed, path: &[PathSegment]) -> Result<(), TreeError> {
    if is_root(path) {
        return Err(TreeError::EmptyPath);
    }
    if (1..path.len()).any(|depth| doomed.contains(&path[..depth])) {
        trace!(pointer = %format_pointer(path), "ancestor already doomed");
        return Ok(());
    }
    if lookup(tree, path).is_none() {
        trace!(pointer = %format_pointer(path), "deleting an absent location");
        return Ok(());
    }
    doomed.insert(path.to_vec());
    Ok(())
}

/// Whether `path` or anything below it is doomed. Extensions of a path sort
/// directly after it, so only the first entry at or after `path` matters.
fn doomed_within(doomed: &Doomed, path: &[PathSegment]) -> bool {
    doomed
        .range::<[PathSegment], _>((Bound::Included(path), Bound::Unbounded))
        .next()
        .is_some_and(|d| is_prefix(path, d))
}

fn is_doomed_child(doomed: &Doomed, path: &mut Path, segment: PathSegment) -> bool {
    path.push(segment);
    let hit = doomed.contains(path.as_slice());
    path.pop();
    hit
}

fn clean_up(node: &mut Stringifyable, path: &mut Path, doomed: &Doomed) -> Result<(), TreeError> {
    if !doomed_within(doomed, path) {
        return Ok(());
    }
    match node {
        Stringifyable::Atomic(_) => {}
        Stringifyable::Object(map) => {
            map.retain(|key, _| !is_doomed_child(doomed, path, PathSegment::Key(key.clone())));
            for (key, child) in map.iter_mut() {
                path.push(PathSegment::Key(key.clone()));
                clean_up(child, path, doomed)?;
                path.pop();
            }
        }
        Stringifyable::Array(arr) => {
            let len = arr.len();
            let cut = (0..len).find(|&i| is_doomed_child(doomed, path, PathSegment::Index(i)));
            if let Some(cut) = cut {
                if let Some(kept) =
                    (cut + 1..len).find(|&i| !is_doomed_child(doomed, path, PathSegment::Index(i)))
                {
                    return Err(TreeError::NonContiguousDeletion {
                        path: path.clone(),
                        deleted: cut,
                        kept,
                    });
                }
                trace!(pointer = %format_pointer(path), from = len, to = cut, "truncating array");
                arr.truncate(cut);
            }
            for (index, child) in arr.iter_mut().enumerate() {
                path.push(PathSegment::Index(index));
                clean_up(child, path, doomed)?;
                path.pop();
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diff_patch::{compute_diff, compute_diff_with, DiffOptions};
    use serde_json::json;
    use stringifyable_path::path;

    fn tree(v: serde_json::Value) -> Stringifyable {
        Stringifyable::from(v)
    }

    fn patched(base: serde_json::Value, entries: &[DiffEntry]) -> Result<Stringifyable, TreeError> {
        let mut root = tree(base);
        apply_diff_patch(&mut root, entries).map(|()| root)
    }

    #[test]
    fn test_empty_patch_is_noop() {
        assert_eq!(patched(json!({"a": [1]}), &[]), Ok(tree(json!({"a": [1]}))));
    }

    #[test]
    fn test_delete_object_member() {
        assert_eq!(
            patched(json!({"x": "foo"}), &[DiffEntry::delete(path!["x"])]),
            Ok(tree(json!({})))
        );
    }

    #[test]
    fn test_rewrite_and_truncate() {
        let entries = [
            DiffEntry::set(path!["arr", 1], "d"),
            DiffEntry::delete(path!["arr", 2]),
        ];
        assert_eq!(
            patched(json!({"arr": ["a", "b", "c"]}), &entries),
            Ok(tree(json!({"arr": ["a", "d"]})))
        );
    }

    #[test]
    fn test_non_contiguous_deletion_aborts() {
        let mut root = tree(json!({"arr": ["a", "b", "c"]}));
        let snapshot = root.clone();
        let result = apply_diff_patch(&mut root, &[DiffEntry::delete(path!["arr", 1])]);
        assert_eq!(
            result,
            Err(TreeError::NonContiguousDeletion {
                path: path!["arr"],
                deleted: 1,
                kept: 2,
            })
        );
        assert_eq!(root, snapshot);
    }

    #[test]
    fn test_string_values_are_never_deletions() {
        let entries = [DiffEntry::set(path!["a"], "$$delete$$"), DiffEntry::set(path!["b", 0], "")];
        assert_eq!(
            patched(json!({}), &entries),
            Ok(tree(json!({"a": "$$delete$$", "b": [""]})))
        );
    }

    #[test]
    fn test_delete_absent_location_is_noop() {
        let entries = [DiffEntry::delete(path!["missing", "deep"]), DiffEntry::delete(path!["arr", 9])];
        assert_eq!(
            patched(json!({"arr": [1]}), &entries),
            Ok(tree(json!({"arr": [1]})))
        );
    }

    #[test]
    fn test_delete_root_fails() {
        assert_eq!(
            patched(json!({"a": 1}), &[DiffEntry::delete(path![])]),
            Err(TreeError::EmptyPath)
        );
    }

    #[test]
    fn test_set_root() {
        assert_eq!(patched(json!({"a": 1}), &[DiffEntry::set(path![], 7i64)]), Ok(tree(json!(7))));
    }

    #[test]
    fn test_write_revives_doomed_ancestor() {
        let entries = [
            DiffEntry::delete(path!["a"]),
            DiffEntry::set(path!["a", "b"], 1i64),
        ];
        assert_eq!(
            patched(json!({"a": {"old": true}}), &entries),
            Ok(tree(json!({"a": {"b": 1}})))
        );
    }

    #[test]
    fn test_write_cancels_doomed_target() {
        let entries = [
            DiffEntry::delete(path!["arr", 1]),
            DiffEntry::set(path!["arr", 1], "again"),
        ];
        assert_eq!(
            patched(json!({"arr": [0, 1]}), &entries),
            Ok(tree(json!({"arr": [0, "again"]})))
        );
    }

    #[test]
    fn test_deletions_below_doomed_ancestor_are_skipped() {
        let entries = [
            DiffEntry::delete(path!["gone"]),
            DiffEntry::delete(path!["gone", "x"]),
            DiffEntry::delete(path!["gone", "x", 0]),
        ];
        assert_eq!(
            patched(json!({"gone": {"x": [1]}, "kept": 1}), &entries),
            Ok(tree(json!({"kept": 1})))
        );
    }

    #[test]
    fn test_nested_array_cleanup() {
        let before = tree(json!({"rows": [[1, 2, 3], {"cells": [4, 5]}]}));
        let current = tree(json!({"rows": [[1], {"cells": [4]}]}));
        let mut root = before.clone();
        apply_diff_patch(&mut root, &compute_diff(&before, &current).diff_patch).unwrap();
        assert_eq!(root, current);
    }

    #[test]
    fn test_unpruned_diff_replays_identically() {
        let before = tree(json!({"gone": {"x": [1, {"y": 2}]}, "list": [{"a": 1}, {"b": 2}]}));
        let current = tree(json!({"list": [{"a": 1}]}));
        let diff = compute_diff_with(&before, &current, DiffOptions { prune_deleted_subtrees: false });
        let mut root = before.clone();
        apply_diff_patch(&mut root, &diff.diff_patch).unwrap();
        assert_eq!(root, current);
    }

    #[test]
    fn test_shape_change_roundtrip() {
        let before = tree(json!({"a": {"k": 1}, "b": [1, 2], "c": 3, "d": "x"}));
        let current = tree(json!({"a": [true], "b": {"k": []}, "c": {}, "d": []}));
        let mut root = before.clone();
        apply_diff_patch(&mut root, &compute_diff(&before, &current).diff_patch).unwrap();
        assert_eq!(root, current);
    }

    #[test]
    fn test_wide_array_gap_aborts_patch() {
        let entries = [
            DiffEntry::set(path!["a", 0], "kept"),
            DiffEntry::set(path!["a", usize::MAX], 1i64),
        ];
        let mut root = tree(json!({"a": []}));
        assert_eq!(
            apply_diff_patch(&mut root, &entries),
            Err(TreeError::ArrayGapTooLarge { path: path!["a", usize::MAX], len: 1 })
        );
        assert_eq!(root, tree(json!({"a": []})));
    }
}
