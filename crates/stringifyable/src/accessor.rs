//! Path-addressed reads and writes.
//!
//! Reads come in a lenient flavour (an unresolvable path yields `None`) and a
//! strict one selected with [`GetOptions::fail_on_unresolved`]. Writes create
//! missing intermediate containers, replacing whatever mismatched value was
//! stored at an intermediate location.

use stringifyable_path::PathSegment;
use tracing::trace;

use crate::error::TreeError;
use crate::value::{Container, Stringifyable};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GetOptions {
    /// Turn "not found" into [`TreeError::UnresolvedRequiredPath`] and shape
    /// mismatches into [`TreeError::PathTypeMismatch`].
    pub fail_on_unresolved: bool,
}

impl GetOptions {
    /// Options for a path that must resolve.
    pub fn required() -> Self {
        Self { fail_on_unresolved: true }
    }
}

/// Why a single step failed.
enum Miss {
    /// Missing key or index, or an atomic reached with segments left.
    Unresolved,
    /// The node is a container of the other kind.
    Mismatch(Container),
}

fn step_miss(node: &Stringifyable, segment: &PathSegment) -> Miss {
    match node.container() {
        Some(found) if found != Container::for_segment(segment) => {
            Miss::Mismatch(Container::for_segment(segment))
        }
        _ => Miss::Unresolved,
    }
}

fn fail<T>(path: &[PathSegment], miss: Miss, options: GetOptions) -> Result<Option<T>, TreeError> {
    if !options.fail_on_unresolved {
        return Ok(None);
    }
    Err(match miss {
        Miss::Unresolved => TreeError::UnresolvedRequiredPath { path: path.to_vec() },
        Miss::Mismatch(expected) => TreeError::PathTypeMismatch {
            path: path.to_vec(),
            expected,
        },
    })
}

/// Lenient lookup used internally by the differ and the patcher.
pub(crate) fn lookup<'a>(root: &'a Stringifyable, path: &[PathSegment]) -> Option<&'a Stringifyable> {
    path.iter().try_fold(root, |node, segment| node.get(segment))
}

/// Read the value at `path`.
///
/// The empty path returns `root` itself.
///
/// ```
/// use serde_json::json;
/// use stringifyable::{get_value_at_path, path, GetOptions, Stringifyable};
///
/// let doc = Stringifyable::from(json!({"a": [{"b": 1}]}));
/// let found = get_value_at_path(&doc, &path!["a", 0, "b"], GetOptions::default()).unwrap();
/// assert_eq!(found, Some(&Stringifyable::from(json!(1))));
///
/// let missing = get_value_at_path(&doc, &path!["a", 3], GetOptions::default()).unwrap();
/// assert_eq!(missing, None);
/// assert!(get_value_at_path(&doc, &path!["a", 3], GetOptions::required()).is_err());
/// ```
pub fn get_value_at_path<'a>(
    root: &'a Stringifyable,
    path: &[PathSegment],
    options: GetOptions,
) -> Result<Option<&'a Stringifyable>, TreeError> {
    let mut current = root;
    for (depth, segment) in path.iter().enumerate() {
        match current.get(segment) {
            Some(child) => current = child,
            None => return fail(&path[..=depth], step_miss(current, segment), options),
        }
    }
    Ok(Some(current))
}

fn get_value_at_path_mut<'a>(
    root: &'a mut Stringifyable,
    path: &[PathSegment],
    options: GetOptions,
) -> Result<Option<&'a mut Stringifyable>, TreeError> {
    let mut current = root;
    for (depth, segment) in path.iter().enumerate() {
        if current.get(segment).is_none() {
            return fail(&path[..=depth], step_miss(current, segment), options);
        }
        current = match current.get_mut(segment) {
            Some(child) => child,
            None => return fail(&path[..=depth], Miss::Unresolved, options),
        };
    }
    Ok(Some(current))
}

/// Read the value at `path` and remove it from its parent.
///
/// Array elements are spliced out, so later elements shift down. Object
/// members are removed without disturbing the order of the others. The root
/// cannot be detached from its owner: for the empty path a copy of the root is
/// returned and `root` is left as is.
pub fn take_value_at_path(
    root: &mut Stringifyable,
    path: &[PathSegment],
    options: GetOptions,
) -> Result<Option<Stringifyable>, TreeError> {
    let Some((last, parent_path)) = path.split_last() else {
        return Ok(Some(root.clone()));
    };
    let Some(parent) = get_value_at_path_mut(root, parent_path, options)? else {
        return Ok(None);
    };
    let miss = step_miss(parent, last);
    let taken = match (parent, last) {
        (Stringifyable::Object(map), PathSegment::Key(k)) => map.shift_remove(k),
        (Stringifyable::Array(arr), PathSegment::Index(i)) if *i < arr.len() => {
            Some(arr.remove(*i))
        }
        _ => None,
    };
    match taken {
        Some(value) => Ok(Some(value)),
        None => fail(path, miss, options),
    }
}

/// Largest run of `null`s a single write may pad an array with.
pub const MAX_ARRAY_GAP: usize = 1024;

/// Grow `arr` so that `index` is in bounds or is the next free position.
fn pad(arr: &mut Vec<Stringifyable>, index: usize, path: &[PathSegment]) -> Result<(), TreeError> {
    let gap = index.saturating_sub(arr.len());
    if gap > MAX_ARRAY_GAP {
        return Err(TreeError::ArrayGapTooLarge {
            path: path.to_vec(),
            len: arr.len(),
        });
    }
    if gap > 0 {
        trace!(
            pointer = %stringifyable_path::format_pointer(path),
            from = arr.len(),
            to = index,
            "padding array with nulls"
        );
        arr.resize(index, Stringifyable::null());
    }
    Ok(())
}

/// Step from `node` into the child at `segment`, making sure the child is a
/// container that `next` can step into.
fn vivify<'a>(
    node: &'a mut Stringifyable,
    segment: &PathSegment,
    next: &PathSegment,
    at: &[PathSegment],
) -> Result<&'a mut Stringifyable, TreeError> {
    let slot = match (node, segment) {
        (Stringifyable::Object(map), PathSegment::Key(k)) => {
            map.entry(k.clone()).or_insert_with(Stringifyable::null)
        }
        (Stringifyable::Array(arr), PathSegment::Index(i)) => {
            pad(arr, *i, at)?;
            if *i == arr.len() {
                arr.push(Stringifyable::null());
            }
            &mut arr[*i]
        }
        (_, segment) => {
            return Err(TreeError::PathTypeMismatch {
                path: at.to_vec(),
                expected: Container::for_segment(segment),
            })
        }
    };
    let wanted = Container::for_segment(next);
    if slot.container() != Some(wanted) {
        trace!(
            pointer = %stringifyable_path::format_pointer(at),
            container = %wanted,
            "replacing intermediate value with an empty container"
        );
        *slot = Stringifyable::empty(wanted);
    }
    Ok(slot)
}

/// Write `value` at `path`, creating intermediate containers as needed.
///
/// Intermediate locations whose shape does not suit the next segment are
/// overwritten with a fresh empty container. Only the root is never coerced:
/// if it cannot take the first segment the write fails with
/// [`TreeError::PathTypeMismatch`]. Writing past the end of an array pads the
/// gap with `null`; a gap wider than [`MAX_ARRAY_GAP`] fails with
/// [`TreeError::ArrayGapTooLarge`].
///
/// ```
/// use serde_json::json;
/// use stringifyable::{assign_value_at_path, path, Stringifyable};
///
/// let mut root = Stringifyable::from(json!({}));
/// assign_value_at_path(&mut root, &path!["a", 0, "b"], json!([1, 2, 3])).unwrap();
/// assert_eq!(root, Stringifyable::from(json!({"a": [{"b": [1, 2, 3]}]})));
/// ```
pub fn assign_value_at_path(
    root: &mut Stringifyable,
    path: &[PathSegment],
    value: impl Into<Stringifyable>,
) -> Result<(), TreeError> {
    let Some((last, init)) = path.split_last() else {
        return Err(TreeError::EmptyPath);
    };
    let mut current = root;
    for (depth, segment) in init.iter().enumerate() {
        current = vivify(current, segment, &path[depth + 1], &path[..=depth])?;
    }
    match (current, last) {
        (Stringifyable::Object(map), PathSegment::Key(k)) => {
            map.insert(k.clone(), value.into());
        }
        (Stringifyable::Array(arr), PathSegment::Index(i)) => {
            pad(arr, *i, path)?;
            if *i == arr.len() {
                arr.push(value.into());
            } else {
                arr[*i] = value.into();
            }
        }
        (_, segment) => {
            return Err(TreeError::PathTypeMismatch {
                path: path.to_vec(),
                expected: Container::for_segment(segment),
            })
        }
    }
    Ok(())
}
