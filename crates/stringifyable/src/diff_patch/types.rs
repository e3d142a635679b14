//! Diff entries and differ options.

use std::fmt;

use stringifyable_path::{format_pointer, Path};

use crate::value::{Atomic, Container, Stringifyable};

/// What a diff entry does at its path.
#[derive(Debug, Clone, PartialEq)]
pub enum PatchOp {
    /// Set the location to a leaf value.
    Set(Atomic),
    /// Replace the location with an empty container. Emitted when a container
    /// takes the place of a value of another shape.
    Reset(Container),
    /// The location no longer exists.
    Delete,
}

impl PatchOp {
    /// The value this operation writes, if any.
    pub fn value(&self) -> Option<Stringifyable> {
        match self {
            PatchOp::Set(atomic) => Some(Stringifyable::Atomic(atomic.clone())),
            PatchOp::Reset(container) => Some(Stringifyable::empty(*container)),
            PatchOp::Delete => None,
        }
    }
}

/// One path/operation pair of a diff list.
#[derive(Debug, Clone, PartialEq)]
pub struct DiffEntry {
    pub path: Path,
    pub op: PatchOp,
}

impl DiffEntry {
    pub fn set(path: Path, value: impl Into<Atomic>) -> Self {
        Self { path, op: PatchOp::Set(value.into()) }
    }

    pub fn reset(path: Path, container: Container) -> Self {
        Self { path, op: PatchOp::Reset(container) }
    }

    pub fn delete(path: Path) -> Self {
        Self { path, op: PatchOp::Delete }
    }

    pub fn is_delete(&self) -> bool {
        matches!(self.op, PatchOp::Delete)
    }
}

impl fmt::Display for DiffEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let pointer = format_pointer(&self.path);
        match &self.op {
            PatchOp::Set(atomic) => write!(f, "set '{pointer}' = {}", Stringifyable::Atomic(atomic.clone())),
            PatchOp::Reset(container) => write!(f, "reset '{pointer}' to empty {container}"),
            PatchOp::Delete => write!(f, "delete '{pointer}'"),
        }
    }
}

/// Output of the differ.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DiffResult {
    /// Entries in replay order: all sets and resets, then all deletions.
    pub diff_patch: Vec<DiffEntry>,
}

impl DiffResult {
    pub fn is_empty(&self) -> bool {
        self.diff_patch.is_empty()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DiffOptions {
    /// Stop walking a removed subtree once its root has been reported deleted.
    pub prune_deleted_subtrees: bool,
}

impl Default for DiffOptions {
    fn default() -> Self {
        Self { prune_deleted_subtrees: true }
    }
}
