//! Structural diff and patch.
//!
//! [`compute_diff`] reduces two snapshots of a tree to an ordered list of
//! path/operation entries; [`apply_diff_patch`] replays such a list onto a
//! mutable tree. Arrays are compared position by position: removing a middle
//! element shows up as rewritten tail positions plus a deleted last position.

pub mod types;
pub mod diff;
pub mod apply;
pub mod codec;

pub use types::{DiffEntry, DiffOptions, DiffResult, PatchOp};
pub use diff::{compute_diff, compute_diff_with};
pub use apply::apply_diff_patch;
pub use codec::{from_json, to_json, CodecError};
