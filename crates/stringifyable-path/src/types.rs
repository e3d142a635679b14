//! Type definitions for paths into a stringifyable tree.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A single step of a [`Path`].
///
/// Serializes untagged: a key is a JSON string, an index a JSON number.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PathSegment {
    /// Object member access.
    Key(String),
    /// Array element access.
    Index(usize),
}

impl PathSegment {
    /// Create a key segment.
    #[inline]
    pub fn key(k: impl Into<String>) -> Self {
        PathSegment::Key(k.into())
    }

    /// Create an index segment.
    #[inline]
    pub fn index(i: usize) -> Self {
        PathSegment::Index(i)
    }

    #[inline]
    pub fn is_key(&self) -> bool {
        matches!(self, PathSegment::Key(_))
    }

    #[inline]
    pub fn is_index(&self) -> bool {
        matches!(self, PathSegment::Index(_))
    }

    #[inline]
    pub fn as_key(&self) -> Option<&str> {
        match self {
            PathSegment::Key(k) => Some(k),
            PathSegment::Index(_) => None,
        }
    }

    #[inline]
    pub fn as_index(&self) -> Option<usize> {
        match self {
            PathSegment::Key(_) => None,
            PathSegment::Index(i) => Some(*i),
        }
    }
}

impl fmt::Display for PathSegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PathSegment::Key(k) => f.write_str(k),
            PathSegment::Index(i) => write!(f, "{i}"),
        }
    }
}

impl From<String> for PathSegment {
    fn from(s: String) -> Self {
        PathSegment::Key(s)
    }
}

impl From<&str> for PathSegment {
    fn from(s: &str) -> Self {
        PathSegment::Key(s.to_owned())
    }
}

impl From<usize> for PathSegment {
    fn from(i: usize) -> Self {
        PathSegment::Index(i)
    }
}

/// A location inside a tree. The empty path addresses the root.
pub type Path = Vec<PathSegment>;

/// Build a [`Path`] from a list of keys and indices.
///
/// ```
/// use stringifyable_path::{path, PathSegment};
///
/// let p = path!["arr", 2usize];
/// assert_eq!(p, vec![PathSegment::key("arr"), PathSegment::index(2)]);
/// assert!(path![].is_empty());
/// ```
#[macro_export]
macro_rules! path {
    () => {
        $crate::Path::new()
    };
    ($($seg:expr),+ $(,)?) => {
        vec![$($crate::PathSegment::from($seg)),+]
    };
}
