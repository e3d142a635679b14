//! Paths into stringifyable trees.
//!
//! A path is a sequence of [`PathSegment`]s, each either an object key or an
//! array index. Paths render to and parse from JSON Pointer (RFC 6901)
//! strings for diagnostics and command-line use.
//!
//! # Example
//!
//! ```
//! use stringifyable_path::{format_pointer, parse_pointer, path};
//!
//! let p = path!["charts", 0, "a/b"];
//! assert_eq!(format_pointer(&p), "/charts/0/a~1b");
//! assert_eq!(parse_pointer("/charts/0/a~1b"), p);
//! ```

pub mod types;
pub use types::{Path, PathSegment};

pub mod util;
pub use util::{
    escape_component, format_pointer, is_prefix, is_root, is_valid_index, parse_pointer,
    unescape_component,
};

pub mod validate;
pub use validate::{validate_path, validate_pointer, ValidationError};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unescape_component() {
        assert_eq!(unescape_component("a~0b"), "a~b");
        assert_eq!(unescape_component("c~1d"), "c/d");
        assert_eq!(unescape_component("~01"), "~1");
        assert_eq!(unescape_component("plain"), "plain");
    }

    #[test]
    fn test_escape_component() {
        assert_eq!(escape_component("a~b"), "a~0b");
        assert_eq!(escape_component("c/d"), "c~1d");
        assert_eq!(escape_component("plain"), "plain");
    }

    #[test]
    fn test_parse_pointer() {
        assert_eq!(parse_pointer(""), Path::new());
        assert_eq!(parse_pointer("/"), path![""]);
        assert_eq!(parse_pointer("/foo/bar"), path!["foo", "bar"]);
        assert_eq!(parse_pointer("/arr/10"), path!["arr", 10]);
    }

    #[test]
    fn test_parse_pointer_non_canonical_index_is_key() {
        assert_eq!(parse_pointer("/01"), path!["01"]);
        assert_eq!(parse_pointer("/-1"), path!["-1"]);
        assert_eq!(parse_pointer("/-"), path!["-"]);
    }

    #[test]
    fn test_parse_pointer_without_leading_slash() {
        assert_eq!(parse_pointer("é/x"), path!["é", "x"]);
        assert_eq!(parse_pointer("a/0"), parse_pointer("/a/0"));
        assert_eq!(parse_pointer("/é"), path!["é"]);
    }

    #[test]
    fn test_format_pointer() {
        assert_eq!(format_pointer(&[]), "");
        assert_eq!(format_pointer(&path!["foo"]), "/foo");
        assert_eq!(format_pointer(&path!["a~b", 3, "c/d"]), "/a~0b/3/c~1d");
    }

    #[test]
    fn test_is_root() {
        assert!(is_root(&[]));
        assert!(!is_root(&path!["foo"]));
    }

    #[test]
    fn test_is_prefix() {
        let child = path!["foo", 0];
        assert!(is_prefix(&path!["foo"], &child));
        assert!(!is_prefix(&child, &path!["foo"]));
        assert!(is_prefix(&child, &child));
        assert!(is_prefix(&[], &child));
        assert!(!is_prefix(&path!["bar"], &child));
    }

    #[test]
    fn test_is_valid_index() {
        assert!(is_valid_index("0"));
        assert!(is_valid_index("123"));
        assert!(!is_valid_index("007"));
        assert!(!is_valid_index("-1"));
        assert!(!is_valid_index("1.5"));
        assert!(!is_valid_index(""));
    }
}
