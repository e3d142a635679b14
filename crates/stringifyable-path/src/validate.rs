//! Validation of externally supplied pointers and paths.

use thiserror::Error;

use crate::types::PathSegment;

/// Maximum allowed pointer string length.
const MAX_POINTER_LENGTH: usize = 1024;

/// Maximum allowed path depth.
const MAX_PATH_LENGTH: usize = 256;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("pointer must be empty or start with '/'")]
    PointerInvalid,
    #[error("pointer longer than 1024 characters")]
    PointerTooLong,
    #[error("path deeper than 256 segments")]
    PathTooLong,
}

/// Validate a JSON Pointer string.
///
/// ```
/// use stringifyable_path::validate_pointer;
///
/// validate_pointer("").unwrap();
/// validate_pointer("/foo/0").unwrap();
/// validate_pointer("foo").unwrap_err();
/// ```
pub fn validate_pointer(pointer: &str) -> Result<(), ValidationError> {
    if pointer.is_empty() {
        return Ok(());
    }
    if !pointer.starts_with('/') {
        return Err(ValidationError::PointerInvalid);
    }
    if pointer.len() > MAX_POINTER_LENGTH {
        return Err(ValidationError::PointerTooLong);
    }
    Ok(())
}

/// Validate the depth of a path.
pub fn validate_path(path: &[PathSegment]) -> Result<(), ValidationError> {
    if path.len() > MAX_PATH_LENGTH {
        return Err(ValidationError::PathTooLong);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_pointer_too_long() {
        let pointer = format!("/{}", "a".repeat(MAX_POINTER_LENGTH));
        assert_eq!(validate_pointer(&pointer), Err(ValidationError::PointerTooLong));
    }

    #[test]
    fn test_validate_path_depth() {
        let shallow: Vec<PathSegment> = (0..10).map(PathSegment::Index).collect();
        assert!(validate_path(&shallow).is_ok());
        let deep: Vec<PathSegment> = (0..=MAX_PATH_LENGTH).map(PathSegment::Index).collect();
        assert_eq!(validate_path(&deep), Err(ValidationError::PathTooLong));
    }
}
