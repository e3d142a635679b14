use crate::types::PathSegment;

/// Unescapes a JSON Pointer reference token.
pub fn unescape_component(component: &str) -> String {
    if !component.contains('~') {
        return component.to_string();
    }
    component.replace("~1", "/").replace("~0", "~")
}

/// Escapes a JSON Pointer reference token.
pub fn escape_component(component: &str) -> String {
    if !component.contains('/') && !component.contains('~') {
        return component.to_string();
    }
    component.replace('~', "~0").replace('/', "~1")
}

/// Check if a string represents a canonical non-negative array index.
pub fn is_valid_index(index: &str) -> bool {
    if index.is_empty() {
        return false;
    }
    let bytes = index.as_bytes();
    if bytes.len() > 1 && bytes[0] == b'0' {
        return false;
    }
    bytes.iter().all(|&b| b.is_ascii_digit())
}

fn segment_from_token(token: &str) -> PathSegment {
    let token = unescape_component(token);
    if is_valid_index(&token) {
        if let Ok(i) = token.parse::<usize>() {
            return PathSegment::Index(i);
        }
    }
    PathSegment::Key(token)
}

/// Parse a JSON Pointer string into path segments.
///
/// A pointer without the leading `/` is read as if it had one, so `a/0` and
/// `/a/0` name the same path. Use [`validate_pointer`](crate::validate_pointer)
/// first when strict RFC 6901 input is required.
pub fn parse_pointer(pointer: &str) -> Vec<PathSegment> {
    if pointer.is_empty() {
        return Vec::new();
    }
    let tokens = pointer.strip_prefix('/').unwrap_or(pointer);
    tokens.split('/').map(segment_from_token).collect()
}

/// Render path segments as a JSON Pointer string.
pub fn format_pointer(path: &[PathSegment]) -> String {
    let mut out = String::new();
    for segment in path {
        out.push('/');
        match segment {
            PathSegment::Key(k) => out.push_str(&escape_component(k)),
            PathSegment::Index(i) => out.push_str(&i.to_string()),
        }
    }
    out
}

/// Check if `path` addresses the root.
pub fn is_root(path: &[PathSegment]) -> bool {
    path.is_empty()
}

/// Check if `prefix` is `path` itself or one of its ancestors.
pub fn is_prefix(prefix: &[PathSegment], path: &[PathSegment]) -> bool {
    path.starts_with(prefix)
}
