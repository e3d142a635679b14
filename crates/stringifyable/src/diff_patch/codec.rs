//! JSON codec for diff lists.
//!
//! Entry forms:
//! - `{"path": ["arr", 2], "value": "c"}` sets a leaf,
//! - `{"path": ["a"], "reset": "object"}` resets to an empty container,
//! - `{"path": ["x"], "delete": true}` deletes.
//!
//! Paths are JSON arrays so that keys and indices stay distinguishable.

use serde_json::{json, Map, Value};
use stringifyable_path::{Path, PathSegment};
use thiserror::Error;

use super::types::{DiffEntry, PatchOp};
use crate::value::{Atomic, Container};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CodecError {
    #[error("diff must be a JSON array")]
    NotAnArray,
    #[error("entry {0} must be a JSON object")]
    NotAnObject(usize),
    #[error("entry {0}: {1}")]
    InvalidPath(usize, String),
    #[error("entry {0}: {1}")]
    InvalidEntry(usize, String),
}

// ── Path helpers ──────────────────────────────────────────────────────────

fn encode_path(path: &[PathSegment]) -> Value {
    Value::Array(
        path.iter()
            .map(|segment| match segment {
                PathSegment::Key(k) => Value::String(k.clone()),
                PathSegment::Index(i) => Value::from(*i),
            })
            .collect(),
    )
}

fn decode_path(at: usize, v: Option<&Value>) -> Result<Path, CodecError> {
    let steps = v
        .and_then(Value::as_array)
        .ok_or_else(|| CodecError::InvalidPath(at, "path must be an array".into()))?;
    steps
        .iter()
        .map(|step| match step {
            Value::String(k) => Ok(PathSegment::Key(k.clone())),
            Value::Number(n) => n
                .as_u64()
                .and_then(|i| usize::try_from(i).ok())
                .map(PathSegment::Index)
                .ok_or_else(|| CodecError::InvalidPath(at, format!("invalid array index {n}"))),
            other => Err(CodecError::InvalidPath(at, format!("invalid path step {other}"))),
        })
        .collect()
}

fn decode_container(at: usize, v: &Value) -> Result<Container, CodecError> {
    match v.as_str() {
        Some("object") => Ok(Container::Object),
        Some("array") => Ok(Container::Array),
        _ => Err(CodecError::InvalidEntry(at, format!("unknown reset target {v}"))),
    }
}

// ── Serialization ─────────────────────────────────────────────────────────

/// Serialize one entry.
pub fn entry_to_json(entry: &DiffEntry) -> Value {
    let mut m = Map::new();
    m.insert("path".into(), encode_path(&entry.path));
    match &entry.op {
        PatchOp::Set(atomic) => {
            m.insert("value".into(), Value::from(atomic.clone()));
        }
        PatchOp::Reset(container) => {
            m.insert("reset".into(), json!(container.as_str()));
        }
        PatchOp::Delete => {
            m.insert("delete".into(), json!(true));
        }
    }
    Value::Object(m)
}

/// Serialize a diff list.
pub fn to_json(entries: &[DiffEntry]) -> Value {
    Value::Array(entries.iter().map(entry_to_json).collect())
}

// ── Deserialization ───────────────────────────────────────────────────────

fn entry_from_json(at: usize, v: &Value) -> Result<DiffEntry, CodecError> {
    let obj = v.as_object().ok_or(CodecError::NotAnObject(at))?;
    let path = decode_path(at, obj.get("path"))?;
    let op = match (obj.get("value"), obj.get("reset"), obj.get("delete")) {
        (Some(value), None, None) => Atomic::try_from(value.clone())
            .map(PatchOp::Set)
            .map_err(|_| CodecError::InvalidEntry(at, "value must be atomic".into()))?,
        (None, Some(target), None) => PatchOp::Reset(decode_container(at, target)?),
        (None, None, Some(Value::Bool(true))) => PatchOp::Delete,
        _ => {
            return Err(CodecError::InvalidEntry(
                at,
                "expected exactly one of 'value', 'reset' or 'delete: true'".into(),
            ))
        }
    };
    Ok(DiffEntry { path, op })
}

/// Deserialize a diff list.
pub fn from_json(v: &Value) -> Result<Vec<DiffEntry>, CodecError> {
    v.as_array()
        .ok_or(CodecError::NotAnArray)?
        .iter()
        .enumerate()
        .map(|(at, entry)| entry_from_json(at, entry))
        .collect()
}

// ── Tests ─────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use stringifyable_path::path;

    #[test]
    fn test_encode_forms() {
        let entries = vec![
            DiffEntry::set(path!["arr", 2], "c"),
            DiffEntry::reset(path!["a"], Container::Object),
            DiffEntry::delete(path!["x"]),
        ];
        assert_eq!(
            to_json(&entries),
            json!([
                {"path": ["arr", 2], "value": "c"},
                {"path": ["a"], "reset": "object"},
                {"path": ["x"], "delete": true},
            ])
        );
    }

    #[test]
    fn test_decode_keeps_numeric_keys_apart() {
        let decoded = from_json(&json!([{"path": ["0", 0], "value": null}])).unwrap();
        assert_eq!(decoded, vec![DiffEntry::set(path!["0", 0], Atomic::Null)]);
    }

    #[test]
    fn test_decode_errors() {
        assert_eq!(from_json(&json!({})), Err(CodecError::NotAnArray));
        assert_eq!(from_json(&json!([1])), Err(CodecError::NotAnObject(0)));
        assert!(matches!(
            from_json(&json!([{"path": "/a", "delete": true}])),
            Err(CodecError::InvalidPath(0, _))
        ));
        assert!(matches!(
            from_json(&json!([{"path": [-1], "delete": true}])),
            Err(CodecError::InvalidPath(0, _))
        ));
        assert!(matches!(
            from_json(&json!([{"path": [], "value": [1]}])),
            Err(CodecError::InvalidEntry(0, _))
        ));
        assert!(matches!(
            from_json(&json!([{"path": ["a"], "value": 1, "delete": true}])),
            Err(CodecError::InvalidEntry(0, _))
        ));
        assert!(matches!(
            from_json(&json!([{"path": ["a"], "delete": false}])),
            Err(CodecError::InvalidEntry(0, _))
        ));
        assert!(matches!(
            from_json(&json!([{"path": ["a"], "reset": "map"}])),
            Err(CodecError::InvalidEntry(0, _))
        ));
    }
}
