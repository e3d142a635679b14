//! The stringifyable value model.
//!
//! A [`Stringifyable`] is a closed sum type over exactly what a JSON round trip
//! preserves: atomics (string, number, boolean, null), string-keyed objects and
//! arrays. Anything else is rejected where data enters the engine, see
//! [`ensure_stringifyable`].

mod boundary;

use std::fmt;

use indexmap::IndexMap;
use serde::de::DeserializeOwned;
use serde::ser::{SerializeMap, SerializeSeq};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Number, Value};
use stringifyable_path::PathSegment;

use crate::error::TreeError;

pub use boundary::ensure_stringifyable;

/// Object storage. Equality ignores member order, iteration keeps insertion order.
pub type Object = IndexMap<String, Stringifyable>;

// ── Atomic ────────────────────────────────────────────────────────────────

/// A leaf value.
#[derive(Debug, Clone, PartialEq)]
pub enum Atomic {
    Null,
    Bool(bool),
    Number(Number),
    String(String),
}

impl Atomic {
    /// Build a number leaf, rejecting NaN and the infinities.
    pub fn from_f64(f: f64) -> Result<Self, TreeError> {
        Number::from_f64(f)
            .map(Atomic::Number)
            .ok_or_else(|| TreeError::NotStringifyable(format!("{f} has no JSON representation")))
    }
}

impl From<bool> for Atomic {
    fn from(b: bool) -> Self {
        Atomic::Bool(b)
    }
}

impl From<i64> for Atomic {
    fn from(i: i64) -> Self {
        Atomic::Number(i.into())
    }
}

impl From<&str> for Atomic {
    fn from(s: &str) -> Self {
        Atomic::String(s.to_owned())
    }
}

impl From<String> for Atomic {
    fn from(s: String) -> Self {
        Atomic::String(s)
    }
}

impl From<Number> for Atomic {
    fn from(n: Number) -> Self {
        Atomic::Number(n)
    }
}

impl TryFrom<Value> for Atomic {
    type Error = Value;

    /// Fails with the original value when it is an object or an array.
    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::Null => Ok(Atomic::Null),
            Value::Bool(b) => Ok(Atomic::Bool(b)),
            Value::Number(n) => Ok(Atomic::Number(n)),
            Value::String(s) => Ok(Atomic::String(s)),
            other => Err(other),
        }
    }
}

impl From<Atomic> for Value {
    fn from(atomic: Atomic) -> Self {
        match atomic {
            Atomic::Null => Value::Null,
            Atomic::Bool(b) => Value::Bool(b),
            Atomic::Number(n) => Value::Number(n),
            Atomic::String(s) => Value::String(s),
        }
    }
}

impl Serialize for Atomic {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Atomic::Null => serializer.serialize_unit(),
            Atomic::Bool(b) => serializer.serialize_bool(*b),
            Atomic::Number(n) => n.serialize(serializer),
            Atomic::String(s) => serializer.serialize_str(s),
        }
    }
}

impl<'de> Deserialize<'de> for Atomic {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        Atomic::try_from(value)
            .map_err(|_| serde::de::Error::custom("expected a string, number, boolean or null"))
    }
}

// ── Shapes ────────────────────────────────────────────────────────────────

/// The two composite shapes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Container {
    Object,
    Array,
}

impl Container {
    /// The container a segment can step into: keys need objects, indices arrays.
    pub fn for_segment(segment: &PathSegment) -> Self {
        match segment {
            PathSegment::Key(_) => Container::Object,
            PathSegment::Index(_) => Container::Array,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Container::Object => "object",
            Container::Array => "array",
        }
    }
}

impl fmt::Display for Container {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ── Stringifyable ─────────────────────────────────────────────────────────

/// A JSON-round-trip-safe tree.
#[derive(Debug, Clone, PartialEq)]
pub enum Stringifyable {
    Atomic(Atomic),
    Object(Object),
    Array(Vec<Stringifyable>),
}

impl Default for Stringifyable {
    fn default() -> Self {
        Stringifyable::Atomic(Atomic::Null)
    }
}

impl Stringifyable {
    /// An empty container of the given kind.
    pub fn empty(container: Container) -> Self {
        match container {
            Container::Object => Stringifyable::Object(Object::new()),
            Container::Array => Stringifyable::Array(Vec::new()),
        }
    }

    pub fn null() -> Self {
        Stringifyable::Atomic(Atomic::Null)
    }

    /// Build a number leaf, rejecting NaN and the infinities.
    pub fn from_f64(f: f64) -> Result<Self, TreeError> {
        Atomic::from_f64(f).map(Stringifyable::Atomic)
    }

    /// Parse JSON text.
    pub fn parse(text: &str) -> Result<Self, TreeError> {
        serde_json::from_str::<Value>(text)
            .map(Stringifyable::from)
            .map_err(|e| TreeError::NotStringifyable(e.to_string()))
    }

    /// Decode into any deserializable type.
    pub fn decode<T: DeserializeOwned>(&self) -> Result<T, TreeError> {
        serde_json::from_value(Value::from(self.clone()))
            .map_err(|e| TreeError::NotStringifyable(e.to_string()))
    }

    /// True for strings, numbers, booleans and null.
    pub fn is_atomic(&self) -> bool {
        matches!(self, Stringifyable::Atomic(_))
    }

    pub fn is_object(&self) -> bool {
        matches!(self, Stringifyable::Object(_))
    }

    pub fn is_array(&self) -> bool {
        matches!(self, Stringifyable::Array(_))
    }

    /// The container kind, or `None` for atomics.
    pub fn container(&self) -> Option<Container> {
        match self {
            Stringifyable::Atomic(_) => None,
            Stringifyable::Object(_) => Some(Container::Object),
            Stringifyable::Array(_) => Some(Container::Array),
        }
    }

    pub fn as_atomic(&self) -> Option<&Atomic> {
        match self {
            Stringifyable::Atomic(a) => Some(a),
            _ => None,
        }
    }

    pub fn as_object(&self) -> Option<&Object> {
        match self {
            Stringifyable::Object(map) => Some(map),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&Vec<Stringifyable>> {
        match self {
            Stringifyable::Array(arr) => Some(arr),
            _ => None,
        }
    }

    /// The direct child addressed by `segment`, if this node has one.
    pub fn get(&self, segment: &PathSegment) -> Option<&Stringifyable> {
        match (self, segment) {
            (Stringifyable::Object(map), PathSegment::Key(k)) => map.get(k),
            (Stringifyable::Array(arr), PathSegment::Index(i)) => arr.get(*i),
            _ => None,
        }
    }

    pub fn get_mut(&mut self, segment: &PathSegment) -> Option<&mut Stringifyable> {
        match (self, segment) {
            (Stringifyable::Object(map), PathSegment::Key(k)) => map.get_mut(k),
            (Stringifyable::Array(arr), PathSegment::Index(i)) => arr.get_mut(*i),
            _ => None,
        }
    }
}

impl From<Atomic> for Stringifyable {
    fn from(atomic: Atomic) -> Self {
        Stringifyable::Atomic(atomic)
    }
}

impl From<bool> for Stringifyable {
    fn from(b: bool) -> Self {
        Stringifyable::Atomic(Atomic::Bool(b))
    }
}

impl From<i64> for Stringifyable {
    fn from(i: i64) -> Self {
        Stringifyable::Atomic(Atomic::from(i))
    }
}

impl From<&str> for Stringifyable {
    fn from(s: &str) -> Self {
        Stringifyable::Atomic(Atomic::from(s))
    }
}

impl From<String> for Stringifyable {
    fn from(s: String) -> Self {
        Stringifyable::Atomic(Atomic::String(s))
    }
}

impl From<Value> for Stringifyable {
    fn from(value: Value) -> Self {
        match value {
            Value::Array(arr) => Stringifyable::Array(arr.into_iter().map(Stringifyable::from).collect()),
            Value::Object(map) => Stringifyable::Object(
                map.into_iter()
                    .map(|(k, v)| (k, Stringifyable::from(v)))
                    .collect(),
            ),
            Value::Null => Stringifyable::Atomic(Atomic::Null),
            Value::Bool(b) => Stringifyable::Atomic(Atomic::Bool(b)),
            Value::Number(n) => Stringifyable::Atomic(Atomic::Number(n)),
            Value::String(s) => Stringifyable::Atomic(Atomic::String(s)),
        }
    }
}

impl From<Stringifyable> for Value {
    fn from(value: Stringifyable) -> Self {
        match value {
            Stringifyable::Atomic(a) => Value::from(a),
            Stringifyable::Object(map) => {
                Value::Object(map.into_iter().map(|(k, v)| (k, Value::from(v))).collect())
            }
            Stringifyable::Array(arr) => Value::Array(arr.into_iter().map(Value::from).collect()),
        }
    }
}

impl Serialize for Stringifyable {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Stringifyable::Atomic(a) => a.serialize(serializer),
            Stringifyable::Object(map) => {
                let mut m = serializer.serialize_map(Some(map.len()))?;
                for (k, v) in map {
                    m.serialize_entry(k, v)?;
                }
                m.end()
            }
            Stringifyable::Array(arr) => {
                let mut seq = serializer.serialize_seq(Some(arr.len()))?;
                for v in arr {
                    seq.serialize_element(v)?;
                }
                seq.end()
            }
        }
    }
}

impl<'de> Deserialize<'de> for Stringifyable {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Value::deserialize(deserializer).map(Stringifyable::from)
    }
}

impl fmt::Display for Stringifyable {
    /// Compact JSON text.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = serde_json::to_string(self).map_err(|_| fmt::Error)?;
        f.write_str(&text)
    }
}
