use serde::de::DeserializeOwned;
use serde::Serialize;

use super::Stringifyable;
use crate::error::TreeError;

/// Admit an externally supplied value into the engine.
///
/// The value is encoded to JSON text and decoded back; it is accepted only if
/// the decoded copy equals the original. Values that silently degrade on the
/// way (non-finite floats become `null`, non-string map keys fail to encode)
/// are rejected with [`TreeError::NotStringifyable`].
///
/// ```
/// use std::collections::BTreeMap;
/// use stringifyable::ensure_stringifyable;
///
/// let mut values = BTreeMap::new();
/// values.insert("cpu".to_string(), 0.5);
/// assert!(ensure_stringifyable(&values).is_ok());
///
/// values.insert("memory".to_string(), f64::NAN);
/// assert!(ensure_stringifyable(&values).is_err());
/// ```
pub fn ensure_stringifyable<T>(value: &T) -> Result<Stringifyable, TreeError>
where
    T: Serialize + DeserializeOwned + PartialEq,
{
    let text =
        serde_json::to_string(value).map_err(|e| TreeError::NotStringifyable(e.to_string()))?;
    let decoded: T =
        serde_json::from_str(&text).map_err(|e| TreeError::NotStringifyable(e.to_string()))?;
    if &decoded != value {
        return Err(TreeError::NotStringifyable(
            "value changes across a JSON round trip".to_string(),
        ));
    }
    Stringifyable::parse(&text)
}
