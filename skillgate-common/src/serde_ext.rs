//! Serde helpers shared by the rule and event models.

use indexmap::IndexMap;
use serde::de::{DeserializeOwned, Error, Unexpected};
use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Deserialize a field where an explicit `null` means the same as an absent value.
///
/// Use together with `#[serde(default)]` so both a missing key and `null`
/// produce `T::default()`.
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Deserialize an optional nested record that must be a JSON object.
///
/// `null` is absent. Any other non-object value is an error, so arrays are
/// never read positionally into struct fields.
pub(crate) fn optional_object<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    match Value::deserialize(deserializer)? {
        Value::Null => Ok(None),
        value => object_from_value(value).map(Some),
    }
}

/// Deserialize a name-to-record mapping whose records must all be JSON objects.
///
/// A missing or `null` mapping is empty. Duplicate names keep their first
/// position and their last record.
pub(crate) fn object_map<'de, D, T>(deserializer: D) -> Result<IndexMap<String, T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    Option::<IndexMap<String, Value>>::deserialize(deserializer)?
        .unwrap_or_default()
        .into_iter()
        .map(|(name, value)| Ok((name, object_from_value::<T, D::Error>(value)?)))
        .collect()
}

/// Deserialize a string field that is ignored when it has any other type.
pub(crate) fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::String(s) => Ok(Some(s)),
        _ => Ok(None),
    }
}

/// Deserialize a nested record, falling back to its default when the value
/// is not an object or does not fit.
pub(crate) fn lenient_object<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned + Default,
{
    match Value::deserialize(deserializer)? {
        value @ Value::Object(_) => Ok(T::deserialize(value).unwrap_or_default()),
        _ => Ok(T::default()),
    }
}

fn object_from_value<T, E>(value: Value) -> Result<T, E>
where
    T: DeserializeOwned,
    E: Error,
{
    if !value.is_object() {
        return Err(E::invalid_type(unexpected(&value), &"a JSON object"));
    }
    T::deserialize(value).map_err(E::custom)
}

fn unexpected(value: &Value) -> Unexpected<'_> {
    match value {
        Value::Null => Unexpected::Unit,
        Value::Bool(b) => Unexpected::Bool(*b),
        Value::Number(_) => Unexpected::Other("number"),
        Value::String(s) => Unexpected::Str(s),
        Value::Array(_) => Unexpected::Seq,
        Value::Object(_) => Unexpected::Map,
    }
}
