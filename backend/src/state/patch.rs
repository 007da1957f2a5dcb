// Helpers for reading partial updates out of loosely typed JSON
// Used by the `*_from_json` store operations

use crate::error::StoreError;
use serde_json::{Map, Value};
use std::str::FromStr;

/// Require the patch to be a JSON object
pub(crate) fn as_object(value: &Value) -> Result<&Map<String, Value>, StoreError> {
    value
        .as_object()
        .ok_or_else(|| StoreError::invalid_field("<patch>", "expected a JSON object"))
}

pub(crate) fn string(field: &str, value: &Value) -> Result<String, StoreError> {
    value
        .as_str()
        .map(str::to_string)
        .ok_or_else(|| StoreError::invalid_field(field, "expected a string"))
}

pub(crate) fn boolean(field: &str, value: &Value) -> Result<bool, StoreError> {
    value
        .as_bool()
        .ok_or_else(|| StoreError::invalid_field(field, "expected a boolean"))
}

pub(crate) fn string_list(field: &str, value: &Value) -> Result<Vec<String>, StoreError> {
    let items = value
        .as_array()
        .ok_or_else(|| StoreError::invalid_field(field, "expected an array of strings"))?;
    items.iter().map(|item| string(field, item)).collect()
}

/// Parse a closed-enumeration value from its wire string
///
/// Non-string input is a shape error; a string outside the enumeration is
/// reported by the enum's own `FromStr` as `InvalidEnumValue`.
pub(crate) fn enumeration<T>(field: &str, value: &Value) -> Result<T, StoreError>
where
    T: FromStr<Err = StoreError>,
{
    string(field, value)?.parse()
}
