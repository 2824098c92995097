//! JSON helpers.
//!
//! Thin wrappers over `serde_json` that fix a few conventions:
//! - [`to_json`] drops object fields whose value is `null`
//! - [`to_map`] flattens an object into string values
//! - [`long_string`] carries 64-bit integers as JSON strings
//! - [`datetime_format`] reads and writes `yyyy/MM/dd HH:mm:ss`

use std::collections::HashMap;

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{Map, Value};
use thiserror::Error;

use crate::table::{Table, TableError};

#[derive(Debug, Error)]
pub enum JsonError {
    #[error("JSON error: {0}")]
    Serde(#[from] serde_json::Error),

    #[error("Expected a JSON {expected}, found {found}")]
    UnexpectedShape {
        expected: &'static str,
        found: &'static str,
    },

    #[error(transparent)]
    Table(#[from] TableError),
}

/// Serialize `value`, omitting object fields that are `null`.
pub fn to_json<T: Serialize + ?Sized>(value: &T) -> Result<String, JsonError> {
    let mut value = serde_json::to_value(value)?;
    strip_nulls(&mut value);
    Ok(serde_json::to_string(&value)?)
}

/// Deserialize a typed value.
pub fn from_json<T: DeserializeOwned>(json: &str) -> Result<T, JsonError> {
    Ok(serde_json::from_str(json)?)
}

/// Parse into an untyped [`Value`].
pub fn to_value(json: &str) -> Result<Value, JsonError> {
    Ok(serde_json::from_str(json)?)
}

/// Parse an object into a string map. Strings are kept as-is, `null`
/// becomes an empty string and every other value its JSON text.
pub fn to_map(json: &str) -> Result<HashMap<String, String>, JsonError> {
    match to_value(json)? {
        Value::Object(map) => Ok(map
            .into_iter()
            .map(|(key, value)| (key, value_to_cell(value)))
            .collect()),
        other => Err(JsonError::UnexpectedShape {
            expected: "object",
            found: kind(&other),
        }),
    }
}

/// Deserialize a JSON array into a list.
pub fn to_list<T: DeserializeOwned>(json: &str) -> Result<Vec<T>, JsonError> {
    Ok(serde_json::from_str(json)?)
}

/// Convert serializable records into a [`Table`].
///
/// Records must serialize to objects. Columns are taken in first-seen
/// order across all records; missing fields are empty cells.
pub fn to_table<T: Serialize>(records: &[T]) -> Result<Table, JsonError> {
    let objects = records
        .iter()
        .map(|record| match serde_json::to_value(record)? {
            Value::Object(map) => Ok(map),
            other => Err(JsonError::UnexpectedShape {
                expected: "object",
                found: kind(&other),
            }),
        })
        .collect::<Result<Vec<Map<String, Value>>, JsonError>>()?;

    let mut keys: Vec<&String> = Vec::new();
    for object in &objects {
        for key in object.keys() {
            if !keys.contains(&key) {
                keys.push(key);
            }
        }
    }

    let mut table = Table::new(keys.iter().map(|key| key.as_str()));
    for object in &objects {
        let row = keys.iter().map(|key| {
            object
                .get(key.as_str())
                .cloned()
                .map(value_to_cell)
                .unwrap_or_default()
        });
        table.push_row(row)?;
    }
    Ok(table)
}

fn strip_nulls(value: &mut Value) {
    match value {
        Value::Object(map) => {
            map.retain(|_, v| !v.is_null());
            map.values_mut().for_each(strip_nulls);
        }
        Value::Array(items) => items.iter_mut().for_each(strip_nulls),
        _ => {}
    }
}

fn value_to_cell(value: Value) -> String {
    match value {
        Value::String(s) => s,
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Serde adapter carrying an `i64` as a JSON string.
///
/// Reading accepts strings or numbers; anything that does not parse as an
/// `i64` reads as `0`.
///
/// ```
/// #[derive(serde::Serialize, serde::Deserialize)]
/// struct Order {
///     #[serde(with = "bizkit::json::long_string")]
///     id: i64,
/// }
/// ```
pub mod long_string {
    use serde::{Deserialize, Deserializer, Serializer};
    use serde_json::Value;

    pub fn serialize<S: Serializer>(value: &i64, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(value)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<i64, D::Error> {
        let value = Value::deserialize(deserializer)?;
        Ok(match value {
            Value::String(s) => s.trim().parse().unwrap_or(0),
            Value::Number(n) => n.as_i64().unwrap_or(0),
            _ => 0,
        })
    }
}

/// Serde adapter for `NaiveDateTime` in `yyyy/MM/dd HH:mm:ss` form.
pub mod datetime_format {
    use chrono::NaiveDateTime;
    use serde::{Deserialize, Deserializer, Serializer};

    pub const FORMAT: &str = "%Y/%m/%d %H:%M:%S";

    pub fn serialize<S: Serializer>(
        value: &NaiveDateTime,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        serializer.collect_str(&value.format(FORMAT))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<NaiveDateTime, D::Error> {
        let s = String::deserialize(deserializer)?;
        NaiveDateTime::parse_from_str(&s, FORMAT).map_err(serde::de::Error::custom)
    }
}
