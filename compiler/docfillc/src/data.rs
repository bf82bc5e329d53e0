//! JSON data files as merge bindings.
//!
//! The top level of a data file must be an object; each of its members
//! becomes one root binding. Nested objects become [`Record`]s, read through
//! the built-in record accessor, arrays become lists and numbers exact
//! decimals. Strings stay strings even when they look like dates; templates
//! convert them explicitly with `parseDate`.

use std::str::FromStr;

use docfill_ir::{Decimal, Record, Value};

#[derive(Debug, thiserror::Error)]
pub enum DataError {
    #[error("cannot read '{path}': {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("data must be a JSON object at the top level, found {0}")]
    NotAnObject(&'static str),
    #[error("number {0} does not fit an exact decimal")]
    Number(String),
}

/// Read bindings from a JSON file.
pub fn load_bindings(path: &str) -> Result<Vec<(String, Value)>, DataError> {
    let text = std::fs::read_to_string(path).map_err(|source| DataError::Io {
        path: path.to_string(),
        source,
    })?;
    parse_bindings(&text)
}

/// Bindings from JSON text, sorted by name.
pub fn parse_bindings(text: &str) -> Result<Vec<(String, Value)>, DataError> {
    match serde_json::from_str(text)? {
        serde_json::Value::Object(members) => members
            .into_iter()
            .map(|(name, json)| Ok((name, json_to_value(json)?)))
            .collect(),
        other => Err(DataError::NotAnObject(json_type(&other))),
    }
}

pub fn json_to_value(json: serde_json::Value) -> Result<Value, DataError> {
    Ok(match json {
        serde_json::Value::Null => Value::Null,
        serde_json::Value::Bool(b) => Value::Bool(b),
        serde_json::Value::Number(n) => Value::Number(json_number(&n)?),
        serde_json::Value::String(s) => Value::from(s),
        serde_json::Value::Array(items) => Value::list(
            items
                .into_iter()
                .map(json_to_value)
                .collect::<Result<Vec<_>, _>>()?,
        ),
        serde_json::Value::Object(members) => {
            let mut record = Record::new();
            for (name, json) in members {
                record.insert(name, json_to_value(json)?);
            }
            record.into_value()
        }
    })
}

fn json_number(n: &serde_json::Number) -> Result<Decimal, DataError> {
    let text = n.to_string();
    Decimal::from_str(&text)
        .or_else(|_| Decimal::from_scientific(&text))
        .map_err(|_| DataError::Number(text))
}

fn json_type(json: &serde_json::Value) -> &'static str {
    match json {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "a boolean",
        serde_json::Value::Number(_) => "a number",
        serde_json::Value::String(_) => "a string",
        serde_json::Value::Array(_) => "an array",
        serde_json::Value::Object(_) => "an object",
    }
}
