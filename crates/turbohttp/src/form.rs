//! `application/x-www-form-urlencoded` encoding
//!
//! Nested values flatten to bracketed keys: a list under `baz` becomes
//! `baz[0]`, `baz[1]`, an object under `user` becomes `user[name]`. Keys and
//! values are percent-encoded with the RFC 3986 unreserved set, so space is
//! `%20` and `!` is `%21`.

use crate::error::{Error, Result};
use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};
use serde::Serialize;
use serde_json::Value;

/// Everything but `ALPHA / DIGIT / "-" / "." / "_" / "~"`
const FORM_ENCODE_SET: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

/// Encode any serializable mapping as a form body.
///
/// # Errors
///
/// Returns [`Error::Encode`] if `data` does not serialize to a mapping or a
/// list.
pub fn encode<T: Serialize + ?Sized>(data: &T) -> Result<String> {
    let value = serde_json::to_value(data).map_err(|e| Error::Encode(e.to_string()))?;
    encode_value(&value)
}

/// Encode a JSON value tree as a form body.
///
/// `null` entries are skipped and booleans become `1` / `0`.
///
/// # Errors
///
/// Returns [`Error::Encode`] if `value` is a scalar.
pub fn encode_value(value: &Value) -> Result<String> {
    let mut pairs = Vec::new();
    match value {
        Value::Object(map) => {
            for (key, item) in map {
                flatten(key.clone(), item, &mut pairs);
            }
        }
        Value::Array(items) => {
            for (index, item) in items.iter().enumerate() {
                flatten(index.to_string(), item, &mut pairs);
            }
        }
        Value::Null => {}
        other => {
            return Err(Error::Encode(format!(
                "form data must be a mapping or a list, got {}",
                kind(other)
            )));
        }
    }

    Ok(pairs
        .iter()
        .map(|(key, value)| {
            format!(
                "{}={}",
                utf8_percent_encode(key, FORM_ENCODE_SET),
                utf8_percent_encode(value, FORM_ENCODE_SET)
            )
        })
        .collect::<Vec<_>>()
        .join("&"))
}

fn flatten(key: String, value: &Value, out: &mut Vec<(String, String)>) {
    match value {
        Value::Null => {}
        Value::Bool(flag) => out.push((key, if *flag { "1" } else { "0" }.to_string())),
        Value::Number(number) => out.push((key, number.to_string())),
        Value::String(text) => out.push((key, text.clone())),
        Value::Array(items) => {
            for (index, item) in items.iter().enumerate() {
                flatten(format!("{key}[{index}]"), item, out);
            }
        }
        Value::Object(map) => {
            for (name, item) in map {
                flatten(format!("{key}[{name}]"), item, out);
            }
        }
    }
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "a list",
        Value::Object(_) => "a mapping",
    }
}
