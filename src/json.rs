//! JSON interchange for [`Sequence`]s.
//!
//! Input is a JSON array whose elements must all convert to the requested [`DataType`]:
//! `[1, 2, 3]` as `Int64`, `["a", "b"]` as `Utf8`, and so on. Integers are accepted for
//! `Float64`.
//!
//! A self-describing document form carries the element type alongside the values:
//! `{"element_type": "Int64", "values": [1, 2, 3]}`.

use serde::Deserialize;

use crate::error::{ProcessingError, ProcessingResult};
use crate::types::{DataType, Sequence, Value};

/// Parse a JSON array into a [`Sequence`] of `element_type`.
pub fn sequence_from_json_str(input: &str, element_type: DataType) -> ProcessingResult<Sequence> {
    let parsed: serde_json::Value = serde_json::from_str(input.trim())?;
    let items = parsed.as_array().ok_or_else(|| ProcessingError::Parse {
        index: 0,
        raw: truncate_raw(&parsed),
        message: "expected a json array".to_string(),
    })?;

    convert_items(items, element_type)
}

#[derive(Debug, Deserialize)]
struct SequenceDocument {
    element_type: DataType,
    values: Vec<serde_json::Value>,
}

/// Parse a `{"element_type": ..., "values": [...]}` document into a [`Sequence`].
pub fn sequence_from_document_str(input: &str) -> ProcessingResult<Sequence> {
    let doc: SequenceDocument = serde_json::from_str(input.trim())?;
    convert_items(&doc.values, doc.element_type)
}

/// Render a [`Sequence`] as a self-describing document.
pub fn sequence_to_document(seq: &Sequence) -> serde_json::Value {
    serde_json::json!({
        "element_type": seq.element_type(),
        "values": sequence_to_json(seq),
    })
}

/// Render a [`Sequence`] as a JSON array. Non-finite floats become `null`.
pub fn sequence_to_json(seq: &Sequence) -> serde_json::Value {
    serde_json::Value::Array(
        seq.iter()
            .map(|v| match v {
                Value::Int64(n) => serde_json::Value::from(*n),
                Value::Float64(n) => serde_json::Number::from_f64(*n)
                    .map(serde_json::Value::Number)
                    .unwrap_or(serde_json::Value::Null),
                Value::Bool(b) => serde_json::Value::Bool(*b),
                Value::Utf8(s) => serde_json::Value::String(s.clone()),
            })
            .collect(),
    )
}

fn convert_items(
    items: &[serde_json::Value],
    element_type: DataType,
) -> ProcessingResult<Sequence> {
    let mut values = Vec::with_capacity(items.len());
    for (index, item) in items.iter().enumerate() {
        values.push(convert_json_value(index, element_type, item)?);
    }
    Ok(Sequence::from_parts(element_type, values))
}

fn convert_json_value(
    index: usize,
    data_type: DataType,
    v: &serde_json::Value,
) -> ProcessingResult<Value> {
    let parse_error = |message: &str| ProcessingError::Parse {
        index,
        raw: v.to_string(),
        message: message.to_string(),
    };

    match data_type {
        DataType::Utf8 => v
            .as_str()
            .map(|s| Value::Utf8(s.to_string()))
            .ok_or_else(|| parse_error("expected string")),
        DataType::Bool => v
            .as_bool()
            .map(Value::Bool)
            .ok_or_else(|| parse_error("expected bool")),
        DataType::Int64 => {
            if let Some(n) = v.as_i64() {
                Ok(Value::Int64(n))
            } else if v.is_u64() {
                Err(parse_error("u64 out of range for i64"))
            } else {
                Err(parse_error("expected integer number"))
            }
        }
        DataType::Float64 => v
            .as_f64()
            .map(Value::Float64)
            .ok_or_else(|| parse_error("expected number")),
    }
}

fn truncate_raw(v: &serde_json::Value) -> String {
    let mut raw = v.to_string();
    if raw.len() > 64 {
        let cut = (0..=64).rev().find(|&i| raw.is_char_boundary(i)).unwrap_or(0);
        raw.truncate(cut);
        raw.push_str("...");
    }
    raw
}
