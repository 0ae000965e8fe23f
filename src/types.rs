//! Core data model types for the dynamic engine.
//!
//! A [`Sequence`] holds [`Value`]s that all share one [`DataType`]. Rust types take part in the
//! dynamic layer through the [`Element`] trait.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{ProcessingError, ProcessingResult};

/// Logical element type of a sequence or function parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DataType {
    /// 64-bit signed integer.
    Int64,
    /// 64-bit floating point number.
    Float64,
    /// Boolean.
    Bool,
    /// UTF-8 string.
    Utf8,
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            DataType::Int64 => "Int64",
            DataType::Float64 => "Float64",
            DataType::Bool => "Bool",
            DataType::Utf8 => "Utf8",
        };
        f.write_str(name)
    }
}

/// A single typed value.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// 64-bit signed integer.
    Int64(i64),
    /// 64-bit float.
    Float64(f64),
    /// Boolean.
    Bool(bool),
    /// UTF-8 string.
    Utf8(String),
}

impl Value {
    /// The [`DataType`] of this value.
    pub fn data_type(&self) -> DataType {
        match self {
            Value::Int64(_) => DataType::Int64,
            Value::Float64(_) => DataType::Float64,
            Value::Bool(_) => DataType::Bool,
            Value::Utf8(_) => DataType::Utf8,
        }
    }
}

/// Rust types that can live inside a [`Sequence`].
pub trait Element: Sized {
    /// The logical type this Rust type maps to.
    const DATA_TYPE: DataType;

    fn into_value(self) -> Value;

    /// Returns `None` when `value` holds a different [`DataType`].
    fn from_value(value: &Value) -> Option<Self>;
}

impl Element for i64 {
    const DATA_TYPE: DataType = DataType::Int64;

    fn into_value(self) -> Value {
        Value::Int64(self)
    }

    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Int64(v) => Some(*v),
            _ => None,
        }
    }
}

impl Element for f64 {
    const DATA_TYPE: DataType = DataType::Float64;

    fn into_value(self) -> Value {
        Value::Float64(self)
    }

    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Float64(v) => Some(*v),
            _ => None,
        }
    }
}

impl Element for bool {
    const DATA_TYPE: DataType = DataType::Bool;

    fn into_value(self) -> Value {
        Value::Bool(self)
    }

    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Bool(v) => Some(*v),
            _ => None,
        }
    }
}

impl Element for String {
    const DATA_TYPE: DataType = DataType::Utf8;

    fn into_value(self) -> Value {
        Value::Utf8(self)
    }

    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Utf8(s) => Some(s.clone()),
            _ => None,
        }
    }
}

/// Ordered, homogeneously typed collection of [`Value`]s.
///
/// Every value has type [`Sequence::element_type`]; constructors reject anything else, and the
/// engine only writes values produced by functions whose signature was verified against it.
#[derive(Debug, Clone, PartialEq)]
pub struct Sequence {
    element_type: DataType,
    values: Vec<Value>,
}

impl Sequence {
    /// Create a sequence, checking that every value has `element_type`.
    pub fn new(element_type: DataType, values: Vec<Value>) -> ProcessingResult<Self> {
        if let Some((index, bad)) = values
            .iter()
            .enumerate()
            .find(|(_, v)| v.data_type() != element_type)
        {
            return Err(ProcessingError::ElementType {
                index,
                expected: element_type,
                found: bad.data_type(),
            });
        }
        Ok(Self {
            element_type,
            values,
        })
    }

    /// An empty sequence of the given element type.
    pub fn empty(element_type: DataType) -> Self {
        Self {
            element_type,
            values: Vec::new(),
        }
    }

    /// Build a sequence from native Rust values.
    pub fn from_vec<T: Element>(items: Vec<T>) -> Self {
        Self {
            element_type: T::DATA_TYPE,
            values: items.into_iter().map(Element::into_value).collect(),
        }
    }

    /// Convert back to native Rust values.
    ///
    /// Fails with [`ProcessingError::ElementType`] if `T` does not match the element type.
    pub fn to_vec<T: Element>(&self) -> ProcessingResult<Vec<T>> {
        self.values
            .iter()
            .enumerate()
            .map(|(index, v)| {
                T::from_value(v).ok_or(ProcessingError::ElementType {
                    index,
                    expected: T::DATA_TYPE,
                    found: v.data_type(),
                })
            })
            .collect()
    }

    pub fn element_type(&self) -> DataType {
        self.element_type
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Value> {
        self.values.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Value> {
        self.values.iter()
    }

    pub fn values(&self) -> &[Value] {
        &self.values
    }

    pub fn into_values(self) -> Vec<Value> {
        self.values
    }

    /// Callers must only write values of `element_type`.
    pub(crate) fn values_mut(&mut self) -> &mut Vec<Value> {
        &mut self.values
    }

    /// Callers must guarantee every value has `element_type`.
    pub(crate) fn from_parts(element_type: DataType, values: Vec<Value>) -> Self {
        Self {
            element_type,
            values,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{DataType, Element, Sequence, Value};
    use crate::error::ProcessingError;

    #[test]
    fn new_rejects_mixed_element_types() {
        let err = Sequence::new(
            DataType::Int64,
            vec![Value::Int64(1), Value::Utf8("x".to_string())],
        )
        .unwrap_err();
        match err {
            ProcessingError::ElementType {
                index,
                expected,
                found,
            } => {
                assert_eq!(index, 1);
                assert_eq!(expected, DataType::Int64);
                assert_eq!(found, DataType::Utf8);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn from_vec_and_to_vec_agree() {
        let seq = Sequence::from_vec(vec!["a".to_string(), "b".to_string()]);
        assert_eq!(seq.element_type(), DataType::Utf8);
        assert_eq!(seq.len(), 2);
        assert_eq!(seq.get(1), Some(&Value::Utf8("b".to_string())));
        assert_eq!(seq.to_vec::<String>().unwrap(), vec!["a", "b"]);
    }

    #[test]
    fn to_vec_with_wrong_type_fails() {
        let seq = Sequence::from_vec(vec![1_i64, 2]);
        assert!(seq.to_vec::<bool>().is_err());
    }

    #[test]
    fn empty_sequence_keeps_its_type() {
        let seq = Sequence::empty(DataType::Bool);
        assert!(seq.is_empty());
        assert_eq!(seq.element_type(), DataType::Bool);
    }

    #[test]
    fn element_round_trip_through_value() {
        assert_eq!(f64::from_value(&2.5_f64.into_value()), Some(2.5));
        assert_eq!(bool::from_value(&Value::Int64(1)), None);
    }
}
