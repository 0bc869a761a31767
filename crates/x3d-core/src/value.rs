//! Typed attribute values and their textual forms

use std::fmt::Write as _;

use serde::{Deserialize, Serialize};

use crate::schema::ValueType;

/// Current value of one attribute
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum AttributeValue {
    Bool(bool),
    Int(i32),
    Float(f64),
    String(String),
    NumericList(Vec<f64>),
}

/// Lenient boolean parsing: only "true" in any case is true. Absent, empty,
/// padded, and unrecognized text are all false.
pub fn parse_bool(text: Option<&str>) -> bool {
    text.is_some_and(|t| t.eq_ignore_ascii_case("true"))
}

/// Split a numeric list on whitespace and commas
pub(crate) fn split_numbers(text: &str) -> impl Iterator<Item = &str> {
    text.split(|c: char| c.is_whitespace() || c == ',')
        .filter(|t| !t.is_empty())
}

pub(crate) fn parse_float(text: &str) -> Option<f64> {
    text.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

impl AttributeValue {
    /// Parse `text` as `value_type`, or `None` if it is malformed.
    ///
    /// Booleans and strings always parse.
    pub fn try_parse(value_type: ValueType, text: &str) -> Option<Self> {
        match value_type {
            ValueType::Bool => Some(AttributeValue::Bool(parse_bool(Some(text)))),
            ValueType::Int => text.trim().parse().ok().map(AttributeValue::Int),
            ValueType::Float => parse_float(text).map(AttributeValue::Float),
            ValueType::String => Some(AttributeValue::String(text.to_string())),
            ValueType::NumericList => split_numbers(text)
                .map(parse_float)
                .collect::<Option<Vec<_>>>()
                .map(AttributeValue::NumericList),
        }
    }

    /// Parse `text` as `value_type`, degrading malformed text to the zero
    /// value of the type. Never fails.
    pub fn parse(value_type: ValueType, text: &str) -> Self {
        Self::try_parse(value_type, text).unwrap_or_else(|| Self::zero(value_type))
    }

    /// Zero value of a type
    pub fn zero(value_type: ValueType) -> Self {
        match value_type {
            ValueType::Bool => AttributeValue::Bool(false),
            ValueType::Int => AttributeValue::Int(0),
            ValueType::Float => AttributeValue::Float(0.0),
            ValueType::String => AttributeValue::String(String::new()),
            ValueType::NumericList => AttributeValue::NumericList(Vec::new()),
        }
    }

    pub fn value_type(&self) -> ValueType {
        match self {
            AttributeValue::Bool(_) => ValueType::Bool,
            AttributeValue::Int(_) => ValueType::Int,
            AttributeValue::Float(_) => ValueType::Float,
            AttributeValue::String(_) => ValueType::String,
            AttributeValue::NumericList(_) => ValueType::NumericList,
        }
    }

    /// Canonical textual form, parseable back to an equal value
    pub fn to_text(&self) -> String {
        match self {
            AttributeValue::Bool(b) => b.to_string(),
            AttributeValue::Int(i) => i.to_string(),
            AttributeValue::Float(f) => f.to_string(),
            AttributeValue::String(s) => s.clone(),
            AttributeValue::NumericList(values) => {
                let mut out = String::new();
                for (i, v) in values.iter().enumerate() {
                    if i > 0 {
                        out.push(' ');
                    }
                    let _ = write!(out, "{}", v);
                }
                out
            }
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            AttributeValue::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<i32> {
        match self {
            AttributeValue::Int(i) => Some(*i),
            _ => None,
        }
    }

    pub fn as_float(&self) -> Option<f64> {
        match self {
            AttributeValue::Float(f) => Some(*f),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            AttributeValue::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_numbers(&self) -> Option<&[f64]> {
        match self {
            AttributeValue::NumericList(v) => Some(v),
            _ => None,
        }
    }
}

impl From<bool> for AttributeValue {
    fn from(value: bool) -> Self {
        AttributeValue::Bool(value)
    }
}

impl From<i32> for AttributeValue {
    fn from(value: i32) -> Self {
        AttributeValue::Int(value)
    }
}

impl From<f64> for AttributeValue {
    fn from(value: f64) -> Self {
        AttributeValue::Float(value)
    }
}

impl From<&str> for AttributeValue {
    fn from(value: &str) -> Self {
        AttributeValue::String(value.to_string())
    }
}

impl From<String> for AttributeValue {
    fn from(value: String) -> Self {
        AttributeValue::String(value)
    }
}

impl From<Vec<f64>> for AttributeValue {
    fn from(value: Vec<f64>) -> Self {
        AttributeValue::NumericList(value)
    }
}
