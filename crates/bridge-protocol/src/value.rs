//! Argument value model for channel payloads

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// A value carried in an operation call's argument map.
///
/// The variant set is closed so the wire codec can decode values without a
/// self-describing format.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ArgValue {
    Null,
    Bool(bool),
    Int(i64),
    Double(f64),
    Str(String),
    List(Vec<ArgValue>),
    Map(BTreeMap<String, ArgValue>),
}

impl ArgValue {
    pub fn is_null(&self) -> bool {
        matches!(self, ArgValue::Null)
    }

    /// Interpret as a list of strings. `Some` only when the value is a list
    /// and every element is a string.
    pub fn as_string_list(&self) -> Option<Vec<String>> {
        match self {
            ArgValue::List(items) => items
                .iter()
                .map(|item| match item {
                    ArgValue::Str(text) => Some(text.clone()),
                    _ => None,
                })
                .collect(),
            _ => None,
        }
    }
}

impl From<bool> for ArgValue {
    fn from(value: bool) -> Self {
        ArgValue::Bool(value)
    }
}

impl From<i64> for ArgValue {
    fn from(value: i64) -> Self {
        ArgValue::Int(value)
    }
}

impl From<f64> for ArgValue {
    fn from(value: f64) -> Self {
        ArgValue::Double(value)
    }
}

impl From<&str> for ArgValue {
    fn from(value: &str) -> Self {
        ArgValue::Str(value.to_string())
    }
}

impl From<String> for ArgValue {
    fn from(value: String) -> Self {
        ArgValue::Str(value)
    }
}

impl From<Vec<String>> for ArgValue {
    fn from(values: Vec<String>) -> Self {
        ArgValue::List(values.into_iter().map(ArgValue::Str).collect())
    }
}
