//! Loosely-Typed Field Values
//!
//! Spreadsheet-derived rows carry whatever the upstream parser produced:
//! numbers, numeric text, comma lists, JSON-encoded arrays, native arrays.
//! `FieldValue` keeps that shape intact so checks can tell a malformed
//! encoding apart from a missing one.

use serde::de::Deserializer;
use serde::ser::Serializer;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Value Object: a single cell of an entity record
///
/// ## Example
///
/// ```rust
/// use awb_domain::value_objects::FieldValue;
///
/// let slots: FieldValue = serde_json::from_str("[1, 2, 3]").unwrap();
/// assert!(matches!(slots, FieldValue::List(ref items) if items.len() == 3));
///
/// let encoded: FieldValue = serde_json::from_str("\"[1,2]\"").unwrap();
/// assert_eq!(encoded.as_text(), Some("[1,2]"));
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    /// Present but empty
    Null,
    /// Boolean cell
    Bool(bool),
    /// Numeric cell
    Number(f64),
    /// Text cell, possibly an encoded list, range or JSON document
    Text(String),
    /// Native array
    List(Vec<FieldValue>),
    /// Native object
    Object(serde_json::Map<String, serde_json::Value>),
}

impl FieldValue {
    /// Build a text value
    pub fn text<S: Into<String>>(value: S) -> Self {
        Self::Text(value.into())
    }

    /// Build a list of numbers
    pub fn numbers<I: IntoIterator<Item = i64>>(values: I) -> Self {
        Self::List(values.into_iter().map(|v| Self::Number(v as f64)).collect())
    }

    /// Build a list of text values
    pub fn texts<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::List(values.into_iter().map(|v| Self::Text(v.into())).collect())
    }

    /// Raw text, when the cell is text
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }

    /// True for null cells and whitespace-only text
    pub fn is_blank(&self) -> bool {
        match self {
            Self::Null => true,
            Self::Text(s) => s.trim().is_empty(),
            _ => false,
        }
    }

    /// Short human-readable rendering used in issue messages
    pub fn display_value(&self) -> String {
        match self {
            Self::Null => "null".to_string(),
            Self::Bool(b) => b.to_string(),
            Self::Number(n) => format_number(*n),
            Self::Text(s) => s.clone(),
            Self::List(_) | Self::Object(_) => {
                serde_json::to_string(self).unwrap_or_else(|_| "<unprintable>".to_string())
            }
        }
    }
}

impl From<i64> for FieldValue {
    fn from(n: i64) -> Self {
        Self::Number(n as f64)
    }
}

impl From<f64> for FieldValue {
    fn from(n: f64) -> Self {
        Self::Number(n)
    }
}

impl From<&str> for FieldValue {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

impl From<serde_json::Value> for FieldValue {
    fn from(value: serde_json::Value) -> Self {
        match value {
            serde_json::Value::Null => Self::Null,
            serde_json::Value::Bool(b) => Self::Bool(b),
            serde_json::Value::Number(n) => n.as_f64().map_or(Self::Null, Self::Number),
            serde_json::Value::String(s) => Self::Text(s),
            serde_json::Value::Array(items) => {
                Self::List(items.into_iter().map(Self::from).collect())
            }
            serde_json::Value::Object(map) => Self::Object(map),
        }
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.display_value())
    }
}

// Integral numbers serialize without a trailing ".0" so rewritten snapshots
// keep the shape they were loaded with.
impl Serialize for FieldValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Null => serializer.serialize_unit(),
            Self::Bool(b) => serializer.serialize_bool(*b),
            Self::Number(n) if n.fract() == 0.0 && n.is_finite() && n.abs() < 9.0e15 => {
                serializer.serialize_i64(*n as i64)
            }
            Self::Number(n) => serializer.serialize_f64(*n),
            Self::Text(s) => serializer.serialize_str(s),
            Self::List(items) => items.serialize(serializer),
            Self::Object(map) => map.serialize(serializer),
        }
    }
}

/// Deserialize a column so that an explicit `null` stays distinguishable
/// from a missing column.
///
/// Use together with `#[serde(default)]`: a missing key yields `None`, a
/// present key (even `null`) yields `Some`.
pub fn present<'de, D>(deserializer: D) -> Result<Option<FieldValue>, D::Error>
where
    D: Deserializer<'de>,
{
    FieldValue::deserialize(deserializer).map(Some)
}

/// Render a number, dropping the fraction for whole values
pub fn format_number(n: f64) -> String {
    if n.fract() == 0.0 && n.is_finite() && n.abs() < 9.0e15 {
        format!("{}", n as i64)
    } else {
        n.to_string()
    }
}
