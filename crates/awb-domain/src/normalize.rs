//! Field Normalization
//!
//! Every check that reads a multi-encoding column goes through this module:
//! comma lists, JSON-encoded arrays, native arrays, dash ranges and numeric
//! text. Functions here never panic; strict parsers return a `ListError`
//! describing what was wrong so callers can report it.

use crate::value_objects::FieldValue;
use crate::value_objects::field::format_number;
use thiserror::Error;

/// Why a phase list could not be parsed
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ListError {
    /// Text that is not valid JSON (and not a range)
    #[error("not valid JSON: {0}")]
    InvalidJson(String),
    /// Parsed, but not an array
    #[error("expected an array, found {0}")]
    NotAnArray(String),
    /// An element that is not a positive whole number
    #[error("element {index} ({value}) is not a positive whole number")]
    BadElement {
        /// Zero-based element position
        index: usize,
        /// Rendered element
        value: String,
    },
    /// A dash range whose bounds are invalid
    #[error("invalid range '{0}'")]
    BadRange(String),
}

/// Trimmed text rendering of a scalar cell
///
/// Numbers render without a trailing `.0`; lists and objects have no scalar
/// text and return `None`.
pub fn text(value: &FieldValue) -> Option<String> {
    match value {
        FieldValue::Text(s) => Some(s.trim().to_string()),
        FieldValue::Number(n) => Some(format_number(*n)),
        FieldValue::Bool(b) => Some(b.to_string()),
        FieldValue::Null | FieldValue::List(_) | FieldValue::Object(_) => None,
    }
}

/// Numeric reading of a cell: numbers, or text that parses as a number
pub fn number(value: &FieldValue) -> Option<f64> {
    match value {
        FieldValue::Number(n) if n.is_finite() => Some(*n),
        FieldValue::Text(s) => s.trim().parse::<f64>().ok().filter(|n| n.is_finite()),
        _ => None,
    }
}

/// Whole-number reading of a cell
pub fn integer(value: &FieldValue) -> Option<i64> {
    number(value)
        .filter(|n| n.fract() == 0.0)
        .map(|n| n as i64)
}

/// Lenient list reading for skills and identifier lists
///
/// Accepts native arrays, JSON-encoded arrays and comma-joined text. Items
/// are trimmed and blanks dropped; order is preserved.
pub fn string_list(value: &FieldValue) -> Vec<String> {
    match value {
        FieldValue::List(items) => items.iter().filter_map(text).filter(|s| !s.is_empty()).collect(),
        FieldValue::Text(s) => {
            let trimmed = s.trim();
            if trimmed.starts_with('[') {
                if let Ok(serde_json::Value::Array(items)) =
                    serde_json::from_str::<serde_json::Value>(trimmed)
                {
                    return items
                        .into_iter()
                        .map(FieldValue::from)
                        .filter_map(|item| text(&item))
                        .filter(|s| !s.is_empty())
                        .collect();
                }
            }
            trimmed
                .split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string)
                .collect()
        }
        FieldValue::Number(_) | FieldValue::Bool(_) => text(value).into_iter().collect(),
        FieldValue::Null | FieldValue::Object(_) => Vec::new(),
    }
}

/// Canonical form of a skill for set comparisons
pub fn skill_key(skill: &str) -> String {
    skill.trim().to_lowercase()
}

/// Normalized skill set of a cell
pub fn skill_set(value: &FieldValue) -> std::collections::BTreeSet<String> {
    string_list(value)
        .iter()
        .map(|s| skill_key(s))
        .filter(|s| !s.is_empty())
        .collect()
}

/// Strict phase list: a native array or JSON-encoded array of positive
/// whole numbers. Used for worker availability.
pub fn phase_list(value: &FieldValue) -> Result<Vec<u32>, ListError> {
    match value {
        FieldValue::List(items) => phases_from_items(items),
        FieldValue::Text(s) => {
            let parsed: serde_json::Value = serde_json::from_str(s.trim())
                .map_err(|e| ListError::InvalidJson(e.to_string()))?;
            match parsed {
                serde_json::Value::Array(items) => {
                    let items: Vec<FieldValue> = items.into_iter().map(FieldValue::from).collect();
                    phases_from_items(&items)
                }
                other => Err(ListError::NotAnArray(json_kind(&other).to_string())),
            }
        }
        other => Err(ListError::NotAnArray(kind(other).to_string())),
    }
}

/// Preferred phases of a task
///
/// Accepts everything `phase_list` accepts plus an inclusive dash range
/// (`"1-3"`), a single whole number, and a plain number cell.
pub fn preferred_phases(value: &FieldValue) -> Result<Vec<u32>, ListError> {
    match value {
        FieldValue::Number(n) => single_phase(*n)
            .map(|phase| vec![phase])
            .ok_or_else(|| ListError::BadElement {
                index: 0,
                value: format_number(*n),
            }),
        FieldValue::Text(s) => {
            let trimmed = s.trim();
            if let Some(range) = dash_range(trimmed) {
                return range;
            }
            if let Ok(n) = trimmed.parse::<f64>() {
                return single_phase(n)
                    .map(|phase| vec![phase])
                    .ok_or_else(|| ListError::BadElement {
                        index: 0,
                        value: trimmed.to_string(),
                    });
            }
            phase_list(value)
        }
        other => phase_list(other),
    }
}

/// Elements of an array-like cell: native arrays and JSON-encoded arrays
pub fn elements(value: &FieldValue) -> Option<Vec<FieldValue>> {
    match value {
        FieldValue::List(items) => Some(items.clone()),
        FieldValue::Text(s) if s.trim_start().starts_with('[') => {
            match serde_json::from_str::<serde_json::Value>(s.trim()) {
                Ok(serde_json::Value::Array(items)) => {
                    Some(items.into_iter().map(FieldValue::from).collect())
                }
                _ => None,
            }
        }
        _ => None,
    }
}

fn phases_from_items(items: &[FieldValue]) -> Result<Vec<u32>, ListError> {
    items
        .iter()
        .enumerate()
        .map(|(index, item)| {
            let phase = match item {
                FieldValue::Number(n) => single_phase(*n),
                _ => None,
            };
            phase.ok_or_else(|| ListError::BadElement {
                index,
                value: item.display_value(),
            })
        })
        .collect()
}

fn single_phase(n: f64) -> Option<u32> {
    (n.is_finite() && n >= 1.0 && n.fract() == 0.0 && n <= f64::from(u32::MAX)).then_some(n as u32)
}

fn dash_range(text: &str) -> Option<Result<Vec<u32>, ListError>> {
    let (start, end) = text.split_once('-')?;
    let (start, end) = (start.trim(), end.trim());
    if start.is_empty()
        || end.is_empty()
        || !start.chars().all(|c| c.is_ascii_digit())
        || !end.chars().all(|c| c.is_ascii_digit())
    {
        return None;
    }
    let bounds = start.parse::<u32>().ok().zip(end.parse::<u32>().ok());
    Some(match bounds {
        Some((a, b)) if a >= 1 && a <= b => Ok((a..=b).collect()),
        _ => Err(ListError::BadRange(text.to_string())),
    })
}

fn kind(value: &FieldValue) -> &'static str {
    match value {
        FieldValue::Null => "null",
        FieldValue::Bool(_) => "boolean",
        FieldValue::Number(_) => "number",
        FieldValue::Text(_) => "string",
        FieldValue::List(_) => "array",
        FieldValue::Object(_) => "object",
    }
}

fn json_kind(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "boolean",
        serde_json::Value::Number(_) => "number",
        serde_json::Value::String(_) => "string",
        serde_json::Value::Array(_) => "array",
        serde_json::Value::Object(_) => "object",
    }
}
