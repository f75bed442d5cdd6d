//! Value Validation
//!
//! Cell-level checks: worker availability lists, client priority, task
//! duration and client attribute JSON.

use crate::autofix::FixAction;
use crate::validator_trait::Validator;
use crate::violation_trait::{IssueKind, Severity, Violation, ViolationCategory, ViolationExt};
use awb_domain::constants::{
    PRIORITY_LEVEL_DEFAULT, PRIORITY_LEVEL_MAX, PRIORITY_LEVEL_MIN, TASK_DURATION_MIN,
};
use awb_domain::normalize;
use awb_domain::{EntityRecord, EntityType, FieldValue, Snapshot};
use serde::Serialize;

/// Value Violations
#[derive(Debug, Clone, Serialize)]
pub enum ValueViolation {
    /// `AvailableSlots` does not parse to positive whole numbers
    MalformedSlots {
        row: usize,
        worker_id: String,
        value: FieldValue,
        reason: String,
    },
    /// `PriorityLevel` outside 1-5 or not numeric
    PriorityOutOfRange {
        row: usize,
        client_id: String,
        value: FieldValue,
    },
    /// `Duration` below 1 or not numeric
    DurationOutOfRange {
        row: usize,
        task_id: String,
        value: FieldValue,
    },
    /// `AttributesJSON` text that is not JSON
    MalformedAttributes {
        row: usize,
        client_id: String,
        reason: String,
    },
}

impl std::fmt::Display for ValueViolation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MalformedSlots {
                worker_id, reason, ..
            } => write!(
                f,
                "AvailableSlots for worker '{worker_id}' is malformed: {reason}"
            ),
            Self::PriorityOutOfRange {
                client_id, value, ..
            } => write!(
                f,
                "PriorityLevel '{}' for client '{client_id}' must be a number between {PRIORITY_LEVEL_MIN} and {PRIORITY_LEVEL_MAX}",
                value.display_value()
            ),
            Self::DurationOutOfRange { task_id, value, .. } => write!(
                f,
                "Duration '{}' for task '{task_id}' must be a number of at least {TASK_DURATION_MIN}",
                value.display_value()
            ),
            Self::MalformedAttributes {
                client_id, reason, ..
            } => write!(
                f,
                "AttributesJSON for client '{client_id}' is not valid JSON: {reason}"
            ),
        }
    }
}

impl Violation for ValueViolation {
    fn code(&self) -> &str {
        match self {
            Self::MalformedSlots { .. } => "VAL001",
            Self::PriorityOutOfRange { .. } => "VAL002",
            Self::DurationOutOfRange { .. } => "VAL003",
            Self::MalformedAttributes { .. } => "VAL004",
        }
    }

    fn category(&self) -> ViolationCategory {
        ViolationCategory::Values
    }

    fn kind(&self) -> IssueKind {
        IssueKind::Error
    }

    fn severity(&self) -> Severity {
        Severity::Medium
    }

    fn entity(&self) -> EntityType {
        match self {
            Self::MalformedSlots { .. } => EntityType::Workers,
            Self::PriorityOutOfRange { .. } | Self::MalformedAttributes { .. } => {
                EntityType::Clients
            }
            Self::DurationOutOfRange { .. } => EntityType::Tasks,
        }
    }

    fn field(&self) -> &str {
        match self {
            Self::MalformedSlots { .. } => "AvailableSlots",
            Self::PriorityOutOfRange { .. } => "PriorityLevel",
            Self::DurationOutOfRange { .. } => "Duration",
            Self::MalformedAttributes { .. } => "AttributesJSON",
        }
    }

    fn row(&self) -> Option<usize> {
        match self {
            Self::MalformedSlots { row, .. }
            | Self::PriorityOutOfRange { row, .. }
            | Self::DurationOutOfRange { row, .. }
            | Self::MalformedAttributes { row, .. } => Some(*row),
        }
    }

    fn suggestion(&self) -> Option<String> {
        let text = match self {
            Self::MalformedSlots { .. } => {
                "Use a list of phase numbers such as [1, 2, 3]".to_string()
            }
            Self::PriorityOutOfRange { .. } => {
                format!("Use a whole number from {PRIORITY_LEVEL_MIN} to {PRIORITY_LEVEL_MAX}")
            }
            Self::DurationOutOfRange { .. } => {
                format!("Use a whole number of phases, at least {TASK_DURATION_MIN}")
            }
            Self::MalformedAttributes { .. } => {
                "Check quotes and braces, e.g. {\"location\": \"NY\"}".to_string()
            }
        };
        Some(text)
    }

    fn fix(&self) -> Option<FixAction> {
        match self {
            Self::MalformedSlots { value, .. } => Some(FixAction::SetValue {
                value: FieldValue::numbers(salvage_phases(value).into_iter().map(i64::from)),
            }),
            Self::PriorityOutOfRange { value, .. } => {
                let repaired = normalize::number(value).map_or(PRIORITY_LEVEL_DEFAULT, |n| {
                    (n.round() as i64).clamp(PRIORITY_LEVEL_MIN, PRIORITY_LEVEL_MAX)
                });
                Some(FixAction::SetValue {
                    value: repaired.into(),
                })
            }
            Self::DurationOutOfRange { value, .. } => {
                let repaired = normalize::number(value)
                    .map_or(TASK_DURATION_MIN, |n| (n.round() as i64).max(TASK_DURATION_MIN));
                Some(FixAction::SetValue {
                    value: repaired.into(),
                })
            }
            Self::MalformedAttributes { .. } => None,
        }
    }
}

/// Positive whole numbers recoverable from a malformed phase list, in
/// first-seen order without repeats
pub fn salvage_phases(value: &FieldValue) -> Vec<u32> {
    let candidates: Vec<f64> = match value {
        FieldValue::List(items) => items.iter().filter_map(normalize::number).collect(),
        FieldValue::Text(text) => text
            .split(|c: char| c == ',' || c == ';' || c == '[' || c == ']' || c.is_whitespace())
            .filter_map(|token| token.trim().parse::<f64>().ok())
            .collect(),
        other => normalize::number(other).into_iter().collect(),
    };
    let mut phases = Vec::new();
    for n in candidates {
        if n.is_finite() && n >= 1.0 && n.fract() == 0.0 && n <= f64::from(u32::MAX) {
            let phase = n as u32;
            if !phases.contains(&phase) {
                phases.push(phase);
            }
        }
    }
    phases
}

/// Value Validator
pub struct ValueValidator;

impl Default for ValueValidator {
    fn default() -> Self {
        Self::new()
    }
}

impl ValueValidator {
    pub fn new() -> Self {
        Self
    }

    /// Slots, ranges, then attribute JSON
    pub fn validate_all(&self, snapshot: &Snapshot) -> Vec<ValueViolation> {
        let mut violations = Vec::new();
        violations.extend(self.check_available_slots(snapshot));
        violations.extend(self.check_ranges(snapshot));
        violations.extend(self.check_attributes_json(snapshot));
        violations
    }

    /// Worker availability must be a list of positive whole numbers
    pub fn check_available_slots(&self, snapshot: &Snapshot) -> Vec<ValueViolation> {
        snapshot
            .workers
            .iter()
            .enumerate()
            .filter_map(|(row, worker)| {
                let value = worker.available_slots.as_ref()?;
                if matches!(value, FieldValue::Null) {
                    return None;
                }
                let reason = normalize::phase_list(value).err()?;
                Some(ValueViolation::MalformedSlots {
                    row,
                    worker_id: row_label(worker.id(), row),
                    value: value.clone(),
                    reason: reason.to_string(),
                })
            })
            .collect()
    }

    /// Client priority within 1-5, task duration at least 1
    pub fn check_ranges(&self, snapshot: &Snapshot) -> Vec<ValueViolation> {
        let mut violations = Vec::new();
        for (row, client) in snapshot.clients.iter().enumerate() {
            let Some(value) = client.priority_level.as_ref().filter(|v| !v.is_blank()) else {
                continue;
            };
            let in_range = normalize::number(value).is_some_and(|n| {
                n >= PRIORITY_LEVEL_MIN as f64 && n <= PRIORITY_LEVEL_MAX as f64
            });
            if !in_range {
                violations.push(ValueViolation::PriorityOutOfRange {
                    row,
                    client_id: row_label(client.id(), row),
                    value: value.clone(),
                });
            }
        }
        for (row, task) in snapshot.tasks.iter().enumerate() {
            let Some(value) = task.duration.as_ref().filter(|v| !v.is_blank()) else {
                continue;
            };
            let in_range =
                normalize::number(value).is_some_and(|n| n >= TASK_DURATION_MIN as f64);
            if !in_range {
                violations.push(ValueViolation::DurationOutOfRange {
                    row,
                    task_id: row_label(task.id(), row),
                    value: value.clone(),
                });
            }
        }
        violations
    }

    /// Non-empty attribute text must parse as JSON
    pub fn check_attributes_json(&self, snapshot: &Snapshot) -> Vec<ValueViolation> {
        snapshot
            .clients
            .iter()
            .enumerate()
            .filter_map(|(row, client)| {
                let text = client.attributes_json.as_ref()?.as_text()?;
                if text.trim().is_empty() {
                    return None;
                }
                let err = serde_json::from_str::<serde_json::Value>(text).err()?;
                Some(ValueViolation::MalformedAttributes {
                    row,
                    client_id: row_label(client.id(), row),
                    reason: err.to_string(),
                })
            })
            .collect()
    }
}

/// Identifier for messages; rows without one are named by position
pub(crate) fn row_label(id: Option<String>, row: usize) -> String {
    id.unwrap_or_else(|| format!("row {row}"))
}

impl Validator for ValueValidator {
    fn name(&self) -> &'static str {
        "values"
    }

    fn description(&self) -> &'static str {
        "Availability lists, value ranges and attribute JSON"
    }

    fn validate(&self, snapshot: &Snapshot) -> Vec<Box<dyn Violation>> {
        self.validate_all(snapshot).into_boxed()
    }
}
