//! Reference Validation
//!
//! Client task requests must point at tasks that exist.

use crate::autofix::FixAction;
use crate::validator_trait::Validator;
use crate::values::row_label;
use crate::violation_trait::{IssueKind, Severity, Violation, ViolationCategory, ViolationExt};
use awb_domain::normalize;
use awb_domain::{EntityRecord, EntityType, Snapshot};
use serde::Serialize;
use std::collections::HashSet;

/// Reference Violations
#[derive(Debug, Clone, Serialize)]
pub enum ReferenceViolation {
    /// A requested task id that no task carries
    UnknownTask {
        row: usize,
        client_id: String,
        task_id: String,
    },
}

impl std::fmt::Display for ReferenceViolation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnknownTask {
                client_id, task_id, ..
            } => write!(
                f,
                "Client '{client_id}' requests unknown task '{task_id}'"
            ),
        }
    }
}

impl Violation for ReferenceViolation {
    fn code(&self) -> &str {
        "REF001"
    }

    fn category(&self) -> ViolationCategory {
        ViolationCategory::References
    }

    fn kind(&self) -> IssueKind {
        IssueKind::Error
    }

    fn severity(&self) -> Severity {
        Severity::High
    }

    fn entity(&self) -> EntityType {
        EntityType::Clients
    }

    fn field(&self) -> &str {
        "RequestedTaskIDs"
    }

    fn row(&self) -> Option<usize> {
        match self {
            Self::UnknownTask { row, .. } => Some(*row),
        }
    }

    fn subject(&self) -> Option<String> {
        match self {
            Self::UnknownTask { task_id, .. } => Some(task_id.clone()),
        }
    }

    fn suggestion(&self) -> Option<String> {
        match self {
            Self::UnknownTask { task_id, .. } => Some(format!(
                "Remove '{task_id}' from the request or add the task to the tasks sheet"
            )),
        }
    }

    fn fix(&self) -> Option<FixAction> {
        match self {
            Self::UnknownTask { task_id, .. } => Some(FixAction::RemoveListItem {
                item: task_id.clone(),
            }),
        }
    }
}

/// Reference Validator
pub struct ReferenceValidator;

impl Default for ReferenceValidator {
    fn default() -> Self {
        Self::new()
    }
}

impl ReferenceValidator {
    pub fn new() -> Self {
        Self
    }

    /// Each unknown id is reported once per client row
    pub fn validate_all(&self, snapshot: &Snapshot) -> Vec<ReferenceViolation> {
        let known: HashSet<String> = snapshot.task_ids().into_iter().collect();
        let mut violations = Vec::new();
        for (row, client) in snapshot.clients.iter().enumerate() {
            let Some(requested) = client.requested_task_ids.as_ref() else {
                continue;
            };
            let mut reported = HashSet::new();
            for task_id in normalize::string_list(requested) {
                if !known.contains(&task_id) && reported.insert(task_id.clone()) {
                    violations.push(ReferenceViolation::UnknownTask {
                        row,
                        client_id: row_label(client.id(), row),
                        task_id,
                    });
                }
            }
        }
        violations
    }
}

impl Validator for ReferenceValidator {
    fn name(&self) -> &'static str {
        "references"
    }

    fn description(&self) -> &'static str {
        "Requested task ids resolve to tasks"
    }

    fn validate(&self, snapshot: &Snapshot) -> Vec<Box<dyn Violation>> {
        self.validate_all(snapshot).into_boxed()
    }
}
