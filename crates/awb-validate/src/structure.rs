//! Structural Validation
//!
//! Required columns and identifier uniqueness, per collection.

use crate::autofix::FixAction;
use crate::validator_trait::Validator;
use crate::violation_trait::{IssueKind, Severity, Violation, ViolationCategory, ViolationExt};
use awb_domain::{EntityRecord, EntityType, Snapshot};
use serde::Serialize;
use std::collections::HashMap;

/// Structure Violations
#[derive(Debug, Clone, Serialize)]
pub enum StructureViolation {
    /// A mandatory column is missing from the first row of a collection
    MissingColumn { entity: EntityType, column: String },
    /// An identifier already used by an earlier row
    DuplicateId {
        entity: EntityType,
        column: &'static str,
        row: usize,
        id: String,
        first_row: usize,
    },
}

impl std::fmt::Display for StructureViolation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingColumn { entity, column } => {
                write!(f, "Required column '{column}' is missing from {entity}")
            }
            Self::DuplicateId {
                entity,
                id,
                row,
                first_row,
                ..
            } => write!(
                f,
                "Duplicate {} '{id}' at row {row} (first seen at row {first_row})",
                entity.singular()
            ),
        }
    }
}

impl Violation for StructureViolation {
    fn code(&self) -> &str {
        match self {
            Self::MissingColumn { .. } => "STR001",
            Self::DuplicateId { .. } => "STR002",
        }
    }

    fn category(&self) -> ViolationCategory {
        ViolationCategory::Structure
    }

    fn kind(&self) -> IssueKind {
        IssueKind::Error
    }

    fn severity(&self) -> Severity {
        Severity::High
    }

    fn entity(&self) -> EntityType {
        match self {
            Self::MissingColumn { entity, .. } | Self::DuplicateId { entity, .. } => *entity,
        }
    }

    fn field(&self) -> &str {
        match self {
            Self::MissingColumn { column, .. } => column,
            Self::DuplicateId { column, .. } => column,
        }
    }

    fn row(&self) -> Option<usize> {
        match self {
            Self::MissingColumn { .. } => None,
            Self::DuplicateId { row, .. } => Some(*row),
        }
    }

    fn subject(&self) -> Option<String> {
        match self {
            Self::MissingColumn { column, .. } => Some(column.clone()),
            Self::DuplicateId { .. } => None,
        }
    }

    fn suggestion(&self) -> Option<String> {
        match self {
            Self::MissingColumn { column, .. } => {
                Some(format!("Add a '{column}' column to the sheet"))
            }
            Self::DuplicateId { id, .. } => {
                Some(format!("Give this row a unique identifier instead of '{id}'"))
            }
        }
    }

    fn fix(&self) -> Option<FixAction> {
        match self {
            Self::MissingColumn { .. } => None,
            Self::DuplicateId { .. } => Some(FixAction::ReassignId),
        }
    }
}

/// Structure Validator
pub struct StructureValidator;

impl Default for StructureValidator {
    fn default() -> Self {
        Self::new()
    }
}

impl StructureValidator {
    pub fn new() -> Self {
        Self
    }

    /// Required columns for every collection, then duplicate identifiers
    pub fn validate_all(&self, snapshot: &Snapshot) -> Vec<StructureViolation> {
        let mut violations = Vec::new();
        violations.extend(Self::check_required_columns(&snapshot.clients));
        violations.extend(Self::check_required_columns(&snapshot.workers));
        violations.extend(Self::check_required_columns(&snapshot.tasks));
        violations.extend(Self::check_duplicate_ids(&snapshot.clients));
        violations.extend(Self::check_duplicate_ids(&snapshot.workers));
        violations.extend(Self::check_duplicate_ids(&snapshot.tasks));
        violations
    }

    /// Columns of the first record must cover the mandatory list
    pub fn check_required_columns<R: EntityRecord>(rows: &[R]) -> Vec<StructureViolation> {
        let Some(first) = rows.first() else {
            return Vec::new();
        };
        let present = first.columns();
        R::REQUIRED
            .iter()
            .filter(|column| !present.contains(column))
            .map(|column| StructureViolation::MissingColumn {
                entity: R::ENTITY,
                column: (*column).to_string(),
            })
            .collect()
    }

    /// First occurrence wins; every repeat is flagged at its own row
    pub fn check_duplicate_ids<R: EntityRecord>(rows: &[R]) -> Vec<StructureViolation> {
        let mut first_rows: HashMap<String, usize> = HashMap::new();
        let mut violations = Vec::new();
        for (row, record) in rows.iter().enumerate() {
            let Some(id) = record.id() else { continue };
            match first_rows.get(&id) {
                Some(&first_row) => violations.push(StructureViolation::DuplicateId {
                    entity: R::ENTITY,
                    column: R::ID_COLUMN,
                    row,
                    id,
                    first_row,
                }),
                None => {
                    first_rows.insert(id, row);
                }
            }
        }
        violations
    }
}

impl Validator for StructureValidator {
    fn name(&self) -> &'static str {
        "structure"
    }

    fn description(&self) -> &'static str {
        "Required columns and unique identifiers"
    }

    fn validate(&self, snapshot: &Snapshot) -> Vec<Box<dyn Violation>> {
        self.validate_all(snapshot).into_boxed()
    }
}
