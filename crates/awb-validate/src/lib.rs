//! Data Validation for Allocation Workbench
//!
//! This crate certifies that a clients/workers/tasks snapshot is internally
//! consistent and checks business rules before they are accepted:
//! - Structure (required columns, unique identifiers)
//! - Cell values (availability lists, priority and duration ranges, JSON)
//! - Cross references (requested tasks exist)
//! - Workforce (load vs availability, skill coverage, concurrency)
//! - Scheduling (phase saturation, circular co-run, phase windows)
//! - Rule structure and rule conflicts, plus manifest export
//!
//! Every check is pure and deterministic and never panics on malformed
//! data; problems come back as issues, not errors.
//!
//! ```rust
//! use awb_domain::{Client, FieldValue, Snapshot};
//! use awb_validate::DataValidator;
//!
//! let client = |id: &str| Client {
//!     client_id: Some(FieldValue::text(id)),
//!     client_name: Some(FieldValue::text("Acme")),
//!     priority_level: Some(FieldValue::from(3_i64)),
//!     requested_task_ids: Some(FieldValue::text("")),
//!     group_tag: Some(FieldValue::text("GroupA")),
//!     ..Client::default()
//! };
//! let snapshot = Snapshot::new(vec![client("C1"), client("C1")], vec![], vec![]);
//!
//! let result = DataValidator::new().validate(&snapshot);
//! assert!(!result.is_valid);
//! assert_eq!(result.errors[0].row_index, 1);
//! ```

pub mod autofix;
pub mod reporter;
pub mod rules;
pub mod validator_trait;
pub mod violation_trait;

pub mod references;
pub mod scheduling;
pub mod structure;
pub mod values;
pub mod workforce;

use awb_domain::{EntityType, Snapshot};

pub use autofix::{FixAction, FixProposal, apply_fix, apply_fixes, propose_fixes};
pub use references::{ReferenceValidator, ReferenceViolation};
pub use reporter::{Reporter, ValidationIssue, ValidationResult, ValidationSummary};
pub use rules::{RuleCheck, RuleRegistry, generate_rule_set, validate_rule};
pub use scheduling::{SchedulingValidator, SchedulingViolation};
pub use structure::{StructureValidator, StructureViolation};
pub use validator_trait::{Validator, ValidatorRegistry};
pub use values::{ValueValidator, ValueViolation};
pub use violation_trait::{IssueKind, Severity, Violation, ViolationCategory, ViolationExt};
pub use workforce::{WorkforceValidator, WorkforceViolation};

/// Main validator that runs the full battery of checks
pub struct DataValidator {
    registry: ValidatorRegistry,
}

impl Default for DataValidator {
    fn default() -> Self {
        Self::new()
    }
}

impl DataValidator {
    /// Validator with the standard checks in report order
    pub fn new() -> Self {
        Self::with_registry(ValidatorRegistry::standard())
    }

    /// Validator over a custom battery
    pub fn with_registry(registry: ValidatorRegistry) -> Self {
        Self { registry }
    }

    /// Raw violations, in check order
    pub fn violations(&self, snapshot: &Snapshot) -> Vec<Box<dyn Violation>> {
        self.registry.validate_all(snapshot)
    }

    /// Run every check and classify the issues
    pub fn validate(&self, snapshot: &Snapshot) -> ValidationResult {
        let result = ValidationResult::from_violations(&self.violations(snapshot));
        tracing::debug!(
            clients = snapshot.clients.len(),
            workers = snapshot.workers.len(),
            tasks = snapshot.tasks.len(),
            errors = result.summary.total_errors,
            warnings = result.summary.total_warnings,
            "snapshot validated"
        );
        result
    }

    /// Issues belonging to one collection
    ///
    /// Cross-collection checks still see the whole snapshot; only the
    /// reported issues are filtered.
    pub fn validate_entity(&self, entity: EntityType, snapshot: &Snapshot) -> ValidationResult {
        self.validate(snapshot).for_entity(entity)
    }
}

/// Validate a snapshot with the standard checks
pub fn validate(snapshot: &Snapshot) -> ValidationResult {
    DataValidator::new().validate(snapshot)
}
