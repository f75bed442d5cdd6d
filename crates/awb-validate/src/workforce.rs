//! Workforce Validation
//!
//! Worker load against availability, skill coverage of task requirements
//! and whether enough qualified workers exist for each task's concurrency.

use crate::autofix::FixAction;
use crate::validator_trait::Validator;
use crate::values::row_label;
use crate::violation_trait::{IssueKind, Severity, Violation, ViolationCategory, ViolationExt};
use awb_domain::normalize;
use awb_domain::value_objects::field::format_number;
use awb_domain::{EntityRecord, EntityType, Snapshot};
use serde::Serialize;
use std::collections::BTreeSet;

/// Workforce Violations
#[derive(Debug, Clone, Serialize)]
pub enum WorkforceViolation {
    /// Fewer available phases than the per-phase load the worker accepts
    OverloadedWorker {
        row: usize,
        worker_id: String,
        slots: usize,
        max_load: f64,
    },
    /// A required skill no worker has
    UncoveredSkill {
        row: usize,
        task_id: String,
        skill: String,
    },
    /// More concurrent runs than qualified workers
    ConcurrencyInfeasible {
        row: usize,
        task_id: String,
        max_concurrent: f64,
        qualified: usize,
    },
}

impl std::fmt::Display for WorkforceViolation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::OverloadedWorker {
                worker_id,
                slots,
                max_load,
                ..
            } => write!(
                f,
                "Worker '{worker_id}' has {slots} available slot(s) but MaxLoadPerPhase {}",
                format_number(*max_load)
            ),
            Self::UncoveredSkill { task_id, skill, .. } => write!(
                f,
                "Task '{task_id}' requires skill '{skill}' that no worker has"
            ),
            Self::ConcurrencyInfeasible {
                task_id,
                max_concurrent,
                qualified,
                ..
            } => write!(
                f,
                "Task '{task_id}' allows MaxConcurrent {} but only {qualified} worker(s) have all required skills",
                format_number(*max_concurrent)
            ),
        }
    }
}

impl Violation for WorkforceViolation {
    fn code(&self) -> &str {
        match self {
            Self::OverloadedWorker { .. } => "WRK001",
            Self::UncoveredSkill { .. } => "WRK002",
            Self::ConcurrencyInfeasible { .. } => "WRK003",
        }
    }

    fn category(&self) -> ViolationCategory {
        ViolationCategory::Workforce
    }

    fn kind(&self) -> IssueKind {
        match self {
            Self::UncoveredSkill { .. } => IssueKind::Error,
            Self::OverloadedWorker { .. } | Self::ConcurrencyInfeasible { .. } => {
                IssueKind::Warning
            }
        }
    }

    fn severity(&self) -> Severity {
        match self {
            Self::UncoveredSkill { .. } => Severity::High,
            Self::OverloadedWorker { .. } | Self::ConcurrencyInfeasible { .. } => {
                Severity::Medium
            }
        }
    }

    fn entity(&self) -> EntityType {
        match self {
            Self::OverloadedWorker { .. } => EntityType::Workers,
            Self::UncoveredSkill { .. } | Self::ConcurrencyInfeasible { .. } => EntityType::Tasks,
        }
    }

    fn field(&self) -> &str {
        match self {
            Self::OverloadedWorker { .. } => "MaxLoadPerPhase",
            Self::UncoveredSkill { .. } => "RequiredSkills",
            Self::ConcurrencyInfeasible { .. } => "MaxConcurrent",
        }
    }

    fn row(&self) -> Option<usize> {
        match self {
            Self::OverloadedWorker { row, .. }
            | Self::UncoveredSkill { row, .. }
            | Self::ConcurrencyInfeasible { row, .. } => Some(*row),
        }
    }

    fn subject(&self) -> Option<String> {
        match self {
            Self::UncoveredSkill { skill, .. } => Some(normalize::skill_key(skill)),
            Self::OverloadedWorker { .. } | Self::ConcurrencyInfeasible { .. } => None,
        }
    }

    fn suggestion(&self) -> Option<String> {
        let text = match self {
            Self::OverloadedWorker { slots: 0, .. } => "Add available slots".to_string(),
            Self::OverloadedWorker { slots, .. } => {
                format!("Lower MaxLoadPerPhase to {slots} or add available slots")
            }
            Self::UncoveredSkill { skill, .. } => {
                format!("Add a worker with '{skill}' or drop the requirement")
            }
            Self::ConcurrencyInfeasible { qualified: 0, .. } => {
                "Train or hire a qualified worker".to_string()
            }
            Self::ConcurrencyInfeasible { qualified, .. } => {
                format!("Lower MaxConcurrent to {qualified} or train more workers")
            }
        };
        Some(text)
    }

    /// Lowered limits stay positive; a zero count has no automatic repair
    fn fix(&self) -> Option<FixAction> {
        let limit = match self {
            Self::OverloadedWorker { slots, .. } => *slots,
            Self::ConcurrencyInfeasible { qualified, .. } => *qualified,
            Self::UncoveredSkill { .. } => return None,
        };
        (limit > 0).then(|| FixAction::SetValue {
            value: (limit as i64).into(),
        })
    }
}

/// Workforce Validator
pub struct WorkforceValidator;

impl Default for WorkforceValidator {
    fn default() -> Self {
        Self::new()
    }
}

impl WorkforceValidator {
    pub fn new() -> Self {
        Self
    }

    /// Overload, coverage, then concurrency
    pub fn validate_all(&self, snapshot: &Snapshot) -> Vec<WorkforceViolation> {
        let mut violations = Vec::new();
        violations.extend(self.check_overloaded_workers(snapshot));
        violations.extend(self.check_skill_coverage(snapshot));
        violations.extend(self.check_max_concurrency(snapshot));
        violations
    }

    /// Slot count below max load; workers whose slots or load do not parse
    /// are left to the value checks
    pub fn check_overloaded_workers(&self, snapshot: &Snapshot) -> Vec<WorkforceViolation> {
        snapshot
            .workers
            .iter()
            .enumerate()
            .filter_map(|(row, worker)| {
                let slots = normalize::phase_list(worker.available_slots.as_ref()?).ok()?;
                let max_load = normalize::number(worker.max_load_per_phase.as_ref()?)?;
                ((slots.len() as f64) < max_load).then(|| WorkforceViolation::OverloadedWorker {
                    row,
                    worker_id: row_label(worker.id(), row),
                    slots: slots.len(),
                    max_load,
                })
            })
            .collect()
    }

    /// Every required skill must appear in the union of worker skills
    pub fn check_skill_coverage(&self, snapshot: &Snapshot) -> Vec<WorkforceViolation> {
        let available = worker_skill_union(snapshot);
        let mut violations = Vec::new();
        for (row, task) in snapshot.tasks.iter().enumerate() {
            let Some(required) = task.required_skills.as_ref() else {
                continue;
            };
            let mut reported = BTreeSet::new();
            for skill in normalize::string_list(required) {
                let key = normalize::skill_key(&skill);
                if !available.contains(&key) && reported.insert(key) {
                    violations.push(WorkforceViolation::UncoveredSkill {
                        row,
                        task_id: row_label(task.id(), row),
                        skill,
                    });
                }
            }
        }
        violations
    }

    /// Max-concurrent must not exceed the number of fully qualified workers
    pub fn check_max_concurrency(&self, snapshot: &Snapshot) -> Vec<WorkforceViolation> {
        let worker_skills: Vec<BTreeSet<String>> = snapshot
            .workers
            .iter()
            .map(|w| w.skills.as_ref().map(normalize::skill_set).unwrap_or_default())
            .collect();
        snapshot
            .tasks
            .iter()
            .enumerate()
            .filter_map(|(row, task)| {
                let max_concurrent = normalize::number(task.max_concurrent.as_ref()?)?;
                let required = task
                    .required_skills
                    .as_ref()
                    .map(normalize::skill_set)
                    .unwrap_or_default();
                let qualified = worker_skills
                    .iter()
                    .filter(|skills| required.is_subset(skills))
                    .count();
                (max_concurrent > qualified as f64).then(|| {
                    WorkforceViolation::ConcurrencyInfeasible {
                        row,
                        task_id: row_label(task.id(), row),
                        max_concurrent,
                        qualified,
                    }
                })
            })
            .collect()
    }
}

/// Normalized union of every worker's skills
pub fn worker_skill_union(snapshot: &Snapshot) -> BTreeSet<String> {
    snapshot
        .workers
        .iter()
        .filter_map(|w| w.skills.as_ref())
        .flat_map(normalize::skill_set)
        .collect()
}

impl Validator for WorkforceValidator {
    fn name(&self) -> &'static str {
        "workforce"
    }

    fn description(&self) -> &'static str {
        "Worker load, skill coverage and concurrency feasibility"
    }

    fn validate(&self, snapshot: &Snapshot) -> Vec<Box<dyn Violation>> {
        self.validate_all(snapshot).into_boxed()
    }
}
