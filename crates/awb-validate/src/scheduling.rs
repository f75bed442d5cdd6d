//! Scheduling Validation
//!
//! Per-phase demand against worker capacity, the circular co-run
//! indication and phase-window feasibility.
//!
//! The circular co-run check is a name heuristic only: it groups tasks by
//! category and flags names containing the circular marker. It does not
//! build a dependency graph, so real cycles between co-run rules go
//! undetected.

use crate::validator_trait::Validator;
use crate::values::row_label;
use crate::violation_trait::{IssueKind, Severity, Violation, ViolationCategory, ViolationExt};
use awb_domain::constants::{CIRCULAR_MARKER, PHASE_WINDOW_DURATION_FACTOR};
use awb_domain::normalize;
use awb_domain::value_objects::field::format_number;
use awb_domain::{EntityRecord, EntityType, Snapshot, Task};
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};

/// Scheduling Violations
#[derive(Debug, Clone, Serialize)]
pub enum SchedulingViolation {
    /// Total duration preferring a phase exceeds the slots workers offer
    PhaseSaturated {
        phase: u32,
        demand: f64,
        capacity: f64,
    },
    /// Preferred phases that could not be read; the task adds no demand
    UnparseablePhases {
        row: usize,
        task_id: String,
        value: String,
        reason: String,
    },
    /// Task name marks a suspected circular co-run
    CircularCoRun {
        row: usize,
        task_id: String,
        category: String,
    },
    /// Duration longer than the preferred window can hold
    DurationExceedsWindow {
        row: usize,
        task_id: String,
        duration: f64,
        phases: usize,
    },
    /// More concurrent runs than preferred phases
    ConcurrencyExceedsWindow {
        row: usize,
        task_id: String,
        max_concurrent: f64,
        phases: usize,
    },
}

impl std::fmt::Display for SchedulingViolation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::PhaseSaturated {
                phase,
                demand,
                capacity,
            } => write!(
                f,
                "Phase {phase} is oversubscribed: task demand {} exceeds worker capacity {}",
                format_number(*demand),
                format_number(*capacity)
            ),
            Self::UnparseablePhases {
                task_id,
                value,
                reason,
                ..
            } => write!(
                f,
                "PreferredPhases '{value}' for task '{task_id}' could not be read ({reason}); excluded from phase demand"
            ),
            Self::CircularCoRun {
                task_id, category, ..
            } => write!(
                f,
                "Task '{task_id}' in category '{category}' may be part of a circular co-run"
            ),
            Self::DurationExceedsWindow {
                task_id,
                duration,
                phases,
                ..
            } => write!(
                f,
                "Task '{task_id}' lasts {} phase(s) but prefers only {phases} phase(s)",
                format_number(*duration)
            ),
            Self::ConcurrencyExceedsWindow {
                task_id,
                max_concurrent,
                phases,
                ..
            } => write!(
                f,
                "Task '{task_id}' allows MaxConcurrent {} across only {phases} preferred phase(s)",
                format_number(*max_concurrent)
            ),
        }
    }
}

impl Violation for SchedulingViolation {
    fn code(&self) -> &str {
        match self {
            Self::PhaseSaturated { .. } => "SCH001",
            Self::UnparseablePhases { .. } => "SCH002",
            Self::CircularCoRun { .. } => "SCH003",
            Self::DurationExceedsWindow { .. } => "SCH004",
            Self::ConcurrencyExceedsWindow { .. } => "SCH005",
        }
    }

    fn category(&self) -> ViolationCategory {
        ViolationCategory::Scheduling
    }

    fn kind(&self) -> IssueKind {
        match self {
            Self::PhaseSaturated { .. } => IssueKind::Error,
            _ => IssueKind::Warning,
        }
    }

    fn severity(&self) -> Severity {
        match self {
            Self::PhaseSaturated { .. } => Severity::High,
            Self::UnparseablePhases { .. } => Severity::Low,
            Self::CircularCoRun { .. }
            | Self::DurationExceedsWindow { .. }
            | Self::ConcurrencyExceedsWindow { .. } => Severity::Medium,
        }
    }

    fn entity(&self) -> EntityType {
        EntityType::Tasks
    }

    fn field(&self) -> &str {
        match self {
            Self::PhaseSaturated { .. } | Self::UnparseablePhases { .. } => "PreferredPhases",
            Self::CircularCoRun { .. } => "TaskName",
            Self::DurationExceedsWindow { .. } => "Duration",
            Self::ConcurrencyExceedsWindow { .. } => "MaxConcurrent",
        }
    }

    fn row(&self) -> Option<usize> {
        match self {
            Self::PhaseSaturated { .. } => None,
            Self::UnparseablePhases { row, .. }
            | Self::CircularCoRun { row, .. }
            | Self::DurationExceedsWindow { row, .. }
            | Self::ConcurrencyExceedsWindow { row, .. } => Some(*row),
        }
    }

    fn subject(&self) -> Option<String> {
        match self {
            Self::PhaseSaturated { phase, .. } => Some(format!("phase{phase}")),
            _ => None,
        }
    }

    fn suggestion(&self) -> Option<String> {
        let text = match self {
            Self::PhaseSaturated { phase, .. } => {
                format!("Spread tasks preferring phase {phase} over other phases or add worker slots")
            }
            Self::UnparseablePhases { .. } => {
                "Use a list such as [1, 2] or a range such as \"1-3\"".to_string()
            }
            Self::CircularCoRun { category, .. } => {
                format!("Review co-run rules for tasks in category '{category}'")
            }
            Self::DurationExceedsWindow { .. } => {
                "Widen PreferredPhases or shorten the task".to_string()
            }
            Self::ConcurrencyExceedsWindow { .. } => {
                "Lower MaxConcurrent or widen PreferredPhases".to_string()
            }
        };
        Some(text)
    }
}

/// Scheduling Validator
pub struct SchedulingValidator;

impl Default for SchedulingValidator {
    fn default() -> Self {
        Self::new()
    }
}

impl SchedulingValidator {
    pub fn new() -> Self {
        Self
    }

    /// Saturation, circular co-run, then phase windows
    pub fn validate_all(&self, snapshot: &Snapshot) -> Vec<SchedulingViolation> {
        let mut violations = Vec::new();
        violations.extend(self.check_phase_saturation(snapshot));
        violations.extend(self.check_circular_co_run(snapshot));
        violations.extend(self.check_phase_windows(snapshot));
        violations
    }

    /// Capacity is the sum of max load over each worker's slot phases;
    /// demand is the sum of duration over each task's preferred phases.
    /// Unparseable preferences come first, then saturated phases ascending.
    pub fn check_phase_saturation(&self, snapshot: &Snapshot) -> Vec<SchedulingViolation> {
        let mut capacity: BTreeMap<u32, f64> = BTreeMap::new();
        for worker in &snapshot.workers {
            let Some(slots) = worker
                .available_slots
                .as_ref()
                .and_then(|v| normalize::phase_list(v).ok())
            else {
                continue;
            };
            let Some(max_load) = worker.max_load_per_phase.as_ref().and_then(normalize::number)
            else {
                continue;
            };
            for phase in slots.into_iter().collect::<BTreeSet<_>>() {
                *capacity.entry(phase).or_default() += max_load;
            }
        }

        let mut violations = Vec::new();
        let mut demand: BTreeMap<u32, f64> = BTreeMap::new();
        for (row, task) in snapshot.tasks.iter().enumerate() {
            let Some(value) = task.preferred_phases.as_ref().filter(|v| !v.is_blank()) else {
                continue;
            };
            let phases = match normalize::preferred_phases(value) {
                Ok(phases) => phases,
                Err(reason) => {
                    violations.push(SchedulingViolation::UnparseablePhases {
                        row,
                        task_id: row_label(task.id(), row),
                        value: value.display_value(),
                        reason: reason.to_string(),
                    });
                    continue;
                }
            };
            let Some(duration) = task.duration.as_ref().and_then(normalize::number) else {
                continue;
            };
            for phase in phases.into_iter().collect::<BTreeSet<_>>() {
                *demand.entry(phase).or_default() += duration;
            }
        }

        for (phase, demand) in demand {
            let capacity = capacity.get(&phase).copied().unwrap_or(0.0);
            if demand > capacity {
                violations.push(SchedulingViolation::PhaseSaturated {
                    phase,
                    demand,
                    capacity,
                });
            }
        }
        violations
    }

    /// Tasks grouped by category; any name containing the marker is flagged
    pub fn check_circular_co_run(&self, snapshot: &Snapshot) -> Vec<SchedulingViolation> {
        let mut by_category: BTreeMap<String, Vec<(usize, &Task)>> = BTreeMap::new();
        for (row, task) in snapshot.tasks.iter().enumerate() {
            let category = task
                .category
                .as_ref()
                .and_then(normalize::text)
                .filter(|c| !c.is_empty())
                .unwrap_or_else(|| "uncategorized".to_string());
            by_category.entry(category).or_default().push((row, task));
        }

        let mut violations = Vec::new();
        for (category, rows) in by_category {
            for (row, task) in rows {
                let named_circular = task
                    .task_name
                    .as_ref()
                    .and_then(normalize::text)
                    .is_some_and(|name| name.to_lowercase().contains(CIRCULAR_MARKER));
                if named_circular {
                    violations.push(SchedulingViolation::CircularCoRun {
                        row,
                        task_id: row_label(task.id(), row),
                        category: category.clone(),
                    });
                }
            }
        }
        violations
    }

    /// Duration and concurrency must fit the preferred window
    pub fn check_phase_windows(&self, snapshot: &Snapshot) -> Vec<SchedulingViolation> {
        let mut violations = Vec::new();
        for (row, task) in snapshot.tasks.iter().enumerate() {
            let Some(phases) = task
                .preferred_phases
                .as_ref()
                .and_then(|v| normalize::preferred_phases(v).ok())
            else {
                continue;
            };
            let window = phases.into_iter().collect::<BTreeSet<_>>().len();
            let duration = task.duration.as_ref().and_then(normalize::number);
            let max_concurrent = task.max_concurrent.as_ref().and_then(normalize::number);
            let (Some(duration), Some(max_concurrent)) = (duration, max_concurrent) else {
                continue;
            };
            let task_id = row_label(task.id(), row);
            if duration > (PHASE_WINDOW_DURATION_FACTOR * window) as f64 {
                violations.push(SchedulingViolation::DurationExceedsWindow {
                    row,
                    task_id: task_id.clone(),
                    duration,
                    phases: window,
                });
            }
            if max_concurrent > window as f64 {
                violations.push(SchedulingViolation::ConcurrencyExceedsWindow {
                    row,
                    task_id,
                    max_concurrent,
                    phases: window,
                });
            }
        }
        violations
    }
}

impl Validator for SchedulingValidator {
    fn name(&self) -> &'static str {
        "scheduling"
    }

    fn description(&self) -> &'static str {
        "Phase saturation, circular co-run and phase windows"
    }

    fn validate(&self, snapshot: &Snapshot) -> Vec<Box<dyn Violation>> {
        self.validate_all(snapshot).into_boxed()
    }
}
