//! Rule Validator
//!
//! A pure function of (candidate, existing collection): structural checks
//! first, then conflicts against every other rule. Reasons are reported in
//! that order.

use awb_domain::constants::{CO_RUN_MIN_TASKS, RULE_PRIORITY_MAX, RULE_PRIORITY_MIN};
use awb_domain::rules::{Rule, RuleKind};
use awb_domain::{Error, Result};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Outcome of checking one candidate rule
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RuleCheck {
    /// True when there are no reasons
    pub valid: bool,
    /// Why the rule was rejected
    pub reasons: Vec<String>,
}

impl RuleCheck {
    fn from_reasons(reasons: Vec<String>) -> Self {
        Self {
            valid: reasons.is_empty(),
            reasons,
        }
    }

    /// Convert a rejection into a domain error naming the rule
    pub fn into_result(self, rule_name: &str) -> Result<()> {
        if self.valid {
            Ok(())
        } else {
            Err(Error::rule_rejected(rule_name, self.reasons))
        }
    }
}

/// Check a candidate rule against an existing collection
///
/// A rule in `existing` with the candidate's own id is ignored, so an edited
/// rule never conflicts with its previous version.
///
/// # Example
///
/// ```rust
/// use awb_domain::rules::{Rule, RuleKind};
/// use awb_validate::rules::validate_rule;
///
/// let limit = |name: &str| {
///     Rule::new(
///         name,
///         RuleKind::LoadLimit {
///             worker_group: "GroupA".to_string(),
///             max_slots_per_phase: 2,
///         },
///     )
/// };
/// let existing = vec![limit("Cap group A")];
///
/// let check = validate_rule(&limit("Cap group A again"), &existing);
/// assert!(!check.valid);
/// assert_eq!(check.reasons.len(), 1);
/// ```
pub fn validate_rule(candidate: &Rule, existing: &[Rule]) -> RuleCheck {
    let mut reasons = structural_reasons(candidate);
    let others = existing.iter().filter(|rule| rule.id != candidate.id);
    for other in others {
        reasons.extend(conflict_reasons(candidate, other));
    }
    let check = RuleCheck::from_reasons(reasons);
    tracing::debug!(
        rule = %candidate.name,
        kind = candidate.kind.type_name(),
        valid = check.valid,
        "rule checked"
    );
    check
}

fn structural_reasons(rule: &Rule) -> Vec<String> {
    let mut reasons = Vec::new();
    if rule.name.trim().is_empty() {
        reasons.push("Rule name is required".to_string());
    }
    if !(RULE_PRIORITY_MIN..=RULE_PRIORITY_MAX).contains(&rule.priority) {
        reasons.push(format!(
            "Priority must be between {RULE_PRIORITY_MIN} and {RULE_PRIORITY_MAX} (got {})",
            rule.priority
        ));
    }
    match &rule.kind {
        RuleKind::CoRun { tasks, .. } => {
            if distinct_tasks(tasks).len() < CO_RUN_MIN_TASKS {
                reasons.push(format!(
                    "Co-run rules need at least {CO_RUN_MIN_TASKS} distinct tasks"
                ));
            }
        }
        RuleKind::SlotRestriction {
            min_common_slots, ..
        } => {
            if *min_common_slots < 1 {
                reasons.push("Minimum common slots must be at least 1".to_string());
            }
        }
        RuleKind::LoadLimit {
            max_slots_per_phase,
            ..
        } => {
            if *max_slots_per_phase < 1 {
                reasons.push("Maximum slots per phase must be at least 1".to_string());
            }
        }
        RuleKind::PhaseWindow { allowed_phases, .. } => {
            if allowed_phases.is_empty() {
                reasons.push("Phase-window rules need at least one allowed phase".to_string());
            }
        }
        RuleKind::PatternMatch { pattern, .. } => {
            if let Err(e) = Regex::new(pattern) {
                reasons.push(format!("Pattern '{pattern}' does not compile: {e}"));
            }
        }
        RuleKind::Precedence { .. } => {}
    }
    reasons
}

fn conflict_reasons(candidate: &Rule, other: &Rule) -> Vec<String> {
    let mut reasons = Vec::new();
    if !candidate.name.trim().is_empty()
        && candidate.name.trim().eq_ignore_ascii_case(other.name.trim())
    {
        reasons.push(format!("A rule named '{}' already exists", other.name.trim()));
    }
    match (&candidate.kind, &other.kind) {
        (RuleKind::CoRun { tasks, .. }, RuleKind::CoRun { tasks: theirs, .. }) => {
            let shared: Vec<String> = distinct_tasks(tasks)
                .intersection(&distinct_tasks(theirs))
                .cloned()
                .collect();
            if !shared.is_empty() {
                reasons.push(format!(
                    "Co-run conflict with '{}': shares task(s) {}",
                    other.name,
                    shared.join(", ")
                ));
            }
        }
        (
            RuleKind::LoadLimit { worker_group, .. },
            RuleKind::LoadLimit {
                worker_group: theirs,
                ..
            },
        ) if same_key(worker_group, theirs) => {
            reasons.push(format!(
                "Load-limit conflict with '{}': worker group '{}' is already limited",
                other.name,
                worker_group.trim()
            ));
        }
        (
            RuleKind::PhaseWindow { task_id, .. },
            RuleKind::PhaseWindow {
                task_id: theirs, ..
            },
        ) if task_id.trim() == theirs.trim() => {
            reasons.push(format!(
                "Phase-window conflict with '{}': task '{}' already has a window",
                other.name,
                task_id.trim()
            ));
        }
        _ => {}
    }
    reasons
}

fn distinct_tasks(tasks: &[String]) -> BTreeSet<String> {
    tasks
        .iter()
        .map(|task| task.trim().to_string())
        .filter(|task| !task.is_empty())
        .collect()
}

fn same_key(a: &str, b: &str) -> bool {
    a.trim().eq_ignore_ascii_case(b.trim())
}
