//! Rule advisor adapters
//!
//! Implementations of the `RuleAdvisor` port plus the prompt material they
//! share.

pub mod http;
pub mod null;

pub use http::HttpRuleAdvisor;
pub use null::NullRuleAdvisor;

use std::collections::BTreeSet;
use std::sync::Arc;

use awb_domain::error::Result;
use awb_domain::ports::RuleAdvisor;
use awb_domain::{EntityRecord, Snapshot, normalize};

use crate::config::AdvisorConfig;

pub(crate) const DRAFT_INSTRUCTIONS: &str = "You turn scheduling requests into one business rule. \
Reply with a single JSON object and nothing else. Fields: name (string), description (string), \
priority (1-100), type (one of coRun, slotRestriction, loadLimit, phaseWindow, patternMatch, \
precedence) and the fields of that type: coRun {tasks, mode: together|apart}; slotRestriction \
{groupType: client|worker, group, minCommonSlots}; loadLimit {workerGroup, maxSlotsPerPhase}; \
phaseWindow {taskId, allowedPhases, strict}; patternMatch {entity, field, pattern, action: \
allow|deny|flag}; precedence {globalRules, specificRules, policy: priorityBased|\
specificOverGlobal|firstMatch}. Use only identifiers that appear in the context.";

pub(crate) const EXPLAIN_INSTRUCTIONS: &str = "Explain the following scheduling rule in two or \
three plain English sentences for an operations planner. Do not repeat the JSON.";

/// Build the advisor selected by configuration
pub fn advisor_from_config(config: &AdvisorConfig) -> Result<Arc<dyn RuleAdvisor>> {
    if config.enabled {
        Ok(Arc::new(HttpRuleAdvisor::from_config(config)?))
    } else {
        Ok(Arc::new(NullRuleAdvisor::new()))
    }
}

/// Identifiers and group tags the advisor may refer to
pub(crate) fn snapshot_context(snapshot: &Snapshot) -> String {
    let tasks: Vec<String> = snapshot.task_ids();
    let worker_groups: BTreeSet<String> = snapshot
        .workers
        .iter()
        .filter_map(|w| w.worker_group.as_ref())
        .filter_map(normalize::text)
        .filter(|g| !g.is_empty())
        .collect();
    let client_groups: BTreeSet<String> = snapshot
        .clients
        .iter()
        .filter_map(|c| c.group_tag.as_ref())
        .filter_map(normalize::text)
        .filter(|g| !g.is_empty())
        .collect();
    let workers: Vec<String> = snapshot.workers.iter().filter_map(EntityRecord::id).collect();

    format!(
        "Tasks: {}\nWorkers: {}\nWorker groups: {}\nClient groups: {}",
        tasks.join(", "),
        workers.join(", "),
        worker_groups.into_iter().collect::<Vec<_>>().join(", "),
        client_groups.into_iter().collect::<Vec<_>>().join(", "),
    )
}

/// First balanced JSON object in a reply, skipping code fences and prose
pub(crate) fn extract_json_object(reply: &str) -> Option<&str> {
    let start = reply.find('{')?;
    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;
    for (offset, c) in reply[start..].char_indices() {
        if in_string {
            match c {
                _ if escaped => escaped = false,
                '\\' => escaped = true,
                '"' => in_string = false,
                _ => {}
            }
            continue;
        }
        match c {
            '"' => in_string = true,
            '{' => depth += 1,
            '}' => {
                depth -= 1;
                if depth == 0 {
                    return Some(&reply[start..=start + offset]);
                }
            }
            _ => {}
        }
    }
    None
}
