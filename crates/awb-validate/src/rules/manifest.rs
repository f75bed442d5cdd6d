//! Rule Manifest Generation
//!
//! Compiles a rule collection into the export hand-off format consumed by
//! downstream allocators.

use awb_domain::rules::{ManifestMetadata, Rule, RuleManifest};
use chrono::{DateTime, Utc};
use std::collections::{BTreeMap, HashSet};

/// Manifest stamped with the current time
pub fn generate_rule_set(rules: &[Rule]) -> RuleManifest {
    generate_rule_set_at(rules, Utc::now())
}

/// Manifest with an explicit timestamp
///
/// Keeps enabled rules only, drops repeated ids (first occurrence wins) and
/// stable-sorts by priority, highest first. `total_rules` counts the whole
/// input; `rule_types` counts what was exported.
pub fn generate_rule_set_at(rules: &[Rule], created_at: DateTime<Utc>) -> RuleManifest {
    let mut seen = HashSet::new();
    let mut exported: Vec<Rule> = rules
        .iter()
        .filter(|rule| rule.enabled)
        .filter(|rule| seen.insert(rule.id.as_str()))
        .cloned()
        .collect();
    exported.sort_by(|a, b| b.priority.cmp(&a.priority));

    let mut rule_types: BTreeMap<String, usize> = BTreeMap::new();
    for rule in &exported {
        *rule_types.entry(rule.kind.type_name().to_string()).or_default() += 1;
    }

    tracing::debug!(
        total = rules.len(),
        exported = exported.len(),
        "rule manifest generated"
    );

    RuleManifest {
        metadata: ManifestMetadata {
            total_rules: rules.len(),
            enabled_rules: exported.len(),
            rule_types,
        },
        rules: exported,
        ..RuleManifest::empty(created_at)
    }
}
