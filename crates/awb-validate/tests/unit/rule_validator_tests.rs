//! Unit tests for rule structure, conflicts and manifests

use crate::fixtures::{co_run, load_limit, phase_window};
use awb_domain::EntityType;
use awb_domain::rules::{ConflictPolicy, PatternAction, Rule, RuleKind};
use awb_validate::rules::{generate_rule_set, generate_rule_set_at, validate_rule};
use chrono::{TimeZone, Utc};

#[test]
fn test_valid_rule_against_empty_collection() {
    let check = validate_rule(&co_run("r1", "Pair", &["T1", "T2"]), &[]);
    assert!(check.valid);
    assert!(check.reasons.is_empty());
}

#[test]
fn test_co_run_conflict_on_shared_task() {
    let existing = vec![co_run("r1", "Pair A", &["T1", "T2"])];

    let check = validate_rule(&co_run("r2", "Pair B", &["T1", "T3"]), &existing);

    assert!(!check.valid);
    assert_eq!(check.reasons.len(), 1);
    assert!(check.reasons[0].contains("T1"));
    assert!(check.reasons[0].contains("Pair A"));
}

#[test]
fn test_co_run_needs_two_distinct_tasks() {
    let check = validate_rule(&co_run("r1", "Solo", &["T1", " T1 "]), &[]);
    assert!(!check.valid);
    assert!(check.reasons[0].contains("at least 2"));
}

#[test]
fn test_priority_bounds() {
    let low = co_run("r1", "Low", &["T1", "T2"]).with_priority(0);
    let high = co_run("r2", "High", &["T3", "T4"]).with_priority(101);
    let edge = co_run("r3", "Edge", &["T5", "T6"]).with_priority(100);

    assert!(!validate_rule(&low, &[]).valid);
    assert!(!validate_rule(&high, &[]).valid);
    assert!(validate_rule(&edge, &[]).valid);
}

#[test]
fn test_blank_name_is_rejected() {
    let check = validate_rule(&co_run("r1", "   ", &["T1", "T2"]), &[]);
    assert_eq!(check.reasons, vec!["Rule name is required".to_string()]);
}

#[test]
fn test_duplicate_name_ignores_case() {
    let existing = vec![load_limit("r1", "Cap Sales", "Sales", 2)];
    let check = validate_rule(&co_run("r2", "cap sales", &["T1", "T2"]), &existing);

    assert!(!check.valid);
    assert!(check.reasons[0].contains("already exists"));
}

#[test]
fn test_slot_restriction_minimum() {
    let rule = Rule::new(
        "Shared slots",
        RuleKind::SlotRestriction {
            group_type: awb_domain::rules::GroupScope::Client,
            group: "GroupA".to_string(),
            min_common_slots: 0,
            phases: None,
        },
    );
    assert!(!validate_rule(&rule, &[]).valid);
}

#[test]
fn test_load_limit_checks() {
    assert!(!validate_rule(&load_limit("r1", "Zero", "G", 0), &[]).valid);

    let existing = vec![load_limit("r1", "Cap A", "GroupA", 2)];
    let check = validate_rule(&load_limit("r2", "Cap A again", " groupa ", 3), &existing);
    assert!(!check.valid);
    assert!(check.reasons[0].contains("Load-limit conflict"));

    let other_group = validate_rule(&load_limit("r3", "Cap B", "GroupB", 3), &existing);
    assert!(other_group.valid);
}

#[test]
fn test_phase_window_checks() {
    assert!(!validate_rule(&phase_window("r1", "Empty", "T1", vec![]), &[]).valid);

    let existing = vec![phase_window("r1", "T1 early", "T1", vec![1, 2])];
    let check = validate_rule(&phase_window("r2", "T1 late", "T1", vec![4]), &existing);
    assert!(!check.valid);
    assert!(check.reasons[0].contains("Phase-window conflict"));
}

#[test]
fn test_invalid_pattern_is_rejected() {
    let rule = Rule::new(
        "Bad pattern",
        RuleKind::PatternMatch {
            entity: EntityType::Workers,
            field: "WorkerName".to_string(),
            pattern: "([unclosed".to_string(),
            action: PatternAction::Flag,
        },
    );

    let check = validate_rule(&rule, &[]);
    assert!(!check.valid);
    assert!(check.reasons[0].starts_with("Pattern '([unclosed'"));
}

#[test]
fn test_precedence_has_no_structural_constraints() {
    let rule = Rule::new(
        "Order",
        RuleKind::Precedence {
            global_rules: vec![],
            specific_rules: vec![],
            policy: ConflictPolicy::SpecificOverGlobal,
        },
    );
    assert!(validate_rule(&rule, &[]).valid);
}

#[test]
fn test_editing_a_rule_ignores_its_previous_version() {
    let existing = vec![co_run("r1", "Pair", &["T1", "T2"])];
    let edited = co_run("r1", "Pair", &["T1", "T2", "T3"]);

    assert!(validate_rule(&edited, &existing).valid);
}

#[test]
fn test_structural_reasons_come_before_conflicts() {
    let existing = vec![co_run("r1", "Pair", &["T1", "T2"])];
    let candidate = co_run("r2", "Pair", &["T1"]).with_priority(500);

    let check = validate_rule(&candidate, &existing);

    assert_eq!(check.reasons.len(), 4);
    assert!(check.reasons[0].starts_with("Priority"));
    assert!(check.reasons[1].starts_with("Co-run rules need"));
    assert!(check.reasons[2].contains("already exists"));
    assert!(check.reasons[3].starts_with("Co-run conflict"));
}

#[test]
fn test_manifest_keeps_enabled_rules_by_priority() {
    let rules = vec![
        co_run("a", "A", &["T1", "T2"]).with_priority(10),
        load_limit("b", "B", "G", 2).with_priority(90),
        phase_window("c", "C", "T3", vec![1]).with_priority(10),
        load_limit("d", "D", "H", 2).disabled(),
        co_run("a", "A copy", &["T4", "T5"]).with_priority(99),
    ];
    let created_at = Utc.with_ymd_and_hms(2026, 1, 2, 3, 4, 5).unwrap();

    let manifest = generate_rule_set_at(&rules, created_at);

    let ids: Vec<&str> = manifest.rules.iter().map(|r| r.id.as_str()).collect();
    assert_eq!(ids, vec!["b", "a", "c"]);
    assert_eq!(manifest.rules[1].name, "A");
    assert_eq!(manifest.version, "1.0");
    assert_eq!(manifest.created_at, created_at);
    assert_eq!(manifest.metadata.total_rules, 5);
    assert_eq!(manifest.metadata.enabled_rules, 3);
    assert_eq!(manifest.metadata.rule_types.get("loadLimit"), Some(&1));
    assert_eq!(manifest.metadata.rule_types.get("coRun"), Some(&1));
    assert_eq!(manifest.metadata.rule_types.get("phaseWindow"), Some(&1));
}

#[test]
fn test_manifest_wire_format() {
    let manifest = generate_rule_set(&[load_limit("b", "B", "G", 2)]);
    let json = serde_json::to_value(&manifest).unwrap();

    assert!(json.get("createdAt").is_some());
    assert_eq!(json["metadata"]["totalRules"], 1);
    assert_eq!(json["metadata"]["enabledRules"], 1);
    assert_eq!(json["metadata"]["ruleTypes"]["loadLimit"], 1);
    assert_eq!(json["rules"][0]["type"], "loadLimit");
    assert_eq!(json["rules"][0]["workerGroup"], "G");
}
