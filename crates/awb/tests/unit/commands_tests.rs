//! Tests for the command implementations behind the binary

use awb::commands::{
    check_collection, fix_snapshot, render_fixes, render_query, render_rule_checks,
    render_validation, run_query, validation_passed,
};
use awb::domain::rules::{CoRunMode, RuleKind};
use awb::infrastructure::config::ReportFormat;
use awb::{EntityType, FieldValue, Rule, Snapshot, validate};

fn snapshot() -> Snapshot {
    serde_json::from_str(
        r#"{
            "clients": [
                {"ClientID": "C1", "ClientName": "Acme", "PriorityLevel": 7,
                 "RequestedTaskIDs": "T1", "GroupTag": "A"}
            ],
            "workers": [
                {"WorkerID": "W1", "WorkerName": "Ana", "Skills": "JavaScript",
                 "AvailableSlots": [1, 2], "MaxLoadPerPhase": 1, "WorkerGroup": "Frontend",
                 "QualificationLevel": 3}
            ],
            "tasks": [
                {"TaskID": "T1", "TaskName": "Landing page", "Category": "Design",
                 "Duration": 1, "RequiredSkills": "javascript", "PreferredPhases": "1-2",
                 "MaxConcurrent": 1}
            ]
        }"#,
    )
    .unwrap()
}

fn co_run(id: &str, name: &str, tasks: &[&str]) -> Rule {
    Rule::new(
        name,
        RuleKind::CoRun {
            tasks: tasks.iter().map(|t| (*t).to_string()).collect(),
            mode: CoRunMode::Together,
        },
    )
    .with_id(id)
}

#[test]
fn test_priority_out_of_range_is_fixed() {
    let before = validate(&snapshot());
    assert_eq!(before.errors.len(), 1);
    assert_eq!(before.errors[0].field, "PriorityLevel");

    let report = fix_snapshot(&snapshot());

    assert_eq!(report.proposals.len(), 1);
    assert!(report.remaining.is_valid);
    assert_eq!(
        report.fixed.clients[0].priority_level,
        Some(FieldValue::from(5_i64))
    );
    assert!(render_fixes(&report).contains("PriorityLevel"));
}

#[test]
fn test_render_validation_formats() {
    let result = validate(&snapshot());

    let human = render_validation(&result, ReportFormat::Human);
    assert!(human.contains("Status: FAILED"));

    let json: serde_json::Value =
        serde_json::from_str(&render_validation(&result, ReportFormat::Json)).unwrap();
    assert_eq!(json["isValid"], false);
    assert_eq!(json["summary"]["totalErrors"], 1);
}

#[test]
fn test_warnings_can_fail_the_run() {
    let mut fixed = fix_snapshot(&snapshot()).fixed;
    fixed.tasks[0].task_name = Some(FieldValue::text("Circular dependency refactor"));

    let result = validate(&fixed);

    assert!(result.is_valid);
    assert_eq!(result.summary.total_warnings, 1);
    assert!(validation_passed(&result, false));
    assert!(!validation_passed(&result, true));
}

#[test]
fn test_query_report_lists_matches() {
    let (query, result) = run_query(&snapshot(), "Workers with JavaScript skills");

    assert_eq!(query.entity_types, vec![EntityType::Workers]);
    assert_eq!(result.rows_of(EntityType::Workers), vec![0]);

    let report = render_query(&query, &result, 20);
    assert!(report.contains("Filter: Skills contains \"javascript\""));
    assert!(report.contains("row 0 W1"));
    assert!(!report.contains("Low confidence"));
}

#[test]
fn test_low_confidence_is_flagged() {
    let (query, result) = run_query(&snapshot(), "landing");
    assert_eq!(query.confidence, 0);
    assert_eq!(result.rows_of(EntityType::Tasks), vec![0]);
    assert!(render_query(&query, &result, 20).contains("Low confidence"));
}

#[test]
fn test_rule_collection_conflicts_are_reported_both_ways() {
    let rules = vec![
        co_run("r1", "Pair T1 T2", &["T1", "T2"]),
        co_run("r2", "Pair T1 T3", &["T1", "T3"]),
        co_run("r3", "Pair T4 T5", &["T4", "T5"]),
    ];

    let checks = check_collection(&rules);

    let valid: Vec<bool> = checks.iter().map(|(_, check)| check.valid).collect();
    assert_eq!(valid, vec![false, false, true]);
    let rendered = render_rule_checks(&checks);
    assert!(rendered.contains("[rejected] Pair T1 T2"));
    assert!(rendered.contains("Rules: 3, rejected: 2"));
}
