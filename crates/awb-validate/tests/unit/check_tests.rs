//! Unit tests for the individual checks

use crate::fixtures::{clean_snapshot_json, clean_with, snapshot, with_code};
use awb_domain::{EntityType, FieldValue};
use awb_validate::values::salvage_phases;
use awb_validate::{
    IssueKind, SchedulingValidator, Severity, StructureValidator, Violation, WorkforceValidator,
    validate,
};
use serde_json::json;

#[test]
fn test_missing_required_column_is_global() {
    let mut json = clean_snapshot_json();
    json["workers"][0]
        .as_object_mut()
        .unwrap()
        .remove("QualificationLevel");

    let result = validate(&snapshot(json));

    let missing = with_code(&result.errors, "STR001");
    assert_eq!(missing.len(), 1);
    assert_eq!(missing[0].id, "STR001-workers-global-QualificationLevel");
    assert_eq!(missing[0].row_index, -1);
    assert!(!missing[0].auto_fixable);
}

#[test]
fn test_optional_attributes_column_is_not_required() {
    let mut json = clean_snapshot_json();
    json["clients"][0]
        .as_object_mut()
        .unwrap()
        .remove("AttributesJSON");

    assert!(validate(&snapshot(json)).is_valid);
}

#[test]
fn test_only_first_row_is_checked_for_columns() {
    let mut json = clean_snapshot_json();
    json["tasks"][1].as_object_mut().unwrap().remove("Category");

    let violations = StructureValidator::check_required_columns(&snapshot(json).tasks);
    assert!(violations.is_empty());
}

#[test]
fn test_malformed_slots_text() {
    let result = validate(&clean_with("workers", 0, "AvailableSlots", json!("1,2")));

    let malformed = with_code(&result.errors, "VAL001");
    assert_eq!(malformed.len(), 1);
    assert_eq!(malformed[0].severity, Severity::Medium);
    assert_eq!(malformed[0].field, "AvailableSlots");
    assert!(malformed[0].auto_fixable);
}

#[test]
fn test_slots_with_non_positive_element() {
    let result = validate(&clean_with("workers", 1, "AvailableSlots", json!([1, 0])));
    assert_eq!(with_code(&result.errors, "VAL001").len(), 1);
}

#[test]
fn test_null_slots_are_skipped() {
    let result = validate(&clean_with("workers", 1, "AvailableSlots", json!(null)));
    assert!(with_code(&result.errors, "VAL001").is_empty());
}

#[test]
fn test_salvage_keeps_positive_whole_numbers() {
    assert_eq!(salvage_phases(&FieldValue::text("[1, \"x\", 3, 3]")), vec![1, 3]);
    assert_eq!(salvage_phases(&FieldValue::text("-1; 2")), vec![2]);
    assert!(salvage_phases(&FieldValue::Bool(true)).is_empty());
}

#[test]
fn test_non_numeric_priority_is_out_of_range() {
    let result = validate(&clean_with("clients", 0, "PriorityLevel", json!("high")));
    assert_eq!(with_code(&result.errors, "VAL002").len(), 1);
}

#[test]
fn test_numeric_text_priority_is_accepted() {
    let result = validate(&clean_with("clients", 0, "PriorityLevel", json!(" 5 ")));
    assert!(result.is_valid);
}

#[test]
fn test_zero_duration_is_flagged() {
    let result = validate(&clean_with("tasks", 0, "Duration", json!(0)));

    let issues = with_code(&result.errors, "VAL003");
    assert_eq!(issues.len(), 1);
    assert_eq!(issues[0].field, "Duration");
    assert_eq!(issues[0].entity_type, EntityType::Tasks);
}

#[test]
fn test_malformed_attributes_json_is_not_fixable() {
    let result = validate(&clean_with("clients", 0, "AttributesJSON", json!("{oops")));

    let issues = with_code(&result.errors, "VAL004");
    assert_eq!(issues.len(), 1);
    assert!(!issues[0].auto_fixable);
}

#[test]
fn test_empty_attributes_json_is_skipped() {
    let result = validate(&clean_with("clients", 0, "AttributesJSON", json!("  ")));
    assert!(result.is_valid);
}

#[test]
fn test_overloaded_worker_is_a_warning() {
    let result = validate(&clean_with("workers", 0, "MaxLoadPerPhase", json!(4)));

    let overloaded = with_code(&result.warnings, "WRK001");
    assert_eq!(overloaded.len(), 1);
    assert_eq!(overloaded[0].kind, IssueKind::Warning);
    assert_eq!(overloaded[0].severity, Severity::Medium);
    assert!(overloaded[0].auto_fixable);
}

#[test]
fn test_worker_without_slots_is_not_auto_fixable() {
    let result = validate(&clean_with("workers", 0, "AvailableSlots", json!([])));

    let overloaded = with_code(&result.warnings, "WRK001");
    assert_eq!(overloaded.len(), 1);
    assert!(!overloaded[0].auto_fixable);
    assert_eq!(overloaded[0].suggestion.as_deref(), Some("Add available slots"));
}

#[test]
fn test_uncovered_skill_is_high_error() {
    let result = validate(&clean_with("tasks", 1, "RequiredSkills", json!("python, Rust")));

    let uncovered = with_code(&result.errors, "WRK002");
    assert_eq!(uncovered.len(), 1);
    assert_eq!(uncovered[0].id, "WRK002-tasks-1-rust");
    assert!(uncovered[0].message.contains("Rust"));
    assert!(!uncovered[0].auto_fixable);
}

#[test]
fn test_skill_matching_ignores_case_and_spacing() {
    let result = validate(&clean_with("tasks", 1, "RequiredSkills", json!(["  PYTHON "])));
    assert!(with_code(&result.errors, "WRK002").is_empty());
}

#[test]
fn test_concurrency_above_qualified_workers() {
    let snapshot = clean_with("tasks", 0, "MaxConcurrent", json!(2));

    let violations = WorkforceValidator::new().check_max_concurrency(&snapshot);

    assert_eq!(violations.len(), 1);
    assert_eq!(violations[0].row(), Some(0));
    assert_eq!(violations[0].severity(), Severity::Medium);
    assert!(violations[0].to_string().contains("only 1 worker"));
}

#[test]
fn test_unparseable_preferred_phases_are_low_warnings() {
    let result = validate(&clean_with("tasks", 1, "PreferredPhases", json!("soon")));

    let issues = with_code(&result.warnings, "SCH002");
    assert_eq!(issues.len(), 1);
    assert_eq!(issues[0].severity, Severity::Low);
    assert!(with_code(&result.errors, "SCH001").is_empty());
}

#[test]
fn test_reversed_range_is_unparseable() {
    let result = validate(&clean_with("tasks", 1, "PreferredPhases", json!("3-2")));
    assert_eq!(with_code(&result.warnings, "SCH002").len(), 1);
}

#[test]
fn test_circular_task_name_is_flagged() {
    let result = validate(&clean_with(
        "tasks",
        1,
        "TaskName",
        json!("CIRCULAR dependency resolver"),
    ));

    let circular = with_code(&result.warnings, "SCH003");
    assert_eq!(circular.len(), 1);
    assert_eq!(circular[0].severity, Severity::Medium);
    assert!(circular[0].message.contains("Data"));
}

#[test]
fn test_circular_flags_are_grouped_by_category() {
    let mut json = clean_snapshot_json();
    json["tasks"][0]["TaskName"] = json!("circular a");
    json["tasks"][1]["TaskName"] = json!("circular b");

    let violations = SchedulingValidator::new().check_circular_co_run(&snapshot(json));
    let rows: Vec<Option<usize>> = violations.iter().map(Violation::row).collect();

    // "Data" sorts before "Engineering"
    assert_eq!(rows, vec![Some(1), Some(0)]);
}

#[test]
fn test_phase_window_conflicts() {
    let mut json = clean_snapshot_json();
    json["tasks"][0]["Duration"] = json!(5);
    json["tasks"][0]["MaxConcurrent"] = json!(3);
    let snapshot = snapshot(json);

    let violations = SchedulingValidator::new().check_phase_windows(&snapshot);
    let codes: Vec<&str> = violations.iter().map(Violation::code).collect();

    assert_eq!(codes, vec!["SCH004", "SCH005"]);
    assert!(violations.iter().all(|v| v.kind() == IssueKind::Warning));
}

#[test]
fn test_phase_window_needs_all_three_values() {
    let mut json = clean_snapshot_json();
    json["tasks"][0]["Duration"] = json!(9);
    json["tasks"][0]
        .as_object_mut()
        .unwrap()
        .remove("MaxConcurrent");

    let violations = SchedulingValidator::new().check_phase_windows(&snapshot(json));
    assert!(violations.is_empty());
}

#[test]
fn test_malformed_data_never_panics() {
    let snapshot = snapshot(json!({
        "clients": [{"ClientID": {"nested": true}, "PriorityLevel": [1], "RequestedTaskIDs": 42}],
        "workers": [{"WorkerID": null, "AvailableSlots": {"a": 1}, "MaxLoadPerPhase": "lots", "Skills": 7}],
        "tasks": [{"TaskID": true, "Duration": "x", "PreferredPhases": "0-0", "MaxConcurrent": -1}]
    }));

    let result = validate(&snapshot);
    assert!(!result.is_valid);
}
