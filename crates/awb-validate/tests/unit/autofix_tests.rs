//! Unit tests for fix proposals and their application

use crate::fixtures::{clean_snapshot, clean_snapshot_json, clean_with, snapshot};
use awb_domain::{EntityRecord, EntityType, FieldValue};
use awb_validate::{FixAction, apply_fix, apply_fixes, propose_fixes, validate};
use serde_json::json;

#[test]
fn test_priority_is_clamped() {
    let before = clean_with("clients", 0, "PriorityLevel", json!(7));
    let proposals = propose_fixes(&before, &validate(&before));

    assert_eq!(proposals.len(), 1);
    let proposal = &proposals[0];
    assert_eq!(proposal.entity_type, EntityType::Clients);
    assert_eq!(proposal.field, "PriorityLevel");
    assert_eq!(
        proposal.action,
        FixAction::SetValue {
            value: FieldValue::from(5_i64)
        }
    );

    let after = apply_fix(&before, proposal);
    assert_eq!(after.clients[0].priority_level, Some(FieldValue::from(5_i64)));
    assert_eq!(before.clients[0].priority_level, Some(FieldValue::from(7_i64)));
    assert!(validate(&after).is_valid);
}

#[test]
fn test_non_numeric_priority_gets_default() {
    let before = clean_with("clients", 0, "PriorityLevel", json!("urgent"));
    let proposals = propose_fixes(&before, &validate(&before));

    assert_eq!(
        proposals[0].action,
        FixAction::SetValue {
            value: FieldValue::from(3_i64)
        }
    );
}

#[test]
fn test_duplicate_ids_get_fresh_suffixes() {
    let mut json = clean_snapshot_json();
    let mut second = json["clients"][0].clone();
    let mut third = json["clients"][0].clone();
    let mut taken = json["clients"][0].clone();
    taken["ClientID"] = json!("C1-2");
    second["ClientID"] = json!("C1");
    third["ClientID"] = json!("C1");
    let clients = json["clients"].as_array_mut().unwrap();
    clients.push(taken);
    clients.push(second);
    clients.push(third);
    let before = snapshot(json);

    let proposals = propose_fixes(&before, &validate(&before));
    let after = apply_fixes(&before, &proposals);
    let ids: Vec<String> = after.clients.iter().filter_map(EntityRecord::id).collect();

    assert_eq!(ids, vec!["C1", "C1-2", "C1-3", "C1-4"]);
    assert!(validate(&after).is_valid);
}

#[test]
fn test_unknown_references_are_removed() {
    let before = clean_with("clients", 0, "RequestedTaskIDs", json!("T8, T1,T9"));
    let proposals = propose_fixes(&before, &validate(&before));

    assert_eq!(proposals.len(), 2);
    let after = apply_fixes(&before, &proposals);

    assert_eq!(
        after.clients[0].requested_task_ids,
        Some(FieldValue::text("T1"))
    );
    assert!(validate(&after).is_valid);
}

#[test]
fn test_malformed_slots_are_salvaged() {
    let before = clean_with("workers", 0, "AvailableSlots", json!("[1, \"x\", 3]"));
    let proposals = propose_fixes(&before, &validate(&before));

    let slots = proposals
        .iter()
        .find(|p| p.field == "AvailableSlots")
        .unwrap();
    let after = apply_fix(&before, slots);

    assert_eq!(
        after.workers[0].available_slots,
        Some(FieldValue::numbers([1, 3]))
    );
}

#[test]
fn test_overload_lowers_max_load() {
    let before = clean_with("workers", 0, "MaxLoadPerPhase", json!(5));
    let proposals = propose_fixes(&before, &validate(&before));

    let after = apply_fixes(&before, &proposals);
    assert_eq!(
        after.workers[0].max_load_per_phase,
        Some(FieldValue::from(3_i64))
    );
}

#[test]
fn test_max_load_is_never_lowered_to_zero() {
    let before = clean_with("workers", 0, "AvailableSlots", json!([]));
    let proposals = propose_fixes(&before, &validate(&before));

    assert!(proposals.iter().all(|p| p.field != "MaxLoadPerPhase"));
    let after = apply_fixes(&before, &proposals);
    assert_eq!(after.workers[0].max_load_per_phase, Some(FieldValue::from(2_i64)));
}

#[test]
fn test_unfixable_issues_have_no_proposal() {
    let before = clean_with("clients", 0, "AttributesJSON", json!("{oops"));
    let result = validate(&before);

    assert_eq!(result.errors.len(), 1);
    assert!(propose_fixes(&before, &result).is_empty());
}

#[test]
fn test_proposal_for_missing_row_leaves_snapshot_unchanged() {
    let before = clean_with("clients", 0, "PriorityLevel", json!(0));
    let mut proposal = propose_fixes(&before, &validate(&before)).remove(0);
    proposal.row_index = 42;

    assert_eq!(apply_fix(&before, &proposal), before);
}

#[test]
fn test_clean_snapshot_has_nothing_to_fix() {
    let snapshot = clean_snapshot();
    assert!(propose_fixes(&snapshot, &validate(&snapshot)).is_empty());
}
