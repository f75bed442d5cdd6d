//! Version-tagged validation tests

use std::sync::Arc;

use awb_domain::{Client, FieldValue, Snapshot};
use awb_infrastructure::LatestValidation;
use awb_validate::ValidationResult;

fn duplicate_clients() -> Snapshot {
    let client = |id: &str| Client {
        client_id: Some(FieldValue::text(id)),
        client_name: Some(FieldValue::text("Acme")),
        priority_level: Some(FieldValue::from(3_i64)),
        requested_task_ids: Some(FieldValue::text("")),
        group_tag: Some(FieldValue::text("GroupA")),
        ..Client::default()
    };
    Snapshot::new(vec![client("C1"), client("C1")], vec![], vec![])
}

#[test]
fn test_versions_increase() {
    let latest = LatestValidation::new();
    let first = latest.next_version();
    let second = latest.next_version();
    assert!(second > first);
    assert_eq!(first.get() + 1, second.get());
}

#[test]
fn test_stale_result_is_discarded() {
    let latest = LatestValidation::new();
    let old = latest.next_version();
    let new = latest.next_version();

    assert!(latest.publish(new, ValidationResult::from_issues(Vec::new())));
    assert!(!latest.publish(old, ValidationResult::from_issues(Vec::new())));

    let (held, _) = latest.latest().unwrap();
    assert_eq!(held, new);
}

#[test]
fn test_newer_result_replaces_older() {
    let latest = LatestValidation::new();
    let old = latest.next_version();
    let new = latest.next_version();

    assert!(latest.publish(old, ValidationResult::from_issues(Vec::new())));
    assert!(latest.publish(new, ValidationResult::from_issues(Vec::new())));
    assert_eq!(latest.latest().unwrap().0, new);
}

#[tokio::test]
async fn test_validate_publishes_result() {
    let latest = LatestValidation::new();

    let result = latest.validate(Arc::new(duplicate_clients())).await.unwrap();

    assert!(!result.is_valid);
    assert_eq!(result.errors[0].row_index, 1);
    assert!(latest.latest().is_some());
}
