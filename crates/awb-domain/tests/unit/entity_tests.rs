//! Unit tests for entity rows and the snapshot

use awb_domain::entities::{Client, EntityRecord, Snapshot, Task, Worker};
use awb_domain::{EntityType, FieldValue};

#[test]
fn test_client_columns_follow_declaration_order() {
    let client: Client = serde_json::from_str(
        r#"{"GroupTag": "A", "ClientID": "C1", "Region": "EU", "ClientName": "Acme"}"#,
    )
    .unwrap();

    assert_eq!(
        client.columns(),
        vec!["ClientID", "ClientName", "GroupTag", "Region"]
    );
    assert_eq!(client.extra.get("Region"), Some(&FieldValue::text("EU")));
}

#[test]
fn test_explicit_null_is_a_present_column() {
    let worker: Worker =
        serde_json::from_str(r#"{"WorkerID": "W1", "AvailableSlots": null}"#).unwrap();

    assert_eq!(worker.available_slots, Some(FieldValue::Null));
    assert!(worker.columns().contains(&"AvailableSlots"));
    assert!(worker.skills.is_none());
}

#[test]
fn test_numeric_id_renders_as_text() {
    let task: Task = serde_json::from_str(r#"{"TaskID": 17}"#).unwrap();
    assert_eq!(task.id().as_deref(), Some("17"));
}

#[test]
fn test_blank_id_is_none() {
    let task: Task = serde_json::from_str(r#"{"TaskID": "   "}"#).unwrap();
    assert!(task.id().is_none());
}

#[test]
fn test_set_and_clear_field() {
    let mut task = Task::default();
    task.set_field("Duration", FieldValue::from(3_i64));
    task.set_field("Owner", FieldValue::text("ops"));

    assert_eq!(task.duration, Some(FieldValue::Number(3.0)));
    assert_eq!(task.field("Owner"), Some(&FieldValue::text("ops")));

    task.clear_field("Owner");
    assert!(task.field("Owner").is_none());
}

#[test]
fn test_required_columns_exclude_attributes() {
    assert!(!Client::REQUIRED.contains(&"AttributesJSON"));
    assert!(Client::COLUMNS.contains(&"AttributesJSON"));
    assert_eq!(Worker::ENTITY, EntityType::Workers);
}

#[test]
fn test_snapshot_round_trips_integral_numbers() {
    let snapshot: Snapshot = serde_json::from_str(
        r#"{"tasks": [{"TaskID": "T1", "Duration": 2, "PreferredPhases": "1-3"}]}"#,
    )
    .unwrap();
    let json = serde_json::to_string(&snapshot).unwrap();

    assert!(json.contains(r#""Duration":2"#));
    assert!(json.contains(r#""PreferredPhases":"1-3""#));
    assert_eq!(snapshot.task_ids(), vec!["T1".to_string()]);
    assert_eq!(snapshot.len_of(EntityType::Clients), 0);
}

#[test]
fn test_search_text_is_lowercase() {
    let worker: Worker =
        serde_json::from_str(r#"{"WorkerID": "W1", "Skills": ["Rust", "SQL"]}"#).unwrap();
    let text = worker.search_text();

    assert!(text.contains("w1"));
    assert!(text.contains("rust"));
}
