//! Unit tests for FieldValue

use awb_domain::FieldValue;

#[test]
fn test_untagged_deserialization() {
    let values: Vec<FieldValue> =
        serde_json::from_str(r#"[null, true, 4, "text", [1, "a"], {"k": 1}]"#).unwrap();

    assert_eq!(values[0], FieldValue::Null);
    assert_eq!(values[1], FieldValue::Bool(true));
    assert_eq!(values[2], FieldValue::Number(4.0));
    assert_eq!(values[3], FieldValue::text("text"));
    assert!(matches!(values[4], FieldValue::List(ref items) if items.len() == 2));
    assert!(matches!(values[5], FieldValue::Object(_)));
}

#[test]
fn test_blank_detection() {
    assert!(FieldValue::Null.is_blank());
    assert!(FieldValue::text("  ").is_blank());
    assert!(!FieldValue::from(0_i64).is_blank());
}

#[test]
fn test_display_value() {
    assert_eq!(FieldValue::from(3_i64).display_value(), "3");
    assert_eq!(FieldValue::from(2.5).display_value(), "2.5");
    assert_eq!(FieldValue::numbers([1, 2]).display_value(), "[1,2]");
}

#[test]
fn test_from_json_value() {
    let value = FieldValue::from(serde_json::json!(["x", 2]));
    assert_eq!(
        value,
        FieldValue::List(vec![FieldValue::text("x"), FieldValue::Number(2.0)])
    );
}
