//! Unit tests for field normalization

use awb_domain::FieldValue;
use awb_domain::normalize::{self, ListError};

#[test]
fn test_string_list_accepts_every_encoding() {
    let expected = vec!["T1".to_string(), "T2".to_string()];

    assert_eq!(normalize::string_list(&FieldValue::text("T1, T2,")), expected);
    assert_eq!(normalize::string_list(&FieldValue::text(r#"["T1","T2"]"#)), expected);
    assert_eq!(normalize::string_list(&FieldValue::texts(["T1", " T2 "])), expected);
    assert!(normalize::string_list(&FieldValue::Null).is_empty());
}

#[test]
fn test_skill_set_is_case_insensitive() {
    let skills = normalize::skill_set(&FieldValue::text("Rust, rust , SQL"));
    assert_eq!(skills.len(), 2);
    assert!(skills.contains("rust"));
    assert!(skills.contains("sql"));
}

#[test]
fn test_phase_list_native_and_encoded() {
    assert_eq!(normalize::phase_list(&FieldValue::numbers([1, 3])).unwrap(), vec![1, 3]);
    assert_eq!(normalize::phase_list(&FieldValue::text("[2,4]")).unwrap(), vec![2, 4]);
}

#[test]
fn test_phase_list_rejects_bad_input() {
    assert!(matches!(
        normalize::phase_list(&FieldValue::text("1,2")),
        Err(ListError::InvalidJson(_))
    ));
    assert_eq!(
        normalize::phase_list(&FieldValue::text("{\"a\":1}")),
        Err(ListError::NotAnArray("object".to_string()))
    );
    assert_eq!(
        normalize::phase_list(&FieldValue::text(r#"[1,"x"]"#)),
        Err(ListError::BadElement {
            index: 1,
            value: "x".to_string()
        })
    );
    assert!(normalize::phase_list(&FieldValue::numbers([0])).is_err());
    assert!(normalize::phase_list(&FieldValue::from(2_i64)).is_err());
}

#[test]
fn test_preferred_phases_encodings() {
    assert_eq!(normalize::preferred_phases(&FieldValue::text("1-3")).unwrap(), vec![1, 2, 3]);
    assert_eq!(normalize::preferred_phases(&FieldValue::text(" 2 ")).unwrap(), vec![2]);
    assert_eq!(normalize::preferred_phases(&FieldValue::from(4_i64)).unwrap(), vec![4]);
    assert_eq!(normalize::preferred_phases(&FieldValue::text("[1,5]")).unwrap(), vec![1, 5]);
    assert!(normalize::preferred_phases(&FieldValue::text("soon")).is_err());
    assert!(normalize::preferred_phases(&FieldValue::from(1.5)).is_err());
}

#[test]
fn test_number_and_integer() {
    assert_eq!(normalize::number(&FieldValue::text(" 7 ")), Some(7.0));
    assert_eq!(normalize::integer(&FieldValue::from(2.5)), None);
    assert_eq!(normalize::integer(&FieldValue::text("3")), Some(3));
    assert_eq!(normalize::number(&FieldValue::text("high")), None);
}

#[test]
fn test_elements() {
    assert_eq!(
        normalize::elements(&FieldValue::text("[1,2]")),
        Some(vec![FieldValue::Number(1.0), FieldValue::Number(2.0)])
    );
    assert!(normalize::elements(&FieldValue::text("1,2")).is_none());
}
