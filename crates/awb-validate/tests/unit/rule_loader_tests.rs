//! Unit tests for rule file loading and manifest writing

use crate::fixtures::{co_run, load_limit};
use awb_domain::rules::RuleKind;
use awb_validate::rules::{RuleFileFormat, RuleFileLoader, generate_rule_set, parse_rules};
use std::path::Path;
use tempfile::TempDir;

const YAML_RULES: &str = r"
- id: r1
  name: Pair onboarding
  type: coRun
  tasks: [T1, T2]
- id: r2
  name: Cap group A
  type: loadLimit
  workerGroup: GroupA
  maxSlotsPerPhase: 2
  priority: 80
";

#[test]
fn test_yaml_list_loads() {
    let rules = parse_rules(YAML_RULES, RuleFileFormat::Yaml, "inline").unwrap();

    assert_eq!(rules.len(), 2);
    assert!(rules[0].enabled);
    assert_eq!(rules[0].priority, 50);
    assert_eq!(rules[1].priority, 80);
    assert!(matches!(
        rules[1].kind,
        RuleKind::LoadLimit {
            max_slots_per_phase: 2,
            ..
        }
    ));
}

#[test]
fn test_json_document_with_rules_key_loads() {
    let json = r#"{"version": "1.0", "rules": [
        {"id": "r1", "name": "Window", "type": "phaseWindow", "taskId": "T1", "allowedPhases": [1, 2]}
    ]}"#;

    let rules = parse_rules(json, RuleFileFormat::Json, "inline").unwrap();

    assert_eq!(rules.len(), 1);
    assert!(matches!(rules[0].kind, RuleKind::PhaseWindow { strict: true, .. }));
}

#[test]
fn test_unknown_rule_type_is_a_parse_error() {
    let err = parse_rules("[{\"id\": \"r1\", \"name\": \"x\", \"type\": \"magic\"}]", RuleFileFormat::Json, "bad.json")
        .unwrap_err();
    assert!(err.to_string().contains("bad.json"));
}

#[test]
fn test_scalar_document_is_rejected() {
    assert!(parse_rules("42", RuleFileFormat::Json, "inline").is_err());
}

#[test]
fn test_format_from_extension() {
    assert_eq!(
        RuleFileFormat::from_path(Path::new("rules.YML")).unwrap(),
        RuleFileFormat::Yaml
    );
    assert!(RuleFileFormat::from_path(Path::new("rules.txt")).is_err());
}

#[test]
fn test_manifest_written_and_read_back() {
    let dir = TempDir::new().unwrap();
    let loader = RuleFileLoader::new(dir.path());
    let manifest = generate_rule_set(&[
        co_run("r1", "Pair", &["T1", "T2"]),
        load_limit("r2", "Cap", "G", 2).with_priority(70),
    ]);

    loader
        .write_manifest(Path::new("manifest.yaml"), &manifest)
        .unwrap();
    let rules = loader.load_file(Path::new("manifest.yaml")).unwrap();

    assert_eq!(rules, manifest.rules);
}

#[test]
fn test_directory_loads_in_file_name_order() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("b.yaml"), YAML_RULES).unwrap();
    std::fs::write(
        dir.path().join("a.json"),
        r#"[{"id": "r0", "name": "First", "type": "coRun", "tasks": ["T3", "T4"]}]"#,
    )
    .unwrap();
    std::fs::write(dir.path().join("notes.txt"), "ignored").unwrap();

    let rules = RuleFileLoader::new(dir.path()).load_dir(Path::new(".")).unwrap();
    let ids: Vec<&str> = rules.iter().map(|r| r.id.as_str()).collect();

    assert_eq!(ids, vec!["r0", "r1", "r2"]);
}

#[test]
fn test_missing_file_is_io_error() {
    let dir = TempDir::new().unwrap();
    let err = RuleFileLoader::new(dir.path())
        .load_file(Path::new("absent.json"))
        .unwrap_err();
    assert!(err.to_string().contains("absent.json"));
}
