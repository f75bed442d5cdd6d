//! Configuration loading tests

use awb_infrastructure::config::{
    AppConfig, ConfigLoader, ReportFormat, validate_app_config,
};
use awb_infrastructure::constants::{DEFAULT_ADVISOR_TIMEOUT_SECS, DEFAULT_LOG_LEVEL};
use std::fs;

/// Loader that ignores the real environment
fn isolated_loader() -> ConfigLoader {
    ConfigLoader::new().with_env_prefix("AWB_UNIT_TEST_UNSET")
}

#[test]
fn test_defaults_without_file() {
    let dir = tempfile::tempdir().unwrap();
    let config = isolated_loader()
        .with_config_path(dir.path().join("missing.toml"))
        .load()
        .unwrap();

    assert_eq!(config, AppConfig::default());
    assert_eq!(config.logging.level, DEFAULT_LOG_LEVEL);
    assert!(!config.advisor.enabled);
    assert_eq!(config.advisor.timeout_secs, DEFAULT_ADVISOR_TIMEOUT_SECS);
    assert_eq!(config.report.format, ReportFormat::Human);
}

#[test]
fn test_source_path_reports_explicit_file_even_when_missing() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("missing.toml");
    let loader = isolated_loader().with_config_path(&missing);

    assert_eq!(loader.source_path(), Some(missing.clone()));
    assert!(loader.load().is_ok());
    assert!(!missing.exists());
}

#[test]
fn test_toml_file_overrides_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("awb.toml");
    fs::write(
        &path,
        r#"
[logging]
level = "debug"
json_format = true

[report]
format = "json"
fail_on_warnings = true
"#,
    )
    .unwrap();

    let config = isolated_loader().with_config_path(&path).load().unwrap();

    assert_eq!(config.logging.level, "debug");
    assert!(config.logging.json_format);
    assert_eq!(config.report.format, ReportFormat::Json);
    assert!(config.report.fail_on_warnings);
    assert_eq!(config.query.min_confidence, AppConfig::default().query.min_confidence);
}

#[test]
fn test_invalid_log_level_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("awb.toml");
    fs::write(&path, "[logging]\nlevel = \"loud\"\n").unwrap();

    let err = isolated_loader().with_config_path(&path).load().unwrap_err();
    assert!(err.to_string().contains("Invalid log level"));
}

#[test]
fn test_enabled_advisor_needs_api_key() {
    let mut config = AppConfig::default();
    config.advisor.enabled = true;
    let err = validate_app_config(&config).unwrap_err();
    assert!(err.to_string().contains("API key"));

    config.advisor.api_key = Some("sk-test".to_string());
    assert!(validate_app_config(&config).is_ok());

    config.advisor.timeout_secs = 0;
    assert!(validate_app_config(&config).is_err());
}

#[test]
fn test_confidence_threshold_is_bounded() {
    let mut config = AppConfig::default();
    config.query.min_confidence = 101;
    assert!(validate_app_config(&config).is_err());
}

#[test]
fn test_save_and_reload() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("saved.toml");
    let loader = isolated_loader().with_config_path(&path);

    let mut config = AppConfig::default();
    config.logging.level = "warn".to_string();
    config.query.min_confidence = 40;
    loader.save_to_file(&config, &path).unwrap();

    assert_eq!(loader.load().unwrap(), config);
    assert_eq!(loader.config_path(), Some(path.as_path()));
}
