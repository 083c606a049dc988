//! Tests for the Warden configuration system.

use std::sync::Mutex;

use warden_core::config::{CliOverrides, WardenConfig};
use warden_core::errors::ConfigError;

/// Global mutex to serialize tests that modify environment variables.
static ENV_MUTEX: Mutex<()> = Mutex::new(());

fn tempdir() -> tempfile::TempDir {
    tempfile::TempDir::new().unwrap()
}

/// Clear all WARDEN_ env vars to prevent cross-test contamination.
fn clear_warden_env_vars() {
    for key in [
        "WARDEN_SCAN_MAX_FILE_SIZE",
        "WARDEN_REPORT_OUTPUT_DIR",
        "WARDEN_REPORT_TOP_GAPS",
        "WARDEN_COVERAGE_EVIDENCE_PATH",
        "WARDEN_RULES_ID_WINDOW",
    ] {
        std::env::remove_var(key);
    }
}

#[test]
fn test_layered_resolution() {
    let _lock = ENV_MUTEX.lock().unwrap();
    clear_warden_env_vars();

    let dir = tempdir();
    std::fs::write(
        dir.path().join("warden.toml"),
        r#"
[report]
top_gaps = 5
output_dir = "audit-out"

[scan]
max_file_size = 1_000_000
"#,
    )
    .unwrap();

    std::env::set_var("WARDEN_SCAN_MAX_FILE_SIZE", "5000000");

    let cli = CliOverrides {
        top_gaps: Some(3),
        ..Default::default()
    };

    let config = WardenConfig::load(dir.path(), Some(&cli)).unwrap();

    // CLI overrides env and project for top_gaps
    assert_eq!(config.report.top_gaps, Some(3));
    // Env overrides project for max_file_size
    assert_eq!(config.scan.max_file_size, Some(5_000_000));
    // Project value survives where no higher layer touched it
    assert_eq!(config.report.output_dir.as_deref(), Some("audit-out"));

    clear_warden_env_vars();
}

#[test]
fn test_load_missing_file_falls_back_to_defaults() {
    let _lock = ENV_MUTEX.lock().unwrap();
    clear_warden_env_vars();

    let dir = tempdir();
    let config = WardenConfig::load(dir.path(), None).unwrap();

    assert_eq!(config.scan.effective_source_roots(), vec!["src".to_string()]);
    assert_eq!(config.rules.effective_id_window(), 8);
    assert_eq!(config.report.effective_output_dir(), ".warden");
    assert_eq!(config.report.effective_top_gaps(), 10);
}

#[test]
fn test_invalid_toml_is_a_parse_error() {
    let _lock = ENV_MUTEX.lock().unwrap();
    clear_warden_env_vars();

    let dir = tempdir();
    std::fs::write(dir.path().join("warden.toml"), "[scan\nmax_file_size = ").unwrap();

    let err = WardenConfig::load(dir.path(), None).unwrap_err();
    assert!(matches!(err, ConfigError::ParseError { .. }));
}

#[test]
fn test_validation_rejects_zero_window() {
    let config = WardenConfig::from_toml("[rules]\nid_window = 0").unwrap();
    let err = WardenConfig::validate(&config).unwrap_err();
    assert!(matches!(err, ConfigError::ValidationFailed { ref field, .. } if field == "rules.id_window"));
}

#[test]
fn test_unknown_keys_ignored() {
    let config = WardenConfig::from_toml("[future_section]\nsetting = true").unwrap();
    assert!(config.policies.paths.is_empty());
}

#[test]
fn test_roundtrip_to_toml() {
    let config = WardenConfig::from_toml(
        r#"
[rules]
forbidden_decorators = ["lru_cache"]
trusted_domains = ["tools.sandbox"]
"#,
    )
    .unwrap();

    let serialized = config.to_toml().unwrap();
    let reparsed = WardenConfig::from_toml(&serialized).unwrap();
    assert_eq!(reparsed.rules.forbidden_decorators, vec!["lru_cache".to_string()]);
    assert_eq!(reparsed.rules.trusted_domains, vec!["tools.sandbox".to_string()]);
}
