//! End-to-end pipeline scenarios over a fixture project tree.

use std::path::Path;

use warden_audit::pipeline::AuditPipeline;
use warden_audit::reconcile::CoverageStatus;
use warden_core::config::WardenConfig;

fn write(root: &Path, rel: &str, content: &str) {
    let path = root.join(rel);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).unwrap();
    }
    std::fs::write(path, content).unwrap();
}

fn config() -> WardenConfig {
    WardenConfig::from_toml(
        r#"
[policies]
paths = ["policies/*.yaml"]
"#,
    )
    .unwrap()
}

const DECLARED_RULE: &str = r#"
rules:
  - id: x.y
    statement: "Every mutation must be audited"
    severity: warn
"#;

#[tokio::test]
async fn scenario_empty_project() {
    let dir = tempfile::TempDir::new().unwrap();
    let pipeline = AuditPipeline::new(dir.path(), config());
    let outcome = pipeline.run().await.unwrap();

    assert_eq!(outcome.map.summary.rules_total, 0);
    assert_eq!(outcome.map.summary.execution_rate, 100.0);
    assert!(outcome.gaps.is_empty());

    let report = std::fs::read_to_string(&outcome.paths.report).unwrap();
    assert!(report.contains("no enforced rules yet"));
    assert!(report.contains("no gaps detected"));
}

#[tokio::test]
async fn scenario_declared_only_rule_appears_in_gaps() {
    let dir = tempfile::TempDir::new().unwrap();
    write(dir.path(), "policies/governance.yaml", DECLARED_RULE);

    let pipeline = AuditPipeline::new(dir.path(), config());
    let outcome = pipeline.run().await.unwrap();

    assert_eq!(outcome.map.summary.rules_total, 1);
    assert_eq!(
        outcome.map.entries[0].coverage_status,
        CoverageStatus::DeclaredOnly
    );
    assert_eq!(outcome.gaps.len(), 1);
    assert_eq!(outcome.gaps[0].rule_id, "x.y");
    assert_eq!(outcome.gaps[0].severity.as_str(), "warn");
}

#[tokio::test]
async fn scenario_execution_evidence_flips_rule_to_enforced() {
    let dir = tempfile::TempDir::new().unwrap();
    write(dir.path(), "policies/governance.yaml", DECLARED_RULE);
    write(
        dir.path(),
        ".warden/executed_checks.json",
        r#"{"executed_checks": ["x.y"]}"#,
    );

    let pipeline = AuditPipeline::new(dir.path(), config());
    let outcome = pipeline.run().await.unwrap();

    assert_eq!(
        outcome.map.entries[0].coverage_status,
        CoverageStatus::Enforced
    );
    assert!(outcome.gaps.is_empty());

    let report = std::fs::read_to_string(&outcome.paths.report).unwrap();
    assert!(report.contains("x.y — policies/governance.yaml"));
}

#[tokio::test]
async fn scenario_threshold_breach_emits_error_finding() {
    let dir = tempfile::TempDir::new().unwrap();
    write(
        dir.path(),
        "policies/coverage.yaml",
        r#"
rules:
  - id: core.coverage
    statement: "Core must be covered"
    severity: error
    scope:
      - "src/core/** >= 85%"
"#,
    );
    write(
        dir.path(),
        "coverage.json",
        r#"{"files": {
            "src/core/engine.py": {"summary": {"num_statements": 120, "covered_lines": 90}},
            "src/core/util.py": {"summary": {"num_statements": 80, "covered_lines": 60}}
        }}"#,
    );

    let pipeline = AuditPipeline::new(dir.path(), config());
    let outcome = pipeline.run().await.unwrap();

    let breach = outcome
        .findings
        .iter()
        .find(|f| f.check_id == "coverage_threshold")
        .expect("threshold finding");
    assert!(breach.message.contains("current=75.0, required=85.0"));
}

#[tokio::test]
async fn rerun_on_unchanged_inputs_is_idempotent() {
    let dir = tempfile::TempDir::new().unwrap();
    write(dir.path(), "policies/governance.yaml", DECLARED_RULE);
    write(
        dir.path(),
        "policies/links.yaml.doc",
        "ignored: not matched by the policy glob",
    );

    let pipeline = AuditPipeline::new(dir.path(), config());
    let first = pipeline.run().await.unwrap();
    // The second run replaces the first run's artifacts; the integrity
    // guard verifies them on the way.
    let second = pipeline.run().await.unwrap();

    let statuses = |outcome: &warden_audit::pipeline::RunOutcome| {
        outcome
            .map
            .entries
            .iter()
            .map(|r| (r.rule.rule_id.clone(), r.coverage_status))
            .collect::<Vec<_>>()
    };
    assert_eq!(statuses(&first), statuses(&second));
}

#[tokio::test]
async fn unparseable_policy_becomes_error_finding_and_run_continues() {
    let dir = tempfile::TempDir::new().unwrap();
    write(dir.path(), "policies/broken.yaml", "rules:\n  - id: [unclosed\n");
    write(dir.path(), "policies/good.yaml", DECLARED_RULE);

    let pipeline = AuditPipeline::new(dir.path(), config());
    let outcome = pipeline.run().await.unwrap();

    // The good policy still contributes its rule.
    assert_eq!(outcome.map.summary.rules_total, 1);
    assert!(outcome
        .findings
        .iter()
        .any(|f| f.check_id == "configuration_error"
            && f.file_path == "policies/broken.yaml"));

    let report = std::fs::read_to_string(&outcome.paths.report).unwrap();
    assert!(report.contains("Unparseable documents"));
    assert!(report.contains("policies/broken.yaml"));
}

#[tokio::test]
async fn syntax_error_in_source_is_file_scoped_and_non_fatal() {
    let dir = tempfile::TempDir::new().unwrap();
    write(dir.path(), "policies/governance.yaml", DECLARED_RULE);
    write(dir.path(), "src/broken.py", "def broken(:\n    pass\n");
    write(dir.path(), "src/fine.py", "x = 1\n");

    let pipeline = AuditPipeline::new(dir.path(), config());
    let outcome = pipeline.run().await.unwrap();

    let syntax = outcome
        .findings
        .iter()
        .find(|f| f.check_id == "syntax_error")
        .expect("syntax_error finding");
    assert_eq!(syntax.file_path, "src/broken.py");
}

#[tokio::test]
async fn machine_checkable_rule_produces_check_findings() {
    let dir = tempfile::TempDir::new().unwrap();
    write(
        dir.path(),
        "policies/imports.yaml",
        r#"
rules:
  - id: no.pickle
    statement: "pickle is forbidden outside trusted code"
    severity: error
    scope:
      - "src/**"
    check:
      engine: forbidden_imports
      params:
        modules: ["pickle"]
"#,
    );
    write(dir.path(), "src/core/db.py", "import pickle\n");

    let pipeline = AuditPipeline::new(dir.path(), config());
    let outcome = pipeline.run().await.unwrap();

    let finding = outcome
        .findings
        .iter()
        .find(|f| f.check_id == "forbidden_imports")
        .expect("import finding");
    assert_eq!(finding.file_path, "src/core/db.py");

    // Implementable check with no link and no execution evidence.
    assert_eq!(
        outcome.map.entries[0].coverage_status,
        CoverageStatus::Implementable
    );
}

#[tokio::test]
async fn explicit_link_yields_partially_enforced() {
    let dir = tempfile::TempDir::new().unwrap();
    write(dir.path(), "policies/governance.yaml", DECLARED_RULE);
    write(
        dir.path(),
        "policies/enforcement_links.yaml",
        r#"
- policy: policies/governance.yaml
  rule_id: x.y
  enforcement:
    mechanism_id: ci-audit-gate
    check_id: audit-gate-1
    mode: blocking
    strength: strong
    evidence: ci/audit.json
"#,
    );

    let config = WardenConfig::from_toml(
        r#"
[policies]
paths = ["policies/governance.yaml"]

[coverage]
links_path = "policies/enforcement_links.yaml"
"#,
    )
    .unwrap();

    let pipeline = AuditPipeline::new(dir.path(), config);
    let outcome = pipeline.run().await.unwrap();

    let record = &outcome.map.entries[0];
    assert_eq!(record.coverage_status, CoverageStatus::PartiallyEnforced);
    assert_eq!(record.enforcement[0].mechanism_id, "ci-audit-gate");
    assert_eq!(record.enforcement[0].evidence_path.as_deref(), Some("ci/audit.json"));
}
