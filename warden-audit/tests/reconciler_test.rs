//! Tests for the evidence reconciler.

use rustc_hash::FxHashSet;

use warden_analysis::discovery::{CheckSpec, Rule, Severity};
use warden_audit::evidence::{ExecutionEvidence, ExplicitLink};
use warden_audit::reconcile::{CoverageStatus, EvidenceReconciler, Mechanism};

fn rule(rule_id: &str, severity: Severity, check: Option<CheckSpec>) -> Rule {
    Rule {
        policy_path: "policies/core.yaml".to_string(),
        rule_id: rule_id.to_string(),
        statement: "statement".to_string(),
        severity,
        scope: vec![],
        check,
    }
}

fn check(engine: &str) -> Option<CheckSpec> {
    Some(CheckSpec {
        engine: engine.to_string(),
        params: serde_yaml::Value::Null,
    })
}

fn link(rule_id: &str) -> ExplicitLink {
    ExplicitLink {
        policy: "policies/core.yaml".to_string(),
        rule_id: rule_id.to_string(),
        enforcement: Mechanism {
            mechanism_id: "ci-gate".to_string(),
            check_id: "gate-1".to_string(),
            mode: "blocking".to_string(),
            strength: "strong".to_string(),
            evidence_path: None,
        },
    }
}

fn executed(ids: &[&str]) -> ExecutionEvidence {
    ExecutionEvidence {
        executed: ids.iter().map(|s| s.to_string()).collect::<FxHashSet<_>>(),
        source_path: Some(".warden/executed_checks.json".to_string()),
    }
}

#[test]
fn default_classification_is_declared_only() {
    // No link, no execution evidence, non-implementable check.
    let rules = vec![rule("x.y", Severity::Warn, check("quantum_proof"))];
    let execution = ExecutionEvidence::default();
    let reconciler = EvidenceReconciler::new(&execution, &[], |_| false);
    let outcome = reconciler.reconcile(&rules);

    assert_eq!(outcome.records[0].coverage_status, CoverageStatus::DeclaredOnly);
    assert!(outcome.records[0].enforcement.is_empty());
}

#[test]
fn implementable_check_upgrades_from_declared_only() {
    let rules = vec![rule("x.y", Severity::Warn, check("forbidden_imports"))];
    let execution = ExecutionEvidence::default();
    let reconciler = EvidenceReconciler::new(&execution, &[], |_| true);
    let outcome = reconciler.reconcile(&rules);

    assert_eq!(outcome.records[0].coverage_status, CoverageStatus::Implementable);
}

#[test]
fn explicit_link_means_partially_enforced() {
    let rules = vec![rule("x.y", Severity::Error, None)];
    let execution = ExecutionEvidence::default();
    let links = vec![link("x.y")];
    let reconciler = EvidenceReconciler::new(&execution, &links, |_| true);
    let outcome = reconciler.reconcile(&rules);

    let record = &outcome.records[0];
    assert_eq!(record.coverage_status, CoverageStatus::PartiallyEnforced);
    assert_eq!(record.enforcement.len(), 1);
    assert_eq!(record.enforcement[0].mechanism_id, "ci-gate");
}

#[test]
fn execution_evidence_dominates_explicit_links() {
    let rules = vec![rule("x.y", Severity::Error, None)];
    let execution = executed(&["x.y"]);
    let links = vec![link("x.y")];
    let reconciler = EvidenceReconciler::new(&execution, &links, |_| false);
    let outcome = reconciler.reconcile(&rules);

    assert_eq!(outcome.records[0].coverage_status, CoverageStatus::Enforced);
}

#[test]
fn execution_without_link_backfills_provenance_mechanism() {
    let rules = vec![rule("x.y", Severity::Error, None)];
    let execution = executed(&["x.y"]);
    let reconciler = EvidenceReconciler::new(&execution, &[], |_| false);
    let outcome = reconciler.reconcile(&rules);

    let record = &outcome.records[0];
    assert_eq!(record.coverage_status, CoverageStatus::Enforced);
    assert_eq!(record.enforcement.len(), 1);
    assert_eq!(record.enforcement[0].mechanism_id, "execution-evidence");
    assert_eq!(
        record.enforcement[0].evidence_path.as_deref(),
        Some(".warden/executed_checks.json")
    );
}

#[test]
fn linked_mechanism_with_evidence_is_not_duplicated() {
    let mut evidence_link = link("x.y");
    evidence_link.enforcement.evidence_path = Some("ci/run-123.json".to_string());

    let rules = vec![rule("x.y", Severity::Error, None)];
    let execution = executed(&["x.y"]);
    let links = vec![evidence_link];
    let reconciler = EvidenceReconciler::new(&execution, &links, |_| false);
    let outcome = reconciler.reconcile(&rules);

    // The link already carries evidence provenance; no back-fill.
    assert_eq!(outcome.records[0].enforcement.len(), 1);
    assert_eq!(
        outcome.records[0].enforcement[0].evidence_path.as_deref(),
        Some("ci/run-123.json")
    );
}

#[test]
fn unclassifiable_rule_is_unknown_and_surfaced() {
    // No check, no recognized severity — insufficient shape.
    let rules = vec![rule("vague", Severity::Unknown, None)];
    let execution = ExecutionEvidence::default();
    let reconciler = EvidenceReconciler::new(&execution, &[], |_| true);
    let outcome = reconciler.reconcile(&rules);

    assert_eq!(outcome.records[0].coverage_status, CoverageStatus::Unknown);
    assert_eq!(outcome.unclassified.len(), 1);
    assert!(outcome.unclassified[0].contains("vague"));
}

#[test]
fn execution_evidence_dominates_even_for_shapeless_rules() {
    let rules = vec![rule("vague", Severity::Unknown, None)];
    let execution = executed(&["vague"]);
    let reconciler = EvidenceReconciler::new(&execution, &[], |_| false);
    let outcome = reconciler.reconcile(&rules);

    assert_eq!(outcome.records[0].coverage_status, CoverageStatus::Enforced);
    assert!(outcome.unclassified.is_empty());
}

#[test]
fn reconciliation_is_idempotent() {
    let rules = vec![
        rule("a", Severity::Error, check("forbidden_imports")),
        rule("b", Severity::Warn, None),
        rule("c", Severity::Unknown, None),
        rule("d", Severity::Info, None),
    ];
    let execution = executed(&["b"]);
    let links = vec![link("d")];
    let reconciler = EvidenceReconciler::new(&execution, &links, |_| true);

    let first = reconciler.reconcile(&rules);
    let second = reconciler.reconcile(&rules);

    let statuses = |outcome: &warden_audit::reconcile::ReconcileOutcome| {
        outcome
            .records
            .iter()
            .map(|r| (r.rule.rule_id.clone(), r.coverage_status))
            .collect::<Vec<_>>()
    };
    assert_eq!(statuses(&first), statuses(&second));
}

#[test]
fn status_ordering_matches_confidence_order() {
    assert!(CoverageStatus::Unknown < CoverageStatus::DeclaredOnly);
    assert!(CoverageStatus::DeclaredOnly < CoverageStatus::Implementable);
    assert!(CoverageStatus::Implementable < CoverageStatus::PartiallyEnforced);
    assert!(CoverageStatus::PartiallyEnforced < CoverageStatus::Enforced);
}
