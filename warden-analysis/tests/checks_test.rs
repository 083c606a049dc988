//! Tests for enforcement checks: builder completeness, failure semantics,
//! the generic requirement method, and the async evidence lookup.

use std::path::{Path, PathBuf};

use warden_analysis::checks::{
    build_method, is_implementable, CheckContext, CheckMethod, ExecutionLogMethod,
    GenericRequirementMethod, RuleEnforcementCheck,
};
use warden_analysis::checks::method::AsyncEnforcementMethod;
use warden_analysis::discovery::{CheckSpec, Rule, Severity};
use warden_analysis::parsers::{ParsedModule, PythonParser};
use warden_core::config::WardenConfig;
use warden_core::errors::CheckError;

fn parse_module(rel_path: &str, source: &str) -> ParsedModule {
    PythonParser::new()
        .parse(source.to_string(), Path::new(rel_path), &["src".to_string()])
        .unwrap()
}

fn rule_with_check(rule_id: &str, engine: &str, params_yaml: &str) -> Rule {
    Rule {
        policy_path: "policies/core.yaml".to_string(),
        rule_id: rule_id.to_string(),
        statement: "test rule".to_string(),
        severity: Severity::Error,
        scope: vec![],
        check: Some(CheckSpec {
            engine: engine.to_string(),
            params: serde_yaml::from_str(params_yaml).unwrap(),
        }),
    }
}

fn context_with_modules(modules: Vec<ParsedModule>) -> CheckContext {
    let mut ctx = CheckContext::new(PathBuf::from("."), WardenConfig::default(), modules);
    ctx.insert_policy("policies/core.yaml", serde_yaml::Value::Null);
    ctx
}

#[test]
fn incomplete_binding_cannot_run() {
    let err = RuleEnforcementCheck::builder()
        .policy("policies/core.yaml")
        .complete()
        .unwrap_err();
    match err {
        CheckError::IncompleteBinding { missing } => {
            assert!(missing.contains("rule ids"));
            assert!(missing.contains("methods"));
        }
        other => panic!("expected IncompleteBinding, got {other:?}"),
    }
}

#[tokio::test]
async fn unavailable_policy_yields_exactly_one_error_finding() {
    let rule = rule_with_check("x.y", "forbidden_imports", "modules: [pickle]");
    let method = build_method(
        &rule,
        &WardenConfig::default().rules,
        &WardenConfig::default().coverage,
    )
    .unwrap();

    let check = RuleEnforcementCheck::builder()
        .policy("policies/missing.yaml")
        .rule(rule)
        .method(method)
        .complete()
        .unwrap();

    // Context has no policy loaded under that path.
    let ctx = context_with_modules(vec![]);
    let findings = check.run(&ctx).await;

    assert_eq!(findings.len(), 1, "exactly one finding: {findings:?}");
    assert_eq!(findings[0].severity, Severity::Error);
    assert!(findings[0].message.contains("x.y"));
    assert_eq!(findings[0].file_path, "policies/missing.yaml");
}

#[tokio::test]
async fn generic_method_scans_modules_in_scope() {
    let rule = Rule {
        scope: vec!["src/core/**".to_string()],
        ..rule_with_check("no.pickle", "forbidden_imports", "modules: [pickle]")
    };
    let method = GenericRequirementMethod::from_rule(&rule).unwrap();

    let ctx = context_with_modules(vec![
        parse_module("src/core/db.py", "import pickle\n"),
        // Outside the rule's scope; must not be scanned.
        parse_module("src/tools/cli.py", "import pickle\n"),
    ]);

    let check = RuleEnforcementCheck::builder()
        .policy("policies/core.yaml")
        .rule(rule)
        .method(CheckMethod::Sync(Box::new(method)))
        .complete()
        .unwrap();

    let findings = check.run(&ctx).await;
    assert_eq!(findings.len(), 1);
    assert_eq!(findings[0].file_path, "src/core/db.py");
    assert_eq!(findings[0].check_id, "forbidden_imports");
}

#[test]
fn unknown_engine_is_not_implementable() {
    let config = WardenConfig::default();
    let known = rule_with_check("a", "forbidden_imports", "modules: [pickle]");
    let unknown = rule_with_check("b", "quantum_proof", "{}");

    assert!(is_implementable(known.check.as_ref().unwrap(), &config.rules));
    assert!(!is_implementable(unknown.check.as_ref().unwrap(), &config.rules));
}

#[test]
fn builtin_engines_are_implementable_with_config_defaults() {
    let config = WardenConfig::default();
    for engine in [
        "stable_id_anchor",
        "forbidden_primitives",
        "required_decorator_if_mutating",
        "direct_write_bypass",
        "evidence_lookup",
    ] {
        let rule = rule_with_check("r", engine, "{}");
        assert!(
            is_implementable(rule.check.as_ref().unwrap(), &config.rules),
            "{engine} should be implementable with compiled defaults"
        );
    }
}

#[test]
fn malformed_params_are_not_implementable() {
    let config = WardenConfig::default();
    // returns_type without an expected type has nothing to validate.
    let rule = rule_with_check("r", "returns_type", "{}");
    assert!(!is_implementable(rule.check.as_ref().unwrap(), &config.rules));
}

#[tokio::test]
async fn evidence_lookup_passes_when_rule_executed() {
    let dir = tempfile::TempDir::new().unwrap();
    std::fs::write(
        dir.path().join("executed.json"),
        r#"{"executed_checks": ["x.y"]}"#,
    )
    .unwrap();

    let method = ExecutionLogMethod::new("executed.json");
    let mut ctx = CheckContext::new(
        dir.path().to_path_buf(),
        WardenConfig::default(),
        vec![],
    );
    ctx.insert_policy("policies/core.yaml", serde_yaml::Value::Null);

    let rule = rule_with_check("x.y", "evidence_lookup", "{}");
    let findings = method.verify(&ctx, &rule).await.unwrap();
    assert!(findings.is_empty());
}

#[tokio::test]
async fn evidence_lookup_flags_unexecuted_rule() {
    let dir = tempfile::TempDir::new().unwrap();
    std::fs::write(
        dir.path().join("executed.json"),
        r#"{"executed_rules": ["other.rule"]}"#,
    )
    .unwrap();

    let method = ExecutionLogMethod::new("executed.json");
    let ctx = CheckContext::new(dir.path().to_path_buf(), WardenConfig::default(), vec![]);

    let rule = rule_with_check("x.y", "evidence_lookup", "{}");
    let findings = method.verify(&ctx, &rule).await.unwrap();
    assert_eq!(findings.len(), 1);
    assert!(findings[0].message.contains("x.y"));
    assert_eq!(findings[0].evidence.as_deref(), Some("executed.json"));
}

#[tokio::test]
async fn unreadable_evidence_store_becomes_an_error_finding() {
    let dir = tempfile::TempDir::new().unwrap();
    let rule = rule_with_check("x.y", "evidence_lookup", "path: missing.json");
    let config = WardenConfig::default();
    let method = build_method(&rule, &config.rules, &config.coverage).unwrap();

    let mut ctx = CheckContext::new(dir.path().to_path_buf(), config, vec![]);
    ctx.insert_policy("policies/core.yaml", serde_yaml::Value::Null);

    let check = RuleEnforcementCheck::builder()
        .policy("policies/core.yaml")
        .rule(rule)
        .method(method)
        .complete()
        .unwrap();

    let findings = check.run(&ctx).await;
    assert_eq!(findings.len(), 1);
    assert_eq!(findings[0].severity, Severity::Error);
    assert!(findings[0].message.contains("could not evaluate"));
}
