//! Generic requirement validator — one parameterized matcher covering the
//! declarative check types: `returns_type`, `forbidden_calls`,
//! `required_calls`, `forbidden_imports`, and `decorator_args`.

use tree_sitter::Node;

use crate::syntax::{
    descendants, is_conditional_debug_guard, matches_disallowed, node_text, resolve_dotted_name,
};

use super::decorators::decorator_argument_completeness;
use super::types::{MatchViolation, RequirementSpec};

/// Evaluate a requirement spec against a module tree.
pub fn requirement_violations(
    root: Node,
    source: &str,
    spec: &RequirementSpec,
) -> Vec<MatchViolation> {
    match spec {
        RequirementSpec::ReturnsType { expected } => returns_type(root, source, expected),
        RequirementSpec::ForbiddenCalls { calls } => forbidden_calls(root, source, calls),
        RequirementSpec::RequiredCalls { calls } => required_calls(root, source, calls),
        RequirementSpec::ForbiddenImports { modules } => forbidden_imports(root, source, modules),
        RequirementSpec::DecoratorArgs(args_spec) => {
            decorator_argument_completeness(root, source, args_spec)
        }
    }
}

/// Declared return annotations must equal `expected`. A function without
/// an annotation is skipped silently.
fn returns_type(root: Node, source: &str, expected: &str) -> Vec<MatchViolation> {
    let mut violations = Vec::new();
    for node in descendants(root) {
        if node.kind() != "function_definition" {
            continue;
        }
        let Some(return_type) = node.child_by_field_name("return_type") else {
            continue;
        };
        let actual = node_text(return_type, source).trim().to_string();
        if actual != expected {
            let name = node
                .child_by_field_name("name")
                .map(|n| node_text(n, source).to_string())
                .unwrap_or_else(|| "<anonymous>".to_string());
            violations.push(MatchViolation::new(
                format!(
                    "function `{name}` declares return type `{actual}`, expected `{expected}`"
                ),
                node.start_position().row as u32 + 1,
            ));
        }
    }
    violations
}

fn forbidden_calls(root: Node, source: &str, calls: &[String]) -> Vec<MatchViolation> {
    let mut violations = Vec::new();
    for node in descendants(root) {
        if node.kind() != "call" {
            continue;
        }
        let Some(function) = node.child_by_field_name("function") else {
            continue;
        };
        let Some(name) = resolve_dotted_name(function, source) else {
            continue;
        };
        if matches_disallowed(&name, calls) {
            violations.push(MatchViolation::new(
                format!("forbidden call `{name}`"),
                node.start_position().row as u32 + 1,
            ));
        }
    }
    violations
}

/// Reports all missing required call names in a single violation, sorted.
fn required_calls(root: Node, source: &str, calls: &[String]) -> Vec<MatchViolation> {
    let present: Vec<String> = descendants(root)
        .into_iter()
        .filter(|n| n.kind() == "call")
        .filter_map(|n| n.child_by_field_name("function"))
        .filter_map(|f| resolve_dotted_name(f, source))
        .collect();

    let mut missing: Vec<&str> = calls
        .iter()
        .filter(|required| {
            !present
                .iter()
                .any(|name| matches_disallowed(name, std::slice::from_ref(*required)))
        })
        .map(|s| s.as_str())
        .collect();
    missing.sort_unstable();

    if missing.is_empty() {
        Vec::new()
    } else {
        vec![MatchViolation::file_scoped(format!(
            "required calls missing: {}",
            missing.join(", ")
        ))]
    }
}

/// Covers both plain and from-style imports, reporting the specific
/// forbidden module. Imports under a `TYPE_CHECKING`-style guard are
/// exempt — they never execute at runtime.
fn forbidden_imports(root: Node, source: &str, modules: &[String]) -> Vec<MatchViolation> {
    let mut violations = Vec::new();
    for node in descendants(root) {
        let imported: Vec<String> = match node.kind() {
            "import_statement" => {
                let mut cursor = node.walk();
                node.named_children(&mut cursor)
                    .filter_map(|child| match child.kind() {
                        "dotted_name" => Some(node_text(child, source).to_string()),
                        "aliased_import" => child
                            .child_by_field_name("name")
                            .map(|n| node_text(n, source).to_string()),
                        _ => None,
                    })
                    .collect()
            }
            "import_from_statement" => node
                .child_by_field_name("module_name")
                .map(|n| vec![node_text(n, source).to_string()])
                .unwrap_or_default(),
            _ => continue,
        };

        if imported.is_empty() || under_debug_guard(node, source) {
            continue;
        }

        for module in imported {
            let matched = modules
                .iter()
                .find(|f| module == **f || module.starts_with(&format!("{f}.")));
            if matched.is_some() {
                violations.push(MatchViolation::new(
                    format!("forbidden import `{module}`"),
                    node.start_position().row as u32 + 1,
                ));
            }
        }
    }
    violations
}

/// Whether a node sits inside an `if TYPE_CHECKING:` style block.
fn under_debug_guard(node: Node, source: &str) -> bool {
    let mut current = node.parent();
    while let Some(parent) = current {
        if parent.kind() == "if_statement" {
            if let Some(condition) = parent.child_by_field_name("condition") {
                if is_conditional_debug_guard(condition, source) {
                    return true;
                }
            }
        }
        current = parent.parent();
    }
    false
}
