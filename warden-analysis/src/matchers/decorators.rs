//! Decorator matchers: forbidden decorators and required-keyword-argument
//! completeness on a named decorator.

use tree_sitter::Node;

use crate::syntax::{descendants, matches_disallowed, node_text, resolve_dotted_name};

use super::types::{DecoratorArgsSpec, ForbiddenDecoratorSpec, MatchViolation};

/// Resolve the dotted name of a decorator expression, accepting both the
/// bare form (`@audit.traced`) and the call form (`@audit.traced(...)`).
fn decorator_name(decorator: Node, source: &str) -> Option<String> {
    let expr = decorator.named_child(0)?;
    match expr.kind() {
        "call" => {
            let function = expr.child_by_field_name("function")?;
            resolve_dotted_name(function, source)
        }
        _ => resolve_dotted_name(expr, source),
    }
}

/// Flag any definition whose decorator list contains a forbidden name.
pub fn forbidden_decorators(
    root: Node,
    source: &str,
    spec: &ForbiddenDecoratorSpec,
) -> Vec<MatchViolation> {
    let mut violations = Vec::new();
    for node in descendants(root) {
        if node.kind() != "decorator" {
            continue;
        }
        let Some(name) = decorator_name(node, source) else {
            continue;
        };
        if matches_disallowed(&name, &spec.forbidden) {
            violations.push(MatchViolation::new(
                format!("definition uses forbidden decorator `@{name}`"),
                node.start_position().row as u32 + 1,
            ));
        }
    }
    violations
}

/// For a named decorator invoked as a call, every required keyword
/// argument must be present; the missing ones are named individually.
pub fn decorator_argument_completeness(
    root: Node,
    source: &str,
    spec: &DecoratorArgsSpec,
) -> Vec<MatchViolation> {
    let mut violations = Vec::new();
    for node in descendants(root) {
        if node.kind() != "decorator" {
            continue;
        }
        let Some(expr) = node.named_child(0) else {
            continue;
        };
        // Only the call form carries arguments to validate.
        if expr.kind() != "call" {
            continue;
        }
        let Some(function) = expr.child_by_field_name("function") else {
            continue;
        };
        let Some(name) = resolve_dotted_name(function, source) else {
            continue;
        };
        if !matches_disallowed(&name, std::slice::from_ref(&spec.decorator)) {
            continue;
        }

        let present: Vec<String> = expr
            .child_by_field_name("arguments")
            .map(|args| {
                let mut cursor = args.walk();
                args.named_children(&mut cursor)
                    .filter(|a| a.kind() == "keyword_argument")
                    .filter_map(|a| a.child_by_field_name("name"))
                    .map(|n| node_text(n, source).to_string())
                    .collect()
            })
            .unwrap_or_default();

        let mut missing: Vec<&str> = spec
            .required_args
            .iter()
            .filter(|required| !present.iter().any(|p| p == *required))
            .map(|s| s.as_str())
            .collect();
        missing.sort_unstable();

        if !missing.is_empty() {
            violations.push(MatchViolation::new(
                format!(
                    "decorator `@{}` is missing required arguments: {}",
                    name,
                    missing.join(", ")
                ),
                node.start_position().row as u32 + 1,
            ));
        }
    }
    violations
}
