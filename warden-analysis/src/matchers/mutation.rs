//! Required-decorator-if-mutating matcher: a two-part heuristic gate.
//! A function must carry the governance decorator only when it both
//! accepts a mutating-handle parameter and calls a mutating verb on
//! something in its body.

use tree_sitter::Node;

use crate::syntax::{descendants, matches_disallowed, node_text, resolve_dotted_name};

use super::types::{MatchViolation, MutatingDecoratorSpec};

/// Evaluate the gate over every function in the module.
///
/// Functions under an exempt path prefix are skipped entirely, regardless
/// of parameters or body.
pub fn required_decorator_if_mutating(
    root: Node,
    source: &str,
    file_path: &str,
    spec: &MutatingDecoratorSpec,
) -> Vec<MatchViolation> {
    let normalized = file_path.replace('\\', "/");
    if spec
        .exempt_prefixes
        .iter()
        .any(|prefix| normalized.starts_with(prefix.as_str()))
    {
        return Vec::new();
    }

    let mut violations = Vec::new();
    for node in descendants(root) {
        if node.kind() != "function_definition" {
            continue;
        }

        let Some(mutating_param) = first_mutating_param(node, source, spec) else {
            continue;
        };
        if !body_calls_mutating_verb(node, source, spec) {
            continue;
        }
        if has_decorator(node, source, &spec.decorator) {
            continue;
        }

        let name = node
            .child_by_field_name("name")
            .map(|n| node_text(n, source).to_string())
            .unwrap_or_else(|| "<anonymous>".to_string());
        violations.push(MatchViolation::new(
            format!(
                "function `{}` mutates through `{}` but lacks the `@{}` decorator",
                name, mutating_param, spec.decorator
            ),
            node.start_position().row as u32 + 1,
        ));
    }
    violations
}

/// First parameter whose name is in the mutating-handle set.
fn first_mutating_param(
    function: Node,
    source: &str,
    spec: &MutatingDecoratorSpec,
) -> Option<String> {
    let params = function.child_by_field_name("parameters")?;
    let mut cursor = params.walk();
    for param in params.named_children(&mut cursor) {
        let name = match param.kind() {
            "identifier" => Some(node_text(param, source)),
            "typed_parameter" => param
                .named_child(0)
                .filter(|n| n.kind() == "identifier")
                .map(|n| node_text(n, source)),
            "default_parameter" | "typed_default_parameter" => param
                .child_by_field_name("name")
                .map(|n| node_text(n, source)),
            _ => None,
        };
        if let Some(name) = name {
            if spec.mutating_params.contains(name) {
                return Some(name.to_string());
            }
        }
    }
    None
}

/// Whether the function body calls a method whose name is a mutating verb.
fn body_calls_mutating_verb(function: Node, source: &str, spec: &MutatingDecoratorSpec) -> bool {
    let Some(body) = function.child_by_field_name("body") else {
        return false;
    };
    descendants(body).into_iter().any(|node| {
        if node.kind() != "call" {
            return false;
        }
        node.child_by_field_name("function")
            .filter(|f| f.kind() == "attribute")
            .and_then(|f| f.child_by_field_name("attribute"))
            .is_some_and(|attr| spec.mutating_verbs.contains(node_text(attr, source)))
    })
}

/// Whether the function's decorator list contains the named decorator.
fn has_decorator(function: Node, source: &str, decorator: &str) -> bool {
    let Some(parent) = function.parent() else {
        return false;
    };
    if parent.kind() != "decorated_definition" {
        return false;
    }
    let mut cursor = parent.walk();
    let result = parent.children(&mut cursor).any(|child| {
        if child.kind() != "decorator" {
            return false;
        }
        let Some(expr) = child.named_child(0) else {
            return false;
        };
        let name = match expr.kind() {
            "call" => expr
                .child_by_field_name("function")
                .and_then(|f| resolve_dotted_name(f, source)),
            _ => resolve_dotted_name(expr, source),
        };
        name.is_some_and(|n| matches_disallowed(&n, std::slice::from_ref(&decorator.to_string())))
    });
    result
}
