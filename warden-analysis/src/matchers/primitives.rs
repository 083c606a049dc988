//! Primitive-call matchers: forbidden dynamic-execution primitives with a
//! trust-zone exemption, and direct file-write calls that bypass the
//! governed mutation surface.

use tree_sitter::Node;

use crate::syntax::{descendants, domain_matches, matches_disallowed, node_text, resolve_dotted_name};

use super::types::{ForbiddenPrimitiveSpec, MatchViolation, WriteBypassSpec};

/// Flag calls to named primitives unless the containing file's domain is
/// trusted. The exemption is a trust zone, not a blanket allowance: only
/// the configured domains (and their children) may use the primitives.
pub fn forbidden_primitives(
    root: Node,
    source: &str,
    file_domain: &str,
    spec: &ForbiddenPrimitiveSpec,
) -> Vec<MatchViolation> {
    if domain_matches(file_domain, &spec.trusted_domains) {
        return Vec::new();
    }

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
        if matches_disallowed(&name, &spec.primitives) {
            violations.push(MatchViolation::new(
                format!("call to forbidden primitive `{name}` outside a trusted domain"),
                node.start_position().row as u32 + 1,
            ));
        }
    }
    violations
}

/// Flag direct write calls: raw `write`/`writelines` method calls and
/// `open(...)` in write or append mode.
pub fn direct_write_bypass(
    root: Node,
    source: &str,
    spec: &WriteBypassSpec,
) -> Vec<MatchViolation> {
    let mut violations = Vec::new();
    for node in descendants(root) {
        if node.kind() != "call" {
            continue;
        }
        let Some(function) = node.child_by_field_name("function") else {
            continue;
        };
        let line = node.start_position().row as u32 + 1;

        match function.kind() {
            "attribute" => {
                let Some(attr) = function.child_by_field_name("attribute") else {
                    continue;
                };
                let method = node_text(attr, source);
                if spec.write_methods.contains(method) {
                    violations.push(MatchViolation::new(
                        format!(
                            "direct `{method}` call bypasses the governed mutation surface"
                        ),
                        line,
                    ));
                }
            }
            "identifier" => {
                if node_text(function, source) != "open" {
                    continue;
                }
                if let Some(mode) = open_mode(node, source) {
                    if mode.contains('w') || mode.contains('a') || mode.contains('x') {
                        violations.push(MatchViolation::new(
                            format!(
                                "`open` in mode \"{mode}\" bypasses the governed mutation surface"
                            ),
                            line,
                        ));
                    }
                }
            }
            _ => {}
        }
    }
    violations
}

/// The mode argument of an `open(...)` call: second positional string
/// literal, or the `mode=` keyword argument.
fn open_mode(call: Node, source: &str) -> Option<String> {
    let args = call.child_by_field_name("arguments")?;
    let mut cursor = args.walk();
    let mut positional = 0usize;
    for arg in args.named_children(&mut cursor) {
        match arg.kind() {
            "keyword_argument" => {
                let name = arg.child_by_field_name("name")?;
                if node_text(name, source) == "mode" {
                    let value = arg.child_by_field_name("value")?;
                    return string_literal(value, source);
                }
            }
            "string" => {
                positional += 1;
                if positional == 2 {
                    return string_literal(arg, source);
                }
            }
            _ => {
                positional += 1;
            }
        }
    }
    None
}

/// The content of a string literal node, without quotes.
fn string_literal(node: Node, source: &str) -> Option<String> {
    if node.kind() != "string" {
        return None;
    }
    let text = node_text(node, source);
    Some(text.trim_matches(|c| c == '"' || c == '\'').to_string())
}
