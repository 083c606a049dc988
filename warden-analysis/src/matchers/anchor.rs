//! Stable-id-anchor matcher: every public top-level definition must carry
//! an id marker in the fixed window of lines immediately above it — either
//! a UUID-shaped token or an explicit `ID:` line.

use std::sync::OnceLock;

use regex::Regex;
use tree_sitter::Node;

use crate::syntax::node_text;

use super::types::{AnchorSpec, MatchViolation};

fn uuid_pattern() -> &'static Regex {
    static UUID: OnceLock<Regex> = OnceLock::new();
    UUID.get_or_init(|| {
        Regex::new(
            r"[0-9a-fA-F]{8}-[0-9a-fA-F]{4}-[0-9a-fA-F]{4}-[0-9a-fA-F]{4}-[0-9a-fA-F]{12}",
        )
        .expect("uuid regex")
    })
}

/// Scan top-level definitions for missing id anchors.
///
/// Private-named symbols (leading underscore) are always exempt.
pub fn stable_id_anchor(root: Node, source: &str, spec: &AnchorSpec) -> Vec<MatchViolation> {
    let lines: Vec<&str> = source.lines().collect();
    let mut violations = Vec::new();

    let mut cursor = root.walk();
    for child in root.children(&mut cursor) {
        let (def, anchor_row) = match child.kind() {
            "function_definition" | "class_definition" => (child, child.start_position().row),
            // The marker precedes the decorators, so the window starts at
            // the decorated definition, not the inner def.
            "decorated_definition" => match child.child_by_field_name("definition") {
                Some(inner) => (inner, child.start_position().row),
                None => continue,
            },
            _ => continue,
        };

        let name = match def.child_by_field_name("name") {
            Some(n) => node_text(n, source).to_string(),
            None => continue,
        };
        if name.starts_with('_') {
            continue;
        }

        let window_start = anchor_row.saturating_sub(spec.window);
        let has_marker = lines[window_start..anchor_row.min(lines.len())]
            .iter()
            .any(|line| line.contains("ID:") || uuid_pattern().is_match(line));

        if !has_marker {
            violations.push(MatchViolation::new(
                format!(
                    "public definition `{}` lacks a stable id marker in the {} lines above it",
                    name, spec.window
                ),
                anchor_row as u32 + 1,
            ));
        }
    }

    violations
}
