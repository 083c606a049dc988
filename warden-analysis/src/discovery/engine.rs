//! Recursive scan of policy documents for rule-shaped records.

use rustc_hash::FxHashSet;
use serde_yaml::Value;
use tracing::debug;

use super::types::{CheckSpec, Rule, Severity};

/// Descriptive text fields, in the order a statement is taken from them.
const TEXT_FIELDS: &[&str] = &["statement", "description", "rationale", "title"];

/// Walks policy documents and extracts every rule-shaped mapping.
pub struct RuleDiscoveryEngine;

impl RuleDiscoveryEngine {
    /// Discover rules across a set of parsed policy documents.
    ///
    /// Documents are visited in the given order; within a document, nodes
    /// are visited in document order. Duplicate `(policy_path, rule_id)`
    /// keys are dropped — first occurrence wins.
    pub fn discover(documents: &[(String, Value)]) -> Vec<Rule> {
        let mut rules = Vec::new();
        let mut seen: FxHashSet<(String, String)> = FxHashSet::default();

        for (policy_path, document) in documents {
            let before = rules.len();
            Self::walk(document, policy_path, &mut rules, &mut seen);
            debug!(
                policy = %policy_path,
                count = rules.len() - before,
                "discovered rules"
            );
        }
        rules
    }

    fn walk(
        value: &Value,
        policy_path: &str,
        rules: &mut Vec<Rule>,
        seen: &mut FxHashSet<(String, String)>,
    ) {
        match value {
            Value::Mapping(mapping) => {
                if let Some(rule) = Self::extract_rule(mapping, policy_path) {
                    if seen.insert(rule.key()) {
                        rules.push(rule);
                    }
                }
                for (_, child) in mapping {
                    Self::walk(child, policy_path, rules, seen);
                }
            }
            Value::Sequence(items) => {
                for item in items {
                    Self::walk(item, policy_path, rules, seen);
                }
            }
            _ => {}
        }
    }

    /// A mapping is rule-shaped iff it has a non-empty string `id` and
    /// either a non-empty descriptive text field or an
    /// `enforcement`/`severity` field.
    fn extract_rule(mapping: &serde_yaml::Mapping, policy_path: &str) -> Option<Rule> {
        let rule_id = non_empty_string(mapping.get("id")?)?;

        let statement = TEXT_FIELDS
            .iter()
            .filter_map(|field| mapping.get(*field))
            .find_map(non_empty_string);

        let has_marker =
            mapping.contains_key("enforcement") || mapping.contains_key("severity");

        if statement.is_none() && !has_marker {
            return None;
        }

        let severity = mapping
            .get("severity")
            .and_then(|v| v.as_str())
            .map(Severity::parse_str)
            .unwrap_or(Severity::Unknown);

        Some(Rule {
            policy_path: policy_path.to_string(),
            rule_id,
            statement: statement.unwrap_or_default(),
            severity,
            scope: extract_scope(mapping),
            check: extract_check(mapping),
        })
    }
}

fn non_empty_string(value: &Value) -> Option<String> {
    value
        .as_str()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

/// Scope accepts either a list of glob strings or `{applies_to: [...]}`.
fn extract_scope(mapping: &serde_yaml::Mapping) -> Vec<String> {
    let Some(scope) = mapping.get("scope") else {
        return Vec::new();
    };
    match scope {
        Value::Sequence(items) => items
            .iter()
            .filter_map(|v| v.as_str().map(str::to_string))
            .collect(),
        Value::Mapping(inner) => inner
            .get("applies_to")
            .and_then(|v| v.as_sequence())
            .map(|items| {
                items
                    .iter()
                    .filter_map(|v| v.as_str().map(str::to_string))
                    .collect()
            })
            .unwrap_or_default(),
        _ => Vec::new(),
    }
}

fn extract_check(mapping: &serde_yaml::Mapping) -> Option<CheckSpec> {
    let check = mapping.get("check")?.as_mapping()?;
    let engine = non_empty_string(check.get("engine")?)?;
    let params = check.get("params").cloned().unwrap_or(Value::Null);
    Some(CheckSpec { engine, params })
}
