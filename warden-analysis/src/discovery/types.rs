//! Core rule types.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Declared severity of a rule.
///
/// The variant order is the gap-ranking order: `Error` gaps sort first,
/// unrecognized values last.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Error,
    Warn,
    Info,
    Unknown,
}

impl Severity {
    /// Parse a declared severity string. `warn` and `warning` are the same
    /// tier; anything unrecognized is `Unknown`.
    pub fn parse_str(value: &str) -> Severity {
        match value.trim().to_ascii_lowercase().as_str() {
            "error" => Severity::Error,
            "warn" | "warning" => Severity::Warn,
            "info" => Severity::Info,
            _ => Severity::Unknown,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Error => "error",
            Severity::Warn => "warn",
            Severity::Info => "info",
            Severity::Unknown => "unknown",
        }
    }

    /// Gap-ranking tier: error(0) < warn(1) < info(2) < unrecognized(3).
    pub fn rank(&self) -> u8 {
        match self {
            Severity::Error => 0,
            Severity::Warn => 1,
            Severity::Info => 2,
            Severity::Unknown => 3,
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Machine-checkable spec attached to a rule: an engine name plus raw
/// parameters. Parameters are validated into typed structs when the check
/// is built; an unparseable spec makes the rule non-implementable, not a
/// crash.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckSpec {
    pub engine: String,
    #[serde(default)]
    pub params: serde_yaml::Value,
}

/// A declared governance rule. `(policy_path, rule_id)` is the unique key;
/// the struct is immutable within a run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Rule {
    pub policy_path: String,
    pub rule_id: String,
    pub statement: String,
    pub severity: Severity,
    #[serde(default)]
    pub scope: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub check: Option<CheckSpec>,
}

impl Rule {
    /// The unique key of this rule within a run.
    pub fn key(&self) -> (String, String) {
        (self.policy_path.clone(), self.rule_id.clone())
    }

    /// Whether the rule's own shape is insufficient to classify it: no
    /// check spec and no recognized severity.
    pub fn is_unclassifiable(&self) -> bool {
        self.check.is_none() && self.severity == Severity::Unknown
    }
}
