//! Reconciliation types.

use serde::{Deserialize, Serialize};
use std::fmt;

use warden_analysis::discovery::Rule;

/// Reconciled confidence tier for one rule.
///
/// The variant order is the monotonic confidence order: status only moves
/// up this ladder within a run, never down.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum CoverageStatus {
    Unknown,
    DeclaredOnly,
    Implementable,
    PartiallyEnforced,
    Enforced,
}

impl CoverageStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            CoverageStatus::Unknown => "unknown",
            CoverageStatus::DeclaredOnly => "declared_only",
            CoverageStatus::Implementable => "implementable",
            CoverageStatus::PartiallyEnforced => "partially_enforced",
            CoverageStatus::Enforced => "enforced",
        }
    }
}

impl fmt::Display for CoverageStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One enforcement mechanism attached to a rule.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Mechanism {
    pub mechanism_id: String,
    pub check_id: String,
    pub mode: String,
    pub strength: String,
    #[serde(default, alias = "evidence", skip_serializing_if = "Option::is_none")]
    pub evidence_path: Option<String>,
}

/// Per-rule reconciliation result. Status is write-once per run: computed,
/// not incrementally patched.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnforcementRecord {
    pub rule: Rule,
    pub enforcement: Vec<Mechanism>,
    pub coverage_status: CoverageStatus,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub notes: Vec<String>,
}
