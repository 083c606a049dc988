//! Evidence document shapes.

use std::collections::BTreeMap;

use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};

use crate::reconcile::Mechanism;

/// Rule ids that actually ran in the most recent audit pass.
#[derive(Debug, Clone, Default)]
pub struct ExecutionEvidence {
    pub executed: FxHashSet<String>,
    /// Path of the document the evidence came from, kept as provenance for
    /// back-filled mechanisms.
    pub source_path: Option<String>,
}

impl ExecutionEvidence {
    pub fn contains(&self, rule_id: &str) -> bool {
        self.executed.contains(rule_id)
    }
}

/// An out-of-band assertion that a mechanism enforces a rule.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExplicitLink {
    pub policy: String,
    pub rule_id: String,
    pub enforcement: Mechanism,
}

/// Per-file statement coverage summary (standard coverage-report shape).
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default)]
pub struct FileCoverage {
    pub num_statements: u64,
    pub covered_lines: u64,
}

/// The source-coverage evidence map, keyed by normalized relative path.
#[derive(Debug, Clone, Default)]
pub struct CoverageEvidence {
    pub files: BTreeMap<String, FileCoverage>,
}

impl CoverageEvidence {
    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}
