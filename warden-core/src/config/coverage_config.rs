//! Evidence and coverage configuration.

use serde::{Deserialize, Serialize};

/// Paths of the three evidence documents, relative to the project root,
/// and the exclusion globs applied to coverage-threshold rules.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct CoverageConfig {
    /// Source-coverage evidence map. Default: `coverage.json`.
    pub evidence_path: Option<String>,
    /// Execution-evidence document. Default: `.warden/executed_checks.json`.
    pub execution_evidence_path: Option<String>,
    /// Explicit-links document. Default: `policies/enforcement_links.yaml`.
    pub links_path: Option<String>,
    /// Globs excluded from coverage-threshold computation.
    #[serde(default)]
    pub exclusions: Vec<String>,
}

impl CoverageConfig {
    pub fn effective_evidence_path(&self) -> String {
        self.evidence_path
            .clone()
            .unwrap_or_else(|| "coverage.json".to_string())
    }

    pub fn effective_execution_evidence_path(&self) -> String {
        self.execution_evidence_path
            .clone()
            .unwrap_or_else(|| ".warden/executed_checks.json".to_string())
    }

    pub fn effective_links_path(&self) -> String {
        self.links_path
            .clone()
            .unwrap_or_else(|| "policies/enforcement_links.yaml".to_string())
    }
}
