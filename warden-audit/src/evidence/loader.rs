//! Deterministic evidence loading. Every loader distinguishes "not there"
//! (`EvidenceError::NotFound`, which callers degrade to empty) from
//! "there but broken" (`Unparseable`/`InvalidShape`, which callers surface
//! as ERROR findings).

use std::path::Path;

use rustc_hash::FxHashSet;
use serde_json::Value;
use tracing::debug;

use warden_core::errors::EvidenceError;

use super::types::{CoverageEvidence, ExecutionEvidence, ExplicitLink, FileCoverage};

/// Load the execution-evidence document:
/// `{"executed_checks": [...]}`, alias key `executed_rules` accepted.
pub fn load_execution_evidence(path: &Path) -> Result<ExecutionEvidence, EvidenceError> {
    let display_path = path.display().to_string();
    if !path.exists() {
        return Err(EvidenceError::NotFound { path: display_path });
    }
    let raw = std::fs::read_to_string(path).map_err(|e| EvidenceError::Unparseable {
        path: display_path.clone(),
        message: e.to_string(),
    })?;
    let parsed: Value = serde_json::from_str(&raw).map_err(|e| EvidenceError::Unparseable {
        path: display_path.clone(),
        message: e.to_string(),
    })?;

    let items = parsed
        .get("executed_checks")
        .or_else(|| parsed.get("executed_rules"))
        .and_then(Value::as_array)
        .ok_or_else(|| EvidenceError::InvalidShape {
            path: display_path.clone(),
            message: "expected an `executed_checks` array".to_string(),
        })?;

    let executed: FxHashSet<String> = items
        .iter()
        .filter_map(|v| v.as_str().map(str::to_string))
        .collect();
    debug!(path = %display_path, count = executed.len(), "loaded execution evidence");

    Ok(ExecutionEvidence {
        executed,
        source_path: Some(display_path),
    })
}

/// Load the explicit-links document (YAML or JSON list of link records).
pub fn load_links(path: &Path) -> Result<Vec<ExplicitLink>, EvidenceError> {
    let display_path = path.display().to_string();
    if !path.exists() {
        return Err(EvidenceError::NotFound { path: display_path });
    }
    let raw = std::fs::read_to_string(path).map_err(|e| EvidenceError::Unparseable {
        path: display_path.clone(),
        message: e.to_string(),
    })?;

    let links: Vec<ExplicitLink> =
        serde_yaml::from_str(&raw).map_err(|e| EvidenceError::InvalidShape {
            path: display_path.clone(),
            message: e.to_string(),
        })?;
    debug!(path = %display_path, count = links.len(), "loaded explicit links");
    Ok(links)
}

/// Load the source-coverage evidence map.
///
/// Accepts the standard coverage-report shape, where each file entry
/// either nests the counts under `summary` or carries them directly:
/// `{"files": {"src/a.py": {"summary": {"num_statements": 10, "covered_lines": 8}}}}`.
pub fn load_coverage_evidence(path: &Path) -> Result<CoverageEvidence, EvidenceError> {
    let display_path = path.display().to_string();
    if !path.exists() {
        return Err(EvidenceError::NotFound { path: display_path });
    }
    let raw = std::fs::read_to_string(path).map_err(|e| EvidenceError::Unparseable {
        path: display_path.clone(),
        message: e.to_string(),
    })?;
    let parsed: Value = serde_json::from_str(&raw).map_err(|e| EvidenceError::Unparseable {
        path: display_path.clone(),
        message: e.to_string(),
    })?;

    let files = parsed
        .get("files")
        .and_then(Value::as_object)
        .ok_or_else(|| EvidenceError::InvalidShape {
            path: display_path.clone(),
            message: "expected a `files` map".to_string(),
        })?;

    let mut evidence = CoverageEvidence::default();
    for (file_path, entry) in files {
        let counts = entry.get("summary").unwrap_or(entry);
        let num_statements = counts
            .get("num_statements")
            .and_then(Value::as_u64)
            .unwrap_or(0);
        let covered_lines = counts
            .get("covered_lines")
            .and_then(Value::as_u64)
            .unwrap_or(0);
        evidence.files.insert(
            normalize_path(file_path),
            FileCoverage {
                num_statements,
                covered_lines,
            },
        );
    }
    debug!(path = %display_path, files = evidence.files.len(), "loaded coverage evidence");
    Ok(evidence)
}

/// Normalize a coverage-map path for glob matching: forward slashes, no
/// leading `./`.
pub fn normalize_path(path: &str) -> String {
    let normalized = path.replace('\\', "/");
    normalized
        .strip_prefix("./")
        .map(str::to_string)
        .unwrap_or(normalized)
}
