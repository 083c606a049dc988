//! AuditArtifactWriter — writes the canonical artifact, its duplicate
//! serialization, the human-readable report, the stored digest, and the
//! per-run snapshot.
//!
//! All content is rendered in memory before the first byte hits disk, and
//! each file lands via a temp-file rename, so a crash mid-run leaves the
//! previous run's artifacts untouched.

use std::path::{Path, PathBuf};

use tracing::{debug, info};

use warden_core::constants::{
    COVERAGE_MAP_DIGEST, COVERAGE_MAP_JSON, COVERAGE_MAP_YAML, COVERAGE_REPORT_MD,
};
use warden_core::errors::ArtifactError;

use super::digest::canonical_digest;
use super::snapshot::write_snapshot;
use super::types::CoverageMap;

/// Paths of everything one run produced.
#[derive(Debug, Clone)]
pub struct ArtifactPaths {
    pub canonical: PathBuf,
    pub duplicate: PathBuf,
    pub report: PathBuf,
    pub digest: PathBuf,
    pub snapshot: PathBuf,
}

pub struct AuditArtifactWriter {
    output_dir: PathBuf,
}

impl AuditArtifactWriter {
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
        }
    }

    /// Write all artifacts for one run.
    ///
    /// Overwriting the previous run's canonical artifact is a destructive
    /// replace: the stored digest is recomputed and compared first, and a
    /// mismatch aborts before any mutation. A missing digest file is
    /// treated as a first run, not a mismatch.
    pub fn write(
        &self,
        map: &CoverageMap,
        report_md: &str,
    ) -> Result<ArtifactPaths, ArtifactError> {
        self.verify_previous_digest()?;

        let json_value =
            serde_json::to_value(map).map_err(|e| ArtifactError::Serialize {
                artifact: COVERAGE_MAP_JSON.to_string(),
                message: e.to_string(),
            })?;
        let json_content =
            serde_json::to_string_pretty(&json_value).map_err(|e| ArtifactError::Serialize {
                artifact: COVERAGE_MAP_JSON.to_string(),
                message: e.to_string(),
            })?;
        let yaml_content =
            serde_yaml::to_string(&json_value).map_err(|e| ArtifactError::Serialize {
                artifact: COVERAGE_MAP_YAML.to_string(),
                message: e.to_string(),
            })?;
        let digest = canonical_digest(&json_value);

        std::fs::create_dir_all(&self.output_dir).map_err(|e| ArtifactError::Io {
            path: self.output_dir.clone(),
            message: e.to_string(),
        })?;

        let paths = ArtifactPaths {
            canonical: self.output_dir.join(COVERAGE_MAP_JSON),
            duplicate: self.output_dir.join(COVERAGE_MAP_YAML),
            report: self.output_dir.join(COVERAGE_REPORT_MD),
            digest: self.output_dir.join(COVERAGE_MAP_DIGEST),
            snapshot: PathBuf::new(),
        };

        write_atomic(&paths.canonical, &json_content)?;
        write_atomic(&paths.duplicate, &yaml_content)?;
        write_atomic(&paths.report, report_md)?;
        write_atomic(&paths.digest, &digest)?;

        let snapshot = write_snapshot(
            &self.output_dir,
            &[
                (COVERAGE_MAP_JSON, json_content.as_str()),
                (COVERAGE_MAP_YAML, yaml_content.as_str()),
                (COVERAGE_REPORT_MD, report_md),
            ],
        )?;

        info!(dir = %self.output_dir.display(), "wrote audit artifacts");
        Ok(ArtifactPaths { snapshot, ..paths })
    }

    /// Recompute the previous canonical artifact's digest against the
    /// stored one. Mismatch means the exported records drifted or were
    /// tampered with since they were written; the replace must abort.
    fn verify_previous_digest(&self) -> Result<(), ArtifactError> {
        let canonical_path = self.output_dir.join(COVERAGE_MAP_JSON);
        let digest_path = self.output_dir.join(COVERAGE_MAP_DIGEST);
        if !canonical_path.exists() || !digest_path.exists() {
            debug!("no previous artifact digest to verify");
            return Ok(());
        }

        let stored = std::fs::read_to_string(&digest_path)
            .map_err(|e| ArtifactError::Io {
                path: digest_path.clone(),
                message: e.to_string(),
            })?
            .trim()
            .to_string();

        let previous_raw =
            std::fs::read_to_string(&canonical_path).map_err(|e| ArtifactError::Io {
                path: canonical_path.clone(),
                message: e.to_string(),
            })?;
        let previous: serde_json::Value = match serde_json::from_str(&previous_raw) {
            Ok(value) => value,
            Err(e) => {
                // An unparseable previous artifact cannot match its digest.
                return Err(ArtifactError::IntegrityMismatch {
                    path: canonical_path,
                    stored,
                    recomputed: format!("<unparseable: {e}>"),
                });
            }
        };

        let recomputed = canonical_digest(&previous);
        if recomputed != stored {
            return Err(ArtifactError::IntegrityMismatch {
                path: canonical_path,
                stored,
                recomputed,
            });
        }
        Ok(())
    }
}

/// Write via a temp file in the same directory, then rename into place.
fn write_atomic(path: &Path, content: &str) -> Result<(), ArtifactError> {
    let tmp = path.with_extension("tmp");
    std::fs::write(&tmp, content).map_err(|e| ArtifactError::Io {
        path: tmp.clone(),
        message: e.to_string(),
    })?;
    std::fs::rename(&tmp, path).map_err(|e| ArtifactError::Io {
        path: path.to_path_buf(),
        message: e.to_string(),
    })
}
