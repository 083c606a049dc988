//! Scanner subsystem — gitignore-aware discovery of governed Python
//! modules, content hashing, and parallel parsing. The scanner is the
//! entry point of the audit pipeline: everything downstream consumes the
//! `ScanOutcome` it produces.

pub mod walker;

use std::path::{Path, PathBuf};

use rayon::prelude::*;
use tracing::{debug, warn};

use warden_core::config::ScanConfig;

use crate::parsers::{ParsedModule, PythonParser};
use walker::collect_source_files;

/// Result of scanning one project root.
#[derive(Debug, Default)]
pub struct ScanOutcome {
    /// Successfully parsed modules (including modules with syntax errors,
    /// which carry `has_errors`).
    pub modules: Vec<ParsedModule>,
    /// Files that could not be read at all.
    pub unreadable: Vec<(PathBuf, String)>,
}

/// Scans the configured source roots and parses every governed module.
pub struct Scanner {
    config: ScanConfig,
}

impl Scanner {
    pub fn new(config: ScanConfig) -> Self {
        Self { config }
    }

    /// Walk every source root under `project_root`, parse all Python
    /// modules, and return them keyed by project-relative path.
    pub fn scan(&self, project_root: &Path) -> ScanOutcome {
        let source_roots = self.config.effective_source_roots();
        let max_size = self.config.effective_max_file_size();

        let files = collect_source_files(
            project_root,
            &source_roots,
            max_size,
            self.config.effective_follow_symlinks(),
            &self.config.extra_ignore,
        );
        debug!(count = files.len(), "discovered governed source files");

        let results: Vec<Result<ParsedModule, (PathBuf, String)>> = files
            .par_iter()
            .map(|abs_path| {
                let rel_path = abs_path
                    .strip_prefix(project_root)
                    .unwrap_or(abs_path)
                    .to_path_buf();
                let source = std::fs::read_to_string(abs_path)
                    .map_err(|e| (rel_path.clone(), e.to_string()))?;
                PythonParser::new()
                    .parse(source, &rel_path, &source_roots)
                    .map_err(|e| (rel_path, e.to_string()))
            })
            .collect();

        let mut outcome = ScanOutcome::default();
        for result in results {
            match result {
                Ok(module) => outcome.modules.push(module),
                Err((path, message)) => {
                    warn!(path = %path.display(), %message, "unreadable source file");
                    outcome.unreadable.push((path, message));
                }
            }
        }

        // Deterministic order for everything downstream.
        outcome.modules.sort_by(|a, b| a.path.cmp(&b.path));
        outcome
    }
}
