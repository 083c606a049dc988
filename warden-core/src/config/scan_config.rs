//! Source scan configuration.

use serde::{Deserialize, Serialize};

/// Configuration for governed-source discovery.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct ScanConfig {
    /// Roots scanned for governed Python modules. Default: `["src"]`.
    #[serde(default)]
    pub source_roots: Vec<String>,
    /// Maximum file size in bytes. Default: 2 MiB.
    pub max_file_size: Option<u64>,
    /// Follow symlinks while walking. Default: false.
    pub follow_symlinks: Option<bool>,
    /// Extra ignore globs applied on top of gitignore rules.
    #[serde(default)]
    pub extra_ignore: Vec<String>,
}

impl ScanConfig {
    /// Returns the effective source roots, defaulting to `["src"]`.
    pub fn effective_source_roots(&self) -> Vec<String> {
        if self.source_roots.is_empty() {
            vec!["src".to_string()]
        } else {
            self.source_roots.clone()
        }
    }

    /// Returns the effective maximum file size, defaulting to 2 MiB.
    pub fn effective_max_file_size(&self) -> u64 {
        self.max_file_size.unwrap_or(2 * 1024 * 1024)
    }

    pub fn effective_follow_symlinks(&self) -> bool {
        self.follow_symlinks.unwrap_or(false)
    }
}
