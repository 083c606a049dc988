//! Report and artifact output configuration.

use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_OUTPUT_DIR, DEFAULT_TOP_GAPS};

/// Where artifacts land and how much the human-readable report shows.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct ReportConfig {
    /// Output directory, relative to the project root. Default: `.warden`.
    pub output_dir: Option<String>,
    /// Gaps rendered in the human-readable report. Default: 10.
    pub top_gaps: Option<usize>,
}

impl ReportConfig {
    pub fn effective_output_dir(&self) -> String {
        self.output_dir
            .clone()
            .unwrap_or_else(|| DEFAULT_OUTPUT_DIR.to_string())
    }

    pub fn effective_top_gaps(&self) -> usize {
        self.top_gaps.unwrap_or(DEFAULT_TOP_GAPS)
    }
}
