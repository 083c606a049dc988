//! Policy document configuration.

use serde::{Deserialize, Serialize};

/// Where the declared policy documents live.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct PolicyConfig {
    /// Globs (relative to the project root) matching policy documents.
    /// Default: `policies/` and everything below it, in YAML or JSON.
    #[serde(default)]
    pub paths: Vec<String>,
}

impl PolicyConfig {
    /// Returns the effective policy globs.
    pub fn effective_paths(&self) -> Vec<String> {
        if self.paths.is_empty() {
            vec![
                "policies/*.yaml".to_string(),
                "policies/*.yml".to_string(),
                "policies/*.json".to_string(),
                "policies/**/*.yaml".to_string(),
                "policies/**/*.yml".to_string(),
                "policies/**/*.json".to_string(),
            ]
        } else {
            self.paths.clone()
        }
    }
}
