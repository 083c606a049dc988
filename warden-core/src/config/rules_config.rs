//! Built-in matcher configuration: the named sets the rule matchers
//! consult. Every set ships a compiled default so a bare `warden.toml`
//! still produces a meaningful audit.

use serde::{Deserialize, Serialize};

use crate::constants::DEFAULT_ID_WINDOW;

/// Configuration for the syntax-tree rule matchers.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct RulesConfig {
    /// Lines scanned above a public definition for a stable-id marker.
    pub id_window: Option<usize>,
    /// Decorator names (dotted or bare) that may not appear on any definition.
    #[serde(default)]
    pub forbidden_decorators: Vec<String>,
    /// Dynamic-execution primitives flagged outside trusted domains.
    #[serde(default)]
    pub forbidden_primitives: Vec<String>,
    /// Domains (dotted directory paths) allowed to use forbidden primitives.
    #[serde(default)]
    pub trusted_domains: Vec<String>,
    /// Parameter names that mark a function as holding a mutating handle.
    #[serde(default)]
    pub mutating_params: Vec<String>,
    /// Method names that mark a call as a mutation.
    #[serde(default)]
    pub mutating_verbs: Vec<String>,
    /// Decorator required on functions that mutate through a handle.
    pub governance_decorator: Option<String>,
    /// Path prefixes fully exempt from the mutating-decorator gate.
    #[serde(default)]
    pub exempt_prefixes: Vec<String>,
    /// Raw write method names that bypass the governed mutation surface.
    #[serde(default)]
    pub write_methods: Vec<String>,
}

impl RulesConfig {
    pub fn effective_id_window(&self) -> usize {
        self.id_window.unwrap_or(DEFAULT_ID_WINDOW)
    }

    pub fn effective_forbidden_primitives(&self) -> Vec<String> {
        if self.forbidden_primitives.is_empty() {
            ["eval", "exec", "compile", "__import__"]
                .iter()
                .map(|s| s.to_string())
                .collect()
        } else {
            self.forbidden_primitives.clone()
        }
    }

    pub fn effective_mutating_params(&self) -> Vec<String> {
        if self.mutating_params.is_empty() {
            ["session", "db", "conn", "cursor", "file", "fh", "handle", "store"]
                .iter()
                .map(|s| s.to_string())
                .collect()
        } else {
            self.mutating_params.clone()
        }
    }

    pub fn effective_mutating_verbs(&self) -> Vec<String> {
        if self.mutating_verbs.is_empty() {
            [
                "write", "delete", "create", "save", "commit", "update", "insert", "remove",
            ]
            .iter()
            .map(|s| s.to_string())
            .collect()
        } else {
            self.mutating_verbs.clone()
        }
    }

    pub fn effective_governance_decorator(&self) -> String {
        self.governance_decorator
            .clone()
            .unwrap_or_else(|| "governed_mutation".to_string())
    }

    pub fn effective_write_methods(&self) -> Vec<String> {
        if self.write_methods.is_empty() {
            ["write", "writelines"].iter().map(|s| s.to_string()).collect()
        } else {
            self.write_methods.clone()
        }
    }
}
