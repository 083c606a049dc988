//! Per-run check context — the explicit, owned replacement for any
//! process-wide cache. It holds the parsed source modules and parsed
//! policy documents for exactly one run; both are read-only for the run's
//! duration.

use std::path::{Path, PathBuf};

use glob::Pattern;
use rustc_hash::FxHashMap;
use serde_yaml::Value;

use warden_core::config::WardenConfig;
use warden_core::errors::CheckError;

use crate::parsers::ParsedModule;

pub struct CheckContext {
    root: PathBuf,
    pub config: WardenConfig,
    modules: Vec<ParsedModule>,
    policies: FxHashMap<String, Value>,
    policy_errors: FxHashMap<String, String>,
}

impl CheckContext {
    pub fn new(root: PathBuf, config: WardenConfig, modules: Vec<ParsedModule>) -> Self {
        Self {
            root,
            config,
            modules,
            policies: FxHashMap::default(),
            policy_errors: FxHashMap::default(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Record a successfully parsed policy document.
    pub fn insert_policy(&mut self, path: impl Into<String>, document: Value) {
        self.policies.insert(path.into(), document);
    }

    /// Record a policy document that could not be loaded.
    pub fn record_policy_error(&mut self, path: impl Into<String>, message: impl Into<String>) {
        self.policy_errors.insert(path.into(), message.into());
    }

    /// Paths of policy documents that could not be loaded, with messages.
    pub fn policy_errors(&self) -> impl Iterator<Item = (&String, &String)> {
        self.policy_errors.iter()
    }

    /// The parsed policy document at `path`, or the load error scoped to it.
    pub fn policy(&self, path: &str) -> Result<&Value, CheckError> {
        if let Some(document) = self.policies.get(path) {
            return Ok(document);
        }
        let message = self
            .policy_errors
            .get(path)
            .cloned()
            .unwrap_or_else(|| "document was never loaded".to_string());
        Err(CheckError::PolicyUnavailable {
            path: path.to_string(),
            message,
        })
    }

    pub fn modules(&self) -> &[ParsedModule] {
        &self.modules
    }

    /// Modules whose project-relative path matches the include globs (all
    /// modules when empty) and none of the exclude globs.
    pub fn modules_in_scope(&self, include: &[String], exclude: &[String]) -> Vec<&ParsedModule> {
        let include: Vec<Pattern> = include
            .iter()
            .filter_map(|g| Pattern::new(g).ok())
            .collect();
        let exclude: Vec<Pattern> = exclude
            .iter()
            .filter_map(|g| Pattern::new(g).ok())
            .collect();

        self.modules
            .iter()
            .filter(|module| {
                let path = module.path_str();
                let included =
                    include.is_empty() || include.iter().any(|p| p.matches(&path));
                included && !exclude.iter().any(|p| p.matches(&path))
            })
            .collect()
    }
}
