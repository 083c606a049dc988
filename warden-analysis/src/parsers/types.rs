//! Canonical parse output consumed by the matchers and checks.

use std::path::PathBuf;

/// A parsed governed source module.
///
/// `path` is relative to the project root with forward slashes, so scope
/// globs and domain extraction behave identically across platforms.
#[derive(Debug, Clone)]
pub struct ParsedModule {
    pub path: PathBuf,
    pub source: String,
    pub tree: tree_sitter::Tree,
    pub content_hash: u64,
    /// Dotted directory path under the source root (e.g. `agents.tools`).
    pub domain: String,
    pub has_errors: bool,
    /// Message describing the first syntax error, when `has_errors`.
    pub first_error: Option<String>,
}

impl ParsedModule {
    /// The module path as a forward-slash string.
    pub fn path_str(&self) -> String {
        self.path.to_string_lossy().replace('\\', "/")
    }
}
