//! Python parser.

use std::path::Path;

use warden_core::errors::ParseError;
use xxhash_rust::xxh3::xxh3_64;

use super::types::ParsedModule;
use crate::syntax::extract_domain;

pub struct PythonParser;

impl Default for PythonParser {
    fn default() -> Self {
        Self::new()
    }
}

impl PythonParser {
    pub fn new() -> Self {
        Self
    }

    /// File extensions this parser handles.
    pub fn extensions(&self) -> &[&str] {
        &["py", "pyi"]
    }

    /// Parse a module's source into a `ParsedModule`.
    ///
    /// Tree-sitter is error-tolerant: a file with syntax errors still
    /// produces a tree, with `has_errors` set and the first error located.
    pub fn parse(
        &self,
        source: String,
        path: &Path,
        source_roots: &[String],
    ) -> Result<ParsedModule, ParseError> {
        let mut parser = tree_sitter::Parser::new();
        parser
            .set_language(&tree_sitter_python::LANGUAGE.into())
            .map_err(|e| ParseError::GrammarLoad {
                message: e.to_string(),
            })?;

        let tree = parser
            .parse(&source, None)
            .ok_or_else(|| ParseError::TreeSitterError {
                path: path.to_path_buf(),
                message: "parser returned no tree".to_string(),
            })?;

        let has_errors = tree.root_node().has_error();
        let first_error = if has_errors {
            Some(first_error_message(tree.root_node()))
        } else {
            None
        };

        let content_hash = xxh3_64(source.as_bytes());
        let domain = extract_domain(path, source_roots);

        Ok(ParsedModule {
            path: path.to_path_buf(),
            source,
            tree,
            content_hash,
            domain,
            has_errors,
            first_error,
        })
    }
}

/// Locate the first ERROR or missing node and describe it.
fn first_error_message(root: tree_sitter::Node) -> String {
    let mut stack = vec![root];
    while let Some(node) = stack.pop() {
        if node.is_error() || node.is_missing() {
            let pos = node.start_position();
            let what = if node.is_missing() {
                "missing syntax"
            } else {
                "invalid syntax"
            };
            return format!("{} at line {}, column {}", what, pos.row + 1, pos.column + 1);
        }
        if node.has_error() {
            let mut cursor = node.walk();
            // Push in reverse so the earliest child is inspected first.
            let children: Vec<_> = node.children(&mut cursor).collect();
            for child in children.into_iter().rev() {
                stack.push(child);
            }
        }
    }
    "syntax error".to_string()
}
