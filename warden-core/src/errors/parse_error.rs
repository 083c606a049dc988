//! Source-module parse errors.

use std::path::PathBuf;

use super::error_code::{self, WardenErrorCode};

/// Errors that can occur while parsing a governed source module.
#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    #[error("Failed to load Python grammar: {message}")]
    GrammarLoad { message: String },

    #[error("Tree-sitter error parsing {path}: {message}")]
    TreeSitterError { path: PathBuf, message: String },

    #[error("Failed to read {path}: {message}")]
    Io { path: PathBuf, message: String },
}

impl WardenErrorCode for ParseError {
    fn error_code(&self) -> &'static str {
        error_code::PARSE_ERROR
    }
}
