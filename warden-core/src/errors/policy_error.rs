//! Policy document errors.

use super::error_code::{self, WardenErrorCode};

/// Errors that can occur while loading or walking policy documents.
#[derive(Debug, thiserror::Error)]
pub enum PolicyError {
    #[error("Policy document not found: {path}")]
    NotFound { path: String },

    #[error("Failed to read policy document {path}: {message}")]
    Unreadable { path: String, message: String },

    #[error("Failed to parse policy document {path}: {message}")]
    Unparseable { path: String, message: String },
}

impl PolicyError {
    /// The path of the document this error is scoped to.
    pub fn path(&self) -> &str {
        match self {
            Self::NotFound { path }
            | Self::Unreadable { path, .. }
            | Self::Unparseable { path, .. } => path,
        }
    }
}

impl WardenErrorCode for PolicyError {
    fn error_code(&self) -> &'static str {
        error_code::POLICY_ERROR
    }
}
