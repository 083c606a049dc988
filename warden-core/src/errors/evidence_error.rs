//! Evidence document errors.

use super::error_code::{self, WardenErrorCode};

/// Errors that can occur while loading evidence documents.
#[derive(Debug, thiserror::Error)]
pub enum EvidenceError {
    #[error("Evidence document not found: {path}")]
    NotFound { path: String },

    #[error("Failed to parse evidence document {path}: {message}")]
    Unparseable { path: String, message: String },

    #[error("Evidence document {path} has an unexpected shape: {message}")]
    InvalidShape { path: String, message: String },
}

impl EvidenceError {
    /// The path of the document this error is scoped to.
    pub fn path(&self) -> &str {
        match self {
            Self::NotFound { path }
            | Self::Unparseable { path, .. }
            | Self::InvalidShape { path, .. } => path,
        }
    }
}

impl WardenErrorCode for EvidenceError {
    fn error_code(&self) -> &'static str {
        error_code::EVIDENCE_ERROR
    }
}
