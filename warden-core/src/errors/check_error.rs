//! Enforcement check errors.

use super::error_code::{self, WardenErrorCode};

/// Errors that can occur while building or running an enforcement check.
#[derive(Debug, thiserror::Error)]
pub enum CheckError {
    /// The check binding is not fully specified and may not run.
    #[error("Incomplete check binding: missing {missing}")]
    IncompleteBinding { missing: String },

    #[error("Policy document unavailable for check: {path}: {message}")]
    PolicyUnavailable { path: String, message: String },

    #[error("Evidence source unavailable: {path}: {message}")]
    EvidenceUnavailable { path: String, message: String },

    #[error("Enforcement method {check_id} failed: {message}")]
    MethodFailed { check_id: String, message: String },
}

impl WardenErrorCode for CheckError {
    fn error_code(&self) -> &'static str {
        error_code::CHECK_ERROR
    }
}
