//! Artifact writing and integrity errors.

use std::path::PathBuf;

use super::error_code::{self, WardenErrorCode};

/// Errors that can occur while writing audit artifacts.
#[derive(Debug, thiserror::Error)]
pub enum ArtifactError {
    #[error("I/O error writing {path}: {message}")]
    Io { path: PathBuf, message: String },

    #[error("Serialization error for {artifact}: {message}")]
    Serialize { artifact: String, message: String },

    /// Recomputed digest differs from the stored digest. The destructive
    /// replace must abort before any mutation.
    #[error("Integrity mismatch for {path}: stored {stored}, recomputed {recomputed}")]
    IntegrityMismatch {
        path: PathBuf,
        stored: String,
        recomputed: String,
    },
}

impl WardenErrorCode for ArtifactError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::IntegrityMismatch { .. } => error_code::INTEGRITY_ERROR,
            _ => error_code::ARTIFACT_ERROR,
        }
    }
}
