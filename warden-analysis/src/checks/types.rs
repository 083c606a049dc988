//! Findings — one reported check failure, scoped to a file and line.

use serde::{Deserialize, Serialize};

use crate::discovery::Severity;
use crate::matchers::MatchViolation;

/// One reported check failure. Never mutated after creation; many findings
/// may reference the same rule.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Finding {
    pub check_id: String,
    pub severity: Severity,
    pub message: String,
    pub file_path: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line_number: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub evidence: Option<String>,
}

impl Finding {
    /// An ERROR-severity finding not tied to a source line.
    pub fn error(
        check_id: impl Into<String>,
        message: impl Into<String>,
        file_path: impl Into<String>,
    ) -> Self {
        Self {
            check_id: check_id.into(),
            severity: Severity::Error,
            message: message.into(),
            file_path: file_path.into(),
            line_number: None,
            evidence: None,
        }
    }

    /// The file-scoped finding produced when a source module fails to parse.
    pub fn syntax_error(file_path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            check_id: "syntax_error".to_string(),
            severity: Severity::Error,
            message: message.into(),
            file_path: file_path.into(),
            line_number: None,
            evidence: None,
        }
    }

    /// Wrap a matcher violation, attaching the file it was found in.
    pub fn from_violation(
        check_id: impl Into<String>,
        severity: Severity,
        file_path: impl Into<String>,
        violation: MatchViolation,
    ) -> Self {
        Self {
            check_id: check_id.into(),
            // A rule without a recognized severity still produces a
            // visible finding, not an unknown-severity one.
            severity: if severity == Severity::Unknown {
                Severity::Warn
            } else {
                severity
            },
            message: violation.message,
            file_path: file_path.into(),
            line_number: violation.line,
            evidence: None,
        }
    }
}
