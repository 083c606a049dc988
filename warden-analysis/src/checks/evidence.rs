//! ExecutionLogMethod — the asynchronous enforcement method. A rule whose
//! check declares `engine: evidence_lookup` asserts that it is enforced
//! operationally; this method queries the execution-evidence store and
//! flags rules the store does not back up. An unreadable store is an
//! error, never a silent pass.

use std::path::PathBuf;

use async_trait::async_trait;

use warden_core::errors::CheckError;

use crate::discovery::Rule;

use super::context::CheckContext;
use super::method::AsyncEnforcementMethod;
use super::types::Finding;

pub struct ExecutionLogMethod {
    check_id: String,
    path: String,
}

impl ExecutionLogMethod {
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            check_id: "evidence_lookup".to_string(),
            path: path.into(),
        }
    }
}

#[async_trait]
impl AsyncEnforcementMethod for ExecutionLogMethod {
    fn check_id(&self) -> &str {
        &self.check_id
    }

    async fn verify(&self, ctx: &CheckContext, rule: &Rule) -> Result<Vec<Finding>, CheckError> {
        let path = resolve(ctx.root(), &self.path);
        let raw = tokio::fs::read_to_string(&path).await.map_err(|e| {
            CheckError::EvidenceUnavailable {
                path: self.path.clone(),
                message: e.to_string(),
            }
        })?;

        let parsed: serde_json::Value =
            serde_json::from_str(&raw).map_err(|e| CheckError::EvidenceUnavailable {
                path: self.path.clone(),
                message: e.to_string(),
            })?;

        let executed = parsed
            .get("executed_checks")
            .or_else(|| parsed.get("executed_rules"))
            .and_then(|v| v.as_array())
            .map(|items| {
                items
                    .iter()
                    .filter_map(|v| v.as_str())
                    .any(|id| id == rule.rule_id)
            })
            .unwrap_or(false);

        if executed {
            return Ok(Vec::new());
        }

        let mut finding = Finding::from_violation(
            &self.check_id,
            rule.severity,
            rule.policy_path.clone(),
            crate::matchers::MatchViolation::file_scoped(format!(
                "rule {} claims operational enforcement but has no execution evidence",
                rule.rule_id
            )),
        );
        finding.evidence = Some(self.path.clone());
        Ok(vec![finding])
    }
}

fn resolve(root: &std::path::Path, path: &str) -> PathBuf {
    let candidate = PathBuf::from(path);
    if candidate.is_absolute() {
        candidate
    } else {
        root.join(candidate)
    }
}
