//! Gap ranking for declared-only rules.

use serde::{Deserialize, Serialize};

use warden_analysis::discovery::Severity;

use crate::reconcile::{CoverageStatus, EnforcementRecord};

/// One enforcement gap: a rule that is declared but not enforced in any
/// form.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Gap {
    pub rule_id: String,
    pub policy_path: String,
    pub severity: Severity,
    pub statement: String,
}

/// Rank the declared-only rules: severity tier first (`error` before
/// `warn` before `info` before unrecognized), ascending rule id within a
/// tier. The machine artifact retains this full list; only the rendered
/// report truncates to a top-N.
pub fn rank_gaps(records: &[EnforcementRecord]) -> Vec<Gap> {
    let mut gaps: Vec<Gap> = records
        .iter()
        .filter(|r| r.coverage_status == CoverageStatus::DeclaredOnly)
        .map(|r| Gap {
            rule_id: r.rule.rule_id.clone(),
            policy_path: r.rule.policy_path.clone(),
            severity: r.rule.severity,
            statement: r.rule.statement.clone(),
        })
        .collect();

    gaps.sort_by(|a, b| {
        a.severity
            .rank()
            .cmp(&b.severity.rank())
            .then_with(|| a.rule_id.cmp(&b.rule_id))
    });
    gaps
}
