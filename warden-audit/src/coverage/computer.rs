//! Aggregate coverage summaries.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::reconcile::{CoverageStatus, EnforcementRecord};

/// Aggregate counts per status plus the execution rate.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CoverageSummary {
    pub rules_total: usize,
    pub rules_enforced: usize,
    pub rules_partially_enforced: usize,
    pub rules_implementable_or_declared_only: usize,
    pub rules_unknown: usize,
    pub execution_rate: f64,
}

/// Per-policy-file status counts for the human-readable report.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PolicyBreakdown {
    pub enforced: usize,
    pub partial: usize,
    pub declared: usize,
    pub unknown: usize,
}

/// `enforced / total * 100`, defined as `100.0` when `total == 0`
/// (vacuous pass).
pub fn execution_rate(enforced: usize, total: usize) -> f64 {
    if total == 0 {
        100.0
    } else {
        enforced as f64 / total as f64 * 100.0
    }
}

pub struct CoverageComputer;

impl CoverageComputer {
    /// Aggregate statuses into a summary.
    pub fn summarize(records: &[EnforcementRecord]) -> CoverageSummary {
        let count = |status: CoverageStatus| {
            records
                .iter()
                .filter(|r| r.coverage_status == status)
                .count()
        };

        let enforced = count(CoverageStatus::Enforced);
        CoverageSummary {
            rules_total: records.len(),
            rules_enforced: enforced,
            rules_partially_enforced: count(CoverageStatus::PartiallyEnforced),
            rules_implementable_or_declared_only: count(CoverageStatus::Implementable)
                + count(CoverageStatus::DeclaredOnly),
            rules_unknown: count(CoverageStatus::Unknown),
            execution_rate: execution_rate(enforced, records.len()),
        }
    }

    /// Status counts per policy file, keyed by policy path. Implementable
    /// rules count into the declared column: they are declared-but-unrun
    /// either way.
    pub fn per_policy(records: &[EnforcementRecord]) -> BTreeMap<String, PolicyBreakdown> {
        let mut breakdown: BTreeMap<String, PolicyBreakdown> = BTreeMap::new();
        for record in records {
            let entry = breakdown
                .entry(record.rule.policy_path.clone())
                .or_default();
            match record.coverage_status {
                CoverageStatus::Enforced => entry.enforced += 1,
                CoverageStatus::PartiallyEnforced => entry.partial += 1,
                CoverageStatus::Implementable | CoverageStatus::DeclaredOnly => {
                    entry.declared += 1
                }
                CoverageStatus::Unknown => entry.unknown += 1,
            }
        }
        breakdown
    }
}
