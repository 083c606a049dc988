//! The reconciliation algorithm.

use rustc_hash::FxHashMap;
use tracing::warn;

use warden_analysis::discovery::{CheckSpec, Rule};

use crate::evidence::{ExecutionEvidence, ExplicitLink};

use super::types::{CoverageStatus, EnforcementRecord, Mechanism};

/// Result of one reconciliation pass.
#[derive(Debug, Default)]
pub struct ReconcileOutcome {
    pub records: Vec<EnforcementRecord>,
    /// Rules whose shape could not be classified; surfaced as warnings,
    /// never dropped.
    pub unclassified: Vec<String>,
}

/// Merges the three evidence sources into a status per rule.
///
/// Absence of evidence always resolves to the weakest applicable status;
/// enforcement is never invented from absence.
pub struct EvidenceReconciler<'a, F>
where
    F: Fn(&CheckSpec) -> bool,
{
    execution: &'a ExecutionEvidence,
    links: &'a [ExplicitLink],
    is_implementable: F,
}

impl<'a, F> EvidenceReconciler<'a, F>
where
    F: Fn(&CheckSpec) -> bool,
{
    pub fn new(
        execution: &'a ExecutionEvidence,
        links: &'a [ExplicitLink],
        is_implementable: F,
    ) -> Self {
        Self {
            execution,
            links,
            is_implementable,
        }
    }

    /// Compute a fresh status for every discovered rule.
    pub fn reconcile(&self, rules: &[Rule]) -> ReconcileOutcome {
        let mut linked: FxHashMap<(&str, &str), Vec<&Mechanism>> = FxHashMap::default();
        for link in self.links {
            linked
                .entry((link.policy.as_str(), link.rule_id.as_str()))
                .or_default()
                .push(&link.enforcement);
        }

        let mut outcome = ReconcileOutcome::default();
        for rule in rules {
            let record = self.reconcile_rule(rule, &linked, &mut outcome.unclassified);
            outcome.records.push(record);
        }
        outcome
    }

    fn reconcile_rule(
        &self,
        rule: &Rule,
        linked: &FxHashMap<(&str, &str), Vec<&Mechanism>>,
        unclassified: &mut Vec<String>,
    ) -> EnforcementRecord {
        let mut status = CoverageStatus::DeclaredOnly;
        let mut mechanisms: Vec<Mechanism> = Vec::new();
        let mut notes = Vec::new();

        // Explicit links upgrade to partially enforced.
        if let Some(links) = linked.get(&(rule.policy_path.as_str(), rule.rule_id.as_str())) {
            mechanisms.extend(links.iter().map(|m| (*m).clone()));
            status = CoverageStatus::PartiallyEnforced;
        }

        // Execution evidence dominates: the rule actually ran.
        if self.execution.contains(&rule.rule_id) {
            status = CoverageStatus::Enforced;
            if !mechanisms.iter().any(|m| m.evidence_path.is_some()) {
                mechanisms.push(Mechanism {
                    mechanism_id: "execution-evidence".to_string(),
                    check_id: rule.rule_id.clone(),
                    mode: "audit".to_string(),
                    strength: "executed".to_string(),
                    evidence_path: self.execution.source_path.clone(),
                });
            }
        } else if mechanisms.is_empty() {
            // No link, no execution. Implementable checks rank above
            // declared-only; unclassifiable shapes sink to unknown.
            if let Some(check) = &rule.check {
                if (self.is_implementable)(check) {
                    status = CoverageStatus::Implementable;
                }
            } else if rule.is_unclassifiable() {
                status = CoverageStatus::Unknown;
                warn!(
                    policy = %rule.policy_path,
                    rule = %rule.rule_id,
                    "rule shape is insufficient to classify"
                );
                unclassified.push(format!("{} — {}", rule.rule_id, rule.policy_path));
                notes.push("shape insufficient to classify".to_string());
            }
        }

        EnforcementRecord {
            rule: rule.clone(),
            enforcement: mechanisms,
            coverage_status: status,
            notes,
        }
    }
}
