//! Evidence reconciliation — merges execution evidence, explicit links,
//! and implementability into one coverage status per rule.
//!
//! The reconciler computes every rule fresh each run; it never merges with
//! a prior run's status. A rule enforced in run N-1 whose evidence file is
//! temporarily missing in run N therefore regresses to `declared_only`.
//! That regression is a known sharp edge of the fresh-per-run design, kept
//! deliberately: the snapshot history exists so a human can diagnose it.

pub mod reconciler;
pub mod types;

pub use reconciler::{EvidenceReconciler, ReconcileOutcome};
pub use types::{CoverageStatus, EnforcementRecord, Mechanism};
