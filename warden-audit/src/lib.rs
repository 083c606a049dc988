//! Audit engine for Warden: merges execution evidence, explicit links, and
//! implementability into a per-rule coverage status, computes aggregate
//! coverage, and writes integrity-checked artifacts.
//!
//! Subsystems:
//! - `evidence` — loaders for the three evidence documents
//! - `reconcile` — monotonic multi-source status reconciliation
//! - `coverage` — summaries, threshold gates, gap ranking
//! - `artifacts` — canonical + duplicate + human-readable artifacts,
//!   snapshots, and the canonical digest facility
//! - `pipeline` — single-pass batch orchestration of a whole run

pub mod artifacts;
pub mod coverage;
pub mod evidence;
pub mod pipeline;
pub mod reconcile;
