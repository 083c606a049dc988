//! Evidence loaders. All three documents are consumed read-only; a missing
//! optional document degrades to an empty evidence set, never a crash.

pub mod loader;
pub mod types;

pub use loader::{load_coverage_evidence, load_execution_evidence, load_links};
pub use types::{CoverageEvidence, ExecutionEvidence, ExplicitLink, FileCoverage};
