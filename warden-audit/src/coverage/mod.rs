//! Coverage computation: aggregate summaries, threshold gates over
//! source-coverage evidence, and gap ranking.

pub mod computer;
pub mod gaps;
pub mod thresholds;

pub use computer::{execution_rate, CoverageComputer, CoverageSummary, PolicyBreakdown};
pub use gaps::{rank_gaps, Gap};
pub use thresholds::{evaluate_thresholds, parse_threshold};
