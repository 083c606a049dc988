//! The canonical coverage-map artifact shape.

use serde::{Deserialize, Serialize};

use crate::coverage::CoverageSummary;
use crate::reconcile::EnforcementRecord;

/// Artifact metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MapMetadata {
    /// RFC 3339 UTC timestamp of the run.
    pub generated_at: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub repository_commit: Option<String>,
}

/// The canonical structured artifact. Serialized with stable key order
/// (maps serialize sorted), once as JSON and once as YAML with identical
/// content.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CoverageMap {
    pub metadata: MapMetadata,
    pub summary: CoverageSummary,
    pub entries: Vec<EnforcementRecord>,
}
