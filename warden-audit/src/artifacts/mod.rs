//! Audit artifacts: the canonical coverage map, its duplicate
//! serialization, the human-readable report, append-only snapshots, and
//! the canonical digest facility guarding destructive replaces.

pub mod digest;
pub mod report;
pub mod snapshot;
pub mod types;
pub mod writer;

pub use digest::{canonical_digest, canonicalize};
pub use report::{render_report, ReportInputs};
pub use snapshot::write_snapshot;
pub use types::{CoverageMap, MapMetadata};
pub use writer::{ArtifactPaths, AuditArtifactWriter};
