//! Shared constants: artifact file names and compiled defaults.

/// Canonical structured artifact (stable key order).
pub const COVERAGE_MAP_JSON: &str = "coverage_map.json";

/// Duplicate serialization of the canonical artifact.
pub const COVERAGE_MAP_YAML: &str = "coverage_map.yaml";

/// Human-readable audit report.
pub const COVERAGE_REPORT_MD: &str = "coverage_report.md";

/// Digest stored beside the canonical artifact.
pub const COVERAGE_MAP_DIGEST: &str = "coverage_map.digest";

/// Directory holding per-run snapshot directories.
pub const SNAPSHOT_DIR: &str = "snapshots";

/// Default output directory, relative to the project root.
pub const DEFAULT_OUTPUT_DIR: &str = ".warden";

/// Default number of gaps rendered in the human-readable report.
pub const DEFAULT_TOP_GAPS: usize = 10;

/// Default line window scanned above a definition for a stable-id marker.
pub const DEFAULT_ID_WINDOW: usize = 8;
