//! Tests for the artifact writer: the three serializations, the stored
//! digest, append-only snapshots, and the integrity guard on replace.

use warden_audit::artifacts::{
    canonical_digest, AuditArtifactWriter, CoverageMap, MapMetadata,
};
use warden_audit::coverage::CoverageSummary;
use warden_core::errors::ArtifactError;

fn sample_map() -> CoverageMap {
    CoverageMap {
        metadata: MapMetadata {
            generated_at: "2026-08-07T12:00:00Z".to_string(),
            repository_commit: Some("abc123".to_string()),
        },
        summary: CoverageSummary {
            rules_total: 0,
            rules_enforced: 0,
            rules_partially_enforced: 0,
            rules_implementable_or_declared_only: 0,
            rules_unknown: 0,
            execution_rate: 100.0,
        },
        entries: vec![],
    }
}

#[test]
fn writes_three_artifacts_plus_digest_and_snapshot() {
    let dir = tempfile::TempDir::new().unwrap();
    let writer = AuditArtifactWriter::new(dir.path());

    let paths = writer.write(&sample_map(), "# report\n").unwrap();

    assert!(paths.canonical.exists());
    assert!(paths.duplicate.exists());
    assert!(paths.report.exists());
    assert!(paths.digest.exists());
    assert!(paths.snapshot.is_dir());
    assert!(paths.snapshot.join("coverage_map.json").exists());
    assert!(paths.snapshot.join("coverage_map.yaml").exists());
    assert!(paths.snapshot.join("coverage_report.md").exists());
}

#[test]
fn duplicate_serialization_has_identical_content() {
    let dir = tempfile::TempDir::new().unwrap();
    let writer = AuditArtifactWriter::new(dir.path());
    let paths = writer.write(&sample_map(), "# report\n").unwrap();

    let from_json: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&paths.canonical).unwrap()).unwrap();
    let from_yaml: serde_json::Value =
        serde_yaml::from_str(&std::fs::read_to_string(&paths.duplicate).unwrap()).unwrap();
    assert_eq!(from_json, from_yaml);
}

#[test]
fn stored_digest_matches_canonical_artifact() {
    let dir = tempfile::TempDir::new().unwrap();
    let writer = AuditArtifactWriter::new(dir.path());
    let paths = writer.write(&sample_map(), "# report\n").unwrap();

    let stored = std::fs::read_to_string(&paths.digest).unwrap();
    let artifact: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&paths.canonical).unwrap()).unwrap();
    assert_eq!(stored.trim(), canonical_digest(&artifact));
}

#[test]
fn snapshots_are_append_only() {
    let dir = tempfile::TempDir::new().unwrap();
    let writer = AuditArtifactWriter::new(dir.path());

    let first = writer.write(&sample_map(), "# first\n").unwrap();
    let first_report =
        std::fs::read_to_string(first.snapshot.join("coverage_report.md")).unwrap();

    let second = writer.write(&sample_map(), "# second\n").unwrap();

    assert_ne!(first.snapshot, second.snapshot);
    // The first snapshot is untouched by the second run.
    let first_report_after =
        std::fs::read_to_string(first.snapshot.join("coverage_report.md")).unwrap();
    assert_eq!(first_report, first_report_after);

    let snapshots = std::fs::read_dir(dir.path().join("snapshots")).unwrap().count();
    assert_eq!(snapshots, 2);
}

#[test]
fn tampered_artifact_aborts_the_replace() {
    let dir = tempfile::TempDir::new().unwrap();
    let writer = AuditArtifactWriter::new(dir.path());
    let paths = writer.write(&sample_map(), "# report\n").unwrap();

    // Tamper with the exported record set after the digest was stored.
    let mut tampered: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&paths.canonical).unwrap()).unwrap();
    tampered["summary"]["rules_total"] = serde_json::json!(999);
    std::fs::write(&paths.canonical, tampered.to_string()).unwrap();

    let report_before = std::fs::read_to_string(&paths.report).unwrap();
    let err = writer.write(&sample_map(), "# new report\n").unwrap_err();
    assert!(matches!(err, ArtifactError::IntegrityMismatch { .. }));

    // Abort happened before any mutation.
    assert_eq!(std::fs::read_to_string(&paths.report).unwrap(), report_before);
    let snapshots = std::fs::read_dir(dir.path().join("snapshots")).unwrap().count();
    assert_eq!(snapshots, 1);
}

#[test]
fn missing_digest_is_a_first_run_not_a_mismatch() {
    let dir = tempfile::TempDir::new().unwrap();
    let writer = AuditArtifactWriter::new(dir.path());
    let paths = writer.write(&sample_map(), "# report\n").unwrap();

    std::fs::remove_file(&paths.digest).unwrap();
    assert!(writer.write(&sample_map(), "# report\n").is_ok());
}

#[test]
fn clean_rerun_passes_the_integrity_guard() {
    let dir = tempfile::TempDir::new().unwrap();
    let writer = AuditArtifactWriter::new(dir.path());

    writer.write(&sample_map(), "# report\n").unwrap();
    // Untampered artifacts verify and the replace proceeds.
    assert!(writer.write(&sample_map(), "# report\n").is_ok());
}
