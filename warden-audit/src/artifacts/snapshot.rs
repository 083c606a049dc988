//! Append-only audit snapshots: one UTC-timestamp-named directory per run
//! holding copies of all three artifacts. Existing snapshot directories
//! are never overwritten or deleted.

use std::path::{Path, PathBuf};

use chrono::Utc;
use tracing::info;

use warden_core::constants::SNAPSHOT_DIR;
use warden_core::errors::ArtifactError;

/// Write a snapshot directory under `<output_dir>/snapshots/`.
///
/// A timestamp collision (two runs inside one second) gets a numeric
/// suffix rather than touching the existing directory.
pub fn write_snapshot(
    output_dir: &Path,
    files: &[(&str, &str)],
) -> Result<PathBuf, ArtifactError> {
    let stamp = Utc::now().format("%Y%m%dT%H%M%SZ").to_string();
    let base = output_dir.join(SNAPSHOT_DIR);

    let mut dir = base.join(&stamp);
    let mut suffix = 0u32;
    while dir.exists() {
        suffix += 1;
        dir = base.join(format!("{stamp}-{suffix}"));
    }

    std::fs::create_dir_all(&dir).map_err(|e| ArtifactError::Io {
        path: dir.clone(),
        message: e.to_string(),
    })?;

    for (name, content) in files {
        let path = dir.join(name);
        std::fs::write(&path, content).map_err(|e| ArtifactError::Io {
            path: path.clone(),
            message: e.to_string(),
        })?;
    }

    info!(snapshot = %dir.display(), "wrote audit snapshot");
    Ok(dir)
}
