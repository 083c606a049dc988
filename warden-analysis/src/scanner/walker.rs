//! File discovery over the source roots.

use std::path::{Path, PathBuf};

use ignore::WalkBuilder;
use tracing::debug;

/// Collect Python source files under the given roots, honoring gitignore
/// rules plus any extra ignore globs. Oversize files are skipped.
pub fn collect_source_files(
    project_root: &Path,
    source_roots: &[String],
    max_size: u64,
    follow_symlinks: bool,
    extra_ignore: &[String],
) -> Vec<PathBuf> {
    let extra: Vec<glob::Pattern> = extra_ignore
        .iter()
        .filter_map(|g| glob::Pattern::new(g).ok())
        .collect();

    let mut files = Vec::new();
    for root in source_roots {
        let base = project_root.join(root);
        if !base.exists() {
            debug!(root = %base.display(), "source root does not exist, skipping");
            continue;
        }

        let walk = WalkBuilder::new(&base)
            .follow_links(follow_symlinks)
            .hidden(true)
            .build();

        for entry in walk.flatten() {
            let path = entry.path();
            if !entry.file_type().is_some_and(|t| t.is_file()) {
                continue;
            }
            let is_python = path
                .extension()
                .and_then(|e| e.to_str())
                .is_some_and(|e| e == "py" || e == "pyi");
            if !is_python {
                continue;
            }
            if let Ok(meta) = entry.metadata() {
                if meta.len() > max_size {
                    debug!(path = %path.display(), size = meta.len(), "skipping oversize file");
                    continue;
                }
            }
            let rel = path.strip_prefix(project_root).unwrap_or(path);
            let rel_str = rel.to_string_lossy().replace('\\', "/");
            if extra.iter().any(|p| p.matches(&rel_str)) {
                continue;
            }
            files.push(path.to_path_buf());
        }
    }

    files.sort();
    files
}
