use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use crate::error::Result;
use crate::filter::PathFilter;

/// Collect every regular file under `root` that the filter selects.
///
/// Excluded directories are pruned, so nothing below them is visited. The
/// root itself is always entered. Symlinks are not followed.
pub fn collect_candidates(root: &Path, filter: &PathFilter) -> Result<Vec<PathBuf>> {
    let walker = WalkDir::new(root)
        .follow_links(false)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|entry| {
            if entry.depth() == 0 || !entry.file_type().is_dir() {
                return true;
            }
            let visit = filter.should_visit_dir(relative(root, entry.path()));
            if !visit {
                tracing::debug!("Pruning {}", entry.path().display());
            }
            visit
        });

    let mut candidates = Vec::new();
    for entry in walker {
        let entry = entry?;
        if !entry.file_type().is_file() {
            continue;
        }
        if filter.should_process_file(relative(root, entry.path())) {
            candidates.push(entry.into_path());
        }
    }

    Ok(candidates)
}

fn relative<'a>(root: &Path, path: &'a Path) -> &'a Path {
    path.strip_prefix(root).unwrap_or(path)
}
