//! Bounded fan-out of file rewrites.
//!
//! One blocking task per file, admitted through a semaphore sized by
//! `SortConfig::max_in_flight`. Every task reports its own outcome; a failed
//! file never stops the others.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use tokio::sync::Semaphore;
use tokio::task::JoinSet;

use crate::config::SortConfig;
use crate::error::{PsortError, Result};
use crate::filter::PathFilter;
use crate::rewriter::{self, RewriteStats};
use crate::sorter::BlockSorter;
use crate::walker;

/// Result of one file's rewrite.
#[derive(Debug)]
pub struct FileOutcome {
    pub path: PathBuf,
    pub result: Result<RewriteStats>,
}

impl FileOutcome {
    pub fn is_ok(&self) -> bool {
        self.result.is_ok()
    }
}

/// Per-file outcomes of a directory run, in completion order.
#[derive(Debug, Default)]
pub struct RunReport {
    pub outcomes: Vec<FileOutcome>,
}

impl RunReport {
    pub fn attempted(&self) -> usize {
        self.outcomes.len()
    }

    pub fn succeeded(&self) -> usize {
        self.outcomes.iter().filter(|o| o.is_ok()).count()
    }

    pub fn failed(&self) -> usize {
        self.attempted() - self.succeeded()
    }

    pub fn failures(&self) -> impl Iterator<Item = (&Path, &PsortError)> {
        self.outcomes
            .iter()
            .filter_map(|o| o.result.as_ref().err().map(|e| (o.path.as_path(), e)))
    }
}

/// Single-file mode: include/exclude are not consulted.
pub fn process_single(path: &Path, config: &SortConfig) -> Result<RewriteStats> {
    let sorter = BlockSorter::from_config(config);
    rewrite_one(path, &sorter)
}

/// Directory mode: walk `root`, then rewrite every selected file.
///
/// Fails only if the walk itself fails, in which case no file is touched.
pub async fn run_directory(root: &Path, config: Arc<SortConfig>) -> Result<RunReport> {
    let filter = PathFilter::from_config(&config);
    let walk_root = root.to_path_buf();

    let candidates = tokio::task::spawn_blocking(move || {
        walker::collect_candidates(&walk_root, &filter)
    })
    .await
    .map_err(|source| PsortError::Worker {
        path: root.to_path_buf(),
        source,
    })??;

    tracing::debug!("{} file(s) selected under {}", candidates.len(), root.display());

    Ok(process_all(candidates, config).await)
}

/// Per-file work run by [`process_all_with`].
pub type FileJob = Arc<dyn Fn(&Path) -> Result<RewriteStats> + Send + Sync>;

/// Rewrite `paths` with at most `config.concurrency()` in flight.
pub async fn process_all(paths: Vec<PathBuf>, config: Arc<SortConfig>) -> RunReport {
    let sorter = BlockSorter::from_config(&config);
    let job: FileJob = Arc::new(move |path: &Path| rewrite_one(path, &sorter));
    process_all_with(paths, config.concurrency(), job).await
}

/// Run `job` once per path on the blocking pool, at most `max_in_flight` at a
/// time (0 is treated as 1). A job that panics is reported as a
/// [`PsortError::Worker`] for its path.
pub async fn process_all_with(
    paths: Vec<PathBuf>,
    max_in_flight: usize,
    job: FileJob,
) -> RunReport {
    let semaphore = Arc::new(Semaphore::new(max_in_flight.max(1)));
    let mut join_set = JoinSet::new();
    let mut in_flight = HashMap::new();

    for path in paths {
        // The semaphore is never closed, so this only waits for a free slot.
        let Ok(permit) = semaphore.clone().acquire_owned().await else {
            break;
        };

        let job = job.clone();
        let task_path = path.clone();
        let handle = join_set.spawn_blocking(move || {
            let _permit = permit;
            let result = job(&task_path);
            FileOutcome {
                path: task_path,
                result,
            }
        });
        in_flight.insert(handle.id(), path);
    }

    let mut report = RunReport::default();
    while let Some(joined) = join_set.join_next_with_id().await {
        let outcome = match joined {
            Ok((id, outcome)) => {
                in_flight.remove(&id);
                outcome
            }
            Err(source) => {
                let path = in_flight.remove(&source.id()).unwrap_or_default();
                tracing::error!("Error processing {}: worker failed: {}", path.display(), source);
                FileOutcome {
                    result: Err(PsortError::Worker {
                        path: path.clone(),
                        source,
                    }),
                    path,
                }
            }
        };
        report.outcomes.push(outcome);
    }

    report
}

fn rewrite_one(path: &Path, sorter: &BlockSorter) -> Result<RewriteStats> {
    tracing::info!("Processing {}...", path.display());

    match rewriter::rewrite_file(path, sorter) {
        Ok(stats) => {
            tracing::debug!(
                "Sorted {} block(s) across {} line(s) in {}",
                stats.blocks_sorted,
                stats.lines_read,
                path.display()
            );
            Ok(stats)
        }
        Err(e) => {
            tracing::error!("Error processing {}: {}", path.display(), e);
            Err(e)
        }
    }
}
