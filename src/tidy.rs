//! Batch driver.
//!
//! Walks the clippings root, runs every eligible file through
//! [`process_document`], and writes back only files whose managed keys
//! changed.
//!
//! # Failure policy
//!
//! - Files without a parsable frontmatter block are skipped silently and
//!   counted as `malformed`. This includes blocks that repeat a key.
//! - Files that cannot be read (including non-UTF-8 content) or written are
//!   skipped, reported on stderr, and counted as `failed`. The run carries
//!   on with the next file.
//! - A missing root or invalid configuration aborts the run.
//!
//! A file is fully read and transformed before any write is attempted, and
//! writes replace the whole file.

use anyhow::{Context, Result};
use clip_tidy_core::classify::Classifier;
use clip_tidy_core::frontmatter::FrontmatterError;
use clip_tidy_core::pipeline::{process_document, ClipUpdate};
use serde::Serialize;
use std::path::Path;

use crate::config::Config;
use crate::connector_fs::scan_clippings;
use crate::progress::{TidyProgressEvent, TidyProgressReporter};

#[derive(Debug, Clone, Copy, Default)]
pub struct TidyOptions {
    /// Compute changes without writing.
    pub dry_run: bool,
    /// Stop after this many eligible files.
    pub limit: Option<usize>,
}

/// Counters for one run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct TidyStats {
    /// Files under the root matching the include globs.
    pub scanned: usize,
    /// Scanned files inside an in-window dated folder.
    pub eligible: usize,
    pub updated: usize,
    pub unchanged: usize,
    pub malformed: usize,
    pub failed: usize,
}

/// What happened to a single file.
#[derive(Debug)]
pub enum FileOutcome {
    Unchanged,
    Updated(ClipUpdate),
    Malformed(FrontmatterError),
    Failed(anyhow::Error),
}

/// Read, transform, and (unless `dry_run`) rewrite one file.
pub fn tidy_file(path: &Path, classifier: &Classifier, dry_run: bool) -> FileOutcome {
    let raw = match std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))
    {
        Ok(raw) => raw,
        Err(e) => return FileOutcome::Failed(e),
    };

    let processed = match process_document(&raw, classifier) {
        Ok(processed) => processed,
        Err(e) => return FileOutcome::Malformed(e),
    };

    let Some(rewritten) = processed.rewritten else {
        return FileOutcome::Unchanged;
    };

    if !dry_run {
        if let Err(e) = std::fs::write(path, rewritten)
            .with_context(|| format!("Failed to write {}", path.display()))
        {
            return FileOutcome::Failed(e);
        }
    }

    FileOutcome::Updated(processed.update)
}

pub fn run_tidy(
    config: &Config,
    options: TidyOptions,
    progress: &dyn TidyProgressReporter,
) -> Result<TidyStats> {
    let root = config.root()?;
    progress.report(TidyProgressEvent::Discovering {
        root: root.display().to_string(),
    });

    let discovery = scan_clippings(config)?;
    for (path, error) in &discovery.unreadable {
        progress.report(TidyProgressEvent::Failed {
            path: path.display().to_string(),
            error: error.clone(),
        });
    }

    let classifier = Classifier::new(config.news_domains());
    let eligible: Vec<_> = discovery
        .eligible()
        .take(options.limit.unwrap_or(usize::MAX))
        .collect();
    let total = eligible.len() as u64;

    let mut stats = TidyStats {
        scanned: discovery.files.len(),
        eligible: eligible.len(),
        failed: discovery.unreadable.len(),
        ..Default::default()
    };

    for (i, file) in eligible.iter().enumerate() {
        match tidy_file(&file.path, &classifier, options.dry_run) {
            FileOutcome::Unchanged => stats.unchanged += 1,
            FileOutcome::Updated(update) => {
                stats.updated += 1;
                progress.report(TidyProgressEvent::Updated {
                    path: file.relative.clone(),
                    changes: update.changed_keys(),
                    dry_run: options.dry_run,
                });
            }
            FileOutcome::Malformed(reason) => {
                stats.malformed += 1;
                progress.report(TidyProgressEvent::Skipped {
                    path: file.relative.clone(),
                    reason: reason.to_string(),
                });
            }
            FileOutcome::Failed(e) => {
                stats.failed += 1;
                progress.report(TidyProgressEvent::Failed {
                    path: file.relative.clone(),
                    error: format!("{:#}", e),
                });
            }
        }

        let n = i as u64 + 1;
        if n % 100 == 0 || n == total {
            progress.report(TidyProgressEvent::Processing { n, total });
        }
    }

    Ok(stats)
}

/// Print the run summary on stdout.
pub fn print_summary(stats: &TidyStats, dry_run: bool) {
    let verb = if dry_run { "would update" } else { "updated" };
    println!(
        "Processed {} files, {} {} files.",
        stats.scanned, verb, stats.updated
    );
    println!(
        "  eligible: {}  unchanged: {}  malformed: {}  failed: {}",
        stats.eligible, stats.unchanged, stats.malformed, stats.failed
    );
}
