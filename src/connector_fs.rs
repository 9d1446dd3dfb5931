//! Clippings tree enumeration and the folder-date eligibility window.
//!
//! Clips live in folders named after the day they were captured
//! (`Clippings/2025-12-20/Some page.md`). Only files whose immediate parent
//! folder parses as a date inside the configured window are processed;
//! anything else is enumerated (and counted) but skipped.

use anyhow::{bail, Result};
use chrono::NaiveDate;
use globset::{Glob, GlobSet, GlobSetBuilder};
use regex::Regex;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;
use walkdir::WalkDir;

use crate::config::Config;

static DATE_PREFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{4}-\d{2}-\d{2}").unwrap());

/// Inclusive date range for folder eligibility. `until` is open-ended when
/// unset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateWindow {
    pub since: NaiveDate,
    pub until: Option<NaiveDate>,
}

impl DateWindow {
    pub fn new(since: NaiveDate, until: Option<NaiveDate>) -> Self {
        Self { since, until }
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.since && self.until.map_or(true, |until| date <= until)
    }

    /// Whether a folder name is a valid `YYYY-MM-DD` date inside the window.
    pub fn admits_folder(&self, name: &str) -> bool {
        folder_date(name).is_some_and(|date| self.contains(date))
    }
}

/// Parse a folder name as an exact `YYYY-MM-DD` calendar date.
pub fn folder_date(name: &str) -> Option<NaiveDate> {
    if !DATE_PREFIX.is_match(name) {
        return None;
    }
    NaiveDate::parse_from_str(name, "%Y-%m-%d").ok()
}

/// A file found under the clippings root.
#[derive(Debug, Clone)]
pub struct ClipFile {
    pub path: PathBuf,
    pub relative: String,
    pub eligible: bool,
}

/// Result of walking the clippings root.
#[derive(Debug, Default)]
pub struct Discovery {
    /// Files matching the include globs, sorted by relative path.
    pub files: Vec<ClipFile>,
    /// Entries the walker could not read, with the error message.
    pub unreadable: Vec<(PathBuf, String)>,
}

impl Discovery {
    pub fn eligible(&self) -> impl Iterator<Item = &ClipFile> {
        self.files.iter().filter(|f| f.eligible)
    }
}

pub fn is_eligible(path: &Path, window: &DateWindow) -> bool {
    path.parent()
        .and_then(Path::file_name)
        .and_then(|name| name.to_str())
        .is_some_and(|name| window.admits_folder(name))
}

pub fn scan_clippings(config: &Config) -> Result<Discovery> {
    let fs_config = &config.clippings;
    let root = config.root()?;
    if !root.is_dir() {
        bail!("Clippings root does not exist: {}", root.display());
    }

    let include_set = build_globset(&fs_config.include_globs)?;

    let mut default_excludes = vec![
        "**/.git/**".to_string(),
        "**/.obsidian/**".to_string(),
        "**/.trash/**".to_string(),
    ];
    default_excludes.extend(fs_config.exclude_globs.clone());
    let exclude_set = build_globset(&default_excludes)?;

    let window = config.window();
    let mut discovery = Discovery::default();

    let walker = WalkDir::new(root).follow_links(fs_config.follow_symlinks);
    for entry in walker {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                let path = e.path().map(Path::to_path_buf).unwrap_or_else(|| root.to_path_buf());
                discovery.unreadable.push((path, e.to_string()));
                continue;
            }
        };
        if !entry.file_type().is_file() {
            continue;
        }

        let path = entry.path();
        let relative = path.strip_prefix(root).unwrap_or(path);
        let rel_str = relative.to_string_lossy().to_string();

        if exclude_set.is_match(&rel_str) {
            continue;
        }

        if !include_set.is_match(&rel_str) {
            continue;
        }

        discovery.files.push(ClipFile {
            path: path.to_path_buf(),
            relative: rel_str,
            eligible: is_eligible(path, &window),
        });
    }

    // Sort for deterministic ordering
    discovery.files.sort_by(|a, b| a.relative.cmp(&b.relative));

    Ok(discovery)
}

pub fn build_globset(patterns: &[String]) -> Result<GlobSet> {
    let mut builder = GlobSetBuilder::new();
    for pattern in patterns {
        builder.add(Glob::new(pattern)?);
    }
    Ok(builder.build()?)
}
