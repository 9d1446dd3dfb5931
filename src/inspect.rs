//! Single-file report.
//!
//! Shows how one clip would be classified and which keys a run would
//! change, without writing anything. Used by `cliptidy inspect`.

use anyhow::{Context, Result};
use clip_tidy_core::classify::Classifier;
use clip_tidy_core::frontmatter::decode;
use clip_tidy_core::models::ClipKind;
use clip_tidy_core::pipeline::{apply_classification, ClipUpdate};
use serde::Serialize;
use std::path::Path;

use crate::config::Config;

/// Classification report for one file.
#[derive(Debug, Clone, Serialize)]
pub struct InspectReport {
    pub path: String,
    pub title: Option<String>,
    pub url: Option<String>,
    pub clip_kind: ClipKind,
    pub stored_clip_kind: Option<String>,
    pub tags: Vec<String>,
    pub word_count: usize,
    pub char_count: usize,
    pub needs_reclip: bool,
    pub changes: ClipUpdate,
}

pub fn inspect_file(path: &Path, classifier: &Classifier) -> Result<InspectReport> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let (mut frontmatter, body) =
        decode(&raw).with_context(|| format!("Cannot tidy {}", path.display()))?;

    let fields = frontmatter.fields();
    let classification = classifier.classify(&fields, &body);
    let changes = apply_classification(&mut frontmatter, &classification);

    Ok(InspectReport {
        path: path.display().to_string(),
        title: fields.title,
        url: fields.url,
        clip_kind: classification.kind,
        stored_clip_kind: fields.clip_kind,
        tags: classification.tags,
        word_count: classification.word_count,
        char_count: classification.char_count,
        needs_reclip: classification.needs_reclip || fields.needs_reclip,
        changes,
    })
}

pub fn run_inspect(config: &Config, path: &Path, json: bool) -> Result<()> {
    let classifier = Classifier::new(config.news_domains());
    let report = inspect_file(path, &classifier)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!("{}", report.path);
    println!("  title:        {}", report.title.as_deref().unwrap_or("(none)"));
    println!("  url:          {}", report.url.as_deref().unwrap_or("(none)"));
    println!(
        "  clip_kind:    {} (stored: {})",
        report.clip_kind,
        report.stored_clip_kind.as_deref().unwrap_or("none")
    );
    println!("  tags:         {}", report.tags.join(", "));
    println!(
        "  words/chars:  {} / {}",
        report.word_count, report.char_count
    );
    println!("  needs_reclip: {}", report.needs_reclip);
    if report.changes.is_empty() {
        println!("  changes:      none");
    } else {
        println!("  changes:      {}", report.changes.changed_keys().join(", "));
    }

    Ok(())
}
