//! Per-document transform: decode, classify, merge, re-encode.
//!
//! [`process_document`] is pure. It never touches the filesystem and only
//! returns new text when at least one managed key changed.

use serde::Serialize;
use serde_yaml::Value;

use crate::classify::{Classification, Classifier};
use crate::frontmatter::{decode, encode, FrontmatterError};
use crate::models::{Frontmatter, KEY_CLIP_KIND, KEY_NEEDS_RECLIP, KEY_TAGS};

/// Which managed keys a run changed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ClipUpdate {
    pub clip_kind: bool,
    pub tags: bool,
    pub needs_reclip: bool,
}

impl ClipUpdate {
    pub fn is_empty(&self) -> bool {
        !(self.clip_kind || self.tags || self.needs_reclip)
    }

    /// Names of the changed keys, in write order.
    pub fn changed_keys(&self) -> Vec<&'static str> {
        let mut keys = Vec::new();
        if self.clip_kind {
            keys.push(KEY_CLIP_KIND);
        }
        if self.tags {
            keys.push(KEY_TAGS);
        }
        if self.needs_reclip {
            keys.push(KEY_NEEDS_RECLIP);
        }
        keys
    }
}

/// Merge a classification into the frontmatter in place.
///
/// - `clip_kind` is overwritten when it differs from the stored string.
/// - `tags` is rewritten when the sorted stored list (duplicates included)
///   differs from the derived set.
/// - `needs_reclip` is only ever set to `true`, never cleared.
pub fn apply_classification(frontmatter: &mut Frontmatter, classification: &Classification) -> ClipUpdate {
    let mut update = ClipUpdate::default();

    let kind = classification.kind.as_str();
    if frontmatter.get_str(KEY_CLIP_KIND) != Some(kind) {
        frontmatter.set(KEY_CLIP_KIND, Value::String(kind.to_string()));
        update.clip_kind = true;
    }

    let mut prior = frontmatter.tags();
    prior.sort();
    if prior != classification.tags {
        let tags = classification
            .tags
            .iter()
            .cloned()
            .map(Value::String)
            .collect();
        frontmatter.set(KEY_TAGS, Value::Sequence(tags));
        update.tags = true;
    }

    if classification.needs_reclip && !frontmatter.is_truthy(KEY_NEEDS_RECLIP) {
        frontmatter.set(KEY_NEEDS_RECLIP, Value::Bool(true));
        update.needs_reclip = true;
    }

    update
}

/// Result of transforming one document.
#[derive(Debug, Clone)]
pub struct ProcessedDocument {
    pub classification: Classification,
    pub update: ClipUpdate,
    /// Rewritten document text, present only when `update` is non-empty.
    pub rewritten: Option<String>,
}

/// Decode `raw`, classify it, and re-encode it if anything changed.
///
/// Malformed documents are reported as errors and must be left untouched
/// by the caller.
pub fn process_document(raw: &str, classifier: &Classifier) -> Result<ProcessedDocument, FrontmatterError> {
    let (mut frontmatter, body) = decode(raw)?;
    let classification = classifier.classify(&frontmatter.fields(), &body);
    let update = apply_classification(&mut frontmatter, &classification);

    let rewritten = if update.is_empty() {
        None
    } else {
        Some(encode(&frontmatter, &body)?)
    };

    Ok(ProcessedDocument {
        classification,
        update,
        rewritten,
    })
}
