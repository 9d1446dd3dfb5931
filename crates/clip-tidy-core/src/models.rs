//! Core data models used throughout clip-tidy.
//!
//! A clipped document is a [`Frontmatter`] block (an insertion-ordered YAML
//! mapping) followed by a free-form body. [`ClipFields`] is the typed view
//! over the keys the classifier reads, and [`ClipKind`] is the closed set of
//! categories a clip can be assigned.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_yaml::{Mapping, Value};

pub const KEY_URL: &str = "url";
pub const KEY_TYPE: &str = "type";
pub const KEY_SOURCE: &str = "source";
pub const KEY_SELECTION_ONLY: &str = "selectionOnly";
pub const KEY_IMAGE_ONLY: &str = "imageOnly";
pub const KEY_TITLE: &str = "title";
pub const KEY_TAGS: &str = "tags";
pub const KEY_CLIP_KIND: &str = "clip_kind";
pub const KEY_NEEDS_RECLIP: &str = "needs_reclip";

/// Keys with a dedicated field in [`ClipFields`]. Everything else lands in
/// [`ClipFields::extra`].
const KNOWN_KEYS: [&str; 9] = [
    KEY_URL,
    KEY_TYPE,
    KEY_SOURCE,
    KEY_SELECTION_ONLY,
    KEY_IMAGE_ONLY,
    KEY_TITLE,
    KEY_TAGS,
    KEY_CLIP_KIND,
    KEY_NEEDS_RECLIP,
];

/// Inferred category of a clip. Exactly one per document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ClipKind {
    Tweet,
    Selection,
    Image,
    Video,
    Repo,
    News,
    Bookmark,
    Article,
}

impl ClipKind {
    pub const ALL: [ClipKind; 8] = [
        ClipKind::Tweet,
        ClipKind::Selection,
        ClipKind::Image,
        ClipKind::Video,
        ClipKind::Repo,
        ClipKind::News,
        ClipKind::Bookmark,
        ClipKind::Article,
    ];

    /// The value written to the `clip_kind` key.
    pub fn as_str(&self) -> &'static str {
        match self {
            ClipKind::Tweet => "tweet",
            ClipKind::Selection => "selection",
            ClipKind::Image => "image",
            ClipKind::Video => "video",
            ClipKind::Repo => "repo",
            ClipKind::News => "news",
            ClipKind::Bookmark => "bookmark",
            ClipKind::Article => "article",
        }
    }
}

impl fmt::Display for ClipKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Typed view over the frontmatter keys the classifier consumes.
///
/// Missing keys and values of the wrong YAML type read as `None`, `false`
/// or empty. Unrecognized keys are kept in `extra` in their original order.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ClipFields {
    pub url: Option<String>,
    pub declared_type: Option<String>,
    pub source: Option<String>,
    pub selection_only: bool,
    pub image_only: bool,
    pub title: Option<String>,
    pub tags: Vec<String>,
    pub clip_kind: Option<String>,
    pub needs_reclip: bool,
    pub extra: Mapping,
}

/// Insertion-ordered metadata block of a clipped document.
///
/// Updating an existing key keeps its position; new keys are appended.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Frontmatter {
    fields: Mapping,
}

impl Frontmatter {
    pub fn new(fields: Mapping) -> Self {
        Self { fields }
    }

    pub fn mapping(&self) -> &Mapping {
        &self.fields
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    /// String value of `key`, or `None` when absent or not a string.
    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(Value::as_str)
    }

    /// YAML truthiness of `key`; absent keys are false.
    pub fn is_truthy(&self, key: &str) -> bool {
        self.get(key).is_some_and(is_truthy)
    }

    /// Tags in stored order, duplicates included.
    ///
    /// Accepts a sequence or a single scalar. Numbers and booleans are
    /// stringified so they survive a rewrite; nulls and nested collections
    /// are ignored.
    pub fn tags(&self) -> Vec<String> {
        match self.get(KEY_TAGS) {
            Some(Value::Sequence(items)) => items.iter().filter_map(scalar_to_string).collect(),
            Some(value) => scalar_to_string(value).into_iter().collect(),
            None => Vec::new(),
        }
    }

    pub fn set(&mut self, key: &str, value: Value) {
        self.fields.insert(Value::String(key.to_string()), value);
    }

    pub fn fields(&self) -> ClipFields {
        let extra = self
            .fields
            .iter()
            .filter(|(k, _)| !k.as_str().is_some_and(|k| KNOWN_KEYS.contains(&k)))
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect();

        ClipFields {
            url: self.get_str(KEY_URL).map(str::to_string),
            declared_type: self.get_str(KEY_TYPE).map(str::to_string),
            source: self.get_str(KEY_SOURCE).map(str::to_string),
            selection_only: self.is_truthy(KEY_SELECTION_ONLY),
            image_only: self.is_truthy(KEY_IMAGE_ONLY),
            title: self.get_str(KEY_TITLE).map(str::to_string),
            tags: self.tags(),
            clip_kind: self.get_str(KEY_CLIP_KIND).map(str::to_string),
            needs_reclip: self.is_truthy(KEY_NEEDS_RECLIP),
            extra,
        }
    }
}

/// Plain scalars that YAML 1.1 readers resolve to `false`. serde_yaml
/// follows YAML 1.2 and keeps them as strings.
const YAML11_FALSE_WORDS: [&str; 6] = ["no", "No", "NO", "off", "Off", "OFF"];

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map_or(true, |f| f != 0.0),
        Value::String(s) => !s.is_empty() && !YAML11_FALSE_WORDS.contains(&s.as_str()),
        Value::Sequence(s) => !s.is_empty(),
        Value::Mapping(m) => !m.is_empty(),
        Value::Tagged(tagged) => is_truthy(&tagged.value),
    }
}

fn scalar_to_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}
