//! Body text normalization.
//!
//! Clipped bodies are a mix of Markdown and leftover HTML. Before any
//! length heuristics run, tags are stripped and whitespace is collapsed so
//! that word and character counts reflect readable text only.

use std::sync::LazyLock;

use regex::Regex;

static MARKUP_TAG: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<[^>]+>").unwrap());
static WHITESPACE_RUN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").unwrap());
static WORD: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\w+").unwrap());

/// Remove `<...>` spans and collapse whitespace runs into single spaces.
pub fn strip_markup(body: &str) -> String {
    let without_tags = MARKUP_TAG.replace_all(body, "");
    WHITESPACE_RUN
        .replace_all(&without_tags, " ")
        .trim()
        .to_string()
}

/// Count maximal runs of word characters (Unicode letters, digits, `_`).
pub fn count_words(text: &str) -> usize {
    if text.is_empty() {
        return 0;
    }
    WORD.find_iter(text).count()
}

/// Normalized body text with the measurements the classifier needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentStats {
    pub plain_text: String,
    pub word_count: usize,
    /// Length in Unicode scalar values, not bytes.
    pub char_count: usize,
}

impl ContentStats {
    pub fn from_body(body: &str) -> Self {
        let plain_text = strip_markup(body);
        let word_count = count_words(&plain_text);
        let char_count = plain_text.chars().count();
        Self {
            plain_text,
            word_count,
            char_count,
        }
    }
}
