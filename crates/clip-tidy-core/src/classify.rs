//! Clip kind inference, tag synthesis, and reclip flagging.
//!
//! # Decision order
//!
//! [`infer_clip_kind`] checks the rules below top to bottom and returns the
//! first match:
//!
//! | # | Condition | Kind |
//! |---|-----------|------|
//! | 1 | `type` is "tweet" (any case), or `source` is "twitter"/"x" | `tweet` |
//! | 2 | `selectionOnly` is truthy | `selection` |
//! | 3 | `imageOnly` is truthy | `image` |
//! | 4 | URL host is a video platform | `video` |
//! | 5 | URL host is a code host | `repo` |
//! | 6 | URL host is a news domain | `news` |
//! | 7 | URL is a homepage and the body has fewer than 60 words | `bookmark` |
//! | 8 | otherwise | `article` |
//!
//! Tags derived from the kind are merged into the existing tags; user tags
//! are never removed.

use std::collections::BTreeSet;

use crate::content::ContentStats;
use crate::models::{ClipFields, ClipKind};
use crate::url_class::{is_homepage_url, is_news_domain, is_repo_url, is_video_url, NewsDomains};

/// Homepage clips with fewer words than this are bookmarks.
pub const BOOKMARK_MAX_WORDS: usize = 60;

/// Clips under both of these limits are flagged for reclipping.
pub const RECLIP_MAX_WORDS: usize = 25;
pub const RECLIP_MAX_CHARS: usize = 240;

pub const TAG_BOOKMARK: &str = "clipping/bookmark";
pub const TAG_WEB: &str = "clipping/web";
pub const TAG_TO_PROCESS: &str = "to-process";

const TWEET_SOURCES: [&str; 2] = ["twitter", "x"];

pub fn infer_clip_kind(fields: &ClipFields, word_count: usize, news_domains: &NewsDomains) -> ClipKind {
    let declared_type = fields.declared_type.as_deref().unwrap_or("").to_lowercase();
    let source = fields.source.as_deref().unwrap_or("").to_lowercase();
    if declared_type == "tweet" || TWEET_SOURCES.contains(&source.as_str()) {
        return ClipKind::Tweet;
    }
    if fields.selection_only {
        return ClipKind::Selection;
    }
    if fields.image_only {
        return ClipKind::Image;
    }

    let url = fields.url.as_deref().unwrap_or("");
    if url.is_empty() {
        return ClipKind::Article;
    }
    if is_video_url(url) {
        ClipKind::Video
    } else if is_repo_url(url) {
        ClipKind::Repo
    } else if is_news_domain(url, news_domains) {
        ClipKind::News
    } else if is_homepage_url(url) && word_count < BOOKMARK_MAX_WORDS {
        ClipKind::Bookmark
    } else {
        ClipKind::Article
    }
}

/// Tag that marks where a clip came from.
pub fn origin_tag(kind: ClipKind) -> &'static str {
    match kind {
        ClipKind::Bookmark => TAG_BOOKMARK,
        _ => TAG_WEB,
    }
}

/// Additional tag for kinds that have one.
pub fn kind_tag(kind: ClipKind) -> Option<&'static str> {
    match kind {
        ClipKind::News => Some("clipping/news"),
        ClipKind::Repo => Some("clipping/github"),
        ClipKind::Video => Some("clipping/youtube"),
        ClipKind::Tweet => Some("clipping/twitter"),
        ClipKind::Selection => Some("clipping/selection"),
        ClipKind::Image => Some("clipping/image"),
        ClipKind::Article | ClipKind::Bookmark => None,
    }
}

/// Union of `prior` and the tags derived from `kind`, sorted and deduplicated.
pub fn synthesize_tags(prior: &[String], kind: ClipKind) -> Vec<String> {
    let mut tags: BTreeSet<String> = prior.iter().cloned().collect();
    tags.insert(origin_tag(kind).to_string());
    if let Some(tag) = kind_tag(kind) {
        tags.insert(tag.to_string());
    }
    if kind != ClipKind::Bookmark {
        tags.insert(TAG_TO_PROCESS.to_string());
    }
    tags.into_iter().collect()
}

/// Whether the clip is untitled or too thin to be useful.
///
/// Reports the current content only. Keeping an earlier flag set is up to
/// the caller.
pub fn should_flag_reclip(title: Option<&str>, word_count: usize, plain_text: &str) -> bool {
    if title.is_some_and(|t| t.to_lowercase().contains("untitled")) {
        return true;
    }
    word_count < RECLIP_MAX_WORDS && plain_text.chars().count() < RECLIP_MAX_CHARS
}

/// Everything derived for one document in a single pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Classification {
    pub kind: ClipKind,
    pub tags: Vec<String>,
    pub needs_reclip: bool,
    pub word_count: usize,
    pub char_count: usize,
}

/// Classifier configured with the news domain set.
#[derive(Debug, Clone, Default)]
pub struct Classifier {
    news_domains: NewsDomains,
}

impl Classifier {
    pub fn new(news_domains: NewsDomains) -> Self {
        Self { news_domains }
    }

    pub fn news_domains(&self) -> &NewsDomains {
        &self.news_domains
    }

    pub fn classify(&self, fields: &ClipFields, body: &str) -> Classification {
        let stats = ContentStats::from_body(body);
        let kind = infer_clip_kind(fields, stats.word_count, &self.news_domains);
        let tags = synthesize_tags(&fields.tags, kind);
        let needs_reclip =
            should_flag_reclip(fields.title.as_deref(), stats.word_count, &stats.plain_text);

        Classification {
            kind,
            tags,
            needs_reclip,
            word_count: stats.word_count,
            char_count: stats.char_count,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fields_with_url(url: &str) -> ClipFields {
        ClipFields {
            url: Some(url.to_string()),
            ..Default::default()
        }
    }

    fn infer(fields: &ClipFields, words: usize) -> ClipKind {
        infer_clip_kind(fields, words, &NewsDomains::builtin())
    }

    fn words(n: usize) -> String {
        vec!["word"; n].join(" ")
    }

    #[test]
    fn test_no_url_no_flags_is_article() {
        assert_eq!(infer(&ClipFields::default(), 0), ClipKind::Article);
        let fields = ClipFields {
            declared_type: Some("webpage".into()),
            source: Some("web".into()),
            url: Some(String::new()),
            ..Default::default()
        };
        assert_eq!(infer(&fields, 1000), ClipKind::Article);
    }

    #[test]
    fn test_tweet_by_type_or_source() {
        let by_type = ClipFields {
            declared_type: Some("Tweet".into()),
            ..fields_with_url("https://x.com/u/status/1")
        };
        assert_eq!(infer(&by_type, 10), ClipKind::Tweet);

        for source in ["twitter", "X", "Twitter"] {
            let by_source = ClipFields {
                source: Some(source.into()),
                ..Default::default()
            };
            assert_eq!(infer(&by_source, 10), ClipKind::Tweet, "source {}", source);
        }

        let not_tweet = ClipFields {
            source: Some("xcom".into()),
            ..Default::default()
        };
        assert_eq!(infer(&not_tweet, 10), ClipKind::Article);
    }

    #[test]
    fn test_decision_order() {
        // Tweet beats selection.
        let fields = ClipFields {
            declared_type: Some("tweet".into()),
            selection_only: true,
            image_only: true,
            ..fields_with_url("https://youtube.com/watch?v=1")
        };
        assert_eq!(infer(&fields, 0), ClipKind::Tweet);

        // Selection beats image.
        let fields = ClipFields {
            selection_only: true,
            image_only: true,
            ..fields_with_url("https://youtube.com/watch?v=1")
        };
        assert_eq!(infer(&fields, 0), ClipKind::Selection);

        // Image beats video.
        let fields = ClipFields {
            image_only: true,
            ..fields_with_url("https://youtube.com/watch?v=1")
        };
        assert_eq!(infer(&fields, 0), ClipKind::Image);

        // Video beats bookmark even on a bare homepage.
        assert_eq!(infer(&fields_with_url("https://youtube.com/"), 0), ClipKind::Video);

        // News beats bookmark.
        assert_eq!(infer(&fields_with_url("https://www.ft.com/"), 0), ClipKind::News);
    }

    #[test]
    fn test_url_kinds() {
        assert_eq!(infer(&fields_with_url("https://github.com/foo/bar"), 500), ClipKind::Repo);
        assert_eq!(infer(&fields_with_url("https://youtu.be/abc"), 500), ClipKind::Video);
        assert_eq!(
            infer(&fields_with_url("https://www.wired.com/story/x"), 500),
            ClipKind::News
        );
        assert_eq!(
            infer(&fields_with_url("https://example.com/post/1"), 5),
            ClipKind::Article
        );
    }

    #[test]
    fn test_bookmark_word_boundary() {
        let fields = fields_with_url("https://example.com/");
        assert_eq!(infer(&fields, 59), ClipKind::Bookmark);
        assert_eq!(infer(&fields, 60), ClipKind::Article);
        assert_eq!(infer(&fields, 0), ClipKind::Bookmark);
    }

    #[test]
    fn test_custom_news_domains_are_used() {
        let fields = fields_with_url("https://local.example/story");
        let news = NewsDomains::new(["local.example"]);
        assert_eq!(infer_clip_kind(&fields, 500, &news), ClipKind::News);
        assert_eq!(infer(&fields, 500), ClipKind::Article);
    }

    #[test]
    fn test_tag_table() {
        let expected = [
            (ClipKind::News, vec!["clipping/news", "clipping/web", "to-process"]),
            (ClipKind::Repo, vec!["clipping/github", "clipping/web", "to-process"]),
            (ClipKind::Video, vec!["clipping/web", "clipping/youtube", "to-process"]),
            (ClipKind::Tweet, vec!["clipping/twitter", "clipping/web", "to-process"]),
            (ClipKind::Selection, vec!["clipping/selection", "clipping/web", "to-process"]),
            (ClipKind::Image, vec!["clipping/image", "clipping/web", "to-process"]),
            (ClipKind::Article, vec!["clipping/web", "to-process"]),
            (ClipKind::Bookmark, vec!["clipping/bookmark"]),
        ];
        for (kind, tags) in expected {
            assert_eq!(synthesize_tags(&[], kind), tags, "kind {}", kind);
        }
    }

    #[test]
    fn test_tags_keep_prior_and_dedupe() {
        let prior = vec![
            "zeta".to_string(),
            "misc".to_string(),
            "misc".to_string(),
            "to-process".to_string(),
        ];
        let tags = synthesize_tags(&prior, ClipKind::Article);
        assert_eq!(tags, vec!["clipping/web", "misc", "to-process", "zeta"]);
    }

    #[test]
    fn test_tags_are_superset_of_prior_for_every_kind() {
        let prior = vec!["to-process".to_string(), "clipping/web".to_string(), "mine".to_string()];
        for kind in ClipKind::ALL {
            let tags = synthesize_tags(&prior, kind);
            for tag in &prior {
                assert!(tags.contains(tag), "{} dropped {}", kind, tag);
            }
        }
    }

    #[test]
    fn test_tags_idempotent() {
        for kind in ClipKind::ALL {
            let once = synthesize_tags(&["a".to_string()], kind);
            let twice = synthesize_tags(&once, kind);
            assert_eq!(once, twice);
        }
    }

    #[test]
    fn test_reclip_untitled() {
        assert!(should_flag_reclip(Some("Untitled"), 1000, &"x".repeat(5000)));
        assert!(should_flag_reclip(Some("My UNTITLED draft"), 1000, &"x".repeat(5000)));
        assert!(!should_flag_reclip(Some("Titled"), 1000, &"x".repeat(5000)));
    }

    #[test]
    fn test_reclip_thin_content_needs_both_limits() {
        let short = "a".repeat(239);
        let long = "a".repeat(240);
        assert!(should_flag_reclip(None, 24, &short));
        assert!(!should_flag_reclip(None, 25, &short));
        assert!(!should_flag_reclip(None, 24, &long));
        assert!(!should_flag_reclip(None, 25, &long));
    }

    #[test]
    fn test_reclip_counts_chars_not_bytes() {
        // 200 two-byte chars: 400 bytes but under the character limit.
        let text = "é".repeat(200);
        assert!(should_flag_reclip(None, 1, &text));
    }

    #[test]
    fn test_classify_bookmark_scenario() {
        let classifier = Classifier::default();
        let fields = fields_with_url("https://example.com/");
        let c = classifier.classify(&fields, &words(10));
        assert_eq!(c.kind, ClipKind::Bookmark);
        assert_eq!(c.tags, vec!["clipping/bookmark"]);
        assert_eq!(c.word_count, 10);
        assert!(c.needs_reclip);
    }

    #[test]
    fn test_classify_counts_words_after_markup_strip() {
        let classifier = Classifier::default();
        let fields = fields_with_url("https://example.com/");
        let body = format!("<div class=\"a b c d e f\">{}</div>", words(59));
        assert_eq!(classifier.classify(&fields, &body).kind, ClipKind::Bookmark);
        let body = format!("<p>{}</p>", words(60));
        assert_eq!(classifier.classify(&fields, &body).kind, ClipKind::Article);
    }
}
