//! URL shape classification.
//!
//! Every predicate here is total: an empty or unparsable URL simply answers
//! `false`, so the inference step never has to handle an error.

use std::collections::BTreeSet;

use url::Url;

/// Host markers for video platforms.
const VIDEO_HOST_MARKERS: [&str; 2] = ["youtube.com", "youtu.be"];

/// Host markers for code hosting.
const REPO_HOST_MARKERS: [&str; 1] = ["github.com"];

/// Paths that count as a site's front page.
const HOMEPAGE_PATHS: [&str; 4] = ["/", "/home", "/index.html", "/index.htm"];

/// Built-in set of news and long-form publication domains.
pub const DEFAULT_NEWS_DOMAINS: &[&str] = &[
    "nytimes.com",
    "newyorker.com",
    "washingtonpost.com",
    "ft.com",
    "wsj.com",
    "forbes.com",
    "economist.com",
    "bloomberg.com",
    "theatlantic.com",
    "wired.com",
    "theinformation.com",
    "barrons.com",
    "telegraph.co.uk",
    "thetimes.co.uk",
    "foreignpolicy.com",
    "hbr.org",
    "scientificamerican.com",
    "newscientist.com",
    "businessinsider.com",
    "visualcapitalist.com",
    "seekingalpha.com",
    "movieinsider.com",
    "techcrunch.com",
    "venturebeat.com",
    "beehiiv.com",
    "substack.com",
    "read.first1000.co",
];

/// Immutable set of normalized news domains.
///
/// Membership is exact on the `www.`-stripped, lowercased host, so
/// `www.nytimes.com` matches `nytimes.com` but `cooking.nytimes.com` does
/// not.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewsDomains {
    domains: BTreeSet<String>,
}

impl NewsDomains {
    /// Build a set from arbitrary domain strings. Entries are normalized and
    /// blanks are dropped.
    pub fn new<I, S>(domains: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let domains = domains
            .into_iter()
            .map(|d| normalize_domain(d.as_ref()))
            .filter(|d| !d.is_empty())
            .collect();
        Self { domains }
    }

    pub fn builtin() -> Self {
        Self::new(DEFAULT_NEWS_DOMAINS.iter())
    }

    /// Return a new set with `extra` added.
    pub fn with_extra<I, S>(mut self, extra: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.domains.extend(
            extra
                .into_iter()
                .map(|d| normalize_domain(d.as_ref()))
                .filter(|d| !d.is_empty()),
        );
        self
    }

    pub fn contains(&self, domain: &str) -> bool {
        self.domains.contains(domain)
    }

    pub fn len(&self) -> usize {
        self.domains.len()
    }

    pub fn is_empty(&self) -> bool {
        self.domains.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.domains.iter().map(String::as_str)
    }
}

impl Default for NewsDomains {
    fn default() -> Self {
        Self::builtin()
    }
}

/// Lowercase, trim, and drop a leading `www.`.
pub fn normalize_domain(domain: &str) -> String {
    let lower = domain.trim().to_lowercase();
    match lower.strip_prefix("www.") {
        Some(stripped) => stripped.to_string(),
        None => lower,
    }
}

fn host_of(url: &str) -> Option<String> {
    let parsed = Url::parse(url).ok()?;
    parsed.host_str().map(str::to_lowercase)
}

fn host_contains_any(url: &str, markers: &[&str]) -> bool {
    host_of(url).is_some_and(|host| markers.iter().any(|m| host.contains(m)))
}

pub fn is_video_url(url: &str) -> bool {
    host_contains_any(url, &VIDEO_HOST_MARKERS)
}

pub fn is_repo_url(url: &str) -> bool {
    host_contains_any(url, &REPO_HOST_MARKERS)
}

pub fn is_news_domain(url: &str, news_domains: &NewsDomains) -> bool {
    host_of(url).is_some_and(|host| news_domains.contains(&normalize_domain(&host)))
}

/// True when the path is empty, `/`, `/home`, `/index.html` or `/index.htm`
/// after collapsing doubled slashes. Query and fragment are ignored.
pub fn is_homepage_url(url: &str) -> bool {
    if url.is_empty() {
        return false;
    }
    let Ok(parsed) = Url::parse(url) else {
        return false;
    };

    let normalized = parsed.path().replace("//", "/");
    let normalized = if normalized.is_empty() {
        "/"
    } else {
        normalized.as_str()
    };
    HOMEPAGE_PATHS.contains(&normalized)
}
