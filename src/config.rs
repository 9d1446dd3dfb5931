//! TOML configuration.
//!
//! ```toml
//! [clippings]
//! root = "/path/to/Clippings"
//! since = "2025-12-15"
//! include_globs = ["**/*.md"]
//!
//! [classifier]
//! extra_news_domains = ["stratechery.com"]
//! ```
//!
//! Every key is optional in the file, but a root must come from either the
//! file or `--root`. Dates are quoted `YYYY-MM-DD` strings.

use anyhow::{bail, Context, Result};
use chrono::NaiveDate;
use clip_tidy_core::url_class::NewsDomains;
use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::connector_fs::{build_globset, DateWindow};

#[derive(Debug, Deserialize, Clone, Default)]
pub struct Config {
    #[serde(default)]
    pub clippings: ClippingsConfig,
    #[serde(default)]
    pub classifier: ClassifierConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ClippingsConfig {
    #[serde(default)]
    pub root: Option<PathBuf>,
    #[serde(default = "default_since")]
    pub since: NaiveDate,
    #[serde(default)]
    pub until: Option<NaiveDate>,
    #[serde(default = "default_include_globs")]
    pub include_globs: Vec<String>,
    #[serde(default)]
    pub exclude_globs: Vec<String>,
    #[serde(default)]
    pub follow_symlinks: bool,
}

impl Default for ClippingsConfig {
    fn default() -> Self {
        Self {
            root: None,
            since: default_since(),
            until: None,
            include_globs: default_include_globs(),
            exclude_globs: Vec::new(),
            follow_symlinks: false,
        }
    }
}

/// First folder date that is processed by default.
pub fn default_since() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 12, 15).unwrap_or(NaiveDate::MIN)
}

fn default_include_globs() -> Vec<String> {
    vec!["**/*.md".to_string()]
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct ClassifierConfig {
    /// Replaces the built-in news domain set when present.
    #[serde(default)]
    pub news_domains: Option<Vec<String>>,
    #[serde(default)]
    pub extra_news_domains: Vec<String>,
}

/// Values given on the command line. They take precedence over the file.
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub root: Option<PathBuf>,
    pub since: Option<NaiveDate>,
    pub until: Option<NaiveDate>,
}

impl Config {
    pub fn root(&self) -> Result<&Path> {
        self.clippings
            .root
            .as_deref()
            .ok_or_else(|| anyhow::anyhow!("clippings.root is not set (use the config file or --root)"))
    }

    pub fn window(&self) -> DateWindow {
        DateWindow::new(self.clippings.since, self.clippings.until)
    }

    pub fn news_domains(&self) -> NewsDomains {
        let base = match &self.classifier.news_domains {
            Some(domains) => NewsDomains::new(domains),
            None => NewsDomains::builtin(),
        };
        base.with_extra(&self.classifier.extra_news_domains)
    }

    pub fn apply_overrides(&mut self, overrides: &CliOverrides) {
        if let Some(root) = &overrides.root {
            self.clippings.root = Some(root.clone());
        }
        if let Some(since) = overrides.since {
            self.clippings.since = since;
        }
        if let Some(until) = overrides.until {
            self.clippings.until = Some(until);
        }
    }

    pub fn validate(&self) -> Result<()> {
        self.root()?;

        if let Some(until) = self.clippings.until {
            if until < self.clippings.since {
                bail!(
                    "clippings.until ({}) must not be before clippings.since ({})",
                    until,
                    self.clippings.since
                );
            }
        }

        if self.clippings.include_globs.is_empty() {
            bail!("clippings.include_globs must not be empty");
        }
        build_globset(&self.clippings.include_globs)
            .with_context(|| "Invalid pattern in clippings.include_globs")?;
        build_globset(&self.clippings.exclude_globs)
            .with_context(|| "Invalid pattern in clippings.exclude_globs")?;

        if self.news_domains().is_empty() {
            bail!("classifier.news_domains must contain at least one domain");
        }

        Ok(())
    }
}

pub fn load_config(path: &Path) -> Result<Config> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;

    let config: Config = toml::from_str(&content).with_context(|| "Failed to parse config file")?;
    Ok(config)
}

/// Load the config file (or defaults when it is absent and `--root` was
/// given), apply command-line overrides, and validate the result.
pub fn resolve_config(path: &Path, overrides: &CliOverrides) -> Result<Config> {
    let mut config = if path.exists() {
        load_config(path)?
    } else if overrides.root.is_some() {
        Config::default()
    } else {
        bail!(
            "Config file not found: {} (pass --root to run without one)",
            path.display()
        );
    };

    config.apply_overrides(overrides);
    config.validate()?;
    Ok(config)
}

/// Parse a `YYYY-MM-DD` command-line date.
pub fn parse_date(s: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").map_err(|e| format!("invalid date '{}': {}", s, e))
}
