//! Run progress reporting.
//!
//! Reports what `cliptidy run` is doing so users can follow long scans and
//! see which files were rewritten or skipped. Progress is emitted on
//! **stderr** so stdout keeps only the final summary.

use std::io::Write;

/// A single progress event for a tidy run.
#[derive(Clone, Debug)]
pub enum TidyProgressEvent {
    /// Walking the clippings root. Total unknown.
    Discovering { root: String },
    /// `n` eligible files processed out of `total`.
    Processing { n: u64, total: u64 },
    /// A file was (or in a dry run, would be) rewritten.
    Updated {
        path: String,
        changes: Vec<&'static str>,
        dry_run: bool,
    },
    /// A file without a usable frontmatter block was left alone.
    Skipped { path: String, reason: String },
    /// A file could not be read or written.
    Failed { path: String, error: String },
}

/// Reports tidy progress. Implementations write to stderr (human or JSON).
pub trait TidyProgressReporter {
    fn report(&self, event: TidyProgressEvent);
}

/// Human-friendly progress on stderr.
pub struct StderrProgress;

impl TidyProgressReporter for StderrProgress {
    fn report(&self, event: TidyProgressEvent) {
        let line = match &event {
            TidyProgressEvent::Discovering { root } => {
                format!("tidy {}  discovering...\n", root)
            }
            TidyProgressEvent::Processing { n, total } => {
                format!(
                    "tidy  processing  {} / {} files\n",
                    format_number(*n),
                    format_number(*total)
                )
            }
            TidyProgressEvent::Updated {
                path,
                changes,
                dry_run,
            } => {
                let verb = if *dry_run { "would update" } else { "updated" };
                format!("  {} {} ({})\n", verb, path, changes.join(", "))
            }
            TidyProgressEvent::Skipped { path, reason } => {
                format!("  skipped {}: {}\n", path, reason)
            }
            TidyProgressEvent::Failed { path, error } => {
                format!("  warning: {}: {}\n", path, error)
            }
        };
        let _ = std::io::stderr().lock().write_all(line.as_bytes());
        let _ = std::io::stderr().lock().flush();
    }
}

/// Machine-readable progress: one JSON object per line on stderr.
pub struct JsonProgress;

impl TidyProgressReporter for JsonProgress {
    fn report(&self, event: TidyProgressEvent) {
        let obj = match &event {
            TidyProgressEvent::Discovering { root } => serde_json::json!({
                "event": "progress",
                "phase": "discovering",
                "root": root
            }),
            TidyProgressEvent::Processing { n, total } => serde_json::json!({
                "event": "progress",
                "phase": "processing",
                "n": n,
                "total": total
            }),
            TidyProgressEvent::Updated {
                path,
                changes,
                dry_run,
            } => serde_json::json!({
                "event": "updated",
                "path": path,
                "changes": changes,
                "dry_run": dry_run
            }),
            TidyProgressEvent::Skipped { path, reason } => serde_json::json!({
                "event": "skipped",
                "path": path,
                "reason": reason
            }),
            TidyProgressEvent::Failed { path, error } => serde_json::json!({
                "event": "failed",
                "path": path,
                "error": error
            }),
        };
        if let Ok(line) = serde_json::to_string(&obj) {
            let _ = writeln!(std::io::stderr().lock(), "{}", line);
            let _ = std::io::stderr().lock().flush();
        }
    }
}

/// Reporter that only surfaces failures. Used when progress is off so I/O
/// problems are never silent.
pub struct FailuresOnly;

impl TidyProgressReporter for FailuresOnly {
    fn report(&self, event: TidyProgressEvent) {
        if let TidyProgressEvent::Failed { .. } = event {
            StderrProgress.report(event);
        }
    }
}

fn format_number(n: u64) -> String {
    let s = n.to_string();
    let mut result = String::with_capacity(s.len() + (s.len() - 1) / 3);
    let chars: Vec<char> = s.chars().rev().collect();
    for (i, c) in chars.iter().enumerate() {
        if i > 0 && i % 3 == 0 {
            result.push(',');
        }
        result.push(*c);
    }
    result.chars().rev().collect()
}

/// Progress mode for the CLI: off, human (stderr), or JSON (stderr).
#[derive(Clone, Copy, Debug, Eq, PartialEq, clap::ValueEnum)]
pub enum ProgressMode {
    Off,
    Human,
    Json,
}

impl ProgressMode {
    /// Default: human progress when stderr is a TTY, otherwise off.
    pub fn default_for_tty() -> Self {
        if atty::is(atty::Stream::Stderr) {
            ProgressMode::Human
        } else {
            ProgressMode::Off
        }
    }

    pub fn reporter(&self) -> Box<dyn TidyProgressReporter> {
        match self {
            ProgressMode::Off => Box::new(FailuresOnly),
            ProgressMode::Human => Box::new(StderrProgress),
            ProgressMode::Json => Box::new(JsonProgress),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_number_comma() {
        assert_eq!(format_number(0), "0");
        assert_eq!(format_number(999), "999");
        assert_eq!(format_number(1000), "1,000");
        assert_eq!(format_number(1_234_567), "1,234,567");
    }
}
