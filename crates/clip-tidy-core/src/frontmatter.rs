//! Frontmatter codec.
//!
//! Splits a clipped document into its YAML metadata block and body, and
//! reassembles it after the metadata has been updated.
//!
//! # Format
//!
//! ```text
//! ---
//! title: Example
//! url: https://example.com/
//! ---
//!
//! Body text…
//! ```
//!
//! The document must start with a `---` line. The block ends at the next
//! line consisting only of `---`. Leading newlines of the body are dropped
//! on decode; [`encode`] always emits exactly one blank line between the
//! closing delimiter and the body, so decode/encode is stable after the
//! first rewrite.
//!
//! The YAML is read with YAML 1.2 rules: `yes`, `no`, `on` and `off` stay
//! strings and are written back as plain scalars, so a plain `flag: yes`
//! round-trips unchanged but a quoted `'yes'` loses its quotes. A block that
//! repeats a key is rejected as invalid YAML.
//!
//! ```rust
//! use clip_tidy_core::frontmatter::{decode, encode};
//!
//! let raw = "---\ntitle: Hi\n---\n\nBody";
//! let (fm, body) = decode(raw).unwrap();
//! assert_eq!(fm.get_str("title"), Some("Hi"));
//! assert_eq!(encode(&fm, &body).unwrap(), raw);
//! ```

use serde_yaml::{Mapping, Value};
use thiserror::Error;

use crate::models::Frontmatter;

/// Marker line that opens and closes the metadata block.
pub const DELIMITER: &str = "---";

/// Reasons a document is left untouched.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FrontmatterError {
    #[error("document does not start with a frontmatter block")]
    NotFrontmatter,
    #[error("frontmatter block has no closing delimiter")]
    Unterminated,
    #[error("frontmatter is not valid YAML: {0}")]
    Yaml(String),
    #[error("frontmatter is not a key-value mapping")]
    NotAMapping,
}

/// Split raw text into `(yaml, body)` without parsing the YAML.
pub fn split(raw: &str) -> Result<(&str, &str), FrontmatterError> {
    let rest = raw
        .strip_prefix(DELIMITER)
        .ok_or(FrontmatterError::NotFrontmatter)?;

    let (opening_tail, after_open) = rest
        .split_once('\n')
        .ok_or(FrontmatterError::Unterminated)?;
    if !opening_tail.trim().is_empty() {
        return Err(FrontmatterError::NotFrontmatter);
    }

    let mut offset = 0;
    for line in after_open.split_inclusive('\n') {
        if line.trim_end() == DELIMITER {
            let yaml = &after_open[..offset];
            let body = after_open[offset + line.len()..]
                .trim_start_matches(|c: char| c == '\n' || c == '\r');
            return Ok((yaml, body));
        }
        offset += line.len();
    }

    Err(FrontmatterError::Unterminated)
}

/// Decode a document into its metadata and body.
///
/// An empty metadata block decodes to an empty mapping. Any other
/// non-mapping YAML document is rejected.
pub fn decode(raw: &str) -> Result<(Frontmatter, String), FrontmatterError> {
    let (yaml, body) = split(raw)?;

    let value: Value = if yaml.trim().is_empty() {
        Value::Null
    } else {
        serde_yaml::from_str(yaml).map_err(|e| FrontmatterError::Yaml(e.to_string()))?
    };

    let fields = match value {
        Value::Null => Mapping::new(),
        Value::Mapping(m) => m,
        _ => return Err(FrontmatterError::NotAMapping),
    };

    Ok((Frontmatter::new(fields), body.to_string()))
}

/// Serialize metadata and body back into document text.
///
/// Keys are emitted in insertion order.
pub fn encode(frontmatter: &Frontmatter, body: &str) -> Result<String, FrontmatterError> {
    let yaml = serde_yaml::to_string(frontmatter.mapping())
        .map_err(|e| FrontmatterError::Yaml(e.to_string()))?;
    Ok(format!(
        "{DELIMITER}\n{}\n{DELIMITER}\n\n{}",
        yaml.trim(),
        body
    ))
}
