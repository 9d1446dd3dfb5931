//! # clip-tidy core
//!
//! Pure classification and normalization logic for clipped web documents:
//! frontmatter codec, body normalization, URL shape checks, clip kind
//! inference, tag synthesis, and reclip flagging.
//!
//! This crate does no filesystem I/O. The `clip-tidy` binary walks the
//! clippings tree and feeds each file through
//! [`pipeline::process_document`].
//!
//! ```rust
//! use clip_tidy_core::classify::Classifier;
//! use clip_tidy_core::models::ClipKind;
//! use clip_tidy_core::pipeline::process_document;
//!
//! let raw = "---\nurl: https://github.com/foo/bar\ntags: []\n---\nsome text";
//! let doc = process_document(raw, &Classifier::default()).unwrap();
//! assert_eq!(doc.classification.kind, ClipKind::Repo);
//! assert!(doc.rewritten.is_some());
//! ```

pub mod classify;
pub mod content;
pub mod frontmatter;
pub mod models;
pub mod pipeline;
pub mod url_class;
