//! # clip-tidy
//!
//! Classifies and normalizes the frontmatter of clipped web documents
//! stored as Markdown files in date-named folders.
//!
//! For every clip inside the eligibility window, `cliptidy` infers a clip
//! kind (tweet, selection, image, video, repo, news, bookmark, article),
//! merges a canonical tag set into the existing tags, flags thin or
//! untitled clips with `needs_reclip: true`, and rewrites the file only
//! when one of those keys changed.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────┐   ┌──────────────────────────┐   ┌─────────────┐
//! │ connector_fs │──▶│ clip-tidy-core pipeline   │──▶│ write-back  │
//! │ walk + dates │   │ decode → classify → merge │   │ (if changed)│
//! └──────────────┘   └──────────────────────────┘   └─────────────┘
//! ```
//!
//! ## Modules
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`config`] | TOML configuration and CLI overrides |
//! | [`connector_fs`] | Clippings tree walk and folder-date window |
//! | [`tidy`] | Batch driver and run summary |
//! | [`inspect`] | Single-file classification report |
//! | [`progress`] | Stderr progress reporting |

pub mod config;
pub mod connector_fs;
pub mod inspect;
pub mod progress;
pub mod tidy;
