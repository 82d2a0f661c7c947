//! # pubpages
//!
//! Turns a hand-maintained BibTeX file into static publication pages for a
//! personal academic site: one detail page per entry and a grouped index.
//!
//! # Pipeline
//!
//! ```text
//! my_publications.bib ─► bibtex::parse_bibliography ─► Vec<Record> (year desc)
//!                                                        │
//!            render::render_publication (per record) ◄───┘
//!              │                        │
//!              ▼                        ▼
//!   docs/publication/YYYY-MM-slug.html  PublicationLink ─► index::render_index_document
//!                                                            │
//!                                   docs/publications/index.html (archive region)
//! ```
//!
//! Everything runs in one pass, in memory, on a single thread. Reruns on the
//! same input produce byte-identical files.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`bibtex`] | Entry segmentation, brace-aware field extraction, markup cleaning |
//! | [`types`] | `Record`, `PublicationLink`, `PublicationKind` |
//! | [`authors`] | `A, B, and C` author display strings |
//! | [`naming`] | `YYYY-MM` date prefix, title slugs, detail filenames |
//! | [`render`] | Detail page HTML using Maud |
//! | [`index`] | Grouped archive HTML and splicing into the existing index page |
//! | [`generate`] | Run orchestration: read, clean up, write pages, write index |
//! | [`config`] | `config.toml` loading, validation, merging over stock defaults |
//! | [`output`] | CLI output formatting |
//!
//! # Design Decisions
//!
//! ## Forgiving Parser
//!
//! The bibliography is edited by hand and only ever read by this tool, so the
//! parser never rejects input. Unsupported value forms are skipped field by
//! field and unterminated entries are dropped; the build always produces a
//! page for every entry it could recognize.
//!
//! ## Splice, Don't Own, the Index
//!
//! The index page belongs to the site theme. Only the region between two fixed
//! anchors is rewritten, so theme upgrades and hand edits to the header and
//! footer survive every build.

pub mod authors;
pub mod bibtex;
pub mod config;
pub mod generate;
pub mod index;
pub mod naming;
pub mod output;
pub mod render;
pub mod types;

#[cfg(test)]
pub(crate) mod test_helpers;
