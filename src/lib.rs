//! # Chapbook
//!
//! A static site builder for a multi-chapter work of fiction. The content
//! directory is the data source: numbered HTML fragments in `pages/` become
//! chapters, and a handful of plain HTML templates with `$TOKEN` placeholders
//! become the home page, the table of contents, and one page per chapter.
//!
//! # Pipeline
//!
//! ```text
//! content/  ──load──▶  BuildContext  ──register──▶  entries  ──render──▶  dist/
//!            metadata, partials,       index, toc,        three substitution
//!            validated chapters        1..=N              passes per page
//! ```
//!
//! Everything a build reads is loaded once into an immutable
//! [`render::BuildContext`] and passed by reference into every renderer. No
//! state lives outside it, so two builds from the same content are
//! byte-identical.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`naming`] | `N.html` chapter filename convention |
//! | [`config`] | `config.toml` loading, merging, and validation; build modes |
//! | [`content`] | Content-directory layout; metadata files and template partials |
//! | [`chapters`] | Chapter loader: list, order, validate, and split fragments |
//! | [`navigation`] | First/previous/next/last neighbours of a chapter |
//! | [`template`] | `$TOKEN` substitution with typed per-pass records |
//! | [`render`] | Build context and the index, contents, and chapter renderers |
//! | [`registrar`] | Entry points: every page the build emits |
//! | [`generate`] | Render all entries and write the site to disk |
//! | [`scaffold`] | Starter content directory for `chapbook init` |
//! | [`bookmark`] | "Save for later" widget state machine |
//! | [`output`] | CLI output formatting |
//!
//! # Design Decisions
//!
//! ## Numbers Come From Filenames
//!
//! A chapter's number is the digit run in its filename and nothing else;
//! `pages/10.html` sorts after `pages/9.html`. The loader refuses a list that
//! is not exactly `1..=N` (gaps, duplicates such as `1.html` next to
//! `01.html`, a list starting at 0), since every navigation link and every
//! "N of M" description depends on that shape.
//!
//! ## Literal Tokens, Typed Records
//!
//! Templates are ordinary HTML files anyone can edit, with placeholders like
//! `$PAGE_TITLE`. Substitution is literal and unescaped: chapter bodies and
//! summaries are HTML and go in as-is. Each pass takes a record struct with
//! one field per token it fills, so a renderer cannot forget a token without
//! failing to compile.
//!
//! ## Plain Links, No Router
//!
//! Every link is `base + path`. The base differs between production (an
//! absolute URL) and development (`/`) and is the only thing that changes
//! between the two builds.

pub mod bookmark;
pub mod chapters;
pub mod config;
pub mod content;
pub mod generate;
pub mod naming;
pub mod navigation;
pub mod output;
pub mod registrar;
pub mod render;
pub mod scaffold;
pub mod template;

#[cfg(test)]
pub(crate) mod test_helpers;
