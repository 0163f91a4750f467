//! The content store: metadata files and shared templates.
//!
//! Everything here is read-only input to a build. Two kinds of files:
//!
//! ## Metadata
//!
//! Short single-purpose files in `pages/`, each trimmed of surrounding
//! whitespace and substituted verbatim into templates:
//!
//! | File                 | Field        | Used by                 |
//! |----------------------|--------------|-------------------------|
//! | `pages/title.txt`    | `work_title` | index page, manifest    |
//! | `pages/summary.html` | `summary`    | index page              |
//! | `pages/url.txt`      | `site_url`   | production base path    |
//! | `pages/ao3-url.txt`  | `mirror_url` | index page mirror link  |
//!
//! ## Templates
//!
//! Shared partials and the chapter page template. These are **not**
//! trimmed: leading and trailing whitespace is part of the markup.
//!
//! The entry templates `index.html` and `toc.html` are not loaded here; they
//! are read per entry point by the generator and handed to the transform
//! hook, the same way a bundler hands over the HTML it is processing.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

pub const TITLE_FILE: &str = "pages/title.txt";
pub const SUMMARY_FILE: &str = "pages/summary.html";
pub const SITE_URL_FILE: &str = "pages/url.txt";
pub const MIRROR_URL_FILE: &str = "pages/ao3-url.txt";

pub const HEAD_PARTIAL: &str = "partials/head.html";
pub const CHAPTER_NAV_PARTIAL: &str = "partials/chapter-nav.html";
pub const TOC_ITEM_PARTIAL: &str = "partials/toc-item.html";
pub const CHAPTER_TEMPLATE: &str = "chapter.html";

pub const INDEX_TEMPLATE: &str = "index.html";
pub const TOC_TEMPLATE: &str = "toc.html";

/// Directory copied verbatim to the output root.
pub const PUBLIC_DIR: &str = "public";

#[derive(Error, Debug)]
pub enum ContentError {
    #[error("cannot read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Read a content file as UTF-8, attaching the path to any failure.
pub fn read_file(root: &Path, relative: &str) -> Result<String, ContentError> {
    let path = root.join(relative);
    fs::read_to_string(&path).map_err(|source| ContentError::Read { path, source })
}

/// Read a metadata file and trim surrounding whitespace.
fn read_trimmed(root: &Path, relative: &str) -> Result<String, ContentError> {
    read_file(root, relative).map(|s| s.trim().to_string())
}

/// Scalar facts about the work, one file each.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Metadata {
    pub work_title: String,
    pub summary: String,
    /// Canonical absolute URL of the production site.
    pub site_url: String,
    /// URL of the external mirror of the work.
    pub mirror_url: String,
}

impl Metadata {
    pub fn load(root: &Path) -> Result<Self, ContentError> {
        Ok(Self {
            work_title: read_trimmed(root, TITLE_FILE)?,
            summary: read_trimmed(root, SUMMARY_FILE)?,
            site_url: read_trimmed(root, SITE_URL_FILE)?,
            mirror_url: read_trimmed(root, MIRROR_URL_FILE)?,
        })
    }
}

/// Shared template text, loaded once per build.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Partials {
    /// Markup injected into every page's `<head>`.
    pub head: String,
    /// Per-chapter navigation bar (first/previous/next/last links).
    pub chapter_nav: String,
    /// One table-of-contents entry.
    pub toc_item: String,
    /// Full chapter page.
    pub chapter: String,
}

impl Partials {
    pub fn load(root: &Path) -> Result<Self, ContentError> {
        Ok(Self {
            head: read_file(root, HEAD_PARTIAL)?,
            chapter_nav: read_file(root, CHAPTER_NAV_PARTIAL)?,
            toc_item: read_file(root, TOC_ITEM_PARTIAL)?,
            chapter: read_file(root, CHAPTER_TEMPLATE)?,
        })
    }
}
