//! Centralized filename parsing for the `<N>.html` chapter convention.
//!
//! Chapter fragments live in `pages/` and are named by their chapter number
//! alone: `1.html`, `2.html`, `10.html`. Other files in the same directory
//! (`title.txt`, `summary.html`, ...) share the extension but not the shape,
//! so the match is strict: the whole stem must be ASCII digits.
//!
//! ## Canonical Paths
//!
//! Every chapter renders to the same relative path it was read from:
//! - `pages/3.html` → `/pages/3.html` (page path, used by the transform hook)
//! - `pages/3.html` → `<base>pages/3.html` (href, used in links)

/// Directory holding chapter fragments and metadata files, relative to the
/// content root. Also the output directory for rendered chapter pages.
pub const PAGES_DIR: &str = "pages";

/// Result of matching a filename against the chapter convention.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChapterName {
    /// `<digits>.html` whose digits fit in a `u32`.
    Numbered(u32),
    /// `<digits>.html` whose digits overflow a `u32`.
    Overflow,
    /// Anything else: metadata files, partials, stray assets.
    NotAChapter,
}

/// Match a bare filename (no directories) against `^\d+\.html$`.
///
/// - `"1.html"` → `Numbered(1)`
/// - `"010.html"` → `Numbered(10)`
/// - `"summary.html"` → `NotAChapter`
/// - `"1.htm"`, `"1-intro.html"`, `".html"` → `NotAChapter`
/// - `"99999999999.html"` → `Overflow`
pub fn parse_chapter_filename(name: &str) -> ChapterName {
    let Some(stem) = name.strip_suffix(".html") else {
        return ChapterName::NotAChapter;
    };
    if stem.is_empty() || !stem.bytes().all(|b| b.is_ascii_digit()) {
        return ChapterName::NotAChapter;
    }
    match stem.parse::<u32>() {
        Ok(number) => ChapterName::Numbered(number),
        Err(_) => ChapterName::Overflow,
    }
}

/// Relative path of a chapter page: `pages/<N>.html`.
pub fn chapter_path(number: u32) -> String {
    format!("{PAGES_DIR}/{number}.html")
}

/// Extract the chapter number from a page path such as `/pages/3.html`.
///
/// Returns `None` for paths outside `/pages/` or whose filename does not
/// follow the chapter convention.
pub fn chapter_number_from_page_path(path: &str) -> Option<u32> {
    let rest = path.strip_prefix('/').unwrap_or(path);
    let filename = rest.strip_prefix(PAGES_DIR)?.strip_prefix('/')?;
    match parse_chapter_filename(filename) {
        ChapterName::Numbered(n) => Some(n),
        _ => None,
    }
}
