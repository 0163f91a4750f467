//! Shared test utilities for the chapbook test suite.
//!
//! Provides fixture setup, in-memory chapter lists, and build contexts with
//! small, predictable templates so renderer tests can assert on exact HTML.
//!
//! # Usage
//!
//! ```rust
//! use crate::test_helpers::*;
//!
//! let tmp = setup_fixtures();
//! let chapters = load_chapters(tmp.path()).unwrap();
//! assert_eq!(chapter_titles(&chapters), vec!["The Lamp", "The Storm", "Morning"]);
//!
//! let ctx = test_context(&["First", "Second"]);
//! let html = render_chapter(&ctx, 2).unwrap();
//! assert_eq!(extract_description(&html), "2 of 2");
//! ```

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;
use walkdir::WalkDir;

use crate::chapters::{Chapter, split_fragment};
use crate::config::BuildMode;
use crate::content::{Metadata, Partials};
use crate::naming::chapter_path;
use crate::render::BuildContext;

// =========================================================================
// Fixture setup
// =========================================================================

/// `fixtures/content/` in the source tree. Never write to it.
pub fn fixtures_dir() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("fixtures/content")
}

/// Copy `fixtures/content/` to a temp directory and return it.
///
/// Tests get an isolated copy they can mutate without affecting other tests
/// or the source fixtures.
pub fn setup_fixtures() -> TempDir {
    let tmp = TempDir::new().unwrap();
    copy_dir_recursive(&fixtures_dir(), tmp.path()).unwrap();
    tmp
}

/// Copy the tree under `src` into the existing directory `dst`.
pub fn copy_dir_recursive(src: &Path, dst: &Path) -> std::io::Result<()> {
    for entry in fs::read_dir(src)? {
        let entry = entry?;
        let src_path = entry.path();
        let dst_path = dst.join(entry.file_name());

        if src_path.is_dir() {
            fs::create_dir_all(&dst_path)?;
            copy_dir_recursive(&src_path, &dst_path)?;
        } else {
            fs::copy(&src_path, &dst_path)?;
        }
    }
    Ok(())
}

/// Write `(number, fragment)` pairs as `pages/<number>.html` under `root`.
pub fn write_chapters(root: &Path, fragments: &[(u32, &str)]) {
    fs::create_dir_all(root.join("pages")).unwrap();
    for (number, fragment) in fragments {
        fs::write(root.join(chapter_path(*number)), fragment).unwrap();
    }
}

/// Every file under `root` keyed by relative path, for whole-tree comparisons.
pub fn read_tree(root: &Path) -> BTreeMap<String, Vec<u8>> {
    WalkDir::new(root)
        .into_iter()
        .map(|entry| entry.unwrap())
        .filter(|entry| entry.file_type().is_file())
        .map(|entry| {
            let rel = entry.path().strip_prefix(root).unwrap();
            let rel = rel.to_string_lossy().replace('\\', "/");
            (rel, fs::read(entry.path()).unwrap())
        })
        .collect()
}

// =========================================================================
// In-memory chapters and contexts
// =========================================================================

/// Chapters numbered `1..=titles.len()` with a one-paragraph body each.
pub fn make_chapters(titles: &[&str]) -> Vec<Chapter> {
    titles
        .iter()
        .enumerate()
        .map(|(i, title)| Chapter {
            number: i as u32 + 1,
            title: title.to_string(),
            body: format!("<p>Body of {title}</p>"),
        })
        .collect()
}

/// Titles of `chapters`, in order.
pub fn chapter_titles(chapters: &[Chapter]) -> Vec<&str> {
    chapters.iter().map(|c| c.title.as_str()).collect()
}

/// Small partials whose rendered output is easy to assert on.
fn test_partials() -> Partials {
    Partials {
        head: r#"<meta charset="utf-8"><link rel="manifest" href="$BASEmanifest.webmanifest">"#
            .to_string(),
        chapter_nav: concat!(
            r#"<nav><a class="first" href="$FIRST_CHAPTER_HREF">First</a>"#,
            r#"<a class="previous" href="$PREVIOUS_CHAPTER_HREF">Previous</a>"#,
            r#"<a class="next" href="$NEXT_CHAPTER_HREF">Next</a>"#,
            r#"<a class="last" href="$LAST_CHAPTER_HREF">Last</a></nav>"#,
        )
        .to_string(),
        toc_item: r#"<li><a href="$HREF">$LABEL</a></li>"#.to_string(),
        chapter: concat!(
            "<html><head><title>$PAGE_TITLE</title>",
            r#"<meta name="description" content="$CHAPTER_DESCRIPTION">"#,
            "$HEAD_COMMON</head>",
            "<body>$CHAPTER_NAV<main>$PAGE_CONTENT</main></body></html>",
        )
        .to_string(),
    }
}

fn test_metadata() -> Metadata {
    Metadata {
        work_title: "Test Work".to_string(),
        summary: "<p>Summary</p>".to_string(),
        site_url: "https://example.org/test/".to_string(),
        mirror_url: "https://mirror.example/works/1".to_string(),
    }
}

/// A development-mode context with base `/base/` and the given chapter titles.
pub fn test_context(titles: &[&str]) -> BuildContext {
    BuildContext {
        mode: BuildMode::Development,
        base: "/base/".to_string(),
        metadata: test_metadata(),
        partials: test_partials(),
        chapters: make_chapters(titles),
    }
}

/// A context whose chapters are parsed from raw `(number, fragment)` pairs.
pub fn context_from_fragments(base: &str, fragments: &[(u32, &str)]) -> BuildContext {
    let chapters = fragments
        .iter()
        .map(|(number, fragment)| {
            let (title, body) = split_fragment(fragment);
            Chapter {
                number: *number,
                title: title.to_string(),
                body: body.to_string(),
            }
        })
        .collect();
    BuildContext {
        base: base.to_string(),
        chapters,
        ..test_context(&[])
    }
}

// =========================================================================
// HTML inspection
// =========================================================================

/// The `content` of the page's `<meta name="description">`. Panics if absent.
pub fn extract_description(html: &str) -> String {
    let marker = r#"<meta name="description" content=""#;
    let start = html
        .find(marker)
        .unwrap_or_else(|| panic!("no description meta in:\n{html}"))
        + marker.len();
    let end = html[start..].find('"').unwrap() + start;
    html[start..end].to_string()
}
