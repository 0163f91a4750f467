//! Chapter loading and numbering validation.
//!
//! Reads every `pages/<N>.html` fragment, splits the first line off as the
//! chapter title, and returns the chapters sorted by number.
//!
//! ## Fragment Format
//!
//! ```text
//! The Storm                      ← line 1: title
//! <p>Rain hammered the glass.</p> ← everything after: body HTML
//! <p>She lit the lamp.</p>
//! ```
//!
//! The split happens at the first `\n`. A fragment with no newline is a
//! title with an empty body.
//!
//! ## Validation
//!
//! Navigation uses the chapter number as a direct index into the sorted
//! list, so the numbers must be exactly `1..=N`. Anything else fails the
//! load instead of producing silently wrong previous/next links:
//! - no chapters at all
//! - duplicate numbers (`1.html` and `01.html`)
//! - gaps, or a list that does not start at 1

use crate::content::{self, ContentError};
use crate::naming::{self, ChapterName};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum LoadError {
    #[error(transparent)]
    Content(#[from] ContentError),
    #[error("cannot list {}: {source}", path.display())]
    List {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("No chapters (<N>.html) found in {0}")]
    NoChapters(PathBuf),
    #[error("Chapter number in {0} does not fit in 32 bits")]
    InvalidNumber(String),
    #[error("Duplicate chapter number {number}: {first} and {second}")]
    DuplicateNumber {
        number: u32,
        first: String,
        second: String,
    },
    #[error("Chapter numbering gap: expected chapter {expected}, found {found}")]
    NumberingGap { expected: u32, found: u32 },
}

/// One chapter of the work.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chapter {
    /// 1-based chapter number, from the filename.
    pub number: u32,
    /// First line of the fragment.
    pub title: String,
    /// Remaining lines, rejoined with `\n`.
    pub body: String,
}

impl Chapter {
    /// Relative page path: `pages/<N>.html`.
    pub fn path(&self) -> String {
        naming::chapter_path(self.number)
    }
}

/// Split a fragment into `(title, body)` at the first newline.
pub fn split_fragment(fragment: &str) -> (&str, &str) {
    fragment.split_once('\n').unwrap_or((fragment, ""))
}

/// Load, sort, and validate all chapters from the `pages/` directory under
/// `root`.
pub fn load_chapters(root: &Path) -> Result<Vec<Chapter>, LoadError> {
    let pages_dir = root.join(naming::PAGES_DIR);
    let mut numbered = collect_chapter_files(&pages_dir)?;
    numbered.sort_by(|a, b| a.0.cmp(&b.0).then_with(|| a.1.cmp(&b.1)));
    validate_numbering(&numbered, &pages_dir)?;

    let mut chapters = Vec::with_capacity(numbered.len());
    for (number, filename) in &numbered {
        let fragment = content::read_file(&pages_dir, filename)?;
        let (title, body) = split_fragment(&fragment);
        chapters.push(Chapter {
            number: *number,
            title: title.to_string(),
            body: body.to_string(),
        });
    }
    Ok(chapters)
}

/// List `(number, filename)` for every chapter fragment in `dir`, unsorted.
fn collect_chapter_files(dir: &Path) -> Result<Vec<(u32, String)>, LoadError> {
    let list_err = |source| LoadError::List {
        path: dir.to_path_buf(),
        source,
    };
    let mut found = Vec::new();
    for entry in fs::read_dir(dir).map_err(list_err)? {
        let entry = entry.map_err(list_err)?;
        let Ok(name) = entry.file_name().into_string() else {
            continue;
        };
        match naming::parse_chapter_filename(&name) {
            ChapterName::Numbered(number) => found.push((number, name)),
            ChapterName::Overflow => return Err(LoadError::InvalidNumber(name)),
            ChapterName::NotAChapter => {}
        }
    }
    Ok(found)
}

/// Check that sorted `(number, filename)` pairs cover exactly `1..=N`.
fn validate_numbering(sorted: &[(u32, String)], dir: &Path) -> Result<(), LoadError> {
    if sorted.is_empty() {
        return Err(LoadError::NoChapters(dir.to_path_buf()));
    }
    for (idx, (number, filename)) in sorted.iter().enumerate() {
        if idx > 0 && sorted[idx - 1].0 == *number {
            return Err(LoadError::DuplicateNumber {
                number: *number,
                first: sorted[idx - 1].1.clone(),
                second: filename.clone(),
            });
        }
        let expected = idx as u32 + 1;
        if *number != expected {
            return Err(LoadError::NumberingGap {
                expected,
                found: *number,
            });
        }
    }
    Ok(())
}

/// Number of the final chapter. `chapters` must be a validated, non-empty
/// list.
pub fn last_chapter_number(chapters: &[Chapter]) -> u32 {
    chapters.last().map(|c| c.number).unwrap_or(0)
}
