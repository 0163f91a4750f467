//! Chapter-to-chapter navigation.
//!
//! Each chapter page links to the first, previous, next, and last chapters.
//! At the edges of the work some of those links do not exist:
//!
//! ```text
//!            first  previous  current  next  last
//! chapter 1   -        -         1      2     N
//! chapter k   1       k-1        k     k+1    N
//! chapter N   1       N-1        N      -     -
//! ```
//!
//! With a single chapter, only `current` is present.
//!
//! The chapter number is used directly as a 1-based index into the list,
//! which is sound because [`load_chapters`](crate::chapters::load_chapters)
//! rejects anything other than `1..=N`.

use crate::chapters::Chapter;
use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum NavigationError {
    #[error("Chapter {target} is out of range (work has {count} chapters)")]
    OutOfRange { target: u32, count: usize },
}

/// The neighbours of one chapter, borrowed from the chapter list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RelativeChapters<'a> {
    pub first: Option<&'a Chapter>,
    pub previous: Option<&'a Chapter>,
    pub current: &'a Chapter,
    pub next: Option<&'a Chapter>,
    pub last: Option<&'a Chapter>,
}

/// Resolve the navigation neighbours of chapter `target`.
///
/// `chapters` must be sorted and numbered `1..=N`.
pub fn resolve(chapters: &[Chapter], target: u32) -> Result<RelativeChapters<'_>, NavigationError> {
    let count = chapters.len();
    let idx = (target as usize)
        .checked_sub(1)
        .filter(|&i| i < count)
        .ok_or(NavigationError::OutOfRange { target, count })?;

    let is_first = idx == 0;
    let is_last = idx == count - 1;

    Ok(RelativeChapters {
        first: (!is_first).then(|| &chapters[0]),
        previous: (!is_first).then(|| &chapters[idx - 1]),
        current: &chapters[idx],
        next: (!is_last).then(|| &chapters[idx + 1]),
        last: (!is_last).then(|| &chapters[count - 1]),
    })
}
