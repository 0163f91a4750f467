//! Build entry points.
//!
//! Declares one entry per generated page so the generator (or an external
//! bundler fed with `chapbook entries --json`) knows every file to emit:
//!
//! ```text
//! index  →  index.html
//! toc    →  toc.html
//! 1      →  pages/1.html
//! 2      →  pages/2.html
//! ```
//!
//! Source and output share the same relative path; the transform hook is
//! what turns one into the other.

use crate::chapters::Chapter;
use crate::content::{INDEX_TEMPLATE, TOC_TEMPLATE};
use std::collections::BTreeMap;
use std::path::PathBuf;

/// One page the build emits.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryPoint {
    /// Entry name: `index`, `toc`, or the chapter number.
    pub name: String,
    /// Path relative to the content root (and to the output root).
    pub path: String,
}

impl EntryPoint {
    fn new(name: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
        }
    }

    /// Site-absolute page path, as classified by
    /// [`render::classify`](crate::render::classify).
    pub fn page_path(&self) -> String {
        format!("/{}", self.path)
    }
}

/// Entry points for a work: index, table of contents, then every chapter in
/// ascending order.
pub fn register(chapters: &[Chapter]) -> Vec<EntryPoint> {
    let mut entries = Vec::with_capacity(chapters.len() + 2);
    entries.push(EntryPoint::new("index", INDEX_TEMPLATE));
    entries.push(EntryPoint::new("toc", TOC_TEMPLATE));
    entries.extend(
        chapters
            .iter()
            .map(|chapter| EntryPoint::new(chapter.number.to_string(), chapter.path())),
    );
    entries
}

/// Bundler-style input map: entry name → source path.
pub fn input_map(entries: &[EntryPoint]) -> BTreeMap<String, PathBuf> {
    entries
        .iter()
        .map(|entry| (entry.name.clone(), PathBuf::from(&entry.path)))
        .collect()
}
