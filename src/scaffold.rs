//! Starter content directory.
//!
//! `chapbook init <dir>` writes a complete, buildable work with one
//! chapter. Page templates are produced with maud; the `$TOKEN`
//! placeholders they carry are plain text to maud and are filled in at
//! build time.
//!
//! ```text
//! <dir>/
//! ├── config.toml
//! ├── index.html
//! ├── toc.html
//! ├── chapter.html
//! ├── partials/
//! │   ├── head.html
//! │   ├── chapter-nav.html
//! │   └── toc-item.html
//! └── pages/
//!     ├── title.txt  summary.html  url.txt  ao3-url.txt
//!     └── 1.html
//! ```
//!
//! Nothing is written if any of these files already exists.

use crate::config::{self, CONFIG_FILENAME};
use crate::content::{
    CHAPTER_NAV_PARTIAL, CHAPTER_TEMPLATE, HEAD_PARTIAL, INDEX_TEMPLATE, MIRROR_URL_FILE,
    SITE_URL_FILE, SUMMARY_FILE, TITLE_FILE, TOC_ITEM_PARTIAL, TOC_TEMPLATE,
};
use crate::generate::SAVE_FOR_LATER_PATH;
use crate::naming::chapter_path;
use maud::{DOCTYPE, Markup, PreEscaped, html};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ScaffoldError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("refusing to overwrite {}", .0.display())]
    Exists(PathBuf),
}

/// Styles shared by every page. Empty chapter links are hidden, which is
/// how the first and last chapters lose their backward/forward links.
const STARTER_CSS: &str = r#"
body { max-width: 40rem; margin: 2rem auto; padding: 0 1rem; font-family: Georgia, serif; line-height: 1.6; }
.hidden { display: none; }
.chapter-nav { display: flex; gap: 1rem; justify-content: space-between; }
.chapter-nav a[href=""] { visibility: hidden; }
.save-for-later-tooltip { max-width: 16rem; padding: 0.4rem 0.6rem; background: #222; color: #fff; font-size: 0.85rem; border-radius: 4px; }
"#;

/// Every file `init` writes, relative to the target directory.
pub fn starter_files() -> Vec<(String, String)> {
    vec![
        (CONFIG_FILENAME.to_string(), config::stock_config_toml().to_string()),
        (INDEX_TEMPLATE.to_string(), index_template().into_string()),
        (TOC_TEMPLATE.to_string(), toc_template().into_string()),
        (CHAPTER_TEMPLATE.to_string(), chapter_template().into_string()),
        (HEAD_PARTIAL.to_string(), head_partial().into_string()),
        (CHAPTER_NAV_PARTIAL.to_string(), chapter_nav_partial().into_string()),
        (TOC_ITEM_PARTIAL.to_string(), toc_item_partial().into_string()),
        (TITLE_FILE.to_string(), "Untitled Work\n".to_string()),
        (
            SUMMARY_FILE.to_string(),
            "<p>A one-paragraph summary of the work.</p>\n".to_string(),
        ),
        (SITE_URL_FILE.to_string(), "https://example.com/\n".to_string()),
        (
            MIRROR_URL_FILE.to_string(),
            "https://archiveofourown.org/\n".to_string(),
        ),
        (
            chapter_path(1),
            "Beginnings\n<p>The first chapter starts here.</p>\n".to_string(),
        ),
    ]
}

/// Write the starter content into `dir`, creating it if needed.
///
/// Returns the written paths, relative to `dir`.
pub fn init(dir: &Path) -> Result<Vec<String>, ScaffoldError> {
    let files = starter_files();

    if let Some((existing, _)) = files.iter().find(|(rel, _)| dir.join(rel).exists()) {
        return Err(ScaffoldError::Exists(dir.join(existing)));
    }

    for (rel, contents) in &files {
        let path = dir.join(rel);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, contents)?;
    }

    Ok(files.into_iter().map(|(rel, _)| rel).collect())
}

// ============================================================================
// Templates
// ============================================================================

fn widget_script() -> Markup {
    html! {
        script src={ "$BASE" (SAVE_FOR_LATER_PATH) } {}
    }
}

fn index_template() -> Markup {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                title { "$WORK_TITLE" }
                "$HEAD_COMMON"
            }
            body {
                h1 { "$WORK_TITLE" }
                div #saved-container .hidden {
                    "Continue reading: "
                    a #saved-container-anchor href="" {}
                }
                div.summary { "$SUMMARY" }
                nav {
                    a href="$BASEtoc.html" { "Table of Contents" }
                    " · "
                    a href="$AO3_URL" { "Also on AO3" }
                }
                (widget_script())
            }
        }
    }
}

fn toc_template() -> Markup {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                title { "Contents" }
                "$HEAD_COMMON"
            }
            body {
                h1 { "Contents" }
                ol.toc { "$ITEMS" }
                p { a href="$BASE" { "Home" } }
            }
        }
    }
}

fn chapter_template() -> Markup {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                title { "$PAGE_TITLE" }
                meta name="description" content="$CHAPTER_DESCRIPTION";
                "$HEAD_COMMON"
            }
            body {
                "$CHAPTER_NAV"
                h1 { "$PAGE_TITLE" }
                button #save-for-later type="button" disabled { "Save for Later" }
                main { "$PAGE_CONTENT" }
                "$CHAPTER_NAV"
                (widget_script())
            }
        }
    }
}

fn head_partial() -> Markup {
    html! {
        meta charset="utf-8";
        meta name="viewport" content="width=device-width, initial-scale=1.0";
        link rel="manifest" href="$BASEmanifest.webmanifest";
        style { (PreEscaped(STARTER_CSS)) }
    }
}

fn chapter_nav_partial() -> Markup {
    html! {
        nav.chapter-nav {
            a.first href="$FIRST_CHAPTER_HREF" { "First" }
            a.previous href="$PREVIOUS_CHAPTER_HREF" { "Previous" }
            a.contents href="$BASEtoc.html" { "Contents" }
            a.next href="$NEXT_CHAPTER_HREF" { "Next" }
            a.last href="$LAST_CHAPTER_HREF" { "Last" }
        }
    }
}

fn toc_item_partial() -> Markup {
    html! {
        li { a href="$HREF" { "$LABEL" } }
    }
}
