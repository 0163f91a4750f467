//! CLI output formatting for every command.
//!
//! # Information-First Display
//!
//! Output leads with what the reader knows the work by (the work title,
//! chapter numbers and titles) and shows file paths as secondary context,
//! either after `→` or on indented `Source:` lines.
//!
//! # Output Format
//!
//! ## Check
//!
//! ```text
//! Work
//!     The Lighthouse Keeper
//!     Summary: A keeper tends the light through one lon...
//!     Base: https://example.org/lighthouse/ (production)
//!     Mirror: https://archiveofourown.org/works/000000
//!
//! Chapters
//! 001 The Lamp
//!     Source: pages/1.html
//! 002 The Storm
//!     Source: pages/2.html
//!
//! Config
//!     (stock defaults)
//!
//! Checked 5 pages, no warnings
//! ```
//!
//! ## Build
//!
//! ```text
//! Home → index.html
//! Contents → toc.html
//!
//! Chapters
//!     001 Chapter 1: The Lamp → pages/1.html
//!     002 Chapter 2: The Storm → pages/2.html
//!
//! Assets
//!     assets/save-for-later.js
//!     manifest.webmanifest
//!     sw.js (chapbook-3f0a9c1e52b7d846)
//!     robots.txt
//!
//! Generated 2 chapters, 2 pages, 1 public file
//! ```
//!
//! ## Entries
//!
//! ```text
//! index → index.html
//! toc → toc.html
//! 1 → pages/1.html
//! ```
//!
//! # Architecture
//!
//! Each command has a `format_*` function (returns `Vec<String>`) for
//! testability and a `print_*` wrapper that writes to stdout. Format
//! functions are pure: no I/O, no side effects.

use crate::generate::{
    GenerateReport, RenderedPage, SAVE_FOR_LATER_PATH, SERVICE_WORKER_PATH, WEB_MANIFEST_PATH,
};
use crate::registrar::EntryPoint;
use crate::render::{BuildContext, PageKind};
use std::path::Path;

// ============================================================================
// Shared display helpers
// ============================================================================

/// Format a 1-based positional index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

/// Return indentation string: 4 spaces per depth level.
fn indent(depth: usize) -> String {
    "    ".repeat(depth)
}

/// Strip HTML tags from a string (simple angle-bracket stripping).
fn strip_html_tags(html: &str) -> String {
    let mut result = String::with_capacity(html.len());
    let mut in_tag = false;
    for c in html.chars() {
        match c {
            '<' => in_tag = true,
            '>' => in_tag = false,
            _ if !in_tag => result.push(c),
            _ => {}
        }
    }
    result
}

/// Truncate text to `max` characters, appending `...` if truncated.
fn truncate_desc(text: &str, max: usize) -> String {
    match text.char_indices().nth(max) {
        Some((cut, _)) => format!("{}...", &text[..cut]),
        None => text.to_string(),
    }
}

fn plural(count: usize, singular: &str, plural: &str) -> String {
    if count == 1 {
        format!("{count} {singular}")
    } else {
        format!("{count} {plural}")
    }
}

/// One warning line per placeholder left in a rendered page.
fn format_warnings(pages: &[RenderedPage]) -> Vec<String> {
    pages
        .iter()
        .flat_map(|page| {
            page.leftover.iter().map(move |token| {
                format!("Warning: {}: unreplaced {}", page.entry.path, token)
            })
        })
        .collect()
}

fn warning_summary(count: usize) -> String {
    match count {
        0 => "no warnings".to_string(),
        n => plural(n, "warning", "warnings"),
    }
}

// ============================================================================
// check
// ============================================================================

/// Format the loaded work: metadata, chapters, and where config came from.
pub fn format_load_output(ctx: &BuildContext, has_config_file: bool) -> Vec<String> {
    let mut lines = Vec::new();

    lines.push("Work".to_string());
    lines.push(format!("{}{}", indent(1), ctx.metadata.work_title));
    let summary = strip_html_tags(&ctx.metadata.summary);
    let summary = summary.split_whitespace().collect::<Vec<_>>().join(" ");
    if !summary.is_empty() {
        lines.push(format!("{}Summary: {}", indent(1), truncate_desc(&summary, 40)));
    }
    lines.push(format!("{}Base: {} ({})", indent(1), ctx.base, ctx.mode));
    lines.push(format!("{}Mirror: {}", indent(1), ctx.metadata.mirror_url));

    lines.push(String::new());
    lines.push("Chapters".to_string());
    for chapter in &ctx.chapters {
        lines.push(format!(
            "{} {}",
            format_index(chapter.number as usize),
            chapter.title
        ));
        lines.push(format!("{}Source: {}", indent(1), chapter.path()));
    }

    lines.push(String::new());
    lines.push("Config".to_string());
    if has_config_file {
        lines.push(format!("{}{}", indent(1), crate::config::CONFIG_FILENAME));
    } else {
        lines.push(format!("{}(stock defaults)", indent(1)));
    }

    lines
}

/// Format the result of `check`: the loaded work plus render warnings.
pub fn format_check_output(
    ctx: &BuildContext,
    has_config_file: bool,
    pages: &[RenderedPage],
) -> Vec<String> {
    let mut lines = format_load_output(ctx, has_config_file);
    let warnings = format_warnings(pages);

    lines.push(String::new());
    let warning_count = warnings.len();
    lines.extend(warnings);
    lines.push(format!(
        "Checked {}, {}",
        plural(pages.len(), "page", "pages"),
        warning_summary(warning_count)
    ));

    lines
}

pub fn print_check_output(ctx: &BuildContext, has_config_file: bool, pages: &[RenderedPage]) {
    for line in format_check_output(ctx, has_config_file, pages) {
        println!("{}", line);
    }
}

// ============================================================================
// build
// ============================================================================

/// Format what a build wrote.
///
/// Information-first: each page leads with its title, followed by `→` and
/// the output path.
pub fn format_generate_output(report: &GenerateReport) -> Vec<String> {
    let mut lines = Vec::new();
    let mut chapter_lines = Vec::new();
    let mut other_pages = 0;

    for page in &report.pages {
        match page.kind {
            PageKind::Index => {
                other_pages += 1;
                lines.push(format!("Home \u{2192} {}", page.entry.path));
            }
            PageKind::Toc => {
                other_pages += 1;
                lines.push(format!("Contents \u{2192} {}", page.entry.path));
            }
            PageKind::Chapter(number) => chapter_lines.push(format!(
                "{}{} {} \u{2192} {}",
                indent(1),
                format_index(number as usize),
                page.title,
                page.entry.path
            )),
            PageKind::Other => {
                other_pages += 1;
                lines.push(format!("{} \u{2192} {}", page.entry.name, page.entry.path));
            }
        }
    }

    if !chapter_lines.is_empty() {
        lines.push(String::new());
        lines.push("Chapters".to_string());
        lines.append(&mut chapter_lines);
    }

    lines.push(String::new());
    lines.push("Assets".to_string());
    lines.push(format!("{}{}", indent(1), SAVE_FOR_LATER_PATH));
    if report.manifest_written {
        lines.push(format!("{}{}", indent(1), WEB_MANIFEST_PATH));
    }
    lines.push(format!(
        "{}{} ({})",
        indent(1),
        SERVICE_WORKER_PATH,
        report.cache_name
    ));
    for file in &report.public_files {
        lines.push(format!("{}{}", indent(1), file));
    }

    let warnings = format_warnings(&report.pages);
    if !warnings.is_empty() {
        lines.push(String::new());
        lines.extend(warnings);
    }

    let chapter_count = report
        .pages
        .iter()
        .filter(|p| matches!(p.kind, PageKind::Chapter(_)))
        .count();
    lines.push(String::new());
    lines.push(format!(
        "Generated {}, {}, {}",
        plural(chapter_count, "chapter", "chapters"),
        plural(other_pages, "page", "pages"),
        plural(report.public_files.len(), "public file", "public files")
    ));

    lines
}

pub fn print_generate_output(report: &GenerateReport) {
    for line in format_generate_output(report) {
        println!("{}", line);
    }
}

// ============================================================================
// entries / init
// ============================================================================

/// Format the registered entry points as `name → path` lines.
pub fn format_entries(entries: &[EntryPoint]) -> Vec<String> {
    entries
        .iter()
        .map(|entry| format!("{} \u{2192} {}", entry.name, entry.path))
        .collect()
}

pub fn print_entries(entries: &[EntryPoint]) {
    for line in format_entries(entries) {
        println!("{}", line);
    }
}

/// Format the files written by `init`.
pub fn format_init_output(dir: &Path, written: &[String]) -> Vec<String> {
    let mut lines = vec![format!("Created {}", dir.display())];
    lines.extend(written.iter().map(|rel| format!("{}{}", indent(1), rel)));
    lines
}

pub fn print_init_output(dir: &Path, written: &[String]) {
    for line in format_init_output(dir, written) {
        println!("{}", line);
    }
}

// ============================================================================
// Tests
// ============================================================================
