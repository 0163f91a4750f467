//! `$TOKEN` substitution over HTML templates.
//!
//! Templates are plain HTML files containing literal placeholders such as
//! `$WORK_TITLE`. Rendering replaces every occurrence of a placeholder with
//! a value, verbatim: no escaping, no expressions, no loops.
//!
//! # Typed Records
//!
//! Placeholders are not free-form strings. The vocabulary is the closed
//! [`Token`] enum, and each rendering pass takes a record struct with one
//! field per token it substitutes ([`IndexVars`], [`ChapterVars`], ...).
//! Every record destructures itself exhaustively in
//! [`TemplateVars::substitutions`], so adding a field without wiring it up,
//! or renaming a token without updating its callers, fails to compile
//! instead of leaving a placeholder silently unreplaced.
//!
//! # Substitution Semantics
//!
//! One pass is a single left-to-right scan. At each `$` the longest
//! placeholder from the pass's record is matched and replaced; the inserted
//! value is copied to the output and never re-scanned, so a chapter body
//! containing the text `$LABEL` is left alone by the pass that inserted it.
//! Placeholders outside the record are copied through untouched, which is
//! what lets pages render in several passes:
//!
//! ```text
//! pre   $HEAD_COMMON, $CHAPTER_NAV   shared partials (may contain page tokens)
//! page  $WORK_TITLE, $PAGE_TITLE...  page-specific values
//! post  $BASE                        site base path
//! ```

use std::fmt;

/// Every placeholder a template may contain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Token {
    HeadCommon,
    WorkTitle,
    Summary,
    Ao3Url,
    Items,
    Href,
    Label,
    ChapterNav,
    PageTitle,
    ChapterDescription,
    FirstChapterHref,
    PreviousChapterHref,
    NextChapterHref,
    LastChapterHref,
    PageContent,
    Base,
}

impl Token {
    pub const ALL: [Token; 16] = [
        Token::HeadCommon,
        Token::WorkTitle,
        Token::Summary,
        Token::Ao3Url,
        Token::Items,
        Token::Href,
        Token::Label,
        Token::ChapterNav,
        Token::PageTitle,
        Token::ChapterDescription,
        Token::FirstChapterHref,
        Token::PreviousChapterHref,
        Token::NextChapterHref,
        Token::LastChapterHref,
        Token::PageContent,
        Token::Base,
    ];

    /// The literal text of the placeholder, including the `$`.
    pub fn placeholder(self) -> &'static str {
        match self {
            Token::HeadCommon => "$HEAD_COMMON",
            Token::WorkTitle => "$WORK_TITLE",
            Token::Summary => "$SUMMARY",
            Token::Ao3Url => "$AO3_URL",
            Token::Items => "$ITEMS",
            Token::Href => "$HREF",
            Token::Label => "$LABEL",
            Token::ChapterNav => "$CHAPTER_NAV",
            Token::PageTitle => "$PAGE_TITLE",
            Token::ChapterDescription => "$CHAPTER_DESCRIPTION",
            Token::FirstChapterHref => "$FIRST_CHAPTER_HREF",
            Token::PreviousChapterHref => "$PREVIOUS_CHAPTER_HREF",
            Token::NextChapterHref => "$NEXT_CHAPTER_HREF",
            Token::LastChapterHref => "$LAST_CHAPTER_HREF",
            Token::PageContent => "$PAGE_CONTENT",
            Token::Base => "$BASE",
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.placeholder())
    }
}

/// A record of values for one rendering pass.
pub trait TemplateVars {
    /// `(token, value)` pairs for every field of the record.
    fn substitutions(&self) -> Vec<(Token, &str)>;
}

/// Substitute every placeholder named by `vars` in `template`.
pub fn render(template: &str, vars: &impl TemplateVars) -> String {
    let mut subs = vars.substitutions();
    // Longest first, so a placeholder that prefixes another never shadows it.
    subs.sort_by_key(|(token, _)| std::cmp::Reverse(token.placeholder().len()));

    let mut out = String::with_capacity(template.len());
    let mut rest = template;
    while let Some(pos) = rest.find('$') {
        out.push_str(&rest[..pos]);
        let tail = &rest[pos..];
        match subs
            .iter()
            .find(|(token, _)| tail.starts_with(token.placeholder()))
        {
            Some((token, value)) => {
                out.push_str(value);
                rest = &tail[token.placeholder().len()..];
            }
            None => {
                out.push('$');
                rest = &tail[1..];
            }
        }
    }
    out.push_str(rest);
    out
}

/// Known placeholders still present in `html`, in vocabulary order.
///
/// A fully rendered page should contain none; anything returned here is
/// either a template typo or a token used on the wrong page kind.
pub fn leftover_tokens(html: &str) -> Vec<Token> {
    Token::ALL
        .iter()
        .copied()
        .filter(|token| contains_placeholder(html, *token))
        .collect()
}

/// Whether `html` contains `token` as a placeholder, matching the way
/// [`render`] would see it (longest match at each `$`).
fn contains_placeholder(html: &str, token: Token) -> bool {
    let needle = token.placeholder();
    html.match_indices('$').any(|(pos, _)| {
        let tail = &html[pos..];
        tail.starts_with(needle)
            && !Token::ALL.iter().any(|other| {
                other.placeholder().len() > needle.len() && tail.starts_with(other.placeholder())
            })
    })
}

// =============================================================================
// Records
// =============================================================================

/// Pre pass: partials shared by every page.
pub struct SharedVars<'a> {
    pub head_common: &'a str,
}

impl TemplateVars for SharedVars<'_> {
    fn substitutions(&self) -> Vec<(Token, &str)> {
        let Self { head_common } = *self;
        vec![(Token::HeadCommon, head_common)]
    }
}

/// Pre pass for chapter pages: the shared head plus the chapter nav bar.
pub struct ChapterSharedVars<'a> {
    pub head_common: &'a str,
    pub chapter_nav: &'a str,
}

impl TemplateVars for ChapterSharedVars<'_> {
    fn substitutions(&self) -> Vec<(Token, &str)> {
        let Self {
            head_common,
            chapter_nav,
        } = *self;
        vec![
            (Token::HeadCommon, head_common),
            (Token::ChapterNav, chapter_nav),
        ]
    }
}

/// Index page values.
pub struct IndexVars<'a> {
    pub work_title: &'a str,
    pub summary: &'a str,
    pub ao3_url: &'a str,
}

impl TemplateVars for IndexVars<'_> {
    fn substitutions(&self) -> Vec<(Token, &str)> {
        let Self {
            work_title,
            summary,
            ao3_url,
        } = *self;
        vec![
            (Token::WorkTitle, work_title),
            (Token::Summary, summary),
            (Token::Ao3Url, ao3_url),
        ]
    }
}

/// One table-of-contents entry.
pub struct TocItemVars<'a> {
    pub href: &'a str,
    pub label: &'a str,
}

impl TemplateVars for TocItemVars<'_> {
    fn substitutions(&self) -> Vec<(Token, &str)> {
        let Self { href, label } = *self;
        vec![(Token::Href, href), (Token::Label, label)]
    }
}

/// Table-of-contents page values.
pub struct TocVars<'a> {
    pub items: &'a str,
}

impl TemplateVars for TocVars<'_> {
    fn substitutions(&self) -> Vec<(Token, &str)> {
        let Self { items } = *self;
        vec![(Token::Items, items)]
    }
}

/// Chapter page values. Hrefs are empty strings for absent neighbours.
pub struct ChapterVars<'a> {
    pub page_title: &'a str,
    pub chapter_description: &'a str,
    pub first_chapter_href: &'a str,
    pub previous_chapter_href: &'a str,
    pub next_chapter_href: &'a str,
    pub last_chapter_href: &'a str,
    pub page_content: &'a str,
}

impl TemplateVars for ChapterVars<'_> {
    fn substitutions(&self) -> Vec<(Token, &str)> {
        let Self {
            page_title,
            chapter_description,
            first_chapter_href,
            previous_chapter_href,
            next_chapter_href,
            last_chapter_href,
            page_content,
        } = *self;
        vec![
            (Token::PageTitle, page_title),
            (Token::ChapterDescription, chapter_description),
            (Token::FirstChapterHref, first_chapter_href),
            (Token::PreviousChapterHref, previous_chapter_href),
            (Token::NextChapterHref, next_chapter_href),
            (Token::LastChapterHref, last_chapter_href),
            (Token::PageContent, page_content),
        ]
    }
}

/// Post pass: the site base path.
pub struct BaseVars<'a> {
    pub base: &'a str,
}

impl TemplateVars for BaseVars<'_> {
    fn substitutions(&self) -> Vec<(Token, &str)> {
        let Self { base } = *self;
        vec![(Token::Base, base)]
    }
}
