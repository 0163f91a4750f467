//! Page rendering.
//!
//! Turns templates plus a [`BuildContext`] into final HTML for the three page
//! kinds of the site:
//!
//! | Page path          | Template            | Renderer           |
//! |--------------------|---------------------|--------------------|
//! | `/index.html`      | `index.html`        | [`render_index`]   |
//! | `/toc.html`        | `toc.html`          | [`render_toc`]     |
//! | `/pages/<N>.html`  | `chapter.html`      | [`render_chapter`] |
//!
//! [`transform`] is the single entry point the generator uses: it classifies
//! a page path and dispatches, passing any other page through unchanged.
//!
//! Every page renders in three passes (see [`crate::template`]): shared
//! partials first, then the page's own record, then `$BASE`.

use crate::chapters::{self, Chapter, LoadError};
use crate::config::{self, BuildMode, SiteConfig};
use crate::content::{Metadata, Partials};
use crate::naming;
use crate::navigation::{self, NavigationError};
use crate::template::{
    self, BaseVars, ChapterSharedVars, ChapterVars, IndexVars, SharedVars, TemplateVars, TocItemVars,
    TocVars,
};
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum RenderError {
    #[error(transparent)]
    Navigation(#[from] NavigationError),
}

/// Everything a build reads from disk, loaded once and shared read-only by
/// every page renderer.
#[derive(Debug, Clone)]
pub struct BuildContext {
    pub mode: BuildMode,
    /// Site base path for this build, always ending in `/`.
    pub base: String,
    pub metadata: Metadata,
    pub partials: Partials,
    /// Validated chapters, numbered `1..=N`.
    pub chapters: Vec<Chapter>,
}

impl BuildContext {
    /// Load metadata, partials, and chapters from the content root.
    pub fn load(root: &Path, config: &SiteConfig, mode: BuildMode) -> Result<Self, LoadError> {
        let metadata = Metadata::load(root)?;
        let partials = Partials::load(root)?;
        let chapters = chapters::load_chapters(root)?;
        let base = config::normalize_base(
            config
                .base_for(mode)
                .unwrap_or(metadata.site_url.as_str()),
        );
        Ok(Self {
            mode,
            base,
            metadata,
            partials,
            chapters,
        })
    }

    pub fn last_chapter_number(&self) -> u32 {
        chapters::last_chapter_number(&self.chapters)
    }
}

/// What a page path renders as.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageKind {
    Index,
    Toc,
    Chapter(u32),
    /// Not a templated page; passes through unmodified.
    Other,
}

/// Classify a site-absolute page path such as `/pages/3.html`.
pub fn classify(path: &str) -> PageKind {
    match path {
        "/index.html" => PageKind::Index,
        "/toc.html" => PageKind::Toc,
        _ => match naming::chapter_number_from_page_path(path) {
            Some(number) if path.starts_with('/') => PageKind::Chapter(number),
            _ => PageKind::Other,
        },
    }
}

/// Link to a chapter page, or the empty string when there is no chapter.
///
/// Templates decide how to present an empty link (hide it, disable it).
pub fn chapter_href(base: &str, chapter: Option<&Chapter>) -> String {
    match chapter {
        Some(chapter) => format!("{base}{}", chapter.path()),
        None => String::new(),
    }
}

/// Render `html` as the page at `path`.
///
/// Chapter pages are rendered from the chapter template; the incoming
/// `html` (the raw fragment) is not used.
pub fn transform(ctx: &BuildContext, path: &str, html: &str) -> Result<String, RenderError> {
    Ok(match classify(path) {
        PageKind::Index => render_index(ctx, html),
        PageKind::Toc => render_toc(ctx, html),
        PageKind::Chapter(number) => render_chapter(ctx, number)?,
        PageKind::Other => html.to_string(),
    })
}

/// Run the three rendering passes over `template`.
fn render_passes(
    ctx: &BuildContext,
    template: &str,
    shared: &impl TemplateVars,
    page: &impl TemplateVars,
) -> String {
    let pre = template::render(template, shared);
    let body = template::render(&pre, page);
    template::render(&body, &BaseVars { base: &ctx.base })
}

fn shared_vars(ctx: &BuildContext) -> SharedVars<'_> {
    SharedVars {
        head_common: &ctx.partials.head,
    }
}

/// Render the index page from its template.
pub fn render_index(ctx: &BuildContext, template: &str) -> String {
    let vars = IndexVars {
        work_title: &ctx.metadata.work_title,
        summary: &ctx.metadata.summary,
        ao3_url: &ctx.metadata.mirror_url,
    };
    render_passes(ctx, template, &shared_vars(ctx), &vars)
}

/// Render the table-of-contents items, one per chapter, in chapter order.
pub fn render_toc_items(ctx: &BuildContext) -> String {
    ctx.chapters
        .iter()
        .map(|chapter| {
            let href = chapter_href(&ctx.base, Some(chapter));
            template::render(
                &ctx.partials.toc_item,
                &TocItemVars {
                    href: &href,
                    label: &chapter.title,
                },
            )
        })
        .collect()
}

/// Render the table-of-contents page from its template.
pub fn render_toc(ctx: &BuildContext, template: &str) -> String {
    let items = render_toc_items(ctx);
    render_passes(ctx, template, &shared_vars(ctx), &TocVars { items: &items })
}

/// `Chapter 3: The Storm`
pub fn chapter_page_title(chapter: &Chapter) -> String {
    format!("Chapter {}: {}", chapter.number, chapter.title)
}

/// `3 of 12`
pub fn chapter_description(chapter: &Chapter, last_number: u32) -> String {
    format!("{} of {}", chapter.number, last_number)
}

/// Render the page for chapter `number` from the chapter template.
pub fn render_chapter(ctx: &BuildContext, number: u32) -> Result<String, RenderError> {
    let rel = navigation::resolve(&ctx.chapters, number)?;

    let page_title = chapter_page_title(rel.current);
    let description = chapter_description(rel.current, ctx.last_chapter_number());
    let first = chapter_href(&ctx.base, rel.first);
    let previous = chapter_href(&ctx.base, rel.previous);
    let next = chapter_href(&ctx.base, rel.next);
    let last = chapter_href(&ctx.base, rel.last);

    let shared = ChapterSharedVars {
        head_common: &ctx.partials.head,
        chapter_nav: &ctx.partials.chapter_nav,
    };
    let vars = ChapterVars {
        page_title: &page_title,
        chapter_description: &description,
        first_chapter_href: &first,
        previous_chapter_href: &previous,
        next_chapter_href: &next,
        last_chapter_href: &last,
        page_content: &rel.current.body,
    };
    Ok(render_passes(ctx, &ctx.partials.chapter, &shared, &vars))
}
