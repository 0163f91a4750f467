//! Static site generation.
//!
//! Renders every registered entry point and writes the finished site.
//!
//! ## Output Structure
//!
//! ```text
//! dist/
//! ├── index.html                 # Home page
//! ├── toc.html                   # Table of contents
//! ├── pages/
//! │   ├── 1.html                 # Chapter pages
//! │   └── 2.html
//! ├── assets/
//! │   └── save-for-later.js      # Bookmark widget
//! ├── manifest.webmanifest       # Installable-app manifest
//! ├── sw.js                      # Offline service worker
//! └── icon.png ...               # Everything from content/public/
//! ```
//!
//! ## Determinism
//!
//! Output is a pure function of the content directory: the output directory
//! is emptied first, entries are rendered in registration order, the
//! manifest is serialized from a struct with a fixed field order, and
//! nothing time- or host-dependent is embedded. Building twice from
//! unchanged sources writes byte-identical files.
//!
//! ## Reserved Paths
//!
//! Files under `public/` are copied verbatim, but never over a generated
//! file. A public file at a page path, the widget script, the web manifest,
//! or the service worker is an error.
//!
//! ## Offline Reading
//!
//! `sw.js` precaches every registered page on install and serves same-origin
//! requests stale-while-revalidate. Its cache name carries a hash of the
//! generated pages and script, so any content change installs a fresh cache
//! and the old one is deleted on activation. The widget script registers it.

use crate::config::ManifestConfig;
use crate::content::{self, ContentError};
use crate::registrar::EntryPoint;
use crate::render::{self, BuildContext, PageKind, RenderError};
use crate::template::{self, Token};
use serde::Serialize;
use sha2::{Digest, Sha256};
use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use walkdir::WalkDir;

#[derive(Error, Debug)]
pub enum GenerateError {
    #[error("cannot write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error(transparent)]
    Content(#[from] ContentError),
    #[error(transparent)]
    Render(#[from] RenderError),
    #[error("walking {}: {source}", path.display())]
    Walk {
        path: PathBuf,
        #[source]
        source: walkdir::Error,
    },
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("public/{0} would overwrite a generated file")]
    PublicCollision(String),
    #[error("refusing to clear output {}: it contains the source directory", .0.display())]
    OutputContainsSource(PathBuf),
}

/// Client-side bookmark widget, shipped with every site.
const SAVE_FOR_LATER_JS: &str = include_str!("../static/save-for-later.js");

/// Output path of the bookmark widget script.
pub const SAVE_FOR_LATER_PATH: &str = "assets/save-for-later.js";

/// Output path of the installable-app manifest.
pub const WEB_MANIFEST_PATH: &str = "manifest.webmanifest";

/// Service worker template; see [`render_service_worker`].
const SERVICE_WORKER_JS: &str = include_str!("../static/sw.js");

/// Output path of the service worker. It sits at the site root so its scope
/// covers every page.
pub const SERVICE_WORKER_PATH: &str = "sw.js";

/// Prefix of every cache the service worker creates.
pub const CACHE_NAME_PREFIX: &str = "chapbook-";

/// A page rendered in memory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedPage {
    pub entry: EntryPoint,
    pub kind: PageKind,
    /// Display title: the work title, "Contents", or "Chapter N: Title".
    pub title: String,
    pub html: String,
    /// Known placeholders that survived rendering.
    pub leftover: Vec<Token>,
}

/// What a generate run wrote.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerateReport {
    pub pages: Vec<RenderedPage>,
    /// Files copied from `public/`, relative to the output root.
    pub public_files: Vec<String>,
    /// Whether `manifest.webmanifest` was written.
    pub manifest_written: bool,
    /// Cache name baked into `sw.js`.
    pub cache_name: String,
}

/// Render every entry point into memory.
///
/// Each entry's source file is read and handed to the transform hook.
pub fn render_site(
    ctx: &BuildContext,
    entries: &[EntryPoint],
    source_root: &Path,
) -> Result<Vec<RenderedPage>, GenerateError> {
    entries
        .iter()
        .map(|entry| {
            let source = content::read_file(source_root, &entry.path)?;
            let page_path = entry.page_path();
            let html = render::transform(ctx, &page_path, &source)?;
            let kind = render::classify(&page_path);
            let title = page_title(ctx, kind);
            let leftover = template::leftover_tokens(&html);
            Ok(RenderedPage {
                entry: entry.clone(),
                kind,
                title,
                html,
                leftover,
            })
        })
        .collect()
}

fn page_title(ctx: &BuildContext, kind: PageKind) -> String {
    match kind {
        PageKind::Index => ctx.metadata.work_title.clone(),
        PageKind::Toc => "Contents".to_string(),
        PageKind::Chapter(number) => (number as usize)
            .checked_sub(1)
            .and_then(|idx| ctx.chapters.get(idx))
            .map(render::chapter_page_title)
            .unwrap_or_default(),
        PageKind::Other => String::new(),
    }
}

/// Render the site and write it to `output_dir`.
///
/// Everything already in `output_dir` is removed first.
pub fn generate(
    ctx: &BuildContext,
    entries: &[EntryPoint],
    manifest: &ManifestConfig,
    source_root: &Path,
    output_dir: &Path,
) -> Result<GenerateReport, GenerateError> {
    let pages = render_site(ctx, entries, source_root)?;

    let public_dir = source_root.join(content::PUBLIC_DIR);
    let public_files = list_public(&public_dir)?;
    let reserved = reserved_paths(entries, manifest);
    if let Some(clash) = public_files.iter().find(|rel| reserved.contains(rel.as_str())) {
        return Err(GenerateError::PublicCollision(clash.clone()));
    }

    clean_output_dir(output_dir, source_root)?;

    for page in &pages {
        write_file(&output_dir.join(&page.entry.path), page.html.as_bytes())?;
    }

    for rel in &public_files {
        let dst = output_dir.join(rel);
        if let Some(parent) = dst.parent() {
            create_dir(parent)?;
        }
        fs::copy(public_dir.join(rel), &dst).map_err(|source| GenerateError::Write {
            path: dst.clone(),
            source,
        })?;
    }

    write_file(
        &output_dir.join(SAVE_FOR_LATER_PATH),
        SAVE_FOR_LATER_JS.as_bytes(),
    )?;

    if manifest.enabled {
        let json = render_web_manifest(ctx, manifest)?;
        write_file(&output_dir.join(WEB_MANIFEST_PATH), json.as_bytes())?;
    }

    let cache_name = cache_name(&pages);
    let sw = render_service_worker(&cache_name, &precache_urls(entries))?;
    write_file(&output_dir.join(SERVICE_WORKER_PATH), sw.as_bytes())?;

    Ok(GenerateReport {
        pages,
        public_files,
        manifest_written: manifest.enabled,
        cache_name,
    })
}

/// Output paths the generator owns. `public/` may not ship a file at any of
/// them.
fn reserved_paths<'a>(entries: &'a [EntryPoint], manifest: &ManifestConfig) -> BTreeSet<&'a str> {
    let mut reserved: BTreeSet<&str> = entries.iter().map(|e| e.path.as_str()).collect();
    reserved.insert(SAVE_FOR_LATER_PATH);
    reserved.insert(SERVICE_WORKER_PATH);
    if manifest.enabled {
        reserved.insert(WEB_MANIFEST_PATH);
    }
    reserved
}

/// Remove everything inside `output_dir`, keeping the directory itself.
///
/// An output directory that is, or contains, the source directory is
/// rejected rather than emptied.
fn clean_output_dir(output_dir: &Path, source_root: &Path) -> Result<(), GenerateError> {
    if !output_dir.exists() {
        return create_dir(output_dir);
    }
    let io_err = |source| GenerateError::Write {
        path: output_dir.to_path_buf(),
        source,
    };
    let output = output_dir.canonicalize().map_err(io_err)?;
    if let Ok(source) = source_root.canonicalize()
        && source.starts_with(&output)
    {
        return Err(GenerateError::OutputContainsSource(output_dir.to_path_buf()));
    }
    for entry in fs::read_dir(output_dir).map_err(io_err)? {
        let path = entry.map_err(io_err)?.path();
        let removed = if path.is_dir() {
            fs::remove_dir_all(&path)
        } else {
            fs::remove_file(&path)
        };
        removed.map_err(|source| GenerateError::Write { path, source })?;
    }
    Ok(())
}

fn create_dir(path: &Path) -> Result<(), GenerateError> {
    fs::create_dir_all(path).map_err(|source| GenerateError::Write {
        path: path.to_path_buf(),
        source,
    })
}

/// Write `contents` to `path`, creating parent directories.
fn write_file(path: &Path, contents: &[u8]) -> Result<(), GenerateError> {
    if let Some(parent) = path.parent() {
        create_dir(parent)?;
    }
    fs::write(path, contents).map_err(|source| GenerateError::Write {
        path: path.to_path_buf(),
        source,
    })
}

/// Every file under `public_dir`, relative to it, sorted. A missing
/// `public/` is not an error.
fn list_public(public_dir: &Path) -> Result<Vec<String>, GenerateError> {
    if !public_dir.is_dir() {
        return Ok(Vec::new());
    }
    let mut files = Vec::new();
    for entry in WalkDir::new(public_dir).sort_by_file_name() {
        let entry = entry.map_err(|source| GenerateError::Walk {
            path: public_dir.to_path_buf(),
            source,
        })?;
        if !entry.file_type().is_file() {
            continue;
        }
        let Ok(rel) = entry.path().strip_prefix(public_dir) else {
            continue;
        };
        files.push(rel.to_string_lossy().replace('\\', "/"));
    }
    Ok(files)
}

// ============================================================================
// Web app manifest
// ============================================================================

#[derive(Debug, Serialize)]
struct WebManifest<'a> {
    name: &'a str,
    short_name: &'a str,
    start_url: &'a str,
    display: &'a str,
    icons: Vec<ManifestIcon<'a>>,
}

#[derive(Debug, Serialize)]
struct ManifestIcon<'a> {
    src: &'a str,
    sizes: &'a str,
    #[serde(rename = "type")]
    mime_type: &'a str,
}

/// Serialize the installable-app manifest for this build.
pub fn render_web_manifest(
    ctx: &BuildContext,
    config: &ManifestConfig,
) -> Result<String, GenerateError> {
    let manifest = WebManifest {
        name: &ctx.metadata.work_title,
        short_name: &ctx.metadata.work_title,
        start_url: &ctx.base,
        display: &config.display,
        icons: vec![ManifestIcon {
            src: &config.icon,
            sizes: &config.icon_sizes,
            mime_type: &config.icon_type,
        }],
    };
    let mut json = serde_json::to_string_pretty(&manifest)?;
    json.push('\n');
    Ok(json)
}

// ============================================================================
// Service worker
// ============================================================================

/// Pages the service worker fetches on install, relative to its own URL.
pub fn precache_urls(entries: &[EntryPoint]) -> Vec<String> {
    entries.iter().map(|entry| entry.path.clone()).collect()
}

/// `chapbook-` plus the first 16 hex digits of a SHA-256 over every rendered
/// page and the widget script.
pub fn cache_name(pages: &[RenderedPage]) -> String {
    let mut hasher = Sha256::new();
    for page in pages {
        hasher.update(page.entry.path.as_bytes());
        hasher.update(b"\0");
        hasher.update(page.html.as_bytes());
        hasher.update(b"\0");
    }
    hasher.update(SAVE_FOR_LATER_JS.as_bytes());
    let digest = format!("{:x}", hasher.finalize());
    format!("{CACHE_NAME_PREFIX}{}", &digest[..16])
}

/// Fill the service worker template with its cache name and precache list.
pub fn render_service_worker(cache_name: &str, precache: &[String]) -> Result<String, GenerateError> {
    let urls = serde_json::to_string(precache)?;
    Ok(SERVICE_WORKER_JS
        .replace("__CACHE_NAME__", cache_name)
        .replace("__CACHE_PREFIX__", CACHE_NAME_PREFIX)
        .replace("__PRECACHE_URLS__", &urls))
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{BuildMode, SiteConfig};
    use crate::registrar;
    use crate::test_helpers::*;
    use tempfile::TempDir;

    fn load_fixture_site(root: &Path, mode: BuildMode) -> (BuildContext, Vec<EntryPoint>, SiteConfig) {
        let config = crate::config::load_config(root).unwrap();
        let ctx = BuildContext::load(root, &config, mode).unwrap();
        let entries = registrar::register(&ctx.chapters);
        (ctx, entries, config)
    }

    #[test]
    fn render_site_renders_every_entry() {
        let tmp = setup_fixtures();
        let (ctx, entries, _) = load_fixture_site(tmp.path(), BuildMode::Development);
        let pages = render_site(&ctx, &entries, tmp.path()).unwrap();

        assert_eq!(pages.len(), 5);
        assert_eq!(pages[0].kind, PageKind::Index);
        assert_eq!(pages[0].title, "The Lighthouse Keeper");
        assert_eq!(pages[1].title, "Contents");
        assert_eq!(pages[2].title, "Chapter 1: The Lamp");
        assert_eq!(pages[4].kind, PageKind::Chapter(3));
    }

    #[test]
    fn fixture_pages_have_no_leftover_tokens() {
        let tmp = setup_fixtures();
        let (ctx, entries, _) = load_fixture_site(tmp.path(), BuildMode::Production);
        for page in render_site(&ctx, &entries, tmp.path()).unwrap() {
            assert!(page.leftover.is_empty(), "{}: {:?}", page.entry.path, page.leftover);
        }
    }

    #[test]
    fn leftover_tokens_are_reported() {
        let tmp = setup_fixtures();
        fs::write(tmp.path().join("toc.html"), "<ul>$ITEMS</ul>$PAGE_TITLE").unwrap();
        let (ctx, entries, _) = load_fixture_site(tmp.path(), BuildMode::Development);
        let pages = render_site(&ctx, &entries, tmp.path()).unwrap();
        assert_eq!(pages[1].leftover, vec![Token::PageTitle]);
    }

    #[test]
    fn generate_writes_pages_and_assets() {
        let tmp = setup_fixtures();
        let out = TempDir::new().unwrap();
        let (ctx, entries, config) = load_fixture_site(tmp.path(), BuildMode::Development);
        let report = generate(&ctx, &entries, &config.manifest, tmp.path(), out.path()).unwrap();

        for path in ["index.html", "toc.html", "pages/1.html", "pages/2.html", "pages/3.html"] {
            assert!(out.path().join(path).is_file(), "missing {path}");
        }
        assert!(out.path().join(SAVE_FOR_LATER_PATH).is_file());
        assert!(out.path().join(WEB_MANIFEST_PATH).is_file());
        assert!(out.path().join(SERVICE_WORKER_PATH).is_file());
        assert!(out.path().join("robots.txt").is_file());
        assert!(out.path().join("icons/README.txt").is_file());
        assert_eq!(report.public_files, vec!["icons/README.txt", "robots.txt"]);
        assert!(report.manifest_written);
    }

    #[test]
    fn generated_chapter_page_is_rendered_not_copied() {
        let tmp = setup_fixtures();
        let out = TempDir::new().unwrap();
        let (ctx, entries, config) = load_fixture_site(tmp.path(), BuildMode::Development);
        generate(&ctx, &entries, &config.manifest, tmp.path(), out.path()).unwrap();

        let html = fs::read_to_string(out.path().join("pages/2.html")).unwrap();
        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains("Chapter 2: The Storm"));
        assert_eq!(extract_description(&html), "2 of 3");
    }

    #[test]
    fn manifest_disabled_is_not_written() {
        let tmp = setup_fixtures();
        let out = TempDir::new().unwrap();
        let (ctx, entries, mut config) = load_fixture_site(tmp.path(), BuildMode::Development);
        config.manifest.enabled = false;
        let report = generate(&ctx, &entries, &config.manifest, tmp.path(), out.path()).unwrap();
        assert!(!out.path().join(WEB_MANIFEST_PATH).exists());
        assert!(!report.manifest_written);
    }

    #[test]
    fn missing_public_dir_is_fine() {
        let tmp = setup_fixtures();
        fs::remove_dir_all(tmp.path().join("public")).unwrap();
        let out = TempDir::new().unwrap();
        let (ctx, entries, config) = load_fixture_site(tmp.path(), BuildMode::Development);
        let report = generate(&ctx, &entries, &config.manifest, tmp.path(), out.path()).unwrap();
        assert!(report.public_files.is_empty());
    }

    #[test]
    fn web_manifest_contents() {
        let tmp = setup_fixtures();
        let (ctx, _, config) = load_fixture_site(tmp.path(), BuildMode::Production);
        let json = render_web_manifest(&ctx, &config.manifest).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["name"], "The Lighthouse Keeper");
        assert_eq!(value["short_name"], "The Lighthouse Keeper");
        assert_eq!(value["display"], "minimal-ui");
        assert_eq!(value["start_url"], "https://example.org/lighthouse/");
        assert_eq!(value["icons"][0]["src"], "/icon.png");
        assert_eq!(value["icons"][0]["sizes"], "180x180");
        assert_eq!(value["icons"][0]["type"], "image/png");
    }

    #[test]
    fn generate_is_idempotent() {
        let tmp = setup_fixtures();
        let first = TempDir::new().unwrap();
        let second = TempDir::new().unwrap();
        let (ctx, entries, config) = load_fixture_site(tmp.path(), BuildMode::Production);
        generate(&ctx, &entries, &config.manifest, tmp.path(), first.path()).unwrap();

        // Reload from scratch, as a second build invocation would.
        let (ctx, entries, config) = load_fixture_site(tmp.path(), BuildMode::Production);
        generate(&ctx, &entries, &config.manifest, tmp.path(), second.path()).unwrap();

        assert_eq!(read_tree(first.path()), read_tree(second.path()));
    }

    #[test]
    fn rebuild_into_same_dir_overwrites() {
        let tmp = setup_fixtures();
        let out = TempDir::new().unwrap();
        let (ctx, entries, config) = load_fixture_site(tmp.path(), BuildMode::Development);
        generate(&ctx, &entries, &config.manifest, tmp.path(), out.path()).unwrap();

        fs::write(tmp.path().join("pages/title.txt"), "Renamed").unwrap();
        let (ctx, entries, config) = load_fixture_site(tmp.path(), BuildMode::Development);
        generate(&ctx, &entries, &config.manifest, tmp.path(), out.path()).unwrap();

        let index = fs::read_to_string(out.path().join("index.html")).unwrap();
        assert!(index.contains("Renamed"));
        assert!(!index.contains("The Lighthouse Keeper"));
    }

    #[test]
    fn rebuild_removes_pages_no_longer_registered() {
        let tmp = setup_fixtures();
        let out = TempDir::new().unwrap();
        let (ctx, entries, config) = load_fixture_site(tmp.path(), BuildMode::Development);
        generate(&ctx, &entries, &config.manifest, tmp.path(), out.path()).unwrap();
        assert!(out.path().join("pages/3.html").is_file());

        fs::remove_file(tmp.path().join("pages/3.html")).unwrap();
        let (ctx, entries, config) = load_fixture_site(tmp.path(), BuildMode::Development);
        generate(&ctx, &entries, &config.manifest, tmp.path(), out.path()).unwrap();

        assert!(!out.path().join("pages/3.html").exists());
        let last = fs::read_to_string(out.path().join("pages/2.html")).unwrap();
        assert_eq!(extract_description(&last), "2 of 2");
    }

    #[test]
    fn rebuild_removes_stray_files_and_dirs() {
        let tmp = setup_fixtures();
        let out = TempDir::new().unwrap();
        fs::create_dir_all(out.path().join("old/nested")).unwrap();
        fs::write(out.path().join("old/nested/page.html"), "stale").unwrap();
        fs::write(out.path().join("stale.txt"), "stale").unwrap();

        let (ctx, entries, config) = load_fixture_site(tmp.path(), BuildMode::Development);
        generate(&ctx, &entries, &config.manifest, tmp.path(), out.path()).unwrap();

        assert!(!out.path().join("old").exists());
        assert!(!out.path().join("stale.txt").exists());
        assert!(out.path().join("index.html").is_file());
    }

    #[test]
    fn output_containing_source_is_refused() {
        let tmp = TempDir::new().unwrap();
        let source = tmp.path().join("content");
        fs::create_dir_all(&source).unwrap();
        copy_dir_recursive(&fixtures_dir(), &source).unwrap();
        let (ctx, entries, config) = load_fixture_site(&source, BuildMode::Development);

        let err = generate(&ctx, &entries, &config.manifest, &source, tmp.path()).unwrap_err();
        assert!(matches!(err, GenerateError::OutputContainsSource(_)));
        let err = generate(&ctx, &entries, &config.manifest, &source, &source).unwrap_err();
        assert!(matches!(err, GenerateError::OutputContainsSource(_)));
        assert!(source.join("pages/1.html").is_file());
    }

    #[test]
    fn public_file_over_chapter_page_is_an_error() {
        let tmp = setup_fixtures();
        fs::create_dir_all(tmp.path().join("public/pages")).unwrap();
        fs::write(tmp.path().join("public/pages/1.html"), "RAW PUBLIC").unwrap();
        let out = TempDir::new().unwrap();
        let (ctx, entries, config) = load_fixture_site(tmp.path(), BuildMode::Development);

        let err = generate(&ctx, &entries, &config.manifest, tmp.path(), out.path()).unwrap_err();

        match err {
            GenerateError::PublicCollision(path) => assert_eq!(path, "pages/1.html"),
            other => panic!("expected PublicCollision, got {other:?}"),
        }
        assert!(read_tree(out.path()).is_empty());
    }

    #[test]
    fn public_file_over_generated_assets_is_an_error() {
        for reserved in [SAVE_FOR_LATER_PATH, WEB_MANIFEST_PATH, SERVICE_WORKER_PATH] {
            let tmp = setup_fixtures();
            let target = tmp.path().join("public").join(reserved);
            fs::create_dir_all(target.parent().unwrap()).unwrap();
            fs::write(&target, "RAW PUBLIC").unwrap();
            let out = TempDir::new().unwrap();
            let (ctx, entries, config) = load_fixture_site(tmp.path(), BuildMode::Development);

            let err = generate(&ctx, &entries, &config.manifest, tmp.path(), out.path()).unwrap_err();
            assert!(
                matches!(&err, GenerateError::PublicCollision(path) if path == reserved),
                "{reserved}: {err:?}"
            );
        }
    }

    #[test]
    fn public_manifest_allowed_when_generated_one_is_disabled() {
        let tmp = setup_fixtures();
        fs::write(tmp.path().join("public").join(WEB_MANIFEST_PATH), "{}").unwrap();
        let out = TempDir::new().unwrap();
        let (ctx, entries, mut config) = load_fixture_site(tmp.path(), BuildMode::Development);
        config.manifest.enabled = false;

        generate(&ctx, &entries, &config.manifest, tmp.path(), out.path()).unwrap();
        assert_eq!(fs::read_to_string(out.path().join(WEB_MANIFEST_PATH)).unwrap(), "{}");
    }

    #[test]
    fn precache_list_is_every_entry() {
        let tmp = setup_fixtures();
        let (ctx, entries, _) = load_fixture_site(tmp.path(), BuildMode::Development);
        assert_eq!(
            precache_urls(&entries),
            vec!["index.html", "toc.html", "pages/1.html", "pages/2.html", "pages/3.html"]
        );
        assert_eq!(precache_urls(&entries).len(), ctx.chapters.len() + 2);
    }

    #[test]
    fn written_service_worker_precaches_entries() {
        let tmp = setup_fixtures();
        let out = TempDir::new().unwrap();
        let (ctx, entries, config) = load_fixture_site(tmp.path(), BuildMode::Development);
        let report = generate(&ctx, &entries, &config.manifest, tmp.path(), out.path()).unwrap();

        let sw = fs::read_to_string(out.path().join(SERVICE_WORKER_PATH)).unwrap();
        assert!(!sw.contains("__"), "unfilled placeholder in:\n{sw}");
        assert!(sw.contains(&format!("const CACHE_NAME = '{}';", report.cache_name)));
        assert!(sw.contains(&format!("const CACHE_PREFIX = '{CACHE_NAME_PREFIX}';")));

        let list = sw
            .lines()
            .find_map(|line| line.strip_prefix("const PRECACHE = "))
            .and_then(|rest| rest.strip_suffix(';'))
            .unwrap();
        let urls: Vec<String> = serde_json::from_str(list).unwrap();
        let paths: Vec<String> = entries.iter().map(|e| e.path.clone()).collect();
        assert_eq!(urls, paths);
    }

    #[test]
    fn cache_name_is_stable_and_tracks_content() {
        let tmp = setup_fixtures();
        let (ctx, entries, _) = load_fixture_site(tmp.path(), BuildMode::Production);
        let first = cache_name(&render_site(&ctx, &entries, tmp.path()).unwrap());
        let (ctx, entries, _) = load_fixture_site(tmp.path(), BuildMode::Production);
        let again = cache_name(&render_site(&ctx, &entries, tmp.path()).unwrap());
        assert_eq!(first, again);
        assert!(first.starts_with(CACHE_NAME_PREFIX));
        assert_eq!(first.len(), CACHE_NAME_PREFIX.len() + 16);

        fs::write(tmp.path().join("pages/2.html"), "The Storm\n<p>Rewritten.</p>\n").unwrap();
        let (ctx, entries, _) = load_fixture_site(tmp.path(), BuildMode::Production);
        let edited = cache_name(&render_site(&ctx, &entries, tmp.path()).unwrap());
        assert_ne!(first, edited);
    }

    #[test]
    fn widget_script_registers_service_worker() {
        let depth = SAVE_FOR_LATER_PATH.matches('/').count();
        let relative = format!("'{}{SERVICE_WORKER_PATH}'", "../".repeat(depth));
        assert!(SAVE_FOR_LATER_JS.contains(&relative));
        assert!(SAVE_FOR_LATER_JS.contains("navigator.serviceWorker.register"));
    }
}
