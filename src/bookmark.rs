//! "Save for later" bookmark widget.
//!
//! A reader can save the chapter they are on; the home page then shows a
//! link back to it. The widget that runs in the browser is
//! `static/save-for-later.js`, written to every site as
//! `assets/save-for-later.js`. This module is the same state machine with
//! storage injected, so its behaviour is testable without a browser and
//! documented in one place.
//!
//! ## States
//!
//! ```text
//!            click: store path, navigate to ".."
//!   Unsaved ────────────────────────────────────▶ Saved(path)
//!           ◀────────────────────────────────────
//!            click: remove stored path
//! ```
//!
//! On load, the button is `Saved` only if the stored path equals the
//! current page path exactly. A bookmark for another chapter leaves this
//! page's button `Unsaved`; saving here replaces it.
//!
//! Independently of any button, a page with a saved-link container (the
//! home page) reveals a link to whatever path is stored.
//!
//! Storage failures (quota, disabled storage) are not handled.

use std::collections::HashMap;
use std::time::Duration;

/// Storage key holding the saved chapter path.
pub const STORAGE_KEY: &str = "save-for-later";

/// Tooltip explaining where the bookmark goes.
pub const TOOLTIP_TEXT: &str =
    "A link to return to this chapter will be placed on the home page. Uses local browser storage.";

/// Tooltip placement relative to the button.
pub const TOOLTIP_PLACEMENT: &str = "bottom";

/// Hover time before the tooltip appears.
pub const TOOLTIP_DELAY: Duration = Duration::from_millis(300);

/// Where saving sends the reader: one directory up from the chapter.
pub const SAVE_NAVIGATES_TO: &str = "..";

pub const SAVE_LABEL: &str = "Save for Later";
pub const UNSAVE_LABEL: &str = "Unsave for Later";

/// Key-value storage capability, shaped like the browser's `localStorage`.
pub trait Storage {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: &str);
    fn remove(&mut self, key: &str);
}

/// In-memory [`Storage`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemoryStorage {
    items: HashMap<String, String>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Storage that already holds a bookmark for `path`.
    pub fn with_bookmark(path: &str) -> Self {
        let mut storage = Self::new();
        storage.set(STORAGE_KEY, path);
        storage
    }
}

impl Storage for MemoryStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.items.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) {
        self.items.insert(key.to_string(), value.to_string());
    }

    fn remove(&mut self, key: &str) {
        self.items.remove(key);
    }
}

/// The saved path, if any.
pub fn read_bookmark(storage: &impl Storage) -> Option<String> {
    storage.get(STORAGE_KEY)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BookmarkState {
    Unsaved,
    Saved(String),
}

/// What the page should do after the button is activated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Activation {
    Stay,
    Navigate(&'static str),
}

/// The save-for-later button on one chapter page.
#[derive(Debug)]
pub struct SaveButton<'s, S: Storage> {
    storage: &'s mut S,
    current_path: String,
    state: BookmarkState,
}

impl<'s, S: Storage> SaveButton<'s, S> {
    /// Initialise the button for the page at `current_path`.
    pub fn load(storage: &'s mut S, current_path: impl Into<String>) -> Self {
        let current_path = current_path.into();
        let state = match read_bookmark(storage) {
            Some(saved) if saved == current_path => BookmarkState::Saved(saved),
            _ => BookmarkState::Unsaved,
        };
        Self {
            storage,
            current_path,
            state,
        }
    }

    pub fn state(&self) -> &BookmarkState {
        &self.state
    }

    pub fn label(&self) -> &'static str {
        match self.state {
            BookmarkState::Unsaved => SAVE_LABEL,
            BookmarkState::Saved(_) => UNSAVE_LABEL,
        }
    }

    /// Handle a click.
    pub fn activate(&mut self) -> Activation {
        match self.state {
            BookmarkState::Saved(_) => {
                self.storage.remove(STORAGE_KEY);
                self.state = BookmarkState::Unsaved;
                Activation::Stay
            }
            BookmarkState::Unsaved => {
                self.storage.set(STORAGE_KEY, &self.current_path);
                self.state = BookmarkState::Saved(self.current_path.clone());
                Activation::Navigate(SAVE_NAVIGATES_TO)
            }
        }
    }
}

/// Link revealed on the home page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SavedLink {
    pub href: String,
    pub text: String,
}

/// The home-page link to the saved chapter, if anything is saved.
pub fn saved_link(storage: &impl Storage) -> Option<SavedLink> {
    read_bookmark(storage)
        .filter(|path| !path.is_empty())
        .map(|path| SavedLink {
            href: path.clone(),
            text: path,
        })
}
