//! Site configuration module.
//!
//! Handles loading, validating, and merging `config.toml`. The file is
//! optional and lives in the content root; every key it sets overrides the
//! stock default, every key it omits keeps it.
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! [base]
//! development = "/"              # Base path for --mode development
//! # production = "https://..."   # Base path for --mode production
//! #                              # (omit to use pages/url.txt)
//!
//! [manifest]
//! enabled = true                 # Write manifest.webmanifest
//! display = "minimal-ui"         # fullscreen | standalone | minimal-ui | browser
//! icon = "/icon.png"
//! icon_sizes = "180x180"
//! icon_type = "image/png"
//! ```
//!
//! Unknown keys are rejected to catch typos early.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

/// Name of the optional config file in the content root.
pub const CONFIG_FILENAME: &str = "config.toml";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Which base path the build renders links against.
///
/// Production sites are served from a fixed absolute URL; everything else
/// (local previews, file servers during writing) is served from `/`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum BuildMode {
    Production,
    Development,
}

impl std::fmt::Display for BuildMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BuildMode::Production => f.write_str("production"),
            BuildMode::Development => f.write_str("development"),
        }
    }
}

/// Site configuration loaded from `config.toml`.
///
/// All fields have sensible defaults. User config files need only specify
/// the values they want to override. Unknown keys are rejected.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiteConfig {
    /// Base path per build mode.
    pub base: BaseConfig,
    /// Installable-app manifest settings.
    pub manifest: ManifestConfig,
}

/// Base path per build mode.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BaseConfig {
    /// Base path for development builds.
    pub development: String,
    /// Base path for production builds. When absent, the canonical site URL
    /// from `pages/url.txt` is used.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub production: Option<String>,
}

impl Default for BaseConfig {
    fn default() -> Self {
        Self {
            development: "/".to_string(),
            production: None,
        }
    }
}

/// Installable-app manifest settings.
///
/// Name and short name always come from the work title; only presentation
/// is configurable.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ManifestConfig {
    /// Whether to write `manifest.webmanifest` at all.
    pub enabled: bool,
    /// Web app display mode.
    pub display: String,
    /// Icon URL as it will appear in the manifest.
    pub icon: String,
    /// Icon `sizes` attribute.
    pub icon_sizes: String,
    /// Icon MIME type.
    pub icon_type: String,
}

impl Default for ManifestConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            display: "minimal-ui".to_string(),
            icon: "/icon.png".to_string(),
            icon_sizes: "180x180".to_string(),
            icon_type: "image/png".to_string(),
        }
    }
}

const DISPLAY_MODES: &[&str] = &["fullscreen", "standalone", "minimal-ui", "browser"];

impl SiteConfig {
    /// Validate config values are within acceptable ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.base.development.trim().is_empty() {
            return Err(ConfigError::Validation(
                "base.development must not be empty".into(),
            ));
        }
        if let Some(production) = &self.base.production
            && production.trim().is_empty()
        {
            return Err(ConfigError::Validation(
                "base.production must not be empty (omit it to use pages/url.txt)".into(),
            ));
        }
        if !DISPLAY_MODES.contains(&self.manifest.display.as_str()) {
            return Err(ConfigError::Validation(format!(
                "manifest.display must be one of {}",
                DISPLAY_MODES.join(", ")
            )));
        }
        Ok(())
    }

    /// The configured base for `mode`, or `None` when production should fall
    /// back to the canonical site URL.
    pub fn base_for(&self, mode: BuildMode) -> Option<&str> {
        match mode {
            BuildMode::Development => Some(self.base.development.as_str()),
            BuildMode::Production => self.base.production.as_deref(),
        }
    }
}

/// Normalise a base path so that `base + "pages/1.html"` is a valid URL.
///
/// Surrounding whitespace is dropped and a trailing `/` is added when
/// missing: `https://example.org/work` → `https://example.org/work/`.
pub fn normalize_base(base: &str) -> String {
    let trimmed = base.trim();
    if trimmed.ends_with('/') {
        trimmed.to_string()
    } else {
        format!("{trimmed}/")
    }
}

// =============================================================================
// Config loading, merging, and validation
// =============================================================================

/// Returns the stock default config as a `toml::Value::Table`.
///
/// This is the base layer user overrides are merged onto.
pub fn stock_defaults_value() -> toml::Value {
    toml::Value::try_from(SiteConfig::default()).expect("default config must serialize")
}

/// Recursively merge `overlay` on top of `base`.
///
/// - Tables are merged key-by-key (overlay keys override base keys).
/// - Non-table values in overlay replace base values entirely.
/// - Keys in base that are not in overlay are preserved.
pub fn merge_toml(base: toml::Value, overlay: toml::Value) -> toml::Value {
    match (base, overlay) {
        (toml::Value::Table(mut base_table), toml::Value::Table(overlay_table)) => {
            for (key, overlay_val) in overlay_table {
                let merged = match base_table.remove(&key) {
                    Some(base_val) => merge_toml(base_val, overlay_val),
                    None => overlay_val,
                };
                base_table.insert(key, merged);
            }
            toml::Value::Table(base_table)
        }
        (_, overlay) => overlay,
    }
}

/// Load `config.toml` from a directory as a raw TOML value.
///
/// Returns `Ok(None)` if the file does not exist.
pub fn load_raw_config(root: &Path) -> Result<Option<toml::Value>, ConfigError> {
    let config_path = root.join(CONFIG_FILENAME);
    if !config_path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(&config_path)?;
    let value: toml::Value = toml::from_str(&content)?;
    Ok(Some(value))
}

/// Load config from the content root.
///
/// Merges user values on top of stock defaults, rejects unknown keys,
/// and validates the result.
pub fn load_config(root: &Path) -> Result<SiteConfig, ConfigError> {
    let merged = match load_raw_config(root)? {
        Some(overlay) => merge_toml(stock_defaults_value(), overlay),
        None => stock_defaults_value(),
    };
    let config: SiteConfig = merged.try_into()?;
    config.validate()?;
    Ok(config)
}

/// Returns a fully-commented stock `config.toml` with all keys and explanations.
///
/// Used by the `gen-config` CLI command and by `init`.
pub fn stock_config_toml() -> &'static str {
    r##"# Chapbook Configuration
# ======================
# All settings are optional. Remove or comment out any you don't need.
# Values shown below are the defaults. Unknown keys will cause an error.

# ---------------------------------------------------------------------------
# Base path
# ---------------------------------------------------------------------------
# Every generated link starts with the base path for the current build mode
# (chapbook --mode production|development build).
[base]
# Used by --mode development.
development = "/"

# Used by --mode production. Omit to use the contents of pages/url.txt.
# production = "https://example.org/my-story/"

# ---------------------------------------------------------------------------
# Installable web app manifest (manifest.webmanifest)
# ---------------------------------------------------------------------------
# The app name is always the work title from pages/title.txt.
[manifest]
enabled = true

# One of: fullscreen, standalone, minimal-ui, browser
display = "minimal-ui"

# Icon entry. Place the file itself in public/.
icon = "/icon.png"
icon_sizes = "180x180"
icon_type = "image/png"
"##
}
