//! Site configuration module.
//!
//! Handles loading, validating, and merging `config.toml`. The file lives in
//! the site root and is optional: stock defaults cover every key, and a user
//! file only needs the values it wants to change.
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! [paths]
//! bibliography = "my_publications.bib"
//! output_dir = "docs/publication"
//! index_file = "docs/publications/index.html"
//!
//! [site]
//! title = "Your Name / Site Title"
//! base_path = ""                 # URL prefix, e.g. "/albertocarraro"
//! locale = "en-US"
//! stylesheet = "/assets/css/main.css"
//! nav = [{ title = "Publications", path = "/publications/" }]
//!
//! [author]
//! name = "Your Name"
//! bio = ""
//! avatar = ""                    # Omitted from pages when empty
//!
//! [index]
//! # scholar_url = "https://scholar.google.com/citations?user=..."
//!
//! [cleanup]
//! legacy_files = ["2009-10-01-paper-title-number-1.html", ...]
//! ```
//!
//! Unknown keys are rejected to catch typos early.

use crate::naming;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

pub const CONFIG_FILE: &str = "config.toml";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Site configuration loaded from `config.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiteConfig {
    /// Input and output locations, relative to the site root.
    pub paths: PathsConfig,
    /// Site identity used in page heads and the masthead.
    pub site: SiteInfo,
    /// Sidebar profile shown on every detail page.
    pub author: AuthorConfig,
    /// Publications index settings.
    pub index: IndexConfig,
    /// Stale files removed from the output directory before generation.
    pub cleanup: CleanupConfig,
}

impl SiteConfig {
    /// Validate config values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let base = &self.site.base_path;
        if !base.is_empty() && (!base.starts_with('/') || base.ends_with('/')) {
            return Err(ConfigError::Validation(
                "site.base_path must be empty or start with '/' and not end with '/'".into(),
            ));
        }
        if self.paths.bibliography.as_os_str().is_empty() {
            return Err(ConfigError::Validation(
                "paths.bibliography must not be empty".into(),
            ));
        }
        if self.paths.index_file.as_os_str().is_empty() {
            return Err(ConfigError::Validation(
                "paths.index_file must not be empty".into(),
            ));
        }
        if let Some(bad) = self
            .cleanup
            .legacy_files
            .iter()
            .find(|f| !naming::is_plain_filename(f))
        {
            return Err(ConfigError::Validation(format!(
                "cleanup.legacy_files entries must be plain file names, got {bad:?}"
            )));
        }
        Ok(())
    }
}

/// Input and output locations.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PathsConfig {
    /// BibTeX source file.
    pub bibliography: PathBuf,
    /// Directory receiving one HTML page per publication.
    pub output_dir: PathBuf,
    /// Existing publications index page whose archive region is regenerated.
    pub index_file: PathBuf,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            bibliography: PathBuf::from("my_publications.bib"),
            output_dir: PathBuf::from("docs/publication"),
            index_file: PathBuf::from("docs/publications/index.html"),
        }
    }
}

impl PathsConfig {
    /// Resolve every path against the site root. Absolute paths are kept.
    pub fn resolve(&self, root: &Path) -> PathsConfig {
        PathsConfig {
            bibliography: root.join(&self.bibliography),
            output_dir: root.join(&self.output_dir),
            index_file: root.join(&self.index_file),
        }
    }
}

/// Site identity.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiteInfo {
    /// Appended to every page `<title>`.
    pub title: String,
    /// URL prefix the site is served under (empty for the domain root).
    pub base_path: String,
    /// Open Graph locale.
    pub locale: String,
    /// Stylesheet path, relative to `base_path`.
    pub stylesheet: String,
    /// Masthead links.
    pub nav: Vec<NavLink>,
}

impl Default for SiteInfo {
    fn default() -> Self {
        Self {
            title: "Your Name / Site Title".to_string(),
            base_path: String::new(),
            locale: "en-US".to_string(),
            stylesheet: "/assets/css/main.css".to_string(),
            nav: vec![
                NavLink::new("Publications", "/publications/"),
                NavLink::new("Talks", "/talks/"),
                NavLink::new("Teaching", "/teaching/"),
                NavLink::new("CV", "/cv/"),
            ],
        }
    }
}

impl SiteInfo {
    /// Prefix a site-relative path with `base_path`.
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_path, path)
    }

    /// Permalink of a publication page (`<base>/publication/<stem>`).
    pub fn publication_url(&self, stem: &str) -> String {
        self.url(&format!("/publication/{stem}"))
    }
}

/// A masthead navigation entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct NavLink {
    pub title: String,
    /// Path relative to `base_path`.
    pub path: String,
}

impl NavLink {
    pub fn new(title: &str, path: &str) -> Self {
        Self {
            title: title.to_string(),
            path: path.to_string(),
        }
    }
}

/// Sidebar profile.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AuthorConfig {
    pub name: String,
    pub bio: String,
    /// Avatar image path relative to `base_path`. Omitted when empty.
    pub avatar: String,
}

impl Default for AuthorConfig {
    fn default() -> Self {
        Self {
            name: "Your Name".to_string(),
            bio: String::new(),
            avatar: String::new(),
        }
    }
}

/// Publications index settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct IndexConfig {
    /// When set, an intro line links to this scholar profile.
    pub scholar_url: Option<String>,
}

/// Output directory cleanup.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CleanupConfig {
    /// Placeholder pages shipped with the site theme.
    pub legacy_files: Vec<String>,
}

impl Default for CleanupConfig {
    fn default() -> Self {
        Self {
            legacy_files: vec![
                "2009-10-01-paper-title-number-1.html".to_string(),
                "2010-10-01-paper-title-number-2.html".to_string(),
                "2015-10-01-paper-title-number-3.html".to_string(),
                "2024-02-17-paper-title-number-4.html".to_string(),
            ],
        }
    }
}

// =============================================================================
// Config loading, merging, and validation
// =============================================================================

/// Returns the stock default config as a `toml::Value::Table`.
pub fn stock_defaults_value() -> toml::Value {
    toml::Value::try_from(SiteConfig::default()).expect("default config must serialize")
}

/// Recursively merge `overlay` on top of `base`.
///
/// Tables merge key-by-key; any other overlay value replaces the base value
/// outright (arrays included, so `nav` and `legacy_files` are replaced whole).
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

/// Load `config.toml` from `root` as a raw TOML value, `None` if absent.
pub fn load_raw_config(root: &Path) -> Result<Option<toml::Value>, ConfigError> {
    let config_path = root.join(CONFIG_FILE);
    if !config_path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(&config_path)?;
    let value: toml::Value = toml::from_str(&content)?;
    Ok(Some(value))
}

/// Merge an optional overlay onto a base value, then deserialize and validate.
pub fn resolve_config(
    base: toml::Value,
    overlay: Option<toml::Value>,
) -> Result<SiteConfig, ConfigError> {
    let merged = match overlay {
        Some(ov) => merge_toml(base, ov),
        None => base,
    };
    let config: SiteConfig = merged.try_into()?;
    config.validate()?;
    Ok(config)
}

/// Load config from `config.toml` in `root`, layered over stock defaults.
pub fn load_config(root: &Path) -> Result<SiteConfig, ConfigError> {
    let base = stock_defaults_value();
    let overlay = load_raw_config(root)?;
    resolve_config(base, overlay)
}

/// Returns a fully-commented stock `config.toml`. Used by `gen-config`.
pub fn stock_config_toml() -> &'static str {
    r##"# Publication Pages Configuration
# ===============================
# All settings are optional. Remove or comment out any you don't need.
# Values shown below are the defaults. Unknown keys will cause an error.

# ---------------------------------------------------------------------------
# Paths (relative to the site root)
# ---------------------------------------------------------------------------
[paths]
# BibTeX file listing your publications.
bibliography = "my_publications.bib"

# One HTML page per publication is written here.
output_dir = "docs/publication"

# Existing index page. Only the region starting at <div class="archive">
# is regenerated; the header and footer around it are kept.
index_file = "docs/publications/index.html"

# ---------------------------------------------------------------------------
# Site identity
# ---------------------------------------------------------------------------
[site]
# Appended to every page title.
title = "Your Name / Site Title"

# URL prefix the site is served under, e.g. "/albertocarraro".
# Leave empty when the site lives at the domain root.
base_path = ""

# Open Graph locale.
locale = "en-US"

# Stylesheet path, relative to base_path.
stylesheet = "/assets/css/main.css"

# Masthead links, paths relative to base_path.
nav = [
    { title = "Publications", path = "/publications/" },
    { title = "Talks", path = "/talks/" },
    { title = "Teaching", path = "/teaching/" },
    { title = "CV", path = "/cv/" },
]

# ---------------------------------------------------------------------------
# Author sidebar
# ---------------------------------------------------------------------------
[author]
name = "Your Name"
bio = ""
# Avatar image path relative to base_path. Omitted when empty.
avatar = ""

# ---------------------------------------------------------------------------
# Publications index
# ---------------------------------------------------------------------------
[index]
# Adds a "find my articles on my Google Scholar profile" line when set.
# scholar_url = "https://scholar.google.com/citations?user=XXXX"

# ---------------------------------------------------------------------------
# Cleanup
# ---------------------------------------------------------------------------
[cleanup]
# Placeholder pages from the site theme, deleted from output_dir if present.
legacy_files = [
    "2009-10-01-paper-title-number-1.html",
    "2010-10-01-paper-title-number-2.html",
    "2015-10-01-paper-title-number-3.html",
    "2024-02-17-paper-title-number-4.html",
]
"##
}
