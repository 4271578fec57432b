//! Configuration management for `docfresh.toml`.
//!
//! # Sections
//!
//! | Section        | Purpose                                          |
//! |----------------|--------------------------------------------------|
//! | `[content]`    | Content root, excluded directories and files     |
//! | `[listing]`    | Listing size, target file, markers, store path   |
//! | `[categories]` | Category ordering and display names              |
//! | `[nav]`        | Generated navigation fragment                    |
//! | `[watch]`      | Debounce timing for continuous mode              |

pub mod section;

mod error;
mod handle;
mod util;

pub use error::ConfigError;
pub use handle::{cfg, init_config, reload_config};

use section::{CategoriesConfig, ContentConfig, ListingConfig, NavConfig, WatchConfig};
use util::find_config_file;

use crate::{cli::Cli, debug, log, utils::normalize_path};
use anyhow::{Result, bail};
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};

/// Default config file name, searched upward from the working directory.
pub const DEFAULT_CONFIG_NAME: &str = "docfresh.toml";

// ============================================================================
// root configuration
// ============================================================================

/// Root configuration structure representing docfresh.toml
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocsConfig {
    /// CLI arguments reference (internal use only)
    #[serde(skip)]
    pub cli: Option<&'static Cli>,

    /// Absolute path to the config file, empty when running on defaults
    #[serde(skip)]
    pub config_path: PathBuf,

    /// Project root directory - parent of config file (internal use only)
    #[serde(skip)]
    pub root: PathBuf,

    /// Content tree settings
    #[serde(default)]
    pub content: ContentConfig,

    /// Published listing settings
    #[serde(default)]
    pub listing: ListingConfig,

    /// Category ordering and display names
    #[serde(default)]
    pub categories: CategoriesConfig,

    /// Navigation fragment settings
    #[serde(default)]
    pub nav: NavConfig,

    /// Watch mode settings
    #[serde(default)]
    pub watch: WatchConfig,
}

impl Default for DocsConfig {
    fn default() -> Self {
        Self {
            cli: None,
            config_path: PathBuf::new(),
            root: PathBuf::new(),
            content: ContentConfig::default(),
            listing: ListingConfig::default(),
            categories: CategoriesConfig::default(),
            nav: NavConfig::default(),
            watch: WatchConfig::default(),
        }
    }
}

impl DocsConfig {
    /// Load configuration from CLI arguments.
    ///
    /// Searches upward from cwd for `docfresh.toml`; a missing config file
    /// means defaults rooted at cwd. An explicit `--config` path must exist.
    pub fn load(cli: &'static Cli) -> Result<Self> {
        let config_path = Self::resolve_config_path(cli)?;

        let mut config = match &config_path {
            Some(path) => Self::from_path(path)?,
            None => {
                debug!("config"; "no {DEFAULT_CONFIG_NAME} found, using defaults");
                Self::default()
            }
        };

        config.config_path = config_path.unwrap_or_default();
        config.cli = Some(cli);
        config.finalize(cli);
        config.validate()?;

        Ok(config)
    }

    /// Resolve the config file path, if any.
    fn resolve_config_path(cli: &Cli) -> Result<Option<PathBuf>> {
        if let Some(path) = &cli.config {
            let path = normalize_path(path);
            if !path.exists() {
                bail!(ConfigError::Validation(format!(
                    "config file `{}` not found",
                    path.display()
                )));
            }
            return Ok(Some(path));
        }

        Ok(find_config_file(Path::new(DEFAULT_CONFIG_NAME)))
    }

    /// Finalize configuration after loading: resolve the project root,
    /// normalize all paths against it, and apply CLI overrides.
    fn finalize(&mut self, cli: &Cli) {
        let root = if self.config_path.as_os_str().is_empty() {
            std::env::current_dir().unwrap_or_default()
        } else {
            self.config_path
                .parent()
                .map(Path::to_path_buf)
                .unwrap_or_default()
        };

        self.root = normalize_path(&root);
        self.normalize_paths();
        self.apply_cli_options(cli);
    }

    /// Normalize all configured paths relative to the project root.
    fn normalize_paths(&mut self) {
        self.content.root = resolve_from_root(&self.root, &self.content.root);
        self.listing.target = resolve_from_root(&self.root, &self.listing.target);
        self.listing.store = resolve_from_root(&self.root, &self.listing.store);
        self.nav.output = resolve_from_root(&self.root, &self.nav.output);
    }

    /// Apply CLI overrides on top of the loaded config.
    fn apply_cli_options(&mut self, cli: &Cli) {
        crate::logger::set_verbose(cli.verbose);

        if let Some(content) = &cli.content {
            self.content.root = resolve_from_root(&self.root, content);
        }
        if let Some(max) = cli.max {
            self.listing.max = max;
        }
    }

    /// Load configuration from file path with unknown field detection.
    fn from_path(path: &Path) -> Result<Self> {
        let content =
            fs::read_to_string(path).map_err(|err| ConfigError::Io(path.to_path_buf(), err))?;

        let (config, ignored) = Self::parse_with_ignored(&content)?;

        if !ignored.is_empty() {
            Self::print_unknown_fields_warning(&ignored, path);
        }

        Ok(config)
    }

    /// Parse TOML content, collecting any unknown fields.
    fn parse_with_ignored(content: &str) -> Result<(Self, Vec<String>)> {
        let mut ignored = Vec::new();
        let deserializer = toml::Deserializer::new(content);
        let config = serde_ignored::deserialize(deserializer, |path: serde_ignored::Path| {
            ignored.push(path.to_string());
        })?;
        Ok((config, ignored))
    }

    /// Print warning about unknown fields.
    fn print_unknown_fields_warning(fields: &[String], path: &Path) {
        let display_path = path
            .file_name()
            .map(|n| n.to_string_lossy())
            .unwrap_or_else(|| path.to_string_lossy());
        log!("warning"; "unknown fields in {}, ignoring:", display_path);
        for field in fields {
            eprintln!("- {}", field);
        }
    }

    // ========================================================================
    // validation
    // ========================================================================

    /// Validate configuration. Collects nothing fancy - the surface is small
    /// enough that the first offending field is reported directly.
    pub fn validate(&self) -> Result<()> {
        if self.listing.max == 0 {
            bail!(ConfigError::Validation(
                "listing.max must be at least 1".into()
            ));
        }
        if self.listing.begin_marker.trim().is_empty()
            || self.listing.end_marker.trim().is_empty()
        {
            bail!(ConfigError::Validation(
                "listing.begin_marker and listing.end_marker must be non-empty".into()
            ));
        }
        if self.listing.begin_marker == self.listing.end_marker {
            bail!(ConfigError::Validation(
                "listing.begin_marker and listing.end_marker must differ".into()
            ));
        }
        Ok(())
    }
}

/// Resolve a configured path against the project root, expanding `~`.
fn resolve_from_root(root: &Path, path: &Path) -> PathBuf {
    let expanded = shellexpand::tilde(&path.to_string_lossy().into_owned()).into_owned();
    let path = PathBuf::from(expanded);
    if path.is_absolute() {
        normalize_path(&path)
    } else {
        normalize_path(&root.join(path))
    }
}

// ============================================================================
// Test Helpers (available to all modules via `use crate::config::test_*`)
// ============================================================================

/// Parse config from a TOML snippet.
/// Panics if there are unknown fields (to catch config typos in tests).
#[cfg(test)]
pub fn test_parse_config(extra: &str) -> DocsConfig {
    let (parsed, ignored) = DocsConfig::parse_with_ignored(extra).unwrap();
    assert!(
        ignored.is_empty(),
        "test config has unknown fields: {:?}",
        ignored
    );
    parsed
}

// ============================================================================
// tests
// ============================================================================
