//! `[content]` configuration: where documents live and what to skip.
//!
//! # Example
//!
//! ```toml
//! [content]
//! root = "docs"
//! exclude_dirs = [".vitepress", "public"]
//! exclude_files = ["index.md"]
//! ```

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Content tree configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ContentConfig {
    /// Content root directory, holding one subdirectory per category.
    pub root: PathBuf,

    /// Subdirectory names never treated as categories.
    /// Directories starting with `.` are always skipped.
    pub exclude_dirs: Vec<String>,

    /// File names never treated as documents.
    pub exclude_files: Vec<String>,
}

impl Default for ContentConfig {
    fn default() -> Self {
        Self {
            root: "docs".into(),
            exclude_dirs: vec![".vitepress".into(), "public".into()],
            exclude_files: vec!["index.md".into()],
        }
    }
}

impl ContentConfig {
    /// Check whether a directory name is a valid category directory.
    pub fn is_category_dir(&self, name: &str) -> bool {
        !name.starts_with('.') && !self.exclude_dirs.iter().any(|d| d == name)
    }

    /// Check whether a file name is a qualifying document.
    pub fn is_document(&self, name: &str) -> bool {
        let ext = name.rsplit_once('.').map(|(_, e)| e).unwrap_or("");
        matches!(ext.to_ascii_lowercase().as_str(), "md" | "markdown")
            && !self.exclude_files.iter().any(|f| f == name)
    }
}
