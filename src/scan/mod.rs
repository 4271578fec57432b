//! Document scanner: walks the content root and produces per-category documents.
//!
//! Traversal is non-recursive: only direct children of the content root are
//! categories, and files within a category are flat. Category iteration order
//! is the configured `[categories] order` first, then remaining directories
//! sorted - never raw directory-listing order.

mod title;

pub use title::{extract_title, fallback_title, numeric_prefix};

use crate::{config::DocsConfig, debug, log};
use std::fs;
use std::path::Path;
use std::time::UNIX_EPOCH;

/// A single qualifying document observed on disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    /// File name within the category directory.
    pub file_name: String,
    /// Site-relative link, `/{category-dir}/{file}`. Stable record key.
    pub link: String,
    /// Extracted or derived title.
    pub title: String,
    /// Category display label.
    pub category: String,
    /// Observed file modification time, milliseconds since the Unix epoch.
    pub mtime: u64,
}

/// A category directory with its documents.
#[derive(Debug, Clone)]
pub struct Category {
    /// Directory name under the content root.
    pub dir: String,
    /// Display label (configured override or capitalized directory name).
    pub label: String,
    /// Documents ordered by numeric filename prefix, then file name.
    pub docs: Vec<Document>,
}

/// Scan the content root into ordered categories.
///
/// A missing or unreadable root yields an empty result (first-run friendly).
/// Individual unreadable entries are skipped with a warning.
pub fn scan_content(config: &DocsConfig) -> Vec<Category> {
    let root = config.content.root.clone();

    category_dirs(config, &root)
        .into_iter()
        .map(|dir| Category {
            label: config.categories.label(&dir),
            docs: scan_category(config, &root.join(&dir), &dir),
            dir,
        })
        .collect()
}

/// Flatten scanned categories into one document sequence in scan order.
pub fn flatten(categories: &[Category]) -> Vec<Document> {
    categories
        .iter()
        .flat_map(|c| c.docs.iter().cloned())
        .collect()
}

/// List category directories under the root, in deterministic order:
/// configured order first (those present), then the rest sorted.
fn category_dirs(config: &DocsConfig, root: &Path) -> Vec<String> {
    let entries = match fs::read_dir(root) {
        Ok(entries) => entries,
        Err(e) => {
            debug!("scan"; "content root {} not readable ({}), empty scan", root.display(), e);
            return Vec::new();
        }
    };

    let mut found: Vec<String> = Vec::new();
    for entry in entries {
        let Ok(entry) = entry else {
            log!("warning"; "unreadable entry under {}, skipped", root.display());
            continue;
        };
        let is_dir = entry.file_type().map(|t| t.is_dir()).unwrap_or(false);
        let Some(name) = entry.file_name().to_str().map(str::to_string) else {
            continue;
        };
        if is_dir && config.content.is_category_dir(&name) {
            found.push(name);
        }
    }

    let mut ordered: Vec<String> = config
        .categories
        .order
        .iter()
        .filter(|o| found.iter().any(|f| f == *o))
        .cloned()
        .collect();

    let mut remaining: Vec<String> = found
        .into_iter()
        .filter(|f| !config.categories.order.contains(f))
        .collect();
    remaining.sort();

    ordered.extend(remaining);
    ordered
}

/// Scan one category directory for qualifying documents.
fn scan_category(config: &DocsConfig, dir_path: &Path, dir: &str) -> Vec<Document> {
    let entries = match fs::read_dir(dir_path) {
        Ok(entries) => entries,
        Err(e) => {
            log!("warning"; "category {} not readable ({}), skipped", dir_path.display(), e);
            return Vec::new();
        }
    };

    let mut names: Vec<String> = entries
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_type().map(|t| t.is_file()).unwrap_or(false))
        .filter_map(|entry| entry.file_name().to_str().map(str::to_string))
        .filter(|name| config.content.is_document(name))
        .collect();

    // Numeric prefix establishes the deterministic fallback ordering;
    // file name breaks ties between equal prefixes.
    names.sort_by_key(|name| (numeric_prefix(name), name.clone()));

    let label = config.categories.label(dir);
    names
        .into_iter()
        .filter_map(|name| read_document(dir_path, dir, &name, &label))
        .collect()
}

/// Read one document: content for the title, metadata for the mtime.
fn read_document(dir_path: &Path, dir: &str, name: &str, label: &str) -> Option<Document> {
    let file_path = dir_path.join(name);

    let content = match fs::read_to_string(&file_path) {
        Ok(content) => content,
        Err(e) => {
            log!("warning"; "cannot read {} ({}), skipped", file_path.display(), e);
            return None;
        }
    };

    let mtime = match file_mtime_millis(&file_path) {
        Some(mtime) => mtime,
        None => {
            log!("warning"; "cannot stat {}, skipped", file_path.display());
            return None;
        }
    };

    let title = extract_title(&content).unwrap_or_else(|| fallback_title(name));

    Some(Document {
        file_name: name.to_string(),
        link: format!("/{dir}/{name}"),
        title,
        category: label.to_string(),
        mtime,
    })
}

/// File modification time in milliseconds since the Unix epoch.
fn file_mtime_millis(path: &Path) -> Option<u64> {
    let modified = path.metadata().and_then(|m| m.modified()).ok()?;
    let millis = modified.duration_since(UNIX_EPOCH).ok()?.as_millis();
    u64::try_from(millis).ok()
}

// ============================================================================
// tests
// ============================================================================
