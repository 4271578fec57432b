//! `[categories]` configuration: ordering and display names.
//!
//! # Example
//!
//! ```toml
//! [categories]
//! order = ["java", "python", "tools"]
//!
//! [categories.names]
//! java = "Java"
//! javascript = "JavaScript"
//! ```

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Category presentation configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CategoriesConfig {
    /// Category directories listed first, in this order.
    /// Remaining directories follow, sorted lexically.
    pub order: Vec<String>,

    /// Directory name → display name overrides.
    pub names: BTreeMap<String, String>,
}

impl CategoriesConfig {
    /// Display label for a category directory: configured name if present,
    /// otherwise the directory name with its first letter capitalized.
    pub fn label(&self, dir: &str) -> String {
        self.names
            .get(dir)
            .cloned()
            .unwrap_or_else(|| capitalize(dir))
    }
}

/// Capitalize the first character of a string.
fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}
