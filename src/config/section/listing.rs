//! `[listing]` configuration for the published latest-articles block.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ListingConfig {
    /// Maximum number of entries in the published listing.
    pub max: usize,

    /// Target file receiving the rendered block.
    pub target: PathBuf,

    /// Persisted article store path.
    pub store: PathBuf,

    /// Line that opens the managed section in the target file.
    pub begin_marker: String,

    /// Line that closes the managed section in the target file.
    pub end_marker: String,

    /// Text rendered as a single list line when no articles exist.
    pub empty_text: String,
}

impl Default for ListingConfig {
    fn default() -> Self {
        Self {
            max: 6,
            target: "docs/index.md".into(),
            store: "latest-articles.json".into(),
            begin_marker: "## Latest Articles".into(),
            end_marker: "## Categories".into(),
            empty_text: "No articles yet".into(),
        }
    }
}
