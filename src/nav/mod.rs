//! Navigation fragment generation.
//!
//! Derives the site nav bar and per-category sidebar from the scan and
//! writes them as one JSON fragment for the site config to import. The nav
//! links each category to its first document; the sidebar lists every
//! document in category order.

use crate::{config::DocsConfig, debug, scan::Category};
use anyhow::{Context, Result};
use serde::Serialize;
use serde_json::{Map, Value, json};
use std::fs;

/// One nav bar entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NavItem {
    /// Display text.
    pub text: String,
    /// Link target path.
    pub link: String,
}

/// Build the nav bar: home entry first, then one entry per non-empty
/// category in scan order.
pub fn build_nav(categories: &[Category], home_text: &str) -> Vec<NavItem> {
    let mut nav = vec![NavItem {
        text: home_text.to_string(),
        link: "/".to_string(),
    }];

    for category in categories {
        let Some(first) = category.docs.first() else {
            continue;
        };
        nav.push(NavItem {
            text: category.label.clone(),
            link: first.link.clone(),
        });
    }

    nav
}

/// Build the sidebar mapping `/{dir}/` → entries in document order.
///
/// Entry text keeps the file stem as-is (ordering prefix included), matching
/// how the flat file listing reads in the site sidebar. Key insertion order
/// is preserved in the output.
pub fn build_sidebar(categories: &[Category]) -> Map<String, Value> {
    let mut sidebar = Map::new();

    for category in categories {
        if category.docs.is_empty() {
            continue;
        }
        let entries: Vec<Value> = category
            .docs
            .iter()
            .map(|doc| {
                json!({
                    "text": file_stem(&doc.file_name),
                    "link": doc.link,
                })
            })
            .collect();
        sidebar.insert(format!("/{}/", category.dir), Value::Array(entries));
    }

    sidebar
}

/// File name with its extension stripped.
fn file_stem(file_name: &str) -> String {
    file_name
        .rsplit_once('.')
        .map(|(stem, _)| stem)
        .unwrap_or(file_name)
        .to_string()
}

/// Write the navigation fragment to the configured output path.
pub fn write_nav(config: &DocsConfig, categories: &[Category]) -> Result<()> {
    let output = &config.nav.output;

    let payload = json!({
        "nav": build_nav(categories, &config.nav.home_text),
        "sidebar": build_sidebar(categories),
    });
    let json = serde_json::to_string_pretty(&payload).context("serializing nav fragment")? + "\n";

    if fs::read_to_string(output).is_ok_and(|existing| existing == json) {
        debug!("nav"; "{} unchanged", output.display());
        return Ok(());
    }

    if let Some(parent) = output.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("creating nav output directory {}", parent.display()))?;
    }

    fs::write(output, json).with_context(|| format!("writing nav fragment {}", output.display()))?;

    debug!("nav"; "wrote {}", output.display());
    Ok(())
}

// ============================================================================
// tests
// ============================================================================
