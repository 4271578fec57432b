//! One-shot update pass: scan, reconcile, publish, regenerate navigation.

use crate::{config::DocsConfig, log, nav, publish, scan, store};
use anyhow::Result;

/// Outcome of one pipeline pass.
#[derive(Debug, Clone, Copy)]
pub struct UpdateSummary {
    pub categories: usize,
    pub articles: usize,
    pub listed: usize,
}

/// Run the full pipeline once.
///
/// Stage order matters: the store must be reconciled and persisted before
/// ranking, so the published listing and the persisted state always agree.
pub fn run_update(config: &DocsConfig) -> Result<UpdateSummary> {
    let categories = scan::scan_content(config);
    let documents = scan::flatten(&categories);

    let previous = store::load_store(&config.listing.store);
    let records = store::reconcile(&documents, &previous);
    store::persist_store(&config.listing.store, &records)?;

    publish::publish_listing(config, &records)?;

    if config.nav.enable {
        nav::write_nav(config, &categories)?;
    }

    let summary = UpdateSummary {
        categories: categories.len(),
        articles: records.len(),
        listed: records.len().min(config.listing.max),
    };

    log!("update"; "{} articles in {} categories, listing top {}",
        summary.articles, summary.categories, summary.listed);

    Ok(summary)
}

// ============================================================================
// tests
// ============================================================================
