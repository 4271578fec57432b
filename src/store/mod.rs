//! Tracked-record store: article metadata persisted across runs.
//!
//! The store protects one field - the effective modification time - from
//! spurious file-system resets. A checkout or clone can touch every file;
//! reconciliation keeps a stored timestamp unless the file's observed mtime
//! strictly exceeds it, so only genuine edits bump a document's rank.

use crate::{debug, log, scan::Document};
use anyhow::{Context, Result};
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// One persisted article record, keyed by `link`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackedRecord {
    /// Document title, refreshed on every run.
    pub title: String,
    /// Site-relative link, the stable record key.
    pub link: String,
    /// Category display label, refreshed on every run.
    pub category: String,
    /// Effective modification time (milliseconds since the Unix epoch),
    /// used for ranking. Never regressed by a stale file-system read.
    pub mtime: u64,
}

/// Load the persisted store.
///
/// A missing or malformed store is an empty prior state, never fatal -
/// this is the clean-bootstrap path.
pub fn load_store(path: &Path) -> Vec<TrackedRecord> {
    let Ok(json) = fs::read_to_string(path) else {
        debug!("store"; "no store at {}, starting empty", path.display());
        return Vec::new();
    };

    match serde_json::from_str(&json) {
        Ok(records) => records,
        Err(e) => {
            log!("warning"; "malformed store {} ({}), starting empty", path.display(), e);
            Vec::new()
        }
    }
}

/// Merge freshly scanned documents with the previous record set.
///
/// Per document: no prior record means the observed mtime is adopted;
/// otherwise the stored mtime wins only while strictly greater than the
/// observed one. Title and category always come from the scan.
///
/// The result is in scan order and keyed on currently scanned documents,
/// so records for removed files are pruned.
pub fn reconcile(scanned: &[Document], previous: &[TrackedRecord]) -> Vec<TrackedRecord> {
    let prev_by_link: FxHashMap<&str, &TrackedRecord> = previous
        .iter()
        .map(|record| (record.link.as_str(), record))
        .collect();

    scanned
        .iter()
        .map(|doc| {
            let stored = prev_by_link.get(doc.link.as_str()).map(|r| r.mtime);
            let mtime = match stored {
                Some(stored) if stored > doc.mtime => stored,
                _ => doc.mtime,
            };
            TrackedRecord {
                title: doc.title.clone(),
                link: doc.link.clone(),
                category: doc.category.clone(),
                mtime,
            }
        })
        .collect()
}

/// Write the full reconciled set back, replacing the previous content.
///
/// Output is deterministic for a given record set, so repeated runs with
/// no underlying changes rewrite identical bytes.
pub fn persist_store(path: &Path, records: &[TrackedRecord]) -> Result<()> {
    let json = serde_json::to_string_pretty(records)
        .context("serializing article store")?;

    fs::write(path, json + "\n")
        .with_context(|| format!("writing article store {}", path.display()))?;

    debug!("store"; "persisted {} records to {}", records.len(), path.display());
    Ok(())
}

// ============================================================================
// tests
// ============================================================================
