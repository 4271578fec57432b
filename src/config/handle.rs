//! Global config with atomic reload support.
//!
//! Uses `arc-swap` for lock-free reads and atomic config replacement.
//! This enables hot-reloading of `docfresh.toml` during watch mode.

use crate::config::DocsConfig;
use anyhow::Result;
use arc_swap::ArcSwap;
use std::sync::{Arc, LazyLock};

/// Global config storage.
pub static CONFIG: LazyLock<ArcSwap<DocsConfig>> =
    LazyLock::new(|| ArcSwap::from_pointee(DocsConfig::default()));

#[inline]
pub fn cfg() -> Arc<DocsConfig> {
    CONFIG.load_full()
}

/// Reload config from disk after `docfresh.toml` changed (watch mode).
pub fn reload_config() -> Result<()> {
    let c = cfg();
    let cli = c.cli.expect("CLI should be set during initialization");

    let new_config = DocsConfig::load(cli)?;
    CONFIG.store(Arc::new(new_config));

    Ok(())
}

#[inline]
pub fn init_config(config: DocsConfig) -> Arc<DocsConfig> {
    let arc = Arc::new(config);
    CONFIG.store(Arc::clone(&arc));
    arc
}
