//! `[watch]` configuration for the continuous mode.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WatchConfig {
    /// Quiet interval after the last change event before the pipeline re-runs.
    pub debounce_ms: u64,

    /// Minimum gap between two pipeline runs, absorbing event echo.
    pub cooldown_ms: u64,
}

impl Default for WatchConfig {
    fn default() -> Self {
        Self {
            debounce_ms: 1000,
            cooldown_ms: 500,
        }
    }
}
