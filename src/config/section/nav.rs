//! `[nav]` configuration for the generated navigation fragment.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct NavConfig {
    /// Enable navigation fragment generation.
    pub enable: bool,

    /// Output path for the JSON fragment consumed by the site config.
    pub output: PathBuf,

    /// Display text for the home entry.
    pub home_text: String,
}

impl Default for NavConfig {
    fn default() -> Self {
        Self {
            enable: true,
            output: "docs/.vitepress/nav.json".into(),
            home_text: "Home".into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::test_parse_config;

    #[test]
    fn test_defaults() {
        let config = test_parse_config("");
        assert!(config.nav.enable);
        assert_eq!(config.nav.output, PathBuf::from("docs/.vitepress/nav.json"));
        assert_eq!(config.nav.home_text, "Home");
    }

    #[test]
    fn test_custom_config() {
        let config = test_parse_config("[nav]\nenable = false\nhome_text = \"主页\"");
        assert!(!config.nav.enable);
        assert_eq!(config.nav.home_text, "主页");
    }
}
