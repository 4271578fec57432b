//! Command-line interface definitions.

use clap::{ColorChoice, Parser, Subcommand};
use std::path::PathBuf;

/// Default configuration values, shown at the end of --help.
const DEFAULT_VALUES: &str = "\
Defaults (override in docfresh.toml):
  content.root           docs
  content.exclude_dirs   .vitepress, public
  content.exclude_files  index.md
  listing.max            6
  listing.target         docs/index.md
  listing.store          latest-articles.json
  listing.begin_marker   ## Latest Articles
  listing.end_marker     ## Categories
  nav.output             docs/.vitepress/nav.json
  watch.debounce_ms      1000";

/// Docfresh CLI - refresh a docs site's latest-articles listing and navigation
#[derive(Parser, Debug, Clone)]
#[command(version, about, long_about = None, after_help = DEFAULT_VALUES)]
pub struct Cli {
    /// Control colored output (auto, always, never)
    #[arg(long, global = true, default_value = "auto")]
    pub color: ColorChoice,

    /// Config file path (default: search for docfresh.toml upward from cwd)
    #[arg(short = 'C', long, value_hint = clap::ValueHint::FilePath)]
    pub config: Option<PathBuf>,

    /// Content directory override (relative to project root)
    #[arg(short, long, value_hint = clap::ValueHint::DirPath)]
    pub content: Option<PathBuf>,

    /// Maximum number of entries in the published listing
    #[arg(short, long)]
    pub max: Option<usize>,

    /// Enable verbose output for debugging
    #[arg(short = 'V', long, global = true)]
    pub verbose: bool,

    /// Subcommand; one update pass when omitted
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Scan content and refresh the listing, store, and navigation (default)
    #[command(visible_alias = "u")]
    Update,

    /// Keep running and refresh whenever the content tree changes
    #[command(visible_alias = "w")]
    Watch,
}

#[allow(unused)]
impl Cli {
    pub const fn is_watch(&self) -> bool {
        matches!(self.command, Some(Commands::Watch))
    }
}
