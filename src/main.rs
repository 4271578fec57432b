//! Docfresh - keeps a markdown docs site's derived artifacts fresh.

mod cli;
mod config;
mod logger;
mod nav;
mod publish;
mod scan;
mod store;
mod utils;
mod watch;

use anyhow::Result;
use clap::{ColorChoice, Parser};
use cli::{Cli, Commands};
use config::{DocsConfig, init_config};

fn main() -> Result<()> {
    let cli: &'static Cli = Box::leak(Box::new(Cli::parse()));

    // Set global color override based on CLI option
    match cli.color {
        ColorChoice::Always => owo_colors::set_override(true),
        ColorChoice::Never => owo_colors::set_override(false),
        ColorChoice::Auto => {} // owo-colors auto-detects TTY
    }

    let config = init_config(DocsConfig::load(cli)?);

    match cli.command.as_ref().unwrap_or(&Commands::Update) {
        Commands::Update => cli::update::run_update(&config).map(|_| ()),
        Commands::Watch => watch::run_watch(&config),
    }
}
