//! Continuous watch mode: debounced re-runs of the update pipeline.
//!
//! The notify watcher feeds raw events into a channel; the loop dedups and
//! debounces them, then re-runs the full pipeline once the tree goes quiet.
//! The pipeline's own outputs (target file, store, nav fragment) never
//! qualify as changes, so a run does not re-trigger itself.

mod debouncer;

use crate::cli::update::run_update;
use crate::config::{self, DocsConfig};
use crate::logger::{status_error, status_success};
use crate::{debug, log};
use anyhow::{Context, Result};
use crossbeam::channel::{Sender, unbounded};
use debouncer::{ChangeKind, Debouncer};
use notify::{RecursiveMode, Watcher};
use std::path::Path;
use std::sync::OnceLock;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

/// Shutdown has been requested (Ctrl+C received)
static SHUTDOWN: AtomicBool = AtomicBool::new(false);

/// Shutdown signal sender, unblocks the select loop
static SHUTDOWN_TX: OnceLock<Sender<()>> = OnceLock::new();

fn is_shutdown() -> bool {
    SHUTDOWN.load(Ordering::SeqCst)
}

/// Setup the global Ctrl+C handler: the first signal stops the loop after
/// the current iteration, a second one exits immediately.
fn setup_shutdown_handler() -> Result<()> {
    ctrlc::set_handler(|| {
        if SHUTDOWN.swap(true, Ordering::SeqCst) {
            std::process::exit(130);
        }
        if let Some(tx) = SHUTDOWN_TX.get() {
            let _ = tx.send(());
        }
    })
    .context("failed to set Ctrl+C handler")
}

/// Run the watch loop until Ctrl+C.
pub fn run_watch(config: &DocsConfig) -> Result<()> {
    let (shutdown_tx, shutdown_rx) = unbounded();
    let _ = SHUTDOWN_TX.set(shutdown_tx);
    setup_shutdown_handler()?;

    // Initial pass. Failures are reported and watching continues, so a
    // broken target can be fixed without restarting the process.
    run_cycle(config);

    let (event_tx, event_rx) = unbounded();
    let mut watcher = notify::recommended_watcher(move |res| {
        let _ = event_tx.send(res);
    })
    .context("creating file watcher")?;

    watcher
        .watch(&config.content.root, RecursiveMode::Recursive)
        .with_context(|| format!("watching {}", config.content.root.display()))?;

    // Watch the config file itself for hot reload
    // TODO: re-attach the content watch root when [content] root changes
    let config_path = config.config_path.clone();
    if config_path.exists() {
        watcher
            .watch(&config_path, RecursiveMode::NonRecursive)
            .with_context(|| format!("watching {}", config_path.display()))?;
    }

    log!("watch"; "watching {} (Ctrl+C to stop)", config.content.root.display());

    let mut debouncer = Debouncer::new(
        Duration::from_millis(config.watch.debounce_ms),
        Duration::from_millis(config.watch.cooldown_ms),
    );
    let mut config_changed = false;

    loop {
        crossbeam::select! {
            recv(event_rx) -> msg => match msg {
                Ok(Ok(event)) => collect_event(
                    &event,
                    &config::cfg(),
                    &config_path,
                    &mut debouncer,
                    &mut config_changed,
                ),
                Ok(Err(e)) => log!("watch"; "notify error: {}", e),
                Err(_) => break, // watcher dropped
            },
            recv(shutdown_rx) -> _ => break,
            default(debouncer.sleep_duration()) => {
                if let Some(changes) = debouncer.take_if_ready() {
                    if config_changed {
                        config_changed = false;
                        match config::reload_config() {
                            Ok(()) => debug!("watch"; "config reloaded"),
                            Err(e) => status_error("config reload failed", &format!("{e:#}")),
                        }
                    }
                    debug!("watch"; "{} change(s) settled", changes.len());
                    run_cycle(&config::cfg());
                }
            }
        }

        if is_shutdown() {
            break;
        }
    }

    log!("watch"; "stopped");
    Ok(())
}

/// One pipeline pass with watch-status reporting.
fn run_cycle(config: &DocsConfig) {
    match run_update(config) {
        Ok(summary) => status_success(&format!(
            "updated: {} articles, top {} listed",
            summary.articles, summary.listed
        )),
        Err(e) => status_error("update failed", &format!("{e:#}")),
    }
}

/// Feed one notify event into the debouncer, dropping non-qualifying paths.
fn collect_event(
    event: &notify::Event,
    config: &DocsConfig,
    config_path: &Path,
    debouncer: &mut Debouncer,
    config_changed: &mut bool,
) {
    use notify::EventKind;

    let kind = match event.kind {
        EventKind::Create(_) => ChangeKind::Created,
        EventKind::Remove(_) => ChangeKind::Removed,
        EventKind::Modify(modify) => {
            // Metadata-only changes (mtime/atime/chmod noise)
            // may trigger endless rebuild loops
            if matches!(modify, notify::event::ModifyKind::Metadata(_)) {
                return;
            }
            ChangeKind::Modified
        }
        _ => return,
    };

    for path in &event.paths {
        if path == config_path {
            *config_changed = true;
            debouncer.add_change(path, kind);
            continue;
        }
        if is_ignored(path, config) {
            continue;
        }
        debouncer.add_change(path, kind);
    }
}

/// Paths whose changes never re-trigger the pipeline: our own outputs,
/// editor temp files, hidden or excluded directories.
fn is_ignored(path: &Path, config: &DocsConfig) -> bool {
    if path == config.listing.target || path == config.listing.store || path == config.nav.output {
        return true;
    }

    if is_temp_file(path) {
        return true;
    }

    if let Ok(rel) = path.strip_prefix(&config.content.root) {
        for component in rel.components() {
            let name = component.as_os_str().to_string_lossy();
            if name.starts_with('.') || config.content.exclude_dirs.iter().any(|d| *d == name) {
                return true;
            }
        }
    }

    false
}

/// Check if path is a temp/backup file (editor artifacts).
fn is_temp_file(path: &Path) -> bool {
    let name = path.file_name().and_then(|n| n.to_str()).unwrap_or("");
    let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("");

    matches!(ext, "bck" | "bak" | "backup" | "swp" | "swo" | "tmp")
        || name.ends_with('~')
        || name.starts_with('.')
}

// ============================================================================
// tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn test_config() -> DocsConfig {
        let mut config = DocsConfig::default();
        config.content.root = PathBuf::from("/site/docs");
        config.listing.target = PathBuf::from("/site/docs/index.md");
        config.listing.store = PathBuf::from("/site/latest-articles.json");
        config.nav.output = PathBuf::from("/site/docs/.vitepress/nav.json");
        config
    }

    #[test]
    fn test_own_outputs_are_ignored() {
        let config = test_config();
        assert!(is_ignored(Path::new("/site/docs/index.md"), &config));
        assert!(is_ignored(Path::new("/site/latest-articles.json"), &config));
        assert!(is_ignored(Path::new("/site/docs/.vitepress/nav.json"), &config));
    }

    #[test]
    fn test_content_changes_qualify() {
        let config = test_config();
        assert!(!is_ignored(Path::new("/site/docs/java/01-a.md"), &config));
        assert!(!is_ignored(Path::new("/site/docs/newcat/post.md"), &config));
    }

    #[test]
    fn test_hidden_and_excluded_dirs_ignored() {
        let config = test_config();
        assert!(is_ignored(Path::new("/site/docs/.vitepress/cache/x.md"), &config));
        assert!(is_ignored(Path::new("/site/docs/public/logo.png"), &config));
    }

    #[test]
    fn test_temp_files_ignored() {
        let config = test_config();
        assert!(is_ignored(Path::new("/site/docs/java/.01-a.md.swp"), &config));
        assert!(is_ignored(Path::new("/site/docs/java/01-a.md~"), &config));
        assert!(is_ignored(Path::new("/site/docs/java/01-a.md.bak"), &config));
    }
}
