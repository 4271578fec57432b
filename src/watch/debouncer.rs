use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use rustc_hash::FxHashMap;

/// Change kinds the watcher reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum ChangeKind {
    Created,
    Modified,
    Removed,
}

impl ChangeKind {
    pub(super) fn label(self) -> &'static str {
        match self {
            Self::Created => "created",
            Self::Modified => "modified",
            Self::Removed => "removed",
        }
    }
}

/// Pure debouncer: only handles timing and event deduplication.
/// No business logic, no global state access.
pub(super) struct Debouncer {
    /// Path → ChangeKind (dedup is free via HashMap key uniqueness)
    changes: FxHashMap<PathBuf, ChangeKind>,
    last_event: Option<Instant>,
    last_run: Option<Instant>,
    debounce: Duration,
    cooldown: Duration,
}

impl Debouncer {
    pub(super) fn new(debounce: Duration, cooldown: Duration) -> Self {
        Self {
            changes: FxHashMap::default(),
            last_event: None,
            last_run: None,
            debounce,
            cooldown,
        }
    }

    /// Record a qualifying change, applying dedup rules:
    /// - Removed + Created/Modified → restored, use the new event
    /// - Modified + Removed → deleted, upgrade to Removed
    /// - Created + Removed → appeared then vanished, discard (no-op)
    /// - Same type events: first event wins
    ///
    /// The quiet timer restarts on EVERY call, so a burst of writes
    /// coalesces into a single run after the tree settles.
    pub(super) fn add_change(&mut self, path: &Path, kind: ChangeKind) {
        let path = path.to_path_buf();

        match self.changes.get(&path).copied() {
            None => {
                crate::debug!("watch"; "event {}: {}", kind.label(), path.display());
                self.changes.insert(path, kind);
            }
            Some(ChangeKind::Removed) if kind != ChangeKind::Removed => {
                crate::debug!("watch"; "restore removed->{}: {}", kind.label(), path.display());
                self.changes.insert(path, kind);
            }
            Some(ChangeKind::Modified) if kind == ChangeKind::Removed => {
                crate::debug!("watch"; "upgrade modified->removed: {}", path.display());
                self.changes.insert(path, ChangeKind::Removed);
            }
            Some(ChangeKind::Created) if kind == ChangeKind::Removed => {
                crate::debug!("watch"; "discard created+removed: {}", path.display());
                self.changes.remove(&path);
            }
            Some(_) => {} // first event wins
        }

        self.last_event = Some(Instant::now());
    }

    /// Take pending changes if debounce + cooldown elapsed.
    pub(super) fn take_if_ready(&mut self) -> Option<FxHashMap<PathBuf, ChangeKind>> {
        if !self.is_ready() {
            return None;
        }

        let changes = std::mem::take(&mut self.changes);
        self.last_event = None;

        if changes.is_empty() {
            return None;
        }

        self.last_run = Some(Instant::now());
        Some(changes)
    }

    pub(super) fn is_ready(&self) -> bool {
        let Some(last_event) = self.last_event else {
            return false;
        };

        if last_event.elapsed() < self.debounce {
            return false;
        }

        if let Some(last_run) = self.last_run
            && last_run.elapsed() < self.cooldown
        {
            return false;
        }

        !self.changes.is_empty()
    }

    /// Precise sleep duration until next possible ready time.
    pub(super) fn sleep_duration(&self) -> Duration {
        let Some(last_event) = self.last_event else {
            return Duration::from_secs(86400);
        };

        let debounce_remaining = self.debounce.saturating_sub(last_event.elapsed());

        let cooldown_remaining = self
            .last_run
            .map(|t| self.cooldown.saturating_sub(t.elapsed()))
            .unwrap_or(Duration::ZERO);

        debounce_remaining
            .max(cooldown_remaining)
            .max(Duration::from_millis(1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread::sleep;

    fn debouncer() -> Debouncer {
        Debouncer::new(Duration::from_millis(50), Duration::from_millis(50))
    }

    #[test]
    fn test_not_ready_before_quiet_interval() {
        let mut d = debouncer();
        d.add_change(Path::new("/docs/java/01-a.md"), ChangeKind::Modified);

        assert!(!d.is_ready());
        assert!(d.take_if_ready().is_none());
    }

    #[test]
    fn test_ready_after_quiet_interval() {
        let mut d = debouncer();
        d.add_change(Path::new("/docs/java/01-a.md"), ChangeKind::Modified);

        sleep(Duration::from_millis(80));
        let changes = d.take_if_ready().expect("should be ready");
        assert_eq!(changes.len(), 1);

        // Taken: nothing pending anymore
        assert!(!d.is_ready());
    }

    #[test]
    fn test_timer_restarts_on_every_event() {
        let mut d = debouncer();
        d.add_change(Path::new("/docs/a.md"), ChangeKind::Modified);
        sleep(Duration::from_millis(30));

        // Second event restarts the quiet timer
        d.add_change(Path::new("/docs/b.md"), ChangeKind::Modified);
        sleep(Duration::from_millis(30));
        assert!(!d.is_ready());

        sleep(Duration::from_millis(40));
        assert!(d.is_ready());
    }

    #[test]
    fn test_cooldown_gates_next_run() {
        let mut d = debouncer();
        d.add_change(Path::new("/docs/a.md"), ChangeKind::Modified);
        sleep(Duration::from_millis(80));
        assert!(d.take_if_ready().is_some());

        // New burst immediately after a run waits for the cooldown too
        d.add_change(Path::new("/docs/b.md"), ChangeKind::Modified);
        assert!(!d.is_ready());
    }

    #[test]
    fn test_dedup_created_then_removed_discards() {
        let mut d = debouncer();
        d.add_change(Path::new("/docs/a.md"), ChangeKind::Created);
        d.add_change(Path::new("/docs/a.md"), ChangeKind::Removed);

        sleep(Duration::from_millis(80));
        assert!(d.take_if_ready().is_none());
    }

    #[test]
    fn test_dedup_modified_then_removed_upgrades() {
        let mut d = debouncer();
        d.add_change(Path::new("/docs/a.md"), ChangeKind::Modified);
        d.add_change(Path::new("/docs/a.md"), ChangeKind::Removed);

        sleep(Duration::from_millis(80));
        let changes = d.take_if_ready().unwrap();
        assert_eq!(changes[Path::new("/docs/a.md")], ChangeKind::Removed);
    }

    #[test]
    fn test_dedup_removed_then_restored() {
        let mut d = debouncer();
        d.add_change(Path::new("/docs/a.md"), ChangeKind::Removed);
        d.add_change(Path::new("/docs/a.md"), ChangeKind::Created);

        sleep(Duration::from_millis(80));
        let changes = d.take_if_ready().unwrap();
        assert_eq!(changes[Path::new("/docs/a.md")], ChangeKind::Created);
    }

    #[test]
    fn test_sleep_duration_idle_is_long() {
        let d = debouncer();
        assert!(d.sleep_duration() >= Duration::from_secs(3600));
    }
}
