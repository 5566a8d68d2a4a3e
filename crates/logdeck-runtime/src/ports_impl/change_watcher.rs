//! `notify`-backed [`ChangeWatcher`].
//!
//! Each subscription owns its own [`RecommendedWatcher`]. The watcher's
//! callback runs on a notify thread and forwards classified events into a
//! bounded tokio channel with `try_send`; when the channel is full the
//! event is dropped, which is harmless because a consumer re-reads file
//! state on the next change anyway.

use std::path::{Path, PathBuf};

use logdeck_core::ports::{ChangeWatcher, FileChange, WatchError, WatchSubscription};
use notify::event::{EventKind, ModifyKind};
use notify::{Event, RecommendedWatcher, RecursiveMode, Watcher};
use tokio::sync::mpsc;
use tracing::{debug, warn};

/// Default capacity of each subscription's change channel.
pub const DEFAULT_CHANGE_BUFFER: usize = 64;

/// Watches individual files using the platform's recommended backend.
#[derive(Debug, Clone, Copy)]
pub struct NotifyChangeWatcher {
    buffer: usize,
}

impl NotifyChangeWatcher {
    pub fn new(buffer: usize) -> Self {
        Self {
            buffer: buffer.max(1),
        }
    }
}

impl Default for NotifyChangeWatcher {
    fn default() -> Self {
        Self::new(DEFAULT_CHANGE_BUFFER)
    }
}

impl ChangeWatcher for NotifyChangeWatcher {
    fn subscribe(&self, path: &Path) -> Result<WatchSubscription, WatchError> {
        let (tx, rx) = mpsc::channel(self.buffer);
        let watched = path.to_path_buf();
        let log_path = watched.clone();

        let mut watcher = notify::recommended_watcher(move |res: Result<Event, notify::Error>| {
            match res {
                Ok(event) => {
                    if let Some(change) = classify(&event.kind) {
                        let _ = tx.try_send(change);
                    }
                }
                Err(e) => warn!(path = %log_path.display(), error = %e, "File watch error"),
            }
        })
        .map_err(|e| subscribe_error(path, &e))?;

        watcher
            .watch(path, RecursiveMode::NonRecursive)
            .map_err(|e| subscribe_error(path, &e))?;

        debug!(path = %path.display(), "File watch established");
        Ok(WatchSubscription::new(rx, WatchHandle {
            _watcher: watcher,
            path: watched,
        }))
    }
}

/// Keeps the OS watch alive; dropping it unregisters the watch.
struct WatchHandle {
    _watcher: RecommendedWatcher,
    path: PathBuf,
}

impl Drop for WatchHandle {
    fn drop(&mut self) {
        debug!(path = %self.path.display(), "File watch released");
    }
}

fn subscribe_error(path: &Path, e: &notify::Error) -> WatchError {
    WatchError::Subscribe {
        path: path.to_path_buf(),
        reason: e.to_string(),
    }
}

/// Map a raw notify event onto what a tail session cares about.
fn classify(kind: &EventKind) -> Option<FileChange> {
    match kind {
        EventKind::Remove(_) | EventKind::Modify(ModifyKind::Name(_)) => Some(FileChange::Gone),
        EventKind::Modify(ModifyKind::Metadata(_)) | EventKind::Access(_) => None,
        EventKind::Modify(_) | EventKind::Create(_) | EventKind::Any => Some(FileChange::Modified),
        EventKind::Other => None,
    }
}
