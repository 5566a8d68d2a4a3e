//! File change notification port.
//!
//! A [`WatchSubscription`] owns whatever OS-level handle backs the watch.
//! Dropping the subscription releases that handle, so a tail session that
//! holds one cannot leak it on any exit path.

use std::any::Any;
use std::fmt;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tokio::sync::mpsc;

/// A change observed on a watched file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileChange {
    /// Content was written, appended or truncated.
    Modified,
    /// The file was removed or renamed away (e.g. rotated).
    Gone,
}

/// Errors raised when a watch cannot be established.
#[derive(Debug, Error)]
pub enum WatchError {
    #[error("Failed to watch {path}: {reason}")]
    Subscribe { path: PathBuf, reason: String },
}

/// A live change subscription for a single file.
pub struct WatchSubscription {
    changes: mpsc::Receiver<FileChange>,
    // Held only for its Drop impl.
    _handle: Box<dyn Any + Send>,
}

impl WatchSubscription {
    /// Wrap a change receiver together with the handle that keeps the watch
    /// alive.
    pub fn new(changes: mpsc::Receiver<FileChange>, handle: impl Any + Send) -> Self {
        Self {
            changes,
            _handle: Box::new(handle),
        }
    }

    /// Wait for the next change. Returns `None` once the watcher side closed.
    pub async fn next_change(&mut self) -> Option<FileChange> {
        self.changes.recv().await
    }

    /// Discard changes that are already queued.
    ///
    /// Returns the strongest change among them: `Gone` wins over `Modified`,
    /// so a removal queued behind writes is never lost.
    pub fn drain_pending(&mut self) -> Option<FileChange> {
        let mut strongest = None;
        while let Ok(change) = self.changes.try_recv() {
            if strongest != Some(FileChange::Gone) {
                strongest = Some(change);
            }
        }
        strongest
    }
}

impl fmt::Debug for WatchSubscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WatchSubscription")
            .field("pending", &self.changes.len())
            .finish_non_exhaustive()
    }
}

/// Port for subscribing to change notifications on a file.
///
/// Every call must produce an independent subscription; several sessions
/// may watch the same file at once.
pub trait ChangeWatcher: Send + Sync {
    fn subscribe(&self, path: &Path) -> Result<WatchSubscription, WatchError>;
}
