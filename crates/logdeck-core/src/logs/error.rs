//! Errors raised by the log access engine.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::paths::PathGuardError;
use crate::ports::WatchError;

/// Errors from page reads and tail sessions.
///
/// The page API never returns these to its callers; it logs them and
/// degrades to an exhausted page. The tail API surfaces open-time errors.
#[derive(Debug, Error)]
pub enum LogAccessError {
    #[error(transparent)]
    Path(#[from] PathGuardError),

    #[error("Lines per page must be a positive integer, got {0}")]
    InvalidPageSize(i64),

    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error(transparent)]
    Watch(#[from] WatchError),
}

impl LogAccessError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
