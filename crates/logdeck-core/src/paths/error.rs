//! Path validation error types.
//!
//! Provides semantic errors for path checks without exposing
//! filesystem implementation details to adapters.

use std::path::PathBuf;
use thiserror::Error;

/// The kind of filesystem entry a caller expected to find.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    File,
    Directory,
}

impl std::fmt::Display for EntryKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::File => f.write_str("file"),
            Self::Directory => f.write_str("directory"),
        }
    }
}

/// Errors raised while validating a path argument.
#[derive(Debug, Error)]
pub enum PathGuardError {
    /// An empty or otherwise unusable path string was provided.
    #[error("Invalid path: {0}")]
    InvalidPath(String),

    /// The entry does not exist.
    #[error("{0} does not exist")]
    NotFound(PathBuf),

    /// The entry exists but is not of the expected kind.
    #[error("{path} is not a {expected}")]
    WrongType { path: PathBuf, expected: EntryKind },

    /// The resolved path escapes the allowed base directory.
    #[error("{path} is outside the allowed directory {base}")]
    OutsideBase { path: PathBuf, base: PathBuf },

    /// The filesystem refused the status query for another reason.
    #[error("Failed to inspect {path}: {reason}")]
    Io { path: PathBuf, reason: String },
}
