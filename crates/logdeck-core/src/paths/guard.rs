//! Path validation for file and directory arguments.
//!
//! Every log read goes through these checks first. Paths are canonicalized
//! before any comparison, so `..` segments and symlinks are resolved to the
//! real target before the containment check runs.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use super::error::{EntryKind, PathGuardError};

/// Validates that `path` names an existing regular file.
///
/// When `allowed_base` is given, the canonical path must lie under the
/// canonical base directory.
pub fn validate_file(path: &str, allowed_base: Option<&Path>) -> Result<PathBuf, PathGuardError> {
    validate(path, allowed_base, EntryKind::File)
}

/// Validates that `path` names an existing directory.
pub fn validate_directory(
    path: &str,
    allowed_base: Option<&Path>,
) -> Result<PathBuf, PathGuardError> {
    validate(path, allowed_base, EntryKind::Directory)
}

fn validate(
    path: &str,
    allowed_base: Option<&Path>,
    expected: EntryKind,
) -> Result<PathBuf, PathGuardError> {
    if path.trim().is_empty() {
        return Err(PathGuardError::InvalidPath("path cannot be empty".to_string()));
    }
    if path.contains('\0') {
        return Err(PathGuardError::InvalidPath(
            "path contains a NUL byte".to_string(),
        ));
    }

    let resolved = canonicalize(Path::new(path))?;

    if let Some(base) = allowed_base {
        let base = canonicalize(base)?;
        if !resolved.starts_with(&base) {
            return Err(PathGuardError::OutsideBase {
                path: resolved,
                base,
            });
        }
    }

    let metadata = fs::metadata(&resolved).map_err(|e| io_error(&resolved, &e))?;
    let matches = match expected {
        EntryKind::File => metadata.is_file(),
        EntryKind::Directory => metadata.is_dir(),
    };
    if !matches {
        return Err(PathGuardError::WrongType {
            path: resolved,
            expected,
        });
    }

    Ok(resolved)
}

fn canonicalize(path: &Path) -> Result<PathBuf, PathGuardError> {
    fs::canonicalize(path).map_err(|e| io_error(path, &e))
}

fn io_error(path: &Path, err: &io::Error) -> PathGuardError {
    match err.kind() {
        io::ErrorKind::NotFound => PathGuardError::NotFound(path.to_path_buf()),
        _ => PathGuardError::Io {
            path: path.to_path_buf(),
            reason: err.to_string(),
        },
    }
}

/// Path validator bound to an optional allowed base directory.
///
/// Constructed once from configuration and shared by the paginator and
/// the tail streamer.
#[derive(Debug, Clone, Default)]
pub struct PathGuard {
    allowed_base: Option<PathBuf>,
}

impl PathGuard {
    /// A guard that accepts any existing entry of the right kind.
    #[must_use]
    pub const fn unrestricted() -> Self {
        Self { allowed_base: None }
    }

    /// A guard that only accepts entries under `base`.
    #[must_use]
    pub fn within(base: impl Into<PathBuf>) -> Self {
        Self {
            allowed_base: Some(base.into()),
        }
    }

    /// The configured base directory, if any.
    pub fn allowed_base(&self) -> Option<&Path> {
        self.allowed_base.as_deref()
    }

    pub fn file(&self, path: &str) -> Result<PathBuf, PathGuardError> {
        validate_file(path, self.allowed_base())
    }

    pub fn directory(&self, path: &str) -> Result<PathBuf, PathGuardError> {
        validate_directory(path, self.allowed_base())
    }

    /// [`Self::file`] on the blocking pool, for callers on an async worker.
    pub async fn resolve_file(&self, path: &str) -> Result<PathBuf, PathGuardError> {
        let owned = path.to_string();
        let base = self.allowed_base.clone();
        tokio::task::spawn_blocking(move || validate_file(&owned, base.as_deref()))
            .await
            .map_err(|e| PathGuardError::Io {
                path: PathBuf::from(path),
                reason: format!("path check task failed: {e}"),
            })?
    }
}
