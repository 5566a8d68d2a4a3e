//! Process catalog port.
//!
//! The process supervisor is an external system. The dashboard only needs
//! to know which apps exist and where their stdout/stderr logs live.

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Which of an app's two log files to read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogStreamKind {
    Stdout,
    Stderr,
}

impl fmt::Display for LogStreamKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Stdout => f.write_str("stdout"),
            Self::Stderr => f.write_str("stderr"),
        }
    }
}

/// Returned when a log type is neither `stdout` nor `stderr`.
#[derive(Debug, Error)]
#[error("Log type must be stdout or stderr, got '{0}'")]
pub struct UnknownStreamKind(pub String);

impl FromStr for LogStreamKind {
    type Err = UnknownStreamKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "stdout" | "out" => Ok(Self::Stdout),
            "stderr" | "err" => Ok(Self::Stderr),
            other => Err(UnknownStreamKind(other.to_string())),
        }
    }
}

/// Log locations of one supervised app.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppLogPaths {
    pub name: String,
    pub out_log_path: PathBuf,
    pub err_log_path: PathBuf,
}

impl AppLogPaths {
    pub fn path_for(&self, kind: LogStreamKind) -> &Path {
        match kind {
            LogStreamKind::Stdout => &self.out_log_path,
            LogStreamKind::Stderr => &self.err_log_path,
        }
    }
}

/// Port for looking up supervised apps.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProcessCatalog: Send + Sync {
    /// All apps known to the supervisor.
    async fn list(&self) -> Vec<AppLogPaths>;

    /// Look up a single app by name.
    async fn describe(&self, name: &str) -> Option<AppLogPaths>;
}
