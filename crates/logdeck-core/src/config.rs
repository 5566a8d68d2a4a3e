//! Configuration domain types and validation.
//!
//! Configuration is an explicit value built once at startup and threaded
//! into the paginator and streamer constructors. Nothing in the engine reads
//! ambient global state.

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::paths::default_config_path;
use crate::ports::AppLogPaths;

/// Lines returned per page when the caller does not ask for a size.
pub const DEFAULT_LINES_PER_PAGE: usize = 100;

/// Heuristic line length used to size the backward read window.
pub const DEFAULT_AVERAGE_LINE_BYTES: u64 = 200;

/// Hard upper bound on a single backward read.
pub const DEFAULT_MAX_PAGE_WINDOW_BYTES: u64 = 1024 * 1024;

/// Tail segment sent when a live stream opens.
pub const DEFAULT_PRIMING_WINDOW_BYTES: u64 = 16 * 1024;

/// Default HTTP port for the dashboard.
pub const DEFAULT_PORT: u16 = 9615;

/// What a live tail session does when the file changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TailMode {
    /// Emit a content-free heartbeat per change notification.
    #[default]
    Heartbeat,
    /// Read the appended bytes since the last read and emit them as lines.
    Follow,
}

/// Tuning for the log access engine.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct LogAccessConfig {
    /// Page size used when a request does not specify one.
    pub default_lines_per_page: usize,

    /// Estimated bytes per line; `lines * average_line_bytes` is the window.
    pub average_line_bytes: u64,

    /// Upper bound for any single backward read, including window growth
    /// when a line is longer than the estimate.
    pub max_page_window_bytes: u64,

    /// Bytes read from the end of the file when a stream opens. Also bounds
    /// each delta read in [`TailMode::Follow`].
    pub priming_window_bytes: u64,

    pub tail_mode: TailMode,

    /// Capacity of the per-session change notification channel.
    pub change_buffer: usize,

    /// Directory that arbitrary-path requests must stay inside. When unset,
    /// the arbitrary-path endpoints are not exposed.
    pub log_root: Option<PathBuf>,
}

impl Default for LogAccessConfig {
    fn default() -> Self {
        Self {
            default_lines_per_page: DEFAULT_LINES_PER_PAGE,
            average_line_bytes: DEFAULT_AVERAGE_LINE_BYTES,
            max_page_window_bytes: DEFAULT_MAX_PAGE_WINDOW_BYTES,
            priming_window_bytes: DEFAULT_PRIMING_WINDOW_BYTES,
            tail_mode: TailMode::default(),
            change_buffer: 64,
            log_root: None,
        }
    }
}

impl LogAccessConfig {
    /// Initial backward read window for a page of `lines` lines.
    #[must_use]
    pub fn page_window(&self, lines: u64) -> u64 {
        lines
            .saturating_mul(self.average_line_bytes)
            .clamp(1, self.max_page_window_bytes.max(1))
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.default_lines_per_page == 0 {
            return Err(ConfigError::Invalid(
                "default_lines_per_page must be at least 1".to_string(),
            ));
        }
        if self.average_line_bytes == 0 {
            return Err(ConfigError::Invalid(
                "average_line_bytes must be at least 1".to_string(),
            ));
        }
        if self.max_page_window_bytes < self.average_line_bytes {
            return Err(ConfigError::Invalid(format!(
                "max_page_window_bytes ({}) must be >= average_line_bytes ({})",
                self.max_page_window_bytes, self.average_line_bytes
            )));
        }
        if self.priming_window_bytes == 0 || self.priming_window_bytes > self.max_page_window_bytes
        {
            return Err(ConfigError::Invalid(format!(
                "priming_window_bytes must be between 1 and max_page_window_bytes ({})",
                self.max_page_window_bytes
            )));
        }
        if self.change_buffer == 0 {
            return Err(ConfigError::Invalid(
                "change_buffer must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

/// HTTP listener settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: DEFAULT_PORT,
        }
    }
}

/// Full dashboard configuration as stored in `config.json`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct DashboardConfig {
    pub server: ServerSettings,
    pub logs: LogAccessConfig,
    pub apps: Vec<AppLogPaths>,
}

impl DashboardConfig {
    /// Load and validate a configuration file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let raw = fs::read_to_string(path).map_err(|e| ConfigError::Read {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
        let config: Self = serde_json::from_str(&raw).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Load `explicit` if given, else the default config file if it exists,
    /// else the built-in defaults.
    pub fn load_or_default(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        if let Some(path) = explicit {
            return Self::load(path);
        }
        match default_config_path() {
            Some(path) if path.is_file() => {
                tracing::debug!(path = %path.display(), "Loading default config file");
                Self::load(&path)
            }
            _ => Ok(Self::default()),
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.logs.validate()?;

        let mut seen = HashSet::new();
        for app in &self.apps {
            if app.name.trim().is_empty() {
                return Err(ConfigError::Invalid("app name cannot be empty".to_string()));
            }
            if !seen.insert(app.name.as_str()) {
                return Err(ConfigError::Invalid(format!(
                    "duplicate app name '{}'",
                    app.name
                )));
            }
        }
        Ok(())
    }
}

/// Errors raised while loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config {path}: {reason}")]
    Read { path: PathBuf, reason: String },

    #[error("Failed to parse config {path}: {reason}")]
    Parse { path: PathBuf, reason: String },

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_defaults_are_valid() {
        assert!(DashboardConfig::default().validate().is_ok());
    }

    #[test]
    fn test_page_window_is_clamped_to_max() {
        let config = LogAccessConfig {
            average_line_bytes: 200,
            max_page_window_bytes: 1000,
            priming_window_bytes: 500,
            ..LogAccessConfig::default()
        };
        assert_eq!(config.page_window(2), 400);
        assert_eq!(config.page_window(1_000_000), 1000);
        assert_eq!(config.page_window(u64::MAX), 1000);
    }

    #[test]
    fn test_zero_average_line_bytes_is_rejected() {
        let config = LogAccessConfig {
            average_line_bytes: 0,
            ..LogAccessConfig::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_priming_larger_than_max_window_is_rejected() {
        let config = LogAccessConfig {
            priming_window_bytes: DEFAULT_MAX_PAGE_WINDOW_BYTES + 1,
            ..LogAccessConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_load_partial_file_fills_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(
            &path,
            r#"{
                "server": { "port": 8000 },
                "logs": { "tail_mode": "follow" },
                "apps": [
                    { "name": "api", "out_log_path": "/tmp/api-out.log", "err_log_path": "/tmp/api-err.log" }
                ]
            }"#,
        )
        .unwrap();

        let config = DashboardConfig::load(&path).unwrap();
        assert_eq!(config.server.port, 8000);
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.logs.tail_mode, TailMode::Follow);
        assert_eq!(config.logs.default_lines_per_page, DEFAULT_LINES_PER_PAGE);
        assert_eq!(config.apps.len(), 1);
    }

    #[test]
    fn test_duplicate_app_names_are_rejected() {
        let app = AppLogPaths {
            name: "api".to_string(),
            out_log_path: "/a".into(),
            err_log_path: "/b".into(),
        };
        let config = DashboardConfig {
            apps: vec![app.clone(), app],
            ..DashboardConfig::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_load_missing_explicit_file_fails() {
        let dir = tempdir().unwrap();
        let err = DashboardConfig::load_or_default(Some(&dir.path().join("missing.json")))
            .unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
    }

    #[test]
    fn test_load_malformed_file_is_parse_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, "{ not json").unwrap();
        assert!(matches!(
            DashboardConfig::load(&path),
            Err(ConfigError::Parse { .. })
        ));
    }
}
