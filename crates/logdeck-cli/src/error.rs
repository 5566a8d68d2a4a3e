//! CLI-specific error types and mappings.
//!
//! Maps core errors to exit codes and user-facing messages.

use logdeck_core::{ConfigError, LogAccessError, PathGuardError};
use thiserror::Error;

/// CLI-specific error type.
#[derive(Debug, Error)]
pub enum CliError {
    /// Argument or path validation error.
    #[error("Invalid arguments: {0}")]
    Arguments(String),

    /// IO error (file not found, permission denied, etc.).
    #[error("IO error: {0}")]
    Io(String),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// A file watch could not be established.
    #[error("Watch error: {0}")]
    Watch(String),
}

impl CliError {
    /// Map error to appropriate exit code.
    ///
    /// Exit codes follow Unix conventions:
    /// - 0: Success
    /// - 1: General error
    /// - 2: Misuse of shell command (invalid arguments)
    /// - 64-78: Reserved for specific error categories (see sysexits.h)
    pub const fn exit_code(&self) -> u8 {
        match self {
            Self::Arguments(_) => 2, // EX_USAGE
            Self::Io(_) => 74,       // EX_IOERR
            Self::Config(_) => 78,   // EX_CONFIG
            Self::Watch(_) => 71,    // EX_OSERR
        }
    }
}

impl From<ConfigError> for CliError {
    fn from(err: ConfigError) -> Self {
        Self::Config(err.to_string())
    }
}

impl From<PathGuardError> for CliError {
    fn from(err: PathGuardError) -> Self {
        match err {
            PathGuardError::Io { .. } => Self::Io(err.to_string()),
            _ => Self::Arguments(err.to_string()),
        }
    }
}

impl From<LogAccessError> for CliError {
    fn from(err: LogAccessError) -> Self {
        match err {
            LogAccessError::Path(path_err) => path_err.into(),
            LogAccessError::InvalidPageSize(_) => Self::Arguments(err.to_string()),
            LogAccessError::Io { .. } => Self::Io(err.to_string()),
            LogAccessError::Watch(_) => Self::Watch(err.to_string()),
        }
    }
}

impl From<std::io::Error> for CliError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_exit_codes() {
        assert_eq!(CliError::Arguments(String::new()).exit_code(), 2);
        assert_eq!(CliError::Config(String::new()).exit_code(), 78);
    }

    #[test]
    fn test_missing_file_is_argument_error() {
        let err: CliError =
            LogAccessError::Path(PathGuardError::NotFound(PathBuf::from("/nope.log"))).into();
        assert!(matches!(err, CliError::Arguments(_)));
        assert_eq!(err.exit_code(), 2);
    }

    #[test]
    fn test_config_error_maps_to_config() {
        let err: CliError = ConfigError::Invalid("bad".to_string()).into();
        assert_eq!(err.exit_code(), 78);
    }
}
