//! Path validation for every filesystem argument the dashboard accepts.
//!
//! # Design
//!
//! - Returns `PathBuf` and `PathGuardError` for clear error handling
//! - No mutation and no retries: a failure is surfaced immediately and the
//!   caller decides the fallback
//! - Default config-file location lives here too, next to the other
//!   filesystem concerns

mod error;
mod guard;

pub use error::{EntryKind, PathGuardError};
pub use guard::{PathGuard, validate_directory, validate_file};

use std::path::PathBuf;

/// Location of the default configuration file
/// (`<config dir>/logdeck/config.json`), if the platform has a config dir.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("logdeck").join("config.json"))
}
