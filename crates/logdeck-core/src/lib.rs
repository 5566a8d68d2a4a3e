//! Core of the logdeck log viewer: path validation, backward pagination
//! and live tailing of supervised process logs.
//!
//! Infrastructure (file watching, HTTP, terminal output) lives in the
//! adapter crates and plugs in through the traits in [`ports`].
#![deny(unused_crate_dependencies)]

pub mod catalog;
pub mod config;
pub mod logs;
pub mod markup;
pub mod paths;
pub mod ports;

// Re-export commonly used types for convenience
pub use catalog::StaticProcessCatalog;
pub use config::{
    ConfigError, DEFAULT_AVERAGE_LINE_BYTES, DEFAULT_LINES_PER_PAGE,
    DEFAULT_MAX_PAGE_WINDOW_BYTES, DEFAULT_PORT, DEFAULT_PRIMING_WINDOW_BYTES, DashboardConfig,
    LogAccessConfig, ServerSettings, TailMode,
};
pub use logs::{
    EXHAUSTED_CURSOR, FsLogSource, LiveTailStreamer, LogAccessError, LogPage, LogService,
    LogServiceDeps, ReversePaginator, TailEvent, TailSession,
};
pub use markup::AnsiHtmlConverter;
pub use paths::{
    EntryKind, PathGuard, PathGuardError, default_config_path, validate_directory, validate_file,
};
pub use ports::{
    AppLogPaths, ChangeWatcher, FileChange, LogSource, LogStreamKind, MarkupConverter,
    PassthroughMarkup, ProcessCatalog, UnknownStreamKind, WatchError, WatchSubscription,
};
