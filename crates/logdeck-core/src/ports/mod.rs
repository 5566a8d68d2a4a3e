//! Port definitions (trait abstractions) for external systems.
//!
//! Ports define the interfaces that the log access engine expects from
//! infrastructure. They contain no implementation details.
//!
//! # Design Rules
//!
//! - No `notify` types in any signature
//! - Resources with a lifetime (watches) are owned by a value whose `Drop`
//!   releases them
//! - Async only where the real collaborator does I/O

pub mod change_watcher;
pub mod log_source;
pub mod markup;
pub mod process_catalog;

pub use change_watcher::{ChangeWatcher, FileChange, WatchError, WatchSubscription};
pub use log_source::LogSource;
pub use markup::{MarkupConverter, PassthroughMarkup};
pub use process_catalog::{AppLogPaths, LogStreamKind, ProcessCatalog, UnknownStreamKind};
