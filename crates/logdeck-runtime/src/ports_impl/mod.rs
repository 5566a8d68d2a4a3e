//! Port implementations for logdeck-runtime.
//!
//! These connect the abstract ports defined in logdeck-core to the
//! platform's file notification facilities.

pub mod change_watcher;

pub use change_watcher::NotifyChangeWatcher;
