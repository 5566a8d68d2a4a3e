//! The log access engine: backward pagination and live tailing.

mod error;
mod fs_source;
mod lines;
mod page;
mod paginator;
mod service;
mod tail;

pub use error::LogAccessError;
pub use fs_source::FsLogSource;
pub use page::{EXHAUSTED_CURSOR, LogPage};
pub use paginator::ReversePaginator;
pub use service::{LogService, LogServiceDeps};
pub use tail::{LiveTailStreamer, TailEvent, TailSession};
