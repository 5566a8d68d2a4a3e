//! Byte-range access to log files.
//!
//! The paginator and the tail streamer never open files themselves; they go
//! through this port, which is constructed once at startup and injected.

use std::io;
use std::path::Path;

use async_trait::async_trait;

/// Port for reading sizes and bounded byte ranges of a log file.
#[async_trait]
pub trait LogSource: Send + Sync {
    /// Current size of the file in bytes.
    async fn size(&self, path: &Path) -> io::Result<u64>;

    /// Read the bytes in `[start, end)`.
    ///
    /// Implementations must never allocate more than `end - start` bytes.
    /// If the file shrank in the meantime, the returned buffer is simply
    /// shorter than requested.
    async fn read_range(&self, path: &Path, start: u64, end: u64) -> io::Result<Vec<u8>>;
}
