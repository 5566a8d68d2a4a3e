//! Filesystem-backed [`LogSource`].

use std::io::{self, SeekFrom};
use std::path::Path;

use async_trait::async_trait;
use tokio::fs::File;
use tokio::io::{AsyncReadExt, AsyncSeekExt};

use crate::ports::LogSource;

/// Reads log files directly from disk with a seek plus a bounded read.
#[derive(Debug, Clone, Copy, Default)]
pub struct FsLogSource;

impl FsLogSource {
    pub const fn new() -> Self {
        Self
    }
}

#[async_trait]
impl LogSource for FsLogSource {
    async fn size(&self, path: &Path) -> io::Result<u64> {
        Ok(tokio::fs::metadata(path).await?.len())
    }

    async fn read_range(&self, path: &Path, start: u64, end: u64) -> io::Result<Vec<u8>> {
        if end <= start {
            return Ok(Vec::new());
        }
        let len = end - start;
        let capacity = usize::try_from(len)
            .map_err(|_| io::Error::new(io::ErrorKind::InvalidInput, "read range too large"))?;

        let mut file = File::open(path).await?;
        file.seek(SeekFrom::Start(start)).await?;

        let mut buf = Vec::with_capacity(capacity);
        file.take(len).read_to_end(&mut buf).await?;
        Ok(buf)
    }
}
