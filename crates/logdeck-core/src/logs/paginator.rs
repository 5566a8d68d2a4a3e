//! Backward, cursor-driven pagination over large log files.
//!
//! Each call reads one bounded byte window ending at the cursor, drops the
//! partial line at the window's leading edge, and returns the newest
//! complete lines in that window. The next cursor is computed from the
//! exact byte length of what was returned, so consecutive pages neither
//! overlap nor leave gaps even though the window size is only an estimate.

use std::path::Path;
use std::sync::Arc;

use tracing::{debug, warn};

use super::error::LogAccessError;
use super::lines::{RawLine, split_lines};
use super::page::{LogPage, to_cursor};
use crate::config::LogAccessConfig;
use crate::paths::PathGuard;
use crate::ports::LogSource;

/// Reads a log file backwards one page at a time.
///
/// Stateless between calls: all position state lives in the cursor the
/// caller round-trips.
pub struct ReversePaginator {
    source: Arc<dyn LogSource>,
    guard: PathGuard,
    config: LogAccessConfig,
}

impl ReversePaginator {
    pub fn new(source: Arc<dyn LogSource>, guard: PathGuard, config: LogAccessConfig) -> Self {
        Self {
            source,
            guard,
            config,
        }
    }

    pub const fn config(&self) -> &LogAccessConfig {
        &self.config
    }

    pub const fn guard(&self) -> &PathGuard {
        &self.guard
    }

    /// Read one page, degrading to an exhausted page on any failure.
    ///
    /// * `cursor` - `None` or a negative value starts at the end of the file.
    /// * `lines_per_page` - `None` uses the configured default; zero or
    ///   negative values yield an empty exhausted page.
    pub async fn read_page(
        &self,
        path: &str,
        cursor: Option<i64>,
        lines_per_page: Option<i64>,
    ) -> LogPage {
        let requested = lines_per_page.unwrap_or_else(|| self.default_page_size());
        match self.try_read_page(path, cursor, requested).await {
            Ok(page) => page,
            Err(e) => {
                warn!(path, cursor, lines_per_page = requested, error = %e, "Log page read failed");
                LogPage::exhausted(self.config.default_lines_per_page)
            }
        }
    }

    /// Read one page, surfacing validation and I/O errors.
    pub async fn try_read_page(
        &self,
        path: &str,
        cursor: Option<i64>,
        lines_per_page: i64,
    ) -> Result<LogPage, LogAccessError> {
        let lines = usize::try_from(lines_per_page)
            .ok()
            .filter(|n| *n > 0)
            .ok_or(LogAccessError::InvalidPageSize(lines_per_page))?;
        let resolved = self.guard.resolve_file(path).await?;
        self.read_window(&resolved, cursor, lines).await
    }

    fn default_page_size(&self) -> i64 {
        i64::try_from(self.config.default_lines_per_page).unwrap_or(i64::MAX)
    }

    async fn read_window(
        &self,
        path: &Path,
        cursor: Option<i64>,
        lines: usize,
    ) -> Result<LogPage, LogAccessError> {
        let size = self
            .source
            .size(path)
            .await
            .map_err(|e| LogAccessError::io(path, e))?;

        // A cursor past EOF means the file was truncated since it was issued.
        let end = match cursor {
            Some(c) if c >= 0 => u64::try_from(c).unwrap_or(0).min(size),
            _ => size,
        };
        if end == 0 {
            return Ok(LogPage::exhausted(lines));
        }

        let max_window = self.config.max_page_window_bytes.max(1);
        let mut window = self.config.page_window(lines as u64);

        loop {
            let start = end.saturating_sub(window);
            // One look-behind byte tells whether `start` sits on a line boundary.
            let read_from = start.saturating_sub(1);
            let buf = self
                .source
                .read_range(path, read_from, end)
                .await
                .map_err(|e| LogAccessError::io(path, e))?;

            let read_end = read_from + buf.len() as u64;
            let short_read = read_end < end;
            if short_read {
                debug!(path = %path.display(), expected_end = end, read_end, "File shrank during page read");
            }

            let raw = split_lines(&buf, start > 0);
            if raw.is_empty() && start > 0 {
                if short_read {
                    return Ok(LogPage {
                        lines: Vec::new(),
                        next_cursor: to_cursor(start),
                        lines_per_page: lines,
                    });
                }
                if window < max_window {
                    window = window.saturating_mul(2).min(max_window);
                    continue;
                }
                // A single line longer than the largest window: deliver its tail.
                let offset = usize::try_from(start - read_from).unwrap_or(0).min(buf.len());
                warn!(
                    path = %path.display(),
                    max_window,
                    "Line exceeds the maximum page window; returning a truncated fragment"
                );
                let fragment = split_lines(&buf[offset..], false)
                    .first()
                    .map(RawLine::to_text)
                    .unwrap_or_default();
                return Ok(LogPage {
                    lines: vec![fragment],
                    next_cursor: to_cursor(start),
                    lines_per_page: lines,
                });
            }

            let kept = &raw[raw.len().saturating_sub(lines)..];
            let delivered: u64 = kept.iter().map(RawLine::span).sum();
            let next_cursor = to_cursor(read_end.saturating_sub(delivered));

            debug!(
                path = %path.display(),
                end,
                window,
                returned = kept.len(),
                next_cursor,
                "Read log page"
            );

            return Ok(LogPage {
                lines: kept.iter().map(RawLine::to_text).collect(),
                next_cursor,
                lines_per_page: lines,
            });
        }
    }
}
