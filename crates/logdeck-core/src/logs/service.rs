//! Log access facade shared by the HTTP and CLI adapters.

use std::sync::Arc;

use super::error::LogAccessError;
use super::page::LogPage;
use super::paginator::ReversePaginator;
use super::tail::{LiveTailStreamer, TailSession};
use crate::config::LogAccessConfig;
use crate::paths::PathGuard;
use crate::ports::{ChangeWatcher, LogSource, MarkupConverter};

/// Collaborators for a [`LogService`], constructed once at startup.
#[derive(Clone)]
pub struct LogServiceDeps {
    pub source: Arc<dyn LogSource>,
    pub watcher: Arc<dyn ChangeWatcher>,
    pub markup: Arc<dyn MarkupConverter>,
    pub config: LogAccessConfig,
}

/// Paginator and tail streamer bound to one [`PathGuard`].
///
/// Adapters typically hold two of these: one unrestricted for paths that
/// came from the process catalog, one restricted to the configured log root
/// for paths supplied by clients.
#[derive(Clone)]
pub struct LogService {
    paginator: Arc<ReversePaginator>,
    streamer: Arc<LiveTailStreamer>,
    markup: Arc<dyn MarkupConverter>,
}

impl LogService {
    pub fn new(deps: LogServiceDeps, guard: PathGuard) -> Self {
        let paginator = ReversePaginator::new(
            Arc::clone(&deps.source),
            guard.clone(),
            deps.config.clone(),
        );
        let streamer = LiveTailStreamer::new(
            deps.source,
            deps.watcher,
            Arc::clone(&deps.markup),
            guard,
            deps.config,
        );
        Self {
            paginator: Arc::new(paginator),
            streamer: Arc::new(streamer),
            markup: deps.markup,
        }
    }

    pub fn config(&self) -> &LogAccessConfig {
        self.paginator.config()
    }

    /// The path policy every read through this service is checked against.
    pub fn guard(&self) -> &PathGuard {
        self.paginator.guard()
    }

    /// Read one raw page (see [`ReversePaginator::read_page`]).
    pub async fn read_page(
        &self,
        path: &str,
        cursor: Option<i64>,
        lines_per_page: Option<i64>,
    ) -> LogPage {
        self.paginator.read_page(path, cursor, lines_per_page).await
    }

    /// Read one raw page, surfacing validation and I/O errors.
    pub async fn try_read_page(
        &self,
        path: &str,
        cursor: Option<i64>,
        lines_per_page: i64,
    ) -> Result<LogPage, LogAccessError> {
        self.paginator
            .try_read_page(path, cursor, lines_per_page)
            .await
    }

    /// Read one page with every line converted to markup.
    pub async fn read_markup_page(
        &self,
        path: &str,
        cursor: Option<i64>,
        lines_per_page: Option<i64>,
    ) -> LogPage {
        self.read_page(path, cursor, lines_per_page)
            .await
            .map_lines(|line| self.markup.to_markup(line))
    }

    pub async fn open_tail(&self, path: &str) -> Result<TailSession, LogAccessError> {
        self.streamer.open_tail(path).await
    }
}
