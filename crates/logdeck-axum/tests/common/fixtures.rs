//! Test fixtures: temp log files and a context wired without OS watchers.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use logdeck_axum::{AxumContext, build_context};
use logdeck_core::ports::{ChangeWatcher, FileChange, WatchError, WatchSubscription};
use logdeck_core::{
    AnsiHtmlConverter, AppLogPaths, FsLogSource, LogAccessConfig, LogServiceDeps,
    StaticProcessCatalog,
};
use tokio::sync::mpsc;

/// Watcher whose subscriptions stay open but never fire.
pub struct SilentWatcher;

impl ChangeWatcher for SilentWatcher {
    fn subscribe(&self, _path: &Path) -> Result<WatchSubscription, WatchError> {
        let (tx, rx) = mpsc::channel::<FileChange>(1);
        // Holding the sender keeps the channel open for the session's lifetime.
        Ok(WatchSubscription::new(rx, tx))
    }
}

pub fn write_log(dir: &Path, name: &str, content: &[u8]) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, content).unwrap();
    path
}

pub fn app(name: &str, out: &Path, err: &Path) -> AppLogPaths {
    AppLogPaths {
        name: name.to_string(),
        out_log_path: out.to_path_buf(),
        err_log_path: err.to_path_buf(),
    }
}

/// Config matching the `a..e` example: two bytes per line estimate.
// Allow unused: only the route tests page with a small window
#[allow(dead_code)]
pub fn small_window_config() -> LogAccessConfig {
    LogAccessConfig {
        average_line_bytes: 2,
        ..LogAccessConfig::default()
    }
}

pub fn context(
    apps: Vec<AppLogPaths>,
    log_root: Option<&Path>,
    config: LogAccessConfig,
) -> AxumContext {
    let deps = LogServiceDeps {
        source: Arc::new(FsLogSource::new()),
        watcher: Arc::new(SilentWatcher),
        markup: Arc::new(AnsiHtmlConverter::new().unwrap()),
        config,
    };
    build_context(deps, Arc::new(StaticProcessCatalog::new(apps)), log_root).unwrap()
}
