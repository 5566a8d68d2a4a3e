//! CLI bootstrap - the composition root.
//!
//! This module is the ONLY place where infrastructure is wired together
//! for the terminal commands. `logdeck web` hands its configuration to
//! `logdeck-axum`, which has its own composition root.

use std::path::PathBuf;
use std::sync::Arc;

use logdeck_core::ports::{MarkupConverter, ProcessCatalog};
use logdeck_core::{
    AnsiHtmlConverter, DashboardConfig, FsLogSource, LogAccessConfig, LogService, LogServiceDeps,
    PassthroughMarkup, PathGuard, StaticProcessCatalog,
};
use logdeck_runtime::NotifyChangeWatcher;

use crate::error::CliError;

/// Bootstrap configuration for the CLI.
#[derive(Debug, Clone, Default)]
pub struct CliConfig {
    /// Explicit configuration file; `None` falls back to the default
    /// location, then to built-in defaults.
    pub config_path: Option<PathBuf>,
}

impl CliConfig {
    pub fn new(config_path: Option<PathBuf>) -> Self {
        Self { config_path }
    }
}

/// Fully composed application context for CLI commands.
pub struct CliContext {
    /// The loaded configuration.
    pub dashboard: DashboardConfig,
    /// Apps from the configuration file.
    pub catalog: Arc<dyn ProcessCatalog>,
    /// HTML converter for `page --markup`.
    pub html: Arc<dyn MarkupConverter>,
    deps: LogServiceDeps,
}

impl CliContext {
    /// A log service over any readable path with the configured settings.
    ///
    /// Terminal output keeps escape sequences, so lines pass through
    /// unconverted.
    pub fn logs(&self) -> LogService {
        LogService::new(self.deps.clone(), PathGuard::unrestricted())
    }

    /// Like [`logs`](Self::logs) with adjusted engine settings.
    pub fn logs_with(&self, adjust: impl FnOnce(&mut LogAccessConfig)) -> LogService {
        let mut deps = self.deps.clone();
        adjust(&mut deps.config);
        LogService::new(deps, PathGuard::unrestricted())
    }
}

/// Load configuration and wire the terminal log services.
pub fn bootstrap(config: &CliConfig) -> Result<CliContext, CliError> {
    let dashboard = DashboardConfig::load_or_default(config.config_path.as_deref())?;

    let html = AnsiHtmlConverter::new().map_err(|e| CliError::Config(e.to_string()))?;
    let deps = LogServiceDeps {
        source: Arc::new(FsLogSource::new()),
        watcher: Arc::new(NotifyChangeWatcher::new(dashboard.logs.change_buffer)),
        markup: Arc::new(PassthroughMarkup),
        config: dashboard.logs.clone(),
    };

    tracing::debug!(
        apps = dashboard.apps.len(),
        config = ?config.config_path,
        "CLI bootstrap complete"
    );

    Ok(CliContext {
        catalog: Arc::new(StaticProcessCatalog::new(dashboard.apps.clone())),
        html: Arc::new(html),
        deps,
        dashboard,
    })
}
