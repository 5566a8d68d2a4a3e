//! Axum server bootstrap - the composition root.
//!
//! This module is the ONLY place where infrastructure is wired together
//! for the Axum web adapter. All concrete implementations are instantiated here.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use logdeck_core::ports::{ChangeWatcher, LogSource, MarkupConverter, ProcessCatalog};
use logdeck_core::{
    AnsiHtmlConverter, DashboardConfig, FsLogSource, LogService, LogServiceDeps, PathGuard,
    PathGuardError, StaticProcessCatalog, validate_directory,
};
use logdeck_runtime::NotifyChangeWatcher;
use tracing::info;

/// CORS configuration for the web server.
#[derive(Debug, Clone, Default)]
pub enum CorsConfig {
    /// Allow all origins (development mode).
    #[default]
    AllowAll,
    /// Allow specific origins (production mode).
    AllowOrigins(Vec<String>),
}

/// Server configuration for the Axum adapter.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Interface to bind.
    pub host: String,
    /// Port for the HTTP server.
    pub port: u16,
    /// Log engine tuning and the configured apps.
    pub dashboard: DashboardConfig,
    /// CORS configuration.
    pub cors: CorsConfig,
}

impl ServerConfig {
    /// Create config from the built-in defaults.
    pub fn with_defaults() -> Self {
        Self::from_dashboard(DashboardConfig::default())
    }

    /// Take host and port from the `server` section of a loaded config.
    pub fn from_dashboard(dashboard: DashboardConfig) -> Self {
        Self {
            host: dashboard.server.host.clone(),
            port: dashboard.server.port,
            dashboard,
            cors: CorsConfig::default(),
        }
    }

    /// Restrict the arbitrary-path endpoints to files under `root`.
    #[must_use]
    pub fn with_log_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.dashboard.logs.log_root = Some(root.into());
        self
    }

    /// Set CORS to allow specific origins.
    #[must_use]
    pub fn with_allowed_origins(mut self, origins: Vec<String>) -> Self {
        self.cors = CorsConfig::AllowOrigins(origins);
        self
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Application context for the Axum adapter.
pub struct AxumContext {
    /// Lookup of supervised apps and their log files.
    pub catalog: Arc<dyn ProcessCatalog>,
    /// Log access for catalog-provided paths.
    pub app_logs: LogService,
    /// Log access for client-supplied paths, confined to the log root.
    /// `None` when no log root is configured.
    pub file_logs: Option<LogService>,
}

/// Wire a context from already-constructed collaborators.
///
/// `log_root`, when given, must be an existing directory; it becomes the
/// allowed base for the arbitrary-path endpoints.
pub fn build_context(
    deps: LogServiceDeps,
    catalog: Arc<dyn ProcessCatalog>,
    log_root: Option<&Path>,
) -> Result<AxumContext, PathGuardError> {
    let file_logs = match log_root {
        Some(root) => {
            let root = validate_directory(&root.to_string_lossy(), None)?;
            info!(log_root = %root.display(), "Arbitrary-path log endpoints enabled");
            Some(LogService::new(deps.clone(), PathGuard::within(root)))
        }
        None => None,
    };

    Ok(AxumContext {
        catalog,
        app_logs: LogService::new(deps, PathGuard::unrestricted()),
        file_logs,
    })
}

/// Bootstrap the Axum server with all services.
pub fn bootstrap(config: &ServerConfig) -> Result<AxumContext> {
    let dashboard = &config.dashboard;
    dashboard.validate()?;

    let markup: Arc<dyn MarkupConverter> =
        Arc::new(AnsiHtmlConverter::new().context("Failed to build ANSI converter")?);
    let source: Arc<dyn LogSource> = Arc::new(FsLogSource::new());
    let watcher: Arc<dyn ChangeWatcher> =
        Arc::new(NotifyChangeWatcher::new(dashboard.logs.change_buffer));
    let catalog: Arc<dyn ProcessCatalog> =
        Arc::new(StaticProcessCatalog::new(dashboard.apps.clone()));

    info!(
        target: "logdeck.bootstrap",
        apps = dashboard.apps.len(),
        tail_mode = ?dashboard.logs.tail_mode,
        default_lines_per_page = dashboard.logs.default_lines_per_page,
        "Axum bootstrap complete"
    );

    let deps = LogServiceDeps {
        source,
        watcher,
        markup,
        config: dashboard.logs.clone(),
    };
    let ctx = build_context(deps, catalog, dashboard.logs.log_root.as_deref())
        .context("Invalid log root")?;
    Ok(ctx)
}

/// Start the web server and serve until the process is stopped.
pub async fn start_server(config: ServerConfig) -> Result<()> {
    use tokio::net::TcpListener;

    let ctx = bootstrap(&config)?;
    let app = crate::routes::create_router(ctx, &config.cors);

    let addr = config.bind_addr();
    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;

    info!("logdeck web server listening on http://{}", addr);

    axum::serve(listener, app).await?;
    Ok(())
}
