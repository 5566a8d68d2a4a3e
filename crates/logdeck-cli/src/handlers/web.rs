//! Web command handler.

use std::path::PathBuf;

use anyhow::Result;
use logdeck_axum::{ServerConfig, start_server};
use logdeck_core::DashboardConfig;

/// Command-line overrides for the `server` and `logs` config sections.
#[derive(Debug, Clone, Default)]
pub struct WebOverrides {
    pub host: Option<String>,
    pub port: Option<u16>,
    pub log_root: Option<PathBuf>,
}

/// Merge overrides into the loaded configuration.
pub fn server_config(mut dashboard: DashboardConfig, overrides: WebOverrides) -> ServerConfig {
    if let Some(host) = overrides.host {
        dashboard.server.host = host;
    }
    if let Some(port) = overrides.port {
        dashboard.server.port = port;
    }
    if let Some(root) = overrides.log_root {
        dashboard.logs.log_root = Some(root);
    }
    ServerConfig::from_dashboard(dashboard)
}

/// Execute the web command. Serves until the process is stopped.
pub async fn execute(dashboard: DashboardConfig, overrides: WebOverrides) -> Result<()> {
    let config = server_config(dashboard, overrides);

    println!();
    println!("  logdeck web server starting...");
    println!();
    println!("  API:     http://{}/api", config.bind_addr());
    if let Some(root) = &config.dashboard.logs.log_root {
        println!("  Files:   {}", root.display());
    }
    println!();
    println!("  Press Ctrl+C to stop");
    println!();

    start_server(config).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overrides_win_over_config() {
        let config = server_config(
            DashboardConfig::default(),
            WebOverrides {
                host: Some("0.0.0.0".to_string()),
                port: Some(8080),
                log_root: Some(PathBuf::from("/var/log")),
            },
        );
        assert_eq!(config.bind_addr(), "0.0.0.0:8080");
        assert_eq!(config.dashboard.logs.log_root, Some(PathBuf::from("/var/log")));
    }

    #[test]
    fn test_no_overrides_keeps_config() {
        let mut dashboard = DashboardConfig::default();
        dashboard.server.port = 7000;
        let config = server_config(dashboard, WebOverrides::default());
        assert_eq!(config.port, 7000);
        assert!(config.dashboard.logs.log_root.is_none());
    }
}
