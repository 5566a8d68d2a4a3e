//! Apps command handler.

use std::io::{self, Write};

use anyhow::Result;
use logdeck_core::AppLogPaths;

use crate::bootstrap::CliContext;

/// Execute the apps command.
pub async fn execute(ctx: &CliContext) -> Result<()> {
    let apps = ctx.catalog.list().await;
    let mut out = io::stdout().lock();
    render(&apps, &mut out)?;
    Ok(())
}

/// Print one row per app, or a hint when none are configured.
pub fn render(apps: &[AppLogPaths], out: &mut impl Write) -> io::Result<()> {
    if apps.is_empty() {
        writeln!(out, "No apps configured.")?;
        writeln!(out, "Add entries to the \"apps\" section of the config file.")?;
        return Ok(());
    }

    let width = apps.iter().map(|a| a.name.len()).max().unwrap_or(0).max(4);
    writeln!(out, "{:<width$}  {:<6}  PATH", "NAME", "STREAM")?;
    for app in apps {
        writeln!(out, "{:<width$}  {:<6}  {}", app.name, "stdout", app.out_log_path.display())?;
        writeln!(out, "{:<width$}  {:<6}  {}", "", "stderr", app.err_log_path.display())?;
    }
    Ok(())
}
