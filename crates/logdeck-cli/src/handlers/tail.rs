//! Tail command handler.

use std::io::{self, Write};

use anyhow::Result;
use futures_util::StreamExt;
use logdeck_core::{TailEvent, TailMode};
use tracing::info;

use crate::bootstrap::CliContext;
use crate::error::CliError;

/// Execute the tail command.
///
/// Prints the priming window, then either a change notice per heartbeat or,
/// with `follow`, the appended lines. Runs until Ctrl+C or until the file
/// is removed.
pub async fn execute(ctx: &CliContext, path: &str, follow: bool) -> Result<()> {
    let logs = if follow {
        ctx.logs_with(|config| config.tail_mode = TailMode::Follow)
    } else {
        ctx.logs()
    };

    let mut session = logs.open_tail(path).await.map_err(CliError::from)?;
    info!(session = %session.id(), path, follow, "Tailing log file");

    loop {
        tokio::select! {
            event = session.next() => {
                let Some(event) = event else {
                    eprintln!("-- {path} is gone; stopping --");
                    break;
                };
                render_event(&event, follow, &mut io::stdout().lock())?;
            }
            _ = tokio::signal::ctrl_c() => break,
        }
    }
    Ok(())
}

/// Print one event. In follow mode heartbeats carry no news and are skipped.
pub fn render_event(event: &TailEvent, follow: bool, out: &mut impl Write) -> io::Result<()> {
    match event {
        TailEvent::Line(line) => writeln!(out, "{line}")?,
        TailEvent::Heartbeat if !follow => writeln!(out, "-- file changed --")?,
        TailEvent::Heartbeat => return Ok(()),
    }
    out.flush()
}
