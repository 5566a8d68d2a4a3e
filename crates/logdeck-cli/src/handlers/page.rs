//! Page command handler.

use std::io::{self, Write};

use anyhow::Result;
use logdeck_core::LogPage;

use crate::bootstrap::CliContext;
use crate::error::CliError;

/// How the page is printed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageOutput {
    /// Raw lines, escape sequences intact.
    Plain,
    /// Lines converted to HTML markup.
    Markup,
    /// The page object as JSON.
    Json,
}

/// Execute the page command.
///
/// Unlike the HTTP endpoint, a bad path or page size is reported as an
/// error here instead of printing an empty page.
pub async fn execute(
    ctx: &CliContext,
    path: &str,
    cursor: Option<i64>,
    lines: Option<i64>,
    output: PageOutput,
) -> Result<()> {
    let logs = ctx.logs();
    let lines = lines.unwrap_or_else(|| {
        i64::try_from(logs.config().default_lines_per_page).unwrap_or(i64::MAX)
    });

    let page = logs
        .try_read_page(path, cursor, lines)
        .await
        .map_err(CliError::from)?;
    let page = match output {
        PageOutput::Markup => page.map_lines(|l| ctx.html.to_markup(l)),
        PageOutput::Plain | PageOutput::Json => page,
    };

    let mut out = io::stdout().lock();
    render(&page, output, &mut out)?;
    Ok(())
}

/// Print the page; the cursor footer goes to the same writer.
pub fn render(page: &LogPage, output: PageOutput, out: &mut impl Write) -> Result<()> {
    if output == PageOutput::Json {
        serde_json::to_writer_pretty(&mut *out, page)?;
        writeln!(out)?;
        return Ok(());
    }

    for line in &page.lines {
        writeln!(out, "{line}")?;
    }
    if page.is_exhausted() {
        writeln!(out, "-- beginning of file --")?;
    } else {
        writeln!(out, "-- older: --cursor {} --", page.next_cursor)?;
    }
    Ok(())
}
