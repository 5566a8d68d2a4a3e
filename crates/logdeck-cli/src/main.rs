//! CLI entry point - the composition root.
//!
//! Loads `.env`, parses arguments, initialises logging and dispatches to
//! the command handlers. Failures are printed and mapped to an exit code.

use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use logdeck_cli::handlers::page::PageOutput;
use logdeck_cli::handlers::web::WebOverrides;
use logdeck_cli::{Cli, CliConfig, CliError, Commands, bootstrap, handlers};

#[tokio::main]
async fn main() -> ExitCode {
    // Load environment variables before clap reads its `env` fallbacks
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    // Logs go to stderr so page output stays pipeable
    let default_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e:#}");
            let code = e.downcast_ref::<CliError>().map_or(1, CliError::exit_code);
            ExitCode::from(code)
        }
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let Some(command) = cli.command else {
        // No command provided - show help
        use clap::CommandFactory;
        Cli::command().print_help()?;
        return Ok(());
    };

    // Bootstrap the CLI context (composition root)
    let ctx = bootstrap(&CliConfig::new(cli.config))?;

    match command {
        Commands::Web {
            host,
            port,
            log_root,
        } => {
            handlers::web::execute(
                ctx.dashboard,
                WebOverrides {
                    host,
                    port,
                    log_root,
                },
            )
            .await?;
        }
        Commands::Page {
            path,
            cursor,
            lines,
            markup,
            json,
        } => {
            let output = if json {
                PageOutput::Json
            } else if markup {
                PageOutput::Markup
            } else {
                PageOutput::Plain
            };
            handlers::page::execute(&ctx, &path, cursor, lines, output).await?;
        }
        Commands::Tail { path, follow } => {
            handlers::tail::execute(&ctx, &path, follow).await?;
        }
        Commands::Apps => {
            handlers::apps::execute(&ctx).await?;
        }
    }

    Ok(())
}
