//! Main CLI parser and top-level argument handling.
//!
//! This module defines the root CLI structure with global options.

use std::path::PathBuf;

use clap::Parser;

use crate::commands::Commands;

/// Browse and follow the logs of supervised processes.
#[derive(Parser)]
#[command(name = "logdeck")]
#[command(about = "Browse and live-tail process logs")]
#[command(version)]
pub struct Cli {
    /// Configuration file (defaults to `<config dir>/logdeck/config.json`)
    #[arg(long, global = true, env = "LOGDECK_CONFIG")]
    pub config: Option<PathBuf>,

    /// Enable verbose/debug output
    #[arg(short = 'v', long = "verbose", global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}
