//! Subcommand definitions.

use std::path::PathBuf;

use clap::Subcommand;

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Serve the dashboard API over HTTP
    Web {
        /// Interface to bind (overrides the config file)
        #[arg(long, env = "LOGDECK_HOST")]
        host: Option<String>,
        /// Port to listen on (overrides the config file)
        #[arg(short, long, env = "LOGDECK_PORT")]
        port: Option<u16>,
        /// Directory that `/api/logs/*` requests may read from
        #[arg(long, env = "LOGDECK_LOG_ROOT")]
        log_root: Option<PathBuf>,
    },

    /// Print one page of a log file, newest lines last
    Page {
        /// Log file to read
        path: String,
        /// Cursor from a previous page; omit to start at the end of the file
        #[arg(long, allow_hyphen_values = true)]
        cursor: Option<i64>,
        /// Lines per page
        #[arg(short = 'n', long, allow_hyphen_values = true)]
        lines: Option<i64>,
        /// Convert ANSI colours to HTML markup
        #[arg(long)]
        markup: bool,
        /// Print the page as JSON instead of plain lines
        #[arg(long, conflicts_with = "markup")]
        json: bool,
    },

    /// Stream a log file to the terminal until interrupted
    Tail {
        /// Log file to follow
        path: String,
        /// Print appended lines instead of change notices
        #[arg(short, long)]
        follow: bool,
    },

    /// List the apps defined in the configuration file
    Apps,
}
