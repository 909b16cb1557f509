//! Command-line interface for tictac.

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tictac_history::DEFAULT_SERVER_URL;

/// Tic-tac-toe with a persisted match history
#[derive(Parser, Debug)]
#[command(name = "tictac")]
#[command(about = "Tic-tac-toe match history server and terminal client", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run the match history HTTP server
    Serve {
        /// Path to a TOML config file
        #[arg(short, long, default_value = "tictac.toml")]
        config: PathBuf,

        /// Host to bind to (overrides config)
        #[arg(long)]
        host: Option<String>,

        /// Port to bind to (overrides config and PORT)
        #[arg(short, long)]
        port: Option<u16>,

        /// SQLite database file (overrides config and DATABASE_URL)
        #[arg(long)]
        database: Option<String>,
    },

    /// Play a two-player game in the terminal
    Play {
        /// History server to report results to
        #[arg(long, default_value = DEFAULT_SERVER_URL)]
        server_url: String,

        /// Do not report results
        #[arg(long)]
        offline: bool,
    },

    /// Inspect or prune the match history on a server
    History {
        /// History server URL
        #[arg(long, default_value = DEFAULT_SERVER_URL)]
        server_url: String,

        /// Action to perform
        #[command(subcommand)]
        action: HistoryAction,
    },
}

/// Match history actions
#[derive(Subcommand, Debug)]
pub enum HistoryAction {
    /// Show the most recent games
    List,

    /// Delete games by id
    Delete {
        /// Record ids
        #[arg(required = true)]
        ids: Vec<i32>,
    },
}
