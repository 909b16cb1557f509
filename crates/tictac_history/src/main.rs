//! tictac - match history server and terminal client.

#![warn(missing_docs)]

mod cli;

use anyhow::Result;
use clap::Parser;
use cli::{Cli, Command, HistoryAction};
use tictac_history::{HistoryClient, MatchRecord, ServerConfig, run_hot_seat, run_server};
use tracing::{info, instrument};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    initialize_tracing();

    match cli.command {
        Command::Serve {
            config,
            host,
            port,
            database,
        } => serve(config, host, port, database).await,
        Command::Play {
            server_url,
            offline,
        } => {
            let client = (!offline).then(|| HistoryClient::new(server_url));
            run_hot_seat(client).await
        }
        Command::History { server_url, action } => {
            history(HistoryClient::new(server_url), action).await
        }
    }
}

/// Logs go to stderr so they never interleave with the game board.
fn initialize_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,tictac_history=debug")),
        )
        .with_writer(std::io::stderr)
        .init();
}

#[instrument(skip_all, fields(config_path = %config_path.display()))]
async fn serve(
    config_path: std::path::PathBuf,
    host: Option<String>,
    port: Option<u16>,
    database: Option<String>,
) -> Result<()> {
    let mut config = ServerConfig::load(Some(config_path.as_path()))?;
    if let Some(host) = host {
        config = config.with_host(host);
    }
    if let Some(port) = port {
        config = config.with_port(port);
    }
    if let Some(database) = database {
        config = config.with_database_url(database);
    }
    info!(?config, "Starting match history server");
    run_server(&config).await
}

#[instrument(skip(client))]
async fn history(client: HistoryClient, action: HistoryAction) -> Result<()> {
    match action {
        HistoryAction::List => {
            let records = client.list().await?;
            if records.is_empty() {
                println!("No matches played yet.");
            }
            for record in &records {
                println!("{}", describe(record));
            }
        }
        HistoryAction::Delete { ids } => {
            match ids.as_slice() {
                [id] => client.delete(*id).await?,
                ids => client.delete_many(ids).await?,
            }
            println!("Requested deletion of {} record(s).", ids.len());
        }
    }
    Ok(())
}

fn describe(record: &MatchRecord) -> String {
    let result = match record.winner().as_str() {
        "draw" => "Draw".to_string(),
        winner => format!("{} won", winner),
    };
    format!(
        "#{:<5} {:<6} {}",
        record.id(),
        result,
        record.created_at().format("%Y-%m-%d %H:%M:%S")
    )
}
