//! Boardpipe CLI entry point.
//!
//! This binary is the composition root for the system:
//!
//! 1. **Parse configuration** — load the pipe TOML file and validate it.
//! 2. **Wire observability** — configure `tracing-subscriber` with an env
//!    filter; all `tracing` events emitted by every crate flow through it.
//! 3. **Construct infrastructure** — build the [`trello::TrelloConnector`]
//!    and store the configured token pair via the authorization
//!    post-processing step.
//! 4. **Dispatch** — run `probe`, `discover`, or `fetch` against the
//!    [`connector::SourceConnector`] capability surface and render the run's
//!    terminal status.

mod config;
mod sink;

use std::path::PathBuf;

use anyhow::{bail, Context};
use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::EnvFilter;

use connector::{BoardId, RunStatus, SelectedBoard, SourceConnector};
use trello::{TrelloConfig, TrelloConnector};

use crate::config::PipeConfig;
use crate::sink::NdjsonSink;

#[derive(Parser)]
#[command(name = "boardpipe", about = "Stage Trello boards, lists, and cards as NDJSON records")]
struct Cli {
    /// Path to the pipe configuration file.
    #[arg(long, default_value = "boardpipe.toml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Verify that a client session can be bound from the stored credentials.
    Probe,
    /// List the boards the authenticated member can select from.
    Discover,
    /// Fetch one selected board and stage its records.
    Fetch {
        /// Identifier of the board to fetch.
        #[arg(long)]
        board_id: String,
        /// Display label of the board, used in status and error messages.
        #[arg(long)]
        board_label: String,
        /// Staging file for the normalised NDJSON records.
        #[arg(long, default_value = "records.ndjson")]
        out: PathBuf,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();
    let config = PipeConfig::load(&cli.config)?;

    let conn = TrelloConnector::new(TrelloConfig {
        app_key: config.app_key.clone(),
        include_all_boards: config.include_all_boards,
    });
    conn.complete_authorization(&config.access_token, &config.token_secret)?;

    match cli.command {
        Command::Probe => {
            render_status(RunStatus::from(conn.probe_connectivity()))?;
        }
        Command::Discover => {
            let descriptors = conn.discover().await?;
            println!("{}", serde_json::to_string_pretty(&descriptors)?);
        }
        Command::Fetch {
            board_id,
            board_label,
            out,
        } => {
            let selected = SelectedBoard {
                id: BoardId::new(board_id).context("board id must not be empty")?,
                label: board_label,
            };
            let mut sink = NdjsonSink::create(&out)?;
            let outcome = conn.fetch_board(&selected, &mut sink).await;
            let staged = sink.finish()?;
            info!(staged, staging_file = %out.display(), "run finished");
            render_status(RunStatus::from(outcome))?;
        }
    }

    Ok(())
}

/// Renders the tri-state completion status the way a host monitoring view
/// would: silence on plain success, the info message on detailed success, and
/// a non-zero exit on failure.
fn render_status(status: RunStatus) -> anyhow::Result<()> {
    match status {
        RunStatus::Completed => Ok(()),
        RunStatus::CompletedWithInfo { message } => {
            println!("{message}");
            Ok(())
        }
        RunStatus::Failed { message } => bail!(message),
    }
}
