//! Snapshot cache CLI - inspect and edit a snapshot cache file
//!
//! Loads the snapshot named by `--snapshot` or `SNAPSHOT_PATH`, runs one
//! command against it, and saves again for commands that mutate.

mod commands;
mod config;
mod error;

use crate::commands::{load_store, run, Command};
use crate::config::CliConfig;
use crate::error::Result;
use clap::Parser;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::{prelude::*, EnvFilter};

#[derive(Parser, Debug)]
#[command(name = "snapshot-cache", about = "Inspect and edit a snapshot cache file")]
struct Args {
    /// Snapshot file to operate on (overrides SNAPSHOT_PATH)
    #[arg(long, value_name = "PATH")]
    snapshot: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    let config = CliConfig::from_env().with_snapshot_override(args.snapshot);

    // Initialize logging on stderr so payloads written to stdout stay clean
    let env_filter = EnvFilter::from_default_env()
        .add_directive("snapshot_cache_cli=info".parse()?)
        .add_directive("snapshot_cache_store=info".parse()?);

    if config.log_json {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(tracing_stackdriver::layer().with_writer(std::io::stderr))
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(env_filter)
            .with_writer(std::io::stderr)
            .init();
    };

    info!("Snapshot: {:?}", config.snapshot_path);

    let mut store = load_store(&config.snapshot_path).await?;
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    run(&args.command, &mut store, &mut out).await
}
