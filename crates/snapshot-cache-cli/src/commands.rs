//! Subcommands operating on one snapshot file

use crate::error::Result;
use clap::Subcommand;
use snapshot_cache_store::CacheStore;
use std::io::Write;
use std::path::{Path, PathBuf};
use tokio::io::AsyncReadExt;
use tracing::info;

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// List every id with its payload size in bytes
    List,
    /// Write the payload for an id to stdout
    Get { id: String },
    /// Store a payload read from a file (or stdin) and save the snapshot
    Put {
        id: String,
        /// Read the payload from this file instead of stdin
        #[arg(long, value_name = "PATH")]
        file: Option<PathBuf>,
    },
    /// Remove an id and save the snapshot
    Delete { id: String },
    /// Print entry count and total payload bytes as JSON
    Stats,
}

/// Load the store, treating a missing snapshot as empty.
///
/// Unreadable or malformed snapshots are errors so they never get
/// overwritten by a later save.
pub async fn load_store(snapshot_path: &Path) -> Result<CacheStore> {
    let mut store = CacheStore::new(snapshot_path);
    match store.load().await.map(|_| ()) {
        Ok(()) => {}
        Err(e) if e.is_missing_snapshot() => {
            info!(path = ?snapshot_path, "No snapshot found, starting empty");
        }
        Err(e) => return Err(e.into()),
    }
    Ok(store)
}

pub async fn run(command: &Command, store: &mut CacheStore, out: &mut dyn Write) -> Result<()> {
    match command {
        Command::List => {
            let mut ids: Vec<&str> = store.ids().collect();
            ids.sort_unstable();
            for id in ids {
                let size = store.retrieve(id)?.len();
                writeln!(out, "{}\t{}", id, size)?;
            }
        }
        Command::Get { id } => {
            out.write_all(store.retrieve(id)?)?;
        }
        Command::Put { id, file } => {
            let payload = match file {
                Some(path) => tokio::fs::read(path).await?,
                None => {
                    let mut buf = Vec::new();
                    tokio::io::stdin().read_to_end(&mut buf).await?;
                    buf
                }
            };
            info!(id = %id, bytes = payload.len(), "Storing payload");
            store.insert(id.as_str(), payload);
            store.save().await?;
        }
        Command::Delete { id } => {
            store.delete(id);
            store.save().await?;
        }
        Command::Stats => {
            let stats = store.stats();
            writeln!(out, "{}", serde_json::to_string(&stats)?)?;
        }
    }
    out.flush()?;
    Ok(())
}
