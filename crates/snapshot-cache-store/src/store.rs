//! In-memory payload store with whole-file snapshot persistence

use crate::error::{LoadFailure, Result, SaveFailure, StoreError};
use crate::snapshot;
use crate::types::StoreStats;
use std::collections::HashMap;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tracing::{debug, info, warn};

/// A cache of opaque payloads keyed by identifier, persisted only on `save`
///
/// Mutations are in-memory and take `&mut self`. Share a store between tasks
/// by wrapping it in a mutex.
#[derive(Debug)]
pub struct CacheStore {
    /// Identifier -> payload, the source of truth for reads
    entries: HashMap<String, Vec<u8>>,
    /// File holding the last saved snapshot
    snapshot_path: PathBuf,
}

impl CacheStore {
    /// Create an empty store bound to a snapshot location. Performs no I/O.
    pub fn new<P: Into<PathBuf>>(snapshot_path: P) -> Self {
        Self {
            entries: HashMap::new(),
            snapshot_path: snapshot_path.into(),
        }
    }

    /// Create a store and hydrate it from its snapshot if one can be loaded.
    ///
    /// A failed load leaves the store empty; the failure is logged rather
    /// than returned. Use `new` followed by `load` to handle it yourself.
    pub async fn open<P: Into<PathBuf>>(snapshot_path: P) -> Self {
        let mut store = Self::new(snapshot_path);
        if let Err(e) = store.load().await.map(|_| ()) {
            if e.is_missing_snapshot() {
                debug!(path = ?store.snapshot_path, "No snapshot yet, starting empty");
            } else {
                warn!(path = ?store.snapshot_path, error = %e, "Failed to load snapshot, starting empty");
            }
        }
        store
    }

    /// Replace the in-memory mapping with the contents of the snapshot.
    ///
    /// On any failure the current mapping is left as it was.
    pub async fn load(&mut self) -> Result<&HashMap<String, Vec<u8>>> {
        let bytes = match fs::read(&self.snapshot_path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                return Err(LoadFailure::Missing(self.snapshot_path.clone()).into());
            }
            Err(e) => {
                return Err(LoadFailure::Unreadable {
                    path: self.snapshot_path.clone(),
                    source: Box::new(e),
                }
                .into());
            }
        };

        let entries = snapshot::decode(&bytes).map_err(|reason| LoadFailure::Malformed {
            path: self.snapshot_path.clone(),
            reason,
        })?;

        info!(path = ?self.snapshot_path, entries = entries.len(), "Snapshot loaded");
        self.entries = entries;
        Ok(&self.entries)
    }

    /// Write the full mapping to the snapshot location.
    ///
    /// The snapshot is written to a sibling temp file and renamed into place,
    /// so a later `load` sees either the previous snapshot or this one.
    pub async fn save(&self) -> Result<()> {
        let bytes = snapshot::encode(&self.entries).map_err(SaveFailure::Encode)?;
        let tmp = tmp_path(&self.snapshot_path);

        if let Err(e) = write_and_rename(&tmp, &self.snapshot_path, &bytes).await {
            let _ = fs::remove_file(&tmp).await;
            return Err(SaveFailure::Write {
                path: self.snapshot_path.clone(),
                source: Box::new(e),
            }
            .into());
        }

        debug!(
            path = ?self.snapshot_path,
            entries = self.entries.len(),
            bytes = bytes.len(),
            "Snapshot saved"
        );
        Ok(())
    }

    /// Add or overwrite the payload for `id`. Not persisted until `save`.
    pub fn insert(&mut self, id: impl Into<String>, payload: impl Into<Vec<u8>>) {
        self.entries.insert(id.into(), payload.into());
    }

    pub fn retrieve(&self, id: &str) -> Result<&[u8]> {
        self.entries
            .get(id)
            .map(Vec::as_slice)
            .ok_or_else(|| StoreError::NotFound(id.to_string()))
    }

    /// Remove the entry for `id`. Removing an absent id is a no-op.
    pub fn delete(&mut self, id: &str) {
        if self.entries.remove(id).is_some() {
            debug!(id, "Deleted entry");
        }
    }

    pub fn contains(&self, id: &str) -> bool {
        self.entries.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn entries(&self) -> &HashMap<String, Vec<u8>> {
        &self.entries
    }

    pub fn snapshot_path(&self) -> &Path {
        &self.snapshot_path
    }

    pub fn stats(&self) -> StoreStats {
        StoreStats {
            entries: self.entries.len(),
            total_bytes: self.entries.values().map(|p| p.len() as u64).sum(),
        }
    }
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut tmp = path.as_os_str().to_owned();
    tmp.push(".tmp");
    PathBuf::from(tmp)
}

async fn write_and_rename(tmp: &Path, path: &Path, bytes: &[u8]) -> std::io::Result<()> {
    let mut file = fs::File::create(tmp).await?;
    file.write_all(bytes).await?;
    file.sync_all().await?;
    drop(file);
    fs::rename(tmp, path).await
}
