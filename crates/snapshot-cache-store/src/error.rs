//! Error types for the snapshot cache store

use std::fmt;
use std::path::PathBuf;

/// Why a snapshot could not be loaded
#[derive(Debug)]
pub enum LoadFailure {
    /// No file exists at the snapshot location
    Missing(PathBuf),
    /// The file exists but could not be read
    Unreadable {
        path: PathBuf,
        source: Box<std::io::Error>,
    },
    /// The file was read but does not decode into identifier -> payload
    Malformed { path: PathBuf, reason: String },
}

/// Why a snapshot could not be written
#[derive(Debug)]
pub enum SaveFailure {
    Encode(String),
    Write {
        path: PathBuf,
        source: Box<std::io::Error>,
    },
}

#[derive(Debug)]
pub enum StoreError {
    Load(LoadFailure),
    Save(SaveFailure),
    NotFound(String),
}

impl StoreError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, StoreError::NotFound(_))
    }

    pub fn is_load_failure(&self) -> bool {
        matches!(self, StoreError::Load(_))
    }

    pub fn is_save_failure(&self) -> bool {
        matches!(self, StoreError::Save(_))
    }

    /// True when a load failed only because no snapshot exists yet
    pub fn is_missing_snapshot(&self) -> bool {
        matches!(self, StoreError::Load(LoadFailure::Missing(_)))
    }
}

impl fmt::Display for LoadFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LoadFailure::Missing(path) => write!(f, "snapshot not found at {}", path.display()),
            LoadFailure::Unreadable { path, source } => {
                write!(f, "failed to read snapshot {}: {}", path.display(), source)
            }
            LoadFailure::Malformed { path, reason } => {
                write!(f, "malformed snapshot {}: {}", path.display(), reason)
            }
        }
    }
}

impl fmt::Display for SaveFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SaveFailure::Encode(msg) => write!(f, "failed to encode snapshot: {}", msg),
            SaveFailure::Write { path, source } => {
                write!(f, "failed to write snapshot {}: {}", path.display(), source)
            }
        }
    }
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreError::Load(err) => write!(f, "Load error: {}", err),
            StoreError::Save(err) => write!(f, "Save error: {}", err),
            StoreError::NotFound(id) => write!(f, "No entry for id: {}", id),
        }
    }
}

impl std::error::Error for LoadFailure {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            LoadFailure::Unreadable { source, .. } => Some(source.as_ref()),
            _ => None,
        }
    }
}

impl std::error::Error for SaveFailure {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SaveFailure::Write { source, .. } => Some(source.as_ref()),
            SaveFailure::Encode(_) => None,
        }
    }
}

impl std::error::Error for StoreError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            StoreError::Load(err) => Some(err),
            StoreError::Save(err) => Some(err),
            StoreError::NotFound(_) => None,
        }
    }
}

impl From<LoadFailure> for StoreError {
    fn from(err: LoadFailure) -> Self {
        StoreError::Load(err)
    }
}

impl From<SaveFailure> for StoreError {
    fn from(err: SaveFailure) -> Self {
        StoreError::Save(err)
    }
}

pub type Result<T> = std::result::Result<T, StoreError>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    #[test]
    fn test_not_found_display() {
        let err = StoreError::NotFound("rates1".to_string());
        assert_eq!(format!("{}", err), "No entry for id: rates1");
        assert!(err.is_not_found());
        assert!(err.source().is_none());
    }

    #[test]
    fn test_missing_snapshot_display() {
        let err: StoreError = LoadFailure::Missing(PathBuf::from("/tmp/cache.json")).into();
        assert_eq!(
            format!("{}", err),
            "Load error: snapshot not found at /tmp/cache.json"
        );
        assert!(err.is_load_failure());
        assert!(err.is_missing_snapshot());
    }

    #[test]
    fn test_malformed_is_not_missing() {
        let err: StoreError = LoadFailure::Malformed {
            path: PathBuf::from("cache.json"),
            reason: "expected value at line 1 column 1".to_string(),
        }
        .into();
        assert!(err.is_load_failure());
        assert!(!err.is_missing_snapshot());
        assert!(format!("{}", err).contains("expected value"));
    }

    #[test]
    fn test_write_failure_exposes_io_source() {
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err: StoreError = SaveFailure::Write {
            path: PathBuf::from("/readonly/cache.json"),
            source: Box::new(io),
        }
        .into();
        assert!(err.is_save_failure());

        let save = err.source().expect("save failure source");
        let io = save.source().expect("io source");
        assert_eq!(io.to_string(), "denied");
    }

    #[test]
    fn test_error_is_debug() {
        let err = StoreError::NotFound("x".to_string());
        let debug_str = format!("{:?}", err);
        assert!(debug_str.contains("NotFound"));
    }
}
