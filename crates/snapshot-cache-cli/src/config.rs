use std::env;
use std::path::PathBuf;

const DEFAULT_SNAPSHOT_PATH: &str = "./cache/snapshot.json";

/// CLI configuration parsed from environment variables
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CliConfig {
    pub snapshot_path: PathBuf,
    pub log_json: bool,
}

impl CliConfig {
    /// Parse configuration from environment variables
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let snapshot_path = lookup("SNAPSHOT_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_SNAPSHOT_PATH));

        // Use JSON format for GCP Cloud Logging when LOG_FORMAT=json
        let log_json = lookup("LOG_FORMAT").map(|v| v == "json").unwrap_or(false);

        Self {
            snapshot_path,
            log_json,
        }
    }

    /// Apply a `--snapshot` override from the command line
    pub fn with_snapshot_override(mut self, snapshot: Option<PathBuf>) -> Self {
        if let Some(path) = snapshot {
            self.snapshot_path = path;
        }
        self
    }
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            snapshot_path: PathBuf::from(DEFAULT_SNAPSHOT_PATH),
            log_json: false,
        }
    }
}
