//! Store types

use serde::{Deserialize, Serialize};

/// Summary of the in-memory mapping
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreStats {
    pub entries: usize,
    pub total_bytes: u64,
}
