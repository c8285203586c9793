//! Snapshot file format
//!
//! A snapshot is one JSON object mapping identifiers to base64-encoded
//! payloads. Keys are emitted in sorted order.

use base64::{engine::general_purpose::STANDARD, Engine as _};
use std::collections::{BTreeMap, HashMap};

/// Serialize a full mapping into snapshot bytes
pub fn encode(entries: &HashMap<String, Vec<u8>>) -> Result<Vec<u8>, String> {
    let encoded: BTreeMap<&str, String> = entries
        .iter()
        .map(|(id, payload)| (id.as_str(), STANDARD.encode(payload)))
        .collect();

    serde_json::to_vec(&encoded).map_err(|e| e.to_string())
}

/// Parse snapshot bytes back into a mapping
pub fn decode(bytes: &[u8]) -> Result<HashMap<String, Vec<u8>>, String> {
    let raw: HashMap<String, String> = serde_json::from_slice(bytes).map_err(|e| e.to_string())?;

    raw.into_iter()
        .map(|(id, value)| match STANDARD.decode(value.as_bytes()) {
            Ok(payload) => Ok((id, payload)),
            Err(e) => Err(format!("invalid payload for {}: {}", id, e)),
        })
        .collect()
}
