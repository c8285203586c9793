//! In-memory key-value cache with whole-file snapshot persistence
//!
//! Payloads are opaque bytes keyed by string identifiers. Mutations stay in
//! memory until the caller explicitly saves; a saved snapshot can be loaded
//! back after a restart.

mod error;
pub mod payload;
pub mod snapshot;
mod store;
mod types;

pub use error::{LoadFailure, Result, SaveFailure, StoreError};
pub use payload::{decode_json, encode_json, PayloadError};
pub use store::CacheStore;
pub use types::StoreStats;
