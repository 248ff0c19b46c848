//! Durable key-value persistence for fable widget state.
//!
//! The widget persists its tab assignments through a small string-keyed store,
//! modelled on browser local storage. One trait forms the core API:
//!
//! - [`KeyValueStore`]: `get`/`set` of UTF-8 strings under flat keys
//!
//! # Implementations
//!
//! - [`NullStore`]: No-op implementation (always absent, writes discarded)
//! - [`MemoryStore`]: In-process map, used by tests and one-shot CLI runs
//! - [`FileStore`]: One file per key inside a state directory
//!
//! Typed access goes through [`KeyValueStoreExt`].
//!
//! # Example
//!
//! ```
//! use fable_store::{KeyValueStore, MemoryStore};
//!
//! let store = MemoryStore::new();
//! store.set("multilingual-widget-demo", "{}").unwrap();
//! assert_eq!(store.get("multilingual-widget-demo").unwrap().as_deref(), Some("{}"));
//! ```

mod ext;
mod file;
mod memory;

use std::path::PathBuf;

pub use ext::KeyValueStoreExt;
pub use file::FileStore;
pub use memory::MemoryStore;

/// Error raised by a [`KeyValueStore`] backend.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Key cannot be mapped onto the backend (empty, or contains separators).
    #[error("invalid store key: {0:?}")]
    InvalidKey(String),
    /// I/O error while reading or writing an entry.
    #[error("I/O error for {}: {source}", .path.display())]
    Io {
        /// Entry path on disk.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },
    /// Stored value could not be decoded or encoded as JSON.
    #[error("malformed stored value for {key}: {source}")]
    Json {
        /// Store key.
        key: String,
        /// Underlying serde error.
        #[source]
        source: serde_json::Error,
    },
}

/// String-keyed durable store.
///
/// Mirrors the browser storage contract: `get` returns the last value written
/// under a key or `None` when absent, `set` overwrites unconditionally.
/// Implementations must make a completed `set` visible to the next `get`.
pub trait KeyValueStore: Send + Sync {
    /// Read the value stored under `key`.
    ///
    /// Returns `Ok(None)` when nothing has been stored yet.
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// Store `value` under `key`, replacing any previous value.
    fn set(&self, key: &str, value: &str) -> Result<(), StoreError>;
}

/// No-op [`KeyValueStore`].
///
/// Every `get` returns `None`; every `set` is silently discarded.
/// Use when persistence is disabled.
#[derive(Debug, Default)]
pub struct NullStore;

impl KeyValueStore for NullStore {
    fn get(&self, _key: &str) -> Result<Option<String>, StoreError> {
        Ok(None)
    }

    fn set(&self, _key: &str, _value: &str) -> Result<(), StoreError> {
        Ok(())
    }
}
