//! File-based store implementation.
//!
//! [`FileStore`] keeps each key in its own file under a state directory:
//!
//! ```text
//! {root}/
//! +-- multilingual-widget-acteon.json     # per-instance slot
//! +-- multilingual-widget-default.json    # global default slot
//! ```
//!
//! Writes go to a sibling temporary file first and are renamed into place, so
//! a crash mid-write leaves the previous value intact. The directory is created
//! lazily on the first write; reading from a missing directory is a miss.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::{KeyValueStore, StoreError};

/// Extension used for entry files.
const ENTRY_EXTENSION: &str = "json";

/// File-based [`KeyValueStore`] rooted at a directory on disk.
#[derive(Debug)]
pub struct FileStore {
    root: PathBuf,
}

impl FileStore {
    /// Create a store rooted at `root`.
    ///
    /// Nothing is touched on disk until the first `set`.
    #[must_use]
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }

    /// Root directory of this store.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Map a key onto its entry file, rejecting keys that would escape `root`.
    fn entry_path(&self, key: &str) -> Result<PathBuf, StoreError> {
        let invalid = key.is_empty()
            || key.starts_with('.')
            || key.contains(['/', '\\'])
            || key.contains("..");
        if invalid {
            return Err(StoreError::InvalidKey(key.to_owned()));
        }
        Ok(self.root.join(format!("{key}.{ENTRY_EXTENSION}")))
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        let path = self.entry_path(key)?;
        match fs::read_to_string(&path) {
            Ok(text) => Ok(Some(text)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(source) => Err(StoreError::Io { path, source }),
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        let path = self.entry_path(key)?;

        fs::create_dir_all(&self.root).map_err(|source| StoreError::Io {
            path: self.root.clone(),
            source,
        })?;

        let tmp = path.with_extension(format!("{ENTRY_EXTENSION}.tmp"));
        fs::write(&tmp, value).map_err(|source| StoreError::Io {
            path: tmp.clone(),
            source,
        })?;
        fs::rename(&tmp, &path).map_err(|source| StoreError::Io {
            path: path.clone(),
            source,
        })?;

        tracing::debug!(key, path = %path.display(), "stored entry");
        Ok(())
    }
}
