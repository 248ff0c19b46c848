//! Mock document source for testing.
//!
//! Provides [`MockSource`] for unit testing without filesystem or network access.

use std::collections::HashMap;
use std::sync::RwLock;
use std::time::Duration;

use crate::source::{DocumentSource, ErrorStatus, StorageError, StorageErrorKind};

/// Mock document source for testing.
///
/// Stores documents in memory and records every path it is asked for. Use the
/// builder methods to configure it with test data.
///
/// # Example
///
/// ```ignore
/// use fable_storage::{DocumentSource, MockSource};
///
/// let source = MockSource::new().with_document("fr.md", "# Actéon");
/// assert_eq!(source.read("fr.md").unwrap(), "# Actéon");
/// assert_eq!(source.reads(), vec!["fr.md".to_owned()]);
/// ```
#[derive(Debug)]
pub struct MockSource {
    name: &'static str,
    documents: RwLock<HashMap<String, String>>,
    failures: RwLock<HashMap<String, StorageErrorKind>>,
    reads: RwLock<Vec<String>>,
    delay: Option<Duration>,
}

impl Default for MockSource {
    fn default() -> Self {
        Self {
            name: "Mock",
            documents: RwLock::new(HashMap::new()),
            failures: RwLock::new(HashMap::new()),
            reads: RwLock::new(Vec::new()),
            delay: None,
        }
    }
}

impl MockSource {
    /// Create a new empty mock source.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Override the backend name reported by [`DocumentSource::name`].
    #[must_use]
    pub fn named(mut self, name: &'static str) -> Self {
        self.name = name;
        self
    }

    /// Add a document at a content path.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    #[must_use]
    pub fn with_document(self, path: impl Into<String>, content: impl Into<String>) -> Self {
        self.documents
            .write()
            .unwrap()
            .insert(path.into(), content.into());
        self
    }

    /// Make reads of `path` fail with `kind`.
    ///
    /// `Unavailable` and `Timeout` failures are reported as transient.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    #[must_use]
    pub fn with_failure(self, path: impl Into<String>, kind: StorageErrorKind) -> Self {
        self.failures.write().unwrap().insert(path.into(), kind);
        self
    }

    /// Sleep for `delay` on every read, to keep a read in flight.
    #[must_use]
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Insert or replace a document after construction.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    pub fn insert(&self, path: impl Into<String>, content: impl Into<String>) {
        self.documents
            .write()
            .unwrap()
            .insert(path.into(), content.into());
    }

    /// Every path read so far, in order.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    pub fn reads(&self) -> Vec<String> {
        self.reads.read().unwrap().clone()
    }

    /// Number of reads so far.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    pub fn read_count(&self) -> usize {
        self.reads.read().unwrap().len()
    }
}

impl DocumentSource for MockSource {
    fn name(&self) -> &'static str {
        self.name
    }

    fn read(&self, path: &str) -> Result<String, StorageError> {
        self.reads.write().unwrap().push(path.to_owned());

        if let Some(delay) = self.delay {
            std::thread::sleep(delay);
        }

        if let Some(kind) = self.failures.read().unwrap().get(path).copied() {
            let status = match kind {
                StorageErrorKind::Unavailable | StorageErrorKind::Timeout => {
                    ErrorStatus::Temporary
                }
                _ => ErrorStatus::Permanent,
            };
            return Err(StorageError::new(kind)
                .with_status(status)
                .with_location(path)
                .with_backend(self.name));
        }

        self.documents
            .read()
            .unwrap()
            .get(path)
            .cloned()
            .ok_or_else(|| StorageError::not_found(path).with_backend(self.name))
    }
}
