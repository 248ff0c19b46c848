//! Document source trait and error types.
//!
//! Provides the core [`DocumentSource`] trait for reading raw documents,
//! along with [`StorageError`] for unified error handling across backends.
//!
//! # Path Convention
//!
//! All path parameters are **content paths** relative to the source root,
//! using `/` separators and no leading slash:
//! - `"fr/antoine-vincent-arnault/livre-1/acteon/fr.md"`
//! - `"en/fabulateurs-francais/antoine-vincent-arnault/livre-1/laigle-et-le-chapon/index.mdx"`
//!
//! Backends map content paths to their own addressing (file path, URL).

/// Semantic error categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum StorageErrorKind {
    /// Document does not exist.
    NotFound,
    /// Permission denied.
    PermissionDenied,
    /// Invalid content path.
    InvalidPath,
    /// Document exists but is not UTF-8 text.
    InvalidData,
    /// Backend is temporarily unavailable.
    Unavailable,
    /// Too many requests.
    RateLimited,
    /// Operation timed out.
    Timeout,
    /// Other/unknown error category.
    Other,
}

/// Retry guidance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ErrorStatus {
    /// Don't retry (not found, invalid path).
    #[default]
    Permanent,
    /// Retry immediately (timeout, connection reset).
    Temporary,
    /// Retry with backoff (rate limited, service unavailable).
    Persistent,
}

/// Storage error with semantic kind and backend-specific source.
#[derive(Debug)]
pub struct StorageError {
    /// Semantic error category.
    pub kind: StorageErrorKind,
    /// Retry guidance.
    pub status: ErrorStatus,
    /// Content path or URL (if applicable).
    pub location: Option<String>,
    /// Backend identifier (e.g., "Fs", "Http", "Mock").
    pub backend: Option<&'static str>,
    source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl StorageError {
    /// Create a new storage error.
    #[must_use]
    pub fn new(kind: StorageErrorKind) -> Self {
        Self {
            kind,
            status: ErrorStatus::Permanent,
            location: None,
            backend: None,
            source: None,
        }
    }

    /// Attach location context.
    #[must_use]
    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }

    /// Attach backend identifier.
    #[must_use]
    pub fn with_backend(mut self, backend: &'static str) -> Self {
        self.backend = Some(backend);
        self
    }

    /// Set retry status.
    #[must_use]
    pub fn with_status(mut self, status: ErrorStatus) -> Self {
        self.status = status;
        self
    }

    /// Attach the underlying error source.
    #[must_use]
    pub fn with_source(mut self, source: impl std::error::Error + Send + Sync + 'static) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    /// Downcast the source error to a concrete type.
    #[must_use]
    pub fn downcast_source<E: std::error::Error + 'static>(&self) -> Option<&E> {
        self.source.as_ref()?.downcast_ref()
    }

    /// Create a not found error with location.
    #[must_use]
    pub fn not_found(location: impl Into<String>) -> Self {
        Self::new(StorageErrorKind::NotFound).with_location(location)
    }

    /// True if retrying the same read may succeed.
    #[must_use]
    pub fn is_transient(&self) -> bool {
        self.status != ErrorStatus::Permanent
    }

    /// Create a storage error from an I/O error.
    #[must_use]
    pub fn io(err: std::io::Error, location: Option<String>) -> Self {
        let kind = match err.kind() {
            std::io::ErrorKind::NotFound => StorageErrorKind::NotFound,
            std::io::ErrorKind::PermissionDenied => StorageErrorKind::PermissionDenied,
            std::io::ErrorKind::InvalidData => StorageErrorKind::InvalidData,
            std::io::ErrorKind::TimedOut => StorageErrorKind::Timeout,
            _ => StorageErrorKind::Other,
        };
        let status = match err.kind() {
            std::io::ErrorKind::TimedOut => ErrorStatus::Temporary,
            _ => ErrorStatus::Permanent,
        };
        let mut error = Self::new(kind).with_status(status).with_source(err);
        if let Some(l) = location {
            error = error.with_location(l);
        }
        error
    }
}

impl std::fmt::Display for StorageError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Format: "[Backend] Kind: message (location: fr/x.md)"
        if let Some(backend) = self.backend {
            write!(f, "[{backend}] ")?;
        }

        let kind_str = match self.kind {
            StorageErrorKind::NotFound => "Not found",
            StorageErrorKind::PermissionDenied => "Permission denied",
            StorageErrorKind::InvalidPath => "Invalid path",
            StorageErrorKind::InvalidData => "Invalid data",
            StorageErrorKind::Unavailable => "Unavailable",
            StorageErrorKind::RateLimited => "Rate limited",
            StorageErrorKind::Timeout => "Timeout",
            StorageErrorKind::Other => "Error",
        };

        write!(f, "{kind_str}")?;

        if let Some(source) = &self.source {
            write!(f, ": {source}")?;
        }

        if let Some(location) = &self.location {
            write!(f, " (location: {location})")?;
        }

        Ok(())
    }
}

impl std::error::Error for StorageError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source
            .as_ref()
            .map(|s| s.as_ref() as &(dyn std::error::Error + 'static))
    }
}

/// Read-only source of raw documents.
///
/// Implementations never write. A successful `read` returns the full document
/// text; whether empty text counts as a usable document is left to the caller.
pub trait DocumentSource: Send + Sync {
    /// Short backend identifier used in logs and errors (e.g., "Fs").
    fn name(&self) -> &'static str;

    /// Read the document at a content path.
    ///
    /// # Arguments
    ///
    /// * `path` - Content path relative to the source root, `/`-separated
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if the document doesn't exist, isn't text, or
    /// the backend can't be reached.
    fn read(&self, path: &str) -> Result<String, StorageError>;
}

/// Validate a content path: relative, `/`-separated, no `..` or empty segments.
pub(crate) fn validate_path(path: &str, backend: &'static str) -> Result<(), StorageError> {
    let invalid = path.is_empty()
        || path.starts_with('/')
        || path.contains('\\')
        || path.split('/').any(|seg| seg.is_empty() || seg == "..");

    if invalid {
        return Err(StorageError::new(StorageErrorKind::InvalidPath)
            .with_location(path)
            .with_backend(backend));
    }
    Ok(())
}
