//! HTTP document source.
//!
//! Fetches documents with a blocking GET against a base URL, the way a
//! deployed site serves its content tree.

use std::time::Duration;

use ureq::Agent;

use crate::source::{DocumentSource, ErrorStatus, StorageError, StorageErrorKind, validate_path};

/// Backend identifier for error messages.
const BACKEND: &str = "Http";

/// Default HTTP timeout in seconds.
const DEFAULT_TIMEOUT: u64 = 10;

/// Reads documents over HTTP from `{base_url}/{path}`.
pub struct HttpSource {
    agent: Agent,
    base_url: String,
}

impl HttpSource {
    /// Create a source for `base_url` with the default timeout.
    #[must_use]
    pub fn new(base_url: &str) -> Self {
        Self::with_timeout(base_url, Duration::from_secs(DEFAULT_TIMEOUT))
    }

    /// Create a source for `base_url` with an explicit request timeout.
    #[must_use]
    pub fn with_timeout(base_url: &str, timeout: Duration) -> Self {
        let agent = Agent::config_builder()
            .timeout_global(Some(timeout))
            .http_status_as_error(false)
            .build()
            .into();

        Self {
            agent,
            base_url: base_url.trim_end_matches('/').to_owned(),
        }
    }

    /// Base URL without trailing slash.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Full URL for a content path.
    #[must_use]
    pub fn url_for(&self, path: &str) -> String {
        format!("{}/{path}", self.base_url)
    }
}

impl std::fmt::Debug for HttpSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpSource")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

/// Map an HTTP error status onto a storage error.
fn status_error(status: u16, url: &str) -> StorageError {
    let (kind, retry) = match status {
        404 | 410 => (StorageErrorKind::NotFound, ErrorStatus::Permanent),
        401 | 403 => (StorageErrorKind::PermissionDenied, ErrorStatus::Permanent),
        408 => (StorageErrorKind::Timeout, ErrorStatus::Temporary),
        429 => (StorageErrorKind::RateLimited, ErrorStatus::Persistent),
        500..=599 => (StorageErrorKind::Unavailable, ErrorStatus::Persistent),
        _ => (StorageErrorKind::Other, ErrorStatus::Permanent),
    };
    StorageError::new(kind)
        .with_status(retry)
        .with_location(url)
        .with_backend(BACKEND)
        .with_source(std::io::Error::other(format!("HTTP {status}")))
}

/// Map a transport failure onto a storage error.
fn transport_error(err: &ureq::Error, url: &str) -> StorageError {
    let kind = match err {
        ureq::Error::Timeout(_) => StorageErrorKind::Timeout,
        _ => StorageErrorKind::Unavailable,
    };
    StorageError::new(kind)
        .with_status(ErrorStatus::Temporary)
        .with_location(url)
        .with_backend(BACKEND)
        .with_source(std::io::Error::other(err.to_string()))
}

impl DocumentSource for HttpSource {
    fn name(&self) -> &'static str {
        BACKEND
    }

    fn read(&self, path: &str) -> Result<String, StorageError> {
        validate_path(path, BACKEND)?;
        let url = self.url_for(path);

        tracing::debug!(%url, "fetching document");

        let response = self
            .agent
            .get(&url)
            .header("Accept", "text/markdown, text/plain, */*")
            .call()
            .map_err(|e| transport_error(&e, &url))?;

        let status = response.status().as_u16();
        if status >= 400 {
            return Err(status_error(status, &url));
        }

        response
            .into_body()
            .read_to_string()
            .map_err(|e| transport_error(&e, &url))
    }
}
