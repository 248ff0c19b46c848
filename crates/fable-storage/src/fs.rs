//! Filesystem document source.

use std::fs;
use std::path::{Path, PathBuf};

use crate::source::{DocumentSource, StorageError, validate_path};

/// Backend identifier for error messages.
const BACKEND: &str = "Fs";

/// Reads documents from a root directory on disk.
///
/// Content paths are joined onto the root segment by segment. Paths with
/// parent components are rejected before any I/O happens.
///
/// # Example
///
/// ```ignore
/// use std::path::PathBuf;
/// use fable_storage::{DocumentSource, FsSource};
///
/// let source = FsSource::new(PathBuf::from("src/content/docs"));
/// let text = source.read("fr/antoine-vincent-arnault/livre-1/acteon/fr.md")?;
/// ```
#[derive(Debug, Clone)]
pub struct FsSource {
    root: PathBuf,
}

impl FsSource {
    /// Create a source rooted at `root`.
    #[must_use]
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }

    /// Root directory of this source.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn resolve(&self, path: &str) -> PathBuf {
        path.split('/')
            .fold(self.root.clone(), |acc, segment| acc.join(segment))
    }
}

impl DocumentSource for FsSource {
    fn name(&self) -> &'static str {
        BACKEND
    }

    fn read(&self, path: &str) -> Result<String, StorageError> {
        validate_path(path, BACKEND)?;
        let file = self.resolve(path);

        let bytes = fs::read(&file)
            .map_err(|e| StorageError::io(e, Some(path.to_owned())).with_backend(BACKEND))?;

        String::from_utf8(bytes).map_err(|e| {
            StorageError::io(
                std::io::Error::new(std::io::ErrorKind::InvalidData, e),
                Some(path.to_owned()),
            )
            .with_backend(BACKEND)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::StorageErrorKind;
    use tempfile::TempDir;

    fn write(root: &Path, rel: &str, content: &[u8]) {
        let path = root.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    #[test]
    fn test_read_nested_document() {
        let tmp = TempDir::new().unwrap();
        write(tmp.path(), "fr/avarnault/livre-1/acteon/fr.md", b"# Acteon");

        let source = FsSource::new(tmp.path().to_path_buf());
        let text = source.read("fr/avarnault/livre-1/acteon/fr.md").unwrap();

        assert_eq!(text, "# Acteon");
    }

    #[test]
    fn test_read_missing_document() {
        let tmp = TempDir::new().unwrap();
        let source = FsSource::new(tmp.path().to_path_buf());

        let err = source.read("fr/missing.md").unwrap_err();

        assert_eq!(err.kind, StorageErrorKind::NotFound);
        assert_eq!(err.backend, Some("Fs"));
        assert_eq!(err.location.as_deref(), Some("fr/missing.md"));
    }

    #[test]
    fn test_read_rejects_traversal() {
        let tmp = TempDir::new().unwrap();
        let source = FsSource::new(tmp.path().join("docs"));
        write(tmp.path(), "secret.md", b"nope");

        let err = source.read("../secret.md").unwrap_err();
        assert_eq!(err.kind, StorageErrorKind::InvalidPath);
    }

    #[test]
    fn test_read_non_utf8_is_invalid_data() {
        let tmp = TempDir::new().unwrap();
        write(tmp.path(), "fr.md", &[0xFF, 0xFE, 0x00]);

        let source = FsSource::new(tmp.path().to_path_buf());
        let err = source.read("fr.md").unwrap_err();

        assert_eq!(err.kind, StorageErrorKind::InvalidData);
    }

    #[test]
    fn test_read_directory_is_error() {
        let tmp = TempDir::new().unwrap();
        fs::create_dir_all(tmp.path().join("fr")).unwrap();

        let source = FsSource::new(tmp.path().to_path_buf());
        assert!(source.read("fr").is_err());
    }
}
