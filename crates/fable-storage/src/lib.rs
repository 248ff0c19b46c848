//! Read-only document sources for fable content.
//!
//! This crate provides a [`DocumentSource`] trait abstracting where raw fable
//! documents come from. The content resolver only ever reads through it, which
//! enables:
//!
//! - **Unit testing** without touching the real filesystem or network
//! - **Several lookup strategies** sharing one contract (collection directory,
//!   HTTP root, alternate directory)
//! - **Uniform failure reporting** through [`StorageError`]
//!
//! # Architecture
//!
//! The crate provides:
//! - [`DocumentSource`] trait with `read()` and a backend `name()`
//! - [`FsSource`] reading from a directory on disk
//! - [`HttpSource`] fetching from an HTTP root
//! - [`MockSource`] for testing (behind `mock` feature flag)
//!
//! # Example
//!
//! ```ignore
//! use std::path::PathBuf;
//! use fable_storage::{DocumentSource, FsSource};
//!
//! let source = FsSource::new(PathBuf::from("src/content/docs"));
//! let text = source.read("fr/antoine-vincent-arnault/livre-1/acteon/fr.md")?;
//! ```

mod fs;
mod http;
#[cfg(feature = "mock")]
mod mock;
mod source;

pub use fs::FsSource;
pub use http::HttpSource;
#[cfg(feature = "mock")]
pub use mock::MockSource;
pub use source::{DocumentSource, ErrorStatus, StorageError, StorageErrorKind};
