//! Fable content model and document resolution.
//!
//! This crate turns a [`ContentKey`] (language, author, book, fable) into
//! something a tab can display:
//!
//! - [`ContentLayout`] maps a key to candidate [`DocumentLocation`]s
//! - [`DocumentResolver`] reads them through ordered [`ResolutionStrategy`] values
//! - [`FallbackContentGenerator`] builds a localized placeholder when nothing is found
//! - [`MockContentGenerator`] builds demo pages when no document source exists
//!
//! Rendering of resolved markdown is handled by `fable-renderer`.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use fable_content::{ContentKey, ContentLayout, DocumentResolver, Language, ResolverSources};
//!
//! let resolver = DocumentResolver::new(&ContentLayout::new(), ResolverSources::default());
//! let key = ContentKey::new(Language::Fr, "antoine-vincent-arnault", "livre-1", "acteon").unwrap();
//! let err = resolver.resolve(&key).unwrap_err();
//! assert_eq!(err.attempts.len(), 4);
//! ```

mod catalog;
mod fallback;
mod key;
mod language;
mod layout;
mod mock;
mod resolver;

pub use catalog::{CatalogEntry, FableEntry, author_fables, fables_structure};
pub use fallback::{FallbackContentGenerator, fable_display_title, format_fable_title};
pub use key::{AuthorPath, ContentKey, KeyError};
pub use language::{Language, UnknownLanguage};
pub use layout::{
    BASE_CASE_DIR, BASE_CASE_FABLE, ContentLayout, DocumentLocation, KNOWN_FABLES,
    build_fable_path,
};
pub use mock::{
    ContentError, DEFAULT_FAILURE_RATE, FailureSampler, MockContentGenerator, NeverFail,
    RandomFailure,
};
pub use resolver::{
    AttemptFailure, AttemptReason, DocumentResolver, RawDocument, ResolutionError,
    ResolutionStrategy, ResolverSources, SourceStrategy, StrategyKind,
};
