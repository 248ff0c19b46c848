//! Tabbed multilingual fable widget.
//!
//! A widget shows one fable in several tabs, each bound to at most one
//! [`Language`](fable_content::Language), with no language shown twice.
//!
//! - [`TabLanguageRegistry`] owns the assignments and persists them
//! - [`ContentCache`] holds the [`LoadState`] of every tab
//! - [`Widget`] combines both behind the commands a front end issues
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//!
//! use fable_content::{ContentKey, ContentLayout, DocumentResolver, Language, ResolverSources};
//! use fable_store::MemoryStore;
//! use fable_widget::{ContentCache, ContentPipeline, LoadState, TabLanguageRegistry, Widget};
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() {
//! let fable = ContentKey::new(Language::Fr, "antoine-vincent-arnault", "livre-1", "acteon").unwrap();
//! let resolver = DocumentResolver::new(&ContentLayout::new(), ResolverSources::default());
//! let tabs = vec!["1".to_owned(), "2".to_owned(), "3".to_owned()];
//!
//! let widget = Widget::new(
//!     fable,
//!     TabLanguageRegistry::open("acteon", tabs, Arc::new(MemoryStore::new())),
//!     ContentCache::new(ContentPipeline::documents(resolver)),
//! );
//! widget.change_language("1", Some(Language::Fr)).await.unwrap();
//!
//! let LoadState::Loaded(content) = widget.state("1") else { panic!() };
//! assert!(content.html.contains("Actéon - Contenu en Français"));
//! # }
//! ```

mod cache;
mod error;
mod registry;
mod widget;

pub use cache::{
    ContentCache, ContentOrigin, ContentPipeline, ErrorDetail, LoadOutcome, LoadState,
    ResolvedContent,
};
pub use error::WidgetError;
pub use registry::{
    AppliedResult, DEFAULT_STORAGE_KEY, LanguageConflict, PersistedWidgetState,
    STORAGE_KEY_PREFIX, TabLanguageRegistry,
};
pub use widget::Widget;
