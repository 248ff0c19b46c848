//! Widget facade.
//!
//! [`Widget`] combines a [`TabLanguageRegistry`] and a [`ContentCache`] behind
//! the commands a presentation layer issues: select a tab, change its
//! language, retry a load. Queries return owned snapshots.

use std::sync::{Mutex, MutexGuard, PoisonError};

use fable_content::{ContentKey, Language};

use crate::cache::{ContentCache, LoadOutcome, LoadState};
use crate::error::WidgetError;
use crate::registry::{AppliedResult, PersistedWidgetState, TabLanguageRegistry};

/// One widget instance showing a single fable in several tabs.
#[derive(Debug)]
pub struct Widget {
    fable: ContentKey,
    registry: Mutex<TabLanguageRegistry>,
    cache: ContentCache,
}

impl Widget {
    /// Create a widget showing `fable` in each tab's language.
    ///
    /// The language of `fable` itself is ignored.
    #[must_use]
    pub fn new(fable: ContentKey, registry: TabLanguageRegistry, cache: ContentCache) -> Self {
        Self {
            fable,
            registry: Mutex::new(registry),
            cache,
        }
    }

    // The guard must be released before any `.await`.
    fn registry(&self) -> MutexGuard<'_, TabLanguageRegistry> {
        self.registry.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn key_for(&self, language: Language) -> ContentKey {
        self.fable.with_language(language)
    }

    /// Fable shown by this widget.
    #[must_use]
    pub fn fable(&self) -> &ContentKey {
        &self.fable
    }

    /// Tab identifiers in display order.
    #[must_use]
    pub fn tabs(&self) -> Vec<String> {
        self.registry().tabs().to_vec()
    }

    /// Active tab identifier.
    #[must_use]
    pub fn active_tab(&self) -> String {
        self.registry().active_tab().to_owned()
    }

    /// Language assigned to `tab`.
    #[must_use]
    pub fn language(&self, tab: &str) -> Option<Language> {
        self.registry().language(tab)
    }

    /// Content state of `tab`.
    #[must_use]
    pub fn state(&self, tab: &str) -> LoadState {
        self.cache.state(tab)
    }

    /// Languages `tab` may switch to, in canonical order.
    #[must_use]
    pub fn available_languages_for(&self, tab: &str) -> Vec<Language> {
        self.registry().available_languages_for(tab)
    }

    /// Assignment and active tab as persisted.
    #[must_use]
    pub fn snapshot(&self) -> PersistedWidgetState {
        self.registry().snapshot()
    }

    /// Activate `tab`, loading its content if it has a language but nothing
    /// to show yet.
    ///
    /// Returns the load outcome when a load was started.
    ///
    /// # Errors
    ///
    /// Returns [`WidgetError::UnknownTab`] if `tab` is not a tab of this widget.
    pub async fn select_tab(&self, tab: &str) -> Result<Option<LoadOutcome>, WidgetError> {
        let language = {
            let mut registry = self.registry();
            registry.set_active_tab(tab)?;
            registry.language(tab)
        };
        let Some(language) = language else {
            return Ok(None);
        };

        match self.cache.state(tab) {
            LoadState::Idle | LoadState::Failed(_) => {
                Ok(Some(self.cache.load(tab, self.key_for(language)).await))
            }
            LoadState::Loading | LoadState::Loaded(_) => Ok(None),
        }
    }

    /// Assign `language` to `tab`, or clear it with `None`.
    ///
    /// An applied change discards the tab's content, then loads the new
    /// language. A rejected change leaves content untouched.
    ///
    /// # Errors
    ///
    /// Returns [`WidgetError::UnknownTab`] if `tab` is not a tab of this widget.
    pub async fn change_language(
        &self,
        tab: &str,
        language: Option<Language>,
    ) -> Result<AppliedResult, WidgetError> {
        let result = self.registry().set_language(tab, language)?;
        if !result.is_applied() {
            return Ok(result);
        }

        self.cache.clear(tab);
        if let Some(language) = language {
            tracing::info!(tab, %language, "Loading content for new language");
            self.cache.load(tab, self.key_for(language)).await;
        }
        Ok(result)
    }

    /// Reload the content of `tab`.
    ///
    /// # Errors
    ///
    /// Returns [`WidgetError::UnknownTab`] for an unknown tab and
    /// [`WidgetError::Unassigned`] when the tab has no language.
    pub async fn retry(&self, tab: &str) -> Result<LoadOutcome, WidgetError> {
        let language = {
            let registry = self.registry();
            if !registry.tabs().iter().any(|t| t == tab) {
                return Err(WidgetError::UnknownTab(tab.to_owned()));
            }
            registry.language(tab)
        };
        let language = language.ok_or_else(|| WidgetError::Unassigned(tab.to_owned()))?;
        Ok(self.cache.retry(tab, self.key_for(language)).await)
    }

    /// Load the active tab if it has a language and is idle.
    ///
    /// Used after opening a widget with restored state.
    pub async fn load_active(&self) -> Option<LoadOutcome> {
        let (tab, language) = {
            let registry = self.registry();
            let tab = registry.active_tab().to_owned();
            let language = registry.language(&tab)?;
            (tab, language)
        };
        if !matches!(self.cache.state(&tab), LoadState::Idle) {
            return None;
        }
        Some(self.cache.load(&tab, self.key_for(language)).await)
    }

    /// Write the current assignment to the shared default slot.
    pub fn save_as_default(&self) {
        self.registry().save_as_default();
    }

    /// Adopt the shared default snapshot.
    ///
    /// Content of every tab is discarded; call [`Widget::load_active`] to
    /// show the restored active tab. Returns `false` when no default exists.
    pub fn seed_from_default(&self) -> bool {
        let (seeded, tabs) = {
            let mut registry = self.registry();
            (registry.seed_from_default(), registry.tabs().to_vec())
        };
        if seeded {
            for tab in &tabs {
                self.cache.clear(tab);
            }
        }
        seeded
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use fable_content::{
        ContentLayout, DocumentResolver, MockContentGenerator, NeverFail, ResolverSources,
    };
    use fable_storage::{DocumentSource, MockSource};
    use fable_store::{KeyValueStore, MemoryStore};
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::cache::ContentPipeline;

    const ACTEON_DIR: &str = "fr/antoine-vincent-arnault/livre-1/acteon";

    fn fable() -> ContentKey {
        ContentKey::new(Language::Fr, "antoine-vincent-arnault", "livre-1", "acteon").unwrap()
    }

    fn widget_with(source: Arc<MockSource>, store: Arc<MemoryStore>) -> Widget {
        let sources = ResolverSources {
            collection: Some(source as Arc<dyn DocumentSource>),
            ..ResolverSources::default()
        };
        let resolver = DocumentResolver::new(&ContentLayout::new(), sources);
        let tabs = vec!["1".to_owned(), "2".to_owned(), "3".to_owned()];
        Widget::new(
            fable(),
            TabLanguageRegistry::open("acteon", tabs, store),
            ContentCache::new(ContentPipeline::documents(resolver)),
        )
    }

    fn html(widget: &Widget, tab: &str) -> String {
        match widget.state(tab) {
            LoadState::Loaded(content) => content.html,
            other => panic!("tab {tab} not loaded: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_change_language_loads_document() {
        let source =
            Arc::new(MockSource::new().with_document(format!("{ACTEON_DIR}/en.md"), "# Acteon"));
        let widget = widget_with(source, Arc::new(MemoryStore::new()));

        let result = widget.change_language("1", Some(Language::En)).await.unwrap();

        assert!(result.is_applied());
        assert!(html(&widget, "1").contains("Acteon</h1>"));
    }

    #[tokio::test]
    async fn test_rejected_change_keeps_content() {
        let source = Arc::new(
            MockSource::new()
                .with_document(format!("{ACTEON_DIR}/fr.md"), "# Actéon")
                .with_document(format!("{ACTEON_DIR}/en.md"), "# Acteon"),
        );
        let widget = widget_with(source, Arc::new(MemoryStore::new()));
        widget.change_language("1", Some(Language::Fr)).await.unwrap();
        widget.change_language("2", Some(Language::En)).await.unwrap();

        let result = widget.change_language("2", Some(Language::Fr)).await.unwrap();

        assert!(!result.is_applied());
        assert_eq!(widget.language("2"), Some(Language::En));
        assert!(html(&widget, "2").contains("Acteon"));
    }

    #[tokio::test]
    async fn test_clearing_language_resets_tab() {
        let source =
            Arc::new(MockSource::new().with_document(format!("{ACTEON_DIR}/es.md"), "# Acteón"));
        let widget = widget_with(source, Arc::new(MemoryStore::new()));
        widget.change_language("3", Some(Language::Es)).await.unwrap();

        widget.change_language("3", None).await.unwrap();

        assert_eq!(widget.language("3"), None);
        assert_eq!(widget.state("3"), LoadState::Idle);
    }

    #[tokio::test]
    async fn test_select_tab_loads_lazily() {
        let json = r#"{"tabConfig":{"2":"en"},"activeTab":"1"}"#;
        let store = Arc::new(MemoryStore::new().with_entry("multilingual-widget-acteon", json));
        let source =
            Arc::new(MockSource::new().with_document(format!("{ACTEON_DIR}/en.md"), "# Acteon"));
        let widget = widget_with(Arc::clone(&source), store);

        assert_eq!(widget.select_tab("1").await.unwrap(), None);
        assert_eq!(
            widget.select_tab("2").await.unwrap(),
            Some(LoadOutcome::Committed)
        );
        assert_eq!(widget.select_tab("2").await.unwrap(), None);
        assert_eq!(widget.active_tab(), "2");
        assert_eq!(source.read_count(), 1);
    }

    #[tokio::test]
    async fn test_select_unknown_tab() {
        let widget = widget_with(Arc::new(MockSource::new()), Arc::new(MemoryStore::new()));
        assert_eq!(
            widget.select_tab("settings").await,
            Err(WidgetError::UnknownTab("settings".to_owned()))
        );
    }

    #[tokio::test]
    async fn test_retry_requires_language() {
        let widget = widget_with(Arc::new(MockSource::new()), Arc::new(MemoryStore::new()));
        assert_eq!(
            widget.retry("1").await,
            Err(WidgetError::Unassigned("1".to_owned()))
        );
        assert_eq!(
            widget.retry("9").await,
            Err(WidgetError::UnknownTab("9".to_owned()))
        );
    }

    #[tokio::test]
    async fn test_retry_recovers_failed_mock_load() {
        let store: Arc<dyn KeyValueStore> = Arc::new(MemoryStore::new());
        let tabs = vec!["1".to_owned()];
        let failing = MockContentGenerator::new(1.0);
        let widget = Widget::new(
            fable(),
            TabLanguageRegistry::open("mock", tabs.clone(), Arc::clone(&store)),
            ContentCache::new(ContentPipeline::Mock(failing)),
        );
        widget.change_language("1", Some(Language::De)).await.unwrap();
        assert!(matches!(widget.state("1"), LoadState::Failed(_)));

        let healthy = Widget::new(
            fable(),
            TabLanguageRegistry::open("mock", tabs, store),
            ContentCache::new(ContentPipeline::Mock(
                MockContentGenerator::with_sampler(NeverFail),
            )),
        );
        assert_eq!(healthy.language("1"), Some(Language::De));
        assert_eq!(healthy.retry("1").await.unwrap(), LoadOutcome::Committed);
        assert!(html(&healthy, "1").contains("DE"));
    }

    #[tokio::test]
    async fn test_load_active_after_restore() {
        let json = r#"{"tabConfig":{"3":"fr"},"activeTab":"3"}"#;
        let store = Arc::new(MemoryStore::new().with_entry("multilingual-widget-acteon", json));
        let widget = widget_with(Arc::new(MockSource::new()), store);

        assert_eq!(widget.load_active().await, Some(LoadOutcome::Committed));
        assert!(html(&widget, "3").contains("Actéon - Contenu en Français"));
        assert_eq!(widget.load_active().await, None);
    }

    #[tokio::test]
    async fn test_seed_from_default_discards_content() {
        let store = Arc::new(MemoryStore::new());
        let source =
            Arc::new(MockSource::new().with_document(format!("{ACTEON_DIR}/it.md"), "# Atteone"));
        let first = widget_with(Arc::clone(&source), Arc::clone(&store));
        first.change_language("1", Some(Language::It)).await.unwrap();
        first.save_as_default();

        let second = widget_with(source, store);
        second.change_language("1", Some(Language::En)).await.unwrap();
        assert!(second.seed_from_default());

        assert_eq!(second.language("1"), Some(Language::It));
        assert_eq!(second.state("1"), LoadState::Idle);
        assert_eq!(second.load_active().await, Some(LoadOutcome::Committed));
        assert!(html(&second, "1").contains("Atteone"));
    }
}
