//! Per-tab content cache.
//!
//! Each tab owns one [`LoadState`]:
//!
//! ```text
//! Idle ──load──▶ Loading ──▶ Loaded | Failed
//!                  ▲              │
//!                  └──load/retry──┘
//! ```
//!
//! A `load` on a tab that is already `Loading` is dropped, so at most one
//! resolution per tab is in flight. Every transition into `Loading` and every
//! `clear` bumps the tab's generation; a finishing resolution is committed only
//! if the generation it started under is still current.

use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use chrono::{DateTime, Utc};
use fable_content::{
    ContentKey, DocumentLocation, DocumentResolver, FallbackContentGenerator, Language,
    MockContentGenerator, StrategyKind,
};
use fable_renderer::MarkdownRenderer;

/// Where displayed HTML came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContentOrigin {
    /// A resolved document.
    Document {
        /// Location that was read.
        location: DocumentLocation,
        /// Strategy that found it.
        strategy: StrategyKind,
    },
    /// Placeholder generated after every strategy failed.
    Fallback,
    /// Demo content from the mock generator.
    Mock,
}

/// Sanitized HTML ready for display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedContent {
    /// Sanitized, styled HTML.
    pub html: String,
    /// Key the HTML was produced for.
    pub key: ContentKey,
    /// When the HTML was produced.
    pub timestamp: DateTime<Utc>,
    /// Where the HTML came from.
    pub origin: ContentOrigin,
}

/// Why a tab ended up in [`LoadState::Failed`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorDetail {
    /// Language that was requested.
    pub language: Language,
    /// Human-readable message naming the language and the cause.
    pub message: String,
}

impl ErrorDetail {
    fn new(language: Language, reason: impl fmt::Display) -> Self {
        Self {
            language,
            message: format!("unable to load content in {language}: {reason}"),
        }
    }
}

impl fmt::Display for ErrorDetail {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

/// Load state of one tab.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum LoadState {
    /// Nothing requested yet, or cleared.
    #[default]
    Idle,
    /// A resolution is in flight.
    Loading,
    /// Content is available.
    Loaded(ResolvedContent),
    /// Content could not be produced.
    Failed(ErrorDetail),
}

impl LoadState {
    /// Whether a resolution is in flight.
    #[must_use]
    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }

    /// Loaded content, if any.
    #[must_use]
    pub fn content(&self) -> Option<&ResolvedContent> {
        match self {
            Self::Loaded(content) => Some(content),
            _ => None,
        }
    }
}

/// What happened to a `load` request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    /// Result was stored in the tab.
    Committed,
    /// The tab was already loading; nothing was started.
    Ignored,
    /// The tab was cleared or reloaded meanwhile; the result was dropped.
    Discarded,
}

/// Produces HTML for a key.
pub enum ContentPipeline {
    /// Resolve documents, render them, and fall back to placeholders.
    Documents {
        /// Document resolver.
        resolver: DocumentResolver,
        /// Markdown renderer.
        renderer: MarkdownRenderer,
        /// Placeholder generator.
        fallback: FallbackContentGenerator,
    },
    /// Serve generated demo content.
    Mock(MockContentGenerator),
}

impl ContentPipeline {
    /// Document pipeline with the default renderer and placeholder generator.
    #[must_use]
    pub fn documents(resolver: DocumentResolver) -> Self {
        Self::Documents {
            resolver,
            renderer: MarkdownRenderer::new(),
            fallback: FallbackContentGenerator::new(),
        }
    }

    /// Produce HTML for `key` on behalf of `tab`.
    ///
    /// Only the mock pipeline can fail; a document that cannot be resolved
    /// yields placeholder content instead.
    fn produce(&self, tab: &str, key: &ContentKey) -> Result<(String, ContentOrigin), String> {
        match self {
            Self::Documents {
                resolver,
                renderer,
                fallback,
            } => match resolver.resolve(key) {
                Ok(doc) => Ok((
                    renderer.render(&doc.text),
                    ContentOrigin::Document {
                        location: doc.location,
                        strategy: doc.strategy,
                    },
                )),
                Err(err) => {
                    tracing::debug!(tab, %err, "Using placeholder content");
                    Ok((
                        fallback.generate(key.language(), key.fable()),
                        ContentOrigin::Fallback,
                    ))
                }
            },
            Self::Mock(generator) => generator
                .generate(key.language(), tab)
                .map(|html| (html, ContentOrigin::Mock))
                .map_err(|e| e.to_string()),
        }
    }
}

impl fmt::Debug for ContentPipeline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Documents { resolver, .. } => {
                f.debug_tuple("Documents").field(resolver).finish()
            }
            Self::Mock(_) => f.write_str("Mock"),
        }
    }
}

#[derive(Debug, Default)]
struct TabEntry {
    state: LoadState,
    generation: u64,
}

/// Per-tab content store.
#[derive(Debug)]
pub struct ContentCache {
    pipeline: Arc<ContentPipeline>,
    entries: Mutex<HashMap<String, TabEntry>>,
}

impl ContentCache {
    /// Create an empty cache producing content through `pipeline`.
    #[must_use]
    pub fn new(pipeline: ContentPipeline) -> Self {
        Self {
            pipeline: Arc::new(pipeline),
            entries: Mutex::new(HashMap::new()),
        }
    }

    fn entries(&self) -> MutexGuard<'_, HashMap<String, TabEntry>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Current state of `tab`.
    #[must_use]
    pub fn state(&self, tab: &str) -> LoadState {
        self.entries()
            .get(tab)
            .map(|entry| entry.state.clone())
            .unwrap_or_default()
    }

    /// Load content for `key` into `tab`.
    ///
    /// Dropped when `tab` is already loading. Otherwise the tab enters
    /// `Loading`, resolution runs on the blocking pool, and the result is
    /// committed unless the tab was cleared or reloaded in the meantime.
    pub async fn load(&self, tab: &str, key: ContentKey) -> LoadOutcome {
        let Some(in_flight) = self.begin(tab) else {
            tracing::debug!(tab, %key, "Load already in flight, ignoring");
            return LoadOutcome::Ignored;
        };

        let pipeline = Arc::clone(&self.pipeline);
        let task_tab = tab.to_owned();
        let task_key = key.clone();
        let result =
            tokio::task::spawn_blocking(move || pipeline.produce(&task_tab, &task_key)).await;

        let state = match result {
            Ok(Ok((html, origin))) => LoadState::Loaded(ResolvedContent {
                html,
                key: key.clone(),
                timestamp: Utc::now(),
                origin,
            }),
            Ok(Err(reason)) => {
                tracing::warn!(tab, %key, %reason, "Content load failed");
                LoadState::Failed(ErrorDetail::new(key.language(), reason))
            }
            Err(join_error) => {
                tracing::warn!(tab, %key, error = %join_error, "Content task aborted");
                LoadState::Failed(ErrorDetail::new(key.language(), join_error))
            }
        };

        in_flight.finish(state)
    }

    /// Reload `tab` even if it already holds content.
    ///
    /// Same as [`ContentCache::load`]; dropped only while the tab is loading.
    pub async fn retry(&self, tab: &str, key: ContentKey) -> LoadOutcome {
        self.load(tab, key).await
    }

    /// Reset `tab` to `Idle`, discarding content, error, and any in-flight result.
    pub fn clear(&self, tab: &str) {
        let mut entries = self.entries();
        let entry = entries.entry(tab.to_owned()).or_default();
        entry.generation += 1;
        entry.state = LoadState::Idle;
        tracing::debug!(tab, generation = entry.generation, "Cleared tab");
    }

    /// Mark `tab` as loading and return its new generation.
    fn begin(&self, tab: &str) -> Option<InFlight<'_>> {
        let mut entries = self.entries();
        let entry = entries.entry(tab.to_owned()).or_default();
        if entry.state.is_loading() {
            return None;
        }
        entry.generation += 1;
        entry.state = LoadState::Loading;
        tracing::debug!(tab, generation = entry.generation, "Loading tab");
        Some(InFlight {
            cache: self,
            tab: tab.to_owned(),
            generation: entry.generation,
            finished: false,
        })
    }
}

/// An in-flight load.
///
/// Resets the tab to `Idle` if dropped before [`InFlight::finish`], so a
/// cancelled `load` future cannot leave the tab stuck in `Loading`.
struct InFlight<'a> {
    cache: &'a ContentCache,
    tab: String,
    generation: u64,
    finished: bool,
}

impl InFlight<'_> {
    fn finish(mut self, state: LoadState) -> LoadOutcome {
        self.finished = true;
        let mut entries = self.cache.entries();
        match entries.get_mut(&self.tab) {
            Some(entry) if entry.generation == self.generation => {
                entry.state = state;
                LoadOutcome::Committed
            }
            _ => {
                tracing::debug!(tab = %self.tab, "Discarding stale load result");
                LoadOutcome::Discarded
            }
        }
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        if self.finished {
            return;
        }
        let mut entries = self.cache.entries();
        if let Some(entry) = entries.get_mut(&self.tab)
            && entry.generation == self.generation
        {
            entry.state = LoadState::Idle;
        }
    }
}
