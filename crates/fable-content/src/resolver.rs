//! Ordered multi-strategy document resolution.
//!
//! [`DocumentResolver`] walks a fixed list of [`ResolutionStrategy`] values and
//! returns the first non-empty document. Each failed strategy contributes one
//! [`AttemptFailure`] to the final [`ResolutionError`].
//!
//! The default order is:
//!
//! 1. [`StrategyKind::CollectionLoad`]: canonical locations in the collection root
//! 2. [`StrategyKind::NetworkFetch`]: canonical locations over HTTP, when configured
//! 3. [`StrategyKind::DirectImport`]: canonical locations in an alternate directory
//! 4. [`StrategyKind::FallbackPaths`]: historical layouts of the known fables
//!
//! Resolution holds no state between calls.

use std::fmt;
use std::sync::Arc;

use fable_storage::{DocumentSource, StorageErrorKind};

use crate::key::ContentKey;
use crate::layout::{ContentLayout, DocumentLocation};

/// Identifies one resolution strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StrategyKind {
    /// Canonical path in the content collection.
    CollectionLoad,
    /// Canonical path over the network.
    NetworkFetch,
    /// Canonical path relative to an alternate base directory.
    DirectImport,
    /// Historical alternative paths for known fables.
    FallbackPaths,
}

impl StrategyKind {
    /// Short label used in logs and messages.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::CollectionLoad => "collection",
            Self::NetworkFetch => "network",
            Self::DirectImport => "direct",
            Self::FallbackPaths => "fallback-paths",
        }
    }
}

impl fmt::Display for StrategyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Raw document text with provenance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawDocument {
    /// Document text, never empty.
    pub text: String,
    /// Location the text was read from.
    pub location: DocumentLocation,
    /// Strategy that produced it.
    pub strategy: StrategyKind,
}

/// Why a strategy produced nothing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttemptReason {
    /// The source reported an error.
    Storage {
        /// Error category.
        kind: StorageErrorKind,
        /// Whether the source considered the error worth retrying.
        transient: bool,
        /// Rendered error message.
        message: String,
    },
    /// The document exists but is empty.
    Empty,
    /// No source is configured for this strategy.
    NotConfigured,
    /// The strategy has no candidate location for this key.
    NotApplicable,
}

impl fmt::Display for AttemptReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Storage { message, .. } => f.write_str(message),
            Self::Empty => f.write_str("document is empty"),
            Self::NotConfigured => f.write_str("source not configured"),
            Self::NotApplicable => f.write_str("no candidate location"),
        }
    }
}

/// One failed strategy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttemptFailure {
    /// Strategy that failed.
    pub strategy: StrategyKind,
    /// Last location tried, if any.
    pub location: Option<DocumentLocation>,
    /// Reason of the last failure.
    pub reason: AttemptReason,
}

impl fmt::Display for AttemptFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.location {
            Some(location) => write!(f, "{} ({location}): {}", self.strategy, self.reason),
            None => write!(f, "{}: {}", self.strategy, self.reason),
        }
    }
}

/// Every strategy failed for a key.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("no document found for {key} after {} attempts", .attempts.len())]
pub struct ResolutionError {
    /// Key that could not be resolved.
    pub key: ContentKey,
    /// One entry per strategy tried, in order.
    pub attempts: Vec<AttemptFailure>,
}

impl ResolutionError {
    /// Whether any attempt failed for a reason worth retrying.
    #[must_use]
    pub fn has_transient_failure(&self) -> bool {
        self.attempts.iter().any(|a| {
            matches!(
                a.reason,
                AttemptReason::Storage {
                    transient: true,
                    ..
                }
            )
        })
    }
}

/// A way of locating and reading a document.
pub trait ResolutionStrategy: Send + Sync {
    /// Which strategy this is.
    fn kind(&self) -> StrategyKind;

    /// Try to produce a non-empty document for `key`.
    ///
    /// # Errors
    ///
    /// Returns [`AttemptFailure`] when no candidate location yields text.
    fn attempt(&self, key: &ContentKey) -> Result<RawDocument, AttemptFailure>;
}

/// Which candidate list a [`SourceStrategy`] reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Candidates {
    Canonical,
    Alternatives,
}

/// Strategy reading layout-derived locations from a [`DocumentSource`].
pub struct SourceStrategy {
    kind: StrategyKind,
    candidates: Candidates,
    layout: ContentLayout,
    source: Option<Arc<dyn DocumentSource>>,
}

impl SourceStrategy {
    /// Read canonical locations from `source`.
    #[must_use]
    pub fn canonical(
        kind: StrategyKind,
        layout: ContentLayout,
        source: Option<Arc<dyn DocumentSource>>,
    ) -> Self {
        Self {
            kind,
            candidates: Candidates::Canonical,
            layout,
            source,
        }
    }

    /// Read historical alternative locations from `source`.
    #[must_use]
    pub fn alternatives(layout: ContentLayout, source: Option<Arc<dyn DocumentSource>>) -> Self {
        Self {
            kind: StrategyKind::FallbackPaths,
            candidates: Candidates::Alternatives,
            layout,
            source,
        }
    }

    fn locations(&self, key: &ContentKey) -> Vec<DocumentLocation> {
        match self.candidates {
            Candidates::Canonical => self.layout.canonical_locations(key),
            Candidates::Alternatives => self.layout.alternative_locations(key),
        }
    }

    fn failure(&self, location: Option<DocumentLocation>, reason: AttemptReason) -> AttemptFailure {
        AttemptFailure {
            strategy: self.kind,
            location,
            reason,
        }
    }
}

impl fmt::Debug for SourceStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SourceStrategy")
            .field("kind", &self.kind)
            .field("candidates", &self.candidates)
            .field("source", &self.source.as_ref().map(|s| s.name()))
            .finish_non_exhaustive()
    }
}

impl ResolutionStrategy for SourceStrategy {
    fn kind(&self) -> StrategyKind {
        self.kind
    }

    fn attempt(&self, key: &ContentKey) -> Result<RawDocument, AttemptFailure> {
        let Some(source) = &self.source else {
            return Err(self.failure(None, AttemptReason::NotConfigured));
        };

        let mut last = self.failure(None, AttemptReason::NotApplicable);
        for location in self.locations(key) {
            match source.read(location.as_str()) {
                Ok(text) if !text.is_empty() => {
                    return Ok(RawDocument {
                        text,
                        location,
                        strategy: self.kind,
                    });
                }
                Ok(_) => {
                    tracing::debug!(strategy = %self.kind, %location, "Empty document");
                    last = self.failure(Some(location), AttemptReason::Empty);
                }
                Err(e) => {
                    tracing::debug!(strategy = %self.kind, %location, error = %e, "Read failed");
                    let reason = AttemptReason::Storage {
                        kind: e.kind,
                        transient: e.is_transient(),
                        message: e.to_string(),
                    };
                    last = self.failure(Some(location), reason);
                }
            }
        }
        Err(last)
    }
}

/// Sources backing the default strategy list.
#[derive(Clone, Default)]
pub struct ResolverSources {
    /// Content collection root, used by strategies 1 and 4.
    pub collection: Option<Arc<dyn DocumentSource>>,
    /// Network root, used by strategy 2.
    pub network: Option<Arc<dyn DocumentSource>>,
    /// Alternate base directory, used by strategy 3.
    pub direct: Option<Arc<dyn DocumentSource>>,
}

impl fmt::Debug for ResolverSources {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = |s: &Option<Arc<dyn DocumentSource>>| s.as_ref().map(|s| s.name());
        f.debug_struct("ResolverSources")
            .field("collection", &name(&self.collection))
            .field("network", &name(&self.network))
            .field("direct", &name(&self.direct))
            .finish()
    }
}

/// Resolves content keys to raw documents through ordered strategies.
pub struct DocumentResolver {
    strategies: Vec<Box<dyn ResolutionStrategy>>,
}

impl DocumentResolver {
    /// Build the default four-strategy resolver.
    #[must_use]
    pub fn new(layout: &ContentLayout, sources: ResolverSources) -> Self {
        Self::with_strategies(vec![
            Box::new(SourceStrategy::canonical(
                StrategyKind::CollectionLoad,
                layout.clone(),
                sources.collection.clone(),
            )),
            Box::new(SourceStrategy::canonical(
                StrategyKind::NetworkFetch,
                layout.clone(),
                sources.network,
            )),
            Box::new(SourceStrategy::canonical(
                StrategyKind::DirectImport,
                layout.clone(),
                sources.direct,
            )),
            Box::new(SourceStrategy::alternatives(
                layout.clone(),
                sources.collection,
            )),
        ])
    }

    /// Build a resolver from an explicit strategy list.
    #[must_use]
    pub fn with_strategies(strategies: Vec<Box<dyn ResolutionStrategy>>) -> Self {
        Self { strategies }
    }

    /// Strategies in the order they are tried.
    pub fn strategies(&self) -> impl Iterator<Item = StrategyKind> + '_ {
        self.strategies.iter().map(|s| s.kind())
    }

    /// Resolve `key` to the first non-empty document.
    ///
    /// # Errors
    ///
    /// Returns [`ResolutionError`] with one [`AttemptFailure`] per strategy
    /// when every strategy fails.
    pub fn resolve(&self, key: &ContentKey) -> Result<RawDocument, ResolutionError> {
        let mut attempts = Vec::with_capacity(self.strategies.len());

        for strategy in &self.strategies {
            match strategy.attempt(key) {
                Ok(doc) => {
                    tracing::debug!(
                        %key,
                        strategy = %doc.strategy,
                        location = %doc.location,
                        "Resolved document"
                    );
                    return Ok(doc);
                }
                Err(failure) => {
                    tracing::debug!(%key, %failure, "Strategy failed");
                    attempts.push(failure);
                }
            }
        }

        tracing::warn!(%key, attempts = attempts.len(), "All resolution strategies failed");
        Err(ResolutionError {
            key: key.clone(),
            attempts,
        })
    }
}

impl fmt::Debug for DocumentResolver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.strategies()).finish()
    }
}

#[cfg(test)]
mod tests {
    use fable_storage::MockSource;
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::language::Language;

    const ACTEON_FR: &str = "fr/antoine-vincent-arnault/livre-1/acteon/fr.md";
    const RENARD_MDX: &str = "fr/antoine-vincent-arnault/livre-1/le-renard/index.mdx";
    const RENARD_MD: &str = "fr/antoine-vincent-arnault/livre-1/le-renard/index.md";

    fn key(fable: &str) -> ContentKey {
        ContentKey::new(Language::Fr, "antoine-vincent-arnault", "livre-1", fable).unwrap()
    }

    fn resolver(
        collection: Option<Arc<MockSource>>,
        network: Option<Arc<MockSource>>,
        direct: Option<Arc<MockSource>>,
    ) -> DocumentResolver {
        let erase = |s: Option<Arc<MockSource>>| s.map(|s| s as Arc<dyn DocumentSource>);
        DocumentResolver::new(
            &ContentLayout::new(),
            ResolverSources {
                collection: erase(collection),
                network: erase(network),
                direct: erase(direct),
            },
        )
    }

    #[test]
    fn test_default_strategy_order() {
        let r = resolver(None, None, None);
        assert_eq!(
            r.strategies().collect::<Vec<_>>(),
            vec![
                StrategyKind::CollectionLoad,
                StrategyKind::NetworkFetch,
                StrategyKind::DirectImport,
                StrategyKind::FallbackPaths,
            ]
        );
    }

    #[test]
    fn test_base_case_resolves_single_file() {
        let source = Arc::new(MockSource::new().with_document(ACTEON_FR, "# Actéon"));
        let doc = resolver(Some(Arc::clone(&source)), None, None)
            .resolve(&key("acteon"))
            .unwrap();

        assert_eq!(doc.text, "# Actéon");
        assert_eq!(doc.location.as_str(), ACTEON_FR);
        assert_eq!(doc.strategy, StrategyKind::CollectionLoad);
        assert_eq!(source.reads(), vec![ACTEON_FR.to_owned()]);
    }

    #[test]
    fn test_extension_variants_tried_in_order() {
        let source = Arc::new(MockSource::new().with_document(RENARD_MD, "Le renard"));
        let doc = resolver(Some(Arc::clone(&source)), None, None)
            .resolve(&key("le-renard"))
            .unwrap();

        assert_eq!(doc.location.as_str(), RENARD_MD);
        assert_eq!(
            source.reads(),
            vec![RENARD_MDX.to_owned(), RENARD_MD.to_owned()]
        );
    }

    #[test]
    fn test_empty_document_is_failure() {
        let collection = Arc::new(MockSource::new().with_document(ACTEON_FR, ""));
        let direct = Arc::new(MockSource::new().named("Direct").with_document(ACTEON_FR, "ok"));

        let doc = resolver(Some(collection), None, Some(direct))
            .resolve(&key("acteon"))
            .unwrap();

        assert_eq!(doc.strategy, StrategyKind::DirectImport);
        assert_eq!(doc.text, "ok");
    }

    #[test]
    fn test_network_strategy_used_when_collection_misses() {
        let collection = Arc::new(MockSource::new());
        let network = Arc::new(MockSource::new().with_document(RENARD_MDX, "remote"));

        let doc = resolver(Some(collection), Some(network), None)
            .resolve(&key("le-renard"))
            .unwrap();

        assert_eq!(doc.strategy, StrategyKind::NetworkFetch);
    }

    #[test]
    fn test_exhaustion_records_one_attempt_per_strategy() {
        let err = resolver(Some(Arc::new(MockSource::new())), None, None)
            .resolve(&key("le-renard"))
            .unwrap_err();

        assert_eq!(err.key, key("le-renard"));
        let summary: Vec<_> = err
            .attempts
            .iter()
            .map(|a| (a.strategy, a.location.as_ref().map(ToString::to_string)))
            .collect();
        assert_eq!(
            summary,
            vec![
                (StrategyKind::CollectionLoad, Some(RENARD_MD.to_owned())),
                (StrategyKind::NetworkFetch, None),
                (StrategyKind::DirectImport, None),
                (StrategyKind::FallbackPaths, None),
            ]
        );
        assert!(matches!(
            err.attempts[0].reason,
            AttemptReason::Storage {
                kind: StorageErrorKind::NotFound,
                transient: false,
                ..
            }
        ));
        assert_eq!(err.attempts[1].reason, AttemptReason::NotConfigured);
        assert_eq!(err.attempts[3].reason, AttemptReason::NotApplicable);
        assert!(!err.has_transient_failure());
    }

    #[test]
    fn test_fallback_paths_for_known_fable() {
        let alt = "fr/fabulateurs-francais/antoine-vincent-arnault/livre-1/laigle-et-le-chapon/index.mdx";
        let source = Arc::new(MockSource::new().with_document(alt, "L'Aigle"));
        let k = ContentKey::new(Language::Fr, "someone", "livre-2", "laigle-et-le-chapon").unwrap();

        let doc = resolver(Some(source), None, None).resolve(&k).unwrap();

        assert_eq!(doc.strategy, StrategyKind::FallbackPaths);
        assert_eq!(doc.location.as_str(), alt);
    }

    #[test]
    fn test_transient_failure_is_reported() {
        let source = Arc::new(MockSource::new().with_failure(ACTEON_FR, StorageErrorKind::Unavailable));
        let err = resolver(Some(source), None, None)
            .resolve(&key("acteon"))
            .unwrap_err();

        assert!(err.has_transient_failure());
        assert_eq!(err.attempts.len(), 4);
    }

    struct Fixed(StrategyKind, Option<&'static str>);

    impl ResolutionStrategy for Fixed {
        fn kind(&self) -> StrategyKind {
            self.0
        }

        fn attempt(&self, key: &ContentKey) -> Result<RawDocument, AttemptFailure> {
            match self.1 {
                Some(text) => Ok(RawDocument {
                    text: text.to_owned(),
                    location: ContentLayout::new().primary_location(key),
                    strategy: self.0,
                }),
                None => Err(AttemptFailure {
                    strategy: self.0,
                    location: None,
                    reason: AttemptReason::NotApplicable,
                }),
            }
        }
    }

    #[test]
    fn test_custom_strategies_short_circuit() {
        let r = DocumentResolver::with_strategies(vec![
            Box::new(Fixed(StrategyKind::DirectImport, None)),
            Box::new(Fixed(StrategyKind::NetworkFetch, Some("first"))),
            Box::new(Fixed(StrategyKind::CollectionLoad, Some("second"))),
        ]);

        let doc = r.resolve(&key("le-renard")).unwrap();
        assert_eq!(doc.text, "first");
    }

    #[test]
    fn test_error_display() {
        let err = resolver(None, None, None)
            .resolve(&key("acteon"))
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "no document found for fr/antoine-vincent-arnault/livre-1/acteon after 4 attempts"
        );
        assert_eq!(
            err.attempts[0].to_string(),
            "collection: source not configured"
        );
    }
}
