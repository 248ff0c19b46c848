//! Wiring of configuration into content sources, pipelines and widgets.

use std::sync::Arc;

use fable_config::Config;
use fable_content::{
    ContentKey, ContentLayout, DocumentResolver, Language, MockContentGenerator, ResolverSources,
};
use fable_storage::{DocumentSource, FsSource, HttpSource};
use fable_store::FileStore;
use fable_widget::{ContentCache, ContentPipeline, TabLanguageRegistry, Widget};

use crate::error::CliError;

/// Document layout described by the configuration.
pub(super) fn layout(config: &Config) -> ContentLayout {
    ContentLayout::new()
        .with_base_case(&config.fable.base_case, &config.fable.base_case_dir)
        .with_extensions(config.content_resolved.extensions.clone())
}

/// Document sources described by the configuration.
pub(super) fn sources(config: &Config) -> ResolverSources {
    let content = &config.content_resolved;
    let network = content.base_url.as_deref().map(|url| {
        Arc::new(HttpSource::with_timeout(url, content.timeout)) as Arc<dyn DocumentSource>
    });
    ResolverSources {
        collection: Some(Arc::new(FsSource::new(content.root.clone()))),
        network,
        direct: Some(Arc::new(FsSource::new(content.direct_root.clone()))),
    }
}

/// Content pipeline: generated demo pages in mock mode, documents otherwise.
pub(super) fn pipeline(config: &Config) -> ContentPipeline {
    if config.mock.enabled {
        tracing::info!(rate = config.mock.failure_rate, "Using mock content");
        return ContentPipeline::Mock(MockContentGenerator::new(config.mock.failure_rate));
    }
    let resolver = DocumentResolver::new(&layout(config), sources(config));
    ContentPipeline::documents(resolver)
}

/// Key of the configured fable in `language`.
pub(super) fn fable_key(config: &Config, language: Language) -> Result<ContentKey, CliError> {
    let fable = &config.fable;
    Ok(ContentKey::new(
        language,
        fable.author.as_str(),
        fable.book.as_str(),
        fable.name.as_str(),
    )?)
}

/// Widget instance backed by the configured state directory.
pub(super) fn widget(config: &Config) -> Result<Widget, CliError> {
    let settings = &config.widget_resolved;
    let store = Arc::new(FileStore::new(settings.state_dir.clone()));
    let registry = TabLanguageRegistry::open(&settings.id, settings.tabs.clone(), store);
    Ok(Widget::new(
        fable_key(config, Language::Fr)?,
        registry,
        ContentCache::new(pipeline(config)),
    ))
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use fable_content::StrategyKind;
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_sources_without_base_url() {
        let config = Config::default_with_base(Path::new("/site"));
        let sources = sources(&config);

        assert!(sources.collection.is_some());
        assert!(sources.network.is_none());
        assert!(sources.direct.is_some());
    }

    #[test]
    fn test_resolver_has_four_strategies() {
        let config = Config::default_with_base(Path::new("/site"));
        let resolver = DocumentResolver::new(&layout(&config), sources(&config));

        let kinds: Vec<_> = resolver.strategies().collect();
        assert_eq!(
            kinds,
            vec![
                StrategyKind::CollectionLoad,
                StrategyKind::NetworkFetch,
                StrategyKind::DirectImport,
                StrategyKind::FallbackPaths,
            ]
        );
    }

    #[test]
    fn test_fable_key_from_config() {
        let config = Config::default_with_base(Path::new("/site"));
        let key = fable_key(&config, Language::It).unwrap();
        assert_eq!(
            key.to_string(),
            "it/antoine-vincent-arnault/livre-1/acteon"
        );
    }
}
