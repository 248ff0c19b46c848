//! `fable resolve` command implementation.

use std::path::{Path, PathBuf};

use clap::Args;
use fable_config::{CliSettings, Config};
use fable_content::Language;
use fable_widget::{ContentCache, ContentOrigin, LoadState};

use super::context;
use crate::error::CliError;
use crate::output::Output;

/// Tab used for one-shot resolution.
const RESOLVE_TAB: &str = "cli";

/// Arguments for the resolve command.
#[derive(Args)]
pub(crate) struct ResolveArgs {
    /// Language to resolve.
    #[arg(short, long)]
    lang: Language,

    /// Author, optionally prefixed by a collection (overrides config).
    #[arg(long)]
    author: Option<String>,

    /// Book (overrides config).
    #[arg(long)]
    book: Option<String>,

    /// Fable (overrides config).
    #[arg(long)]
    fable: Option<String>,

    /// Content collection root (overrides config).
    #[arg(long)]
    root: Option<PathBuf>,

    /// Network base URL; empty disables network fetches (overrides config).
    #[arg(long)]
    base_url: Option<String>,

    /// Serve generated demo content instead of documents.
    #[arg(long)]
    mock: bool,

    /// Simulated failure probability in mock mode (overrides config).
    #[arg(long)]
    failure_rate: Option<f64>,
}

impl ResolveArgs {
    /// Execute the resolve command.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration is invalid, the key is malformed,
    /// or loading fails outright.
    pub(crate) async fn execute(self, config_path: Option<&Path>) -> Result<(), CliError> {
        let output = Output::new();

        let cli_settings = CliSettings {
            root: self.root,
            base_url: self.base_url,
            mock: self.mock.then_some(true),
            failure_rate: self.failure_rate,
            ..Default::default()
        };
        let mut config = Config::load(config_path, Some(&cli_settings))?;
        if let Some(author) = self.author {
            config.fable.author = author;
        }
        if let Some(book) = self.book {
            config.fable.book = book;
        }
        if let Some(fable) = self.fable {
            config.fable.name = fable;
        }

        let key = context::fable_key(&config, self.lang)?;
        let cache = ContentCache::new(context::pipeline(&config));
        output.info(&format!("Resolving {key}..."));
        cache.load(RESOLVE_TAB, key).await;

        match cache.state(RESOLVE_TAB) {
            LoadState::Loaded(content) => {
                match &content.origin {
                    ContentOrigin::Document { location, strategy } => {
                        output.success(&format!("Found {location} via {strategy}"));
                    }
                    ContentOrigin::Fallback => {
                        output.warning("No document found, showing placeholder content");
                    }
                    ContentOrigin::Mock => output.detail("Generated demo content"),
                }
                output.document(&content.html);
                Ok(())
            }
            LoadState::Failed(detail) => Err(CliError::Validation(detail.message)),
            state => Err(CliError::Validation(format!(
                "unexpected load state: {state:?}"
            ))),
        }
    }
}
