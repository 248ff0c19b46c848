//! `fable catalog` command implementation.

use clap::Args;
use fable_content::{Language, author_fables, fables_structure, format_fable_title};

use crate::output::Output;

/// Arguments for the catalog command.
#[derive(Args)]
pub(crate) struct CatalogArgs {
    /// Only list fables in this language.
    #[arg(short, long)]
    lang: Option<Language>,

    /// Only list fables by this author (`author` or `collection/author`).
    #[arg(short, long, requires = "lang")]
    author: Option<String>,
}

impl CatalogArgs {
    /// Execute the catalog command.
    pub(crate) fn execute(self) {
        let output = Output::new();

        if let (Some(language), Some(author)) = (self.lang, self.author.as_deref()) {
            let fables = author_fables(language, author);
            if fables.is_empty() {
                output.warning(&format!("No fables by {author} in {language}"));
            }
            for fable in fables {
                output.info(&format!("{}  ({})", fable.title, fable.book));
                output.detail(&format!("  {}", fable.path));
            }
            return;
        }

        for language in Language::ALL {
            if self.lang.is_some_and(|lang| lang != language) {
                continue;
            }
            let entries: Vec<_> = fables_structure()
                .iter()
                .filter(|entry| entry.language == language)
                .collect();
            if entries.is_empty() {
                continue;
            }

            output.highlight(&format!(
                "{} {} ({language})",
                language.flag(),
                language.display_name()
            ));
            for entry in entries {
                output.info(&format!(
                    "  {} - {} / {}",
                    format_fable_title(entry.fable),
                    entry.author,
                    entry.book
                ));
            }
        }
    }
}
