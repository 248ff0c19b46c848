//! Static catalog of published fables.

use crate::fallback::format_fable_title;
use crate::key::{ContentKey, KeyError};
use crate::language::Language;
use crate::layout::{ContentLayout, DocumentLocation};

const ARNAULT: &str = "antoine-vincent-arnault";
const FABULATEURS_ARNAULT: &str = "fabulateurs-francais/antoine-vincent-arnault";

/// One published fable in one language.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CatalogEntry {
    /// Language of the document.
    pub language: Language,
    /// Author, possibly `collection/author`.
    pub author: &'static str,
    /// Book identifier.
    pub book: &'static str,
    /// Fable identifier.
    pub fable: &'static str,
}

impl CatalogEntry {
    const fn new(
        language: Language,
        author: &'static str,
        book: &'static str,
        fable: &'static str,
    ) -> Self {
        Self {
            language,
            author,
            book,
            fable,
        }
    }

    /// Content key of this entry.
    ///
    /// # Errors
    ///
    /// Returns [`KeyError`] if the entry does not form a valid key.
    pub fn key(&self) -> Result<ContentKey, KeyError> {
        ContentKey::new(self.language, self.author, self.book, self.fable)
    }
}

static FABLES: [CatalogEntry; 7] = [
    CatalogEntry::new(Language::Fr, ARNAULT, "livre-1", "acteon"),
    CatalogEntry::new(Language::Fr, ARNAULT, "livre-1", "laigle-et-le-chapon"),
    CatalogEntry::new(Language::Fr, FABULATEURS_ARNAULT, "livre-1", "laigle-et-le-chapon"),
    CatalogEntry::new(Language::En, ARNAULT, "livre-1", "acteon"),
    CatalogEntry::new(Language::En, FABULATEURS_ARNAULT, "livre-1", "laigle-et-le-chapon"),
    CatalogEntry::new(Language::Es, ARNAULT, "livre-1", "acteon"),
    CatalogEntry::new(Language::Es, FABULATEURS_ARNAULT, "livre-1", "laigle-et-le-chapon"),
];

/// Every catalogued fable, grouped by language.
#[must_use]
pub fn fables_structure() -> &'static [CatalogEntry] {
    &FABLES
}

/// A fable listed for an author.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FableEntry {
    /// Formatted title.
    pub title: String,
    /// Primary content path.
    pub path: DocumentLocation,
    /// Book identifier.
    pub book: String,
}

/// Fables of `author` available in `language`.
///
/// `author` must match the catalog exactly, including any collection prefix.
/// Returns an empty list for an unknown author or language.
#[must_use]
pub fn author_fables(language: Language, author: &str) -> Vec<FableEntry> {
    let layout = ContentLayout::default();
    FABLES
        .iter()
        .filter(|e| e.language == language && e.author == author)
        .filter_map(|e| e.key().ok())
        .map(|key| FableEntry {
            title: format_fable_title(key.fable()),
            path: layout.primary_location(&key),
            book: key.book().to_owned(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_every_entry_is_a_valid_key() {
        for entry in fables_structure() {
            assert!(entry.key().is_ok(), "{entry:?}");
        }
    }

    #[test]
    fn test_author_fables_french() {
        let fables = author_fables(Language::Fr, ARNAULT);
        let summary: Vec<_> = fables
            .iter()
            .map(|f| (f.title.as_str(), f.path.as_str(), f.book.as_str()))
            .collect();

        assert_eq!(
            summary,
            vec![
                (
                    "Acteon",
                    "fr/antoine-vincent-arnault/livre-1/acteon/fr.md",
                    "livre-1"
                ),
                (
                    "Laigle Et Le Chapon",
                    "fr/antoine-vincent-arnault/livre-1/laigle-et-le-chapon/index.mdx",
                    "livre-1"
                ),
            ]
        );
    }

    #[test]
    fn test_author_fables_with_collection() {
        let fables = author_fables(Language::En, FABULATEURS_ARNAULT);
        assert_eq!(fables.len(), 1);
        assert_eq!(
            fables[0].path.as_str(),
            "en/fabulateurs-francais/antoine-vincent-arnault/livre-1/laigle-et-le-chapon/index.mdx"
        );
    }

    #[test]
    fn test_author_fables_unknown() {
        assert!(author_fables(Language::De, ARNAULT).is_empty());
        assert!(author_fables(Language::Fr, "fabulateurs-francais").is_empty());
    }
}
