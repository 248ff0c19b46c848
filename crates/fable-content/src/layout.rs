//! Document path construction.
//!
//! Every location is a content path relative to a source root: `/`-separated,
//! no leading slash. Two shapes exist:
//!
//! - index documents: `{lang}/{collection?}/{author}/{book}/{fable}/index.{ext}`
//! - the base-case fable: `{base_case_dir}/{lang}.md`, one flat file per language

use std::fmt;

use crate::key::ContentKey;
use crate::language::Language;

/// Fable stored as flat per-language files.
pub const BASE_CASE_FABLE: &str = "acteon";

/// Directory holding the base-case files.
pub const BASE_CASE_DIR: &str = "fr/antoine-vincent-arnault/livre-1/acteon";

/// Fables that have historical alternative layouts.
pub const KNOWN_FABLES: [&str; 2] = ["acteon", "laigle-et-le-chapon"];

const ALTERNATIVE_AUTHOR: &str = "antoine-vincent-arnault";
const ALTERNATIVE_COLLECTION: &str = "fabulateurs-francais";
const ALTERNATIVE_BOOK: &str = "livre-1";

/// Structured location of one candidate document.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DocumentLocation {
    path: String,
}

impl DocumentLocation {
    fn from_segments<'a>(segments: impl IntoIterator<Item = &'a str>) -> Self {
        let path = segments.into_iter().collect::<Vec<_>>().join("/");
        Self { path }
    }

    /// Content path relative to the source root.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.path
    }

    /// File name of the document (last path segment).
    #[must_use]
    pub fn file_name(&self) -> &str {
        self.path.rsplit('/').next().unwrap_or(&self.path)
    }
}

impl fmt::Display for DocumentLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path)
    }
}

/// Layout rules mapping a [`ContentKey`] to candidate locations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentLayout {
    base_case_fable: String,
    base_case_dir: String,
    extensions: Vec<String>,
}

impl Default for ContentLayout {
    fn default() -> Self {
        Self {
            base_case_fable: BASE_CASE_FABLE.to_owned(),
            base_case_dir: BASE_CASE_DIR.to_owned(),
            extensions: vec!["mdx".to_owned(), "md".to_owned()],
        }
    }
}

impl ContentLayout {
    /// Default layout: `acteon` as base case, `mdx` then `md` extensions.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Override the base-case fable and the directory holding its files.
    #[must_use]
    pub fn with_base_case(mut self, fable: impl Into<String>, dir: impl Into<String>) -> Self {
        self.base_case_fable = fable.into();
        self.base_case_dir = dir.into().trim_matches('/').to_owned();
        self
    }

    /// Override the index document extensions, tried in order.
    ///
    /// An empty list keeps the current extensions.
    #[must_use]
    pub fn with_extensions(mut self, extensions: Vec<String>) -> Self {
        if !extensions.is_empty() {
            self.extensions = extensions;
        }
        self
    }

    /// Extensions tried for index documents.
    #[must_use]
    pub fn extensions(&self) -> &[String] {
        &self.extensions
    }

    /// Whether `key` designates the base-case fable.
    #[must_use]
    pub fn is_base_case(&self, key: &ContentKey) -> bool {
        key.fable() == self.base_case_fable
    }

    /// Single-file location of the base-case fable in `language`.
    #[must_use]
    pub fn base_case_location(&self, language: Language) -> DocumentLocation {
        let file = format!("{}.md", language.code());
        DocumentLocation::from_segments(
            self.base_case_dir
                .split('/')
                .filter(|seg| !seg.is_empty())
                .chain(std::iter::once(file.as_str())),
        )
    }

    /// Canonical locations for `key`, in the order they should be tried.
    ///
    /// The base-case fable has exactly one; other fables get one index
    /// document per configured extension.
    #[must_use]
    pub fn canonical_locations(&self, key: &ContentKey) -> Vec<DocumentLocation> {
        if self.is_base_case(key) {
            return vec![self.base_case_location(key.language())];
        }

        let author = key.author_path();
        self.extensions
            .iter()
            .map(|ext| {
                let index = format!("index.{ext}");
                DocumentLocation::from_segments(
                    std::iter::once(key.language().code())
                        .chain(author.segments())
                        .chain([key.book(), key.fable(), index.as_str()]),
                )
            })
            .collect()
    }

    /// Primary canonical location for `key`.
    #[must_use]
    pub fn primary_location(&self, key: &ContentKey) -> DocumentLocation {
        self.canonical_locations(key)
            .into_iter()
            .next()
            .unwrap_or_else(|| self.base_case_location(key.language()))
    }

    /// Historical alternative locations, for [`KNOWN_FABLES`] only.
    ///
    /// Returns an empty list for any other fable.
    #[must_use]
    pub fn alternative_locations(&self, key: &ContentKey) -> Vec<DocumentLocation> {
        let fable = key.fable();
        if !KNOWN_FABLES.contains(&fable) {
            return Vec::new();
        }

        let lang = key.language().code();
        let flat = format!("{lang}.md");
        vec![
            DocumentLocation::from_segments([
                lang,
                ALTERNATIVE_AUTHOR,
                ALTERNATIVE_BOOK,
                fable,
                "index.mdx",
            ]),
            DocumentLocation::from_segments([
                lang,
                ALTERNATIVE_COLLECTION,
                ALTERNATIVE_AUTHOR,
                ALTERNATIVE_BOOK,
                fable,
                "index.mdx",
            ]),
            DocumentLocation::from_segments([
                "fr",
                ALTERNATIVE_AUTHOR,
                ALTERNATIVE_BOOK,
                fable,
                flat.as_str(),
            ]),
        ]
    }
}

/// Primary content path for `key` under the default layout.
///
/// # Examples
///
/// ```
/// use fable_content::{ContentKey, Language, build_fable_path};
///
/// let key = ContentKey::new(Language::En, "antoine-vincent-arnault", "livre-1", "acteon").unwrap();
/// assert_eq!(build_fable_path(&key).as_str(), "fr/antoine-vincent-arnault/livre-1/acteon/en.md");
/// ```
#[must_use]
pub fn build_fable_path(key: &ContentKey) -> DocumentLocation {
    ContentLayout::default().primary_location(key)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn key(lang: Language, author: &str, fable: &str) -> ContentKey {
        ContentKey::new(lang, author, "livre-1", fable).unwrap()
    }

    fn paths(locations: &[DocumentLocation]) -> Vec<&str> {
        locations.iter().map(DocumentLocation::as_str).collect()
    }

    #[test]
    fn test_base_case_uses_flat_file() {
        let layout = ContentLayout::new();
        let k = key(Language::Fr, "antoine-vincent-arnault", "acteon");

        assert!(layout.is_base_case(&k));
        assert_eq!(
            paths(&layout.canonical_locations(&k)),
            vec!["fr/antoine-vincent-arnault/livre-1/acteon/fr.md"]
        );
    }

    #[test]
    fn test_base_case_ignores_author_and_language_root() {
        let layout = ContentLayout::new();
        let k = key(Language::De, "someone-else", "acteon");

        assert_eq!(
            layout.primary_location(&k).as_str(),
            "fr/antoine-vincent-arnault/livre-1/acteon/de.md"
        );
    }

    #[test]
    fn test_index_document_per_extension() {
        let layout = ContentLayout::new();
        let k = key(Language::En, "antoine-vincent-arnault", "le-renard");

        assert_eq!(
            paths(&layout.canonical_locations(&k)),
            vec![
                "en/antoine-vincent-arnault/livre-1/le-renard/index.mdx",
                "en/antoine-vincent-arnault/livre-1/le-renard/index.md",
            ]
        );
    }

    #[test]
    fn test_collection_author_splits_on_first_separator() {
        let layout = ContentLayout::new().with_extensions(vec!["mdx".to_owned()]);
        let k = key(
            Language::Es,
            "fabulateurs-francais/antoine-vincent-arnault",
            "laigle-et-le-chapon",
        );

        assert_eq!(
            layout.primary_location(&k).as_str(),
            "es/fabulateurs-francais/antoine-vincent-arnault/livre-1/laigle-et-le-chapon/index.mdx"
        );
    }

    #[test]
    fn test_custom_base_case() {
        let layout = ContentLayout::new().with_base_case("le-loup", "/de/x/le-loup/");
        let k = key(Language::It, "x", "le-loup");

        assert_eq!(layout.primary_location(&k).as_str(), "de/x/le-loup/it.md");
        assert!(!layout.is_base_case(&key(Language::It, "x", "acteon")));
    }

    #[test]
    fn test_empty_extension_list_is_ignored() {
        let layout = ContentLayout::new().with_extensions(Vec::new());
        assert_eq!(layout.extensions(), &["mdx".to_owned(), "md".to_owned()]);
    }

    #[test]
    fn test_alternatives_for_known_fable() {
        let layout = ContentLayout::new();
        let k = key(Language::En, "whoever", "laigle-et-le-chapon");

        assert_eq!(
            paths(&layout.alternative_locations(&k)),
            vec![
                "en/antoine-vincent-arnault/livre-1/laigle-et-le-chapon/index.mdx",
                "en/fabulateurs-francais/antoine-vincent-arnault/livre-1/laigle-et-le-chapon/index.mdx",
                "fr/antoine-vincent-arnault/livre-1/laigle-et-le-chapon/en.md",
            ]
        );
    }

    #[test]
    fn test_no_alternatives_for_unknown_fable() {
        let layout = ContentLayout::new();
        let k = key(Language::Fr, "antoine-vincent-arnault", "le-renard");
        assert!(layout.alternative_locations(&k).is_empty());
    }

    #[test]
    fn test_file_name() {
        let k = key(Language::Fr, "antoine-vincent-arnault", "le-renard");
        assert_eq!(build_fable_path(&k).file_name(), "index.mdx");
    }
}
