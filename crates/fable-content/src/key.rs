//! Fable keys.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::language::Language;

/// Error returned when a content key field is unusable as a path segment.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum KeyError {
    /// Field is empty.
    #[error("{0} cannot be empty")]
    Empty(&'static str),
    /// Field contains an unsafe segment or more `/` than allowed.
    #[error("{field} is not a valid path segment: {value:?}")]
    InvalidSegment {
        /// Field name.
        field: &'static str,
        /// Offending value.
        value: String,
    },
}

/// Identifies one document: a fable in a language.
///
/// Equality is exact and case-sensitive on all four fields.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ContentKey {
    language: Language,
    author: String,
    book: String,
    fable: String,
}

impl ContentKey {
    /// Build a validated key.
    ///
    /// `author` may be `collection/author` with no further nesting; `book` and
    /// `fable` must be single path segments.
    ///
    /// # Errors
    ///
    /// Returns [`KeyError`] if a field is empty or would produce an unsafe path.
    pub fn new(
        language: Language,
        author: impl Into<String>,
        book: impl Into<String>,
        fable: impl Into<String>,
    ) -> Result<Self, KeyError> {
        let author = author.into();
        let book = book.into();
        let fable = fable.into();

        validate_segments("author", &author, true)?;
        validate_segments("book", &book, false)?;
        validate_segments("fable", &fable, false)?;

        Ok(Self {
            language,
            author,
            book,
            fable,
        })
    }

    /// Language of the document.
    #[must_use]
    pub fn language(&self) -> Language {
        self.language
    }

    /// Author field as given, possibly `collection/author`.
    #[must_use]
    pub fn author(&self) -> &str {
        &self.author
    }

    /// Book identifier (e.g., `"livre-1"`).
    #[must_use]
    pub fn book(&self) -> &str {
        &self.book
    }

    /// Fable identifier (e.g., `"acteon"`).
    #[must_use]
    pub fn fable(&self) -> &str {
        &self.fable
    }

    /// Author split into optional collection and actual author.
    #[must_use]
    pub fn author_path(&self) -> AuthorPath<'_> {
        AuthorPath::parse(&self.author)
    }

    /// Same key in another language.
    #[must_use]
    pub fn with_language(&self, language: Language) -> Self {
        Self {
            language,
            ..self.clone()
        }
    }
}

impl fmt::Display for ContentKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}/{}/{}/{}",
            self.language, self.author, self.book, self.fable
        )
    }
}

/// Author field split into collection and author.
///
/// Only one level of collection nesting is recognized: segments after the
/// second are ignored, so `a/b/c` yields collection `a` and author `b`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthorPath<'a> {
    /// Collection grouping several authors (e.g., `"fabulateurs-francais"`).
    pub collection: Option<&'a str>,
    /// Author identifier.
    pub author: &'a str,
}

impl<'a> AuthorPath<'a> {
    /// Split an author field.
    #[must_use]
    pub fn parse(author: &'a str) -> Self {
        match author.split_once('/') {
            Some((collection, rest)) => Self {
                collection: Some(collection),
                author: rest.split_once('/').map_or(rest, |(author, _)| author),
            },
            None => Self {
                collection: None,
                author,
            },
        }
    }

    /// Path segments in order: collection (if any), then author.
    pub fn segments(&self) -> impl Iterator<Item = &'a str> {
        self.collection.into_iter().chain(std::iter::once(self.author))
    }
}

fn validate_segments(field: &'static str, value: &str, allow_nesting: bool) -> Result<(), KeyError> {
    if value.is_empty() {
        return Err(KeyError::Empty(field));
    }
    let invalid = || KeyError::InvalidSegment {
        field,
        value: value.to_owned(),
    };
    let max_separators = usize::from(allow_nesting);
    if value.contains('\\') || value.matches('/').count() > max_separators {
        return Err(invalid());
    }
    if value
        .split('/')
        .any(|seg| seg.is_empty() || seg == "." || seg == "..")
    {
        return Err(invalid());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(author: &str) -> ContentKey {
        ContentKey::new(Language::Fr, author, "livre-1", "acteon").unwrap()
    }

    #[test]
    fn test_new_valid_key() {
        let k = key("antoine-vincent-arnault");
        assert_eq!(k.language(), Language::Fr);
        assert_eq!(k.author(), "antoine-vincent-arnault");
        assert_eq!(k.book(), "livre-1");
        assert_eq!(k.fable(), "acteon");
        assert_eq!(k.to_string(), "fr/antoine-vincent-arnault/livre-1/acteon");
    }

    #[test]
    fn test_equality_is_case_sensitive() {
        assert_ne!(key("Arnault"), key("arnault"));
        assert_eq!(key("arnault"), key("arnault"));
    }

    #[test]
    fn test_empty_fields_rejected() {
        assert_eq!(
            ContentKey::new(Language::Fr, "", "b", "f"),
            Err(KeyError::Empty("author"))
        );
        assert_eq!(
            ContentKey::new(Language::Fr, "a", "", "f"),
            Err(KeyError::Empty("book"))
        );
        assert_eq!(
            ContentKey::new(Language::Fr, "a", "b", ""),
            Err(KeyError::Empty("fable"))
        );
    }

    #[test]
    fn test_unsafe_segments_rejected() {
        for (author, book, fable) in [
            ("..", "b", "f"),
            ("a/", "b", "f"),
            ("/a", "b", "f"),
            ("a", "b/c", "f"),
            ("a/b/c", "b", "f"),
            ("a", "b", "../f"),
            ("a\\b", "b", "f"),
        ] {
            assert!(
                ContentKey::new(Language::En, author, book, fable).is_err(),
                "{author:?} {book:?} {fable:?}"
            );
        }
    }

    #[test]
    fn test_author_path_plain() {
        let path = AuthorPath::parse("antoine-vincent-arnault");
        assert_eq!(path.collection, None);
        assert_eq!(path.author, "antoine-vincent-arnault");
        assert_eq!(
            path.segments().collect::<Vec<_>>(),
            vec!["antoine-vincent-arnault"]
        );
    }

    #[test]
    fn test_author_path_with_collection() {
        let k = key("fabulateurs-francais/antoine-vincent-arnault");
        let path = k.author_path();
        assert_eq!(path.collection, Some("fabulateurs-francais"));
        assert_eq!(path.author, "antoine-vincent-arnault");
    }

    #[test]
    fn test_author_path_ignores_deeper_nesting() {
        let path = AuthorPath::parse("a/b/c");
        assert_eq!(path.collection, Some("a"));
        assert_eq!(path.author, "b");
        assert_eq!(path.segments().collect::<Vec<_>>(), vec!["a", "b"]);
    }

    #[test]
    fn test_nested_author_rejected() {
        assert_eq!(
            ContentKey::new(Language::Fr, "fabulateurs/arnault/extra", "livre-1", "acteon"),
            Err(KeyError::InvalidSegment {
                field: "author",
                value: "fabulateurs/arnault/extra".to_owned(),
            })
        );
        assert!(ContentKey::new(Language::Fr, "fabulateurs/arnault", "livre-1", "acteon").is_ok());
    }

    #[test]
    fn test_with_language() {
        let k = key("arnault").with_language(Language::It);
        assert_eq!(k.language(), Language::It);
        assert_eq!(k.fable(), "acteon");
    }
}
