//! Front matter stripping.

use std::sync::LazyLock;

use regex::Regex;

/// Opening `---` line at file start, lazily up to the first closing `---` line.
static FRONT_MATTER_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?ms)\A---[ \t]*\r?\n.*?^---[ \t]*(?:\r?\n|\z)").unwrap()
});

/// Remove a leading metadata header delimited by `---` lines.
///
/// The header must open on the very first line. The first closing delimiter
/// line wins, and its trailing newline is removed with it. Input without an
/// opening delimiter, or with an unterminated header, is returned unchanged.
///
/// # Examples
///
/// ```
/// use fable_renderer::strip_front_matter;
///
/// assert_eq!(strip_front_matter("---\na: 1\n---\nBody"), "Body");
/// assert_eq!(strip_front_matter("Body\n---\n"), "Body\n---\n");
/// assert_eq!(strip_front_matter("---\nunterminated"), "---\nunterminated");
/// ```
pub fn strip_front_matter(markdown: &str) -> &str {
    match FRONT_MATTER_RE.find(markdown) {
        Some(m) => &markdown[m.end()..],
        None => markdown,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strips_yaml_header() {
        let input = "---\ntitle: Actéon\nauthor: Arnault\n---\n# Actéon\n";
        assert_eq!(strip_front_matter(input), "# Actéon\n");
    }

    #[test]
    fn test_first_closing_delimiter_wins() {
        let input = "---\na: 1\n---\nBody\n---\nmore\n";
        assert_eq!(strip_front_matter(input), "Body\n---\nmore\n");
    }

    #[test]
    fn test_empty_header() {
        assert_eq!(strip_front_matter("---\n---\nBody"), "Body");
    }

    #[test]
    fn test_header_at_end_of_input() {
        assert_eq!(strip_front_matter("---\na: 1\n---"), "");
    }

    #[test]
    fn test_crlf_line_endings() {
        assert_eq!(strip_front_matter("---\r\na: 1\r\n---\r\nBody"), "Body");
    }

    #[test]
    fn test_header_not_at_start_is_kept() {
        let input = "Intro\n---\na: 1\n---\nBody";
        assert_eq!(strip_front_matter(input), input);
    }

    #[test]
    fn test_unterminated_header_is_kept() {
        let input = "---\na: 1\nBody";
        assert_eq!(strip_front_matter(input), input);
    }

    #[test]
    fn test_dashes_inside_value_do_not_close() {
        let input = "---\nsubtitle: a---b\n---\nBody";
        assert_eq!(strip_front_matter(input), "Body");
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(strip_front_matter(""), "");
    }
}
