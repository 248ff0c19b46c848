//! Presentation class injection.

use std::sync::LazyLock;

use regex::Regex;

/// One substitution: pattern and replacement template.
struct StyleRule {
    pattern: Regex,
    replacement: &'static str,
}

impl StyleRule {
    fn new(pattern: &str, replacement: &'static str) -> Self {
        Self {
            pattern: Regex::new(pattern).unwrap(),
            replacement,
        }
    }
}

/// Rules in application order. Later rules see the output of earlier ones.
static STYLE_RULES: LazyLock<Vec<StyleRule>> = LazyLock::new(|| {
    vec![
        // Headings
        StyleRule::new(
            r"<h1>(.*?)</h1>",
            r#"<h1 class="text-2xl font-bold text-slate-800 mb-6 mt-4">${1}</h1>"#,
        ),
        StyleRule::new(
            r"<h2>(.*?)</h2>",
            r#"<h2 class="text-xl font-semibold text-slate-700 mb-4 mt-8">${1}</h2>"#,
        ),
        StyleRule::new(
            r"<h3>(.*?)</h3>",
            r#"<h3 class="text-lg font-semibold text-slate-700 mb-3 mt-6">${1}</h3>"#,
        ),
        // Paragraphs
        StyleRule::new(
            r"<p>(.*?)</p>",
            r#"<p class="text-slate-600 leading-relaxed mb-4">${1}</p>"#,
        ),
        // Lists
        StyleRule::new(
            r"<ul>",
            r#"<ul class="list-disc list-inside mb-6 space-y-2 ml-4">"#,
        ),
        StyleRule::new(
            r"<ol>",
            r#"<ol class="list-decimal list-inside mb-6 space-y-2 ml-4">"#,
        ),
        StyleRule::new(r"<li>", r#"<li class="mb-2 text-slate-600">"#),
        // Code
        StyleRule::new(
            r"(?s)<pre><code>(.*?)</code></pre>",
            r#"<pre class="bg-slate-100 p-4 rounded-lg overflow-x-auto my-4"><code class="text-sm font-mono text-slate-800">${1}</code></pre>"#,
        ),
        StyleRule::new(
            r"<code>(.*?)</code>",
            r#"<code class="bg-slate-100 px-2 py-1 rounded text-sm font-mono text-slate-800">${1}</code>"#,
        ),
        // Links
        StyleRule::new(
            r#"<a href="(.*?)">"#,
            r#"<a href="${1}" class="text-blue-600 hover:text-blue-800 underline transition-colors">"#,
        ),
    ]
});

/// Inject presentation classes into sanitized HTML.
///
/// Matches bare opening tags only (`<p>`, not `<p class="x">`), and content
/// captures stop at line breaks except inside `<pre><code>` blocks. Both
/// limits are part of the output contract.
///
/// # Examples
///
/// ```
/// use fable_renderer::apply_presentation_classes;
///
/// assert_eq!(
///     apply_presentation_classes("<li>a</li>"),
///     r#"<li class="mb-2 text-slate-600">a</li>"#,
/// );
/// ```
pub fn apply_presentation_classes(html: &str) -> String {
    STYLE_RULES.iter().fold(html.to_owned(), |acc, rule| {
        rule.pattern.replace_all(&acc, rule.replacement).into_owned()
    })
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_headings() {
        assert_eq!(
            apply_presentation_classes("<h1>A</h1><h2>B</h2><h3>C</h3><h4>D</h4>"),
            concat!(
                r#"<h1 class="text-2xl font-bold text-slate-800 mb-6 mt-4">A</h1>"#,
                r#"<h2 class="text-xl font-semibold text-slate-700 mb-4 mt-8">B</h2>"#,
                r#"<h3 class="text-lg font-semibold text-slate-700 mb-3 mt-6">C</h3>"#,
                "<h4>D</h4>",
            )
        );
    }

    #[test]
    fn test_paragraph_single_line_only() {
        assert_eq!(
            apply_presentation_classes("<p>one</p>"),
            r#"<p class="text-slate-600 leading-relaxed mb-4">one</p>"#
        );
        // Multi-line paragraphs are left as-is.
        assert_eq!(
            apply_presentation_classes("<p>one\ntwo</p>"),
            "<p>one\ntwo</p>"
        );
    }

    #[test]
    fn test_lists() {
        assert_eq!(
            apply_presentation_classes("<ol><li>x</li></ol>"),
            concat!(
                r#"<ol class="list-decimal list-inside mb-6 space-y-2 ml-4">"#,
                r#"<li class="mb-2 text-slate-600">x</li></ol>"#,
            )
        );
    }

    #[test]
    fn test_code_block_spans_lines_and_skips_inline_rule() {
        let out = apply_presentation_classes("<pre><code>a\nb\n</code></pre>");
        assert_eq!(
            out,
            concat!(
                r#"<pre class="bg-slate-100 p-4 rounded-lg overflow-x-auto my-4">"#,
                r#"<code class="text-sm font-mono text-slate-800">a"#,
                "\nb\n</code></pre>",
            )
        );
    }

    #[test]
    fn test_inline_code() {
        assert_eq!(
            apply_presentation_classes("<code>x</code>"),
            r#"<code class="bg-slate-100 px-2 py-1 rounded text-sm font-mono text-slate-800">x</code>"#
        );
    }

    #[test]
    fn test_links() {
        assert_eq!(
            apply_presentation_classes(r#"<a href="/fr/">x</a>"#),
            r#"<a href="/fr/" class="text-blue-600 hover:text-blue-800 underline transition-colors">x</a>"#
        );
    }

    #[test]
    fn test_tag_with_attributes_untouched() {
        let input = r#"<p lang="fr">x</p>"#;
        assert_eq!(apply_presentation_classes(input), input);
    }

    #[test]
    fn test_inline_code_inside_paragraph() {
        // Paragraph and inline code rules both apply.
        let out = apply_presentation_classes("<p>a <code>b</code> c</p>");
        assert!(out.starts_with(r#"<p class="text-slate-600 leading-relaxed mb-4">a <code class="#));
    }
}
