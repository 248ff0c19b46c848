//! HTML sanitization.

/// Allowlist sanitizer for rendered markdown.
///
/// Keeps structural and formatting tags (headings, paragraphs, lists, code,
/// tables, emphasis, links, images) and drops scripts, styles, event handler
/// attributes and `javascript:` URLs. `class` attributes are dropped too, so
/// code fences come out as plain `<pre><code>` ready for styling.
pub struct Sanitizer {
    builder: ammonia::Builder<'static>,
}

impl Sanitizer {
    /// Create a sanitizer with the default allowlist.
    ///
    /// Links keep their original attributes: no `rel` is injected, so the
    /// styling pass sees `<a href="...">` exactly as the parser produced it.
    #[must_use]
    pub fn new() -> Self {
        let mut builder = ammonia::Builder::default();
        builder.link_rel(None);
        Self { builder }
    }

    /// Sanitize an HTML fragment.
    #[must_use]
    pub fn clean(&self, html: &str) -> String {
        self.builder.clean(html).to_string()
    }
}

impl Default for Sanitizer {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Sanitizer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Sanitizer").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_removes_script() {
        let out = Sanitizer::new().clean("<p>ok</p><script>alert(1)</script>");
        assert_eq!(out, "<p>ok</p>");
    }

    #[test]
    fn test_removes_event_handlers() {
        let out = Sanitizer::new().clean(r#"<p onclick="steal()">text</p>"#);
        assert_eq!(out, "<p>text</p>");
    }

    #[test]
    fn test_removes_javascript_urls() {
        let out = Sanitizer::new().clean(r#"<a href="javascript:alert(1)">x</a>"#);
        assert!(!out.contains("javascript:"));
    }

    #[test]
    fn test_keeps_links_without_rel() {
        let out = Sanitizer::new().clean(r#"<a href="https://example.com">x</a>"#);
        assert_eq!(out, r#"<a href="https://example.com">x</a>"#);
    }

    #[test]
    fn test_drops_class_attribute() {
        let out = Sanitizer::new().clean(r#"<pre><code class="language-rust">fn</code></pre>"#);
        assert_eq!(out, "<pre><code>fn</code></pre>");
    }

    #[test]
    fn test_keeps_formatting() {
        let input = "<h2>T</h2><ul><li><strong>a</strong> <em>b</em></li></ul>";
        assert_eq!(Sanitizer::new().clean(input), input);
    }
}
