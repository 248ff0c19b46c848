//! Markdown renderer.

use pulldown_cmark::{Options, Parser, html};

use crate::front_matter::strip_front_matter;
use crate::sanitize::Sanitizer;
use crate::style::apply_presentation_classes;

/// Renders fable markdown into sanitized, styled HTML.
///
/// Holds a prebuilt [`Sanitizer`]; construct once and share.
#[derive(Debug)]
pub struct MarkdownRenderer {
    sanitizer: Sanitizer,
    gfm: bool,
}

impl MarkdownRenderer {
    /// Create a new renderer with GFM enabled by default.
    #[must_use]
    pub fn new() -> Self {
        Self {
            sanitizer: Sanitizer::new(),
            gfm: true,
        }
    }

    /// Enable or disable GitHub Flavored Markdown features.
    ///
    /// GFM is enabled by default. When enabled, the parser supports:
    /// - Tables
    /// - Strikethrough (`~~text~~`)
    /// - Task lists (`- [ ] item`)
    #[must_use]
    pub fn with_gfm(mut self, enabled: bool) -> Self {
        self.gfm = enabled;
        self
    }

    /// Get parser options based on GFM configuration.
    #[must_use]
    pub fn parser_options(&self) -> Options {
        if self.gfm {
            Options::ENABLE_TABLES | Options::ENABLE_STRIKETHROUGH | Options::ENABLE_TASKLISTS
        } else {
            Options::empty()
        }
    }

    /// Parse markdown into unsanitized HTML.
    #[must_use]
    pub fn to_raw_html(&self, markdown: &str) -> String {
        let parser = Parser::new_ext(markdown, self.parser_options());
        let mut output = String::with_capacity(markdown.len() * 3 / 2);
        html::push_html(&mut output, parser);
        output
    }

    /// Render a raw document to sanitized, styled HTML.
    ///
    /// Never fails: empty or malformed input yields a (possibly empty) string.
    #[must_use]
    pub fn render(&self, raw: &str) -> String {
        let body = strip_front_matter(raw);
        let unsafe_html = self.to_raw_html(body);
        let safe_html = self.sanitizer.clean(&unsafe_html);
        apply_presentation_classes(&safe_html)
    }
}

impl Default for MarkdownRenderer {
    fn default() -> Self {
        Self::new()
    }
}
