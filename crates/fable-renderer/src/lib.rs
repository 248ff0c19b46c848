//! Markdown to sanitized, styled HTML for fable content.
//!
//! [`MarkdownRenderer::render`] is a total function: any input string, however
//! malformed, produces an HTML string. The pipeline runs in four fixed steps:
//!
//! 1. [`strip_front_matter`] removes a leading `---` metadata block
//! 2. `pulldown-cmark` parses the rest into raw HTML
//! 3. `ammonia` removes scripts, event handlers and other unsafe markup
//! 4. [`apply_presentation_classes`] injects utility classes by tag name
//!
//! Step 4 is a textual substitution pass, not an HTML tree rewrite. Tags that
//! carry attributes or span lines are left unstyled, and nested markup may
//! rewrite imperfectly. Stored pages depend on that exact output, so it must
//! not be replaced with a DOM-aware pass.
//!
//! # Example
//!
//! ```
//! use fable_renderer::MarkdownRenderer;
//!
//! let renderer = MarkdownRenderer::new();
//! let html = renderer.render("---\ntitle: Actéon\n---\n# Actéon\n\nUn chasseur.");
//! assert!(html.contains(r#"<h1 class="text-2xl font-bold text-slate-800 mb-6 mt-4">Actéon</h1>"#));
//! assert!(!html.contains("title:"));
//! ```

mod escape;
mod front_matter;
mod renderer;
mod sanitize;
mod style;

pub use escape::escape_html;
pub use front_matter::strip_front_matter;
pub use renderer::MarkdownRenderer;
pub use sanitize::Sanitizer;
pub use style::apply_presentation_classes;
