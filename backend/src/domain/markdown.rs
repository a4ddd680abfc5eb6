//! Markdown to HTML rendering for `.md` documents.

use pulldown_cmark::{Options, Parser, html};

/// Stateless CommonMark renderer.
///
/// Tables, strikethrough and task lists are enabled on top of the CommonMark
/// core. Raw HTML in the source passes through as the engine emits it.
///
/// # Examples
/// ```
/// use cms::domain::MarkdownRenderer;
///
/// let html = MarkdownRenderer::new().render("There is **bold** here");
/// assert!(html.contains("<strong>bold</strong>"));
/// ```
#[derive(Debug, Clone, Copy)]
pub struct MarkdownRenderer {
    options: Options,
}

impl Default for MarkdownRenderer {
    fn default() -> Self {
        let mut options = Options::empty();
        options.insert(Options::ENABLE_STRIKETHROUGH);
        options.insert(Options::ENABLE_TABLES);
        options.insert(Options::ENABLE_TASKLISTS);
        Self { options }
    }
}

impl MarkdownRenderer {
    /// Renderer with the standard extension set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Convert `text` into an HTML fragment.
    #[must_use]
    pub fn render(&self, text: &str) -> String {
        let parser = Parser::new_ext(text, self.options);
        let mut out = String::with_capacity(text.len() + text.len() / 2);
        html::push_html(&mut out, parser);
        out
    }
}
