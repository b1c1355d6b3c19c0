//! Markdown to HTML conversion.
//!
//! Conversion is delegated to `pulldown-cmark` with the GitHub-flavoured
//! extensions enabled (tables, footnotes, strikethrough, task lists). The
//! produced HTML is **not** sanitized: raw HTML blocks in the source are
//! passed through untouched, so callers must only feed trusted documents.
//!
//! While streaming events into the HTML writer the renderer also records the
//! plain text of the first heading, which page templates use as a title.

use pulldown_cmark::{html, Event, Options, Parser, Tag};

/// Output of a single conversion.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RenderedMarkdown {
    pub html: String,
    /// Plain text of the first heading, if the document has one.
    pub title: Option<String>,
}

/// Reusable markdown converter carrying the parser options.
#[derive(Clone, Copy, Debug)]
pub struct MarkdownRenderer {
    options: Options,
}

impl Default for MarkdownRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl MarkdownRenderer {
    pub fn new() -> Self {
        let mut options = Options::empty();
        options.insert(Options::ENABLE_TABLES);
        options.insert(Options::ENABLE_FOOTNOTES);
        options.insert(Options::ENABLE_STRIKETHROUGH);
        options.insert(Options::ENABLE_TASKLISTS);
        Self { options }
    }

    /// Convert `source` to HTML, capturing the first heading along the way.
    pub fn render(&self, source: &str) -> RenderedMarkdown {
        let mut title = TitleCollector::default();
        let parser = Parser::new_ext(source, self.options).inspect(|event| title.observe(event));

        let mut output = String::with_capacity(source.len() + source.len() / 2);
        html::push_html(&mut output, parser);

        RenderedMarkdown {
            html: output,
            title: title.finish(),
        }
    }
}

#[derive(Default)]
enum TitleCollector {
    #[default]
    Waiting,
    Capturing(String),
    Done(String),
}

impl TitleCollector {
    fn observe(&mut self, event: &Event<'_>) {
        match (&mut *self, event) {
            (TitleCollector::Waiting, Event::Start(Tag::Heading(..))) => {
                *self = TitleCollector::Capturing(String::new());
            }
            (TitleCollector::Capturing(text), Event::Text(chunk) | Event::Code(chunk)) => {
                text.push_str(chunk);
            }
            (TitleCollector::Capturing(text), Event::SoftBreak | Event::HardBreak) => {
                text.push(' ');
            }
            (TitleCollector::Capturing(text), Event::End(Tag::Heading(..))) => {
                let trimmed = text.trim();
                *self = if trimmed.is_empty() {
                    TitleCollector::Waiting
                } else {
                    TitleCollector::Done(trimmed.to_string())
                };
            }
            _ => {}
        }
    }

    fn finish(self) -> Option<String> {
        match self {
            TitleCollector::Done(title) => Some(title),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn converts_headings_and_paragraphs() {
        let rendered = MarkdownRenderer::new().render("# Data Types\n\nIntegers and *floats*.\n");
        assert!(rendered.html.contains("<h1>Data Types</h1>"));
        assert!(rendered.html.contains("<em>floats</em>"));
        assert!(!rendered.html.contains("# Data"));
        assert_eq!(rendered.title.as_deref(), Some("Data Types"));
    }

    #[test]
    fn title_flattens_inline_markup() {
        let rendered = MarkdownRenderer::new().render("intro\n\n## The `main` *entry*\n\n# Later\n");
        assert_eq!(rendered.title.as_deref(), Some("The main entry"));
    }

    #[test]
    fn empty_heading_does_not_become_title() {
        let rendered = MarkdownRenderer::new().render("#\n\n## Real\n");
        assert_eq!(rendered.title.as_deref(), Some("Real"));
    }

    #[test]
    fn documents_without_headings_have_no_title() {
        let rendered = MarkdownRenderer::new().render("just text\n");
        assert_eq!(rendered.title, None);
        assert_eq!(rendered.html, "<p>just text</p>\n");
    }

    #[test]
    fn tables_and_strikethrough_are_enabled() {
        let html = MarkdownRenderer::new()
            .render("| a | b |\n|---|---|\n| 1 | 2 |\n\n~~gone~~\n")
            .html;
        assert!(html.contains("<table>"));
        assert!(html.contains("<del>gone</del>"));
    }

    #[test]
    fn raw_html_passes_through_unsanitized() {
        let html = MarkdownRenderer::new()
            .render("<div class=\"note\">kept</div>\n")
            .html;
        assert!(html.contains("<div class=\"note\">kept</div>"));
    }
}
