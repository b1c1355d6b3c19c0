//! High-level operations shared by the markdown-docs front ends.
//!
//! Two independent operations read from the same document root: the catalog
//! builder walks the tree and groups documents by category, the document
//! renderer resolves one slug and converts the file to HTML. Both take the
//! root explicitly, so they can run against any fixture tree.

mod catalog;
mod document;
mod slug;

use markdown_docs_config::Config;
use markdown_docs_format::{CatalogFormat, Renderer};
use markdown_docs_render::MarkdownRenderer;
use thiserror::Error;
use tracing::warn;

pub use catalog::{build_catalog, CatalogOutcome};
pub use document::{render_document, resolve_document_path, DocumentError, RenderedDocument};
pub use markdown_docs_format::{
    format_name, Catalog, CatalogDiagnostic, DiagnosticKind, DocumentDescriptor,
};
pub use slug::{parse_slug, validate_slug, SlugError};

/// Errors surfaced by operations that can actually fail.
#[derive(Debug, Error)]
pub enum OperationError {
    #[error(transparent)]
    Document(#[from] DocumentError),
    #[error("failed to serialize catalog: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Rendered catalog report together with the data it was built from.
#[derive(Clone, Debug)]
pub struct CatalogReport {
    pub outcome: CatalogOutcome,
    pub rendered: String,
}

/// Operation bundle wired from configuration.
#[derive(Clone, Debug)]
pub struct Operations {
    config: Config,
    markdown: MarkdownRenderer,
    pages: Renderer,
}

impl Operations {
    /// Assemble the operation layer from config by wiring the markdown
    /// converter and the page renderer.
    pub fn new(config: Config) -> Self {
        let pages = Renderer::from_config(&config);
        Self {
            config,
            markdown: MarkdownRenderer::new(),
            pages,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Build the catalog of the configured document root.
    pub fn catalog(&self) -> CatalogOutcome {
        build_catalog(&self.config.docs.root, &self.config.docs.extension)
    }

    /// Build the catalog and render it in `format`.
    pub fn catalog_report(&self, format: CatalogFormat) -> Result<CatalogReport, OperationError> {
        let outcome = self.catalog();
        let rendered = self
            .pages
            .catalog(&outcome.catalog, &outcome.diagnostics, format)?;
        Ok(CatalogReport { outcome, rendered })
    }

    /// Render the document addressed by `slug`.
    pub fn render<S: AsRef<str>>(&self, slug: &[S]) -> Result<RenderedDocument, DocumentError> {
        let result = render_document(
            &self.config.docs.root,
            &self.config.docs.extension,
            slug,
            &self.markdown,
        );
        if let Err(err) = &result {
            let joined = slug.iter().map(|s| s.as_ref()).collect::<Vec<&str>>().join("/");
            warn!(slug = %joined, "document unavailable: {err}");
        }
        result
    }

    /// Listing view as a full HTML page.
    pub fn index_page(&self) -> String {
        let outcome = self.catalog();
        self.pages.index_page(&outcome.catalog)
    }

    /// Detail view as a full HTML page.
    pub fn document_page<S: AsRef<str>>(&self, slug: &[S]) -> Result<String, DocumentError> {
        let document = self.render(slug)?;
        Ok(self
            .pages
            .document_page(&document.display_title(), &document.html))
    }

    pub fn not_found_page(&self) -> String {
        self.pages.not_found_page()
    }
}
