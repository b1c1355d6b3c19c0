//! Output formatters for markdown-docs.
//!
//! Holds the catalog data model shared by every layer, the display-name
//! helper, and the emitters that turn catalogs and rendered documents into
//! HTML pages, JSON or plain text.

mod model;
mod names;
mod page;

use std::fmt::Write as _;

use markdown_docs_config::{Config, SiteSettings};
use serde_json::json;

pub use model::{Catalog, CatalogDiagnostic, DiagnosticKind, DocumentDescriptor};
pub use names::format_name;
pub use page::document_href;

/// Output format for the `catalog` command.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CatalogFormat {
    Plain,
    Json,
    Html,
}

/// Page and report renderer bound to the site settings.
#[derive(Clone, Debug)]
pub struct Renderer {
    site: SiteSettings,
}

impl Renderer {
    /// Build a renderer from configuration.
    pub fn from_config(config: &Config) -> Self {
        Self {
            site: config.site.clone(),
        }
    }

    /// Listing view: every category with links to its documents.
    pub fn index_page(&self, catalog: &Catalog) -> String {
        let body = page::index_body(
            catalog,
            &self.site.title,
            &self.site.tagline,
            &self.site.category_suffix,
            &self.site.route_prefix,
        );
        page::layout(&self.site.title, &body)
    }

    /// Detail view. `html` is embedded as-is.
    pub fn document_page(&self, title: &str, html: &str) -> String {
        let body = page::document_body(&self.site.title, html);
        page::layout(&format!("{title} | {}", self.site.title), &body)
    }

    pub fn not_found_page(&self) -> String {
        let body = page::not_found_body(&self.site.title);
        page::layout(&format!("Not found | {}", self.site.title), &body)
    }

    /// Link target for a descriptor under the configured route prefix.
    pub fn href(&self, descriptor: &DocumentDescriptor) -> String {
        document_href(&self.site.route_prefix, &descriptor.path)
    }

    /// Render the catalog report for the CLI.
    pub fn catalog(
        &self,
        catalog: &Catalog,
        diagnostics: &[CatalogDiagnostic],
        format: CatalogFormat,
    ) -> Result<String, serde_json::Error> {
        match format {
            CatalogFormat::Plain => Ok(self.catalog_plain(catalog, diagnostics)),
            CatalogFormat::Json => self.catalog_json(catalog, diagnostics),
            CatalogFormat::Html => Ok(self.index_page(catalog)),
        }
    }

    fn catalog_plain(&self, catalog: &Catalog, diagnostics: &[CatalogDiagnostic]) -> String {
        let mut output = String::new();
        if catalog.is_empty() {
            output.push_str("No documentation found\n");
        }
        for (category, documents) in catalog {
            let _ = writeln!(output, "{} ({category})", format_name(category));
            if documents.is_empty() {
                output.push_str("  (no documents)\n");
            }
            for document in documents {
                let _ = writeln!(
                    output,
                    "  - {}  {}",
                    format_name(&document.name),
                    self.href(document)
                );
            }
        }
        for diagnostic in diagnostics {
            let _ = writeln!(output, "warning: {diagnostic}");
        }
        output
    }

    fn catalog_json(
        &self,
        catalog: &Catalog,
        diagnostics: &[CatalogDiagnostic],
    ) -> Result<String, serde_json::Error> {
        let categories: Vec<_> = catalog
            .iter()
            .map(|(category, documents)| {
                json!({
                    "name": category,
                    "label": format_name(category),
                    "documents": documents
                        .iter()
                        .map(|document| {
                            json!({
                                "name": document.name,
                                "label": format_name(&document.name),
                                "path": document.path,
                                "href": self.href(document),
                                "is_directory": document.is_directory,
                            })
                        })
                        .collect::<Vec<_>>(),
                })
            })
            .collect();

        let payload = json!({
            "generated_at": chrono::Utc::now().to_rfc3339(),
            "document_count": catalog.document_count(),
            "categories": categories,
            "diagnostics": diagnostics,
        });
        serde_json::to_string_pretty(&payload)
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;
    use markdown_docs_config::LoadOptions;

    fn renderer() -> Renderer {
        let temp = tempfile::TempDir::new().expect("tempdir");
        let config = Config::load(LoadOptions::default().with_working_dir(temp.path()))
            .expect("default config");
        Renderer::from_config(&config)
    }

    fn sample_catalog() -> Catalog {
        let mut catalog = Catalog::new();
        catalog
            .insert_category("dart")
            .push(DocumentDescriptor::new("data-types", "/dart/data-types"));
        catalog.insert_category("empty_one");
        catalog
    }

    #[test]
    fn index_lists_categories_and_links() {
        let html = renderer().index_page(&sample_catalog());
        assert!(html.contains("<h2>Dart Tutorial</h2>"));
        assert!(html.contains("<a href=\"/docs/dart/data-types\">Data Types</a>"));
        assert!(html.contains("<h2>Empty One Tutorial</h2>"));
        assert!(html.contains("No documents available"));
    }

    #[test]
    fn empty_catalog_reports_no_documentation() {
        let html = renderer().index_page(&Catalog::new());
        assert!(html.contains("No documentation found"));
    }

    #[test]
    fn index_escapes_names() {
        let mut catalog = Catalog::new();
        catalog
            .insert_category("<script>")
            .push(DocumentDescriptor::new("a&b", "/<script>/a&b"));
        let html = renderer().index_page(&catalog);
        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;script&gt; Tutorial"));
        assert!(html.contains("href=\"/docs/%3Cscript%3E/a%26b\""));
    }

    #[test]
    fn document_page_embeds_html_verbatim() {
        let page = renderer().document_page("Topic", "<h1>Topic</h1>\n<div>raw</div>\n");
        assert!(page.contains("<article class=\"markdown\">\n<h1>Topic</h1>\n<div>raw</div>\n"));
        assert!(page.contains("<title>Topic | Documentation Hub</title>"));
    }

    #[test]
    fn json_catalog_carries_documents_and_diagnostics() {
        let diagnostics = vec![CatalogDiagnostic {
            kind: DiagnosticKind::ReadFailed,
            path: PathBuf::from("/srv/docs/locked"),
            message: "permission denied".into(),
        }];
        let rendered = renderer()
            .catalog(&sample_catalog(), &diagnostics, CatalogFormat::Json)
            .expect("json");
        let value: serde_json::Value = serde_json::from_str(&rendered).expect("parse");

        assert_eq!(value["document_count"], 1);
        assert_eq!(value["categories"][0]["name"], "dart");
        assert_eq!(value["categories"][0]["documents"][0]["path"], "/dart/data-types");
        assert_eq!(value["categories"][1]["documents"].as_array().map(Vec::len), Some(0));
        assert_eq!(value["diagnostics"][0]["kind"], "read-failed");
    }

    #[test]
    fn plain_catalog_lists_links() {
        let rendered = renderer()
            .catalog(&sample_catalog(), &[], CatalogFormat::Plain)
            .expect("plain");
        assert!(rendered.contains("Dart (dart)\n  - Data Types  /docs/dart/data-types\n"));
        assert!(rendered.contains("Empty One (empty_one)\n  (no documents)\n"));
    }
}
