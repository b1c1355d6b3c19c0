use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use markdown_docs_render::MarkdownRenderer;
use thiserror::Error;
use tracing::debug;

use crate::slug::{validate_slug, SlugError};

/// One document converted to HTML.
#[derive(Clone, Debug)]
pub struct RenderedDocument {
    pub slug: Vec<String>,
    pub source_path: PathBuf,
    /// Plain text of the first heading, when present.
    pub title: Option<String>,
    /// Unsanitized HTML, ready for direct embedding.
    pub html: String,
}

impl RenderedDocument {
    /// Heading title, falling back to the last slug segment.
    pub fn display_title(&self) -> String {
        match &self.title {
            Some(title) => title.clone(),
            None => self
                .slug
                .last()
                .map(|segment| markdown_docs_format::format_name(segment))
                .unwrap_or_default(),
        }
    }
}

/// Why a slug did not produce a document. Consumers treat every variant as
/// "not found"; the variants stay distinct for logging and tests.
#[derive(Debug, Error)]
pub enum DocumentError {
    #[error(transparent)]
    InvalidSlug(#[from] SlugError),
    #[error("document {path} not found")]
    NotFound { path: PathBuf },
    #[error("failed to read document {path}: {source}")]
    Io { path: PathBuf, source: io::Error },
}

impl DocumentError {
    /// True when the document simply does not exist.
    pub fn is_missing(&self) -> bool {
        matches!(self, DocumentError::NotFound { .. })
    }
}

/// Resolve `<root>/<s1>/.../<sN>.<extension>` and convert it to HTML.
pub fn render_document<S: AsRef<str>>(
    root: &Path,
    extension: &str,
    slug: &[S],
    renderer: &MarkdownRenderer,
) -> Result<RenderedDocument, DocumentError> {
    let path = resolve_document_path(root, extension, slug)?;

    match fs::metadata(&path) {
        Ok(metadata) if metadata.is_file() => {}
        Ok(_) => return Err(DocumentError::NotFound { path }),
        Err(err) if err.kind() == io::ErrorKind::NotFound => {
            return Err(DocumentError::NotFound { path })
        }
        Err(source) => return Err(DocumentError::Io { path, source }),
    }

    let source = match fs::read_to_string(&path) {
        Ok(source) => source,
        Err(source) => return Err(DocumentError::Io { path, source }),
    };

    let rendered = renderer.render(&source);
    debug!(path = %path.display(), bytes = rendered.html.len(), "document rendered");

    Ok(RenderedDocument {
        slug: slug.iter().map(|s| s.as_ref().to_string()).collect(),
        source_path: path,
        title: rendered.title,
        html: rendered.html,
    })
}

/// File path a slug addresses, after validating every segment.
pub fn resolve_document_path<S: AsRef<str>>(
    root: &Path,
    extension: &str,
    slug: &[S],
) -> Result<PathBuf, DocumentError> {
    validate_slug(slug)?;
    let mut path = root.to_path_buf();
    if let Some((last, parents)) = slug.split_last() {
        for segment in parents {
            path.push(segment.as_ref());
        }
        path.push(format!("{}.{extension}", last.as_ref()));
    }
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolves_segments_under_root() {
        let path = resolve_document_path(Path::new("/srv/docs"), "md", &["dart", "sub", "topic"])
            .expect("valid slug");
        assert_eq!(path, Path::new("/srv/docs/dart/sub/topic.md"));
    }

    #[test]
    fn traversal_is_rejected_before_touching_disk() {
        let err = resolve_document_path(Path::new("/srv/docs"), "md", &["..", "etc", "passwd"])
            .expect_err("traversal");
        assert!(matches!(err, DocumentError::InvalidSlug(_)));
        assert!(!err.is_missing());
    }

    #[test]
    fn display_title_falls_back_to_slug() {
        let document = RenderedDocument {
            slug: vec!["dart".into(), "data-types".into()],
            source_path: PathBuf::from("/srv/docs/dart/data-types.md"),
            title: None,
            html: String::new(),
        };
        assert_eq!(document.display_title(), "Data Types");
    }
}
