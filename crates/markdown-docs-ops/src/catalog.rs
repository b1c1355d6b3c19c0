use std::fs;
use std::io;
use std::path::{Component, Path, PathBuf};

use markdown_docs_format::{Catalog, CatalogDiagnostic, DiagnosticKind, DocumentDescriptor};
use tracing::{debug, warn};
use walkdir::WalkDir;

/// Result of a catalog build: the (possibly partial) catalog plus every
/// read problem met along the way.
#[derive(Clone, Debug, Default)]
pub struct CatalogOutcome {
    pub catalog: Catalog,
    pub diagnostics: Vec<CatalogDiagnostic>,
}

impl CatalogOutcome {
    /// True when every directory was read successfully.
    pub fn is_complete(&self) -> bool {
        self.diagnostics.is_empty()
    }
}

/// Walk `root` and group every `*.{extension}` file under the top-level
/// directory it lives in.
///
/// Never fails: unreadable directories are recorded as diagnostics and
/// contribute nothing, their siblings are still visited.
pub fn build_catalog(root: &Path, extension: &str) -> CatalogOutcome {
    let suffix = format!(".{extension}");
    let mut outcome = CatalogOutcome::default();

    let entries = match fs::read_dir(root) {
        Ok(entries) => entries,
        Err(err) => {
            let kind = if err.kind() == io::ErrorKind::NotFound {
                DiagnosticKind::RootMissing
            } else {
                DiagnosticKind::ReadFailed
            };
            record(&mut outcome.diagnostics, kind, root, err.to_string());
            return outcome;
        }
    };

    for entry in entries {
        let entry = match entry {
            Ok(entry) => entry,
            Err(err) => {
                record(
                    &mut outcome.diagnostics,
                    DiagnosticKind::ReadFailed,
                    root,
                    err.to_string(),
                );
                continue;
            }
        };

        let is_dir = match entry.file_type() {
            Ok(file_type) => file_type.is_dir(),
            Err(err) => {
                record(
                    &mut outcome.diagnostics,
                    DiagnosticKind::ReadFailed,
                    &entry.path(),
                    err.to_string(),
                );
                continue;
            }
        };
        if !is_dir {
            continue;
        }

        let file_name = entry.file_name();
        let Some(category) = file_name.to_str() else {
            record_non_utf8(&mut outcome.diagnostics, &entry.path());
            continue;
        };

        let documents = collect_documents(&entry.path(), category, &suffix, &mut outcome.diagnostics);
        outcome.catalog.insert_category(category).extend(documents);
    }

    debug!(
        root = %root.display(),
        categories = outcome.catalog.len(),
        documents = outcome.catalog.document_count(),
        diagnostics = outcome.diagnostics.len(),
        "catalog built"
    );
    outcome
}

/// Depth-first walk of one category, flattening nested directories.
fn collect_documents(
    category_dir: &Path,
    category: &str,
    suffix: &str,
    diagnostics: &mut Vec<CatalogDiagnostic>,
) -> Vec<DocumentDescriptor> {
    let mut documents = Vec::new();
    let mut walker = WalkDir::new(category_dir)
        .min_depth(1)
        .sort_by_file_name()
        .into_iter();

    while let Some(entry) = walker.next() {
        let entry = match entry {
            Ok(entry) => entry,
            Err(err) => {
                let path = err.path().unwrap_or(category_dir).to_path_buf();
                record(diagnostics, DiagnosticKind::ReadFailed, &path, err.to_string());
                continue;
            }
        };

        let Some(name) = entry.file_name().to_str() else {
            record_non_utf8(diagnostics, entry.path());
            if entry.file_type().is_dir() {
                walker.skip_current_dir();
            }
            continue;
        };

        if entry.file_type().is_dir() {
            continue;
        }

        let Some(stem) = name.strip_suffix(suffix) else {
            continue;
        };
        if stem.is_empty() {
            continue;
        }

        if let Some(path) = descriptor_path(category, category_dir, entry.path(), stem) {
            documents.push(DocumentDescriptor::new(stem, path));
        }
    }

    documents
}

/// `/<category>/<dir>/.../<stem>` with forward slashes on every platform.
fn descriptor_path(category: &str, category_dir: &Path, file: &Path, stem: &str) -> Option<String> {
    let relative = file.strip_prefix(category_dir).ok()?;
    let mut path = format!("/{category}");
    if let Some(parent) = relative.parent() {
        for component in parent.components() {
            match component {
                Component::Normal(segment) => {
                    path.push('/');
                    path.push_str(segment.to_str()?);
                }
                _ => return None,
            }
        }
    }
    path.push('/');
    path.push_str(stem);
    Some(path)
}

fn record(
    diagnostics: &mut Vec<CatalogDiagnostic>,
    kind: DiagnosticKind,
    path: &Path,
    message: String,
) {
    warn!(kind = %kind, path = %path.display(), "{message}");
    diagnostics.push(CatalogDiagnostic {
        kind,
        path: PathBuf::from(path),
        message,
    });
}

fn record_non_utf8(diagnostics: &mut Vec<CatalogDiagnostic>, path: &Path) {
    record(
        diagnostics,
        DiagnosticKind::NonUtf8Name,
        path,
        "entry name is not valid UTF-8; skipped".to_string(),
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn descriptor_path_joins_with_forward_slashes() {
        let category_dir = Path::new("/srv/docs/dart");
        let file = category_dir.join("sub").join("deeper").join("topic.md");
        assert_eq!(
            descriptor_path("dart", category_dir, &file, "topic").as_deref(),
            Some("/dart/sub/deeper/topic")
        );
    }

    #[test]
    fn descriptor_path_for_top_level_file() {
        let category_dir = Path::new("/srv/docs/dart");
        let file = category_dir.join("intro.md");
        assert_eq!(
            descriptor_path("dart", category_dir, &file, "intro").as_deref(),
            Some("/dart/intro")
        );
    }
}
