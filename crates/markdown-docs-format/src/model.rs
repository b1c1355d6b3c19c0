use std::collections::btree_map;
use std::collections::BTreeMap;
use std::fmt;
use std::path::{Path, PathBuf};

use serde::{Serialize, Serializer};

/// Minimal record describing one discovered markdown file.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct DocumentDescriptor {
    /// File name with the markdown extension removed.
    pub name: String,
    /// Slash-joined path from the category down to the file, extension
    /// removed, always starting with `/` (e.g. `/dart/sub/topic`).
    pub path: String,
    /// Directories are flattened into their parent category, so this is
    /// always `false`.
    pub is_directory: bool,
}

impl DocumentDescriptor {
    pub fn new(name: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
            is_directory: false,
        }
    }

    /// Path segments that address this document in the detail view.
    pub fn slug(&self) -> Vec<&str> {
        self.path
            .split('/')
            .filter(|segment| !segment.is_empty())
            .collect()
    }
}

/// Mapping from category name to the documents found beneath it.
///
/// Categories iterate in lexicographic order; documents keep the order in
/// which the directory walk produced them.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Catalog {
    categories: BTreeMap<String, Vec<DocumentDescriptor>>,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a category. Existing entries are left untouched.
    pub fn insert_category(&mut self, name: impl Into<String>) -> &mut Vec<DocumentDescriptor> {
        self.categories.entry(name.into()).or_default()
    }

    pub fn get(&self, category: &str) -> Option<&[DocumentDescriptor]> {
        self.categories.get(category).map(Vec::as_slice)
    }

    pub fn contains(&self, category: &str) -> bool {
        self.categories.contains_key(category)
    }

    pub fn categories(&self) -> impl Iterator<Item = &str> {
        self.categories.keys().map(String::as_str)
    }

    pub fn iter(&self) -> btree_map::Iter<'_, String, Vec<DocumentDescriptor>> {
        self.categories.iter()
    }

    pub fn len(&self) -> usize {
        self.categories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }

    pub fn document_count(&self) -> usize {
        self.categories.values().map(Vec::len).sum()
    }
}

impl<'a> IntoIterator for &'a Catalog {
    type Item = (&'a String, &'a Vec<DocumentDescriptor>);
    type IntoIter = btree_map::Iter<'a, String, Vec<DocumentDescriptor>>;

    fn into_iter(self) -> Self::IntoIter {
        self.categories.iter()
    }
}

/// Non-fatal problem recorded while building a catalog.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct CatalogDiagnostic {
    pub kind: DiagnosticKind,
    /// Serialized lossily: the offending entry may not be valid UTF-8.
    #[serde(serialize_with = "serialize_lossy_path")]
    pub path: PathBuf,
    pub message: String,
}

fn serialize_lossy_path<S: Serializer>(path: &Path, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&path.to_string_lossy())
}

impl fmt::Display for CatalogDiagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}: {}", self.kind, self.path.display(), self.message)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum DiagnosticKind {
    /// The document root does not exist.
    RootMissing,
    /// A directory could not be listed; its subtree contributed nothing.
    ReadFailed,
    /// An entry name is not valid UTF-8 and cannot be addressed by a slug.
    NonUtf8Name,
}

impl DiagnosticKind {
    pub fn as_str(self) -> &'static str {
        match self {
            DiagnosticKind::RootMissing => "root-missing",
            DiagnosticKind::ReadFailed => "read-failed",
            DiagnosticKind::NonUtf8Name => "non-utf8-name",
        }
    }
}

impl fmt::Display for DiagnosticKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
