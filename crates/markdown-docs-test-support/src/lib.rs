//! Shared test harness utilities for markdown-docs crates.

use std::fs;
use std::path::{Path, PathBuf};

use markdown_docs_config::{Config, LoadOptions};
use tempfile::TempDir;

/// Temporary workspace holding a `docs/` tree.
pub struct DocsFixture {
    _temp: TempDir,
    workspace: PathBuf,
}

impl DocsFixture {
    /// Workspace with an empty `docs/` directory.
    pub fn new() -> Self {
        let fixture = Self::without_docs();
        fs::create_dir_all(fixture.root()).expect("create docs root");
        fixture
    }

    /// Workspace with no `docs/` directory at all.
    pub fn without_docs() -> Self {
        let temp = TempDir::new().expect("tempdir");
        let workspace = fs::canonicalize(temp.path()).expect("canonicalize tempdir");
        Self {
            _temp: temp,
            workspace,
        }
    }

    pub fn workspace(&self) -> &Path {
        &self.workspace
    }

    /// Default document root, `<workspace>/docs`.
    pub fn root(&self) -> PathBuf {
        self.workspace.join("docs")
    }

    /// Write `contents` to `docs/<relative>`, creating parent directories.
    pub fn write(&self, relative: &str, contents: &str) -> PathBuf {
        let path = self.root().join(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("create parent directory");
        }
        fs::write(&path, contents).expect("write fixture file");
        path
    }

    /// Create `docs/<relative>` as a directory.
    pub fn mkdir(&self, relative: &str) -> PathBuf {
        let path = self.root().join(relative);
        fs::create_dir_all(&path).expect("create fixture directory");
        path
    }

    /// Write a file relative to the workspace rather than the docs root.
    pub fn write_workspace_file(&self, relative: &str, contents: &str) -> PathBuf {
        let path = self.workspace.join(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("create parent directory");
        }
        fs::write(&path, contents).expect("write workspace file");
        path
    }

    /// Configuration loaded as if the tool were started in the workspace.
    pub fn config(&self) -> Config {
        Config::load(LoadOptions::default().with_working_dir(&self.workspace))
            .expect("load fixture config")
    }
}

impl Default for DocsFixture {
    fn default() -> Self {
        Self::new()
    }
}

/// A small tree with nested documents, an empty category, a stray
/// non-markdown file and a file at the root that belongs to no category.
pub fn sample_docs() -> DocsFixture {
    let fixture = DocsFixture::new();
    fixture.write(
        "dart/data-types.md",
        "# Data Types\n\nDart has `int`, `double` and `String`.\n",
    );
    fixture.write(
        "dart/sub/topic.md",
        "# Nested Topic\n\n## Details\n\n- one\n- two\n",
    );
    fixture.write("dart/notes.txt", "not markdown\n");
    fixture.write(
        "rust/ownership_and_borrowing.md",
        "# Ownership\n\n| rule | meaning |\n|---|---|\n| move | transfer |\n",
    );
    fixture.mkdir("go");
    fixture.write("README.md", "# Root readme\n");
    fixture
}
