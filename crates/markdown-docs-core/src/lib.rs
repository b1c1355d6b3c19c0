//! Core orchestration layer for markdown-docs.

use markdown_docs_config::Config;
use markdown_docs_ops::Operations;

/// Entry point for higher-level consumers (CLI, HTTP server).
#[derive(Clone, Debug)]
pub struct MarkdownDocs {
    ops: Operations,
}

impl MarkdownDocs {
    /// Bootstrap the markdown-docs engine from configuration.
    pub fn bootstrap(config: Config) -> Self {
        Self {
            ops: Operations::new(config),
        }
    }

    /// Access the operation bundle.
    pub fn operations(&self) -> &Operations {
        &self.ops
    }

    pub fn config(&self) -> &Config {
        self.ops.config()
    }
}
