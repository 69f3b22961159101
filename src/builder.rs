use std::path::PathBuf;

use tracing::debug;

use crate::error::HclError;
use crate::file::{parse_document, read_document};
use crate::merge::merge_tables;
use crate::resolver::HclResolver;
use crate::schema::FlagHints;
use crate::tree::Table;

/// Entry point for loading a configuration document.
pub struct HclConfig;

impl HclConfig {
    pub fn builder() -> HclConfigBuilder {
        HclConfigBuilder::new()
    }
}

#[derive(Debug, Clone)]
enum Source {
    Text(String),
    File(PathBuf),
}

/// Builder for loading configuration and annotating the flags it feeds.
///
/// Sources are layered in the order they are added: each one is a sparse
/// overlay, and later sources override earlier ones key by key.
#[derive(Debug, Clone)]
pub struct HclConfigBuilder {
    sources: Vec<Source>,
    hints: FlagHints,
    strict: bool,
}

impl HclConfigBuilder {
    fn new() -> Self {
        Self {
            sources: Vec::new(),
            hints: FlagHints::default(),
            strict: true,
        }
    }

    /// Add an inline document.
    pub fn source(mut self, text: &str) -> Self {
        self.sources.push(Source::Text(text.to_string()));
        self
    }

    /// Add a document file. A leading `~` expands to the home directory.
    ///
    /// A missing file contributes nothing; other I/O errors fail the load.
    pub fn file(mut self, path: impl Into<PathBuf>) -> Self {
        self.sources.push(Source::File(path.into()));
        self
    }

    /// Mark a flag (by arg id or long name) as taking a whole fragment.
    pub fn raw_flag(mut self, id: &str) -> Self {
        self.hints.raw(id);
        self
    }

    /// Prepend a literal prefix to a flag's name (by arg id or long name)
    /// when mapping it to a configuration key.
    pub fn prefix(mut self, id: &str, prefix: &str) -> Self {
        self.hints.prefix(id, prefix);
        self
    }

    /// Enable or disable strict mode (default: `true`).
    /// In strict mode, keys that match no flag are errors.
    pub fn strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    /// Read and parse every source into a resolver.
    pub fn load(self) -> Result<HclResolver, HclError> {
        let mut tree = Table::new();
        for source in &self.sources {
            let layer = match source {
                Source::Text(text) => parse_document(text)?,
                Source::File(path) => match read_document(path)? {
                    Some(text) => parse_document(&text)?,
                    None => continue,
                },
            };
            tree = merge_tables(tree, layer);
        }
        debug!(
            sources = self.sources.len(),
            keys = tree.len(),
            strict = self.strict,
            "loaded configuration"
        );
        Ok(HclResolver::new(tree, self.hints, self.strict))
    }
}
