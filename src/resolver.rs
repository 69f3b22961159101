//! A loaded configuration tree and the operations flags run against it.

use tracing::debug;

use crate::error::HclError;
use crate::merge::merge_groups;
use crate::resolve::find;
use crate::schema::{FlagHints, FlagModel, FlagSpec};
use crate::tree::{Node, Table};
use crate::validate::validate;

/// Resolves flag defaults from a configuration tree.
///
/// Built by [`HclConfigBuilder::load`](crate::HclConfigBuilder::load). The tree
/// is immutable once loaded, so a resolver can be shared between threads.
#[derive(Debug, Clone)]
pub struct HclResolver {
    tree: Table,
    hints: FlagHints,
    strict: bool,
}

impl HclResolver {
    pub(crate) fn new(tree: Table, hints: FlagHints, strict: bool) -> Self {
        Self {
            tree,
            hints,
            strict,
        }
    }

    pub fn tree(&self) -> &Table {
        &self.tree
    }

    pub fn hints(&self) -> &FlagHints {
        &self.hints
    }

    pub fn is_strict(&self) -> bool {
        self.strict
    }

    /// Find the node a flag path maps to.
    pub fn resolve<S: AsRef<str>>(&self, path: &[S]) -> Option<&Node> {
        find(&self.tree, path)
    }

    /// The textual default for a flag path, if the configuration sets one.
    ///
    /// Values render as plain text, arrays comma-joined. A block renders as a
    /// JSON object, repeated blocks merged in order, which is the form a raw
    /// flag accepts inline.
    pub fn resolve_default<S: AsRef<str>>(&self, path: &[S]) -> Option<String> {
        match self.resolve(path)? {
            Node::Value(value) => Some(value.render()),
            Node::Groups(groups) => match serde_json::to_string(&merge_groups(groups)) {
                Ok(json) => Some(json),
                Err(e) => {
                    debug!(error = %e, "block could not be rendered as JSON, skipping default");
                    None
                }
            },
        }
    }

    /// Check every key in the tree against the flags of `model`.
    pub fn validate(&self, model: &FlagModel) -> Result<(), HclError> {
        validate(&self.tree, &model.schema())
    }

    /// Resolve a default for every flag the configuration sets, in model order.
    pub fn defaults<'a>(&self, model: &'a FlagModel) -> Vec<(&'a FlagSpec, String)> {
        model
            .flags()
            .iter()
            .filter_map(|flag| {
                let value = self.resolve_default(&flag.path())?;
                debug!(flag = %flag.key(), value = %value, "resolved default from configuration");
                Some((flag, value))
            })
            .collect()
    }
}
