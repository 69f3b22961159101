//! Flatten a configuration tree into the key paths it contains.
//!
//! Paths are reported leaf-first in document order and deduplicated:
//! `item { a = 1 } item { a = 2 }` yields `["item", "a"]` once, because every
//! sibling of a repeated group contributes its paths under the same prefix.

use indexmap::IndexSet;

use crate::tree::{Node, Table};

/// Collect every leaf path of `table`.
///
/// A value terminates a path. A group recurses into each of its tables; a
/// group whose tables are all empty (`group {}`) is itself a leaf.
pub fn flatten(table: &Table) -> Vec<Vec<String>> {
    let mut out = IndexSet::new();
    let mut prefix = Vec::new();
    flatten_table(table, &mut prefix, &mut out);
    out.into_iter().collect()
}

/// Join a path with `-`, the separator flag names use.
pub fn key_string(path: &[String]) -> String {
    path.join("-")
}

fn flatten_table(table: &Table, prefix: &mut Vec<String>, out: &mut IndexSet<Vec<String>>) {
    for (key, node) in table.iter() {
        prefix.push(key.clone());
        match node {
            Node::Value(_) => {
                out.insert(prefix.clone());
            }
            Node::Groups(groups) if groups.iter().all(Table::is_empty) => {
                out.insert(prefix.clone());
            }
            Node::Groups(groups) => {
                for group in groups {
                    flatten_table(group, prefix, out);
                }
            }
        }
        prefix.pop();
    }
}
