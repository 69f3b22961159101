//! Map a flag path onto the configuration tree.
//!
//! Flag keys flatten arbitrary nesting into one dash-joined string, while the
//! document is a real tree, so `group-grouped-flag` may live at
//! `group { grouped-flag = ... }`, at `group-grouped { flag = ... }`, or at the
//! top level as `group-grouped-flag = ...`. Resolution undoes the join:
//!
//! 1. An exact key at the current level wins.
//! 2. Otherwise decreasing dash-prefixes of the key are tried, longest first.
//!    A prefix naming a single-table group descends into it with the remaining
//!    segments, backtracking to shorter prefixes when that finds nothing.
//!    Prefixes naming plain values are skipped.
//! 3. A prefix naming a group with several tables is ambiguous. Resolution
//!    stops there and reports nothing rather than pick a sibling.
//!
//! A flag with no configuration is never an error.

use tracing::debug;

use crate::tree::{Node, Table};

/// Find the node that `path` maps to, if any.
pub fn find<'a, S: AsRef<str>>(table: &'a Table, path: &[S]) -> Option<&'a Node> {
    let key = path
        .iter()
        .map(AsRef::as_ref)
        .collect::<Vec<&str>>()
        .join("-");
    if key.is_empty() {
        return None;
    }
    let parts: Vec<&str> = key.split('-').collect();
    match descend(table, &parts) {
        Lookup::Found(node) => Some(node),
        Lookup::Missing => None,
        Lookup::Ambiguous(prefix) => {
            debug!(key = %key, group = %prefix, "repeated group makes configuration key ambiguous");
            None
        }
    }
}

enum Lookup<'a> {
    Found(&'a Node),
    Missing,
    Ambiguous(String),
}

fn descend<'a>(table: &'a Table, parts: &[&str]) -> Lookup<'a> {
    if let Some(node) = table.get(&parts.join("-")) {
        return Lookup::Found(node);
    }

    for split in (1..parts.len()).rev() {
        let prefix = parts[..split].join("-");
        match table.get(&prefix) {
            Some(Node::Groups(groups)) if groups.len() == 1 => {
                match descend(&groups[0], &parts[split..]) {
                    Lookup::Missing => continue,
                    found => return found,
                }
            }
            Some(Node::Groups(_)) => return Lookup::Ambiguous(prefix),
            _ => continue,
        }
    }
    Lookup::Missing
}
