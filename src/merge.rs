use crate::tree::{Node, Table};

/// Deep-merge `overlay` on top of `base`.
/// If both sides hold a single-table group for the same key, recurse.
/// Otherwise, `overlay`'s node wins.
pub fn merge_tables(mut base: Table, overlay: Table) -> Table {
    for (key, overlay_node) in overlay.into_entries() {
        let merged = match (base.get(&key), overlay_node) {
            (Some(Node::Groups(base_groups)), Node::Groups(mut overlay_groups))
                if base_groups.len() == 1 && overlay_groups.len() == 1 =>
            {
                let inner = merge_tables(base_groups[0].clone(), overlay_groups.remove(0));
                Node::Groups(vec![inner])
            }
            (_, overlay_node) => overlay_node,
        };
        base.insert(key, merged);
    }
    base
}

/// Fold a group's tables into one, later tables winning.
pub fn merge_groups(groups: &[Table]) -> Table {
    groups
        .iter()
        .cloned()
        .fold(Table::new(), merge_tables)
}
