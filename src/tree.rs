//! The generic key/value tree that resolution and validation operate on.
//!
//! A parsed [`Document`] is converted into a [`Table`]: attributes become
//! [`Node::Value`]s, and blocks become [`Node::Groups`]. A block key repeated at
//! one level appends another table to the same group instead of merging, and
//! block labels nest as single-table groups:
//!
//! ```text
//! item "a" { x = 1 }    =>    item -> [ { a -> [ { x = 1 } ] } ]
//! ```
//!
//! JSON documents are converted into the same shape by [`Table::from_json`].

use indexmap::IndexMap;
use serde::Serialize;
use serde::ser::{SerializeSeq, Serializer};

use crate::ast::{Block, Document, Entry, EntryBody};
use crate::error::HclError;
use crate::value::Value;

/// An insertion-ordered mapping of keys to nodes.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(transparent)]
pub struct Table(IndexMap<String, Node>);

#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Value(Value),
    /// One table per occurrence of the block key, in document order.
    Groups(Vec<Table>),
}

impl Table {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str) -> Option<&Node> {
        self.0.get(key)
    }

    /// Insert a node. An existing key keeps its position and is replaced.
    pub fn insert(&mut self, key: impl Into<String>, node: Node) {
        self.0.insert(key.into(), node);
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Node)> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub(crate) fn get_mut(&mut self, key: &str) -> Option<&mut Node> {
        self.0.get_mut(key)
    }

    pub(crate) fn into_entries(self) -> impl Iterator<Item = (String, Node)> {
        self.0.into_iter()
    }

    /// Convert an already-decoded JSON tree.
    ///
    /// Objects become single-table groups and arrays of objects become
    /// multi-table groups. `null`, and arrays mixing objects with scalars,
    /// have no representation and fail with [`HclError::UnsupportedValue`].
    pub fn from_json(value: serde_json::Value) -> Result<Table, HclError> {
        match value {
            serde_json::Value::Object(map) => table_from_map(map, ""),
            other => Err(HclError::UnsupportedValue {
                key: "<root>".into(),
                kind: json_kind(&other),
            }),
        }
    }
}

impl From<Document> for Table {
    fn from(doc: Document) -> Self {
        let mut table = Table::new();
        insert_entries(&mut table, doc.entries);
        table
    }
}

impl Serialize for Node {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Node::Value(v) => v.serialize(serializer),
            Node::Groups(groups) if groups.len() == 1 => groups[0].serialize(serializer),
            Node::Groups(groups) => {
                let mut seq = serializer.serialize_seq(Some(groups.len()))?;
                for table in groups {
                    seq.serialize_element(table)?;
                }
                seq.end()
            }
        }
    }
}

fn insert_entries(table: &mut Table, entries: Vec<Entry>) {
    for Entry { key, body } in entries {
        match body {
            EntryBody::Value(v) => table.insert(key, Node::Value(v)),
            EntryBody::Block(block) => push_group(table, key, block_table(block)),
        }
    }
}

fn block_table(block: Block) -> Table {
    let mut inner = Table::new();
    insert_entries(&mut inner, block.entries);
    for label in block.parameters.into_iter().rev() {
        let mut outer = Table::new();
        outer.insert(label.render(), Node::Groups(vec![inner]));
        inner = outer;
    }
    inner
}

fn push_group(table: &mut Table, key: String, sub: Table) {
    if let Some(Node::Groups(groups)) = table.get_mut(&key) {
        groups.push(sub);
        return;
    }
    table.insert(key, Node::Groups(vec![sub]));
}

fn table_from_map(
    map: serde_json::Map<String, serde_json::Value>,
    prefix: &str,
) -> Result<Table, HclError> {
    let mut table = Table::new();
    for (key, value) in map {
        let path = if prefix.is_empty() {
            key.clone()
        } else {
            format!("{prefix}-{key}")
        };
        let node = node_from_json(value, &path)?;
        table.insert(key, node);
    }
    Ok(table)
}

fn node_from_json(value: serde_json::Value, path: &str) -> Result<Node, HclError> {
    match value {
        serde_json::Value::Object(map) => Ok(Node::Groups(vec![table_from_map(map, path)?])),
        serde_json::Value::Array(items)
            if !items.is_empty() && items.iter().all(serde_json::Value::is_object) =>
        {
            let groups = items
                .into_iter()
                .filter_map(|item| match item {
                    serde_json::Value::Object(map) => Some(table_from_map(map, path)),
                    _ => None,
                })
                .collect::<Result<Vec<_>, _>>()?;
            Ok(Node::Groups(groups))
        }
        other => Ok(Node::Value(value_from_json(other, path)?)),
    }
}

fn value_from_json(value: serde_json::Value, path: &str) -> Result<Value, HclError> {
    let unsupported = |kind| HclError::UnsupportedValue {
        key: path.to_string(),
        kind,
    };
    match value {
        serde_json::Value::Bool(b) => Ok(Value::Bool(b)),
        serde_json::Value::String(s) => Ok(Value::Str(s)),
        serde_json::Value::Number(n) => n
            .as_f64()
            .map(Value::Number)
            .ok_or_else(|| unsupported("number")),
        serde_json::Value::Array(items) => items
            .into_iter()
            .map(|item| value_from_json(item, path))
            .collect::<Result<Vec<_>, _>>()
            .map(Value::Array),
        other => Err(unsupported(json_kind(&other))),
    }
}

fn json_kind(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "bool",
        serde_json::Value::Number(_) => "number",
        serde_json::Value::String(_) => "string",
        serde_json::Value::Array(_) => "array",
        serde_json::Value::Object(_) => "object",
    }
}
