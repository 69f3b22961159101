use crate::value::Value;

/// Root of a parsed configuration document.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Document {
    pub entries: Vec<Entry>,
}

/// A key bound either to a value (`key = value`) or to a block
/// (`key "label" { ... }`).
#[derive(Debug, Clone, PartialEq)]
pub struct Entry {
    pub key: String,
    pub body: EntryBody,
}

#[derive(Debug, Clone, PartialEq)]
pub enum EntryBody {
    Value(Value),
    Block(Block),
}

/// A nested scope. `parameters` are the labels written before the `{`.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Block {
    pub parameters: Vec<Value>,
    pub entries: Vec<Entry>,
}

impl Entry {
    pub fn value(&self) -> Option<&Value> {
        match &self.body {
            EntryBody::Value(v) => Some(v),
            EntryBody::Block(_) => None,
        }
    }

    pub fn block(&self) -> Option<&Block> {
        match &self.body {
            EntryBody::Block(b) => Some(b),
            EntryBody::Value(_) => None,
        }
    }
}
