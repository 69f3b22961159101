//! The flag model and the set of configuration keys it accepts.
//!
//! A flag's configuration key is built from its enclosing command chain, its
//! optional group, and its name with any literal prefix prepended, joined
//! with `-`:
//!
//! ```text
//! commands...  group  prefix+name
//! serve      - net  - tls-cert
//! ```
//!
//! Prefixes always sit next to the name and groups outside them.

use std::collections::{BTreeMap, BTreeSet};

use indexmap::IndexSet;

use crate::flatten::key_string;

/// One flag as seen by the configuration layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlagSpec {
    /// Identifier used by the argument parser (clap's arg id).
    pub id: String,
    /// Flag name without prefix, e.g. `flag-name`.
    pub name: String,
    /// Subcommand names from the outermost down, excluding the application.
    pub commands: Vec<String>,
    pub group: Option<String>,
    /// Literal prefix prepended to the name, e.g. `prefix-`.
    pub prefix: Option<String>,
    /// The flag consumes an opaque configuration fragment.
    pub raw: bool,
}

impl FlagSpec {
    pub fn new(name: &str) -> Self {
        Self {
            id: name.to_string(),
            name: name.to_string(),
            commands: Vec::new(),
            group: None,
            prefix: None,
            raw: false,
        }
    }

    pub fn id(mut self, id: &str) -> Self {
        self.id = id.to_string();
        self
    }

    pub fn commands<I, S>(mut self, commands: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.commands = commands.into_iter().map(Into::into).collect();
        self
    }

    pub fn group(mut self, group: &str) -> Self {
        self.group = Some(group.to_string());
        self
    }

    pub fn prefix(mut self, prefix: &str) -> Self {
        self.prefix = Some(prefix.to_string());
        self
    }

    pub fn raw(mut self) -> Self {
        self.raw = true;
        self
    }

    /// The name with its literal prefix applied.
    pub fn full_name(&self) -> String {
        match &self.prefix {
            Some(prefix) => format!("{prefix}{}", self.name),
            None => self.name.clone(),
        }
    }

    /// Path segments used to look this flag up in the configuration tree.
    pub fn path(&self) -> Vec<String> {
        let mut path = self.commands.clone();
        if let Some(group) = &self.group {
            path.push(group.clone());
        }
        path.push(self.full_name());
        path
    }

    /// The dash-joined configuration key for this flag.
    pub fn key(&self) -> String {
        key_string(&self.path())
    }
}

/// All flags reachable from an application root.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FlagModel {
    flags: Vec<FlagSpec>,
}

impl FlagModel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn flag(mut self, flag: FlagSpec) -> Self {
        self.flags.push(flag);
        self
    }

    pub fn push(&mut self, flag: FlagSpec) {
        self.flags.push(flag);
    }

    pub fn flags(&self) -> &[FlagSpec] {
        &self.flags
    }

    /// Walk the model and collect the keys configuration may use.
    pub fn schema(&self) -> Schema {
        let mut schema = Schema::default();
        for flag in &self.flags {
            let key = flag.key();
            if flag.raw {
                schema.raw_prefixes.push(key);
            } else {
                schema.valid.insert(key);
            }
        }
        schema
    }
}

/// Keys accepted in a configuration document.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Schema {
    /// Exact keys of ordinary flags.
    pub valid: IndexSet<String>,
    /// Keys of raw flags. Anything at or below one of these is accepted
    /// without further checks.
    pub raw_prefixes: Vec<String>,
}

impl Schema {
    pub fn accepts(&self, key: &str) -> bool {
        self.valid.contains(key) || self.raw_prefixes.iter().any(|p| covers(p, key))
    }
}

/// `prefix` covers `key` when they are equal or `key` continues past it with
/// a `-` segment boundary.
fn covers(prefix: &str, key: &str) -> bool {
    match key.strip_prefix(prefix) {
        Some(rest) => rest.is_empty() || rest.starts_with('-'),
        None => false,
    }
}

/// Per-flag annotations the argument parser cannot express itself.
///
/// Keyed by arg id or long flag name.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FlagHints {
    raw: BTreeSet<String>,
    prefixes: BTreeMap<String, String>,
}

impl FlagHints {
    pub fn raw(&mut self, id: &str) {
        self.raw.insert(id.to_string());
    }

    pub fn prefix(&mut self, id: &str, prefix: &str) {
        self.prefixes.insert(id.to_string(), prefix.to_string());
    }

    pub fn is_raw(&self, id: &str, name: &str) -> bool {
        self.raw.contains(id) || self.raw.contains(name)
    }

    pub fn prefix_for(&self, id: &str, name: &str) -> Option<&str> {
        self.prefixes
            .get(id)
            .or_else(|| self.prefixes.get(name))
            .map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_flag_key() {
        assert_eq!(FlagSpec::new("flag-name").key(), "flag-name");
    }

    #[test]
    fn command_chain_comes_first() {
        let flag = FlagSpec::new("command-flag").commands(["command", "sub"]);
        assert_eq!(flag.path(), ["command", "sub", "command-flag"]);
        assert_eq!(flag.key(), "command-sub-command-flag");
    }

    #[test]
    fn group_precedes_name() {
        let flag = FlagSpec::new("grouped-flag").group("group");
        assert_eq!(flag.key(), "group-grouped-flag");
    }

    #[test]
    fn prefix_is_prepended_to_name() {
        let flag = FlagSpec::new("prefixed-flag").prefix("prefix-");
        assert_eq!(flag.full_name(), "prefix-prefixed-flag");
        assert_eq!(flag.path(), ["prefix-prefixed-flag"]);
    }

    #[test]
    fn group_is_outside_prefix() {
        let flag = FlagSpec::new("cert")
            .commands(["serve"])
            .group("net")
            .prefix("tls-");
        assert_eq!(flag.path(), ["serve", "net", "tls-cert"]);
        assert_eq!(flag.key(), "serve-net-tls-cert");
    }

    #[test]
    fn schema_splits_raw_flags() {
        let model = FlagModel::new()
            .flag(FlagSpec::new("flag"))
            .flag(FlagSpec::new("fragment").raw());
        let schema = model.schema();
        assert!(schema.valid.contains("flag"));
        assert!(!schema.valid.contains("fragment"));
        assert_eq!(schema.raw_prefixes, ["fragment"]);
    }

    #[test]
    fn raw_prefix_respects_segment_boundaries() {
        let schema = FlagModel::new()
            .flag(FlagSpec::new("fragment").raw())
            .schema();
        assert!(schema.accepts("fragment"));
        assert!(schema.accepts("fragment-obj-one"));
        assert!(!schema.accepts("fragments"));
        assert!(!schema.accepts("frag"));
    }

    #[test]
    fn hints_match_id_or_name() {
        let mut hints = FlagHints::default();
        hints.raw("fragment");
        hints.prefix("prefixed_flag", "prefix-");
        assert!(hints.is_raw("fragment", "other"));
        assert!(hints.is_raw("other", "fragment"));
        assert!(!hints.is_raw("flag", "flag"));
        assert_eq!(hints.prefix_for("prefixed_flag", "x"), Some("prefix-"));
        assert_eq!(hints.prefix_for("y", "x"), None);
    }
}
