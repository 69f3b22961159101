//! Opaque configuration fragments carried by a single flag.
//!
//! A raw flag takes a whole sub-tree of configuration instead of a scalar.
//! On the command line its value is a path to a file holding the fragment,
//! an inline fragment, or inline JSON. In a configuration document it is an
//! ordinary block, which the resolver hands over as inline JSON:
//!
//! ```text
//! fragment {
//!   str = "field"
//!   obj { one = 1 }
//! }
//! ```
//!
//! The fragment is decoded into any [`serde::Deserialize`] type afterwards
//! with [`RawConfig::decode`].

use std::path::Path;
use std::str::FromStr;

use serde::de::DeserializeOwned;
use serde_json::{Map, Value as JsonValue};
use tracing::debug;

use crate::error::HclError;
use crate::file::{expand_path, is_json};
use crate::parser::parse;
use crate::tree::Table;

/// A decoded configuration fragment.
///
/// Use it as a clap flag type with `value_parser = clap::value_parser!(RawConfig)`
/// or anywhere a [`FromStr`] value is accepted.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawConfig(Map<String, JsonValue>);

impl RawConfig {
    pub fn as_map(&self) -> &Map<String, JsonValue> {
        &self.0
    }

    pub fn into_map(self) -> Map<String, JsonValue> {
        self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Deserialize the fragment into `T`.
    ///
    /// Single blocks are objects and repeated blocks are arrays of objects.
    pub fn decode<T: DeserializeOwned>(&self) -> Result<T, HclError> {
        serde_json::from_value(JsonValue::Object(self.0.clone())).map_err(|e| HclError::Decode {
            origin: "fragment".into(),
            reason: e.to_string(),
        })
    }

    fn from_table(table: &Table, origin: &str) -> Result<Self, HclError> {
        match serde_json::to_value(table) {
            Ok(JsonValue::Object(map)) => Ok(RawConfig(map)),
            Ok(other) => Err(HclError::Decode {
                origin: origin.to_string(),
                reason: format!("expected a table, found {other}"),
            }),
            Err(e) => Err(HclError::Decode {
                origin: origin.to_string(),
                reason: e.to_string(),
            }),
        }
    }

    fn from_json_text(text: &str, origin: &str) -> Result<Self, HclError> {
        serde_json::from_str(text)
            .map(RawConfig)
            .map_err(|e| HclError::Decode {
                origin: origin.to_string(),
                reason: e.to_string(),
            })
    }

    fn from_fragment_text(text: &str, origin: &str) -> Result<Self, HclError> {
        if is_json(text) {
            return Self::from_json_text(text, origin);
        }
        let doc = parse(text).map_err(|e| HclError::Decode {
            origin: origin.to_string(),
            reason: e.to_string(),
        })?;
        Self::from_table(&Table::from(doc), origin)
    }
}

impl FromStr for RawConfig {
    type Err = HclError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if is_json(s) {
            return Self::from_json_text(s, "inline fragment");
        }

        // Inline fragments can be long or contain `/`, which the OS may report
        // as something other than NotFound, so check existence first.
        let path = expand_path(Path::new(s.trim()));
        if !path.exists() {
            debug!(value = %s, "no such fragment file, decoding value as inline fragment");
            return Self::from_fragment_text(s, "inline fragment");
        }
        match std::fs::read_to_string(&path) {
            Ok(content) => Self::from_fragment_text(&content, &path.display().to_string()),
            Err(e) => Err(HclError::Decode {
                origin: path.display().to_string(),
                reason: e.to_string(),
            }),
        }
    }
}

/// Decode a file path, inline fragment, or inline JSON straight into `T`.
pub fn decode_fragment<T: DeserializeOwned>(text: &str) -> Result<T, HclError> {
    text.parse::<RawConfig>()?.decode()
}
